//! FIFO job queue with globally monotonic job ids
//!
//! Owned by a single coordinator; it is never shared between threads.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::shared::models::Job;

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(0);

/// Next id from the process-wide job counter
pub fn next_job_id() -> u64 {
    NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug)]
pub struct JobQueue<T> {
    jobs: VecDeque<Job<T>>,
}

impl<T> JobQueue<T> {
    pub fn new() -> Self {
        Self {
            jobs: VecDeque::new(),
        }
    }

    /// Append `payload` and return the job id it was given
    pub fn enqueue(&mut self, payload: T) -> u64 {
        let job_id = next_job_id();
        self.jobs.push_back(Job::new(payload, job_id));
        job_id
    }

    pub fn dequeue(&mut self) -> Option<Job<T>> {
        self.jobs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<T> Default for JobQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
