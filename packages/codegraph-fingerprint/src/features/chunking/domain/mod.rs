//! Chunking domain

mod job_queue;

pub use job_queue::{next_job_id, JobQueue};
