//! Worker threads
//!
//! A worker holds at most one job. It blocks on its dispatch channel, runs
//! the job to completion and streams the reply back to the coordinator.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::features::fingerprint::ports::SourceParser;
use crate::pipeline::protocol::{handle_job, Dispatch, WorkerMessage};
use crate::shared::models::Result;

/// What the coordinator receives from worker `worker`
#[derive(Debug)]
pub(crate) enum WorkerEvent {
    Message { worker: usize, message: WorkerMessage },
    Crashed { worker: usize, message: String },
}

pub(crate) fn spawn_worker(
    worker: usize,
    parser: Arc<dyn SourceParser>,
    batch_size: usize,
    dispatch: Receiver<Dispatch>,
    events: Sender<WorkerEvent>,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(format!("fingerprint-worker-{}", worker))
        .spawn(move || run(worker, parser, batch_size, dispatch, events))?;
    Ok(handle)
}

fn run(
    worker: usize,
    parser: Arc<dyn SourceParser>,
    batch_size: usize,
    dispatch: Receiver<Dispatch>,
    events: Sender<WorkerEvent>,
) {
    while let Ok(next) = dispatch.recv() {
        let reply = match next {
            Dispatch::Job(job) => {
                match panic::catch_unwind(AssertUnwindSafe(|| {
                    handle_job(parser.as_ref(), &job, batch_size)
                })) {
                    Ok(reply) => reply,
                    Err(payload) => {
                        let _ = events.send(WorkerEvent::Crashed {
                            worker,
                            message: panic_message(payload.as_ref(), &job.payload.file_name),
                        });
                        return;
                    }
                }
            }
            Dispatch::NoJob => vec![WorkerMessage::Idle],
            Dispatch::Close => return,
        };

        for message in reply {
            if events.send(WorkerEvent::Message { worker, message }).is_err() {
                // coordinator is gone
                return;
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send), file_name: &str) -> String {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("panicked on {}: {}", file_name, reason)
}
