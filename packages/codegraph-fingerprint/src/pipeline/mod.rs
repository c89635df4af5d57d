//! Pipeline orchestration
//!
//! - `driver`: per-language buffer, sequential batches or the worker pool
//! - `session`: routes files to drivers by extension
//! - `worker_pool`: coordinator and worker threads
//! - `protocol`: NDJSON messages exchanged with workers

pub mod driver;
pub mod protocol;
pub mod session;
pub mod worker_pool;

pub use driver::ParseDriver;
pub use protocol::{Dispatch, LogLevel, WorkerMessage};
pub use session::{ParseOutput, ParseSession};
pub use worker_pool::{PoolHandle, PoolState, WorkerPool};
