//! Worker-pool distribution engine
//!
//! ```text
//! ParseDriver ──add_job/handle──▶ coordinator (queue, in-flight, remainders)
//!                                    │ JOB / NO_JOB / CLOSE      ▲ RESULT / REMAINDER / LOG / IDLE
//!                                    ▼                           │
//!                                 worker 0..N (one job each, CPU-bound parsing)
//! ```
//!
//! The coordinator never parses; workers never touch the queue.

mod coordinator;
mod handle;
mod state;
mod worker;

pub use coordinator::WorkerPool;
pub use handle::PoolHandle;
pub use state::PoolState;
