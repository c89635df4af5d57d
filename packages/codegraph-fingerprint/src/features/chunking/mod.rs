//! Chunking feature module
//!
//! Job queue, oversized-file splitting and remainder reassembly for the
//! worker pool.
//!
//! # Usage
//!
//! ```ignore
//! use crate::features::chunking::{CodeBlockSplitter, JobQueue};
//!
//! let mut queue = JobQueue::new();
//! for chunk in CodeBlockSplitter::new(15 * 1024).split("big.py", &text) {
//!     queue.enqueue(chunk);
//! }
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{next_job_id, JobQueue};
pub use infrastructure::{CodeBlockSplitter, RemainderBuffer};
