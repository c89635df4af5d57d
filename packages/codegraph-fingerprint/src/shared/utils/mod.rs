//! Utility modules shared across features
//!
//! - `hashing`: whitespace stripping, MD5 fingerprint, size thresholds

pub mod hashing;

// Re-exports for convenience
pub use hashing::{fingerprint, strip_whitespace, Thresholds};
