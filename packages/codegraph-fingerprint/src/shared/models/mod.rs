//! Shared models

mod chunk;
mod fingerprint;
mod language;

pub use crate::errors::{CodegraphError, Result};
pub use chunk::{CodeChunk, Job};
pub use fingerprint::FingerprintRecord;
pub use language::{Language, SourceFile};
