//! Fingerprint ports (interfaces)

mod source_parser;

pub use source_parser::{ChunkOutcome, SourceParser};
