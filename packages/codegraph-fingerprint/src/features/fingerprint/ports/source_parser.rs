//! Per-language parser port
//!
//! One `SourceParser` per language turns a file or a chunk of a file into
//! fingerprint records. Errors returned here are scoped to that file; the
//! caller logs them and carries on with an empty result.

use crate::shared::models::{CodeChunk, FingerprintRecord, Language, Result};

/// What a worker produced for one chunk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
    pub records: Vec<FingerprintRecord>,
    /// Text that could not be resolved without its neighbouring chunks
    pub remainder: Option<CodeChunk>,
    /// Diagnostics for parts of the chunk that were dropped
    pub warnings: Vec<String>,
}

impl ChunkOutcome {
    pub fn resolved(records: Vec<FingerprintRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn deferred(remainder: CodeChunk) -> Self {
        Self {
            remainder: Some(remainder),
            ..Self::default()
        }
    }
}

pub trait SourceParser: Send + Sync {
    fn language(&self) -> Language;

    /// Parse a whole file. `clear_cache` asks the front-end to drop its
    /// caches once the file is done.
    fn parse_single(
        &self,
        file_name: &str,
        text: &str,
        clear_cache: bool,
    ) -> Result<Vec<FingerprintRecord>>;

    /// Parse one chunk. Parsers that cannot split files treat every chunk
    /// as a complete file.
    fn parse_chunk(&self, chunk: &CodeChunk, clear_cache: bool) -> Result<ChunkOutcome> {
        let records = self
            .parse_single(&chunk.file_name, &chunk.text, clear_cache)?
            .into_iter()
            .map(|record| record.shifted(chunk.line_offset))
            .collect();
        Ok(ChunkOutcome::resolved(records))
    }

    /// Whether oversized files may be split into chunks for this parser
    fn supports_chunking(&self) -> bool {
        false
    }

    /// Sorted byte offsets where the top-level items of `text` start, or
    /// `None` when the file cannot be cut between items
    fn item_starts(&self, _text: &str) -> Option<Vec<usize>> {
        None
    }

    fn clear_cache(&self) {}
}
