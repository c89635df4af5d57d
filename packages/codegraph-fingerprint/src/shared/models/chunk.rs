//! Code chunks and jobs
//!
//! Oversized files travel through the worker pool as several [`CodeChunk`]s.
//! A chunk remembers where it sits in its file (`byte_offset`, `line_offset`) and
//! whether either edge cuts through a top-level item (`open_start`, `open_end`).
//! Pieces of a split file are `partial` until they are forced closed at the
//! end of a run.

use serde::{Deserialize, Serialize};

use crate::errors::{CodegraphError, Result};

/// Contiguous byte range of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChunk {
    pub file_name: String,
    pub text: String,
    /// Position of the chunk among the chunks of its file
    pub chunk_id: u32,
    /// Byte offset of `text` in the file
    pub byte_offset: usize,
    /// Number of newlines in the file before `text`
    pub line_offset: u32,
    /// The chunk starts in the middle of a top-level item
    pub open_start: bool,
    /// The chunk ends in the middle of a top-level item
    pub open_end: bool,
    /// Piece of a split file whose edges have not been confirmed by a parse
    #[serde(default)]
    pub partial: bool,
}

impl CodeChunk {
    /// A whole file as a single closed chunk
    pub fn whole(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            chunk_id: 0,
            byte_offset: 0,
            line_offset: 0,
            open_start: false,
            open_end: false,
            partial: false,
        }
    }

    /// Both edges fall on item boundaries, so the chunk parses on its own
    pub fn is_closed(&self) -> bool {
        !self.open_start && !self.open_end
    }

    /// Byte offset one past the end of this chunk
    pub fn end_offset(&self) -> usize {
        self.byte_offset + self.text.len()
    }

    /// `other` starts exactly where `self` ends
    pub fn precedes(&self, other: &CodeChunk) -> bool {
        self.file_name == other.file_name && self.end_offset() == other.byte_offset
    }

    /// Join two adjacent chunks of the same file
    ///
    /// The result keeps the smaller chunk id so its position in the file is preserved.
    pub fn concat(self, other: CodeChunk) -> Result<CodeChunk> {
        if self.file_name != other.file_name {
            return Err(CodegraphError::chunk(format!(
                "cannot join chunks of different files: {} and {}",
                self.file_name, other.file_name
            )));
        }

        let (first, second) = if self.chunk_id <= other.chunk_id {
            (self, other)
        } else {
            (other, self)
        };

        if !first.precedes(&second) {
            return Err(CodegraphError::chunk(format!(
                "chunks {} and {} of {} are not adjacent",
                first.chunk_id, second.chunk_id, first.file_name
            )));
        }

        let mut text = first.text;
        text.push_str(&second.text);

        Ok(CodeChunk {
            file_name: first.file_name,
            text,
            chunk_id: first.chunk_id,
            byte_offset: first.byte_offset,
            line_offset: first.line_offset,
            open_start: first.open_start,
            open_end: second.open_end,
            partial: first.partial || second.partial,
        })
    }

    /// The part of this chunk from byte `at` onwards, starting on an item boundary
    pub fn tail_from(&self, at: usize) -> CodeChunk {
        let at = at.min(self.text.len());
        let skipped_lines = self.text.as_bytes()[..at]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u32;

        CodeChunk {
            file_name: self.file_name.clone(),
            text: self.text[at..].to_string(),
            chunk_id: self.chunk_id,
            byte_offset: self.byte_offset + at,
            line_offset: self.line_offset + skipped_lines,
            open_start: if at == 0 { self.open_start } else { false },
            open_end: self.open_end,
            partial: self.partial,
        }
    }

    /// Same text with its edges open, so it is only parsed again once merged
    /// with a neighbour. The start of a file stays closed.
    pub fn reopened(&self) -> CodeChunk {
        CodeChunk {
            open_start: self.byte_offset > 0,
            open_end: true,
            ..self.clone()
        }
    }

    /// Force the chunk to be parsed as a self-contained unit
    pub fn settled(mut self) -> Self {
        self.open_start = false;
        self.open_end = false;
        self.partial = false;
        self
    }
}

/// A unit of queued work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job<T> {
    pub payload: T,
    /// Assigned at enqueue time from a single global counter
    pub job_id: u64,
}

impl<T> Job<T> {
    pub fn new(payload: T, job_id: u64) -> Self {
        Self { payload, job_id }
    }
}
