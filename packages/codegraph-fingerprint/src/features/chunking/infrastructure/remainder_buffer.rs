//! Per-file buffer of unparsed remainders
//!
//! Remainders of one file are merged as soon as two of them are adjacent;
//! the merged text goes back into the queue as a single fresh chunk.

use std::collections::HashMap;

use crate::shared::models::{CodeChunk, Result};

#[derive(Debug, Default)]
pub struct RemainderBuffer {
    by_file: HashMap<String, Vec<CodeChunk>>,
}

impl RemainderBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `remainder` and return every chunk that can now be re-queued
    pub fn insert(&mut self, remainder: CodeChunk) -> Result<Vec<CodeChunk>> {
        let file_name = remainder.file_name.clone();
        let pending = self.by_file.entry(file_name.clone()).or_default();
        pending.push(remainder);
        if pending.len() < 2 {
            return Ok(Vec::new());
        }

        pending.sort_by_key(|c| (c.chunk_id, c.byte_offset));

        let mut runs: Vec<Vec<CodeChunk>> = Vec::new();
        for chunk in pending.drain(..) {
            match runs.last_mut() {
                Some(run) if run.last().map_or(false, |prev| prev.precedes(&chunk)) => {
                    run.push(chunk)
                }
                _ => runs.push(vec![chunk]),
            }
        }

        let mut merged = Vec::new();
        for run in runs {
            if run.len() < 2 {
                pending.extend(run);
                continue;
            }
            let mut pieces = run.into_iter();
            if let Some(first) = pieces.next() {
                merged.push(pieces.try_fold(first, CodeChunk::concat)?);
            }
        }

        if pending.is_empty() {
            self.by_file.remove(&file_name);
        }
        Ok(merged)
    }

    /// Everything still buffered, each forced to parse on its own
    pub fn drain_leftovers(&mut self) -> Vec<CodeChunk> {
        let mut leftovers: Vec<CodeChunk> = self
            .by_file
            .drain()
            .flat_map(|(_, chunks)| chunks)
            .map(CodeChunk::settled)
            .collect();
        leftovers.sort_by(|a, b| {
            (a.file_name.as_str(), a.chunk_id).cmp(&(b.file_name.as_str(), b.chunk_id))
        });
        leftovers
    }

    /// Number of buffered remainders
    pub fn len(&self) -> usize {
        self.by_file.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}
