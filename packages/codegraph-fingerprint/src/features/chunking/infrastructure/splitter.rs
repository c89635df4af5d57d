//! Code-block splitter
//!
//! Cuts oversized files into chunks of at most `chunk_size` bytes. A cut lands
//! on a known top-level item start when one fits the window (closed cut);
//! otherwise it falls back to the last newline, then to a character boundary
//! (open cut). Item starts come from a parse of the whole file, never from
//! the shape of a line.

use crate::shared::models::CodeChunk;

#[derive(Debug, Clone, Copy)]
pub struct CodeBlockSplitter {
    chunk_size: usize,
}

impl CodeBlockSplitter {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn needs_split(&self, text: &str) -> bool {
        text.len() > self.chunk_size
    }

    /// Split `text` with open cuts only. Files that fit are returned whole.
    pub fn split(&self, file_name: &str, text: &str) -> Vec<CodeChunk> {
        self.split_at_items(file_name, text, &[])
    }

    /// Split `text`, closing a cut whenever a window holds one of the sorted
    /// `item_starts` offsets
    pub fn split_at_items(
        &self,
        file_name: &str,
        text: &str,
        item_starts: &[usize],
    ) -> Vec<CodeChunk> {
        if !self.needs_split(text) {
            return vec![CodeChunk::whole(file_name, text)];
        }

        let mut cuts = Vec::new();
        let mut start = 0;
        while text.len() - start > self.chunk_size {
            let end = window_end(text, start, self.chunk_size);
            let cut = match last_item_start(item_starts, start, end) {
                Some(at) => (at, false),
                None => match text[start..end].rfind('\n') {
                    Some(at) => (start + at + 1, true),
                    None => (end, true),
                },
            };
            cuts.push(cut);
            start = cut.0;
        }
        pieces(file_name, text, &cuts)
    }

    /// Cut `text` at arbitrary byte offsets. Every inner edge is open, and
    /// offsets off a char boundary or outside the text are ignored.
    pub fn cut_at(file_name: &str, text: &str, offsets: &[usize]) -> Vec<CodeChunk> {
        let mut at: Vec<usize> = offsets
            .iter()
            .copied()
            .filter(|&o| o > 0 && o < text.len() && text.is_char_boundary(o))
            .collect();
        at.sort_unstable();
        at.dedup();
        if at.is_empty() {
            return vec![CodeChunk::whole(file_name, text)];
        }

        let cuts: Vec<(usize, bool)> = at.into_iter().map(|o| (o, true)).collect();
        pieces(file_name, text, &cuts)
    }
}

/// Chunks between consecutive `(offset, open)` cuts
fn pieces(file_name: &str, text: &str, cuts: &[(usize, bool)]) -> Vec<CodeChunk> {
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    let mut line_offset = 0;
    let mut open_start = false;

    let ends = cuts.iter().copied().chain(std::iter::once((text.len(), false)));
    for (cut, open_end) in ends {
        let piece = &text[start..cut];
        chunks.push(CodeChunk {
            file_name: file_name.to_string(),
            text: piece.to_string(),
            chunk_id: chunks.len() as u32,
            byte_offset: start,
            line_offset,
            open_start,
            open_end,
            partial: true,
        });

        line_offset += piece.bytes().filter(|&b| b == b'\n').count() as u32;
        open_start = open_end;
        start = cut;
    }
    chunks
}

/// End of the window starting at `start`, on a char boundary past `start`
fn window_end(text: &str, start: usize, size: usize) -> usize {
    let mut end = (start + size).min(text.len());
    while end > start && !text.is_char_boundary(end) {
        end -= 1;
    }
    if end == start {
        // a single char wider than the window
        end = start + 1;
        while end < text.len() && !text.is_char_boundary(end) {
            end += 1;
        }
    }
    end
}

/// Last item start strictly inside the window `(start, end]`
fn last_item_start(item_starts: &[usize], start: usize, end: usize) -> Option<usize> {
    item_starts
        .iter()
        .rev()
        .copied()
        .find(|&at| at > start && at <= end)
}
