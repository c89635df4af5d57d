//! Fingerprint record (one per emitted function)

use serde::{Deserialize, Serialize};

/// Fingerprint of a single function or method
///
/// Created at function exit, immutable afterwards. `hash` is computed over the
/// canonical body only, so the function's own name never influences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintRecord {
    pub hash: String,
    pub file_name: String,
    pub function_name: String,
    pub line_start: u32,
    pub line_end: u32,
}

impl FingerprintRecord {
    pub fn new(
        hash: impl Into<String>,
        file_name: impl Into<String>,
        function_name: impl Into<String>,
        line_start: u32,
        line_end: u32,
    ) -> Self {
        let line_start_checked = line_start.min(line_end);
        Self {
            hash: hash.into(),
            file_name: file_name.into(),
            function_name: function_name.into(),
            line_start: line_start_checked,
            line_end,
        }
    }

    /// Number of lines between start and end (`line_end - line_start`)
    pub fn line_span(&self) -> u32 {
        self.line_end - self.line_start
    }

    /// Move the record down by `lines` (used for chunks that start mid-file)
    pub fn shifted(mut self, lines: u32) -> Self {
        self.line_start += lines;
        self.line_end += lines;
        self
    }
}
