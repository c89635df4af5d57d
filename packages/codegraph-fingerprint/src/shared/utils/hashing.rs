//! Canonical body hashing and size thresholds

use md5::{Digest, Md5};

/// Remove every whitespace character (including inside literals)
pub fn strip_whitespace(body: &str) -> String {
    body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lowercase hex MD5 of a canonical body
pub fn fingerprint(canonical_body: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(canonical_body.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Minimum size a function must reach before its fingerprint is emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub min_chars: usize,
    pub min_lines: u32,
}

impl Thresholds {
    pub fn new(min_chars: usize, min_lines: u32) -> Self {
        Self {
            min_chars,
            min_lines,
        }
    }

    /// `body` must already be whitespace-stripped
    pub fn admits(&self, body: &str, line_start: u32, line_end: u32) -> bool {
        body.chars().count() >= self.min_chars
            && line_end >= line_start
            && line_end - line_start >= self.min_lines
    }
}
