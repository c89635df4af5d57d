//! Single-pass scanner over a tagged text export
//!
//! The export is not well-formed XML in general (raw code text sits between
//! tags), so it is read tag by tag instead of through an XML library.

use crate::shared::utils::hashing::strip_whitespace;

/// One tag plus the text that preceded it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagData {
    /// Tag name as written, e.g. `name`, `/name`, `break/`, `?xml`
    pub name: String,
    /// Whitespace-free, entity-decoded text between the previous tag and this one
    pub text_before: String,
    /// Raw text after the name up to `>`
    pub attributes: String,
}

impl TagData {
    pub fn is_closing(&self) -> bool {
        self.name.starts_with('/')
    }

    pub fn is_self_closing(&self) -> bool {
        self.name.ends_with('/') || self.attributes.ends_with('/')
    }

    /// Name without the leading `/` of closing tags or trailing `/` of empty ones
    pub fn bare_name(&self) -> &str {
        let name = self.name.strip_prefix('/').unwrap_or(&self.name);
        name.strip_suffix('/').unwrap_or(name)
    }
}

pub struct TagScanner<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> TagScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 0,
        }
    }

    /// Nothing but whitespace remains
    pub fn is_empty(&self) -> bool {
        self.input[self.pos..].trim_start().is_empty()
    }

    /// Newlines consumed so far
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn next_tag(&mut self) -> TagData {
        let (start, end, _) = self.read_until(b"<");
        let text_before = decode_entities(&strip_whitespace(&self.input[start..end]));

        let (start, end, stop) = self.read_until(b" \t\r\n>");
        let name = self.input[start..end].to_string();

        let attributes = match stop {
            Some(b'>') | None => String::new(),
            Some(_) => {
                let (start, end, _) = self.read_until(b">");
                self.input[start..end].trim().to_string()
            }
        };

        TagData {
            name,
            text_before,
            attributes,
        }
    }

    /// Advance past the next byte in `stops`; returns the consumed range
    /// (excluding the stop byte) and the stop byte, if any was found
    fn read_until(&mut self, stops: &[u8]) -> (usize, usize, Option<u8>) {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
            }
            if stops.contains(&b) {
                return (start, self.pos - 1, Some(b));
            }
        }
        (start, self.pos, None)
    }
}

/// Decode the five predefined XML entities
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
