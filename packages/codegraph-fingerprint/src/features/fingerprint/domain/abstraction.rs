//! Canonical body accumulation shared by both canonicalization paths

use crate::shared::models::FingerprintRecord;
use crate::shared::utils::hashing::{fingerprint, strip_whitespace, Thresholds};

/// Placeholder for the function's own name
pub const FUNC_NAME: &str = "funcname";
/// Placeholder for a call target
pub const FUNC_CALL: &str = "funccall";
/// Placeholder for any other identifier
pub const VAR: &str = "var";
/// Placeholder left in the enclosing body by a nested function
pub const FUNC_DEF: &str = "funcdef";

/// Abstracted body of one function plus its captured name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abstraction {
    body: String,
    function_name: Option<String>,
}

impl Abstraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: &str) {
        self.body.push_str(token);
    }

    /// Record the function name; a later name replaces an earlier one
    pub fn set_function_name(&mut self, name: &str) {
        self.function_name = Some(name.to_string());
    }

    pub fn has_function_name(&self) -> bool {
        self.function_name.is_some()
    }

    pub fn function_name(&self) -> &str {
        self.function_name.as_deref().unwrap_or("")
    }

    /// Body with every whitespace character removed
    pub fn canonical_body(&self) -> String {
        strip_whitespace(&self.body)
    }

    /// Hash the canonical body into a record if it meets the thresholds
    pub fn into_record(
        self,
        file_name: &str,
        line_start: u32,
        line_end: u32,
        thresholds: &Thresholds,
    ) -> Option<FingerprintRecord> {
        let body = self.canonical_body();
        if !thresholds.admits(&body, line_start, line_end) {
            return None;
        }
        Some(FingerprintRecord::new(
            fingerprint(&body),
            file_name,
            self.function_name.unwrap_or_default(),
            line_start,
            line_end,
        ))
    }
}
