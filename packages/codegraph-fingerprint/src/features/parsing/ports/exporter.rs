//! Structural export port
//!
//! Front-ends that only offer a flat tagged text export (srcML) sit behind
//! this trait so the tag parser can be driven by canned XML in tests.

use crate::shared::models::{Language, Result};

pub trait StructuralExporter: Send + Sync {
    /// Export `source` as tagged text.
    ///
    /// An empty string means the tool ran but produced nothing usable.
    /// `Err(CodegraphError::FrontEndUnavailable)` means the tool itself is
    /// missing and later files of the language should not retry it.
    fn export(&self, file_name: &str, source: &str, language: Language) -> Result<String>;
}
