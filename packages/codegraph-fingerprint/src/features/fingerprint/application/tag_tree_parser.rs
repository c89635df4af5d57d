//! Tag-tree parser: srcML export plus the streaming tag parser

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::features::fingerprint::infrastructure::StructuralTagParser;
use crate::features::fingerprint::ports::SourceParser;
use crate::features::parsing::ports::StructuralExporter;
use crate::shared::models::{CodegraphError, FingerprintRecord, Language, Result};
use crate::shared::utils::hashing::Thresholds;

pub struct TagTreeParser {
    language: Language,
    exporter: Arc<dyn StructuralExporter>,
    thresholds: Thresholds,
    /// Set once the export tool turned out to be missing
    unavailable: AtomicBool,
}

impl TagTreeParser {
    pub fn new(
        language: Language,
        exporter: Arc<dyn StructuralExporter>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            language,
            exporter,
            thresholds,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::Relaxed)
    }
}

impl SourceParser for TagTreeParser {
    fn language(&self) -> Language {
        self.language
    }

    fn parse_single(
        &self,
        file_name: &str,
        text: &str,
        _clear_cache: bool,
    ) -> Result<Vec<FingerprintRecord>> {
        if self.is_unavailable() {
            debug!(file = %file_name, language = %self.language, "front-end unavailable, skipping");
            return Ok(Vec::new());
        }

        let export = match self.exporter.export(file_name, text, self.language) {
            Ok(export) => export,
            Err(e @ CodegraphError::FrontEndUnavailable(_)) => {
                if !self.unavailable.swap(true, Ordering::Relaxed) {
                    warn!(
                        language = %self.language,
                        error = %e,
                        "structural export unavailable, later files of this language are skipped"
                    );
                }
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let outcome = StructuralTagParser::new(file_name, self.thresholds).parse(&export)?;
        if outcome.corruptions > 0 {
            debug!(
                file = %file_name,
                corruptions = outcome.corruptions,
                "recovered from mismatched closing tags"
            );
        }
        debug!(
            file = %file_name,
            functions = outcome.records.len(),
            "Finished parsing file"
        );
        Ok(outcome.records)
    }
}
