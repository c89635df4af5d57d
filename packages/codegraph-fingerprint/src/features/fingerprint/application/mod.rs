//! Fingerprint application layer: one SourceParser per language

mod tag_tree_parser;
mod token_tree_parser;

use std::sync::Arc;

pub use tag_tree_parser::TagTreeParser;
pub use token_tree_parser::TokenTreeParser;

use crate::features::fingerprint::ports::SourceParser;
use crate::features::parsing::plugins::{JavaScriptGrammar, PythonGrammar};
use crate::features::parsing::ports::StructuralExporter;
use crate::shared::models::Language;
use crate::shared::utils::hashing::Thresholds;

/// Build the parser for `language`; tag-tree languages go through `exporter`
pub fn create_parser(
    language: Language,
    thresholds: Thresholds,
    exporter: Arc<dyn StructuralExporter>,
) -> Arc<dyn SourceParser> {
    match language {
        Language::Python => Arc::new(TokenTreeParser::new(PythonGrammar::new(), thresholds)),
        Language::JavaScript => {
            Arc::new(TokenTreeParser::new(JavaScriptGrammar::new(), thresholds))
        }
        Language::Cpp | Language::CSharp | Language::Java => {
            Arc::new(TagTreeParser::new(language, exporter, thresholds))
        }
    }
}
