//! Tree-sitter front-end with a pooled parser cache

use parking_lot::Mutex;
use tree_sitter::{Language as TSLanguage, Parser as TSParser, Tree};

use crate::shared::models::{CodegraphError, Result};

/// Builds tree-sitter trees for one language.
///
/// Parsers are checked out of a small pool so concurrent callers never
/// share one. `clear_cache` drops every pooled parser.
pub struct TreeSitterFrontEnd {
    language: TSLanguage,
    parsers: Mutex<Vec<TSParser>>,
}

impl TreeSitterFrontEnd {
    pub fn new(language: TSLanguage) -> Self {
        Self {
            language,
            parsers: Mutex::new(Vec::new()),
        }
    }

    /// Tokenize and build the tree in one pass
    pub fn tokenize_and_build(&self, source: &str) -> Result<Tree> {
        let mut parser = self.checkout()?;
        let tree = parser.parse(source, None);
        self.parsers.lock().push(parser);
        tree.ok_or_else(|| CodegraphError::parse_error("tree-sitter produced no tree"))
    }

    pub fn clear_cache(&self) {
        self.parsers.lock().clear();
    }

    /// Number of idle parsers in the pool
    pub fn cached_parsers(&self) -> usize {
        self.parsers.lock().len()
    }

    fn checkout(&self) -> Result<TSParser> {
        if let Some(parser) = self.parsers.lock().pop() {
            return Ok(parser);
        }
        let mut parser = TSParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| CodegraphError::parse_error(format!("Failed to set language: {}", e)))?;
        Ok(parser)
    }
}
