//! Token-tree parser: tree-sitter front-end plus the listener canonicalizer

use tracing::debug;
use tree_sitter::Node as TSNode;

use crate::features::fingerprint::infrastructure::TokenTreeCanonicalizer;
use crate::features::fingerprint::ports::{ChunkOutcome, SourceParser};
use crate::features::parsing::infrastructure::TreeSitterFrontEnd;
use crate::features::parsing::ports::TokenTreeGrammar;
use crate::shared::models::{CodeChunk, CodegraphError, FingerprintRecord, Language, Result};
use crate::shared::utils::hashing::Thresholds;

pub struct TokenTreeParser<G: TokenTreeGrammar> {
    grammar: G,
    front_end: TreeSitterFrontEnd,
    thresholds: Thresholds,
}

impl<G: TokenTreeGrammar> TokenTreeParser<G> {
    pub fn new(grammar: G, thresholds: Thresholds) -> Self {
        let front_end = TreeSitterFrontEnd::new(grammar.tree_sitter_language());
        Self {
            grammar,
            front_end,
            thresholds,
        }
    }

    /// Parse `text` as a complete unit; any syntax error fails the whole unit
    fn parse_strict(
        &self,
        file_name: &str,
        text: &str,
        line_offset: u32,
    ) -> Result<Vec<FingerprintRecord>> {
        let tree = self.front_end.tokenize_and_build(text)?;
        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_row(root).unwrap_or(0) as u32 + 1 + line_offset;
            return Err(CodegraphError::parse_error(format!(
                "syntax error in {} at line {}",
                file_name, line
            )));
        }

        Ok(
            TokenTreeCanonicalizer::new(&self.grammar, text, file_name, self.thresholds)
                .with_line_offset(line_offset)
                .canonicalize(&tree),
        )
    }

    /// Chunk that ends mid-item: resolve every complete item before the last
    /// one and hand the rest back as a remainder
    fn parse_open_end(&self, chunk: &CodeChunk) -> Result<ChunkOutcome> {
        let tree = self.front_end.tokenize_and_build(&chunk.text)?;
        let cut = hold_back_point(tree.root_node());
        let remainder = chunk.tail_from(cut);
        if cut == 0 {
            return Ok(ChunkOutcome::deferred(remainder));
        }

        let prefix = &chunk.text[..cut];
        match self.parse_strict(&chunk.file_name, prefix, chunk.line_offset) {
            Ok(records) => Ok(ChunkOutcome {
                records,
                remainder: Some(remainder),
                warnings: Vec::new(),
            }),
            Err(CodegraphError::Parse(_)) if chunk.partial => {
                Ok(ChunkOutcome::deferred(chunk.reopened()))
            }
            Err(e) => Ok(ChunkOutcome {
                records: Vec::new(),
                remainder: Some(remainder),
                warnings: vec![format!(
                    "Error while parsing chunk {} of {}, skipping its resolved part: {}",
                    chunk.chunk_id, chunk.file_name, e
                )],
            }),
        }
    }
}

impl<G: TokenTreeGrammar> SourceParser for TokenTreeParser<G> {
    fn language(&self) -> Language {
        self.grammar.language()
    }

    fn parse_single(
        &self,
        file_name: &str,
        text: &str,
        clear_cache: bool,
    ) -> Result<Vec<FingerprintRecord>> {
        let result = self.parse_strict(file_name, text, 0);
        if clear_cache {
            self.clear_cache();
        }
        if let Ok(records) = &result {
            debug!(
                file = %file_name,
                functions = records.len(),
                "Finished parsing file"
            );
        }
        result
    }

    fn parse_chunk(&self, chunk: &CodeChunk, clear_cache: bool) -> Result<ChunkOutcome> {
        let outcome = if chunk.is_closed() {
            match self.parse_strict(&chunk.file_name, &chunk.text, chunk.line_offset) {
                Ok(records) => Ok(ChunkOutcome::resolved(records)),
                // a piece of a split file: the cut may not sit between items
                Err(CodegraphError::Parse(_)) if chunk.partial => {
                    Ok(ChunkOutcome::deferred(chunk.reopened()))
                }
                Err(e) => Err(e),
            }
        } else if chunk.open_start {
            Ok(ChunkOutcome::deferred(chunk.clone()))
        } else {
            self.parse_open_end(chunk)
        };
        if clear_cache {
            self.clear_cache();
        }
        outcome
    }

    fn supports_chunking(&self) -> bool {
        true
    }

    fn item_starts(&self, text: &str) -> Option<Vec<usize>> {
        let tree = self.front_end.tokenize_and_build(text).ok()?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }
        let mut cursor = root.walk();
        let starts = root
            .children(&mut cursor)
            .filter(|item| !item.is_extra())
            .map(|item| item.start_byte())
            .collect();
        Some(starts)
    }

    fn clear_cache(&self) {
        self.front_end.clear_cache();
    }
}

/// Byte offset from which a truncated chunk must be held back: the start of
/// the last top-level item, or of the first broken one if that comes earlier
fn hold_back_point(root: TSNode) -> usize {
    if root.is_error() {
        return 0;
    }
    let mut cursor = root.walk();
    let items: Vec<TSNode> = root.children(&mut cursor).collect();

    let last = items
        .iter()
        .rev()
        .find(|item| !item.is_extra())
        .map(|item| item.start_byte())
        .unwrap_or(0);
    let first_broken = items
        .iter()
        .find(|item| item.has_error() || item.is_missing())
        .map(|item| item.start_byte());

    first_broken.map_or(last, |broken| broken.min(last))
}

fn first_error_row(node: TSNode) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error_row)
}
