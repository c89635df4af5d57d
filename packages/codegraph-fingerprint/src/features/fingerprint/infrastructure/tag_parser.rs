//! Structural tag parser (tag-tree path)
//!
//! State machine over a srcML export. Only function subtrees are kept:
//! text and tags outside functions are pruned as they stream past, and a
//! function's subtree is canonicalized and detached as soon as its closing
//! tag arrives.

use tracing::debug;

use super::tag_canonicalizer::canonicalize_subtree;
use super::tag_scanner::{TagData, TagScanner};
use super::tag_tree::{NodeId, StructuralTree};
use crate::features::fingerprint::domain::FUNC_DEF;
use crate::shared::models::{CodegraphError, FingerprintRecord, Result};
use crate::shared::utils::hashing::Thresholds;

const XML_DECLARATION: &str = "?xml";
const UNIT_TAG: &str = "unit";
const FUNCTION_TAG: &str = "function";
const COMMENT_TAG: &str = "comment";
const COMMENT_CLOSE: &str = "/comment";

/// Records plus the number of recovered tag mismatches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagParseOutcome {
    pub records: Vec<FingerprintRecord>,
    pub corruptions: usize,
}

pub struct StructuralTagParser<'a> {
    file_name: &'a str,
    thresholds: Thresholds,
    tree: StructuralTree,
    current: NodeId,
    function_depth: usize,
    /// Newlines consumed before the `<unit>` tag; source line 1 sits there
    unit_line: Option<u32>,
    outcome: TagParseOutcome,
}

impl<'a> StructuralTagParser<'a> {
    pub fn new(file_name: &'a str, thresholds: Thresholds) -> Self {
        let tree = StructuralTree::new();
        let current = tree.root();
        Self {
            file_name,
            thresholds,
            tree,
            current,
            function_depth: 0,
            unit_line: None,
            outcome: TagParseOutcome::default(),
        }
    }

    /// Parse one export. An empty export yields no records; an export that
    /// does not start with an XML declaration is a malformed stream.
    pub fn parse(mut self, export: &str) -> Result<TagParseOutcome> {
        let mut scanner = TagScanner::new(export);

        let first = scanner.next_tag();
        if first.name.is_empty() && first.text_before.is_empty() && scanner.is_empty() {
            debug!(file = %self.file_name, "srcML returned nothing");
            return Ok(self.outcome);
        }
        if first.name != XML_DECLARATION {
            debug!(file = %self.file_name, tag = %first.name, "wrong first tag");
            return Err(CodegraphError::MalformedTagStream {
                file: self.file_name.to_string(),
                line: scanner.line(),
            });
        }

        while !scanner.is_empty() {
            let tag = scanner.next_tag();

            if self.in_function() && !tag.text_before.is_empty() {
                self.tree.add_text(self.current, tag.text_before.as_str());
            }

            if tag.is_closing() {
                if self.in_function() {
                    self.close(&tag, scanner.line());
                }
            } else if tag.name.starts_with(COMMENT_TAG) {
                if !tag.is_self_closing() {
                    skip_comment(&mut scanner);
                }
            } else {
                self.open(&tag, scanner.line());
            }
        }

        Ok(self.outcome)
    }

    fn in_function(&self) -> bool {
        self.function_depth > 0
    }

    fn source_line(&self, raw_line: u32) -> u32 {
        match self.unit_line {
            Some(unit) => raw_line.saturating_sub(unit) + 1,
            None => raw_line + 1,
        }
    }

    fn open(&mut self, tag: &TagData, raw_line: u32) {
        let name = tag.bare_name();
        if name == UNIT_TAG && self.unit_line.is_none() {
            self.unit_line = Some(raw_line);
        }
        if name != FUNCTION_TAG && !self.in_function() {
            return;
        }

        let line = self.source_line(raw_line);
        let id = self
            .tree
            .add_element(self.current, name, tag.attributes.as_str(), line);
        if tag.is_self_closing() {
            return;
        }
        if name == FUNCTION_TAG {
            self.function_depth += 1;
        }
        self.current = id;
    }

    fn close(&mut self, tag: &TagData, raw_line: u32) {
        let line = self.source_line(raw_line);
        let name = tag.bare_name();
        let current_tag = self.tree.node(self.current).tag.as_str();
        if name != current_tag {
            debug!(
                file = %self.file_name,
                line,
                expected = %current_tag,
                found = %name,
                "closing tags don't line up, skipping function"
            );
            self.outcome.corruptions += 1;
            self.tree.reset();
            self.current = self.tree.root();
            self.function_depth = 0;
            return;
        }

        let parent = self.tree.parent(self.current).unwrap_or(self.tree.root());
        if name == FUNCTION_TAG {
            self.finish_function(line);
            if self.in_function() {
                self.tree.add_leaf(parent, FUNC_DEF, FUNC_DEF, line);
            }
        }
        self.current = parent;
    }

    fn finish_function(&mut self, line_end: u32) {
        let function = self.current;
        let line_start = self.tree.node(function).line;
        let abstraction = canonicalize_subtree(&self.tree, function);
        if let Some(record) =
            abstraction.into_record(self.file_name, line_start, line_end, &self.thresholds)
        {
            self.outcome.records.push(record);
        }
        self.tree.detach(function);
        self.function_depth -= 1;
    }
}

/// Consume tags up to and including the closing comment tag
fn skip_comment(scanner: &mut TagScanner<'_>) {
    while !scanner.is_empty() {
        if scanner.next_tag().name == COMMENT_CLOSE {
            return;
        }
    }
}
