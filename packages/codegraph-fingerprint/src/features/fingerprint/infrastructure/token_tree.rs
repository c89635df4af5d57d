//! Token-tree canonicalization
//!
//! Enter/exit listener over a tree-sitter tree. Every function node pushes a
//! [`FunctionContext`]; tokens are appended to the innermost context with
//! identifiers abstracted to `funcname`, `funccall` or `var`. On exit the
//! body is hashed and the enclosing context receives a single `funcdef`.

use std::collections::HashSet;

use tree_sitter::{Node as TSNode, Tree};

use crate::features::fingerprint::domain::{FunctionContext, FUNC_CALL, FUNC_DEF, FUNC_NAME, VAR};
use crate::features::parsing::ports::TokenTreeGrammar;
use crate::shared::models::FingerprintRecord;
use crate::shared::utils::hashing::Thresholds;

/// What the walker does after entering a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Descend,
    Skip,
}

pub struct TokenTreeCanonicalizer<'a, G: TokenTreeGrammar + ?Sized> {
    grammar: &'a G,
    source: &'a str,
    file_name: &'a str,
    thresholds: Thresholds,
    line_offset: u32,
    contexts: Vec<FunctionContext>,
    call_targets: HashSet<usize>,
    type_depth: usize,
    records: Vec<FingerprintRecord>,
}

impl<'a, G: TokenTreeGrammar + ?Sized> TokenTreeCanonicalizer<'a, G> {
    pub fn new(grammar: &'a G, source: &'a str, file_name: &'a str, thresholds: Thresholds) -> Self {
        Self {
            grammar,
            source,
            file_name,
            thresholds,
            line_offset: 0,
            contexts: Vec::new(),
            call_targets: HashSet::new(),
            type_depth: 0,
            records: Vec::new(),
        }
    }

    /// Lines preceding `source` in its file
    pub fn with_line_offset(mut self, line_offset: u32) -> Self {
        self.line_offset = line_offset;
        self
    }

    /// Walk the whole tree and return one record per admitted function
    pub fn canonicalize(mut self, tree: &Tree) -> Vec<FingerprintRecord> {
        let mut cursor = tree.walk();
        loop {
            let node = cursor.node();
            if self.enter(&node) == Visit::Descend && cursor.goto_first_child() {
                continue;
            }
            loop {
                self.exit(&cursor.node());
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return self.records;
                }
            }
        }
    }

    fn enter(&mut self, node: &TSNode) -> Visit {
        if self.grammar.is_comment(node) {
            return Visit::Skip;
        }
        if self.grammar.is_function(node) {
            let name_node = self.grammar.function_name_node(node).map(|n| n.id());
            self.contexts
                .push(FunctionContext::new(self.line_of(node.start_position().row), name_node));
            return Visit::Descend;
        }
        if self.grammar.is_type(node) {
            self.type_depth += 1;
        }
        if self.grammar.is_call(node) {
            if let Some(target) = self.grammar.call_target(node) {
                self.call_targets.insert(target.id());
            }
        }
        if self.contexts.is_empty() {
            return Visit::Descend;
        }
        if self.grammar.is_stripped_literal(node) {
            return Visit::Skip;
        }
        if self.grammar.is_atomic(node) || node.child_count() == 0 {
            self.emit(node);
            return Visit::Skip;
        }
        Visit::Descend
    }

    fn exit(&mut self, node: &TSNode) {
        if self.grammar.is_type(node) {
            self.type_depth = self.type_depth.saturating_sub(1);
        }
        if !self.grammar.is_function(node) {
            return;
        }
        let Some(context) = self.contexts.pop() else {
            return;
        };

        let line_end = self.line_of(node.end_position().row);
        if let Some(record) = context.abstraction.into_record(
            self.file_name,
            context.start_line,
            line_end,
            &self.thresholds,
        ) {
            self.records.push(record);
        }

        if let Some(parent) = self.contexts.last_mut() {
            parent.abstraction.push(FUNC_DEF);
        }
    }

    fn emit(&mut self, node: &TSNode) {
        let text = self.source.get(node.byte_range()).unwrap_or("");
        let id = node.id();
        let is_identifier = self.grammar.is_identifier(node);
        let is_call_target = self.call_targets.contains(&id);
        let in_type = self.type_depth > 0;

        let Some(context) = self.contexts.last_mut() else {
            return;
        };

        if !is_identifier {
            context.abstraction.push(text);
        } else if context.is_name_slot(id) {
            context.abstraction.set_function_name(text);
            context.abstraction.push(FUNC_NAME);
        } else if is_call_target {
            context.abstraction.push(FUNC_CALL);
        } else if in_type {
            context.abstraction.push(text);
        } else {
            context.abstraction.push(VAR);
        }
    }

    fn line_of(&self, row: usize) -> u32 {
        row as u32 + 1 + self.line_offset
    }
}
