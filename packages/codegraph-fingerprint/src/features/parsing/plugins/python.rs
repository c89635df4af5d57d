//! Python grammar
//!
//! Classifies tree-sitter-python nodes for the token-tree listener.
//! Standalone string statements (docstrings and bare string expressions)
//! are dropped from the canonical body.

use tree_sitter::{Language as TSLanguage, Node as TSNode};

use crate::features::parsing::ports::TokenTreeGrammar;
use crate::shared::models::Language;

/// Python node kinds for quick lookup
pub mod node_kinds {
    pub const FUNCTION_DEF: &str = "function_definition";
    pub const CALL: &str = "call";
    pub const IDENTIFIER: &str = "identifier";
    pub const ATTRIBUTE: &str = "attribute";
    pub const TYPE: &str = "type";
    pub const STRING: &str = "string";
    pub const CONCATENATED_STRING: &str = "concatenated_string";
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const COMMENT: &str = "comment";
}

/// Python grammar for the token-tree path
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonGrammar;

impl PythonGrammar {
    pub fn new() -> Self {
        Self
    }

    fn is_string(node: &TSNode) -> bool {
        matches!(
            node.kind(),
            node_kinds::STRING | node_kinds::CONCATENATED_STRING
        )
    }
}

impl TokenTreeGrammar for PythonGrammar {
    fn language(&self) -> Language {
        Language::Python
    }

    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_python::language()
    }

    fn is_function(&self, node: &TSNode) -> bool {
        node.kind() == node_kinds::FUNCTION_DEF
    }

    fn is_call(&self, node: &TSNode) -> bool {
        node.kind() == node_kinds::CALL
    }

    fn call_target<'t>(&self, call: &TSNode<'t>) -> Option<TSNode<'t>> {
        let callee = call.child_by_field_name("function")?;
        match callee.kind() {
            node_kinds::IDENTIFIER => Some(callee),
            // obj.method() -> the method name is the call target
            node_kinds::ATTRIBUTE => callee.child_by_field_name("attribute"),
            _ => None,
        }
    }

    fn is_identifier(&self, node: &TSNode) -> bool {
        node.kind() == node_kinds::IDENTIFIER
    }

    fn is_type(&self, node: &TSNode) -> bool {
        node.kind() == node_kinds::TYPE
    }

    fn is_atomic(&self, node: &TSNode) -> bool {
        Self::is_string(node)
    }

    fn is_comment(&self, node: &TSNode) -> bool {
        node.kind() == node_kinds::COMMENT
    }

    fn is_stripped_literal(&self, node: &TSNode) -> bool {
        if node.kind() != node_kinds::EXPRESSION_STATEMENT || node.named_child_count() != 1 {
            return false;
        }
        node.named_child(0)
            .map(|child| Self::is_string(&child))
            .unwrap_or(false)
    }
}
