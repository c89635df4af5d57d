//! Token-tree grammar port
//!
//! A grammar pairs a tree-sitter language with the node-kind classification
//! the listener needs: which nodes open a function, where the function's own
//! name lives, which identifier is a call target, and which tokens are
//! emitted whole or dropped.

use tree_sitter::{Language as TSLanguage, Node as TSNode};

use crate::shared::models::Language;

/// Node classification for one tree-sitter grammar
pub trait TokenTreeGrammar: Send + Sync {
    fn language(&self) -> Language;

    fn tree_sitter_language(&self) -> TSLanguage;

    /// Node opens a function or method
    fn is_function(&self, node: &TSNode) -> bool;

    /// The identifier holding a function's own name
    fn function_name_node<'t>(&self, function: &TSNode<'t>) -> Option<TSNode<'t>> {
        function.child_by_field_name("name")
    }

    fn is_call(&self, node: &TSNode) -> bool;

    /// The identifier that names the callee of a call node
    fn call_target<'t>(&self, call: &TSNode<'t>) -> Option<TSNode<'t>>;

    fn is_identifier(&self, node: &TSNode) -> bool;

    /// Identifiers below a type node are emitted verbatim
    fn is_type(&self, _node: &TSNode) -> bool {
        false
    }

    /// Composite nodes emitted as one token (string literals, templates)
    fn is_atomic(&self, _node: &TSNode) -> bool {
        false
    }

    fn is_comment(&self, node: &TSNode) -> bool {
        node.kind() == "comment"
    }

    /// Statements dropped from the canonical body, e.g. docstrings
    fn is_stripped_literal(&self, _node: &TSNode) -> bool {
        false
    }
}
