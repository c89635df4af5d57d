//! JavaScript grammar

use tree_sitter::{Language as TSLanguage, Node as TSNode};

use crate::features::parsing::ports::TokenTreeGrammar;
use crate::shared::models::Language;

/// JavaScript node kinds for quick lookup
pub mod node_kinds {
    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const FUNCTION_EXPRESSION: &str = "function_expression";
    pub const FUNCTION: &str = "function";
    pub const GENERATOR_FUNCTION: &str = "generator_function";
    pub const GENERATOR_FUNCTION_DECLARATION: &str = "generator_function_declaration";
    pub const ARROW_FUNCTION: &str = "arrow_function";
    pub const METHOD_DEFINITION: &str = "method_definition";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const NEW_EXPRESSION: &str = "new_expression";
    pub const MEMBER_EXPRESSION: &str = "member_expression";
    pub const IDENTIFIER: &str = "identifier";
    pub const PROPERTY_IDENTIFIER: &str = "property_identifier";
    pub const PRIVATE_PROPERTY_IDENTIFIER: &str = "private_property_identifier";
    pub const SHORTHAND_PROPERTY_IDENTIFIER: &str = "shorthand_property_identifier";
    pub const SHORTHAND_PROPERTY_IDENTIFIER_PATTERN: &str = "shorthand_property_identifier_pattern";
    pub const STRING: &str = "string";
    pub const TEMPLATE_STRING: &str = "template_string";
    pub const REGEX: &str = "regex";
    pub const COMMENT: &str = "comment";
    pub const HTML_COMMENT: &str = "html_comment";
}

/// JavaScript grammar for the token-tree path
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaScriptGrammar;

impl JavaScriptGrammar {
    pub fn new() -> Self {
        Self
    }
}

impl TokenTreeGrammar for JavaScriptGrammar {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_javascript::language()
    }

    fn is_function(&self, node: &TSNode) -> bool {
        // the `function` keyword token shares a kind name with the old
        // expression node, so anonymous tokens must be excluded
        node.is_named()
            && matches!(
                node.kind(),
                node_kinds::FUNCTION_DECLARATION
                    | node_kinds::FUNCTION_EXPRESSION
                    | node_kinds::FUNCTION
                    | node_kinds::GENERATOR_FUNCTION
                    | node_kinds::GENERATOR_FUNCTION_DECLARATION
                    | node_kinds::ARROW_FUNCTION
                    | node_kinds::METHOD_DEFINITION
            )
    }

    fn is_call(&self, node: &TSNode) -> bool {
        matches!(
            node.kind(),
            node_kinds::CALL_EXPRESSION | node_kinds::NEW_EXPRESSION
        )
    }

    fn call_target<'t>(&self, call: &TSNode<'t>) -> Option<TSNode<'t>> {
        let field = if call.kind() == node_kinds::NEW_EXPRESSION {
            "constructor"
        } else {
            "function"
        };
        let callee = call.child_by_field_name(field)?;
        match callee.kind() {
            node_kinds::IDENTIFIER => Some(callee),
            node_kinds::MEMBER_EXPRESSION => callee.child_by_field_name("property"),
            _ => None,
        }
    }

    fn is_identifier(&self, node: &TSNode) -> bool {
        matches!(
            node.kind(),
            node_kinds::IDENTIFIER
                | node_kinds::PROPERTY_IDENTIFIER
                | node_kinds::PRIVATE_PROPERTY_IDENTIFIER
                | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER
                | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN
        )
    }

    fn is_atomic(&self, node: &TSNode) -> bool {
        matches!(
            node.kind(),
            node_kinds::STRING | node_kinds::TEMPLATE_STRING | node_kinds::REGEX
        )
    }

    fn is_comment(&self, node: &TSNode) -> bool {
        matches!(node.kind(), node_kinds::COMMENT | node_kinds::HTML_COMMENT)
    }
}
