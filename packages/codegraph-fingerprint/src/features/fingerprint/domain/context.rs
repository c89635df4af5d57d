//! Function context stack entry for the token-tree listener

use super::abstraction::Abstraction;

/// One currently-open function
#[derive(Debug, Clone)]
pub struct FunctionContext {
    pub abstraction: Abstraction,
    pub start_line: u32,
    /// tree-sitter node id of the function's own name identifier
    pub name_node: Option<usize>,
}

impl FunctionContext {
    pub fn new(start_line: u32, name_node: Option<usize>) -> Self {
        Self {
            abstraction: Abstraction::new(),
            start_line,
            name_node,
        }
    }

    /// The identifier is this function's name slot and the slot is still free
    pub fn is_name_slot(&self, node_id: usize) -> bool {
        self.name_node == Some(node_id) && !self.abstraction.has_function_name()
    }
}
