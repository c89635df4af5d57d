//! Tree-sitter based front-end
//!
//! This is where the tree-sitter dependency lives.

mod front_end;

pub use front_end::TreeSitterFrontEnd;
