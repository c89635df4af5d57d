//! Fingerprint infrastructure: the two canonicalization paths
//!
//! - `token_tree` - enter/exit listener over tree-sitter trees
//! - `tag_scanner`, `tag_tree`, `tag_parser`, `tag_canonicalizer` - streaming
//!   srcML parser and subtree canonicalization

pub mod tag_canonicalizer;
pub mod tag_parser;
pub mod tag_scanner;
pub mod tag_tree;
pub mod token_tree;

pub use tag_canonicalizer::canonicalize_subtree;
pub use tag_parser::{StructuralTagParser, TagParseOutcome};
pub use tag_scanner::{TagData, TagScanner};
pub use tag_tree::{NodeId, StructuralNode, StructuralTree};
pub use token_tree::TokenTreeCanonicalizer;
