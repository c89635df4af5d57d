//! Parsing infrastructure - external dependencies

pub mod srcml;
pub mod tree_sitter;

pub use self::tree_sitter::TreeSitterFrontEnd;
pub use srcml::SrcmlExporter;
