//! Parsing ports (interfaces)

mod exporter;
mod grammar;

pub use exporter::StructuralExporter;
pub use grammar::TokenTreeGrammar;
