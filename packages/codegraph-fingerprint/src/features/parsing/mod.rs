//! Parsing Feature
//!
//! Front-ends that turn source text into something the fingerprint
//! canonicalizers can walk.
//!
//! ## Structure
//! - `ports/` - TokenTreeGrammar, StructuralExporter traits
//! - `plugins/` - Python and JavaScript grammars
//! - `infrastructure/` - TreeSitterFrontEnd, SrcmlExporter

pub mod infrastructure;
pub mod plugins;
pub mod ports;

pub use infrastructure::{SrcmlExporter, TreeSitterFrontEnd};
pub use plugins::{JavaScriptGrammar, PythonGrammar};
pub use ports::{StructuralExporter, TokenTreeGrammar};
