//! Language grammars for the token-tree path
//!
//! Each grammar implements the TokenTreeGrammar port for one tree-sitter
//! language. Tag-tree languages (C++, C#, Java) need no grammar: srcML
//! wraps every construct in language-agnostic tags.

pub mod javascript;
pub mod python;

pub use javascript::JavaScriptGrammar;
pub use python::PythonGrammar;
