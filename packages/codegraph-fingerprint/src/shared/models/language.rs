//! Supported source languages

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::chunk::CodeChunk;

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Cpp,
    CSharp,
    Java,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::JavaScript,
        Language::Cpp,
        Language::CSharp,
        Language::Java,
    ];

    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Java => "java",
        }
    }

    /// Get language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Language::Python),
            "js" => Some(Language::JavaScript),
            "cpp" => Some(Language::Cpp),
            "cs" => Some(Language::CSharp),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// Get language from a file name or path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Parse a user-supplied name (`python`, `js`, `c++`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "python" | "py" => Some(Language::Python),
            "javascript" | "js" => Some(Language::JavaScript),
            "cpp" | "c++" => Some(Language::Cpp),
            "csharp" | "c#" | "cs" => Some(Language::CSharp),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// Language argument understood by `srcml -l`
    pub fn srcml_name(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Java => "Java",
        }
    }

    /// Whether this language goes through the structural tag export
    pub fn uses_tag_tree(&self) -> bool {
        matches!(self, Language::Cpp | Language::CSharp | Language::Java)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A file handed to the core: name (relative path) plus raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// The whole file as a single closed chunk
    pub fn into_chunk(self) -> CodeChunk {
        CodeChunk::whole(self.name, self.text)
    }
}
