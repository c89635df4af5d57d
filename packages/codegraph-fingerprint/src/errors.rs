//! Error types for codegraph-fingerprint
//!
//! Provides unified error handling across the crate.
//!
//! Per-file failures (`Parse`, `MalformedTagStream`, `FrontEndUnavailable`, `Io`) are
//! recoverable: callers log them and continue with an empty result for that file.
//! Pool failures (`WorkerCrashed`, `Pool`) abort the whole run.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for codegraph-fingerprint operations
#[derive(Debug, Error)]
pub enum CodegraphError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tokenizer or parse-tree construction failure
    #[error("Parse error: {0}")]
    Parse(String),

    /// Closing tags of a structural export did not line up
    #[error("Malformed tag stream in {file} on line {line}")]
    MalformedTagStream { file: String, line: u32 },

    /// External front-end tool could not be started
    #[error("Front-end unavailable: {0}")]
    FrontEndUnavailable(String),

    /// Invalid chunk operation (e.g. concatenating chunks of different files)
    #[error("Chunk error: {0}")]
    Chunk(String),

    /// Pool setup or channel failure
    #[error("Worker pool error: {0}")]
    Pool(String),

    /// A worker panicked while running a job
    #[error("Worker {worker} crashed: {message}")]
    WorkerCrashed { worker: usize, message: String },

    /// Wire format encode/decode failure
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CodegraphError {
    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        CodegraphError::Parse(msg.into())
    }

    /// Create a pool error
    pub fn pool(msg: impl Into<String>) -> Self {
        CodegraphError::Pool(msg.into())
    }

    /// Create a chunk error
    pub fn chunk(msg: impl Into<String>) -> Self {
        CodegraphError::Chunk(msg.into())
    }

    /// Whether the error only affects the unit of work it came from
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CodegraphError::Io(_)
                | CodegraphError::Parse(_)
                | CodegraphError::MalformedTagStream { .. }
                | CodegraphError::FrontEndUnavailable(_)
        )
    }
}

/// Result type alias for fingerprint operations
pub type Result<T> = std::result::Result<T, CodegraphError>;
