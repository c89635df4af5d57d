//! Configuration
//!
//! Two ways to configure a parse session:
//! - Builder: `FingerprintConfig::default().with_min_method_lines(5)`
//! - YAML (versioned schema, unknown fields rejected):
//!
//! ```yaml
//! version: 1
//! thresholds:
//!   min_function_chars: 0
//!   min_method_lines: 5
//! parallel:
//!   thread_count: 8
//!   batch_size: 10
//!   progress_interval: 10
//! chunking:
//!   chunk_size: 15360
//! front_end:
//!   srcml_binary: srcml
//! ```

pub mod error;
pub mod fingerprint_config;
pub mod io;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use fingerprint_config::{
    FingerprintConfig, DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_PROGRESS_INTERVAL,
    MIN_FUNCTION_CHARS, MIN_METHOD_LINES,
};
pub use io::ConfigExportV1;
