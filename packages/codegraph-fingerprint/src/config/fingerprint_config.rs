//! Fingerprint configuration
//!
//! Defaults match the reference behaviour: every function is emitted
//! (`min_function_chars = 0`, `min_method_lines = 0`), batches of 10 files,
//! 15 KiB chunks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{
    ChunkingSection, ConfigExportV1, FrontEndSection, ParallelSection, ThresholdSection,
};
use crate::shared::utils::hashing::Thresholds;

/// Minimum canonical body length (in chars) for a fingerprint to be emitted
pub const MIN_FUNCTION_CHARS: usize = 0;

/// Minimum `line_end - line_start` for a fingerprint to be emitted
pub const MIN_METHOD_LINES: u32 = 0;

/// Files handed to the sequential driver per batch
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Files larger than this many bytes are split into chunks
pub const DEFAULT_CHUNK_SIZE: usize = 15 * 1024;

/// Smallest accepted chunk size
pub const MIN_CHUNK_SIZE: usize = 64;

/// Results between two progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// Runtime configuration shared by drivers, workers and the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintConfig {
    pub min_function_chars: usize,
    pub min_method_lines: u32,
    pub batch_size: usize,
    pub chunk_size: usize,
    pub progress_interval: usize,
    pub thread_count: usize,
    pub srcml_binary: String,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            min_function_chars: MIN_FUNCTION_CHARS,
            min_method_lines: MIN_METHOD_LINES,
            batch_size: DEFAULT_BATCH_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            thread_count: num_cpus::get().max(1),
            srcml_binary: "srcml".to_string(),
        }
    }
}

impl FingerprintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_function_chars(mut self, chars: usize) -> Self {
        self.min_function_chars = chars;
        self
    }

    pub fn with_min_method_lines(mut self, lines: u32) -> Self {
        self.min_method_lines = lines;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn with_srcml_binary(mut self, binary: impl Into<String>) -> Self {
        self.srcml_binary = binary.into();
        self
    }

    /// Size thresholds applied at function exit
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.min_function_chars, self.min_method_lines)
    }

    /// Range checks
    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::range_with_hint(
                "batch_size",
                self.batch_size,
                1,
                usize::MAX,
                "A batch must hold at least one file.",
            ));
        }
        if self.chunk_size < MIN_CHUNK_SIZE {
            return Err(ConfigError::range_with_hint(
                "chunk_size",
                self.chunk_size,
                MIN_CHUNK_SIZE,
                usize::MAX,
                "Tiny chunks split almost every function; use the default of 15360.",
            ));
        }
        if self.progress_interval == 0 {
            return Err(ConfigError::range_with_hint(
                "progress_interval",
                self.progress_interval,
                1,
                usize::MAX,
                "Set a positive number of results between progress lines.",
            ));
        }
        if self.thread_count == 0 {
            return Err(ConfigError::range_with_hint(
                "thread_count",
                self.thread_count,
                1,
                usize::MAX,
                "At least one worker is required.",
            ));
        }
        Ok(())
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let mut config = Self::default();
        if let Some(t) = export.thresholds {
            if let Some(v) = t.min_function_chars {
                config.min_function_chars = v;
            }
            if let Some(v) = t.min_method_lines {
                config.min_method_lines = v;
            }
        }
        if let Some(p) = export.parallel {
            if let Some(v) = p.thread_count {
                config.thread_count = v;
            }
            if let Some(v) = p.batch_size {
                config.batch_size = v;
            }
            if let Some(v) = p.progress_interval {
                config.progress_interval = v;
            }
        }
        if let Some(c) = export.chunking.and_then(|c| c.chunk_size) {
            config.chunk_size = c;
        }
        if let Some(b) = export.front_end.and_then(|f| f.srcml_binary) {
            config.srcml_binary = b;
        }

        config.validate()?;
        Ok(config)
    }

    /// Export as a complete v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            thresholds: Some(ThresholdSection {
                min_function_chars: Some(self.min_function_chars),
                min_method_lines: Some(self.min_method_lines),
            }),
            parallel: Some(ParallelSection {
                thread_count: Some(self.thread_count),
                batch_size: Some(self.batch_size),
                progress_interval: Some(self.progress_interval),
            }),
            chunking: Some(ChunkingSection {
                chunk_size: Some(self.chunk_size),
            }),
            front_end: Some(FrontEndSection {
                srcml_binary: Some(self.srcml_binary.clone()),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}
