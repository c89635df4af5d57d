//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema types. Conversion into [`FingerprintConfig`] lives in
//! `fingerprint_config.rs`.
//!
//! [`FingerprintConfig`]: super::FingerprintConfig

use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1). Optional only so a missing value can be
    /// reported with a dedicated error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunking: Option<ChunkingSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_end: Option<FrontEndSection>,
}

/// Minimum function size before a fingerprint is emitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_function_chars: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_method_lines: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParallelSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_interval: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkingSection {
    /// Files above this many bytes are split into chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontEndSection {
    /// Path or name of the srcML executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srcml_binary: Option<String>,
}
