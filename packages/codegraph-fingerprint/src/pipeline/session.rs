//! Multi-language parse session
//!
//! Routes files to one [`ParseDriver`] per language and collects every
//! record of a run.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::driver::ParseDriver;
use crate::config::FingerprintConfig;
use crate::features::fingerprint::{create_parser, SourceParser};
use crate::features::parsing::{SrcmlExporter, StructuralExporter};
use crate::shared::models::{FingerprintRecord, Language, Result};

/// Everything one run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutput {
    /// Files accepted by the session, in the order they were added
    pub file_names: Vec<String>,
    pub records: Vec<FingerprintRecord>,
}

pub struct ParseSession {
    config: FingerprintConfig,
    drivers: HashMap<Language, ParseDriver>,
    file_names: Vec<String>,
}

impl ParseSession {
    /// Session with the default front-ends; tag-tree languages share one
    /// `srcml` exporter.
    pub fn new(config: FingerprintConfig) -> Self {
        let exporter = Arc::new(SrcmlExporter::new(config.srcml_binary.clone()));
        Self::with_exporter(config, exporter)
    }

    pub fn with_exporter(config: FingerprintConfig, exporter: Arc<dyn StructuralExporter>) -> Self {
        let thresholds = config.thresholds();
        let drivers = Language::ALL
            .into_iter()
            .map(|language| {
                let parser = create_parser(language, thresholds, Arc::clone(&exporter));
                (language, ParseDriver::new(parser, config.clone()))
            })
            .collect();
        Self {
            config,
            drivers,
            file_names: Vec::new(),
        }
    }

    /// Replace the front-end of `parser.language()`
    pub fn with_parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        let language = parser.language();
        self.drivers
            .insert(language, ParseDriver::new(parser, self.config.clone()));
        self
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Buffer a file for its language. Returns `false` for unsupported
    /// extensions.
    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) -> bool {
        let name = name.into();
        let Some(driver) = Language::from_path(&name).and_then(|l| self.drivers.get_mut(&l))
        else {
            debug!(file = %name, "Unsupported file type, skipping");
            return false;
        };
        driver.add_file(name.clone(), text);
        self.file_names.push(name);
        true
    }

    pub fn file_count(&self) -> usize {
        self.file_names.len()
    }

    /// Parse every buffered file through the worker pools
    pub fn run(&mut self) -> Result<ParseOutput> {
        let thread_count = self.config.thread_count;
        self.run_with(|driver| driver.parallel_parse(thread_count))
    }

    /// Parse every buffered file in sequential batches of `batch_size`
    pub fn run_sequential(&mut self) -> Result<ParseOutput> {
        let batch_size = self.config.batch_size;
        self.run_with(|driver| driver.parse(batch_size))
    }

    fn run_with<F>(&mut self, mut parse: F) -> Result<ParseOutput>
    where
        F: FnMut(&mut ParseDriver) -> Result<Vec<FingerprintRecord>>,
    {
        let mut records = Vec::new();
        for language in Language::ALL {
            let Some(driver) = self.drivers.get_mut(&language) else {
                continue;
            };
            if driver.is_empty() {
                continue;
            }
            let files = driver.len();
            let parsed = parse(driver)?;
            info!(
                language = %language,
                files,
                records = parsed.len(),
                "Language finished"
            );
            records.extend(parsed);
        }

        Ok(ParseOutput {
            file_names: std::mem::take(&mut self.file_names),
            records,
        })
    }
}
