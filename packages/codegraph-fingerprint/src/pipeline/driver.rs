//! Per-language parse driver
//!
//! Buffers the files of one language and parses them either in bounded
//! sequential batches or through the worker pool.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::worker_pool::WorkerPool;
use crate::config::FingerprintConfig;
use crate::features::chunking::CodeBlockSplitter;
use crate::features::fingerprint::ports::SourceParser;
use crate::shared::models::{CodegraphError, FingerprintRecord, Language, Result, SourceFile};

pub struct ParseDriver {
    parser: Arc<dyn SourceParser>,
    config: FingerprintConfig,
    files: Vec<SourceFile>,
}

impl ParseDriver {
    pub fn new(parser: Arc<dyn SourceParser>, config: FingerprintConfig) -> Self {
        Self {
            parser,
            config,
            files: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.parser.language()
    }

    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.files.push(SourceFile::new(name, text));
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parse the buffered files in batches of `batch_size`, at most
    /// `batch_size` files at a time. The last file of every batch clears the
    /// front-end cache. Consumes the buffer.
    pub fn parse(&mut self, batch_size: usize) -> Result<Vec<FingerprintRecord>> {
        let files = std::mem::take(&mut self.files);
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = batch_size.max(1);
        let threads = rayon::ThreadPoolBuilder::new()
            .num_threads(batch_size)
            .thread_name(|i| format!("fingerprint-batch-{}", i))
            .build()
            .map_err(|e| CodegraphError::pool(format!("Failed to build batch pool: {}", e)))?;

        let total = files.len();
        let mut records = Vec::new();
        let mut done = 0;

        for batch in files.chunks(batch_size) {
            let last = batch.len() - 1;
            let parsed: Vec<Vec<FingerprintRecord>> = threads.install(|| {
                batch
                    .par_iter()
                    .enumerate()
                    .map(|(i, file)| self.parse_file(file, i == last))
                    .collect()
            });
            records.extend(parsed.into_iter().flatten());

            done += batch.len();
            info!(
                language = %self.language(),
                "Parsed {}/{} files",
                done,
                total
            );
        }

        Ok(records)
    }

    /// Parse the buffered files through a worker pool of
    /// `min(thread_count, file_count)` workers. Oversized files are split
    /// between their top-level items when the parser can reassemble them; a
    /// file the parser cannot delimit goes in whole. Consumes the buffer.
    pub fn parallel_parse(&mut self, thread_count: usize) -> Result<Vec<FingerprintRecord>> {
        let files = std::mem::take(&mut self.files);
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let workers = thread_count.min(files.len()).max(1);
        let mut pool = WorkerPool::new(workers, Arc::clone(&self.parser), &self.config);
        let splitter = CodeBlockSplitter::new(self.config.chunk_size);

        for file in files {
            let splittable = self.parser.supports_chunking() && splitter.needs_split(&file.text);
            let item_starts = splittable
                .then(|| self.parser.item_starts(&file.text))
                .flatten();
            match item_starts {
                Some(starts) => {
                    let chunks = splitter.split_at_items(&file.name, &file.text, &starts);
                    debug!(file = %file.name, chunks = chunks.len(), "Split oversized file");
                    for chunk in chunks {
                        pool.add_job(chunk);
                    }
                }
                None => {
                    pool.add_job(file.into_chunk());
                }
            }
        }
        pool.close();
        pool.process()
    }

    fn parse_file(&self, file: &SourceFile, clear_cache: bool) -> Vec<FingerprintRecord> {
        match self.parser.parse_single(&file.name, &file.text, clear_cache) {
            Ok(records) => {
                debug!(file = %file.name, records = records.len(), "Parsed file");
                records
            }
            Err(e) => {
                warn!("Error while parsing file {}, skipping: {}", file.name, e);
                Vec::new()
            }
        }
    }
}
