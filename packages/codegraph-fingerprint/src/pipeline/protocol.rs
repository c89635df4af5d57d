//! Coordinator ↔ worker message protocol
//!
//! Every message is one JSON object on its own line, adjacently tagged:
//!
//! ```text
//! {"kind":"JOB","data":{"payload":{...chunk...},"jobId":7}}
//! {"kind":"LOG","data":{"level":"warn","line":"Error while parsing file a.py, skipping"}}
//! {"kind":"RESULT","data":{"fileName":"a.py","records":[...]}}
//! {"kind":"IDLE"}
//! ```
//!
//! The exchange is strict request/response: the coordinator sends at most
//! one `JOB` (or `NO_JOB`); the worker answers with any number of `LOG`
//! lines, at most one `REMAINDER` and exactly one `RESULT` (or `IDLE` after
//! `NO_JOB`). `CLOSE` ends the worker.

use std::io::{BufRead, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::features::fingerprint::ports::SourceParser;
use crate::shared::models::{CodeChunk, FingerprintRecord, Job, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Worker → coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    #[serde(rename_all = "camelCase")]
    Result {
        file_name: String,
        records: Vec<FingerprintRecord>,
    },
    Remainder(CodeChunk),
    Log {
        level: LogLevel,
        line: String,
    },
    Idle,
}

impl WorkerMessage {
    pub fn warn(line: impl Into<String>) -> Self {
        WorkerMessage::Log {
            level: LogLevel::Warn,
            line: line.into(),
        }
    }
}

/// Coordinator → worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dispatch {
    Job(Job<CodeChunk>),
    NoJob,
    Close,
}

pub fn encode_line<T: Serialize>(message: &T) -> Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

pub fn decode_line<T: DeserializeOwned>(line: &str) -> Result<T> {
    Ok(serde_json::from_str(line.trim_end())?)
}

/// A bare record as one output line (no message envelope)
pub fn record_line(record: &FingerprintRecord) -> Result<String> {
    encode_line(record)
}

/// The front-end cache is cleared once every `batch_size` jobs
pub fn clears_cache(job_id: u64, batch_size: usize) -> bool {
    batch_size > 0 && (job_id + 1) % batch_size as u64 == 0
}

/// Run one job and produce the worker's full reply. Parse failures stay
/// inside the reply: a warning plus an empty `RESULT` for the file.
pub fn handle_job(
    parser: &dyn SourceParser,
    job: &Job<CodeChunk>,
    batch_size: usize,
) -> Vec<WorkerMessage> {
    let chunk = &job.payload;
    let clear_cache = clears_cache(job.job_id, batch_size);

    match parser.parse_chunk(chunk, clear_cache) {
        Ok(outcome) => {
            let mut reply: Vec<WorkerMessage> = outcome
                .warnings
                .into_iter()
                .map(WorkerMessage::warn)
                .collect();
            if let Some(remainder) = outcome.remainder {
                reply.push(WorkerMessage::Remainder(remainder));
            }
            reply.push(WorkerMessage::Result {
                file_name: chunk.file_name.clone(),
                records: outcome.records,
            });
            reply
        }
        Err(e) => vec![
            WorkerMessage::warn(format!(
                "Error while parsing file {}, skipping: {}",
                chunk.file_name, e
            )),
            WorkerMessage::Result {
                file_name: chunk.file_name.clone(),
                records: Vec::new(),
            },
        ],
    }
}

/// Serve the worker half of the protocol until `CLOSE` or end of input.
/// Returns the number of jobs handled.
pub fn serve_lines<R: BufRead, W: Write>(
    parser: &dyn SourceParser,
    batch_size: usize,
    reader: R,
    mut writer: W,
) -> Result<usize> {
    let mut jobs = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match decode_line::<Dispatch>(&line)? {
            Dispatch::Job(job) => {
                jobs += 1;
                handle_job(parser, &job, batch_size)
            }
            Dispatch::NoJob => vec![WorkerMessage::Idle],
            Dispatch::Close => break,
        };
        for message in &reply {
            writer.write_all(encode_line(message)?.as_bytes())?;
        }
        writer.flush()?;
    }
    debug!(jobs, "worker protocol finished");
    Ok(jobs)
}
