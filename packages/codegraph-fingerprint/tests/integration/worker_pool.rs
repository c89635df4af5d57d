//! Worker pool integration tests
//!
//! Termination, agreement with sequential parsing, streamed input through a
//! handle, and crash propagation.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use codegraph_fingerprint::features::fingerprint::{SourceParser, TokenTreeParser};
use codegraph_fingerprint::features::parsing::PythonGrammar;
use codegraph_fingerprint::shared::utils::hashing::Thresholds;
use codegraph_fingerprint::{
    CodeChunk, CodegraphError, FingerprintConfig, FingerprintRecord, Language, ParseDriver,
    PoolState, Result, WorkerPool,
};
use common::{python_function, python_module, sorted};
use pretty_assertions::assert_eq;

fn python() -> Arc<dyn SourceParser> {
    Arc::new(TokenTreeParser::new(PythonGrammar::new(), Thresholds::default()))
}

fn corpus() -> Vec<(String, String)> {
    (0..16)
        .map(|i| (format!("pkg/mod_{}.py", i), python_module(1 + i % 3, 3 + i % 4)))
        .collect()
}

fn sequential(files: &[(String, String)]) -> Vec<FingerprintRecord> {
    let mut driver = ParseDriver::new(python(), FingerprintConfig::default());
    for (name, text) in files {
        driver.add_file(name.clone(), text.clone());
    }
    driver.parse(4).unwrap()
}

#[test]
fn test_pool_matches_sequential_for_any_worker_count() {
    let files = corpus();
    let expected = sorted(sequential(&files));
    assert_eq!(expected.len(), 31);

    for workers in 1..=5 {
        let mut pool = WorkerPool::new(workers, python(), &FingerprintConfig::default());
        for (name, text) in &files {
            pool.add_job(CodeChunk::whole(name.clone(), text.clone()));
        }
        pool.close();
        let records = pool.process().unwrap();
        assert_eq!(sorted(records), expected, "workers = {}", workers);
    }
}

#[test]
fn test_more_workers_than_jobs() {
    let mut pool = WorkerPool::new(8, python(), &FingerprintConfig::default());
    pool.add_job(CodeChunk::whole("only.py", python_function("only", 3)));
    pool.close();
    assert_eq!(pool.state(), PoolState::Draining);
    assert_eq!(pool.queued(), 1);

    let records = pool.process().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].function_name, "only");
}

#[test]
fn test_streamed_input_through_handle() {
    let pool = WorkerPool::new(3, python(), &FingerprintConfig::default());
    let handle = pool.handle();

    let producer = thread::spawn(move || {
        for i in 0..10 {
            let name = format!("stream_{}.py", i);
            handle
                .submit(CodeChunk::whole(name, python_function(&format!("s{}", i), 4)))
                .unwrap();
            if i % 3 == 0 {
                thread::sleep(Duration::from_millis(2));
            }
        }
        handle.close().unwrap();
    });

    let records = pool.process().unwrap();
    producer.join().unwrap();

    let mut names: Vec<String> = records.into_iter().map(|r| r.function_name).collect();
    names.sort();
    let mut expected: Vec<String> = (0..10).map(|i| format!("s{}", i)).collect();
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn test_idle_workers_request_more_input() {
    let pool = WorkerPool::new(2, python(), &FingerprintConfig::default());
    let handle = pool.handle();

    let feeder = thread::spawn(move || {
        for round in 0..3 {
            handle
                .input_requested()
                .recv_timeout(Duration::from_secs(10))
                .unwrap();
            let name = format!("round_{}.py", round);
            handle
                .submit(CodeChunk::whole(name, python_function(&format!("r{}", round), 3)))
                .unwrap();
        }
        handle.close().unwrap();
    });

    let records = pool.process().unwrap();
    feeder.join().unwrap();
    assert_eq!(records.len(), 3);
}

#[test]
fn test_failed_file_does_not_stop_the_pool() {
    let mut pool = WorkerPool::new(2, python(), &FingerprintConfig::default());
    pool.add_job(CodeChunk::whole("ok_1.py", python_function("first", 3)));
    pool.add_job(CodeChunk::whole("broken.py", "def broken(:\n    pass\n"));
    pool.add_job(CodeChunk::whole("ok_2.py", python_function("second", 3)));
    pool.close();

    let records = sorted(pool.process().unwrap());
    let files: Vec<&str> = records.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(files, vec!["ok_1.py", "ok_2.py"]);
}

struct Exploding;

impl SourceParser for Exploding {
    fn language(&self) -> Language {
        Language::Python
    }

    fn parse_single(
        &self,
        file_name: &str,
        _text: &str,
        _clear_cache: bool,
    ) -> Result<Vec<FingerprintRecord>> {
        if file_name == "explode.py" {
            panic!("front-end exploded");
        }
        Ok(Vec::new())
    }
}

#[test]
fn test_worker_crash_is_fatal() {
    let mut pool = WorkerPool::new(2, Arc::new(Exploding), &FingerprintConfig::default());
    for i in 0..4 {
        pool.add_job(CodeChunk::whole(format!("calm_{}.py", i), ""));
    }
    pool.add_job(CodeChunk::whole("explode.py", ""));
    pool.close();

    match pool.process() {
        Err(CodegraphError::WorkerCrashed { message, .. }) => {
            assert!(message.contains("explode.py"), "message: {}", message);
        }
        other => panic!("expected a worker crash, got {:?}", other.map(|r| r.len())),
    }
}
