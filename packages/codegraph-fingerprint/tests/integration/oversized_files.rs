//! Oversized files through the worker pool
//!
//! Files longer than `chunk_size` are split, parsed chunk by chunk and the
//! unresolved tails reassembled. The outcome must equal a whole-file parse,
//! wherever the cuts fall.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use codegraph_fingerprint::features::chunking::CodeBlockSplitter;
use codegraph_fingerprint::features::fingerprint::{SourceParser, TokenTreeParser};
use codegraph_fingerprint::features::parsing::{JavaScriptGrammar, PythonGrammar};
use codegraph_fingerprint::shared::utils::hashing::Thresholds;
use codegraph_fingerprint::{CodeChunk, FingerprintConfig, FingerprintRecord, ParseDriver, WorkerPool};
use common::{python_function, sorted};
use pretty_assertions::assert_eq;

const CHUNK_SIZES: &[usize] = &[64, 97, 150, 333, 1024];

fn python() -> Arc<dyn SourceParser> {
    Arc::new(TokenTreeParser::new(PythonGrammar::new(), Thresholds::default()))
}

fn javascript() -> Arc<dyn SourceParser> {
    Arc::new(TokenTreeParser::new(JavaScriptGrammar::new(), Thresholds::default()))
}

fn python_file() -> String {
    let mut text = String::from("import os\nfrom typing import List\n\nLIMIT = 10\n\n");
    for i in 0..12 {
        text.push_str(&python_function(&format!("step_{}", i), 2 + i % 7));
        text.push('\n');
    }
    text.push_str("@cached\ndef decorated(value):\n    return os.path.join(value, 'x')\n\n");
    text.push_str(
        "class Store:\n    def __init__(self, items):\n        self.items = items\n\n    def size(self):\n        return len(self.items)\n\n",
    );
    text.push_str("async def fetch(url, retries):\n    for _ in range(retries):\n        await wait(url)\n    return url\n");
    text
}

fn javascript_file() -> String {
    let mut text = String::from("import { join } from 'path';\n\n");
    for i in 0..10 {
        text.push_str(&format!(
            "function handler{i}(req, res) {{\n  const body = req.body + {i};\n  if (body > 3) {{\n    res.send(join(body, 'x'));\n  }}\n  return body;\n}}\n\n"
        ));
    }
    text.push_str("const arrow = (a, b) => {\n  return a * b;\n};\n\nexport function last(x) {\n  return arrow(x, x);\n}\n");
    text
}

/// Functions whose docstring holds a column-0 `def` line
fn python_strings_with_defs() -> String {
    (0..6)
        .map(|i| {
            format!(
                "def real_{i}(a, b):\n    \"\"\"Example usage:\n\ndef fake():\n    return {i}\n\"\"\"\n    total = a + b\n    return total * {i}\n\n"
            )
        })
        .collect()
}

/// Nested functions written without indentation
fn unindented_javascript() -> String {
    (0..6)
        .map(|i| {
            format!(
                "function outer{i}(a) {{\nvar x = a + {i};\nfunction inner{i}(b) {{\nreturn b * x;\n}}\nreturn inner{i}(x);\n}}\n\n"
            )
        })
        .collect()
}

/// Run `chunks` straight through a worker pool
fn pooled(parser: Arc<dyn SourceParser>, chunks: Vec<CodeChunk>) -> Vec<FingerprintRecord> {
    let mut pool = WorkerPool::new(3, parser, &FingerprintConfig::default());
    for chunk in chunks {
        pool.add_job(chunk);
    }
    pool.close();
    pool.process().unwrap()
}

fn every(step: usize, len: usize) -> Vec<usize> {
    (step..len).step_by(step).collect()
}

fn chunked(
    parser: Arc<dyn SourceParser>,
    name: &str,
    text: &str,
    chunk_size: usize,
    threads: usize,
) -> Vec<FingerprintRecord> {
    let config = FingerprintConfig::default().with_chunk_size(chunk_size);
    let mut driver = ParseDriver::new(parser, config);
    driver.add_file(name, text);
    driver.parallel_parse(threads).unwrap()
}

#[test]
fn test_python_reassembly_matches_whole_file() {
    let text = python_file();
    let whole = python().parse_single("big.py", &text, false).unwrap();
    assert_eq!(whole.len(), 16);

    for &chunk_size in CHUNK_SIZES {
        assert!(CodeBlockSplitter::new(chunk_size).needs_split(&text));
        for threads in [1, 3] {
            let records = chunked(python(), "big.py", &text, chunk_size, threads);
            assert_eq!(
                sorted(records),
                sorted(whole.clone()),
                "chunk_size = {}, threads = {}",
                chunk_size,
                threads
            );
        }
    }
}

#[test]
fn test_javascript_reassembly_matches_whole_file() {
    let text = javascript_file();
    let whole = javascript().parse_single("big.js", &text, false).unwrap();
    assert!(whole.len() >= 12);

    for &chunk_size in CHUNK_SIZES {
        let records = chunked(javascript(), "big.js", &text, chunk_size, 2);
        assert_eq!(sorted(records), sorted(whole.clone()), "chunk_size = {}", chunk_size);
    }
}

#[test]
fn test_line_numbers_survive_splitting() {
    let text = python_file();
    let records = sorted(chunked(python(), "big.py", &text, 64, 2));

    for record in &records {
        let line = text
            .lines()
            .nth(record.line_start as usize - 1)
            .unwrap_or_default();
        assert!(
            line.contains(&format!("def {}", record.function_name)),
            "{} does not start at line {}: {:?}",
            record.function_name,
            record.line_start,
            line
        );
    }
}

#[test]
fn test_split_chunks_cover_the_file() {
    let text = python_file();
    for &chunk_size in CHUNK_SIZES {
        let chunks = CodeBlockSplitter::new(chunk_size).split("big.py", &text);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.text.len() <= chunk_size));

        let joined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(joined, text);
        for pair in chunks.windows(2) {
            assert!(pair[0].precedes(&pair[1]));
            assert_eq!(pair[0].open_end, pair[1].open_start);
        }
    }
}

#[test]
fn test_small_files_and_large_files_mix() {
    let big = python_file();
    let whole_big = python().parse_single("big.py", &big, false).unwrap();

    let config = FingerprintConfig::default().with_chunk_size(200);
    let mut driver = ParseDriver::new(python(), config);
    driver.add_file("big.py", big.clone());
    for i in 0..6 {
        driver.add_file(format!("small_{}.py", i), python_function(&format!("tiny_{}", i), 2));
    }
    let records = driver.parallel_parse(4).unwrap();

    assert_eq!(records.len(), whole_big.len() + 6);
    let big_records: Vec<_> = records
        .into_iter()
        .filter(|r| r.file_name == "big.py")
        .collect();
    assert_eq!(sorted(big_records), sorted(whole_big));
}

#[test]
fn test_column_zero_defs_inside_strings() {
    let text = python_strings_with_defs();
    let whole = python().parse_single("docs.py", &text, false).unwrap();
    assert_eq!(whole.len(), 6);

    for chunk_size in [40, 64, 97, 150] {
        let records = chunked(python(), "docs.py", &text, chunk_size, 3);
        assert_eq!(sorted(records), sorted(whole.clone()), "chunk_size = {}", chunk_size);
    }
}

#[test]
fn test_unindented_nested_javascript() {
    let text = unindented_javascript();
    let whole = javascript().parse_single("nested.js", &text, false).unwrap();
    assert_eq!(whole.len(), 12);

    for chunk_size in [40, 64, 97, 150] {
        let records = chunked(javascript(), "nested.js", &text, chunk_size, 3);
        assert_eq!(sorted(records), sorted(whole.clone()), "chunk_size = {}", chunk_size);
    }
}

#[test]
fn test_cuts_at_arbitrary_offsets() {
    let sources = [
        (python(), "docs.py", python_strings_with_defs()),
        (javascript(), "nested.js", unindented_javascript()),
        (python(), "big.py", python_file()),
    ];

    for (parser, name, text) in sources {
        let whole = parser.parse_single(name, &text, false).unwrap();
        for step in [7, 23, 40, 64, 101] {
            let chunks = CodeBlockSplitter::cut_at(name, &text, &every(step, text.len()));
            let records = pooled(Arc::clone(&parser), chunks);
            assert_eq!(
                sorted(records),
                sorted(whole.clone()),
                "{} cut every {} bytes",
                name,
                step
            );
        }
    }
}

#[test]
fn test_closed_cuts_inside_strings_are_recovered() {
    let text = python_strings_with_defs();
    let whole = python().parse_single("docs.py", &text, false).unwrap();

    // every `def` line taken for an item start, including the ones inside strings
    let offsets: Vec<usize> = text.match_indices("def ").map(|(at, _)| at).collect();
    let chunks: Vec<CodeChunk> = CodeBlockSplitter::cut_at("docs.py", &text, &offsets)
        .into_iter()
        .map(|chunk| CodeChunk {
            open_start: false,
            open_end: false,
            ..chunk
        })
        .collect();
    assert_eq!(chunks.len(), 12);
    assert!(chunks.iter().all(|c| c.partial));

    assert_eq!(sorted(pooled(python(), chunks)), sorted(whole));
}
