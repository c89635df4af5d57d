//! Multi-language parse session tests
//!
//! Routing by extension, srcML-backed languages through a canned exporter,
//! YAML configuration and the record line format.

#[path = "../common/mod.rs"]
mod common;

use std::io::Write;
use std::sync::Arc;

use codegraph_fingerprint::config::ConfigError;
use codegraph_fingerprint::features::fingerprint::TokenTreeParser;
use codegraph_fingerprint::features::parsing::PythonGrammar;
use codegraph_fingerprint::pipeline::protocol::{decode_line, record_line};
use codegraph_fingerprint::shared::utils::hashing::{fingerprint, Thresholds};
use codegraph_fingerprint::{FingerprintConfig, FingerprintRecord, ParseSession};
use common::{python_function, sorted, srcml_add_function, srcml_unit, CannedExporter};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn config() -> FingerprintConfig {
    FingerprintConfig::default().with_thread_count(3)
}

fn canned() -> CannedExporter {
    CannedExporter::new()
        .with_export(
            "src/math.cpp",
            srcml_unit(
                "C++",
                "src/math.cpp",
                &format!("{}\n{}", srcml_add_function("add"), srcml_add_function("plus")),
            ),
        )
        .with_export(
            "src/Calc.java",
            srcml_unit("Java", "src/Calc.java", &srcml_add_function("sum")),
        )
}

#[test]
fn test_mixed_languages() {
    let exporter = Arc::new(canned());
    let mut session = ParseSession::with_exporter(config(), exporter.clone());

    assert!(session.add_file("src/app.py", python_function("run", 3)));
    assert!(session.add_file("src/ui.js", "function show(item) {\n  return item.label;\n}\n"));
    assert!(session.add_file("src/math.cpp", "// source is only read by srcml"));
    assert!(session.add_file("src/Calc.java", "class Calc {}"));
    assert!(!session.add_file("README.md", "# docs"));
    assert!(!session.add_file("Makefile", "all:"));

    let output = session.run().unwrap();
    assert_eq!(
        output.file_names,
        vec!["src/app.py", "src/ui.js", "src/math.cpp", "src/Calc.java"]
    );

    let records = sorted(output.records);
    let summary: Vec<(&str, &str, u32)> = records
        .iter()
        .map(|r| (r.file_name.as_str(), r.function_name.as_str(), r.line_start))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("src/Calc.java", "sum", 1),
            ("src/app.py", "run", 1),
            ("src/math.cpp", "add", 1),
            ("src/math.cpp", "plus", 6),
            ("src/ui.js", "show", 1),
        ]
    );

    let cpp_hash = fingerprint("intfuncname(intvar,intvar){returnvar+var;}");
    assert!(records
        .iter()
        .filter(|r| r.file_name != "src/app.py" && r.file_name != "src/ui.js")
        .all(|r| r.hash == cpp_hash));

    let mut calls = exporter.calls();
    calls.sort();
    assert_eq!(calls, vec!["src/Calc.java", "src/math.cpp"]);
}

#[test]
fn test_sequential_and_pooled_runs_agree() {
    let files = [
        ("a.py", python_function("alpha", 4)),
        ("b.py", python_function("beta", 6)),
        ("c.js", "function gamma(x) {\n  return x * 2;\n}\n".to_string()),
        ("d.cpp", String::new()),
        ("src/math.cpp", String::new()),
    ];

    let mut pooled = ParseSession::with_exporter(config(), Arc::new(canned()));
    let mut sequential = ParseSession::with_exporter(config(), Arc::new(canned()));
    for (name, text) in &files {
        pooled.add_file(*name, text.clone());
        sequential.add_file(*name, text.clone());
    }

    let pooled = pooled.run().unwrap();
    let sequential = sequential.run_sequential().unwrap();
    assert_eq!(pooled.file_names, sequential.file_names);
    assert_eq!(sorted(pooled.records.clone()), sorted(sequential.records));
    assert_eq!(pooled.records.len(), 5);
}

#[test]
fn test_substituted_parser_applies_its_thresholds() {
    let strict = TokenTreeParser::new(PythonGrammar::new(), Thresholds::new(0, 5));
    let mut session =
        ParseSession::with_exporter(config(), Arc::new(canned())).with_parser(Arc::new(strict));

    session.add_file("short.py", python_function("short", 2));
    session.add_file("long.py", python_function("long", 6));

    let output = session.run().unwrap();
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].function_name, "long");
}

#[test]
fn test_yaml_config_drives_thresholds() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "version: 1\nthresholds:\n  min_method_lines: 5\nparallel:\n  thread_count: 2\n  batch_size: 3\nchunking:\n  chunk_size: 4096\nfront_end:\n  srcml_binary: /nonexistent/srcml"
    )
    .unwrap();

    let config = FingerprintConfig::from_yaml(file.path()).unwrap();
    assert_eq!(config.min_method_lines, 5);
    assert_eq!(config.thread_count, 2);
    assert_eq!(config.batch_size, 3);
    assert_eq!(config.chunk_size, 4096);

    let mut session = ParseSession::new(config);
    session.add_file("short.py", python_function("short", 3));
    session.add_file("long.py", python_function("long", 5));
    // the configured srcml binary does not exist: the file is skipped, the run goes on
    session.add_file("Main.java", "class Main {}");

    let output = session.run().unwrap();
    assert_eq!(output.file_names.len(), 3);
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].function_name, "long");
}

#[test]
fn test_yaml_config_rejects_bad_documents() {
    assert!(matches!(
        FingerprintConfig::from_yaml_str("parallel:\n  thread_count: 2\n"),
        Err(ConfigError::MissingVersion)
    ));
    assert!(matches!(
        FingerprintConfig::from_yaml_str("version: 1\nparallel:\n  batch_size: 0\n"),
        Err(ConfigError::Range { .. })
    ));
    assert!(FingerprintConfig::from_yaml_str("version: 1\nunknown: true\n").is_err());
}

#[test]
fn test_record_lines_are_ndjson() {
    let mut session = ParseSession::with_exporter(config(), Arc::new(canned()));
    session.add_file("one.py", python_function("one", 3));
    session.add_file("two.py", python_function("two", 3));

    let output = session.run().unwrap();
    let ndjson: String = output
        .records
        .iter()
        .map(|r| record_line(r).unwrap())
        .collect();

    assert_eq!(ndjson.lines().count(), 2);
    let decoded: Vec<FingerprintRecord> = ndjson.lines().map(|l| decode_line(l).unwrap()).collect();
    assert_eq!(decoded, output.records);
    assert!(ndjson.lines().all(|l| l.contains("\"functionName\"")));
}
