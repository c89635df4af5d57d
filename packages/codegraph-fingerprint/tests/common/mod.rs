//! Common test utilities for codegraph-fingerprint
//!
//! Source fixtures, a canned srcML exporter and a log capture shared by the
//! integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, OnceLock};

use codegraph_fingerprint::features::parsing::StructuralExporter;
use codegraph_fingerprint::{FingerprintRecord, Language, Result};
use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

// ═══════════════════════════════════════════════════════════════════════════
// Source fixtures
// ═══════════════════════════════════════════════════════════════════════════

/// A Python function whose body has `body_lines` lines (at least two), so
/// `line_end - line_start == body_lines`
pub fn python_function(name: &str, body_lines: usize) -> String {
    let mut text = format!("def {}(a, b):\n    total = a\n", name);
    for i in 1..body_lines.saturating_sub(1) {
        text.push_str(&format!("    total = total + b * {}\n", i));
    }
    text.push_str("    return total\n");
    text
}

/// `count` Python functions separated by blank lines
pub fn python_module(count: usize, body_lines: usize) -> String {
    (0..count)
        .map(|i| python_function(&format!("fn_{}", i), body_lines))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sorted(mut records: Vec<FingerprintRecord>) -> Vec<FingerprintRecord> {
    records.sort_by(|a, b| {
        (&a.file_name, a.line_start, &a.function_name).cmp(&(
            &b.file_name,
            b.line_start,
            &b.function_name,
        ))
    });
    records
}

// ═══════════════════════════════════════════════════════════════════════════
// srcML fixtures
// ═══════════════════════════════════════════════════════════════════════════

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// `int <name>(int a, int b) { return a + b; }` as srcML, four source lines
pub fn srcml_add_function(name: &str) -> String {
    format!(
        "<function><type><name>int</name></type> <name>{}</name><parameter_list>(<parameter><decl><type><name>int</name></type> <name>a</name></decl></parameter>, <parameter><decl><type><name>int</name></type> <name>b</name></decl></parameter>)</parameter_list>\n<block>{{<block_content>\n    <return>return <expr><name>a</name> <operator>+</operator> <name>b</name></expr>;</return>\n</block_content>}}</block></function>\n",
        name
    )
}

pub fn srcml_unit(language: &str, file_name: &str, body: &str) -> String {
    format!(
        "{}<unit xmlns=\"http://www.srcML.org/srcML/src\" revision=\"1.0.0\" language=\"{}\" filename=\"{}\">{}</unit>\n",
        XML_HEADER, language, file_name, body
    )
}

/// Exporter returning a prepared export per file name
#[derive(Default)]
pub struct CannedExporter {
    exports: Mutex<Vec<(String, String)>>,
    calls: Mutex<Vec<String>>,
}

impl CannedExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export(self, file_name: &str, export: String) -> Self {
        self.exports.lock().push((file_name.to_string(), export));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl StructuralExporter for CannedExporter {
    fn export(&self, file_name: &str, _source: &str, _language: Language) -> Result<String> {
        self.calls.lock().push(file_name.to_string());
        Ok(self
            .exports
            .lock()
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, export)| export.clone())
            .unwrap_or_default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Log capture
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Captured lines mentioning `needle`
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Process-wide log capture. Every thread logs into the same buffer, so
/// tests should look for lines naming their own files.
pub fn capture_logs() -> LogBuffer {
    static LOGS: OnceLock<LogBuffer> = OnceLock::new();
    LOGS.get_or_init(|| {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        buffer
    })
    .clone()
}
