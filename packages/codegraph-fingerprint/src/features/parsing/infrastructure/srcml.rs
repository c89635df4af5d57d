//! srcML command-line exporter
//!
//! Runs `srcml -l <language> --filename <name>` with the source on stdin
//! and returns the tagged XML from stdout.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::features::parsing::ports::StructuralExporter;
use crate::shared::models::{CodegraphError, Language, Result};

#[derive(Debug, Clone)]
pub struct SrcmlExporter {
    binary: String,
}

impl SrcmlExporter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for SrcmlExporter {
    fn default() -> Self {
        Self::new("srcml")
    }
}

impl StructuralExporter for SrcmlExporter {
    fn export(&self, file_name: &str, source: &str, language: Language) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .arg("-l")
            .arg(language.srcml_name())
            .arg("--filename")
            .arg(file_name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    CodegraphError::FrontEndUnavailable(format!("{}: {}", self.binary, e))
                }
                _ => CodegraphError::Io(e),
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CodegraphError::parse_error("srcml stdin was not captured"))?;

        // stdin is fed from a second thread so a large export cannot
        // deadlock on a full stdout pipe
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
            let output = child.wait_with_output();
            (output, writer.join())
        });

        match written {
            Ok(Err(e)) => debug!(file = %file_name, error = %e, "srcml closed stdin early"),
            Err(_) => return Err(CodegraphError::parse_error("srcml stdin writer panicked")),
            Ok(Ok(())) => {}
        }

        let output = output?;
        if !output.status.success() {
            debug!(file = %file_name, status = %output.status, "srcml exited with failure");
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
