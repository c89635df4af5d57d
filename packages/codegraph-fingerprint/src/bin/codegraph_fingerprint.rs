//! Codegraph Fingerprint CLI
//!
//! # Usage
//!
//! ```bash
//! # Fingerprint every supported file under a directory (NDJSON on stdout)
//! cargo run --bin codegraph-fingerprint --release -- parse ./repo --threads 8
//!
//! # Serve the worker line protocol on stdin/stdout
//! cargo run --bin codegraph-fingerprint -- worker --language python
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::{DirEntry, WalkDir};

use codegraph_fingerprint::features::parsing::SrcmlExporter;
use codegraph_fingerprint::pipeline::protocol::{record_line, serve_lines};
use codegraph_fingerprint::{create_parser, FingerprintConfig, Language, ParseSession};

/// Directory or file names containing any of these are never visited
const EXCLUDED: &[&str] = &[
    ".git",
    "test",
    "tests",
    "build",
    "dist",
    "demo",
    "docs",
    "node_modules",
    "generated",
    "backup",
    "examples",
    ".min.",
    "-min.",
];

#[derive(Parser)]
#[command(name = "codegraph-fingerprint")]
#[command(about = "Per-function content fingerprints for clone detection", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fingerprint every supported file under a directory
    Parse {
        /// Root directory (or a single file)
        path: PathBuf,

        /// Worker threads per language (defaults to the number of CPUs)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Parse in sequential batches instead of through the worker pool
        #[arg(long)]
        sequential: bool,
    },

    /// Serve the worker line protocol on stdin/stdout
    Worker {
        /// Language handled by this worker
        #[arg(short, long)]
        language: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => FingerprintConfig::from_yaml(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FingerprintConfig::default(),
    };

    match cli.command {
        Commands::Parse {
            path,
            threads,
            sequential,
        } => {
            let config = match threads {
                Some(n) => config.with_thread_count(n),
                None => config,
            };
            config.validate()?;
            run_parse(&path, config, sequential)
        }
        Commands::Worker { language } => run_worker(&language, config),
    }
}

fn run_parse(root: &Path, config: FingerprintConfig, sequential: bool) -> Result<()> {
    let mut session = ParseSession::new(config);

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if Language::from_path(path).is_none() {
            continue;
        }
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!("Could not read {}, skipping: {}", path.display(), err);
                continue;
            }
        };
        session.add_file(display_name(root, path), text);
    }

    info!(files = session.file_count(), "Collected source files");

    let output = if sequential {
        session.run_sequential()?
    } else {
        session.run()?
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &output.records {
        out.write_all(record_line(record)?.as_bytes())?;
    }
    out.flush()?;

    info!(
        files = output.file_names.len(),
        records = output.records.len(),
        "Done"
    );
    Ok(())
}

fn run_worker(language: &str, config: FingerprintConfig) -> Result<()> {
    let Some(language) = Language::from_name(language) else {
        bail!("Unsupported language: {}", language);
    };

    let exporter = Arc::new(SrcmlExporter::new(config.srcml_binary.clone()));
    let parser = create_parser(language, config.thresholds(), exporter);

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve_lines(
        parser.as_ref(),
        config.batch_size,
        stdin.lock(),
        stdout.lock(),
    )?;
    Ok(())
}

fn is_excluded(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy().to_lowercase();
    EXCLUDED.iter().any(|pattern| name.contains(pattern))
}

/// Path relative to the walk root, or the path itself for a single file
fn display_name(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => path.display().to_string(),
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("codegraph_fingerprint=debug,warn")
        } else {
            EnvFilter::new("codegraph_fingerprint=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
