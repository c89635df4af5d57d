//! Function fingerprint extraction
//!
//! Turns each function or method of a source file into a content hash
//! that survives whitespace and identifier renaming.
//!
//! # Hexagonal Architecture
//!
//! ```text
//! External (Pipeline)
//!           ↓
//! application/ (TokenTreeParser, TagTreeParser)
//!           ↓
//! ports/ (SourceParser)      domain/ (Abstraction, FunctionContext)
//!           ↓
//! infrastructure/ (token-tree listener, srcML tag parser)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use codegraph_fingerprint::features::fingerprint::{create_parser, SourceParser};
//!
//! let parser = create_parser(Language::Python, Thresholds::default(), exporter);
//! let records = parser.parse_single("app.py", &source, false)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{create_parser, TagTreeParser, TokenTreeParser};
pub use domain::{Abstraction, FunctionContext};
pub use ports::{ChunkOutcome, SourceParser};
