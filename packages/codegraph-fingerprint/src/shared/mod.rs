//! Shared module - Common types and utilities
//!
//! This module contains types that are shared across all features.
//! It has no front-end dependencies (no tree-sitter, no srcML).

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
