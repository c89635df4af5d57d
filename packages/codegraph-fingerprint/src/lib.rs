/*
 * Codegraph Fingerprint - Function Content Hashing
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (FingerprintRecord, CodeChunk, Language)
 * - features/    : Vertical slices (parsing → fingerprint, chunking)
 * - pipeline/    : Parse driver, session, worker pool and its line protocol
 *
 * Performance:
 * - One OS thread per worker, message passing only
 * - Rayon batches for the sequential driver
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (front-ends, fingerprinting, chunking)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::FingerprintConfig;
pub use errors::{CodegraphError, Result};
pub use features::fingerprint::{create_parser, SourceParser};
pub use pipeline::{ParseDriver, ParseOutput, ParseSession, PoolHandle, PoolState, WorkerPool};
pub use shared::models::{CodeChunk, FingerprintRecord, Job, Language, SourceFile};
