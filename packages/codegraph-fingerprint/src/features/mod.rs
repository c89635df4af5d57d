//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure logic (no front-end dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

pub mod parsing;

// Function fingerprints over token trees and srcML tag trees
pub mod fingerprint;

// Job queue, oversized-file splitting, remainder reassembly
pub mod chunking;
