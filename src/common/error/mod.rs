//! Unified error types for pro6doc.
//!
//! Every fallible operation in the crate returns [`Result`], so callers deal
//! with one error type regardless of which stage failed.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
