//! Common types, traits, and utilities shared across the crate.
//!
//! Errors, node identifiers, colors and XML escaping live here so that the
//! song, RTF and document layers agree on them.

// Submodule declarations
pub mod error;
pub mod id;
pub mod style;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use style::{RGBColor, RgbaColor};
