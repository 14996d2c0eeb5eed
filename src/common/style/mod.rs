//! Common style and formatting types.
//!
//! Colors in the two forms the output needs: byte RGB for RTF color tables
//! and normalized RGBA for document attributes.

// Submodule declarations
pub mod color;

// Re-exports
pub use color::{RGBColor, RgbaColor};
