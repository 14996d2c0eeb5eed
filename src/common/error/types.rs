//! Unified error type for pro6doc.
//!
//! Only input problems abort a build. Characters that cannot be encoded in
//! the RTF charset fall back to numeric escapes and arrangement entries
//! without a group are dropped; neither surfaces here.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pro6doc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The song source declared no arrangement, so no section could be found
    #[error("No sections found in song file")]
    NoSections,

    /// A source directory yielded neither sidecars nor media
    #[error("No content files found in {}", .0.display())]
    NoContent(PathBuf),

    /// Source file or directory does not exist
    #[error("Source {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    /// A JSON slide sidecar could not be read into a slide
    #[error("Invalid slide config {}: {message}", path.display())]
    InvalidSlideConfig { path: PathBuf, message: String },

    /// Builder configuration is malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for pro6doc operations.
pub type Result<T> = std::result::Result<T, Error>;
