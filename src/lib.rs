//! pro6doc - Build ProPresenter 6 presentation documents
//!
//! This library turns song lyrics, JSON slide sidecars and media files into
//! `RVPresentationDocument` XML (`.pro6`), the document format read by
//! ProPresenter 6.
//!
//! # Features
//!
//! - **Song parsing**: Section headers and an explicit performance arrangement
//! - **Pagination**: Sections split into slides under a line budget
//! - **Section styling**: Group names and graduated colors for verses and choruses
//! - **RTF text**: Cocoa RTF payloads with GB2312 escapes for Chinese text
//! - **Sidecar slides**: Per-slide position, font, colors and cues from JSON
//! - **Deterministic ids**: Pluggable identifier generators for reproducible output
//!
//! # Example - Building a song document
//!
//! ```rust
//! use pro6doc::pro6::{BuilderOptions, DocumentBuilder, writer};
//! use pro6doc::song::parse_song;
//!
//! # fn main() -> pro6doc::Result<()> {
//! let song = parse_song(
//!     "Arrangement\n\
//!      V1 C V1\n\
//!      V1\n\
//!      Amazing grace how sweet the sound\n\
//!      That saved a wretch like me\n\
//!      C\n\
//!      My chains are gone",
//! );
//!
//! let mut builder = DocumentBuilder::new(BuilderOptions::default());
//! let doc = builder.build_song("Amazing Grace", &song, &[])?;
//! assert_eq!(doc.groups.len(), 2);
//!
//! let xml = writer::to_xml(&doc);
//! assert!(xml.contains("name=\"Verse 1\""));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Building a slide directory
//!
//! ```no_run
//! use pro6doc::pro6::{BuilderOptions, DocumentBuilder, writer};
//!
//! # fn main() -> pro6doc::Result<()> {
//! let mut builder = DocumentBuilder::new(BuilderOptions::from_env()?);
//! let doc = builder.build_from_directory("source_materials/announcements")?;
//! writer::write_to_file(&doc, "announcements.pro6")?;
//! # Ok(())
//! # }
//! ```

/// Shared errors, identifiers, colors and XML escaping
pub mod common;

/// Song source parsing, pagination and section styling
pub mod song;

/// RTF payloads for slide text
pub mod rtf;

/// Presentation document model, builder and XML writer
pub mod pro6;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use pro6::{BuilderOptions, Document, DocumentBuilder};
