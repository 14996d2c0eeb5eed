//! Presentation documents.
//!
//! - [`types`] is the document tree
//! - [`builder`] assembles trees from songs, freeform slides and sidecars
//! - [`source`] discovers songs' media and slide directories
//! - [`writer`] serializes trees as `RVPresentationDocument` XML

pub mod builder;
pub mod media;
pub mod options;
pub mod sidecar;
pub mod source;
pub mod types;
pub mod writer;

pub use builder::{DocumentBuilder, FreeformSlide};
pub use media::{ImageFormat, MediaKind};
pub use options::BuilderOptions;
pub use sidecar::{NumberOrText, SlideConfig, SlideSpec};
pub use types::{
    Cue, Document, DocumentKind, Group, MediaCue, Position, Rect, Slide, SongArrangement,
    TextElement, VerticalAlignment,
};
