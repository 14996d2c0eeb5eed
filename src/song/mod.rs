//! Song sources: parsing, pagination and section styling.
//!
//! - [`parser`] turns song text into sections and an arrangement
//! - [`paginate`](mod@paginate) splits a section into slide pages
//! - [`section`] derives group names and colors from section headers

pub mod paginate;
pub mod parser;
pub mod section;

pub use paginate::{paginate, slide_label};
pub use parser::{ARRANGEMENT_MARKER, ParsedSong, Section, parse_lines, parse_song, parse_song_file};
pub use section::{SectionKind, SectionLook, SectionPalette, section_display_name};
