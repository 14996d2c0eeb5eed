//! XML helpers shared by the document writer.

mod escape;

pub use escape::escape_xml;
