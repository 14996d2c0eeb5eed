//! RTF payloads for slide text.
//!
//! Presentation documents store the text of a slide as a small Cocoa RTF
//! document, base64 encoded. This module renders that document for a string
//! and a [`TextStyle`].
//!
//! # Example
//!
//! ```rust
//! use base64::Engine;
//! use pro6doc::rtf::{TextStyle, encode_text};
//!
//! let payload = encode_text("Hi\n你好", &TextStyle::default());
//! let rtf = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();
//! let rtf = String::from_utf8(rtf).unwrap();
//! assert!(rtf.contains("Hi\\\n\\'c4\\'e3\\'ba\\'c3"));
//! ```

mod style;
mod writer;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

// Re-exports
pub use style::{RtfFormat, TextStyle};
pub use writer::{RtfWriter, gb2312_bytes, transliterate};

/// Render the RTF document for `text`.
pub fn render_rtf(text: &str, style: &TextStyle) -> String {
    let mut out = Vec::with_capacity(text.len() * 2 + 512);
    RtfWriter::new(&mut out)
        .write_document(text, style)
        .expect("writing to a Vec cannot fail");
    String::from_utf8(out).expect("RTF output is valid UTF-8")
}

/// Render the RTF document for `text` and base64 encode it.
///
/// Identical inputs always produce identical output.
pub fn encode_text(text: &str, style: &TextStyle) -> String {
    STANDARD.encode(render_rtf(text, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(payload: &str) -> String {
        String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_round_trips_through_base64() {
        let style = TextStyle::default();
        let payload = encode_text("Hi\n你好", &style);
        assert!(payload.is_ascii());
        assert_eq!(decode(&payload), render_rtf("Hi\n你好", &style));
    }

    #[test]
    fn test_encoded_payload_contains_boilerplate() {
        let rtf = decode(&encode_text("Hi\n你好", &TextStyle::default()));
        assert!(rtf.starts_with("{\\rtf1\\ansi\\ansicpg1252\\cocoartf2822\n"));
        assert!(rtf.contains("\\strokec3 Hi\\\n\\'c4\\'e3\\'ba\\'c3\n}"));
        assert!(rtf.is_ascii());
    }

    #[test]
    fn test_deterministic() {
        let style = TextStyle::sidecar_default();
        assert_eq!(encode_text("same", &style), encode_text("same", &style));
    }

    #[test]
    fn test_font_name_is_verbatim() {
        let style = TextStyle::sidecar_default().with_font_name("苹方");
        let rtf = render_rtf("x", &style);
        assert!(rtf.contains("\\fcharset134 苹方;"));
    }
}
