//! Text styling for slide RTF payloads.

use crate::common::RGBColor;

/// Which RTF layout to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RtfFormat {
    /// Flat text in [`TextStyle::color`]
    Simple,
    /// White centered text with a black stroke; the color is ignored
    #[default]
    Outlined,
}

/// Font and color of slide text.
///
/// The default is the lyric style: bold 114pt `PingFangSC-Semibold`, outlined.
///
/// # Examples
///
/// ```rust
/// use pro6doc::rtf::{RtfFormat, TextStyle};
///
/// let style = TextStyle::new()
///     .with_font_name("Helvetica")
///     .with_font_size(72)
///     .with_format(RtfFormat::Simple);
/// assert!(style.bold);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// PostScript font name, written verbatim into the font table
    pub font_name: String,
    /// Font size in half points, as RTF `\fs` expects
    pub font_size: u32,
    /// Whether the text is bold
    pub bold: bool,
    /// Simple or outlined layout
    pub format: RtfFormat,
    /// Foreground color of simple text
    pub color: RGBColor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_name: "PingFangSC-Semibold".to_string(),
            font_size: 114,
            bold: true,
            format: RtfFormat::Outlined,
            color: RGBColor::BLACK,
        }
    }
}

impl TextStyle {
    /// Create the default lyric style.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Style used by slides described in JSON sidecars unless overridden.
    pub fn sidecar_default() -> Self {
        Self {
            font_name: "PingFangSC-Regular".to_string(),
            font_size: 59,
            bold: false,
            format: RtfFormat::Simple,
            color: RGBColor::BLACK,
        }
    }

    #[inline]
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    #[inline]
    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    #[inline]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[inline]
    pub fn with_format(mut self, format: RtfFormat) -> Self {
        self.format = format;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }
}
