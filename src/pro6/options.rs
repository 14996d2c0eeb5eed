//! Builder configuration.

use std::num::NonZeroUsize;

use crate::common::{Error, Result};
use crate::rtf::TextStyle;
use crate::song::SectionPalette;

/// Environment variable overriding the lines per slide.
pub const PAGE_BREAK_ENV: &str = "PAGE_BREAK_EVERY";
/// Environment variable overriding the document width.
pub const WIDTH_ENV: &str = "PRO6_WIDTH";
/// Environment variable overriding the document height.
pub const HEIGHT_ENV: &str = "PRO6_HEIGHT";

const DEFAULT_LINES_PER_SLIDE: NonZeroUsize = NonZeroUsize::new(4).unwrap();

/// Configuration for document building.
///
/// Defaults: 4 lines per slide, 1024×768 pixels, the stock section palette
/// and the bold outlined lyric style.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use pro6doc::pro6::BuilderOptions;
///
/// let options = BuilderOptions::new()
///     .with_lines_per_slide(NonZeroUsize::new(2).unwrap())
///     .with_size(1920, 1080);
/// assert_eq!(options.width, 1920);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderOptions {
    /// Line budget of one lyric slide, blank lines included
    pub lines_per_slide: NonZeroUsize,
    /// Document width in pixels
    pub width: u32,
    /// Document height in pixels
    pub height: u32,
    /// Section colors for song groups
    pub palette: SectionPalette,
    /// Style of lyric text
    pub lyric_style: TextStyle,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            lines_per_slide: DEFAULT_LINES_PER_SLIDE,
            width: 1024,
            height: 768,
            palette: SectionPalette::default(),
            lyric_style: TextStyle::default(),
        }
    }
}

impl BuilderOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `PAGE_BREAK_EVERY`, `PRO6_WIDTH` and `PRO6_HEIGHT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the environment keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();
        if let Some(value) = lookup(PAGE_BREAK_ENV) {
            options.lines_per_slide = parse_setting::<NonZeroUsize>(PAGE_BREAK_ENV, &value)?;
        }
        if let Some(value) = lookup(WIDTH_ENV) {
            options.width = parse_dimension(WIDTH_ENV, &value)?;
        }
        if let Some(value) = lookup(HEIGHT_ENV) {
            options.height = parse_dimension(HEIGHT_ENV, &value)?;
        }
        Ok(options)
    }

    #[inline]
    pub fn with_lines_per_slide(mut self, lines: NonZeroUsize) -> Self {
        self.lines_per_slide = lines;
        self
    }

    #[inline]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn with_palette(mut self, palette: SectionPalette) -> Self {
        self.palette = palette;
        self
    }

    #[inline]
    pub fn with_lyric_style(mut self, style: TextStyle) -> Self {
        self.lyric_style = style;
        self
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{key}={value:?} is not a positive integer")))
}

fn parse_dimension(key: &str, value: &str) -> Result<u32> {
    match parse_setting::<u32>(key, value)? {
        0 => Err(Error::InvalidConfig(format!("{key} must be greater than zero"))),
        n => Ok(n),
    }
}
