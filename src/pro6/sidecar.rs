//! JSON slide sidecars.
//!
//! A sidecar is a JSON object next to (or instead of) a media file that
//! describes one slide: its text, where the text goes and how it looks.
//!
//! ```json
//! {
//!   "text": "Welcome",
//!   "x": 231, "y": 653, "width": 374, "height": 55,
//!   "fontSize": 59, "fontFamily": "arial", "color": "#FFFFFF",
//!   "backgroundColor": "#202020",
//!   "clear_props": true
//! }
//! ```
//!
//! Sidecars are read into a loosely typed [`SlideConfig`] and validated once
//! into a [`SlideSpec`], which is what the builder consumes.

use std::fs;
use std::path::{Path, PathBuf};

use phf::phf_map;
use serde::Deserialize;

use super::types::{Position, Rect, VerticalAlignment};
use crate::common::{Error, RGBColor, Result, RgbaColor};
use crate::rtf::{RtfFormat, TextStyle};

/// Font families that replace `fontName` when given.
static FONT_FAMILIES: phf::Map<&'static str, &'static str> = phf_map! {
    "arial" => "Arial",
    "helvetica" => "Helvetica",
};

const DEFAULT_WIDTH: f64 = 374.0;
const DEFAULT_HEIGHT: f64 = 55.0;

/// A JSON value that may be written as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(n) => Some(*n),
            NumberOrText::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_text(&self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s.clone(),
        }
    }
}

/// Raw sidecar contents. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideConfig {
    pub text: Option<String>,
    /// Media file name, relative to the sidecar's directory
    pub media: Option<String>,
    pub x: Option<NumberOrText>,
    pub y: Option<NumberOrText>,
    pub width: Option<NumberOrText>,
    pub height: Option<NumberOrText>,
    /// Pre-formatted rectangle, used when `x`/`y` are absent
    pub position: Option<String>,
    pub font_size: Option<NumberOrText>,
    pub font_bold: Option<bool>,
    pub font_name: Option<String>,
    pub font_family: Option<String>,
    pub simple_format: Option<bool>,
    pub vertical_alignment: Option<NumberOrText>,
    pub label: Option<String>,
    pub background_color: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "countdown_message")]
    pub countdown_message: Option<bool>,
    #[serde(rename = "clear_props")]
    pub clear_props: Option<bool>,
}

/// A validated slide description.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSpec {
    pub text: String,
    /// Background media, already known to exist
    pub background: Option<PathBuf>,
    pub label: String,
    /// Text box; `None` uses the default lyric band
    pub position: Option<Position>,
    pub style: TextStyle,
    pub vertical_alignment: VerticalAlignment,
    pub background_color: RgbaColor,
    pub countdown_message: bool,
    pub clear_props: bool,
}

impl SlideSpec {
    /// A slide showing only `media`.
    pub fn media_only(media: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            background: Some(media.into()),
            label: label.into(),
            position: None,
            style: TextStyle::sidecar_default(),
            vertical_alignment: VerticalAlignment::Top,
            background_color: RgbaColor::BLACK,
            countdown_message: false,
            clear_props: false,
        }
    }
}

impl SlideConfig {
    /// Parse sidecar JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a sidecar file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| e.with_path(path))
    }

    /// Validate into a [`SlideSpec`].
    ///
    /// `default_label` is used when the sidecar has no `label`; `background`
    /// is the media already resolved for this slide.
    pub fn into_spec(self, default_label: &str, background: Option<PathBuf>) -> Result<SlideSpec> {
        let position = match (&self.x, &self.y) {
            (Some(x), Some(y)) => Some(Position::Rect(Rect::new(
                number("x", x)?,
                number("y", y)?,
                optional_number("width", self.width.as_ref(), DEFAULT_WIDTH)?,
                optional_number("height", self.height.as_ref(), DEFAULT_HEIGHT)?,
            ))),
            _ => self.position.map(Position::Literal),
        };

        let mut style = TextStyle::sidecar_default();
        if let Some(size) = &self.font_size {
            let size = number("fontSize", size)?;
            if !(size > 0.0 && size <= f64::from(u16::MAX)) {
                return Err(invalid(format!("fontSize {size} is out of range")));
            }
            style.font_size = size.round() as u32;
        }
        if let Some(bold) = self.font_bold {
            style.bold = bold;
        }
        if let Some(name) = self.font_name {
            style.font_name = name;
        }
        if let Some(family) = self.font_family.as_deref() {
            if let Some(name) = FONT_FAMILIES.get(family.to_lowercase().as_str()) {
                style.font_name = (*name).to_string();
            }
        }
        if self.simple_format == Some(false) {
            style.format = RtfFormat::Outlined;
        }
        if let Some(color) = self.color.as_deref() {
            style.color = RGBColor::from_text_color(color);
        }

        let vertical_alignment = match &self.vertical_alignment {
            Some(value) => {
                let text = value.as_text();
                VerticalAlignment::parse(&text)
                    .ok_or_else(|| invalid(format!("verticalAlignment {text:?} is not 0, 1 or 2")))?
            },
            None => VerticalAlignment::Top,
        };

        let background_color = match self.background_color.as_deref() {
            Some(color) => RgbaColor::parse_user(color).ok_or_else(|| {
                invalid(format!(
                    "backgroundColor {color:?} is neither #RRGGBB[AA] nor four components in [0, 1]"
                ))
            })?,
            None => RgbaColor::BLACK,
        };

        Ok(SlideSpec {
            text: self.text.unwrap_or_default(),
            background,
            label: self.label.unwrap_or_else(|| default_label.to_string()),
            position,
            style,
            vertical_alignment,
            background_color,
            countdown_message: self.countdown_message.unwrap_or(false),
            clear_props: self.clear_props.unwrap_or(false),
        })
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidSlideConfig {
        path: PathBuf::new(),
        message,
    }
}

fn number(key: &str, value: &NumberOrText) -> Result<f64> {
    value
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(format!("{key} must be a number, got {:?}", value.as_text())))
}

fn optional_number(key: &str, value: Option<&NumberOrText>, default: f64) -> Result<f64> {
    value.map_or(Ok(default), |v| number(key, v))
}
