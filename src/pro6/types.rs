//! In-memory document tree.
//!
//! The tree mirrors the `RVPresentationDocument` schema: a document owns
//! groups, groups own slides, slides own an optional text element, an
//! optional background media cue and auxiliary cues. Song documents also
//! carry an arrangement listing group identifiers in performance order.
//!
//! Nodes are plain data; [`DocumentBuilder`](super::DocumentBuilder) creates
//! them and [`writer`](super::writer) serializes them.

use std::fmt;
use std::path::PathBuf;

use crate::common::RgbaColor;

/// Which of the three content shapes produced a document.
///
/// The shapes differ in a few root and timeline attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Media and plain text slides in one group
    Freeform,
    /// Lyric groups with an arrangement
    Song,
    /// Slides styled by JSON sidecars
    Sidecar,
}

/// A complete presentation document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub kind: DocumentKind,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub groups: Vec<Group>,
    pub arrangements: Vec<SongArrangement>,
    /// Identifier of the arrangement the software opens with
    pub selected_arrangement_id: Option<String>,
}

impl Document {
    /// All slides across groups, in order.
    pub fn slides(&self) -> impl Iterator<Item = &Slide> {
        self.groups.iter().flat_map(|group| group.slides.iter())
    }

    /// Find a group by identifier.
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// The selected arrangement, if any.
    pub fn selected_arrangement(&self) -> Option<&SongArrangement> {
        let id = self.selected_arrangement_id.as_deref()?;
        self.arrangements.iter().find(|arrangement| arrangement.id == id)
    }

    /// Every identifier issued for this document, in tree order.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.id.as_str()];
        for group in &self.groups {
            ids.push(&group.id);
            for slide in &group.slides {
                slide.collect_ids(&mut ids);
            }
        }
        ids.extend(self.arrangements.iter().map(|a| a.id.as_str()));
        ids
    }
}

/// A named, colored collection of slides.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub color: RgbaColor,
    pub slides: Vec<Slide>,
}

/// Ordered group identifiers, possibly repeating.
#[derive(Debug, Clone, PartialEq)]
pub struct SongArrangement {
    pub id: String,
    pub name: String,
    pub color: RgbaColor,
    pub group_ids: Vec<String>,
}

/// One screen of content.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: String,
    pub label: String,
    pub background_color: RgbaColor,
    pub cues: Vec<Cue>,
    pub media: Option<MediaCue>,
    pub text: Option<TextElement>,
}

impl Slide {
    /// Whether the slide paints its own background color.
    pub fn draws_background(&self) -> bool {
        self.background_color != RgbaColor::BLACK
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        ids.push(&self.id);
        for cue in &self.cues {
            match cue {
                Cue::Message { id, message_id } => {
                    ids.push(id);
                    ids.push(message_id);
                },
                Cue::ClearProps { id } => ids.push(id),
            }
        }
        if let Some(media) = &self.media {
            ids.push(&media.id);
            ids.push(&media.element_id);
        }
        if let Some(text) = &self.text {
            ids.push(&text.id);
        }
    }
}

/// Auxiliary cue fired with a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cue {
    /// Disabled message cue, used for countdown timers
    Message { id: String, message_id: String },
    /// Disabled cue clearing props and stage displays
    ClearProps { id: String },
}

/// Image or video shown behind a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaCue {
    pub id: String,
    pub element_id: String,
    /// Absolute path of the media file
    pub path: PathBuf,
    pub kind: super::MediaKind,
    /// File stem shown in the cue list
    pub display_name: String,
}

impl MediaCue {
    /// `file://` URL of the media, unescaped as the software expects.
    pub fn source_url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Text box of a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub id: String,
    /// Plain text, kept for inspection
    pub text: String,
    /// Base64 RTF payload
    pub rtf: String,
    pub position: Position,
    pub vertical_alignment: VerticalAlignment,
}

/// Rectangle of a display element, written as `{x y z width height}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    Rect(Rect),
    /// Pre-formatted value copied from a sidecar
    Literal(String),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Rect(rect) => fmt::Display::fmt(rect, f),
            Position::Literal(s) => f.write_str(s),
        }
    }
}

/// Axis-aligned rectangle in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Centered lyric band used when a slide gives no position.
    pub fn default_text_band(document_width: u32) -> Self {
        Self::new(0.0, 69.0, f64::from(document_width), 434.0)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {} 0 {} {}}}", self.x, self.y, self.width, self.height)
    }
}

/// Vertical placement of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlignment {
    /// Numeric value used by the `verticalAlignment` attribute.
    pub fn value(self) -> u8 {
        match self {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Middle => 1,
            VerticalAlignment::Bottom => 2,
        }
    }

    /// Parse `0`/`1`/`2` or `top`/`middle`/`center`/`bottom`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "top" => Some(VerticalAlignment::Top),
            "1" | "middle" | "center" => Some(VerticalAlignment::Middle),
            "2" | "bottom" => Some(VerticalAlignment::Bottom),
            _ => None,
        }
    }
}
