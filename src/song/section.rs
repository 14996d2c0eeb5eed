//! Display names and colors for song sections.
//!
//! Section headers in song sources are free-form (`V1`, `Chorus 2`, `PC`,
//! `Bridge`). This module maps any header to a [`SectionKind`] and from there
//! to the group name and group color shown in the presentation software.
//!
//! Classification is tried in this order:
//!
//! 1. the lower-cased name contains a canonical keyword (`verse`,
//!    `chorus`, `bridge`, `prechorus`, ...). The first keyword in that order
//!    wins and its base color is used as is;
//! 2. the name starts with an abbreviation (`v`, `c`, `b`, `pc`, `t`, `i`,
//!    `o`, `co`). Numbered verses and choruses get graduated colors, so
//!    `V1`, `V2`, `V3` read as the same family with increasing lightness;
//! 3. anything else is gray and keeps its literal name.
//!
//! Every function here is total.

use crate::common::RgbaColor;

/// Category of a song section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Verse,
    Chorus,
    Bridge,
    PreChorus,
    Tag,
    Intro,
    Outro,
    Coda,
}

impl SectionKind {
    /// Human readable category label.
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Verse => "Verse",
            SectionKind::Chorus => "Chorus",
            SectionKind::Bridge => "Bridge",
            SectionKind::PreChorus => "Pre-Chorus",
            SectionKind::Tag => "Tag",
            SectionKind::Intro => "Intro",
            SectionKind::Outro => "Outro",
            SectionKind::Coda => "Coda",
        }
    }
}

/// How a section name was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The name contains the full keyword, e.g. `"Chorus 2"`.
    Keyword(SectionKind),
    /// The name starts with an abbreviation, e.g. `"C2"`.
    Prefix(SectionKind),
}

impl Classification {
    pub fn kind(self) -> SectionKind {
        match self {
            Classification::Keyword(kind) | Classification::Prefix(kind) => kind,
        }
    }
}

const KEYWORDS: &[(&str, SectionKind)] = &[
    ("verse", SectionKind::Verse),
    ("chorus", SectionKind::Chorus),
    ("bridge", SectionKind::Bridge),
    ("prechorus", SectionKind::PreChorus),
    ("tag", SectionKind::Tag),
    ("intro", SectionKind::Intro),
    ("outro", SectionKind::Outro),
    ("coda", SectionKind::Coda),
];

/// Classify a section name, or `None` if it matches no known category.
///
/// # Examples
///
/// ```rust
/// use pro6doc::song::section::{classify, Classification, SectionKind};
///
/// assert_eq!(classify("V1"), Some(Classification::Prefix(SectionKind::Verse)));
/// assert_eq!(classify("Coda"), Some(Classification::Keyword(SectionKind::Coda)));
/// assert_eq!(classify("co2"), Some(Classification::Prefix(SectionKind::Coda)));
/// assert_eq!(classify("Solo"), None);
/// ```
pub fn classify(name: &str) -> Option<Classification> {
    let lower = name.to_lowercase();

    if let Some(&(_, kind)) = KEYWORDS.iter().find(|(key, _)| lower.contains(key)) {
        return Some(Classification::Keyword(kind));
    }

    // "co" must be tested before the bare "c" of chorus
    let kind = if lower.starts_with('v') {
        SectionKind::Verse
    } else if lower.starts_with("co") {
        SectionKind::Coda
    } else if lower.starts_with('c') {
        SectionKind::Chorus
    } else if lower.starts_with('b') {
        SectionKind::Bridge
    } else if lower.starts_with("pc") {
        SectionKind::PreChorus
    } else if lower.starts_with('t') {
        SectionKind::Tag
    } else if lower.starts_with('i') {
        SectionKind::Intro
    } else if lower.starts_with('o') {
        SectionKind::Outro
    } else {
        return None;
    };
    Some(Classification::Prefix(kind))
}

/// The first run of ASCII digits in `name`.
pub fn section_number(name: &str) -> Option<&str> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let rest = &name[start..];
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Display name for a section header.
///
/// # Examples
///
/// ```rust
/// use pro6doc::song::section::section_display_name;
///
/// assert_eq!(section_display_name("V2"), "Verse 2");
/// assert_eq!(section_display_name("pc"), "Pre-Chorus");
/// assert_eq!(section_display_name("Solo"), "Solo");
/// ```
pub fn section_display_name(name: &str) -> String {
    match classify(name) {
        Some(class) => {
            let label = class.kind().label();
            match section_number(name) {
                Some(number) => format!("{label} {number}"),
                None => label.to_string(),
            }
        },
        None => name.to_string(),
    }
}

/// Base colors for each section category.
///
/// Passed explicitly to builders instead of living in a global table, so a
/// caller can restyle documents without affecting other builds.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPalette {
    pub verse: RgbaColor,
    pub chorus: RgbaColor,
    pub bridge: RgbaColor,
    pub prechorus: RgbaColor,
    pub tag: RgbaColor,
    pub intro: RgbaColor,
    pub outro: RgbaColor,
    pub coda: RgbaColor,
    /// Unclassified sections and the media group
    pub default: RgbaColor,
}

impl Default for SectionPalette {
    fn default() -> Self {
        Self {
            verse: RgbaColor::opaque(0.0, 0.0, 0.9981992244720459),
            chorus: RgbaColor::opaque(0.9859541654586792, 0.0, 0.02694005146622658),
            bridge: RgbaColor::opaque(1.0, 0.5, 0.0),
            prechorus: RgbaColor::opaque(0.1352526992559433, 1.0, 0.0248868502676487),
            tag: RgbaColor::opaque(0.6, 0.3, 0.1),
            intro: RgbaColor::opaque(0.5, 0.5, 0.5),
            outro: RgbaColor::opaque(0.5, 0.5, 0.5),
            coda: RgbaColor::opaque(0.0, 0.4, 0.0),
            default: RgbaColor::opaque(0.2637968361377716, 0.2637968361377716, 0.2637968361377716),
        }
    }
}

/// Display name and color derived for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLook {
    pub name: String,
    pub color: RgbaColor,
}

impl SectionPalette {
    /// Base color of a category.
    pub fn base(&self, kind: SectionKind) -> RgbaColor {
        match kind {
            SectionKind::Verse => self.verse,
            SectionKind::Chorus => self.chorus,
            SectionKind::Bridge => self.bridge,
            SectionKind::PreChorus => self.prechorus,
            SectionKind::Tag => self.tag,
            SectionKind::Intro => self.intro,
            SectionKind::Outro => self.outro,
            SectionKind::Coda => self.coda,
        }
    }

    /// Group color for a section header.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pro6doc::song::section::SectionPalette;
    ///
    /// let palette = SectionPalette::default();
    /// assert_eq!(palette.section_color("V2").to_string(), "0.2 0.2 0.9 1");
    /// assert_eq!(palette.section_color("Solo"), palette.default);
    /// ```
    pub fn section_color(&self, name: &str) -> RgbaColor {
        let Some(class) = classify(name) else {
            return self.default;
        };
        let number = section_number(name).map(|digits| digits.parse::<u32>().unwrap_or(u32::MAX));
        match (class, number) {
            (Classification::Prefix(SectionKind::Verse), Some(n)) => self.verse_ramp(n),
            (Classification::Prefix(SectionKind::Chorus), Some(n)) => self.chorus_ramp(n),
            (class, _) => self.base(class.kind()),
        }
    }

    /// Display name and color in one call.
    pub fn describe(&self, name: &str) -> SectionLook {
        SectionLook {
            name: section_display_name(name),
            color: self.section_color(name),
        }
    }

    /// Verse `n`: base blue, then two fixed blends, then a linear walk of
    /// red/green up and blue down, clamped at 0.7 and 0.6.
    pub fn verse_ramp(&self, n: u32) -> RgbaColor {
        match n {
            1 => self.verse,
            2 => RgbaColor::opaque(0.2, 0.2, 0.9),
            3 => RgbaColor::opaque(0.4, 0.4, 0.8),
            _ => {
                let step = f64::from(n) - 3.0;
                let lightness = (0.4 + step * 0.1).min(0.7);
                let blue = (0.8 - step * 0.05).max(0.6);
                RgbaColor::opaque(lightness, lightness, blue)
            },
        }
    }

    /// Chorus `n`: base red moved toward white by 0%, 30%, 60%, then 15% more
    /// per index, capped at 80%.
    pub fn chorus_ramp(&self, n: u32) -> RgbaColor {
        self.chorus.lighten(chorus_lightening(n))
    }
}

/// Fraction of white mixed into chorus number `n`.
pub fn chorus_lightening(n: u32) -> f64 {
    match n {
        1 => 0.0,
        2 => 0.3,
        3 => 0.6,
        _ => (0.3 + (f64::from(n) - 2.0) * 0.15).clamp(0.0, 0.8),
    }
}
