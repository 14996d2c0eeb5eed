//! Song source parser.
//!
//! A song source is plain text. Section headers are lines that repeat one of
//! the tokens listed after the `Arrangement` marker; every line below a
//! header belongs to that section until the next header:
//!
//! ```text
//! V1
//! Amazing grace how sweet the sound
//! That saved a wretch like me
//!
//! C1
//! ...
//!
//! Arrangement
//! V1 C1 V1 C1
//! ```
//!
//! Headers are matched case-insensitively and the arrangement is rewritten to
//! the casing used by the header.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::debug;

use crate::common::Result;

/// Marker that introduces the arrangement line.
pub const ARRANGEMENT_MARKER: &str = "Arrangement";

/// A named block of lyric lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header as written in the source
    pub name: String,
    /// Raw lines, blank lines and indentation preserved
    pub lines: Vec<String>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// Whether any line has visible text.
    pub fn has_content(&self) -> bool {
        self.lines.iter().any(|line| !line.trim().is_empty())
    }
}

/// Sections of a song in first-seen order, plus its arrangement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSong {
    pub sections: Vec<Section>,
    /// Section names in performance order, duplicates allowed
    pub arrangement: Vec<String>,
}

impl ParsedSong {
    /// Look up a section by its literal header.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// True when no section was found.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parse the text of a song source.
///
/// The text is trimmed as a whole before being split into lines.
///
/// # Examples
///
/// ```rust
/// use pro6doc::song::parse_song;
///
/// let song = parse_song("v1\nLine A\nc1\nLine B\n\nArrangement\nV1 C1 v1");
/// assert_eq!(song.arrangement, ["v1", "c1", "v1"]);
/// assert_eq!(song.section("v1").unwrap().lines, ["Line A"]);
/// assert_eq!(song.section("c1").unwrap().lines, ["Line B", ""]);
/// ```
pub fn parse_song(text: &str) -> ParsedSong {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.trim().split('\n').collect();
    parse_lines(&lines)
}

/// Read and parse a UTF-8 song file.
pub fn parse_song_file(path: impl AsRef<Path>) -> Result<ParsedSong> {
    let text = fs::read_to_string(path.as_ref())?;
    let song = parse_song(&text);
    debug!(
        "parsed {}: {} sections, arrangement of {}",
        path.as_ref().display(),
        song.sections.len(),
        song.arrangement.len()
    );
    Ok(song)
}

/// Parse already split lines.
///
/// Lines before the first header are dropped, as are the marker line and the
/// line following it. A header seen again with any casing continues the
/// section opened by its first occurrence.
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> ParsedSong {
    let marker = lines
        .iter()
        .position(|line| line.as_ref().trim().starts_with(ARRANGEMENT_MARKER));

    let raw_arrangement: Vec<&str> = marker
        .and_then(|i| lines.get(i + 1))
        .map(|line| line.as_ref().split_whitespace().collect())
        .unwrap_or_default();

    let tokens: HashSet<String> = raw_arrangement.iter().map(|t| t.to_lowercase()).collect();

    let mut sections: Vec<Section> = Vec::new();
    // lower-cased token -> index into `sections`
    let mut headers: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        if marker.is_some_and(|m| i == m || i == m + 1) {
            continue;
        }
        let line = line.as_ref();
        let stripped = line.trim();
        let key = stripped.to_lowercase();

        if tokens.contains(&key) {
            let index = *headers.entry(key).or_insert_with(|| {
                sections.push(Section::new(stripped));
                sections.len() - 1
            });
            current = Some(index);
        } else if let Some(index) = current {
            sections[index].lines.push(line.to_string());
        }
    }

    let arrangement = raw_arrangement
        .iter()
        .map(|token| match headers.get(&token.to_lowercase()) {
            Some(&index) => sections[index].name.clone(),
            None => (*token).to_string(),
        })
        .collect();

    ParsedSong {
        sections,
        arrangement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SONG: &str = "Intro\nV1\nLine A\nLine B\nC1\nLine C\n\nArrangement\nV1 C1";

    #[test]
    fn test_basic_song() {
        let song = parse_song(SONG);
        assert_eq!(song.arrangement, ["V1", "C1"]);
        assert_eq!(song.sections.len(), 2);
        assert_eq!(song.sections[0], Section {
            name: "V1".into(),
            lines: vec!["Line A".into(), "Line B".into()],
        });
        assert_eq!(song.sections[1], Section {
            name: "C1".into(),
            lines: vec!["Line C".into(), "".into()],
        });
    }

    #[test]
    fn test_arrangement_uses_header_casing() {
        let song = parse_song("V1\nLine\n\nArrangement\nv1 v1");
        assert_eq!(song.arrangement, ["V1", "V1"]);
        assert_eq!(song.sections[0].name, "V1");
    }

    #[test]
    fn test_unmatched_tokens_keep_raw_form() {
        let song = parse_song("V1\nLine\nArrangement\nV1 Tag");
        assert_eq!(song.arrangement, ["V1", "Tag"]);
        assert!(song.section("Tag").is_none());
    }

    #[test]
    fn test_no_marker_means_no_sections() {
        let song = parse_song("V1\nLine A\nC1\nLine B");
        assert!(song.is_empty());
        assert!(song.arrangement.is_empty());
    }

    #[test]
    fn test_marker_on_last_line() {
        let song = parse_song("V1\nLine\nArrangement");
        assert!(song.is_empty());
        assert!(song.arrangement.is_empty());
    }

    #[test]
    fn test_indentation_and_blanks_preserved() {
        let song = parse_song("  V1  \n  indented\n\n\nnext\nArrangement\nV1");
        let section = song.section("V1").unwrap();
        assert_eq!(section.lines, ["  indented", "", "", "next"]);
    }

    #[test]
    fn test_repeated_header_appends() {
        let song = parse_song("V1\nfirst\nC1\nchorus\nv1\nsecond\nArrangement\nV1 C1");
        assert_eq!(song.sections.len(), 2);
        assert_eq!(song.section("V1").unwrap().lines, ["first", "second"]);
    }

    #[test]
    fn test_empty_sections_are_kept() {
        let song = parse_song("V1\n\n  \nC1\nLine\nArrangement\nV1 C1");
        let v1 = song.section("V1").unwrap();
        assert_eq!(v1.lines.len(), 2);
        assert!(!v1.has_content());
    }

    #[test]
    fn test_marker_may_be_indented() {
        let song = parse_song("V1\nLine\n   Arrangement:\nV1");
        assert_eq!(song.arrangement, ["V1"]);
        assert_eq!(song.section("V1").unwrap().lines, ["Line"]);
    }

    #[test]
    fn test_crlf_source() {
        let song = parse_song("V1\r\nLine A\r\n\r\nArrangement\r\nV1\r\n");
        assert_eq!(song.arrangement, ["V1"]);
        assert_eq!(song.section("V1").unwrap().lines, ["Line A\r", "\r"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_song(SONG), parse_song(SONG));
    }

    #[test]
    fn test_parse_song_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}{SONG}\n").unwrap();
        let song = parse_song_file(file.path()).unwrap();
        assert_eq!(song, parse_song(SONG));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_song_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, crate::common::Error::Io(_)));
    }
}
