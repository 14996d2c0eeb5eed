//! Source directory discovery.
//!
//! A song's media lives next to the song file. A slide directory holds
//! JSON sidecars and media files paired by file stem: `01.json` styles the
//! slide whose background is `01.png`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::builder::FreeformSlide;
use super::media::MediaKind;
use super::sidecar::{SlideConfig, SlideSpec};
use crate::common::{Error, Result};

/// Preferred media when several files share a stem.
const MEDIA_PRIORITY: [&str; 6] = ["png", "jpg", "jpeg", "mp4", "mov", "avi"];

/// Media files directly inside `dir`, sorted by file name.
pub fn list_media(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut media: Vec<PathBuf> = list_files(dir.as_ref())?
        .into_iter()
        .filter(|path| MediaKind::from_path(path).is_some())
        .collect();
    media.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(media)
}

/// Media files next to a song source.
pub fn song_media(song_path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = match song_path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    list_media(dir)
}

/// Whether `dir` holds at least one JSON sidecar.
pub fn has_sidecars(dir: impl AsRef<Path>) -> Result<bool> {
    Ok(list_files(dir.as_ref())?.iter().any(|path| is_sidecar(path)))
}

/// One slide per distinct stem among sidecars and media, in stem order.
///
/// A stem with a sidecar becomes a styled slide; its background is the
/// file named by the sidecar's `media` key when that exists, else the media
/// sharing its stem. A stem with only media becomes a media-only slide.
pub fn scan_unified(dir: impl AsRef<Path>) -> Result<Vec<SlideSpec>> {
    let dir = dir.as_ref();
    let mut sidecars = BTreeMap::new();
    let mut media: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in list_files(dir)? {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if is_sidecar(&path) {
            sidecars.insert(stem, path);
        } else if MediaKind::from_path(&path).is_some() {
            media.entry(stem).or_default().push(path);
        }
    }

    let stems: BTreeSet<&String> = sidecars.keys().chain(media.keys()).collect();
    let mut specs = Vec::with_capacity(stems.len());
    for stem in stems {
        let paired = media.get(stem).and_then(|files| preferred_media(files));
        match sidecars.get(stem) {
            Some(json) => {
                let config = SlideConfig::from_file(json)?;
                let background = match config.media.as_deref() {
                    Some(name) => {
                        let named = dir.join(name);
                        if named.exists() {
                            Some(named)
                        } else {
                            warn!("{}: media {} does not exist", json.display(), named.display());
                            paired
                        }
                    },
                    None => paired,
                };
                debug!("slide {stem:?} from {}", json.display());
                specs.push(config.into_spec(stem, background).map_err(|e| e.with_path(json))?);
            },
            None => {
                if let Some(path) = paired {
                    specs.push(SlideSpec::media_only(path, stem.as_str()));
                }
            },
        }
    }

    if specs.is_empty() {
        return Err(Error::NoContent(dir.to_path_buf()));
    }
    Ok(specs)
}

/// One media-only slide per media file, sorted by file name.
pub fn scan_media_only(dir: impl AsRef<Path>) -> Result<Vec<FreeformSlide>> {
    Ok(list_media(dir)?.into_iter().map(FreeformSlide::media).collect())
}

/// Title derived from a file or directory name.
///
/// Underscores and hyphens become spaces and each word is capitalized.
///
/// # Examples
///
/// ```rust
/// use pro6doc::pro6::source::title_from_path;
///
/// assert_eq!(title_from_path("songs/amazing_grace.txt"), "Amazing Grace");
/// assert_eq!(title_from_path("decks/sunday-SERVICE"), "Sunday Service");
/// ```
pub fn title_from_path(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let name = if path.is_dir() { path.file_name() } else { path.file_stem() };
    let name = name.map(|n| n.to_string_lossy()).unwrap_or_default();
    name.replace(['_', '-'], " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::SourceNotFound(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn is_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn preferred_media(files: &[PathBuf]) -> Option<PathBuf> {
    files
        .iter()
        .min_by_key(|path| {
            let ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            MEDIA_PRIORITY
                .iter()
                .position(|known| *known == ext)
                .unwrap_or(MEDIA_PRIORITY.len())
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RgbaColor;

    fn touch(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_list_media_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.mp4", "");
        touch(dir.path(), "a.JPG", "");
        touch(dir.path(), "song.txt", "");
        touch(dir.path(), "c.json", "{}");
        fs::create_dir(dir.path().join("d.png")).unwrap();

        let names: Vec<_> = list_media(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.JPG", "b.mp4"]);
    }

    #[test]
    fn test_song_media_uses_parent() {
        let dir = tempfile::tempdir().unwrap();
        let song = touch(dir.path(), "song.txt", "");
        touch(dir.path(), "cover.png", "");
        assert_eq!(song_media(&song).unwrap(), [dir.path().join("cover.png")]);
    }

    #[test]
    fn test_scan_unified_pairs_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path();
        touch(d, "01.json", r#"{"text": "Welcome", "backgroundColor": "0.5 0.5 0.5 1"}"#);
        touch(d, "01.jpg", "");
        touch(d, "01.png", "");
        touch(d, "02.mp4", "");
        touch(d, "03.json", r#"{"media": "02.mp4", "label": "Countdown"}"#);
        touch(d, "04.json", r#"{"media": "gone.png"}"#);

        let specs = scan_unified(d).unwrap();
        assert_eq!(specs.len(), 4);

        assert_eq!(specs[0].label, "01");
        assert_eq!(specs[0].text, "Welcome");
        assert_eq!(specs[0].background, Some(d.join("01.png")));
        assert_eq!(specs[0].background_color, RgbaColor::opaque(0.5, 0.5, 0.5));

        assert_eq!(specs[1].label, "02");
        assert_eq!(specs[1].background, Some(d.join("02.mp4")));
        assert!(specs[1].text.is_empty());

        assert_eq!(specs[2].label, "Countdown");
        assert_eq!(specs[2].background, Some(d.join("02.mp4")));

        assert_eq!(specs[3].label, "04");
        assert_eq!(specs[3].background, None);
    }

    #[test]
    fn test_scan_unified_reports_bad_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let json = touch(dir.path(), "01.json", r#"{"fontSize": "huge"}"#);
        match scan_unified(dir.path()).unwrap_err() {
            Error::InvalidSlideConfig { path, .. } => assert_eq!(path, json),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scan_unified_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.txt", "");
        assert!(matches!(scan_unified(dir.path()).unwrap_err(), Error::NoContent(_)));
    }

    #[test]
    fn test_scan_media_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.png", "");
        touch(dir.path(), "a.mov", "");
        let slides = scan_media_only(dir.path()).unwrap();
        let labels: Vec<_> = slides.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
        assert!(slides.iter().all(|s| s.text.is_none()));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(has_sidecars(&missing).unwrap_err(), Error::SourceNotFound(_)));
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("my_song-live.txt"), "My Song Live");
        assert_eq!(title_from_path("ÉTÉ"), "Été");
        assert_eq!(title_from_path(""), "");
    }
}
