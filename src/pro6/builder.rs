//! Document assembly.
//!
//! [`DocumentBuilder`] turns parsed songs, freeform slide lists and sidecar
//! slides into a [`Document`] tree. All identifiers come from the builder's
//! [`IdGenerator`]; nothing is shared between builders.

use std::collections::HashMap;
use std::path::{self, Path, PathBuf};

use log::{debug, info, warn};

use super::media::MediaKind;
use super::options::BuilderOptions;
use super::sidecar::SlideSpec;
use super::source;
use super::types::{
    Cue, Document, DocumentKind, Group, MediaCue, Position, Rect, Slide, SongArrangement,
    TextElement, VerticalAlignment,
};
use crate::common::{Error, IdGenerator, RandomIdGenerator, Result, RgbaColor};
use crate::rtf::{self, TextStyle};
use crate::song::{self, ParsedSong};

/// Name of the only arrangement a song document carries.
const ARRANGEMENT_NAME: &str = "arrangement1";
/// Group name used by freeform and sidecar documents.
const SINGLE_GROUP_NAME: &str = "Group";
/// Group holding the media found next to a song.
const MEDIA_GROUP_NAME: &str = "Media";
/// Color of the single group of sidecar documents.
const SIDECAR_GROUP_COLOR: RgbaColor = RgbaColor::opaque(
    0.2627451121807098,
    0.2627451121807098,
    0.2627451121807098,
);

/// One slide of a freeform document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeformSlide {
    pub text: Option<String>,
    pub background: Option<PathBuf>,
    pub label: String,
}

impl FreeformSlide {
    /// A text-only slide without a label.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A media-only slide labelled with the file stem.
    pub fn media(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            text: None,
            label: file_stem(&path),
            background: Some(path),
        }
    }
}

/// Builds documents from songs, freeform slides and sidecars.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use pro6doc::common::SequentialIdGenerator;
/// use pro6doc::pro6::{BuilderOptions, DocumentBuilder};
/// use pro6doc::song::parse_song;
///
/// let song = parse_song("Arrangement\nV1 C\nV1\nAmazing grace\nHow sweet\nC\nMy chains are gone");
/// let options = BuilderOptions::new().with_lines_per_slide(NonZeroUsize::new(2).unwrap());
/// let mut builder = DocumentBuilder::with_id_generator(options, SequentialIdGenerator::new());
/// let doc = builder.build_song("Amazing Grace", &song, &[]).unwrap();
///
/// let names: Vec<_> = doc.groups.iter().map(|g| g.name.as_str()).collect();
/// assert_eq!(names, ["Verse 1", "Chorus"]);
/// assert_eq!(doc.selected_arrangement().unwrap().group_ids.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder<G: IdGenerator = RandomIdGenerator> {
    options: BuilderOptions,
    ids: G,
}

impl DocumentBuilder {
    /// Create a builder issuing random identifiers.
    pub fn new(options: BuilderOptions) -> Self {
        Self::with_id_generator(options, RandomIdGenerator)
    }
}

impl<G: IdGenerator> DocumentBuilder<G> {
    /// Create a builder drawing identifiers from `ids`.
    pub fn with_id_generator(options: BuilderOptions, ids: G) -> Self {
        Self { options, ids }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn id_generator(&self) -> &G {
        &self.ids
    }

    /// One group of freeform slides, no arrangement.
    pub fn build_freeform(&mut self, title: &str, slides: &[FreeformSlide]) -> Result<Document> {
        let group_id = self.ids.next_id();
        let mut built = Vec::with_capacity(slides.len());
        for entry in slides {
            let slide = self.plain_slide(
                entry.text.as_deref().unwrap_or_default(),
                entry.background.as_deref(),
                &entry.label,
            )?;
            built.push(slide);
        }
        let group = Group {
            id: group_id,
            name: SINGLE_GROUP_NAME.to_string(),
            color: self.options.palette.default,
            slides: built,
        };
        Ok(self.finish(DocumentKind::Freeform, title, vec![group], None))
    }

    /// Lyric groups in first-seen order, a trailing media group and the
    /// arrangement.
    ///
    /// Fails with [`Error::NoSections`] when the song has no sections.
    pub fn build_song(&mut self, title: &str, song: &ParsedSong, media: &[PathBuf]) -> Result<Document> {
        if song.is_empty() {
            return Err(Error::NoSections);
        }

        let mut groups = Vec::with_capacity(song.sections.len() + 1);
        let mut group_ids: HashMap<&str, String> = HashMap::new();

        for section in &song.sections {
            if !section.has_content() {
                debug!("skipping empty section {:?}", section.name);
                continue;
            }
            let look = self.options.palette.describe(&section.name);
            let group_id = self.ids.next_id();
            let pages = song::paginate(&section.lines, self.options.lines_per_slide);
            let mut slides = Vec::with_capacity(pages.len());
            for (index, page) in pages.iter().enumerate() {
                let label = song::slide_label(&section.name, index, pages.len());
                slides.push(self.plain_slide(page, None, &label)?);
            }
            debug!(
                "group {:?} from section {:?}: {} slide(s)",
                look.name,
                section.name,
                slides.len()
            );
            group_ids.insert(section.name.as_str(), group_id.clone());
            groups.push(Group {
                id: group_id,
                name: look.name,
                color: look.color,
                slides,
            });
        }

        let mut media_group_id = None;
        if !media.is_empty() {
            let mut files = media.to_vec();
            files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            let group_id = self.ids.next_id();
            let mut slides = Vec::with_capacity(files.len());
            for file in &files {
                slides.push(self.plain_slide("", Some(file), &file_stem(file))?);
            }
            debug!("media group with {} slide(s)", slides.len());
            media_group_id = Some(group_id.clone());
            groups.push(Group {
                id: group_id,
                name: MEDIA_GROUP_NAME.to_string(),
                color: self.options.palette.default,
                slides,
            });
        }

        let arrangement = if song.arrangement.is_empty() {
            None
        } else {
            let mut ids: Vec<String> = media_group_id.into_iter().collect();
            for token in &song.arrangement {
                match group_ids.get(token.as_str()) {
                    Some(id) => ids.push(id.clone()),
                    None => debug!("arrangement entry {token:?} has no group, dropped"),
                }
            }
            Some(SongArrangement {
                id: self.ids.next_id(),
                name: ARRANGEMENT_NAME.to_string(),
                color: RgbaColor::TRANSPARENT,
                group_ids: ids,
            })
        };

        Ok(self.finish(DocumentKind::Song, title, groups, arrangement))
    }

    /// One group of styled sidecar slides, no arrangement.
    pub fn build_sidecar(&mut self, title: &str, slides: &[SlideSpec]) -> Result<Document> {
        let group_id = self.ids.next_id();
        let mut built = Vec::with_capacity(slides.len());
        for spec in slides {
            built.push(self.sidecar_slide(spec)?);
        }
        let group = Group {
            id: group_id,
            name: SINGLE_GROUP_NAME.to_string(),
            color: SIDECAR_GROUP_COLOR,
            slides: built,
        };
        Ok(self.finish(DocumentKind::Sidecar, title, vec![group], None))
    }

    /// Parse a song file and build it together with the media beside it.
    ///
    /// The title is derived from the file name.
    pub fn build_song_file(&mut self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::SourceNotFound(path.to_path_buf()));
        }
        let song = song::parse_song_file(path)?;
        let media = source::song_media(path)?;
        self.build_song(&source::title_from_path(path), &song, &media)
    }

    /// Build a directory of sidecars and media.
    ///
    /// Directories containing any `.json` file become sidecar documents;
    /// otherwise every media file becomes a freeform slide.
    pub fn build_from_directory(&mut self, dir: impl AsRef<Path>) -> Result<Document> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::SourceNotFound(dir.to_path_buf()));
        }
        let title = source::title_from_path(dir);
        if source::has_sidecars(dir)? {
            let specs = source::scan_unified(dir)?;
            self.build_sidecar(&title, &specs)
        } else {
            let slides = source::scan_media_only(dir)?;
            if slides.is_empty() {
                return Err(Error::NoContent(dir.to_path_buf()));
            }
            self.build_freeform(&title, &slides)
        }
    }

    fn finish(
        &mut self,
        kind: DocumentKind,
        title: &str,
        groups: Vec<Group>,
        arrangement: Option<SongArrangement>,
    ) -> Document {
        let selected_arrangement_id = arrangement.as_ref().map(|a| a.id.clone());
        let doc = Document {
            id: self.ids.next_id(),
            kind,
            title: title.to_string(),
            width: self.options.width,
            height: self.options.height,
            groups,
            arrangements: arrangement.into_iter().collect(),
            selected_arrangement_id,
        };
        info!(
            "built {:?} document {:?}: {} group(s), {} slide(s)",
            kind,
            doc.title,
            doc.groups.len(),
            doc.slides().count()
        );
        doc
    }

    /// Slide with lyric-styled text and optional background media.
    fn plain_slide(&mut self, text: &str, background: Option<&Path>, label: &str) -> Result<Slide> {
        let id = self.ids.next_id();
        let media = match background {
            Some(path) => self.media_cue(path)?,
            None => None,
        };
        let style = self.options.lyric_style.clone();
        let text = self.text_element(text, None, &style, VerticalAlignment::Middle);
        Ok(Slide {
            id,
            label: label.to_string(),
            background_color: RgbaColor::BLACK,
            cues: Vec::new(),
            media,
            text,
        })
    }

    fn sidecar_slide(&mut self, spec: &SlideSpec) -> Result<Slide> {
        let id = self.ids.next_id();
        let mut cues = Vec::new();
        if spec.countdown_message {
            cues.push(Cue::Message {
                id: self.ids.next_id(),
                message_id: self.ids.next_id(),
            });
        }
        if spec.clear_props {
            cues.push(Cue::ClearProps { id: self.ids.next_id() });
        }
        let media = match &spec.background {
            Some(path) => self.media_cue(path)?,
            None => None,
        };
        let text = self.text_element(
            &spec.text,
            spec.position.clone(),
            &spec.style,
            spec.vertical_alignment,
        );
        Ok(Slide {
            id,
            label: spec.label.clone(),
            background_color: spec.background_color,
            cues,
            media,
            text,
        })
    }

    /// `None` for empty text.
    fn text_element(
        &mut self,
        text: &str,
        position: Option<Position>,
        style: &TextStyle,
        vertical_alignment: VerticalAlignment,
    ) -> Option<TextElement> {
        if text.is_empty() {
            return None;
        }
        Some(TextElement {
            id: self.ids.next_id(),
            text: text.to_string(),
            rtf: rtf::encode_text(text, style),
            position: position
                .unwrap_or_else(|| Position::Rect(Rect::default_text_band(self.options.width))),
            vertical_alignment,
        })
    }

    /// `None` when the file is missing or not a recognized media type.
    fn media_cue(&mut self, path: &Path) -> Result<Option<MediaCue>> {
        let Some(kind) = MediaKind::from_path(path) else {
            warn!("{} is not a supported media file, skipped", path.display());
            return Ok(None);
        };
        if !path.exists() {
            warn!("media {} does not exist, skipped", path.display());
            return Ok(None);
        }
        Ok(Some(MediaCue {
            id: self.ids.next_id(),
            element_id: self.ids.next_id(),
            path: path::absolute(path)?,
            kind,
            display_name: file_stem(path),
        }))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
