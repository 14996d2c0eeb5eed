//! `RVPresentationDocument` serialization.
//!
//! Output is a single line of XML without a declaration. Attribute order is
//! fixed per element and empty elements are written as `<tag ... />`, which
//! is the layout the presentation software itself produces.

use std::fs;
use std::path::Path;

use log::debug;

use super::media::MediaKind;
use super::types::{Cue, Document, DocumentKind, Group, MediaCue, Slide, SongArrangement, TextElement};
use crate::common::Result;
use crate::common::xml::escape_xml;

const BUILD_NUMBER: &str = "100991749";
const VERSION_NUMBER: &str = "600";
const NULL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Serialize a document to its XML text.
///
/// # Examples
///
/// ```rust
/// use pro6doc::pro6::{BuilderOptions, DocumentBuilder, FreeformSlide, writer};
///
/// let mut builder = DocumentBuilder::new(BuilderOptions::default());
/// let doc = builder.build_freeform("Notes", &[FreeformSlide::text("Hello")]).unwrap();
/// let xml = writer::to_xml(&doc);
/// assert!(xml.starts_with("<RVPresentationDocument "));
/// ```
pub fn to_xml(doc: &Document) -> String {
    let mut xml = String::with_capacity(4096);
    write_root(&mut xml, doc);
    xml
}

/// Serialize a document and write it as UTF-8 to `path`.
pub fn write_to_file(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let xml = to_xml(doc);
    fs::write(path, xml.as_bytes())?;
    debug!("wrote {} bytes to {}", xml.len(), path.display());
    Ok(())
}

fn write_root(xml: &mut String, doc: &Document) {
    let (background, play_rate, media_track) = match doc.kind {
        DocumentKind::Freeform => ("", "0.000000", "0"),
        DocumentKind::Song => ("0 0 0 0", "1.000000", "0"),
        DocumentKind::Sidecar => ("0 0 0 0", "1.000000", "-1"),
    };
    let height = doc.height.to_string();
    let width = doc.width.to_string();

    element(
        xml,
        "RVPresentationDocument",
        &[
            ("CCLIArtistCredits", ""),
            ("CCLIAuthor", ""),
            ("CCLICopyrightYear", ""),
            ("CCLIDisplay", "false"),
            ("CCLIPublisher", ""),
            ("CCLISongNumber", ""),
            ("CCLISongTitle", doc.title.as_str()),
            ("backgroundColor", background),
            ("buildNumber", BUILD_NUMBER),
            ("category", "Presentation"),
            ("chordChartPath", ""),
            ("docType", "0"),
            ("drawingBackgroundColor", "false"),
            ("height", height.as_str()),
            ("lastDateUsed", ""),
            ("notes", ""),
            ("os", "2"),
            ("resourcesDirectory", ""),
            ("selectedArrangementID", doc.selected_arrangement_id.as_deref().unwrap_or("")),
            ("usedCount", "0"),
            ("uuid", doc.id.as_str()),
            ("versionNumber", VERSION_NUMBER),
            ("width", width.as_str()),
        ],
        |xml| {
            element(
                xml,
                "RVTimeline",
                &[
                    ("duration", "0.000000"),
                    ("loop", "false"),
                    ("playBackRate", play_rate),
                    ("rvXMLIvarName", "timeline"),
                    ("selectedMediaTrackIndex", media_track),
                    ("timeOffset", "0.000000"),
                ],
                |xml| {
                    empty(xml, "array", &[("rvXMLIvarName", "timeCues")]);
                    empty(xml, "array", &[("rvXMLIvarName", "mediaTracks")]);
                },
            );
            element(xml, "array", &[("rvXMLIvarName", "groups")], |xml| {
                for group in &doc.groups {
                    write_group(xml, group);
                }
            });
            element(xml, "array", &[("rvXMLIvarName", "arrangements")], |xml| {
                for arrangement in &doc.arrangements {
                    write_arrangement(xml, arrangement);
                }
            });
        },
    );
}

fn write_group(xml: &mut String, group: &Group) {
    let color = group.color.to_string();
    element(
        xml,
        "RVSlideGrouping",
        &[
            ("color", color.as_str()),
            ("name", group.name.as_str()),
            ("uuid", group.id.as_str()),
        ],
        |xml| {
            element(xml, "array", &[("rvXMLIvarName", "slides")], |xml| {
                for slide in &group.slides {
                    write_slide(xml, slide);
                }
            });
        },
    );
}

fn write_slide(xml: &mut String, slide: &Slide) {
    let background = slide.background_color.to_string();
    element(
        xml,
        "RVDisplaySlide",
        &[
            ("UUID", slide.id.as_str()),
            ("backgroundColor", background.as_str()),
            ("chordChartPath", ""),
            ("drawingBackgroundColor", bool_str(slide.draws_background())),
            ("enabled", "true"),
            ("highlightColor", "1 1 1 0"),
            ("hotKey", ""),
            ("label", slide.label.as_str()),
            ("notes", ""),
            ("socialItemCount", if slide.text.is_some() { "1" } else { "0" }),
        ],
        |xml| {
            element(xml, "array", &[("rvXMLIvarName", "cues")], |xml| {
                for cue in &slide.cues {
                    write_cue(xml, cue);
                }
            });
            if let Some(media) = &slide.media {
                write_media_cue(xml, media);
            }
            element(xml, "array", &[("rvXMLIvarName", "displayElements")], |xml| {
                if let Some(text) = &slide.text {
                    write_text_element(xml, text);
                }
            });
        },
    );
}

fn write_cue(xml: &mut String, cue: &Cue) {
    match cue {
        Cue::Message { id, message_id } => {
            element(
                xml,
                "RVMessageCue",
                &[
                    ("UUID", id.as_str()),
                    ("actionType", "0"),
                    ("delayTime", "0.000000"),
                    ("displayName", "Message"),
                    ("enabled", "false"),
                    ("messageUUID", message_id.as_str()),
                    ("timeStamp", "0.000000"),
                ],
                |xml| {
                    element(xml, "dictionary", &[("rvXMLIvarName", "values")], |xml| {
                        empty(xml, "NSString", &[("rvXMLDictionaryKey", "Message")]);
                    });
                },
            );
        },
        Cue::ClearProps { id } => {
            empty(
                xml,
                "RVClearCue",
                &[
                    ("UUID", id.as_str()),
                    ("actionType", "4"),
                    ("delayTime", "0.000000"),
                    ("displayName", "Clear Props"),
                    ("enabled", "false"),
                    ("timeStamp", "0.000000"),
                ],
            );
        },
    }
}

fn write_media_cue(xml: &mut String, media: &MediaCue) {
    let source = media.source_url();
    element(
        xml,
        "RVMediaCue",
        &[
            ("UUID", media.id.as_str()),
            ("actionType", "0"),
            ("alignment", "4"),
            ("behavior", "2"),
            ("dateAdded", ""),
            ("delayTime", "0.000000"),
            ("displayName", media.display_name.as_str()),
            ("enabled", "true"),
            ("nextCueUUID", NULL_UUID),
            ("rvXMLIvarName", "backgroundMediaCue"),
            ("tags", ""),
            ("timeStamp", "0.000000"),
        ],
        |xml| match media.kind {
            MediaKind::Video => {
                element(
                    xml,
                    "RVVideoElement",
                    &[
                        ("UUID", media.element_id.as_str()),
                        ("audioVolume", "1.000000"),
                        ("bezelRadius", "0.000000"),
                        ("displayDelay", "0.000000"),
                        ("displayName", "VideoElement"),
                        ("drawingFill", "false"),
                        ("drawingShadow", "false"),
                        ("drawingStroke", "false"),
                        ("endPoint", "30030"),
                        ("fieldType", "0"),
                        ("fillColor", "0 0 0 0"),
                        ("flippedHorizontally", "false"),
                        ("flippedVertically", "false"),
                        ("format", "'avc1'"),
                        ("frameRate", "29.970030"),
                        ("fromTemplate", "false"),
                        ("imageOffset", "{0, 0}"),
                        ("inPoint", "0"),
                        ("locked", "false"),
                        ("manufactureName", ""),
                        ("manufactureURL", ""),
                        ("naturalSize", "{1920, 1080}"),
                        ("opacity", "1.000000"),
                        ("outPoint", "30030"),
                        ("persistent", "false"),
                        ("playRate", "1.000000"),
                        ("playbackBehavior", "1"),
                        ("rotation", "0.000000"),
                        ("rvXMLIvarName", "element"),
                        ("scaleBehavior", "0"),
                        ("scaleSize", "{1, 1}"),
                        ("source", source.as_str()),
                        ("timeScale", "1000"),
                        ("typeID", "0"),
                    ],
                    |xml| write_media_geometry(xml, "{0 0 0 1920 1080}"),
                );
            },
            MediaKind::Image(format) => {
                element(
                    xml,
                    "RVImageElement",
                    &[
                        ("UUID", media.element_id.as_str()),
                        ("bezelRadius", "0.000000"),
                        ("displayDelay", "0.000000"),
                        ("displayName", "ImageElement"),
                        ("drawingFill", "false"),
                        ("drawingShadow", "false"),
                        ("drawingStroke", "false"),
                        ("fillColor", "0 0 0 0"),
                        ("flippedHorizontally", "false"),
                        ("flippedVertically", "false"),
                        ("format", format.description()),
                        ("fromTemplate", "false"),
                        ("imageOffset", "{0, 0}"),
                        ("locked", "false"),
                        ("manufactureName", ""),
                        ("manufactureURL", ""),
                        ("opacity", "1.000000"),
                        ("persistent", "false"),
                        ("rotation", "0.000000"),
                        ("rvXMLIvarName", "element"),
                        ("scaleBehavior", "0"),
                        ("scaleSize", "{1, 1}"),
                        ("source", source.as_str()),
                        ("typeID", "0"),
                    ],
                    |xml| write_media_geometry(xml, "{0 0 0 0 0}"),
                );
            },
        },
    );
}

fn write_media_geometry(xml: &mut String, position: &str) {
    leaf(xml, "RVRect3D", &[("rvXMLIvarName", "position")], position);
    leaf(
        xml,
        "shadow",
        &[("rvXMLIvarName", "shadow")],
        "0.000000|0 0 0 0.3333333432674408|{4, -4}",
    );
    write_stroke(xml, "float", "1.000000");
}

fn write_text_element(xml: &mut String, text: &TextElement) {
    let alignment = text.vertical_alignment.value().to_string();
    let position = text.position.to_string();
    element(
        xml,
        "RVTextElement",
        &[
            ("UUID", text.id.as_str()),
            ("additionalLineFillHeight", "0.000000"),
            ("adjustsHeightToFit", "false"),
            ("bezelRadius", "0.000000"),
            ("displayDelay", "0.000000"),
            ("displayName", "TextElement"),
            ("drawLineBackground", "false"),
            ("drawingFill", "false"),
            ("drawingShadow", "false"),
            ("drawingStroke", "false"),
            ("fillColor", "1 1 1 1"),
            ("fromTemplate", "false"),
            ("lineBackgroundType", "0"),
            ("lineFillVerticalOffset", "0.000000"),
            ("locked", "false"),
            ("opacity", "1.000000"),
            ("persistent", "false"),
            ("revealType", "0"),
            ("rotation", "0.000000"),
            ("source", ""),
            ("textSourceRemoveLineReturnsOption", "false"),
            ("typeID", "0"),
            ("useAllCaps", "false"),
            ("verticalAlignment", alignment.as_str()),
        ],
        |xml| {
            leaf(xml, "RVRect3D", &[("rvXMLIvarName", "position")], &position);
            leaf(
                xml,
                "shadow",
                &[("rvXMLIvarName", "shadow")],
                "0.000000|0 0 0 0.3294117748737335|{4, -4}",
            );
            write_stroke(xml, "double", "0.000000");
            leaf(xml, "NSString", &[("rvXMLIvarName", "RTFData")], &text.rtf);
        },
    );
}

fn write_stroke(xml: &mut String, hint: &str, width: &str) {
    element(xml, "dictionary", &[("rvXMLIvarName", "stroke")], |xml| {
        leaf(
            xml,
            "NSColor",
            &[("rvXMLDictionaryKey", "RVShapeElementStrokeColorKey")],
            "0 0 0 1",
        );
        leaf(
            xml,
            "NSNumber",
            &[("hint", hint), ("rvXMLDictionaryKey", "RVShapeElementStrokeWidthKey")],
            width,
        );
    });
}

fn write_arrangement(xml: &mut String, arrangement: &SongArrangement) {
    let color = arrangement.color.to_string();
    element(
        xml,
        "RVSongArrangement",
        &[
            ("color", color.as_str()),
            ("name", arrangement.name.as_str()),
            ("uuid", arrangement.id.as_str()),
        ],
        |xml| {
            element(xml, "array", &[("rvXMLIvarName", "groupIDs")], |xml| {
                for id in &arrangement.group_ids {
                    leaf(xml, "NSString", &[], id);
                }
            });
        },
    );
}

#[inline]
fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn push_start(xml: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    xml.push('<');
    xml.push_str(tag);
    for (name, value) in attrs {
        xml.push(' ');
        xml.push_str(name);
        xml.push_str("=\"");
        xml.push_str(&escape_xml(value));
        xml.push('"');
    }
}

/// Element whose children are written by `children`; collapses to
/// `<tag ... />` when nothing was written.
fn element(
    xml: &mut String,
    tag: &str,
    attrs: &[(&str, &str)],
    children: impl FnOnce(&mut String),
) {
    push_start(xml, tag, attrs);
    xml.push('>');
    let body = xml.len();
    children(xml);
    if xml.len() == body {
        xml.pop();
        xml.push_str(" />");
    } else {
        xml.push_str("</");
        xml.push_str(tag);
        xml.push('>');
    }
}

fn empty(xml: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    push_start(xml, tag, attrs);
    xml.push_str(" />");
}

fn leaf(xml: &mut String, tag: &str, attrs: &[(&str, &str)], text: &str) {
    element(xml, tag, attrs, |xml| xml.push_str(&escape_xml(text)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RgbaColor;
    use crate::pro6::media::ImageFormat;
    use crate::pro6::types::{Position, Rect, VerticalAlignment};
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::path::PathBuf;

    fn sample_document(kind: DocumentKind) -> Document {
        let slide = Slide {
            id: "S1".into(),
            label: "V1-1".into(),
            background_color: RgbaColor::BLACK,
            cues: vec![
                Cue::Message { id: "C1".into(), message_id: "M1".into() },
                Cue::ClearProps { id: "C2".into() },
            ],
            media: Some(MediaCue {
                id: "MC".into(),
                element_id: "ME".into(),
                path: PathBuf::from("/media/sun rise.png"),
                kind: MediaKind::Image(ImageFormat::Png),
                display_name: "sun rise".into(),
            }),
            text: Some(TextElement {
                id: "T1".into(),
                text: "Amazing".into(),
                rtf: "QUJD".into(),
                position: Position::Rect(Rect::default_text_band(1024)),
                vertical_alignment: VerticalAlignment::Middle,
            }),
        };
        Document {
            id: "DOC".into(),
            kind,
            title: "Grace & Truth".into(),
            width: 1024,
            height: 768,
            groups: vec![Group {
                id: "G1".into(),
                name: "Verse 1".into(),
                color: RgbaColor::new(0.2, 0.2, 0.9, 1.0),
                slides: vec![slide],
            }],
            arrangements: vec![SongArrangement {
                id: "A1".into(),
                name: "arrangement1".into(),
                color: RgbaColor::TRANSPARENT,
                group_ids: vec!["G1".into(), "G1".into()],
            }],
            selected_arrangement_id: Some("A1".into()),
        }
    }

    fn tag_names(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut names = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) => {
                    names.push(String::from_utf8(e.name().as_ref().to_vec()).unwrap())
                },
                Event::Eof => break,
                _ => {},
            }
        }
        names
    }

    #[test]
    fn test_output_is_well_formed() {
        let xml = to_xml(&sample_document(DocumentKind::Song));
        let names = tag_names(&xml);
        assert_eq!(names[0], "RVPresentationDocument");
        for expected in [
            "RVTimeline",
            "RVSlideGrouping",
            "RVDisplaySlide",
            "RVMessageCue",
            "RVClearCue",
            "RVMediaCue",
            "RVImageElement",
            "RVTextElement",
            "RVSongArrangement",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert_eq!(names.iter().filter(|n| *n == "NSString").count(), 4);
    }

    #[test]
    fn test_root_attributes() {
        let xml = to_xml(&sample_document(DocumentKind::Song));
        assert!(xml.starts_with(
            "<RVPresentationDocument CCLIArtistCredits=\"\" CCLIAuthor=\"\" CCLICopyrightYear=\"\" \
             CCLIDisplay=\"false\" CCLIPublisher=\"\" CCLISongNumber=\"\" \
             CCLISongTitle=\"Grace &amp; Truth\" backgroundColor=\"0 0 0 0\" buildNumber=\"100991749\""
        ));
        assert!(xml.contains("selectedArrangementID=\"A1\""));
        assert!(xml.contains("versionNumber=\"600\" width=\"1024\">"));
        assert!(xml.ends_with("</RVPresentationDocument>"));
        assert!(!xml.starts_with("<?xml"));
    }

    #[test]
    fn test_kind_specific_attributes() {
        let freeform = to_xml(&sample_document(DocumentKind::Freeform));
        assert!(freeform.contains("CCLISongTitle=\"Grace &amp; Truth\" backgroundColor=\"\""));
        assert!(freeform.contains("playBackRate=\"0.000000\""));

        let sidecar = to_xml(&sample_document(DocumentKind::Sidecar));
        assert!(sidecar.contains("playBackRate=\"1.000000\""));
        assert!(sidecar.contains("selectedMediaTrackIndex=\"-1\""));
    }

    #[test]
    fn test_slide_layout() {
        let xml = to_xml(&sample_document(DocumentKind::Song));
        assert!(xml.contains(
            "<RVDisplaySlide UUID=\"S1\" backgroundColor=\"0 0 0 1\" chordChartPath=\"\" \
             drawingBackgroundColor=\"false\" enabled=\"true\" highlightColor=\"1 1 1 0\" hotKey=\"\" \
             label=\"V1-1\" notes=\"\" socialItemCount=\"1\"><array rvXMLIvarName=\"cues\">"
        ));
        assert!(xml.contains("<NSString rvXMLDictionaryKey=\"Message\" />"));
        assert!(xml.contains("source=\"file:///media/sun rise.png\""));
        assert!(xml.contains("format=\"PNG image\""));
        assert!(xml.contains("<RVRect3D rvXMLIvarName=\"position\">{0 69 0 1024 434}</RVRect3D>"));
        assert!(xml.contains("verticalAlignment=\"1\""));
        assert!(xml.contains("<NSString rvXMLIvarName=\"RTFData\">QUJD</NSString>"));
        assert!(xml.contains("<RVSlideGrouping color=\"0.2 0.2 0.9 1\" name=\"Verse 1\" uuid=\"G1\">"));
        assert!(xml.contains(
            "<array rvXMLIvarName=\"groupIDs\"><NSString>G1</NSString><NSString>G1</NSString></array>"
        ));
    }

    #[test]
    fn test_empty_collections_collapse() {
        let mut doc = sample_document(DocumentKind::Freeform);
        doc.groups[0].slides[0].cues.clear();
        doc.groups[0].slides[0].text = None;
        doc.arrangements.clear();
        doc.selected_arrangement_id = None;
        let xml = to_xml(&doc);
        assert!(xml.contains("<array rvXMLIvarName=\"cues\" /><RVMediaCue "));
        assert!(xml.contains("<array rvXMLIvarName=\"displayElements\" />"));
        assert!(xml.contains("<array rvXMLIvarName=\"arrangements\" /></RVPresentationDocument>"));
        assert!(xml.contains("socialItemCount=\"0\""));
        assert!(xml.contains("selectedArrangementID=\"\""));
    }

    #[test]
    fn test_video_element() {
        let mut doc = sample_document(DocumentKind::Song);
        if let Some(media) = doc.groups[0].slides[0].media.as_mut() {
            media.kind = MediaKind::Video;
            media.path = PathBuf::from("/media/loop.mp4");
        }
        let xml = to_xml(&doc);
        assert!(xml.contains("<RVVideoElement UUID=\"ME\" audioVolume=\"1.000000\""));
        assert!(xml.contains("{0 0 0 1920 1080}"));
        assert!(xml.contains("format=\"'avc1'\""));
        tag_names(&xml);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pro6");
        let doc = sample_document(DocumentKind::Song);
        write_to_file(&doc, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), to_xml(&doc));
    }
}
