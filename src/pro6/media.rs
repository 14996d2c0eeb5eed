//! Media file classification.

use std::path::Path;

use phf::phf_map;

/// Image container, as named in the document's `format` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn description(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG image",
            ImageFormat::Jpeg => "JPEG image",
        }
    }
}

/// Kind of background media a slide can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image(ImageFormat),
    Video,
}

/// Compile-time lookup of lower-cased file extensions.
static MEDIA_EXTENSIONS: phf::Map<&'static str, MediaKind> = phf_map! {
    "png" => MediaKind::Image(ImageFormat::Png),
    "jpg" => MediaKind::Image(ImageFormat::Jpeg),
    "jpeg" => MediaKind::Image(ImageFormat::Jpeg),
    "mp4" => MediaKind::Video,
    "mov" => MediaKind::Video,
    "avi" => MediaKind::Video,
};

impl MediaKind {
    /// Classify a path by its extension, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pro6doc::pro6::{ImageFormat, MediaKind};
    ///
    /// assert_eq!(MediaKind::from_path("a/b.JPG"), Some(MediaKind::Image(ImageFormat::Jpeg)));
    /// assert_eq!(MediaKind::from_path("intro.mp4"), Some(MediaKind::Video));
    /// assert_eq!(MediaKind::from_path("notes.txt"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        MEDIA_EXTENSIONS.get(ext.as_str()).copied()
    }

    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(MediaKind::from_path("x.png"), Some(MediaKind::Image(ImageFormat::Png)));
        assert_eq!(MediaKind::from_path("x.Jpeg"), Some(MediaKind::Image(ImageFormat::Jpeg)));
        assert!(MediaKind::from_path("clip.MOV").unwrap().is_video());
        assert_eq!(MediaKind::from_path("x.json"), None);
        assert_eq!(MediaKind::from_path("png"), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ImageFormat::Png.description(), "PNG image");
        assert_eq!(ImageFormat::Jpeg.description(), "JPEG image");
    }
}
