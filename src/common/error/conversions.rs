//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from
//! third-party error types to the unified Error type.

use super::types::Error;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidSlideConfig {
            path: Default::default(),
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Attach the offending sidecar path to a slide config error.
    pub(crate) fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            Error::InvalidSlideConfig { message, .. } => Error::InvalidSlideConfig {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_json_error_gains_path() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        let err = err.with_path(Path::new("slides/01.json"));
        match err {
            Error::InvalidSlideConfig { path, .. } => assert_eq!(path, Path::new("slides/01.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_with_path_keeps_other_errors() {
        let err = Error::NoSections.with_path(Path::new("x.json"));
        assert!(matches!(err, Error::NoSections));
        assert_eq!(err.to_string(), "No sections found in song file");
    }
}
