//! Error types for the star-trail pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating the pivot, accumulating trails or running the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown celestial object '{name}'")]
    Resolution { name: String },

    #[error("Invalid observation time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image error for '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: imaginarium::Error,
    },

    #[error("Image operation failed: {0}")]
    ImageOp(#[source] imaginarium::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<imaginarium::Error> for Error {
    fn from(e: imaginarium::Error) -> Self {
        match e {
            imaginarium::Error::DimensionMismatch { expected, actual } => {
                Error::DimensionMismatch { expected, actual }
            }
            other => Error::ImageOp(other),
        }
    }
}

impl Error {
    /// Attaches a file path to an image read/write failure.
    pub(crate) fn image_file(path: impl Into<PathBuf>, source: imaginarium::Error) -> Self {
        let path = path.into();
        match source {
            imaginarium::Error::Io(source) => Error::Io { path, source },
            source => Error::Image { path, source },
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_message() {
        let err = Error::Resolution {
            name: "Vulcan".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown celestial object 'Vulcan'");
    }

    #[test]
    fn image_dimension_mismatch_maps_to_domain_error() {
        let err: Error = imaginarium::Error::DimensionMismatch {
            expected: (4, 3),
            actual: (3, 4),
        }
        .into();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: (4, 3),
                actual: (3, 4)
            }
        ));
    }

    #[test]
    fn image_io_failure_keeps_path() {
        let source = imaginarium::Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = Error::image_file("sky.png", source);

        assert!(matches!(&err, Error::Io { path, .. } if path == &PathBuf::from("sky.png")));
        assert!(err.to_string().starts_with("Failed to access 'sky.png'"));
    }
}
