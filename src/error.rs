//! Error types for ongkit library.
//!
//! The document functions are total and never produce an [`Error`]; only
//! image handling and report serialization can fail.

use std::io;
use thiserror::Error;

/// Result type alias for ongkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during image normalization or reporting.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not recognized as any supported image format.
    #[error("Unknown file format: not a supported image")]
    UnknownFormat,

    /// The image was recognized but could not be decoded.
    #[error("Image decoding error: {0}")]
    Decode(String),

    /// Encoding the output image failed.
    #[error("Image encoding error: {0}")]
    Encode(String),

    /// The drawing surface for the target dimensions could not be created.
    #[error("Rendering surface unavailable: {0}")]
    Surface(String),

    /// Invalid normalization options (e.g. quality outside 0..=1).
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Error serializing a report.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        use image::error::{ImageError, ParameterErrorKind};

        match err {
            ImageError::IoError(e) => Error::Io(e),
            ImageError::Decoding(_) => Error::Decode(err.to_string()),
            ImageError::Unsupported(_) => Error::Decode(err.to_string()),
            ImageError::Encoding(_) => Error::Encode(err.to_string()),
            ImageError::Limits(_) => Error::Surface(err.to_string()),
            ImageError::Parameter(ref p)
                if matches!(p.kind(), ParameterErrorKind::DimensionMismatch) =>
            {
                Error::Surface(err.to_string())
            }
            _ => Error::Other(err.to_string()),
        }
    }
}
