//! Error types for the mkrtf library.

use std::io;
use thiserror::Error;

/// Result type alias for mkrtf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading image sources or writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The image bytes could not be decoded by the codec.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// The decoded image's container format cannot be embedded.
    #[error("Image format is not supported: {0}")]
    UnsupportedFormat(String),

    /// An image block holds a format with no picture tag in the dialect.
    #[error("Image type not supported: {0}")]
    UnsupportedImageType(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("BMP".to_string());
        assert_eq!(err.to_string(), "Image format is not supported: BMP");

        let err = Error::UnsupportedImageType("TIFF".to_string());
        assert_eq!(err.to_string(), "Image type not supported: TIFF");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
