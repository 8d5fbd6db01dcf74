// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Load(LoadError),
    Config(String),
    Render(String),
}

/// Specific error types for image loading issues.
/// Lets the embedder distinguish a broken file from a broken disk.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// Format is not recognized or its decoder is not compiled in
    UnsupportedFormat(String),

    /// File was recognized but its data does not decode
    CorruptedImage(String),

    /// Decode aborted because the image exceeds the decoder's limits
    TooLarge(String),

    /// I/O error surfaced by the decoder (file not found, permission denied, etc.)
    IoError(String),

    /// Generic error with raw message
    Other(String),
}

impl From<image::ImageError> for LoadError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => LoadError::UnsupportedFormat(e.to_string()),
            image::ImageError::Decoding(e) => LoadError::CorruptedImage(e.to_string()),
            image::ImageError::Limits(e) => LoadError::TooLarge(e.to_string()),
            image::ImageError::IoError(e) => LoadError::IoError(e.to_string()),
            other => LoadError::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnsupportedFormat(msg) => {
                write!(f, "Unsupported image format: {}", msg)
            }
            LoadError::CorruptedImage(msg) => write!(f, "Image data is corrupted: {}", msg),
            LoadError::TooLarge(msg) => write!(f, "Image exceeds decode limits: {}", msg),
            LoadError::IoError(msg) => write!(f, "I/O error: {}", msg),
            LoadError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Load(e) => write!(f, "Load Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Render(e) => write!(f, "Render Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::Load(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Load(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn undecodable_bytes_produce_a_load_error() {
        let source = image::load_from_memory(b"definitely not an image").unwrap_err();
        let err: Error = source.into();
        assert!(matches!(err, Error::Load(_)));
    }

    #[test]
    fn decoder_io_failure_maps_to_the_io_category() {
        let source = image::ImageError::IoError(std::io::Error::other("pipe broke"));
        let load: LoadError = source.into();
        assert!(matches!(load, LoadError::IoError(_)));
    }

    #[test]
    fn load_error_display_names_the_category() {
        let err = Error::Load(LoadError::CorruptedImage("truncated scanline".into()));
        let text = format!("{}", err);
        assert!(text.starts_with("Load Error:"), "{}", text);
        assert!(text.contains("truncated scanline"));
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn render_error_formats_properly() {
        let err = Error::Render("zero-sized surface".into());
        assert_eq!(format!("{}", err), "Render Error: zero-sized surface");
    }
}
