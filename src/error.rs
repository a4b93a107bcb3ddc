//! Error Types

use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum WavShrinkError {
    #[error("Decode error: {message}")]
    Decode { message: String },
    #[error("Encode error: {message}")]
    Encode { message: String },
    #[error("Config error: {message}")]
    Config { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
    #[error("Processing error: {message}")]
    Processing { message: String },
}

impl WavShrinkError {
    pub fn decode<S: Into<String>>(msg: S) -> Self { Self::Decode { message: msg.into() } }
    pub fn encode<S: Into<String>>(msg: S) -> Self { Self::Encode { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
    pub fn processing<S: Into<String>>(msg: S) -> Self { Self::Processing { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, WavShrinkError>;

impl From<std::io::Error> for WavShrinkError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = WavShrinkError::decode("bad header");
        assert_eq!(e.to_string(), "Decode error: bad header");

        let e = WavShrinkError::encode("disk full");
        assert!(e.to_string().starts_with("Encode"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: WavShrinkError = io.into();
        assert!(matches!(e, WavShrinkError::Io { .. }));
        assert!(e.to_string().contains("denied"));
    }
}
