//! Error types and handling for BatchResize

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for BatchResize operations
pub type Result<T> = std::result::Result<T, BatchResizeError>;

/// Main error type for BatchResize operations
#[derive(Debug, Error)]
pub enum BatchResizeError {
    /// I/O related errors (output directory creation, directory listing)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input folder missing or not a directory
    #[error("Invalid input folder {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    /// A source file could not be opened or decoded as an image
    #[error("Failed to decode {file:?}: {message}")]
    Decode { file: PathBuf, message: String },

    /// A resized image could not be written to disk
    #[error("Failed to encode {file:?}: {message}")]
    Encode { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl BatchResizeError {
    /// Create a new invalid-input error
    pub fn invalid_input<S: Into<String>>(path: PathBuf, reason: S) -> Self {
        Self::InvalidInput {
            path,
            reason: reason.into(),
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(file: PathBuf, message: S) -> Self {
        Self::Decode {
            file,
            message: message.into(),
        }
    }

    /// Create a new encode error
    pub fn encode<S: Into<String>>(file: PathBuf, message: S) -> Self {
        Self::Encode {
            file,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (the batch can continue)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // These errors affect individual files but the run continues
            Self::Decode { .. } | Self::Encode { .. } => true,

            // Pre-flight failures stop the whole run
            Self::Io(_) | Self::InvalidInput { .. } | Self::Config { .. } => false,
        }
    }

    /// Get the associated file path if available
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Decode { file, .. } | Self::Encode { file, .. } => Some(file),
            Self::InvalidInput { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File system error: {}", e),
            Self::InvalidInput { path, reason } => {
                format!("Input folder {} is unusable: {}", path.display(), reason)
            }
            Self::Decode { file, message } => {
                format!("Could not read {} as an image: {}", file.display(), message)
            }
            Self::Encode { file, message } => {
                format!("Could not write resized image {}: {}", file.display(), message)
            }
            other => other.to_string(),
        }
    }
}

// Convert serde errors to our error type
impl From<toml::de::Error> for BatchResizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for BatchResizeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(format!("YAML parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = BatchResizeError::config("test message");
        assert!(matches!(err, BatchResizeError::Config { .. }));
    }

    #[test]
    fn test_recoverable_errors() {
        let file = Path::new("broken.jpg").to_path_buf();
        assert!(BatchResizeError::decode(file.clone(), "bad header").is_recoverable());
        assert!(BatchResizeError::encode(file.clone(), "disk full").is_recoverable());
        assert!(!BatchResizeError::invalid_input(file, "does not exist").is_recoverable());
        assert!(!BatchResizeError::config("bad width").is_recoverable());
    }

    #[test]
    fn test_file_path() {
        let err = BatchResizeError::decode(Path::new("a.png").to_path_buf(), "truncated");
        assert_eq!(err.file_path(), Some(&Path::new("a.png").to_path_buf()));

        let err = BatchResizeError::config("no file here");
        assert!(err.file_path().is_none());
    }

    #[test]
    fn test_user_messages() {
        let err = BatchResizeError::decode(Path::new("fake.png").to_path_buf(), "not a PNG");
        let msg = err.user_message();
        assert!(msg.contains("fake.png"));
        assert!(msg.contains("not a PNG"));
    }
}
