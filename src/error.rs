//! Error types for the fallible outer surfaces (config files, save files).
//!
//! The simulation itself never fails: invalid moves and out-of-range tile
//! access degrade to no-ops.

use thiserror::Error;

/// Errors raised while loading configuration or save data
#[derive(Error, Debug)]
pub enum SandboxError {
    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Save written by an incompatible format version
    #[error("Unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Structurally valid data that violates an invariant
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for sandbox operations.
pub type Result<T> = std::result::Result<T, SandboxError>;

impl SandboxError {
    /// Creates a new validation error.
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SandboxError::validation("tiles column count 3 != width 4");
        assert_eq!(
            err.to_string(),
            "Validation error: tiles column count 3 != width 4"
        );

        let err = SandboxError::UnsupportedVersion {
            found: 9,
            expected: 1,
        };
        assert!(err.to_string().contains("9"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SandboxError = io_err.into();
        assert!(matches!(err, SandboxError::Io(_)));
    }
}
