//! Media storage error types.

use thiserror::Error;

/// Media storage operation errors.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Provider selection or credentials are unusable. Fatal until an
    /// operator intervenes; never retryable from request context.
    #[error("media storage configuration error: {0}")]
    Configuration(String),

    /// The remote call failed (network, auth, quota, malformed response).
    #[error("storage transport error: {0}")]
    Transport(String),

    /// Upload payload was empty.
    #[error("upload payload is empty")]
    EmptyPayload,

    /// Upload exceeds the accepted size.
    #[error("file size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge {
        /// Actual payload size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// Declared content type is not an accepted image format.
    #[error("content type '{0}' is not an image")]
    InvalidContentType(String),
}

impl MediaError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a file too large error.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Create an invalid content type error.
    #[must_use]
    pub fn invalid_content_type(content_type: impl Into<String>) -> Self {
        Self::InvalidContentType(content_type.into())
    }
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
