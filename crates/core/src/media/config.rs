//! Upload acceptance policy.

use super::error::MediaError;

/// Request-level filter applied before a payload reaches any provider.
///
/// Product images must declare an `image/*` content type and stay within
/// the size bound. Enforcing this sits with the calling service, not with
/// the [`super::MediaStorage`] contract itself.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl UploadPolicy {
    /// Default max upload size: 10MB.
    pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

    /// Creates a policy with the given size bound.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Maximum accepted payload size in bytes.
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Validates a payload against the policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the declared content type is not an image or the
    /// payload exceeds the size bound.
    pub fn validate(&self, content_type: &str, size: u64) -> Result<(), MediaError> {
        if !content_type.starts_with("image/") {
            return Err(MediaError::invalid_content_type(content_type));
        }

        if size > self.max_bytes {
            return Err(MediaError::file_too_large(size, self.max_bytes));
        }

        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_BYTES)
    }
}
