//! Media storage types and data structures.

use bytes::Bytes;

/// Input for a media upload.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// Binary payload.
    pub data: Bytes,
    /// Declared MIME type, when known.
    pub content_type: Option<String>,
    /// Logical folder/namespace hint for the provider.
    pub folder: Option<String>,
}

impl UploadInput {
    /// Creates an upload input from a binary payload.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
            folder: None,
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the folder hint.
    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResult {
    /// Provider-assigned asset identifier, opaque to callers.
    pub id: String,
    /// Public URL of the uploaded asset.
    pub url: String,
    /// Size of the stored asset in bytes, when reported.
    pub bytes: Option<u64>,
    /// Pixel width, when reported.
    pub width: Option<u32>,
    /// Pixel height, when reported.
    pub height: Option<u32>,
    /// Content type as declared at upload time.
    pub content_type: Option<String>,
}

/// Outcome of a delete call.
///
/// `NotFound` is a normal outcome signaling an idempotent no-op; transport
/// failures are reported as [`super::MediaError::Transport`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The asset existed and was removed.
    Deleted,
    /// The provider had no asset under the given id.
    NotFound,
}

/// Rendering options for URL derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOptions {
    /// Bounding width in pixels.
    pub width: Option<u32>,
    /// Bounding height in pixels.
    pub height: Option<u32>,
    /// Target delivery format (e.g. `webp`).
    pub format: Option<String>,
    /// Whether to emit a signed delivery URL.
    pub signed: bool,
}

impl UrlOptions {
    /// Creates empty options: the bare asset URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the rendered width.
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Bounds the rendered height.
    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Requests delivery in the given format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Requests a signed delivery URL.
    #[must_use]
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }
}
