//! The storage provider contract.

use async_trait::async_trait;

use super::error::MediaError;
use super::types::{AssetResult, DeleteOutcome, UploadInput, UrlOptions};

/// Capability set every media storage provider implements.
///
/// Product services depend on this contract, not on a concrete provider, so
/// a new provider only has to satisfy these three operations.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Uploads a binary payload and returns the provider-assigned asset.
    ///
    /// The payload must be non-empty. On success the returned id is
    /// immediately usable in [`delete`](MediaStorage::delete) and
    /// [`url`](MediaStorage::url); a partially populated success is never
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::EmptyPayload`] for an empty payload and
    /// [`MediaError::Transport`] when the remote call fails.
    async fn upload(&self, input: UploadInput) -> Result<AssetResult, MediaError>;

    /// Deletes an asset by id.
    ///
    /// Deleting an id the provider does not know yields
    /// [`DeleteOutcome::NotFound`]; only a failed remote call is an error.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Transport`] when the remote call fails.
    async fn delete(&self, id: &str) -> Result<DeleteOutcome, MediaError>;

    /// Derives the delivery URL for an asset.
    ///
    /// Pure string derivation from the id and options: no network round-trip
    /// and no existence check. A dangling id yields a URL that 404s when
    /// fetched.
    fn url(&self, id: &str, opts: &UrlOptions) -> String;

    /// Name of the provider, recorded next to asset ids at rest.
    fn provider_name(&self) -> &'static str;
}
