//! Storage factory and process-wide singleton.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use vendra_shared::config::MediaConfig;

use super::cloudinary::{CloudinaryCredentials, CloudinaryStorage};
use super::error::MediaError;
use super::provider::MediaStorage;

static STORAGE: OnceCell<Arc<dyn MediaStorage>> = OnceCell::new();

/// Constructs the adapter selected by the configuration.
///
/// # Errors
///
/// Returns [`MediaError::Configuration`] for an unsupported provider
/// selector or unusable credentials. There is no fallback provider.
pub fn build_storage(config: &MediaConfig) -> Result<Arc<dyn MediaStorage>, MediaError> {
    match config.media_provider.as_str() {
        "cloudinary" => {
            let credentials = CloudinaryCredentials::new(
                config.cloudinary_cloud_name.clone(),
                config.cloudinary_api_key.clone(),
                config.cloudinary_api_secret.clone(),
            );

            let mut adapter = CloudinaryStorage::new(credentials)?;
            if let Some(domain) = &config.media_cdn_domain {
                adapter = adapter.with_cdn_domain(domain.clone());
            }

            Ok(Arc::new(adapter))
        }
        other => Err(MediaError::configuration(format!(
            "unsupported media provider: {other}"
        ))),
    }
}

/// Returns the process-wide storage adapter, constructing it from the given
/// configuration on first use.
///
/// Construction happens at most once even under concurrent first use. Once
/// the slot is populated the cached adapter is returned unconditionally and
/// the configuration argument is ignored; changing providers requires a
/// process restart. A failed construction leaves the slot empty, so the
/// next call retries.
///
/// # Errors
///
/// Returns [`MediaError::Configuration`] when the adapter cannot be built.
pub fn get_storage_with(config: &MediaConfig) -> Result<Arc<dyn MediaStorage>, MediaError> {
    STORAGE
        .get_or_try_init(|| build_storage(config))
        .map(Arc::clone)
}

/// Returns the process-wide storage adapter, reading configuration from the
/// environment on first use only.
///
/// # Errors
///
/// Returns [`MediaError::Configuration`] when configuration cannot be
/// loaded or names an unsupported provider.
pub fn get_storage() -> Result<Arc<dyn MediaStorage>, MediaError> {
    if let Some(storage) = STORAGE.get() {
        return Ok(Arc::clone(storage));
    }

    let config = MediaConfig::load().map_err(|e| MediaError::configuration(e.to_string()))?;
    get_storage_with(&config)
}
