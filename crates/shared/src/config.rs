//! Application configuration management.

use serde::Deserialize;

/// Media storage configuration.
///
/// Read from the environment (and an optional `config/default` file). The
/// environment keys match the field names: `MEDIA_PROVIDER`,
/// `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`,
/// `MEDIA_CDN_DOMAIN`, `MEDIA_MAX_UPLOAD_BYTES`.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Provider selector. Only `"cloudinary"` is currently supported.
    #[serde(default = "default_media_provider")]
    pub media_provider: String,
    /// Cloudinary account identifier.
    #[serde(default)]
    pub cloudinary_cloud_name: String,
    /// Cloudinary API access key.
    #[serde(default)]
    pub cloudinary_api_key: String,
    /// Cloudinary API access secret.
    #[serde(default)]
    pub cloudinary_api_secret: String,
    /// Optional delivery-domain override (e.g. `img.example.com`).
    #[serde(default)]
    pub media_cdn_domain: Option<String>,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub media_max_upload_bytes: u64,
}

fn default_media_provider() -> String {
    "cloudinary".to_string()
}

fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

impl MediaConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default())
            .build()?;

        config.try_deserialize()
    }
}
