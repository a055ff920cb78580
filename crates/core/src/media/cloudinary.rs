//! Cloudinary storage adapter.
//!
//! Talks to the Cloudinary REST API: authenticated multipart uploads,
//! destroy calls, and local delivery-URL derivation with optional signing.
//! Request signing follows the provider scheme: SHA-1 over the sorted
//! parameter pairs with the secret appended.

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::error::MediaError;
use super::provider::MediaStorage;
use super::types::{AssetResult, DeleteOutcome, UploadInput, UrlOptions};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const DELIVERY_BASE: &str = "https://res.cloudinary.com";
/// Folder used when the caller supplies no namespace hint.
const DEFAULT_FOLDER: &str = "products";

/// Credential bundle for a Cloudinary account.
#[derive(Debug, Clone)]
pub struct CloudinaryCredentials {
    /// Account (cloud) name.
    pub cloud_name: String,
    /// API access key.
    pub api_key: String,
    /// API access secret, used for request and URL signing.
    pub api_secret: String,
}

impl CloudinaryCredentials {
    /// Creates a credential bundle.
    #[must_use]
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

/// Media storage backed by the Cloudinary API.
pub struct CloudinaryStorage {
    credentials: CloudinaryCredentials,
    cdn_domain: Option<String>,
    http: reqwest::Client,
}

/// Successful upload response, reduced to the fields we keep.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
    bytes: Option<u64>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

impl CloudinaryStorage {
    /// Creates an adapter from a credential bundle.
    ///
    /// Fails fast when any credential is blank; otherwise only the HTTP
    /// client is configured and no network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Configuration`] for missing credentials or an
    /// unusable HTTP client.
    pub fn new(credentials: CloudinaryCredentials) -> Result<Self, MediaError> {
        for (field, value) in [
            ("cloud_name", &credentials.cloud_name),
            ("api_key", &credentials.api_key),
            ("api_secret", &credentials.api_secret),
        ] {
            if value.trim().is_empty() {
                return Err(MediaError::configuration(format!(
                    "missing cloudinary credential: {field}"
                )));
            }
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| MediaError::configuration(e.to_string()))?;

        Ok(Self {
            credentials,
            cdn_domain: None,
            http,
        })
    }

    /// Overrides the delivery domain (e.g. `img.example.com`).
    #[must_use]
    pub fn with_cdn_domain(mut self, domain: impl Into<String>) -> Self {
        self.cdn_domain = Some(domain.into());
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.credentials.cloud_name)
    }

    /// Signs an API request: SHA-1 hex digest over the sorted `k=v` pairs
    /// joined with `&`, with the secret appended.
    fn sign_request(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha1::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Derives the `s--...--` component of a signed delivery URL.
    fn delivery_signature(&self, target: &str) -> String {
        let mut hasher = Sha1::new();
        hasher.update(target.as_bytes());
        hasher.update(self.credentials.api_secret.as_bytes());
        let encoded = URL_SAFE_NO_PAD.encode(hasher.finalize());
        format!("s--{}--", &encoded[..8])
    }

    /// Builds the transformation chain for the given rendering options.
    fn transformation(opts: &UrlOptions) -> Option<String> {
        let mut chain = Vec::new();

        if opts.width.is_some() || opts.height.is_some() {
            let mut resize = Vec::new();
            if let Some(width) = opts.width {
                resize.push(format!("w_{width}"));
            }
            if let Some(height) = opts.height {
                resize.push(format!("h_{height}"));
            }
            resize.push("c_limit".to_string());
            chain.push(resize.join(","));
        }

        if let Some(format) = &opts.format {
            chain.push(format!("f_{format}"));
        }

        if chain.is_empty() {
            None
        } else {
            Some(chain.join("/"))
        }
    }

    fn delivery_base(&self) -> String {
        match &self.cdn_domain {
            Some(domain) => format!("https://{domain}/{}", self.credentials.cloud_name),
            None => format!("{DELIVERY_BASE}/{}", self.credentials.cloud_name),
        }
    }

    fn map_destroy_result(result: &str) -> Result<DeleteOutcome, MediaError> {
        match result {
            "ok" => Ok(DeleteOutcome::Deleted),
            "not found" => Ok(DeleteOutcome::NotFound),
            other => Err(MediaError::transport(format!("destroy rejected: {other}"))),
        }
    }

    /// Extracts the provider's error message from a failed response body.
    fn error_from_body(status: reqwest::StatusCode, body: &str) -> MediaError {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => MediaError::transport(parsed.error.message),
            Err(_) => MediaError::transport(format!("request failed with status {status}")),
        }
    }
}

#[async_trait]
impl MediaStorage for CloudinaryStorage {
    async fn upload(&self, input: UploadInput) -> Result<AssetResult, MediaError> {
        if input.data.is_empty() {
            return Err(MediaError::EmptyPayload);
        }

        let folder = input
            .folder
            .clone()
            .unwrap_or_else(|| DEFAULT_FOLDER.to_string());
        let timestamp = Utc::now().timestamp().to_string();

        // The provider assigns the public id; client-chosen filenames never
        // leak into asset identity.
        let mut params = BTreeMap::new();
        params.insert("folder", folder.clone());
        params.insert("timestamp", timestamp.clone());
        params.insert("unique_filename", "true".to_string());
        params.insert("use_filename", "false".to_string());
        let signature = Self::sign_request(&params, &self.credentials.api_secret);

        let mut part = reqwest::multipart::Part::bytes(input.data.to_vec()).file_name("file");
        if let Some(content_type) = &input.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| MediaError::transport(format!("invalid content type: {e}")))?;
        }

        let form = reqwest::multipart::Form::new()
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("folder", folder)
            .text("unique_filename", "true")
            .text("use_filename", "false")
            .part("file", part);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::error_from_body(status, &body));
        }

        let uploaded: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| MediaError::transport(format!("malformed upload response: {e}")))?;

        Ok(AssetResult {
            id: uploaded.public_id,
            url: uploaded.secure_url,
            bytes: uploaded.bytes,
            width: uploaded.width,
            height: uploaded.height,
            content_type: input.content_type,
        })
    }

    async fn delete(&self, id: &str) -> Result<DeleteOutcome, MediaError> {
        let timestamp = Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("public_id", id.to_string());
        params.insert("timestamp", timestamp.clone());
        let signature = Self::sign_request(&params, &self.credentials.api_secret);

        let form = [
            ("public_id", id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.credentials.api_key.clone()),
            ("signature", signature),
        ];

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::error_from_body(status, &body));
        }

        let destroyed: DestroyResponse = serde_json::from_str(&body)
            .map_err(|e| MediaError::transport(format!("malformed destroy response: {e}")))?;

        Self::map_destroy_result(&destroyed.result)
    }

    fn url(&self, id: &str, opts: &UrlOptions) -> String {
        let transformation = Self::transformation(opts);

        let mut segments = Vec::new();
        if opts.signed {
            let target = match &transformation {
                Some(chain) => format!("{chain}/{id}"),
                None => id.to_string(),
            };
            segments.push(self.delivery_signature(&target));
        }
        if let Some(chain) = transformation {
            segments.push(chain);
        }
        segments.push(id.to_string());

        format!("{}/image/upload/{}", self.delivery_base(), segments.join("/"))
    }

    fn provider_name(&self) -> &'static str {
        "cloudinary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn storage() -> CloudinaryStorage {
        CloudinaryStorage::new(CloudinaryCredentials::new("demo", "key", "secret"))
            .expect("valid credentials")
    }

    #[test]
    fn construction_rejects_blank_credentials() {
        for credentials in [
            CloudinaryCredentials::new("", "key", "secret"),
            CloudinaryCredentials::new("demo", " ", "secret"),
            CloudinaryCredentials::new("demo", "key", ""),
        ] {
            let result = CloudinaryStorage::new(credentials);
            assert!(matches!(result, Err(MediaError::Configuration(_))));
        }
    }

    #[tokio::test]
    async fn upload_rejects_empty_payload() {
        let result = storage().upload(UploadInput::new(Vec::new())).await;
        assert!(matches!(result, Err(MediaError::EmptyPayload)));
    }

    #[test]
    fn sign_request_matches_known_vector() {
        // Degenerate case: no parameters, the digest covers the secret alone.
        let params = BTreeMap::new();
        let signature = CloudinaryStorage::sign_request(&params, "abc");
        assert_eq!(signature, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn sign_request_is_deterministic() {
        let mut params = BTreeMap::new();
        params.insert("timestamp", "1700000000".to_string());
        params.insert("folder", "products".to_string());

        let first = CloudinaryStorage::sign_request(&params, "s1");
        let second = CloudinaryStorage::sign_request(&params, "s1");
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
        assert_ne!(first, CloudinaryStorage::sign_request(&params, "s2"));
    }

    #[rstest]
    #[case("ok", DeleteOutcome::Deleted)]
    #[case("not found", DeleteOutcome::NotFound)]
    fn destroy_result_maps_outcomes(#[case] raw: &str, #[case] expected: DeleteOutcome) {
        let outcome = CloudinaryStorage::map_destroy_result(raw).expect("mapped outcome");
        assert_eq!(outcome, expected);
    }

    #[test]
    fn destroy_result_rejects_other_codes() {
        let result = CloudinaryStorage::map_destroy_result("rate limited");
        assert!(matches!(result, Err(MediaError::Transport(_))));
    }

    #[test]
    fn url_without_options_is_bare() {
        let url = storage().url("products/abc123", &UrlOptions::new());
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/products/abc123"
        );
    }

    #[test]
    fn url_chains_resize_and_format() {
        let opts = UrlOptions::new()
            .with_width(300)
            .with_height(200)
            .with_format("webp");
        let url = storage().url("products/abc123", &opts);
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/w_300,h_200,c_limit/f_webp/products/abc123"
        );
    }

    #[test]
    fn url_with_width_only() {
        let opts = UrlOptions::new().with_width(300);
        let url = storage().url("p/x", &opts);
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/w_300,c_limit/p/x"
        );
    }

    #[test]
    fn url_uses_cdn_override() {
        let storage = storage().with_cdn_domain("img.example.com");
        let url = storage.url("p/x", &UrlOptions::new());
        assert_eq!(url, "https://img.example.com/demo/image/upload/p/x");
    }

    #[test]
    fn signed_url_carries_signature_component() {
        let opts = UrlOptions::new().with_width(100).signed();
        let url = storage().url("p/x", &opts);

        let prefix = "https://res.cloudinary.com/demo/image/upload/s--";
        assert!(url.starts_with(prefix), "unexpected url: {url}");
        assert!(url.ends_with("--/w_100,c_limit/p/x"), "unexpected url: {url}");

        let sig = &url[prefix.len()..prefix.len() + 8];
        assert!(
            sig.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected signature charset: {sig}"
        );
    }

    #[test]
    fn error_body_prefers_provider_message() {
        let err = CloudinaryStorage::error_from_body(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Invalid Signature"}}"#,
        );
        assert!(matches!(err, MediaError::Transport(msg) if msg == "Invalid Signature"));
    }

    #[test]
    fn error_body_falls_back_to_status() {
        let err =
            CloudinaryStorage::error_from_body(reqwest::StatusCode::BAD_GATEWAY, "<html></html>");
        assert!(matches!(err, MediaError::Transport(msg) if msg.contains("502")));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn storage() -> CloudinaryStorage {
        CloudinaryStorage::new(CloudinaryCredentials::new("demo", "key", "secret"))
            .expect("valid credentials")
    }

    // url() is a pure function of (id, opts) for non-signed requests: two
    // calls with identical arguments return identical strings.
    proptest! {
        #[test]
        fn prop_url_is_deterministic(
            id in "[a-z0-9]{1,12}(/[a-z0-9]{1,12}){0,2}",
            width in prop::option::of(1u32..5000),
            height in prop::option::of(1u32..5000),
            format in prop::option::of("[a-z]{2,4}"),
        ) {
            let storage = storage();
            let opts = UrlOptions { width, height, format, signed: false };

            let first = storage.url(&id, &opts);
            let second = storage.url(&id, &opts);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.starts_with("https://"));
            prop_assert!(first.ends_with(&id));
        }
    }

    // Request signatures are always 40 lowercase hex characters.
    proptest! {
        #[test]
        fn prop_signature_shape(
            folder in "[a-z0-9/_-]{0,30}",
            timestamp in 0i64..=4_102_444_800,
            secret in "[a-zA-Z0-9]{1,32}",
        ) {
            let mut params = std::collections::BTreeMap::new();
            params.insert("folder", folder);
            params.insert("timestamp", timestamp.to_string());

            let signature = CloudinaryStorage::sign_request(&params, &secret);
            prop_assert_eq!(signature.len(), 40);
            prop_assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
