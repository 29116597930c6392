//! HTTP client for the image host's authenticated upload API.
//!
//! The client is built explicitly from [`CloudinaryCredentials`] and handed to
//! whatever needs it; there is no process-wide configured instance. Every
//! request is signed with a fresh timestamp, including retries.

use std::time::Duration;

use blactify_core::{AppConfig, CloudinaryCredentials};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::MediaError;
use crate::rate_limit::retry_with_backoff;
use crate::signing::sign_params;
use crate::types::{ApiErrorEnvelope, DestroyOutcome, DestroyResponse, UploadedAsset};

const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com/";

/// Longest slice of a non-JSON error body carried into [`MediaError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct CloudinaryClient {
    client: Client,
    credentials: CloudinaryCredentials,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff.
    backoff_base_secs: u64,
}

impl CloudinaryClient {
    /// Creates a client pointed at the production admin API.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        credentials: CloudinaryCredentials,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, MediaError> {
        Self::with_base_url(
            credentials,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`MediaError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        credentials: CloudinaryCredentials,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
        base_url: &str,
    ) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joins append rather than replace
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| MediaError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            credentials,
            base_url,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a production client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::Http`] if the HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, MediaError> {
        Self::new(
            config.cloudinary.clone(),
            config.media_request_timeout_secs,
            &config.media_user_agent,
            config.media_max_retries,
            config.media_retry_backoff_base_secs,
        )
    }

    /// Uploads an image into `folder` under `public_name`.
    ///
    /// `file` is anything the host accepts as a remote source: an HTTP(S)
    /// URL or a `data:` URI.
    ///
    /// # Errors
    ///
    /// - [`MediaError::Api`] if the host rejects the upload.
    /// - [`MediaError::RateLimited`] / [`MediaError::Http`] once retries are exhausted.
    /// - [`MediaError::Deserialize`] if the response is not an upload result.
    pub async fn upload(
        &self,
        file: &str,
        folder: &str,
        public_name: &str,
    ) -> Result<UploadedAsset, MediaError> {
        let params = vec![
            ("file", file.to_owned()),
            ("folder", folder.trim_matches('/').to_owned()),
            ("public_id", public_name.to_owned()),
        ];
        let asset: UploadedAsset = self
            .post_signed("upload", params, &format!("upload of {folder}/{public_name}"))
            .await?;

        tracing::info!(
            public_id = %asset.public_id,
            version = asset.version,
            bytes = ?asset.bytes,
            "uploaded image asset"
        );
        Ok(asset)
    }

    /// Deletes the asset stored under `public_id`.
    ///
    /// A missing asset is reported as [`DestroyOutcome::NotFound`], not an error.
    ///
    /// # Errors
    ///
    /// - [`MediaError::Api`] if the host rejects the request.
    /// - [`MediaError::UnexpectedResult`] for any result other than `ok` / `not found`.
    /// - [`MediaError::RateLimited`] / [`MediaError::Http`] once retries are exhausted.
    /// - [`MediaError::Deserialize`] if the response is not a destroy result.
    pub async fn destroy(&self, public_id: &str) -> Result<DestroyOutcome, MediaError> {
        let params = vec![("public_id", public_id.to_owned())];
        let response: DestroyResponse = self
            .post_signed("destroy", params, &format!("destroy of {public_id}"))
            .await?;

        match response.result.as_str() {
            "ok" => {
                tracing::info!(public_id, "destroyed image asset");
                Ok(DestroyOutcome::Deleted)
            }
            "not found" => Ok(DestroyOutcome::NotFound),
            other => Err(MediaError::UnexpectedResult {
                public_id: public_id.to_owned(),
                result: other.to_owned(),
            }),
        }
    }

    fn endpoint(&self, action: &str) -> Result<Url, MediaError> {
        let path = format!("v1_1/{}/image/{action}", self.credentials.cloud_name);
        self.base_url
            .join(&path)
            .map_err(|e| MediaError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Adds `timestamp`, `api_key`, and `signature` to `params`.
    fn signed_form(
        &self,
        params: &[(&'static str, String)],
        timestamp: i64,
    ) -> Vec<(&'static str, String)> {
        let mut form = params.to_vec();
        form.push(("timestamp", timestamp.to_string()));
        let signature = sign_params(
            &form,
            &self.credentials.api_secret,
            self.credentials.signature_algorithm,
        );
        form.push(("api_key", self.credentials.api_key.clone()));
        form.push(("signature", signature));
        form
    }

    async fn post_signed<T: DeserializeOwned>(
        &self,
        action: &str,
        params: Vec<(&'static str, String)>,
        context: &str,
    ) -> Result<T, MediaError> {
        let url = self.endpoint(action)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let form = self.signed_form(&params, chrono::Utc::now().timestamp());
            let url = url.clone();
            async move {
                let response = self.client.post(url).form(&form).send().await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(MediaError::RateLimited { retry_after_secs });
                }

                let body = response.text().await?;

                if !status.is_success() {
                    return Err(MediaError::Api {
                        status: status.as_u16(),
                        message: api_error_message(&body),
                    });
                }

                serde_json::from_str::<T>(&body).map_err(|e| MediaError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

/// Pulls `error.message` out of an error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}
