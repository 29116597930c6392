use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by image host (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// The image host rejected the request, e.g. a bad signature or an
    /// unknown cloud name.
    #[error("image host returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// `destroy` answered 200 but with a result other than `ok` / `not found`.
    #[error("unexpected destroy result \"{result}\" for {public_id}")]
    UnexpectedResult { public_id: String, result: String },

    #[error("invalid image host base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
