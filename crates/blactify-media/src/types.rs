//! Response types for the image host's upload and destroy endpoints.

use serde::{Deserialize, Serialize};

/// An asset as described by a successful upload response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Folder-qualified id, e.g. `"blactify-products/abc123"`.
    pub public_id: String,
    pub version: u64,
    /// HTTPS delivery URL; this is what records store.
    pub secure_url: String,
    pub format: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DestroyResponse {
    pub result: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    Deleted,
    /// The host had no asset under that id; already gone or never existed.
    NotFound,
}

/// Error envelope returned with 4xx/5xx statuses:
/// `{"error": {"message": "Invalid Signature ..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
