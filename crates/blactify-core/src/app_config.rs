/// Digest the image host verifies request signatures with. This is an
/// account setting on the host side and must match it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureAlgorithm::Sha1 => write!(f, "sha1"),
            SignatureAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Account credentials for the image host's admin API.
///
/// Constructed once at startup and handed to whichever component needs to
/// talk to the host; nothing reads these from process-global state.
#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub signature_algorithm: SignatureAlgorithm,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[redacted]")
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cloudinary: CloudinaryCredentials,
    /// Folder new product images are uploaded into.
    pub upload_folder: String,
    /// Delivery width for product cards and listing grids.
    pub card_image_width: u32,
    /// Delivery width for product detail and hero images.
    pub detail_image_width: u32,
    pub media_request_timeout_secs: u64,
    pub media_user_agent: String,
    pub media_max_retries: u32,
    pub media_retry_backoff_base_secs: u64,
    pub cleanup_concurrency: usize,
}
