use crate::app_config::{AppConfig, CloudinaryCredentials, SignatureAlgorithm};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_width = |var: &str, default: &str| -> Result<u32, ConfigError> {
        match parse_u32(var, default)? {
            0 => Err(invalid(var, "width must be greater than zero".to_string())),
            width => Ok(width),
        }
    };

    let cloudinary = CloudinaryCredentials {
        cloud_name: require("CLOUDINARY_CLOUD_NAME")?,
        api_key: require("CLOUDINARY_API_KEY")?,
        api_secret: require("CLOUDINARY_API_SECRET")?,
        signature_algorithm: parse_signature_algorithm(&or_default(
            "BLACTIFY_SIGNATURE_ALGORITHM",
            "sha1",
        ))
        .map_err(|reason| invalid("BLACTIFY_SIGNATURE_ALGORITHM", reason))?,
    };

    let upload_folder = or_default("BLACTIFY_UPLOAD_FOLDER", "blactify-products")
        .trim_matches('/')
        .to_string();
    if upload_folder.is_empty() {
        return Err(invalid(
            "BLACTIFY_UPLOAD_FOLDER",
            "folder must not be empty".to_string(),
        ));
    }

    let card_image_width = parse_width("BLACTIFY_CARD_IMAGE_WIDTH", "800")?;
    let detail_image_width = parse_width("BLACTIFY_DETAIL_IMAGE_WIDTH", "1600")?;

    let media_request_timeout_secs = parse_u64("BLACTIFY_MEDIA_REQUEST_TIMEOUT_SECS", "30")?;
    let media_user_agent = or_default(
        "BLACTIFY_MEDIA_USER_AGENT",
        "blactify/0.1 (storefront-media)",
    );
    let media_max_retries = parse_u32("BLACTIFY_MEDIA_MAX_RETRIES", "3")?;
    let media_retry_backoff_base_secs = parse_u64("BLACTIFY_MEDIA_RETRY_BACKOFF_BASE_SECS", "1")?;

    let cleanup_concurrency = parse_usize("BLACTIFY_CLEANUP_CONCURRENCY", "4")?;
    if cleanup_concurrency == 0 {
        return Err(invalid(
            "BLACTIFY_CLEANUP_CONCURRENCY",
            "concurrency must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        cloudinary,
        upload_folder,
        card_image_width,
        detail_image_width,
        media_request_timeout_secs,
        media_user_agent,
        media_max_retries,
        media_retry_backoff_base_secs,
        cleanup_concurrency,
    })
}

/// Parse a string into a `SignatureAlgorithm` variant (case-insensitive).
///
/// # Errors
///
/// Returns a reason string for unrecognized values.
fn parse_signature_algorithm(s: &str) -> Result<SignatureAlgorithm, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "sha1" => Ok(SignatureAlgorithm::Sha1),
        "sha256" => Ok(SignatureAlgorithm::Sha256),
        other => Err(format!(
            "unknown signature algorithm '{other}', expected sha1 or sha256"
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
