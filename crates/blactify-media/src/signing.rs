//! Request signing for the image host's authenticated upload API.
//!
//! The signature is the hex digest of the signable parameters, sorted by
//! name and joined as `k=v` pairs with `&`, with the API secret appended.
//! The digest is SHA-1 unless the account is switched to SHA-256.

use blactify_core::SignatureAlgorithm;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Parameters the host leaves out of the signature.
const UNSIGNED_PARAMS: &[&str] = &[
    "file",
    "api_key",
    "resource_type",
    "cloud_name",
    "signature",
];

pub(crate) fn sign_params(
    params: &[(&str, String)],
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let mut signable: Vec<&(&str, String)> = params
        .iter()
        .filter(|(key, value)| !UNSIGNED_PARAMS.contains(key) && !value.is_empty())
        .collect();
    signable.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = signable
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let payload = format!("{to_sign}{api_secret}");
    match algorithm {
        SignatureAlgorithm::Sha1 => format!("{:x}", Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => format!("{:x}", Sha256::digest(payload.as_bytes())),
    }
}
