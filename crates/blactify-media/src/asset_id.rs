//! Recovering an asset's public id from its delivery URL.
//!
//! The public id is what the image host's admin API needs to mutate or delete
//! an asset. It is independent of any transformation layered on for delivery,
//! so those segments are skipped along with the version marker. URLs not on
//! the image host yield no id, so a local path can never address a hosted
//! asset.
//!
//! Known ambiguity: a folder literally named like a version (`v2`) placed
//! directly after `upload/`, with no real version marker in the URL, is taken
//! for a version and dropped from the id. Deleting by that id then misses and
//! the caller logs it; nothing else is targeted.

use crate::delivery::is_hosted_asset;
use crate::segments::{is_version_segment, leading_transformation_count};

/// Extracts the public id (folder path plus file stem) from a delivery URL.
///
/// ```
/// use blactify_media::extract_asset_id;
///
/// let url = "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_800/v1690000000/blactify-products/abc123.jpg";
/// assert_eq!(extract_asset_id(url).as_deref(), Some("blactify-products/abc123"));
/// ```
///
/// Returns `None` when the URL is not on the image host, has no `upload`
/// segment, or nothing identifies an asset after it. Query strings and
/// fragments are ignored.
#[must_use]
pub fn extract_asset_id(url: &str) -> Option<String> {
    if !is_hosted_asset(url) {
        return None;
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segments: Vec<&str> = path.split('/').collect();

    let upload_at = segments.iter().position(|s| *s == "upload")?;
    let mut rest = &segments[upload_at + 1..];

    rest = &rest[leading_transformation_count(rest)..];
    if rest.first().is_some_and(|s| is_version_segment(s)) {
        rest = &rest[1..];
    }

    let (file, folders) = rest.split_last()?;
    let stem = file.rsplit_once('.').map_or(*file, |(stem, _ext)| stem);
    if stem.is_empty() {
        return None;
    }

    let mut parts = folders.to_vec();
    parts.push(stem);
    Some(parts.join("/"))
}
