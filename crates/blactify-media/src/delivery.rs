//! Delivery-time rewriting of hosted image URLs.
//!
//! Stored URLs are never modified; callers derive a display URL per read.
//! Every edge case degrades to returning the input unchanged, so a bad URL
//! costs at most an unoptimized image, never a failed request.

use blactify_core::{AppConfig, ProductRecord};

use crate::segments::leading_transformation_count;

/// Hostname that identifies URLs served by the image host.
pub const CLOUDINARY_DELIVERY_HOST: &str = "res.cloudinary.com";

const UPLOAD_MARKER: &str = "/upload/";

/// Returns `true` if `url` points at the image host rather than a local asset.
#[must_use]
pub fn is_hosted_asset(url: &str) -> bool {
    url.contains(CLOUDINARY_DELIVERY_HOST)
}

/// Rewrites a hosted image URL so it is delivered as `f_auto,q_auto,w_<width>`.
///
/// Any transformation segments already sitting after `upload/` are removed
/// before the canonical one is inserted, so the result never accumulates
/// directives and re-running with a different width replaces the old one:
///
/// ```
/// use blactify_media::rewrite_for_delivery;
///
/// let url = "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_1600/v1/folder/x.png";
/// assert_eq!(
///     rewrite_for_delivery(url, 400),
///     "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_400/v1/folder/x.png"
/// );
/// ```
///
/// Directive-shaped segments are only treated as transformations when a
/// version marker follows them, so folders like `new_arrivals` survive.
///
/// Returned unchanged: empty input, URLs not on the image host (local paths),
/// URLs without an `upload/` marker in their path or without anything after
/// it, and a `target_width` of zero. Query strings and fragments are kept.
#[must_use]
pub fn rewrite_for_delivery(url: &str, target_width: u32) -> String {
    if url.is_empty() || target_width == 0 || !is_hosted_asset(url) {
        return url.to_owned();
    }

    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    let (path, suffix) = url.split_at(path_end);

    let Some(marker_at) = path.find(UPLOAD_MARKER) else {
        return url.to_owned();
    };
    let (head, tail) = path.split_at(marker_at + UPLOAD_MARKER.len());

    let remainder = strip_transformation_segments(tail);
    if remainder.is_empty() {
        return url.to_owned();
    }

    format!("{head}f_auto,q_auto,w_{target_width}/{remainder}{suffix}")
}

/// Like [`rewrite_for_delivery`], but propagates an absent image as `None`.
#[must_use]
pub fn rewrite_optional(url: Option<&str>, target_width: u32) -> Option<String> {
    url.map(|u| rewrite_for_delivery(u, target_width))
}

/// Drops leading transformation segments from the part of the path after
/// `upload/`. The final segment is always the asset itself and is kept.
fn strip_transformation_segments(tail: &str) -> String {
    let segments: Vec<&str> = tail.split('/').collect();
    let skip = leading_transformation_count(&segments);
    segments[skip..].join("/")
}

/// The storefront's two rendering widths, carried from configuration to the
/// places that build image tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWidths {
    pub card: u32,
    pub detail: u32,
}

impl DeliveryWidths {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            card: config.card_image_width,
            detail: config.detail_image_width,
        }
    }

    /// Delivery URL for product cards and listing grids.
    #[must_use]
    pub fn card(&self, url: &str) -> String {
        rewrite_for_delivery(url, self.card)
    }

    /// Delivery URL for product detail pages and hero images.
    #[must_use]
    pub fn detail(&self, url: &str) -> String {
        rewrite_for_delivery(url, self.detail)
    }

    /// Card URL for a product's primary image, `None` when it has no images.
    #[must_use]
    pub fn product_card(&self, product: &ProductRecord) -> Option<String> {
        product.primary_image().map(|img| self.card(&img.url))
    }

    /// Detail URLs for every product image, in position order.
    #[must_use]
    pub fn product_gallery(&self, product: &ProductRecord) -> Vec<String> {
        product
            .stored_asset_urls()
            .into_iter()
            .map(|url| self.detail(url))
            .collect()
    }
}

#[cfg(test)]
#[path = "delivery_test.rs"]
mod tests;
