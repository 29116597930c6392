use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product as stored by the storefront.
///
/// Image URLs are kept exactly as the image host returned them at upload
/// time. Display variants are derived per read and never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    /// URL slug, e.g. `"shea-butter-body-cream"`.
    pub slug: String,
    /// Price as a decimal string, e.g. `"24.99"`.
    pub price: String,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency_code: String,
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Returns the image with the lowest position, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.iter().min_by_key(|img| img.position)
    }

    /// Returns every stored image URL, in position order.
    #[must_use]
    pub fn stored_asset_urls(&self) -> Vec<&str> {
        let mut images: Vec<&ProductImage> = self.images.iter().collect();
        images.sort_by_key(|img| img.position);
        images.into_iter().map(|img| img.url.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    /// Delivery URL as returned by the image host, or a local asset path.
    pub url: String,
    /// Display order; `0` is the storefront default.
    pub position: i32,
    pub alt: Option<String>,
}

/// A customer or admin profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    #[must_use]
    pub fn stored_asset_urls(&self) -> Vec<&str> {
        self.avatar_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .into_iter()
            .collect()
    }
}
