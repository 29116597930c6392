pub mod asset_id;
pub mod cleanup;
pub mod client;
pub mod delivery;
pub mod error;
mod rate_limit;
mod segments;
mod signing;
pub mod types;

pub use asset_id::extract_asset_id;
pub use cleanup::{
    purge_assets, remove_asset_best_effort, AssetRemover, CleanupOutcome, CleanupReport,
};
pub use client::CloudinaryClient;
pub use delivery::{is_hosted_asset, rewrite_for_delivery, rewrite_optional, DeliveryWidths};
pub use error::MediaError;
pub use types::{DestroyOutcome, UploadedAsset};
