//! Media command handlers for the CLI.
//!
//! `rewrite` and `asset-id` are pure and only touch configuration when a
//! preset width is requested. `destroy` reports failures as errors; `purge`
//! is best-effort and always finishes, printing what it could not delete.

use blactify_core::AppConfig;
use blactify_media::{
    extract_asset_id, purge_assets, rewrite_for_delivery, CleanupOutcome, CloudinaryClient,
    DeliveryWidths, DestroyOutcome,
};
use clap::ValueEnum;

/// Storefront rendering contexts with a configured width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Preset {
    /// Product cards and listing grids
    Card,
    /// Product detail and hero images
    Detail,
}

impl Preset {
    pub(crate) fn width(self, widths: DeliveryWidths) -> u32 {
        match self {
            Preset::Card => widths.card,
            Preset::Detail => widths.detail,
        }
    }
}

pub(crate) fn run_rewrite(
    url: &str,
    width: Option<u32>,
    preset: Option<Preset>,
) -> anyhow::Result<()> {
    let width = match width {
        Some(w) => w,
        None => {
            let config = blactify_core::load_app_config()?;
            preset
                .unwrap_or(Preset::Card)
                .width(DeliveryWidths::from_app_config(&config))
        }
    };
    println!("{}", rewrite_for_delivery(url, width));
    Ok(())
}

pub(crate) fn run_asset_id(url: &str) -> anyhow::Result<()> {
    let public_id =
        extract_asset_id(url).ok_or_else(|| anyhow::anyhow!("no asset identifier in '{url}'"))?;
    println!("{public_id}");
    Ok(())
}

/// Upload into `folder` (or the configured upload folder) and print the
/// stored URL followed by its card-width delivery URL.
pub(crate) async fn run_upload(
    config: &AppConfig,
    file: &str,
    folder: Option<&str>,
    name: &str,
) -> anyhow::Result<()> {
    let client = CloudinaryClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build image host client: {e}"))?;
    let folder = folder.unwrap_or(&config.upload_folder);

    let asset = client.upload(file, folder, name).await?;
    let widths = DeliveryWidths::from_app_config(config);

    println!("{}", asset.secure_url);
    println!("{}", widths.card(&asset.secure_url));
    Ok(())
}

pub(crate) async fn run_destroy(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let public_id =
        extract_asset_id(url).ok_or_else(|| anyhow::anyhow!("no asset identifier in '{url}'"))?;
    let client = CloudinaryClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build image host client: {e}"))?;

    match client.destroy(&public_id).await? {
        DestroyOutcome::Deleted => println!("deleted {public_id}"),
        DestroyOutcome::NotFound => println!("not found {public_id}"),
    }
    Ok(())
}

pub(crate) async fn run_purge(
    config: &AppConfig,
    urls: &[String],
    concurrency: Option<usize>,
) -> anyhow::Result<()> {
    let client = CloudinaryClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build image host client: {e}"))?;
    let concurrency = concurrency.unwrap_or(config.cleanup_concurrency);

    let report = purge_assets(&client, urls, concurrency).await;

    for outcome in &report.outcomes {
        if let CleanupOutcome::Failed { public_id, error } = outcome {
            eprintln!("error: failed to delete {public_id}: {error}");
        }
    }
    println!(
        "purged assets: {} deleted, {} not found, {} skipped, {} failed",
        report.deleted, report.not_found, report.skipped, report.failed
    );
    Ok(())
}
