mod media;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::media::Preset;

#[derive(Debug, Parser)]
#[command(name = "blactify-cli")]
#[command(about = "Blactify storefront media tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the delivery URL for a stored image URL
    Rewrite {
        url: String,
        /// Pixel width to deliver at
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "preset")]
        width: Option<u32>,
        /// Use a configured storefront width instead of an explicit one
        #[arg(long, value_enum)]
        preset: Option<Preset>,
    },
    /// Print the public id the image host stores a URL's asset under
    AssetId { url: String },
    /// Upload an image (remote URL or data URI) and print its delivery URL
    Upload {
        file: String,
        /// Public name within the folder
        #[arg(long)]
        name: String,
        /// Target folder (defaults to BLACTIFY_UPLOAD_FOLDER)
        #[arg(long)]
        folder: Option<String>,
    },
    /// Delete the hosted asset behind a delivery URL
    Destroy { url: String },
    /// Best-effort deletion of the assets behind several URLs
    Purge {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Deletes in flight at once (defaults to BLACTIFY_CLEANUP_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log_level = std::env::var("BLACTIFY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Rewrite { url, width, preset }) => {
            media::run_rewrite(&url, width, preset)?;
        }
        Some(Commands::AssetId { url }) => media::run_asset_id(&url)?,
        Some(Commands::Upload { file, name, folder }) => {
            let config = blactify_core::load_app_config()?;
            media::run_upload(&config, &file, folder.as_deref(), &name).await?;
        }
        Some(Commands::Destroy { url }) => {
            let config = blactify_core::load_app_config()?;
            media::run_destroy(&config, &url).await?;
        }
        Some(Commands::Purge { urls, concurrency }) => {
            let config = blactify_core::load_app_config()?;
            media::run_purge(&config, &urls, concurrency).await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
