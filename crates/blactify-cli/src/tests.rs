use super::*;

use blactify_media::DeliveryWidths;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["blactify-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_rewrite_with_width() {
    let cli = Cli::try_parse_from([
        "blactify-cli",
        "rewrite",
        "https://res.cloudinary.com/demo/image/upload/v1/a.jpg",
        "--width",
        "800",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Rewrite {
            width: Some(800),
            preset: None,
            ..
        })
    ));
}

#[test]
fn parses_rewrite_with_preset() {
    let cli = Cli::try_parse_from(["blactify-cli", "rewrite", "/static/a.png", "--preset", "detail"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Rewrite {
            width: None,
            preset: Some(Preset::Detail),
            ..
        })
    ));
}

#[test]
fn rewrite_rejects_zero_width() {
    let result = Cli::try_parse_from(["blactify-cli", "rewrite", "/static/a.png", "--width", "0"]);
    assert!(result.is_err());
}

#[test]
fn rewrite_rejects_width_and_preset_together() {
    let result = Cli::try_parse_from([
        "blactify-cli",
        "rewrite",
        "/static/a.png",
        "--width",
        "800",
        "--preset",
        "card",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_asset_id() {
    let cli = Cli::try_parse_from(["blactify-cli", "asset-id", "https://x/upload/v1/a.jpg"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::AssetId { ref url }) if url == "https://x/upload/v1/a.jpg"
    ));
}

#[test]
fn parses_upload_with_default_folder() {
    let cli = Cli::try_parse_from([
        "blactify-cli",
        "upload",
        "https://supplier.example.com/cream.jpg",
        "--name",
        "shea-cream",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Upload {
            ref name,
            folder: None,
            ..
        }) if name == "shea-cream"
    ));
}

#[test]
fn upload_requires_name() {
    let result = Cli::try_parse_from(["blactify-cli", "upload", "https://a/b.jpg"]);
    assert!(result.is_err());
}

#[test]
fn parses_purge_with_several_urls() {
    let cli = Cli::try_parse_from([
        "blactify-cli",
        "purge",
        "https://res.cloudinary.com/demo/image/upload/v1/a.jpg",
        "https://res.cloudinary.com/demo/image/upload/v1/b.jpg",
        "--concurrency",
        "2",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Purge {
            ref urls,
            concurrency: Some(2)
        }) if urls.len() == 2
    ));
}

#[test]
fn purge_requires_a_url() {
    let result = Cli::try_parse_from(["blactify-cli", "purge"]);
    assert!(result.is_err());
}

#[test]
fn preset_picks_matching_width() {
    let widths = DeliveryWidths {
        card: 800,
        detail: 1600,
    };
    assert_eq!(Preset::Card.width(widths), 800);
    assert_eq!(Preset::Detail.width(widths), 1600);
}

#[test]
fn rewrite_with_explicit_width_needs_no_config() {
    media::run_rewrite("/static/local-logo.png", Some(800), None).expect("rewrite should succeed");
}

#[test]
fn asset_id_without_upload_segment_is_an_error() {
    let err = media::run_asset_id("/static/local-logo.png").unwrap_err();
    assert!(err.to_string().contains("no asset identifier"));
}

#[test]
fn asset_id_of_local_upload_path_is_an_error() {
    let err = media::run_asset_id("/upload/local/logo.png").unwrap_err();
    assert!(err.to_string().contains("no asset identifier"));
}

fn offline_config() -> blactify_core::AppConfig {
    blactify_core::AppConfig {
        cloudinary: blactify_core::CloudinaryCredentials {
            cloud_name: "demo".to_owned(),
            api_key: "123456789012345".to_owned(),
            api_secret: "shh-secret".to_owned(),
            signature_algorithm: blactify_core::SignatureAlgorithm::Sha1,
        },
        upload_folder: "blactify-products".to_owned(),
        card_image_width: 800,
        detail_image_width: 1600,
        media_request_timeout_secs: 1,
        media_user_agent: "blactify-test/0.1".to_owned(),
        media_max_retries: 0,
        media_retry_backoff_base_secs: 0,
        cleanup_concurrency: 1,
    }
}

#[tokio::test]
async fn destroy_refuses_local_path_before_contacting_host() {
    let err = media::run_destroy(&offline_config(), "/upload/local/logo.png")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no asset identifier"));
}
