//! Best-effort removal of hosted images that belonged to a deleted record.
//!
//! Cleanup never fails the operation it accompanies. URLs that are local or
//! carry no recoverable id are skipped, and delete failures are logged and
//! counted; a stale asset left on the host is an acceptable outcome.

use std::collections::HashSet;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use crate::asset_id::extract_asset_id;
use crate::client::CloudinaryClient;
use crate::error::MediaError;
use crate::types::DestroyOutcome;

/// Something that can delete a hosted asset by public id.
#[async_trait]
pub trait AssetRemover: Send + Sync {
    async fn remove(&self, public_id: &str) -> Result<DestroyOutcome, MediaError>;
}

#[async_trait]
impl AssetRemover for CloudinaryClient {
    async fn remove(&self, public_id: &str) -> Result<DestroyOutcome, MediaError> {
        self.destroy(public_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Deleted { public_id: String },
    NotFound { public_id: String },
    /// Local path, foreign host, or no id recoverable from the URL.
    Skipped { url: String },
    Failed { public_id: String, error: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<CleanupOutcome>,
}

impl CleanupReport {
    fn record(&mut self, outcome: CleanupOutcome) {
        match outcome {
            CleanupOutcome::Deleted { .. } => self.deleted += 1,
            CleanupOutcome::NotFound { .. } => self.not_found += 1,
            CleanupOutcome::Skipped { .. } => self.skipped += 1,
            CleanupOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Deletes the asset behind `url`, logging instead of returning errors.
pub async fn remove_asset_best_effort<R>(remover: &R, url: &str) -> CleanupOutcome
where
    R: AssetRemover + ?Sized,
{
    match extract_asset_id(url) {
        Some(public_id) => remove_by_id(remover, public_id).await,
        None => {
            tracing::debug!(url, "no hosted asset id in url, skipping cleanup");
            CleanupOutcome::Skipped {
                url: url.to_owned(),
            }
        }
    }
}

/// Best-effort cleanup over many URLs with at most `concurrency` deletes in
/// flight. URLs resolving to the same public id are deleted once.
pub async fn purge_assets<R, I, S>(remover: &R, urls: I, concurrency: usize) -> CleanupReport
where
    R: AssetRemover + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = CleanupReport::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut public_ids: Vec<String> = Vec::new();

    for url in urls {
        let url = url.as_ref();
        match extract_asset_id(url) {
            Some(public_id) => {
                if seen.insert(public_id.clone()) {
                    public_ids.push(public_id);
                }
            }
            None => {
                tracing::debug!(url, "no hosted asset id in url, skipping cleanup");
                report.record(CleanupOutcome::Skipped {
                    url: url.to_owned(),
                });
            }
        }
    }

    let outcomes = stream::iter(public_ids)
        .map(|public_id| remove_by_id(remover, public_id))
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    for outcome in outcomes {
        report.record(outcome);
    }

    tracing::info!(
        deleted = report.deleted,
        not_found = report.not_found,
        skipped = report.skipped,
        failed = report.failed,
        "asset cleanup finished"
    );
    report
}

async fn remove_by_id<R>(remover: &R, public_id: String) -> CleanupOutcome
where
    R: AssetRemover + ?Sized,
{
    match remover.remove(&public_id).await {
        Ok(DestroyOutcome::Deleted) => CleanupOutcome::Deleted { public_id },
        Ok(DestroyOutcome::NotFound) => {
            tracing::debug!(public_id = %public_id, "asset already absent on image host");
            CleanupOutcome::NotFound { public_id }
        }
        Err(e) => {
            tracing::warn!(
                public_id = %public_id,
                error = %e,
                "asset cleanup failed, leaving asset on image host"
            );
            CleanupOutcome::Failed {
                public_id,
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every id it is asked to remove; ids in `fail` error out and
    /// ids in `missing` report not found.
    #[derive(Default)]
    struct RecordingRemover {
        calls: Mutex<Vec<String>>,
        fail: Vec<&'static str>,
        missing: Vec<&'static str>,
    }

    #[async_trait]
    impl AssetRemover for RecordingRemover {
        async fn remove(&self, public_id: &str) -> Result<DestroyOutcome, MediaError> {
            self.calls.lock().unwrap().push(public_id.to_owned());
            if self.fail.iter().any(|id| *id == public_id) {
                return Err(MediaError::Api {
                    status: 500,
                    message: "General Error".to_owned(),
                });
            }
            if self.missing.iter().any(|id| *id == public_id) {
                return Ok(DestroyOutcome::NotFound);
            }
            Ok(DestroyOutcome::Deleted)
        }
    }

    const AVATAR: &str =
        "https://res.cloudinary.com/demo/image/upload/v1712345678/avatars/user-42.png";

    #[tokio::test]
    async fn deletes_hosted_asset_by_extracted_id() {
        let remover = RecordingRemover::default();
        let outcome = remove_asset_best_effort(&remover, AVATAR).await;
        assert_eq!(
            outcome,
            CleanupOutcome::Deleted {
                public_id: "avatars/user-42".to_owned()
            }
        );
        assert_eq!(*remover.calls.lock().unwrap(), vec!["avatars/user-42"]);
    }

    #[tokio::test]
    async fn skips_local_path_without_calling_host() {
        let remover = RecordingRemover::default();
        let outcome = remove_asset_best_effort(&remover, "/upload/local/logo.png").await;
        assert!(matches!(outcome, CleanupOutcome::Skipped { .. }));
        assert!(remover.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_is_reported_not_raised() {
        let remover = RecordingRemover {
            fail: vec!["avatars/user-42"],
            ..RecordingRemover::default()
        };
        let outcome = remove_asset_best_effort(&remover, AVATAR).await;
        assert!(
            matches!(outcome, CleanupOutcome::Failed { ref public_id, .. } if public_id == "avatars/user-42"),
            "unexpected outcome: {outcome:?}"
        );
    }

    #[tokio::test]
    async fn purge_counts_every_outcome_and_dedupes_ids() {
        let remover = RecordingRemover {
            fail: vec!["shop/broken"],
            missing: vec!["shop/gone"],
            ..RecordingRemover::default()
        };
        let urls = [
            "https://res.cloudinary.com/demo/image/upload/v1/shop/a.jpg",
            // same asset, different delivery transformation
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto,w_800/v1/shop/a.jpg",
            "https://res.cloudinary.com/demo/image/upload/v1/shop/gone.jpg",
            "https://res.cloudinary.com/demo/image/upload/v1/shop/broken.jpg",
            "/static/local-logo.png",
            "",
        ];
        let report = purge_assets(&remover, urls, 2).await;

        assert_eq!(report.deleted, 1);
        assert_eq!(report.not_found, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.outcomes.len(), 5);
        assert!(!report.is_clean());

        let mut calls = remover.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec!["shop/a", "shop/broken", "shop/gone"]);
    }

    #[tokio::test]
    async fn purging_a_deleted_profile_targets_its_avatar() {
        let profile = blactify_core::ProfileRecord {
            id: uuid::Uuid::nil(),
            display_name: "Ama".to_owned(),
            avatar_url: Some(AVATAR.to_owned()),
            created_at: chrono::Utc::now(),
        };
        let remover = RecordingRemover::default();
        let report = purge_assets(&remover, profile.stored_asset_urls(), 4).await;
        assert_eq!(report.deleted, 1);
        assert_eq!(*remover.calls.lock().unwrap(), vec!["avatars/user-42"]);
    }

    #[tokio::test]
    async fn purge_with_zero_concurrency_still_runs() {
        let remover = RecordingRemover::default();
        let report = purge_assets(&remover, vec![AVATAR.to_owned()], 0).await;
        assert_eq!(report.deleted, 1);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn purge_of_nothing_is_clean() {
        let remover = RecordingRemover::default();
        let report = purge_assets(&remover, Vec::<String>::new(), 4).await;
        assert_eq!(report, CleanupReport::default());
    }
}
