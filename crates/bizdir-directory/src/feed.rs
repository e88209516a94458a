//! Seam for the external record feed.
//!
//! The remote document store (fetch/subscribe, auth, offline mode) is an
//! external collaborator; this module only defines the trait the store
//! binds to, plus a file-backed implementation used by the CLI.

use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;

use bizdir_core::RawBusinessRecord;

use crate::store::{RecordStore, ReplaceOutcome};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read records from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse records from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A source that can deliver the full current set of raw business records.
///
/// Covers both transport styles the directory supports: a one-time bulk
/// fetch, and a push subscription that redelivers the complete set on every
/// change (the caller invokes [`sync_store`] per delivery).
pub trait RecordFeed {
    fn fetch_all(
        &self,
    ) -> impl Future<Output = Result<Vec<RawBusinessRecord>, FeedError>> + Send;
}

/// Reads a JSON array of raw business records from a file.
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordFeed for JsonFileFeed {
    async fn fetch_all(&self) -> Result<Vec<RawBusinessRecord>, FeedError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| FeedError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

/// One fetch-and-replace round: pulls the feed's current set into the store
/// and returns the replacement counts.
///
/// # Errors
///
/// Returns [`FeedError`] if the feed itself fails; individual malformed
/// records do not fail the sync, they are counted in the outcome.
pub async fn sync_store<F: RecordFeed>(
    feed: &F,
    store: &RecordStore,
) -> Result<ReplaceOutcome, FeedError> {
    let batch = feed.fetch_all().await?;
    let outcome = store.replace_all(batch);
    tracing::debug!(
        stored = outcome.stored,
        rejected = outcome.rejected,
        duplicates = outcome.duplicates,
        "record store synced from feed"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bizdir-feed-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write temp records file");
        path
    }

    #[tokio::test]
    async fn json_file_feed_loads_records() {
        let path = temp_file(
            "ok.json",
            r#"[
                {"id": "a", "name": "Joe's Diner", "category": "Food"},
                {"id": "b", "name": "ACME Store", "category": "Retail",
                 "latitude": -33.92, "longitude": 18.42}
            ]"#,
        );
        let feed = JsonFileFeed::new(&path);
        let records = feed.fetch_all().await.expect("feed should load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].latitude, Some(-33.92));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let feed = JsonFileFeed::new("/nonexistent/bizdir-records.json");
        let err = feed.fetch_all().await.unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error() {
        let path = temp_file("bad.json", "{not json");
        let feed = JsonFileFeed::new(&path);
        let err = feed.fetch_all().await.unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn sync_store_reports_rejections_without_failing() {
        let path = temp_file(
            "mixed.json",
            r#"[
                {"id": "a", "name": "Alpha"},
                {"name": "No Id"},
                {"id": "c", "name": "Gamma"}
            ]"#,
        );
        let feed = JsonFileFeed::new(&path);
        let store = RecordStore::new();
        let outcome = sync_store(&feed, &store).await.expect("sync should succeed");
        assert_eq!(outcome.stored, 2);
        assert_eq!(outcome.rejected, 1);
        assert_eq!(store.len(), 2);
        std::fs::remove_file(path).ok();
    }
}
