//! Remote snapshot access.
//!
//! The pipeline consumes snapshots through the [`SnapshotFetcher`] trait so
//! aggregation logic stays independent of transport; production uses the
//! blocking HTTP client, tests use an in-memory map.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Which daily snapshot file to fetch for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    /// Species-detection events (`<date>web_occurrences.csv`)
    Occurrences,
    /// Device message stream (`<date>webstream.csv`)
    Messages,
}

impl SnapshotKind {
    pub fn file_suffix(&self) -> &'static str {
        match self {
            SnapshotKind::Occurrences => "web_occurrences.csv",
            SnapshotKind::Messages => "webstream.csv",
        }
    }

    /// Remote location of this kind's snapshot for a date. The device
    /// concatenates prefix, date and file name with no separators.
    pub fn url_for(&self, url_prefix: &str, date: NaiveDate) -> String {
        format!("{}{}{}", url_prefix, date.format("%Y-%m-%d"), self.file_suffix())
    }
}

/// Remote location of the cumulative daily-count history.
pub fn history_url(url_prefix: &str) -> String {
    format!("{}daily_history.csv", url_prefix)
}

/// Fetch capability consumed by the aggregator.
///
/// A fetch either completes with the raw bytes or fails for that URL; the
/// caller decides what a failure means. Retry and backoff policy live behind
/// implementations, not in the pipeline.
pub trait SnapshotFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher for the production snapshot bucket.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::FetchFailed(format!("{}: {}", url, e)))?;

        // Any non-success status means "missing for this date"
        if !response.status().is_success() {
            return Err(Error::FetchNotFound(url.to_string()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::FetchFailed(format!("{}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_urls() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            SnapshotKind::Occurrences.url_for("https://bucket/", date),
            "https://bucket/2024-05-01web_occurrences.csv"
        );
        assert_eq!(
            SnapshotKind::Messages.url_for("https://bucket/", date),
            "https://bucket/2024-05-01webstream.csv"
        );
        assert_eq!(history_url("https://bucket/"), "https://bucket/daily_history.csv");
    }
}
