//! Multi-day snapshot aggregation.
//!
//! One generic fetch-per-date routine drives both snapshot kinds: for every
//! date in the window, most recent first, fetch and normalize; a missing or
//! malformed snapshot removes that date from the shared window and the loop
//! continues with the next date. Later dates are never skipped because an
//! earlier one failed. When every date fails the result is simply empty, and
//! the canonical column set is preserved by the record-to-DataFrame
//! projections downstream.


use std::collections::BTreeSet;

use log::{info, warn};
use polars::prelude::DataFrame;

use crate::colors;
use crate::error::Result;
use crate::fetch::{history_url, SnapshotFetcher, SnapshotKind};
use crate::models::{DateWindow, HistoryRecord, MessageRecord, OccurrenceRecord};
use crate::parsing::csv_parser;

/// Fetch, parse and normalize one kind of snapshot for every date in the
/// window, reducing the window in place as dates fail.
pub fn aggregate_snapshots<T, F>(
    fetcher: &dyn SnapshotFetcher,
    url_prefix: &str,
    window: &mut DateWindow,
    kind: SnapshotKind,
    normalize: F,
) -> Vec<T>
where
    F: Fn(&DataFrame) -> Result<Vec<T>>,
{
    let mut merged = Vec::new();
    for date in window.dates().to_vec() {
        let url = kind.url_for(url_prefix, date);
        match load_one(fetcher, &url, &normalize) {
            Ok(rows) => {
                info!("loaded {} rows from {}", rows.len(), url);
                merged.extend(rows);
            }
            Err(err) => {
                warn!("dropping {} from the date window: {}", date, err);
                window.remove(date);
            }
        }
    }
    merged
}

fn load_one<T, F>(fetcher: &dyn SnapshotFetcher, url: &str, normalize: &F) -> Result<Vec<T>>
where
    F: Fn(&DataFrame) -> Result<Vec<T>>,
{
    let bytes = fetcher.fetch(url)?;
    let df = csv_parser::parse_snapshot_csv(bytes)?;
    normalize(&df)
}

/// Load and merge the occurrence snapshots for the window.
///
/// `drop_unreliable_species` removes rows whose common name is on the
/// unreliable-species exclusion list (legacy model artifacts); the default
/// pipeline keeps it on.
pub fn load_occurrences(
    fetcher: &dyn SnapshotFetcher,
    url_prefix: &str,
    window: &mut DateWindow,
    drop_unreliable_species: bool,
) -> Vec<OccurrenceRecord> {
    let mut records = aggregate_snapshots(
        fetcher,
        url_prefix,
        window,
        SnapshotKind::Occurrences,
        csv_parser::dataframe_to_occurrences,
    );
    if drop_unreliable_species {
        records.retain(|r| !colors::is_unreliable(&r.common_name));
    }
    // No default sort: trend views sort explicitly by their plotting key
    records
}

/// Load and merge the message snapshots for the window.
///
/// Heartbeat rows (event number zero) are dropped and the merged table is
/// sorted by timestamp descending, the canonical display order.
pub fn load_messages(
    fetcher: &dyn SnapshotFetcher,
    url_prefix: &str,
    window: &mut DateWindow,
) -> Vec<MessageRecord> {
    let mut records = aggregate_snapshots(
        fetcher,
        url_prefix,
        window,
        SnapshotKind::Messages,
        csv_parser::dataframe_to_messages,
    );
    records.retain(|r| !r.is_heartbeat());
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}

/// Load the cumulative daily-count history, sorted by day key ascending.
///
/// The history file is a single cumulative snapshot, not per-date; complete
/// absence is a valid empty result, never an error.
pub fn load_daily_history(
    fetcher: &dyn SnapshotFetcher,
    url_prefix: &str,
    drop_unreliable_species: bool,
) -> Vec<HistoryRecord> {
    let url = history_url(url_prefix);
    let mut records = match load_one(fetcher, &url, &csv_parser::dataframe_to_history) {
        Ok(rows) => rows,
        Err(err) => {
            info!("no daily history available: {}", err);
            return Vec::new();
        }
    };
    if drop_unreliable_species {
        records.retain(|r| !colors::is_unreliable(&r.common_name));
    }
    records.sort_by(|a, b| a.day_key.cmp(&b.day_key));
    records
}

/// Distinct values of one string field across a record set, sorted.
/// Used to derive the feeder and species facet value sets post-merge.
pub fn distinct_values<T, F>(records: &[T], field: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    let set: BTreeSet<&str> = records.iter().map(|r| field(r)).collect();
    set.into_iter().map(str::to_string).collect()
}
