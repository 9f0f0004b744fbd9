//! Faceted filtering over the merged tables.
//!
//! Every filter is a pure function of (records, selections); nothing here
//! mutates the tables. Predicates are independent conjunctions applied
//! feeder, then date (calendar-date portion only), then message kind (after
//! translating presentation labels), then species. The species predicate is
//! skipped entirely for the `All` sentinel.

#[cfg(test)]
mod filtering_tests;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Result;
use crate::models::{
    HistoryRecord, MessageKind, MessageRecord, OccurrenceRecord, SpeciesSelection,
    NO_IMAGE_SENTINEL,
};

/// Filtered message table plus the derived gallery inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub records: Vec<MessageRecord>,
    /// Raw `Image Name` values in table row order, sentinels included
    pub image_names: Vec<String>,
    /// Timestamps parallel to `image_names`
    pub timestamps: Vec<NaiveDateTime>,
}

/// Filter the occurrence table down to the selected feeders, dates and
/// species. Empty feeder or date selections select nothing.
pub fn filter_occurrences(
    records: &[OccurrenceRecord],
    feeders: &[String],
    dates: &[NaiveDate],
    species: &SpeciesSelection,
) -> Vec<OccurrenceRecord> {
    records
        .iter()
        .filter(|r| feeders.iter().any(|f| *f == r.feeder_name))
        .filter(|r| dates.contains(&r.date()))
        .filter(|r| species.includes(&r.common_name))
        .cloned()
        .collect()
}

/// Filter the message table and derive the ordered image-reference and
/// timestamp lists consumed by the gallery.
///
/// `kind_labels` are presentation-facing (`Animated` / `Static` / `message`);
/// an unmapped label is a contract violation and fails loudly.
pub fn filter_messages(
    records: &[MessageRecord],
    feeders: &[String],
    dates: &[NaiveDate],
    species: &SpeciesSelection,
    kind_labels: &[String],
) -> Result<MessageView> {
    let kinds = translate_kind_labels(kind_labels)?;

    let filtered: Vec<MessageRecord> = records
        .iter()
        .filter(|r| feeders.iter().any(|f| *f == r.feeder_name))
        .filter(|r| dates.contains(&r.date()))
        .filter(|r| kinds.contains(&r.kind))
        .filter(|r| species.includes(&r.common_name))
        .cloned()
        .collect();

    let image_names = filtered.iter().map(|r| r.image_name.clone()).collect();
    let timestamps = filtered.iter().map(|r| r.timestamp).collect();

    Ok(MessageView {
        records: filtered,
        image_names,
        timestamps,
    })
}

/// Translate presentation-facing kind labels into the internal vocabulary.
pub fn translate_kind_labels(labels: &[String]) -> Result<Vec<MessageKind>> {
    labels
        .iter()
        .map(|label| MessageKind::from_display_label(label))
        .collect()
}

/// Most recent qualifying image whose name contains the marker substring.
/// Scans front to back (the list is most recent first) and returns the first
/// match, or `None` when nothing qualifies.
pub fn latest_image_matching<'a>(image_names: &'a [String], marker: &str) -> Option<&'a str> {
    image_names
        .iter()
        .find(|name| name.contains(marker))
        .map(String::as_str)
}

/// First entry in the list that references an actual image, skipping empty
/// and `<NA>` sentinels.
pub fn first_displayable_image(image_names: &[String]) -> Option<&str> {
    image_names
        .iter()
        .find(|name| !name.is_empty() && name.as_str() != NO_IMAGE_SENTINEL)
        .map(String::as_str)
}

/// Trend rows with at least `min_count` observations, for legend decluttering.
pub fn filter_history_counts(records: &[HistoryRecord], min_count: i64) -> Vec<HistoryRecord> {
    records
        .iter()
        .filter(|r| r.count > min_count)
        .cloned()
        .collect()
}
