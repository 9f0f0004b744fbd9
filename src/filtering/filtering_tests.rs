use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Error;
use crate::filtering::{
    filter_history_counts, filter_messages, filter_occurrences, first_displayable_image,
    latest_image_matching, translate_kind_labels,
};
use crate::models::{HistoryRecord, MessageKind, MessageRecord, OccurrenceRecord, SpeciesSelection};
use crate::parsing::species::common_name;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn occurrence(feeder: &str, label: &str, stamp: &str) -> OccurrenceRecord {
    let timestamp = ts(stamp);
    OccurrenceRecord {
        feeder_name: feeder.to_string(),
        species: label.to_string(),
        timestamp,
        hour: 0.0,
        day_hour: 0.0,
        common_name: common_name(label),
    }
}

fn message(feeder: &str, kind: MessageKind, stamp: &str, body: &str, image: &str) -> MessageRecord {
    MessageRecord {
        feeder_name: feeder.to_string(),
        event_num: 1,
        kind,
        timestamp: ts(stamp),
        message: body.to_string(),
        image_name: image.to_string(),
        common_name: common_name(body),
    }
}

fn sample_occurrences() -> Vec<OccurrenceRecord> {
    vec![
        occurrence(
            "Deck Feeder",
            "1 Cardinalis cardinalis (Northern Cardinal)",
            "2024-05-01 06:15:00",
        ),
        occurrence(
            "Deck Feeder",
            "37 Cyanocitta cristata (Blue Jay)",
            "2024-05-02 07:30:00",
        ),
        occurrence(
            "Yard Feeder",
            "1 Cardinalis cardinalis (Northern Cardinal)",
            "2024-05-02 08:00:00",
        ),
    ]
}

fn sample_messages() -> Vec<MessageRecord> {
    vec![
        message(
            "Deck Feeder",
            MessageKind::Spotted,
            "2024-05-02 08:00:00",
            "spotted 1 Cardinalis cardinalis (Northern Cardinal)",
            "c.jpg",
        ),
        message(
            "Deck Feeder",
            MessageKind::Spotted,
            "2024-05-02 07:00:00",
            "spotted 37 Cyanocitta cristata (Blue Jay)",
            "b.gif",
        ),
        message(
            "Deck Feeder",
            MessageKind::Possible,
            "2024-05-01 06:30:00",
            "possible 37 Cyanocitta cristata (Blue Jay)",
            "<NA>",
        ),
        message(
            "Yard Feeder",
            MessageKind::Message,
            "2024-05-01 06:00:00",
            "seed level low",
            "a.jpg",
        ),
    ]
}

fn all_feeders() -> Vec<String> {
    vec!["Deck Feeder".to_string(), "Yard Feeder".to_string()]
}

fn all_dates() -> Vec<NaiveDate> {
    vec![d(2024, 5, 2), d(2024, 5, 1)]
}

#[test]
fn test_empty_feeder_selection_selects_nothing() {
    let records = sample_occurrences();
    let out = filter_occurrences(&records, &[], &all_dates(), &SpeciesSelection::All);
    assert!(out.is_empty());
}

#[test]
fn test_species_all_matches_unfiltered_count() {
    let records = sample_occurrences();
    let all = filter_occurrences(&records, &all_feeders(), &all_dates(), &SpeciesSelection::All);
    assert_eq!(all.len(), records.len());
}

#[test]
fn test_empty_listed_species_selects_nothing() {
    let records = sample_occurrences();
    let out = filter_occurrences(
        &records,
        &all_feeders(),
        &all_dates(),
        &SpeciesSelection::Listed(Vec::new()),
    );
    assert!(out.is_empty());
}

#[test]
fn test_date_predicate_compares_calendar_date_only() {
    let records = sample_occurrences();
    // Two events on 2024-05-02 at different times of day
    let out = filter_occurrences(
        &records,
        &all_feeders(),
        &[d(2024, 5, 2)],
        &SpeciesSelection::All,
    );
    assert_eq!(out.len(), 2);
}

#[test]
fn test_species_membership() {
    let records = sample_occurrences();
    let out = filter_occurrences(
        &records,
        &all_feeders(),
        &all_dates(),
        &SpeciesSelection::Listed(vec!["Blue Jay".to_string()]),
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].common_name, "Blue Jay");
}

#[test]
fn test_message_kind_translation() {
    let kinds = translate_kind_labels(&["Animated".to_string(), "Static".to_string()]).unwrap();
    assert_eq!(kinds, vec![MessageKind::Spotted, MessageKind::Possible]);
}

#[test]
fn test_unmapped_kind_label_fails_loudly() {
    let err = filter_messages(
        &sample_messages(),
        &all_feeders(),
        &all_dates(),
        &SpeciesSelection::All,
        &["Animted".to_string()],
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnmappedKindLabel(label) if label == "Animted"));
}

#[test]
fn test_filter_messages_by_kind() {
    let view = filter_messages(
        &sample_messages(),
        &all_feeders(),
        &all_dates(),
        &SpeciesSelection::All,
        &["Animated".to_string()],
    )
    .unwrap();
    assert_eq!(view.records.len(), 2);
    assert!(view
        .records
        .iter()
        .all(|r| r.kind == MessageKind::Spotted));
}

#[test]
fn test_image_and_timestamp_lists_parallel_and_ordered() {
    let view = filter_messages(
        &sample_messages(),
        &all_feeders(),
        &all_dates(),
        &SpeciesSelection::All,
        &["Animated".to_string(), "Static".to_string(), "message".to_string()],
    )
    .unwrap();

    // Sentinels stay in the list, order follows the table
    assert_eq!(view.image_names, vec!["c.jpg", "b.gif", "<NA>", "a.jpg"]);
    assert_eq!(view.timestamps.len(), view.image_names.len());
    assert_eq!(view.timestamps[0], ts("2024-05-02 08:00:00"));
}

#[test]
fn test_latest_image_matching_marker() {
    let names: Vec<String> = ["a.jpg", "<NA>", "b.gif", "c.jpg"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(latest_image_matching(&names, ".gif"), Some("b.gif"));
    assert_eq!(latest_image_matching(&names, ".png"), None);
}

#[test]
fn test_first_displayable_image_skips_sentinels() {
    let names: Vec<String> = ["", "<NA>", "b.gif"].iter().map(|s| s.to_string()).collect();
    assert_eq!(first_displayable_image(&names), Some("b.gif"));
    assert_eq!(first_displayable_image(&[]), None);
}

#[test]
fn test_history_count_threshold_is_exclusive() {
    let records = vec![
        HistoryRecord {
            year: 2023,
            month: 5,
            day: 9,
            common_name: "Northern Cardinal".to_string(),
            count: 1,
            day_key: d(2023, 5, 9),
        },
        HistoryRecord {
            year: 2023,
            month: 5,
            day: 9,
            common_name: "Blue Jay".to_string(),
            count: 4,
            day_key: d(2023, 5, 9),
        },
    ];
    let out = filter_history_counts(&records, 1);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].common_name, "Blue Jay");
}
