use chrono::NaiveDate;

use crate::aggregate::aggregate_tests::FakeFetcher;
use crate::config::AppConfig;
use crate::models::{DateWindow, FacetSelection, SpeciesSelection};
use crate::pipeline::IngestPipeline;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn config() -> AppConfig {
    AppConfig {
        url_prefix: "https://bucket/".to_string(),
        ..AppConfig::default()
    }
}

fn occurrence_csv(date: &str) -> String {
    format!(
        ",Feeder Name,Species,Date Time\n\
         0,Deck Feeder,1 Cardinalis cardinalis (Northern Cardinal),{date} 06:15:00\n\
         1,Yard Feeder,37 Cyanocitta cristata (Blue Jay),{date} 07:30:00\n"
    )
}

fn message_csv(date: &str) -> String {
    format!(
        ",Feeder Name,Event Num,Message Type,Date Time,Message,Image Name\n\
         0,Deck Feeder,0,message,{date} 05:59:00,startup,\n\
         1,Deck Feeder,12,spotted,{date} 06:15:00,spotted 1 Cardinalis cardinalis (Northern Cardinal),{date}-06-15-001.gif\n"
    )
}

fn fetcher_for(dates: &[&str]) -> FakeFetcher {
    let mut fetcher = FakeFetcher::default();
    for date in dates {
        fetcher = fetcher
            .with(
                &format!("https://bucket/{date}web_occurrences.csv"),
                &occurrence_csv(date),
            )
            .with(
                &format!("https://bucket/{date}webstream.csv"),
                &message_csv(date),
            );
    }
    fetcher
}

#[test]
fn test_full_run_produces_tables_facets_and_colors() {
    let fetcher = fetcher_for(&["2024-05-02", "2024-05-01"]);
    let pipeline = IngestPipeline::new(config());
    let window = DateWindow::new(vec![d(2024, 5, 2), d(2024, 5, 1)]);

    let result = pipeline.run_with_window(&fetcher, window);

    assert_eq!(result.window.len(), 2);
    assert_eq!(result.occurrences.len(), 4);
    // heartbeats are gone
    assert_eq!(result.messages.len(), 2);
    assert_eq!(
        result.feeders,
        vec!["Deck Feeder".to_string(), "Yard Feeder".to_string()]
    );
    assert_eq!(
        result.species,
        vec!["Blue Jay".to_string(), "Northern Cardinal".to_string()]
    );
    assert!(result.colors.chart_color("Blue Jay").is_some());
    assert!(result.colors.chart_color("Northern Cardinal").is_some());
    assert!(!result.is_empty());
}

#[test]
fn test_date_failing_one_kind_is_pruned_everywhere() {
    // 2024-05-01 has an occurrence snapshot but no message snapshot
    let mut fetcher = fetcher_for(&["2024-05-02"]);
    fetcher = fetcher.with(
        "https://bucket/2024-05-01web_occurrences.csv",
        &occurrence_csv("2024-05-01"),
    );

    let pipeline = IngestPipeline::new(config());
    let window = DateWindow::new(vec![d(2024, 5, 2), d(2024, 5, 1)]);
    let result = pipeline.run_with_window(&fetcher, window);

    assert_eq!(result.window.dates(), &[d(2024, 5, 2)]);
    // occurrence rows for the dropped date were pruned after the message
    // pass discovered the failure
    assert!(result
        .occurrences
        .iter()
        .all(|r| r.date() == d(2024, 5, 2)));
    assert!(result.messages.iter().all(|r| r.date() == d(2024, 5, 2)));
}

#[test]
fn test_everything_failing_yields_well_typed_empty_result() {
    let pipeline = IngestPipeline::new(config());
    let window = DateWindow::new(vec![d(2024, 5, 2), d(2024, 5, 1)]);
    let result = pipeline.run_with_window(&FakeFetcher::default(), window);

    assert!(result.is_empty());
    assert!(result.occurrences.is_empty());
    assert!(result.messages.is_empty());
    assert!(result.feeders.is_empty());
    assert!(result.colors.names.is_empty());

    // Projections still expose the canonical schema for "no data" rendering
    assert_eq!(result.occurrences_dataframe().unwrap().get_column_names().len(), 6);
    assert_eq!(result.messages_dataframe().unwrap().get_column_names().len(), 7);
}

#[test]
fn test_result_filters_compose_with_selections() {
    let fetcher = fetcher_for(&["2024-05-02", "2024-05-01"]);
    let pipeline = IngestPipeline::new(config());
    let window = DateWindow::new(vec![d(2024, 5, 2), d(2024, 5, 1)]);
    let result = pipeline.run_with_window(&fetcher, window);

    let selection = FacetSelection {
        feeders: result.feeders.clone(),
        dates: vec![d(2024, 5, 2)],
        species: SpeciesSelection::Listed(vec!["Northern Cardinal".to_string()]),
        kind_labels: vec!["Animated".to_string()],
    };

    let occurrences = result.filter_occurrences(&selection);
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].common_name, "Northern Cardinal");

    let view = result.filter_messages(&selection).unwrap();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.image_names, vec!["2024-05-02-06-15-001.gif"]);
}

#[test]
fn test_colors_stable_between_runs_over_same_data() {
    let fetcher = fetcher_for(&["2024-05-01"]);
    let pipeline = IngestPipeline::new(config());

    let first = pipeline.run_with_window(&fetcher, DateWindow::new(vec![d(2024, 5, 1)]));
    let second = pipeline.run_with_window(&fetcher, DateWindow::new(vec![d(2024, 5, 1)]));
    assert_eq!(first.colors, second.colors);
}
