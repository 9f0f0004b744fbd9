//! Full ingestion pipeline: fetch, normalize, merge, derive facets.
//!
//! One run produces a self-contained [`IngestResult`]; nothing is cached or
//! shared across runs, and the presentation layer treats the result as
//! read-only.

#[cfg(test)]
mod pipeline_tests;

use polars::prelude::DataFrame;

use crate::aggregate::{distinct_values, load_daily_history, load_messages, load_occurrences};
use crate::colors::SpeciesColors;
use crate::config::AppConfig;
use crate::error::Result;
use crate::fetch::SnapshotFetcher;
use crate::filtering::{self, MessageView};
use crate::models::{
    DateWindow, FacetSelection, HistoryRecord, MessageRecord, OccurrenceRecord,
};
use crate::parsing::csv_parser;

/// Everything one full load produces: the canonical tables, the reduced date
/// window, the facet value sets and the per-pass color registry.
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub occurrences: Vec<OccurrenceRecord>,
    pub messages: Vec<MessageRecord>,
    pub history: Vec<HistoryRecord>,
    /// The date window after per-date failures reduced it
    pub window: DateWindow,
    /// Distinct feeder names observed across both tables, sorted
    pub feeders: Vec<String>,
    /// Distinct common names observed in the occurrence table, sorted
    pub species: Vec<String>,
    /// Color registry rebuilt for this pass
    pub colors: SpeciesColors,
}

impl IngestResult {
    /// Filter the occurrence table with the given selections.
    pub fn filter_occurrences(&self, selection: &FacetSelection) -> Vec<OccurrenceRecord> {
        filtering::filter_occurrences(
            &self.occurrences,
            &selection.feeders,
            &selection.dates,
            &selection.species,
        )
    }

    /// Filter the message table and derive the gallery inputs.
    pub fn filter_messages(&self, selection: &FacetSelection) -> Result<MessageView> {
        filtering::filter_messages(
            &self.messages,
            &selection.feeders,
            &selection.dates,
            &selection.species,
            &selection.kind_labels,
        )
    }

    /// Canonical DataFrame projection of the occurrence table.
    pub fn occurrences_dataframe(&self) -> Result<DataFrame> {
        csv_parser::occurrences_to_dataframe(&self.occurrences)
    }

    /// Canonical DataFrame projection of the message table.
    pub fn messages_dataframe(&self) -> Result<DataFrame> {
        csv_parser::messages_to_dataframe(&self.messages)
    }

    /// Canonical DataFrame projection of the daily history.
    pub fn history_dataframe(&self) -> Result<DataFrame> {
        csv_parser::history_to_dataframe(&self.history)
    }

    /// True when every date in the window failed; the page shows an explicit
    /// "no data" state instead of empty charts.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

/// The ingestion pipeline, parameterized by configuration.
pub struct IngestPipeline {
    config: AppConfig,
}

impl IngestPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run one full load over the default rolling window: today plus the
    /// preceding days, evaluated in the configured time zone.
    pub fn run(&self, fetcher: &dyn SnapshotFetcher) -> Result<IngestResult> {
        let tz = self.config.tz()?;
        let window = DateWindow::current(tz, self.config.window_days);
        Ok(self.run_with_window(fetcher, window))
    }

    /// Run one full load over an explicit window.
    pub fn run_with_window(
        &self,
        fetcher: &dyn SnapshotFetcher,
        mut window: DateWindow,
    ) -> IngestResult {
        let prefix = &self.config.url_prefix;

        let mut occurrences = load_occurrences(fetcher, prefix, &mut window, true);
        let mut messages = load_messages(fetcher, prefix, &mut window);

        // A date that failed for either kind is out of the window; prune
        // rows loaded before the failure was observed so tables and facet
        // pickers agree on the same reduced window.
        occurrences.retain(|r| window.contains(r.date()));
        messages.retain(|r| window.contains(r.date()));

        let colors = SpeciesColors::rebuild(occurrences.iter().map(|r| r.common_name.as_str()));
        let species = distinct_values(&occurrences, |r| r.common_name.as_str());

        let mut feeders = distinct_values(&occurrences, |r| r.feeder_name.as_str());
        feeders.extend(distinct_values(&messages, |r| r.feeder_name.as_str()));
        feeders.sort();
        feeders.dedup();

        let history = load_daily_history(fetcher, prefix, true);

        IngestResult {
            occurrences,
            messages,
            history,
            window,
            feeders,
            species,
            colors,
        }
    }
}
