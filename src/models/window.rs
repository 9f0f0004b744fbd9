//! Rolling date window over the daily snapshots in scope.

use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Ordered list of calendar dates (most recent first) whose snapshots are in
/// scope for one session view.
///
/// The window shrinks as the aggregator discovers missing or unusable
/// snapshots; every downstream consumer (tables, facet pickers) sees the same
/// reduced window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    dates: Vec<NaiveDate>,
}

impl DateWindow {
    /// Build a window from an explicit date list, most recent first.
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self { dates }
    }

    /// Build the default rolling window: today plus the preceding
    /// `days - 1` calendar days, evaluated in the given fixed time zone so
    /// day boundaries do not depend on where the pipeline runs.
    pub fn current(tz: Tz, days: u32) -> Self {
        let today = Utc::now().with_timezone(&tz).date_naive();
        let dates = (0..days.max(1) as i64)
            .map(|offset| today - Duration::days(offset))
            .collect();
        Self { dates }
    }

    /// Dates currently in scope, most recent first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Remove a date whose snapshot turned out to be missing or unusable.
    pub fn remove(&mut self, date: NaiveDate) {
        self.dates.retain(|d| *d != date);
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `YYYY-MM-DD` labels for the date facet picker.
    pub fn labels(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect()
    }
}
