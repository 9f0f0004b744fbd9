//! Facet selection types for the filter engine.
//!
//! The filter engine is a pure function of (tables, selections); the ambient
//! page state of earlier revisions is replaced by these explicit values.

use chrono::NaiveDate;

/// Species facet selection.
///
/// The two conventions seen in the original page variants ("All" sentinel in
/// the picker vs. empty list means unrestricted) are collapsed into one
/// explicit type: `All` skips the species predicate entirely, while
/// `Listed(..)` is a plain membership test where an empty list selects
/// nothing, consistent with the feeder and date facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesSelection {
    /// No species restriction
    All,
    /// Restrict to the listed common names; empty list excludes everything
    Listed(Vec<String>),
}

impl SpeciesSelection {
    pub fn includes(&self, common_name: &str) -> bool {
        match self {
            SpeciesSelection::All => true,
            SpeciesSelection::Listed(names) => names.iter().any(|n| n == common_name),
        }
    }
}

/// One full set of facet selections, as produced by the picker widgets.
///
/// Feeder and date selections are plain subsets where the empty set excludes
/// everything. Message kinds are presentation-facing labels
/// (`Animated` / `Static` / `message`) translated by the filter engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetSelection {
    pub feeders: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub species: SpeciesSelection,
    pub kind_labels: Vec<String>,
}

impl FacetSelection {
    /// Selection that includes every feeder and date currently known, all
    /// species, and the given kind labels. The usual page default.
    pub fn everything(feeders: Vec<String>, dates: Vec<NaiveDate>, kind_labels: Vec<String>) -> Self {
        Self {
            feeders,
            dates,
            species: SpeciesSelection::All,
            kind_labels,
        }
    }
}
