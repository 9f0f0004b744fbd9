//! Core domain models for feeder observation data.
//!
//! This module defines the record shapes produced by normalization, the rolling
//! date window that scopes which daily snapshots are loaded, and the facet
//! selection types consumed by the filter engine.

pub mod facets;
pub mod records;
pub mod window;

pub use facets::{FacetSelection, SpeciesSelection};
pub use records::{HistoryRecord, MessageKind, MessageRecord, OccurrenceRecord, NO_IMAGE_SENTINEL};
pub use window::DateWindow;
