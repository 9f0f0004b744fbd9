//! Error types for the ingestion and filtering pipeline.

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Snapshot is absent at the remote location. Expected per-date condition,
    /// recovered by dropping the date from the window.
    #[error("Snapshot not found: {0}")]
    FetchNotFound(String),

    /// Transport-level fetch failure. Treated the same as a missing snapshot
    /// for the affected date.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Malformed snapshot contents: missing columns, bad values, unparseable
    /// timestamps. Marks the whole date as unusable.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A presentation-facing message-kind label with no internal mapping.
    /// Programming or configuration error, never swallowed.
    #[error("Unmapped message-kind label: {0}")]
    UnmappedKindLabel(String),

    /// Configuration file or value error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<polars::prelude::PolarsError> for Error {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Error::Schema(err.to_string())
    }
}
