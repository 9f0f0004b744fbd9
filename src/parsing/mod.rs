//! Parsers and normalizers for daily snapshot data.
//!
//! Raw snapshots arrive as CSV bytes. [`csv_parser`] turns them into polars
//! DataFrames and then into the canonical typed records, deriving the
//! timestamp fields and the parsed common name along the way. [`species`]
//! holds the common-name extraction shared by species labels and free-text
//! messages.

pub mod csv_parser;
pub mod species;


pub use species::common_name;
