//! Ingestion, normalization and faceted filtering core for bird feeder
//! observation snapshots.
//!
//! A remote feeder device publishes one CSV snapshot per calendar day for
//! each of two event streams: species detections (occurrences) and device
//! messages. This crate fetches the snapshots for a rolling date window,
//! tolerating missing days, normalizes them into two canonical in-memory
//! tables with derived fields (fractional hour of day, parsed common name),
//! and exposes pure faceted filters (feeder, date, species, message kind)
//! whose output feeds chart, table and image-gallery renderers. Rendering
//! itself, image retrieval and transport retry policy live outside this
//! crate.
//!
//! Typical use:
//!
//! ```no_run
//! use tweeters::config::AppConfig;
//! use tweeters::fetch::HttpFetcher;
//! use tweeters::pipeline::IngestPipeline;
//!
//! let pipeline = IngestPipeline::new(AppConfig::load_default());
//! let result = pipeline.run(&HttpFetcher::new()).expect("config error");
//! println!("{} occurrences over {} days", result.occurrences.len(), result.window.len());
//! ```

pub mod aggregate;
pub mod colors;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filtering;
pub mod models;
pub mod parsing;
pub mod pipeline;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::{IngestPipeline, IngestResult};
