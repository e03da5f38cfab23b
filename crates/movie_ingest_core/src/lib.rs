//! Shared movie ingestion domain primitives.
//!
//! This crate owns the notification/response contracts, CSV row parsing and
//! the error taxonomy. It intentionally excludes AWS SDK and Lambda runtime
//! concerns; those live in `movie_ingest_lambda`.

pub mod contract;
pub mod csv_rows;
pub mod error;

pub use contract::{MovieInfo, MovieRecord, StorageObjectNotification};
pub use csv_rows::CsvRow;
pub use error::IngestError;
