//! AWS-oriented adapters and handlers for movie ingestion.
//!
//! This crate owns runtime integration details (Lambda handlers, S3 and
//! DynamoDB adapters, environment config, log setup). Parsing and contracts
//! come from `movie_ingest_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod runtime;
pub mod telemetry;
