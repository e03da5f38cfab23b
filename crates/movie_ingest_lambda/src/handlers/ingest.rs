use std::time::Instant;

use movie_ingest_core::contract::{
    first_notification, ingest_failure_response, ingest_success_response, ApiResponse,
};
use movie_ingest_core::csv_rows::{parse_row, split_object_lines};
use movie_ingest_core::{IngestError, StorageObjectNotification};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::adapters::movie_table::MovieTable;
use crate::adapters::object_store::ObjectSource;

#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub notification: StorageObjectNotification,
    pub rows_written: usize,
    pub response: ApiResponse,
}

/// A failed invocation.
///
/// `response` is the 500 envelope built for the caller; the runtime binary
/// propagates `error` instead, so the envelope never reaches a synchronous
/// invoker.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct IngestFailure {
    pub error: IngestError,
    pub response: ApiResponse,
}

pub fn handle_object_created(
    event: &Value,
    source: &impl ObjectSource,
    table: &impl MovieTable,
) -> Result<IngestOutcome, IngestFailure> {
    let notification = first_notification(event).map_err(|error| {
        error!(
            component = "ingest_handler",
            event = "invalid_notification",
            error = %error,
            "rejected object notification"
        );
        IngestFailure {
            error,
            response: ingest_failure_response(),
        }
    })?;

    let started_at = Instant::now();
    info!(
        component = "ingest_handler",
        event = "ingest_started",
        bucket = %notification.bucket,
        key = %notification.key,
        "ingesting object"
    );

    match ingest_rows(&notification, source, table) {
        Ok(rows_written) => {
            info!(
                component = "ingest_handler",
                event = "ingest_completed",
                bucket = %notification.bucket,
                key = %notification.key,
                rows_written,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "object ingested"
            );
            Ok(IngestOutcome {
                notification,
                rows_written,
                response: ingest_success_response(),
            })
        }
        Err(ingest_error) => {
            error!(
                component = "ingest_handler",
                event = "ingest_failed",
                stage = ingest_error.stage(),
                error = %ingest_error,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "Error getting object {} from bucket {}. Make sure they exist and your bucket is in the same region as this function.",
                notification.key,
                notification.bucket
            );
            Err(IngestFailure {
                error: ingest_error,
                response: ingest_failure_response(),
            })
        }
    }
}

/// Single pass over the object: the first failing line stops the run and
/// rows already written stay written.
fn ingest_rows(
    notification: &StorageObjectNotification,
    source: &impl ObjectSource,
    table: &impl MovieTable,
) -> Result<usize, IngestError> {
    let body = source
        .fetch_object(&notification.bucket, &notification.key)
        .map_err(|message| IngestError::Fetch {
            bucket: notification.bucket.clone(),
            key: notification.key.clone(),
            message,
        })?;

    let mut rows_written = 0usize;
    for (index, line) in split_object_lines(&body).into_iter().enumerate() {
        let record = parse_row(index + 1, line)?.into_record();
        table
            .put_movie(&record)
            .map_err(|message| IngestError::Write {
                movie_name: record.movie_name.clone(),
                message,
            })?;
        debug!(
            component = "ingest_handler",
            event = "row_written",
            line = index + 1,
            movie_name = %record.movie_name,
            "row written"
        );
        rows_written += 1;
    }

    Ok(rows_written)
}
