use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::IngestError;

pub const DEFAULT_TABLE_NAME: &str = "movieDetails";
pub const PARTITION_KEY: &str = "movieName";
pub const S3_EVENT_SOURCE: &str = "aws:s3";

pub const INGEST_SUCCESS_MESSAGE: &str = "Hello from Lambda! Completed inserting data into db";
pub const INGEST_FAILURE_MESSAGE: &str = "Failed to insert data into db";

/// Bucket and key of one created object, taken from a storage notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageObjectNotification {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationRecord {
    #[serde(rename = "eventSource", default)]
    event_source: Option<String>,
    s3: NotificationEntity,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationEntity {
    bucket: NamedBucket,
    object: KeyedObject,
}

#[derive(Debug, Clone, Deserialize)]
struct NamedBucket {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct KeyedObject {
    key: String,
}

/// The persisted movie item.
///
/// Field names match the table attributes exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "movieName")]
    pub movie_name: String,
    pub title: String,
    pub info: MovieInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub plot: String,
    pub rating: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Reads the bucket and key of `Records[0]`.
///
/// Any further records in the same notification are ignored. The object key
/// is returned exactly as delivered, without URL-decoding.
pub fn first_notification(event: &Value) -> Result<StorageObjectNotification, IngestError> {
    let Some(records) = event.get("Records").and_then(Value::as_array) else {
        return Err(IngestError::InvalidEvent(
            "event has no Records array".to_string(),
        ));
    };

    let Some(first) = records.first() else {
        return Err(IngestError::InvalidEvent(
            "event Records array is empty".to_string(),
        ));
    };

    let record = NotificationRecord::deserialize(first)
        .map_err(|error| IngestError::InvalidEvent(format!("malformed record: {error}")))?;

    if let Some(source) = record.event_source.as_deref() {
        if source != S3_EVENT_SOURCE {
            return Err(IngestError::InvalidEvent(format!(
                "unexpected event source '{source}'"
            )));
        }
    }

    Ok(StorageObjectNotification {
        bucket: record.s3.bucket.name,
        key: record.s3.object.key,
    })
}

pub fn ingest_success_response() -> ApiResponse {
    message_response(200, INGEST_SUCCESS_MESSAGE)
}

pub fn ingest_failure_response() -> ApiResponse {
    message_response(500, INGEST_FAILURE_MESSAGE)
}

/// Envelope whose body is a JSON string literal.
pub fn message_response(status_code: u16, message: &str) -> ApiResponse {
    ApiResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: Value::from(message).to_string(),
    }
}

pub fn json_response(status_code: u16, payload: impl Serialize) -> ApiResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiResponse {
            status_code,
            headers: json!({"Content-Type": "application/json"}),
            body,
        },
        Err(error) => error_response(500, "serialization_error", &error.to_string()),
    }
}

pub fn error_response(status_code: u16, error: &str, message: &str) -> ApiResponse {
    ApiResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: json!({
            "error": error,
            "message": message,
        })
        .to_string(),
    }
}
