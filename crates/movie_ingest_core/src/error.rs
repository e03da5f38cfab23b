use thiserror::Error;

/// Every way an ingest invocation can fail.
///
/// The handler collapses all variants into a single failure path; the
/// variants only exist so logs say which stage broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("invalid object notification: {0}")]
    InvalidEvent(String),

    #[error("failed to fetch s3://{bucket}/{key}: {message}")]
    Fetch {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("line {line} is not valid UTF-8")]
    Decode { line: usize },

    #[error("line {line} has {fields} comma-separated field(s), expected at least 4")]
    MalformedRow { line: usize, fields: usize },

    #[error("failed to write movie '{movie_name}': {message}")]
    Write { movie_name: String, message: String },

    #[error("failed to look up movie '{movie_name}': {message}")]
    Lookup { movie_name: String, message: String },
}

impl IngestError {
    /// Short machine-readable stage name used in structured logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidEvent(_) => "event",
            Self::Fetch { .. } => "fetch",
            Self::Decode { .. } | Self::MalformedRow { .. } => "parse",
            Self::Write { .. } => "write",
            Self::Lookup { .. } => "lookup",
        }
    }
}
