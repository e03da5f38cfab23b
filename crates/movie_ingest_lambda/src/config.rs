use movie_ingest_core::contract::DEFAULT_TABLE_NAME;
use thiserror::Error;

pub const TABLE_NAME_VAR: &str = "MOVIE_TABLE_NAME";
pub const LOG_FORMAT_VAR: &str = "MOVIE_INGEST_LOG_FORMAT";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(ConfigError::InvalidLogFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("MOVIE_TABLE_NAME must not be blank")]
    BlankTableName,
    #[error("MOVIE_INGEST_LOG_FORMAT must be 'json' or 'pretty', got '{0}'")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub table_name: String,
    pub log_format: LogFormat,
    pub log_filter: String,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unset variables fall back
    /// to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = match lookup(TABLE_NAME_VAR) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::BlankTableName),
            Some(value) => value.trim().to_string(),
            None => DEFAULT_TABLE_NAME.to_string(),
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::Json,
        };

        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            table_name,
            log_format,
            log_filter,
        })
    }
}
