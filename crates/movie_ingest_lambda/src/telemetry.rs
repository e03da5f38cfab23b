use tracing_subscriber::EnvFilter;

use crate::config::{IngestConfig, LogFormat};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global subscriber. JSON lines by default so CloudWatch
/// Logs Insights can query the `component`/`event` fields.
pub fn init_tracing(config: &IngestConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_new(&config.log_filter)?;

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
    }
}
