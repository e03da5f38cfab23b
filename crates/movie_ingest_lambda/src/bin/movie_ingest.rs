use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use movie_ingest_lambda::adapters::dynamodb::DynamoMovieTable;
use movie_ingest_lambda::adapters::s3::S3ObjectSource;
use movie_ingest_lambda::config::IngestConfig;
use movie_ingest_lambda::runtime::handle_invocation;
use movie_ingest_lambda::telemetry::init_tracing;
use serde_json::Value;
use tracing::info;

struct RuntimeDependencies {
    object_source: S3ObjectSource,
    movie_table: DynamoMovieTable,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: Arc<RuntimeDependencies>,
) -> Result<Value, Error> {
    let (payload, _context) = event.into_parts();
    handle_invocation(&payload, &deps.object_source, &deps.movie_table)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = IngestConfig::from_env()?;
    init_tracing(&config)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = Arc::new(RuntimeDependencies {
        object_source: S3ObjectSource::new(aws_sdk_s3::Client::new(&aws_config)),
        movie_table: DynamoMovieTable::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name.clone(),
        ),
    });
    info!(
        component = "runtime",
        event = "runtime_initialised",
        table_name = %deps.movie_table.table_name(),
        "movie ingest runtime ready"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let deps = deps.clone();
        async move { handle_request(event, deps).await }
    }))
    .await
}
