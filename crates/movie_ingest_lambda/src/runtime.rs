use lambda_runtime::Error;
use serde_json::Value;

use crate::adapters::movie_table::MovieTable;
use crate::adapters::object_store::ObjectSource;
use crate::handlers::ingest::handle_object_created;
use crate::handlers::lookup::{handle_gateway_request, is_gateway_event};

/// One Lambda invocation.
///
/// Gateway events are answered with a response envelope. Everything else is
/// an object-created notification; a failed ingest fails the invocation with
/// the underlying error and its 500 envelope is dropped.
pub fn handle_invocation(
    payload: &Value,
    source: &impl ObjectSource,
    table: &impl MovieTable,
) -> Result<Value, Error> {
    let response = if is_gateway_event(payload) {
        handle_gateway_request(payload, table)
    } else {
        handle_object_created(payload, source, table)?.response
    };

    serde_json::to_value(response)
        .map_err(|error| Error::from(format!("failed to serialize response: {error}")))
}
