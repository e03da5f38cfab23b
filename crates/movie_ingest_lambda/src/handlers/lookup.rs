use movie_ingest_core::contract::{error_response, json_response, ApiResponse, PARTITION_KEY};
use movie_ingest_core::IngestError;
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::movie_table::MovieTable;

const MOVIES_PATH: &str = "/movies";

pub fn is_gateway_event(event: &Value) -> bool {
    event.get("httpMethod").and_then(Value::as_str).is_some()
}

/// Read-only movie lookup for REST gateway proxy events.
pub fn handle_gateway_request(event: &Value, table: &impl MovieTable) -> ApiResponse {
    let method = event
        .get("httpMethod")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_ascii_uppercase();
    if method != "GET" {
        return error_response(
            405,
            "method_not_allowed",
            &format!("{method} is not supported; use GET {MOVIES_PATH}/{{movieName}}"),
        );
    }

    let path = event.get("path").and_then(Value::as_str).unwrap_or("/");
    let movie_name = match resolve_movie_name(event, path) {
        Route::Movie(name) => name,
        Route::MissingName => {
            return error_response(
                400,
                "validation_error",
                "movieName is required as a path segment or query parameter",
            );
        }
        Route::Unknown => {
            return error_response(404, "not_found", &format!("no route for {path}"));
        }
    };

    match table.get_movie(&movie_name) {
        Ok(Some(record)) => {
            info!(
                component = "lookup_handler",
                event = "lookup_served",
                movie_name = %movie_name,
                found = true,
                "movie found"
            );
            json_response(200, record)
        }
        Ok(None) => {
            info!(
                component = "lookup_handler",
                event = "lookup_served",
                movie_name = %movie_name,
                found = false,
                "movie not found"
            );
            error_response(
                404,
                "not_found",
                &format!("no movie stored under {PARTITION_KEY} '{movie_name}'"),
            )
        }
        Err(message) => {
            let lookup_error = IngestError::Lookup {
                movie_name,
                message,
            };
            error!(
                component = "lookup_handler",
                event = "lookup_failed",
                error = %lookup_error,
                "movie lookup failed"
            );
            error_response(502, "lookup_failed", &lookup_error.to_string())
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Route {
    Movie(String),
    MissingName,
    Unknown,
}

/// Path parameters come pre-decoded from the gateway, so they win over the
/// raw path. A `/{proxy+}` resource only fills `pathParameters.proxy`.
fn resolve_movie_name(event: &Value, path: &str) -> Route {
    let path_parameters = event.get("pathParameters");
    let from_parameters = [path_parameters, event.get("queryStringParameters")]
        .into_iter()
        .flatten()
        .filter_map(|params| params.get(PARTITION_KEY))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|name| !name.is_empty());
    if let Some(name) = from_parameters {
        return Route::Movie(name.to_string());
    }

    let proxy = path_parameters
        .and_then(|params| params.get("proxy"))
        .and_then(Value::as_str);
    match proxy {
        Some(proxy) => route_from_path(&format!("/{}", proxy.trim_start_matches('/'))),
        None => route_from_path(path),
    }
}

fn route_from_path(path: &str) -> Route {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() || trimmed == MOVIES_PATH {
        return Route::MissingName;
    }

    match trimmed.strip_prefix(MOVIES_PATH).and_then(|rest| rest.strip_prefix('/')) {
        Some(name) if !name.is_empty() && !name.contains('/') => Route::Movie(name.to_string()),
        _ => Route::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use movie_ingest_core::{MovieInfo, MovieRecord};
    use serde_json::json;

    use super::*;

    struct StoredMovies {
        records: Vec<MovieRecord>,
        lookups: Mutex<Vec<String>>,
    }

    impl StoredMovies {
        fn with(records: Vec<MovieRecord>) -> Self {
            Self {
                records,
                lookups: Mutex::new(Vec::new()),
            }
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().expect("poisoned mutex").clone()
        }
    }

    impl MovieTable for StoredMovies {
        fn put_movie(&self, _record: &MovieRecord) -> Result<(), String> {
            Err("read-only fixture".to_string())
        }

        fn get_movie(&self, movie_name: &str) -> Result<Option<MovieRecord>, String> {
            self.lookups
                .lock()
                .expect("poisoned mutex")
                .push(movie_name.to_string());
            Ok(self
                .records
                .iter()
                .find(|record| record.movie_name == movie_name)
                .cloned())
        }
    }

    struct UnavailableTable;

    impl MovieTable for UnavailableTable {
        fn put_movie(&self, _record: &MovieRecord) -> Result<(), String> {
            Err("unavailable".to_string())
        }

        fn get_movie(&self, _movie_name: &str) -> Result<Option<MovieRecord>, String> {
            Err("ResourceNotFoundException".to_string())
        }
    }

    fn heat() -> MovieRecord {
        MovieRecord {
            movie_name: "Heat".to_string(),
            title: "1995".to_string(),
            info: MovieInfo {
                plot: "A heist crew".to_string(),
                rating: "8.3".to_string(),
            },
        }
    }

    #[test]
    fn detects_gateway_events() {
        assert!(is_gateway_event(&json!({"httpMethod": "GET", "path": "/"})));
        assert!(!is_gateway_event(&json!({"Records": []})));
    }

    #[test]
    fn returns_stored_movie_by_path_segment() {
        let table = StoredMovies::with(vec![heat()]);
        let response = handle_gateway_request(
            &json!({"httpMethod": "GET", "path": "/movies/Heat"}),
            &table,
        );

        assert_eq!(response.status_code, 200);
        let body: MovieRecord =
            serde_json::from_str(&response.body).expect("body should be a movie record");
        assert_eq!(body, heat());
    }

    #[test]
    fn prefers_decoded_path_parameters() {
        let table = StoredMovies::with(Vec::new());
        let response = handle_gateway_request(
            &json!({
                "httpMethod": "GET",
                "path": "/movies/The%20Matrix",
                "pathParameters": {"movieName": "The Matrix"}
            }),
            &table,
        );

        assert_eq!(response.status_code, 404);
        assert_eq!(table.lookups(), vec!["The Matrix"]);
    }

    #[test]
    fn reads_decoded_name_from_proxy_resource() {
        let matrix = MovieRecord {
            movie_name: "The Matrix".to_string(),
            title: "1999".to_string(),
            info: MovieInfo {
                plot: "Simulation".to_string(),
                rating: "8.7".to_string(),
            },
        };
        let table = StoredMovies::with(vec![matrix.clone()]);
        let response = handle_gateway_request(
            &json!({
                "resource": "/{proxy+}",
                "httpMethod": "GET",
                "path": "/movies/The%20Matrix",
                "pathParameters": {"proxy": "movies/The Matrix"}
            }),
            &table,
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(table.lookups(), vec!["The Matrix"]);
        let body: MovieRecord =
            serde_json::from_str(&response.body).expect("body should be a movie record");
        assert_eq!(body, matrix);
    }

    #[test]
    fn proxy_resource_outside_movies_is_not_found() {
        let table = StoredMovies::with(vec![heat()]);
        let response = handle_gateway_request(
            &json!({
                "resource": "/{proxy+}",
                "httpMethod": "GET",
                "path": "/reviews/Heat",
                "pathParameters": {"proxy": "reviews/Heat"}
            }),
            &table,
        );

        assert_eq!(response.status_code, 404);
        assert!(table.lookups().is_empty());
    }

    #[test]
    fn accepts_query_parameter() {
        let table = StoredMovies::with(vec![heat()]);
        let response = handle_gateway_request(
            &json!({
                "httpMethod": "get",
                "path": "/movies",
                "queryStringParameters": {"movieName": "Heat"}
            }),
            &table,
        );

        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn missing_name_is_a_validation_error() {
        let table = StoredMovies::with(vec![heat()]);
        let response =
            handle_gateway_request(&json!({"httpMethod": "GET", "path": "/movies/"}), &table);

        assert_eq!(response.status_code, 400);
        assert!(table.lookups().is_empty());
    }

    #[test]
    fn unknown_route_is_not_found() {
        let table = StoredMovies::with(vec![heat()]);
        let response = handle_gateway_request(
            &json!({"httpMethod": "GET", "path": "/movies/Heat/reviews"}),
            &table,
        );

        assert_eq!(response.status_code, 404);
        assert!(table.lookups().is_empty());
    }

    #[test]
    fn rejects_writes_through_the_gateway() {
        let table = StoredMovies::with(Vec::new());
        let response = handle_gateway_request(
            &json!({"httpMethod": "POST", "path": "/movies/Heat", "body": "{}"}),
            &table,
        );

        assert_eq!(response.status_code, 405);
        let body: Value = serde_json::from_str(&response.body).expect("body should be json");
        assert_eq!(body["error"], "method_not_allowed");
    }

    #[test]
    fn table_failure_maps_to_bad_gateway() {
        let response = handle_gateway_request(
            &json!({"httpMethod": "GET", "path": "/movies/Heat"}),
            &UnavailableTable,
        );

        assert_eq!(response.status_code, 502);
        assert!(response.body.contains("ResourceNotFoundException"));
    }
}
