//! REST API routes for the web server.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::service::{BoardRequest, BoardResponse};

use super::error::ApiError;
use super::state::AppState;

/// Create the API router
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/boards", post(create_board))
        .route("/boards/:id", get(get_board))
        .route("/boards/:id/next", get(next_state))
        .route("/boards/:id/iterate/:iterations", get(state_after))
        .route("/boards/:id/final", get(final_state))
        .route("/health", get(health))
}

// --- Boards ---

async fn create_board(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BoardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BoardResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::field("body", &e.body_text()))?;
    let board = state.service.create_board(request).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

async fn get_board(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let id = path_param(path, "id")?;
    Ok(Json(state.service.get_board(id).await?))
}

async fn next_state(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let id = path_param(path, "id")?;
    Ok(Json(state.service.next_state(id).await?))
}

async fn state_after(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let (id, iterations) = path_param(path, "id")?;
    let id = parse_number(&id, "id")?;
    let iterations = parse_iterations(parse_number(&iterations, "iterations")?)?;
    Ok(Json(state.service.state_after(id, iterations).await?))
}

async fn final_state(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let id = path_param(path, "id")?;
    Ok(Json(state.service.final_state(id).await?))
}

/// Unparseable path segments are reported like any other field error
fn path_param<T>(path: Result<Path<T>, PathRejection>, field: &str) -> Result<T, ApiError> {
    path.map(|Path(value)| value)
        .map_err(|e| ApiError::field(field, &e.body_text()))
}

fn parse_number(raw: &str, field: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::field(field, &format!("Cannot parse \"{}\" as an integer", raw)))
}

/// The endpoint accepts 1 through `i32::MAX`
fn parse_iterations(iterations: i64) -> Result<u32, ApiError> {
    if iterations < 1 {
        return Err(ApiError::field("iterations", "must be greater than or equal to 1"));
    }
    if iterations > i64::from(i32::MAX) {
        return Err(ApiError::field(
            "iterations",
            &format!("must be less than or equal to {}", i32::MAX),
        ));
    }
    Ok(iterations as u32)
}

// --- Health ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::store::{BoardStore, MemoryStore};
    use crate::web::build_app;

    fn app() -> Router {
        let config = Config::default();
        let state = AppState::with_store(BoardStore::Memory(MemoryStore::new()), &config);
        build_app(Arc::new(state), &config)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_board(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/boards")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn blinker_body() -> String {
        json!({
            "initial_state": [
                [false, false, false],
                [true, true, true],
                [false, false, false]
            ],
            "name": "blinker"
        })
        .to_string()
    }

    #[test]
    fn test_parse_iterations() {
        assert_eq!(parse_iterations(1).unwrap(), 1);
        assert_eq!(parse_iterations(250).unwrap(), 250);
        assert_eq!(parse_iterations(i64::from(i32::MAX)).unwrap(), i32::MAX as u32);
        assert!(parse_iterations(0).is_err());
        assert!(parse_iterations(-3).is_err());
        assert!(parse_iterations(i64::from(i32::MAX) + 1).is_err());
        assert!(parse_iterations(i64::MAX).is_err());
    }

    #[tokio::test]
    async fn test_create_then_advance() {
        let app = app();

        let (status, created) = send(&app, post_board(&blinker_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["generation"], 0);
        assert_eq!(created["live_cell_count"], 3);
        assert_eq!(created["final_state"], false);

        let (status, next) = send(&app, get("/boards/1/next")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(next["id"], 2);
        assert_eq!(next["generation"], 1);
        assert_eq!(next["state"], json!([[false, true, false], [false, true, false], [false, true, false]]));

        let (status, later) = send(&app, get("/boards/1/iterate/4")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(later["generation"], 4);

        let (status, last) = send(&app, get("/boards/1/final")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(last["final_state"], true);
        assert_eq!(last["generation"], 2);

        let (status, fetched) = send(&app, get("/boards/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_ragged_rows() {
        let (status, body) = send(&app(), post_board(r#"{"initial_state": [[true, false], [true]]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation error");
        assert!(body["errors"]["initial_state"].is_string());
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let (status, body) = send(&app(), post_board("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["body"].is_string());
    }

    #[tokio::test]
    async fn test_iterate_zero_is_rejected() {
        let app = app();
        send(&app, post_board(&blinker_body())).await;

        let (status, body) = send(&app, get("/boards/1/iterate/0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["message"], "Validation error");
        assert!(body["timestamp"].is_string());
        assert_eq!(body["errors"]["iterations"], "must be greater than or equal to 1");
    }

    #[tokio::test]
    async fn test_unknown_board_is_not_found() {
        let (status, body) = send(&app(), get("/boards/99")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Could not find board with id: 99");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_unparseable_path_gets_json_error() {
        let app = app();
        let cases = [
            ("/boards/abc", "id"),
            ("/boards/abc/next", "id"),
            ("/boards/abc/final", "id"),
            ("/boards/abc/iterate/3", "id"),
            ("/boards/1/iterate/abc", "iterations"),
            ("/boards/1/iterate/99999999999", "iterations"),
        ];

        for (uri, field) in cases {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["status"], 400, "{}", uri);
            assert!(body["timestamp"].is_string(), "{}", uri);
            assert!(body["errors"][field].is_string(), "{}: {}", uri, body);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], crate::VERSION);
    }
}
