use api::routes::routes;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header},
    response::Response,
};
use db::test_utils::setup_test_db;
use serde_json::Value;
use util::state::AppState;

/// Router over a fresh, migrated in-memory database, mounted the same way
/// `main` mounts it.
pub async fn make_test_app() -> (Router, AppState) {
    let app_state = AppState::new(setup_test_db().await);
    let router = Router::new().nest("/api", routes(app_state.clone()));
    (router, app_state)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
