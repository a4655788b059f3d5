use crate::response::{ApiResponse, error_response};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use util::state::AppState;

/// Builds the `/health` route group.
///
/// A single `GET /health` endpoint for load balancers and uptime probes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// Pings the database before answering.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": "OK",
///   "message": "Health check passed"
/// }
/// ```
/// - `503 Service Unavailable` when the database does not answer
async fn health_check(State(app_state): State<AppState>) -> Response {
    match app_state.db().ping().await {
        Ok(()) => Json(ApiResponse::success("OK", "Health check passed")).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health check failed: database unreachable");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Database unreachable")
        }
    }
}
