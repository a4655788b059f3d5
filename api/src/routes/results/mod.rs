use axum::{Router, routing::post};
use post::record_result;
use util::state::AppState;

pub mod post;

/// Builds the `/results` route group.
///
/// - `POST /results` → `record_result`
///
/// Reading results lives under `/candidates/{candidate_id}/results`.
pub fn results_routes() -> Router<AppState> {
    Router::new().route("/", post(record_result))
}
