use axum::{Router, routing::get};
use get::get_series_statistics;
use util::state::AppState;

pub mod get;

/// Builds the `/series` route group.
///
/// - `GET /series/{series_id}/statistics` → `get_series_statistics`
pub fn series_routes() -> Router<AppState> {
    Router::new().route("/{series_id}/statistics", get(get_series_statistics))
}
