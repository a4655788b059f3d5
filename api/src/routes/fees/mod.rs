use axum::{Router, routing::post};
use post::populate_fees;
use util::state::AppState;

pub mod post;

/// Builds the `/fees` route group.
///
/// - `POST /fees/populate` → `populate_fees`
pub fn fees_routes() -> Router<AppState> {
    Router::new().route("/populate", post(populate_fees))
}
