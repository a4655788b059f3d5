//! Routes for the `/api/enrollments` endpoint group.

use axum::{
    Router,
    routing::{delete, post},
};
use delete::{deenroll_bulk, deenroll_candidate};
use post::{enroll_bulk, enroll_candidate};
use util::state::AppState;

pub mod delete;
pub mod post;

/// Builds the `/enrollments` route group.
///
/// - `POST /enrollments` → `enroll_candidate`
/// - `POST /enrollments/bulk` → `enroll_bulk`
/// - `DELETE /enrollments/bulk` → `deenroll_bulk`
/// - `DELETE /enrollments/{candidate_id}/{series_id}` → `deenroll_candidate`
pub fn enrollments_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll_candidate))
        .route("/bulk", post(enroll_bulk))
        .route("/bulk", delete(deenroll_bulk))
        .route("/{candidate_id}/{series_id}", delete(deenroll_candidate))
}
