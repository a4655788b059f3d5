//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe
//! - `/candidates` → drafts, submission, verification, payment clearance,
//!   registration number reissue and bulk change actions
//! - `/enrollments` → series enrollment and de-enrollment
//! - `/results` → mark entry
//! - `/fees` → fee ledger rebuild
//! - `/series` → per-series statistics

use crate::routes::{
    candidates::candidates_routes, enrollments::enrollments_routes, fees::fees_routes,
    health::health_routes, results::results_routes, series::series_routes,
};
use axum::Router;
use util::state::AppState;

pub mod candidates;
pub mod enrollments;
pub mod fees;
pub mod health;
pub mod results;
pub mod series;

/// Builds the complete application router for all HTTP endpoints.
///
/// Every route group is mounted under its base path and the shared
/// `AppState` is attached, so the result can be nested or served directly.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/candidates", candidates_routes())
        .nest("/enrollments", enrollments_routes())
        .nest("/results", results_routes())
        .nest("/fees", fees_routes())
        .nest("/series", series_routes())
        .with_state(app_state)
}
