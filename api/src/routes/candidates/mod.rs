//! # Candidates Routes Module
//!
//! Routes for the `/api/candidates` endpoint group.
//!
//! ## Structure
//! - `get.rs`: fetch a candidate and its results
//! - `post.rs`: create drafts, submit, verify, decline, clear payment, bulk regenerate
//! - `put.rs`: bulk center/occupation/category changes
//!
//! Bulk endpoints never abort on a bad item; each response lists the ids that
//! succeeded and an `{id, error}` entry for each one that did not.

use axum::{
    Router,
    routing::{get, post, put},
};
use get::{get_candidate, get_candidate_results};
use post::{
    clear_payment, create_candidate, decline_candidate, regenerate_registration_numbers,
    submit_candidate, verify_candidate,
};
use put::{change_category, change_center, change_occupation};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/candidates` route group.
///
/// - `POST /candidates` → `create_candidate`
/// - `POST /candidates/regenerate-registration-numbers` → `regenerate_registration_numbers`
/// - `PUT /candidates/change-center` → `change_center`
/// - `PUT /candidates/change-occupation` → `change_occupation`
/// - `PUT /candidates/change-category` → `change_category`
/// - `GET /candidates/{candidate_id}` → `get_candidate`
/// - `GET /candidates/{candidate_id}/results` → `get_candidate_results`
/// - `POST /candidates/{candidate_id}/submit` → `submit_candidate`
/// - `POST /candidates/{candidate_id}/verify` → `verify_candidate`
/// - `POST /candidates/{candidate_id}/decline` → `decline_candidate`
/// - `POST /candidates/{candidate_id}/clear-payment` → `clear_payment`
pub fn candidates_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_candidate))
        .route(
            "/regenerate-registration-numbers",
            post(regenerate_registration_numbers),
        )
        .route("/change-center", put(change_center))
        .route("/change-occupation", put(change_occupation))
        .route("/change-category", put(change_category))
        .route("/{candidate_id}", get(get_candidate))
        .route("/{candidate_id}/results", get(get_candidate_results))
        .route("/{candidate_id}/submit", post(submit_candidate))
        .route("/{candidate_id}/verify", post(verify_candidate))
        .route("/{candidate_id}/decline", post(decline_candidate))
        .route("/{candidate_id}/clear-payment", post(clear_payment))
}
