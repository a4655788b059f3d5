//! # Candidate Lifecycle Routes
//!
//! - `POST /api/candidates`: save a draft
//! - `POST /api/candidates/{id}/submit`: assign registration number and payment code
//! - `POST /api/candidates/{id}/verify` and `/decline`: verification outcome
//! - `POST /api/candidates/{id}/clear-payment`: record a payment clearance
//! - `POST /api/candidates/regenerate-registration-numbers`: bulk reissue

use crate::response::{ApiResponse, bulk_response, service_error, validation_error};
use crate::routes::candidates::common::{
    CandidateIdsRequest, CandidateResponse, ClearPaymentRequest, DeclineRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::{candidates, candidates::CreateCandidate, registration};
use util::state::AppState;
use validator::Validate;

fn candidate_ok(status: StatusCode, candidate: db::models::candidate::Model, msg: &str) -> Response {
    (
        status,
        Json(ApiResponse::success(CandidateResponse::from(candidate), msg)),
    )
        .into_response()
}

/// POST /api/candidates
///
/// ### Request Body
/// ```json
/// {
///   "full_name": "Nakato Sarah",
///   "gender": "female",
///   "registration_category": "formal",
///   "assessment_center_id": 2,
///   "occupation_id": 1,
///   "entry_year": 2025,
///   "intake": "M",
///   "candidate_country": "UG"
/// }
/// ```
///
/// ### Response: 201 Created
/// The draft candidate. `registration_number` stays null until submission.
///
/// ### Errors
/// - 400 Bad Request: validation failure or a branch outside the center
/// - 404 Not Found: unknown center, branch or occupation
pub async fn create_candidate(
    State(app_state): State<AppState>,
    Json(req): Json<CreateCandidate>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    match candidates::create_candidate(app_state.db(), req).await {
        Ok(c) => candidate_ok(StatusCode::CREATED, c, "Candidate created successfully"),
        Err(e) => service_error(e),
    }
}

/// POST /api/candidates/{candidate_id}/submit
///
/// Submits a draft. The registration number is allocated against every
/// number already issued in the same center, occupation, entry year and
/// intake; the payment code is derived from the center number, entry year and
/// candidate id.
///
/// ### Errors
/// - 400 Bad Request: center, occupation, entry year or intake missing
/// - 404 Not Found: unknown candidate
/// - 409 Conflict: already submitted
pub async fn submit_candidate(
    State(app_state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Response {
    match registration::submit_candidate(app_state.db(), candidate_id).await {
        Ok(c) => candidate_ok(StatusCode::OK, c, "Candidate submitted successfully"),
        Err(e) => service_error(e),
    }
}

/// POST /api/candidates/{candidate_id}/verify
///
/// ### Errors
/// - 404 Not Found: unknown candidate
/// - 409 Conflict: candidate not yet submitted
pub async fn verify_candidate(
    State(app_state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Response {
    match candidates::verify_candidate(app_state.db(), candidate_id).await {
        Ok(c) => candidate_ok(StatusCode::OK, c, "Candidate verified successfully"),
        Err(e) => service_error(e),
    }
}

/// POST /api/candidates/{candidate_id}/decline
///
/// ### Request Body
/// ```json
/// { "reason": "Photo does not match the national ID" }
/// ```
pub async fn decline_candidate(
    State(app_state): State<AppState>,
    Path(candidate_id): Path<i64>,
    Json(req): Json<DeclineRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    match candidates::decline_candidate(app_state.db(), candidate_id, &req.reason).await {
        Ok(c) => candidate_ok(StatusCode::OK, c, "Candidate declined"),
        Err(e) => service_error(e),
    }
}

/// POST /api/candidates/{candidate_id}/clear-payment
///
/// ### Request Body
/// ```json
/// { "amount": 100000, "cleared_on": "2025-03-14" }
/// ```
/// Both fields are optional; without `amount` every outstanding fee is
/// treated as paid in full. Candidate and center fee ledgers are refreshed.
pub async fn clear_payment(
    State(app_state): State<AppState>,
    Path(candidate_id): Path<i64>,
    Json(req): Json<ClearPaymentRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    match candidates::clear_payment(app_state.db(), candidate_id, req.amount, req.cleared_on)
        .await
    {
        Ok(c) => candidate_ok(StatusCode::OK, c, "Payment cleared successfully"),
        Err(e) => service_error(e),
    }
}

/// POST /api/candidates/regenerate-registration-numbers
///
/// ### Request Body
/// ```json
/// { "candidate_ids": [4, 5, 6] }
/// ```
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": { "succeeded": [4, 5], "failed": [{ "id": 6, "error": "Candidate 6 not found" }] },
///   "message": "Regenerate registration numbers: 2 succeeded, 1 failed"
/// }
/// ```
pub async fn regenerate_registration_numbers(
    State(app_state): State<AppState>,
    Json(req): Json<CandidateIdsRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    let outcome =
        registration::regenerate_registration_numbers(app_state.db(), &req.candidate_ids).await;
    bulk_response(outcome, "Regenerate registration numbers")
}
