use crate::response::{bulk_response, validation_error};
use crate::routes::candidates::common::{
    ChangeCategoryRequest, ChangeCenterRequest, ChangeOccupationRequest,
};
use axum::{Json, extract::State, response::Response};
use services::registration;
use util::state::AppState;
use validator::Validate;

/// PUT /api/candidates/change-center
///
/// Moves candidates to another assessment center (and optionally one of its
/// branches). Submitted candidates get a fresh registration number and payment
/// code; fee ledgers of both centers are refreshed.
///
/// ### Request Body
/// ```json
/// { "candidate_ids": [1, 2], "assessment_center_id": 3, "assessment_center_branch_id": null }
/// ```
pub async fn change_center(
    State(app_state): State<AppState>,
    Json(req): Json<ChangeCenterRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    let outcome = registration::change_center_bulk(
        app_state.db(),
        &req.candidate_ids,
        req.assessment_center_id,
        req.assessment_center_branch_id,
    )
    .await;
    bulk_response(outcome, "Change center")
}

/// PUT /api/candidates/change-occupation
///
/// ### Request Body
/// ```json
/// { "candidate_ids": [1, 2], "occupation_id": 4 }
/// ```
pub async fn change_occupation(
    State(app_state): State<AppState>,
    Json(req): Json<ChangeOccupationRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    let outcome =
        registration::change_occupation_bulk(app_state.db(), &req.candidate_ids, req.occupation_id)
            .await;
    bulk_response(outcome, "Change occupation")
}

/// PUT /api/candidates/change-category
///
/// Candidates that already hold an enrollment are reported as failed.
///
/// ### Request Body
/// ```json
/// { "candidate_ids": [1, 2], "registration_category": "modular" }
/// ```
pub async fn change_category(
    State(app_state): State<AppState>,
    Json(req): Json<ChangeCategoryRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    let outcome = registration::change_category_bulk(
        app_state.db(),
        &req.candidate_ids,
        req.registration_category,
    )
    .await;
    bulk_response(outcome, "Change category")
}
