use crate::response::{ApiResponse, bulk_response, service_error, validation_error};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::enrollment;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct BulkDeenrollRequest {
    pub assessment_series_id: i64,
    #[validate(length(min = 1, message = "At least one candidate id is required"))]
    pub candidate_ids: Vec<i64>,
}

/// DELETE /api/enrollments/{candidate_id}/{series_id}
///
/// Removes the enrollment with its modules and papers, then refreshes the
/// candidate and center fee ledgers for the series.
///
/// ### Errors
/// - 404 Not Found: candidate is not enrolled in the series
pub async fn deenroll_candidate(
    State(app_state): State<AppState>,
    Path((candidate_id, series_id)): Path<(i64, i64)>,
) -> Response {
    match enrollment::deenroll_candidate(app_state.db(), candidate_id, series_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::success((), "Candidate de-enrolled successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// DELETE /api/enrollments/bulk
///
/// ### Request Body
/// ```json
/// { "assessment_series_id": 2, "candidate_ids": [1, 4] }
/// ```
pub async fn deenroll_bulk(
    State(app_state): State<AppState>,
    Json(req): Json<BulkDeenrollRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    let outcome =
        enrollment::deenroll_bulk(app_state.db(), req.assessment_series_id, &req.candidate_ids)
            .await;
    bulk_response(outcome, "De-enroll candidates")
}
