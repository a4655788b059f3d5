use crate::response::{ApiResponse, bulk_response, service_error, validation_error};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use services::enrollment::{self, EnrollCandidate, Enrollment};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub candidate_id: i64,
    pub assessment_series_id: i64,
    pub occupation_level_id: Option<i64>,
    pub total_amount: i64,
    pub module_ids: Vec<i64>,
    pub paper_ids: Vec<i64>,
    pub created_at: String,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(e: Enrollment) -> Self {
        Self {
            id: e.enrollment.id,
            candidate_id: e.enrollment.candidate_id,
            assessment_series_id: e.enrollment.assessment_series_id,
            occupation_level_id: e.enrollment.occupation_level_id,
            total_amount: e.enrollment.total_amount,
            module_ids: e.module_ids,
            paper_ids: e.paper_ids,
            created_at: e.enrollment.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkEnrollRequest {
    #[validate(length(min = 1, message = "At least one enrollment is required"))]
    pub enrollments: Vec<EnrollCandidate>,
}

/// POST /api/enrollments
///
/// Enrolls one candidate into a series. What the body must carry depends on
/// the candidate's registration category:
///
/// - formal: `occupation_level_id`, no modules or papers
/// - modular: `occupation_level_id` and one or two `module_ids` of that level
/// - workers_pas: one or more `paper_ids`, no level
///
/// ### Request Body
/// ```json
/// { "candidate_id": 1, "assessment_series_id": 2, "occupation_level_id": 3 }
/// ```
///
/// ### Response: 201 Created
/// The enrollment with its fee `total_amount`.
///
/// ### Errors
/// - 400 Bad Request: selection does not fit the category
/// - 404 Not Found: unknown candidate, series, level, module or paper
/// - 409 Conflict: already enrolled in the series
pub async fn enroll_candidate(
    State(app_state): State<AppState>,
    Json(req): Json<EnrollCandidate>,
) -> Response {
    match enrollment::enroll_candidate(app_state.db(), req).await {
        Ok(e) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                EnrollmentResponse::from(e),
                "Candidate enrolled successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// POST /api/enrollments/bulk
///
/// ### Request Body
/// ```json
/// { "enrollments": [ { "candidate_id": 1, "assessment_series_id": 2, "occupation_level_id": 3 } ] }
/// ```
///
/// Items are keyed by `candidate_id` in the response.
pub async fn enroll_bulk(
    State(app_state): State<AppState>,
    Json(req): Json<BulkEnrollRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_error(e);
    }

    let outcome = enrollment::enroll_bulk(app_state.db(), req.enrollments).await;
    bulk_response(outcome, "Enroll candidates")
}
