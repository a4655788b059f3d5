use crate::response::{ApiResponse, service_error};
use crate::routes::candidates::common::{CandidateResponse, ResultsQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::{candidates, results::ResultRow};
use util::state::AppState;

/// GET /api/candidates/{candidate_id}
///
/// ### Responses
/// - `200 OK` with the candidate, including its registration number and
///   payment code once submitted
/// - `404 Not Found` if the candidate does not exist
pub async fn get_candidate(
    State(app_state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Response {
    match candidates::get_candidate(app_state.db(), candidate_id).await {
        Ok(candidate) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CandidateResponse::from(candidate),
                "Candidate retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}

/// GET /api/candidates/{candidate_id}/results?series_id={series_id}
///
/// Lists the candidate's marks for one series with derived grade and comment.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": 1, "category": "formal", "module_id": null, "paper_id": 4,
///       "assessment_type": "theory", "mark": 72.0, "grade": "B",
///       "comment": "Successful" }
///   ],
///   "message": "Results retrieved successfully"
/// }
/// ```
///
/// ### Errors
/// - 404 Not Found: unknown candidate
pub async fn get_candidate_results(
    State(app_state): State<AppState>,
    Path(candidate_id): Path<i64>,
    Query(query): Query<ResultsQuery>,
) -> Response {
    match services::results::candidate_results(app_state.db(), candidate_id, query.series_id).await
    {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::<Vec<ResultRow>>::success(
                rows,
                "Results retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
