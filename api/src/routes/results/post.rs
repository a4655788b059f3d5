use crate::response::{ApiResponse, service_error};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::results::{self, RecordResult};
use util::state::AppState;

/// POST /api/results
///
/// Records or replaces one mark. The result table follows the candidate's
/// registration category: modular marks need `module_id`, worker's PAS marks
/// need `paper_id`, formal marks may carry a `paper_id`.
///
/// ### Request Body
/// ```json
/// {
///   "candidate_id": 1,
///   "assessment_series_id": 2,
///   "paper_id": 5,
///   "assessment_type": "practical",
///   "mark": 66.5
/// }
/// ```
/// A null or negative `mark` records the paper as missed.
///
/// ### Response: 200 OK
/// The stored row with derived `grade` and `comment`.
///
/// ### Errors
/// - 400 Bad Request: mark above 100, module/paper missing for the category,
///   or no enrollment in the series
/// - 404 Not Found: unknown candidate
pub async fn record_result(
    State(app_state): State<AppState>,
    Json(req): Json<RecordResult>,
) -> Response {
    match results::record_result(app_state.db(), req).await {
        Ok(row) => (
            StatusCode::OK,
            Json(ApiResponse::success(row, "Result recorded successfully")),
        )
            .into_response(),
        Err(e) => service_error(e),
    }
}
