use crate::response::{ApiResponse, service_error};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::fees::{self, PopulateSummary};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PopulateQuery {
    pub series_id: Option<i64>,
}

/// POST /api/fees/populate?series_id={series_id}
///
/// Rebuilds candidate and center fee rows from enrollments and payment
/// clearances. Without `series_id` every series is rebuilt.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": { "candidate_fees": 120, "center_fees": 8 },
///   "message": "Fees populated successfully"
/// }
/// ```
pub async fn populate_fees(
    State(app_state): State<AppState>,
    Query(query): Query<PopulateQuery>,
) -> Response {
    match fees::populate_fees(app_state.db(), query.series_id).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(ApiResponse::<PopulateSummary>::success(
                summary,
                "Fees populated successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error(e.into()),
    }
}
