use crate::response::{ApiResponse, error_response, statistics_error};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use services::statistics::{self, SeriesStatistics};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    /// Comma-separated center ids, e.g. `1,2`.
    pub center_ids: Option<String>,
}

fn parse_center_ids(raw: Option<&str>) -> Result<Vec<i64>, String> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().map_err(|_| format!("Invalid center id '{s}'")))
        .collect()
}

/// GET /api/series/{series_id}/statistics?center_ids=1,2
///
/// Pass/fail/missing statistics for every candidate enrolled in the series,
/// optionally restricted to the listed centers. Lists come back ordered:
/// categories as modular, formal, workers_pas then `Total`; sectors
/// alphabetically then `Total`; occupations grouped by sector with a
/// `sector_total` row after each group and a final `grand_total` row.
///
/// ### Errors
/// - 400 Bad Request: malformed `center_ids`
/// - 404 Not Found: unknown series
pub async fn get_series_statistics(
    State(app_state): State<AppState>,
    Path(series_id): Path<i64>,
    Query(query): Query<StatisticsQuery>,
) -> Response {
    let center_ids = match parse_center_ids(query.center_ids.as_deref()) {
        Ok(ids) => ids,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
    };

    match statistics::calculate_series_statistics(app_state.db(), series_id, &center_ids).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::<SeriesStatistics>::success(
                stats,
                "Statistics calculated successfully",
            )),
        )
            .into_response(),
        Err(e) => statistics_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_center_ids;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_center_ids(Some("1, 2,,3")).unwrap(), vec![1, 2, 3]);
        assert!(parse_center_ids(None).unwrap().is_empty());
        assert!(parse_center_ids(Some("1,x")).is_err());
    }
}
