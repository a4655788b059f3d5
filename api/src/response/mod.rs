use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::{BulkOutcome, ServiceError};
use services::statistics::StatisticsError;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// ## Example (success):
/// ```json
/// {
///   "success": true,
///   "data": { "id": 1, "registration_number": "UVT002/U/25/M/HD/F/001" },
///   "message": "Candidate retrieved successfully"
/// }
/// ```
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "data": {},
///   "message": "Candidate 7 not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    ///
    /// # Arguments
    /// - `data`: The result payload.
    /// - `message`: A descriptive message to accompany the success.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    ///
    /// # Arguments
    /// - `message`: A description of the error.
    ///
    /// # Requires
    /// - `T` must implement `Default`, since error responses do not include useful data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Builds an error envelope with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

pub fn validation_error(errors: validator::ValidationErrors) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Validation failed: {errors}"),
    )
}

/// Maps a service failure onto its HTTP status:
///
/// - `NotFound` → 404
/// - `Validation` → 400
/// - `Conflict` → 409
/// - `Database` → 500 (logged, message kept generic)
pub fn service_error(err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
        ServiceError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        ServiceError::Conflict(msg) => error_response(StatusCode::CONFLICT, msg),
        ServiceError::Database(e) => {
            tracing::error!(error = %e, "database error while handling request");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

/// Bulk actions always answer 200; per-item failures travel in `data.failed`.
pub fn bulk_response(outcome: BulkOutcome, action: &str) -> Response {
    let message = format!(
        "{action}: {} succeeded, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    (StatusCode::OK, Json(ApiResponse::success(outcome, message))).into_response()
}

pub fn statistics_error(err: StatisticsError) -> Response {
    match err {
        StatisticsError::SeriesNotFound(_) => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
        StatisticsError::Database(e) => {
            tracing::error!(error = %e, "database error while computing statistics");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
