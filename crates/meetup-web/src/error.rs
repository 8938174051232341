//! Planner errors as HTTP responses.

use axum::http::StatusCode;
use meetup_core::PlannerError;

/// Handler error: status plus a plain-text message.
pub type ApiError = (StatusCode, String);

pub type ApiResult<T> = Result<T, ApiError>;

/// Map a planner error onto a status code.
pub fn api_error(err: PlannerError) -> ApiError {
    let status = match &err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        PlannerError::ValidationError(_) => StatusCode::BAD_REQUEST,
        PlannerError::WorkflowAlreadyInitialized(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    }
    (status, err.to_string())
}
