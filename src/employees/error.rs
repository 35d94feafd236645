use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Error types for employee record operations
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Employee not found")]
    NotFound,

    #[error("Skill already recorded: {0}")]
    DuplicateSkill(String),

    #[error("Invalid clock state: {0}")]
    InvalidClockState(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for EmployeeError {
    fn from(err: sqlx::Error) -> Self {
        EmployeeError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            EmployeeError::DatabaseError(msg) => {
                tracing::error!("Database error in employees: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            EmployeeError::NotFound => {
                (StatusCode::NOT_FOUND, "Employee not found".to_string())
            }
            EmployeeError::DuplicateSkill(name) => (
                StatusCode::CONFLICT,
                format!("Skill '{}' is already recorded for this employee", name),
            ),
            EmployeeError::InvalidClockState(msg) => (StatusCode::CONFLICT, msg),
            EmployeeError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
