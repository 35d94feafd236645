use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Error types for leave and overtime request operations
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Request not found")]
    NotFound,

    #[error("Employee not found")]
    EmployeeNotFound,

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Insufficient leave balance: {available} days available, {requested} requested")]
    InsufficientBalance { available: i32, requested: i32 },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for RequestError {
    fn from(err: sqlx::Error) -> Self {
        RequestError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            RequestError::DatabaseError(msg) => {
                tracing::error!("Database error in requests: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            RequestError::NotFound => {
                (StatusCode::NOT_FOUND, "Request not found".to_string())
            }
            RequestError::EmployeeNotFound => {
                (StatusCode::NOT_FOUND, "Employee not found".to_string())
            }
            RequestError::InvalidTransition(msg) => (StatusCode::BAD_REQUEST, msg),
            RequestError::InsufficientBalance {
                available,
                requested,
            } => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Insufficient leave balance: {} days available, {} requested",
                    available, requested
                ),
            ),
            RequestError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
