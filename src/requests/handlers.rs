// HTTP handlers for leave and overtime request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedAccount;
use crate::requests::error::RequestError;
use crate::requests::models::{
    CreateLeaveRequest, CreateOvertimeRequest, LeaveRequest, OvertimeRequest, ResolveRequest,
};
use crate::AppState;

/// Handler for POST /api/requests/leave
/// Creates a leave request for the calling employee
pub async fn create_leave_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Json(request): Json<CreateLeaveRequest>,
) -> Result<(StatusCode, Json<LeaveRequest>), RequestError> {
    request
        .validate()
        .map_err(|e| RequestError::ValidationError(e.to_string()))?;

    let created = state
        .request_service
        .create_leave(account.account_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /api/requests/leave
/// Lists the calling employee's leave requests
pub async fn list_leave_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<Vec<LeaveRequest>>, RequestError> {
    let requests = state.request_service.list_leave(account.account_id).await?;

    Ok(Json(requests))
}

/// Handler for PATCH /api/requests/leave/:id/status
/// Resolves a leave request (admin only; gated at the route layer)
pub async fn resolve_leave_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<LeaveRequest>, RequestError> {
    let resolved = state
        .request_service
        .resolve_leave(id, request.status)
        .await?;

    Ok(Json(resolved))
}

/// Handler for POST /api/requests/overtime
/// Creates an overtime request for the calling employee
pub async fn create_overtime_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
    Json(request): Json<CreateOvertimeRequest>,
) -> Result<(StatusCode, Json<OvertimeRequest>), RequestError> {
    request
        .validate()
        .map_err(|e| RequestError::ValidationError(e.to_string()))?;

    let created = state
        .request_service
        .create_overtime(account.account_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /api/requests/overtime
/// Lists the calling employee's overtime requests
pub async fn list_overtime_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<Vec<OvertimeRequest>>, RequestError> {
    let requests = state
        .request_service
        .list_overtime(account.account_id)
        .await?;

    Ok(Json(requests))
}

/// Handler for PATCH /api/requests/overtime/:id/status
/// Resolves an overtime request (admin only; gated at the route layer)
pub async fn resolve_overtime_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<OvertimeRequest>, RequestError> {
    let resolved = state
        .request_service
        .resolve_overtime(id, request.status)
        .await?;

    Ok(Json(resolved))
}
