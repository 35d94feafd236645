// HTTP handlers for employee record endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedAccount;
use crate::employees::error::EmployeeError;
use crate::employees::models::{
    AddSkillRequest, AddWarningRequest, AttendanceEntry, Employee, EmployeeProfileResponse,
    Skill, UpdateEmployeeRequest, Warning,
};
use crate::AppState;

/// Get the calling account's employee profile
/// GET /api/employees/profile
#[utoipa::path(
    get,
    path = "/api/employees/profile",
    responses(
        (status = 200, description = "Employee profile", body = EmployeeProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account has no employee record"),
    ),
    security(("bearer_token" = [])),
    tag = "employees"
)]
pub async fn profile_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<EmployeeProfileResponse>, EmployeeError> {
    let profile = state.employee_service.profile(account.account_id).await?;

    Ok(Json(profile))
}

/// Clock the calling employee in
/// POST /api/employees/clock-in
#[utoipa::path(
    post,
    path = "/api/employees/clock-in",
    responses(
        (status = 200, description = "Clocked in", body = AttendanceEntry),
        (status = 404, description = "Account has no employee record"),
        (status = 409, description = "Already clocked in"),
    ),
    security(("bearer_token" = [])),
    tag = "employees"
)]
pub async fn clock_in_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<AttendanceEntry>, EmployeeError> {
    let entry = state.employee_service.clock_in(account.account_id).await?;

    Ok(Json(entry))
}

/// Clock the calling employee out
/// POST /api/employees/clock-out
#[utoipa::path(
    post,
    path = "/api/employees/clock-out",
    responses(
        (status = 200, description = "Clocked out", body = AttendanceEntry),
        (status = 404, description = "Account has no employee record"),
        (status = 409, description = "Not clocked in"),
    ),
    security(("bearer_token" = [])),
    tag = "employees"
)]
pub async fn clock_out_handler(
    State(state): State<AppState>,
    account: AuthenticatedAccount,
) -> Result<Json<AttendanceEntry>, EmployeeError> {
    let entry = state.employee_service.clock_out(account.account_id).await?;

    Ok(Json(entry))
}

/// Update an employee record (admin only; gated at the route layer)
/// PATCH /api/employees/:id
#[utoipa::path(
    patch,
    path = "/api/employees/{id}",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid or unknown field"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Employee not found"),
    ),
    security(("bearer_token" = [])),
    tag = "employees"
)]
pub async fn update_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Employee>, EmployeeError> {
    // Deserialize by hand so an unknown field name comes back as a
    // validation failure instead of a body rejection
    let patch: UpdateEmployeeRequest = serde_json::from_value(payload)
        .map_err(|e| EmployeeError::ValidationError(e.to_string()))?;

    patch
        .validate()
        .map_err(|e| EmployeeError::ValidationError(e.to_string()))?;

    let employee = state.employee_service.update_fields(id, patch).await?;

    Ok(Json(employee))
}

/// Add a skill to an employee (admin only; gated at the route layer)
/// POST /api/employees/:id/skills
pub async fn add_skill_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<AddSkillRequest>,
) -> Result<(StatusCode, Json<Skill>), EmployeeError> {
    request
        .validate()
        .map_err(|e| EmployeeError::ValidationError(e.to_string()))?;

    let skill = state.employee_service.add_skill(id, &request.name).await?;

    Ok((StatusCode::CREATED, Json(skill)))
}

/// Issue a warning to an employee (admin only; gated at the route layer)
/// POST /api/employees/:id/warnings
pub async fn add_warning_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<AddWarningRequest>,
) -> Result<(StatusCode, Json<Warning>), EmployeeError> {
    request
        .validate()
        .map_err(|e| EmployeeError::ValidationError(e.to_string()))?;

    let warning = state
        .employee_service
        .add_warning(id, &request.reason)
        .await?;

    Ok((StatusCode::CREATED, Json(warning)))
}
