// HTTP handler for the admin dashboard

use axum::{
    extract::{Query, State},
    Json,
};

use crate::dashboard::models::DashboardResponse;
use crate::employees::{ClockStatus, Employee};
use crate::error::ApiError;
use crate::query::{EmployeeQueryBuilder, QueryParams, QueryValidator};
use crate::AppState;

/// Attendance overview with search, filtering, sorting, and pagination
/// GET /api/admin/dashboard (admin only; gated at the route layer)
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    params(
        ("search" = Option<String>, Query, description = "Partial name match"),
        ("status" = Option<String>, Query, description = "Clock status filter"),
        ("min_leave_days" = Option<i32>, Query, description = "Minimum leave balance"),
        ("max_leave_days" = Option<i32>, Query, description = "Maximum leave balance"),
        ("sort" = Option<String>, Query, description = "Sort field: name or leave_days"),
        ("order" = Option<String>, Query, description = "Sort order: asc or desc"),
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<u32>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Attendance overview", body = DashboardResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 403, description = "Caller is not an admin"),
    ),
    security(("bearer_token" = [])),
    tag = "dashboard"
)]
pub async fn dashboard_handler(
    Query(params): Query<QueryParams>,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    tracing::debug!("Building admin dashboard with query: {:?}", params);

    // 1. Validate query parameters
    let validated =
        QueryValidator::validate(params).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // 2. Build the employee overview query
    let mut builder = EmployeeQueryBuilder::new();

    if let Some(ref search) = validated.search {
        builder.add_search_filter(search);
    }
    if let Some(status) = validated.status {
        builder.add_status_filter(status);
    }
    builder.add_leave_days_range(validated.min_leave_days, validated.max_leave_days);

    if let Some(sort_field) = validated.sort_field {
        builder.set_sort(sort_field, validated.sort_order);
    }

    builder.set_pagination(validated.page, validated.limit);

    let (query_str, params) = builder.build();

    // 3. Execute with parameterized binding
    let mut query = sqlx::query_as::<_, Employee>(&query_str);
    for param in params {
        query = query.bind(param);
    }

    let employees = query.fetch_all(&state.db).await?;

    // 4. Aggregate counters
    let total_employees = state
        .employee_repo
        .count_employees()
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    let clocked_in = state
        .employee_repo
        .count_by_clock_status(ClockStatus::ClockedIn)
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    let pending_requests = state
        .request_service
        .count_pending()
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    tracing::debug!("Dashboard query returned {} employees", employees.len());

    Ok(Json(DashboardResponse {
        total_employees,
        clocked_in,
        pending_requests,
        employees,
    }))
}
