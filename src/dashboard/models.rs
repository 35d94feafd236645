// Admin dashboard response models

use serde::Serialize;
use utoipa::ToSchema;

use crate::employees::Employee;

/// Aggregated attendance overview for the admin dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Total number of employee records
    pub total_employees: i64,
    /// Employees currently clocked in
    pub clocked_in: i64,
    /// Leave and overtime requests awaiting resolution
    pub pending_requests: i64,
    /// Employee overview page matching the query filters
    pub employees: Vec<Employee>,
}
