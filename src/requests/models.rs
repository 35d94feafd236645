// Leave and overtime request models and DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request status enum representing the lifecycle of a leave or overtime
/// request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Denied,
    Cancelled,
}

impl RequestStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "denied" => Ok(RequestStatus::Denied),
            "cancelled" => Ok(RequestStatus::Cancelled),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leave request database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Number of leave days the request spans (inclusive of both ends)
    pub fn requested_days(&self) -> i32 {
        ((self.end_date - self.start_date).num_days() + 1) as i32
    }
}

/// Overtime request database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OvertimeRequest {
    pub id: Uuid,
    pub employee_id: i32,
    pub work_date: NaiveDate,
    pub minutes: i32,
    pub reason: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a leave request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLeaveRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(custom = "crate::validation::validate_non_blank")]
    #[schema(example = "Family holiday")]
    pub reason: String,
}

/// Request DTO for creating an overtime request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOvertimeRequest {
    pub work_date: NaiveDate,
    #[validate(custom = "crate::validation::validate_overtime_minutes")]
    #[schema(example = 90)]
    pub minutes: i32,
    #[validate(custom = "crate::validation::validate_non_blank")]
    #[schema(example = "Inventory count ran late")]
    pub reason: String,
}

/// Request DTO for resolving a request (admin)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResolveRequest {
    pub status: RequestStatus,
}
