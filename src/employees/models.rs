// Employee domain models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Clock status enum representing an employee's attendance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    NotClockedIn,
    ClockedIn,
    ClockedOut,
}

impl ClockStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockStatus::NotClockedIn => "not_clocked_in",
            ClockStatus::ClockedIn => "clocked_in",
            ClockStatus::ClockedOut => "clocked_out",
        }
    }

    /// Parse status from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "not_clocked_in" => Ok(ClockStatus::NotClockedIn),
            "clocked_in" => Ok(ClockStatus::ClockedIn),
            "clocked_out" => Ok(ClockStatus::ClockedOut),
            _ => Err(format!("Invalid clock status: {}", s)),
        }
    }
}

impl Default for ClockStatus {
    fn default() -> Self {
        ClockStatus::NotClockedIn
    }
}

impl std::fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contract type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    FullTime,
    PartTime,
    Contractor,
}

impl ContractType {
    /// Convert contract type to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::FullTime => "full_time",
            ContractType::PartTime => "part_time",
            ContractType::Contractor => "contractor",
        }
    }
}

impl Default for ContractType {
    fn default() -> Self {
        ContractType::FullTime
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employee database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    pub clock_status: ClockStatus,
    #[schema(example = "Mon-Fri 09:00-17:00")]
    pub job_schedule: Option<String>,
    /// Remaining leave balance in days
    #[schema(example = 14)]
    pub leave_days: i32,
    pub contract_type: ContractType,
    /// Accrued overtime in minutes
    #[schema(example = 0)]
    pub overtime_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One clock-in / clock-out session
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceEntry {
    pub id: i32,
    pub employee_id: i32,
    pub clock_in_at: DateTime<Utc>,
    pub clock_out_at: Option<DateTime<Utc>>,
    /// Overtime recorded for this session, in minutes
    pub overtime_minutes: i32,
}

/// Skill database model
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: i32,
    pub employee_id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Warning database model
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Warning {
    pub id: i32,
    pub employee_id: i32,
    pub reason: String,
    pub issued_at: DateTime<Utc>,
}

/// Admin update request for an employee record
///
/// The editable fields are enumerated explicitly; any other field name in
/// the payload is rejected rather than reflectively applied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployeeRequest {
    #[validate(custom = "crate::validation::validate_non_blank")]
    pub name: Option<String>,
    pub job_schedule: Option<String>,
    #[validate(custom = "crate::validation::validate_leave_days_range")]
    pub leave_days: Option<i32>,
    pub contract_type: Option<ContractType>,
}

impl UpdateEmployeeRequest {
    /// True when the request carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.job_schedule.is_none()
            && self.leave_days.is_none()
            && self.contract_type.is_none()
    }
}

/// Request DTO for adding a skill
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddSkillRequest {
    #[validate(custom = "crate::validation::validate_non_blank")]
    #[schema(example = "Forklift certified")]
    pub name: String,
}

/// Request DTO for issuing a warning
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddWarningRequest {
    #[validate(custom = "crate::validation::validate_non_blank")]
    #[schema(example = "Late three times this week")]
    pub reason: String,
}

/// Employee profile response with skills and warnings included
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeProfileResponse {
    pub id: i32,
    pub name: String,
    pub clock_status: ClockStatus,
    pub job_schedule: Option<String>,
    pub leave_days: i32,
    pub contract_type: ContractType,
    pub overtime_minutes: i32,
    pub skills: Vec<String>,
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_status_round_trip() {
        assert_eq!(
            ClockStatus::from_str("not_clocked_in").unwrap(),
            ClockStatus::NotClockedIn
        );
        assert_eq!(
            ClockStatus::from_str("CLOCKED_IN").unwrap(),
            ClockStatus::ClockedIn
        );
        assert_eq!(ClockStatus::ClockedOut.as_str(), "clocked_out");
    }

    #[test]
    fn test_clock_status_rejects_unknown() {
        assert!(ClockStatus::from_str("on_break").is_err());
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let json = r#"{"name": "Ada", "favourite_colour": "mauve"}"#;
        let parsed: Result<UpdateEmployeeRequest, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_update_request_partial_fields() {
        let json = r#"{"leave_days": 10}"#;
        let parsed: UpdateEmployeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.leave_days, Some(10));
        assert!(parsed.name.is_none());
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_update_request_empty() {
        let parsed: UpdateEmployeeRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_update_request_validation() {
        let blank_name: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        assert!(blank_name.validate().is_err());

        let bad_balance: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"leave_days": 9000}"#).unwrap();
        assert!(bad_balance.validate().is_err());

        let ok: UpdateEmployeeRequest =
            serde_json::from_str(r#"{"name": "Ada", "leave_days": 12}"#).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_contract_type_serialization() {
        let json = serde_json::to_string(&ContractType::PartTime).unwrap();
        assert_eq!(json, "\"part_time\"");
    }
}
