// Authentication data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Access tier gating which operations an account may invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Convert role to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    /// Parse role from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account database model
///
/// The authentication principal: a unique email (and, for employees, a
/// generated staff id) plus an Argon2id password hash. The raw password is
/// never stored or logged.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub staff_id: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub employee_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Account response model (excludes password_hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i32,
    pub email: String,
    pub staff_id: Option<String>,
    pub role: Role,
    pub employee_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            staff_id: account.staff_id,
            role: account.role,
            employee_id: account.employee_id,
            created_at: account.created_at,
        }
    }
}

/// Login request DTO
///
/// `login_key` accepts either the account email or the staff id.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    #[schema(example = "admin@example.com")]
    pub login_key: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration request DTO (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    #[schema(example = "new.hire@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
    /// Display name for the employee record; required for employee accounts
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

/// Authentication response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub role: Role,
    pub account: AccountResponse,
}
