// Authentication service - business logic layer

use crate::auth::{
    error::AuthError,
    models::{Account, AccountResponse, AuthResponse, RegisterRequest, Role},
    password::PasswordService,
    repository::AccountRepository,
    token::TokenService,
};
use crate::employees::repository::EmployeeRepository;
use crate::events::{EmployeeEvent, EventBus};

/// Default credentials seeded on first run against an empty store
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_EMPLOYEE_EMAIL: &str = "employee@example.com";
pub const DEFAULT_EMPLOYEE_PASSWORD: &str = "employee123";

/// Authentication service coordinating credential verification, token
/// issuance, and request authorization
#[derive(Clone)]
pub struct AuthService {
    accounts: AccountRepository,
    employees: EmployeeRepository,
    token_service: TokenService,
    events: EventBus,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        accounts: AccountRepository,
        employees: EmployeeRepository,
        token_service: TokenService,
        events: EventBus,
    ) -> Self {
        Self {
            accounts,
            employees,
            token_service,
            events,
        }
    }

    /// Seed the default admin and employee accounts when missing
    ///
    /// Safe to run on every startup: existing accounts are left untouched.
    pub async fn bootstrap_defaults(&self) -> Result<(), AuthError> {
        if !self.accounts.email_exists(DEFAULT_ADMIN_EMAIL).await? {
            let hash = PasswordService::hash_password(DEFAULT_ADMIN_PASSWORD)?;
            self.accounts.create_admin(DEFAULT_ADMIN_EMAIL, &hash).await?;
            tracing::info!("Default admin account {} created", DEFAULT_ADMIN_EMAIL);
        }

        if !self.accounts.email_exists(DEFAULT_EMPLOYEE_EMAIL).await? {
            let hash = PasswordService::hash_password(DEFAULT_EMPLOYEE_PASSWORD)?;
            self.accounts
                .create_employee_account(DEFAULT_EMPLOYEE_EMAIL, &hash, "Default Employee")
                .await?;
            tracing::info!("Default employee account {} created", DEFAULT_EMPLOYEE_EMAIL);
        }

        tracing::warn!("Default credentials are active; change them before exposing the service");
        Ok(())
    }

    /// Log an account in by email or staff id
    ///
    /// Unknown login key and wrong password both produce InvalidCredentials;
    /// the caller cannot tell which it was. A successful employee login whose
    /// employee record is not clocked in also flips it to clocked in.
    pub async fn login(&self, login_key: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let account = self
            .accounts
            .find_by_login_key(login_key)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.token_service.issue_token(account.id, account.role)?;

        if account.role == Role::Employee {
            if let Some(employee_id) = account.employee_id {
                let flipped = self
                    .employees
                    .clock_in_on_login(employee_id)
                    .await
                    .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

                if let Some(employee) = flipped {
                    tracing::info!(
                        "Employee {} clocked in automatically on login",
                        employee.id
                    );
                    self.events.emit(EmployeeEvent::ClockedIn {
                        employee_id: employee.id,
                        name: employee.name,
                    });
                }
            }
        }

        tracing::debug!("Account {} logged in", account.id);
        Ok(AuthResponse {
            access_token,
            role: account.role,
            account: account.into(),
        })
    }

    /// Validate a token and resolve its account, optionally enforcing a role
    ///
    /// No side effects: repeated calls with the same valid token yield the
    /// same account.
    pub async fn authorize(
        &self,
        token: &str,
        required_role: Option<Role>,
    ) -> Result<Account, AuthError> {
        let claims = self.token_service.validate_token(token)?;

        let account = self
            .accounts
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if let Some(required) = required_role {
            if account.role != required {
                return Err(AuthError::InsufficientPermissions {
                    required,
                    actual: account.role,
                });
            }
        }

        Ok(account)
    }

    /// Register a new account (admin-gated at the route layer)
    ///
    /// Employee accounts get an employee record and a generated staff id in
    /// the same transaction; duplicate login keys surface as Conflict.
    pub async fn register(&self, request: RegisterRequest) -> Result<AccountResponse, AuthError> {
        PasswordService::validate_password_strength(&request.password)?;

        if self.accounts.email_exists(&request.email).await? {
            return Err(AuthError::AccountAlreadyExists);
        }

        let hash = PasswordService::hash_password(&request.password)?;

        let account = match request.role {
            Role::Admin => self.accounts.create_admin(&request.email, &hash).await?,
            Role::Employee => {
                let name = request
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| {
                        AuthError::ValidationError(
                            "Employee accounts require a name".to_string(),
                        )
                    })?;

                let account = self
                    .accounts
                    .create_employee_account(&request.email, &hash, name)
                    .await?;

                if let Some(employee_id) = account.employee_id {
                    self.events.emit(EmployeeEvent::EmployeeCreated {
                        employee_id,
                        name: name.to_string(),
                        email: account.email.clone(),
                    });
                }

                account
            }
        };

        tracing::info!("Account {} registered with role {}", account.id, account.role);
        Ok(account.into())
    }

    /// Resolve the calling account for the /me endpoint
    pub async fn current_account(&self, account_id: i32) -> Result<AccountResponse, AuthError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(account.into())
    }
}
