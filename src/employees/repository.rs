// Database repository for employee records

use chrono::Utc;
use sqlx::PgPool;

use crate::employees::error::EmployeeError;
use crate::employees::models::{
    AttendanceEntry, ClockStatus, Employee, Skill, UpdateEmployeeRequest, Warning,
};
use crate::employees::overtime::OvertimeCalculator;

const EMPLOYEE_COLUMNS: &str = "id, name, clock_status, job_schedule, leave_days, contract_type, \
                                overtime_minutes, created_at, updated_at";

const ENTRY_COLUMNS: &str = "id, employee_id, clock_in_at, clock_out_at, overtime_minutes";

/// Repository for employee record operations
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new EmployeeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an employee by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, EmployeeError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Find the employee linked to an account
    pub async fn find_by_account_id(
        &self,
        account_id: i32,
    ) -> Result<Option<Employee>, EmployeeError> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT e.* FROM employees e \
             JOIN accounts a ON a.employee_id = e.id \
             WHERE a.id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Skills recorded for an employee, oldest first
    pub async fn skills_for(&self, employee_id: i32) -> Result<Vec<Skill>, EmployeeError> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT id, employee_id, name, created_at FROM employee_skills \
             WHERE employee_id = $1 ORDER BY created_at",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    /// Warnings issued to an employee, oldest first
    pub async fn warnings_for(&self, employee_id: i32) -> Result<Vec<Warning>, EmployeeError> {
        let warnings = sqlx::query_as::<_, Warning>(
            "SELECT id, employee_id, reason, issued_at FROM employee_warnings \
             WHERE employee_id = $1 ORDER BY issued_at",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(warnings)
    }

    /// Apply an enumerated field update, keeping existing values for omitted
    /// fields
    ///
    /// Runs in a transaction so a failure at any step leaves the record
    /// untouched.
    pub async fn update_fields(
        &self,
        id: i32,
        patch: &UpdateEmployeeRequest,
    ) -> Result<Employee, EmployeeError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EmployeeError::NotFound)?;

        let updated = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees \
             SET name = $1, job_schedule = $2, leave_days = $3, contract_type = $4, \
                 updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(patch.name.clone().unwrap_or(existing.name))
        .bind(patch.job_schedule.clone().or(existing.job_schedule))
        .bind(patch.leave_days.unwrap_or(existing.leave_days))
        .bind(patch.contract_type.unwrap_or(existing.contract_type))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Record a skill for an employee
    pub async fn add_skill(&self, employee_id: i32, name: &str) -> Result<Skill, EmployeeError> {
        let skill = sqlx::query_as::<_, Skill>(
            "INSERT INTO employee_skills (employee_id, name) VALUES ($1, $2) \
             RETURNING id, employee_id, name, created_at",
        )
        .bind(employee_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return EmployeeError::DuplicateSkill(name.to_string());
                }
            }
            EmployeeError::DatabaseError(e.to_string())
        })?;

        Ok(skill)
    }

    /// Issue a warning to an employee
    pub async fn add_warning(
        &self,
        employee_id: i32,
        reason: &str,
    ) -> Result<Warning, EmployeeError> {
        let warning = sqlx::query_as::<_, Warning>(
            "INSERT INTO employee_warnings (employee_id, reason) VALUES ($1, $2) \
             RETURNING id, employee_id, reason, issued_at",
        )
        .bind(employee_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(warning)
    }

    /// Clock an employee in, opening a new attendance entry
    pub async fn clock_in(&self, employee_id: i32) -> Result<AttendanceEntry, EmployeeError> {
        let mut tx = self.pool.begin().await?;

        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EmployeeError::NotFound)?;

        if employee.clock_status == ClockStatus::ClockedIn {
            return Err(EmployeeError::InvalidClockState(
                "Employee is already clocked in".to_string(),
            ));
        }

        sqlx::query("UPDATE employees SET clock_status = 'clocked_in', updated_at = NOW() WHERE id = $1")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        let entry = sqlx::query_as::<_, AttendanceEntry>(&format!(
            "INSERT INTO attendance_entries (employee_id, clock_in_at) VALUES ($1, NOW()) \
             RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(entry)
    }

    /// Flip a not-clocked-in employee to clocked in during login
    ///
    /// Returns the updated employee when the flip happened, None when the
    /// employee was already clocked in or out.
    pub async fn clock_in_on_login(
        &self,
        employee_id: i32,
    ) -> Result<Option<Employee>, EmployeeError> {
        let mut tx = self.pool.begin().await?;

        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EmployeeError::NotFound)?;

        if employee.clock_status != ClockStatus::NotClockedIn {
            return Ok(None);
        }

        let updated = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees SET clock_status = 'clocked_in', updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO attendance_entries (employee_id, clock_in_at) VALUES ($1, NOW())")
            .bind(employee_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    /// Clock an employee out, closing the open attendance entry and accruing
    /// any overtime worked past the standard shift
    pub async fn clock_out(&self, employee_id: i32) -> Result<AttendanceEntry, EmployeeError> {
        let mut tx = self.pool.begin().await?;

        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            EMPLOYEE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EmployeeError::NotFound)?;

        if employee.clock_status != ClockStatus::ClockedIn {
            return Err(EmployeeError::InvalidClockState(
                "Employee is not clocked in".to_string(),
            ));
        }

        let open_entry = sqlx::query_as::<_, AttendanceEntry>(&format!(
            "SELECT {} FROM attendance_entries \
             WHERE employee_id = $1 AND clock_out_at IS NULL \
             ORDER BY clock_in_at DESC LIMIT 1",
            ENTRY_COLUMNS
        ))
        .bind(employee_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            EmployeeError::InvalidClockState("No open attendance entry".to_string())
        })?;

        let now = Utc::now();
        let overtime = OvertimeCalculator::session_overtime(open_entry.clock_in_at, now);

        let entry = sqlx::query_as::<_, AttendanceEntry>(&format!(
            "UPDATE attendance_entries SET clock_out_at = $1, overtime_minutes = $2 \
             WHERE id = $3 RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(now)
        .bind(overtime)
        .bind(open_entry.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE employees \
             SET clock_status = 'clocked_out', overtime_minutes = overtime_minutes + $1, \
                 updated_at = NOW() \
             WHERE id = $2",
        )
        .bind(overtime)
        .bind(employee_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(entry)
    }

    /// Total number of employees
    pub async fn count_employees(&self) -> Result<i64, EmployeeError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Number of employees in the given clock status
    pub async fn count_by_clock_status(
        &self,
        status: ClockStatus,
    ) -> Result<i64, EmployeeError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees WHERE clock_status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
