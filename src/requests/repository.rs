// Database repositories for leave and overtime requests

use sqlx::PgPool;
use uuid::Uuid;

use crate::requests::error::RequestError;
use crate::requests::models::{
    CreateLeaveRequest, CreateOvertimeRequest, LeaveRequest, OvertimeRequest, RequestStatus,
};

const LEAVE_COLUMNS: &str = "id, employee_id, start_date, end_date, reason, status, created_at, updated_at";
const OVERTIME_COLUMNS: &str = "id, employee_id, work_date, minutes, reason, status, created_at, updated_at";

/// Repository for leave request operations
#[derive(Clone)]
pub struct LeaveRepository {
    pool: PgPool,
}

impl LeaveRepository {
    /// Create a new LeaveRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pending leave request
    pub async fn create(
        &self,
        employee_id: i32,
        request: &CreateLeaveRequest,
    ) -> Result<LeaveRequest, RequestError> {
        let created = sqlx::query_as::<_, LeaveRequest>(&format!(
            "INSERT INTO leave_requests (employee_id, start_date, end_date, reason) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            LEAVE_COLUMNS
        ))
        .bind(employee_id)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.reason.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find a leave request by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequest>, RequestError> {
        let request = sqlx::query_as::<_, LeaveRequest>(&format!(
            "SELECT {} FROM leave_requests WHERE id = $1",
            LEAVE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Leave requests for one employee, newest first
    pub async fn list_for_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<LeaveRequest>, RequestError> {
        let requests = sqlx::query_as::<_, LeaveRequest>(&format!(
            "SELECT {} FROM leave_requests WHERE employee_id = $1 ORDER BY created_at DESC",
            LEAVE_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Move a pending request to a non-approved terminal status
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<LeaveRequest, RequestError> {
        let updated = sqlx::query_as::<_, LeaveRequest>(&format!(
            "UPDATE leave_requests SET status = $1, updated_at = NOW() \
             WHERE id = $2 AND status = 'pending' RETURNING {}",
            LEAVE_COLUMNS
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RequestError::NotFound)?;

        Ok(updated)
    }

    /// Approve a pending request, deducting the employee's leave balance
    ///
    /// Balance check, deduction, and status change are one transaction;
    /// an insufficient balance rolls everything back.
    pub async fn approve(
        &self,
        id: Uuid,
        employee_id: i32,
        requested_days: i32,
    ) -> Result<LeaveRequest, RequestError> {
        let mut tx = self.pool.begin().await?;

        let balance: Option<(i32,)> =
            sqlx::query_as("SELECT leave_days FROM employees WHERE id = $1")
                .bind(employee_id)
                .fetch_optional(&mut *tx)
                .await?;

        let available = balance.ok_or(RequestError::EmployeeNotFound)?.0;
        if available < requested_days {
            return Err(RequestError::InsufficientBalance {
                available,
                requested: requested_days,
            });
        }

        sqlx::query(
            "UPDATE employees SET leave_days = leave_days - $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(requested_days)
        .bind(employee_id)
        .execute(&mut *tx)
        .await?;

        let approved = sqlx::query_as::<_, LeaveRequest>(&format!(
            "UPDATE leave_requests SET status = 'approved', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING {}",
            LEAVE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RequestError::NotFound)?;

        tx.commit().await?;

        Ok(approved)
    }

    /// Number of pending leave requests
    pub async fn count_pending(&self) -> Result<i64, RequestError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM leave_requests WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}

/// Repository for overtime request operations
#[derive(Clone)]
pub struct OvertimeRepository {
    pool: PgPool,
}

impl OvertimeRepository {
    /// Create a new OvertimeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pending overtime request
    pub async fn create(
        &self,
        employee_id: i32,
        request: &CreateOvertimeRequest,
    ) -> Result<OvertimeRequest, RequestError> {
        let created = sqlx::query_as::<_, OvertimeRequest>(&format!(
            "INSERT INTO overtime_requests (employee_id, work_date, minutes, reason) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            OVERTIME_COLUMNS
        ))
        .bind(employee_id)
        .bind(request.work_date)
        .bind(request.minutes)
        .bind(request.reason.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find an overtime request by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OvertimeRequest>, RequestError> {
        let request = sqlx::query_as::<_, OvertimeRequest>(&format!(
            "SELECT {} FROM overtime_requests WHERE id = $1",
            OVERTIME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Overtime requests for one employee, newest first
    pub async fn list_for_employee(
        &self,
        employee_id: i32,
    ) -> Result<Vec<OvertimeRequest>, RequestError> {
        let requests = sqlx::query_as::<_, OvertimeRequest>(&format!(
            "SELECT {} FROM overtime_requests WHERE employee_id = $1 ORDER BY created_at DESC",
            OVERTIME_COLUMNS
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Move a pending request to a non-approved terminal status
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<OvertimeRequest, RequestError> {
        let updated = sqlx::query_as::<_, OvertimeRequest>(&format!(
            "UPDATE overtime_requests SET status = $1, updated_at = NOW() \
             WHERE id = $2 AND status = 'pending' RETURNING {}",
            OVERTIME_COLUMNS
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RequestError::NotFound)?;

        Ok(updated)
    }

    /// Approve a pending request, accruing the minutes onto the employee
    pub async fn approve(
        &self,
        id: Uuid,
        employee_id: i32,
        minutes: i32,
    ) -> Result<OvertimeRequest, RequestError> {
        let mut tx = self.pool.begin().await?;

        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
                .bind(employee_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists.0 {
            return Err(RequestError::EmployeeNotFound);
        }

        sqlx::query(
            "UPDATE employees \
             SET overtime_minutes = overtime_minutes + $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(minutes)
        .bind(employee_id)
        .execute(&mut *tx)
        .await?;

        let approved = sqlx::query_as::<_, OvertimeRequest>(&format!(
            "UPDATE overtime_requests SET status = 'approved', updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING {}",
            OVERTIME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RequestError::NotFound)?;

        tx.commit().await?;

        Ok(approved)
    }

    /// Number of pending overtime requests
    pub async fn count_pending(&self) -> Result<i64, RequestError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM overtime_requests WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
