// Leave and overtime request service - business logic layer

use uuid::Uuid;

use crate::employees::repository::EmployeeRepository;
use crate::events::{EmployeeEvent, EventBus};
use crate::requests::error::RequestError;
use crate::requests::models::{
    CreateLeaveRequest, CreateOvertimeRequest, LeaveRequest, OvertimeRequest, RequestStatus,
};
use crate::requests::repository::{LeaveRepository, OvertimeRepository};
use crate::requests::status_machine::StatusMachine;

/// Service for leave and overtime request operations
#[derive(Clone)]
pub struct RequestService {
    leave_repo: LeaveRepository,
    overtime_repo: OvertimeRepository,
    employees: EmployeeRepository,
    events: EventBus,
}

impl RequestService {
    /// Create a new RequestService
    pub fn new(
        leave_repo: LeaveRepository,
        overtime_repo: OvertimeRepository,
        employees: EmployeeRepository,
        events: EventBus,
    ) -> Self {
        Self {
            leave_repo,
            overtime_repo,
            employees,
            events,
        }
    }

    /// Resolve the calling account's employee record
    async fn employee_for_account(&self, account_id: i32) -> Result<i32, RequestError> {
        let employee = self
            .employees
            .find_by_account_id(account_id)
            .await
            .map_err(|e| RequestError::DatabaseError(e.to_string()))?
            .ok_or(RequestError::EmployeeNotFound)?;

        Ok(employee.id)
    }

    /// Create a leave request for the calling account's employee
    pub async fn create_leave(
        &self,
        account_id: i32,
        request: CreateLeaveRequest,
    ) -> Result<LeaveRequest, RequestError> {
        if request.end_date < request.start_date {
            return Err(RequestError::ValidationError(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let employee_id = self.employee_for_account(account_id).await?;
        let created = self.leave_repo.create(employee_id, &request).await?;

        self.events.emit(EmployeeEvent::LeaveRequested {
            employee_id,
            request_id: created.id,
        });

        Ok(created)
    }

    /// Leave requests belonging to the calling account's employee
    pub async fn list_leave(&self, account_id: i32) -> Result<Vec<LeaveRequest>, RequestError> {
        let employee_id = self.employee_for_account(account_id).await?;
        self.leave_repo.list_for_employee(employee_id).await
    }

    /// Resolve a leave request (admin)
    ///
    /// Approval deducts the employee's leave balance in the same
    /// transaction as the status change. Same-status resolutions are
    /// idempotent no-ops.
    pub async fn resolve_leave(
        &self,
        id: Uuid,
        new_status: RequestStatus,
    ) -> Result<LeaveRequest, RequestError> {
        let request = self
            .leave_repo
            .find_by_id(id)
            .await?
            .ok_or(RequestError::NotFound)?;

        if request.status == new_status {
            return Ok(request);
        }

        StatusMachine::transition(request.status, new_status)
            .map_err(RequestError::InvalidTransition)?;

        let resolved = match new_status {
            RequestStatus::Approved => {
                self.leave_repo
                    .approve(id, request.employee_id, request.requested_days())
                    .await?
            }
            _ => self.leave_repo.update_status(id, new_status).await?,
        };

        tracing::info!("Leave request {} resolved as {}", resolved.id, resolved.status);
        self.events.emit(EmployeeEvent::RequestResolved {
            employee_id: resolved.employee_id,
            request_id: resolved.id,
            status: resolved.status.to_string(),
        });

        Ok(resolved)
    }

    /// Create an overtime request for the calling account's employee
    pub async fn create_overtime(
        &self,
        account_id: i32,
        request: CreateOvertimeRequest,
    ) -> Result<OvertimeRequest, RequestError> {
        let employee_id = self.employee_for_account(account_id).await?;
        let created = self.overtime_repo.create(employee_id, &request).await?;

        self.events.emit(EmployeeEvent::OvertimeRequested {
            employee_id,
            request_id: created.id,
        });

        Ok(created)
    }

    /// Overtime requests belonging to the calling account's employee
    pub async fn list_overtime(
        &self,
        account_id: i32,
    ) -> Result<Vec<OvertimeRequest>, RequestError> {
        let employee_id = self.employee_for_account(account_id).await?;
        self.overtime_repo.list_for_employee(employee_id).await
    }

    /// Resolve an overtime request (admin)
    ///
    /// Approval accrues the requested minutes onto the employee record in
    /// the same transaction as the status change.
    pub async fn resolve_overtime(
        &self,
        id: Uuid,
        new_status: RequestStatus,
    ) -> Result<OvertimeRequest, RequestError> {
        let request = self
            .overtime_repo
            .find_by_id(id)
            .await?
            .ok_or(RequestError::NotFound)?;

        if request.status == new_status {
            return Ok(request);
        }

        StatusMachine::transition(request.status, new_status)
            .map_err(RequestError::InvalidTransition)?;

        let resolved = match new_status {
            RequestStatus::Approved => {
                self.overtime_repo
                    .approve(id, request.employee_id, request.minutes)
                    .await?
            }
            _ => self.overtime_repo.update_status(id, new_status).await?,
        };

        tracing::info!(
            "Overtime request {} resolved as {}",
            resolved.id,
            resolved.status
        );
        self.events.emit(EmployeeEvent::RequestResolved {
            employee_id: resolved.employee_id,
            request_id: resolved.id,
            status: resolved.status.to_string(),
        });

        Ok(resolved)
    }

    /// Pending requests across both queues; used by the admin dashboard
    pub async fn count_pending(&self) -> Result<i64, RequestError> {
        let leave = self.leave_repo.count_pending().await?;
        let overtime = self.overtime_repo.count_pending().await?;
        Ok(leave + overtime)
    }
}
