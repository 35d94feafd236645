// Employee record service - business logic layer

use crate::employees::error::EmployeeError;
use crate::employees::models::{
    AttendanceEntry, Employee, EmployeeProfileResponse, Skill, UpdateEmployeeRequest, Warning,
};
use crate::employees::repository::EmployeeRepository;
use crate::events::{EmployeeEvent, EventBus};

/// Service for employee record operations
///
/// Every operation here runs behind a valid token; the admin-only ones are
/// additionally gated at the route layer.
#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
    events: EventBus,
}

impl EmployeeService {
    /// Create a new EmployeeService
    pub fn new(repo: EmployeeRepository, events: EventBus) -> Self {
        Self { repo, events }
    }

    /// The calling account's employee profile with skills and warnings
    pub async fn profile(&self, account_id: i32) -> Result<EmployeeProfileResponse, EmployeeError> {
        let employee = self
            .repo
            .find_by_account_id(account_id)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        let skills = self.repo.skills_for(employee.id).await?;
        let warnings = self.repo.warnings_for(employee.id).await?;

        Ok(EmployeeProfileResponse {
            id: employee.id,
            name: employee.name,
            clock_status: employee.clock_status,
            job_schedule: employee.job_schedule,
            leave_days: employee.leave_days,
            contract_type: employee.contract_type,
            overtime_minutes: employee.overtime_minutes,
            skills: skills.into_iter().map(|s| s.name).collect(),
            warnings,
        })
    }

    /// Clock the calling account's employee in
    pub async fn clock_in(&self, account_id: i32) -> Result<AttendanceEntry, EmployeeError> {
        let employee = self
            .repo
            .find_by_account_id(account_id)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        let entry = self.repo.clock_in(employee.id).await?;

        self.events.emit(EmployeeEvent::ClockedIn {
            employee_id: employee.id,
            name: employee.name,
        });

        Ok(entry)
    }

    /// Clock the calling account's employee out, accruing overtime
    pub async fn clock_out(&self, account_id: i32) -> Result<AttendanceEntry, EmployeeError> {
        let employee = self
            .repo
            .find_by_account_id(account_id)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        let entry = self.repo.clock_out(employee.id).await?;

        self.events.emit(EmployeeEvent::ClockedOut {
            employee_id: employee.id,
            name: employee.name,
            overtime_minutes: entry.overtime_minutes,
        });

        Ok(entry)
    }

    /// Apply an admin field update to an employee record
    pub async fn update_fields(
        &self,
        employee_id: i32,
        patch: UpdateEmployeeRequest,
    ) -> Result<Employee, EmployeeError> {
        if patch.is_empty() {
            return Err(EmployeeError::ValidationError(
                "No editable fields provided".to_string(),
            ));
        }

        let updated = self.repo.update_fields(employee_id, &patch).await?;

        self.events.emit(EmployeeEvent::EmployeeUpdated {
            employee_id: updated.id,
            name: updated.name.clone(),
        });

        tracing::info!("Employee {} updated", updated.id);
        Ok(updated)
    }

    /// Record a skill for an employee
    pub async fn add_skill(
        &self,
        employee_id: i32,
        name: &str,
    ) -> Result<Skill, EmployeeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EmployeeError::ValidationError(
                "Skill name must not be empty".to_string(),
            ));
        }

        let employee = self
            .repo
            .find_by_id(employee_id)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        let skill = self.repo.add_skill(employee_id, name).await?;

        self.events.emit(EmployeeEvent::SkillAdded {
            employee_id,
            name: employee.name,
            skill: skill.name.clone(),
        });

        Ok(skill)
    }

    /// Issue a warning to an employee
    ///
    /// An empty reason is rejected before anything touches the store.
    pub async fn add_warning(
        &self,
        employee_id: i32,
        reason: &str,
    ) -> Result<Warning, EmployeeError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(EmployeeError::ValidationError(
                "Warning reason must not be empty".to_string(),
            ));
        }

        let employee = self
            .repo
            .find_by_id(employee_id)
            .await?
            .ok_or(EmployeeError::NotFound)?;

        let warning = self.repo.add_warning(employee_id, reason).await?;

        self.events.emit(EmployeeEvent::WarningIssued {
            employee_id,
            name: employee.name,
        });

        Ok(warning)
    }
}
