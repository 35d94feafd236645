// Validation utilities module
// Custom validation functions for domain-specific rules

use validator::ValidationError;

/// Validates that free text (a warning reason, a skill name) is non-empty
/// after trimming whitespace
pub fn validate_non_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::new("must_not_be_blank"))
    } else {
        Ok(())
    }
}

/// Validates that a leave-day balance is within the allowed range (0-365)
pub fn validate_leave_days_range(days: i32) -> Result<(), ValidationError> {
    if !(0..=365).contains(&days) {
        Err(ValidationError::new("leave_days_out_of_range"))
    } else {
        Ok(())
    }
}

/// Validates that requested overtime minutes are positive and at most a
/// 12-hour shift (720 minutes)
pub fn validate_overtime_minutes(minutes: i32) -> Result<(), ValidationError> {
    if !(1..=720).contains(&minutes) {
        Err(ValidationError::new("overtime_minutes_out_of_range"))
    } else {
        Ok(())
    }
}

/// Validates a staff id of the generated form `EMP-NNNN`
pub fn validate_staff_id_format(staff_id: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new(r"^EMP-\d{4}$").expect("staff id pattern is valid");
    if re.is_match(staff_id) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_staff_id_format"))
    }
}
