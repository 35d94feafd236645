use chrono::{DateTime, Utc};

/// Standard shift length; anything worked beyond it counts as overtime
pub const STANDARD_SHIFT_MINUTES: i64 = 480;

/// Computes overtime for a clock-in / clock-out session
pub struct OvertimeCalculator;

impl OvertimeCalculator {
    /// Overtime minutes for a session: time worked past the standard shift,
    /// never negative
    pub fn session_overtime(clock_in: DateTime<Utc>, clock_out: DateTime<Utc>) -> i32 {
        let worked = (clock_out - clock_in).num_minutes();
        worked.saturating_sub(STANDARD_SHIFT_MINUTES).max(0) as i32
    }
}
