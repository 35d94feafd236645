use crate::requests::RequestStatus;

/// Service for managing request status transitions
pub struct StatusMachine;

impl StatusMachine {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - Pending → Approved, Denied, Cancelled
    /// - Approved / Denied / Cancelled → (terminal, no transitions)
    /// - Any status → Same status (idempotent)
    pub fn is_valid_transition(from: RequestStatus, to: RequestStatus) -> bool {
        // Same status is always valid (idempotent)
        if from == to {
            return true;
        }

        matches!(
            (from, to),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Denied)
                | (RequestStatus::Pending, RequestStatus::Cancelled)
        )
    }

    /// Attempt to transition from one status to another
    ///
    /// Returns `Ok(to)` if the transition is valid, `Err(message)` otherwise
    pub fn transition(from: RequestStatus, to: RequestStatus) -> Result<RequestStatus, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid status transition from {} to {}", from, to))
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn request_status_strategy() -> impl Strategy<Value = RequestStatus> {
        prop_oneof![
            Just(RequestStatus::Pending),
            Just(RequestStatus::Approved),
            Just(RequestStatus::Denied),
            Just(RequestStatus::Cancelled),
        ]
    }

    /// Same-status transitions are always valid (idempotent)
    #[test]
    fn prop_same_status_is_valid() {
        proptest!(|(status in request_status_strategy())| {
            prop_assert!(StatusMachine::is_valid_transition(status, status));
        });
    }

    /// Pending is the only state with outgoing transitions
    #[test]
    fn prop_only_pending_is_non_terminal() {
        proptest!(|(
            from in request_status_strategy(),
            to in request_status_strategy()
        )| {
            if from != RequestStatus::Pending && from != to {
                prop_assert!(!StatusMachine::is_valid_transition(from, to));
            }
        });
    }

    /// transition() and is_valid_transition() agree
    #[test]
    fn prop_transition_consistency() {
        proptest!(|(
            from in request_status_strategy(),
            to in request_status_strategy()
        )| {
            let is_valid = StatusMachine::is_valid_transition(from, to);
            let result = StatusMachine::transition(from, to);

            if is_valid {
                prop_assert_eq!(result.unwrap(), to);
            } else {
                prop_assert!(result.is_err());
            }
        });
    }
}
