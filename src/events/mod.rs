// Real-time event broadcasting
// Best-effort push notifications emitted after state-changing operations commit

pub mod ws;

pub use ws::events_ws_handler;

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events pushed to connected dashboard clients
///
/// Serialized as JSON with an `event` tag, e.g.
/// `{"event":"clocked_in","employee_id":3,"name":"Ada"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EmployeeEvent {
    EmployeeCreated {
        employee_id: i32,
        name: String,
        email: String,
    },
    EmployeeUpdated {
        employee_id: i32,
        name: String,
    },
    ClockedIn {
        employee_id: i32,
        name: String,
    },
    ClockedOut {
        employee_id: i32,
        name: String,
        overtime_minutes: i32,
    },
    SkillAdded {
        employee_id: i32,
        name: String,
        skill: String,
    },
    WarningIssued {
        employee_id: i32,
        name: String,
    },
    LeaveRequested {
        employee_id: i32,
        request_id: Uuid,
    },
    OvertimeRequested {
        employee_id: i32,
        request_id: Uuid,
    },
    RequestResolved {
        employee_id: i32,
        request_id: Uuid,
        status: String,
    },
}

/// Fire-and-forget broadcast channel for employee events
///
/// Emission never blocks and never fails the originating request: with no
/// subscribers connected the event is simply dropped.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EmployeeEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all current subscribers
    pub fn emit(&self, event: EmployeeEvent) {
        tracing::debug!("Broadcasting event: {:?}", event);
        // A send error only means there are no receivers right now
        let _ = self.sender.send(event);
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<EmployeeEvent> {
        self.sender.subscribe()
    }

    /// Number of currently connected subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
