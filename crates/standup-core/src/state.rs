//! Canonical workflow state names written to the tracker.

pub const DEFINED: &str = "Defined";
pub const IN_PROGRESS: &str = "In-Progress";
pub const COMPLETED: &str = "Completed";
pub const ACCEPTED: &str = "Accepted";

/// Field names the tracker uses for workflow status and blockers.
pub mod field {
    pub const SCHEDULE_STATE: &str = "ScheduleState";
    pub const STATE: &str = "State";
    pub const BLOCKED: &str = "Blocked";
    pub const BLOCKED_REASON: &str = "BlockedReason";
}
