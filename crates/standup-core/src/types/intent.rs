use serde::{Deserialize, Serialize};

/// A status update for one tracked work item, derived from a transcript
/// segment or from a manual request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateIntent {
    /// Formatted identifier, e.g. `US12345`.
    pub identifier: String,
    #[serde(default)]
    pub state: Option<String>,
    /// `None` means the text said nothing about blockers.
    #[serde(default)]
    pub blocked: Option<bool>,
    #[serde(default)]
    pub blocked_reason: Option<String>,
    /// The text that produced this intent. Posted as commentary when non-empty.
    pub summary: String,
}

impl UpdateIntent {
    pub fn new(identifier: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            state: None,
            blocked: None,
            blocked_reason: None,
            summary: summary.into(),
        }
    }

    /// The requested state, treating a blank value as no request.
    pub fn requested_state(&self) -> Option<&str> {
        self.state.as_deref().filter(|s| !s.is_empty())
    }
}
