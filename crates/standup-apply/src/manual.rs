use serde::{Deserialize, Serialize};

use standup_core::{Scope, UpdateIntent};

use crate::ApplyError;

/// A single-item update supplied directly instead of parsed from a transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualUpdate {
    pub workspace: String,
    #[serde(default)]
    pub project: Option<String>,
    pub identifier: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub blocked: Option<bool>,
    #[serde(default)]
    pub blocked_reason: Option<String>,
    pub comment: String,
}

impl ManualUpdate {
    /// Validate and normalize into the scope and intent the applier expects.
    /// The trimmed comment becomes the intent's summary.
    pub fn into_intent(self) -> Result<(Scope, UpdateIntent), ApplyError> {
        if self.workspace.trim().is_empty() {
            return Err(ApplyError::InvalidRequest("workspace is required".to_string()));
        }
        let identifier = self.identifier.trim();
        if identifier.is_empty() {
            return Err(ApplyError::InvalidRequest(
                "formatted ID is required".to_string(),
            ));
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(ApplyError::InvalidRequest(
                "comment text is required".to_string(),
            ));
        }

        let intent = UpdateIntent {
            identifier: identifier.to_string(),
            state: self
                .state
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            blocked: self.blocked,
            blocked_reason: self.blocked_reason,
            summary: comment.to_string(),
        };
        Ok((Scope::new(self.workspace, self.project), intent))
    }
}
