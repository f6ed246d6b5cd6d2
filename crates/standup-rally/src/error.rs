use thiserror::Error;

use standup_apply::TrackerError;

#[derive(Debug, Error)]
pub enum RallyError {
    #[error("workspace scope is required")]
    MissingWorkspace,
    #[error("no work item found for formatted ID {0}")]
    NotFound(String),
    #[error("rally rejected the request: {}", .0.join("; "))]
    Rejected(Vec<String>),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<RallyError> for TrackerError {
    fn from(err: RallyError) -> Self {
        match err {
            RallyError::NotFound(id) => TrackerError::NotFound(id),
            RallyError::Rejected(errors) => TrackerError::Rejected(errors),
            other => TrackerError::Unexpected(other.to_string()),
        }
    }
}
