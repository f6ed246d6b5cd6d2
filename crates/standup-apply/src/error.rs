use thiserror::Error;

use standup_core::ArtifactType;

/// Failures reported by an [`ArtifactTracker`](crate::ArtifactTracker).
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("no work item found for formatted ID {0}")]
    NotFound(String),
    /// The tracker refused the request; carries its error messages verbatim.
    #[error("{}", first_message(.0))]
    Rejected(Vec<String>),
    /// Transport, decoding or any other failure outside the tracker's own
    /// validation.
    #[error("{0}")]
    Unexpected(String),
}

fn first_message(errors: &[String]) -> &str {
    errors
        .first()
        .map(String::as_str)
        .unwrap_or("request rejected by tracker")
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("no work item found for formatted ID {0}")]
    NotFound(String),
    #[error("artifact {identifier} ({artifact_type}) does not support automatic state updates")]
    UnsupportedArtifactType {
        identifier: String,
        artifact_type: ArtifactType,
    },
    #[error("{0}")]
    ArtifactUpdate(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApplyError {
    /// Coarse classification for front ends that answer a single request.
    pub fn status(&self) -> &'static str {
        match self {
            ApplyError::NotFound(_) => "not_found",
            ApplyError::UnsupportedArtifactType { .. } | ApplyError::InvalidRequest(_) => {
                "bad_request"
            }
            ApplyError::ArtifactUpdate(_) | ApplyError::Unexpected(_) => "bad_gateway",
        }
    }
}

impl From<TrackerError> for ApplyError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound(id) => ApplyError::NotFound(id),
            TrackerError::Rejected(errors) => {
                ApplyError::ArtifactUpdate(first_message(&errors).to_string())
            }
            TrackerError::Unexpected(msg) => ApplyError::Unexpected(msg),
        }
    }
}
