//! An in-memory tracker for tests and offline runs.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use standup_core::state::field;
use standup_core::{ArtifactDescriptor, ArtifactType, FieldChanges, FieldValue, Scope};

use crate::tracker::ArtifactTracker;
use crate::TrackerError;

/// A call received by [`MemoryTracker`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Resolve {
        identifier: String,
        scope: Scope,
    },
    Mutate {
        reference: String,
        artifact_type: ArtifactType,
        changes: FieldChanges,
    },
    Comment {
        reference: String,
        text: String,
    },
}

#[derive(Default)]
struct State {
    artifacts: HashMap<String, ArtifactDescriptor>,
    calls: Vec<TrackerCall>,
    rejected_mutations: HashMap<String, Vec<String>>,
    rejected_comments: HashMap<String, Vec<String>>,
    broken: HashSet<String>,
}

#[derive(Default)]
pub struct MemoryTracker {
    state: Mutex<State>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artifact. Its reference is `memory://<identifier>`.
    pub async fn insert(&self, identifier: &str, artifact_type: ArtifactType) -> ArtifactDescriptor {
        let descriptor = ArtifactDescriptor {
            identifier: identifier.to_string(),
            artifact_type,
            reference: format!("memory://{identifier}"),
            name: String::new(),
            current_state: None,
            blocked: None,
        };
        self.state
            .lock()
            .await
            .artifacts
            .insert(identifier.to_string(), descriptor.clone());
        descriptor
    }

    /// Make every mutation of `identifier` fail with the given remote errors.
    pub async fn reject_mutations(&self, identifier: &str, errors: &[&str]) {
        self.state.lock().await.rejected_mutations.insert(
            format!("memory://{identifier}"),
            errors.iter().map(|e| e.to_string()).collect(),
        );
    }

    pub async fn reject_comments(&self, identifier: &str, errors: &[&str]) {
        self.state.lock().await.rejected_comments.insert(
            format!("memory://{identifier}"),
            errors.iter().map(|e| e.to_string()).collect(),
        );
    }

    /// Make lookups of `identifier` fail as if the transport broke.
    pub async fn break_lookup(&self, identifier: &str) {
        self.state.lock().await.broken.insert(identifier.to_string());
    }

    pub async fn calls(&self) -> Vec<TrackerCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn get(&self, identifier: &str) -> Option<ArtifactDescriptor> {
        self.state.lock().await.artifacts.get(identifier).cloned()
    }
}

#[async_trait]
impl ArtifactTracker for MemoryTracker {
    async fn resolve(
        &self,
        identifier: &str,
        scope: &Scope,
    ) -> Result<ArtifactDescriptor, TrackerError> {
        let mut state = self.state.lock().await;
        state.calls.push(TrackerCall::Resolve {
            identifier: identifier.to_string(),
            scope: scope.clone(),
        });
        if state.broken.contains(identifier) {
            return Err(TrackerError::Unexpected(format!(
                "lookup of {identifier} failed: connection reset"
            )));
        }
        state
            .artifacts
            .get(identifier)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(identifier.to_string()))
    }

    async fn mutate(
        &self,
        reference: &str,
        artifact_type: &ArtifactType,
        changes: &FieldChanges,
    ) -> Result<(), TrackerError> {
        let mut state = self.state.lock().await;
        state.calls.push(TrackerCall::Mutate {
            reference: reference.to_string(),
            artifact_type: artifact_type.clone(),
            changes: changes.clone(),
        });
        if let Some(errors) = state.rejected_mutations.get(reference) {
            return Err(TrackerError::Rejected(errors.clone()));
        }

        let artifact = state
            .artifacts
            .values_mut()
            .find(|a| a.reference == reference)
            .ok_or_else(|| TrackerError::NotFound(reference.to_string()))?;
        for (name, value) in changes {
            match (name.as_str(), value) {
                (field::BLOCKED, FieldValue::Flag(flag)) => artifact.blocked = Some(*flag),
                (field::SCHEDULE_STATE | field::STATE, FieldValue::Text(text)) => {
                    artifact.current_state = Some(text.clone())
                }
                _ => {}
            }
        }
        Ok(())
    }

    async fn comment(&self, reference: &str, text: &str) -> Result<(), TrackerError> {
        let mut state = self.state.lock().await;
        state.calls.push(TrackerCall::Comment {
            reference: reference.to_string(),
            text: text.to_string(),
        });
        match state.rejected_comments.get(reference) {
            Some(errors) => Err(TrackerError::Rejected(errors.clone())),
            None => Ok(()),
        }
    }
}
