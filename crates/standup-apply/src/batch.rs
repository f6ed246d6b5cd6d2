use std::sync::Arc;

use serde::{Deserialize, Serialize};

use standup_core::{ApplyResult, BatchReport, ItemOutcome, Scope, SkipEntry, UpdateIntent};
use standup_transcript::parse_transcript;

use crate::applier::apply_update;
use crate::manual::ManualUpdate;
use crate::tracker::ArtifactTracker;
use crate::ApplyError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRequest {
    pub workspace: String,
    #[serde(default)]
    pub project: Option<String>,
    pub transcript: String,
}

impl TranscriptRequest {
    pub fn validate(&self) -> Result<Scope, ApplyError> {
        if self.workspace.trim().is_empty() {
            return Err(ApplyError::InvalidRequest("workspace is required".to_string()));
        }
        if self.transcript.trim().is_empty() {
            return Err(ApplyError::InvalidRequest(
                "transcript content is required".to_string(),
            ));
        }
        Ok(Scope::new(self.workspace.clone(), self.project.clone()))
    }
}

/// Drives transcripts and manual updates through a tracker.
///
/// Every intent resolves its artifact afresh; nothing is shared between
/// intents apart from the tracker itself.
#[derive(Clone)]
pub struct Pipeline {
    tracker: Arc<dyn ArtifactTracker>,
}

impl Pipeline {
    pub fn new(tracker: Arc<dyn ArtifactTracker>) -> Self {
        Self { tracker }
    }

    /// Resolve then apply one intent.
    pub async fn resolve_and_apply(
        &self,
        intent: &UpdateIntent,
        scope: &Scope,
    ) -> Result<ApplyResult, ApplyError> {
        let artifact = self.tracker.resolve(&intent.identifier, scope).await?;
        apply_update(self.tracker.as_ref(), intent, &artifact).await
    }

    /// Total over intents: every failure becomes a skip.
    pub async fn process_intent(&self, intent: &UpdateIntent, scope: &Scope) -> ItemOutcome {
        match self.resolve_and_apply(intent, scope).await {
            Ok(result) => ItemOutcome::Applied(result),
            Err(err) => {
                if let ApplyError::Unexpected(detail) = &err {
                    tracing::error!(
                        "unexpected error updating artifact {}: {}",
                        intent.identifier,
                        detail
                    );
                } else {
                    tracing::warn!("skipping {}: {}", intent.identifier, err);
                }
                ItemOutcome::Skipped(SkipEntry {
                    identifier: intent.identifier.clone(),
                    reason: err.to_string(),
                    summary: intent.summary.clone(),
                })
            }
        }
    }

    /// Parse `text` and apply every intent in order. Never fails; per-item
    /// problems land in the report's skipped list.
    pub async fn process(&self, text: &str, scope: &Scope) -> BatchReport {
        let intents = parse_transcript(text);
        if intents.is_empty() {
            return BatchReport::default();
        }

        let mut outcomes = Vec::with_capacity(intents.len());
        for intent in &intents {
            outcomes.push(self.process_intent(intent, scope).await);
        }

        let report = BatchReport::from_outcomes(outcomes);
        tracing::info!(
            "processed {} mentions: {} applied, {} skipped",
            report.total_mentions,
            report.applied_count,
            report.skipped_count
        );
        report
    }

    /// Validate a request, then [`process`](Self::process) it. Only an
    /// invalid request is an error.
    pub async fn process_request(
        &self,
        request: &TranscriptRequest,
    ) -> Result<BatchReport, ApplyError> {
        let scope = request.validate()?;
        Ok(self.process(&request.transcript, &scope).await)
    }

    /// Apply a single manual update. Unlike the batch path, the failure is
    /// returned to the caller.
    pub async fn manual(&self, update: ManualUpdate) -> Result<ApplyResult, ApplyError> {
        let (scope, intent) = update.into_intent()?;
        self.resolve_and_apply(&intent, &scope).await.map_err(|err| {
            if let ApplyError::Unexpected(detail) = &err {
                tracing::error!(
                    "unexpected error applying manual update to {}: {}",
                    intent.identifier,
                    detail
                );
            }
            err
        })
    }
}
