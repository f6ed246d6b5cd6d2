use serde::{Deserialize, Serialize};

use super::ArtifactType;

/// What was actually written for one successfully applied intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub identifier: String,
    pub artifact_type: ArtifactType,
    pub applied_state_field: Option<String>,
    pub applied_state: Option<String>,
    /// `None` when no blocked change was sent, including when the type
    /// does not support the flag.
    pub blocked: Option<bool>,
    pub blocked_reason: Option<String>,
    pub summary: String,
    pub comment_posted: bool,
    pub comment_text: Option<String>,
}

/// An intent that could not be resolved or applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipEntry {
    pub identifier: String,
    pub reason: String,
    pub summary: String,
}

/// Terminal outcome of a single intent within a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Applied(ApplyResult),
    Skipped(SkipEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_mentions: usize,
    pub applied_count: usize,
    pub skipped_count: usize,
    pub applied: Vec<ApplyResult>,
    pub skipped: Vec<SkipEntry>,
}

impl BatchReport {
    /// Fan per-item outcomes into the applied and skipped buckets, keeping
    /// input order within each bucket.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ItemOutcome>) -> Self {
        let mut report = BatchReport::default();
        for outcome in outcomes {
            report.total_mentions += 1;
            match outcome {
                ItemOutcome::Applied(result) => report.applied.push(result),
                ItemOutcome::Skipped(skip) => report.skipped.push(skip),
            }
        }
        report.applied_count = report.applied.len();
        report.skipped_count = report.skipped.len();
        report
    }
}
