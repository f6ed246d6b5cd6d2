use standup_core::state::field;
use standup_core::{ApplyResult, ArtifactDescriptor, FieldChanges, UpdateIntent};

use crate::tracker::ArtifactTracker;
use crate::ApplyError;

/// Field changes an intent translates to for one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    pub changes: FieldChanges,
    pub state_field: Option<&'static str>,
    pub state: Option<String>,
    pub blocked: Option<bool>,
    pub blocked_reason: Option<String>,
}

/// Translate an intent into field changes for `artifact`'s type.
///
/// A requested state on a type without a state field rejects the whole
/// intent. A blocked flag on a type without blocker support is dropped and
/// everything else still goes through.
pub fn plan_update(
    intent: &UpdateIntent,
    artifact: &ArtifactDescriptor,
) -> Result<UpdatePlan, ApplyError> {
    let mut plan = UpdatePlan::default();

    if let Some(requested) = intent.requested_state() {
        let state_field =
            artifact
                .state_field()
                .ok_or_else(|| ApplyError::UnsupportedArtifactType {
                    identifier: intent.identifier.clone(),
                    artifact_type: artifact.artifact_type.clone(),
                })?;
        plan.changes
            .insert(state_field.to_string(), requested.to_string().into());
        plan.state_field = Some(state_field);
        plan.state = Some(requested.to_string());
    }

    if let Some(blocked) = intent.blocked {
        if artifact.blocked_supported() {
            let reason = if blocked {
                intent
                    .blocked_reason
                    .clone()
                    .unwrap_or_else(|| intent.summary.clone())
            } else {
                String::new()
            };
            plan.changes.insert(field::BLOCKED.to_string(), blocked.into());
            plan.changes
                .insert(field::BLOCKED_REASON.to_string(), reason.clone().into());
            plan.blocked = Some(blocked);
            plan.blocked_reason = Some(reason);
        } else {
            tracing::info!(
                "skipping blocked flag for {} ({}); type does not support Blocked field",
                intent.identifier,
                artifact.artifact_type
            );
        }
    }

    Ok(plan)
}

/// Apply `intent` to an already resolved artifact.
///
/// Field changes go out in a single mutation; commentary is posted only
/// after that mutation succeeded or when there was nothing to change.
pub async fn apply_update<T: ArtifactTracker + ?Sized>(
    tracker: &T,
    intent: &UpdateIntent,
    artifact: &ArtifactDescriptor,
) -> Result<ApplyResult, ApplyError> {
    let plan = plan_update(intent, artifact)?;

    if !plan.changes.is_empty() {
        tracing::debug!(
            "updating {} ({}) with {:?}",
            intent.identifier,
            artifact.artifact_type,
            plan.changes
        );
        tracker
            .mutate(&artifact.reference, &artifact.artifact_type, &plan.changes)
            .await?;
    }

    let comment_posted = if intent.summary.is_empty() {
        false
    } else {
        tracker.comment(&artifact.reference, &intent.summary).await?;
        true
    };

    Ok(ApplyResult {
        identifier: artifact.identifier.clone(),
        artifact_type: artifact.artifact_type.clone(),
        applied_state_field: plan.state_field.map(str::to_string),
        applied_state: plan.state,
        blocked: plan.blocked,
        blocked_reason: plan.blocked_reason,
        summary: intent.summary.clone(),
        comment_posted,
        comment_text: comment_posted.then(|| intent.summary.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryTracker, TrackerCall};
    use standup_core::{ArtifactType, FieldValue};

    fn intent(state: Option<&str>, blocked: Option<bool>, reason: Option<&str>) -> UpdateIntent {
        UpdateIntent {
            identifier: "US100".to_string(),
            state: state.map(str::to_string),
            blocked,
            blocked_reason: reason.map(str::to_string),
            summary: "US100 summary".to_string(),
        }
    }

    fn descriptor(artifact_type: ArtifactType) -> ArtifactDescriptor {
        ArtifactDescriptor {
            identifier: "US100".to_string(),
            artifact_type,
            reference: "memory://US100".to_string(),
            name: String::new(),
            current_state: None,
            blocked: None,
        }
    }

    #[test]
    fn requirement_state_goes_to_schedule_state() {
        let plan = plan_update(
            &intent(Some("In-Progress"), None, None),
            &descriptor(ArtifactType::HierarchicalRequirement),
        )
        .unwrap();
        assert_eq!(plan.state_field, Some("ScheduleState"));
        assert_eq!(
            plan.changes.get("ScheduleState"),
            Some(&FieldValue::Text("In-Progress".to_string()))
        );
        assert_eq!(plan.changes.len(), 1);
    }

    #[test]
    fn state_on_unmapped_type_is_fatal() {
        let err = plan_update(
            &intent(Some("Completed"), Some(true), None),
            &descriptor(ArtifactType::parse("PortfolioItem/Feature")),
        )
        .unwrap_err();
        assert!(matches!(err, ApplyError::UnsupportedArtifactType { .. }));
    }

    #[test]
    fn blocked_on_unmapped_type_is_dropped() {
        let plan = plan_update(
            &intent(None, Some(true), Some("vendor")),
            &descriptor(ArtifactType::parse("TestCase")),
        )
        .unwrap();
        assert!(plan.changes.is_empty());
        assert_eq!(plan.blocked, None);
        assert_eq!(plan.blocked_reason, None);
    }

    #[test]
    fn blocked_reason_falls_back_to_summary() {
        let plan = plan_update(&intent(None, Some(true), None), &descriptor(ArtifactType::Defect))
            .unwrap();
        assert_eq!(plan.blocked_reason.as_deref(), Some("US100 summary"));
        assert_eq!(plan.changes.get("Blocked"), Some(&FieldValue::Flag(true)));
    }

    #[test]
    fn unblocking_clears_reason() {
        let plan = plan_update(
            &intent(None, Some(false), Some("ignored")),
            &descriptor(ArtifactType::Task),
        )
        .unwrap();
        assert_eq!(plan.blocked, Some(false));
        assert_eq!(plan.blocked_reason.as_deref(), Some(""));
        assert_eq!(
            plan.changes.get("BlockedReason"),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[tokio::test]
    async fn mutation_then_comment() {
        let tracker = MemoryTracker::new();
        let artifact = tracker.insert("US100", ArtifactType::HierarchicalRequirement).await;

        let result = apply_update(
            &tracker,
            &intent(Some("Completed"), Some(true), Some("review")),
            &artifact,
        )
        .await
        .unwrap();

        assert_eq!(result.applied_state_field.as_deref(), Some("ScheduleState"));
        assert_eq!(result.applied_state.as_deref(), Some("Completed"));
        assert_eq!(result.blocked, Some(true));
        assert_eq!(result.blocked_reason.as_deref(), Some("review"));
        assert!(result.comment_posted);
        assert_eq!(result.comment_text.as_deref(), Some("US100 summary"));

        let calls = tracker.calls().await;
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], TrackerCall::Mutate { changes, .. } if changes.len() == 3));
        assert!(matches!(&calls[1], TrackerCall::Comment { text, .. } if text == "US100 summary"));
    }

    #[tokio::test]
    async fn rejected_mutation_posts_no_comment() {
        let tracker = MemoryTracker::new();
        let artifact = tracker.insert("US100", ArtifactType::Defect).await;
        tracker
            .reject_mutations("US100", &["Could not set State: invalid value"])
            .await;

        let err = apply_update(&tracker, &intent(Some("Shipped"), None, None), &artifact)
            .await
            .unwrap_err();
        assert!(matches!(&err, ApplyError::ArtifactUpdate(msg) if msg == "Could not set State: invalid value"));

        let calls = tracker.calls().await;
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], TrackerCall::Mutate { .. }));
    }

    #[tokio::test]
    async fn nothing_to_change_still_comments() {
        let tracker = MemoryTracker::new();
        let artifact = tracker.insert("US100", ArtifactType::parse("TestSet")).await;

        let result = apply_update(&tracker, &intent(None, Some(true), None), &artifact)
            .await
            .unwrap();
        assert_eq!(result.blocked, None);
        assert!(result.comment_posted);

        let calls = tracker.calls().await;
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], TrackerCall::Comment { .. }));
    }

    #[tokio::test]
    async fn empty_summary_posts_nothing() {
        let tracker = MemoryTracker::new();
        let artifact = tracker.insert("US100", ArtifactType::Task).await;
        let mut bare = intent(Some("Defined"), None, None);
        bare.summary.clear();

        let result = apply_update(&tracker, &bare, &artifact).await.unwrap();
        assert!(!result.comment_posted);
        assert_eq!(result.comment_text, None);
        assert_eq!(tracker.calls().await.len(), 1);
    }
}
