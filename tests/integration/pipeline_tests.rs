use std::sync::Arc;

use standup_apply::memory::TrackerCall;
use standup_apply::{ApplyError, ManualUpdate, MemoryTracker, Pipeline, TranscriptRequest};
use standup_core::{ArtifactType, FieldValue, Scope};
use standup_transcript::parse_transcript;

const STANDUP: &str = "US12345 is in progress and waiting on QA. \
                       DE54321 is blocked by database migration issues. \
                       TA11101 is done and ready for review.";

async fn tracker_with(items: &[(&str, ArtifactType)]) -> Arc<MemoryTracker> {
    let tracker = Arc::new(MemoryTracker::new());
    for (id, ty) in items {
        tracker.insert(id, ty.clone()).await;
    }
    tracker
}

fn scope() -> Scope {
    Scope::new("/workspace/123", Some("/project/789".to_string()))
}

// === Test 1: the standup scenario end to end ===
#[tokio::test]
async fn test_standup_transcript_applies_every_item() {
    let tracker = tracker_with(&[
        ("US12345", ArtifactType::HierarchicalRequirement),
        ("DE54321", ArtifactType::Defect),
        ("TA11101", ArtifactType::Task),
    ])
    .await;
    let pipeline = Pipeline::new(tracker.clone());

    let report = pipeline.process(STANDUP, &scope()).await;
    assert_eq!(report.total_mentions, 3);
    assert_eq!(report.applied_count, 3);
    assert_eq!(report.skipped_count, 0);

    let ids: Vec<_> = report.applied.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, ["US12345", "DE54321", "TA11101"]);

    let us = &report.applied[0];
    assert_eq!(us.applied_state_field.as_deref(), Some("ScheduleState"));
    assert_eq!(us.applied_state.as_deref(), Some("In-Progress"));
    assert_eq!(us.blocked, None);

    let de = &report.applied[1];
    assert_eq!(de.applied_state_field.as_deref(), Some("State"));
    assert_eq!(de.applied_state.as_deref(), Some("In-Progress"));
    assert_eq!(de.blocked, Some(true));
    assert!(de.blocked_reason.as_deref().unwrap().contains("database migration"));

    let ta = &report.applied[2];
    assert_eq!(ta.applied_state.as_deref(), Some("Completed"));
    assert!(ta.comment_posted);
    assert_eq!(ta.comment_text.as_deref(), Some("TA11101 is done and ready for review"));

    // Remote state reflects the writes, and each item was resolved with the request scope.
    assert_eq!(
        tracker.get("DE54321").await.unwrap().current_state.as_deref(),
        Some("In-Progress")
    );
    let calls = tracker.calls().await;
    assert!(calls.iter().all(|c| match c {
        TrackerCall::Resolve { scope: s, .. } => s == &scope(),
        _ => true,
    }));
}

// === Test 2: one resolvable and one missing identifier ===
#[tokio::test]
async fn test_not_found_item_is_skipped_not_fatal() {
    let tracker = tracker_with(&[("US100", ArtifactType::HierarchicalRequirement)]).await;
    let pipeline = Pipeline::new(tracker);

    let report = pipeline
        .process("US100 is finished. US999 is underway.", &scope())
        .await;
    assert_eq!(report.applied_count, 1);
    assert_eq!(report.skipped_count, 1);
    assert!(report.skipped[0].reason.contains("US999"));
}

// === Test 3: blocked on an unsupported type keeps the state change ===
#[tokio::test]
async fn test_blocked_flag_dropped_for_unsupported_type() {
    let tracker = tracker_with(&[("TS10", ArtifactType::parse("TestSet"))]).await;
    let pipeline = Pipeline::new(tracker.clone());

    let report = pipeline.process("TS10 has a blocker", &scope()).await;
    // A blocker implies In-Progress, and TestSet has no state field.
    assert_eq!(report.skipped_count, 1);

    let report = pipeline
        .process("TS10 is blocked on lab hardware", &scope())
        .await;
    assert_eq!(report.skipped_count, 1);

    let result = pipeline
        .manual(ManualUpdate {
            workspace: "/workspace/123".to_string(),
            identifier: "TS10".to_string(),
            blocked: Some(true),
            comment: "lab hardware".to_string(),
            ..ManualUpdate::default()
        })
        .await
        .unwrap();
    assert_eq!(result.blocked, None);
    assert_eq!(result.blocked_reason, None);
    assert!(result.comment_posted);
}

#[tokio::test]
async fn test_state_mismatch_is_fatal_but_supported_types_take_both_fields() {
    let tracker = tracker_with(&[("EP10", ArtifactType::parse("Milestone"))]).await;
    let pipeline = Pipeline::new(tracker.clone());
    let err = pipeline
        .manual(ManualUpdate {
            workspace: "/workspace/123".to_string(),
            identifier: "EP10".to_string(),
            state: Some("Completed".to_string()),
            blocked: Some(false),
            comment: "done".to_string(),
            ..ManualUpdate::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplyError::UnsupportedArtifactType { .. }));

    // Supported state plus a blocked flag on a type the allow-set includes.
    let tracker = tracker_with(&[("TA77", ArtifactType::Task)]).await;
    let pipeline = Pipeline::new(tracker.clone());
    let result = pipeline
        .manual(ManualUpdate {
            workspace: "/workspace/123".to_string(),
            identifier: "TA77".to_string(),
            state: Some("Completed".to_string()),
            blocked: Some(false),
            comment: "unblocked and done".to_string(),
            ..ManualUpdate::default()
        })
        .await
        .unwrap();
    assert_eq!(result.applied_state.as_deref(), Some("Completed"));
    assert_eq!(result.blocked, Some(false));
    assert_eq!(result.blocked_reason.as_deref(), Some(""));

    let calls = tracker.calls().await;
    let TrackerCall::Mutate { changes, .. } = &calls[1] else {
        panic!("expected a mutation after the lookup");
    };
    assert_eq!(changes["State"], FieldValue::Text("Completed".to_string()));
    assert_eq!(changes["Blocked"], FieldValue::Flag(false));
}

// === Test 4: state on a portfolio item makes no writes at all ===
#[tokio::test]
async fn test_unsupported_state_records_single_skip() {
    let tracker = tracker_with(&[
        ("F12", ArtifactType::parse("PortfolioItem/Feature")),
        ("US1234", ArtifactType::HierarchicalRequirement),
    ])
    .await;
    let pipeline = Pipeline::new(tracker.clone());

    let report = pipeline
        .process("F12 is complete\nUS1234 is in review", &scope())
        .await;
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].identifier, "F12");
    assert_eq!(report.applied[0].identifier, "US1234");

    let writes_to_feature = tracker
        .calls()
        .await
        .into_iter()
        .filter(|c| match c {
            TrackerCall::Mutate { reference, .. } | TrackerCall::Comment { reference, .. } => {
                reference == "memory://F12"
            }
            TrackerCall::Resolve { .. } => false,
        })
        .count();
    assert_eq!(writes_to_feature, 0);
}

// === Test 5: rejected updates skip without posting commentary ===
#[tokio::test]
async fn test_remote_rejection_is_skipped_verbatim() {
    let tracker = tracker_with(&[
        ("DE10", ArtifactType::Defect),
        ("DE20", ArtifactType::Defect),
    ])
    .await;
    tracker
        .reject_mutations("DE10", &["Validation error: Defect.State should not be null"])
        .await;
    tracker.reject_comments("DE20", &["Not authorized to post"]).await;
    let pipeline = Pipeline::new(tracker.clone());

    let report = pipeline.process("DE10 is done. DE20 is done.", &scope()).await;
    assert_eq!(report.applied_count, 0);
    assert_eq!(
        report.skipped[0].reason,
        "Validation error: Defect.State should not be null"
    );
    assert_eq!(report.skipped[1].reason, "Not authorized to post");

    let comments_on_de10 = tracker
        .calls()
        .await
        .into_iter()
        .filter(|c| matches!(c, TrackerCall::Comment { reference, .. } if reference == "memory://DE10"))
        .count();
    assert_eq!(comments_on_de10, 0);
}

// === Test 6: manual update scenario ===
#[tokio::test]
async fn test_manual_update_in_progress() {
    let tracker = tracker_with(&[("US99999", ArtifactType::HierarchicalRequirement)]).await;
    let pipeline = Pipeline::new(tracker);

    let result = pipeline
        .manual(ManualUpdate {
            workspace: "/workspace/123".to_string(),
            project: Some("/project/789".to_string()),
            identifier: "US99999".to_string(),
            state: Some("In-Progress".to_string()),
            blocked: None,
            blocked_reason: None,
            comment: " Manual update from automated test. ".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.identifier, "US99999");
    assert_eq!(result.applied_state_field.as_deref(), Some("ScheduleState"));
    assert_eq!(result.applied_state.as_deref(), Some("In-Progress"));
    assert!(result.comment_posted);
    assert_eq!(
        result.comment_text.as_deref(),
        Some("Manual update from automated test.")
    );
}

// === Test 7: each intent re-resolves; nothing is cached ===
#[tokio::test]
async fn test_descriptor_fetched_per_intent() {
    let tracker = tracker_with(&[("US42", ArtifactType::HierarchicalRequirement)]).await;
    let pipeline = Pipeline::new(tracker.clone());

    pipeline.process("US42 is done", &scope()).await;
    pipeline.process("US42 is accepted", &scope()).await;

    let resolves = tracker
        .calls()
        .await
        .into_iter()
        .filter(|c| matches!(c, TrackerCall::Resolve { .. }))
        .count();
    assert_eq!(resolves, 2);
    assert_eq!(
        tracker.get("US42").await.unwrap().current_state.as_deref(),
        Some("Accepted")
    );
}

// === Test 8: request validation and JSON shape ===
#[tokio::test]
async fn test_request_validation_and_report_shape() {
    let tracker = tracker_with(&[("US70", ArtifactType::HierarchicalRequirement)]).await;
    let pipeline = Pipeline::new(tracker);

    let err = pipeline
        .process_request(&TranscriptRequest {
            workspace: " ".to_string(),
            project: None,
            transcript: "US70 is done".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplyError::InvalidRequest(_)));

    let report = pipeline
        .process_request(&TranscriptRequest {
            workspace: "/workspace/123".to_string(),
            project: None,
            transcript: "No identifiers here.".to_string(),
        })
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "total_mentions": 0,
            "applied_count": 0,
            "skipped_count": 0,
            "applied": [],
            "skipped": []
        })
    );
}

// === Test 9: last mention wins across the whole pipeline ===
#[tokio::test]
async fn test_last_mention_replaces_earlier_detail() {
    let text = "US500 is blocked by legal review.\nWe also talked about US500 again";
    let intents = parse_transcript(text);
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].blocked, None);

    let tracker = tracker_with(&[("US500", ArtifactType::HierarchicalRequirement)]).await;
    let pipeline = Pipeline::new(tracker.clone());
    let report = pipeline.process(text, &scope()).await;

    let result = &report.applied[0];
    assert_eq!(result.applied_state, None);
    assert_eq!(result.blocked, None);
    assert_eq!(result.summary, "We also talked about US500 again");

    // Only the comment goes out; there were no field changes.
    let calls = tracker.calls().await;
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[1], TrackerCall::Comment { .. }));
}
