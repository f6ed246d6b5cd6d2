use standup_core::state;

/// Keyword groups mapped to canonical states, in priority order. The first
/// group with any keyword present in a segment wins, so a segment saying both
/// "done" and "ready for qa" resolves through the `Completed` group listed
/// first, and "testing" only applies when nothing above it matched.
pub const STATE_KEYWORDS: &[(&[&str], &str)] = &[
    (
        &["in progress", "progressing", "working on", "underway"],
        state::IN_PROGRESS,
    ),
    (&["completed", "complete", "done", "finished"], state::COMPLETED),
    (&["accepted", "signed off", "shipped"], state::ACCEPTED),
    (
        &["not started", "no progress", "to do", "todo", "backlog"],
        state::DEFINED,
    ),
    (
        &["ready for qa", "ready for test", "ready for testing", "waiting on qa"],
        state::COMPLETED,
    ),
    (&["testing", "in test", "qa in progress"], state::IN_PROGRESS),
    (&["in review", "code review", "reviewing"], state::IN_PROGRESS),
];

/// Canonical state for an already-lowercased segment. Keywords match as
/// plain substrings.
pub fn detect_state(segment_lower: &str) -> Option<&'static str> {
    STATE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| segment_lower.contains(kw)))
        .map(|(_, canonical)| *canonical)
}
