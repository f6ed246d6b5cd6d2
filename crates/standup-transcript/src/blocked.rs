use once_cell::sync::Lazy;
use regex::Regex;

static BLOCKED_REASON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bblocked\b(?:\s+on|\s+by|\s+because of|\s+due to)?\s*(?P<reason>[^.]+)")
        .expect("blocked reason pattern is valid")
});

/// Blocker signal in an already-lowercased segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blocker {
    pub reason: Option<String>,
}

/// Returns `None` when the segment mentions neither "blocked" nor "blocker".
///
/// The reason is whatever follows "blocked" (and an optional "on", "by",
/// "because of" or "due to") up to the end of the segment. A bare "blocker"
/// or a trailing "blocked" yields no reason.
pub fn detect_blocked(segment_lower: &str) -> Option<Blocker> {
    if !segment_lower.contains("blocked") && !segment_lower.contains("blocker") {
        return None;
    }

    let reason = BLOCKED_REASON
        .captures(segment_lower)
        .and_then(|caps| caps.name("reason"))
        .map(|m| m.as_str().trim().to_string())
        .filter(|r| !r.is_empty());

    Some(Blocker { reason })
}
