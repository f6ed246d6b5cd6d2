use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use standup_core::state;
use standup_core::UpdateIntent;

use crate::blocked::detect_blocked;
use crate::keywords::detect_state;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{1,5}[0-9]{2,})\b").expect("identifier pattern is valid"));

/// Non-empty, trimmed segments of a transcript. Segments end at a period or
/// a newline.
pub fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Work-item identifiers in a segment, in order of appearance. Case-sensitive.
pub fn find_identifiers(segment: &str) -> Vec<&str> {
    IDENTIFIER
        .captures_iter(segment)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Extract one update intent per mentioned identifier.
///
/// Intents come out in order of each identifier's first mention, but carry
/// the fields of its last mention: a later segment replaces the earlier
/// intent wholesale, even when it says less.
pub fn parse_transcript(text: &str) -> Vec<UpdateIntent> {
    let mut intents: Vec<UpdateIntent> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for segment in segments(text) {
        let identifiers = find_identifiers(segment);
        if identifiers.is_empty() {
            continue;
        }

        let lower = segment.to_lowercase();
        let mut detected_state = detect_state(&lower);
        let blocker = detect_blocked(&lower);

        // An active blocker with no explicit state means the work has started.
        if blocker.is_some() && detected_state.is_none() {
            detected_state = Some(state::IN_PROGRESS);
        }

        for identifier in identifiers {
            let intent = UpdateIntent {
                identifier: identifier.to_string(),
                state: detected_state.map(str::to_string),
                blocked: blocker.as_ref().map(|_| true),
                blocked_reason: blocker.as_ref().and_then(|b| b.reason.clone()),
                summary: segment.to_string(),
            };
            match position.get(identifier) {
                Some(&idx) => intents[idx] = intent,
                None => {
                    position.insert(identifier.to_string(), intents.len());
                    intents.push(intent);
                }
            }
        }
    }

    intents
}
