use standup_core::{ApplyResult, BatchReport, SkipEntry, UpdateIntent};

/// Format a key-value pair for display.
pub fn kv(key: &str, value: &str) -> String {
    format!("{key:>16}: {value}")
}

/// Format a header line.
pub fn header(title: &str) -> String {
    format!("=== {title} ===")
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn render_intent(intent: &UpdateIntent) -> String {
    let blocked = match intent.blocked {
        Some(flag) => flag.to_string(),
        None => "-".to_string(),
    };
    [
        header(&intent.identifier),
        kv("state", or_dash(intent.state.as_deref())),
        kv("blocked", &blocked),
        kv("blocked reason", or_dash(intent.blocked_reason.as_deref())),
        kv("summary", &intent.summary),
    ]
    .join("\n")
}

pub fn render_applied(result: &ApplyResult) -> String {
    let state = match (&result.applied_state_field, &result.applied_state) {
        (Some(field), Some(state)) => format!("{field} = {state}"),
        _ => "-".to_string(),
    };
    let blocked = match (result.blocked, result.blocked_reason.as_deref()) {
        (Some(true), Some(reason)) => format!("true ({reason})"),
        (Some(flag), _) => flag.to_string(),
        (None, _) => "-".to_string(),
    };
    [
        header(&format!("{} ({})", result.identifier, result.artifact_type)),
        kv("state", &state),
        kv("blocked", &blocked),
        kv(
            "comment",
            if result.comment_posted { "posted" } else { "-" },
        ),
    ]
    .join("\n")
}

pub fn render_skipped(skip: &SkipEntry) -> String {
    [
        header(&format!("{} (skipped)", skip.identifier)),
        kv("reason", &skip.reason),
        kv("summary", &skip.summary),
    ]
    .join("\n")
}

pub fn render_report(report: &BatchReport) -> String {
    let mut out = vec![
        kv("mentions", &report.total_mentions.to_string()),
        kv("applied", &report.applied_count.to_string()),
        kv("skipped", &report.skipped_count.to_string()),
    ];
    out.extend(report.applied.iter().map(render_applied));
    out.extend(report.skipped.iter().map(render_skipped));
    out.join("\n")
}
