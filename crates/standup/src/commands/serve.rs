use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use standup_apply::{ApplyError, ManualUpdate, Pipeline, TranscriptRequest};
use standup_transcript::parse_transcript;

use crate::config::{self, Connection};

use super::rally_pipeline;

#[derive(Args)]
pub struct ServeArgs {
    /// Read requests from stdin and write responses to stdout, one JSON
    /// object per line
    #[arg(long)]
    stdio: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
enum Request {
    Hello,
    Parse { transcript: String },
    Transcript(TranscriptRequest),
    Manual(ManualUpdate),
}

pub async fn run(args: ServeArgs, profile: &str) -> anyhow::Result<()> {
    if !args.stdio {
        anyhow::bail!("only --stdio is supported");
    }

    let connection = config::connection(profile)?;
    let pipeline = rally_pipeline(&connection)?;
    eprintln!("standup serving JSON lines on stdio");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let response = handle_line(&pipeline, &connection, line).await;
        stdout
            .write_all(format!("{}\n", serde_json::to_string(&response)?).as_bytes())
            .await?;
        stdout.flush().await?;
    }
    Ok(())
}

fn error_response(message: impl Into<String>, status: &str) -> Value {
    json!({"error": message.into(), "status": status})
}

fn apply_error_response(err: &ApplyError) -> Value {
    error_response(err.to_string(), err.status())
}

/// Answer one request line. Requests without a workspace fall back to the
/// profile's default scope.
pub async fn handle_line(pipeline: &Pipeline, connection: &Connection, line: &str) -> Value {
    let request = match serde_json::from_str::<Request>(line) {
        Ok(request) => request,
        Err(e) => return error_response(e.to_string(), "bad_request"),
    };

    match request {
        Request::Hello => json!({
            "server_version": env!("CARGO_PKG_VERSION"),
            "methods": ["hello", "parse", "transcript", "manual"],
        }),
        Request::Parse { transcript } => json!({"intents": parse_transcript(&transcript)}),
        Request::Transcript(mut request) => {
            fill_scope(connection, &mut request.workspace, &mut request.project);
            match pipeline.process_request(&request).await {
                Ok(report) => serde_json::to_value(report)
                    .unwrap_or_else(|e| error_response(e.to_string(), "internal")),
                Err(err) => apply_error_response(&err),
            }
        }
        Request::Manual(mut update) => {
            fill_scope(connection, &mut update.workspace, &mut update.project);
            match pipeline.manual(update).await {
                Ok(result) => serde_json::to_value(result)
                    .unwrap_or_else(|e| error_response(e.to_string(), "internal")),
                Err(err) => apply_error_response(&err),
            }
        }
    }
}

fn fill_scope(connection: &Connection, workspace: &mut String, project: &mut Option<String>) {
    if workspace.trim().is_empty() {
        if let Some(default) = &connection.workspace {
            *workspace = default.clone();
            if project.is_none() {
                *project = connection.project.clone();
            }
        }
    }
}
