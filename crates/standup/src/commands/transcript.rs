use std::path::PathBuf;

use clap::Args;

use standup_apply::TranscriptRequest;

use crate::config;
use crate::output;

use super::{rally_pipeline, read_input};

#[derive(Args)]
pub struct TranscriptArgs {
    /// Workspace ref, e.g. /workspace/12345 (defaults to the profile's)
    #[arg(short, long)]
    workspace: Option<String>,
    /// Project ref (defaults to the profile's)
    #[arg(short, long)]
    project: Option<String>,
    /// Transcript file (reads stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: TranscriptArgs, profile: &str) -> anyhow::Result<()> {
    let connection = config::connection(profile)?;
    let scope = connection.scope(args.workspace, args.project)?;
    let transcript = read_input(args.file.as_deref())?;

    let pipeline = rally_pipeline(&connection)?;
    let report = pipeline
        .process_request(&TranscriptRequest {
            workspace: scope.workspace,
            project: scope.project,
            transcript,
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output::render_report(&report));
    }
    Ok(())
}
