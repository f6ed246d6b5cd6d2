use clap::Args;

use standup_apply::ManualUpdate;

use crate::config;
use crate::output;

use super::rally_pipeline;

#[derive(Args)]
pub struct ManualArgs {
    /// Formatted ID of the work item, e.g. US12345
    #[arg(long = "id")]
    identifier: String,
    /// Comment to post; also used as the blocked reason fallback
    #[arg(short, long)]
    comment: String,
    /// New workflow state, e.g. In-Progress
    #[arg(short, long)]
    state: Option<String>,
    /// Set or clear the blocked flag
    #[arg(long)]
    blocked: Option<bool>,
    #[arg(long)]
    blocked_reason: Option<String>,
    #[arg(short, long)]
    workspace: Option<String>,
    #[arg(short, long)]
    project: Option<String>,
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ManualArgs, profile: &str) -> anyhow::Result<()> {
    let connection = config::connection(profile)?;
    let scope = connection.scope(args.workspace, args.project)?;
    let pipeline = rally_pipeline(&connection)?;

    let result = pipeline
        .manual(ManualUpdate {
            workspace: scope.workspace,
            project: scope.project,
            identifier: args.identifier,
            state: args.state,
            blocked: args.blocked,
            blocked_reason: args.blocked_reason,
            comment: args.comment,
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", output::render_applied(&result));
    }
    Ok(())
}
