use std::path::PathBuf;

use clap::Args;

use standup_transcript::parse_transcript;

use crate::output;

use super::read_input;

#[derive(Args)]
pub struct ParseArgs {
    /// Transcript file (reads stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Print intents as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let text = read_input(args.file.as_deref())?;
    let intents = parse_transcript(&text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&intents)?);
    } else if intents.is_empty() {
        println!("No work items mentioned.");
    } else {
        for intent in &intents {
            println!("{}", output::render_intent(intent));
        }
    }
    Ok(())
}
