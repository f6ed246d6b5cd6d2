pub mod manual;
pub mod parse;
pub mod profile;
pub mod serve;
pub mod transcript;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use clap::Subcommand;

use standup_apply::Pipeline;
use standup_rally::RallyClient;

use crate::config::Connection;

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a transcript and print the detected updates without touching Rally
    Parse(parse::ParseArgs),
    /// Apply every update found in a transcript
    Transcript(transcript::TranscriptArgs),
    /// Apply a single update given on the command line
    Manual(manual::ManualArgs),
    /// Manage connection profiles
    Config(profile::ConfigArgs),
    /// Serve JSON-lines requests on stdin/stdout
    Serve(serve::ServeArgs),
}

impl Commands {
    pub async fn run(self, profile_name: &str) -> anyhow::Result<()> {
        match self {
            Commands::Parse(args) => parse::run(args),
            Commands::Transcript(args) => transcript::run(args, profile_name).await,
            Commands::Manual(args) => manual::run(args, profile_name).await,
            Commands::Config(args) => profile::run(args, profile_name),
            Commands::Serve(args) => serve::run(args, profile_name).await,
        }
    }
}

/// Read from `file`, or from stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

pub fn rally_pipeline(connection: &Connection) -> anyhow::Result<Pipeline> {
    let client = RallyClient::new(connection.rally.clone())?;
    tracing::debug!("using Rally at {}", connection.rally.base_url);
    Ok(Pipeline::new(Arc::new(client)))
}
