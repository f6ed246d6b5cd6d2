use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

use commands::Commands;

#[derive(Parser)]
#[command(
    name = "standup",
    version,
    about = "Turn standup transcripts into Rally work-item status updates"
)]
struct Cli {
    /// Connection profile from ~/.standup/config.toml
    #[arg(long, global = true, default_value = "default")]
    profile: String,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = cli.command.run(&cli.profile).await {
        eprintln!("{}", error::format_error(&err));
        std::process::exit(1);
    }
}
