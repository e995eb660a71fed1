mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::file::{self, FileCommandArgs};
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "trellobug",
    author,
    version,
    about = "File a Bugzilla bug based on a Trello card"
)]
struct Cli {
    /// Card short ID or full Trello card URL.
    card_id_or_url: String,

    /// Credentials file (default: .trello-to-bug, then ~/.trello-to-bug).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    file::run(FileCommandArgs {
        card_id_or_url: cli.card_id_or_url,
        config_path: cli.config,
    })
    .await
}
