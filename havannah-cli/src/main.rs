//! Havannah CLI - command-line interface
//!
//! Commands:
//! - selfplay: Play random games and report outcome statistics
//! - replay: Replay a recorded game and report its result

mod replay;
mod selfplay;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "havannah")]
#[command(about = "Havannah rule engine driver")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play uniformly random games
    Selfplay(selfplay::SelfplayArgs),
    /// Replay a recorded game
    Replay(replay::ReplayArgs),
}

fn main() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
        Commands::Replay(args) => replay::run(args),
    }
}
