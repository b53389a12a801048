//! CLI for verifying provably-fair crash game chains.
//!
//! Reads published games as newline-delimited JSON, checks each one against
//! the trust anchor, and rebuilds historical games from checkpoints.

mod commands;
mod feed;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "crashproof")]
#[command(about = "Provably-fair crash chain verifier", long_about = None)]
#[command(version)]
struct Cli {
    /// Chain config JSON (salt, bootstrap anchor); built-in chain if omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the crash multiplier derived from a seed hash
    Outcome {
        /// Seed hash as 64 hex characters
        hash: String,
    },

    /// Verify published games in order
    Verify {
        /// Newline-delimited JSON claims (stdin if not specified)
        #[arg(long)]
        claims: Option<PathBuf>,
    },

    /// Verify published games, then rebuild a window of history
    Window {
        /// Newest game to show (defaults to the latest verified game)
        #[arg(long)]
        start: Option<u64>,

        /// Number of games to show
        #[arg(long, default_value_t = 20)]
        length: u64,

        /// Newline-delimited JSON claims (stdin if not specified)
        #[arg(long)]
        claims: Option<PathBuf>,

        /// Print games as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the effective chain config as JSON
    Config,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "crashproof=info,crashproof_core=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Outcome { hash } => commands::outcome(&config, &hash),
        Commands::Verify { claims } => commands::verify(config, claims.as_deref()),
        Commands::Window {
            start,
            length,
            claims,
            json,
        } => commands::window(config, claims.as_deref(), start, length, json),
        Commands::Config => commands::show_config(&config),
    }
}
