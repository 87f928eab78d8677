//! filtergraph CLI - applies filter graph presets to WAV files.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filtergraph")]
#[command(author, version, about = "Composable filter graphs for audio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a preset or configured filter to a WAV file
    Apply(commands::apply::ApplyArgs),

    /// List available presets and their default parameters
    Presets,

    /// Validate a filter configuration file
    Check(commands::check::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Presets => commands::presets::run(),
        Commands::Check(args) => commands::check::run(args),
    }
}
