//! ChipStomp CLI - run WAV files through the pedal's effects.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chipstomp")]
#[command(author, version, about = "ChipStomp effects pedal CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the pedal
    Process(commands::process::ProcessArgs),

    /// List available effects and their features
    Effects(commands::effects::EffectsArgs),

    /// List and manage presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Effects(args) => commands::effects::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
