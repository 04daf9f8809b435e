//! CLI Command Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Event-driven z-score signal engine
#[derive(Parser, Debug)]
#[command(
    name = "zscore-signal",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Turns bid/ask ticks and minute statistics into BOT/SLD signals",
    long_about = "zscore-signal runs the deviation-score decision engine over a recorded \
                  stream of tick and minute events and reports every signal it emits."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Feed a JSON-lines event file through the engine
    Replay(ReplayCmd),

    /// Validate a configuration file and print the resolved parameters
    CheckConfig(CheckConfigCmd),
}

/// Replay recorded events
#[derive(Parser, Debug)]
pub struct ReplayCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/engine.toml")]
    pub config: PathBuf,

    /// JSON-lines file of tick/minute events
    #[arg(short, long, value_name = "FILE")]
    pub events: PathBuf,

    /// Override the entry threshold
    #[arg(long, value_name = "THRESHOLD")]
    pub z_threshold: Option<rust_decimal::Decimal>,

    /// Override the close threshold
    #[arg(long, value_name = "THRESHOLD")]
    pub z_close_threshold: Option<rust_decimal::Decimal>,

    /// Print the final engine state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Check configuration
#[derive(Parser, Debug)]
pub struct CheckConfigCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/engine.toml")]
    pub config: PathBuf,
}
