//! CLI Adapter
//!
//! Command-line interface for the signal engine.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CheckConfigCmd, CliApp, Command, ReplayCmd};
