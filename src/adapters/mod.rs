//! Adapters Layer - concrete collaborators around the engine
//!
//! - `cli`: command-line interface
//! - `replay`: JSON-lines event files
//! - `sinks`: log, console and in-memory signal sinks

pub mod cli;
pub mod replay;
pub mod sinks;

pub use replay::{read_events, replay, replay_file, ReplayError};
pub use sinks::{ConsoleSink, RecordingSink, TracingSink};
