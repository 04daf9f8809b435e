//! Signal sinks
//!
//! `TracingSink` writes transitions to the log, `ConsoleSink` prints one
//! line per transition for the CLI, and `RecordingSink` keeps them in memory.

use crate::ports::SignalSink;
use crate::strategy::{EngineState, Transition};

/// Logs every transition at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SignalSink for TracingSink {
    fn publish(&mut self, transition: &Transition, state: &EngineState) {
        tracing::info!(
            "SIGNAL {} | {} -> {} | mid={} z={} ({})",
            transition.signal,
            transition.previous_position,
            transition.position,
            transition.mid,
            transition.deviation,
            transition.rule
        );
        tracing::debug!(
            "State after signal: bid={} ask={} mean={} stdev={} regime={}",
            state.quote().bid,
            state.quote().ask,
            state.statistics().mean,
            state.statistics().stdev,
            state.statistics().regime
        );
    }
}

/// Prints transitions to stdout, numbered from 1
#[derive(Debug, Default)]
pub struct ConsoleSink {
    printed: u64,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printed(&self) -> u64 {
        self.printed
    }

    /// Format one transition the way the console shows it
    pub fn format_line(index: u64, transition: &Transition) -> String {
        format!(
            "#{:<4} {:<4} {:>5} -> {:<5} mid={} z={} ({})",
            index,
            transition.signal,
            transition.previous_position,
            transition.position,
            transition.mid,
            transition.deviation,
            transition.rule
        )
    }
}

impl SignalSink for ConsoleSink {
    fn publish(&mut self, transition: &Transition, _state: &EngineState) {
        self.printed += 1;
        println!("{}", Self::format_line(self.printed, transition));
    }
}

/// Keeps every transition it is given
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    transitions: Vec<Transition>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn into_transitions(self) -> Vec<Transition> {
        self.transitions
    }
}

impl SignalSink for RecordingSink {
    fn publish(&mut self, transition: &Transition, _state: &EngineState) {
        self.transitions.push(*transition);
    }
}
