//! Ports Layer - seams to the engine's external collaborators
//!
//! - `events`: tick and minute events fed in by the data side
//! - `sink`: where fired transitions go

pub mod events;
pub mod sink;

pub use events::EngineEvent;
pub use sink::SignalSink;

#[cfg(test)]
pub use sink::MockSignalSink;
