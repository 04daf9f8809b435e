//! Application Layer
//!
//! Drives the engine from a stream of events.

pub mod driver;

pub use driver::{DriverStats, EventDriver};
