//! zscore-signal - Event-driven z-score signal engine
//!
//! Converts a stream of bid/ask quotes and minute-level statistics (rolling
//! mean, rolling stdev, regime flag) into BOT/SLD signals while tracking a
//! FLAT/LONG/SHORT position. Decision logic only: no market-data sourcing,
//! no order routing, no persistence.
//!
//! # Modules
//!
//! - `domain`: Value types (Quote, StatisticalParameters, Position, Signal)
//! - `strategy`: The engine (deviation score, transition table, ZScoreEngine)
//! - `ports`: Event and signal-sink abstractions
//! - `application`: Serial event driver
//! - `adapters`: CLI, JSON-lines replay, sinks
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod strategy;

pub use domain::{EngineError, Position, Quote, Regime, Signal, StatisticalParameters};
pub use strategy::{EngineParams, EngineSeed, EngineState, Evaluation, Transition, ZScoreEngine};
