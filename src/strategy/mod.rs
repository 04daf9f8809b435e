//! Strategy Layer - z-score signal engine
//!
//! - `params`: thresholds and window sizes
//! - `deviation`: the engine's deviation score (`mid - mean / stdev`)
//! - `transitions`: ordered, first-match rule table
//! - `engine`: `ZScoreEngine`, which runs quote -> score -> rules per tick

pub mod deviation;
pub mod engine;
pub mod params;
pub mod transitions;

pub use deviation::deviation_score;
pub use engine::{EngineSeed, EngineState, Evaluation, Transition, ZScoreEngine};
pub use params::EngineParams;
pub use transitions::{first_match, Rule, RuleId, TransitionInput, RULES};
