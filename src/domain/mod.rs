//! Domain Layer - value types for the z-score signal engine
//!
//! Pure types with no I/O. Every price and score is a `rust_decimal::Decimal`
//! quantized to five fractional digits on the way in.

pub mod decimal;
pub mod error;
pub mod lagged;
pub mod position;
pub mod quote;
pub mod signal;
pub mod statistics;

pub use decimal::{quantize, to_price, ToDecimal, PRICE_SCALE};
pub use error::{EngineError, ParseLabelError};
pub use lagged::Lagged;
pub use position::Position;
pub use quote::{mid_price, Quote};
pub use signal::Signal;
pub use statistics::{Regime, StatisticalParameters};
