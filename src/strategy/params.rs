//! Engine Parameters
//!
//! Thresholds and smoothing windows, set once at configuration time.
//! Defaults: 30/30 windows, entry threshold 2, close threshold 0.2.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{quantize, to_price, EngineError, ToDecimal};

/// Engine configuration
///
/// Thresholds are not sanity-checked: a negative or inverted pair is taken
/// as given and simply changes which guards can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParams {
    /// Window of the rolling mean computed upstream
    pub sma_window: usize,
    /// Window of the rolling stdev computed upstream
    pub stdev_window: usize,
    /// Entry threshold on the deviation score
    pub z_threshold: Decimal,
    /// Exit threshold on the deviation score
    pub z_close_threshold: Decimal,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            sma_window: 30,
            stdev_window: 30,
            z_threshold: dec!(2),
            z_close_threshold: dec!(0.2),
        }
    }
}

impl EngineParams {
    /// Build from any convertible threshold values
    pub fn new<Z, C>(sma_window: usize, stdev_window: usize, z_threshold: Z, z_close_threshold: C) -> Result<Self, EngineError>
    where
        Z: ToDecimal,
        C: ToDecimal,
    {
        Ok(Self {
            sma_window,
            stdev_window,
            z_threshold: to_price("z_threshold", &z_threshold)?,
            z_close_threshold: to_price("z_close_threshold", &z_close_threshold)?,
        })
    }

    pub fn with_z_threshold(mut self, threshold: Decimal) -> Self {
        self.z_threshold = threshold;
        self
    }

    pub fn with_close_threshold(mut self, threshold: Decimal) -> Self {
        self.z_close_threshold = threshold;
        self
    }

    pub fn with_windows(mut self, sma_window: usize, stdev_window: usize) -> Self {
        self.sma_window = sma_window;
        self.stdev_window = stdev_window;
        self
    }

    /// Same parameters with both thresholds at five places
    #[must_use]
    pub fn quantized(self) -> Self {
        Self {
            z_threshold: quantize(self.z_threshold),
            z_close_threshold: quantize(self.z_close_threshold),
            ..self
        }
    }
}
