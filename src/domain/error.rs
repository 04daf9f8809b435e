use rust_decimal::Decimal;
use thiserror::Error;

/// Failures surfaced by the engine. None of them are transient; a failed
/// call is a data or programming error on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A supplied value has no fixed-precision decimal form
    #[error("Cannot convert {field} value '{value}' to a fixed-precision decimal")]
    Conversion { field: &'static str, value: String },

    /// The current stdev is zero when the deviation score is computed
    #[error("Division by zero: stdev is zero while scoring mid price {mid}")]
    DivisionByZero { mid: Decimal },
}

/// A label (regime, position, signal) that does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
