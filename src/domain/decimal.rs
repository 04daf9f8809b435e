//! Fixed-precision decimal helpers
//!
//! Prices and scores are held at exactly five fractional digits. Values are
//! quantized the moment they enter the engine, so nothing unquantized is
//! ever stored or compared.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

use super::error::EngineError;

/// Fractional digits kept for every price and score
pub const PRICE_SCALE: u32 = 5;

/// Round to [`PRICE_SCALE`] places (half-even) and pin the scale.
pub fn quantize(value: Decimal) -> Decimal {
    let mut quantized = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven);
    quantized.rescale(PRICE_SCALE);
    quantized
}

/// Values accepted wherever the engine takes a price, score or threshold.
pub trait ToDecimal: fmt::Display {
    /// Exact decimal form of the value, or `None` if it has none
    fn to_decimal(&self) -> Option<Decimal>;
}

impl ToDecimal for Decimal {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl ToDecimal for f64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_f64_retain(*self)
    }
}

impl ToDecimal for f32 {
    fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_f32_retain(*self)
    }
}

impl ToDecimal for i32 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl ToDecimal for i64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl ToDecimal for u32 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl ToDecimal for u64 {
    fn to_decimal(&self) -> Option<Decimal> {
        Some(Decimal::from(*self))
    }
}

impl ToDecimal for str {
    fn to_decimal(&self) -> Option<Decimal> {
        let trimmed = self.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    }
}

impl ToDecimal for String {
    fn to_decimal(&self) -> Option<Decimal> {
        self.as_str().to_decimal()
    }
}

impl<T: ToDecimal + ?Sized> ToDecimal for &T {
    fn to_decimal(&self) -> Option<Decimal> {
        (**self).to_decimal()
    }
}

/// Convert without quantizing. Used where the exact input feeds a
/// derived value (the mid price is rounded once, from exact inputs).
pub(crate) fn convert<T: ToDecimal + ?Sized>(field: &'static str, value: &T) -> Result<Decimal, EngineError> {
    value.to_decimal().ok_or_else(|| EngineError::Conversion {
        field,
        value: value.to_string(),
    })
}

/// Convert and quantize in one step.
pub fn to_price<T: ToDecimal + ?Sized>(field: &'static str, value: &T) -> Result<Decimal, EngineError> {
    convert(field, value).map(quantize)
}
