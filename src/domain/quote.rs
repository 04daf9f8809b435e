//! Top-of-book quote and its mid price

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::decimal::{convert, quantize, ToDecimal};
use super::error::EngineError;

/// A quantized bid/ask pair with its derived mid price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: Decimal,
    pub ask: Decimal,
    /// `round((bid + ask) / 2, 5)`, computed from the exact inputs
    pub mid: Decimal,
}

impl Quote {
    /// Build a quote. Both sides are converted before anything is
    /// rounded, so a bad ask never leaves a half-built quote behind.
    pub fn new<B, A>(bid: B, ask: A) -> Result<Self, EngineError>
    where
        B: ToDecimal,
        A: ToDecimal,
    {
        let bid = convert("bid", &bid)?;
        let ask = convert("ask", &ask)?;
        let mid = mid_price(bid, ask)?;

        Ok(Self {
            bid: quantize(bid),
            ask: quantize(ask),
            mid,
        })
    }

    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// Average of bid and ask, rounded to five places
pub fn mid_price(bid: Decimal, ask: Decimal) -> Result<Decimal, EngineError> {
    bid.checked_add(ask)
        .and_then(|sum| sum.checked_div(Decimal::TWO))
        .map(quantize)
        .ok_or_else(|| EngineError::Conversion {
            field: "mid",
            value: format!("({} + {}) / 2", bid, ask),
        })
}
