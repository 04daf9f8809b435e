//! Minute-level statistical parameters and the market regime flag

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::decimal::{to_price, ToDecimal};
use super::error::{EngineError, ParseLabelError};

/// Market behaviour classification; selects which half of the rule table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Trend,
    Range,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Trend => f.pad("trend"),
            Regime::Range => f.pad("range"),
        }
    }
}

impl FromStr for Regime {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trend" => Ok(Regime::Trend),
            "range" => Ok(Regime::Range),
            _ => Err(ParseLabelError::new("regime", s)),
        }
    }
}

/// Rolling mean, rolling stdev and regime, refreshed once a minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticalParameters {
    pub mean: Decimal,
    pub stdev: Decimal,
    pub regime: Regime,
}

impl StatisticalParameters {
    /// Quantizes mean and stdev. Both convert before either is kept.
    pub fn new<M, S>(mean: M, stdev: S, regime: Regime) -> Result<Self, EngineError>
    where
        M: ToDecimal,
        S: ToDecimal,
    {
        let mean = to_price("mean", &mean)?;
        let stdev = to_price("stdev", &stdev)?;
        Ok(Self { mean, stdev, regime })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_regime_parsing() {
        assert_eq!("trend".parse::<Regime>().unwrap(), Regime::Trend);
        assert_eq!(" RANGE ".parse::<Regime>().unwrap(), Regime::Range);
        let err = "sideways".parse::<Regime>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown regime 'sideways'");
    }

    #[test]
    fn test_regime_display_round_trips() {
        for regime in [Regime::Trend, Regime::Range] {
            assert_eq!(regime.to_string().parse::<Regime>().unwrap(), regime);
        }
    }

    #[test]
    fn test_parameters_are_quantized() {
        let params = StatisticalParameters::new("1.1234567", 0.2f64, Regime::Range).unwrap();
        assert_eq!(params.mean, dec!(1.12346));
        assert_eq!(params.stdev, dec!(0.20000));
    }

    #[test]
    fn test_zero_stdev_is_accepted() {
        // only the deviation calculation rejects a zero stdev
        let params = StatisticalParameters::new(1, 0, Regime::Trend).unwrap();
        assert!(params.stdev.is_zero());
    }
}
