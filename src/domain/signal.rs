use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParseLabelError;

/// Last signal emitted by the engine. Sticky until the next transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    /// Nothing emitted yet
    #[default]
    None,
    /// Bought
    Bot,
    /// Sold
    Sld,
}

impl Signal {
    pub fn is_buy(&self) -> bool {
        matches!(self, Signal::Bot)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Signal::Sld)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::None => f.pad("NONE"),
            Signal::Bot => f.pad("BOT"),
            Signal::Sld => f.pad("SLD"),
        }
    }
}

impl FromStr for Signal {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Signal::None),
            "BOT" => Ok(Signal::Bot),
            "SLD" => Ok(Signal::Sld),
            _ => Err(ParseLabelError::new("signal", s)),
        }
    }
}
