use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParseLabelError;

/// Exposure held by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Flat,
    Long,
    Short,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Flat => f.pad("FLAT"),
            Position::Long => f.pad("LONG"),
            Position::Short => f.pad("SHORT"),
        }
    }
}

impl FromStr for Position {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FLAT" => Ok(Position::Flat),
            "LONG" => Ok(Position::Long),
            "SHORT" => Ok(Position::Short),
            _ => Err(ParseLabelError::new("position", s)),
        }
    }
}
