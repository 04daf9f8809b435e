use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Regime;

/// Input event delivered by a market-data feed or statistics pipeline.
///
/// Serialized internally tagged, one JSON object per line:
///
/// ```text
/// {"type":"tick","bid":"1.10000","ask":"1.10010"}
/// {"type":"minute","mean":"1.1","stdev":"0.01","regime":"trend"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    Tick {
        bid: Decimal,
        ask: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ts: Option<DateTime<Utc>>,
    },
    Minute {
        mean: Decimal,
        stdev: Decimal,
        regime: Regime,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ts: Option<DateTime<Utc>>,
    },
}

impl EngineEvent {
    pub fn tick(bid: Decimal, ask: Decimal) -> Self {
        EngineEvent::Tick { bid, ask, ts: None }
    }

    pub fn minute(mean: Decimal, stdev: Decimal, regime: Regime) -> Self {
        EngineEvent::Minute {
            mean,
            stdev,
            regime,
            ts: None,
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            EngineEvent::Tick { ts, .. } | EngineEvent::Minute { ts, .. } => *ts,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::Tick { .. } => "tick",
            EngineEvent::Minute { .. } => "minute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_tick() {
        let event: EngineEvent = serde_json::from_str(r#"{"type":"tick","bid":"1.1","ask":"1.2"}"#).unwrap();
        assert_eq!(event, EngineEvent::tick(dec!(1.1), dec!(1.2)));
        assert_eq!(event.kind(), "tick");
        assert!(event.timestamp().is_none());
    }

    #[test]
    fn test_parse_minute_with_timestamp() {
        let event: EngineEvent = serde_json::from_str(
            r#"{"type":"minute","mean":"1","stdev":"0.5","regime":"range","ts":"2016-04-04T14:30:00Z"}"#,
        )
        .unwrap();
        match event {
            EngineEvent::Minute { mean, stdev, regime, ts } => {
                assert_eq!(mean, dec!(1));
                assert_eq!(stdev, dec!(0.5));
                assert_eq!(regime, Regime::Range);
                assert_eq!(ts.unwrap().to_rfc3339(), "2016-04-04T14:30:00+00:00");
            }
            other => panic!("expected minute event, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<EngineEvent, _> = serde_json::from_str(r#"{"type":"trade","price":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_omits_missing_timestamp() {
        let json = serde_json::to_string(&EngineEvent::tick(dec!(1), dec!(2))).unwrap();
        assert!(json.contains(r#""type":"tick""#));
        assert!(!json.contains("ts"));
    }
}
