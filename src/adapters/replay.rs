//! JSON-lines event replay
//!
//! Reads one `EngineEvent` per line. Blank lines and lines starting with
//! `#` are skipped. Errors carry the 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::application::{DriverStats, EventDriver};
use crate::domain::EngineError;
use crate::ports::{EngineEvent, SignalSink};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read events: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: invalid event: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Line {line}: {source}")]
    Engine {
        line: usize,
        #[source]
        source: EngineError,
    },
}

/// Iterator over the events in a reader, paired with their line numbers
pub fn read_events<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, EngineEvent), ReplayError>> {
    reader.lines().enumerate().filter_map(|(index, line)| {
        let line_no = index + 1;
        match line {
            Err(e) => Some(Err(ReplayError::Io(e))),
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                Some(
                    serde_json::from_str::<EngineEvent>(trimmed)
                        .map(|event| (line_no, event))
                        .map_err(|source| ReplayError::Parse { line: line_no, source }),
                )
            }
        }
    })
}

/// Feed every event from `reader` through `driver`, stopping at the first error
pub fn replay<R, S>(reader: R, driver: &mut EventDriver<S>) -> Result<DriverStats, ReplayError>
where
    R: BufRead,
    S: SignalSink,
{
    for item in read_events(reader) {
        let (line, event) = item?;
        driver
            .dispatch(&event)
            .map_err(|source| ReplayError::Engine { line, source })?;
    }
    Ok(driver.stats())
}

/// Replay a file of events
pub fn replay_file<P, S>(path: P, driver: &mut EventDriver<S>) -> Result<DriverStats, ReplayError>
where
    P: AsRef<Path>,
    S: SignalSink,
{
    let file = File::open(path)?;
    replay(BufReader::new(file), driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sinks::RecordingSink;
    use crate::domain::{Position, Regime, Signal};
    use crate::strategy::ZScoreEngine;
    use std::io::Cursor;

    fn driver() -> EventDriver<RecordingSink> {
        let engine = ZScoreEngine::new(1, 1, "1.5", 0, 1, Position::Flat, Regime::Trend).unwrap();
        EventDriver::new(engine, RecordingSink::new())
    }

    #[test]
    fn test_read_skips_blank_and_comment_lines() {
        let input = "# header\n\n{\"type\":\"tick\",\"bid\":\"1\",\"ask\":\"1\"}\n";
        let events: Vec<_> = read_events(Cursor::new(input)).collect::<Result<_, _>>().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 3);
    }

    #[test]
    fn test_replay_round_trip() {
        let input = r#"{"type":"tick","bid":"2.5","ask":"2.5"}
{"type":"minute","mean":"0","stdev":"1","regime":"trend"}
{"type":"tick","bid":"0.1","ask":"0.1"}
"#;
        let mut driver = driver();
        let stats = replay(Cursor::new(input), &mut driver).unwrap();
        assert_eq!(
            stats,
            DriverStats {
                ticks: 2,
                minutes: 1,
                transitions: 2,
                last_event_at: None
            }
        );

        let signals: Vec<Signal> = driver.sink().transitions().iter().map(|t| t.signal).collect();
        assert_eq!(signals, vec![Signal::Bot, Signal::Sld]);
    }

    #[test]
    fn test_parse_error_has_line_number() {
        let input = "{\"type\":\"tick\",\"bid\":\"1\",\"ask\":\"1\"}\n{\"type\":\"tick\"}\n";
        let err = replay(Cursor::new(input), &mut driver()).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
        assert!(err.to_string().starts_with("Line 2: invalid event"));
    }

    #[test]
    fn test_engine_error_has_line_number() {
        let input = r#"{"type":"minute","mean":"1","stdev":"0","regime":"trend"}
{"type":"tick","bid":"10","ask":"10"}
"#;
        let err = replay(Cursor::new(input), &mut driver()).unwrap_err();
        match err {
            ReplayError::Engine { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(source, EngineError::DivisionByZero { .. }));
            }
            other => panic!("expected engine error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = replay_file("/nonexistent/events.jsonl", &mut driver()).unwrap_err();
        assert!(matches!(err, ReplayError::Io(_)));
    }
}
