//! Event Driver
//!
//! Owns one engine and applies events to it strictly in arrival order.
//! Fired transitions are handed to a `SignalSink`. The driver is the single
//! dispatcher the engine expects: it takes `&mut self`, so concurrent
//! delivery needs an external lock around the whole driver.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::EngineError;
use crate::ports::{EngineEvent, SignalSink};
use crate::strategy::{Transition, ZScoreEngine};

/// Counters kept while dispatching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DriverStats {
    pub ticks: u64,
    pub minutes: u64,
    pub transitions: u64,
    /// Latest event timestamp seen; events without `ts` leave it as is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_at: Option<DateTime<Utc>>,
}

/// Serial dispatcher for one engine
pub struct EventDriver<S: SignalSink> {
    engine: ZScoreEngine,
    sink: S,
    stats: DriverStats,
}

impl<S: SignalSink> EventDriver<S> {
    pub fn new(engine: ZScoreEngine, sink: S) -> Self {
        Self {
            engine,
            sink,
            stats: DriverStats::default(),
        }
    }

    /// Apply one event. Returns the transition it fired, if any.
    ///
    /// Errors are returned as-is; the engine keeps whatever partial update
    /// the failing call had already made.
    pub fn dispatch(&mut self, event: &EngineEvent) -> Result<Option<Transition>, EngineError> {
        match event.timestamp() {
            Some(ts) => {
                tracing::debug!("Dispatching {} event at {}", event.kind(), ts.to_rfc3339());
                self.stats.last_event_at = Some(ts);
            }
            None => tracing::debug!("Dispatching {} event", event.kind()),
        }

        match event {
            EngineEvent::Tick { bid, ask, .. } => {
                self.stats.ticks += 1;
                let evaluation = self.engine.on_tick(*bid, *ask)?;
                if let Some(transition) = evaluation.transition {
                    self.stats.transitions += 1;
                    self.sink.publish(&transition, self.engine.state());
                }
                Ok(evaluation.transition)
            }
            EngineEvent::Minute { mean, stdev, regime, .. } => {
                self.stats.minutes += 1;
                self.engine.on_minute(*mean, *stdev, *regime)?;
                Ok(None)
            }
        }
    }

    /// Apply events in order, stopping at the first error
    pub fn dispatch_all<'a, I>(&mut self, events: I) -> Result<DriverStats, EngineError>
    where
        I: IntoIterator<Item = &'a EngineEvent>,
    {
        for event in events {
            self.dispatch(event)?;
        }
        Ok(self.stats)
    }

    pub fn engine(&self) -> &ZScoreEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ZScoreEngine {
        &mut self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    pub fn into_parts(self) -> (ZScoreEngine, S) {
        (self.engine, self.sink)
    }
}
