//! Z-Score Signal Engine
//!
//! One engine per instrument. Two event kinds drive it:
//!
//! - **tick** (`on_tick`): quote -> mid price -> deviation score -> rule table
//! - **minute** (`on_minute`): replaces mean, stdev and regime; never signals
//!
//! State lives in an [`EngineState`] value. Every update builds the next
//! state from the last one, and each lane (quote, deviation, mean/stdev,
//! regime) keeps exactly one generation of history.
//!
//! The engine is not thread-safe and not reentrant; callers deliver events
//! serially.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    quantize, to_price, EngineError, Lagged, Position, Quote, Regime, Signal, StatisticalParameters, ToDecimal,
};
use crate::strategy::deviation::deviation_score;
use crate::strategy::params::EngineParams;
use crate::strategy::transitions::{first_match, Rule, RuleId, TransitionInput, RULES};

/// Initial values for a new engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSeed {
    pub bid: Decimal,
    pub ask: Decimal,
    pub deviation: Decimal,
    pub mean: Decimal,
    pub stdev: Decimal,
    /// Accepted for compatibility; the engine always starts FLAT
    #[serde(default)]
    pub position: Position,
    pub regime: Regime,
}

/// A fired rule and the state change it caused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub rule: RuleId,
    pub signal: Signal,
    pub previous_signal: Signal,
    pub position: Position,
    pub previous_position: Position,
    /// Deviation score that triggered the rule
    pub deviation: Decimal,
    /// Mid price of the triggering tick
    pub mid: Decimal,
}

/// Outcome of one evaluation of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub signal: Signal,
    pub position: Position,
    /// `None` when no rule matched and the state was left as is
    pub transition: Option<Transition>,
}

impl Evaluation {
    pub fn fired(&self) -> bool {
        self.transition.is_some()
    }
}

/// Complete engine state: current values, their one-step lag, position,
/// signal and parameters.
///
/// Fields are private so the position pair and signal pair can only move
/// together, through [`EngineState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    quote: Lagged<Quote>,
    deviation: Lagged<Decimal>,
    mean: Lagged<Decimal>,
    stdev: Lagged<Decimal>,
    regime: Lagged<Regime>,
    position: Position,
    previous_position: Position,
    signal: Signal,
    previous_signal: Signal,
    params: EngineParams,
}

impl EngineState {
    /// Fresh state: FLAT, no signal, previous values equal to the seed
    pub fn seeded(quote: Quote, deviation: Decimal, statistics: StatisticalParameters, params: EngineParams) -> Self {
        Self {
            quote: Lagged::seeded(quote),
            deviation: Lagged::seeded(quantize(deviation)),
            mean: Lagged::seeded(statistics.mean),
            stdev: Lagged::seeded(statistics.stdev),
            regime: Lagged::seeded(statistics.regime),
            position: Position::Flat,
            previous_position: Position::Flat,
            signal: Signal::None,
            previous_signal: Signal::None,
            params: params.quantized(),
        }
    }

    #[must_use]
    pub fn with_quote(self, quote: Quote) -> Self {
        Self {
            quote: self.quote.advance(quote),
            ..self
        }
    }

    #[must_use]
    pub fn with_deviation(self, deviation: Decimal) -> Self {
        Self {
            deviation: self.deviation.advance(quantize(deviation)),
            ..self
        }
    }

    /// Advance mean, stdev and regime together
    #[must_use]
    pub fn with_statistics(self, statistics: StatisticalParameters) -> Self {
        self.with_moments(statistics.mean, statistics.stdev)
            .with_regime(statistics.regime)
    }

    /// Advance mean and stdev; the regime lane is left alone
    #[must_use]
    pub fn with_moments(self, mean: Decimal, stdev: Decimal) -> Self {
        Self {
            mean: self.mean.advance(quantize(mean)),
            stdev: self.stdev.advance(quantize(stdev)),
            ..self
        }
    }

    #[must_use]
    pub fn with_regime(self, regime: Regime) -> Self {
        Self {
            regime: self.regime.advance(regime),
            ..self
        }
    }

    #[must_use]
    pub fn with_params(self, params: EngineParams) -> Self {
        Self {
            params: params.quantized(),
            ..self
        }
    }

    /// Fire `rule`: remember the outgoing position and signal, then take
    /// the rule's.
    #[must_use]
    pub fn apply(self, rule: &Rule) -> Self {
        Self {
            previous_position: self.position,
            previous_signal: self.signal,
            position: rule.to,
            signal: rule.emits,
            ..self
        }
    }

    /// Guard inputs for the current values
    pub fn transition_input(&self) -> TransitionInput {
        TransitionInput {
            regime: self.regime.current(),
            deviation: self.deviation.current(),
            previous_deviation: self.deviation.previous(),
            position: self.position,
            z_threshold: self.params.z_threshold,
            z_close_threshold: self.params.z_close_threshold,
        }
    }

    pub fn quote(&self) -> Quote {
        self.quote.current()
    }

    pub fn previous_quote(&self) -> Quote {
        self.quote.previous()
    }

    pub fn deviation(&self) -> Decimal {
        self.deviation.current()
    }

    pub fn previous_deviation(&self) -> Decimal {
        self.deviation.previous()
    }

    pub fn statistics(&self) -> StatisticalParameters {
        StatisticalParameters {
            mean: self.mean.current(),
            stdev: self.stdev.current(),
            regime: self.regime.current(),
        }
    }

    pub fn previous_statistics(&self) -> StatisticalParameters {
        StatisticalParameters {
            mean: self.mean.previous(),
            stdev: self.stdev.previous(),
            regime: self.regime.previous(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn previous_position(&self) -> Position {
        self.previous_position
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    pub fn previous_signal(&self) -> Signal {
        self.previous_signal
    }

    pub fn params(&self) -> EngineParams {
        self.params
    }
}

/// Event-driven z-score decision engine for a single instrument
#[derive(Debug, Clone)]
pub struct ZScoreEngine {
    state: EngineState,
}

impl ZScoreEngine {
    /// Create an engine from seed values.
    ///
    /// `init_position` is accepted but **ignored**: the engine always starts
    /// FLAT with signal NONE, whatever the caller passes. Thresholds start
    /// at [`EngineParams::default`] until [`configure`](Self::configure).
    pub fn new<B, A, D, M, S>(
        init_bid: B,
        init_ask: A,
        init_deviation: D,
        init_mean: M,
        init_stdev: S,
        init_position: Position,
        init_regime: Regime,
    ) -> Result<Self, EngineError>
    where
        B: ToDecimal,
        A: ToDecimal,
        D: ToDecimal,
        M: ToDecimal,
        S: ToDecimal,
    {
        let quote = Quote::new(init_bid, init_ask)?;
        let deviation = to_price("deviation", &init_deviation)?;
        let statistics = StatisticalParameters::new(init_mean, init_stdev, init_regime)?;

        if !init_position.is_flat() {
            tracing::warn!("Initial position {} ignored - engine starts FLAT", init_position);
        }

        let state = EngineState::seeded(quote, deviation, statistics, EngineParams::default());
        tracing::debug!(
            "Engine seeded: bid={} ask={} mid={} z={} mean={} stdev={} regime={}",
            quote.bid,
            quote.ask,
            quote.mid,
            state.deviation(),
            statistics.mean,
            statistics.stdev,
            statistics.regime
        );

        Ok(Self { state })
    }

    /// Create an engine from a deserialized seed
    pub fn from_seed(seed: &EngineSeed) -> Result<Self, EngineError> {
        Self::new(
            seed.bid,
            seed.ask,
            seed.deviation,
            seed.mean,
            seed.stdev,
            seed.position,
            seed.regime,
        )
    }

    /// Set thresholds and windows. Safe to call again; the last call wins.
    pub fn configure(&mut self, params: EngineParams) {
        self.state = self.state.with_params(params);
        tracing::debug!(
            "Engine configured: sma_window={} stdev_window={} z_threshold={} z_close_threshold={}",
            params.sma_window,
            params.stdev_window,
            self.state.params().z_threshold,
            self.state.params().z_close_threshold
        );
    }

    /// Store a new bid/ask and return its mid price.
    ///
    /// On a conversion error nothing changes.
    pub fn update_quote<B, A>(&mut self, bid: B, ask: A) -> Result<Decimal, EngineError>
    where
        B: ToDecimal,
        A: ToDecimal,
    {
        let quote = Quote::new(bid, ask)?;
        self.state = self.state.with_quote(quote);
        Ok(quote.mid)
    }

    /// Score `mid` against the current statistics and store the result.
    ///
    /// A zero stdev fails with [`EngineError::DivisionByZero`] and leaves the
    /// deviation lane untouched.
    pub fn compute_deviation(&mut self, mid: Decimal) -> Result<Decimal, EngineError> {
        let score = deviation_score(quantize(mid), &self.state.statistics())?;
        self.state = self.state.with_deviation(score);
        Ok(score)
    }

    /// Run the rule table once against the current state
    pub fn evaluate(&mut self) -> Evaluation {
        let input = self.state.transition_input();

        let transition = first_match(&RULES, &input).map(|rule| {
            self.state = self.state.apply(rule);
            let transition = Transition {
                rule: rule.id,
                signal: self.state.signal(),
                previous_signal: self.state.previous_signal(),
                position: self.state.position(),
                previous_position: self.state.previous_position(),
                deviation: input.deviation,
                mid: self.state.quote().mid,
            };
            tracing::info!(
                "{} ({}) fired: {} | {} -> {} | z={} prev_z={} regime={}",
                rule.id,
                rule.name,
                transition.signal,
                transition.previous_position,
                transition.position,
                input.deviation,
                input.previous_deviation,
                input.regime
            );
            transition
        });

        Evaluation {
            signal: self.state.signal(),
            position: self.state.position(),
            transition,
        }
    }

    /// Process a tick: quote, deviation, then the rule table.
    ///
    /// Not atomic across steps: if the deviation fails the quote has already
    /// been stored, while the deviation, position and signal stay stale.
    pub fn on_tick<B, A>(&mut self, bid: B, ask: A) -> Result<Evaluation, EngineError>
    where
        B: ToDecimal,
        A: ToDecimal,
    {
        let mid = self.update_quote(bid, ask)?;
        let deviation = self.compute_deviation(mid).map_err(|e| {
            tracing::warn!("Tick at mid {} left unscored: {}", mid, e);
            e
        })?;
        tracing::debug!("Tick: mid={} z={}", mid, deviation);
        Ok(self.evaluate())
    }

    /// Replace mean and stdev. Only their lag advances; the regime and
    /// `previous_regime` are untouched.
    pub fn update_statistics<M, S>(&mut self, mean: M, stdev: S) -> Result<(), EngineError>
    where
        M: ToDecimal,
        S: ToDecimal,
    {
        let mean = to_price("mean", &mean)?;
        let stdev = to_price("stdev", &stdev)?;
        self.state = self.state.with_moments(mean, stdev);
        Ok(())
    }

    /// Replace the regime. Mean, stdev and their previous values are untouched.
    pub fn update_regime(&mut self, regime: Regime) {
        self.state = self.state.with_regime(regime);
    }

    /// Process a minute event. Updates statistics and regime in one step;
    /// never evaluates the rule table.
    pub fn on_minute<M, S>(&mut self, mean: M, stdev: S, regime: Regime) -> Result<(), EngineError>
    where
        M: ToDecimal,
        S: ToDecimal,
    {
        let next = StatisticalParameters::new(mean, stdev, regime)?;
        self.state = self.state.with_statistics(next);
        tracing::debug!("Minute: mean={} stdev={} regime={}", next.mean, next.stdev, next.regime);
        Ok(())
    }

    /// Snapshot of the full state
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn params(&self) -> EngineParams {
        self.state.params()
    }

    pub fn bid(&self) -> Decimal {
        self.state.quote().bid
    }

    pub fn ask(&self) -> Decimal {
        self.state.quote().ask
    }

    pub fn mid(&self) -> Decimal {
        self.state.quote().mid
    }

    pub fn deviation(&self) -> Decimal {
        self.state.deviation()
    }

    pub fn mean(&self) -> Decimal {
        self.state.statistics().mean
    }

    pub fn stdev(&self) -> Decimal {
        self.state.statistics().stdev
    }

    pub fn regime(&self) -> Regime {
        self.state.statistics().regime
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn signal(&self) -> Signal {
        self.state.signal()
    }

    pub fn previous_bid(&self) -> Decimal {
        self.state.previous_quote().bid
    }

    pub fn previous_ask(&self) -> Decimal {
        self.state.previous_quote().ask
    }

    pub fn previous_mid(&self) -> Decimal {
        self.state.previous_quote().mid
    }

    pub fn previous_deviation(&self) -> Decimal {
        self.state.previous_deviation()
    }

    pub fn previous_mean(&self) -> Decimal {
        self.state.previous_statistics().mean
    }

    pub fn previous_stdev(&self) -> Decimal {
        self.state.previous_statistics().stdev
    }

    pub fn previous_regime(&self) -> Regime {
        self.state.previous_statistics().regime
    }

    pub fn previous_position(&self) -> Position {
        self.state.previous_position()
    }

    pub fn previous_signal(&self) -> Signal {
        self.state.previous_signal()
    }
}
