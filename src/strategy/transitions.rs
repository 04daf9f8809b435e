//! Signal Transition Table
//!
//! Eight guarded rules, evaluated in order. The first rule whose regime and
//! guard both hold fires and nothing after it is looked at.
//!
//! | # | Regime | Guard                                        | From  | Emits | To    |
//! |---|--------|----------------------------------------------|-------|-------|-------|
//! | 1 | trend  | `z > T && prev_z <= T`                       | FLAT  | BOT   | LONG  |
//! | 2 | trend  | `z < -T && z >= -T` (unreachable)            | FLAT  | SLD   | SHORT |
//! | 3 | trend  | `z <= Tc`                                    | LONG  | SLD   | FLAT  |
//! | 4 | trend  | `z >= -Tc`                                   | SHORT | BOT   | FLAT  |
//! | 5 | range  | `z < -T && prev_z >= -T`                     | FLAT  | BOT   | LONG  |
//! | 6 | range  | `z > T && prev_z <= T`                       | FLAT  | SLD   | SHORT |
//! | 7 | range  | `z >= -Tc`                                   | LONG  | SLD   | FLAT  |
//! | 8 | range  | `z <= Tc`                                    | SHORT | BOT   | FLAT  |
//!
//! Rule 2's two clauses contradict each other, so a short is never opened in
//! a trend regime. It is kept exactly as written.
//!
//! The "From" column is the position carried into the evaluation, which is
//! also what `previous_position` holds once the rule has fired.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Position, Regime, Signal};

/// Everything a guard may look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionInput {
    pub regime: Regime,
    pub deviation: Decimal,
    pub previous_deviation: Decimal,
    /// Position held when the evaluation starts
    pub position: Position,
    pub z_threshold: Decimal,
    pub z_close_threshold: Decimal,
}

/// 1-based row number in the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub u8);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.0)
    }
}

/// One row of the table
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: RuleId,
    pub regime: Regime,
    pub from: Position,
    pub emits: Signal,
    pub to: Position,
    pub name: &'static str,
    guard: fn(&TransitionInput) -> bool,
}

impl Rule {
    pub const fn new(
        id: u8,
        regime: Regime,
        from: Position,
        emits: Signal,
        to: Position,
        name: &'static str,
        guard: fn(&TransitionInput) -> bool,
    ) -> Self {
        Self {
            id: RuleId(id),
            regime,
            from,
            emits,
            to,
            name,
            guard,
        }
    }

    /// Regime, starting position and guard all hold
    pub fn matches(&self, input: &TransitionInput) -> bool {
        input.regime == self.regime && input.position == self.from && (self.guard)(input)
    }

    /// The guard clause alone, ignoring regime and position
    pub fn guard_holds(&self, input: &TransitionInput) -> bool {
        (self.guard)(input)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("regime", &self.regime)
            .field("from", &self.from)
            .field("emits", &self.emits)
            .field("to", &self.to)
            .finish()
    }
}

fn enter_on_upcross(input: &TransitionInput) -> bool {
    input.deviation > input.z_threshold && input.previous_deviation <= input.z_threshold
}

fn enter_on_downcross(input: &TransitionInput) -> bool {
    input.deviation < -input.z_threshold && input.previous_deviation >= -input.z_threshold
}

fn trend_short_entry(input: &TransitionInput) -> bool {
    input.deviation < -input.z_threshold && input.deviation >= -input.z_threshold
}

fn at_or_below_close(input: &TransitionInput) -> bool {
    input.deviation <= input.z_close_threshold
}

fn at_or_above_negative_close(input: &TransitionInput) -> bool {
    input.deviation >= -input.z_close_threshold
}

/// The production table, in firing order
pub static RULES: [Rule; 8] = [
    Rule::new(1, Regime::Trend, Position::Flat, Signal::Bot, Position::Long, "trend_enter_long", enter_on_upcross),
    Rule::new(2, Regime::Trend, Position::Flat, Signal::Sld, Position::Short, "trend_enter_short", trend_short_entry),
    Rule::new(3, Regime::Trend, Position::Long, Signal::Sld, Position::Flat, "trend_close_long", at_or_below_close),
    Rule::new(4, Regime::Trend, Position::Short, Signal::Bot, Position::Flat, "trend_close_short", at_or_above_negative_close),
    Rule::new(5, Regime::Range, Position::Flat, Signal::Bot, Position::Long, "range_enter_long", enter_on_downcross),
    Rule::new(6, Regime::Range, Position::Flat, Signal::Sld, Position::Short, "range_enter_short", enter_on_upcross),
    Rule::new(7, Regime::Range, Position::Long, Signal::Sld, Position::Flat, "range_close_long", at_or_above_negative_close),
    Rule::new(8, Regime::Range, Position::Short, Signal::Bot, Position::Flat, "range_close_short", at_or_below_close),
];

/// First rule in `rules` that matches, if any
pub fn first_match<'a>(rules: &'a [Rule], input: &TransitionInput) -> Option<&'a Rule> {
    rules.iter().find(|rule| rule.matches(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rust_decimal_macros::dec;

    fn input(regime: Regime, position: Position, deviation: Decimal, previous_deviation: Decimal) -> TransitionInput {
        TransitionInput {
            regime,
            deviation,
            previous_deviation,
            position,
            z_threshold: dec!(2),
            z_close_threshold: dec!(0.2),
        }
    }

    fn fired(input: &TransitionInput) -> Option<u8> {
        first_match(&RULES, input).map(|rule| rule.id.0)
    }

    #[test]
    fn test_table_is_numbered_in_order() {
        let ids: Vec<u8> = RULES.iter().map(|rule| rule.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_trend_long_entry_needs_upcross() {
        assert_eq!(fired(&input(Regime::Trend, Position::Flat, dec!(2.5), dec!(1.5))), Some(1));
        // already above the threshold on the previous tick
        assert_eq!(fired(&input(Regime::Trend, Position::Flat, dec!(2.5), dec!(2.1))), None);
        // exactly at the threshold is not above it
        assert_eq!(fired(&input(Regime::Trend, Position::Flat, dec!(2), dec!(1.5))), None);
        // previous exactly at the threshold still counts as below
        assert_eq!(fired(&input(Regime::Trend, Position::Flat, dec!(2.00001), dec!(2))), Some(1));
    }

    #[test]
    fn test_trend_short_entry_never_fires() {
        let rule = &RULES[1];
        for z in [dec!(-10), dec!(-2.00001), dec!(-2), dec!(-1.99999), dec!(0), dec!(5)] {
            for prev in [dec!(-3), dec!(0), dec!(3)] {
                let i = input(Regime::Trend, Position::Flat, z, prev);
                assert!(!rule.guard_holds(&i), "rule 2 guard held for z={}", z);
                assert_ne!(fired(&i), Some(2));
            }
        }
    }

    #[test]
    fn test_trend_short_entry_never_fires_randomized() {
        let mut rng = rand::thread_rng();
        for _ in 0..2_000 {
            let threshold = Decimal::new(rng.gen_range(0..1_000_000), 5);
            let z = Decimal::new(rng.gen_range(-2_000_000..2_000_000), 5);
            let mut i = input(Regime::Trend, Position::Flat, z, Decimal::ZERO);
            i.z_threshold = threshold;
            assert!(!RULES[1].guard_holds(&i), "rule 2 held for z={} T={}", z, threshold);
        }
    }

    #[test]
    fn test_trend_closes() {
        assert_eq!(fired(&input(Regime::Trend, Position::Long, dec!(0.2), dec!(2.5))), Some(3));
        assert_eq!(fired(&input(Regime::Trend, Position::Long, dec!(0.20001), dec!(2.5))), None);
        assert_eq!(fired(&input(Regime::Trend, Position::Short, dec!(-0.2), dec!(-3))), Some(4));
        assert_eq!(fired(&input(Regime::Trend, Position::Short, dec!(-0.20001), dec!(-3))), None);
    }

    #[test]
    fn test_range_entries_fade_the_move() {
        assert_eq!(fired(&input(Regime::Range, Position::Flat, dec!(-2.5), dec!(-1))), Some(5));
        assert_eq!(fired(&input(Regime::Range, Position::Flat, dec!(-2.5), dec!(-2.1))), None);
        assert_eq!(fired(&input(Regime::Range, Position::Flat, dec!(2.5), dec!(1))), Some(6));
        assert_eq!(fired(&input(Regime::Range, Position::Flat, dec!(2.5), dec!(2.1))), None);
    }

    #[test]
    fn test_range_closes() {
        assert_eq!(fired(&input(Regime::Range, Position::Long, dec!(-0.2), dec!(-3))), Some(7));
        assert_eq!(fired(&input(Regime::Range, Position::Long, dec!(-0.3), dec!(-3))), None);
        assert_eq!(fired(&input(Regime::Range, Position::Short, dec!(0.2), dec!(3))), Some(8));
        assert_eq!(fired(&input(Regime::Range, Position::Short, dec!(0.3), dec!(3))), None);
    }

    #[test]
    fn test_regime_selects_half_of_table() {
        // the same upcross opens a short under range
        assert_eq!(fired(&input(Regime::Range, Position::Flat, dec!(2.5), dec!(1.5))), Some(6));
        assert_eq!(fired(&input(Regime::Trend, Position::Flat, dec!(-2.5), dec!(-1))), None);
    }

    #[test]
    fn test_first_match_wins() {
        // Rule 1 re-tagged as a range rule overlaps rule 6 exactly
        let widened = Rule { regime: Regime::Range, ..RULES[0] };
        let i = input(Regime::Range, Position::Flat, dec!(2.5), dec!(1.5));
        assert!(widened.matches(&i) && RULES[5].matches(&i));

        assert_eq!(first_match(&[widened, RULES[5]], &i).map(|r| r.id), Some(RuleId(1)));
        assert_eq!(first_match(&[RULES[5], widened], &i).map(|r| r.id), Some(RuleId(6)));
    }

    #[test]
    fn test_no_rule_leaves_nothing() {
        assert_eq!(fired(&input(Regime::Trend, Position::Flat, dec!(0), dec!(0))), None);
        assert_eq!(fired(&input(Regime::Range, Position::Long, dec!(-1), dec!(0))), None);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(RuleId(7).to_string(), "rule 7");
        assert!(format!("{:?}", RULES[2]).contains("trend_close_long"));
    }
}
