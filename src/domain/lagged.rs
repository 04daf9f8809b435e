use serde::{Deserialize, Serialize};

/// A value together with the value it replaced.
///
/// `advance` is the only way to change it, so `previous` is always exactly
/// one update behind `current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lagged<T> {
    current: T,
    previous: T,
}

impl<T: Copy> Lagged<T> {
    /// Start with `previous == current`
    pub fn seeded(value: T) -> Self {
        Self {
            current: value,
            previous: value,
        }
    }

    #[must_use]
    pub fn advance(self, next: T) -> Self {
        Self {
            current: next,
            previous: self.current,
        }
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn previous(&self) -> T {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_has_equal_halves() {
        let lag = Lagged::seeded(3);
        assert_eq!(lag.current(), 3);
        assert_eq!(lag.previous(), 3);
    }

    #[test]
    fn test_advance_keeps_one_generation() {
        let lag = Lagged::seeded(1).advance(2).advance(3);
        assert_eq!(lag.current(), 3);
        assert_eq!(lag.previous(), 2);
    }
}
