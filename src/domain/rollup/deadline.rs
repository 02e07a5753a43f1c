//! Time budget for rollup computation.

use std::time::{Duration, Instant};

use super::RollupError;

/// Point in time after which a rollup must fail instead of returning a
/// partial view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No budget.
    pub fn none() -> Self {
        Deadline(None)
    }

    pub fn at(instant: Instant) -> Self {
        Deadline(Some(instant))
    }

    pub fn after(budget: Duration) -> Self {
        Deadline(Instant::now().checked_add(budget))
    }

    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left, or `None` without a budget.
    pub fn remaining(&self) -> Option<Duration> {
        self.0.map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Fails once the deadline has passed.
    pub fn check(&self) -> Result<(), RollupError> {
        if self.is_expired() {
            Err(RollupError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}
