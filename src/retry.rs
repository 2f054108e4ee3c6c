use std::time::Duration;

use crate::{Error, Result};

/// First budget tried in adaptive mode.
pub const ADAPTIVE_INITIAL_BUDGET_MS: u64 = 1_000;

/// Wall-clock budget for one solver attempt, in whole milliseconds.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct TimeBudget(u64);

impl TimeBudget {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn millis(self) -> u64 {
        self.0
    }

    pub fn duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    pub fn doubled(self) -> Self {
        Self(self.0.saturating_mul(2))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Timeout {
    /// One attempt with this budget.
    Fixed(TimeBudget),
    /// Retry with doubling budgets until a tour is found.
    Adaptive,
}

impl Timeout {
    /// `0` selects adaptive mode; positive values are truncated to whole milliseconds.
    pub fn from_secs(secs: f64) -> Result<Self> {
        if secs.is_nan() || secs < 0.0 {
            return Err(Error::invalid_argument("timeout cannot be negative."));
        }
        if secs == 0.0 {
            return Ok(Self::Adaptive);
        }
        // Float-to-int casts saturate, so +inf becomes u64::MAX.
        Ok(Self::Fixed(TimeBudget::from_millis((secs * 1000.0) as u64)))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RetryController {
    timeout: Timeout,
}

impl RetryController {
    pub fn new(timeout: Timeout) -> Self {
        Self { timeout }
    }

    /// Runs `attempt` under the configured policy.
    ///
    /// Only [`Error::SolverTimeout`] triggers a retry, and only in adaptive mode.
    pub fn run<T, F>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut(TimeBudget) -> Result<T>,
    {
        let mut budget = match self.timeout {
            Timeout::Fixed(budget) => {
                log::debug!("retry: mode=fixed budget_ms={}", budget.millis());
                return attempt(budget);
            }
            Timeout::Adaptive => TimeBudget::from_millis(ADAPTIVE_INITIAL_BUDGET_MS),
        };

        let mut attempt_no = 1_usize;
        loop {
            log::debug!(
                "retry: mode=adaptive attempt={attempt_no} budget_ms={}",
                budget.millis()
            );
            match attempt(budget) {
                Err(Error::SolverTimeout { .. }) => {
                    log::info!(
                        "retry: attempt={attempt_no} budget_ms={} found no solution, doubling",
                        budget.millis()
                    );
                    budget = budget.doubled();
                    attempt_no += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RetryController, TimeBudget, Timeout};
    use crate::Error;

    #[test]
    fn timeout_parsing_covers_modes() {
        assert_eq!(Timeout::from_secs(0.0).expect("zero"), Timeout::Adaptive);
        assert_eq!(
            Timeout::from_secs(2.0).expect("two"),
            Timeout::Fixed(TimeBudget::from_millis(2000))
        );
        assert_eq!(
            Timeout::from_secs(1e-4).expect("tiny"),
            Timeout::Fixed(TimeBudget::from_millis(0))
        );
        assert_eq!(
            Timeout::from_secs(1.2345).expect("fraction"),
            Timeout::Fixed(TimeBudget::from_millis(1234))
        );
        assert!(matches!(
            Timeout::from_secs(-1.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            Timeout::from_secs(f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn fixed_mode_makes_one_attempt_and_propagates_timeout() {
        let mut calls = 0;
        let controller = RetryController::new(Timeout::Fixed(TimeBudget::from_millis(5)));
        let result: crate::Result<()> = controller.run(|budget| {
            calls += 1;
            Err(Error::SolverTimeout {
                budget_ms: budget.millis(),
            })
        });

        assert!(matches!(result, Err(Error::SolverTimeout { budget_ms: 5 })));
        assert_eq!(calls, 1);
    }

    #[test]
    fn adaptive_mode_doubles_from_one_second() {
        let mut budgets = Vec::new();
        let controller = RetryController::new(Timeout::Adaptive);
        let value = controller
            .run(|budget| {
                budgets.push(budget.millis());
                if budgets.len() < 4 {
                    Err(Error::SolverTimeout {
                        budget_ms: budget.millis(),
                    })
                } else {
                    Ok("tour")
                }
            })
            .expect("fourth attempt succeeds");

        assert_eq!(value, "tour");
        assert_eq!(budgets, vec![1000, 2000, 4000, 8000]);
    }

    #[test]
    fn adaptive_mode_does_not_retry_other_errors() {
        let mut calls = 0;
        let controller = RetryController::new(Timeout::Adaptive);
        let result: crate::Result<()> = controller.run(|_| {
            calls += 1;
            Err(Error::invalid_tour("broken"))
        });

        assert!(matches!(result, Err(Error::InvalidTour(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn doubling_saturates() {
        assert_eq!(
            TimeBudget::from_millis(u64::MAX).doubled(),
            TimeBudget::from_millis(u64::MAX)
        );
    }
}
