//! The retry engine: repeated generation under a bounded attempt budget.
//!
//! Every attempt, produced or rejected, spends one unit of budget. A run
//! for `required` values gets `required * retry_multiplier` units; running
//! out before enough values were produced is a terminal failure.

use rant_core::{GenError, Interrupt, Step, UsageError};
use tracing::{debug, trace};

use crate::session::Session;

/// Attempt accounting for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    required: usize,
    limit: usize,
    remaining: usize,
    produced: usize,
    failed_attempts: usize,
}

impl RetryBudget {
    pub fn new(required: usize, retry_multiplier: usize) -> Result<Self, UsageError> {
        if retry_multiplier == 0 {
            return Err(UsageError::ZeroRetryMultiplier);
        }
        let limit = required.saturating_mul(retry_multiplier);
        Ok(Self {
            required,
            limit,
            remaining: limit,
            produced: 0,
            failed_attempts: 0,
        })
    }

    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.produced >= self.required
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    fn record_success(&mut self) {
        debug_assert!(self.remaining > 0);
        self.remaining -= 1;
        self.produced += 1;
    }

    fn record_rejection(&mut self) {
        debug_assert!(self.remaining > 0);
        self.remaining -= 1;
        self.failed_attempts += 1;
    }

    fn exhausted_error(&self) -> GenError {
        GenError::TooManyTries {
            limit: self.limit,
            failed_attempts: self.failed_attempts,
        }
    }

    #[must_use]
    pub fn stats(&self) -> RetryStats {
        RetryStats {
            produced: self.produced,
            failed_attempts: self.failed_attempts,
            attempts: self.limit - self.remaining,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryStats {
    pub produced: usize,
    pub failed_attempts: usize,
    /// Budget units spent.
    pub attempts: usize,
}

impl std::fmt::Display for RetryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "produced={} failed_attempts={} attempts={}",
            self.produced, self.failed_attempts, self.attempts
        )
    }
}

impl Session {
    /// Run `procedure` until it has produced `required` values.
    ///
    /// Guard rejections are retried while budget remains. Usage errors and
    /// budget exhaustion end the run; values already handed to `on_success`
    /// stay delivered.
    pub fn generate<T>(
        &mut self,
        required: usize,
        retry_multiplier: usize,
        mut procedure: impl FnMut(&mut Session) -> Step<T>,
        mut on_success: impl FnMut(T),
    ) -> Result<RetryStats, GenError> {
        let mut budget = RetryBudget::new(required, retry_multiplier)?;

        while !budget.is_satisfied() {
            if budget.is_exhausted() {
                let err = budget.exhausted_error();
                debug!(
                    required,
                    limit = budget.limit,
                    failed_attempts = budget.failed_attempts,
                    "Generation budget exhausted"
                );
                return Err(err);
            }

            match procedure(self) {
                Ok(value) => {
                    budget.record_success();
                    on_success(value);
                }
                Err(Interrupt::Rejected) => {
                    budget.record_rejection();
                    trace!(
                        failed_attempts = budget.failed_attempts,
                        remaining = budget.remaining,
                        "Guard rejected attempt"
                    );
                }
                Err(Interrupt::Failed(err)) => return Err(err),
            }
        }

        let stats = budget.stats();
        debug!(%stats, "Generation complete");
        Ok(stats)
    }

    /// Call `handler` with each of `n` generated values, in order.
    pub fn each<T>(
        &mut self,
        n: usize,
        procedure: impl FnMut(&mut Session) -> Step<T>,
        handler: impl FnMut(T),
    ) -> Result<RetryStats, GenError> {
        let retry_multiplier = self.retry_multiplier();
        self.generate(n, retry_multiplier, procedure, handler)
    }

    /// Generate a single value.
    pub fn value<T>(&mut self, procedure: impl FnMut(&mut Session) -> Step<T>) -> Result<T, GenError> {
        let mut produced = None;
        let stats = self.each(1, procedure, |value| produced = Some(value))?;
        produced.ok_or(GenError::TooManyTries {
            limit: stats.attempts,
            failed_attempts: stats.failed_attempts,
        })
    }

    /// Collect `n` generated values.
    pub fn sample<T>(
        &mut self,
        n: usize,
        procedure: impl FnMut(&mut Session) -> Step<T>,
    ) -> Result<Vec<T>, GenError> {
        let mut values = Vec::with_capacity(n);
        self.each(n, procedure, |value| values.push(value))?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_rejecting_spends_one_unit_per_value() {
        let mut s = Session::with_seed(12345);
        let mut delivered = Vec::new();

        let stats = s
            .generate(5, 3, |s| Ok(s.range(0, 9)?), |v| delivered.push(v))
            .unwrap();

        assert_eq!(delivered.len(), 5);
        assert_eq!(
            stats,
            RetryStats {
                produced: 5,
                failed_attempts: 0,
                attempts: 5
            }
        );
    }

    #[test]
    fn test_always_rejecting_exhausts_budget() {
        let mut s = Session::with_seed(12345);
        let mut calls = 0;

        let err = s
            .generate(
                4,
                10,
                |s| {
                    calls += 1;
                    s.guard(false)
                },
                |_| panic!("nothing should be produced"),
            )
            .unwrap_err();

        assert_eq!(
            err,
            GenError::TooManyTries {
                limit: 40,
                failed_attempts: 40
            }
        );
        assert_eq!(calls, 40);
    }

    #[test]
    fn test_zero_required_runs_nothing() {
        let mut s = Session::with_seed(12345);
        let mut calls = 0;

        let stats = s
            .generate(
                0,
                10,
                |_| {
                    calls += 1;
                    Ok(())
                },
                |_| {},
            )
            .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(stats.attempts, 0);
    }

    #[test]
    fn test_zero_multiplier_is_usage_error() {
        let mut s = Session::with_seed(12345);
        let result = s.generate(1, 0, |_| Ok(()), |_| {});
        assert_eq!(result, Err(GenError::Usage(UsageError::ZeroRetryMultiplier)));
    }

    #[test]
    fn test_rejections_are_retried() {
        let mut s = Session::with_seed(12345);

        let evens = s
            .sample(20, |s| {
                let n = s.range(0, 100)?;
                s.guard(n % 2 == 0)?;
                Ok(n)
            })
            .unwrap();

        assert_eq!(evens.len(), 20);
        assert!(evens.iter().all(|n| n % 2 == 0));
    }

    #[test]
    fn test_usage_error_is_not_retried() {
        let mut s = Session::with_seed(12345);
        let mut calls = 0;

        let result = s.each(
            3,
            |s| {
                calls += 1;
                s.call("no_such_generator", &[])
            },
            |_| {},
        );

        assert_eq!(
            result,
            Err(GenError::Usage(UsageError::UnknownGenerator(
                "no_such_generator".to_string()
            )))
        );
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_each_preserves_order() {
        let mut s = Session::with_seed(12345);
        let mut counter = 0;
        let mut seen = Vec::new();

        s.each(
            5,
            |_| {
                counter += 1;
                Ok(counter)
            },
            |v| seen.push(v),
        )
        .unwrap();

        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_value_returns_first_success() {
        let mut s = Session::with_seed(12345);
        let mut calls = 0;

        let value = s
            .value(|s| {
                calls += 1;
                s.guard(calls >= 3)?;
                Ok(calls)
            })
            .unwrap();

        assert_eq!(value, 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_value_respects_session_multiplier() {
        let mut s = Session::with_seed(12345);
        s.set_retry_multiplier(2).unwrap();

        let err = s.value(|s| s.guard(false)).unwrap_err();
        assert_eq!(
            err,
            GenError::TooManyTries {
                limit: 2,
                failed_attempts: 2
            }
        );
    }

    #[test]
    fn test_each_uses_session_multiplier() {
        let mut s = Session::with_seed(12345);
        s.set_retry_multiplier(3).unwrap();

        let err = s.each(2, |s| s.guard(false), |_: ()| {}).unwrap_err();
        assert_eq!(
            err,
            GenError::TooManyTries {
                limit: 6,
                failed_attempts: 6
            }
        );
    }

    #[test]
    fn test_nested_exhaustion_propagates() {
        let mut s = Session::with_seed(12345);
        s.set_retry_multiplier(1).unwrap();

        let mut outer_calls = 0;
        let result = s.sample(2, |s| {
            outer_calls += 1;
            let inner = s.value(|s| s.guard(false))?;
            Ok(inner)
        });

        assert_eq!(
            result,
            Err(GenError::TooManyTries {
                limit: 1,
                failed_attempts: 1
            })
        );
        assert_eq!(outer_calls, 1);
    }

    #[test]
    fn test_budget_accounting() {
        let mut budget = RetryBudget::new(2, 2).unwrap();
        assert!(!budget.is_satisfied());

        budget.record_rejection();
        budget.record_success();
        budget.record_success();

        assert!(budget.is_satisfied());
        assert!(!budget.is_exhausted());
        assert_eq!(budget.stats().to_string(), "produced=2 failed_attempts=1 attempts=3");
    }
}
