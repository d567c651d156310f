//! Uniform integer sampling over inclusive bounds.

use rant_core::UsageError;

use crate::session::Session;

/// Default upper bound for unbounded integer draws.
///
/// A quarter of `i64::MAX`, so `INTEGER_MAX - INTEGER_MIN + 1` fits in an
/// `i64` and the span can be handed to the source without widening.
pub const INTEGER_MAX: i64 = ((1 << 62) - 1) / 2;

/// Default lower bound for unbounded integer draws.
pub const INTEGER_MIN: i64 = -INTEGER_MAX;

impl Session {
    /// Draw uniformly from `lo..=hi`.
    pub fn range(&mut self, lo: i64, hi: i64) -> Result<i64, UsageError> {
        if lo > hi {
            return Err(UsageError::EmptyRange { lo, hi });
        }
        let span = u64::try_from(i128::from(hi) - i128::from(lo) + 1)
            .map_err(|_| UsageError::RangeTooWide { lo, hi })?;
        Ok(self.draw(lo, span))
    }

    /// Draw uniformly between optional bounds.
    ///
    /// A missing bound defaults to [`INTEGER_MIN`] or [`INTEGER_MAX`].
    pub fn range_opt(&mut self, lo: Option<i64>, hi: Option<i64>) -> Result<i64, UsageError> {
        self.range(lo.unwrap_or(INTEGER_MIN), hi.unwrap_or(INTEGER_MAX))
    }

    /// Draw from `-n..=n`, or from the default range when `n` is `None`.
    pub fn integer(&mut self, n: Option<i64>) -> Result<i64, UsageError> {
        match n {
            Some(n) if n < 0 => Err(UsageError::NegativeBound(n)),
            Some(n) => self.range(-n, n),
            None => self.range(INTEGER_MIN, INTEGER_MAX),
        }
    }

    /// Draw from `0..=INTEGER_MAX`.
    pub fn positive_integer(&mut self) -> i64 {
        self.draw(0, INTEGER_MAX as u64 + 1)
    }

    pub fn bool(&mut self) -> bool {
        self.draw(0, 2) == 0
    }

    /// Draw uniformly from `[0, 1)`.
    pub fn float(&mut self) -> f64 {
        self.source.next_uniform_real()
    }

    /// `lo + offset` for an offset drawn from `[0, span)`.
    fn draw(&mut self, lo: i64, span: u64) -> i64 {
        debug_assert!(span > 0, "span must be positive");
        let offset = self.source.next_uniform(span);
        // lo + offset never exceeds the caller's upper bound.
        (i128::from(lo) + i128::from(offset)) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_span_fits_i64() {
        assert_eq!(INTEGER_MAX, (1 << 61) - 1);
        assert!(INTEGER_MAX.checked_sub(INTEGER_MIN).and_then(|d| d.checked_add(1)).is_some());
    }

    #[test]
    fn test_range_stays_in_bounds() {
        let mut s = Session::with_seed(12345);
        for _ in 0..1000 {
            let x = s.range(-3, 7).unwrap();
            assert!((-3..=7).contains(&x));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut s = Session::with_seed(12345);
        for _ in 0..100 {
            assert_eq!(s.range(42, 42), Ok(42));
        }
    }

    #[test]
    fn test_range_hits_both_ends() {
        let mut s = Session::with_seed(12345);
        let draws: Vec<i64> = (0..200).map(|_| s.range(0, 1).unwrap()).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&1));
    }

    #[test]
    fn test_empty_range_fails() {
        let mut s = Session::with_seed(12345);
        assert_eq!(s.range(5, 4), Err(UsageError::EmptyRange { lo: 5, hi: 4 }));
    }

    #[test]
    fn test_full_i64_range_is_too_wide() {
        let mut s = Session::with_seed(12345);
        assert_eq!(
            s.range(i64::MIN, i64::MAX),
            Err(UsageError::RangeTooWide {
                lo: i64::MIN,
                hi: i64::MAX
            })
        );
        // One short of the full range still fits.
        assert!(s.range(i64::MIN + 1, i64::MAX).is_ok());
    }

    #[test]
    fn test_range_opt_defaults() {
        let mut s = Session::with_seed(12345);
        for _ in 0..100 {
            let x = s.range_opt(None, None).unwrap();
            assert!((INTEGER_MIN..=INTEGER_MAX).contains(&x));
            let y = s.range_opt(Some(10), None).unwrap();
            assert!((10..=INTEGER_MAX).contains(&y));
        }
    }

    #[test]
    fn test_integer_symmetric() {
        let mut s = Session::with_seed(12345);
        for _ in 0..500 {
            let x = s.integer(Some(4)).unwrap();
            assert!((-4..=4).contains(&x));
        }
        assert_eq!(s.integer(Some(0)), Ok(0));
        assert_eq!(s.integer(Some(-1)), Err(UsageError::NegativeBound(-1)));
    }

    #[test]
    fn test_positive_integer() {
        let mut s = Session::with_seed(12345);
        for _ in 0..500 {
            let x = s.positive_integer();
            assert!((0..=INTEGER_MAX).contains(&x));
        }
    }

    #[test]
    fn test_bool_takes_both_values() {
        let mut s = Session::with_seed(12345);
        let trues = (0..1000).filter(|_| s.bool()).count();
        assert!((400..=600).contains(&trues), "got {} trues", trues);
    }

    #[test]
    fn test_float_unit_interval() {
        let mut s = Session::with_seed(12345);
        for _ in 0..500 {
            let x = s.float();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
