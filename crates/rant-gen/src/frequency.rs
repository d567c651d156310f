//! Weighted choice among alternative generators.

use rant_core::{Step, UsageError};

use crate::dispatch;
use crate::session::Session;
use crate::spec::WeightedAlternative;
use crate::value::Value;

impl Session {
    /// Pick one alternative with probability proportional to its weight and
    /// invoke it with its extra arguments.
    ///
    /// Weights occupy consecutive ranges in list order, so the draw maps to
    /// exactly one entry and earlier entries own the lower positions.
    pub fn freq(&mut self, alternatives: &[WeightedAlternative]) -> Step<Value> {
        let total: i64 = alternatives.iter().map(|alt| i64::from(alt.weight)).sum();
        if total == 0 {
            return Err(UsageError::ZeroFrequency.into());
        }

        let mut pos = self.range(1, total)?;
        for alt in alternatives {
            let weight = i64::from(alt.weight);
            if pos <= weight {
                return self.invoke(&alt.spec, &alt.extra_args);
            }
            pos -= weight;
        }
        // Only reachable when no entry carries weight.
        Err(UsageError::ZeroFrequency.into())
    }

    /// [`Session::freq`] over raw entries, normalized first.
    pub fn freq_values(&mut self, raw: &[Value]) -> Step<Value> {
        self.freq(&dispatch::alternatives(raw)?)
    }
}
