//! Size-sensitive generators: strings and arrays.

use rant_core::{CharClass, Step, UsageError};

use crate::session::Session;
use crate::spec::WeightedAlternative;
use crate::value::Value;

impl Session {
    /// A string of `current_size()` characters drawn from `class`.
    pub fn string(&mut self, class: &CharClass) -> Result<String, UsageError> {
        let chars = class.resolve()?;
        let size = self.current_size();

        let mut text = String::with_capacity(size);
        for _ in 0..size {
            text.push(*self.choose(&chars[..])?);
        }
        Ok(text)
    }

    /// `current_size()` values, each from one weighted choice.
    pub fn array(&mut self, alternatives: &[WeightedAlternative]) -> Step<Vec<Value>> {
        self.array_with(|s| s.freq(alternatives))
    }

    /// `current_size()` values, each from `element`.
    pub fn array_with<T>(&mut self, mut element: impl FnMut(&mut Self) -> Step<T>) -> Step<Vec<T>> {
        let size = self.current_size();
        let mut items = Vec::with_capacity(size);
        for _ in 0..size {
            items.push(element(self)?);
        }
        Ok(items)
    }
}
