//! The generation session: the explicit context every generator runs in.
//!
//! A session owns its uniform source, its generator registry, the current
//! size override and the classifier tally. It is not shared between
//! threads; concurrent generation uses one session per thread.

use std::collections::HashMap;
use std::fmt;

use rant_core::{Interrupt, Step, UsageError};
use rant_random::{DeterministicRng, UniformSource};

use crate::config::{self, GenConfig, DEFAULT_RETRY_MULTIPLIER};
use crate::dispatch;
use crate::spec::NamedGenerator;

/// Mutable context for one logical generator instance.
pub struct Session {
    pub(crate) source: Box<dyn UniformSource>,
    pub(crate) registry: HashMap<String, NamedGenerator>,
    size_override: Option<usize>,
    classifiers: HashMap<String, u64>,
    retry_multiplier: usize,
}

impl Session {
    /// Create a session drawing from operating-system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(DeterministicRng::from_entropy())
    }

    /// Create a session with a seeded source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(DeterministicRng::new(seed))
    }

    /// Create a session drawing from `source`.
    pub fn with_source(source: impl UniformSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            registry: dispatch::builtins(),
            size_override: None,
            classifiers: HashMap::new(),
            retry_multiplier: DEFAULT_RETRY_MULTIPLIER,
        }
    }

    /// Create a session using the retry multiplier from `config`.
    ///
    /// The default size is process-wide; see [`GenConfig::apply`].
    #[must_use]
    pub fn with_config(config: &GenConfig) -> Self {
        let mut session = Self::new();
        session.retry_multiplier = config.retry_multiplier;
        session
    }

    /// Clear the size override and the classifier tally.
    pub fn reset(&mut self) {
        self.size_override = None;
        self.classifiers.clear();
    }

    #[must_use]
    pub fn retry_multiplier(&self) -> usize {
        self.retry_multiplier
    }

    pub fn set_retry_multiplier(&mut self, retry_multiplier: usize) -> Result<(), UsageError> {
        if retry_multiplier == 0 {
            return Err(UsageError::ZeroRetryMultiplier);
        }
        self.retry_multiplier = retry_multiplier;
        Ok(())
    }

    /// The size read by size-sensitive generators.
    ///
    /// The innermost [`Session::with_size`] override, or the process default.
    #[must_use]
    pub fn current_size(&self) -> usize {
        self.size_override.unwrap_or_else(config::default_size)
    }

    /// Run `block` with the current size set to `size`.
    ///
    /// The previous override is restored however the block exits.
    pub fn with_size<T>(&mut self, size: i64, block: impl FnOnce(&mut Self) -> Step<T>) -> Step<T> {
        let size = usize::try_from(size).map_err(|_| UsageError::NegativeSize(size))?;

        let saved = self.size_override.replace(size);
        let result = block(self);
        self.size_override = saved;
        result
    }

    /// Count one more value under `label`.
    pub fn classify(&mut self, label: impl Into<String>) {
        *self.classifiers.entry(label.into()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn classifiers(&self) -> &HashMap<String, u64> {
        &self.classifiers
    }

    /// Reject the current attempt unless `condition` holds.
    ///
    /// Use with `?` inside a generation procedure.
    pub fn guard(&self, condition: bool) -> Step<()> {
        if condition {
            Ok(())
        } else {
            Err(Interrupt::Rejected)
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut generators: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        generators.sort_unstable();
        f.debug_struct("Session")
            .field("generators", &generators)
            .field("size_override", &self.size_override)
            .field("classifiers", &self.classifiers)
            .field("retry_multiplier", &self.retry_multiplier)
            .finish()
    }
}
