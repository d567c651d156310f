//! Process-wide generation settings.
//!
//! The default size is shared by every session in the process. Set it once
//! at startup with [`configure`], before any generation begins; sessions
//! only ever read it.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

/// Size used when no [`crate::Session::with_size`] override is active.
pub const DEFAULT_SIZE: usize = 6;

/// Attempts allowed per required value.
pub const DEFAULT_RETRY_MULTIPLIER: usize = 10;

/// Environment variable overriding the default size.
pub const DEFAULT_SIZE_VAR: &str = "RANT_DEFAULT_SIZE";

/// Environment variable overriding the retry multiplier.
pub const RETRY_MULTIPLIER_VAR: &str = "RANT_RETRY_MULTIPLIER";

static PROCESS_DEFAULT_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_SIZE);

/// Set the process default size.
pub fn configure(default_size: usize) {
    let previous = PROCESS_DEFAULT_SIZE.swap(default_size, Ordering::Relaxed);
    if previous != default_size {
        debug!(previous, default_size, "Default size configured");
    }
}

/// The process default size.
#[must_use]
pub fn default_size() -> usize {
    PROCESS_DEFAULT_SIZE.load(Ordering::Relaxed)
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    NotAnInteger { var: &'static str, value: String },

    #[error("{var} must be positive")]
    ZeroRetryMultiplier { var: &'static str },
}

/// Generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenConfig {
    pub default_size: usize,
    pub retry_multiplier: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_SIZE,
            retry_multiplier: DEFAULT_RETRY_MULTIPLIER,
        }
    }
}

impl GenConfig {
    /// Defaults, overridden by `RANT_DEFAULT_SIZE` and `RANT_RETRY_MULTIPLIER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(size) = parse_var(&lookup, DEFAULT_SIZE_VAR)? {
            config.default_size = size;
        }
        if let Some(multiplier) = parse_var(&lookup, RETRY_MULTIPLIER_VAR)? {
            if multiplier == 0 {
                return Err(ConfigError::ZeroRetryMultiplier {
                    var: RETRY_MULTIPLIER_VAR,
                });
            }
            config.retry_multiplier = multiplier;
        }

        Ok(config)
    }

    /// Install the default size process-wide.
    pub fn apply(&self) {
        configure(self.default_size);
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<usize>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotAnInteger { var, value }),
    }
}
