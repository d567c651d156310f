//! Error taxonomy for generation.
//!
//! Three kinds of outcome leave a generation procedure early:
//! - a guard rejection ([`Interrupt::Rejected`]), which the retry engine
//!   absorbs and counts;
//! - budget exhaustion ([`GenError::TooManyTries`]), terminal;
//! - a malformed request ([`UsageError`]), terminal and never retried.

/// A malformed generation request.
///
/// These are programmer errors and do not depend on the random draws.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("empty generator spec")]
    EmptySpec,

    #[error("don't know how to call: {0}")]
    IllegalSpec(String),

    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("size must not be negative, got {0}")]
    NegativeSize(i64),

    #[error("bound must not be negative, got {0}")]
    NegativeBound(i64),

    #[error("empty range: {lo} > {hi}")]
    EmptyRange { lo: i64, hi: i64 },

    #[error("range {lo}..={hi} is too wide to sample")]
    RangeTooWide { lo: i64, hi: i64 },

    #[error("illegal frequency: total weight is zero")]
    ZeroFrequency,

    #[error("illegal frequency weight: {0}")]
    IllegalWeight(i64),

    #[error("cannot choose from an empty set")]
    EmptyChoice,

    #[error("unknown character class: {0}")]
    UnknownCharClass(String),

    #[error("character class {0} has no characters")]
    EmptyCharClass(String),

    #[error("bad argument to {generator}: {reason}")]
    BadArgument { generator: String, reason: String },

    #[error("retry multiplier must be positive")]
    ZeroRetryMultiplier,
}

impl UsageError {
    /// Shorthand for [`UsageError::BadArgument`].
    pub fn bad_argument(generator: &str, reason: impl Into<String>) -> Self {
        Self::BadArgument {
            generator: generator.to_string(),
            reason: reason.into(),
        }
    }
}

/// Terminal failure reported to the caller of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenError {
    /// The guard rejected too many attempts for the budget.
    #[error("exceeded generation limit {limit}: {failed_attempts} failed guards")]
    TooManyTries { limit: usize, failed_attempts: usize },

    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Why a generation procedure stopped without producing a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Interrupt {
    /// A guard condition failed; the attempt is discarded.
    #[error("attempt rejected by guard")]
    Rejected,

    #[error(transparent)]
    Failed(#[from] GenError),
}

impl From<UsageError> for Interrupt {
    fn from(err: UsageError) -> Self {
        Interrupt::Failed(GenError::Usage(err))
    }
}

impl Interrupt {
    /// True for a guard rejection.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Interrupt::Rejected)
    }
}

/// Result of one generation step.
pub type Step<T> = Result<T, Interrupt>;
