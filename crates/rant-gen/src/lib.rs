//! # rant-gen
//!
//! Randomized test-data generation. A [`Session`] is the explicit context
//! every generator runs in: it samples integers, dispatches generator specs
//! by name or inline, chooses among weighted alternatives, scopes the
//! current size, tallies classifiers and drives retries when a guard
//! rejects an attempt.
//!
//! ## Usage
//!
//! ```rust
//! use rant_gen::{GenSpec, Session, Value, WeightedAlternative};
//!
//! let mut session = Session::with_seed(12345);
//!
//! // Twenty even numbers; odd draws are rejected and retried.
//! let evens = session
//!     .sample(20, |s| {
//!         let n = s.range(0, 1000)?;
//!         s.guard(n % 2 == 0)?;
//!         Ok(n)
//!     })
//!     .unwrap();
//! assert!(evens.iter().all(|n| n % 2 == 0));
//!
//! // Weighted choice: mostly small integers, sometimes a digit string.
//! let alternatives = [
//!     WeightedAlternative::weighted(3, GenSpec::with_args("integer", vec![Value::Int(9)])),
//!     WeightedAlternative::weighted(1, GenSpec::with_args("string", vec![Value::from("digit")])),
//! ];
//! let values = session.value(|s| s.with_size(4, |s| s.array(&alternatives))).unwrap();
//! assert_eq!(values.len(), 4);
//! ```
//!
//! ## Errors
//!
//! Generation procedures return [`Step`]. A guard rejection is
//! [`Interrupt::Rejected`], which only the retry engine consumes; usage
//! errors and budget exhaustion reach the caller as [`GenError`].

mod collections;
pub mod config;
mod dispatch;
mod frequency;
pub mod retry;
mod sampler;
pub mod session;
pub mod spec;
pub mod value;

pub use config::{configure, default_size, ConfigError, GenConfig};
pub use rant_core::{CharClass, ClassName, GenError, Interrupt, Step, UsageError};
pub use retry::{RetryBudget, RetryStats};
pub use sampler::{INTEGER_MAX, INTEGER_MIN};
pub use session::Session;
pub use spec::{GenSpec, NamedGenerator, Procedure, WeightedAlternative};
pub use value::Value;
