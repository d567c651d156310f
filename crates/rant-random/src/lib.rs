//! # rant-random
//!
//! Uniform random sources consumed by the rant generation engine.
//!
//! The engine only ever asks for two primitives: an integer drawn uniformly
//! from `[0, bound)` and a real drawn uniformly from `[0, 1)`. Anything that
//! can answer both implements [`UniformSource`].
//!
//! ## Usage
//!
//! ```rust
//! use rant_random::{DeterministicRng, UniformSource};
//!
//! let mut rng = DeterministicRng::new(12345);
//! let die = rng.next_uniform(6) + 1;
//! assert!((1..=6).contains(&die));
//!
//! let unit = rng.next_uniform_real();
//! assert!((0.0..1.0).contains(&unit));
//! ```

pub mod random;
pub mod source;

pub use random::DeterministicRng;
pub use source::UniformSource;
