//! # rant-core
//!
//! Shared vocabulary for the rant test-data generator: the error taxonomy
//! every generation step reports through, and the POSIX-style character
//! classes string generators draw from.

pub mod chars;
pub mod error;

pub use chars::{CharClass, ClassName};
pub use error::{GenError, Interrupt, Step, UsageError};
