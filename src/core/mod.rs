//! Core types shared across the lastbuild crate.
//!
//! Currently this is the error layer: the typed [`UpdateError`] used by every
//! library module, and the [`ErrorContext`] wrapper that turns a failed run
//! into a colored, actionable message at the CLI boundary.

pub mod error;

pub use error::{ErrorContext, UpdateError, user_friendly_error};
