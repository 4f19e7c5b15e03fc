//! Error types for validation failures.
//!
//! This module provides [`RuleError`] for a single failed rule, [`Errors`] for
//! label-keyed aggregates of nested failures, and [`ValidationError`] which
//! ties them together with the operational failure kinds.

mod errors;
mod rule_error;
mod validation_error;

pub use errors::Errors;
pub use rule_error::RuleError;
pub use validation_error::ValidationError;
