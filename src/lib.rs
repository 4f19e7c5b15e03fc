//! # Vetting
//!
//! A composable validation engine that reports every failing field, element
//! and key of a value instead of stopping at the first problem.
//!
//! ## Overview
//!
//! A value is validated against a list of [`Rule`]s. For a single value the
//! rules run in order and the first failure wins. Records, sequences and
//! mappings are validated member by member, and the failures are collected
//! into one [`Errors`] aggregate that renders deterministically:
//!
//! ```text
//! Address: (State: must be in a valid format); Email: must be a valid email address.
//! ```
//!
//! ## Core Types
//!
//! - [`Rule`] and [`Outcome`]: the rule contract; rules pass, fail or skip the rest of the list
//! - [`ValidationError`]: a leaf [`RuleError`], an [`Errors`] aggregate, cancellation, or an internal error
//! - [`Validatable`]: values that know how to validate themselves
//! - [`ValidationContext`]: cancellation and typed values threaded through every depth
//!
//! ## Example
//!
//! ```rust
//! use vetting::{rules, validate, Errors};
//! use vetting::rules::{is, length, required};
//!
//! // A single value: the first failing rule wins.
//! let result = validate("example", &rules![required(), length(5, 100), is::url()]);
//! assert_eq!(result.unwrap_err().to_string(), "must be a valid URL");
//!
//! // Independent validations assembled into one aggregate.
//! let result = Errors::new()
//!     .with("name", validate("Qiang Xue", &rules![required(), length(5, 20)]))
//!     .with("email", validate("q", &rules![required(), is::email()]))
//!     .into_result();
//! assert_eq!(result.unwrap_err().to_string(), "email: must be a valid email address.");
//! ```

pub mod combinators;
pub mod error;
pub mod map;
pub mod rule;
pub mod rules;
pub mod structs;
pub mod traverse;
pub mod validatable;
pub mod validation;
pub mod value;

pub use combinators::{each, skip, when, Each, Nested, Skip, When};
pub use error::{Errors, RuleError, ValidationError};
pub use map::{key, map, validate_map, validate_map_with_context, Key, KeyedMap, MapRule};
pub use rule::{Outcome, Rule, RuleSet};
pub use structs::{
    embedded, field, nested, nested_with, validate_struct, validate_struct_with_context, Field,
};
pub use traverse::Members;
pub use validatable::Validatable;
pub use validation::ValidationContext;
pub use value::{AsText, Blank, Measurable, Nullable, Numeric, Scalar};

/// Type alias for accumulating validation results with stillwater.
pub type ValidationResult = stillwater::Validation<(), Errors>;

/// Validates `value` against `rules`.
///
/// Rules run in declaration order. The first failure is returned and later
/// rules are not invoked; a [`skip`] ends the list successfully.
///
/// Only the listed rules run. Use [`validate_value`] for a [`Validatable`]
/// value that should validate itself when no rules are given.
pub fn validate<T: ?Sized>(value: &T, rules: &[Box<dyn Rule<T>>]) -> Result<(), ValidationError> {
    rule::evaluate(value, rules, None)
}

/// Validates `value` against `rules`, passing `ctx` to every rule.
///
/// Context-aware rules, and [`Validatable`] values reached through
/// [`Nested`], [`each`] or [`map`], all see this same context.
///
/// ```rust
/// use vetting::{rules, validate_with_context, ValidationContext, ValidationError};
/// use vetting::rules::with_context;
///
/// struct Expected(&'static str);
///
/// let rule = || rules![with_context(|ctx: &ValidationContext, s: &str| {
///     match ctx.value::<Expected>() {
///         Some(Expected(e)) if *e == s => Ok(()),
///         _ => Err(ValidationError::rule("", "unexpected value")),
///     }
/// })];
/// let ctx = ValidationContext::background().with_value(Expected("good sample"));
///
/// assert!(validate_with_context(&ctx, "bad sample", &rule()).is_err());
/// assert!(validate_with_context(&ctx, "good sample", &rule()).is_ok());
/// ```
pub fn validate_with_context<T: ?Sized>(
    ctx: &ValidationContext,
    value: &T,
    rules: &[Box<dyn Rule<T>>],
) -> Result<(), ValidationError> {
    rule::evaluate(value, rules, Some(ctx))
}

/// Validates a self-validating value.
///
/// With an empty rule list the value validates itself, so a sequence or
/// mapping of [`Validatable`] values yields an index or key labelled
/// aggregate. Otherwise the rules run exactly as in [`validate`].
///
/// ```rust
/// use vetting::{field, rules, validate_struct, validate_value, Validatable, ValidationError};
/// use vetting::rules::required;
///
/// struct Employee {
///     name: String,
/// }
///
/// impl Validatable for Employee {
///     fn validate(&self) -> Result<(), ValidationError> {
///         validate_struct([field("Name", &self.name, rules![required()])])
///     }
/// }
///
/// let staff = vec![Employee { name: String::new() }];
/// assert_eq!(
///     validate_value(&staff, &rules![]).unwrap_err().to_string(),
///     "0: (Name: cannot be blank)."
/// );
/// ```
pub fn validate_value<T>(value: &T, rules: &[Box<dyn Rule<T>>]) -> Result<(), ValidationError>
where
    T: Validatable + ?Sized,
{
    if rules.is_empty() {
        return value.validate();
    }
    rule::evaluate(value, rules, None)
}

/// Context-aware form of [`validate_value`].
///
/// With an empty rule list the value's
/// [`validate_with_context`](Validatable::validate_with_context) receives `ctx`.
pub fn validate_value_with_context<T>(
    ctx: &ValidationContext,
    value: &T,
    rules: &[Box<dyn Rule<T>>],
) -> Result<(), ValidationError>
where
    T: Validatable + ?Sized,
{
    if rules.is_empty() {
        return value.validate_with_context(ctx);
    }
    rule::evaluate(value, rules, Some(ctx))
}
