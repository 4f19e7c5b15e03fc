//! Rules built from plain functions.

use std::fmt;

use crate::error::ValidationError;
use crate::rule::{Outcome, Rule};
use crate::validation::ValidationContext;

/// A rule backed by a function of the value.
///
/// Created by [`by`].
#[derive(Clone)]
pub struct By<F> {
    check: F,
}

/// Wraps a function as a rule.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate, ValidationError};
/// use vetting::rules::by;
///
/// let not_root = by(|name: &str| {
///     if name == "root" {
///         Err(ValidationError::rule("reserved", "is reserved"))
///     } else {
///         Ok(())
///     }
/// });
///
/// assert_eq!(validate("root", &rules![not_root]).unwrap_err().to_string(), "is reserved");
/// ```
pub fn by<T, F>(check: F) -> By<F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), ValidationError> + Send + Sync,
{
    By { check }
}

impl<F> fmt::Debug for By<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("By")
    }
}

impl<T, F> Rule<T> for By<F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), ValidationError> + Send + Sync,
{
    fn check(&self, value: &T) -> Outcome {
        (self.check)(value).into()
    }
}

/// A rule backed by a function of the context and the value.
///
/// Created by [`with_context`]. Outside a context-carrying validation the
/// function receives [`ValidationContext::background`].
#[derive(Clone)]
pub struct WithContext<F> {
    check: F,
}

/// Wraps a context-aware function as a rule.
///
/// ```rust
/// use vetting::{rules, validate_with_context, ValidationContext, ValidationError};
/// use vetting::rules::with_context;
///
/// struct Banned(&'static str);
///
/// let allowed = with_context(|ctx: &ValidationContext, name: &str| {
///     match ctx.value::<Banned>() {
///         Some(Banned(b)) if *b == name => Err(ValidationError::rule("banned", "is banned")),
///         _ => Ok(()),
///     }
/// });
///
/// let ctx = ValidationContext::background().with_value(Banned("mallory"));
/// assert!(validate_with_context(&ctx, "mallory", &rules![allowed]).is_err());
/// ```
pub fn with_context<T, F>(check: F) -> WithContext<F>
where
    T: ?Sized,
    F: Fn(&ValidationContext, &T) -> Result<(), ValidationError> + Send + Sync,
{
    WithContext { check }
}

impl<F> fmt::Debug for WithContext<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WithContext")
    }
}

impl<T, F> Rule<T> for WithContext<F>
where
    T: ?Sized,
    F: Fn(&ValidationContext, &T) -> Result<(), ValidationError> + Send + Sync,
{
    fn check(&self, value: &T) -> Outcome {
        (self.check)(&ValidationContext::background(), value).into()
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        (self.check)(ctx, value).into()
    }
}
