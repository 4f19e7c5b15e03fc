//! The rule contract and the evaluation loop.
//!
//! This module provides the [`Rule`] trait every validator implements, the
//! three-state [`Outcome`] a rule reports, and [`RuleSet`], the owned rule
//! list built by the [`rules!`](crate::rules!) macro.

use std::sync::Arc;

use crate::error::{RuleError, ValidationError};
use crate::validation::ValidationContext;

/// What a rule concluded about a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value satisfies the rule; evaluation continues with the next rule.
    Valid,
    /// Stop evaluating the remaining rules and treat the value as valid.
    Skip,
    /// The value violates the rule; evaluation stops with this error.
    Invalid(ValidationError),
}

impl Outcome {
    /// Returns true unless the outcome is `Invalid`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Outcome::Invalid(_))
    }

    /// Converts into a plain result, folding `Skip` into success.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            Outcome::Valid | Outcome::Skip => Ok(()),
            Outcome::Invalid(e) => Err(e),
        }
    }
}

impl From<Result<(), ValidationError>> for Outcome {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Outcome::Valid,
            Err(e) => Outcome::Invalid(e),
        }
    }
}

impl From<RuleError> for Outcome {
    fn from(error: RuleError) -> Self {
        Outcome::Invalid(ValidationError::Rule(error))
    }
}

impl From<ValidationError> for Outcome {
    fn from(error: ValidationError) -> Self {
        Outcome::Invalid(error)
    }
}

/// A validation rule for values of type `T`.
///
/// Rules are stateless and shareable: they may be invoked any number of times,
/// from any thread, and never keep a reference to the value they checked.
/// A rule that wants the [`ValidationContext`] overrides
/// [`check_with_context`](Rule::check_with_context); every other rule inherits
/// the default, which ignores the context.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate, Outcome, Rule, RuleError};
///
/// struct Even;
///
/// impl Rule<i64> for Even {
///     fn check(&self, value: &i64) -> Outcome {
///         if value % 2 == 0 {
///             Outcome::Valid
///         } else {
///             RuleError::new("even", "must be even").into()
///         }
///     }
/// }
///
/// assert!(validate(&4i64, &rules![Even]).is_ok());
/// assert_eq!(validate(&3i64, &rules![Even]).unwrap_err().to_string(), "must be even");
/// ```
pub trait Rule<T: ?Sized>: Send + Sync {
    /// Checks a value.
    fn check(&self, value: &T) -> Outcome;

    /// Checks a value with access to the validation context.
    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        let _ = ctx;
        self.check(value)
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for &R {
    fn check(&self, value: &T) -> Outcome {
        (**self).check(value)
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        (**self).check_with_context(ctx, value)
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Box<R> {
    fn check(&self, value: &T) -> Outcome {
        (**self).check(value)
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        (**self).check_with_context(ctx, value)
    }
}

impl<T: ?Sized, R: Rule<T> + ?Sized> Rule<T> for Arc<R> {
    fn check(&self, value: &T) -> Outcome {
        (**self).check(value)
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        (**self).check_with_context(ctx, value)
    }
}

/// An owned, ordered list of rules for values of type `T`.
pub type RuleSet<T> = Vec<Box<dyn Rule<T>>>;

/// Builds a [`RuleSet`] from rule expressions.
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::{length, required};
///
/// let result = validate("hello", &rules![required(), length(1, 10)]);
/// assert!(result.is_ok());
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        ::std::vec::Vec::<::std::boxed::Box<dyn $crate::Rule<_>>>::new()
    };
    ($($rule:expr),+ $(,)?) => {
        ::std::vec![
            $(::std::boxed::Box::new($rule) as ::std::boxed::Box<dyn $crate::Rule<_>>),+
        ]
    };
}

/// Runs `rules` against `value` in declaration order.
///
/// The first `Invalid` outcome wins and later rules are not invoked; `Skip`
/// ends evaluation successfully. With a context, every rule is called through
/// [`Rule::check_with_context`].
pub(crate) fn evaluate<T, R>(
    value: &T,
    rules: &[R],
    ctx: Option<&ValidationContext>,
) -> Result<(), ValidationError>
where
    T: ?Sized,
    R: Rule<T>,
{
    evaluate_outcome(value, rules, ctx).into_result()
}

/// Like [`evaluate`], but reports whether the list ended with a skip.
pub(crate) fn evaluate_outcome<T, R>(
    value: &T,
    rules: &[R],
    ctx: Option<&ValidationContext>,
) -> Outcome
where
    T: ?Sized,
    R: Rule<T>,
{
    for (index, rule) in rules.iter().enumerate() {
        let outcome = match ctx {
            Some(ctx) => rule.check_with_context(ctx, value),
            None => rule.check(value),
        };
        match outcome {
            Outcome::Valid => {}
            Outcome::Skip => {
                tracing::trace!(rule = index, "rule requested skip");
                return Outcome::Skip;
            }
            Outcome::Invalid(error) => {
                tracing::trace!(rule = index, %error, "rule failed");
                return Outcome::Invalid(error);
            }
        }
    }
    Outcome::Valid
}
