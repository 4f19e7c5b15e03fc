//! Membership rules.

use std::fmt::Debug;

use crate::rule::{Outcome, Rule};
use crate::value::Blank;

/// Requires the value to equal one of a fixed set.
///
/// Code `validation_in_invalid`, message `must be a valid value`.
#[derive(Debug, Clone)]
pub struct In<V> {
    values: Vec<V>,
    message: Option<String>,
}

/// Creates a rule requiring the value to be one of `values`.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::one_of;
///
/// let gender = String::from("Other");
/// assert_eq!(
///     validate(&gender, &rules![one_of(["Female", "Male"])]).unwrap_err().to_string(),
///     "must be a valid value"
/// );
/// assert!(validate(&String::new(), &rules![one_of(["Female", "Male"])]).is_ok());
/// ```
pub fn one_of<V>(values: impl IntoIterator<Item = V>) -> In<V> {
    In {
        values: values.into_iter().collect(),
        message: None,
    }
}

impl<V> In<V> {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T, V> Rule<T> for In<V>
where
    T: Blank + PartialEq<V> + ?Sized,
    V: Debug + Send + Sync,
{
    fn check(&self, value: &T) -> Outcome {
        if value.is_blank() || self.values.iter().any(|v| value == v) {
            Outcome::Valid
        } else {
            super::violation(
                "validation_in_invalid",
                "must be a valid value",
                self.message.as_deref(),
            )
            .into()
        }
    }
}

/// Requires the value to differ from every member of a fixed set.
///
/// Code `validation_not_in_invalid`, message `must not be in list`.
#[derive(Debug, Clone)]
pub struct NotIn<V> {
    values: Vec<V>,
    message: Option<String>,
}

/// Creates a rule rejecting any of `values`.
pub fn none_of<V>(values: impl IntoIterator<Item = V>) -> NotIn<V> {
    NotIn {
        values: values.into_iter().collect(),
        message: None,
    }
}

impl<V> NotIn<V> {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T, V> Rule<T> for NotIn<V>
where
    T: Blank + PartialEq<V> + ?Sized,
    V: Debug + Send + Sync,
{
    fn check(&self, value: &T) -> Outcome {
        if !value.is_blank() && self.values.iter().any(|v| value == v) {
            super::violation(
                "validation_not_in_invalid",
                "must not be in list",
                self.message.as_deref(),
            )
            .into()
        } else {
            Outcome::Valid
        }
    }
}
