//! Presence rules: required, not_nil, nil, empty, nil_or_not_empty.

use crate::rule::{Outcome, Rule};
use crate::value::{Blank, Nullable};

use super::violation;

/// Rejects blank values.
///
/// Created by [`required()`]. Code `validation_required`, message
/// `cannot be blank`.
#[derive(Debug, Clone)]
pub struct Required {
    condition: bool,
    message: Option<String>,
}

/// Creates a rule that rejects blank values.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::required;
///
/// assert!(validate("x", &rules![required()]).is_ok());
/// assert_eq!(validate("", &rules![required()]).unwrap_err().to_string(), "cannot be blank");
///
/// // Conditionally required
/// assert!(validate("", &rules![required().when(false)]).is_ok());
/// ```
pub fn required() -> Required {
    Required {
        condition: true,
        message: None,
    }
}

impl Required {
    /// Only enforces the rule when `condition` is true.
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }

    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Blank + ?Sized> Rule<T> for Required {
    fn check(&self, value: &T) -> Outcome {
        if self.condition && value.is_blank() {
            violation(
                "validation_required",
                "cannot be blank",
                self.message.as_deref(),
            )
            .into()
        } else {
            Outcome::Valid
        }
    }
}

/// Rejects absent values, accepting present-but-blank ones.
///
/// Created by [`not_nil()`]. Code `validation_not_nil_required`, message
/// `is required`.
#[derive(Debug, Clone, Default)]
pub struct NotNil {
    message: Option<String>,
}

/// Creates a rule that rejects `None` / JSON `null`.
pub fn not_nil() -> NotNil {
    NotNil::default()
}

impl NotNil {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Nullable + ?Sized> Rule<T> for NotNil {
    fn check(&self, value: &T) -> Outcome {
        if value.is_nil() {
            violation(
                "validation_not_nil_required",
                "is required",
                self.message.as_deref(),
            )
            .into()
        } else {
            Outcome::Valid
        }
    }
}

/// Requires the value to be absent.
///
/// Created by [`nil()`]. Code `validation_nil`, message `must be blank`.
#[derive(Debug, Clone, Default)]
pub struct Nil {
    message: Option<String>,
}

/// Creates a rule that only accepts `None` / JSON `null`.
pub fn nil() -> Nil {
    Nil::default()
}

impl Nil {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Nullable + ?Sized> Rule<T> for Nil {
    fn check(&self, value: &T) -> Outcome {
        if value.is_nil() {
            Outcome::Valid
        } else {
            violation("validation_nil", "must be blank", self.message.as_deref())
                .into()
        }
    }
}

/// Requires the value to be blank.
///
/// Created by [`empty()`]. Code `validation_empty`, message `must be blank`.
#[derive(Debug, Clone, Default)]
pub struct Empty {
    message: Option<String>,
}

/// Creates a rule that only accepts blank values.
pub fn empty() -> Empty {
    Empty::default()
}

impl Empty {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Blank + ?Sized> Rule<T> for Empty {
    fn check(&self, value: &T) -> Outcome {
        if value.is_blank() {
            Outcome::Valid
        } else {
            violation("validation_empty", "must be blank", self.message.as_deref())
                .into()
        }
    }
}

/// Accepts absent values but rejects present blank ones.
///
/// Created by [`nil_or_not_empty()`]. Code
/// `validation_nil_or_not_empty_required`, message `cannot be blank`.
#[derive(Debug, Clone, Default)]
pub struct NilOrNotEmpty {
    message: Option<String>,
}

/// Creates a rule for "optional, but not empty when given".
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::nil_or_not_empty;
///
/// assert!(validate(&None::<String>, &rules![nil_or_not_empty()]).is_ok());
/// assert!(validate(&Some(String::new()), &rules![nil_or_not_empty()]).is_err());
/// ```
pub fn nil_or_not_empty() -> NilOrNotEmpty {
    NilOrNotEmpty::default()
}

impl NilOrNotEmpty {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Nullable + Blank + ?Sized> Rule<T> for NilOrNotEmpty {
    fn check(&self, value: &T) -> Outcome {
        if !value.is_nil() && value.is_blank() {
            violation(
                "validation_nil_or_not_empty_required",
                "cannot be blank",
                self.message.as_deref(),
            )
            .into()
        } else {
            Outcome::Valid
        }
    }
}
