//! Length rule.

use crate::error::ValidationError;
use crate::rule::{Outcome, Rule};
use crate::value::{kind_name, Blank, Measurable};

/// Constrains the length of text (in characters) or of a collection.
///
/// A bound of `0` means "unbounded" on that side; `length(0, 0)` requires the
/// value to be empty. Blank values always pass.
///
/// | bounds | code | message |
/// |---|---|---|
/// | `min == max` | `validation_length_invalid` | `the length must be exactly {min}` |
/// | `0, max` | `validation_length_too_long` | `the length must be no more than {max}` |
/// | `min, 0` | `validation_length_too_short` | `the length must be no less than {min}` |
/// | `min, max` | `validation_length_out_of_range` | `the length must be between {min} and {max}` |
/// | `0, 0` | `validation_length_empty_required` | `the value must be empty` |
#[derive(Debug, Clone)]
pub struct Length {
    min: usize,
    max: usize,
    message: Option<String>,
}

/// Creates a length rule.
///
/// # Panics
///
/// Panics if both bounds are set and `min > max`.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::length;
///
/// assert!(validate("hello", &rules![length(5, 50)]).is_ok());
/// assert_eq!(
///     validate("123", &rules![length(5, 50)]).unwrap_err().to_string(),
///     "the length must be between 5 and 50"
/// );
/// assert!(validate(&vec![1, 2], &rules![length(0, 2)]).is_ok());
/// ```
pub fn length(min: usize, max: usize) -> Length {
    assert!(
        max == 0 || min <= max,
        "length rule with min {} greater than max {}",
        min,
        max
    );
    Length {
        min,
        max,
        message: None,
    }
}

impl Length {
    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn violation(&self) -> ValidationError {
        let (code, default) = match (self.min, self.max) {
            (0, 0) => ("validation_length_empty_required", "the value must be empty"),
            (min, max) if min == max => (
                "validation_length_invalid",
                "the length must be exactly {min}",
            ),
            (0, _) => (
                "validation_length_too_long",
                "the length must be no more than {max}",
            ),
            (_, 0) => (
                "validation_length_too_short",
                "the length must be no less than {min}",
            ),
            _ => (
                "validation_length_out_of_range",
                "the length must be between {min} and {max}",
            ),
        };
        super::violation(code, default, self.message.as_deref())
            .with_param("min", self.min)
            .with_param("max", self.max)
            .into()
    }
}

impl<T: Blank + Measurable + ?Sized> Rule<T> for Length {
    fn check(&self, value: &T) -> Outcome {
        if value.is_blank() {
            return Outcome::Valid;
        }
        let Some(len) = value.measure() else {
            return ValidationError::internal(format!(
                "cannot get the length of {}",
                kind_name::<T>()
            ))
            .into();
        };

        let too_short = self.min > 0 && len < self.min;
        let too_long = self.max > 0 && len > self.max;
        let must_be_empty = self.min == 0 && self.max == 0 && len > 0;

        if too_short || too_long || must_be_empty {
            self.violation().into()
        } else {
            Outcome::Valid
        }
    }
}
