//! Threshold comparison rules.

use serde_json::Value;

use crate::error::ValidationError;
use crate::rule::{Outcome, Rule};
use crate::value::{kind_name, Blank, Numeric};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

/// Compares the value against a threshold.
///
/// Created by [`min`] or [`max`]; inclusive unless [`exclusive`](Threshold::exclusive)
/// is called. Blank values pass. Values and thresholds are compared as
/// numbers, so an unsuffixed literal works against any integer or float type.
/// A value without a numeric reading is an internal error.
///
/// | rule | code | message |
/// |---|---|---|
/// | `min(t)` | `validation_min_greater_equal_than_required` | `must be no less than {threshold}` |
/// | `min(t).exclusive()` | `validation_min_greater_than_required` | `must be greater than {threshold}` |
/// | `max(t)` | `validation_max_less_equal_than_required` | `must be no greater than {threshold}` |
/// | `max(t).exclusive()` | `validation_max_less_than_required` | `must be less than {threshold}` |
#[derive(Debug, Clone)]
pub struct Threshold<N> {
    threshold: N,
    bound: Bound,
    exclusive: bool,
    message: Option<String>,
}

/// Creates a rule requiring the value to be at least `threshold`.
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::{max, min};
///
/// assert!(validate(&18, &rules![min(18), max(130)]).is_ok());
/// assert_eq!(
///     validate(&17, &rules![min(18)]).unwrap_err().to_string(),
///     "must be no less than 18"
/// );
/// ```
pub fn min<N>(threshold: N) -> Threshold<N> {
    Threshold {
        threshold,
        bound: Bound::Min,
        exclusive: false,
        message: None,
    }
}

/// Creates a rule requiring the value to be at most `threshold`.
pub fn max<N>(threshold: N) -> Threshold<N> {
    Threshold {
        threshold,
        bound: Bound::Max,
        exclusive: false,
        message: None,
    }
}

impl<N> Threshold<N> {
    /// Makes the comparison strict.
    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T, N> Rule<T> for Threshold<N>
where
    T: Blank + Numeric + ?Sized,
    N: Numeric + Clone + Into<Value> + Send + Sync,
{
    fn check(&self, value: &T) -> Outcome {
        if value.is_blank() {
            return Outcome::Valid;
        }

        let (Some(actual), Some(threshold)) = (value.to_scalar(), self.threshold.to_scalar())
        else {
            return ValidationError::internal(format!(
                "cannot be compared with a threshold, got {}",
                kind_name::<T>()
            ))
            .into();
        };
        let passed = match (self.bound, self.exclusive) {
            (Bound::Min, false) => actual >= threshold,
            (Bound::Min, true) => actual > threshold,
            (Bound::Max, false) => actual <= threshold,
            (Bound::Max, true) => actual < threshold,
        };
        if passed {
            return Outcome::Valid;
        }

        let (code, default) = match (self.bound, self.exclusive) {
            (Bound::Min, false) => (
                "validation_min_greater_equal_than_required",
                "must be no less than {threshold}",
            ),
            (Bound::Min, true) => (
                "validation_min_greater_than_required",
                "must be greater than {threshold}",
            ),
            (Bound::Max, false) => (
                "validation_max_less_equal_than_required",
                "must be no greater than {threshold}",
            ),
            (Bound::Max, true) => (
                "validation_max_less_than_required",
                "must be less than {threshold}",
            ),
        };
        super::violation(code, default, self.message.as_deref())
            .with_param("threshold", self.threshold.clone())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(outcome: Outcome) -> String {
        outcome.into_result().unwrap_err().to_string()
    }

    #[test]
    fn test_min_inclusive_and_exclusive() {
        assert!(min(10).check(&10).is_valid());
        assert_eq!(message(min(10).check(&9)), "must be no less than 10");
        assert_eq!(
            message(min(10).exclusive().check(&10)),
            "must be greater than 10"
        );
    }

    #[test]
    fn test_max_inclusive_and_exclusive() {
        assert!(max(10).check(&10).is_valid());
        assert_eq!(message(max(10).check(&11)), "must be no greater than 10");
        assert_eq!(
            message(max(10).exclusive().check(&10)),
            "must be less than 10"
        );
    }

    #[test]
    fn test_zero_is_blank_and_passes() {
        assert!(min(5).check(&0).is_valid());
    }

    #[test]
    fn test_floats() {
        assert!(max(1.5).check(&1.25).is_valid());
        assert!(!max(1.5).check(&2.0).is_valid());
    }

    #[test]
    fn test_unsuffixed_threshold_on_wide_integers() {
        assert!(min(2).check(&5i64).is_valid());
        assert_eq!(message(min(2).check(&1i64)), "must be no less than 2");
        assert!(max(255).check(&200u8).is_valid());
        assert!(!max(10).check(&10.5f64).is_valid());
    }

    #[test]
    fn test_json_numbers() {
        assert!(min(18).check(&json!(21)).is_valid());
        assert_eq!(
            message(min(18).check(&json!(17))),
            "must be no less than 18"
        );
        assert!(max(1.5).check(&json!(1)).is_valid());
        assert!(min(3).check(&json!(null)).is_valid());
    }

    #[test]
    fn test_non_numeric_value_is_internal() {
        let error = min(3).check(&json!("ten")).into_result().unwrap_err();
        assert!(error.is_operational());
        assert_eq!(
            error.to_string(),
            "internal error: cannot be compared with a threshold, got Value"
        );
    }

    #[test]
    fn test_codes() {
        let error = min(3).exclusive().check(&1).into_result().unwrap_err();
        assert_eq!(error.code(), Some("validation_min_greater_than_required"));
    }
}
