//! Text format rules.
//!
//! This module provides [`Match`] for regex patterns and [`StringRule`] for
//! arbitrary text predicates. Both accept blank values and fail with an
//! internal error on values that hold no text.

use regex::Regex;

use crate::error::{RuleError, ValidationError};
use crate::rule::{Outcome, Rule};
use crate::value::{kind_name, AsText, Blank};

fn text_of<T: AsText + ?Sized>(value: &T) -> Result<&str, ValidationError> {
    value.as_text().ok_or_else(|| {
        ValidationError::internal(format!("must be a string, got {}", kind_name::<T>()))
    })
}

/// Requires text to match a regular expression.
///
/// Code `validation_match_invalid`, message `must be in a valid format`.
#[derive(Debug, Clone)]
pub struct Match {
    regex: Regex,
    message: Option<String>,
}

/// Creates a rule requiring text to match `regex`.
///
/// # Example
///
/// ```rust
/// use regex::Regex;
/// use vetting::{rules, validate};
/// use vetting::rules::matches;
///
/// let state = Regex::new("^[A-Z]{2}$").unwrap();
///
/// assert!(validate("VA", &rules![matches(state.clone())]).is_ok());
/// assert_eq!(
///     validate("Virginia", &rules![matches(state)]).unwrap_err().to_string(),
///     "must be in a valid format"
/// );
/// ```
pub fn matches(regex: Regex) -> Match {
    Match {
        regex,
        message: None,
    }
}

impl Match {
    /// Compiles `pattern` into a match rule.
    ///
    /// Returns an error if the pattern is not a valid regex.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(matches(Regex::new(pattern)?))
    }

    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: AsText + Blank + ?Sized> Rule<T> for Match {
    fn check(&self, value: &T) -> Outcome {
        if value.is_blank() {
            return Outcome::Valid;
        }
        match text_of(value) {
            Ok(text) if self.regex.is_match(text) => Outcome::Valid,
            Ok(_) => super::violation(
                "validation_match_invalid",
                "must be in a valid format",
                self.message.as_deref(),
            )
            .with_param("pattern", self.regex.as_str())
            .into(),
            Err(e) => e.into(),
        }
    }
}

/// Checks text with a plain predicate function.
///
/// Used for the [`is`](super::is) rules and for ad hoc text checks.
#[derive(Debug, Clone)]
pub struct StringRule {
    validate: fn(&str) -> bool,
    error: RuleError,
}

/// Creates a text rule from a predicate and a failure message.
///
/// The resulting error carries an empty code; use
/// [`StringRule::with_error`] to attach one.
///
/// ```rust
/// use vetting::{rules, validate};
/// use vetting::rules::string_rule;
///
/// let abc = string_rule(|s| s == "abc", "wrong_abc");
///
/// assert!(validate("abc", &rules![abc.clone()]).is_ok());
/// assert!(validate("", &rules![abc.clone()]).is_ok());
/// assert_eq!(validate("123", &rules![abc]).unwrap_err().to_string(), "wrong_abc");
/// ```
pub fn string_rule(validate: fn(&str) -> bool, message: impl Into<String>) -> StringRule {
    StringRule::with_error(validate, RuleError::message(message))
}

impl StringRule {
    /// Creates a text rule that fails with `error`.
    pub fn with_error(validate: fn(&str) -> bool, error: RuleError) -> Self {
        Self { validate, error }
    }

    /// Sets a custom error message, keeping the code.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = self.error.with_message(message);
        self
    }
}

impl<T: AsText + Blank + ?Sized> Rule<T> for StringRule {
    fn check(&self, value: &T) -> Outcome {
        if value.is_blank() {
            return Outcome::Valid;
        }
        match text_of(value) {
            Ok(text) if (self.validate)(text) => Outcome::Valid,
            Ok(_) => self.error.clone().into(),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match() {
        let rule = Match::pattern("^[0-9]{5}$").unwrap();
        assert!(rule.check("12345").is_valid());
        assert!(!rule.check("123").is_valid());
        assert!(rule.check("").is_valid());
        assert!(rule.check(&json!("54321")).is_valid());
        assert!(rule.check(&None::<String>).is_valid());
    }

    #[test]
    fn test_match_error() {
        let error = Match::pattern("^[A-Z]{2}$")
            .unwrap()
            .check("Virginia")
            .into_result()
            .unwrap_err();
        assert_eq!(error.to_string(), "must be in a valid format");
        assert_eq!(error.code(), Some("validation_match_invalid"));
    }

    #[test]
    fn test_match_invalid_pattern() {
        assert!(Match::pattern("[").is_err());
    }

    #[test]
    fn test_match_non_text_is_internal() {
        let rule = Match::pattern("x").unwrap();
        let error = rule.check(&json!(12)).into_result().unwrap_err();
        assert!(error.is_operational());

        let error = rule.check(&Some(json!(12))).into_result().unwrap_err();
        assert_eq!(
            error.to_string(),
            "internal error: must be a string, got Option<Value>"
        );
    }

    #[test]
    fn test_string_rule() {
        let rule = string_rule(|s| s == "me", "wrong_me");
        assert!(rule.check("me").is_valid());
        assert!(rule.check("").is_valid());
        assert_eq!(
            rule.check("abc").into_result().unwrap_err().to_string(),
            "wrong_me"
        );
    }

    #[test]
    fn test_string_rule_custom_error() {
        let rule = StringRule::with_error(|s| s.len() > 3, RuleError::new("too_short", "short"))
            .error("needs more than three characters");
        let error = rule.check("abc").into_result().unwrap_err();
        assert_eq!(error.code(), Some("too_short"));
        assert_eq!(error.to_string(), "needs more than three characters");
    }
}
