//! The error type returned by every validation entry point.

use super::{Errors, RuleError};

/// Why a value failed validation.
///
/// `Rule` and `Errors` are data violations: they describe what is wrong with
/// the value. `Cancelled` and `Internal` are operational failures; traversals
/// stop as soon as they see one and hand it back unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A single rule rejected a single value.
    #[error("{0}")]
    Rule(RuleError),

    /// Failures of the fields, elements or keys of an aggregate value.
    #[error("{0}")]
    Errors(Errors),

    /// The validation context was cancelled.
    #[error("validation cancelled")]
    Cancelled,

    /// A rule could not be evaluated against the value it was given.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ValidationError {
    /// Creates a leaf error from a code and message.
    pub fn rule(code: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::Rule(RuleError::new(code, message))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ValidationError::Internal(message.into())
    }

    /// Returns true for `Cancelled` and `Internal`, the kinds that abort traversal.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            ValidationError::Cancelled | ValidationError::Internal(_)
        )
    }

    /// Returns the leaf error, if this is one.
    pub fn as_rule(&self) -> Option<&RuleError> {
        match self {
            ValidationError::Rule(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the aggregate, if this is one.
    pub fn as_errors(&self) -> Option<&Errors> {
        match self {
            ValidationError::Errors(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the machine-readable code of a leaf error.
    pub fn code(&self) -> Option<&str> {
        self.as_rule().map(|e| e.code.as_str())
    }
}

impl From<RuleError> for ValidationError {
    fn from(error: RuleError) -> Self {
        ValidationError::Rule(error)
    }
}

impl From<Errors> for ValidationError {
    fn from(errors: Errors) -> Self {
        ValidationError::Errors(errors)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_display_is_message() {
        let error = ValidationError::rule("validation_required", "cannot be blank");
        assert_eq!(error.to_string(), "cannot be blank");
        assert_eq!(error.code(), Some("validation_required"));
        assert!(!error.is_operational());
    }

    #[test]
    fn test_operational_kinds() {
        assert!(ValidationError::Cancelled.is_operational());
        assert!(ValidationError::internal("bad shape").is_operational());
        assert_eq!(
            ValidationError::internal("bad shape").to_string(),
            "internal error: bad shape"
        );
        assert_eq!(
            ValidationError::Cancelled.to_string(),
            "validation cancelled"
        );
    }

    #[test]
    fn test_accessors() {
        let leaf = ValidationError::rule("c", "m");
        assert!(leaf.as_rule().is_some());
        assert!(leaf.as_errors().is_none());

        let aggregate = ValidationError::from(Errors::new().with("a", Err(leaf.clone())));
        assert!(aggregate.as_errors().is_some());
        assert!(aggregate.code().is_none());
    }
}
