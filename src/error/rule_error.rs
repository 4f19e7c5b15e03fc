//! Leaf validation error type.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

/// A single rule violation attached to one value.
///
/// `RuleError` captures:
/// - **code**: Machine-readable error code for programmatic handling
/// - **message**: Human-readable template, may contain `{param}` placeholders
/// - **params**: Values substituted into the template when rendered
///
/// # Example
///
/// ```rust
/// use vetting::RuleError;
///
/// let error = RuleError::new(
///     "validation_length_out_of_range",
///     "the length must be between {min} and {max}",
/// )
/// .with_param("min", 5)
/// .with_param("max", 50);
///
/// assert_eq!(error.to_string(), "the length must be between 5 and 50");
/// assert_eq!(error.code, "validation_length_out_of_range");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RuleError {
    /// Machine-readable error code (e.g. `validation_required`).
    pub code: String,
    /// Message template.
    pub message: String,
    /// Parameters referenced by the message template.
    pub params: IndexMap<String, Value>,
}

impl RuleError {
    /// Creates a new rule error with the given code and message template.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: IndexMap::new(),
        }
    }

    /// Creates a rule error with an empty code.
    ///
    /// Handy for ad hoc rules written with [`by`](crate::rules::by).
    pub fn message(message: impl Into<String>) -> Self {
        Self::new("", message)
    }

    /// Adds a template parameter and returns self for chaining.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replaces the message template, keeping the code and params.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Renders the message template with its params substituted.
    ///
    /// Placeholders with no matching param are left untouched.
    pub fn render(&self) -> String {
        let mut rendered = self.message.clone();
        for (name, value) in &self.params {
            let placeholder = format!("{{{}}}", name);
            if rendered.contains(&placeholder) {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                rendered = rendered.replace(&placeholder, &text);
            }
        }
        rendered
    }
}

impl Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for RuleError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<RuleError>();
    assert_sync::<RuleError>();
};
