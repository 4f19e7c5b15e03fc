use crate::rule::{Outcome, Rule};
use crate::validatable::Validatable;
use crate::validation::ValidationContext;

/// Lets a [`Validatable`] value validate itself as part of a rule list.
///
/// List it after the explicit rules; a skip earlier in the list also skips
/// self-validation.
///
/// ```rust
/// use vetting::{rules, validate, Nested, Validatable, ValidationError};
/// use vetting::rules::not_nil;
///
/// struct Port(u16);
///
/// impl Validatable for Port {
///     fn validate(&self) -> Result<(), ValidationError> {
///         if self.0 >= 1024 {
///             Ok(())
///         } else {
///             Err(ValidationError::rule("port", "must be unprivileged"))
///         }
///     }
/// }
///
/// let port = Some(Port(80));
/// let result = validate(&port, &rules![not_nil(), Nested]);
/// assert_eq!(result.unwrap_err().to_string(), "must be unprivileged");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Nested;

impl<T: Validatable + ?Sized> Rule<T> for Nested {
    fn check(&self, value: &T) -> Outcome {
        value.validate().into()
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        value.validate_with_context(ctx).into()
    }
}
