//! Record validation through explicit field declarations.
//!
//! A record is validated by listing its fields, each paired with a label and
//! what to check. Every field is checked, failures are collected by label,
//! and the result is either `Ok(())` or an aggregate of the failing fields.
//!
//! # Example
//!
//! ```rust
//! use regex::Regex;
//! use vetting::{field, nested, rules, validate_struct, Validatable, ValidationError};
//! use vetting::rules::{is, length, matches, required};
//!
//! struct Address {
//!     street: String,
//!     state: String,
//! }
//!
//! impl Validatable for Address {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         validate_struct([
//!             field("Street", &self.street, rules![required(), length(5, 50)]),
//!             field("State", &self.state, rules![required(), matches(Regex::new("^[A-Z]{2}$").unwrap())]),
//!         ])
//!     }
//! }
//!
//! struct Customer {
//!     email: String,
//!     address: Address,
//! }
//!
//! impl Validatable for Customer {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         validate_struct([
//!             field("Email", &self.email, rules![required(), is::email()]),
//!             nested("Address", &self.address),
//!         ])
//!     }
//! }
//!
//! let customer = Customer {
//!     email: "q".into(),
//!     address: Address { street: "123 Main Street".into(), state: "Virginia".into() },
//! };
//!
//! assert_eq!(
//!     customer.validate().unwrap_err().to_string(),
//!     "Address: (State: must be in a valid format); Email: must be a valid email address."
//! );
//! ```

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use crate::error::{Errors, ValidationError};
use crate::rule::{evaluate, evaluate_outcome, Outcome, RuleSet};
use crate::validatable::Validatable;
use crate::validation::ValidationContext;

type FieldCheck<'a> = Box<dyn Fn(Option<&ValidationContext>) -> Result<(), ValidationError> + 'a>;

/// One field of a record declaration.
///
/// Built with [`field`], [`nested`], [`nested_with`] or [`embedded`] and
/// consumed by [`validate_struct`].
pub struct Field<'a> {
    label: Cow<'a, str>,
    embedded: bool,
    check: FieldCheck<'a>,
}

impl Field<'_> {
    /// The label failures of this field are reported under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the field's own failures are merged into the parent.
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("label", &self.label)
            .field("embedded", &self.embedded)
            .finish_non_exhaustive()
    }
}

/// Declares a field checked against `rules`.
pub fn field<'a, T>(label: impl Into<Cow<'a, str>>, value: &'a T, rules: RuleSet<T>) -> Field<'a>
where
    T: ?Sized,
{
    Field {
        label: label.into(),
        embedded: false,
        check: Box::new(move |ctx: Option<&ValidationContext>| evaluate(value, &rules, ctx)),
    }
}

/// Declares a field that validates itself through [`Validatable`].
pub fn nested<'a, T>(label: impl Into<Cow<'a, str>>, value: &'a T) -> Field<'a>
where
    T: Validatable + ?Sized,
{
    Field {
        label: label.into(),
        embedded: false,
        check: Box::new(move |ctx: Option<&ValidationContext>| self_validate(value, ctx)),
    }
}

/// Declares a field checked against `rules` and then validated through
/// [`Validatable`].
///
/// Self-validation only runs when the rules pass without skipping.
pub fn nested_with<'a, T>(
    label: impl Into<Cow<'a, str>>,
    value: &'a T,
    rules: RuleSet<T>,
) -> Field<'a>
where
    T: Validatable + ?Sized,
{
    Field {
        label: label.into(),
        embedded: false,
        check: Box::new(move |ctx: Option<&ValidationContext>| {
            match evaluate_outcome(value, &rules, ctx) {
                Outcome::Valid => self_validate(value, ctx),
                Outcome::Skip => Ok(()),
                Outcome::Invalid(error) => Err(error),
            }
        }),
    }
}

/// Declares an embedded value whose failures appear as siblings of the
/// enclosing record's fields.
///
/// The label is only used when the embedded value fails with a single leaf
/// error instead of an aggregate.
///
/// ```rust
/// use vetting::{embedded, field, rules, validate_struct, Validatable, ValidationError};
/// use vetting::rules::required;
///
/// struct Employee {
///     name: String,
/// }
///
/// impl Validatable for Employee {
///     fn validate(&self) -> Result<(), ValidationError> {
///         validate_struct([field("Name", &self.name, rules![required()])])
///     }
/// }
///
/// struct Manager {
///     employee: Employee,
///     level: u32,
/// }
///
/// let m = Manager { employee: Employee { name: String::new() }, level: 0 };
/// let result = validate_struct([
///     embedded("Employee", &m.employee),
///     field("Level", &m.level, rules![required()]),
/// ]);
/// assert_eq!(result.unwrap_err().to_string(), "Level: cannot be blank; Name: cannot be blank.");
/// ```
pub fn embedded<'a, T>(label: impl Into<Cow<'a, str>>, value: &'a T) -> Field<'a>
where
    T: Validatable + ?Sized,
{
    Field {
        label: label.into(),
        embedded: true,
        check: Box::new(move |ctx: Option<&ValidationContext>| self_validate(value, ctx)),
    }
}

fn self_validate<T: Validatable + ?Sized>(
    value: &T,
    ctx: Option<&ValidationContext>,
) -> Result<(), ValidationError> {
    match ctx {
        Some(ctx) => value.validate_with_context(ctx),
        None => value.validate(),
    }
}

/// Validates a record from its field declarations.
///
/// Every field is checked; failures are collected under their labels and
/// returned as [`ValidationError::Errors`]. Internal errors and
/// cancellation abort the walk and are returned as-is.
///
/// # Panics
///
/// Panics if two non-embedded fields share a label.
pub fn validate_struct<'a, I>(fields: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = Field<'a>>,
{
    run(fields, None)
}

/// Validates a record, passing `ctx` to every rule and nested value.
///
/// # Panics
///
/// Panics if two non-embedded fields share a label.
pub fn validate_struct_with_context<'a, I>(
    ctx: &ValidationContext,
    fields: I,
) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = Field<'a>>,
{
    run(fields, Some(ctx))
}

fn run<'a, I>(fields: I, ctx: Option<&ValidationContext>) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = Field<'a>>,
{
    let mut errors = Errors::new();
    let mut labels = HashSet::new();

    for field in fields {
        if !field.embedded {
            assert!(
                labels.insert(field.label.clone()),
                "field {:?} is declared more than once",
                field.label
            );
        }

        match (field.check)(ctx) {
            Err(error) if error.is_operational() => {
                tracing::debug!(field = %field.label, %error, "struct validation aborted");
                return Err(error);
            }
            Err(ValidationError::Errors(nested)) if field.embedded => errors.merge(nested),
            Ok(()) if field.embedded => {}
            result => {
                if result.is_err() {
                    tracing::trace!(field = %field.label, "field failed");
                }
                // A pass never replaces a failure an embedded value recorded under the same label.
                let entry = Errors::new().with(field.label.into_owned(), result);
                errors.merge(entry);
            }
        }
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{length, not_nil, required, with_context};
    use crate::{rules, skip};
    use pretty_assertions::assert_eq;

    struct Name(String);

    impl Validatable for Name {
        fn validate(&self) -> Result<(), ValidationError> {
            validate_struct([field("First", &self.0, rules![length(2, 10)])])
        }
    }

    #[test]
    fn test_all_fields_valid() {
        let name = "Ada".to_string();
        let age = 36;
        let result = validate_struct([
            field("Name", &name, rules![required()]),
            field("Age", &age, rules![required()]),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_failures_sorted_by_label() {
        let street = String::new();
        let city = String::new();
        let zip = "12345".to_string();
        let error = validate_struct([
            field("Street", &street, rules![required()]),
            field("Zip", &zip, rules![required()]),
            field("City", &city, rules![required()]),
        ])
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "City: cannot be blank; Street: cannot be blank."
        );
    }

    #[test]
    fn test_nested_field_is_parenthesized() {
        let name = Name("x".to_string());
        let error = validate_struct([nested("Name", &name)]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Name: (First: the length must be between 2 and 10)."
        );
    }

    #[test]
    fn test_nested_with_runs_rules_first() {
        let name = Name("x".to_string());
        let error = validate_struct([nested_with("Name", &name, rules![skip()])]);
        assert!(error.is_ok());

        let absent: Option<Name> = None;
        let error = validate_struct([nested_with("Name", &absent, rules![not_nil()])]).unwrap_err();
        assert_eq!(error.to_string(), "Name: is required.");

        let present = Some(Name("x".to_string()));
        let error =
            validate_struct([nested_with("Name", &present, rules![not_nil()])]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Name: (First: the length must be between 2 and 10)."
        );
    }

    #[test]
    fn test_embedded_leaf_error_uses_label() {
        struct Always;

        impl Validatable for Always {
            fn validate(&self) -> Result<(), ValidationError> {
                Err(ValidationError::rule("always", "always fails"))
            }
        }

        let error = validate_struct([embedded("Inner", &Always)]).unwrap_err();
        assert_eq!(error.to_string(), "Inner: always fails.");
    }

    #[test]
    fn test_embedded_failure_survives_passing_sibling_with_same_label() {
        struct Employee {
            name: String,
        }

        impl Validatable for Employee {
            fn validate(&self) -> Result<(), ValidationError> {
                validate_struct([field("Name", &self.name, rules![required()])])
            }
        }

        let employee = Employee {
            name: String::new(),
        };
        let boss = "Boss".to_string();

        let embedded_first = validate_struct([
            embedded("Employee", &employee),
            field("Name", &boss, rules![required()]),
        ]);
        let field_first = validate_struct([
            field("Name", &boss, rules![required()]),
            embedded("Employee", &employee),
        ]);

        assert_eq!(
            embedded_first.clone().unwrap_err().to_string(),
            "Name: cannot be blank."
        );
        assert_eq!(embedded_first, field_first);
    }

    #[test]
    fn test_internal_error_aborts() {
        let n = 5;
        let later = String::new();
        let result = validate_struct([
            field(
                "N",
                &n,
                rules![crate::rules::by(|_: &i32| Err(ValidationError::internal("broken")))],
            ),
            field("Later", &later, rules![required()]),
        ]);
        assert_eq!(result, Err(ValidationError::internal("broken")));
    }

    #[test]
    fn test_context_reaches_fields() {
        struct Strict;

        let value = "abc".to_string();
        let strict = || {
            rules![with_context(|ctx: &ValidationContext, _: &String| {
                if ctx.value::<Strict>().is_some() {
                    Err(ValidationError::rule("strict", "strict mode"))
                } else {
                    Ok(())
                }
            })]
        };

        assert!(validate_struct([field("V", &value, strict())]).is_ok());

        let ctx = ValidationContext::background().with_value(Strict);
        let error = validate_struct_with_context(&ctx, [field("V", &value, strict())]).unwrap_err();
        assert_eq!(error.to_string(), "V: strict mode.");
    }

    #[test]
    #[should_panic(expected = "declared more than once")]
    fn test_duplicate_label_panics() {
        let a = 1;
        let _ = validate_struct([
            field("A", &a, rules![required()]),
            field("A", &a, rules![required()]),
        ]);
    }
}
