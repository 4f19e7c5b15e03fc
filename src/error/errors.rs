//! Label-keyed aggregate of nested validation failures.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{self, Display};

use serde_json::{Map, Value};
use stillwater::prelude::*;
use stillwater::Validation;

use super::ValidationError;

/// Failures of the members of an aggregate value, keyed by label.
///
/// Labels are field names for records, decimal indexes for sequences and key
/// strings for mappings. Entries may hold `None` for members that passed, so
/// that an aggregate can be assembled from several independent validations;
/// [`filter`](Errors::filter) drops them.
///
/// Labels are kept in lexicographic order, so iteration and rendering are
/// deterministic regardless of declaration order.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate, Errors};
/// use vetting::rules::{length, required};
///
/// let name = "Qiang Xue";
/// let zip = "";
///
/// let result = Errors::new()
///     .with("name", validate(name, &rules![required(), length(5, 20)]))
///     .with("zip", validate(zip, &rules![required()]))
///     .into_result();
///
/// assert_eq!(result.unwrap_err().to_string(), "zip: cannot be blank.");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Errors(BTreeMap<String, Option<ValidationError>>);

impl Errors {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of validating the member at `label`.
    ///
    /// A later entry for the same label replaces the earlier one. A nested
    /// aggregate without failures is recorded as a pass.
    pub fn insert(&mut self, label: impl Into<String>, result: Result<(), ValidationError>) {
        self.0.insert(label.into(), result.err().and_then(settle));
    }

    /// Records a failure for the member at `label`.
    pub fn insert_error(&mut self, label: impl Into<String>, error: ValidationError) {
        self.0.insert(label.into(), settle(error));
    }

    /// Builder form of [`insert`](Errors::insert).
    pub fn with(mut self, label: impl Into<String>, result: Result<(), ValidationError>) -> Self {
        self.insert(label, result);
        self
    }

    /// Returns the failure recorded for `label`, if any.
    pub fn get(&self, label: &str) -> Option<&ValidationError> {
        self.0.get(label).and_then(Option::as_ref)
    }

    /// Returns true if a failure is recorded for `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Iterates over recorded failures in label order, skipping passing members.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.0
            .iter()
            .filter_map(|(label, error)| error.as_ref().map(|e| (label.as_str(), e)))
    }

    /// Iterates over every recorded label, passing members included.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of recorded failures.
    pub fn len(&self) -> usize {
        self.0.values().filter(|e| e.is_some()).count()
    }

    /// Returns true if no failure is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Option::is_none)
    }

    /// Removes passing members, at every depth.
    ///
    /// Nested aggregates left without failures are removed as well. Returns
    /// `None` when nothing failed, which is how "no failures" is told apart
    /// from "an aggregate that happens to be empty".
    pub fn filter(self) -> Option<Errors> {
        let kept: BTreeMap<_, _> = self
            .0
            .into_iter()
            .filter_map(|(label, error)| Some((label, Some(settle(error?)?))))
            .collect();
        if kept.is_empty() {
            None
        } else {
            Some(Errors(kept))
        }
    }

    /// Filters and converts into the result returned by the entry points.
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.filter() {
            Some(errors) => Err(ValidationError::Errors(errors)),
            None => Ok(()),
        }
    }

    /// Filters and converts into a stillwater `Validation`.
    pub fn into_validation(self) -> Validation<(), Errors> {
        match self.filter() {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }

    /// Converts a stillwater `Validation` back into an entry point result.
    pub fn from_validation(validation: Validation<(), Errors>) -> Result<(), ValidationError> {
        match validation {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => errors.into_result(),
        }
    }

    /// Merges `other` into self at the same level.
    ///
    /// When both sides hold an aggregate under the same label the two are
    /// merged recursively; otherwise the entry from `other` wins.
    pub fn merge(&mut self, other: Errors) {
        for (label, incoming) in other.0 {
            match self.0.entry(label) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(incoming);
                }
                btree_map::Entry::Occupied(mut slot) => {
                    let merged = match (slot.get_mut().take(), incoming) {
                        (
                            Some(ValidationError::Errors(mut existing)),
                            Some(ValidationError::Errors(nested)),
                        ) => {
                            existing.merge(nested);
                            Some(ValidationError::Errors(existing))
                        }
                        (existing, None) => existing,
                        (_, incoming) => incoming,
                    };
                    slot.insert(merged);
                }
            }
        }
    }

    /// Renders the failures as a nested JSON object.
    ///
    /// Leaf failures become their rendered message, nested aggregates become
    /// nested objects. Passing members are omitted.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (label, error) in self.iter() {
            let value = match error {
                ValidationError::Errors(nested) => nested.to_json(),
                other => Value::String(other.to_string()),
            };
            object.insert(label.to_string(), value);
        }
        Value::Object(object)
    }

    fn write_entries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, error)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match error {
                ValidationError::Errors(nested) => {
                    write!(f, "{}: (", label)?;
                    nested.write_entries(f)?;
                    f.write_str(")")?;
                }
                other => write!(f, "{}: {}", label, other)?,
            }
        }
        Ok(())
    }
}

/// Filters a nested aggregate, turning one without failures into a pass.
fn settle(error: ValidationError) -> Option<ValidationError> {
    match error {
        ValidationError::Errors(nested) => nested.filter().map(ValidationError::Errors),
        other => Some(other),
    }
}

impl Semigroup for Errors {
    fn combine(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        self.write_entries(f)?;
        f.write_str(".")
    }
}

impl std::error::Error for Errors {}

impl<K: Into<String>> FromIterator<(K, Result<(), ValidationError>)> for Errors {
    fn from_iter<I: IntoIterator<Item = (K, Result<(), ValidationError>)>>(iter: I) -> Self {
        let mut errors = Errors::new();
        for (label, result) in iter {
            errors.insert(label, result);
        }
        errors
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = (&'a str, &'a ValidationError);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a ValidationError)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Errors>();
    assert_sync::<Errors>();
};
