//! Member discovery for sequences and mappings.
//!
//! [`Members`] lists the labelled members of a collection: sequences label
//! by zero-based index, mappings by key. [`each`](crate::each) and the
//! collection impls of [`Validatable`](crate::Validatable) walk members
//! through [`collect`], which aggregates per-member failures into
//! [`Errors`].

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Errors, ValidationError};

/// A value with labelled members.
pub trait Members {
    /// The member type.
    type Item: ?Sized;

    /// Returns the members with their labels, or `None` if the value is not a
    /// collection.
    fn members(&self) -> Option<Vec<(String, &Self::Item)>>;
}

fn indexed<'a, T: 'a>(items: impl Iterator<Item = &'a T>) -> Vec<(String, &'a T)> {
    items
        .enumerate()
        .map(|(index, item)| (index.to_string(), item))
        .collect()
}

fn keyed<'a, K: Display + 'a, V: 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Vec<(String, &'a V)> {
    entries.map(|(key, value)| (key.to_string(), value)).collect()
}

impl<T> Members for [T] {
    type Item = T;

    fn members(&self) -> Option<Vec<(String, &T)>> {
        Some(indexed(self.iter()))
    }
}

impl<T, const N: usize> Members for [T; N] {
    type Item = T;

    fn members(&self) -> Option<Vec<(String, &T)>> {
        Some(indexed(self.iter()))
    }
}

impl<T> Members for Vec<T> {
    type Item = T;

    fn members(&self) -> Option<Vec<(String, &T)>> {
        Some(indexed(self.iter()))
    }
}

impl<T> Members for VecDeque<T> {
    type Item = T;

    fn members(&self) -> Option<Vec<(String, &T)>> {
        Some(indexed(self.iter()))
    }
}

impl<K: Display, V> Members for BTreeMap<K, V> {
    type Item = V;

    fn members(&self) -> Option<Vec<(String, &V)>> {
        Some(keyed(self.iter()))
    }
}

impl<K: Display, V, S: BuildHasher> Members for HashMap<K, V, S> {
    type Item = V;

    fn members(&self) -> Option<Vec<(String, &V)>> {
        Some(keyed(self.iter()))
    }
}

impl<K: Display, V, S> Members for IndexMap<K, V, S> {
    type Item = V;

    fn members(&self) -> Option<Vec<(String, &V)>> {
        Some(keyed(self.iter()))
    }
}

impl Members for Map<String, Value> {
    type Item = Value;

    fn members(&self) -> Option<Vec<(String, &Value)>> {
        Some(keyed(self.iter()))
    }
}

/// JSON arrays label by index and objects by key; `null` has no members.
impl Members for Value {
    type Item = Value;

    fn members(&self) -> Option<Vec<(String, &Value)>> {
        match self {
            Value::Null => Some(Vec::new()),
            Value::Array(items) => Some(indexed(items.iter())),
            Value::Object(map) => map.members(),
            _ => None,
        }
    }
}

impl<C: Members + ?Sized> Members for &C {
    type Item = C::Item;

    fn members(&self) -> Option<Vec<(String, &C::Item)>> {
        (**self).members()
    }
}

/// Checks every member and aggregates the failures by label.
///
/// Violations are collected; an operational error aborts the walk and is
/// returned unchanged.
pub(crate) fn collect<'a, T, F>(
    members: Vec<(String, &'a T)>,
    mut check: F,
) -> Result<(), ValidationError>
where
    T: ?Sized + 'a,
    F: FnMut(&T) -> Result<(), ValidationError>,
{
    let mut errors = Errors::new();
    for (label, member) in members {
        match check(member) {
            Err(error) if error.is_operational() => {
                tracing::debug!(member = %label, %error, "traversal aborted");
                return Err(error);
            }
            Err(error) => {
                tracing::trace!(member = %label, "member failed");
                errors.insert_error(label, error);
            }
            Ok(()) => errors.insert(label, Ok(())),
        }
    }
    errors.into_result()
}

/// Lists the members of `value`, or fails with an internal error.
pub(crate) fn members_of<C: Members + ?Sized>(
    value: &C,
) -> Result<Vec<(String, &C::Item)>, ValidationError> {
    value
        .members()
        .ok_or_else(|| ValidationError::internal("must be an iterable (map, slice or array)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels<C: Members + ?Sized>(value: &C) -> Vec<String> {
        value
            .members()
            .unwrap()
            .into_iter()
            .map(|(label, _)| label)
            .collect()
    }

    #[test]
    fn test_sequence_labels_are_indices() {
        assert_eq!(labels(&vec!["a", "b", "c"]), vec!["0", "1", "2"]);
        assert_eq!(labels(&[1, 2]), vec!["0", "1"]);
        assert_eq!(labels(&json!([true, false])), vec!["0", "1"]);
    }

    #[test]
    fn test_mapping_labels_are_keys() {
        let map: BTreeMap<&str, i32> = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(labels(&map), vec!["a", "b"]);
        assert_eq!(labels(&json!({"x": 1})), vec!["x"]);
    }

    #[test]
    fn test_json_scalars_have_no_members() {
        assert!(json!(3).members().is_none());
        assert!(json!(null).members().unwrap().is_empty());
        assert!(members_of(&json!("text")).unwrap_err().is_operational());
    }

    #[test]
    fn test_collect_keeps_only_failures() {
        let values = vec![1, 2, 3];
        let result = collect(values.members().unwrap(), |n: &i32| {
            if n % 2 == 0 {
                Ok(())
            } else {
                Err(ValidationError::rule("odd", "is odd"))
            }
        });

        let error = result.unwrap_err();
        let errors = error.as_errors().unwrap();
        assert_eq!(errors.labels().collect::<Vec<_>>(), vec!["0", "2"]);
        assert_eq!(error.to_string(), "0: is odd; 2: is odd.");
    }

    #[test]
    fn test_collect_aborts_on_internal_error() {
        let values = vec![1, 2, 3];
        let mut seen = 0;
        let result = collect(values.members().unwrap(), |_: &i32| {
            seen += 1;
            Err(ValidationError::internal("boom"))
        });

        assert!(matches!(result, Err(ValidationError::Internal(_))));
        assert_eq!(seen, 1);
    }
}
