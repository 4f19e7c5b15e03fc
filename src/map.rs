//! Mapping validation through explicit key declarations.
//!
//! A [`MapRule`] checks the value stored at each declared key against that
//! key's rules and reports failures labelled by key. It is an ordinary rule,
//! so a nested mapping is validated by putting another `map([..])` in a key's
//! rule list.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use vetting::{key, map, rules, validate};
//! use vetting::rules::{is, length, required};
//!
//! let customer = json!({
//!     "Name": "Qiang Xue",
//!     "Email": "q",
//!     "Address": { "Street": "123" },
//! });
//!
//! let result = validate(&customer, &rules![map([
//!     key("Name", rules![required(), length(5, 20)]),
//!     key("Email", rules![required(), is::email()]),
//!     key("Address", rules![map([
//!         key("Street", rules![required(), length(5, 50)]),
//!     ])]),
//! ])]);
//!
//! assert_eq!(
//!     result.unwrap_err().to_string(),
//!     "Address: (Street: the length must be between 5 and 50); Email: must be a valid email address."
//! );
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Errors, RuleError, ValidationError};
use crate::rule::{evaluate, Outcome, Rule, RuleSet};
use crate::validation::ValidationContext;

/// A value made of string keys and values of one type.
pub trait KeyedMap {
    /// The value type.
    type Item;

    /// Returns the entries, or `None` if the value is not a mapping.
    fn entries(&self) -> Option<Vec<(&str, &Self::Item)>>;

    /// Returns true for an absent mapping, which passes any declaration.
    fn is_absent(&self) -> bool {
        false
    }
}

impl KeyedMap for Map<String, Value> {
    type Item = Value;

    fn entries(&self) -> Option<Vec<(&str, &Value)>> {
        Some(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl KeyedMap for Value {
    type Item = Value;

    fn entries(&self) -> Option<Vec<(&str, &Value)>> {
        self.as_object().and_then(KeyedMap::entries)
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }
}

impl<V> KeyedMap for BTreeMap<String, V> {
    type Item = V;

    fn entries(&self) -> Option<Vec<(&str, &V)>> {
        Some(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl<V, S: BuildHasher> KeyedMap for HashMap<String, V, S> {
    type Item = V;

    fn entries(&self) -> Option<Vec<(&str, &V)>> {
        Some(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl<V, S> KeyedMap for IndexMap<String, V, S> {
    type Item = V;

    fn entries(&self) -> Option<Vec<(&str, &V)>> {
        Some(self.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }
}

impl<M: KeyedMap> KeyedMap for Option<M> {
    type Item = M::Item;

    fn entries(&self) -> Option<Vec<(&str, &M::Item)>> {
        match self {
            Some(map) => map.entries(),
            None => Some(Vec::new()),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().map_or(true, KeyedMap::is_absent)
    }
}

/// The rules for one key of a mapping.
pub struct Key<V> {
    name: String,
    rules: RuleSet<V>,
    optional: bool,
}

/// Declares a key checked against `rules`.
///
/// A missing key is checked as `V::default()` (JSON `null`), so `required()`
/// reports it as blank. Use [`Key::optional`] to accept a missing key.
pub fn key<V>(name: impl Into<String>, rules: RuleSet<V>) -> Key<V> {
    Key {
        name: name.into(),
        rules,
        optional: false,
    }
}

impl<V> Key<V> {
    /// Accepts the key being absent; its rules only run when it is present.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<V> fmt::Debug for Key<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .field("optional", &self.optional)
            .finish()
    }
}

/// Validates a mapping key by key.
///
/// Created by [`map()`]. Keys are checked in declaration order; failures are
/// reported per key. Keys present in the mapping but not declared fail with
/// `key not expected` unless [`allow_extra_keys`](MapRule::allow_extra_keys)
/// is set.
pub struct MapRule<V> {
    keys: IndexMap<String, Key<V>>,
    allow_extra: bool,
}

/// Creates a mapping rule from key declarations.
///
/// # Panics
///
/// Panics if a key is declared twice.
pub fn map<V>(keys: impl IntoIterator<Item = Key<V>>) -> MapRule<V> {
    let mut declared = IndexMap::new();
    for key in keys {
        let name = key.name.clone();
        assert!(
            declared.insert(name.clone(), key).is_none(),
            "key {:?} is declared more than once",
            name
        );
    }
    MapRule {
        keys: declared,
        allow_extra: false,
    }
}

impl<V> MapRule<V> {
    /// Accepts keys that have no declaration.
    pub fn allow_extra_keys(mut self) -> Self {
        self.allow_extra = true;
        self
    }
}

impl<V> fmt::Debug for MapRule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRule")
            .field("keys", &self.keys.values().collect::<Vec<_>>())
            .field("allow_extra", &self.allow_extra)
            .finish()
    }
}

impl<V: Default> MapRule<V> {
    fn run<M>(&self, value: &M, ctx: Option<&ValidationContext>) -> Result<(), ValidationError>
    where
        M: KeyedMap<Item = V> + ?Sized,
    {
        if value.is_absent() {
            return Ok(());
        }
        let entries: IndexMap<&str, &V> = value
            .entries()
            .ok_or_else(|| ValidationError::internal("only a map can be validated"))?
            .into_iter()
            .collect();

        let mut errors = Errors::new();
        let missing = V::default();

        for (name, key) in &self.keys {
            let result = match entries.get(name.as_str()) {
                Some(found) => evaluate(*found, &key.rules, ctx),
                None if key.optional => continue,
                None => evaluate(&missing, &key.rules, ctx),
            };
            match result {
                Err(error) if error.is_operational() => {
                    tracing::debug!(key = %name, %error, "map validation aborted");
                    return Err(error);
                }
                result => errors.insert(name.as_str(), result),
            }
        }

        if !self.allow_extra {
            for name in entries
                .keys()
                .filter(|name| !self.keys.contains_key(**name))
            {
                tracing::trace!(key = %name, "undeclared key");
                errors.insert_error(
                    *name,
                    RuleError::new("validation_key_unexpected", "key not expected").into(),
                );
            }
        }

        errors.into_result()
    }
}

impl<M, V> Rule<M> for MapRule<V>
where
    M: KeyedMap<Item = V> + ?Sized,
    V: Default,
{
    fn check(&self, value: &M) -> Outcome {
        self.run(value, None).into()
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &M) -> Outcome {
        self.run(value, Some(ctx)).into()
    }
}

/// Validates `value` against key declarations.
///
/// Shorthand for checking `value` with [`map(keys)`](map()).
pub fn validate_map<M, V>(
    value: &M,
    keys: impl IntoIterator<Item = Key<V>>,
) -> Result<(), ValidationError>
where
    M: KeyedMap<Item = V> + ?Sized,
    V: Default,
{
    map(keys).run(value, None)
}

/// Validates `value` against key declarations, passing `ctx` to every rule.
pub fn validate_map_with_context<M, V>(
    ctx: &ValidationContext,
    value: &M,
    keys: impl IntoIterator<Item = Key<V>>,
) -> Result<(), ValidationError>
where
    M: KeyedMap<Item = V> + ?Sized,
    V: Default,
{
    map(keys).run(value, Some(ctx))
}
