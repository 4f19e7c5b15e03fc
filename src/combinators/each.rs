use std::fmt;

use crate::rule::{evaluate, Outcome, Rule, RuleSet};
use crate::traverse::{self, Members};
use crate::validation::ValidationContext;

/// Applies a rule list to every member of a collection.
///
/// Created by [`each()`]. Failures are reported per member, labelled by index
/// for sequences and by key for mappings. Values that are not collections
/// fail with an internal error; JSON `null` has no members and passes.
pub struct Each<E: ?Sized> {
    rules: RuleSet<E>,
}

/// Creates a rule applying `rules` to each member.
///
/// ```rust
/// use vetting::{each, rules, validate};
/// use vetting::rules::{length, required};
///
/// let tags = vec!["rust".to_string(), String::new(), "a-very-long-tag".to_string()];
/// let result = validate(&tags, &rules![each(rules![required(), length(1, 8)])]);
///
/// assert_eq!(
///     result.unwrap_err().to_string(),
///     "1: cannot be blank; 2: the length must be between 1 and 8."
/// );
/// ```
pub fn each<E: ?Sized>(rules: RuleSet<E>) -> Each<E> {
    Each { rules }
}

impl<E: ?Sized> Each<E> {
    fn run<C>(&self, collection: &C, ctx: Option<&ValidationContext>) -> Outcome
    where
        C: Members<Item = E> + ?Sized,
    {
        let members = match traverse::members_of(collection) {
            Ok(members) => members,
            Err(error) => return error.into(),
        };
        traverse::collect(members, |member| evaluate(member, &self.rules, ctx)).into()
    }
}

impl<E: ?Sized> fmt::Debug for Each<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Each").field("rules", &self.rules.len()).finish()
    }
}

impl<C, E> Rule<C> for Each<E>
where
    C: Members<Item = E> + ?Sized,
    E: ?Sized,
{
    fn check(&self, value: &C) -> Outcome {
        self.run(value, None)
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &C) -> Outcome {
        self.run(value, Some(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::rules;
    use crate::rules::{is, min, required, with_context};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_each_sequence() {
        let rule: Each<i32> = each(rules![min(10)]);
        assert!(rule.check(&vec![10, 11, 12]).is_valid());

        let error = rule.check(&vec![10, 3, 5]).into_result().unwrap_err();
        assert_eq!(
            error.to_string(),
            "1: must be no less than 10; 2: must be no less than 10."
        );
    }

    #[test]
    fn test_each_map_labels_by_key() {
        let mut emails = BTreeMap::new();
        emails.insert("home", "home@example.com".to_string());
        emails.insert("work", "nope".to_string());

        let rule: Each<String> = each(rules![is::email()]);
        let error = rule.check(&emails).into_result().unwrap_err();
        assert_eq!(error.to_string(), "work: must be a valid email address.");
    }

    #[test]
    fn test_each_json() {
        let rule: Each<serde_json::Value> = each(rules![required()]);
        assert!(rule.check(&json!(["a", "b"])).is_valid());
        assert!(rule.check(&json!(null)).is_valid());
        let error = rule.check(&json!({"x": "", "y": 1})).into_result().unwrap_err();
        assert_eq!(error.to_string(), "x: cannot be blank.");

        let error = rule.check(&json!(5)).into_result().unwrap_err();
        assert!(error.is_operational());
    }

    #[test]
    fn test_each_passes_context() {
        struct Limit(i32);

        let rule: Each<i32> = each(rules![with_context(|ctx: &ValidationContext, n: &i32| {
            match ctx.value::<Limit>() {
                Some(Limit(limit)) if n > limit => {
                    Err(ValidationError::rule("limit", "over limit"))
                }
                _ => Ok(()),
            }
        })]);

        let ctx = ValidationContext::background().with_value(Limit(2));
        let outcome = rule.check_with_context(&ctx, &vec![1, 3]);
        let error = outcome.into_result().unwrap_err();
        assert_eq!(error.to_string(), "1: over limit.");
        assert!(rule.check(&vec![1, 3]).is_valid());
    }
}
