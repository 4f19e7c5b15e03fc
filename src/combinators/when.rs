use std::fmt;

use crate::rule::{evaluate, Outcome, Rule, RuleSet};
use crate::validation::ValidationContext;

/// Runs one of two rule lists depending on a condition.
///
/// Created by [`when()`]. The condition is fixed at construction and the
/// chosen list is evaluated on every call; a skip inside the list only ends
/// that list.
pub struct When<T: ?Sized> {
    condition: bool,
    rules: RuleSet<T>,
    otherwise: RuleSet<T>,
}

/// Creates a conditional rule that runs `rules` when `condition` holds.
///
/// # Example
///
/// ```rust
/// use vetting::{rules, validate, when};
/// use vetting::rules::{length, required};
///
/// let is_company = false;
/// let vat_id = "";
///
/// let result = validate(
///     vat_id,
///     &rules![when(is_company, rules![required(), length(8, 12)]).otherwise(rules![length(0, 0)])],
/// );
/// assert!(result.is_ok());
/// ```
pub fn when<T: ?Sized>(condition: bool, rules: RuleSet<T>) -> When<T> {
    When {
        condition,
        rules,
        otherwise: Vec::new(),
    }
}

impl<T: ?Sized> When<T> {
    /// Sets the rules to run when the condition does not hold.
    pub fn otherwise(mut self, rules: RuleSet<T>) -> Self {
        self.otherwise = rules;
        self
    }

    fn branch(&self) -> &[Box<dyn Rule<T>>] {
        if self.condition {
            &self.rules
        } else {
            &self.otherwise
        }
    }
}

impl<T: ?Sized> fmt::Debug for When<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("When")
            .field("condition", &self.condition)
            .field("rules", &self.rules.len())
            .field("otherwise", &self.otherwise.len())
            .finish()
    }
}

impl<T: ?Sized> Rule<T> for When<T> {
    fn check(&self, value: &T) -> Outcome {
        evaluate(value, self.branch(), None).into()
    }

    fn check_with_context(&self, ctx: &ValidationContext, value: &T) -> Outcome {
        evaluate(value, self.branch(), Some(ctx)).into()
    }
}
