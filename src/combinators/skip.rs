use crate::rule::{Outcome, Rule};

/// Stops evaluation of the remaining rules and treats the value as valid.
///
/// Created by [`skip()`]. Unconditional unless [`when`](Skip::when) is given a
/// false condition, in which case it passes and evaluation continues.
#[derive(Debug, Clone, Copy)]
pub struct Skip {
    condition: bool,
}

/// Creates a rule that skips the rest of its list.
pub fn skip() -> Skip {
    Skip { condition: true }
}

impl Skip {
    /// Only skips when `condition` is true.
    pub fn when(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }
}

impl<T: ?Sized> Rule<T> for Skip {
    fn check(&self, _value: &T) -> Outcome {
        if self.condition {
            Outcome::Skip
        } else {
            Outcome::Valid
        }
    }
}
