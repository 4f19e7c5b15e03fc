//! Validation context threaded through context-aware validation.
//!
//! This module provides the [`ValidationContext`] type that carries a
//! cancellation signal and typed values through every level of a
//! `*_with_context` call. Rules and [`Validatable`](crate::Validatable)
//! implementations read from it; the engine itself never mutates it.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::ValidationError;

type ValueMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Validation context carries cancellation and caller-supplied values.
///
/// `ValidationContext` is passed unchanged through the whole call graph of
/// [`validate_with_context`](crate::validate_with_context) and friends, so a
/// rule at any depth sees the same instance the caller built.
///
/// Values are keyed by their type, so callers usually wrap what they store in
/// a newtype:
///
/// ```rust
/// use vetting::ValidationContext;
///
/// struct Tenant(String);
///
/// let ctx = ValidationContext::background().with_value(Tenant("acme".into()));
/// assert_eq!(ctx.value::<Tenant>().map(|t| t.0.as_str()), Some("acme"));
/// assert!(ctx.value::<u32>().is_none());
/// ```
///
/// Deriving a context never touches its parent:
///
/// ```rust
/// use vetting::ValidationContext;
///
/// let parent = ValidationContext::background().with_value(1u8);
/// let child = parent.with_value(2u8);
/// assert_eq!(parent.value::<u8>(), Some(&1));
/// assert_eq!(child.value::<u8>(), Some(&2));
/// ```
#[derive(Clone, Default)]
pub struct ValidationContext {
    cancellation: CancellationToken,
    values: Arc<ValueMap>,
}

impl ValidationContext {
    /// Creates an empty context that is never cancelled unless asked to.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a new context that additionally carries `value`.
    ///
    /// A value of the same type already present is shadowed in the returned
    /// context only.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            cancellation: self.cancellation.clone(),
            values: Arc::new(values),
        }
    }

    /// Returns a new context observing the given cancellation token.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancellation: token,
            values: Arc::clone(&self.values),
        }
    }

    /// Returns a context whose token is a child of this one.
    ///
    /// Cancelling the parent cancels the child, not the other way round.
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
            values: Arc::clone(&self.values),
        }
    }

    /// Looks up the value stored for type `T`.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Returns the cancellation token observed by this context.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Signals cancellation to everything observing this context.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns true once cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fails with [`ValidationError::Cancelled`] once cancellation has been signalled.
    ///
    /// Cooperative rules call this before doing any work.
    pub fn ensure_active(&self) -> Result<(), ValidationError> {
        if self.is_cancelled() {
            Err(ValidationError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Returns true if both handles share the same value storage.
    pub fn same_values(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("cancelled", &self.is_cancelled())
            .field("values", &self.values.len())
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationContext>();
    assert_sync::<ValidationContext>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Reference(&'static str);

    #[test]
    fn test_background_is_empty_and_active() {
        let ctx = ValidationContext::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.ensure_active().is_ok());
        assert!(ctx.value::<Reference>().is_none());
    }

    #[test]
    fn test_value_lookup_by_type() {
        let ctx = ValidationContext::background()
            .with_value(Reference("good sample"))
            .with_value(42u32);

        assert_eq!(ctx.value::<Reference>(), Some(&Reference("good sample")));
        assert_eq!(ctx.value::<u32>(), Some(&42));
        assert!(ctx.value::<u64>().is_none());
    }

    #[test]
    fn test_with_value_leaves_parent_untouched() {
        let parent = ValidationContext::background().with_value(Reference("a"));
        let child = parent.with_value(Reference("b"));

        assert_eq!(parent.value::<Reference>(), Some(&Reference("a")));
        assert_eq!(child.value::<Reference>(), Some(&Reference("b")));
        assert!(!parent.same_values(&child));
    }

    #[test]
    fn test_cancel_is_observed_by_clones() {
        let ctx = ValidationContext::background();
        let clone = ctx.clone();

        ctx.cancel();

        assert!(clone.is_cancelled());
        assert_eq!(clone.ensure_active(), Err(ValidationError::Cancelled));
        assert!(ctx.same_values(&clone));
    }

    #[test]
    fn test_child_cancellation_is_one_way() {
        let parent = ValidationContext::background();
        let child = parent.child();

        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());

        let other_child = parent.child();
        parent.cancel();
        assert!(other_child.is_cancelled());
    }

    #[test]
    fn test_with_cancellation_uses_given_token() {
        let token = CancellationToken::new();
        let ctx = ValidationContext::background()
            .with_value(Reference("kept"))
            .with_cancellation(token.clone());

        token.cancel();

        assert!(ctx.is_cancelled());
        assert_eq!(ctx.value::<Reference>(), Some(&Reference("kept")));
    }
}
