//! Self-validating values.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ValidationError;
use crate::traverse::{self, Members};
use crate::validation::ValidationContext;

/// A value that knows how to validate itself.
///
/// Record types usually implement this with
/// [`validate_struct`](crate::validate_struct). Sequences and mappings of
/// `Validatable` values are `Validatable` too, reporting failures labelled by
/// index or key.
///
/// # Example
///
/// ```rust
/// use vetting::{field, rules, validate_struct, Validatable, ValidationError};
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
/// let staff = vec![Employee { name: "Ada".into() }, Employee { name: String::new() }];
/// assert_eq!(staff.validate().unwrap_err().to_string(), "1: (Name: cannot be blank).");
/// ```
pub trait Validatable {
    /// Validates the value.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Validates the value with a context.
    ///
    /// Implementations that call back into the engine should pass `ctx` on,
    /// so that rules at every depth see the same context.
    fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        let _ = ctx;
        self.validate()
    }
}

macro_rules! delegate_validatable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Validatable + ?Sized> Validatable for $ty {
                fn validate(&self) -> Result<(), ValidationError> {
                    (**self).validate()
                }

                fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
                    (**self).validate_with_context(ctx)
                }
            }
        )*
    };
}

delegate_validatable!(&T, Box<T>, Rc<T>, Arc<T>);

/// An absent value is valid; a present one validates itself.
impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.as_ref().map_or(Ok(()), Validatable::validate)
    }

    fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        self.as_ref().map_or(Ok(()), |v| v.validate_with_context(ctx))
    }
}

fn validate_members<C>(
    collection: &C,
    ctx: Option<&ValidationContext>,
) -> Result<(), ValidationError>
where
    C: Members + ?Sized,
    C::Item: Validatable,
{
    let members = traverse::members_of(collection)?;
    traverse::collect(members, |member| match ctx {
        Some(ctx) => member.validate_with_context(ctx),
        None => member.validate(),
    })
}

macro_rules! member_validatable {
    ($(impl<$($param:ident $(: $bound:path)?),*> for $ty:ty;)*) => {
        $(
            impl<$($param $(: $bound)?),*> Validatable for $ty
            where
                $ty: Members,
                <$ty as Members>::Item: Validatable,
            {
                fn validate(&self) -> Result<(), ValidationError> {
                    validate_members(self, None)
                }

                fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
                    validate_members(self, Some(ctx))
                }
            }
        )*
    };
}

member_validatable! {
    impl<T> for [T];
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
    impl<K: Display, V> for BTreeMap<K, V>;
    impl<K: Display, V, S: BuildHasher> for HashMap<K, V, S>;
    impl<K: Display, V, S> for IndexMap<K, V, S>;
}

impl<T: Validatable, const N: usize> Validatable for [T; N] {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_members(self, None)
    }

    fn validate_with_context(&self, ctx: &ValidationContext) -> Result<(), ValidationError> {
        validate_members(self, Some(ctx))
    }
}
