//! Value shapes understood by the standard rules.
//!
//! The engine never inspects values itself. The standard rules instead ask
//! narrow questions through these traits: is the value blank, is it nil, how
//! long is it, what text or number does it hold. Implement them for your own
//! types to make the standard rules apply to them.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

/// Whether a value is the "empty" representative of its type.
///
/// Blank values are empty strings and collections, numeric zero, `false`,
/// `None`, JSON `null`, and whatever a user type declares blank. `required()`
/// rejects blank values; the format rules accept them.
pub trait Blank {
    /// Returns true if the value is blank.
    fn is_blank(&self) -> bool;
}

/// Whether a value is absent.
///
/// Only types with a real notion of absence implement this: `Option` and JSON
/// values.
pub trait Nullable {
    /// Returns true if the value is absent.
    fn is_nil(&self) -> bool;
}

/// The length of a value, in characters for text and in members for collections.
pub trait Measurable {
    /// Returns the length, or `None` if the value has no length.
    fn measure(&self) -> Option<usize>;
}

/// Read access to the text held by a value.
pub trait AsText {
    /// Returns the text, or `None` if the value does not hold text.
    fn as_text(&self) -> Option<&str>;
}

/// A number read out of a value for threshold comparison.
///
/// Integers compare exactly; as soon as either side is a float both sides are
/// compared as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// An integer of any width or signedness.
    Int(i128),
    /// A floating point number.
    Float(f64),
}

impl Scalar {
    fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(i) => i as f64,
            Scalar::Float(f) => f,
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Scalar::Int(a), Scalar::Int(b)) => a.partial_cmp(&b),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// Numeric reading of a value, used by `min` and `max`.
///
/// Any integer type compares against any other, so `min(2)` applies to an
/// `i64` or `u8` field alike.
pub trait Numeric {
    /// Returns the number, or `None` if the value does not hold one.
    fn to_scalar(&self) -> Option<Scalar>;
}

macro_rules! numeric_ints {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                fn to_scalar(&self) -> Option<Scalar> {
                    Some(Scalar::Int(i128::from(*self)))
                }
            }
        )*
    };
}

numeric_ints!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Numeric for isize {
    fn to_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Int(*self as i128))
    }
}

impl Numeric for usize {
    fn to_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Int(*self as i128))
    }
}

impl Numeric for u128 {
    fn to_scalar(&self) -> Option<Scalar> {
        Some(match i128::try_from(*self) {
            Ok(i) => Scalar::Int(i),
            Err(_) => Scalar::Float(*self as f64),
        })
    }
}

impl Numeric for f32 {
    fn to_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Float(f64::from(*self)))
    }
}

impl Numeric for f64 {
    fn to_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Float(*self))
    }
}

impl Numeric for Value {
    fn to_scalar(&self) -> Option<Scalar> {
        let Value::Number(n) = self else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            Some(Scalar::Int(i128::from(i)))
        } else if let Some(u) = n.as_u64() {
            Some(Scalar::Int(i128::from(u)))
        } else {
            n.as_f64().map(Scalar::Float)
        }
    }
}

impl<T: Numeric> Numeric for Option<T> {
    fn to_scalar(&self) -> Option<Scalar> {
        self.as_ref().and_then(Numeric::to_scalar)
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_scalar(&self) -> Option<Scalar> {
        (**self).to_scalar()
    }
}

impl<T: Numeric + ?Sized> Numeric for Box<T> {
    fn to_scalar(&self) -> Option<Scalar> {
        (**self).to_scalar()
    }
}

macro_rules! blank_numbers {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Blank for $ty {
                fn is_blank(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

blank_numbers!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0, char => '\0',
);

impl Blank for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Cow<'_, str> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Box<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Rc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Arc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl Blank for Value {
    fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
        }
    }
}

impl Blank for Map<String, Value> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! sized_collections {
    ($(impl[$($gen:tt)*] for $ty:ty;)*) => {
        $(
            impl<$($gen)*> Blank for $ty {
                fn is_blank(&self) -> bool {
                    self.is_empty()
                }
            }

            impl<$($gen)*> Measurable for $ty {
                fn measure(&self) -> Option<usize> {
                    Some(self.len())
                }
            }
        )*
    };
}

sized_collections! {
    impl[T] for [T];
    impl[T] for Vec<T>;
    impl[T] for VecDeque<T>;
    impl[T] for BTreeSet<T>;
    impl[T, S] for HashSet<T, S>;
    impl[T, S] for IndexSet<T, S>;
    impl[K, V] for BTreeMap<K, V>;
    impl[K, V, S] for HashMap<K, V, S>;
    impl[K, V, S] for IndexMap<K, V, S>;
}

impl<T, const N: usize> Blank for [T; N] {
    fn is_blank(&self) -> bool {
        N == 0
    }
}

impl<T, const N: usize> Measurable for [T; N] {
    fn measure(&self) -> Option<usize> {
        Some(N)
    }
}

impl<T> Nullable for Option<T> {
    fn is_nil(&self) -> bool {
        self.is_none()
    }
}

impl Nullable for Value {
    fn is_nil(&self) -> bool {
        self.is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn is_nil(&self) -> bool {
        (**self).is_nil()
    }
}

impl Measurable for str {
    fn measure(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measurable for String {
    fn measure(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measurable for Cow<'_, str> {
    fn measure(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measurable for Value {
    fn measure(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            Value::Null => Some(0),
            Value::Bool(_) | Value::Number(_) => None,
        }
    }
}

impl Measurable for Map<String, Value> {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Measurable> Measurable for Option<T> {
    fn measure(&self) -> Option<usize> {
        self.as_ref().map_or(Some(0), Measurable::measure)
    }
}

impl<T: Measurable + ?Sized> Measurable for &T {
    fn measure(&self) -> Option<usize> {
        (**self).measure()
    }
}

impl<T: Measurable + ?Sized> Measurable for Box<T> {
    fn measure(&self) -> Option<usize> {
        (**self).measure()
    }
}

impl AsText for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsText for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl AsText for Cow<'_, str> {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl AsText for Value {
    fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            Value::Null => Some(""),
            _ => None,
        }
    }
}

impl<T: AsText> AsText for Option<T> {
    fn as_text(&self) -> Option<&str> {
        self.as_ref().map_or(Some(""), AsText::as_text)
    }
}

impl<T: AsText + ?Sized> AsText for &T {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

impl<T: AsText + ?Sized> AsText for Box<T> {
    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }
}

/// Returns the type name with module paths stripped, for internal error messages.
pub(crate) fn kind_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    full.split_inclusive(is_delimiter)
        .map(|piece| piece.rsplit("::").next().unwrap_or(piece))
        .collect()
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '<' | '>' | ',' | ' ' | '&' | '[' | ']' | '(' | ')' | ';')
}
