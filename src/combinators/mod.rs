//! Rules that control how other rules run.
//!
//! - [`skip()`]: stop evaluating the rest of the list
//! - [`when()`]: pick one of two rule lists by a condition
//! - [`each()`]: apply a rule list to every member of a collection
//! - [`Nested`]: let a [`Validatable`](crate::Validatable) value validate itself
//!
//! # Example
//!
//! ```rust
//! use vetting::{each, rules, skip, validate, when};
//! use vetting::rules::{is, length, required};
//!
//! let draft = true;
//! let title = "";
//!
//! // Drafts may have no title.
//! let result = validate(title, &rules![skip().when(draft), required(), length(3, 80)]);
//! assert!(result.is_ok());
//!
//! let result = validate(title, &rules![when(!draft, rules![required()])]);
//! assert!(result.is_ok());
//!
//! let links = vec!["https://example.com".to_string(), "nope".to_string()];
//! let result = validate(&links, &rules![each(rules![is::url()])]);
//! assert_eq!(result.unwrap_err().to_string(), "1: must be a valid URL.");
//! ```

mod each;
mod nested;
mod skip;
mod when;

pub use each::{each, Each};
pub use nested::Nested;
pub use skip::{skip, Skip};
pub use when::{when, When};
