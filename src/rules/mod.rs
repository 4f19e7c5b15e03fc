//! The standard rule set.
//!
//! Every rule here is an ordinary [`Rule`](crate::Rule) implementation: the
//! engine runs them exactly like a rule written by a caller. Format and
//! comparison rules accept blank values, so an optional value is only
//! constrained when it is present; put [`required()`] first to forbid blanks.
//!
//! Every rule supports `.error(message)` to replace its message while keeping
//! its code. Messages may use the `{param}` placeholders listed on each rule.
//!
//! # Example
//!
//! ```rust
//! use regex::Regex;
//! use vetting::{rules, validate};
//! use vetting::rules::{is, length, matches, required};
//!
//! let zip = Regex::new(r"^[0-9]{5}$").unwrap();
//!
//! assert!(validate("12345", &rules![required(), matches(zip.clone())]).is_ok());
//! assert!(validate("", &rules![length(5, 100), is::url()]).is_ok());
//! assert_eq!(
//!     validate("example", &rules![required(), length(5, 100), is::url()])
//!         .unwrap_err()
//!         .to_string(),
//!     "must be a valid URL"
//! );
//! ```

mod custom;
pub mod is;
mod length;
mod matching;
mod membership;
mod required;
mod threshold;

pub use custom::{by, with_context, By, WithContext};
pub use length::{length, Length};
pub use matching::{matches, string_rule, Match, StringRule};
pub use membership::{none_of, one_of, In, NotIn};
pub use required::{
    empty, nil, nil_or_not_empty, not_nil, required, Empty, Nil, NilOrNotEmpty, NotNil, Required,
};
pub use threshold::{max, min, Threshold};

use crate::error::RuleError;

/// Builds the error for a failed standard rule, honouring a custom message.
pub(crate) fn violation(code: &str, default: &str, custom: Option<&str>) -> RuleError {
    RuleError::new(code, custom.unwrap_or(default))
}
