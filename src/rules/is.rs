//! Common text format checks.
//!
//! Each function returns a [`StringRule`], so blank values pass and a custom
//! message can be set with `.error(..)`.
//!
//! ```rust
//! use vetting::{rules, validate};
//! use vetting::rules::{is, required};
//!
//! assert!(validate("a@example.com", &rules![required(), is::email()]).is_ok());
//! assert_eq!(
//!     validate("q", &rules![is::email()]).unwrap_err().to_string(),
//!     "must be a valid email address"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::StringRule;
use crate::error::RuleError;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
        r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("email pattern is valid")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?:https?|ftp)://)?",
        r"(?:localhost|(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}|\d{1,3}(?:\.\d{1,3}){3})",
        r"(?::\d{1,5})?(?:[/?#]\S*)?$",
    ))
    .expect("url pattern is valid")
});

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid pattern is valid")
});

/// An email address. Code `validation_is_email`.
pub fn email() -> StringRule {
    StringRule::with_error(
        |s| EMAIL.is_match(s),
        RuleError::new("validation_is_email", "must be a valid email address"),
    )
}

/// An http, https or ftp URL. Code `validation_is_url`.
///
/// The scheme may be omitted, so `example.com/docs` passes. The host must be
/// `localhost`, an IPv4 address or a dotted domain name; a bare word such as
/// `example` fails.
pub fn url() -> StringRule {
    StringRule::with_error(
        |s| URL.is_match(s),
        RuleError::new("validation_is_url", "must be a valid URL"),
    )
}

/// ASCII digits only. Code `validation_is_digit`.
pub fn digit() -> StringRule {
    StringRule::with_error(
        |s| s.chars().all(|c| c.is_ascii_digit()),
        RuleError::new("validation_is_digit", "must contain digits only"),
    )
}

/// ASCII letters only. Code `validation_is_alpha`.
pub fn alpha() -> StringRule {
    StringRule::with_error(
        |s| s.chars().all(|c| c.is_ascii_alphabetic()),
        RuleError::new("validation_is_alpha", "must contain English letters only"),
    )
}

/// ASCII letters and digits only. Code `validation_is_alphanumeric`.
pub fn alphanumeric() -> StringRule {
    StringRule::with_error(
        |s| s.chars().all(|c| c.is_ascii_alphanumeric()),
        RuleError::new(
            "validation_is_alphanumeric",
            "must contain English letters and digits only",
        ),
    )
}

/// A hyphenated UUID. Code `validation_is_uuid`.
pub fn uuid() -> StringRule {
    StringRule::with_error(
        |s| UUID.is_match(s),
        RuleError::new("validation_is_uuid", "must be a valid UUID"),
    )
}
