//! String constraints and the string composer.
//!
//! Provides blank checks, a length range and an email-shape check. The email
//! pattern is a practical approximation of the RFC 5322 address grammar; it
//! is compiled once per process and shared by every validator.

use std::sync::LazyLock;

use regex::Regex;

use crate::composer::{Composer, Validator};
use crate::error::ValidationError;

/// Compiled once; the pattern is a constant known to be valid.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern must compile"));

const EMAIL_PATTERN: &str = r#"^(?:(?:(?:(?:[a-zA-Z]|[0-9]|[!#\$%&'\*\+\-/=\?\^_`{\|}~]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])+(?:\.([a-zA-Z]|[0-9]|[!#\$%&'\*\+\-/=\?\^_`{\|}~]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])+)*)|(?:(?:\x22)(?:(?:(?:(?:\x20|\x09)*(?:\x0d\x0a))?(?:\x20|\x09)+)?(?:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x7f]|\x21|[\x23-\x5b]|[\x5d-\x7e]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])|(?:(?:[\x01-\x09\x0b\x0c\x0d-\x7f]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]))))*(?:(?:(?:\x20|\x09)*(?:\x0d\x0a))?(\x20|\x09)+)?(?:\x22))))@(?:(?:(?:[a-zA-Z]|[0-9]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])|(?:(?:[a-zA-Z]|[0-9]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])(?:[a-zA-Z]|[0-9]|-|\.|~|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])*(?:[a-zA-Z]|[0-9]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])))\.)+(?:(?:[a-zA-Z]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])|(?:(?:[a-zA-Z]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])(?:[a-zA-Z]|[0-9]|-|\.|~|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])*(?:[a-zA-Z]|[\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])))\.?$"#;

/// Fails on the empty string.
pub(crate) fn not_blank() -> Validator<str> {
    Validator::new(|s: &str| {
        if s.is_empty() {
            return Err(ValidationError::new("string_not_blank", "must not be blank").into());
        }
        Ok(())
    })
}

/// Fails when the string is empty after trimming surrounding whitespace.
///
/// Trimming only affects this check; later validators see the original value.
pub(crate) fn not_blank_trim() -> Validator<str> {
    let blank = not_blank();
    Validator::new(move |s: &str| blank.evaluate(s.trim()))
}

/// Fails when the length in UTF-8 bytes is outside `min..=max`.
///
/// A bound that is zero or negative disables that side of the range.
pub(crate) fn length(min: i64, max: i64) -> Validator<str> {
    Validator::new(move |s: &str| {
        let len = s.len();
        let message = if min > 0 && (len as u64) < min as u64 {
            format!("must be at least {} characters", min)
        } else if max > 0 && (len as u64) > max as u64 {
            format!("must be at most {} characters", max)
        } else {
            return Ok(());
        };
        let error = ValidationError::new("string_len", message)
            .with_arg("min", min)
            .with_arg("max", max)
            .with_arg("len", len);
        Err(error.into())
    })
}

/// Fails unless the string looks like an email address.
pub(crate) fn email() -> Validator<str> {
    Validator::new(|s: &str| {
        if !EMAIL.is_match(s) {
            return Err(ValidationError::new("string_email", "must be a valid email address").into());
        }
        Ok(())
    })
}

/// Builder for string validators.
///
/// Every method returns a new composer and leaves `self` untouched.
///
/// # Example
///
/// ```rust
/// use vetting::is;
///
/// let username = is::string().not_blank().len(4, 40).compose();
///
/// assert!(username.evaluate("alice").is_ok());
///
/// // The first failing constraint wins; later ones are not evaluated.
/// let err = username.evaluate("").unwrap_err();
/// assert_eq!(err.constraint(), Some("string_not_blank"));
///
/// let err = username.evaluate("bob").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     r#"{"constraint":"string_len","message":"must be at least 4 characters","args":{"len":3,"max":40,"min":4}}"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringComposer(Composer<str>);

impl StringComposer {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self(Composer::identity())
    }

    /// Appends a caller-supplied validator.
    ///
    /// ```rust
    /// use vetting::{is, InternalError, Validator};
    ///
    /// let lookup = Validator::new(|_: &str| Err(InternalError::new("lookup", "timeout").into()));
    /// let validator = is::string().not_blank().and(lookup).compose();
    ///
    /// assert!(validator.evaluate("x").unwrap_err().is_internal());
    /// ```
    pub fn and(&self, next: Validator<str>) -> Self {
        Self(self.0.and(next))
    }

    /// Rejects the empty string. Tag: `string_not_blank`.
    pub fn not_blank(&self) -> Self {
        self.and(not_blank())
    }

    /// Rejects strings that are empty after trimming whitespace.
    ///
    /// Shares the `string_not_blank` tag with [`not_blank`](Self::not_blank).
    pub fn not_blank_trim(&self) -> Self {
        self.and(not_blank_trim())
    }

    /// Requires an email-shaped value. Tag: `string_email`.
    pub fn email(&self) -> Self {
        self.and(email())
    }

    /// Requires the byte length to lie within `min..=max`.
    ///
    /// Length is measured in UTF-8 bytes, so `"é"` counts as 2.
    /// A bound of zero or less is ignored. Tag: `string_len`.
    /// Args: `min`, `max`, `len`.
    pub fn len(&self, min: i64, max: i64) -> Self {
        self.and(length(min, max))
    }

    /// Finalizes the chain into a single validator.
    pub fn compose(&self) -> Validator<str> {
        self.0.compose()
    }
}
