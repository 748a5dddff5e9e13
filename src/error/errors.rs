//! Aggregate and fatal error types.
//!
//! [`Errors`] maps field names (or element indexes) to the error each one
//! produced. [`InternalError`] signals that validation itself broke. [`Error`]
//! is the sum of everything a validator or predicate can return.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::sync::Arc;

use serde_json::{Map, Value};
use stillwater::prelude::*;
use thiserror::Error as ThisError;

use super::ValidationError;
use crate::path::FieldPath;

/// Anything a validator or predicate can fail with.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// The value broke a constraint.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Several keyed failures, e.g. the failing elements of a bound slice.
    #[error(transparent)]
    Nested(#[from] Errors),
    /// Validation could not complete. Aborts a schema pass.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl Error {
    /// Returns true if this is an [`InternalError`].
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal(_))
    }

    /// Returns the constraint tag when this is a single validation failure.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Error::Invalid(e) => Some(&e.constraint),
            _ => None,
        }
    }

    /// Returns the inner [`ValidationError`], if any.
    pub fn as_invalid(&self) -> Option<&ValidationError> {
        match self {
            Error::Invalid(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner [`Errors`] aggregate, if any.
    pub fn as_nested(&self) -> Option<&Errors> {
        match self {
            Error::Nested(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner [`InternalError`], if any.
    pub fn as_internal(&self) -> Option<&InternalError> {
        match self {
            Error::Internal(e) => Some(e),
            _ => None,
        }
    }

    /// Converts the error into its JSON document.
    ///
    /// Internal errors are not part of the structured shape; when one is
    /// trapped inside an aggregate it is rendered as its message string.
    pub fn to_json(&self) -> Value {
        match self {
            Error::Invalid(e) => e.to_json(),
            Error::Nested(e) => e.to_json(),
            Error::Internal(e) => Value::String(e.to_string()),
        }
    }
}

/// A failure of the validation machinery rather than of the data.
///
/// Return this from a custom validator when a dependency it relies on fails.
/// A [`Schema`](crate::Schema) stops at the first `InternalError` it sees and
/// returns it as-is, discarding the failures collected so far.
///
/// # Example
///
/// ```rust
/// use vetting::InternalError;
///
/// let error = InternalError::new("email", "lookup service unavailable");
/// assert_eq!(error.to_string(), "email: lookup service unavailable");
/// ```
#[derive(Debug, Clone, ThisError)]
#[error("{key}: {cause}")]
pub struct InternalError {
    /// Caller-supplied key identifying where the failure happened.
    pub key: String,
    /// The underlying failure.
    #[source]
    pub cause: Arc<dyn std::error::Error + Send + Sync>,
}

impl InternalError {
    /// Creates an internal error from a key and any error (or message).
    pub fn new(
        key: impl Into<String>,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            key: key.into(),
            cause: Arc::from(cause.into()),
        }
    }
}

impl PartialEq for InternalError {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.cause.to_string() == other.cause.to_string()
    }
}

/// A non-empty mapping of keys to errors.
///
/// Keys are field names at the schema level and decimal element indexes
/// (`"0"`, `"1"`, ...) for slice bindings. Values may themselves be nested
/// aggregates. Keys are kept sorted, so the JSON form is stable.
///
/// An `Errors` value always holds at least one entry: construct it with
/// [`Errors::single`] or [`Errors::from_map`], which refuses empty maps.
///
/// # Combining Errors
///
/// `Errors` implements `Semigroup`; combining merges both maps, with entries
/// from the right-hand side replacing equal keys.
///
/// ```rust
/// use vetting::{Errors, ValidationError};
/// use stillwater::prelude::*;
///
/// let name = Errors::single("name", ValidationError::new("string_not_blank", "must not be blank"));
/// let email = Errors::single("email", ValidationError::new("string_email", "must be a valid email address"));
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Errors(BTreeMap<String, Error>);

impl Errors {
    /// Creates an aggregate with one entry.
    pub fn single(key: impl Into<String>, error: impl Into<Error>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key.into(), error.into());
        Self(map)
    }

    /// Creates an aggregate from a map, or `None` if the map is empty.
    pub fn from_map(map: BTreeMap<String, Error>) -> Option<Self> {
        if map.is_empty() {
            None
        } else {
            Some(Self(map))
        }
    }

    /// Returns the number of failing keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: an aggregate is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the error stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Error> {
        self.0.get(key)
    }

    /// Returns true if `key` failed.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the failing keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns an iterator over `(key, error)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.0.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Consumes the aggregate and returns the underlying map.
    pub fn into_map(self) -> BTreeMap<String, Error> {
        self.0
    }

    /// Returns every leaf error together with its path.
    ///
    /// Nested keys that are decimal numbers become index segments, so a
    /// failing slice element reads as `favourite_numbers[3]`.
    ///
    /// ```rust
    /// use vetting::{bind_slice, is, Schema};
    ///
    /// let err = Schema::new()
    ///     .field("tags", bind_slice(vec![1i32, 17], is::int::<i32>().choose([17]).compose()))
    ///     .validate()
    ///     .unwrap_err();
    ///
    /// let leaves = err.as_nested().unwrap().flatten();
    /// assert_eq!(leaves.len(), 1);
    /// assert_eq!(leaves[0].0.to_string(), "tags[0]");
    /// ```
    pub fn flatten(&self) -> Vec<(FieldPath, &Error)> {
        let mut leaves = Vec::new();
        for (key, error) in &self.0 {
            collect_leaves(FieldPath::from_field(key.clone()), error, &mut leaves);
        }
        leaves
    }

    /// Converts the aggregate into its JSON document.
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .0
            .iter()
            .map(|(key, error)| (key.clone(), error.to_json()))
            .collect();
        Value::Object(object)
    }
}

fn collect_leaves<'e>(path: FieldPath, error: &'e Error, out: &mut Vec<(FieldPath, &'e Error)>) {
    match error {
        Error::Nested(nested) => {
            for (key, inner) in &nested.0 {
                let child = match key.parse::<usize>() {
                    Ok(index) => path.push_index(index),
                    Err(_) => path.push_field(key.clone()),
                };
                collect_leaves(child, inner, out);
            }
        }
        leaf => out.push((path, leaf)),
    }
}

impl Semigroup for Errors {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl std::error::Error for Errors {}

impl<'a> IntoIterator for &'a Errors {
    type Item = (&'a String, &'a Error);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Errors {
    type Item = (String, Error);
    type IntoIter = std::collections::btree_map::IntoIter<String, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// Validators and their errors cross thread boundaries in parallel schemas.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Error>();
    assert_sync::<Error>();
};
