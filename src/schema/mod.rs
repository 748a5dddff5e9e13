//! Field-keyed schema validation.
//!
//! A [`Schema`] maps field names to [`Predicate`]s, runs all of them and
//! reports every failing field at once. Ordinary failures are collected into
//! an [`Errors`] aggregate; an [`InternalError`] aborts the pass immediately.
//!
//! # Example
//!
//! ```rust
//! use vetting::{bind, bind_slice, is, Schema};
//!
//! let result = Schema::new()
//!     .field("name", bind("bob", is::string().not_blank().len(4, 40).compose()))
//!     .field("age", bind(21i32, is::int::<i32>().min(18).compose()))
//!     .field("lucky", bind_slice(vec![7i32, 8], is::int::<i32>().choose([7]).compose()))
//!     .validate();
//!
//! let err = result.unwrap_err();
//! let errors = err.as_nested().unwrap();
//! assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["lucky", "name"]);
//! ```

mod bind;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{Error, Errors, InternalError};
use crate::ValidationResult;

pub use bind::{bind, bind_slice, Predicate};

/// A named collection of independent predicates.
///
/// Fields run in insertion order. A schema is built for one validation pass
/// and consumed by it.
#[derive(Default)]
pub struct Schema<'a> {
    fields: IndexMap<String, Predicate<'a>>,
}

impl<'a> Schema<'a> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Adds a field and returns self for chaining.
    ///
    /// Adding a name twice replaces the earlier predicate but keeps its
    /// position.
    pub fn field<P>(mut self, name: impl Into<String>, predicate: P) -> Self
    where
        P: FnOnce() -> Result<(), Error> + Send + 'a,
    {
        self.insert(name, predicate);
        self
    }

    /// Adds a field in place.
    pub fn insert<P>(&mut self, name: impl Into<String>, predicate: P)
    where
        P: FnOnce() -> Result<(), Error> + Send + 'a,
    {
        self.fields.insert(name.into(), Box::new(predicate));
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field has been added.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Runs every predicate and accumulates the failures.
    ///
    /// The outer `Result` carries the fatal channel: the first
    /// [`InternalError`] in field order is returned as-is and the remaining
    /// fields are not evaluated. Otherwise the inner [`Validation`] holds
    /// either success or the non-empty [`Errors`] keyed by field name.
    pub fn accumulate(self) -> Result<ValidationResult<()>, InternalError> {
        tracing::trace!(fields = self.fields.len(), "validating schema");
        let outcomes = self
            .fields
            .into_iter()
            .map(|(field, predicate)| (field, predicate()));
        tally(outcomes)
    }

    /// Runs every predicate and returns the aggregate error, if any.
    ///
    /// Returns `Err(Error::Nested(_))` when one or more fields failed and
    /// `Err(Error::Internal(_))` when validation itself broke.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vetting::{bind, is, Error, InternalError, Schema, Validator};
    ///
    /// let unavailable = Validator::new(|_: &str| Err(InternalError::new("email", "dns down").into()));
    ///
    /// let err = Schema::new()
    ///     .field("name", bind("", is::string().not_blank().compose()))
    ///     .field("email", bind("bob@mail.com", is::string().and(unavailable).compose()))
    ///     .validate()
    ///     .unwrap_err();
    ///
    /// assert!(matches!(err, Error::Internal(ref e) if e.key == "email"));
    /// ```
    pub fn validate(self) -> Result<(), Error> {
        self.accumulate()?.into_result().map_err(Error::Nested)
    }

    /// Runs every predicate on the rayon thread pool.
    ///
    /// Results are tallied in field order, so the earliest-inserted field's
    /// [`InternalError`] wins. Unlike [`validate`](Self::validate), fields
    /// after a fatal error are still evaluated.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel(self) -> Result<(), Error> {
        use rayon::prelude::*;

        tracing::trace!(fields = self.fields.len(), "validating schema in parallel");
        let outcomes: Vec<(String, Result<(), Error>)> = self
            .fields
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|(field, predicate)| (field, predicate()))
            .collect();

        tally(outcomes)?.into_result().map_err(Error::Nested)
    }
}

impl<'a, K, P> FromIterator<(K, P)> for Schema<'a>
where
    K: Into<String>,
    P: FnOnce() -> Result<(), Error> + Send + 'a,
{
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, predicate) in iter {
            schema.insert(name, predicate);
        }
        schema
    }
}

/// Folds per-field outcomes, stopping at the first internal error.
fn tally<I>(outcomes: I) -> Result<ValidationResult<()>, InternalError>
where
    I: IntoIterator<Item = (String, Result<(), Error>)>,
{
    let mut failures = BTreeMap::new();
    for (field, outcome) in outcomes {
        match outcome {
            Ok(()) => {}
            Err(Error::Internal(err)) => {
                tracing::warn!(field = %field, key = %err.key, "internal error aborted schema validation");
                return Err(err);
            }
            Err(err) => {
                failures.insert(field, err);
            }
        }
    }

    match Errors::from_map(failures) {
        Some(errors) => {
            tracing::debug!(failed = errors.len(), "schema validation failed");
            Ok(Validation::Failure(errors))
        }
        None => Ok(Validation::Success(())),
    }
}
