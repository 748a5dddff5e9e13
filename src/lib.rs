//! # Vetting
//!
//! Composable, typed validators for primitive values, and field-keyed schemas
//! that validate a whole record and report every failing field at once.
//!
//! ## Overview
//!
//! A validator is built by chaining small named constraints on a typed
//! composer and finalizing the chain with `compose()`. Within one validator
//! the first failing constraint wins. A [`Schema`] then binds validators to
//! values and collects the failure of every field into an [`Errors`]
//! aggregate keyed by field name.
//!
//! Every built-in failure is a [`ValidationError`] carrying a stable
//! constraint tag (e.g. `string_len`, `integer_min`), a default message, and
//! the arguments involved, so callers can map tags to their own messages.
//! An [`InternalError`] marks a failure of the validation machinery itself
//! and aborts a schema pass.
//!
//! ## Core Types
//!
//! - [`Validator`]: a finalized check over one value
//! - [`Composer`]: a persistent, not yet finalized chain of validators
//! - [`is`]: typed builders ([`is::string`], [`is::int`], [`is::float`])
//! - [`Schema`]: field name to [`Predicate`] mapping, built with [`bind`] and [`bind_slice`]
//! - [`Error`]: [`ValidationError`], [`Errors`] or [`InternalError`]
//!
//! ## Example
//!
//! ```rust
//! use vetting::{bind, bind_slice, is, Schema};
//!
//! let err = Schema::new()
//!     .field("name", bind("bob", is::string().not_blank().len(4, 40).compose()))
//!     .field("email", bind("bob@mail", is::string().not_blank().email().compose()))
//!     .field("age", bind(15i32, is::int::<i32>().min(18).max(100).compose()))
//!     .field("scores", bind_slice(vec![1i32, 17], is::int::<i32>().choose([17, 19]).compose()))
//!     .field("height", bind(1.5f64, is::float::<f64>().min(1.6).max(3.0).compose()))
//!     .validate()
//!     .unwrap_err();
//!
//! let errors = err.as_nested().unwrap();
//! assert_eq!(errors.len(), 5);
//! assert_eq!(errors.get("age").and_then(|e| e.constraint()), Some("integer_min"));
//! ```

pub mod composer;
pub mod error;
pub mod is;
pub mod path;
pub mod schema;

pub use composer::{compose, merge, Composer, Validator};
pub use error::{Arg, Error, Errors, InternalError, ValidationError};
pub use path::{FieldPath, PathSegment};
pub use schema::{bind, bind_slice, Predicate, Schema};

/// Accumulated outcome of a schema pass.
pub type ValidationResult<T> = stillwater::Validation<T, Errors>;
