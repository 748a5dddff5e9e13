//! Error types for validation failures.
//!
//! This module provides the structured [`ValidationError`] returned by
//! constraints, the [`Errors`] aggregate built by schemas and slice bindings,
//! the fatal [`InternalError`], and [`Error`], the sum of all three.

mod errors;
mod validation_error;

pub use errors::{Error, Errors, InternalError};
pub use validation_error::{Arg, ValidationError};
