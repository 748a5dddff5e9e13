//! Typed constraint builders.
//!
//! Start a chain with [`string`], [`int`] or [`float`], append constraints
//! with the fluent methods, and finish with `compose()` to get a
//! [`Validator`](crate::Validator).
//!
//! # Example
//!
//! ```rust
//! use vetting::is;
//!
//! let email = is::string().not_blank().email().compose();
//! let age = is::int::<i32>().min(18).max(100).compose();
//! let height = is::float::<f64>().min(1.6).compose();
//!
//! assert!(email.evaluate("bob@mail.com").is_ok());
//! assert!(age.evaluate(&15).is_err());
//! assert!(height.evaluate(&1.6).is_ok());
//! ```

mod numeric;
mod string;

pub use numeric::{Float, FloatComposer, IntComposer, Integer, Number};
pub use string::StringComposer;

/// Starts an empty string chain.
pub fn string() -> StringComposer {
    StringComposer::new()
}

/// Starts an empty integer chain for `T`.
pub fn int<T: Integer>() -> IntComposer<T> {
    IntComposer::new()
}

/// Starts an empty float chain for `T`.
pub fn float<T: Float>() -> FloatComposer<T> {
    FloatComposer::new()
}
