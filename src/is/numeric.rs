//! Numeric constraints and the integer/float composers.
//!
//! The comparison logic is written once against [`Number`]; each composer
//! passes its own constraint tags (`integer_min` vs `float_min`) so the tag
//! is fixed by the composer type rather than inferred from the value.

use std::fmt::Display;

use crate::composer::{Composer, Validator};
use crate::error::{Arg, ValidationError};

/// An ordered numeric type usable with [`IntComposer`] or [`FloatComposer`].
pub trait Number: Copy + PartialOrd + Display + Send + Sync + 'static {
    /// Converts the value into an error argument.
    fn to_arg(self) -> Arg;
}

/// Marker for integer types, signed or unsigned.
pub trait Integer: Number {}

/// Marker for floating point types.
pub trait Float: Number {}

macro_rules! impl_integer {
    ($variant:ident as $wide:ty: $($t:ty),+) => {
        $(
            impl Number for $t {
                fn to_arg(self) -> Arg {
                    Arg::$variant(self as $wide)
                }
            }

            impl Integer for $t {}
        )+
    };
}

impl_integer!(Int as i64: i8, i16, i32, i64, isize);
impl_integer!(Uint as u64: u8, u16, u32, u64, usize);

impl Number for f64 {
    fn to_arg(self) -> Arg {
        Arg::Float(self)
    }
}

impl Float for f64 {}

impl Number for f32 {
    // Widen through the shortest decimal form so 1.6f32 reports as 1.6.
    fn to_arg(self) -> Arg {
        Arg::Float(self.to_string().parse().unwrap_or(f64::from(self)))
    }
}

impl Float for f32 {}

/// Fails when the value is strictly less than `min`.
pub(crate) fn minimum<T: Number>(constraint: &'static str, min: T) -> Validator<T> {
    let bound = min.to_arg();
    Validator::new(move |&n: &T| {
        if n < min {
            let error = ValidationError::new(
                constraint,
                format!("must be greater than or equal to {}", bound),
            )
            .with_arg("min", bound.clone())
            .with_arg("val", n.to_arg());
            return Err(error.into());
        }
        Ok(())
    })
}

/// Fails when the value is strictly greater than `max`.
pub(crate) fn maximum<T: Number>(constraint: &'static str, max: T) -> Validator<T> {
    let bound = max.to_arg();
    Validator::new(move |&n: &T| {
        if n > max {
            let error =
                ValidationError::new(constraint, format!("must be less than or equal to {}", bound))
                    .with_arg("max", bound.clone())
                    .with_arg("val", n.to_arg());
            return Err(error.into());
        }
        Ok(())
    })
}

/// Fails unless the value equals one of `choices`. An empty set rejects everything.
pub(crate) fn choose<T: Number>(constraint: &'static str, choices: Vec<T>) -> Validator<T> {
    let listed = Arg::List(choices.iter().map(|c| c.to_arg()).collect());
    Validator::new(move |&n: &T| {
        if choices.iter().any(|&choice| choice == n) {
            return Ok(());
        }
        let error = ValidationError::new(constraint, format!("must be one of {}", listed))
            .with_arg("choices", listed.clone())
            .with_arg("val", n.to_arg());
        Err(error.into())
    })
}

/// Builder for integer validators.
///
/// Every method returns a new composer and leaves `self` untouched, so a
/// partial chain can be reused.
///
/// # Example
///
/// ```rust
/// use vetting::is;
///
/// let age = is::int::<u8>().min(18).max(100).compose();
///
/// assert!(age.evaluate(&18).is_ok());
/// let err = age.evaluate(&15).unwrap_err();
/// assert_eq!(err.constraint(), Some("integer_min"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntComposer<T: Integer>(Composer<T>);

impl<T: Integer> IntComposer<T> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self(Composer::identity())
    }

    /// Appends a caller-supplied validator.
    pub fn and(&self, next: Validator<T>) -> Self {
        Self(self.0.and(next))
    }

    /// Requires the value to be greater than or equal to `min`.
    ///
    /// Tag: `integer_min`. Args: `min`, `val`.
    pub fn min(&self, min: T) -> Self {
        self.and(minimum("integer_min", min))
    }

    /// Requires the value to be less than or equal to `max`.
    ///
    /// Tag: `integer_max`. Args: `max`, `val`.
    pub fn max(&self, max: T) -> Self {
        self.and(maximum("integer_max", max))
    }

    /// Requires the value to be one of `choices`.
    ///
    /// Tag: `integer_choose`. Args: `choices`, `val`.
    pub fn choose(&self, choices: impl IntoIterator<Item = T>) -> Self {
        self.and(choose("integer_choose", choices.into_iter().collect()))
    }

    /// Finalizes the chain into a single validator.
    pub fn compose(&self) -> Validator<T> {
        self.0.compose()
    }
}

/// Builder for floating point validators.
///
/// # Example
///
/// ```rust
/// use vetting::is;
///
/// let height = is::float::<f64>().min(1.6).max(3.0).compose();
///
/// assert!(height.evaluate(&1.8).is_ok());
/// let err = height.evaluate(&1.5).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     r#"{"constraint":"float_min","message":"must be greater than or equal to 1.6","args":{"min":1.6,"val":1.5}}"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FloatComposer<T: Float>(Composer<T>);

impl<T: Float> FloatComposer<T> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self(Composer::identity())
    }

    /// Appends a caller-supplied validator.
    pub fn and(&self, next: Validator<T>) -> Self {
        Self(self.0.and(next))
    }

    /// Requires the value to be greater than or equal to `min`. Tag: `float_min`.
    pub fn min(&self, min: T) -> Self {
        self.and(minimum("float_min", min))
    }

    /// Requires the value to be less than or equal to `max`. Tag: `float_max`.
    pub fn max(&self, max: T) -> Self {
        self.and(maximum("float_max", max))
    }

    /// Requires the value to equal one of `choices`. Tag: `float_choose`.
    pub fn choose(&self, choices: impl IntoIterator<Item = T>) -> Self {
        self.and(choose("float_choose", choices.into_iter().collect()))
    }

    /// Finalizes the chain into a single validator.
    pub fn compose(&self) -> Validator<T> {
        self.0.compose()
    }
}
