//! The validator/composer core.
//!
//! A [`Validator`] tests one value and returns the first error it finds. A
//! [`Composer`] is a persistent chain of validators that has not been
//! finalized yet: every link is an independent value, so a partial chain can
//! be shared and extended in several directions. [`Composer::compose`] folds
//! the chain into one validator that runs the links in call order and stops
//! at the first failure.
//!
//! # Example
//!
//! ```rust
//! use vetting::{Composer, Validator, ValidationError};
//!
//! let even = Validator::new(|n: &i64| {
//!     if n % 2 == 0 {
//!         Ok(())
//!     } else {
//!         Err(ValidationError::new("even", "must be even").into())
//!     }
//! });
//!
//! let validator = Composer::identity().and(even).compose();
//! assert!(validator.evaluate(&4).is_ok());
//! assert!(validator.evaluate(&3).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::Error;

type CheckFn<T> = dyn Fn(&T) -> Result<(), Error> + Send + Sync;

/// A reusable check over values of type `T`.
///
/// Cloning is cheap; clones share the same underlying function.
pub struct Validator<T: ?Sized> {
    check: Arc<CheckFn<T>>,
}

impl<T: ?Sized> Validator<T> {
    /// Wraps a function as a validator.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> Result<(), Error> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Applies the validator to a value.
    pub fn evaluate(&self, value: &T) -> Result<(), Error> {
        (self.check)(value)
    }
}

impl<T: ?Sized + 'static> Validator<T> {
    /// A validator that accepts everything. Terminates every chain.
    pub fn nop() -> Self {
        Self::new(|_| Ok(()))
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// Runs `validators` in order against a value and returns the first error.
///
/// Validators after the first failure are never evaluated.
pub fn merge<T: ?Sized + 'static>(validators: Vec<Validator<T>>) -> Validator<T> {
    Validator::new(move |value: &T| {
        for validator in &validators {
            validator.evaluate(value)?;
        }
        Ok(())
    })
}

/// Extends `composer` with one more validator.
///
/// Equivalent to [`Composer::and`].
pub fn compose<T: ?Sized>(composer: &Composer<T>, next: Validator<T>) -> Composer<T> {
    composer.and(next)
}

struct Link<T: ?Sized> {
    prev: Option<Arc<Link<T>>>,
    validator: Validator<T>,
}

/// An immutable, extensible chain of validators.
///
/// Extending a composer never changes it; it returns a new composer that
/// shares the existing links.
pub struct Composer<T: ?Sized> {
    head: Option<Arc<Link<T>>>,
    len: usize,
}

impl<T: ?Sized> Composer<T> {
    /// The empty chain. Composing it yields a validator that always passes.
    pub fn identity() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns a new chain that also runs `next` after the existing links.
    pub fn and(&self, next: Validator<T>) -> Self {
        Self {
            head: Some(Arc::new(Link {
                prev: self.head.clone(),
                validator: next,
            })),
            len: self.len + 1,
        }
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the identity chain.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the chained validators in call order.
    fn validators(&self) -> Vec<Validator<T>> {
        let mut validators = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(link) = cursor {
            validators.push(link.validator.clone());
            cursor = link.prev.as_deref();
        }
        validators.reverse();
        validators
    }
}

impl<T: ?Sized + 'static> Composer<T> {
    /// Finalizes the chain with `terminal` as its innermost validator.
    ///
    /// The terminal runs first, then every chained validator in call order.
    pub fn apply(&self, terminal: Validator<T>) -> Validator<T> {
        let mut validators = Vec::with_capacity(self.len + 1);
        validators.push(terminal);
        validators.extend(self.validators());
        merge(validators)
    }

    /// Finalizes the chain into a single validator.
    pub fn compose(&self) -> Validator<T> {
        self.apply(Validator::nop())
    }
}

impl<T: ?Sized> Clone for Composer<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T: ?Sized> Default for Composer<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: ?Sized> fmt::Debug for Composer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer").field("len", &self.len).finish()
    }
}
