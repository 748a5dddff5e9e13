//! Predicates: validators bound to concrete values.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use crate::composer::Validator;
use crate::error::{Error, Errors};

/// A zero-argument check, ready to run inside a [`Schema`](super::Schema).
pub type Predicate<'a> = Box<dyn FnOnce() -> Result<(), Error> + Send + 'a>;

/// Binds one value to a validator.
///
/// # Example
///
/// ```rust
/// use vetting::{bind, is};
///
/// let predicate = bind("bob", is::string().len(4, 40).compose());
/// assert_eq!(predicate().unwrap_err().constraint(), Some("string_len"));
/// ```
pub fn bind<'a, T, V>(value: V, validator: Validator<T>) -> Predicate<'a>
where
    T: ?Sized + 'static,
    V: Borrow<T> + Send + 'a,
{
    Box::new(move || validator.evaluate(value.borrow()))
}

/// Binds every element of a sequence to a validator.
///
/// Each failing element is reported under its decimal index (`"0"`, `"1"`,
/// ...) in a nested [`Errors`]. An [`InternalError`](crate::InternalError)
/// from one element is recorded like any other element failure; it only
/// aborts a pass when it reaches the schema directly.
///
/// # Example
///
/// ```rust
/// use vetting::{bind_slice, is};
///
/// let predicate = bind_slice(vec![17i32, 4, 19], is::int::<i32>().choose([17, 19]).compose());
/// let err = predicate().unwrap_err();
///
/// let nested = err.as_nested().unwrap();
/// assert_eq!(nested.keys().collect::<Vec<_>>(), vec!["1"]);
/// ```
pub fn bind_slice<'a, T, V, I>(values: I, validator: Validator<T>) -> Predicate<'a>
where
    T: ?Sized + 'static,
    I: IntoIterator<Item = V>,
    V: Borrow<T> + Send + 'a,
{
    let values: Vec<V> = values.into_iter().collect();
    Box::new(move || {
        let failures: BTreeMap<String, Error> = values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                validator
                    .evaluate(value.borrow())
                    .err()
                    .map(|err| (index.to_string(), err))
            })
            .collect();

        match Errors::from_map(failures) {
            Some(errors) => Err(Error::Nested(errors)),
            None => Ok(()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InternalError, ValidationError};
    use crate::is;

    #[test]
    fn test_bind_passes_value() {
        assert!(bind(20i32, is::int::<i32>().min(18).compose())().is_ok());
        assert!(bind(String::from("bob@mail.com"), is::string().email().compose())().is_ok());
    }

    #[test]
    fn test_bind_slice_empty_sequence_passes() {
        let predicate = bind_slice(Vec::<i32>::new(), is::int::<i32>().choose([]).compose());
        assert!(predicate().is_ok());
    }

    #[test]
    fn test_bind_slice_reports_every_failing_index() {
        let predicate = bind_slice(vec![1i32, 2, 3], is::int::<i32>().choose([9]).compose());
        let err = predicate().unwrap_err();
        let nested = err.as_nested().unwrap();

        assert_eq!(nested.len(), 3);
        for (key, val) in [("0", 1i64), ("1", 2), ("2", 3)] {
            let error = nested.get(key).and_then(Error::as_invalid).unwrap();
            assert_eq!(error.constraint, "integer_choose");
            assert_eq!(error.arg("val"), Some(&crate::Arg::Int(val)));
        }
    }

    #[test]
    fn test_bind_slice_borrows_elements() {
        let names = ["alice", ""];
        let predicate = bind_slice(names, is::string().not_blank().compose());
        let err = predicate().unwrap_err();
        assert!(err.as_nested().unwrap().contains_key("1"));
    }

    #[test]
    fn test_bind_slice_traps_internal_errors() {
        let flaky = Validator::new(|n: &i32| {
            if *n == 2 {
                Err(InternalError::new("lookup", "unavailable").into())
            } else {
                Err(ValidationError::new("custom", "rejected").into())
            }
        });
        let err = bind_slice(vec![1i32, 2], flaky)().unwrap_err();

        let nested = err.as_nested().unwrap();
        assert_eq!(nested.get("0").and_then(Error::constraint), Some("custom"));
        assert!(nested.get("1").unwrap().is_internal());
    }
}
