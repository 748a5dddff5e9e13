//! Integration tests for custom validators in composer chains.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vetting::{compose, is, merge, Composer, InternalError, ValidationError, Validator};

fn even() -> Validator<i64> {
    Validator::new(|n: &i64| {
        if n % 2 == 0 {
            Ok(())
        } else {
            Err(ValidationError::new("integer_even", "must be even")
                .with_arg("val", *n)
                .into())
        }
    })
}

#[test]
fn test_custom_validator_joins_chain() {
    let validator = is::int::<i64>().min(0).and(even()).compose();

    assert!(validator.evaluate(&4).is_ok());
    assert_eq!(validator.evaluate(&3).unwrap_err().constraint(), Some("integer_even"));
    assert_eq!(validator.evaluate(&-2).unwrap_err().constraint(), Some("integer_min"));
}

#[test]
fn test_later_constraints_not_evaluated() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let spy = Validator::new(move |_: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let validator = is::string().not_blank().and(spy).compose();
    assert!(validator.evaluate("").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(validator.evaluate("x").is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_internal_error_surfaces_from_validator() {
    let broken = Validator::new(|_: &f64| Err(InternalError::new("rates", "feed offline").into()));
    let err = is::float::<f64>().and(broken).compose().evaluate(&1.0).unwrap_err();
    assert_eq!(err.as_internal().map(|e| e.key.as_str()), Some("rates"));
}

#[test]
fn test_generic_composer() {
    let chain = compose(&Composer::identity(), even());
    let chain = compose(&chain, Validator::new(|n: &i64| {
        if *n < 100 {
            Ok(())
        } else {
            Err(ValidationError::new("integer_small", "too big").into())
        }
    }));

    assert_eq!(chain.len(), 2);
    let validator = chain.compose();
    assert!(validator.evaluate(&8).is_ok());
    assert_eq!(validator.evaluate(&101).unwrap_err().constraint(), Some("integer_even"));
    assert_eq!(validator.evaluate(&102).unwrap_err().constraint(), Some("integer_small"));
}

#[test]
fn test_merge_empty_accepts() {
    let validator = merge::<str>(Vec::new());
    assert!(validator.evaluate("").is_ok());
}

#[test]
fn test_composed_validators_nest() {
    let inner = is::int::<i64>().min(10).compose();
    let outer = is::int::<i64>().and(inner).and(even()).compose();
    assert_eq!(outer.evaluate(&5).unwrap_err().constraint(), Some("integer_min"));
    assert_eq!(outer.evaluate(&11).unwrap_err().constraint(), Some("integer_even"));
}
