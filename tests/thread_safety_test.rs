//! Tests for sharing validators and errors across threads.

use std::sync::Arc;
use std::thread;

use vetting::{bind, is, Schema, Validator};

#[test]
fn test_concurrent_evaluation() {
    let validator = is::string().not_blank().email().compose();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = validator.clone();
            thread::spawn(move || {
                let address = format!("user{}@mail.com", i);
                assert!(validator.evaluate(&address).is_ok());
                assert!(validator.evaluate("user").is_err());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_schemas_share_validators() {
    let age: Arc<Validator<i32>> = Arc::new(is::int::<i32>().min(18).compose());

    let handles: Vec<_> = (0..10i32)
        .map(|i| {
            let age = Arc::clone(&age);
            thread::spawn(move || {
                Schema::new()
                    .field("age", bind(10 + i, (*age).clone()))
                    .validate()
                    .is_ok()
            })
        })
        .collect();

    let passed = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    // Ages 18..=19 pass.
    assert_eq!(passed, 2);
}

#[test]
fn test_errors_cross_threads() {
    let handle = thread::spawn(|| {
        Schema::new()
            .field("name", bind("", is::string().not_blank().compose()))
            .validate()
    });

    let err = handle.join().unwrap().unwrap_err();
    assert!(err.as_nested().unwrap().contains_key("name"));
}
