//! Integration tests for schema aggregation.

use vetting::{bind, bind_slice, is, Error, InternalError, Schema, Validator};

fn signup<'a>(name: &'a str, email: &'a str, password: &'a str) -> Schema<'a> {
    Schema::new()
        .field("name", bind(name, is::string().not_blank().len(4, 40).compose()))
        .field("email", bind(email, is::string().not_blank().email().compose()))
        .field("password", bind(password, is::string().not_blank().len(6, 20).compose()))
        .field("age", bind(15i32, is::int::<i32>().min(18).max(100).compose()))
        .field(
            "favourite_numbers",
            bind_slice(vec![1i32, 2, 3, 4, 5], is::int::<i32>().choose([17, 19]).compose()),
        )
        .field("height", bind(1.5f64, is::float::<f64>().min(1.6).max(3.0).compose()))
}

#[test]
fn test_end_to_end_report() {
    let err = signup("bob", "bob@mail", "12345").validate().unwrap_err();

    const EXPECTED: &str = concat!(
        r#"{"age":{"constraint":"integer_min","message":"must be greater than or equal to 18","args":{"min":18,"val":15}},"#,
        r#""email":{"constraint":"string_email","message":"must be a valid email address"},"#,
        r#""favourite_numbers":{"#,
        r#""0":{"constraint":"integer_choose","message":"must be one of [17 19]","args":{"choices":[17,19],"val":1}},"#,
        r#""1":{"constraint":"integer_choose","message":"must be one of [17 19]","args":{"choices":[17,19],"val":2}},"#,
        r#""2":{"constraint":"integer_choose","message":"must be one of [17 19]","args":{"choices":[17,19],"val":3}},"#,
        r#""3":{"constraint":"integer_choose","message":"must be one of [17 19]","args":{"choices":[17,19],"val":4}},"#,
        r#""4":{"constraint":"integer_choose","message":"must be one of [17 19]","args":{"choices":[17,19],"val":5}}},"#,
        r#""height":{"constraint":"float_min","message":"must be greater than or equal to 1.6","args":{"min":1.6,"val":1.5}},"#,
        r#""name":{"constraint":"string_len","message":"must be at least 4 characters","args":{"len":3,"max":40,"min":4}},"#,
        r#""password":{"constraint":"string_len","message":"must be at least 6 characters","args":{"len":5,"max":20,"min":6}}}"#,
    );
    assert_eq!(err.to_string(), EXPECTED);
}

#[test]
fn test_end_to_end_structure() {
    let err = signup("bob", "bob@mail", "12345").validate().unwrap_err();
    let errors = err.as_nested().expect("expected an aggregate");

    let keys: Vec<_> = errors.keys().collect();
    assert_eq!(
        keys,
        vec!["age", "email", "favourite_numbers", "height", "name", "password"]
    );

    let numbers = errors.get("favourite_numbers").and_then(Error::as_nested).unwrap();
    assert_eq!(numbers.len(), 5);

    let tags: Vec<_> = ["age", "email", "height", "name", "password"]
        .iter()
        .map(|key| errors.get(key).and_then(Error::constraint).unwrap())
        .collect();
    assert_eq!(
        tags,
        vec!["integer_min", "string_email", "float_min", "string_len", "string_len"]
    );
}

#[test]
fn test_only_failing_fields_reported() {
    let err = signup("alice", "alice@mail.com", "hunter22").validate().unwrap_err();
    let errors = err.as_nested().unwrap();
    assert_eq!(
        errors.keys().collect::<Vec<_>>(),
        vec!["age", "favourite_numbers", "height"]
    );
}

#[test]
fn test_all_fields_pass() {
    let result = Schema::new()
        .field("name", bind("alice", is::string().len(4, 40).compose()))
        .field("tags", bind_slice(["a", "b"], is::string().not_blank().compose()))
        .validate();
    assert!(result.is_ok());
}

#[test]
fn test_internal_error_replaces_report() {
    let lookup = Validator::new(|_: &str| Err(InternalError::new("email", "dns timeout").into()));

    let err = signup("bob", "bob@mail", "12345")
        .field("email", bind("bob@mail.com", is::string().and(lookup).compose()))
        .validate()
        .unwrap_err();

    match err {
        Error::Internal(internal) => {
            assert_eq!(internal, InternalError::new("email", "dns timeout"));
            assert_eq!(internal.to_string(), "email: dns timeout");
        }
        other => panic!("expected internal error, got {other:?}"),
    }
}

#[test]
fn test_flatten_report() {
    let err = signup("bob", "bob@mail", "12345").validate().unwrap_err();
    let leaves = err.as_nested().unwrap().flatten();

    let paths: Vec<String> = leaves.iter().map(|(path, _)| path.to_string()).collect();
    assert_eq!(paths.len(), 10);
    assert!(paths.contains(&"favourite_numbers[4]".to_string()));
    assert!(paths.contains(&"password".to_string()));
}

#[test]
fn test_borrowed_record_fields() {
    struct Signup {
        name: String,
        scores: Vec<u32>,
    }

    let record = Signup {
        name: String::new(),
        scores: vec![3, 300],
    };

    let err = Schema::new()
        .field("name", bind(record.name.as_str(), is::string().not_blank().compose()))
        .field("scores", bind_slice(&record.scores, is::int::<u32>().max(100).compose()))
        .validate()
        .unwrap_err();

    let errors = err.as_nested().unwrap();
    assert_eq!(errors.len(), 2);
    let scores = errors.get("scores").and_then(Error::as_nested).unwrap();
    assert_eq!(scores.keys().collect::<Vec<_>>(), vec!["1"]);
}
