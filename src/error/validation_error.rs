//! Structured validation failures.
//!
//! This module provides [`ValidationError`], the value every built-in
//! constraint returns when it rejects a value, and [`Arg`], the closed set of
//! argument kinds an error can carry.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde_json::{Map, Number, Value};

/// 2^53, the bound below which every whole `f64` is an exact integer.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// An argument attached to a [`ValidationError`].
///
/// Arguments carry the concrete bounds, choices and offending values involved
/// in a failure so callers can render their own messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A list of arguments (e.g. the choices of `choose`).
    List(Vec<Arg>),
}

impl Arg {
    /// Converts the argument into its JSON representation.
    ///
    /// Whole floats below 2^53 serialize without a fraction (`3`, not `3.0`).
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Arg::Int(n) => Value::from(*n),
            Arg::Uint(n) => Value::from(*n),
            Arg::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => Value::from(*f as i64),
            Arg::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Arg::Str(s) => Value::String(s.clone()),
            Arg::List(items) => Value::Array(items.iter().map(Arg::to_json).collect()),
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Uint(n) => write!(f, "{}", n),
            Arg::Float(x) => fmt_float(*x, f),
            Arg::Str(s) => write!(f, "{}", s),
            Arg::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Writes a float in shortest form, switching to exponent notation
/// (`1e+06`, `1.5e-05`) when the decimal exponent is below -4 or at least 6.
fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" });
    }
    if x == 0.0 || x.is_nan() {
        return write!(f, "{}", x);
    }
    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => return write!(f, "{}", x),
    };
    if (-4..6).contains(&exponent) {
        return write!(f, "{}", x);
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<u64> for Arg {
    fn from(n: u64) -> Self {
        Arg::Uint(n)
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        Arg::Uint(n as u64)
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Float(f)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl<A: Into<Arg>> From<Vec<A>> for Arg {
    fn from(items: Vec<A>) -> Self {
        Arg::List(items.into_iter().map(Into::into).collect())
    }
}

/// A single constraint violation.
///
/// `ValidationError` captures:
/// - **constraint**: a stable, machine-readable tag naming the rule that failed
///   (e.g. `string_len`, `integer_min`), suitable as a translation key
/// - **message**: a default human-readable message
/// - **args**: the parameters of the rule and the offending value (`val`)
///
/// Its string form is the JSON document
/// `{"constraint": ..., "message": ..., "args": {...}}`, with `args` omitted
/// when there are none.
///
/// # Example
///
/// ```rust
/// use vetting::{Arg, ValidationError};
///
/// let error = ValidationError::new("integer_min", "must be greater than or equal to 18")
///     .with_arg("min", 18i64)
///     .with_arg("val", 15i64);
///
/// assert_eq!(error.arg("val"), Some(&Arg::Int(15)));
/// assert_eq!(
///     error.to_string(),
///     r#"{"constraint":"integer_min","message":"must be greater than or equal to 18","args":{"min":18,"val":15}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Machine-readable tag of the failed constraint.
    pub constraint: String,
    /// Human-readable default message.
    pub message: String,
    /// Rule parameters and the offending value, keyed by name.
    pub args: BTreeMap<String, Arg>,
}

impl ValidationError {
    /// Creates an error without arguments.
    pub fn new(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            constraint: constraint.into(),
            message: message.into(),
            args: BTreeMap::new(),
        }
    }

    /// Adds an argument and returns self for chaining.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Returns the argument stored under `key`.
    pub fn arg(&self, key: &str) -> Option<&Arg> {
        self.args.get(key)
    }

    /// Converts the error into its JSON document.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("constraint".to_string(), Value::String(self.constraint.clone()));
        object.insert("message".to_string(), Value::String(self.message.clone()));
        if !self.args.is_empty() {
            let args = self
                .args
                .iter()
                .map(|(key, arg)| (key.clone(), arg.to_json()))
                .collect();
            object.insert("args".to_string(), Value::Object(args));
        }
        Value::Object(object)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};
