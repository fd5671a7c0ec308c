// tessel-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Calling function values.

use tessel_value::{Error, NativeFn, Result, Value};

/// Apply a function value to arguments.
///
/// Only `Value::Fn` is callable; anything else is a `NotCallable` error.
pub fn apply(func: &Value, args: &[Value]) -> Result<Value> {
    match func {
        Value::Fn(f) => f.call(args),
        other => Err(Error::NotCallable(other.to_string())),
    }
}

/// Create a native function value from a Rust closure.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[Value]) -> Result<Value> + 'static,
) -> Value {
    Value::Fn(NativeFn::new(name, func))
}

/// Extract a callable from `val` for storage (watches, comparators).
pub(crate) fn require_fn(context: &'static str, val: &Value) -> Result<NativeFn> {
    match val {
        Value::Fn(f) => Ok(f.clone()),
        other => Err(Error::type_error_in(context, "fn", other.type_name())),
    }
}
