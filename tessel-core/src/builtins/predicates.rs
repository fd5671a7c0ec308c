// tessel-core - Predicate built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type predicates: nil?, some?, boolean?, number?, int?, string?, fn?,
//! coll?, vector?, array?, list?, map?, object?, set?, seqable?, counted?,
//! NaN?. Value predicates: true?, false?, identical?. Logic: not, boolean.

use tessel_value::{Kind, Result, Value};

use super::arity;

fn test_one(name: &'static str, args: &[Value], test: fn(&Value) -> bool) -> Result<Value> {
    arity(name, args, 1)?;
    Ok(Value::Bool(test(&args[0])))
}

// ============================================================================
// Type predicates
// ============================================================================

/// (nil? x)
pub fn builtin_nil_p(args: &[Value]) -> Result<Value> {
    test_one("nil?", args, Value::is_nil)
}

/// (some? x) - true for anything but nil
pub fn builtin_some_p(args: &[Value]) -> Result<Value> {
    test_one("some?", args, |v| !v.is_nil())
}

/// (boolean? x)
pub fn builtin_boolean_p(args: &[Value]) -> Result<Value> {
    test_one("boolean?", args, |v| matches!(v, Value::Bool(_)))
}

/// (number? x)
pub fn builtin_number_p(args: &[Value]) -> Result<Value> {
    test_one("number?", args, Value::is_number)
}

/// (int? x) - integers, including floats with no fractional part
pub fn builtin_int_p(args: &[Value]) -> Result<Value> {
    test_one("int?", args, |v| v.is_number() && v.as_int().is_some())
}

/// (string? x)
pub fn builtin_string_p(args: &[Value]) -> Result<Value> {
    test_one("string?", args, |v| matches!(v, Value::String(_)))
}

/// (fn? x)
pub fn builtin_fn_p(args: &[Value]) -> Result<Value> {
    test_one("fn?", args, |v| matches!(v, Value::Fn(_)))
}

/// (coll? x) - any container kind
pub fn builtin_coll_p(args: &[Value]) -> Result<Value> {
    test_one("coll?", args, |v| v.kind().is_some())
}

/// (vector? x) and (array? x)
pub fn builtin_array_p(args: &[Value]) -> Result<Value> {
    test_one("array?", args, |v| v.kind() == Some(Kind::Array))
}

/// (list? x)
pub fn builtin_list_p(args: &[Value]) -> Result<Value> {
    test_one("list?", args, |v| v.kind() == Some(Kind::List))
}

/// (map? x)
pub fn builtin_map_p(args: &[Value]) -> Result<Value> {
    test_one("map?", args, |v| v.kind() == Some(Kind::Map))
}

/// (object? x)
pub fn builtin_object_p(args: &[Value]) -> Result<Value> {
    test_one("object?", args, |v| v.kind() == Some(Kind::Object))
}

/// (set? x)
pub fn builtin_set_p(args: &[Value]) -> Result<Value> {
    test_one("set?", args, |v| v.kind() == Some(Kind::Set))
}

/// (seqable? x)
pub fn builtin_seqable_p(args: &[Value]) -> Result<Value> {
    test_one("seqable?", args, Value::is_seqable)
}

/// (counted? x) - containers that know their size without walking
pub fn builtin_counted_p(args: &[Value]) -> Result<Value> {
    test_one("counted?", args, |v| {
        v.as_container().is_some_and(|c| c.size().is_some())
    })
}

/// (NaN? x)
pub fn builtin_nan_p(args: &[Value]) -> Result<Value> {
    test_one("NaN?", args, |v| matches!(v, Value::Float(f) if f.is_nan()))
}

// ============================================================================
// Value predicates and logic
// ============================================================================

/// (true? x)
pub fn builtin_true_p(args: &[Value]) -> Result<Value> {
    test_one("true?", args, |v| matches!(v, Value::Bool(true)))
}

/// (false? x)
pub fn builtin_false_p(args: &[Value]) -> Result<Value> {
    test_one("false?", args, |v| matches!(v, Value::Bool(false)))
}

/// (identical? a b) - same cell for containers, same value for scalars
pub fn builtin_identical_p(args: &[Value]) -> Result<Value> {
    arity("identical?", args, 2)?;
    Ok(Value::Bool(args[0].identical(&args[1])))
}

/// (not x)
pub fn builtin_not(args: &[Value]) -> Result<Value> {
    test_one("not", args, |v| !v.is_truthy())
}

/// (boolean x) - truthiness as a boolean
pub fn builtin_boolean(args: &[Value]) -> Result<Value> {
    test_one("boolean", args, Value::is_truthy)
}
