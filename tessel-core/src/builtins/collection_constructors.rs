// tessel-core - Collection constructors
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Functions that build containers and array helpers.

use tessel_value::kind::index_key;
use tessel_value::{Error, Result, Value};

use super::{arity, arity_range, require_int};
use crate::builtins::collections::pairs;

/// (vector & items)
pub fn builtin_vector(args: &[Value]) -> Result<Value> {
    Ok(Value::array(args.iter().cloned()))
}

/// (list & items)
pub fn builtin_list(args: &[Value]) -> Result<Value> {
    Ok(Value::list(args.iter().cloned()))
}

/// (object & kvs) - object from alternating keys and values
pub fn builtin_object(args: &[Value]) -> Result<Value> {
    let obj = Value::object::<&str>([]);
    if let Value::Object(cell) = &obj {
        for kv in pairs("object", args)? {
            let key = tessel_value::property_key(&kv[0]).ok_or_else(|| {
                Error::type_error_in("object", "string, number, or boolean key", kv[0].type_name())
            })?;
            cell.borrow_mut().insert(key, kv[1].clone());
        }
    }
    Ok(obj)
}

/// (vec coll) - realize into a new array
pub fn builtin_vec(args: &[Value]) -> Result<Value> {
    arity("vec", args, 1)?;
    Ok(Value::array(args[0].to_vec()?))
}

/// (set coll) - realize into a new set
pub fn builtin_set(args: &[Value]) -> Result<Value> {
    arity("set", args, 1)?;
    Ok(Value::set(args[0].to_vec()?))
}

fn require_array<'a>(context: &'static str, val: &'a Value) -> Result<&'a tessel_value::ArrayCell> {
    match val {
        Value::Array(cell) => Ok(cell),
        other => Err(Error::type_error_in(context, "array", other.type_name())),
    }
}

/// Slice bound: negative counts back from the end, then clamped to `len`.
fn slice_bound(n: i64, len: usize) -> usize {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let n = if n < 0 { n.saturating_add(len_i).max(0) } else { n.min(len_i) };
    usize::try_from(n).unwrap_or(0)
}

/// (subvec arr start) or (subvec arr start end)
///
/// Bounds are clamped to the array and negative bounds count from the end.
/// An end at or before start gives an empty array.
pub fn builtin_subvec(args: &[Value]) -> Result<Value> {
    arity_range("subvec", args, 2, 3)?;
    let cell = require_array("subvec", &args[0])?;
    let len = cell.len();
    let start = slice_bound(require_int("subvec", &args[1])?, len);
    let end = match args.get(2) {
        Some(v) if !v.is_nil() => slice_bound(require_int("subvec", v)?, len),
        _ => len,
    };
    if start >= end {
        return Ok(Value::array([]));
    }
    Ok(Value::Array(cell.borrow().clone().slice(start..end).into()))
}

/// (alength arr)
pub fn builtin_alength(args: &[Value]) -> Result<Value> {
    arity("alength", args, 1)?;
    Ok(Value::from(require_array("alength", &args[0])?.len()))
}

/// (aset arr idx val) - store in place, returning val
pub fn builtin_aset(args: &[Value]) -> Result<Value> {
    arity("aset", args, 3)?;
    let cell = require_array("aset", &args[0])?;
    let index = index_key(&args[1]).ok_or_else(|| {
        Error::type_error_in("aset", "non-negative integer index", args[1].type_name())
    })?;
    if index >= cell.len() {
        return Err(Error::IndexOutOfBounds {
            index: require_int("aset", &args[1])?,
            length: cell.len(),
        });
    }
    cell.borrow_mut().set(index, args[2].clone());
    Ok(args[2].clone())
}

/// (aclone arr) - shallow copy of an array
pub fn builtin_aclone(args: &[Value]) -> Result<Value> {
    arity("aclone", args, 1)?;
    Ok(Value::Array(require_array("aclone", &args[0])?.fork()))
}
