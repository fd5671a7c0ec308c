// tessel-core - Collection operations
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Polymorphic collection functions: get, assoc, conj, dissoc, disj,
//! contains?, empty, into, count.
//!
//! The plain names return a new container and leave their input untouched;
//! the `!` variants mutate the container in place and return it.

use std::slice::ChunksExact;

use tessel_value::kind::index_key;
use tessel_value::lazy::from_values;
use tessel_value::{Container, Error, Kind, LazySeq, Result, Value};

use super::{arity, arity_at_least, arity_range, inherit};

/// Kinds accepted by `assoc` and `assoc!`.
pub(crate) const ASSOCIATIVE: &[Kind] = &[Kind::Map, Kind::Array, Kind::Object];
pub(crate) const ASSOCIATIVE_NAMES: &str = "map, array, or object";

const CONJ_NAMES: &str = "set, array, list, map, or object";
const KEYED: &[Kind] = &[Kind::Map, Kind::Object];
const KEYED_NAMES: &str = "map or object";

/// Container behind `val` when its kind is one of `allowed`.
pub(crate) fn container_of<'a>(
    op: &'static str,
    val: &'a Value,
    expected: &'static str,
    allowed: &[Kind],
) -> Result<&'a dyn Container> {
    match val.as_container() {
        Some(c) if allowed.contains(&c.kind()) => Ok(c),
        _ => Err(Error::type_error_in(op, expected, val.type_name())),
    }
}

/// Split trailing arguments into key/value pairs.
pub(crate) fn pairs<'a>(op: &'static str, kvs: &'a [Value]) -> Result<ChunksExact<'a, Value>> {
    if kvs.len() % 2 != 0 {
        return Err(Error::illegal(
            op,
            "expects an even number of key/value arguments",
        ));
    }
    Ok(kvs.chunks_exact(2))
}

/// Lookup without defaulting; a stored nil counts as missing.
pub(crate) fn lookup(coll: &Value, key: &Value) -> Option<Value> {
    let found = match coll {
        Value::String(s) => index_key(key)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::string(c.to_string())),
        other => other.as_container().and_then(|c| c.lookup(key)),
    };
    found.filter(|v| !v.is_nil())
}

/// Copy of `coll` for copy-on-write `assoc`; nil starts a new object.
pub(crate) fn assoc_target(op: &'static str, coll: &Value) -> Result<Value> {
    match coll {
        Value::Nil => Ok(Kind::Object.empty()),
        other => container_of(op, other, ASSOCIATIVE_NAMES, ASSOCIATIVE)?.shallow_copy(),
    }
}

/// Store `val` under `key` in a container value.
pub(crate) fn store(op: &'static str, coll: &Value, key: Value, val: Value) -> Result<()> {
    container_of(op, coll, ASSOCIATIVE_NAMES, ASSOCIATIVE)?.store(key, val)
}

/// `conj!` each item into a container value.
pub(crate) fn absorb_all(op: &'static str, coll: &Value, items: &[Value]) -> Result<()> {
    let target = container_of(
        op,
        coll,
        CONJ_NAMES,
        &[Kind::Set, Kind::Array, Kind::List, Kind::Map, Kind::Object],
    )?;
    for item in items {
        target.absorb(item.clone())?;
    }
    Ok(())
}

// ============================================================================
// get / assoc
// ============================================================================

/// (get coll key) or (get coll key default)
pub fn builtin_get(args: &[Value]) -> Result<Value> {
    arity_range("get", args, 2, 3)?;
    let default = args.get(2).cloned().unwrap_or(Value::Nil);
    Ok(lookup(&args[0], &args[1]).unwrap_or(default))
}

/// (assoc coll k v & kvs) - copy with keys set
pub fn builtin_assoc(args: &[Value]) -> Result<Value> {
    arity_at_least("assoc", args, 3)?;
    let target = assoc_target("assoc", &args[0])?;
    for kv in pairs("assoc", &args[1..])? {
        store("assoc", &target, kv[0].clone(), kv[1].clone())?;
    }
    Ok(target)
}

/// (assoc! coll k v & kvs) - set keys in place
pub fn builtin_assoc_bang(args: &[Value]) -> Result<Value> {
    arity_at_least("assoc!", args, 3)?;
    let target = container_of("assoc!", &args[0], ASSOCIATIVE_NAMES, ASSOCIATIVE)?;
    for kv in pairs("assoc!", &args[1..])? {
        target.store(kv[0].clone(), kv[1].clone())?;
    }
    Ok(args[0].clone())
}

// ============================================================================
// conj
// ============================================================================

/// (conj) (conj coll & xs) - copy with items added
pub fn builtin_conj(args: &[Value]) -> Result<Value> {
    let Some((coll, items)) = args.split_first() else {
        return Ok(Kind::Array.empty());
    };
    match coll {
        Value::Nil => {
            let target = Kind::Array.empty();
            absorb_all("conj", &target, items)?;
            Ok(target)
        }
        Value::Lazy(_) | Value::Cons(_) => {
            let items = items.to_vec();
            let source = coll.clone();
            Ok(Value::Lazy(LazySeq::with_options(
                inherit(std::slice::from_ref(coll)),
                move || Box::new(from_values(items.clone()).chain(source.seq_iter())),
            )))
        }
        other => {
            let target = container_of(
                "conj",
                other,
                CONJ_NAMES,
                &[Kind::Set, Kind::Array, Kind::List, Kind::Map, Kind::Object],
            )?
            .shallow_copy()?;
            absorb_all("conj", &target, items)?;
            Ok(target)
        }
    }
}

/// (conj! coll & xs) - add items in place
pub fn builtin_conj_bang(args: &[Value]) -> Result<Value> {
    arity_at_least("conj!", args, 1)?;
    absorb_all("conj!", &args[0], &args[1..])?;
    Ok(args[0].clone())
}

// ============================================================================
// dissoc / disj
// ============================================================================

/// (dissoc m & ks) - copy without keys; nil becomes an empty object
pub fn builtin_dissoc(args: &[Value]) -> Result<Value> {
    arity_at_least("dissoc", args, 1)?;
    let target = match &args[0] {
        Value::Nil => return Ok(Kind::Object.empty()),
        other => container_of("dissoc", other, KEYED_NAMES, KEYED)?.shallow_copy()?,
    };
    remove_keys("dissoc", &target, &args[1..])?;
    Ok(target)
}

/// (dissoc! m & ks) - remove keys in place
pub fn builtin_dissoc_bang(args: &[Value]) -> Result<Value> {
    arity_at_least("dissoc!", args, 1)?;
    remove_keys("dissoc!", &args[0], &args[1..])?;
    Ok(args[0].clone())
}

fn remove_keys(op: &'static str, coll: &Value, keys: &[Value]) -> Result<()> {
    let target = container_of(op, coll, KEYED_NAMES, KEYED)?;
    for key in keys {
        target.remove(key)?;
    }
    Ok(())
}

/// (disj s & xs) - copy without members; nil stays nil
pub fn builtin_disj(args: &[Value]) -> Result<Value> {
    arity_at_least("disj", args, 1)?;
    let target = match &args[0] {
        Value::Nil => return Ok(Value::Nil),
        other => container_of("disj", other, "set", &[Kind::Set])?.shallow_copy()?,
    };
    let set = container_of("disj", &target, "set", &[Kind::Set])?;
    for x in &args[1..] {
        set.remove(x)?;
    }
    Ok(target)
}

/// (disj! s & xs) - remove members in place
pub fn builtin_disj_bang(args: &[Value]) -> Result<Value> {
    arity_at_least("disj!", args, 1)?;
    let set = container_of("disj!", &args[0], "set", &[Kind::Set])?;
    for x in &args[1..] {
        set.remove(x)?;
    }
    Ok(args[0].clone())
}

// ============================================================================
// contains? / empty / into / count
// ============================================================================

/// (contains? coll key)
///
/// Index range for arrays and lists, key presence for objects and maps,
/// membership for sets. Nil and lazy sequences contain nothing.
pub fn builtin_contains_p(args: &[Value]) -> Result<Value> {
    arity("contains?", args, 2)?;
    match &args[0] {
        Value::Nil => Ok(Value::Bool(false)),
        coll => match coll.as_container() {
            Some(c) => Ok(Value::Bool(c.has(&args[1]))),
            None => Err(Error::type_error_in(
                "contains?",
                "collection",
                coll.type_name(),
            )),
        },
    }
}

/// (empty coll) - empty container of the same kind
pub fn builtin_empty(args: &[Value]) -> Result<Value> {
    arity("empty", args, 1)?;
    match args[0].as_container() {
        Some(c) => Ok(c.empty()),
        None => Err(Error::type_error_in(
            "empty",
            "collection",
            args[0].type_name(),
        )),
    }
}

/// (into) (into to) (into to from)
pub fn builtin_into(args: &[Value]) -> Result<Value> {
    arity_range("into", args, 0, 2)?;
    match args {
        [] => Ok(Kind::Array.empty()),
        [to] => Ok(to.clone()),
        [to, from, ..] => {
            let mut conj_args = vec![to.clone()];
            for item in from.iter()? {
                conj_args.push(item?);
            }
            builtin_conj(&conj_args)
        }
    }
}

/// Element count of a seqable value.
pub(crate) fn count_of(op: &'static str, coll: &Value) -> Result<usize> {
    match coll {
        Value::Nil => Ok(0),
        Value::String(s) => Ok(s.chars().count()),
        other => match other.as_container() {
            Some(c) => match c.size() {
                Some(n) => Ok(n),
                None => {
                    let mut n = 0;
                    for item in other.iter()? {
                        item?;
                        n += 1;
                    }
                    Ok(n)
                }
            },
            None => Err(Error::type_error_in(op, "collection", other.type_name())),
        },
    }
}

/// (count coll)
pub fn builtin_count(args: &[Value]) -> Result<Value> {
    arity("count", args, 1)?;
    Ok(Value::from(count_of("count", &args[0])?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::int(n)
    }

    #[test]
    fn test_get_treats_stored_nil_as_missing() {
        let m = Value::map([(int(1), Value::Nil)]);
        assert_eq!(builtin_get(&[m, int(1), int(9)]).unwrap(), int(9));
    }

    #[test]
    fn test_get_on_string() {
        assert_eq!(
            builtin_get(&[Value::string("abc"), int(1)]).unwrap(),
            Value::string("b")
        );
    }

    #[test]
    fn test_assoc_rejects_dangling_key() {
        let err = builtin_assoc(&[Value::Nil, int(1), int(2), int(3)]).unwrap_err();
        assert!(matches!(err, Error::IllegalArgument { op: "assoc", .. }));
    }

    #[test]
    fn test_conj_no_args_is_empty_array() {
        assert_eq!(builtin_conj(&[]).unwrap(), Value::array([]));
    }

    #[test]
    fn test_into_arity() {
        assert!(builtin_into(&[Value::Nil, Value::Nil, Value::Nil]).is_err());
    }
}
