// tessel-core - Collection utility functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Nested access, merging and entry helpers built on the basic collection
//! operations.

// Value keys may hold interior-mutable containers
#![allow(clippy::mutable_key_type)]

use indexmap::IndexMap;

use tessel_value::{Error, Kind, Result, Value};

use super::collections::{
    ASSOCIATIVE, ASSOCIATIVE_NAMES, absorb_all, assoc_target, builtin_assoc, builtin_assoc_bang,
    builtin_empty, builtin_into, container_of, lookup, store,
};
use super::{arity, arity_at_least, arity_range};
use crate::apply::apply;

// ============================================================================
// Nested paths
// ============================================================================

/// Shared walk for `assoc-in` and `assoc-in!`.
///
/// Missing intermediate levels are created as empty containers of the root
/// kind. `in_place` selects `assoc!` over `assoc` at every level.
fn assoc_in_with(
    op: &'static str,
    root: &Value,
    path: &Value,
    val: Value,
    in_place: bool,
) -> Result<Value> {
    let base = container_of(op, root, ASSOCIATIVE_NAMES, ASSOCIATIVE)?.kind();
    let keys = path.to_vec()?;
    if keys.is_empty() {
        return Err(Error::illegal(op, "path must not be empty"));
    }
    let init = &keys[..keys.len() - 1];

    let mut chain = vec![root.clone()];
    for key in init {
        let next = chain
            .last()
            .and_then(|level| lookup(level, key))
            .unwrap_or_else(|| base.empty());
        chain.push(next);
    }

    let mut acc = val;
    for (level, key) in chain.into_iter().zip(keys.iter()).rev() {
        acc = if in_place {
            store(op, &level, key.clone(), acc)?;
            level
        } else {
            let copy = assoc_target(op, &level)?;
            store(op, &copy, key.clone(), acc)?;
            copy
        };
    }
    Ok(acc)
}

/// (assoc-in coll path v)
pub fn builtin_assoc_in(args: &[Value]) -> Result<Value> {
    arity("assoc-in", args, 3)?;
    assoc_in_with("assoc-in", &args[0], &args[1], args[2].clone(), false)
}

/// (assoc-in! coll path v) - the path argument is only read
pub fn builtin_assoc_in_bang(args: &[Value]) -> Result<Value> {
    arity("assoc-in!", args, 3)?;
    assoc_in_with("assoc-in!", &args[0], &args[1], args[2].clone(), true)
}

fn get_in(coll: &Value, path: &Value) -> Result<Option<Value>> {
    let mut entry = coll.clone();
    for key in path.iter()? {
        match lookup(&entry, &key?) {
            Some(v) => entry = v,
            None => return Ok(None),
        }
    }
    Ok(Some(entry).filter(|v| !v.is_nil()))
}

/// (get-in coll path) or (get-in coll path default)
pub fn builtin_get_in(args: &[Value]) -> Result<Value> {
    arity_range("get-in", args, 2, 3)?;
    let default = args.get(2).cloned().unwrap_or(Value::Nil);
    Ok(get_in(&args[0], &args[1])?.unwrap_or(default))
}

/// (update-in coll path f & args)
pub fn builtin_update_in(args: &[Value]) -> Result<Value> {
    arity_at_least("update-in", args, 3)?;
    let current = get_in(&args[0], &args[1])?.unwrap_or(Value::Nil);
    let mut f_args = vec![current];
    f_args.extend_from_slice(&args[3..]);
    let new_val = apply(&args[2], &f_args)?;
    assoc_in_with("update-in", &args[0], &args[1], new_val, false)
}

fn update_with(op: &'static str, args: &[Value], in_place: bool) -> Result<Value> {
    arity_at_least(op, args, 3)?;
    let current = lookup(&args[0], &args[1]).unwrap_or(Value::Nil);
    let mut f_args = vec![current];
    f_args.extend_from_slice(&args[3..]);
    let new_val = apply(&args[2], &f_args)?;
    let assoc_args = [args[0].clone(), args[1].clone(), new_val];
    if in_place {
        builtin_assoc_bang(&assoc_args)
    } else {
        builtin_assoc(&assoc_args)
    }
}

/// (update coll k f & args)
pub fn builtin_update(args: &[Value]) -> Result<Value> {
    update_with("update", args, false)
}

/// (update! coll k f & args)
pub fn builtin_update_bang(args: &[Value]) -> Result<Value> {
    update_with("update!", args, true)
}

// ============================================================================
// Selecting and merging
// ============================================================================

/// (select-keys coll keys) - same kind, only keys present with non-nil values
pub fn builtin_select_keys(args: &[Value]) -> Result<Value> {
    arity("select-keys", args, 2)?;
    let ret = match &args[0] {
        Value::Nil => Kind::Object.empty(),
        coll => container_of("select-keys", coll, ASSOCIATIVE_NAMES, ASSOCIATIVE)?.empty(),
    };
    for key in args[1].iter()? {
        let key = key?;
        if let Some(v) = lookup(&args[0], &key) {
            store("select-keys", &ret, key, v)?;
        }
    }
    Ok(ret)
}

/// (merge & maps) - copy of the first map with the rest conj!ed in
pub fn builtin_merge(args: &[Value]) -> Result<Value> {
    let target = match args.first() {
        None | Some(Value::Nil) => Kind::Object.empty(),
        Some(first) => {
            let empty = builtin_empty(std::slice::from_ref(first))?;
            builtin_into(&[empty, first.clone()])?
        }
    };
    if args.len() > 1 {
        absorb_all("merge", &target, &args[1..])?;
    }
    Ok(target)
}

/// (merge-with f & maps)
///
/// Keys present in both maps combine as `(f old new)`. The first non-nil
/// map is copied, never mutated. All-nil input gives nil.
pub fn builtin_merge_with(args: &[Value]) -> Result<Value> {
    arity_at_least("merge-with", args, 1)?;
    let f = &args[0];
    let maps = &args[1..];
    if maps.iter().all(Value::is_nil) {
        return Ok(Value::Nil);
    }

    let mut acc = maps[0].clone();
    for m in &maps[1..] {
        let mut merged: Option<Value> = None;
        for entry in m.iter()? {
            let entry = entry?;
            let k = lookup(&entry, &Value::int(0)).unwrap_or(Value::Nil);
            let v = lookup(&entry, &Value::int(1)).unwrap_or(Value::Nil);
            let target = match &merged {
                Some(t) => t.clone(),
                None => {
                    let copy = assoc_target("merge-with", &acc)?;
                    merged = Some(copy.clone());
                    copy
                }
            };
            let has = target.as_container().is_some_and(|c| c.has(&k));
            let new_val = if has {
                let old = lookup(&target, &k).unwrap_or(Value::Nil);
                apply(f, &[old, v])?
            } else {
                v
            };
            store("merge-with", &target, k, new_val)?;
        }
        if let Some(t) = merged {
            acc = t;
        } else if acc.is_nil() {
            acc = Kind::Object.empty();
        }
    }
    Ok(acc)
}

// ============================================================================
// Entries
// ============================================================================

fn entry_parts(op: &'static str, coll: &Value) -> Result<Vec<(Value, Value)>> {
    match coll {
        Value::Object(cell) => Ok(cell
            .borrow()
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.clone()))
            .collect()),
        Value::Map(cell) => Ok(cell
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()),
        other => Err(Error::type_error_in(op, "map or object", other.type_name())),
    }
}

/// (keys m) - array of keys, nil for nil
pub fn builtin_keys(args: &[Value]) -> Result<Value> {
    arity("keys", args, 1)?;
    if args[0].is_nil() {
        return Ok(Value::Nil);
    }
    let entries = entry_parts("keys", &args[0])?;
    Ok(Value::array(entries.into_iter().map(|(k, _)| k)))
}

/// (vals m) - array of values, nil for nil
pub fn builtin_vals(args: &[Value]) -> Result<Value> {
    arity("vals", args, 1)?;
    if args[0].is_nil() {
        return Ok(Value::Nil);
    }
    let entries = entry_parts("vals", &args[0])?;
    Ok(Value::array(entries.into_iter().map(|(_, v)| v)))
}

/// (find m k) - `[k v]` entry or nil
pub fn builtin_find(args: &[Value]) -> Result<Value> {
    arity("find", args, 2)?;
    Ok(lookup(&args[0], &args[1])
        .map(|v| Value::array([args[1].clone(), v]))
        .unwrap_or(Value::Nil))
}

/// (key entry)
pub fn builtin_key(args: &[Value]) -> Result<Value> {
    arity("key", args, 1)?;
    Ok(lookup(&args[0], &Value::int(0)).unwrap_or(Value::Nil))
}

/// (val entry)
pub fn builtin_val(args: &[Value]) -> Result<Value> {
    arity("val", args, 1)?;
    Ok(lookup(&args[0], &Value::int(1)).unwrap_or(Value::Nil))
}

// ============================================================================
// Grouping
// ============================================================================

/// (group-by f coll) - map from `(f x)` to an array of the matching items
pub fn builtin_group_by(args: &[Value]) -> Result<Value> {
    arity("group-by", args, 2)?;
    let mut groups: IndexMap<Value, Vec<Value>> = IndexMap::new();
    for item in args[1].iter()? {
        let item = item?;
        let key = apply(&args[0], std::slice::from_ref(&item))?;
        groups.entry(key).or_default().push(item);
    }
    Ok(Value::map(
        groups.into_iter().map(|(k, items)| (k, Value::array(items))),
    ))
}

/// (frequencies coll) - map from item to occurrence count
pub fn builtin_frequencies(args: &[Value]) -> Result<Value> {
    arity("frequencies", args, 1)?;
    let mut counts: IndexMap<Value, i64> = IndexMap::new();
    for item in args[0].iter()? {
        *counts.entry(item?).or_insert(0) += 1;
    }
    Ok(Value::map(
        counts.into_iter().map(|(k, n)| (k, Value::int(n))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::int(n)
    }

    #[test]
    fn test_assoc_in_vivifies_with_root_kind() {
        let m = Value::map([]);
        let path = Value::array([Value::string("a"), Value::string("b")]);
        let result = builtin_assoc_in(&[m.clone(), path, int(1)]).unwrap();
        assert_eq!(
            result,
            Value::map([(
                Value::string("a"),
                Value::map([(Value::string("b"), int(1))])
            )])
        );
        assert_eq!(m, Value::map([]));
    }

    #[test]
    fn test_assoc_in_rejects_empty_path() {
        assert!(builtin_assoc_in(&[Value::map([]), Value::array([]), int(1)]).is_err());
    }

    #[test]
    fn test_merge_with_skips_leading_nil() {
        let plus = Value::func("+", |args| {
            Ok(int(args.iter().filter_map(Value::as_int).sum()))
        });
        let result = builtin_merge_with(&[
            plus,
            Value::Nil,
            Value::object([("a", int(1))]),
        ])
        .unwrap();
        assert_eq!(result, Value::object([("a", int(1))]));
    }
}
