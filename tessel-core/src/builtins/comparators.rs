// tessel-core - Comparison and sorting
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! compare, sort, sort-by, and the equality and ordering predicates.

use std::cmp::Ordering;

use tessel_value::{Error, Result, Value};

use super::{arity, arity_at_least, arity_range};
use crate::apply::apply;

/// Natural ordering used by `compare` and the default `sort`.
///
/// Nil sorts before everything, booleans with false first, numbers by
/// value, strings lexicographically, arrays and lists by length then
/// element-wise. Anything else cannot be compared.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::Nil, Value::Nil) => Ok(Ordering::Equal),
        (Value::Nil, _) => Ok(Ordering::Less),
        (_, Value::Nil) => Ok(Ordering::Greater),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (x, y) if x.is_number() && y.is_number() => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            Ok(x.total_cmp(&y))
        }
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Array(_) | Value::List(_), Value::Array(_) | Value::List(_)) => {
            let (xs, ys) = (a.to_vec()?, b.to_vec()?);
            match xs.len().cmp(&ys.len()) {
                Ordering::Equal => {}
                unequal => return Ok(unequal),
            }
            for (x, y) in xs.iter().zip(&ys) {
                match compare_values(x, y)? {
                    Ordering::Equal => {}
                    unequal => return Ok(unequal),
                }
            }
            Ok(Ordering::Equal)
        }
        _ => Err(Error::IllegalArgument {
            op: "compare",
            message: format!("cannot compare {} to {}", a.type_name(), b.type_name()),
        }),
    }
}

fn ordering_value(ord: Ordering) -> Value {
    Value::int(match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

/// Call a user comparator.
///
/// Numbers are read by sign. A boolean means "a sorts before b", so a
/// false answer needs a second call to tell equal from greater.
pub(crate) fn call_comparator(comp: &Value, a: &Value, b: &Value) -> Result<Ordering> {
    let result = apply(comp, &[a.clone(), b.clone()])?;
    match result {
        Value::Int(n) => Ok(n.cmp(&0)),
        Value::Float(f) => Ok(f.partial_cmp(&0.0).unwrap_or(Ordering::Equal)),
        Value::Bool(true) => Ok(Ordering::Less),
        Value::Bool(false) => match apply(comp, &[b.clone(), a.clone()])? {
            Value::Bool(true) => Ok(Ordering::Greater),
            _ => Ok(Ordering::Equal),
        },
        other => Err(Error::type_error_in(
            "comparator",
            "number or boolean",
            other.type_name(),
        )),
    }
}

/// (compare a b) - -1, 0 or 1
pub fn builtin_compare(args: &[Value]) -> Result<Value> {
    arity("compare", args, 2)?;
    Ok(ordering_value(compare_values(&args[0], &args[1])?))
}

/// Stable sort of `items` by `keys`, stopping at the first comparator error.
fn sort_keyed(
    items: Vec<Value>,
    keys: Vec<Value>,
    comp: Option<&Value>,
) -> Result<Vec<Value>> {
    let mut rows: Vec<(Value, Value)> = keys.into_iter().zip(items).collect();
    let mut failure: Option<Error> = None;
    rows.sort_by(|(ka, _), (kb, _)| {
        if failure.is_some() {
            return Ordering::Equal;
        }
        let ord = match comp {
            Some(comp) => call_comparator(comp, ka, kb),
            None => compare_values(ka, kb),
        };
        ord.unwrap_or_else(|e| {
            failure = Some(e);
            Ordering::Equal
        })
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(rows.into_iter().map(|(_, item)| item).collect()),
    }
}

/// (sort coll) or (sort comp coll) - new sorted array
pub fn builtin_sort(args: &[Value]) -> Result<Value> {
    arity_range("sort", args, 1, 2)?;
    let (comp, coll) = match args {
        [coll] => (None, coll),
        [comp, coll, ..] => (Some(comp), coll),
        [] => return Err(Error::arity_range("sort", 1, 2, 0)),
    };
    let items = coll.to_vec()?;
    let keys = items.clone();
    Ok(Value::array(sort_keyed(items, keys, comp)?))
}

/// (sort-by keyfn coll) or (sort-by keyfn comp coll)
pub fn builtin_sort_by(args: &[Value]) -> Result<Value> {
    arity_range("sort-by", args, 2, 3)?;
    let (keyfn, comp, coll) = match args {
        [keyfn, coll] => (keyfn, None, coll),
        [keyfn, comp, coll, ..] => (keyfn, Some(comp), coll),
        _ => return Err(Error::arity_range("sort-by", 2, 3, args.len())),
    };
    let items = coll.to_vec()?;
    let keys = items
        .iter()
        .map(|x| apply(keyfn, std::slice::from_ref(x)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::array(sort_keyed(items, keys, comp)?))
}

// ============================================================================
// Equality and ordering predicates
// ============================================================================

/// (= x & more)
pub fn builtin_eq(args: &[Value]) -> Result<Value> {
    arity_at_least("=", args, 1)?;
    Ok(Value::Bool(args.windows(2).all(|w| w[0] == w[1])))
}

/// (not= x & more)
pub fn builtin_not_eq(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(!builtin_eq(args)?.is_truthy()))
}

fn monotonic(op: &'static str, args: &[Value], holds: fn(Ordering) -> bool) -> Result<Value> {
    arity_at_least(op, args, 1)?;
    for arg in args {
        if !arg.is_number() {
            return Err(Error::type_error_in(op, "number", arg.type_name()));
        }
    }
    for w in args.windows(2) {
        if !holds(compare_values(&w[0], &w[1])?) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// (< x & more)
pub fn builtin_lt(args: &[Value]) -> Result<Value> {
    monotonic("<", args, Ordering::is_lt)
}

/// (> x & more)
pub fn builtin_gt(args: &[Value]) -> Result<Value> {
    monotonic(">", args, Ordering::is_gt)
}

/// (<= x & more)
pub fn builtin_le(args: &[Value]) -> Result<Value> {
    monotonic("<=", args, Ordering::is_le)
}

/// (>= x & more)
pub fn builtin_ge(args: &[Value]) -> Result<Value> {
    monotonic(">=", args, Ordering::is_ge)
}
