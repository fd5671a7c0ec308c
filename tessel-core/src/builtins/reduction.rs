// tessel-core - Reduction
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! reduce, reduce-kv, reduced, reduced?
//!
//! The fold driver runs on [`ControlFlow`]: a step returning
//! `Value::Reduced` breaks out immediately with the unwrapped value, and an
//! error from the source or the step breaks with that error.

use std::ops::ControlFlow;

use tessel_value::{Error, Result, SeqIter, Value};

use super::{arity, arity_range};
use crate::apply::apply;

fn unreduced(val: Value) -> Value {
    match val {
        Value::Reduced(inner) => (*inner).clone(),
        other => other,
    }
}

fn step(f: &Value, args: &[Value]) -> ControlFlow<Result<Value>, Value> {
    match apply(f, args) {
        Ok(Value::Reduced(inner)) => ControlFlow::Break(Ok((*inner).clone())),
        Ok(acc) => ControlFlow::Continue(acc),
        Err(e) => ControlFlow::Break(Err(e)),
    }
}

/// Fold `src` into `init`, stopping at the first reduced step.
fn fold(f: &Value, init: Value, mut src: SeqIter) -> Result<Value> {
    let flow = src.try_fold(init, |acc, item| match item {
        Ok(x) => step(f, &[acc, x]),
        Err(e) => ControlFlow::Break(Err(e)),
    });
    match flow {
        ControlFlow::Continue(acc) => Ok(acc),
        ControlFlow::Break(result) => result,
    }
}

/// (reduce f coll) or (reduce f init coll)
///
/// Without init the first element seeds the accumulator and an empty source
/// gives nil. A seed or init that is already reduced is returned unwrapped
/// without pulling further.
pub fn builtin_reduce(args: &[Value]) -> Result<Value> {
    arity_range("reduce", args, 2, 3)?;
    let f = &args[0];
    match args {
        [_, coll] => {
            let mut src = coll.iter()?;
            match src.next() {
                None => Ok(Value::Nil),
                Some(seed) => match seed? {
                    reduced @ Value::Reduced(_) => Ok(unreduced(reduced)),
                    seed => fold(f, seed, src),
                },
            }
        }
        [_, init, coll, ..] => match init {
            Value::Reduced(_) => Ok(unreduced(init.clone())),
            init => fold(f, init.clone(), coll.iter()?),
        },
        _ => Err(Error::arity_range("reduce", 2, 3, args.len())),
    }
}

/// (reduce-kv f init coll) - `(f acc k v)` over entries or indexed elements
pub fn builtin_reduce_kv(args: &[Value]) -> Result<Value> {
    arity("reduce-kv", args, 3)?;
    let f = &args[0];
    if let Value::Reduced(_) = &args[1] {
        return Ok(unreduced(args[1].clone()));
    }
    let entries: Vec<(Value, Value)> = match &args[2] {
        Value::Nil => Vec::new(),
        Value::Object(_) | Value::Map(_) => args[2]
            .to_vec()?
            .into_iter()
            .filter_map(|pair| match pair {
                Value::Array(cell) => Some((cell.get(0)?, cell.get(1)?)),
                _ => None,
            })
            .collect(),
        Value::Array(_) | Value::List(_) => args[2]
            .to_vec()?
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Value::from(i), v))
            .collect(),
        other => {
            return Err(Error::type_error_in(
                "reduce-kv",
                "map, object, array, or list",
                other.type_name(),
            ));
        }
    };
    let flow = entries
        .into_iter()
        .try_fold(args[1].clone(), |acc, (k, v)| step(f, &[acc, k, v]));
    match flow {
        ControlFlow::Continue(acc) => Ok(acc),
        ControlFlow::Break(result) => result,
    }
}

/// (reduced x)
pub fn builtin_reduced(args: &[Value]) -> Result<Value> {
    arity("reduced", args, 1)?;
    Ok(Value::reduced(args[0].clone()))
}

/// (reduced? x)
pub fn builtin_reduced_p(args: &[Value]) -> Result<Value> {
    arity("reduced?", args, 1)?;
    Ok(Value::Bool(matches!(args[0], Value::Reduced(_))))
}
