// tessel-core - Higher-order functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Mapping and filtering over sequences: map, filter, remove, keep, mapcat
//! and their eager and indexed variants. Function combinators: apply, comp,
//! partial, complement, constantly, identity, juxt, fnil. Quantifiers:
//! every?, some, not-every?, not-any?, every-pred, some-fn.

use tessel_value::lazy::fail;
use tessel_value::{Result, SeqIter, Value};

use super::{arity, arity_at_least, lazy_from, truthy};
use crate::apply::{apply, make_native_fn};

// ============================================================================
// Mapping
// ============================================================================

/// Lock-step rows across several sources, ending with the shortest.
struct Rows {
    iters: Vec<SeqIter>,
    done: bool,
}

impl Iterator for Rows {
    type Item = Result<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut row = Vec::with_capacity(self.iters.len());
        for it in &mut self.iters {
            match it.next() {
                Some(Ok(x)) => row.push(x),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
        Some(Ok(row))
    }
}

/// `f` applied across one or more sources, as a fresh iterator.
fn map_iter(f: &Value, colls: &[Value]) -> SeqIter {
    let f = f.clone();
    if let [coll] = colls {
        return Box::new(
            coll.seq_iter()
                .map(move |item| item.and_then(|x| apply(&f, &[x]))),
        );
    }
    let rows = Rows {
        iters: colls.iter().map(Value::seq_iter).collect(),
        done: false,
    };
    Box::new(rows.map(move |row| row.and_then(|args| apply(&f, &args))))
}

/// (map f coll & colls)
pub fn builtin_map(args: &[Value]) -> Result<Value> {
    arity_at_least("map", args, 2)?;
    let f = args[0].clone();
    let colls = args[1..].to_vec();
    Ok(lazy_from(&args[1..], move || map_iter(&f, &colls)))
}

/// (mapv f coll & colls) - eager map into an array
pub fn builtin_mapv(args: &[Value]) -> Result<Value> {
    arity_at_least("mapv", args, 2)?;
    let items = map_iter(&args[0], &args[1..]).collect::<Result<Vec<_>>>()?;
    Ok(Value::array(items))
}

/// (mapcat f coll & colls) - concatenation of the mapped results
pub fn builtin_mapcat(args: &[Value]) -> Result<Value> {
    arity_at_least("mapcat", args, 2)?;
    let f = args[0].clone();
    let colls = args[1..].to_vec();
    Ok(lazy_from(&args[1..], move || {
        Box::new(map_iter(&f, &colls).flat_map(|item| match item {
            Ok(coll) => coll.seq_iter(),
            Err(e) => fail(e),
        }))
    }))
}

/// (map-indexed f coll) - `(f index x)` for each element, into an array
pub fn builtin_map_indexed(args: &[Value]) -> Result<Value> {
    arity("map-indexed", args, 2)?;
    let mut out = Vec::new();
    for (i, item) in args[1].iter()?.enumerate() {
        out.push(apply(&args[0], &[Value::from(i), item?])?);
    }
    Ok(Value::array(out))
}

/// (keep f coll) - non-nil results of `(f x)`, lazily
pub fn builtin_keep(args: &[Value]) -> Result<Value> {
    arity("keep", args, 2)?;
    let f = args[0].clone();
    let coll = args[1].clone();
    Ok(lazy_from(&args[1..], move || {
        Box::new(
            map_iter(&f, std::slice::from_ref(&coll))
                .filter(|item| !matches!(item, Ok(Value::Nil))),
        )
    }))
}

/// (keep-indexed f coll) - non-nil results of `(f index x)`, into an array
pub fn builtin_keep_indexed(args: &[Value]) -> Result<Value> {
    arity("keep-indexed", args, 2)?;
    let mut out = Vec::new();
    for (i, item) in args[1].iter()?.enumerate() {
        let v = apply(&args[0], &[Value::from(i), item?])?;
        if !v.is_nil() {
            out.push(v);
        }
    }
    Ok(Value::array(out))
}

// ============================================================================
// Filtering
// ============================================================================

fn filter_iter(pred: Value, src: SeqIter, keep: bool) -> SeqIter {
    Box::new(src.filter_map(move |item| match item {
        Ok(x) => match truthy(&pred, &x) {
            Ok(t) if t == keep => Some(Ok(x)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        },
        Err(e) => Some(Err(e)),
    }))
}

/// (filter pred coll)
pub fn builtin_filter(args: &[Value]) -> Result<Value> {
    arity("filter", args, 2)?;
    let (pred, coll) = (args[0].clone(), args[1].clone());
    Ok(lazy_from(&args[1..], move || {
        filter_iter(pred.clone(), coll.seq_iter(), true)
    }))
}

/// (filterv pred coll) - eager filter into an array
pub fn builtin_filterv(args: &[Value]) -> Result<Value> {
    arity("filterv", args, 2)?;
    let items = filter_iter(args[0].clone(), args[1].iter()?, true).collect::<Result<Vec<_>>>()?;
    Ok(Value::array(items))
}

/// (remove pred coll)
pub fn builtin_remove(args: &[Value]) -> Result<Value> {
    arity("remove", args, 2)?;
    let (pred, coll) = (args[0].clone(), args[1].clone());
    Ok(lazy_from(&args[1..], move || {
        filter_iter(pred.clone(), coll.seq_iter(), false)
    }))
}

// ============================================================================
// Combinators
// ============================================================================

/// (apply f & args coll) - call f with the last argument spread
pub fn builtin_apply(args: &[Value]) -> Result<Value> {
    arity_at_least("apply", args, 2)?;
    let f = &args[0];
    let (spread, leading) = match args[1..].split_last() {
        Some(split) => split,
        None => return apply(f, &[]),
    };
    let mut call_args = leading.to_vec();
    for item in spread.iter()? {
        call_args.push(item?);
    }
    apply(f, &call_args)
}

/// (comp & fs) - right-to-left composition; no fns is identity
pub fn builtin_comp(args: &[Value]) -> Result<Value> {
    let fs = args.to_vec();
    Ok(make_native_fn("comp", move |call_args| {
        let Some((innermost, rest)) = fs.split_last() else {
            return Ok(call_args.first().cloned().unwrap_or(Value::Nil));
        };
        let mut acc = apply(innermost, call_args)?;
        for f in rest.iter().rev() {
            acc = apply(f, &[acc])?;
        }
        Ok(acc)
    }))
}

/// (partial f & args)
pub fn builtin_partial(args: &[Value]) -> Result<Value> {
    arity_at_least("partial", args, 1)?;
    let f = args[0].clone();
    let bound = args[1..].to_vec();
    Ok(make_native_fn("partial", move |call_args| {
        let mut all = bound.clone();
        all.extend_from_slice(call_args);
        apply(&f, &all)
    }))
}

/// (complement f)
pub fn builtin_complement(args: &[Value]) -> Result<Value> {
    arity("complement", args, 1)?;
    let f = args[0].clone();
    Ok(make_native_fn("complement", move |call_args| {
        Ok(Value::Bool(!apply(&f, call_args)?.is_truthy()))
    }))
}

/// (constantly x)
pub fn builtin_constantly(args: &[Value]) -> Result<Value> {
    arity("constantly", args, 1)?;
    let x = args[0].clone();
    Ok(make_native_fn("constantly", move |_| Ok(x.clone())))
}

/// (identity x)
pub fn builtin_identity(args: &[Value]) -> Result<Value> {
    arity("identity", args, 1)?;
    Ok(args[0].clone())
}

/// (juxt & fs) - fn returning an array of each f's result
pub fn builtin_juxt(args: &[Value]) -> Result<Value> {
    arity_at_least("juxt", args, 1)?;
    let fs = args.to_vec();
    Ok(make_native_fn("juxt", move |call_args| {
        let results = fs
            .iter()
            .map(|f| apply(f, call_args))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::array(results))
    }))
}

/// (fnil f & defaults) - replace nil leading arguments with defaults
pub fn builtin_fnil(args: &[Value]) -> Result<Value> {
    arity_at_least("fnil", args, 2)?;
    let f = args[0].clone();
    let defaults = args[1..].to_vec();
    Ok(make_native_fn("fnil", move |call_args| {
        let patched: Vec<Value> = call_args
            .iter()
            .enumerate()
            .map(|(i, arg)| match (arg, defaults.get(i)) {
                (Value::Nil, Some(default)) => default.clone(),
                _ => arg.clone(),
            })
            .collect();
        apply(&f, &patched)
    }))
}

// ============================================================================
// Quantifiers
// ============================================================================

fn every(pred: &Value, coll: &Value) -> Result<bool> {
    for item in coll.iter()? {
        if !truthy(pred, &item?)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// First truthy `(pred x)`, or nil.
fn some(pred: &Value, coll: &Value) -> Result<Value> {
    for item in coll.iter()? {
        let v = apply(pred, &[item?])?;
        if v.is_truthy() {
            return Ok(v);
        }
    }
    Ok(Value::Nil)
}

/// (every? pred coll)
pub fn builtin_every_p(args: &[Value]) -> Result<Value> {
    arity("every?", args, 2)?;
    Ok(Value::Bool(every(&args[0], &args[1])?))
}

/// (not-every? pred coll)
pub fn builtin_not_every_p(args: &[Value]) -> Result<Value> {
    arity("not-every?", args, 2)?;
    Ok(Value::Bool(!every(&args[0], &args[1])?))
}

/// (some pred coll)
pub fn builtin_some(args: &[Value]) -> Result<Value> {
    arity("some", args, 2)?;
    some(&args[0], &args[1])
}

/// (not-any? pred coll)
pub fn builtin_not_any_p(args: &[Value]) -> Result<Value> {
    arity("not-any?", args, 2)?;
    Ok(Value::Bool(!some(&args[0], &args[1])?.is_truthy()))
}

/// (every-pred & preds) - fn true when every pred holds for every argument
pub fn builtin_every_pred(args: &[Value]) -> Result<Value> {
    arity_at_least("every-pred", args, 1)?;
    let preds = args.to_vec();
    Ok(make_native_fn("every-pred", move |call_args| {
        for p in &preds {
            for x in call_args {
                if !truthy(p, x)? {
                    return Ok(Value::Bool(false));
                }
            }
        }
        Ok(Value::Bool(true))
    }))
}

/// (some-fn & preds) - fn returning the first truthy `(p x)`, or nil
pub fn builtin_some_fn(args: &[Value]) -> Result<Value> {
    arity_at_least("some-fn", args, 1)?;
    let preds = args.to_vec();
    Ok(make_native_fn("some-fn", move |call_args| {
        for p in &preds {
            for x in call_args {
                let v = apply(p, std::slice::from_ref(x))?;
                if v.is_truthy() {
                    return Ok(v);
                }
            }
        }
        Ok(Value::Nil)
    }))
}
