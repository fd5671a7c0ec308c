// tessel-core - Sequence functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequence access and lazy composition: first, rest, take, drop,
//! partition, interleave...
//!
//! Functions returning sequences build a [`LazySeq`](tessel_value::LazySeq)
//! whose generator re-opens its sources on every traversal; nothing is
//! pulled until a consumer asks for it.

// Value keys may hold interior-mutable containers
#![allow(clippy::mutable_key_type)]

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use tessel_value::kind::index_key;
use tessel_value::lazy::fail;
use tessel_value::{Cons, Error, Result, SeqIter, Value};

use super::collections::{count_of, lookup};
use super::{arity, arity_range, lazy_from, require_count, require_int, stop_after_error, truthy};

// ============================================================================
// Access
// ============================================================================

fn first_of(coll: &Value) -> Result<Value> {
    Ok(coll.iter()?.next().transpose()?.unwrap_or(Value::Nil))
}

/// (first coll)
pub fn builtin_first(args: &[Value]) -> Result<Value> {
    arity("first", args, 1)?;
    first_of(&args[0])
}

/// (second coll)
pub fn builtin_second(args: &[Value]) -> Result<Value> {
    arity("second", args, 1)?;
    Ok(args[0].iter()?.nth(1).transpose()?.unwrap_or(Value::Nil))
}

/// (ffirst coll)
pub fn builtin_ffirst(args: &[Value]) -> Result<Value> {
    arity("ffirst", args, 1)?;
    first_of(&first_of(&args[0])?)
}

/// (last coll)
pub fn builtin_last(args: &[Value]) -> Result<Value> {
    arity("last", args, 1)?;
    if let Value::Array(cell) = &args[0] {
        return Ok(cell.borrow().last().cloned().unwrap_or(Value::Nil));
    }
    let mut last = Value::Nil;
    for item in args[0].iter()? {
        last = item?;
    }
    Ok(last)
}

/// (nth coll idx) or (nth coll idx default) - missing positions give the default
pub fn builtin_nth(args: &[Value]) -> Result<Value> {
    arity_range("nth", args, 2, 3)?;
    let default = args.get(2).cloned().unwrap_or(Value::Nil);
    let Some(index) = index_key(&args[1]) else {
        return Ok(default);
    };
    let found = match &args[0] {
        Value::Nil => None,
        Value::Array(cell) => cell.get(index),
        coll => coll.iter()?.nth(index).transpose()?,
    };
    Ok(found.filter(|v| !v.is_nil()).unwrap_or(default))
}

/// (rest coll) - lazy sequence of all but the first element
pub fn builtin_rest(args: &[Value]) -> Result<Value> {
    arity("rest", args, 1)?;
    let coll = args[0].clone();
    Ok(lazy_from(args, move || skip_ok(coll.seq_iter(), 1)))
}

/// (next coll) - realized rest, nil when empty
pub fn builtin_next(args: &[Value]) -> Result<Value> {
    arity("next", args, 1)?;
    let items = args[0].to_vec()?;
    if items.len() > 1 {
        Ok(Value::array(items.into_iter().skip(1)))
    } else {
        Ok(Value::Nil)
    }
}

/// (butlast coll) - realized, all but the last element, nil when empty
pub fn builtin_butlast(args: &[Value]) -> Result<Value> {
    arity("butlast", args, 1)?;
    let mut items = args[0].to_vec()?;
    items.pop();
    if items.is_empty() {
        Ok(Value::Nil)
    } else {
        Ok(Value::array(items))
    }
}

/// (seq coll) - nil for empty collections
///
/// Objects become an array of `[key value]` entries; other non-empty values
/// are returned unchanged.
pub fn builtin_seq(args: &[Value]) -> Result<Value> {
    arity("seq", args, 1)?;
    let coll = &args[0];
    if coll.iter()?.next().transpose()?.is_none() {
        return Ok(Value::Nil);
    }
    match coll {
        Value::Object(_) => Ok(Value::array(coll.to_vec()?)),
        other => Ok(other.clone()),
    }
}

/// (empty? coll)
pub fn builtin_empty_p(args: &[Value]) -> Result<Value> {
    arity("empty?", args, 1)?;
    Ok(Value::Bool(builtin_seq(args)?.is_nil()))
}

/// (bounded-count n coll) - count, walking at most n elements of a lazy source
pub fn builtin_bounded_count(args: &[Value]) -> Result<Value> {
    arity("bounded-count", args, 2)?;
    let limit = require_count("bounded-count", &args[0])?;
    let coll = &args[1];
    if coll.as_container().is_some_and(|c| c.size().is_some()) {
        return Ok(Value::from(count_of("bounded-count", coll)?));
    }
    let mut n = 0usize;
    for item in coll.iter()?.take(limit) {
        item?;
        n += 1;
    }
    Ok(Value::from(n))
}

// ============================================================================
// Building
// ============================================================================

/// Skip the first `n` successful items, passing errors through.
pub(crate) fn skip_ok(src: SeqIter, n: usize) -> SeqIter {
    let mut remaining = n;
    Box::new(src.filter(move |item| {
        if remaining > 0 && item.is_ok() {
            remaining -= 1;
            false
        } else {
            true
        }
    }))
}

/// (cons x coll)
pub fn builtin_cons(args: &[Value]) -> Result<Value> {
    arity("cons", args, 2)?;
    Ok(Value::Cons(Rc::new(Cons::new(args[0].clone(), args[1].clone()))))
}

/// (concat & colls)
pub fn builtin_concat(args: &[Value]) -> Result<Value> {
    let colls = args.to_vec();
    Ok(lazy_from(args, move || {
        Box::new(colls.clone().into_iter().flat_map(|c| c.seq_iter()))
    }))
}

/// (take n coll) - never pulls more than n elements
pub fn builtin_take(args: &[Value]) -> Result<Value> {
    arity("take", args, 2)?;
    let n = require_count("take", &args[0])?;
    let coll = args[1].clone();
    Ok(lazy_from(args, move || {
        if n == 0 {
            Box::new(std::iter::empty())
        } else {
            Box::new(coll.seq_iter().take(n))
        }
    }))
}

/// (drop n coll)
pub fn builtin_drop(args: &[Value]) -> Result<Value> {
    arity("drop", args, 2)?;
    let n = require_count("drop", &args[0])?;
    let coll = args[1].clone();
    Ok(lazy_from(args, move || skip_ok(coll.seq_iter(), n)))
}

fn take_while_iter(pred: Value, src: SeqIter) -> SeqIter {
    stop_after_error(Box::new(src.map_while(move |item| match item {
        Ok(x) => match truthy(&pred, &x) {
            Ok(true) => Some(Ok(x)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        },
        Err(e) => Some(Err(e)),
    })))
}

fn drop_while_iter(pred: Value, src: SeqIter) -> SeqIter {
    let mut dropping = true;
    Box::new(src.filter_map(move |item| match item {
        Ok(x) if dropping => match truthy(&pred, &x) {
            Ok(true) => None,
            Ok(false) => {
                dropping = false;
                Some(Ok(x))
            }
            Err(e) => Some(Err(e)),
        },
        other => Some(other),
    }))
}

/// (take-while pred coll)
pub fn builtin_take_while(args: &[Value]) -> Result<Value> {
    arity("take-while", args, 2)?;
    let (pred, coll) = (args[0].clone(), args[1].clone());
    Ok(lazy_from(args, move || take_while_iter(pred.clone(), coll.seq_iter())))
}

/// (drop-while pred coll)
pub fn builtin_drop_while(args: &[Value]) -> Result<Value> {
    arity("drop-while", args, 2)?;
    let (pred, coll) = (args[0].clone(), args[1].clone());
    Ok(lazy_from(args, move || drop_while_iter(pred.clone(), coll.seq_iter())))
}

/// (take-nth n coll) - every nth element; n <= 0 repeats the first forever
pub fn builtin_take_nth(args: &[Value]) -> Result<Value> {
    arity("take-nth", args, 2)?;
    let n = require_int("take-nth", &args[0])?;
    let coll = args[1].clone();
    Ok(lazy_from(args, move || {
        let n = match usize::try_from(n) {
            Ok(n) if n > 0 => n,
            _ => {
                return match first_of(&coll) {
                    Ok(x) => Box::new(std::iter::repeat(x).map(Ok)),
                    Err(e) => fail(e),
                };
            }
        };
        let mut i = 0usize;
        Box::new(coll.seq_iter().filter(move |item| {
            if item.is_err() {
                return true;
            }
            let keep = i % n == 0;
            i += 1;
            keep
        }))
    }))
}

/// (drop-last coll) or (drop-last n coll)
pub fn builtin_drop_last(args: &[Value]) -> Result<Value> {
    arity_range("drop-last", args, 1, 2)?;
    let (n, coll) = match args {
        [coll] => (1, coll.clone()),
        [n, coll, ..] => (require_count("drop-last", n)?, coll.clone()),
        [] => return Err(Error::arity_range("drop-last", 1, 2, 0)),
    };
    Ok(lazy_from(args, move || {
        let mut src = coll.seq_iter();
        let mut buffer: VecDeque<Value> = VecDeque::with_capacity(n + 1);
        Box::new(std::iter::from_fn(move || {
            loop {
                match src.next()? {
                    Ok(x) => {
                        buffer.push_back(x);
                        if buffer.len() > n {
                            return buffer.pop_front().map(Ok);
                        }
                    }
                    Err(e) => return Some(Err(e)),
                }
            }
        }))
    }))
}

/// (distinct coll) - first occurrence of each element, by equality
pub fn builtin_distinct(args: &[Value]) -> Result<Value> {
    arity("distinct", args, 1)?;
    let coll = args[0].clone();
    Ok(lazy_from(args, move || {
        let mut seen: HashSet<Value> = HashSet::new();
        Box::new(coll.seq_iter().filter(move |item| match item {
            Ok(x) => seen.insert(x.clone()),
            Err(_) => true,
        }))
    }))
}

// ============================================================================
// Partitioning
// ============================================================================

/// Sliding windows of `n` elements, starting every `step` elements.
struct Partitions {
    src: SeqIter,
    n: usize,
    step: usize,
    pad: Vec<Value>,
    all: bool,
    window: Vec<Value>,
    /// Position within the current step
    i: usize,
    done: bool,
}

impl Iterator for Partitions {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.src.next() {
                Some(Ok(x)) => {
                    let mut full = None;
                    if self.i < self.n {
                        self.window.push(x);
                        if self.window.len() == self.n {
                            let window = std::mem::take(&mut self.window);
                            if self.step < self.n {
                                self.window = window[self.step..].to_vec();
                            }
                            full = Some(window);
                        }
                    }
                    self.i += 1;
                    if self.i == self.step {
                        self.i = 0;
                    }
                    if let Some(window) = full {
                        return Some(Ok(Value::array(window)));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    let mut tail = std::mem::take(&mut self.window);
                    if tail.is_empty() {
                        return None;
                    }
                    if tail.len() == self.n || self.all {
                        return Some(Ok(Value::array(tail)));
                    }
                    if !self.pad.is_empty() {
                        let missing = self.n - tail.len();
                        tail.extend(self.pad.iter().take(missing).cloned());
                        return Some(Ok(Value::array(tail)));
                    }
                    return None;
                }
            }
        }
    }
}

fn positive(op: &'static str, what: &str, val: &Value) -> Result<usize> {
    let n = require_int(op, val)?;
    match usize::try_from(n) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::illegal(op, format!("{} must be positive, got {}", what, n))),
    }
}

fn partition_seq(args: &[Value], n: usize, step: usize, pad: Value, coll: Value, all: bool) -> Value {
    lazy_from(args, move || {
        let pad = match pad.to_vec() {
            Ok(pad) => pad,
            Err(e) => return fail(e),
        };
        Box::new(Partitions {
            src: coll.seq_iter(),
            n,
            step,
            pad,
            all,
            window: Vec::with_capacity(n),
            i: 0,
            done: false,
        })
    })
}

/// (partition n coll) (partition n step coll) (partition n step pad coll)
///
/// A short final window is dropped unless a pad is given; the pad may
/// itself be too short to fill the window.
pub fn builtin_partition(args: &[Value]) -> Result<Value> {
    arity_range("partition", args, 2, 4)?;
    let n = positive("partition", "size", &args[0])?;
    let (step, pad, coll) = match &args[1..] {
        [coll] => (n, Value::Nil, coll),
        [step, coll] => (positive("partition", "step", step)?, Value::Nil, coll),
        [step, pad, coll, ..] => (positive("partition", "step", step)?, pad.clone(), coll),
        [] => return Err(Error::arity_range("partition", 2, 4, args.len())),
    };
    Ok(partition_seq(args, n, step, pad, coll.clone(), false))
}

/// (partition-all n coll) (partition-all n step coll)
pub fn builtin_partition_all(args: &[Value]) -> Result<Value> {
    arity_range("partition-all", args, 2, 3)?;
    let n = positive("partition-all", "size", &args[0])?;
    let (step, coll) = match &args[1..] {
        [coll] => (n, coll),
        [step, coll, ..] => (positive("partition-all", "step", step)?, coll),
        [] => return Err(Error::arity_range("partition-all", 2, 3, args.len())),
    };
    Ok(partition_seq(args, n, step, Value::Nil, coll.clone(), true))
}

// ============================================================================
// Interleaving
// ============================================================================

/// Round-robin over several sources, stopping when any runs dry.
struct Interleave {
    iters: Vec<SeqIter>,
    pending: VecDeque<Value>,
    done: bool,
}

impl Iterator for Interleave {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(x) = self.pending.pop_front() {
            return Some(Ok(x));
        }
        if self.done || self.iters.is_empty() {
            return None;
        }
        for it in &mut self.iters {
            match it.next() {
                Some(Ok(x)) => self.pending.push_back(x),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    // A partial round is discarded
                    self.done = true;
                    self.pending.clear();
                    return None;
                }
            }
        }
        self.pending.pop_front().map(Ok)
    }
}

/// (interleave & colls)
pub fn builtin_interleave(args: &[Value]) -> Result<Value> {
    let colls = args.to_vec();
    Ok(lazy_from(args, move || {
        Box::new(Interleave {
            iters: colls.iter().map(Value::seq_iter).collect(),
            pending: VecDeque::new(),
            done: false,
        })
    }))
}

/// (interpose sep coll)
pub fn builtin_interpose(args: &[Value]) -> Result<Value> {
    arity("interpose", args, 2)?;
    let (sep, coll) = (args[0].clone(), args[1].clone());
    Ok(lazy_from(args, move || {
        let seps: SeqIter = Box::new(std::iter::repeat(sep.clone()).map(Ok));
        skip_ok(
            Box::new(Interleave {
                iters: vec![seps, coll.seq_iter()],
                pending: VecDeque::new(),
                done: false,
            }),
            1,
        )
    }))
}

// ============================================================================
// Splitting and reordering
// ============================================================================

/// (split-at n coll) - `[(take n coll) (drop n coll)]`
pub fn builtin_split_at(args: &[Value]) -> Result<Value> {
    arity("split-at", args, 2)?;
    Ok(Value::array([builtin_take(args)?, builtin_drop(args)?]))
}

/// (split-with pred coll) - `[(take-while pred coll) (drop-while pred coll)]`
pub fn builtin_split_with(args: &[Value]) -> Result<Value> {
    arity("split-with", args, 2)?;
    Ok(Value::array([
        builtin_take_while(args)?,
        builtin_drop_while(args)?,
    ]))
}

/// (reverse coll) - new array, input untouched
pub fn builtin_reverse(args: &[Value]) -> Result<Value> {
    arity("reverse", args, 1)?;
    let mut items = args[0].to_vec()?;
    items.reverse();
    Ok(Value::array(items))
}

/// (replace smap coll) - swap elements found as keys of smap
///
/// Arrays are replaced eagerly into a new array; other sources lazily.
pub fn builtin_replace(args: &[Value]) -> Result<Value> {
    arity("replace", args, 2)?;
    let smap = args[0].clone();
    let substitute = move |x: Value| lookup(&smap, &x).unwrap_or(x);
    if let Value::Array(_) = &args[1] {
        let items = args[1].to_vec()?;
        return Ok(Value::array(items.into_iter().map(substitute)));
    }
    let coll = args[1].clone();
    let substitute = Rc::new(substitute);
    Ok(lazy_from(args, move || {
        let substitute = Rc::clone(&substitute);
        Box::new(coll.seq_iter().map(move |item| item.map(|x| substitute(x))))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::int(n)
    }

    fn ints(ns: &[i64]) -> Value {
        Value::array(ns.iter().map(|n| int(*n)))
    }

    #[test]
    fn test_partition_step() {
        let p = builtin_partition(&[int(3), int(2), ints(&[1, 2, 3, 4, 5])]).unwrap();
        assert_eq!(
            p.to_vec().unwrap(),
            vec![ints(&[1, 2, 3]), ints(&[3, 4, 5])]
        );
    }

    #[test]
    fn test_partition_partial_pad() {
        let p = builtin_partition(&[int(3), int(3), ints(&[9]), ints(&[1, 2, 3, 4])]).unwrap();
        assert_eq!(p.to_vec().unwrap(), vec![ints(&[1, 2, 3]), ints(&[4, 9])]);
    }

    #[test]
    fn test_partition_rejects_zero_size() {
        assert!(builtin_partition(&[int(0), ints(&[1])]).is_err());
    }

    #[test]
    fn test_interleave_stops_at_shortest() {
        let s = builtin_interleave(&[ints(&[1, 2, 3]), ints(&[10, 20])]).unwrap();
        assert_eq!(s.to_vec().unwrap(), ints(&[1, 10, 2, 20]).to_vec().unwrap());
    }

    #[test]
    fn test_drop_last() {
        let s = builtin_drop_last(&[int(2), ints(&[1, 2, 3, 4])]).unwrap();
        assert_eq!(s.to_vec().unwrap(), vec![int(1), int(2)]);
    }
}
