// tessel-core - Lazy sequence sources
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Source constructors: lazy, lazy-seq, range, iterate, repeat, repeatedly,
//! cycle. Realization: doall, dorun.
//!
//! Each source has a `*_with` form taking the [`SeqOptions`] to stamp on the
//! new sequence. The registry binds those forms to its own options; the
//! plain `builtin_*` forms use the defaults.

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use tessel_value::lazy::fail;
use tessel_value::{Error, LazySeq, Result, SeqIter, SeqOptions, Value};

use super::{arity, arity_range, require_count};
use crate::apply::apply;

fn source<F>(options: SeqOptions, generator: F) -> Value
where
    F: Fn() -> SeqIter + 'static,
{
    Value::Lazy(LazySeq::with_options(options, generator))
}

// ============================================================================
// Thunks
// ============================================================================

/// (lazy f) - traverse `(f)` afresh on every walk
pub fn lazy_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity("lazy", args, 1)?;
    let f = args[0].clone();
    Ok(source(options, move || match apply(&f, &[]) {
        Ok(coll) => coll.seq_iter(),
        Err(e) => fail(e),
    }))
}

pub fn builtin_lazy(args: &[Value]) -> Result<Value> {
    lazy_with(SeqOptions::default(), args)
}

/// (lazy-seq f) - call `f` once, on first traversal, and keep its result
///
/// A failing `f` is not cached; the next traversal calls it again.
pub fn lazy_seq_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity("lazy-seq", args, 1)?;
    let f = args[0].clone();
    let realized: Rc<OnceCell<Value>> = Rc::new(OnceCell::new());
    Ok(source(options, move || {
        if let Some(coll) = realized.get() {
            return coll.seq_iter();
        }
        match apply(&f, &[]) {
            Ok(coll) => realized.get_or_init(|| coll).seq_iter(),
            Err(e) => fail(e),
        }
    }))
}

pub fn builtin_lazy_seq(args: &[Value]) -> Result<Value> {
    lazy_seq_with(SeqOptions::default(), args)
}

// ============================================================================
// range
// ============================================================================

fn int_range(start: i64, end: Option<i64>, step: i64) -> SeqIter {
    let mut next = Some(start);
    Box::new(std::iter::from_fn(move || {
        let cur = next?;
        if let Some(end) = end
            && ((step > 0 && cur >= end) || (step < 0 && cur <= end))
        {
            return None;
        }
        next = cur.checked_add(step);
        Some(Ok(Value::int(cur)))
    }))
}

fn float_range(start: f64, end: Option<f64>, step: f64) -> SeqIter {
    let mut cur = start;
    Box::new(std::iter::from_fn(move || {
        if let Some(end) = end
            && ((step > 0.0 && cur >= end) || (step < 0.0 && cur <= end))
        {
            return None;
        }
        let out = cur;
        cur += step;
        Some(Ok(Value::float(out)))
    }))
}

/// (range) (range end) (range start end) (range start end step)
///
/// End is exclusive. A zero step is taken as 1 and a negative step counts
/// down. Any float argument makes the whole range float.
pub fn range_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity_range("range", args, 0, 3)?;
    for arg in args {
        if !arg.is_number() {
            return Err(Error::type_error_in("range", "number", arg.type_name()));
        }
    }

    if args.iter().all(|a| matches!(a, Value::Int(_))) {
        let ints: Vec<i64> = args.iter().filter_map(Value::as_int).collect();
        let (start, end, step) = match ints.as_slice() {
            [] => (0, None, 1),
            [end] => (0, Some(*end), 1),
            [start, end] => (*start, Some(*end), 1),
            [start, end, step, ..] => (*start, Some(*end), *step),
        };
        let step = if step == 0 { 1 } else { step };
        return Ok(source(options, move || int_range(start, end, step)));
    }

    let floats: Vec<f64> = args.iter().filter_map(Value::as_f64).collect();
    let (start, end, step) = match floats.as_slice() {
        [] => (0.0, None, 1.0),
        [end] => (0.0, Some(*end), 1.0),
        [start, end] => (*start, Some(*end), 1.0),
        [start, end, step, ..] => (*start, Some(*end), *step),
    };
    let step = if step == 0.0 { 1.0 } else { step };
    Ok(source(options, move || float_range(start, end, step)))
}

pub fn builtin_range(args: &[Value]) -> Result<Value> {
    range_with(SeqOptions::default(), args)
}

// ============================================================================
// Generators
// ============================================================================

/// (iterate f x) - x, (f x), (f (f x)), ...
///
/// Every traversal restarts from x and calls f only when the next element
/// is pulled.
pub fn iterate_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity("iterate", args, 2)?;
    let (f, seed) = (args[0].clone(), args[1].clone());
    Ok(source(options, move || {
        let f = f.clone();
        let seed = seed.clone();
        let mut last: Option<Value> = None;
        let mut failed = false;
        Box::new(std::iter::from_fn(move || {
            if failed {
                return None;
            }
            let next = match last.take() {
                None => Ok(seed.clone()),
                Some(prev) => apply(&f, &[prev]),
            };
            match next {
                Ok(v) => {
                    last = Some(v.clone());
                    Some(Ok(v))
                }
                Err(e) => {
                    failed = true;
                    Some(Err(e))
                }
            }
        }))
    }))
}

pub fn builtin_iterate(args: &[Value]) -> Result<Value> {
    iterate_with(SeqOptions::default(), args)
}

/// (repeat x) or (repeat n x)
pub fn repeat_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity_range("repeat", args, 1, 2)?;
    match args {
        [x] => {
            let x = x.clone();
            Ok(source(options, move || {
                Box::new(std::iter::repeat(x.clone()).map(Ok))
            }))
        }
        [n, x, ..] => {
            let n = require_count("repeat", n)?;
            let x = x.clone();
            Ok(source(options, move || {
                Box::new(std::iter::repeat_n(x.clone(), n).map(Ok))
            }))
        }
        [] => Err(Error::arity_range("repeat", 1, 2, 0)),
    }
}

pub fn builtin_repeat(args: &[Value]) -> Result<Value> {
    repeat_with(SeqOptions::default(), args)
}

/// (repeatedly f) or (repeatedly n f) - call f for every element pulled
pub fn repeatedly_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity_range("repeatedly", args, 1, 2)?;
    let (limit, f) = match args {
        [f] => (None, f.clone()),
        [n, f, ..] => (Some(require_count("repeatedly", n)?), f.clone()),
        [] => return Err(Error::arity_range("repeatedly", 1, 2, 0)),
    };
    Ok(source(options, move || {
        let f = f.clone();
        let calls = std::iter::repeat_with(move || apply(&f, &[]));
        match limit {
            Some(n) => Box::new(calls.take(n)),
            None => Box::new(calls),
        }
    }))
}

pub fn builtin_repeatedly(args: &[Value]) -> Result<Value> {
    repeatedly_with(SeqOptions::default(), args)
}

/// (cycle coll) - the elements of coll, over and over
///
/// The source is walked once per traversal and buffered; an empty source
/// gives an empty sequence.
pub fn cycle_with(options: SeqOptions, args: &[Value]) -> Result<Value> {
    arity("cycle", args, 1)?;
    let coll = args[0].clone();
    Ok(source(options, move || {
        let mut first_pass = Some(coll.seq_iter());
        let mut seen: Vec<Value> = Vec::new();
        let mut pos = 0usize;
        Box::new(std::iter::from_fn(move || {
            if let Some(src) = first_pass.as_mut() {
                match src.next() {
                    Some(Ok(x)) => {
                        seen.push(x.clone());
                        return Some(Ok(x));
                    }
                    Some(Err(e)) => {
                        first_pass = None;
                        seen.clear();
                        return Some(Err(e));
                    }
                    None => first_pass = None,
                }
            }
            if seen.is_empty() {
                return None;
            }
            let x = seen[pos % seen.len()].clone();
            pos += 1;
            Some(Ok(x))
        }))
    }))
}

pub fn builtin_cycle(args: &[Value]) -> Result<Value> {
    cycle_with(SeqOptions::default(), args)
}

// ============================================================================
// Realization
// ============================================================================

/// (doall coll) - realize into an array
pub fn builtin_doall(args: &[Value]) -> Result<Value> {
    arity("doall", args, 1)?;
    Ok(Value::array(args[0].to_vec()?))
}

/// (dorun coll) - walk for side effects, returning nil
pub fn builtin_dorun(args: &[Value]) -> Result<Value> {
    arity("dorun", args, 1)?;
    for item in args[0].iter()? {
        item?;
    }
    Ok(Value::Nil)
}

/// (warn-on-lazy-reusage!) or (warn-on-lazy-reusage! on?)
///
/// Switches reuse warnings for sources created through the registry that
/// owns `options` from now on.
pub fn warn_on_lazy_reusage(options: &Cell<SeqOptions>, args: &[Value]) -> Result<Value> {
    arity_range("warn-on-lazy-reusage!", args, 0, 1)?;
    let on = args.first().is_none_or(Value::is_truthy);
    options.set(options.get().with_reuse_warning(on));
    Ok(Value::Bool(on))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Value {
        Value::int(n)
    }

    fn first_n(seq: &Value, n: usize) -> Vec<Value> {
        seq.seq_iter().take(n).collect::<Result<_>>().unwrap()
    }

    #[test]
    fn test_range_negative_step() {
        let r = builtin_range(&[int(5), int(0), int(-2)]).unwrap();
        assert_eq!(r.to_vec().unwrap(), vec![int(5), int(3), int(1)]);
    }

    #[test]
    fn test_range_zero_step_counts_up() {
        let r = builtin_range(&[int(0), int(3), int(0)]).unwrap();
        assert_eq!(r.to_vec().unwrap(), vec![int(0), int(1), int(2)]);
    }

    #[test]
    fn test_range_float() {
        let r = builtin_range(&[Value::float(0.5), int(2)]).unwrap();
        assert_eq!(
            r.to_vec().unwrap(),
            vec![Value::float(0.5), Value::float(1.5)]
        );
    }

    #[test]
    fn test_repeat_arity() {
        assert!(builtin_repeat(&[]).is_err());
        assert!(builtin_repeat(&[int(1), int(2), int(3)]).is_err());
        let r = builtin_repeat(&[int(2), Value::string("x")]).unwrap();
        assert_eq!(r.to_vec().unwrap().len(), 2);
    }

    #[test]
    fn test_cycle_empty_ends() {
        let c = builtin_cycle(&[Value::array([])]).unwrap();
        assert!(c.to_vec().unwrap().is_empty());
    }

    #[test]
    fn test_cycle_repeats() {
        let c = builtin_cycle(&[Value::array([int(1), int(2)])]).unwrap();
        assert_eq!(first_n(&c, 5), vec![int(1), int(2), int(1), int(2), int(1)]);
    }

    #[test]
    fn test_lazy_seq_calls_thunk_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let thunk = Value::func("thunk", move |_| {
            counter.set(counter.get() + 1);
            Ok(Value::array([int(1)]))
        });
        let s = builtin_lazy_seq(&[thunk]).unwrap();
        s.to_vec().unwrap();
        s.to_vec().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_warn_switch() {
        let options = Cell::new(SeqOptions::default());
        warn_on_lazy_reusage(&options, &[]).unwrap();
        assert!(options.get().warn_on_reuse);
        warn_on_lazy_reusage(&options, &[Value::Bool(false)]).unwrap();
        assert!(!options.get().warn_on_reuse);
    }
}
