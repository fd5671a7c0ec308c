// tessel-core - Atom built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Atom operations: atom, deref, reset!, swap!, add-watch, remove-watch

use tessel_value::{Atom, Error, Result, Value};

use super::{arity, arity_at_least};
use crate::apply::{apply, require_fn};

fn require_atom<'a>(name: &'static str, val: &'a Value) -> Result<&'a Atom> {
    match val {
        Value::Atom(a) => Ok(a),
        other => Err(Error::type_error_in(name, "atom", other.type_name())),
    }
}

/// (atom x)
pub fn builtin_atom(args: &[Value]) -> Result<Value> {
    arity("atom", args, 1)?;
    Ok(Value::Atom(Atom::new(args[0].clone())))
}

/// (deref atom) - current value; reduced values are unwrapped too
pub fn builtin_deref(args: &[Value]) -> Result<Value> {
    arity("deref", args, 1)?;
    match &args[0] {
        Value::Atom(a) => Ok(a.deref()),
        Value::Reduced(inner) => Ok((**inner).clone()),
        other => Err(Error::type_error_in("deref", "atom", other.type_name())),
    }
}

/// (reset! atom new-val) - returns new-val
pub fn builtin_reset(args: &[Value]) -> Result<Value> {
    arity("reset!", args, 2)?;
    require_atom("reset!", &args[0])?.reset(args[1].clone())
}

/// (swap! atom f & args) - set to `(f current args...)`, returning it
pub fn builtin_swap(args: &[Value]) -> Result<Value> {
    arity_at_least("swap!", args, 2)?;
    let atom = require_atom("swap!", &args[0])?;
    let f = &args[1];
    atom.swap(|current| {
        let mut call_args = vec![current];
        call_args.extend_from_slice(&args[2..]);
        apply(f, &call_args)
    })
}

/// (add-watch atom key f) - f is called as `(f key atom old new)`
pub fn builtin_add_watch(args: &[Value]) -> Result<Value> {
    arity("add-watch", args, 3)?;
    let atom = require_atom("add-watch", &args[0])?;
    let f = require_fn("add-watch", &args[2])?;
    atom.add_watch(args[1].clone(), f);
    Ok(args[0].clone())
}

/// (remove-watch atom key)
pub fn builtin_remove_watch(args: &[Value]) -> Result<Value> {
    arity("remove-watch", args, 2)?;
    require_atom("remove-watch", &args[0])?.remove_watch(&args[1]);
    Ok(args[0].clone())
}
