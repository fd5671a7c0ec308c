// tessel-value - Atoms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Mutable single-value cells with change notification.

// Value keys may hold interior-mutable containers
#![allow(clippy::mutable_key_type)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::function::NativeFn;
use crate::value::Value;

struct AtomInner {
    value: RefCell<Value>,
    /// Watch key -> callback, notified in insertion order
    watches: RefCell<IndexMap<Value, NativeFn>>,
}

/// An atom holding one value at a time.
///
/// Every replacement through [`Atom::reset`] or [`Atom::swap`] calls each
/// watch synchronously with `(key, atom, old, new)`.
#[derive(Clone)]
pub struct Atom(Rc<AtomInner>);

impl Atom {
    pub fn new(value: Value) -> Self {
        Atom(Rc::new(AtomInner {
            value: RefCell::new(value),
            watches: RefCell::new(IndexMap::new()),
        }))
    }

    /// Current value.
    pub fn deref(&self) -> Value {
        self.0.value.borrow().clone()
    }

    /// Replace the value, notify watches, and return the new value.
    ///
    /// The value stays replaced even when a watch fails; the first watch
    /// error is returned and later watches are skipped.
    pub fn reset(&self, new_val: Value) -> Result<Value> {
        let old_val = self.0.value.replace(new_val.clone());
        let watches: Vec<(Value, NativeFn)> = self
            .0
            .watches
            .borrow()
            .iter()
            .map(|(k, f)| (k.clone(), f.clone()))
            .collect();
        if !watches.is_empty() {
            tracing::trace!(target: "tessel::atom", watches = watches.len(), "notifying watches");
        }
        for (key, watch) in watches {
            watch.call(&[key, Value::Atom(self.clone()), old_val.clone(), new_val.clone()])?;
        }
        Ok(new_val)
    }

    /// Replace the value with `f(current)`.
    pub fn swap<F>(&self, f: F) -> Result<Value>
    where
        F: FnOnce(Value) -> Result<Value>,
    {
        let new_val = f(self.deref())?;
        self.reset(new_val)
    }

    pub fn add_watch(&self, key: Value, f: NativeFn) {
        self.0.watches.borrow_mut().insert(key, f);
    }

    pub fn remove_watch(&self, key: &Value) {
        self.0.watches.borrow_mut().shift_remove(key);
    }

    pub fn watch_count(&self) -> usize {
        self.0.watches.borrow().len()
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<atom {}>", self.0.value.borrow())
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        // Atoms are equal if they are the same cell
        Rc::ptr_eq(&self.0, &other.0)
    }
}
