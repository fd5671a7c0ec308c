// tessel-core - Function registry
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Name-keyed access to the function surface.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tessel_value::{Error, Result, SeqOptions, Value};

use crate::apply::{apply, make_native_fn};
use crate::builtins::register_builtins;
use crate::config::Options;

/// A table from collection-model names (`"assoc!"`, `"string/join"`) to
/// function values.
///
/// # Examples
///
/// ```
/// use tessel_core::{Registry, Value};
///
/// let registry = Registry::new();
/// let v = registry
///     .call("conj", &[Value::array([Value::int(1)]), Value::int(2)])
///     .unwrap();
/// assert_eq!(v, Value::array([Value::int(1), Value::int(2)]));
/// ```
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RefCell<HashMap<String, Value>>>,
    /// Shared with source constructors registered by this registry
    seq_options: Rc<Cell<SeqOptions>>,
}

impl Registry {
    /// Create a registry holding every builtin, with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a registry holding every builtin.
    pub fn with_options(options: Options) -> Self {
        let registry = Self::empty(options);
        register_builtins(&registry);
        tracing::debug!(
            target: "tessel::registry",
            builtins = registry.len(),
            "registered builtins"
        );
        registry
    }

    /// Create a registry with no functions.
    pub fn empty(options: Options) -> Self {
        Registry {
            inner: Rc::new(RefCell::new(HashMap::new())),
            seq_options: Rc::new(Cell::new(options.lazy)),
        }
    }

    /// Bind `name` to a value.
    pub fn define(&self, name: impl Into<String>, val: Value) {
        self.inner.borrow_mut().insert(name.into(), val);
    }

    /// Bind `name` to a native function.
    pub fn define_native<F>(&self, name: &'static str, f: F)
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        self.define(name, make_native_fn(name, f));
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.borrow().contains_key(name)
    }

    /// Call the function bound to `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let func = self
            .lookup(name)
            .ok_or_else(|| Error::UndefinedFunction(name.to_string()))?;
        apply(&func, args)
    }

    /// Every bound name, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Options given to lazy sequences created through this registry.
    pub fn seq_options(&self) -> SeqOptions {
        self.seq_options.get()
    }

    pub fn set_seq_options(&self, options: SeqOptions) {
        self.seq_options.set(options);
    }

    pub(crate) fn seq_options_handle(&self) -> Rc<Cell<SeqOptions>> {
        Rc::clone(&self.seq_options)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
