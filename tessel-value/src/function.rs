// tessel-value - Native function values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Callable values.
//!
//! Every function in Tessel is a native Rust closure taking a slice of
//! arguments. Higher-order operations (`comp`, `partial`, `fnil`...) build
//! new closures over existing `NativeFn`s.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::value::Value;

/// Type of the function wrapped by a [`NativeFn`].
pub type NativeFnImpl = dyn Fn(&[Value]) -> Result<Value>;

/// A named, reference-counted native function.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name for display
    name: &'static str,
    func: Rc<NativeFnImpl>,
}

impl NativeFn {
    pub fn new<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        NativeFn {
            name,
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }

    pub fn ptr_eq(&self, other: &NativeFn) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.func), Rc::as_ptr(&other.func))
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.func) as *const () as usize
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<fn {}>", self.name)
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}
