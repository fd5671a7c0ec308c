// tessel-value - Lazy sequences and iteration
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Pull-based iteration over every seqable value.
//!
//! A [`LazySeq`] owns a generator: a zero-argument closure returning a fresh
//! [`SeqIter`]. Each traversal calls the generator again, so a sequence built
//! from pure generators can be walked any number of times with identical
//! results. Nothing is cached between traversals.
//!
//! ```ignore
//! let nats = LazySeq::new(|| Box::new((0..).map(|n| Ok(Value::int(n)))));
//! let first: Vec<Value> = nats.iter().take(3).collect::<Result<_>>()?;
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::cells::{Entries, Items, Members, Props, Shared};
use crate::error::{Error, Result};
use crate::value::Value;

/// A fallible, boxed iterator over values.
///
/// Errors raised while producing an element (usually by a user callback)
/// are yielded as `Err` items and end the traversal for well-behaved
/// consumers.
pub type SeqIter = Box<dyn Iterator<Item = Result<Value>>>;

/// Generator behind a [`LazySeq`].
pub type SeqGen = dyn Fn() -> SeqIter;

/// An iterator that yields `err` once.
pub fn fail(err: Error) -> SeqIter {
    Box::new(std::iter::once(Err(err)))
}

/// An iterator over already-computed values.
pub fn from_values(values: Vec<Value>) -> SeqIter {
    Box::new(values.into_iter().map(Ok))
}

// ============================================================================
// Options
// ============================================================================

/// Per-sequence diagnostics settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeqOptions {
    /// Emit a warning each time a sequence is traversed more than once.
    pub warn_on_reuse: bool,
}

impl SeqOptions {
    pub fn with_reuse_warning(mut self, on: bool) -> Self {
        self.warn_on_reuse = on;
        self
    }
}

// ============================================================================
// LazySeq
// ============================================================================

struct LazyInner {
    generator: Box<SeqGen>,
    usages: Cell<usize>,
    options: SeqOptions,
}

/// A restartable lazy sequence.
#[derive(Clone)]
pub struct LazySeq(Rc<LazyInner>);

impl LazySeq {
    /// Create a lazy sequence with default options.
    pub fn new<F>(generator: F) -> Self
    where
        F: Fn() -> SeqIter + 'static,
    {
        Self::with_options(SeqOptions::default(), generator)
    }

    pub fn with_options<F>(options: SeqOptions, generator: F) -> Self
    where
        F: Fn() -> SeqIter + 'static,
    {
        LazySeq(Rc::new(LazyInner {
            generator: Box::new(generator),
            usages: Cell::new(0),
            options,
        }))
    }

    /// A sequence with no elements.
    pub fn empty() -> Self {
        Self::new(|| Box::new(std::iter::empty()))
    }

    /// Start a new traversal.
    pub fn iter(&self) -> SeqIter {
        let usages = self.0.usages.get() + 1;
        self.0.usages.set(usages);
        if usages > 1 && self.0.options.warn_on_reuse {
            tracing::warn!(
                target: "tessel::lazy",
                usages,
                "lazy sequence traversed more than once; its generator runs again"
            );
        }
        (self.0.generator)()
    }

    /// Number of traversals started so far.
    pub fn usages(&self) -> usize {
        self.0.usages.get()
    }

    pub fn options(&self) -> SeqOptions {
        self.0.options
    }

    pub fn ptr_eq(&self, other: &LazySeq) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for LazySeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<lazy-seq usages={}>", self.usages())
    }
}

// ============================================================================
// Cons
// ============================================================================

/// An immutable head/tail pair.
pub struct Cons {
    head: Value,
    tail: Value,
}

impl Cons {
    pub fn new(head: Value, tail: Value) -> Self {
        Cons { head, tail }
    }

    pub fn head(&self) -> &Value {
        &self.head
    }

    pub fn tail(&self) -> &Value {
        &self.tail
    }

    /// The head followed by the elements of the tail.
    pub fn iter(&self) -> SeqIter {
        Box::new(std::iter::once(Ok(self.head.clone())).chain(self.tail.seq_iter()))
    }
}

// ============================================================================
// Iteration over values
// ============================================================================

/// Walk a cell by position, re-borrowing for every element so callers may
/// mutate the container between pulls.
fn walk<T, F>(cell: Shared<T>, at: F) -> SeqIter
where
    T: Clone + 'static,
    F: Fn(&T, usize) -> Option<Value> + 'static,
{
    let mut index = 0;
    Box::new(std::iter::from_fn(move || {
        let item = at(&cell.borrow(), index);
        index += 1;
        item.map(Ok)
    }))
}

fn pair(k: Value, v: Value) -> Value {
    Value::array([k, v])
}

impl Value {
    /// Start a traversal of a seqable value.
    ///
    /// `nil` is empty, strings yield one-character strings, maps and objects
    /// yield `[key value]` arrays. Scalars are not seqable.
    pub fn iter(&self) -> Result<SeqIter> {
        Ok(match self {
            Value::Nil => Box::new(std::iter::empty()),
            Value::String(s) => {
                let chars: Vec<Value> = s.chars().map(|c| Value::string(c.to_string())).collect();
                from_values(chars)
            }
            Value::Array(cell) => walk((**cell).clone(), |items: &Items, i| items.get(i).cloned()),
            Value::List(cell) => walk((**cell).clone(), |items: &Items, i| items.get(i).cloned()),
            Value::Object(cell) => walk((**cell).clone(), |props: &Props, i| {
                props
                    .get_index(i)
                    .map(|(k, v)| pair(Value::String(k.clone()), v.clone()))
            }),
            Value::Map(cell) => walk((**cell).clone(), |entries: &Entries, i| {
                entries.get_index(i).map(|(k, v)| pair(k.clone(), v.clone()))
            }),
            Value::Set(cell) => walk((**cell).clone(), |members: &Members, i| {
                members.get_index(i).cloned()
            }),
            Value::Lazy(seq) => seq.iter(),
            Value::Cons(cell) => cell.iter(),
            other => {
                return Err(Error::type_error_in(
                    "seq",
                    "seqable collection",
                    other.type_name(),
                ));
            }
        })
    }

    /// Like [`Value::iter`], reporting a non-seqable value as the first item.
    pub fn seq_iter(&self) -> SeqIter {
        self.iter().unwrap_or_else(fail)
    }

    /// Whether [`Value::iter`] accepts this value.
    pub fn is_seqable(&self) -> bool {
        matches!(
            self,
            Value::Nil
                | Value::String(_)
                | Value::Array(_)
                | Value::List(_)
                | Value::Object(_)
                | Value::Map(_)
                | Value::Set(_)
                | Value::Lazy(_)
                | Value::Cons(_)
        )
    }

    /// Realize every element into a vector.
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        self.iter()?.collect()
    }
}
