// tessel-value - Mutable container cells
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared, interior-mutable storage behind every container value.
//!
//! Cloning a [`Value`] that holds a container clones the handle, so two
//! values can observe the same mutation. Copy-on-write operations call
//! [`Shared::fork`] to get a fresh handle over a shallow copy of the payload.
//!
//! Metadata is fixed when a cell is created; `with-meta` produces a new cell.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::Deref;
use std::rc::Rc;

use im::Vector;
use indexmap::{IndexMap, IndexSet};

use crate::value::Value;

/// Payload of arrays and lists.
pub type Items = Vector<Value>;
/// Payload of objects: string keys in insertion order.
pub type Props = IndexMap<Rc<str>, Value>;
/// Payload of maps: arbitrary keys in insertion order.
pub type Entries = IndexMap<Value, Value>;
/// Payload of sets: unique members in insertion order.
pub type Members = IndexSet<Value>;

struct Slot<T> {
    data: RefCell<T>,
    meta: Option<Value>,
}

/// A reference-counted container payload with optional metadata.
pub struct Shared<T>(Rc<Slot<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<T: Clone> Shared<T> {
    pub fn new(data: T) -> Self {
        Self::with_meta(data, None)
    }

    pub fn with_meta(data: T, meta: Option<Value>) -> Self {
        Shared(Rc::new(Slot {
            data: RefCell::new(data),
            meta,
        }))
    }

    /// Shallow copy of the payload in a new cell, without metadata.
    pub fn fork(&self) -> Self {
        Self::new(self.snapshot())
    }

    /// Shallow copy of the payload in a new cell carrying `meta`.
    pub fn fork_with_meta(&self, meta: Option<Value>) -> Self {
        Self::with_meta(self.snapshot(), meta)
    }

    /// Clone of the current payload.
    pub fn snapshot(&self) -> T {
        self.0.data.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.data.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.data.borrow_mut()
    }

    /// Shared borrow, or `None` while the payload is being mutated.
    pub fn try_borrow(&self) -> Option<Ref<'_, T>> {
        self.0.data.try_borrow().ok()
    }

    pub fn meta(&self) -> Option<&Value> {
        self.0.meta.as_ref()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

macro_rules! container_cell {
    ($(#[$doc:meta])* $name:ident, $payload:ty) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name(Shared<$payload>);

        impl $name {
            pub fn new(data: $payload) -> Self {
                $name(Shared::new(data))
            }

            pub fn with_meta(data: $payload, meta: Option<Value>) -> Self {
                $name(Shared::with_meta(data, meta))
            }

            /// Shallow copy in a new cell, dropping metadata.
            pub fn fork(&self) -> Self {
                $name(self.0.fork())
            }

            /// Shallow copy in a new cell carrying `meta`.
            pub fn fork_with_meta(&self, meta: Option<Value>) -> Self {
                $name(self.0.fork_with_meta(meta))
            }
        }

        impl Deref for $name {
            type Target = Shared<$payload>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<$payload> for $name {
            fn from(data: $payload) -> Self {
                $name::new(data)
            }
        }
    };
}

container_cell!(
    /// Growable, index-addressed sequence.
    ArrayCell,
    Items
);
container_cell!(
    /// Array flavour that `conj` grows at the front.
    ListCell,
    Items
);
container_cell!(
    /// String-keyed record.
    ObjectCell,
    Props
);
container_cell!(
    /// Arbitrary-key associative container.
    MapCell,
    Entries
);
container_cell!(
    /// Container of unique members.
    SetCell,
    Members
);

impl ArrayCell {
    /// Element at `index`, if present.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.borrow().is_empty()
    }

    pub fn push(&self, item: Value) {
        self.borrow_mut().push_back(item);
    }
}

impl ListCell {
    pub fn get(&self, index: usize) -> Option<Value> {
        self.borrow().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.borrow().is_empty()
    }
}
