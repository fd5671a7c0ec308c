// tessel-value - Container kinds and dispatch
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Container classification and the per-kind operation table.
//!
//! Every value is either one of the [`Kind`]s below or "none" (nil, scalars,
//! functions, atoms). Generic collection functions ask a value for its
//! [`Container`] implementation and never inspect the concrete variant.
//!
//! | Kind     | store            | absorb (`conj!`)        | remove | has         |
//! |----------|------------------|-------------------------|--------|-------------|
//! | `Array`  | index, pads      | push back               | -      | index range |
//! | `List`   | -                | push front              | -      | index range |
//! | `Object` | property key     | `[k v]` pair or entries | key    | key         |
//! | `Map`    | any key          | `[k v]` pair or entries | key    | key         |
//! | `Set`    | -                | insert                  | member | member      |
//! | `Lazy`   | -                | -                       | -      | never       |

// Value keys may hold interior-mutable containers
#![allow(clippy::mutable_key_type)]

use std::fmt;

use crate::cells::{ArrayCell, Entries, Items, ListCell, MapCell, Members, ObjectCell, Props, SetCell};
use crate::error::{Error, Result};
use crate::lazy::{Cons, LazySeq};
use crate::value::{Value, property_key};

/// Closed set of container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Map,
    Array,
    Object,
    List,
    Set,
    Lazy,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Map => "map",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::List => "list",
            Kind::Set => "set",
            Kind::Lazy => "lazy-seq",
        }
    }

    /// A fresh, empty container of this kind.
    pub fn empty(self) -> Value {
        match self {
            Kind::Map => Value::Map(MapCell::new(Entries::new())),
            Kind::Array => Value::Array(ArrayCell::new(Items::new())),
            Kind::Object => Value::Object(ObjectCell::new(Props::new())),
            Kind::List => Value::List(ListCell::new(Items::new())),
            Kind::Set => Value::Set(SetCell::new(Members::new())),
            Kind::Lazy => Value::Lazy(LazySeq::empty()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations every container kind provides.
///
/// Mutating methods work in place through the shared cell; copy-on-write
/// callers pair them with [`Container::shallow_copy`].
pub trait Container {
    fn kind(&self) -> Kind;

    /// A fresh, empty container of the same kind.
    fn empty(&self) -> Value {
        self.kind().empty()
    }

    /// New container of the same kind holding the same entries.
    fn shallow_copy(&self) -> Result<Value>;

    /// Value stored under `key`. Sets answer with the member itself.
    fn lookup(&self, key: &Value) -> Option<Value>;

    /// Set `key` to `val` in place.
    fn store(&self, _key: Value, _val: Value) -> Result<()> {
        Err(unsupported("assoc", self.kind()))
    }

    /// Merge one incoming item in place (the `conj!` step).
    fn absorb(&self, _item: Value) -> Result<()> {
        Err(unsupported("conj!", self.kind()))
    }

    /// Remove `key` (or member) in place.
    fn remove(&self, _key: &Value) -> Result<()> {
        Err(unsupported("dissoc", self.kind()))
    }

    fn has(&self, key: &Value) -> bool;

    /// Number of entries, or `None` when counting requires a walk.
    fn size(&self) -> Option<usize>;
}

fn unsupported(op: &'static str, kind: Kind) -> Error {
    Error::illegal(op, format!("not supported on {}", kind))
}

/// Largest run of nil holes an index store past the end may create.
pub const MAX_ARRAY_GAP: usize = 1 << 16;

/// Non-negative integral index, if `key` is one.
pub fn index_key(key: &Value) -> Option<usize> {
    match key.as_int() {
        Some(n) if n >= 0 => usize::try_from(n).ok(),
        _ => None,
    }
}

/// Split an absorbed map entry `[k v]` into its parts.
fn entry_parts(entry: &Value) -> Result<(Value, Value)> {
    match entry {
        Value::Array(cell) => Ok((
            cell.get(0).unwrap_or(Value::Nil),
            cell.get(1).unwrap_or(Value::Nil),
        )),
        Value::List(cell) => Ok((
            cell.get(0).unwrap_or(Value::Nil),
            cell.get(1).unwrap_or(Value::Nil),
        )),
        other => Err(Error::type_error_in(
            "conj!",
            "[key value] entry",
            other.type_name(),
        )),
    }
}

/// Feed `item` to `put` as entries: an array or list is one `[k v]` pair, anything
/// else is walked as a sequence of pairs.
fn absorb_entries(item: Value, mut put: impl FnMut(Value, Value) -> Result<()>) -> Result<()> {
    if let Value::Array(_) | Value::List(_) = item {
        let (k, v) = entry_parts(&item)?;
        return put(k, v);
    }
    for entry in item.iter()? {
        let (k, v) = entry_parts(&entry?)?;
        put(k, v)?;
    }
    Ok(())
}

// ============================================================================
// Implementations
// ============================================================================

impl Container for ArrayCell {
    fn kind(&self) -> Kind {
        Kind::Array
    }

    fn shallow_copy(&self) -> Result<Value> {
        Ok(Value::Array(self.fork()))
    }

    fn lookup(&self, key: &Value) -> Option<Value> {
        index_key(key).and_then(|i| self.get(i))
    }

    fn store(&self, key: Value, val: Value) -> Result<()> {
        let index = match key {
            Value::Int(n) if n < 0 => {
                return Err(Error::IndexOutOfBounds {
                    index: n,
                    length: self.len(),
                });
            }
            other => index_key(&other).ok_or_else(|| {
                Error::type_error_in("assoc", "non-negative integer index", other.type_name())
            })?,
        };
        let mut items = self.borrow_mut();
        if index > items.len().saturating_add(MAX_ARRAY_GAP) {
            return Err(Error::IndexOutOfBounds {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                length: items.len(),
            });
        }
        if index < items.len() {
            items.set(index, val);
        } else {
            // Sparse stores leave nil holes
            while items.len() < index {
                items.push_back(Value::Nil);
            }
            items.push_back(val);
        }
        Ok(())
    }

    fn absorb(&self, item: Value) -> Result<()> {
        self.push(item);
        Ok(())
    }

    fn has(&self, key: &Value) -> bool {
        index_key(key).is_some_and(|i| i < self.len())
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl Container for ListCell {
    fn kind(&self) -> Kind {
        Kind::List
    }

    fn shallow_copy(&self) -> Result<Value> {
        Ok(Value::List(self.fork()))
    }

    fn lookup(&self, key: &Value) -> Option<Value> {
        index_key(key).and_then(|i| self.get(i))
    }

    fn absorb(&self, item: Value) -> Result<()> {
        self.borrow_mut().push_front(item);
        Ok(())
    }

    fn has(&self, key: &Value) -> bool {
        index_key(key).is_some_and(|i| i < self.len())
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl Container for ObjectCell {
    fn kind(&self) -> Kind {
        Kind::Object
    }

    fn shallow_copy(&self) -> Result<Value> {
        Ok(Value::Object(self.fork()))
    }

    fn lookup(&self, key: &Value) -> Option<Value> {
        let key = property_key(key)?;
        self.borrow().get(&key).cloned()
    }

    fn store(&self, key: Value, val: Value) -> Result<()> {
        let prop = property_key(&key).ok_or_else(|| {
            Error::type_error_in("assoc", "string, number, or boolean key", key.type_name())
        })?;
        self.borrow_mut().insert(prop, val);
        Ok(())
    }

    fn absorb(&self, item: Value) -> Result<()> {
        absorb_entries(item, |k, v| self.store(k, v))
    }

    fn remove(&self, key: &Value) -> Result<()> {
        if let Some(prop) = property_key(key) {
            self.borrow_mut().shift_remove(&prop);
        }
        Ok(())
    }

    fn has(&self, key: &Value) -> bool {
        property_key(key).is_some_and(|k| self.borrow().contains_key(&k))
    }

    fn size(&self) -> Option<usize> {
        Some(self.borrow().len())
    }
}

impl Container for MapCell {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn shallow_copy(&self) -> Result<Value> {
        Ok(Value::Map(self.fork()))
    }

    fn lookup(&self, key: &Value) -> Option<Value> {
        self.borrow().get(key).cloned()
    }

    fn store(&self, key: Value, val: Value) -> Result<()> {
        self.borrow_mut().insert(key, val);
        Ok(())
    }

    fn absorb(&self, item: Value) -> Result<()> {
        absorb_entries(item, |k, v| self.store(k, v))
    }

    fn remove(&self, key: &Value) -> Result<()> {
        self.borrow_mut().shift_remove(key);
        Ok(())
    }

    fn has(&self, key: &Value) -> bool {
        self.borrow().contains_key(key)
    }

    fn size(&self) -> Option<usize> {
        Some(self.borrow().len())
    }
}

impl Container for SetCell {
    fn kind(&self) -> Kind {
        Kind::Set
    }

    fn shallow_copy(&self) -> Result<Value> {
        Ok(Value::Set(self.fork()))
    }

    fn lookup(&self, key: &Value) -> Option<Value> {
        self.borrow().get(key).cloned()
    }

    fn absorb(&self, item: Value) -> Result<()> {
        self.borrow_mut().insert(item);
        Ok(())
    }

    fn remove(&self, key: &Value) -> Result<()> {
        self.borrow_mut().shift_remove(key);
        Ok(())
    }

    fn has(&self, key: &Value) -> bool {
        self.borrow().contains(key)
    }

    fn size(&self) -> Option<usize> {
        Some(self.borrow().len())
    }
}

impl Container for LazySeq {
    fn kind(&self) -> Kind {
        Kind::Lazy
    }

    fn shallow_copy(&self) -> Result<Value> {
        Err(Error::illegal("copy", "cannot copy a lazy sequence"))
    }

    fn lookup(&self, _key: &Value) -> Option<Value> {
        None
    }

    fn has(&self, _key: &Value) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }
}

impl Container for Cons {
    fn kind(&self) -> Kind {
        Kind::Lazy
    }

    fn shallow_copy(&self) -> Result<Value> {
        Err(Error::illegal("copy", "cannot copy a lazy sequence"))
    }

    fn lookup(&self, _key: &Value) -> Option<Value> {
        None
    }

    fn has(&self, _key: &Value) -> bool {
        false
    }

    fn size(&self) -> Option<usize> {
        None
    }
}
