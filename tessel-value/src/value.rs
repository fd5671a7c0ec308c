// tessel-value - Value types for Tessel
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for Tessel.
//!
//! `Value` is the central enum representing every dynamic value the runtime
//! handles. Containers are mutable cells shared by reference; scalars are
//! plain data.

// Value keys may hold interior-mutable containers
#![allow(clippy::mutable_key_type)]

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use regex::Regex;

use crate::atom::Atom;
use crate::cells::{
    ArrayCell, Entries, Items, ListCell, MapCell, Members, ObjectCell, Props, SetCell, Shared,
};
use crate::error::{Error, Result};
use crate::exception::ExceptionInfo;
use crate::function::NativeFn;
use crate::kind::{Container, Kind};
use crate::lazy::{Cons, LazySeq};

/// The core value type for Tessel.
///
/// `Nil` stands for both "null" and "undefined": a stored `Nil` is
/// indistinguishable from a missing entry. Container variants hold shared
/// cells, so cloning a `Value` never copies the payload. Metadata does not
/// affect equality or hashing.
#[derive(Clone)]
pub enum Value {
    /// The nil value, representing nothing/absence
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// Immutable string
    String(Rc<str>),
    /// Growable vector
    Array(ArrayCell),
    /// Array flavour that grows at the front
    List(ListCell),
    /// String-keyed record
    Object(ObjectCell),
    /// Arbitrary-key map
    Map(MapCell),
    /// Set of unique members
    Set(SetCell),
    /// Restartable lazy sequence
    Lazy(LazySeq),
    /// Head/tail pair produced by `cons`
    Cons(Rc<Cons>),
    /// Native function
    Fn(NativeFn),
    /// Atom (mutable reference with watches)
    Atom(Atom),
    /// Reduced value (early termination of `reduce`)
    Reduced(Rc<Value>),
    /// Compiled regular expression
    Regex(Rc<Regex>),
    /// Exception created by `ex-info`
    Exception(Rc<ExceptionInfo>),
}

// ============================================================================
// Constructors
// ============================================================================

impl Value {
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Create an array from the given items.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(ArrayCell::new(items.into_iter().collect::<Items>()))
    }

    /// Create a list from the given items, first item at the front.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(ListCell::new(items.into_iter().collect::<Items>()))
    }

    /// Create an object from string keys and values, keeping insertion order.
    pub fn object<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(ObjectCell::new(
            entries
                .into_iter()
                .map(|(k, v)| (Rc::from(k.as_ref()), v))
                .collect::<Props>(),
        ))
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(MapCell::new(entries.into_iter().collect::<Entries>()))
    }

    pub fn set(members: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetCell::new(members.into_iter().collect::<Members>()))
    }

    pub fn reduced(val: Value) -> Self {
        Value::Reduced(Rc::new(val))
    }

    /// Wrap a closure as a function value.
    pub fn func<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Value::Fn(NativeFn::new(name, f))
    }

    /// Compile `pattern` into a regex value.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(Value::Regex(Rc::new(Regex::new(pattern)?)))
    }
}

// ============================================================================
// Inspection
// ============================================================================

impl Value {
    /// Name of this value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Lazy(_) => "lazy-seq",
            Value::Cons(_) => "cons",
            Value::Fn(_) => "fn",
            Value::Atom(_) => "atom",
            Value::Reduced(_) => "reduced",
            Value::Regex(_) => "regex",
            Value::Exception(_) => "exception",
        }
    }

    /// Only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Container kind of this value, or `None` for nil, scalars, functions
    /// and atoms.
    pub fn kind(&self) -> Option<Kind> {
        self.as_container().map(|c| c.kind())
    }

    /// Dispatch handle for container values.
    pub fn as_container(&self) -> Option<&dyn Container> {
        match self {
            Value::Array(c) => Some(c),
            Value::List(c) => Some(c),
            Value::Object(c) => Some(c),
            Value::Map(c) => Some(c),
            Value::Set(c) => Some(c),
            Value::Lazy(seq) => Some(seq),
            Value::Cons(cell) => Some(&**cell),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Metadata attached to a container, if any.
    pub fn meta(&self) -> Option<Value> {
        match self {
            Value::Array(c) => c.meta().cloned(),
            Value::List(c) => c.meta().cloned(),
            Value::Object(c) => c.meta().cloned(),
            Value::Map(c) => c.meta().cloned(),
            Value::Set(c) => c.meta().cloned(),
            _ => None,
        }
    }

    /// Shallow copy of a container carrying `meta`.
    pub fn with_meta(&self, meta: Value) -> Result<Value> {
        let meta = (!meta.is_nil()).then_some(meta);
        Ok(match self {
            Value::Array(c) => Value::Array(c.fork_with_meta(meta)),
            Value::List(c) => Value::List(c.fork_with_meta(meta)),
            Value::Object(c) => Value::Object(c.fork_with_meta(meta)),
            Value::Map(c) => Value::Map(c.fork_with_meta(meta)),
            Value::Set(c) => Value::Set(c.fork_with_meta(meta)),
            other => {
                return Err(Error::type_error_in(
                    "with-meta",
                    "array, list, object, map, or set",
                    other.type_name(),
                ));
            }
        })
    }

    /// Reference identity for shared values, value equality for scalars.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Set(a), Value::Set(b)) => a.ptr_eq(b),
            (Value::Reduced(a), Value::Reduced(b)) => Rc::ptr_eq(a, b),
            (Value::Regex(a), Value::Regex(b)) => Rc::ptr_eq(a, b),
            (Value::Int(_), Value::Float(_)) | (Value::Float(_), Value::Int(_)) => false,
            _ => self == other,
        }
    }
}

/// Coerce a value to an object property key.
///
/// Strings are used as-is; numbers and booleans use their printed form.
/// Any other value has no property key.
pub fn property_key(key: &Value) -> Option<Rc<str>> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Int(n) => Some(Rc::from(n.to_string())),
        Value::Float(f) => Some(Rc::from(format_number(*f))),
        Value::Bool(b) => Some(Rc::from(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// Format a float the way the collection model prints numbers: integral
/// values without a fraction, non-finite values by name.
pub fn format_number(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f == 0.0 {
        "0".to_string()
    } else {
        format!("{}", f)
    }
}

// ============================================================================
// Equality and hashing
// ============================================================================

/// Structural equality of two cells. A cell that is mid-mutation (the
/// receiver of an insert comparing against its own members) equals only
/// itself.
fn payload_eq<T: Clone + PartialEq>(a: &Shared<T>, b: &Shared<T>) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    match (a.try_borrow(), b.try_borrow()) {
        (Some(x), Some(y)) => *x == *y,
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                *i as f64 == *f && *f as i64 == *i
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => payload_eq::<Items>(a, b),
            (Value::List(a), Value::List(b)) => payload_eq::<Items>(a, b),
            (Value::Array(a), Value::List(b)) | (Value::List(b), Value::Array(a)) => {
                payload_eq::<Items>(a, b)
            }
            (Value::Object(a), Value::Object(b)) => payload_eq::<Props>(a, b),
            (Value::Map(a), Value::Map(b)) => payload_eq::<Entries>(a, b),
            (Value::Set(a), Value::Set(b)) => payload_eq::<Members>(a, b),
            (Value::Lazy(a), Value::Lazy(b)) => a.ptr_eq(b),
            (Value::Cons(a), Value::Cons(b)) => Rc::ptr_eq(a, b),
            (Value::Fn(a), Value::Fn(b)) => a.ptr_eq(b),
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::Reduced(a), Value::Reduced(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::Exception(a), Value::Exception(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Nil => 0u8.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Value::Int(n) => {
                2u8.hash(state);
                n.hash(state);
            }
            Value::Float(f) => {
                // Integral floats hash like the equal Int
                if f.is_finite() && f.fract() == 0.0 && (*f as i64) as f64 == *f {
                    2u8.hash(state);
                    (*f as i64).hash(state);
                } else if f.is_nan() {
                    3u8.hash(state);
                } else {
                    3u8.hash(state);
                    f.to_bits().hash(state);
                }
            }
            Value::String(s) => {
                4u8.hash(state);
                s.hash(state);
            }
            // Mutable containers hash by kind only
            Value::Array(_) | Value::List(_) => 5u8.hash(state),
            Value::Object(_) => 6u8.hash(state),
            Value::Map(_) => 7u8.hash(state),
            Value::Set(_) => 8u8.hash(state),
            Value::Lazy(seq) => {
                9u8.hash(state);
                seq.addr().hash(state);
            }
            Value::Cons(cell) => {
                10u8.hash(state);
                (Rc::as_ptr(cell) as usize).hash(state);
            }
            Value::Fn(f) => {
                11u8.hash(state);
                f.addr().hash(state);
            }
            Value::Atom(a) => {
                12u8.hash(state);
                a.addr().hash(state);
            }
            Value::Reduced(inner) => {
                13u8.hash(state);
                inner.hash(state);
            }
            Value::Regex(re) => {
                14u8.hash(state);
                re.as_str().hash(state);
            }
            Value::Exception(info) => {
                15u8.hash(state);
                (Rc::as_ptr(info) as usize).hash(state);
            }
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Nesting limit for rendering values. Anything deeper is assumed to be a
/// container that holds itself.
pub const MAX_DEPTH: usize = 512;

/// A value rendered `depth` levels below the top.
struct Nested<'a> {
    val: &'a Value,
    depth: usize,
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl IntoIterator<Item = &'a Value>,
    close: &str,
    depth: usize,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", Nested { val: item, depth: depth + 1 })?;
    }
    write!(f, "{}", close)
}

impl Nested<'_> {
    fn child<'b>(&self, val: &'b Value) -> Nested<'b> {
        Nested {
            val,
            depth: self.depth + 1,
        }
    }
}

impl fmt::Display for Nested<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self.depth;
        if depth > MAX_DEPTH {
            return write!(f, "...");
        }
        match self.val {
            Value::Nil => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", format_number(*x)),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(c) => write_seq(f, "[", c.borrow().iter(), "]", depth),
            Value::List(c) => write_seq(f, "(", c.borrow().iter(), ")", depth),
            Value::Object(c) => {
                write!(f, "{{")?;
                for (i, (k, v)) in c.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{:?}:{}", k, self.child(v))?;
                }
                write!(f, "}}")
            }
            Value::Map(c) => {
                write!(f, "#map{{")?;
                for (i, (k, v)) in c.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{} {}", self.child(k), self.child(v))?;
                }
                write!(f, "}}")
            }
            Value::Set(c) => write_seq(f, "#{", c.borrow().iter(), "}", depth),
            Value::Lazy(_) => write!(f, "#<lazy-seq>"),
            Value::Cons(cell) => write!(f, "#<cons {}>", self.child(cell.head())),
            Value::Fn(func) => write!(f, "#<fn {}>", func.name()),
            Value::Atom(a) => write!(f, "#<atom {}>", self.child(&a.deref())),
            Value::Reduced(val) => write!(f, "#<reduced {}>", self.child(val)),
            Value::Regex(re) => write!(f, "/{}/", re.as_str()),
            Value::Exception(info) => write!(f, "#<ExceptionInfo {:?}>", info.message()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Nested { val: self, depth: 0 }, f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(v: &Value) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::int(0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(Value::array([]).is_truthy());
    }

    #[test]
    fn test_numeric_equality_across_types() {
        assert_eq!(Value::int(1), Value::float(1.0));
        assert_ne!(Value::int(1), Value::float(1.5));
        assert_eq!(hash_of(&Value::int(3)), hash_of(&Value::float(3.0)));
        assert_eq!(Value::float(f64::NAN), Value::float(f64::NAN));
    }

    #[test]
    fn test_structural_equality() {
        let a = Value::array([Value::int(1), Value::int(2)]);
        let l = Value::list([Value::int(1), Value::int(2)]);
        assert_eq!(a, l);
        assert_eq!(
            Value::object([("a", Value::int(1)), ("b", Value::int(2))]),
            Value::object([("b", Value::int(2)), ("a", Value::int(1))])
        );
        assert_ne!(
            Value::object([("a", Value::int(1))]),
            Value::map([(Value::string("a"), Value::int(1))])
        );
    }

    #[test]
    fn test_identity_types() {
        let f = Value::func("f", |_| Ok(Value::Nil));
        let g = Value::func("f", |_| Ok(Value::Nil));
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn test_identical() {
        let a = Value::array([Value::int(1)]);
        let b = Value::array([Value::int(1)]);
        assert!(a.identical(&a.clone()));
        assert!(!a.identical(&b));
        assert!(Value::int(5).identical(&Value::int(5)));
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(Value::array([]).kind(), Some(Kind::Array));
        assert_eq!(Value::list([]).kind(), Some(Kind::List));
        assert_eq!(Value::object::<&str>([]).kind(), Some(Kind::Object));
        assert_eq!(Value::map([]).kind(), Some(Kind::Map));
        assert_eq!(Value::set([]).kind(), Some(Kind::Set));
        assert_eq!(Value::Nil.kind(), None);
        assert_eq!(Value::int(1).kind(), None);
        assert_eq!(Value::string("abc").kind(), None);
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key(&Value::int(1)).as_deref(), Some("1"));
        assert_eq!(property_key(&Value::float(2.0)).as_deref(), Some("2"));
        assert_eq!(property_key(&Value::float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(property_key(&Value::Bool(true)).as_deref(), Some("true"));
        assert_eq!(property_key(&Value::Nil), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_with_meta_copies() {
        let a = Value::array([Value::int(1)]);
        let b = a.with_meta(Value::object([("tag", Value::Bool(true))])).unwrap();
        assert_eq!(a, b);
        assert!(!a.identical(&b));
        assert!(a.meta().is_none());
        assert_eq!(b.meta(), Some(Value::object([("tag", Value::Bool(true))])));
        assert!(Value::int(1).with_meta(Value::Nil).is_err());
    }

    #[test]
    fn test_display_of_self_containing_array_is_bounded() {
        let a = Value::array([]);
        if let Value::Array(cell) = &a {
            cell.push(a.clone());
        }
        let text = a.to_string();
        assert!(text.starts_with("[[["));
        assert!(text.contains("..."));
        assert_eq!(text.matches('[').count(), MAX_DEPTH + 1);
    }

    #[test]
    fn test_display() {
        let v = Value::array([Value::int(1), Value::string("a"), Value::Nil]);
        assert_eq!(v.to_string(), r#"[1,"a",null]"#);
        assert_eq!(Value::object([("k", Value::int(2))]).to_string(), r#"{"k":2}"#);
    }
}
