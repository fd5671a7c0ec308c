// tessel-value - Conversions between Rust types and Tessel values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `From` conversions for building values from Rust data.
//!
//! | Rust type            | Value          |
//! |----------------------|----------------|
//! | `()`                 | `Nil`          |
//! | `bool`               | `Bool`         |
//! | `i32`, `i64`         | `Int`          |
//! | `usize`              | `Int`          |
//! | `f64`                | `Float`        |
//! | `&str`, `String`     | `String`       |
//! | `Vec<Value>`         | `Array`        |
//! | `Option<T>`          | `T` or `Nil`   |
//! | `NativeFn`           | `Fn`           |
//! | `LazySeq`            | `Lazy`         |
//! | `Atom`               | `Atom`         |

use crate::atom::Atom;
use crate::function::NativeFn;
use crate::lazy::LazySeq;
use crate::value::Value;

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        // Counts never approach i64::MAX in practice
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

impl From<NativeFn> for Value {
    fn from(f: NativeFn) -> Self {
        Value::Fn(f)
    }
}

impl From<LazySeq> for Value {
    fn from(seq: LazySeq) -> Self {
        Value::Lazy(seq)
    }
}

impl From<Atom> for Value {
    fn from(a: Atom) -> Self {
        Value::Atom(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from(()), Value::Nil);
        assert_eq!(Value::from(3i32), Value::int(3));
        assert_eq!(Value::from(4usize), Value::int(4));
        assert_eq!(Value::from("x"), Value::string("x"));
        assert_eq!(Value::from(None::<i64>), Value::Nil);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
    }
}
