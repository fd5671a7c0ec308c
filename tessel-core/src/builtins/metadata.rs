// tessel-core - Metadata built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! meta, with-meta
//!
//! Metadata lives in the container cell next to the payload, so it never
//! shows up among a container's keys or elements.

use tessel_value::{Result, Value};

use super::arity;

/// (meta x) - nil for values without metadata
pub fn builtin_meta(args: &[Value]) -> Result<Value> {
    arity("meta", args, 1)?;
    Ok(args[0].meta().unwrap_or(Value::Nil))
}

/// (with-meta x m) - shallow copy of a container carrying m
pub fn builtin_with_meta(args: &[Value]) -> Result<Value> {
    arity("with-meta", args, 2)?;
    args[0].with_meta(args[1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_meta_copies() {
        let arr = Value::array([Value::int(1)]);
        let tagged = builtin_with_meta(&[arr.clone(), Value::string("m")]).unwrap();
        assert_eq!(builtin_meta(&[tagged.clone()]).unwrap(), Value::string("m"));
        assert_eq!(builtin_meta(&[arr.clone()]).unwrap(), Value::Nil);
        assert_eq!(tagged, arr);
        assert!(!tagged.identical(&arr));
    }

    #[test]
    fn test_with_meta_rejects_scalars() {
        assert!(builtin_with_meta(&[Value::int(1), Value::Nil]).is_err());
    }
}
