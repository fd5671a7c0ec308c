// tessel-core - String built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `subs` and the `string/` helpers: blank?, join, trim, triml, trimr,
//! split, starts-with?, replace.
//!
//! Positions are counted in characters, not bytes.

use regex::{Captures, Regex};

use tessel_value::{Error, Result, Value};

use super::io::display_str;
use super::{arity, arity_range, require_int};
use crate::apply::apply;

fn require_str<'a>(name: &'static str, val: &'a Value) -> Result<&'a str> {
    val.as_str()
        .ok_or_else(|| Error::type_error_in(name, "string", val.type_name()))
}

/// (subs s start) or (subs s start end)
///
/// Indices are clamped to the string and swapped when start > end.
pub fn builtin_subs(args: &[Value]) -> Result<Value> {
    arity_range("subs", args, 2, 3)?;
    let s = require_str("subs", &args[0])?;
    let len = s.chars().count();
    let clamp = |n: i64| usize::try_from(n.max(0)).unwrap_or(0).min(len);
    let start = clamp(require_int("subs", &args[1])?);
    let end = match args.get(2) {
        Some(v) if !v.is_nil() => clamp(require_int("subs", v)?),
        _ => len,
    };
    let (from, to) = if start <= end { (start, end) } else { (end, start) };
    Ok(Value::string(
        s.chars().skip(from).take(to - from).collect::<String>(),
    ))
}

// ============================================================================
// string/
// ============================================================================

/// (string/blank? s) - nil, empty, or only whitespace
pub fn builtin_blank_p(args: &[Value]) -> Result<Value> {
    arity("string/blank?", args, 1)?;
    match &args[0] {
        Value::Nil => Ok(Value::Bool(true)),
        other => Ok(Value::Bool(
            require_str("string/blank?", other)?.trim().is_empty(),
        )),
    }
}

/// (string/join coll) or (string/join sep coll)
pub fn builtin_join(args: &[Value]) -> Result<Value> {
    arity_range("string/join", args, 1, 2)?;
    let (sep, coll) = match args {
        [coll] => (String::new(), coll),
        [sep, coll, ..] => (display_str(sep), coll),
        [] => return Err(Error::arity_range("string/join", 1, 2, 0)),
    };
    let parts = coll
        .iter()?
        .map(|item| item.map(|v| display_str(&v)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::string(parts.join(&sep)))
}

fn trimmed(name: &'static str, args: &[Value], trim: fn(&str) -> &str) -> Result<Value> {
    arity(name, args, 1)?;
    Ok(Value::string(trim(require_str(name, &args[0])?)))
}

/// (string/trim s)
pub fn builtin_trim(args: &[Value]) -> Result<Value> {
    trimmed("string/trim", args, str::trim)
}

/// (string/triml s)
pub fn builtin_triml(args: &[Value]) -> Result<Value> {
    trimmed("string/triml", args, str::trim_start)
}

/// (string/trimr s)
pub fn builtin_trimr(args: &[Value]) -> Result<Value> {
    trimmed("string/trimr", args, str::trim_end)
}

/// (string/split s sep) - sep is a string or a regex
///
/// An empty string separator splits into characters.
pub fn builtin_split(args: &[Value]) -> Result<Value> {
    arity("string/split", args, 2)?;
    let s = require_str("string/split", &args[0])?;
    let parts: Vec<Value> = match &args[1] {
        Value::String(sep) if sep.is_empty() => {
            s.chars().map(|c| Value::string(c.to_string())).collect()
        }
        Value::String(sep) => s.split(&**sep).map(Value::string).collect(),
        Value::Regex(re) => re.split(s).map(Value::string).collect(),
        other => {
            return Err(Error::type_error_in(
                "string/split",
                "string or regex",
                other.type_name(),
            ));
        }
    };
    Ok(Value::array(parts))
}

/// (string/starts-with? s prefix)
pub fn builtin_starts_with_p(args: &[Value]) -> Result<Value> {
    arity("string/starts-with?", args, 2)?;
    let s = require_str("string/starts-with?", &args[0])?;
    let prefix = require_str("string/starts-with?", &args[1])?;
    Ok(Value::Bool(s.starts_with(prefix)))
}

/// Match handed to a replacement callback: the matched text alone when the
/// regex has no groups, else `[match g1 g2 ...]` with nil for unmatched
/// groups.
pub(crate) fn match_value(caps: &Captures<'_>) -> Value {
    if caps.len() == 1 {
        return Value::string(&caps[0]);
    }
    Value::array(caps.iter().map(|group| match group {
        Some(m) => Value::string(m.as_str()),
        None => Value::Nil,
    }))
}

fn replace_with_fn(re: &Regex, s: &str, f: &Value) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in re.captures_iter(s) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&s[last..whole.start()]);
        out.push_str(&display_str(&apply(f, &[match_value(&caps)])?));
        last = whole.end();
    }
    out.push_str(&s[last..]);
    Ok(out)
}

/// (string/replace s match replacement)
///
/// A string match replaces every occurrence literally. A regex match takes
/// a replacement string with `$1` group references, or a function of the
/// match.
pub fn builtin_replace(args: &[Value]) -> Result<Value> {
    arity("string/replace", args, 3)?;
    let s = require_str("string/replace", &args[0])?;
    match (&args[1], &args[2]) {
        (Value::String(m), replacement) => {
            let replacement = require_str("string/replace", replacement)?;
            Ok(Value::string(s.replace(&**m, replacement)))
        }
        (Value::Regex(re), Value::String(replacement)) => {
            Ok(Value::string(re.replace_all(s, &**replacement)))
        }
        (Value::Regex(re), f @ Value::Fn(_)) => Ok(Value::string(replace_with_fn(re, s, f)?)),
        (Value::Regex(_), other) => Err(Error::type_error_in(
            "string/replace",
            "string or fn replacement",
            other.type_name(),
        )),
        (other, _) => Err(Error::type_error_in(
            "string/replace",
            "string or regex match",
            other.type_name(),
        )),
    }
}
