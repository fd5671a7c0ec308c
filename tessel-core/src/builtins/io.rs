// tessel-core - String conversion and printing
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! str and pr-str.
//!
//! `pr-str` is a diagnostic JSON rendering and is not meant to be read
//! back: sets and lazy sequences become arrays, maps become objects with
//! stringified keys, functions become `null`.

use serde_json::{Map as JsonMap, Number, Value as Json};

use tessel_value::value::MAX_DEPTH;
use tessel_value::{Error, Result, Value};

/// Text of a value as `str` renders it: strings raw, nil empty.
pub(crate) fn display_str(val: &Value) -> String {
    match val {
        Value::Nil => String::new(),
        Value::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// (str & xs) - concatenated display text
pub fn builtin_str(args: &[Value]) -> Result<Value> {
    Ok(Value::string(
        args.iter().map(display_str).collect::<String>(),
    ))
}

fn json_array(items: Vec<Value>, depth: usize) -> Result<Json> {
    Ok(Json::Array(
        items
            .iter()
            .map(|v| to_json(v, depth + 1))
            .collect::<Result<Vec<_>>>()?,
    ))
}

fn json_object<I>(entries: I, depth: usize) -> Result<Json>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut out = JsonMap::new();
    for (k, v) in entries {
        // Function-valued properties are left out entirely
        if matches!(v, Value::Fn(_)) {
            continue;
        }
        out.insert(k, to_json(&v, depth + 1)?);
    }
    Ok(Json::Object(out))
}

fn to_json(val: &Value, depth: usize) -> Result<Json> {
    if depth > MAX_DEPTH {
        return Err(Error::illegal("pr-str", "value is nested too deeply"));
    }
    Ok(match val {
        Value::Nil | Value::Fn(_) => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::Number(Number::from(*n)),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.to_string()),
        Value::Array(_) | Value::List(_) | Value::Set(_) | Value::Lazy(_) | Value::Cons(_) => {
            json_array(val.to_vec()?, depth)?
        }
        Value::Object(cell) => {
            let entries: Vec<(String, Value)> = cell
                .borrow()
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect();
            json_object(entries, depth)?
        }
        Value::Map(cell) => {
            let entries: Vec<(String, Value)> = cell
                .borrow()
                .iter()
                .map(|(k, v)| (display_str(k), v.clone()))
                .collect();
            json_object(entries, depth)?
        }
        Value::Atom(a) => json_object([("val".to_string(), a.deref())], depth)?,
        Value::Reduced(inner) => to_json(inner, depth + 1)?,
        Value::Regex(_) => Json::Object(JsonMap::new()),
        Value::Exception(info) => json_object(
            [
                ("message".to_string(), Value::string(info.message())),
                ("data".to_string(), info.data().clone()),
            ],
            depth,
        )?,
    })
}

/// JSON text of one value.
pub fn pr_str_1(val: &Value) -> Result<String> {
    let json = to_json(val, 0)?;
    serde_json::to_string(&json).map_err(|e| Error::Internal(e.to_string()))
}

/// (pr-str & xs) - JSON renderings joined by spaces
pub fn builtin_pr_str(args: &[Value]) -> Result<Value> {
    let parts = args.iter().map(pr_str_1).collect::<Result<Vec<_>>>()?;
    Ok(Value::string(parts.join(" ")))
}
