// tessel-core - Exception built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Structured exceptions: ex-info, ex-message, ex-data, ex-cause

use std::rc::Rc;

use tessel_value::{Error, ExceptionInfo, Result, Value};

use super::{arity, arity_range};

// ============================================================================
// Exceptions
// ============================================================================

/// (ex-info msg data) or (ex-info msg data cause)
///
/// Builds the exception value; callers throw it with `Error::Thrown`.
pub fn builtin_ex_info(args: &[Value]) -> Result<Value> {
    arity_range("ex-info", args, 2, 3)?;
    let message = match &args[0] {
        Value::String(s) => s.to_string(),
        other => return Err(Error::type_error_in("ex-info", "string", other.type_name())),
    };
    let cause = args.get(2).filter(|c| !c.is_nil()).cloned();
    Ok(Value::Exception(Rc::new(ExceptionInfo::new(
        message,
        args[1].clone(),
        cause,
    ))))
}

/// The value an error stands for when handed to `ex-*` functions.
///
/// Thrown values come back as they were thrown; any other error becomes an
/// exception carrying its message and nil data.
pub fn error_value(err: &Error) -> Value {
    match err.thrown_value() {
        Some(val) => val.clone(),
        None => Value::Exception(Rc::new(ExceptionInfo::new(
            err.to_string(),
            Value::Nil,
            None,
        ))),
    }
}

fn exception_of(val: &Value) -> Option<&ExceptionInfo> {
    match val {
        Value::Exception(info) => Some(&**info),
        _ => None,
    }
}

/// (ex-message ex) - nil for non-exceptions
pub fn builtin_ex_message(args: &[Value]) -> Result<Value> {
    arity("ex-message", args, 1)?;
    Ok(exception_of(&args[0])
        .map(|info| Value::string(info.message()))
        .unwrap_or(Value::Nil))
}

/// (ex-data ex) - nil for non-exceptions
pub fn builtin_ex_data(args: &[Value]) -> Result<Value> {
    arity("ex-data", args, 1)?;
    Ok(exception_of(&args[0])
        .map(|info| info.data().clone())
        .unwrap_or(Value::Nil))
}

/// (ex-cause ex) - nil when there is no cause
pub fn builtin_ex_cause(args: &[Value]) -> Result<Value> {
    arity("ex-cause", args, 1)?;
    Ok(exception_of(&args[0])
        .and_then(|info| info.cause().cloned())
        .unwrap_or(Value::Nil))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ex_info_round_trip() {
        let data = Value::object([("code", Value::int(7))]);
        let ex = builtin_ex_info(&[Value::string("boom"), data.clone()]).unwrap();
        assert_eq!(builtin_ex_message(&[ex.clone()]).unwrap(), Value::string("boom"));
        assert_eq!(builtin_ex_data(&[ex.clone()]).unwrap(), data);
        assert_eq!(builtin_ex_cause(&[ex]).unwrap(), Value::Nil);
    }

    #[test]
    fn test_error_value_wraps_plain_errors() {
        let v = error_value(&Error::DivisionByZero);
        assert_eq!(
            builtin_ex_message(&[v]).unwrap(),
            Value::string("Division by zero")
        );
    }

    #[test]
    fn test_error_value_unwraps_thrown() {
        let err = Error::ex_info("bad", Value::int(1));
        let v = error_value(&err);
        assert_eq!(builtin_ex_data(&[v]).unwrap(), Value::int(1));
    }
}
