// tessel-value - Error types for the Tessel runtime
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types shared by every Tessel operation.

use std::fmt;
use std::rc::Rc;

use crate::exception::ExceptionInfo;
use crate::value::Value;

/// Result type for Tessel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while operating on values.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Wrong number of arguments to a function
    #[error("{}", arity_message(.name, .expected, .got))]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Wrong kind of value for an operation
    #[error("{}", type_message(.context, .expected, .got))]
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Malformed arguments that are of the right kind
    #[error("{op}: {message}")]
    IllegalArgument { op: &'static str, message: String },
    /// Attempted to call something that isn't callable
    #[error("Cannot call value: {0}")]
    NotCallable(String),
    /// Name missing from a registry
    #[error("Unable to resolve function: {0}")]
    UndefinedFunction(String),
    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Checked integer arithmetic overflowed
    #[error("Integer overflow in '{0}'")]
    Overflow(&'static str),
    /// Index out of bounds
    #[error("Index {index} out of bounds for collection of length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    /// Pattern failed to compile
    #[error("Invalid regex: {0}")]
    InvalidRegex(String),
    /// User-thrown value, usually an `ex-info` exception
    #[error("{}", thrown_message(.0))]
    Thrown(Value),
    /// Internal error - invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

fn arity_message(name: &Option<String>, expected: &AritySpec, got: &usize) -> String {
    match name {
        Some(name) => format!(
            "Wrong number of arguments to '{}': expected {}, got {}",
            name, expected, got
        ),
        None => format!(
            "Wrong number of arguments: expected {}, got {}",
            expected, got
        ),
    }
}

fn type_message(context: &Option<String>, expected: &str, got: &str) -> String {
    match context {
        Some(ctx) => format!("{}: expected {}, got {}", ctx, expected, got),
        None => format!("Type error: expected {}, got {}", expected, got),
    }
}

fn thrown_message(val: &Value) -> String {
    match val {
        Value::Exception(info) => info.message().to_string(),
        other => other.to_string(),
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidRegex(err.to_string())
    }
}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for a bounded range with function name.
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::TypeError {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an illegal-argument error for `op`.
    pub fn illegal(op: &'static str, message: impl Into<String>) -> Self {
        Error::IllegalArgument {
            op,
            message: message.into(),
        }
    }

    /// Throw a structured exception carrying `message` and `data`.
    pub fn ex_info(message: impl Into<String>, data: Value) -> Self {
        Error::Thrown(Value::Exception(Rc::new(ExceptionInfo::new(
            message, data, None,
        ))))
    }

    /// The value carried by a thrown error, if any.
    pub fn thrown_value(&self) -> Option<&Value> {
        match self {
            Error::Thrown(val) => Some(val),
            _ => None,
        }
    }
}
