// tessel-value - Structured exceptions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Exception values created by `ex-info`.

use std::fmt;

use crate::value::Value;

/// An exception carrying a message, a data payload and an optional cause.
#[derive(Clone)]
pub struct ExceptionInfo {
    message: String,
    data: Value,
    cause: Option<Value>,
}

impl ExceptionInfo {
    pub fn new(message: impl Into<String>, data: Value, cause: Option<Value>) -> Self {
        ExceptionInfo {
            message: message.into(),
            data,
            cause,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn cause(&self) -> Option<&Value> {
        self.cause.as_ref()
    }
}

impl fmt::Debug for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<ExceptionInfo {:?} {}>", self.message, self.data)
    }
}
