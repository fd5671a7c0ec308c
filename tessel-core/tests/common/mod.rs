// tessel-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers and utilities for Tessel integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`call`] - Call a builtin by name in a fresh registry
//! - [`call_with`] - Call a builtin by name in an existing registry
//! - [`realize`] - Realize a seqable value into a `Vec`
//! - [`int`], [`s`], [`ints`] - Terse value constructors
//! - [`native`] - Wrap a closure as a function value
//!
//! # Macros
//!
//! - [`assert_call!`] - Assert that a call returns an expected value
//! - [`assert_call_err!`] - Assert that a call fails
//! - [`assert_call_err_contains!`] - Assert that a call fails with a message

// Re-export common types for convenience
#[allow(unused_imports)]
pub use tessel_core::{Error, Kind, Options, Registry, Result, SeqOptions, Value};

/// Call the builtin bound to `name` in a fresh registry.
///
/// # Returns
///
/// Returns the result value, or the error message string.
#[must_use]
#[allow(dead_code)]
pub fn call(name: &str, args: &[Value]) -> std::result::Result<Value, String> {
    call_with(&Registry::new(), name, args)
}

/// Call the builtin bound to `name` in the given registry.
#[must_use]
#[allow(dead_code)]
pub fn call_with(
    registry: &Registry,
    name: &str,
    args: &[Value],
) -> std::result::Result<Value, String> {
    registry.call(name, args).map_err(|e| e.to_string())
}

/// Realize every element of a seqable value.
///
/// # Panics
///
/// Panics if the value is not seqable or an element fails.
#[must_use]
#[allow(dead_code)]
pub fn realize(val: &Value) -> Vec<Value> {
    val.to_vec().expect("value should realize")
}

#[must_use]
#[allow(dead_code)]
pub fn int(n: i64) -> Value {
    Value::int(n)
}

#[must_use]
#[allow(dead_code)]
pub fn s(text: &str) -> Value {
    Value::string(text)
}

/// An array of integers.
#[must_use]
#[allow(dead_code)]
pub fn ints(ns: &[i64]) -> Value {
    Value::array(ns.iter().copied().map(Value::int))
}

/// Wrap a closure as a function value.
#[must_use]
#[allow(dead_code)]
pub fn native<F>(name: &'static str, f: F) -> Value
where
    F: Fn(&[Value]) -> Result<Value> + 'static,
{
    tessel_core::make_native_fn(name, f)
}

/// The registry's binding for `name`.
///
/// # Panics
///
/// Panics if `name` is not bound.
#[must_use]
#[allow(dead_code)]
pub fn builtin(name: &str) -> Value {
    Registry::new()
        .lookup(name)
        .unwrap_or_else(|| panic!("no builtin named {}", name))
}

/// Assert that calling `name` with `args` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_call!("+", [int(1), int(2)], int(3));
/// ```
#[macro_export]
macro_rules! assert_call {
    ($name:expr, [$($arg:expr),* $(,)?], $expected:expr) => {
        let result = $crate::common::call($name, &[$($arg),*]);
        assert!(
            result.is_ok(),
            "Failed to call '{}': {:?}",
            $name,
            result.as_ref().err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Result of '{}' did not match expected",
            $name
        );
    };
}

/// Assert that calling `name` with `args` produces an error.
///
/// # Example
///
/// ```ignore
/// assert_call_err!("inc", [s("x")]);
/// ```
#[macro_export]
macro_rules! assert_call_err {
    ($name:expr, [$($arg:expr),* $(,)?]) => {
        let result = $crate::common::call($name, &[$($arg),*]);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $name,
            result.ok()
        );
    };
}

/// Assert that calling `name` with `args` fails with a message containing
/// `pattern`, ignoring case.
///
/// # Example
///
/// ```ignore
/// assert_call_err_contains!("/", [int(1), int(0)], "division by zero");
/// ```
#[macro_export]
macro_rules! assert_call_err_contains {
    ($name:expr, [$($arg:expr),* $(,)?], $pattern:expr) => {
        let result = $crate::common::call($name, &[$($arg),*]);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $name,
            result.as_ref().ok()
        );
        let err_msg = result.unwrap_err();
        assert!(
            err_msg.to_lowercase().contains(&$pattern.to_lowercase()),
            "Error message '{}' does not contain '{}'",
            err_msg,
            $pattern
        );
    };
}
