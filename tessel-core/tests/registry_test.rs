// tessel-core - Registry integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tests for the registry surface and the builtins that do not fit
//! elsewhere: ex-info, ex-message, ex-data, ex-cause, meta, with-meta,
//! rand-int, rand-nth, shuffle, system-time

mod common;

use common::{Error, Options, Registry, Value, call, int, ints, native, s};

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_core_names_are_registered() {
    let registry = Registry::new();
    for name in [
        "get",
        "assoc",
        "assoc!",
        "conj!",
        "partition-all",
        "string/join",
        "string/replace",
        "replace",
        "warn-on-lazy-reusage!",
        "pr-str",
        "system-time",
    ] {
        assert!(registry.contains(name), "missing builtin: {}", name);
    }
    let names = registry.names();
    assert_eq!(names.len(), registry.len());
    assert!(names.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_unknown_name() {
    let err = Registry::new().call("no-such-fn", &[]).unwrap_err();
    assert!(matches!(err, Error::UndefinedFunction(ref name) if name == "no-such-fn"));
    assert_eq!(err.to_string(), "Unable to resolve function: no-such-fn");
}

#[test]
fn test_empty_registry_and_define() {
    let registry = Registry::empty(Options::default());
    assert!(registry.is_empty());
    registry.define_native("twice", |args| {
        let n = args[0].as_int().unwrap_or(0);
        Ok(Value::int(n * 2))
    });
    registry.define("answer", int(42));
    assert_eq!(registry.call("twice", &[int(4)]).unwrap(), int(8));
    assert_eq!(registry.lookup("answer"), Some(int(42)));
    assert!(matches!(
        registry.call("answer", &[]),
        Err(Error::NotCallable(_))
    ));
}

#[test]
fn test_registered_functions_are_values() {
    let registry = Registry::new();
    let inc = registry.lookup("inc").unwrap();
    let mapped = registry.call("mapv", &[inc, ints(&[1, 2])]).unwrap();
    assert_eq!(mapped, ints(&[2, 3]));
}

// =============================================================================
// Exceptions
// =============================================================================

#[test]
fn test_ex_info_accessors() {
    let cause = call("ex-info", &[s("root"), Value::Nil]).unwrap();
    let ex = call("ex-info", &[s("outer"), Value::object([("k", int(1))]), cause.clone()]).unwrap();
    assert_call!("ex-message", [ex.clone()], s("outer"));
    assert_call!("ex-data", [ex.clone()], Value::object([("k", int(1))]));
    assert_eq!(call("ex-cause", &[ex]).unwrap(), cause);
    assert_call!("ex-message", [int(1)], Value::Nil);
    assert_call_err_contains!("ex-info", [int(1), Value::Nil], "ex-info: expected string");
}

#[test]
fn test_thrown_errors_are_inspectable() {
    let thrower = native("thrower", |_| Err(Error::ex_info("kaboom", int(9))));
    let err = Registry::new()
        .call("mapv", &[thrower, ints(&[1])])
        .unwrap_err();
    let val = tessel_core::error_value(&err);
    assert_call!("ex-message", [val.clone()], s("kaboom"));
    assert_call!("ex-data", [val], int(9));
}

#[test]
fn test_plain_errors_become_exceptions() {
    let err = Registry::new().call("/", &[int(1), int(0)]).unwrap_err();
    let val = tessel_core::error_value(&err);
    assert_call!("ex-message", [val.clone()], s("Division by zero"));
    assert_call!("ex-data", [val], Value::Nil);
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn test_with_meta_returns_tagged_copy() {
    let obj = Value::object([("a", int(1))]);
    let tagged = call("with-meta", &[obj.clone(), s("tag")]).unwrap();
    assert_call!("meta", [tagged.clone()], s("tag"));
    assert_call!("meta", [obj.clone()], Value::Nil);
    assert_eq!(tagged, obj);
    assert_call!("keys", [tagged], Value::array([s("a")]));
    assert_call_err!("with-meta", [int(1), s("tag")]);
}

// =============================================================================
// Random and time
// =============================================================================

#[test]
fn test_random_helpers_stay_in_range() {
    for _ in 0..20 {
        let n = call("rand-int", &[int(5)]).unwrap().as_int().unwrap();
        assert!((0..5).contains(&n));
        let picked = call("rand-nth", &[ints(&[7, 8, 9])]).unwrap();
        assert!([int(7), int(8), int(9)].contains(&picked));
    }
    assert_call!("rand-nth", [Value::array([])], Value::Nil);
}

#[test]
fn test_shuffle_is_a_permutation() {
    let shuffled = call("shuffle", &[ints(&[1, 2, 3, 4])]).unwrap();
    let sorted = call("sort", &[shuffled]).unwrap();
    assert_eq!(sorted, ints(&[1, 2, 3, 4]));
}

#[test]
fn test_system_time_advances() {
    let a = call("system-time", &[]).unwrap().as_f64().unwrap();
    let b = call("system-time", &[]).unwrap().as_f64().unwrap();
    assert!(b >= a);
}
