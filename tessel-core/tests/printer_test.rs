// tessel-core - pr-str integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tests for: pr-str and the `pr_str` library entry point

mod common;

use common::{Value, call, int, ints, native, s};

#[test]
fn test_scalars() {
    assert_call!("pr-str", [Value::Nil], s("null"));
    assert_call!("pr-str", [Value::Bool(false)], s("false"));
    assert_call!("pr-str", [int(42)], s("42"));
    assert_call!("pr-str", [Value::float(1.5)], s("1.5"));
    assert_call!("pr-str", [s("a\"b")], s("\"a\\\"b\""));
    assert_call!("pr-str", [Value::float(f64::NAN)], s("null"));
}

#[test]
fn test_multiple_arguments_join_with_spaces() {
    assert_call!("pr-str", [int(1), s("x"), Value::Nil], s("1 \"x\" null"));
    assert_call!("pr-str", [], s(""));
}

#[test]
fn test_collections() {
    assert_call!("pr-str", [ints(&[1, 2])], s("[1,2]"));
    assert_call!("pr-str", [Value::list([int(1)])], s("[1]"));
    assert_call!(
        "pr-str",
        [Value::object([("a", int(1)), ("b", ints(&[]))])],
        s("{\"a\":1,\"b\":[]}")
    );
    assert_call!(
        "pr-str",
        [Value::map([(int(1), s("one"))])],
        s("{\"1\":\"one\"}")
    );
}

#[test]
fn test_lazy_sequences_print_as_arrays() {
    let r = call("range", &[int(3)]).unwrap();
    assert_call!("pr-str", [r], s("[0,1,2]"));
}

#[test]
fn test_functions_are_left_out_of_objects() {
    let f = native("f", |_| Ok(Value::Nil));
    assert_call!(
        "pr-str",
        [Value::object([("keep", int(1)), ("drop", f.clone())])],
        s("{\"keep\":1}")
    );
    assert_call!("pr-str", [f], s("null"));
}

#[test]
fn test_atoms_and_exceptions() {
    let a = call("atom", &[int(3)]).unwrap();
    assert_call!("pr-str", [a], s("{\"val\":3}"));
    let ex = call("ex-info", &[s("bad"), Value::object([("code", int(7))])]).unwrap();
    assert_call!(
        "pr-str",
        [ex],
        s("{\"message\":\"bad\",\"data\":{\"code\":7}}")
    );
}

#[test]
fn test_library_entry_point() {
    let text = tessel_core::pr_str(&Value::array([s("x"), Value::Nil])).unwrap();
    assert_eq!(text, "[\"x\",null]");
}

#[test]
fn test_deep_nesting_is_an_error() {
    let mut v = Value::array([]);
    for _ in 0..600 {
        v = Value::array([v]);
    }
    assert_call_err_contains!("pr-str", [v], "nested too deeply");
}

#[test]
fn test_self_containing_array_renders_bounded() {
    let a = ints(&[1]);
    call("conj!", &[a.clone(), a.clone()]).unwrap();
    assert_call_err_contains!("pr-str", [a.clone()], "nested too deeply");
    let text = call("str", &[a]).unwrap();
    let text = text.as_str().unwrap();
    assert!(text.starts_with("[1,[1,[1,"));
    assert!(text.ends_with("...]]]"));
}
