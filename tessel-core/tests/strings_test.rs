// tessel-core - String and regex integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tests for: str, subs, string/blank?, string/join, string/trim,
//! string/triml, string/trimr, string/split, string/starts-with?,
//! string/replace, re-pattern, re-matches, re-seq, regexp?

mod common;

use common::{Value, call, int, ints, native, realize, s};

fn re(pattern: &str) -> Value {
    call("re-pattern", &[s(pattern)]).unwrap()
}

#[test]
fn test_str_concatenates_display_text() {
    assert_call!("str", [], s(""));
    assert_call!("str", [s("a"), int(1), Value::Nil, Value::Bool(true)], s("a1true"));
    assert_call!("str", [Value::float(2.5)], s("2.5"));
}

#[test]
fn test_subs() {
    assert_call!("subs", [s("hello"), int(1)], s("ello"));
    assert_call!("subs", [s("hello"), int(1), int(3)], s("el"));
    assert_call!("subs", [s("héllo"), int(1), int(2)], s("é"));
    assert_call!("subs", [s("hello"), int(-5), int(2)], s("he"));
    assert_call_err_contains!("subs", [int(1), int(0)], "subs: expected string");
}

#[test]
fn test_blank() {
    assert_call!("string/blank?", [Value::Nil], Value::Bool(true));
    assert_call!("string/blank?", [s(" \t\n")], Value::Bool(true));
    assert_call!("string/blank?", [s(" x ")], Value::Bool(false));
}

#[test]
fn test_join() {
    assert_call!("string/join", [ints(&[1, 2, 3])], s("123"));
    assert_call!("string/join", [s(", "), ints(&[1, 2, 3])], s("1, 2, 3"));
    assert_call!("string/join", [s(","), Value::array([s("a"), Value::Nil, s("b")])], s("a,,b"));
    let r = call("range", &[int(3)]).unwrap();
    assert_call!("string/join", [s("-"), r], s("0-1-2"));
}

#[test]
fn test_trims() {
    assert_call!("string/trim", [s("  x  ")], s("x"));
    assert_call!("string/triml", [s("  x  ")], s("x  "));
    assert_call!("string/trimr", [s("  x  ")], s("  x"));
}

#[test]
fn test_split() {
    assert_call!("string/split", [s("a,b,,c"), s(",")], Value::array([s("a"), s("b"), s(""), s("c")]));
    assert_call!("string/split", [s("a1b22c"), re("[0-9]+")], Value::array([s("a"), s("b"), s("c")]));
    assert_call!("string/split", [s("ab"), s("")], Value::array([s("a"), s("b")]));
}

#[test]
fn test_starts_with() {
    assert_call!("string/starts-with?", [s("tessel"), s("tes")], Value::Bool(true));
    assert_call!("string/starts-with?", [s("tessel"), s("sel")], Value::Bool(false));
}

// =============================================================================
// string/replace
// =============================================================================

#[test]
fn test_replace_literal_string() {
    assert_call!("string/replace", [s("a.b.c"), s("."), s("-")], s("a-b-c"));
    assert_call!("string/replace", [s("cost"), s("o"), s("$1")], s("c$1st"));
}

#[test]
fn test_replace_regex_with_group_reference() {
    assert_call!(
        "string/replace",
        [s("john smith"), re("(\\w+) (\\w+)"), s("$2 $1")],
        s("smith john")
    );
}

#[test]
fn test_replace_regex_with_fn() {
    let upper = native("upper", |args| {
        Ok(Value::string(args[0].as_str().unwrap_or("").to_uppercase()))
    });
    assert_call!("string/replace", [s("a1b2"), re("[a-z]"), upper], s("A1B2"));
}

#[test]
fn test_replace_fn_sees_groups() {
    let swap = native("swap", |args| {
        let groups = args[0].to_vec()?;
        Ok(Value::string(format!(
            "{}={}",
            groups[2].as_str().unwrap_or(""),
            groups[1].as_str().unwrap_or("")
        )))
    });
    assert_call!(
        "string/replace",
        [s("a:1 b:2"), re("(\\w):(\\d)"), swap],
        s("1=a 2=b")
    );
}

#[test]
fn test_replace_fn_error_propagates() {
    let boom = native("boom", |_| Err(tessel_core::Error::ex_info("no", Value::Nil)));
    assert_call_err_contains!("string/replace", [s("abc"), re("b"), boom], "no");
}

// =============================================================================
// Regex
// =============================================================================

#[test]
fn test_re_pattern() {
    assert_call!("regexp?", [re("a+")], Value::Bool(true));
    assert_call!("regexp?", [s("a+")], Value::Bool(false));
    assert_call_err_contains!("re-pattern", [s("(")], "invalid regex");
}

#[test]
fn test_re_matches_requires_full_match() {
    assert_call!("re-matches", [re("\\d+"), s("123")], s("123"));
    assert_call!("re-matches", [re("\\d+"), s("123a")], Value::Nil);
    assert_call!(
        "re-matches",
        [re("(\\d)(\\d)"), s("12")],
        Value::array([s("12"), s("1"), s("2")])
    );
}

#[test]
fn test_re_seq() {
    let m = call("re-seq", &[re("\\d"), s("a1b2c3")]).unwrap();
    assert_eq!(realize(&m), vec![s("1"), s("2"), s("3")]);
    let m = call("re-seq", &[re("x"), s("abc")]).unwrap();
    assert!(realize(&m).is_empty());
}
