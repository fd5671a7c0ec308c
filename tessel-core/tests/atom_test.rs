// tessel-core - Atom integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tests for: atom, deref, reset!, swap!, add-watch, remove-watch

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{Registry, Value, builtin, call_with, int, native, s};

fn recorder() -> (Rc<RefCell<Vec<Vec<Value>>>>, Value) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let f = native("watch", move |args| {
        sink.borrow_mut().push(args.to_vec());
        Ok(Value::Nil)
    });
    (log, f)
}

#[test]
fn test_deref_reset_swap() {
    let r = Registry::new();
    let a = call_with(&r, "atom", &[int(1)]).unwrap();
    assert_eq!(call_with(&r, "deref", &[a.clone()]).unwrap(), int(1));
    assert_eq!(call_with(&r, "reset!", &[a.clone(), int(5)]).unwrap(), int(5));
    assert_eq!(
        call_with(&r, "swap!", &[a.clone(), builtin("+"), int(2), int(3)]).unwrap(),
        int(10)
    );
    assert_eq!(call_with(&r, "deref", &[a]).unwrap(), int(10));
}

#[test]
fn test_watch_receives_key_atom_old_new() {
    let r = Registry::new();
    let a = call_with(&r, "atom", &[int(1)]).unwrap();
    let (log, watch) = recorder();
    call_with(&r, "add-watch", &[a.clone(), s("w"), watch]).unwrap();
    call_with(&r, "reset!", &[a.clone(), int(2)]).unwrap();
    call_with(&r, "swap!", &[a.clone(), builtin("inc")]).unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0][0], s("w"));
    assert!(log[0][1].identical(&a));
    assert_eq!(&log[0][2..], &[int(1), int(2)]);
    assert_eq!(&log[1][2..], &[int(2), int(3)]);
}

#[test]
fn test_watches_run_in_insertion_order() {
    let r = Registry::new();
    let a = call_with(&r, "atom", &[int(0)]).unwrap();
    let order = Rc::new(RefCell::new(Vec::new()));
    for key in ["first", "second", "third"] {
        let sink = Rc::clone(&order);
        let w = native("w", move |args| {
            sink.borrow_mut().push(args[0].clone());
            Ok(Value::Nil)
        });
        call_with(&r, "add-watch", &[a.clone(), s(key), w]).unwrap();
    }
    call_with(&r, "reset!", &[a, int(1)]).unwrap();
    assert_eq!(*order.borrow(), vec![s("first"), s("second"), s("third")]);
}

#[test]
fn test_remove_watch() {
    let r = Registry::new();
    let a = call_with(&r, "atom", &[int(0)]).unwrap();
    let (log, watch) = recorder();
    call_with(&r, "add-watch", &[a.clone(), s("w"), watch]).unwrap();
    call_with(&r, "remove-watch", &[a.clone(), s("w")]).unwrap();
    call_with(&r, "reset!", &[a, int(1)]).unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_watch_error_propagates_after_replacement() {
    let r = Registry::new();
    let a = call_with(&r, "atom", &[int(0)]).unwrap();
    let failing = native("failing", |_| {
        Err(tessel_core::Error::ex_info("watch failed", Value::Nil))
    });
    call_with(&r, "add-watch", &[a.clone(), s("bad"), failing]).unwrap();
    let err = call_with(&r, "reset!", &[a.clone(), int(7)]).unwrap_err();
    assert_eq!(err, "watch failed");
    assert_eq!(call_with(&r, "deref", &[a]).unwrap(), int(7));
}

#[test]
fn test_swap_error_leaves_value() {
    let r = Registry::new();
    let a = call_with(&r, "atom", &[s("text")]).unwrap();
    assert!(call_with(&r, "swap!", &[a.clone(), builtin("inc")]).is_err());
    assert_eq!(call_with(&r, "deref", &[a]).unwrap(), s("text"));
}

#[test]
fn test_atom_type_errors() {
    assert_call_err_contains!("deref", [int(1)], "deref: expected atom");
    assert_call_err_contains!("reset!", [int(1), int(2)], "reset!");
    assert_call_err!("add-watch", [Value::Nil, s("k"), builtin("inc")]);
}
