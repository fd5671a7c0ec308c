// tessel-core - Lazy sequence integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for lazy sources, re-traversal, and reuse warnings.
//!
//! Tests for: lazy, lazy-seq, range, iterate, repeat, repeatedly, cycle,
//! doall, dorun, warn-on-lazy-reusage!

mod common;

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use common::{Options, Registry, SeqOptions, Value, call, call_with, int, ints, native, realize};

fn counter() -> (Rc<Cell<i64>>, Value) {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let f = native("counter", move |_| {
        seen.set(seen.get() + 1);
        Ok(ints(&[1, 2]))
    });
    (calls, f)
}

// =============================================================================
// Sources
// =============================================================================

#[test]
fn test_range_forms() {
    let r = call("range", &[int(3)]).unwrap();
    assert_eq!(realize(&r), vec![int(0), int(1), int(2)]);
    let r = call("range", &[int(2), int(5)]).unwrap();
    assert_eq!(realize(&r), vec![int(2), int(3), int(4)]);
    let r = call("range", &[int(5), int(0), int(-2)]).unwrap();
    assert_eq!(realize(&r), vec![int(5), int(3), int(1)]);
    let r = call("range", &[int(3), int(3)]).unwrap();
    assert!(realize(&r).is_empty());
}

#[test]
fn test_range_rejects_non_numbers() {
    assert_call_err_contains!("range", [Value::string("x")], "range");
}

#[test]
fn test_iterate_does_not_pull_ahead() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let inc = native("inc", move |args| {
        seen.set(seen.get() + 1);
        Ok(Value::int(args[0].as_int().unwrap_or(0) + 1))
    });
    let it = call("iterate", &[inc, int(0)]).unwrap();
    let taken = call("take", &[int(3), it]).unwrap();
    assert_eq!(realize(&taken), vec![int(0), int(1), int(2)]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_repeat() {
    let r = call("repeat", &[int(3), Value::string("x")]).unwrap();
    assert_eq!(realize(&r).len(), 3);
    let r = call("repeat", &[Value::string("x")]).unwrap();
    let t = call("take", &[int(5), r]).unwrap();
    assert_eq!(realize(&t).len(), 5);
}

#[test]
fn test_repeatedly_with_count() {
    let (calls, f) = counter();
    let r = call("repeatedly", &[int(2), f]).unwrap();
    assert_eq!(realize(&r), vec![ints(&[1, 2]), ints(&[1, 2])]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_cycle() {
    let c = call("cycle", &[ints(&[1, 2])]).unwrap();
    let t = call("take", &[int(5), c]).unwrap();
    assert_eq!(realize(&t), vec![int(1), int(2), int(1), int(2), int(1)]);
    let c = call("cycle", &[Value::array([])]).unwrap();
    assert!(realize(&c).is_empty());
}

// =============================================================================
// Thunks
// =============================================================================

#[test]
fn test_lazy_calls_thunk_per_traversal() {
    let (calls, f) = counter();
    let seq = call("lazy", &[f]).unwrap();
    assert_eq!(calls.get(), 0);
    assert_eq!(realize(&seq), vec![int(1), int(2)]);
    assert_eq!(realize(&seq), vec![int(1), int(2)]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_lazy_seq_memoizes_thunk() {
    let (calls, f) = counter();
    let seq = call("lazy-seq", &[f]).unwrap();
    assert_eq!(realize(&seq), vec![int(1), int(2)]);
    assert_eq!(realize(&seq), vec![int(1), int(2)]);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_pure_sequence_retraverses_identically() {
    let r = call("range", &[int(10)]).unwrap();
    let evens = call(
        "filter",
        &[common::builtin("even?"), call("map", &[common::builtin("inc"), r]).unwrap()],
    )
    .unwrap();
    let first = realize(&evens);
    assert_eq!(first, realize(&evens));
    assert_eq!(first, vec![int(2), int(4), int(6), int(8), int(10)]);
}

#[test]
fn test_doall_and_dorun() {
    let r = call("range", &[int(3)]).unwrap();
    assert_call!("doall", [r.clone()], ints(&[0, 1, 2]));
    assert_call!("dorun", [r], Value::Nil);
}

// =============================================================================
// Reuse warnings
// =============================================================================

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn with_captured_logs<F: FnOnce()>(f: F) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.text()
}

#[test]
fn test_options_flow_into_registry() {
    let registry = Registry::with_options(Options::default().warn_on_lazy_reuse(true));
    assert_eq!(
        registry.seq_options(),
        SeqOptions::default().with_reuse_warning(true)
    );
    let r = call_with(&registry, "range", &[int(3)]).unwrap();
    match &r {
        Value::Lazy(seq) => assert!(seq.options().warn_on_reuse),
        other => panic!("expected a lazy sequence, got {:?}", other),
    }
}

#[test]
fn test_reuse_warning_is_logged() {
    let registry = Registry::with_options(Options::default().warn_on_lazy_reuse(true));
    let r = call_with(&registry, "range", &[int(3)]).unwrap();
    let logs = with_captured_logs(|| {
        realize(&r);
        realize(&r);
    });
    assert!(logs.contains("WARN"), "logs: {}", logs);
    assert!(logs.contains("more than once"), "logs: {}", logs);
    assert_eq!(logs.matches("more than once").count(), 1);
}

#[test]
fn test_no_warning_by_default() {
    let r = call("range", &[int(3)]).unwrap();
    let logs = with_captured_logs(|| {
        realize(&r);
        realize(&r);
    });
    assert!(!logs.contains("more than once"), "logs: {}", logs);
}

#[test]
fn test_warn_on_lazy_reusage_toggles_sources() {
    let registry = Registry::new();
    assert_eq!(
        call_with(&registry, "warn-on-lazy-reusage!", &[]).unwrap(),
        Value::Bool(true)
    );
    assert!(registry.seq_options().warn_on_reuse);

    let r = call_with(&registry, "range", &[int(2)]).unwrap();
    let mapped = call_with(&registry, "map", &[common::builtin("inc"), r]).unwrap();
    let logs = with_captured_logs(|| {
        realize(&mapped);
        realize(&mapped);
    });
    assert!(logs.contains("more than once"), "logs: {}", logs);

    call_with(&registry, "warn-on-lazy-reusage!", &[Value::Bool(false)]).unwrap();
    assert!(!registry.seq_options().warn_on_reuse);
}

#[test]
fn test_registries_keep_separate_options() {
    let loud = Registry::new();
    let quiet = Registry::new();
    call_with(&loud, "warn-on-lazy-reusage!", &[]).unwrap();
    assert!(loud.seq_options().warn_on_reuse);
    assert!(!quiet.seq_options().warn_on_reuse);
}
