// tessel-core - Collection and sequence runtime for Tessel
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # tessel-core
//!
//! The flat function surface of the Tessel runtime: polymorphic collection
//! operations over arrays, lists, objects, maps and sets, a lazy sequence
//! library, atoms, string helpers and a JSON-ish printer.
//!
//! Every builtin has the uniform signature `fn(&[Value]) -> Result<Value>`
//! and is reachable both directly (`builtins::collections::builtin_assoc`) and by name
//! through a [`Registry`].

pub mod apply;
pub mod builtins;
pub mod config;
pub mod registry;

pub use apply::{apply, make_native_fn};
pub use builtins::exceptions::error_value;
pub use builtins::io::pr_str_1 as pr_str;
pub use builtins::register_builtins;
pub use config::Options;
pub use registry::Registry;

// Re-export value types for convenience
pub use tessel_value::{
    Atom, Container, Error, Kind, LazySeq, NativeFn, Result, SeqIter, SeqOptions, Value,
};
