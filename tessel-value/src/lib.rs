// tessel-value - Data model for the Tessel runtime
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # tessel-value
//!
//! Dynamic values for Tessel: mutable container cells, the closed set of
//! container kinds with their dispatch trait, restartable lazy sequences,
//! atoms, native functions and the shared error type.

pub mod atom;
pub mod cells;
pub mod convert;
pub mod error;
pub mod exception;
pub mod function;
pub mod kind;
pub mod lazy;
pub mod value;

pub use atom::Atom;
pub use cells::{ArrayCell, ListCell, MapCell, ObjectCell, SetCell};
pub use error::{AritySpec, Error, Result};
pub use exception::ExceptionInfo;
pub use function::{NativeFn, NativeFnImpl};
pub use kind::{Container, Kind};
pub use lazy::{Cons, LazySeq, SeqIter, SeqOptions};
pub use value::{Value, format_number, property_key};
