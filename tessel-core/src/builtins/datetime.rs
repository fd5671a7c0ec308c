// tessel-core - Timing built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! system-time

use std::sync::OnceLock;
use std::time::Instant;

use tessel_value::{Result, Value};

use super::arity;

static ORIGIN: OnceLock<Instant> = OnceLock::new();

// ============================================================================
// Time Functions
// ============================================================================

/// (system-time) - monotonic milliseconds since first use, as a float
pub fn builtin_system_time(args: &[Value]) -> Result<Value> {
    arity("system-time", args, 0)?;
    let origin = ORIGIN.get_or_init(Instant::now);
    Ok(Value::float(origin.elapsed().as_secs_f64() * 1000.0))
}
