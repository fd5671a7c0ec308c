// tessel-core - Random built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Random operations: rand-int, rand-nth, shuffle
//!
//! All draw from `rand`'s thread-local generator.

use rand::Rng;
use rand::seq::SliceRandom;

use tessel_value::{Error, Result, Value};

use super::arity;
use super::collections::count_of;
use super::sequences::builtin_nth;

fn random_index(n: f64) -> i64 {
    (rand::thread_rng().r#gen::<f64>() * n).floor() as i64
}

/// (rand-int n) - integer in [0, n), or in (n, 0] for negative n
pub fn builtin_rand_int(args: &[Value]) -> Result<Value> {
    arity("rand-int", args, 1)?;
    let n = args[0]
        .as_f64()
        .ok_or_else(|| Error::type_error_in("rand-int", "number", args[0].type_name()))?;
    Ok(Value::int(random_index(n)))
}

/// (rand-nth coll) - nil for an empty collection
pub fn builtin_rand_nth(args: &[Value]) -> Result<Value> {
    arity("rand-nth", args, 1)?;
    let len = count_of("rand-nth", &args[0])?;
    if len == 0 {
        return Ok(Value::Nil);
    }
    let index = random_index(len as f64);
    builtin_nth(&[args[0].clone(), Value::int(index)])
}

/// (shuffle coll) - new array in random order
pub fn builtin_shuffle(args: &[Value]) -> Result<Value> {
    arity("shuffle", args, 1)?;
    let mut items = args[0].to_vec()?;
    items.shuffle(&mut rand::thread_rng());
    Ok(Value::array(items))
}
