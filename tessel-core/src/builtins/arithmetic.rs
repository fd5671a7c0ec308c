// tessel-core - Arithmetic built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Arithmetic operations: +, -, *, /, quot, rem, mod, inc, dec, max, min
//! and the numeric predicates zero?, pos?, neg?, even?, odd?.
//!
//! ## Integer Overflow Behaviour
//!
//! Integer operands use checked arithmetic and overflow is an error. As
//! soon as a float is involved the operation switches to `f64` without
//! overflow checks. `/` always divides as floats unless both operands are
//! integers that divide exactly.

use tessel_value::{Error, Result, Value};

use super::{arity, arity_at_least};

// ============================================================================
// Helper functions for numeric arithmetic
// ============================================================================

#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(op: &'static str, val: &Value) -> Result<Num> {
        match val {
            Value::Int(n) => Ok(Num::Int(*n)),
            Value::Float(f) => Ok(Num::Float(*f)),
            other => Err(Error::type_error_in(op, "number", other.type_name())),
        }
    }

    fn to_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(n) => Value::int(n),
            Num::Float(f) => Value::float(f),
        }
    }
}

/// Combine two numbers, integers through `int_op` (None meaning overflow).
fn combine(
    op: &'static str,
    a: Num,
    b: Num,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Num> {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => int_op(x, y).map(Num::Int).ok_or(Error::Overflow(op)),
        _ => Ok(Num::Float(float_op(a.to_f64(), b.to_f64()))),
    }
}

fn fold_numbers(
    op: &'static str,
    identity: Num,
    args: &[Value],
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    let mut acc = identity;
    for arg in args {
        acc = combine(op, acc, Num::of(op, arg)?, int_op, float_op)?;
    }
    Ok(acc.into_value())
}

// ============================================================================
// Basic operations
// ============================================================================

/// (+ & xs)
pub fn builtin_add(args: &[Value]) -> Result<Value> {
    fold_numbers("+", Num::Int(0), args, i64::checked_add, |a, b| a + b)
}

/// (* & xs)
pub fn builtin_mul(args: &[Value]) -> Result<Value> {
    fold_numbers("*", Num::Int(1), args, i64::checked_mul, |a, b| a * b)
}

/// (- x & xs) - a single argument is returned unchanged
pub fn builtin_sub(args: &[Value]) -> Result<Value> {
    arity_at_least("-", args, 1)?;
    let first = Num::of("-", &args[0])?;
    let mut acc = first;
    for arg in &args[1..] {
        acc = combine("-", acc, Num::of("-", arg)?, i64::checked_sub, |a, b| a - b)?;
    }
    Ok(acc.into_value())
}

/// (/ x & xs) - a single argument gives its reciprocal
pub fn builtin_div(args: &[Value]) -> Result<Value> {
    arity_at_least("/", args, 1)?;
    let (mut acc, rest) = match args {
        [only] => (Num::Int(1), std::slice::from_ref(only)),
        [first, rest @ ..] => (Num::of("/", first)?, rest),
        [] => return Err(Error::arity_at_least("/", 1, 0)),
    };
    for arg in rest {
        acc = match (acc, Num::of("/", arg)?) {
            (_, Num::Int(0)) => return Err(Error::DivisionByZero),
            (Num::Int(x), Num::Int(y)) if x.checked_rem(y).is_none_or(|r| r == 0) => {
                Num::Int(x.checked_div(y).ok_or(Error::Overflow("/"))?)
            }
            (x, y) => Num::Float(x.to_f64() / y.to_f64()),
        };
    }
    Ok(acc.into_value())
}

fn integer_pair(op: &'static str, args: &[Value]) -> Result<(Num, Num)> {
    arity(op, args, 2)?;
    let (a, b) = (Num::of(op, &args[0])?, Num::of(op, &args[1])?);
    if matches!(b, Num::Int(0)) || (matches!(b, Num::Float(f) if f == 0.0)) {
        return Err(Error::DivisionByZero);
    }
    Ok((a, b))
}

/// (quot n d) - truncating division
pub fn builtin_quot(args: &[Value]) -> Result<Value> {
    let (a, b) = integer_pair("quot", args)?;
    let q = combine("quot", a, b, i64::checked_div, |x, y| (x / y).trunc())?;
    Ok(q.into_value())
}

/// (rem n d) - remainder with the sign of n
pub fn builtin_rem(args: &[Value]) -> Result<Value> {
    let (a, b) = integer_pair("rem", args)?;
    let r = combine("rem", a, b, i64::checked_rem, |x, y| x % y)?;
    Ok(r.into_value())
}

/// (mod n d) - modulus with the sign of d
pub fn builtin_mod(args: &[Value]) -> Result<Value> {
    let (a, b) = integer_pair("mod", args)?;
    let m = combine(
        "mod",
        a,
        b,
        |x, y| {
            let r = x.checked_rem(y)?;
            Some(if r != 0 && (r < 0) != (y < 0) { r + y } else { r })
        },
        |x, y| {
            let r = x % y;
            if r != 0.0 && (r < 0.0) != (y < 0.0) { r + y } else { r }
        },
    )?;
    Ok(m.into_value())
}

/// (inc x)
pub fn builtin_inc(args: &[Value]) -> Result<Value> {
    arity("inc", args, 1)?;
    let n = combine("inc", Num::of("inc", &args[0])?, Num::Int(1), i64::checked_add, |a, b| {
        a + b
    })?;
    Ok(n.into_value())
}

/// (dec x)
pub fn builtin_dec(args: &[Value]) -> Result<Value> {
    arity("dec", args, 1)?;
    let n = combine("dec", Num::of("dec", &args[0])?, Num::Int(1), i64::checked_sub, |a, b| {
        a - b
    })?;
    Ok(n.into_value())
}

fn extreme(op: &'static str, args: &[Value], prefer_first: fn(f64, f64) -> bool) -> Result<Value> {
    arity_at_least(op, args, 1)?;
    let mut best = Num::of(op, &args[0])?;
    for arg in &args[1..] {
        let n = Num::of(op, arg)?;
        if n.to_f64().is_nan() {
            return Ok(Value::float(f64::NAN));
        }
        if !prefer_first(best.to_f64(), n.to_f64()) {
            best = n;
        }
    }
    Ok(best.into_value())
}

/// (max x & xs)
pub fn builtin_max(args: &[Value]) -> Result<Value> {
    extreme("max", args, |best, n| best >= n)
}

/// (min x & xs)
pub fn builtin_min(args: &[Value]) -> Result<Value> {
    extreme("min", args, |best, n| best <= n)
}

// ============================================================================
// Numeric predicates
// ============================================================================

fn number_test(op: &'static str, args: &[Value], test: fn(f64) -> bool) -> Result<Value> {
    arity(op, args, 1)?;
    Ok(Value::Bool(test(Num::of(op, &args[0])?.to_f64())))
}

/// (zero? x)
pub fn builtin_zero_p(args: &[Value]) -> Result<Value> {
    number_test("zero?", args, |n| n == 0.0)
}

/// (pos? x)
pub fn builtin_pos_p(args: &[Value]) -> Result<Value> {
    number_test("pos?", args, |n| n > 0.0)
}

/// (neg? x)
pub fn builtin_neg_p(args: &[Value]) -> Result<Value> {
    number_test("neg?", args, |n| n < 0.0)
}

fn parity(op: &'static str, args: &[Value]) -> Result<i64> {
    arity(op, args, 1)?;
    args[0]
        .as_int()
        .ok_or_else(|| Error::type_error_in(op, "integer", args[0].type_name()))
}

/// (even? n)
pub fn builtin_even_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(parity("even?", args)? % 2 == 0))
}

/// (odd? n)
pub fn builtin_odd_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(parity("odd?", args)? % 2 != 0))
}
