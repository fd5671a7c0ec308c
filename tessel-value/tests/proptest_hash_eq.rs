// tessel-value - Property-based tests for Hash/Eq consistency
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Property-based tests for Hash/Eq consistency.
//!
//! Tests the hash contract: if a == b, then hash(a) == hash(b). Map keys
//! and set members rely on it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use tessel_value::Value;

fn compute_hash(val: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    val.hash(&mut hasher);
    hasher.finish()
}

fn assert_hash_eq_consistent(v1: &Value, v2: &Value, msg: &str) {
    assert_eq!(v1, v2, "{} - values should be equal", msg);
    assert_eq!(
        compute_hash(v1),
        compute_hash(v2),
        "{} - hashes should be equal",
        msg
    );
}

// =============================================================================
// Numbers
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Int and Float that are numerically equal hash the same
    #[test]
    fn int_float_hash_consistency(n in -1_000_000i64..1_000_000) {
        assert_hash_eq_consistent(&Value::int(n), &Value::float(n as f64), "int/float");
    }

    /// Any pair of equal numbers hashes the same, including large ones
    #[test]
    fn equal_numbers_hash_equal(n in any::<i64>(), f in any::<f64>()) {
        let (a, b) = (Value::int(n), Value::float(f));
        if a == b {
            prop_assert_eq!(compute_hash(&a), compute_hash(&b));
        }
        let c = Value::float(n as f64);
        if a == c {
            prop_assert_eq!(compute_hash(&a), compute_hash(&c));
        }
    }

    /// Strings hash by content
    #[test]
    fn string_hash_consistency(s in ".{0,20}") {
        assert_hash_eq_consistent(&Value::string(&s), &Value::string(s.clone()), "string");
    }
}

#[test]
fn test_extreme_integral_floats() {
    let top = Value::float(i64::MAX as f64);
    assert_hash_eq_consistent(&Value::int(i64::MAX), &top, "i64::MAX");
    assert_hash_eq_consistent(&Value::int(i64::MIN), &Value::float(i64::MIN as f64), "i64::MIN");
    assert_hash_eq_consistent(&Value::int(0), &Value::float(-0.0), "negative zero");
}

// =============================================================================
// Keys in containers
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A float key finds the entry stored under the equal int
    #[test]
    fn map_lookup_across_numeric_types(n in -1000i64..1000, v in any::<i64>()) {
        let m = Value::map([(Value::int(n), Value::int(v))]);
        let found = m.as_container().and_then(|c| c.lookup(&Value::float(n as f64)));
        prop_assert_eq!(found, Some(Value::int(v)));
    }

    /// A set holds numerically equal members once
    #[test]
    fn set_dedups_across_numeric_types(n in -1000i64..1000) {
        let set = Value::set([Value::int(n), Value::float(n as f64)]);
        prop_assert_eq!(set.as_container().and_then(|c| c.size()), Some(1));
    }
}
