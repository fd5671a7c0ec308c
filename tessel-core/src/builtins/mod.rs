// tessel-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for Tessel.
//!
//! Each submodule holds one family of functions with the uniform signature
//! `fn(&[Value]) -> Result<Value>`. [`register_builtins`] binds all of them
//! under their collection-model names.

// Value keys may hold interior-mutable containers
#![allow(clippy::mutable_key_type)]

pub mod arithmetic;
pub mod atoms;
pub mod collection_constructors;
pub mod collection_utils;
pub mod collections;
pub mod comparators;
pub mod datetime;
pub mod exceptions;
pub mod higher_order;
pub mod io;
pub mod laziness;
pub mod metadata;
pub mod patterns;
pub mod predicates;
pub mod random;
pub mod reduction;
pub mod sequences;
pub mod strings;

use tessel_value::{Error, LazySeq, Result, SeqIter, SeqOptions, Value};

use crate::apply::apply;
use crate::registry::Registry;

use arithmetic::{
    builtin_add, builtin_dec, builtin_div, builtin_even_p, builtin_inc, builtin_max, builtin_min,
    builtin_mod, builtin_mul, builtin_neg_p, builtin_odd_p, builtin_pos_p, builtin_quot,
    builtin_rem, builtin_sub, builtin_zero_p,
};
use atoms::{
    builtin_add_watch, builtin_atom, builtin_deref, builtin_remove_watch, builtin_reset,
    builtin_swap,
};
use collection_constructors::{
    builtin_aclone, builtin_alength, builtin_aset, builtin_list, builtin_object, builtin_set,
    builtin_subvec, builtin_vec, builtin_vector,
};
use collection_utils::{
    builtin_assoc_in, builtin_assoc_in_bang, builtin_find, builtin_frequencies, builtin_get_in,
    builtin_group_by, builtin_key, builtin_keys, builtin_merge, builtin_merge_with,
    builtin_select_keys, builtin_update, builtin_update_bang, builtin_update_in, builtin_val,
    builtin_vals,
};
use collections::{
    builtin_assoc, builtin_assoc_bang, builtin_conj, builtin_conj_bang, builtin_contains_p,
    builtin_count, builtin_disj, builtin_disj_bang, builtin_dissoc, builtin_dissoc_bang,
    builtin_empty, builtin_get, builtin_into,
};
use comparators::{
    builtin_compare, builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt, builtin_not_eq,
    builtin_sort, builtin_sort_by,
};
use datetime::builtin_system_time;
use exceptions::{builtin_ex_cause, builtin_ex_data, builtin_ex_info, builtin_ex_message};
use higher_order::{
    builtin_apply, builtin_comp, builtin_complement, builtin_constantly, builtin_every_p,
    builtin_every_pred, builtin_filter, builtin_filterv, builtin_fnil, builtin_identity,
    builtin_juxt, builtin_keep, builtin_keep_indexed, builtin_map, builtin_map_indexed,
    builtin_mapcat, builtin_mapv, builtin_not_any_p, builtin_not_every_p, builtin_partial,
    builtin_remove, builtin_some, builtin_some_fn,
};
use io::{builtin_pr_str, builtin_str};
use laziness::{
    builtin_doall, builtin_dorun, cycle_with, iterate_with, lazy_seq_with, lazy_with, range_with,
    repeat_with, repeatedly_with, warn_on_lazy_reusage,
};
use metadata::{builtin_meta, builtin_with_meta};
use patterns::{builtin_re_matches, builtin_re_pattern, builtin_re_seq, builtin_regexp_p};
use predicates::{
    builtin_array_p, builtin_boolean, builtin_boolean_p, builtin_coll_p, builtin_counted_p,
    builtin_false_p, builtin_fn_p, builtin_identical_p, builtin_int_p, builtin_list_p,
    builtin_map_p, builtin_nan_p, builtin_nil_p, builtin_not, builtin_number_p, builtin_object_p,
    builtin_seqable_p, builtin_set_p, builtin_some_p, builtin_string_p, builtin_true_p,
};
use random::{builtin_rand_int, builtin_rand_nth, builtin_shuffle};
use reduction::{builtin_reduce, builtin_reduce_kv, builtin_reduced, builtin_reduced_p};
use sequences::{
    builtin_bounded_count, builtin_butlast, builtin_concat, builtin_cons, builtin_distinct,
    builtin_drop, builtin_drop_last, builtin_drop_while, builtin_empty_p, builtin_ffirst,
    builtin_first, builtin_interleave, builtin_interpose, builtin_last, builtin_next, builtin_nth,
    builtin_partition, builtin_partition_all, builtin_rest, builtin_reverse, builtin_second,
    builtin_seq, builtin_split_at, builtin_split_with, builtin_take, builtin_take_nth,
    builtin_take_while,
};
use strings::{
    builtin_blank_p, builtin_join, builtin_split, builtin_starts_with_p, builtin_subs,
    builtin_trim, builtin_triml, builtin_trimr,
};

// ============================================================================
// Argument helpers
// ============================================================================

/// Require exactly `n` arguments.
pub(crate) fn arity(name: &'static str, args: &[Value], n: usize) -> Result<()> {
    if args.len() != n {
        return Err(Error::arity_named(name, n, args.len()));
    }
    Ok(())
}

/// Require between `min` and `max` arguments, inclusive.
pub(crate) fn arity_range(name: &'static str, args: &[Value], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        return Err(Error::arity_range(name, min, max, args.len()));
    }
    Ok(())
}

/// Require at least `min` arguments.
pub(crate) fn arity_at_least(name: &'static str, args: &[Value], min: usize) -> Result<()> {
    if args.len() < min {
        return Err(Error::arity_at_least(name, min, args.len()));
    }
    Ok(())
}

pub(crate) fn require_int(name: &'static str, val: &Value) -> Result<i64> {
    match val {
        Value::Int(n) => Ok(*n),
        Value::Float(_) => val
            .as_int()
            .ok_or_else(|| Error::type_error_in(name, "integer", val.type_name())),
        other => Err(Error::type_error_in(name, "integer", other.type_name())),
    }
}

/// An element count; negative counts are zero.
pub(crate) fn require_count(name: &'static str, val: &Value) -> Result<usize> {
    let n = require_int(name, val)?;
    Ok(usize::try_from(n).unwrap_or(0))
}

/// Whether `(pred x)` is truthy.
pub(crate) fn truthy(pred: &Value, x: &Value) -> Result<bool> {
    Ok(apply(pred, std::slice::from_ref(x))?.is_truthy())
}

// ============================================================================
// Lazy sequence helpers
// ============================================================================

/// Options for a sequence derived from `sources`: those of the first lazy
/// source, else the defaults.
pub(crate) fn inherit(sources: &[Value]) -> SeqOptions {
    sources
        .iter()
        .find_map(|v| match v {
            Value::Lazy(seq) => Some(seq.options()),
            _ => None,
        })
        .unwrap_or_default()
}

/// A lazy sequence derived from `sources`.
pub(crate) fn lazy_from<F>(sources: &[Value], generator: F) -> Value
where
    F: Fn() -> SeqIter + 'static,
{
    Value::Lazy(LazySeq::with_options(inherit(sources), generator))
}

/// End a traversal after its first error.
pub(crate) fn stop_after_error(src: SeqIter) -> SeqIter {
    let mut src = src;
    let mut failed = false;
    Box::new(std::iter::from_fn(move || {
        if failed {
            return None;
        }
        let item = src.next()?;
        failed = item.is_err();
        Some(item)
    }))
}

/// Bind a source constructor to the registry's live options.
fn define_source(
    registry: &Registry,
    name: &'static str,
    ctor: fn(SeqOptions, &[Value]) -> Result<Value>,
) {
    let options = registry.seq_options_handle();
    registry.define_native(name, move |args| ctor(options.get(), args));
}

// ============================================================================
// Registration
// ============================================================================

/// Register all built-in functions in the given registry.
pub fn register_builtins(registry: &Registry) {
    // Arithmetic
    registry.define_native("+", builtin_add);
    registry.define_native("-", builtin_sub);
    registry.define_native("*", builtin_mul);
    registry.define_native("/", builtin_div);
    registry.define_native("quot", builtin_quot);
    registry.define_native("rem", builtin_rem);
    registry.define_native("mod", builtin_mod);
    registry.define_native("inc", builtin_inc);
    registry.define_native("dec", builtin_dec);
    registry.define_native("max", builtin_max);
    registry.define_native("min", builtin_min);

    // Numeric predicates
    registry.define_native("zero?", builtin_zero_p);
    registry.define_native("pos?", builtin_pos_p);
    registry.define_native("neg?", builtin_neg_p);
    registry.define_native("even?", builtin_even_p);
    registry.define_native("odd?", builtin_odd_p);

    // Comparison
    registry.define_native("=", builtin_eq);
    registry.define_native("not=", builtin_not_eq);
    registry.define_native("<", builtin_lt);
    registry.define_native(">", builtin_gt);
    registry.define_native("<=", builtin_le);
    registry.define_native(">=", builtin_ge);
    registry.define_native("compare", builtin_compare);
    registry.define_native("sort", builtin_sort);
    registry.define_native("sort-by", builtin_sort_by);

    // Type predicates
    registry.define_native("nil?", builtin_nil_p);
    registry.define_native("some?", builtin_some_p);
    registry.define_native("boolean?", builtin_boolean_p);
    registry.define_native("number?", builtin_number_p);
    registry.define_native("int?", builtin_int_p);
    registry.define_native("integer?", builtin_int_p);
    registry.define_native("string?", builtin_string_p);
    registry.define_native("fn?", builtin_fn_p);
    registry.define_native("coll?", builtin_coll_p);
    registry.define_native("vector?", builtin_array_p);
    registry.define_native("array?", builtin_array_p);
    registry.define_native("list?", builtin_list_p);
    registry.define_native("map?", builtin_map_p);
    registry.define_native("object?", builtin_object_p);
    registry.define_native("set?", builtin_set_p);
    registry.define_native("seqable?", builtin_seqable_p);
    registry.define_native("counted?", builtin_counted_p);
    registry.define_native("NaN?", builtin_nan_p);
    registry.define_native("true?", builtin_true_p);
    registry.define_native("false?", builtin_false_p);
    registry.define_native("identical?", builtin_identical_p);

    // Logic
    registry.define_native("not", builtin_not);
    registry.define_native("boolean", builtin_boolean);

    // Collection constructors
    registry.define_native("vector", builtin_vector);
    registry.define_native("list", builtin_list);
    registry.define_native("object", builtin_object);
    registry.define_native("vec", builtin_vec);
    registry.define_native("set", builtin_set);
    registry.define_native("subvec", builtin_subvec);
    registry.define_native("alength", builtin_alength);
    registry.define_native("aset", builtin_aset);
    registry.define_native("aclone", builtin_aclone);

    // Collections
    registry.define_native("get", builtin_get);
    registry.define_native("assoc", builtin_assoc);
    registry.define_native("assoc!", builtin_assoc_bang);
    registry.define_native("conj", builtin_conj);
    registry.define_native("conj!", builtin_conj_bang);
    registry.define_native("dissoc", builtin_dissoc);
    registry.define_native("dissoc!", builtin_dissoc_bang);
    registry.define_native("disj", builtin_disj);
    registry.define_native("disj!", builtin_disj_bang);
    registry.define_native("contains?", builtin_contains_p);
    registry.define_native("empty", builtin_empty);
    registry.define_native("into", builtin_into);
    registry.define_native("count", builtin_count);

    // Collection utilities
    registry.define_native("assoc-in", builtin_assoc_in);
    registry.define_native("assoc-in!", builtin_assoc_in_bang);
    registry.define_native("get-in", builtin_get_in);
    registry.define_native("update-in", builtin_update_in);
    registry.define_native("update", builtin_update);
    registry.define_native("update!", builtin_update_bang);
    registry.define_native("select-keys", builtin_select_keys);
    registry.define_native("merge", builtin_merge);
    registry.define_native("merge-with", builtin_merge_with);
    registry.define_native("keys", builtin_keys);
    registry.define_native("vals", builtin_vals);
    registry.define_native("find", builtin_find);
    registry.define_native("key", builtin_key);
    registry.define_native("val", builtin_val);
    registry.define_native("group-by", builtin_group_by);
    registry.define_native("frequencies", builtin_frequencies);

    // Sequence access
    registry.define_native("first", builtin_first);
    registry.define_native("second", builtin_second);
    registry.define_native("ffirst", builtin_ffirst);
    registry.define_native("last", builtin_last);
    registry.define_native("nth", builtin_nth);
    registry.define_native("rest", builtin_rest);
    registry.define_native("next", builtin_next);
    registry.define_native("butlast", builtin_butlast);
    registry.define_native("seq", builtin_seq);
    registry.define_native("empty?", builtin_empty_p);
    registry.define_native("bounded-count", builtin_bounded_count);

    // Lazy composition
    registry.define_native("cons", builtin_cons);
    registry.define_native("concat", builtin_concat);
    registry.define_native("take", builtin_take);
    registry.define_native("drop", builtin_drop);
    registry.define_native("take-while", builtin_take_while);
    registry.define_native("drop-while", builtin_drop_while);
    registry.define_native("take-nth", builtin_take_nth);
    registry.define_native("drop-last", builtin_drop_last);
    registry.define_native("distinct", builtin_distinct);
    registry.define_native("partition", builtin_partition);
    registry.define_native("partition-all", builtin_partition_all);
    registry.define_native("interleave", builtin_interleave);
    registry.define_native("interpose", builtin_interpose);
    registry.define_native("split-at", builtin_split_at);
    registry.define_native("split-with", builtin_split_with);
    registry.define_native("reverse", builtin_reverse);
    registry.define_native("replace", sequences::builtin_replace);

    // Lazy sources carry the registry's options
    define_source(registry, "lazy", lazy_with);
    define_source(registry, "lazy-seq", lazy_seq_with);
    define_source(registry, "range", range_with);
    define_source(registry, "iterate", iterate_with);
    define_source(registry, "repeat", repeat_with);
    define_source(registry, "repeatedly", repeatedly_with);
    define_source(registry, "cycle", cycle_with);
    let options = registry.seq_options_handle();
    registry.define_native("warn-on-lazy-reusage!", move |args| {
        warn_on_lazy_reusage(&options, args)
    });
    registry.define_native("doall", builtin_doall);
    registry.define_native("dorun", builtin_dorun);

    // Higher-order
    registry.define_native("map", builtin_map);
    registry.define_native("mapv", builtin_mapv);
    registry.define_native("mapcat", builtin_mapcat);
    registry.define_native("map-indexed", builtin_map_indexed);
    registry.define_native("keep", builtin_keep);
    registry.define_native("keep-indexed", builtin_keep_indexed);
    registry.define_native("filter", builtin_filter);
    registry.define_native("filterv", builtin_filterv);
    registry.define_native("remove", builtin_remove);
    registry.define_native("apply", builtin_apply);
    registry.define_native("comp", builtin_comp);
    registry.define_native("partial", builtin_partial);
    registry.define_native("complement", builtin_complement);
    registry.define_native("constantly", builtin_constantly);
    registry.define_native("identity", builtin_identity);
    registry.define_native("juxt", builtin_juxt);
    registry.define_native("fnil", builtin_fnil);
    registry.define_native("every?", builtin_every_p);
    registry.define_native("not-every?", builtin_not_every_p);
    registry.define_native("some", builtin_some);
    registry.define_native("not-any?", builtin_not_any_p);
    registry.define_native("every-pred", builtin_every_pred);
    registry.define_native("some-fn", builtin_some_fn);

    // Reduction
    registry.define_native("reduce", builtin_reduce);
    registry.define_native("reduce-kv", builtin_reduce_kv);
    registry.define_native("reduced", builtin_reduced);
    registry.define_native("reduced?", builtin_reduced_p);

    // Atoms
    registry.define_native("atom", builtin_atom);
    registry.define_native("deref", builtin_deref);
    registry.define_native("reset!", builtin_reset);
    registry.define_native("swap!", builtin_swap);
    registry.define_native("add-watch", builtin_add_watch);
    registry.define_native("remove-watch", builtin_remove_watch);

    // Strings
    registry.define_native("str", builtin_str);
    registry.define_native("pr-str", builtin_pr_str);
    registry.define_native("subs", builtin_subs);
    registry.define_native("string/blank?", builtin_blank_p);
    registry.define_native("string/join", builtin_join);
    registry.define_native("string/trim", builtin_trim);
    registry.define_native("string/triml", builtin_triml);
    registry.define_native("string/trimr", builtin_trimr);
    registry.define_native("string/split", builtin_split);
    registry.define_native("string/starts-with?", builtin_starts_with_p);
    registry.define_native("string/replace", strings::builtin_replace);

    // Regex
    registry.define_native("re-pattern", builtin_re_pattern);
    registry.define_native("re-matches", builtin_re_matches);
    registry.define_native("re-seq", builtin_re_seq);
    registry.define_native("regexp?", builtin_regexp_p);

    // Exceptions
    registry.define_native("ex-info", builtin_ex_info);
    registry.define_native("ex-message", builtin_ex_message);
    registry.define_native("ex-data", builtin_ex_data);
    registry.define_native("ex-cause", builtin_ex_cause);

    // Metadata
    registry.define_native("meta", builtin_meta);
    registry.define_native("with-meta", builtin_with_meta);

    // Random and time
    registry.define_native("rand-int", builtin_rand_int);
    registry.define_native("rand-nth", builtin_rand_nth);
    registry.define_native("shuffle", builtin_shuffle);
    registry.define_native("system-time", builtin_system_time);
}
