// tessel-core - Regex built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Regular expressions: re-pattern, re-matches, re-seq, regexp?

use std::rc::Rc;

use tessel_value::{Error, LazySeq, Result, Value};

use super::strings::match_value;
use super::{arity, inherit};

fn require_regex<'a>(name: &'static str, val: &'a Value) -> Result<&'a Rc<regex::Regex>> {
    match val {
        Value::Regex(re) => Ok(re),
        other => Err(Error::type_error_in(name, "regex", other.type_name())),
    }
}

fn require_text(name: &'static str, val: &Value) -> Result<Rc<str>> {
    match val {
        Value::String(s) => Ok(Rc::clone(s)),
        other => Err(Error::type_error_in(name, "string", other.type_name())),
    }
}

/// (re-pattern s) - compile a pattern; a regex is returned as is
pub fn builtin_re_pattern(args: &[Value]) -> Result<Value> {
    arity("re-pattern", args, 1)?;
    match &args[0] {
        Value::Regex(_) => Ok(args[0].clone()),
        Value::String(s) => Value::regex(s),
        other => Err(Error::type_error_in("re-pattern", "string", other.type_name())),
    }
}

/// (re-matches re s) - the match when it spans all of s, else nil
///
/// Gives the matched string for a regex without groups, otherwise
/// `[match g1 g2 ...]`.
pub fn builtin_re_matches(args: &[Value]) -> Result<Value> {
    arity("re-matches", args, 2)?;
    let re = require_regex("re-matches", &args[0])?;
    let s = require_text("re-matches", &args[1])?;
    match re.captures(&s) {
        Some(caps) if caps.get(0).is_some_and(|m| m.start() == 0 && m.end() == s.len()) => {
            Ok(match_value(&caps))
        }
        _ => Ok(Value::Nil),
    }
}

/// (re-seq re s) - lazy sequence of successive matches
pub fn builtin_re_seq(args: &[Value]) -> Result<Value> {
    arity("re-seq", args, 2)?;
    let re = Rc::clone(require_regex("re-seq", &args[0])?);
    let s = require_text("re-seq", &args[1])?;
    Ok(Value::Lazy(LazySeq::with_options(inherit(args), move || {
        let (re, s) = (Rc::clone(&re), Rc::clone(&s));
        let mut pos = Some(0usize);
        Box::new(std::iter::from_fn(move || {
            let at = pos?;
            let caps = re.captures_at(&s, at)?;
            let whole = caps.get(0)?;
            // An empty match still has to move forward one character
            pos = if whole.end() > whole.start() {
                Some(whole.end())
            } else {
                s[whole.end()..]
                    .chars()
                    .next()
                    .map(|c| whole.end() + c.len_utf8())
            };
            Some(Ok(match_value(&caps)))
        }))
    })))
}

/// (regexp? x)
pub fn builtin_regexp_p(args: &[Value]) -> Result<Value> {
    arity("regexp?", args, 1)?;
    Ok(Value::Bool(matches!(args[0], Value::Regex(_))))
}
