//! String built-ins
//!
//! Positions and lengths count characters, not bytes. A separator that does
//! not occur yields the empty string rather than failing.

use super::helpers::{get_string, get_string_pair, Value};
use super::{Builtin, BuiltinSpec, Semantics};
use crate::term::TypedLiteral;

/// swrlb:substringBefore - substringBefore(r, s, sep)
///
/// `r` is the text of `s` before the first `sep`.
pub fn substring_before(operands: &[TypedLiteral]) -> Option<Value> {
    let (s, sep) = get_string_pair(operands)?;
    let before = match s.find(sep) {
        Some(pos) if !sep.is_empty() => &s[..pos],
        _ => "",
    };
    Some(Value::Text(before.to_string()))
}

/// swrlb:substringAfter - substringAfter(r, s, sep)
///
/// `r` is the text of `s` after the first `sep`; an empty `sep` gives `s`.
pub fn substring_after(operands: &[TypedLiteral]) -> Option<Value> {
    let (s, sep) = get_string_pair(operands)?;
    let after = match s.find(sep) {
        Some(pos) => &s[pos + sep.len()..],
        None => "",
    };
    Some(Value::Text(after.to_string()))
}

/// swrlb:stringConcat - stringConcat(r, s1, s2, ...)
pub fn string_concat(operands: &[TypedLiteral]) -> Option<Value> {
    Some(Value::Text(operands.iter().map(TypedLiteral::lexical).collect()))
}

/// swrlb:stringLength - stringLength(r, s) means r = number of characters in s
pub fn string_length(operands: &[TypedLiteral]) -> Option<Value> {
    let s = get_string(operands)?;
    let len = i64::try_from(s.chars().count()).ok()?;
    Some(Value::Number(crate::term::Number::Integer(len)))
}

/// swrlb:substring - substring(r, s, start [, length])
///
/// Positions are 1-based and rounded; characters at positions `p` with
/// `start <= p < start + length` are kept.
pub fn substring(operands: &[TypedLiteral]) -> Option<Value> {
    let (s, start, length) = match operands {
        [s, start] => (s, start, None),
        [s, start, length] => (s, start, Some(length)),
        _ => return None,
    };
    let first = xpath_round(start.as_float()?);
    let end = match length {
        Some(length) => Some(first + xpath_round(length.as_float()?)),
        None => None,
    };
    let text = s
        .lexical()
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let position = (*i + 1) as f64;
            position >= first && end.map_or(true, |end| position < end)
        })
        .map(|(_, c)| c)
        .collect();
    Some(Value::Text(text))
}

fn xpath_round(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// swrlb:upperCase - upperCase(r, s)
pub fn upper_case(operands: &[TypedLiteral]) -> Option<Value> {
    get_string(operands).map(|s| Value::Text(s.to_uppercase()))
}

/// swrlb:lowerCase - lowerCase(r, s)
pub fn lower_case(operands: &[TypedLiteral]) -> Option<Value> {
    get_string(operands).map(|s| Value::Text(s.to_lowercase()))
}

/// swrlb:contains - contains(s, t) holds when t occurs in s
pub fn contains(args: &[TypedLiteral]) -> bool {
    get_string_pair(args).map_or(false, |(s, t)| s.contains(t))
}

/// swrlb:startsWith - startsWith(s, t)
pub fn starts_with(args: &[TypedLiteral]) -> bool {
    get_string_pair(args).map_or(false, |(s, t)| s.starts_with(t))
}

/// swrlb:endsWith - endsWith(s, t)
pub fn ends_with(args: &[TypedLiteral]) -> bool {
    get_string_pair(args).map_or(false, |(s, t)| s.ends_with(t))
}

pub(super) static SPECS: &[BuiltinSpec] = &[
    BuiltinSpec::new(
        Builtin::SubstringBefore,
        "substringBefore(r, s, sep) means r is the text of s before the first sep",
        Semantics::Function(substring_before),
    ),
    BuiltinSpec::new(
        Builtin::SubstringAfter,
        "substringAfter(r, s, sep) means r is the text of s after the first sep",
        Semantics::Function(substring_after),
    ),
    BuiltinSpec::new(
        Builtin::StringConcat,
        "stringConcat(r, s1, ...) means r is the concatenation of s1, ...",
        Semantics::Function(string_concat),
    ),
    BuiltinSpec::new(
        Builtin::StringLength,
        "stringLength(r, s) means r is the number of characters in s",
        Semantics::Function(string_length),
    ),
    BuiltinSpec::new(
        Builtin::Substring,
        "substring(r, s, start [, length]) with 1-based character positions",
        Semantics::Function(substring),
    ),
    BuiltinSpec::new(
        Builtin::UpperCase,
        "upperCase(r, s) means r is s in upper case",
        Semantics::Function(upper_case),
    ),
    BuiltinSpec::new(
        Builtin::LowerCase,
        "lowerCase(r, s) means r is s in lower case",
        Semantics::Function(lower_case),
    ),
    BuiltinSpec::new(
        Builtin::Contains,
        "contains(s, t) holds when t occurs in s",
        Semantics::Test(contains),
    ),
    BuiltinSpec::new(
        Builtin::StartsWith,
        "startsWith(s, t) holds when s begins with t",
        Semantics::Test(starts_with),
    ),
    BuiltinSpec::new(
        Builtin::EndsWith,
        "endsWith(s, t) holds when s ends with t",
        Semantics::Test(ends_with),
    ),
];
