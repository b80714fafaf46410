//! Arithmetic predicates
//!
//! Each function receives the operands only; the first argument of the atom
//! is the result slot and is compared or bound by the caller.

use crate::builtins::helpers::{get_number_pair, get_numbers, Value};
use crate::term::{Number, TypedLiteral};

/// swrlb:mod - mod(r, a, b) means r = a mod b
///
/// Truncating remainder, so the result takes the sign of `a`. A zero divisor
/// has no result.
pub fn modulo(operands: &[TypedLiteral]) -> Option<Value> {
    let (a, b) = get_number_pair(operands)?;
    a.checked_rem(b).map(Value::Number)
}

/// swrlb:add - add(r, a, b, ...) means r = a + b + ...
pub fn add(operands: &[TypedLiteral]) -> Option<Value> {
    fold(operands, Number::checked_add)
}

/// swrlb:multiply - multiply(r, a, b, ...) means r = a * b * ...
pub fn multiply(operands: &[TypedLiteral]) -> Option<Value> {
    fold(operands, Number::checked_mul)
}

/// swrlb:subtract - subtract(r, a, b) means r = a - b
pub fn subtract(operands: &[TypedLiteral]) -> Option<Value> {
    let (a, b) = get_number_pair(operands)?;
    a.checked_sub(b).map(Value::Number)
}

/// swrlb:abs - abs(r, a) means r = |a|
pub fn abs(operands: &[TypedLiteral]) -> Option<Value> {
    match operands {
        [a] => a.as_number()?.checked_abs().map(Value::Number),
        _ => None,
    }
}

fn fold(operands: &[TypedLiteral], op: fn(Number, Number) -> Option<Number>) -> Option<Value> {
    let numbers = get_numbers(operands)?;
    let (first, rest) = numbers.split_first()?;
    rest.iter()
        .try_fold(*first, |acc, n| op(acc, *n))
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(tokens: &[&str]) -> Vec<TypedLiteral> {
        tokens.iter().map(|t| TypedLiteral::parse(t)).collect()
    }

    #[test]
    fn test_modulo() {
        assert_eq!(
            modulo(&ops(&["13^^int", "5^^int"])),
            Some(Value::Number(Number::Integer(3)))
        );
        assert_eq!(
            modulo(&ops(&["13.0^^float", "5^^decimal"])),
            Some(Value::Number(Number::Float(3.0)))
        );
        assert_eq!(
            modulo(&ops(&["-2^^int", "5^^decimal"])),
            Some(Value::Number(Number::Integer(-2)))
        );
    }

    #[test]
    fn test_modulo_undefined() {
        assert_eq!(modulo(&ops(&["2^^int", "0^^int"])), None);
        assert_eq!(modulo(&ops(&["two", "5^^int"])), None);
        assert_eq!(modulo(&ops(&["2^^int"])), None);
    }

    #[test]
    fn test_add_and_multiply_are_variadic() {
        assert_eq!(
            add(&ops(&["1", "2", "3"])),
            Some(Value::Number(Number::Integer(6)))
        );
        assert_eq!(
            multiply(&ops(&["2", "3", "0.5"])),
            Some(Value::Number(Number::Float(3.0)))
        );
        assert_eq!(add(&ops(&["1", "x"])), None);
    }

    #[test]
    fn test_overflow_has_no_result() {
        let max = i64::MAX.to_string();
        let min = i64::MIN.to_string();
        assert_eq!(add(&ops(&[max.as_str(), "1"])), None);
        assert_eq!(subtract(&ops(&[min.as_str(), "1"])), None);
    }

    #[test]
    fn test_subtract_and_abs() {
        assert_eq!(
            subtract(&ops(&["10", "4"])),
            Some(Value::Number(Number::Integer(6)))
        );
        assert_eq!(abs(&ops(&["-7"])), Some(Value::Number(Number::Integer(7))));
        assert_eq!(abs(&ops(&["-1.5"])), Some(Value::Number(Number::Float(1.5))));
    }
}
