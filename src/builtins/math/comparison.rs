//! Comparison predicates
//!
//! Two numeric operands compare by value, two non-numeric operands by lexical
//! form. A numeric operand never orders against a non-numeric one.

use std::cmp::Ordering;

use crate::term::TypedLiteral;

fn compare(args: &[TypedLiteral]) -> Option<Ordering> {
    let [a, b] = args else {
        return None;
    };
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.numeric_cmp(y),
        (None, None) => Some(a.lexical().cmp(b.lexical())),
        _ => None,
    }
}

/// swrlb:equal - equal(a, b)
///
/// Numeric equality when both sides coerce, literal equality otherwise.
pub fn equal(args: &[TypedLiteral]) -> bool {
    let [a, b] = args else {
        return false;
    };
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.numeric_eq(y),
        _ => a == b,
    }
}

/// swrlb:notEqual - notEqual(a, b)
pub fn not_equal(args: &[TypedLiteral]) -> bool {
    args.len() == 2 && !equal(args)
}

/// swrlb:lessThan - lessThan(a, b) means a < b
pub fn less_than(args: &[TypedLiteral]) -> bool {
    compare(args) == Some(Ordering::Less)
}

/// swrlb:lessThanOrEqual - lessThanOrEqual(a, b) means a <= b
pub fn less_than_or_equal(args: &[TypedLiteral]) -> bool {
    matches!(compare(args), Some(Ordering::Less | Ordering::Equal))
}

/// swrlb:greaterThan - greaterThan(a, b) means a > b
pub fn greater_than(args: &[TypedLiteral]) -> bool {
    compare(args) == Some(Ordering::Greater)
}

/// swrlb:greaterThanOrEqual - greaterThanOrEqual(a, b) means a >= b
pub fn greater_than_or_equal(args: &[TypedLiteral]) -> bool {
    matches!(compare(args), Some(Ordering::Greater | Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> [TypedLiteral; 2] {
        [TypedLiteral::parse(a), TypedLiteral::parse(b)]
    }

    #[test]
    fn test_equal_numeric() {
        assert!(equal(&pair("3^^int", "3.0^^float")));
        assert!(!equal(&pair("3^^int", "4^^int")));
        assert!(not_equal(&pair("3^^int", "4^^int")));
    }

    #[test]
    fn test_equal_literal() {
        assert!(equal(&pair("a@en", "a@en")));
        assert!(!equal(&pair("a@en", "a@fr")));
        assert!(!equal(&pair("3", "three")));
    }

    #[test]
    fn test_ordering() {
        assert!(less_than(&pair("2", "10")));
        assert!(greater_than(&pair("10.5^^double", "10^^int")));
        assert!(less_than_or_equal(&pair("3^^int", "3.0^^float")));
        assert!(greater_than_or_equal(&pair("b", "a")));
        assert!(less_than(&pair("apple", "banana")));
    }

    #[test]
    fn test_mixed_never_orders() {
        assert!(!less_than(&pair("2", "banana")));
        assert!(!greater_than(&pair("2", "banana")));
        assert!(!less_than_or_equal(&pair("2", "banana")));
    }
}
