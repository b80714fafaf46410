//! Shared utility functions for builtin predicate implementations
//!
//! This module provides common operations used across the predicate tables:
//! - Operand extraction (numbers, text)
//! - Computed values and how they compare against a bound result

use crate::core::ns;
use crate::term::{LiteralKind, Number, TypedLiteral};

// ============================================================================
// Computed values
// ============================================================================

/// Value computed by a function predicate
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(Number),
    Text(String),
}

impl Value {
    /// Check the value against the literal bound in the result position
    ///
    /// The value is rendered in the bound literal's kind and the two literals
    /// compared for equality.
    pub fn matches(&self, bound: &TypedLiteral) -> bool {
        match self {
            Value::Number(n) => bound.matches_number(*n),
            Value::Text(s) => TypedLiteral::with_kind(s.as_str(), bound.kind().clone()) == *bound,
        }
    }

    /// Produce a literal for an unbound result, typed after `template`
    pub fn to_literal(&self, template: Option<&TypedLiteral>) -> TypedLiteral {
        match self {
            Value::Number(n) => template
                .filter(|t| t.is_numeric())
                .and_then(|t| t.number_of_same_kind(*n))
                .unwrap_or_else(|| default_number_literal(*n)),
            Value::Text(s) => match template.map(TypedLiteral::kind) {
                Some(LiteralKind::Language(lang)) => TypedLiteral::with_language(s.as_str(), lang.as_str()),
                Some(LiteralKind::Typed(dt)) => TypedLiteral::typed(s.as_str(), dt.as_str()),
                _ => TypedLiteral::plain(s.as_str()),
            },
        }
    }
}

fn default_number_literal(n: Number) -> TypedLiteral {
    match n {
        Number::Integer(i) => TypedLiteral::typed(i.to_string(), ns::uri(ns::XSD, "integer")),
        Number::Float(f) => TypedLiteral::typed(f.to_string(), ns::uri(ns::XSD, "double")),
    }
}

// ============================================================================
// Operand extraction
// ============================================================================

/// Coerce every operand to a number, or none at all
pub fn get_numbers(operands: &[TypedLiteral]) -> Option<Vec<Number>> {
    operands.iter().map(TypedLiteral::as_number).collect()
}

/// Coerce exactly two operands to numbers
pub fn get_number_pair(operands: &[TypedLiteral]) -> Option<(Number, Number)> {
    match operands {
        [a, b] => Some((a.as_number()?, b.as_number()?)),
        _ => None,
    }
}

/// Lexical forms of exactly two operands
pub fn get_string_pair(operands: &[TypedLiteral]) -> Option<(&str, &str)> {
    match operands {
        [a, b] => Some((a.lexical(), b.lexical())),
        _ => None,
    }
}

/// Lexical form of a single operand
pub fn get_string(operands: &[TypedLiteral]) -> Option<&str> {
    match operands {
        [a] => Some(a.lexical()),
        _ => None,
    }
}
