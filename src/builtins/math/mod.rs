//! Math built-ins
//!
//! Implements arithmetic and comparison predicates.
//!
//! # Argument order
//!
//! Function predicates put the result first: `mod(r, a, b)` holds when
//! `r = a mod b`. Comparisons take their two operands in reading order.

mod arithmetic;
mod comparison;

pub use arithmetic::*;
pub use comparison::*;

use super::{Builtin, BuiltinSpec, Semantics};

pub(super) static SPECS: &[BuiltinSpec] = &[
    // Arithmetic
    BuiltinSpec::new(
        Builtin::Mod,
        "mod(r, a, b) means r = a mod b (truncating remainder)",
        Semantics::Function(modulo),
    ),
    BuiltinSpec::new(
        Builtin::Add,
        "add(r, a, b, ...) means r = a + b + ...",
        Semantics::Function(add),
    ),
    BuiltinSpec::new(
        Builtin::Subtract,
        "subtract(r, a, b) means r = a - b",
        Semantics::Function(subtract),
    ),
    BuiltinSpec::new(
        Builtin::Multiply,
        "multiply(r, a, b, ...) means r = a * b * ...",
        Semantics::Function(multiply),
    ),
    BuiltinSpec::new(Builtin::Abs, "abs(r, a) means r = |a|", Semantics::Function(abs)),
    // Comparison
    BuiltinSpec::new(
        Builtin::Equal,
        "equal(a, b) holds when a and b are equal",
        Semantics::Test(equal),
    ),
    BuiltinSpec::new(
        Builtin::NotEqual,
        "notEqual(a, b) holds when a and b differ",
        Semantics::Test(not_equal),
    ),
    BuiltinSpec::new(
        Builtin::LessThan,
        "lessThan(a, b) means a < b",
        Semantics::Test(less_than),
    ),
    BuiltinSpec::new(
        Builtin::LessThanOrEqual,
        "lessThanOrEqual(a, b) means a <= b",
        Semantics::Test(less_than_or_equal),
    ),
    BuiltinSpec::new(
        Builtin::GreaterThan,
        "greaterThan(a, b) means a > b",
        Semantics::Test(greater_than),
    ),
    BuiltinSpec::new(
        Builtin::GreaterThanOrEqual,
        "greaterThanOrEqual(a, b) means a >= b",
        Semantics::Test(greater_than_or_equal),
    ),
];
