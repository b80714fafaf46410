//! Numeric coercion of literal lexical forms
//!
//! A lexical form is read as an `i64` first and as an `f64` second. Arithmetic
//! stays integral only while every operand is integral; a single fractional
//! operand moves the whole computation to `f64`.

use std::cmp::Ordering;
use std::fmt;

/// A number read from a literal
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Coerce a lexical form; surrounding whitespace is ignored
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Integer(i));
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Some(Number::Float(f)),
            _ => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// The exact integer value, if there is one
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Remainder with the sign of the dividend; `None` on a zero divisor
    pub fn checked_rem(self, divisor: Number) -> Option<Number> {
        match (self, divisor) {
            (Number::Integer(a), Number::Integer(b)) => a.checked_rem(b).map(Number::Integer),
            (a, b) => {
                let b = b.as_f64();
                if b == 0.0 {
                    return None;
                }
                finite(a.as_f64() % b)
            }
        }
    }

    pub fn checked_add(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.checked_add(b).map(Number::Integer),
            (a, b) => finite(a.as_f64() + b.as_f64()),
        }
    }

    pub fn checked_sub(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.checked_sub(b).map(Number::Integer),
            (a, b) => finite(a.as_f64() - b.as_f64()),
        }
    }

    pub fn checked_mul(self, other: Number) -> Option<Number> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.checked_mul(b).map(Number::Integer),
            (a, b) => finite(a.as_f64() * b.as_f64()),
        }
    }

    pub fn checked_abs(self) -> Option<Number> {
        match self {
            Number::Integer(i) => i.checked_abs().map(Number::Integer),
            Number::Float(f) => Some(Number::Float(f.abs())),
        }
    }

    /// Total order for comparisons; integers compare exactly
    pub fn numeric_cmp(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    pub fn numeric_eq(self, other: Number) -> bool {
        self.numeric_cmp(other) == Some(Ordering::Equal)
    }
}

fn finite(f: f64) -> Option<Number> {
    if f.is_finite() {
        Some(Number::Float(f))
    } else {
        None
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

// ============================================================================
// Numeric datatypes
// ============================================================================

/// XSD numeric datatypes understood by the coercion rules
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericType {
    Byte,
    Short,
    Int,
    Long,
    Integer,
    NonNegativeInteger,
    NonPositiveInteger,
    PositiveInteger,
    NegativeInteger,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    Float,
    Double,
    Decimal,
}

/// Local name of a datatype identifier: the text after the last `#`, `:` or `/`
pub fn datatype_local_name(datatype: &str) -> &str {
    datatype
        .rsplit(|c| c == '#' || c == ':' || c == '/')
        .next()
        .unwrap_or(datatype)
}

impl NumericType {
    /// Classify a datatype given as a bare name, a prefixed name or a full IRI
    pub fn from_datatype(datatype: &str) -> Option<NumericType> {
        let ty = match datatype_local_name(datatype) {
            "byte" => NumericType::Byte,
            "short" => NumericType::Short,
            "int" => NumericType::Int,
            "long" => NumericType::Long,
            "integer" => NumericType::Integer,
            "nonNegativeInteger" => NumericType::NonNegativeInteger,
            "nonPositiveInteger" => NumericType::NonPositiveInteger,
            "positiveInteger" => NumericType::PositiveInteger,
            "negativeInteger" => NumericType::NegativeInteger,
            "unsignedByte" => NumericType::UnsignedByte,
            "unsignedShort" => NumericType::UnsignedShort,
            "unsignedInt" => NumericType::UnsignedInt,
            "unsignedLong" => NumericType::UnsignedLong,
            "float" => NumericType::Float,
            "double" => NumericType::Double,
            "decimal" => NumericType::Decimal,
            _ => return None,
        };
        Some(ty)
    }

    pub fn is_integral(self) -> bool {
        !matches!(self, NumericType::Float | NumericType::Double | NumericType::Decimal)
    }

    fn bounds(self) -> (i128, i128) {
        match self {
            NumericType::Byte => (i8::MIN as i128, i8::MAX as i128),
            NumericType::Short => (i16::MIN as i128, i16::MAX as i128),
            NumericType::Int => (i32::MIN as i128, i32::MAX as i128),
            NumericType::NonNegativeInteger => (0, i64::MAX as i128),
            NumericType::NonPositiveInteger => (i64::MIN as i128, 0),
            NumericType::PositiveInteger => (1, i64::MAX as i128),
            NumericType::NegativeInteger => (i64::MIN as i128, -1),
            NumericType::UnsignedByte => (0, u8::MAX as i128),
            NumericType::UnsignedShort => (0, u16::MAX as i128),
            NumericType::UnsignedInt => (0, u32::MAX as i128),
            NumericType::UnsignedLong => (0, u64::MAX as i128),
            _ => (i64::MIN as i128, i64::MAX as i128),
        }
    }

    /// Canonical lexical form of `n` in this datatype
    ///
    /// Integral datatypes reject fractional and out-of-range values; the
    /// fractional ones always carry at least one fractional digit.
    pub fn render(self, n: Number) -> Option<String> {
        if self.is_integral() {
            let i = n.as_i64()?;
            let (lo, hi) = self.bounds();
            if (i as i128) < lo || (i as i128) > hi {
                return None;
            }
            Some(i.to_string())
        } else {
            let f = n.as_f64();
            if f.fract() == 0.0 {
                Some(format!("{:.1}", f))
            } else {
                Some(f.to_string())
            }
        }
    }
}
