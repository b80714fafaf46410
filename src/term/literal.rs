//! Typed literal value representation
//!
//! The wire token of a literal is `lexical`, `lexical^^datatype` or
//! `lexical@lang`. Parsing splits on the last marker, so a lexical form that
//! itself contains `^^` or `@` does not survive a round trip.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::numeric::{Number, NumericType};

const LANGUAGE_TAG: &str = "^[A-Za-z]{1,8}(-[A-Za-z0-9]{1,8})*$";

/// Whether `tag` is a well-formed language tag
pub(crate) fn is_language_tag(tag: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(LANGUAGE_TAG).ok())
        .as_ref()
        .map_or(false, |re| re.is_match(tag))
}

/// Kind of a literal
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// Typed with one of the XSD numeric datatypes
    Numeric(String),
    /// Typed with any other datatype
    Typed(String),
    /// Plain string
    Plain,
    /// Plain string with a language tag
    Language(String),
}

impl LiteralKind {
    fn for_datatype(datatype: String) -> Self {
        if NumericType::from_datatype(&datatype).is_some() {
            LiteralKind::Numeric(datatype)
        } else {
            LiteralKind::Typed(datatype)
        }
    }
}

/// An immutable typed literal
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypedLiteral {
    lexical: String,
    kind: LiteralKind,
}

impl TypedLiteral {
    /// Create a plain literal
    pub fn plain(lexical: impl Into<String>) -> Self {
        TypedLiteral {
            lexical: lexical.into(),
            kind: LiteralKind::Plain,
        }
    }

    /// Create a typed literal; numeric XSD datatypes are recognised by local name
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        TypedLiteral {
            lexical: lexical.into(),
            kind: LiteralKind::for_datatype(datatype.into()),
        }
    }

    /// Create a language-tagged literal. The tag keeps its case.
    pub fn with_language(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        TypedLiteral {
            lexical: lexical.into(),
            kind: LiteralKind::Language(lang.into()),
        }
    }

    /// Create a literal of an existing kind
    pub fn with_kind(lexical: impl Into<String>, kind: LiteralKind) -> Self {
        TypedLiteral {
            lexical: lexical.into(),
            kind,
        }
    }

    /// Parse a wire token. Never fails: anything unrecognised is a plain string.
    pub fn parse(token: &str) -> Self {
        if let Some(pos) = token.rfind("^^") {
            let datatype = &token[pos + 2..];
            if !datatype.is_empty() {
                return TypedLiteral::typed(&token[..pos], datatype);
            }
        }
        if let Some(pos) = token.rfind('@') {
            let lang = &token[pos + 1..];
            if is_language_tag(lang) {
                return TypedLiteral::with_language(&token[..pos], lang);
            }
        }
        TypedLiteral::plain(token)
    }

    /// Get the lexical form
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }

    /// Get the datatype identifier if present
    pub fn datatype(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Numeric(dt) | LiteralKind::Typed(dt) => Some(dt),
            _ => None,
        }
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            LiteralKind::Language(lang) => Some(lang),
            _ => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.kind, LiteralKind::Plain)
    }

    /// Whether the literal is typed with a numeric XSD datatype
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, LiteralKind::Numeric(_))
    }

    pub fn numeric_type(&self) -> Option<NumericType> {
        match &self.kind {
            LiteralKind::Numeric(dt) => NumericType::from_datatype(dt),
            _ => None,
        }
    }

    /// Coerce the lexical form to a number, whatever the kind
    pub fn as_number(&self) -> Option<Number> {
        Number::parse(&self.lexical)
    }

    /// Try to parse as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self.as_number()? {
            Number::Integer(i) => Some(i),
            Number::Float(_) => None,
        }
    }

    /// Try to parse as a float
    pub fn as_float(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Render a number canonically in this literal's kind
    pub fn render_number(&self, n: Number) -> Option<String> {
        match self.numeric_type() {
            Some(ty) => ty.render(n),
            None => Some(n.to_string()),
        }
    }

    /// Build a literal of this literal's kind holding `n`
    pub fn number_of_same_kind(&self, n: Number) -> Option<TypedLiteral> {
        let lexical = self.render_number(n)?;
        Some(TypedLiteral::with_kind(lexical, self.kind.clone()))
    }

    /// Check a computed number against this literal
    ///
    /// Only the computed side is rendered, canonically in this literal's
    /// kind; the result must equal this literal exactly. `3^^int` matches a
    /// computed `3.0`, `03^^int` and `3.00^^float` match nothing.
    pub fn matches_number(&self, n: Number) -> bool {
        self.as_number().is_some() && self.number_of_same_kind(n).as_ref() == Some(self)
    }
}

impl fmt::Debug for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LiteralKind::Plain => write!(f, "\"{}\"", self.lexical),
            LiteralKind::Language(lang) => write!(f, "\"{}\"@{}", self.lexical, lang),
            LiteralKind::Numeric(dt) | LiteralKind::Typed(dt) => {
                write!(f, "\"{}\"^^<{}>", self.lexical, dt)
            }
        }
    }
}

/// Formats as the wire token
impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LiteralKind::Plain => write!(f, "{}", self.lexical),
            LiteralKind::Language(lang) => write!(f, "{}@{}", self.lexical, lang),
            LiteralKind::Numeric(dt) | LiteralKind::Typed(dt) => {
                write!(f, "{}^^{}", self.lexical, dt)
            }
        }
    }
}
