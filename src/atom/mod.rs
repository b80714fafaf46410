//! Built-in atoms: a predicate IRI applied to an ordered argument list
//!
//! Arguments are either rule variables, resolved per row against a binding
//! table, or literal constants.

use std::fmt;

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::core::BindingTable;
use crate::error::{SwrlError, SwrlResult};
use crate::term::{is_language_tag, LiteralKind, PrefixMap, TypedLiteral, Variable};

// ============================================================================
// Arguments
// ============================================================================

/// One argument of a built-in atom
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinArgument {
    /// A variable bound by the rule antecedent
    Variable(Variable),
    /// A constant
    Literal(TypedLiteral),
}

impl BuiltinArgument {
    /// Create a variable argument; a leading `?` is optional
    pub fn variable(name: impl AsRef<str>) -> Self {
        BuiltinArgument::Variable(Variable::new(name))
    }

    /// Create a literal argument from a wire token
    pub fn literal(token: &str) -> Self {
        BuiltinArgument::Literal(TypedLiteral::parse(token))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            BuiltinArgument::Variable(v) => Some(v),
            BuiltinArgument::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&TypedLiteral> {
        match self {
            BuiltinArgument::Literal(lit) => Some(lit),
            BuiltinArgument::Variable(_) => None,
        }
    }

    /// Value of this argument in `row`
    ///
    /// A variable whose column or cell is absent does not resolve.
    pub fn resolve<T: BindingTable + ?Sized>(&self, table: &T, row: usize) -> Option<TypedLiteral> {
        match self {
            BuiltinArgument::Variable(v) => table.cell(row, v.name()).map(TypedLiteral::parse),
            BuiltinArgument::Literal(lit) => Some(lit.clone()),
        }
    }
}

impl From<Variable> for BuiltinArgument {
    fn from(v: Variable) -> Self {
        BuiltinArgument::Variable(v)
    }
}

impl From<TypedLiteral> for BuiltinArgument {
    fn from(lit: TypedLiteral) -> Self {
        BuiltinArgument::Literal(lit)
    }
}

// ============================================================================
// Atoms
// ============================================================================

/// A built-in atom
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuiltinAtom {
    predicate: String,
    arguments: Vec<BuiltinArgument>,
}

macro_rules! binary_factory {
    ($(#[$doc:meta])* $name:ident => $builtin:expr) => {
        $(#[$doc])*
        pub fn $name(a: impl Into<BuiltinArgument>, b: impl Into<BuiltinArgument>) -> Self {
            BuiltinAtom::of($builtin, vec![a.into(), b.into()])
        }
    };
}

macro_rules! ternary_factory {
    ($(#[$doc:meta])* $name:ident => $builtin:expr) => {
        $(#[$doc])*
        pub fn $name(
            a: impl Into<BuiltinArgument>,
            b: impl Into<BuiltinArgument>,
            c: impl Into<BuiltinArgument>,
        ) -> Self {
            BuiltinAtom::of($builtin, vec![a.into(), b.into(), c.into()])
        }
    };
}

impl BuiltinAtom {
    /// Create an atom without any checks; the evaluator rejects unknown
    /// predicates and bad arities later
    pub fn new(predicate: impl Into<String>, arguments: Vec<BuiltinArgument>) -> Self {
        BuiltinAtom {
            predicate: predicate.into(),
            arguments,
        }
    }

    fn of(builtin: Builtin, arguments: Vec<BuiltinArgument>) -> Self {
        BuiltinAtom::new(builtin.iri(), arguments)
    }

    /// Create an atom for a known predicate, checking for missing arguments
    /// and the argument count
    pub fn build(
        builtin: Builtin,
        arguments: impl IntoIterator<Item = Option<BuiltinArgument>>,
    ) -> SwrlResult<Self> {
        let arguments = arguments
            .into_iter()
            .enumerate()
            .map(|(position, arg)| {
                arg.ok_or_else(|| SwrlError::missing_argument(&builtin.to_string(), position))
            })
            .collect::<SwrlResult<Vec<_>>>()?;
        let arity = builtin.arity();
        if !arity.accepts(arguments.len()) {
            return Err(SwrlError::arity(&builtin.to_string(), arity, arguments.len()));
        }
        Ok(BuiltinAtom::of(builtin, arguments))
    }

    /// Create an atom from a predicate name (IRI, `swrlb:` name or local name)
    pub fn named(name: &str, arguments: Vec<BuiltinArgument>) -> SwrlResult<Self> {
        let spec = BuiltinRegistry::standard()
            .lookup(name)
            .ok_or_else(|| SwrlError::unknown_builtin(name))?;
        BuiltinAtom::build(spec.builtin, arguments.into_iter().map(Some))
    }

    ternary_factory!(
        /// `mod(r, a, b)`: r = a mod b
        modulo => Builtin::Mod
    );
    ternary_factory!(
        /// `substringBefore(r, s, sep)`
        substring_before => Builtin::SubstringBefore
    );
    ternary_factory!(
        /// `substringAfter(r, s, sep)`
        substring_after => Builtin::SubstringAfter
    );
    ternary_factory!(subtract => Builtin::Subtract);
    ternary_factory!(add => Builtin::Add);
    ternary_factory!(multiply => Builtin::Multiply);
    binary_factory!(abs => Builtin::Abs);
    binary_factory!(equal => Builtin::Equal);
    binary_factory!(not_equal => Builtin::NotEqual);
    binary_factory!(less_than => Builtin::LessThan);
    binary_factory!(less_than_or_equal => Builtin::LessThanOrEqual);
    binary_factory!(greater_than => Builtin::GreaterThan);
    binary_factory!(greater_than_or_equal => Builtin::GreaterThanOrEqual);
    binary_factory!(string_length => Builtin::StringLength);
    binary_factory!(upper_case => Builtin::UpperCase);
    binary_factory!(lower_case => Builtin::LowerCase);
    binary_factory!(contains => Builtin::Contains);
    binary_factory!(starts_with => Builtin::StartsWith);
    binary_factory!(ends_with => Builtin::EndsWith);

    /// `substring(r, s, start, length)`
    pub fn substring(
        r: impl Into<BuiltinArgument>,
        s: impl Into<BuiltinArgument>,
        start: impl Into<BuiltinArgument>,
        length: Option<BuiltinArgument>,
    ) -> Self {
        let mut arguments = vec![r.into(), s.into(), start.into()];
        arguments.extend(length);
        BuiltinAtom::of(Builtin::Substring, arguments)
    }

    /// `stringConcat(r, s1, ...)`
    pub fn string_concat(
        r: impl Into<BuiltinArgument>,
        parts: impl IntoIterator<Item = BuiltinArgument>,
    ) -> Self {
        let mut arguments = vec![r.into()];
        arguments.extend(parts);
        BuiltinAtom::of(Builtin::StringConcat, arguments)
    }

    /// Full predicate IRI
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn arguments(&self) -> &[BuiltinArgument] {
        &self.arguments
    }

    /// Variables among the arguments, in order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.arguments.iter().filter_map(BuiltinArgument::as_variable)
    }

    /// The predicate tag, if the IRI names a `swrlb` built-in
    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_iri(&self.predicate)
    }
}

impl fmt::Display for BuiltinAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AtomFormatter::default().render(self))
    }
}

// ============================================================================
// Notation rendering
// ============================================================================

/// Renders atoms as `prefix:local(a1,a2,...)`
#[derive(Clone, Debug, Default)]
pub struct AtomFormatter {
    prefixes: PrefixMap,
}

impl AtomFormatter {
    pub fn new(prefixes: PrefixMap) -> Self {
        AtomFormatter { prefixes }
    }

    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    /// Render an atom; an atom without arguments renders as the empty string
    pub fn render(&self, atom: &BuiltinAtom) -> String {
        if atom.arguments.is_empty() {
            return String::new();
        }
        let arguments: Vec<String> = atom
            .arguments
            .iter()
            .map(|arg| self.render_argument(arg))
            .collect();
        format!("{}({})", self.prefixes.render(&atom.predicate), arguments.join(","))
    }

    pub fn render_argument(&self, argument: &BuiltinArgument) -> String {
        match argument {
            BuiltinArgument::Variable(v) => v.to_string(),
            BuiltinArgument::Literal(lit) => self.render_literal(lit),
        }
    }

    /// Plain and language literals are written bare when that reads back the
    /// same; typed literals are always quoted. A tag that is not a valid
    /// language tag is quoted along with its lexical form.
    pub fn render_literal(&self, lit: &TypedLiteral) -> String {
        match lit.kind() {
            LiteralKind::Plain if is_bare(lit.lexical()) => lit.lexical().to_string(),
            LiteralKind::Plain => quote(lit.lexical()),
            LiteralKind::Language(lang) if !is_language_tag(lang) => {
                format!("{}@{}", quote(lit.lexical()), quote(lang))
            }
            LiteralKind::Language(lang) if is_bare(lit.lexical()) => {
                format!("{}@{}", lit.lexical(), lang)
            }
            LiteralKind::Language(lang) => format!("{}@{}", quote(lit.lexical()), lang),
            LiteralKind::Numeric(dt) | LiteralKind::Typed(dt) => {
                format!("{}^^{}", quote(lit.lexical()), self.prefixes.render_datatype(dt))
            }
        }
    }
}

/// Whether a lexical form can be written without quotes
pub(crate) fn is_bare(lexical: &str) -> bool {
    !lexical.is_empty()
        && !lexical.starts_with('?')
        && !lexical.contains("^^")
        && !lexical.contains('@')
        && lexical
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, ',' | '(' | ')' | '"' | '<' | '>'))
}

fn quote(lexical: &str) -> String {
    let mut out = String::with_capacity(lexical.len() + 2);
    out.push('"');
    for c in lexical.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Check the argument count of an atom whose predicate is known
pub(crate) fn check_arity(atom: &BuiltinAtom, builtin: Builtin) -> SwrlResult<()> {
    let arity = builtin.arity();
    if !arity.accepts(atom.arguments.len()) {
        return Err(SwrlError::arity(&builtin.to_string(), arity, atom.arguments.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn var(name: &str) -> BuiltinArgument {
        BuiltinArgument::variable(name)
    }

    fn lit(token: &str) -> BuiltinArgument {
        BuiltinArgument::literal(token)
    }

    #[test]
    fn test_named_factory() {
        let atom = BuiltinAtom::modulo(var("X"), var("Y"), lit("5^^decimal"));
        assert_eq!(atom.predicate(), "http://www.w3.org/2003/11/swrlb#mod");
        assert_eq!(atom.arguments().len(), 3);
        assert_eq!(atom.builtin(), Some(Builtin::Mod));
        assert_eq!(atom.variables().count(), 2);
    }

    #[test]
    fn test_build_rejects_missing_argument() {
        let err = BuiltinAtom::build(Builtin::Mod, vec![Some(var("X")), None, Some(var("Z"))])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingArgument);
        assert!(err.message.contains("argument 2"));
    }

    #[test]
    fn test_build_rejects_wrong_count() {
        let err = BuiltinAtom::build(Builtin::SubstringAfter, vec![Some(var("X")), Some(var("Y"))])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ArityMismatch);
        assert_eq!(err.context_field("predicate"), Some("swrlb:substringAfter"));
    }

    #[test]
    fn test_named_by_local_name() {
        let atom = BuiltinAtom::named("substringAfter", vec![var("X"), var("Y"), var("Z")]).unwrap();
        assert_eq!(atom.builtin(), Some(Builtin::SubstringAfter));

        let err = BuiltinAtom::named("frobnicate", vec![]).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownBuiltin);
    }

    #[test]
    fn test_display() {
        let atom = BuiltinAtom::modulo(
            var("X"),
            var("Y"),
            lit("5^^http://www.w3.org/2001/XMLSchema#integer"),
        );
        assert_eq!(atom.to_string(), "swrlb:mod(?X,?Y,\"5\"^^xsd:integer)");
    }

    #[test]
    fn test_display_plain_and_language() {
        let atom = BuiltinAtom::substring_after(var("X"), lit("hello@EN"), lit("l"));
        assert_eq!(atom.to_string(), "swrlb:substringAfter(?X,hello@EN,l)");

        let atom = BuiltinAtom::substring_after(var("X"), lit(""), var("Z"));
        assert_eq!(atom.to_string(), "swrlb:substringAfter(?X,\"\",?Z)");

        let atom = BuiltinAtom::contains(lit("say \"hi\""), lit("a b@en"));
        assert_eq!(atom.to_string(), "swrlb:contains(\"say \\\"hi\\\"\",\"a b\"@en)");
    }

    #[test]
    fn test_display_quotes_invalid_language_tag() {
        let atom = BuiltinAtom::contains(
            var("X"),
            BuiltinArgument::Literal(TypedLiteral::with_language("x", "en_US")),
        );
        assert_eq!(atom.to_string(), "swrlb:contains(?X,\"x\"@\"en_US\")");
    }

    #[test]
    fn test_display_unknown_predicate_and_empty() {
        let atom = BuiltinAtom::new("http://example.org/fn#f", vec![var("X")]);
        assert_eq!(atom.to_string(), "<http://example.org/fn#f>(?X)");

        let atom = BuiltinAtom::new("http://www.w3.org/2003/11/swrlb#mod", vec![]);
        assert_eq!(atom.to_string(), "");
    }

    #[test]
    fn test_check_arity() {
        let atom = BuiltinAtom::new(Builtin::Mod.iri(), vec![var("X")]);
        let err = check_arity(&atom, Builtin::Mod).unwrap_err();
        assert_eq!(err.code, ErrorCode::ArityMismatch);
        assert_eq!(err.context_field("predicate"), Some("swrlb:mod"));
        assert!(err.message.contains("got 1"));
        assert!(check_arity(&BuiltinAtom::modulo(var("X"), var("Y"), var("Z")), Builtin::Mod).is_ok());
    }
}
