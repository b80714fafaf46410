//! Built-in predicates of the `swrlb` namespace
//!
//! Implements the SWRL built-ins for:
//! - math: arithmetic and comparison
//! - string: string inspection and manipulation
//!
//! Every predicate is one `Builtin` variant, one `BuiltinSpec` table entry and
//! one pure function. The standard registry is built once per process and
//! never mutated afterwards.

use std::fmt;
use std::sync::OnceLock;

use fnv::FnvHashMap;

use crate::core::ns;
use crate::term::TypedLiteral;

pub mod helpers;
mod math;
mod string;

pub use helpers::Value;

// ============================================================================
// Predicate tags
// ============================================================================

/// One tag per supported predicate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Mod,
    SubstringBefore,
    SubstringAfter,
    Add,
    Subtract,
    Multiply,
    Abs,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    StringConcat,
    StringLength,
    Substring,
    UpperCase,
    LowerCase,
    Contains,
    StartsWith,
    EndsWith,
}

impl Builtin {
    /// Every predicate, in registry order
    pub const ALL: [Builtin; 21] = [
        Builtin::Mod,
        Builtin::SubstringBefore,
        Builtin::SubstringAfter,
        Builtin::Add,
        Builtin::Subtract,
        Builtin::Multiply,
        Builtin::Abs,
        Builtin::Equal,
        Builtin::NotEqual,
        Builtin::LessThan,
        Builtin::LessThanOrEqual,
        Builtin::GreaterThan,
        Builtin::GreaterThanOrEqual,
        Builtin::StringConcat,
        Builtin::StringLength,
        Builtin::Substring,
        Builtin::UpperCase,
        Builtin::LowerCase,
        Builtin::Contains,
        Builtin::StartsWith,
        Builtin::EndsWith,
    ];

    /// Local name in the `swrlb` namespace
    pub const fn local_name(self) -> &'static str {
        match self {
            Builtin::Mod => "mod",
            Builtin::SubstringBefore => "substringBefore",
            Builtin::SubstringAfter => "substringAfter",
            Builtin::Add => "add",
            Builtin::Subtract => "subtract",
            Builtin::Multiply => "multiply",
            Builtin::Abs => "abs",
            Builtin::Equal => "equal",
            Builtin::NotEqual => "notEqual",
            Builtin::LessThan => "lessThan",
            Builtin::LessThanOrEqual => "lessThanOrEqual",
            Builtin::GreaterThan => "greaterThan",
            Builtin::GreaterThanOrEqual => "greaterThanOrEqual",
            Builtin::StringConcat => "stringConcat",
            Builtin::StringLength => "stringLength",
            Builtin::Substring => "substring",
            Builtin::UpperCase => "upperCase",
            Builtin::LowerCase => "lowerCase",
            Builtin::Contains => "contains",
            Builtin::StartsWith => "startsWith",
            Builtin::EndsWith => "endsWith",
        }
    }

    /// Number of arguments the predicate accepts
    pub const fn arity(self) -> Arity {
        match self {
            Builtin::Mod
            | Builtin::SubstringBefore
            | Builtin::SubstringAfter
            | Builtin::Subtract => Arity::Exact(3),
            Builtin::Add | Builtin::Multiply => Arity::AtLeast(3),
            Builtin::StringConcat => Arity::AtLeast(1),
            Builtin::Substring => Arity::Between(3, 4),
            Builtin::Abs
            | Builtin::Equal
            | Builtin::NotEqual
            | Builtin::LessThan
            | Builtin::LessThanOrEqual
            | Builtin::GreaterThan
            | Builtin::GreaterThanOrEqual
            | Builtin::StringLength
            | Builtin::UpperCase
            | Builtin::LowerCase
            | Builtin::Contains
            | Builtin::StartsWith
            | Builtin::EndsWith => Arity::Exact(2),
        }
    }

    /// Full predicate IRI
    pub fn iri(self) -> String {
        ns::uri(ns::SWRLB, self.local_name())
    }

    pub fn from_local_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.iter().copied().find(|b| b.local_name() == name)
    }

    pub fn from_iri(iri: &str) -> Option<Builtin> {
        ns::local_name(iri, ns::SWRLB).and_then(Builtin::from_local_name)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swrlb:{}", self.local_name())
    }
}

// ============================================================================
// Arity and semantics
// ============================================================================

/// Accepted argument counts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Between(lo, hi) => write!(f, "between {} and {}", lo, hi),
        }
    }
}

/// How a predicate decides whether a row holds
#[derive(Clone, Copy)]
pub enum Semantics {
    /// A test over all arguments
    Test(fn(&[TypedLiteral]) -> bool),
    /// Computes the first argument from the remaining ones; `None` means the
    /// computation is undefined for these operands
    Function(fn(&[TypedLiteral]) -> Option<Value>),
}

impl fmt::Debug for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantics::Test(_) => write!(f, "Test"),
            Semantics::Function(_) => write!(f, "Function"),
        }
    }
}

impl Semantics {
    /// Decide a fully resolved argument list
    pub fn holds(&self, args: &[TypedLiteral]) -> bool {
        match self {
            Semantics::Test(test) => test(args),
            Semantics::Function(compute) => match args.split_first() {
                Some((result, operands)) => {
                    compute(operands).map_or(false, |value| value.matches(result))
                }
                None => false,
            },
        }
    }
}

/// Registry entry for one predicate
#[derive(Clone, Copy, Debug)]
pub struct BuiltinSpec {
    pub builtin: Builtin,
    pub arity: Arity,
    pub description: &'static str,
    pub semantics: Semantics,
}

impl BuiltinSpec {
    pub const fn new(builtin: Builtin, description: &'static str, semantics: Semantics) -> Self {
        BuiltinSpec {
            builtin,
            arity: builtin.arity(),
            description,
            semantics,
        }
    }

    pub fn iri(&self) -> String {
        self.builtin.iri()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Lookup table from predicate IRI to its spec
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    specs: Vec<&'static BuiltinSpec>,
    by_iri: FnvHashMap<String, usize>,
}

impl BuiltinRegistry {
    /// The process-wide registry of every supported predicate
    pub fn standard() -> &'static BuiltinRegistry {
        static STANDARD: OnceLock<BuiltinRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| BuiltinRegistry::from_specs(math::SPECS.iter().chain(string::SPECS)))
    }

    /// Build a registry from a set of specs; a later spec for the same
    /// predicate replaces an earlier one
    pub fn from_specs(specs: impl IntoIterator<Item = &'static BuiltinSpec>) -> Self {
        let mut registry = BuiltinRegistry {
            specs: Vec::new(),
            by_iri: FnvHashMap::default(),
        };
        for spec in specs {
            registry.register(spec);
        }
        registry
    }

    /// A registry restricted to the given predicates
    pub fn only(builtins: &[Builtin]) -> Self {
        BuiltinRegistry::from_specs(
            BuiltinRegistry::standard()
                .iter()
                .filter(|spec| builtins.contains(&spec.builtin)),
        )
    }

    fn register(&mut self, spec: &'static BuiltinSpec) {
        match self.by_iri.get(&spec.iri()) {
            Some(&index) => self.specs[index] = spec,
            None => {
                self.by_iri.insert(spec.iri(), self.specs.len());
                self.specs.push(spec);
            }
        }
    }

    /// Get the spec registered under a full predicate IRI
    pub fn get(&self, iri: &str) -> Option<&'static BuiltinSpec> {
        self.by_iri.get(iri).map(|&index| self.specs[index])
    }

    /// Look up by full IRI, `swrlb:` prefixed name or bare local name
    pub fn lookup(&self, name: &str) -> Option<&'static BuiltinSpec> {
        if let Some(spec) = self.get(name) {
            return Some(spec);
        }
        let local = name.strip_prefix("swrlb:").unwrap_or(name);
        self.get(&ns::uri(ns::SWRLB, local))
    }

    pub fn spec(&self, builtin: Builtin) -> Option<&'static BuiltinSpec> {
        self.get(&builtin.iri())
    }

    /// Check if an IRI is a registered predicate
    pub fn is_builtin(&self, iri: &str) -> bool {
        self.by_iri.contains_key(iri)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static BuiltinSpec> + '_ {
        self.specs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        BuiltinRegistry::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(token: &str) -> TypedLiteral {
        TypedLiteral::parse(token)
    }

    #[test]
    fn test_every_builtin_is_registered() {
        let registry = BuiltinRegistry::standard();
        assert_eq!(registry.len(), Builtin::ALL.len());
        for builtin in Builtin::ALL {
            let spec = registry.spec(builtin).unwrap();
            assert_eq!(spec.builtin, builtin);
            assert_eq!(spec.arity, builtin.arity());
        }
    }

    #[test]
    fn test_lookup_forms() {
        let registry = BuiltinRegistry::standard();
        let by_iri = registry.lookup("http://www.w3.org/2003/11/swrlb#mod").unwrap();
        let by_prefix = registry.lookup("swrlb:mod").unwrap();
        let by_local = registry.lookup("mod").unwrap();
        assert_eq!(by_iri.builtin, Builtin::Mod);
        assert_eq!(by_prefix.builtin, Builtin::Mod);
        assert_eq!(by_local.builtin, Builtin::Mod);
        assert!(registry.lookup("swrlb:frobnicate").is_none());
        assert!(registry.get("mod").is_none());
    }

    #[test]
    fn test_iri_round_trip() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_iri(&builtin.iri()), Some(builtin));
        }
        assert_eq!(Builtin::from_iri("http://example.org/mod"), None);
    }

    #[test]
    fn test_arity() {
        assert!(Arity::Exact(3).accepts(3));
        assert!(!Arity::Exact(3).accepts(2));
        assert!(Arity::AtLeast(3).accepts(5));
        assert!(!Arity::AtLeast(3).accepts(2));
        assert!(Arity::Between(3, 4).accepts(4));
        assert!(!Arity::Between(3, 4).accepts(5));
        assert_eq!(Arity::Exact(3).to_string(), "exactly 3");
    }

    #[test]
    fn test_restricted_registry() {
        let registry = BuiltinRegistry::only(&[Builtin::Mod, Builtin::Add]);
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("mod").is_some());
        assert!(registry.lookup("substringAfter").is_none());
    }

    #[test]
    fn test_function_semantics_compare_result() {
        let spec = BuiltinRegistry::standard().spec(Builtin::Mod).unwrap();
        assert!(spec.semantics.holds(&[lit("3^^int"), lit("13^^int"), lit("5.0^^float")]));
        assert!(!spec.semantics.holds(&[lit("4^^int"), lit("13^^int"), lit("5^^int")]));
        assert!(!spec.semantics.holds(&[]));
    }
}
