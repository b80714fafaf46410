//! Value-level terms used by built-in atoms
//!
//! This module defines:
//! - Typed literals (lexical form plus datatype, language tag or nothing)
//! - Numeric coercion of literal lexical forms
//! - Rule variables
//! - IRIs and prefix maps

mod literal;
mod numeric;
mod variable;
pub mod iri;

pub use iri::{Iri, PrefixMap};
pub use literal::{LiteralKind, TypedLiteral};
pub(crate) use literal::is_language_tag;
pub use numeric::{datatype_local_name, Number, NumericType};
pub use variable::Variable;
