//! SWRL built-in evaluation
//!
//! Evaluates SWRL built-in atoms (`swrlb:mod`, `swrlb:substringAfter`, ...)
//! row by row over tables of variable bindings.
//!
//! # Architecture
//!
//! - [`core::BindingTable`] - Interface for the tables atoms are evaluated over
//! - [`builtins::BuiltinRegistry`] - Static table of predicate descriptors
//! - [`evaluator::Evaluator`] - Row-wise filter and bind evaluation
//! - [`parser`] - XML and notation codecs for atoms
//!
//! # Example
//!
//! ```rust
//! use swrl_builtins::{BuiltinArgument, BuiltinAtom, Evaluator, Relation};
//!
//! let mut table = Relation::new(["?X", "?Y", "?Z"]).unwrap();
//! table.push_tokens(["3^^int", "13^^int", "5.0^^float"]).unwrap();
//! table.push_tokens(["1^^int", "2^^int", "0^^int"]).unwrap();
//!
//! let atom = BuiltinAtom::modulo(
//!     BuiltinArgument::variable("X"),
//!     BuiltinArgument::variable("Y"),
//!     BuiltinArgument::variable("Z"),
//! );
//! let result = Evaluator::new().evaluate(&atom, &table).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(atom.to_string(), "swrlb:mod(?X,?Y,?Z)");
//! ```

pub mod atom;
pub mod builtins;
pub mod config;
pub mod core;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod relation;
pub mod term;

// Re-export core traits
pub use crate::core::{BindingTable, BindingTableExt, EvaluationHook, Exclusion, NoOpHook, ns};

// Re-export term types
pub use term::{Iri, LiteralKind, Number, NumericType, PrefixMap, TypedLiteral, Variable};

// Re-export atoms and built-ins
pub use atom::{AtomFormatter, BuiltinArgument, BuiltinAtom};
pub use builtins::{Arity, Builtin, BuiltinRegistry, BuiltinSpec, Semantics, Value};

// Re-export evaluation
pub use evaluator::{EvaluationMode, Evaluator};
pub use relation::{Relation, Row};

// Re-export codecs
pub use parser::{parse_atom, AtomCodec, Element, NotationParser, ParseError};

// Re-export configuration types
pub use config::{CodecConfig, ConfigError, EvaluationConfig, GeneralConfig, LogLevel, OutputFormat, SwrlConfig};

// Re-export error types
pub use error::{ErrorCategory, ErrorCode, ErrorContext, SwrlError, SwrlResult};
