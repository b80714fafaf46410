//! Core trait abstractions for swrl-builtins
//!
//! This module defines the seams between the evaluator and its collaborators:
//! - `BindingTable`: the relation of antecedent bindings to be filtered
//! - `EvaluationHook`: observation of per-row outcomes
//!
//! # Design Principles
//!
//! 1. **Dependency Inversion**: the evaluator reads bindings through a trait,
//!    not a concrete store
//! 2. **Interface Segregation**: reading cells and observing outcomes are
//!    separate traits

use crate::term::Variable;

// ============================================================================
// Binding Tables
// ============================================================================

/// A relation of named columns and rows of string-encoded typed values
///
/// Column names may carry a leading `?`; lookups ignore it on both sides.
///
/// # Example
///
/// ```ignore
/// struct Single(String);
///
/// impl BindingTable for Single {
///     fn columns(&self) -> Vec<&str> { vec!["?X"] }
///     fn row_count(&self) -> usize { 1 }
///     fn cell(&self, row: usize, column: &str) -> Option<&str> {
///         (row == 0 && strip_marker(column) == "X").then(|| self.0.as_str())
///     }
/// }
/// ```
pub trait BindingTable {
    /// Column names in order
    fn columns(&self) -> Vec<&str>;

    /// Number of rows
    fn row_count(&self) -> usize;

    /// Wire token in `column` of `row`; `None` for an absent cell, an unknown
    /// column or an out-of-range row
    fn cell(&self, row: usize, column: &str) -> Option<&str>;
}

/// Extension methods for binding tables
pub trait BindingTableExt: BindingTable {
    /// Check whether a column exists
    fn has_column(&self, column: &str) -> bool {
        let wanted = strip_marker(column);
        self.columns().iter().any(|c| strip_marker(c) == wanted)
    }

    /// Check whether the column a variable names exists
    fn has_variable(&self, variable: &Variable) -> bool {
        self.columns().iter().any(|c| variable.names_column(c))
    }

    /// Check whether the table has no rows
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

// Blanket implementation for all BindingTable implementors
impl<T: BindingTable + ?Sized> BindingTableExt for T {}

/// Drop the leading `?` from a column or variable name
pub fn strip_marker(name: &str) -> &str {
    name.strip_prefix('?').unwrap_or(name)
}

// ============================================================================
// Evaluation Hooks
// ============================================================================

/// Why a row was left out of a result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exclusion {
    /// An argument variable has no value in the row
    Unbound,
    /// The predicate was evaluated and does not hold
    Failed,
}

/// Hook for observing evaluation (for logging, debugging, metrics)
///
/// All methods have default no-op implementations.
pub trait EvaluationHook: Send + Sync {
    /// Called before the first row is examined
    fn on_evaluation_start(&self, _predicate: &str, _rows: usize) {}

    /// Called for each row kept in the result
    fn on_row_kept(&self, _row: usize) {}

    /// Called for each row left out of the result
    fn on_row_excluded(&self, _row: usize, _reason: Exclusion) {}

    /// Called after the last row
    fn on_evaluation_complete(&self, _predicate: &str, _kept: usize) {}
}

/// A no-op hook implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHook;

impl EvaluationHook for NoOpHook {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pairs(Vec<(&'static str, Option<&'static str>)>);

    impl BindingTable for Pairs {
        fn columns(&self) -> Vec<&str> {
            self.0.iter().map(|(c, _)| *c).collect()
        }

        fn row_count(&self) -> usize {
            1
        }

        fn cell(&self, row: usize, column: &str) -> Option<&str> {
            if row != 0 {
                return None;
            }
            self.0
                .iter()
                .find(|(c, _)| strip_marker(c) == strip_marker(column))
                .and_then(|(_, v)| *v)
        }
    }

    #[test]
    fn test_has_column_ignores_marker() {
        let table = Pairs(vec![("?X", Some("1")), ("Y", None)]);
        assert!(table.has_column("X"));
        assert!(table.has_column("?Y"));
        assert!(!table.has_column("Z"));
        assert!(table.has_variable(&Variable::new("X")));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_absent_cell() {
        let table = Pairs(vec![("?X", Some("1")), ("Y", None)]);
        assert_eq!(table.cell(0, "X"), Some("1"));
        assert_eq!(table.cell(0, "Y"), None);
        assert_eq!(table.cell(1, "X"), None);
    }
}
