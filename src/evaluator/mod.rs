//! Row-wise evaluation of built-in atoms over binding tables
//!
//! The evaluator scans every row once:
//! 1. Resolve each argument against the row
//! 2. Apply the predicate's semantics
//! 3. Keep the row iff the predicate holds
//!
//! Rows that cannot be resolved or fail the predicate are dropped silently.
//! Only a broken atom (unknown predicate, wrong argument count) is an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::atom::{check_arity, BuiltinArgument, BuiltinAtom};
use crate::builtins::{BuiltinRegistry, BuiltinSpec, Semantics, Value};
use crate::core::{BindingTable, BindingTableExt, EvaluationHook, Exclusion};
use crate::error::{SwrlError, SwrlResult};
use crate::relation::{Relation, Row};
use crate::term::{TypedLiteral, Variable};

/// What the evaluator does with a row whose result cell is absent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Drop it: every argument must be bound
    #[default]
    Filter,
    /// Compute the result and write it into the cell
    Bind,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Filter => "filter",
            EvaluationMode::Bind => "bind",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "filter" => Some(EvaluationMode::Filter),
            "bind" => Some(EvaluationMode::Bind),
            _ => None,
        }
    }
}

/// Evaluates built-in atoms against binding tables
#[derive(Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r BuiltinRegistry,
    mode: EvaluationMode,
    hook: Option<&'r dyn EvaluationHook>,
}

impl Evaluator<'static> {
    /// An evaluator over the standard registry in filter mode
    pub fn new() -> Self {
        Evaluator::with_registry(BuiltinRegistry::standard())
    }
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Evaluator::new()
    }
}

impl<'r> Evaluator<'r> {
    /// An evaluator over a caller-supplied registry
    pub fn with_registry(registry: &'r BuiltinRegistry) -> Self {
        Evaluator {
            registry,
            mode: EvaluationMode::Filter,
            hook: None,
        }
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach a hook that observes every row outcome
    pub fn with_hook(mut self, hook: &'r dyn EvaluationHook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    pub fn registry(&self) -> &'r BuiltinRegistry {
        self.registry
    }

    /// Evaluate in the configured mode
    pub fn run<T: BindingTable + ?Sized>(&self, atom: &BuiltinAtom, table: &T) -> SwrlResult<Relation> {
        match self.mode {
            EvaluationMode::Filter => self.evaluate(atom, table),
            EvaluationMode::Bind => self.bind(atom, table),
        }
    }

    /// Keep the rows for which the atom holds
    ///
    /// The result has the input's columns and a subsequence of its rows, in
    /// input order.
    pub fn evaluate<T: BindingTable + ?Sized>(&self, atom: &BuiltinAtom, table: &T) -> SwrlResult<Relation> {
        let spec = self.prepare(atom)?;
        self.scan(atom, spec, table, None)
    }

    /// Like `evaluate`, but a function predicate whose result variable is
    /// unbound in a row gets the computed value written into that cell
    pub fn bind<T: BindingTable + ?Sized>(&self, atom: &BuiltinAtom, table: &T) -> SwrlResult<Relation> {
        let spec = self.prepare(atom)?;
        let target = match (spec.semantics, atom.arguments().first()) {
            (Semantics::Function(compute), Some(BuiltinArgument::Variable(v))) if table.has_variable(v) => {
                Some(BindTarget { compute, variable: v })
            }
            _ => None,
        };
        self.scan(atom, spec, table, target)
    }

    fn prepare(&self, atom: &BuiltinAtom) -> SwrlResult<&'static BuiltinSpec> {
        let spec = self
            .registry
            .get(atom.predicate())
            .ok_or_else(|| SwrlError::unknown_builtin(atom.predicate()))?;
        check_arity(atom, spec.builtin)?;
        Ok(spec)
    }

    fn scan<T: BindingTable + ?Sized>(
        &self,
        atom: &BuiltinAtom,
        spec: &BuiltinSpec,
        table: &T,
        target: Option<BindTarget<'_>>,
    ) -> SwrlResult<Relation> {
        let columns = table.columns();
        let mut output = Relation::new(columns.iter().copied())?;
        let rows = table.row_count();
        debug!(predicate = %spec.builtin, rows, mode = self.mode.as_str(), "evaluating built-in");

        if let Some(hook) = self.hook {
            hook.on_evaluation_start(atom.predicate(), rows);
        }

        if let Some(missing) = atom.variables().find(|v| !table.has_variable(v)) {
            debug!(variable = %missing, "variable names no column, no row can match");
            if let Some(hook) = self.hook {
                hook.on_evaluation_complete(atom.predicate(), 0);
            }
            return Ok(output);
        }

        for row in 0..rows {
            let mut cells: Row = columns
                .iter()
                .map(|column| table.cell(row, column).map(str::to_string))
                .collect();

            let outcome = match target {
                Some(ref target) if table.cell(row, target.variable.name()).is_none() => {
                    target.compute_cell(atom, table, row).map(|literal| {
                        if let Some(index) = output.column_index(target.variable.name()) {
                            cells[index] = Some(literal.to_string());
                        }
                    })
                }
                _ => check_row(atom, spec, table, row),
            };

            match outcome {
                Ok(()) => {
                    output.push_row(cells)?;
                    if let Some(hook) = self.hook {
                        hook.on_row_kept(row);
                    }
                }
                Err(reason) => {
                    trace!(row, ?reason, "row excluded");
                    if let Some(hook) = self.hook {
                        hook.on_row_excluded(row, reason);
                    }
                }
            }
        }

        debug!(predicate = %spec.builtin, kept = output.len(), "built-in evaluated");
        if let Some(hook) = self.hook {
            hook.on_evaluation_complete(atom.predicate(), output.len());
        }
        Ok(output)
    }
}

/// Resolve every argument in `row` and test the predicate
fn check_row<T: BindingTable + ?Sized>(
    atom: &BuiltinAtom,
    spec: &BuiltinSpec,
    table: &T,
    row: usize,
) -> Result<(), Exclusion> {
    let args = resolve_all(atom.arguments(), table, row).ok_or(Exclusion::Unbound)?;
    if spec.semantics.holds(&args) {
        Ok(())
    } else {
        Err(Exclusion::Failed)
    }
}

fn resolve_all<T: BindingTable + ?Sized>(
    arguments: &[BuiltinArgument],
    table: &T,
    row: usize,
) -> Option<Vec<TypedLiteral>> {
    arguments.iter().map(|arg| arg.resolve(table, row)).collect()
}

/// Result variable of a function predicate in bind mode
struct BindTarget<'a> {
    compute: fn(&[TypedLiteral]) -> Option<Value>,
    variable: &'a Variable,
}

impl BindTarget<'_> {
    fn compute_cell<T: BindingTable + ?Sized>(
        &self,
        atom: &BuiltinAtom,
        table: &T,
        row: usize,
    ) -> Result<TypedLiteral, Exclusion> {
        let operands = resolve_all(&atom.arguments()[1..], table, row).ok_or(Exclusion::Unbound)?;
        let value = (self.compute)(&operands).ok_or(Exclusion::Failed)?;
        Ok(value.to_literal(operands.first()))
    }
}
