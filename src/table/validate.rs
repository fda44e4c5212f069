//! Determinism checks for transition tables.
//!
//! Every violation in a table is reported at once via stillwater's
//! `Validation`, so a table author can fix all collisions in one pass.

use crate::core::{ExamState, StackSymbol, Symbol};
use crate::table::transition::TransitionTable;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A structural defect in a transition table.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableViolation {
    #[error("Rows {first} and {duplicate} both match ({state}, {input}, {stack_top})")]
    Ambiguous {
        state: ExamState,
        input: Symbol,
        stack_top: StackSymbol,
        first: usize,
        duplicate: usize,
    },

    #[error("Row {row} pushes the bottom sentinel Z0")]
    PushesSentinel { row: usize },

    #[error("Row {row} pops the bottom sentinel Z0")]
    PopsSentinel { row: usize },
}

impl TransitionTable {
    /// Check that at most one row matches any `(state, input, top)` key and
    /// that no row can remove or duplicate the `Z0` sentinel.
    ///
    /// Returns `Validation::Success(())` for a well-formed table, otherwise
    /// a failure carrying every violation found.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<TableViolation>> {
        let rows = self.transitions();
        let mut checks: Vec<Validation<(), NonEmptyVec<TableViolation>>> = Vec::new();

        for (row, t) in rows.iter().enumerate() {
            if let Some(first) = rows[..row]
                .iter()
                .position(|earlier| earlier.matches(t.from, &t.input, t.stack_top))
            {
                checks.push(Validation::fail(TableViolation::Ambiguous {
                    state: t.from,
                    input: t.input.clone(),
                    stack_top: t.stack_top,
                    first,
                    duplicate: row,
                }));
            }

            if t.operation.pushed().contains(&StackSymbol::Z0) {
                checks.push(Validation::fail(TableViolation::PushesSentinel { row }));
            }

            if t.stack_top == StackSymbol::Z0 && t.operation.pops() {
                checks.push(Validation::fail(TableViolation::PopsSentinel { row }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
