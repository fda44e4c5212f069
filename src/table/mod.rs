//! The automaton's transition relation.
//!
//! The relation is declarative data: an ordered slice of [`Transition`]
//! records, looked up first-match. The ECG table is a process-wide static
//! shared by every automaton instance.

mod transition;
mod validate;

pub use transition::{StackOperation, Transition, TransitionTable};
pub use validate::TableViolation;
