//! Core value types of the scanpath automaton.
//!
//! This module contains the pure data the rest of the crate is built on:
//! - Examination states via [`ExamState`]
//! - Input and stack alphabets via [`Symbol`] and [`StackSymbol`]
//! - Append-only execution history for tracing
//!
//! Nothing here mutates shared state; the engine owns all run-time
//! configuration.

mod history;
mod state;
mod symbol;

pub use history::{ExecutionHistory, ExecutionStep};
pub use state::ExamState;
pub use symbol::{symbols, StackSymbol, Symbol, SymbolError, LEAD_ALPHABET, TASK_ALPHABET};
