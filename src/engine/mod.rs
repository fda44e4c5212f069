//! Execution of the scanpath automaton.
//!
//! A [`PushdownAutomaton`] owns one run's configuration (state, stack,
//! history) and steps it against the static ECG transition table. Failure
//! to find a transition is an ordinary return value, never a panic.

mod machine;

pub use machine::{PushdownAutomaton, StepError};
