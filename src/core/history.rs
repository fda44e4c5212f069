//! Execution history tracking.
//!
//! Every successful step of the automaton appends one [`ExecutionStep`].
//! Failed lookups are never recorded. History is read for tracing and
//! debugging only; no control logic consults it.

use super::state::ExamState;
use super::symbol::{StackSymbol, Symbol};
use crate::table::Transition;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Record of one applied transition.
///
/// Captures the configuration *before* the transition fired, so a trace can
/// be replayed or inspected step by step.
#[derive(Clone, Debug, Serialize)]
pub struct ExecutionStep {
    /// State the automaton was in when the input arrived
    pub state_before: ExamState,
    /// The consumed input symbol
    pub input: Symbol,
    /// Stack contents (bottom first) before the operation was applied
    pub stack_before: Vec<StackSymbol>,
    /// The table row that fired
    pub transition: Transition,
    /// When the step was applied
    pub recorded_at: DateTime<Utc>,
}

/// Ordered, append-only trace of a run.
///
/// # Example
///
/// ```rust
/// use scanpath_pda::engine::PushdownAutomaton;
/// use scanpath_pda::core::{ExamState, Symbol};
///
/// let mut pda = PushdownAutomaton::new();
/// pda.step(Symbol::R);
/// pda.step(Symbol::RH);
///
/// let path = pda.history().get_path();
/// assert_eq!(path, vec![ExamState::Rate, ExamState::Rhythm, ExamState::Axis]);
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExecutionHistory {
    steps: Vec<ExecutionStep>,
}

impl ExecutionHistory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    pub(crate) fn record(&mut self, step: ExecutionStep) {
        self.steps.push(step);
    }

    pub(crate) fn clear(&mut self) {
        self.steps.clear();
    }

    /// All recorded steps, oldest first.
    pub fn steps(&self) -> &[ExecutionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Input symbols consumed so far, in order.
    pub fn inputs(&self) -> Vec<Symbol> {
        self.steps.iter().map(|s| s.input.clone()).collect()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the state before the first step followed by the target state
    /// of every step. Empty if nothing has been recorded.
    pub fn get_path(&self) -> Vec<ExamState> {
        let mut path = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            path.push(first.state_before);
        }
        path.extend(self.steps.iter().map(|s| s.transition.to));
        path
    }

    /// Time between the first and last recorded step.
    ///
    /// Returns `None` if there are no steps.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.recorded_at
            .signed_duration_since(first.recorded_at)
            .to_std()
            .ok()
    }
}

impl fmt::Display for ExecutionHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            let stack: Vec<_> = step.stack_before.iter().map(StackSymbol::name).collect();
            writeln!(f, "Step {}:", i + 1)?;
            writeln!(f, "  State: {}", step.state_before)?;
            writeln!(f, "  Input: {}", step.input)?;
            writeln!(f, "  Stack before: [{}]", stack.join(", "))?;
            writeln!(f, "  Transition: {}", step.transition)?;
        }
        Ok(())
    }
}
