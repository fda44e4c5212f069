//! The pushdown automaton: configuration plus stack-driven stepping.

use crate::core::{ExamState, ExecutionHistory, ExecutionStep, StackSymbol, Symbol};
use crate::table::{Transition, TransitionTable};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur when stepping the automaton.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StepError {
    #[error("No transition for ({state}, {input}, {stack_top})")]
    NoTransition {
        state: ExamState,
        input: Symbol,
        stack_top: StackSymbol,
    },
}

/// Follow-up tasks reported by [`PushdownAutomaton::missing_tasks`], in
/// priority order.
static MISSING_TASK_RULES: [(StackSymbol, &[Symbol]); 3] = [
    (StackSymbol::ExpectRepol, &[Symbol::ST, Symbol::T]),
    (StackSymbol::Qrs, &[Symbol::Q, Symbol::ST, Symbol::T]),
    (StackSymbol::St, &[Symbol::T]),
];

/// Deterministic pushdown automaton over ECG examination tasks.
///
/// Holds the current state, the stack (bottom first; `Z0` is always at
/// index 0) and the history of applied transitions. Each instance is
/// exclusively owned by one run; use one automaton per concurrent run.
///
/// # Example
///
/// ```rust
/// use scanpath_pda::core::{symbols, ExamState, StackSymbol};
/// use scanpath_pda::engine::PushdownAutomaton;
///
/// let mut pda = PushdownAutomaton::new();
/// let accepted = pda.process_sequence(&symbols(["R", "Rh", "Ax", "Q", "ST", "T", "Q"]));
///
/// assert!(accepted);
/// assert_eq!(pda.current_state(), ExamState::End);
/// assert_eq!(pda.stack(), &[StackSymbol::Z0]);
/// ```
#[derive(Clone, Debug)]
pub struct PushdownAutomaton {
    table: &'static TransitionTable,
    current: ExamState,
    stack: Vec<StackSymbol>,
    history: ExecutionHistory,
}

impl PushdownAutomaton {
    /// Create an automaton over the ECG table, in the initial configuration.
    pub fn new() -> Self {
        Self {
            table: TransitionTable::ecg(),
            current: ExamState::INITIAL,
            stack: vec![StackSymbol::Z0],
            history: ExecutionHistory::new(),
        }
    }

    /// Return to `Rate` with stack `[Z0]` and an empty history.
    pub fn reset(&mut self) {
        self.current = ExamState::INITIAL;
        self.stack.clear();
        self.stack.push(StackSymbol::Z0);
        self.history.clear();
    }

    /// Current control state (pure)
    pub fn current_state(&self) -> ExamState {
        self.current
    }

    /// Stack contents, bottom first (pure)
    pub fn stack(&self) -> &[StackSymbol] {
        &self.stack
    }

    /// Top of the stack.
    pub fn stack_top(&self) -> StackSymbol {
        // The sentinel is never popped, so the stack cannot be empty.
        self.stack.last().copied().unwrap_or(StackSymbol::Z0)
    }

    /// Trace of applied transitions since the last reset (pure)
    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    pub fn table(&self) -> &'static TransitionTable {
        self.table
    }

    /// Consume one input symbol, reporting why when no transition applies.
    ///
    /// On failure the configuration is unchanged and nothing is recorded.
    pub fn try_step(&mut self, input: Symbol) -> Result<&Transition, StepError> {
        let table = self.table;
        let stack_top = self.stack_top();
        let Some(transition) = table.lookup(self.current, &input, stack_top) else {
            return Err(StepError::NoTransition {
                state: self.current,
                input,
                stack_top,
            });
        };

        self.history.record(ExecutionStep {
            state_before: self.current,
            input,
            stack_before: self.stack.clone(),
            transition: transition.clone(),
            recorded_at: Utc::now(),
        });

        transition.operation.apply(&mut self.stack);
        self.current = transition.to;
        trace!(%transition, stack_depth = self.stack.len(), "applied transition");
        Ok(transition)
    }

    /// Consume one input symbol; `false` if no transition matches.
    pub fn step(&mut self, input: Symbol) -> bool {
        match self.try_step(input) {
            Ok(_) => true,
            Err(err) => {
                debug!(%err, "step rejected");
                false
            }
        }
    }

    /// Reset, then consume `inputs` in order.
    ///
    /// Stops at the first rejected symbol and returns `false`, leaving the
    /// configuration reached so far in place for inspection. Otherwise
    /// returns [`accepts`](Self::accepts).
    pub fn process_sequence(&mut self, inputs: &[Symbol]) -> bool {
        self.reset();
        for input in inputs {
            if !self.step(input.clone()) {
                return false;
            }
        }
        self.accepts()
    }

    /// True iff the state is `End` and the stack is exactly `[Z0]`.
    pub fn accepts(&self) -> bool {
        self.current.is_accepting() && self.stack == [StackSymbol::Z0]
    }

    /// True if obligations remain on the stack or the state is not `End`.
    pub fn is_incomplete(&self) -> bool {
        self.stack.len() > 1 || !self.current.is_accepting()
    }

    /// Heuristic list of follow-up tasks implied by the stack contents.
    ///
    /// For each of `ExpectRepol`, `QRS`, `ST` present anywhere on the stack,
    /// in that order, appends its associated tasks. Overlapping entries are
    /// kept: a stack holding both `QRS` and `ST` yields `[Q, ST, T, T]`. The
    /// result is neither deduplicated nor a shortest path to acceptance.
    pub fn missing_tasks(&self) -> Vec<Symbol> {
        MISSING_TASK_RULES
            .iter()
            .filter(|(marker, _)| self.stack.contains(marker))
            .flat_map(|(_, tasks)| tasks.iter().cloned())
            .collect()
    }
}

impl Default for PushdownAutomaton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbols;

    fn run(names: &[&'static str]) -> (PushdownAutomaton, bool) {
        let mut pda = PushdownAutomaton::new();
        let accepted = pda.process_sequence(&symbols(names.iter().copied()));
        (pda, accepted)
    }

    #[test]
    fn new_automaton_starts_at_rate() {
        let pda = PushdownAutomaton::new();
        assert_eq!(pda.current_state(), ExamState::Rate);
        assert_eq!(pda.stack(), &[StackSymbol::Z0]);
        assert!(pda.history().is_empty());
        assert!(!pda.accepts());
        assert!(pda.is_incomplete());
    }

    #[test]
    fn step_applies_push_and_records_history() {
        let mut pda = PushdownAutomaton::new();
        assert!(pda.step(Symbol::R));

        assert_eq!(pda.current_state(), ExamState::Rhythm);
        assert_eq!(pda.stack(), &[StackSymbol::Z0, StackSymbol::R]);

        let step = &pda.history().steps()[0];
        assert_eq!(step.state_before, ExamState::Rate);
        assert_eq!(step.input, Symbol::R);
        assert_eq!(step.stack_before, vec![StackSymbol::Z0]);
        assert_eq!(step.transition.to, ExamState::Rhythm);
    }

    #[test]
    fn failed_step_leaves_configuration_untouched() {
        let mut pda = PushdownAutomaton::new();
        pda.step(Symbol::R);

        assert!(!pda.step(Symbol::T));
        assert_eq!(pda.current_state(), ExamState::Rhythm);
        assert_eq!(pda.stack(), &[StackSymbol::Z0, StackSymbol::R]);
        assert_eq!(pda.history().len(), 1);
    }

    #[test]
    fn try_step_reports_missing_transition() {
        let mut pda = PushdownAutomaton::new();
        let err = pda.try_step(Symbol::Q).unwrap_err();
        assert_eq!(
            err,
            StepError::NoTransition {
                state: ExamState::Rate,
                input: Symbol::Q,
                stack_top: StackSymbol::Z0,
            }
        );
        assert_eq!(err.to_string(), "No transition for (Rate, Q, Z0)");
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let mut pda = PushdownAutomaton::new();
        assert!(!pda.step(Symbol::new("Blink")));
        assert_eq!(pda.current_state(), ExamState::Rate);
    }

    #[test]
    fn reset_restores_initial_configuration() {
        let (mut pda, _) = run(&["R", "Rh", "Ax", "Q", "Detail"]);
        pda.reset();
        assert_eq!(pda.current_state(), ExamState::Rate);
        assert_eq!(pda.stack(), &[StackSymbol::Z0]);
        assert!(pda.history().is_empty());
    }

    #[test]
    fn reset_is_idempotent() {
        let (mut pda, _) = run(&["R", "Rh", "Ax"]);
        pda.reset();
        let once = (pda.current_state(), pda.stack().to_vec(), pda.history().len());
        pda.reset();
        let twice = (pda.current_state(), pda.stack().to_vec(), pda.history().len());
        assert_eq!(once, twice);
    }

    #[test]
    fn examination_with_open_qrs_is_not_accepted() {
        let (pda, accepted) = run(&["R", "Rh", "Ax", "Q", "ST", "T"]);
        assert!(!accepted);
        assert_eq!(pda.current_state(), ExamState::End);
        assert_eq!(pda.stack(), &[StackSymbol::Z0, StackSymbol::Qrs]);
        assert_eq!(pda.missing_tasks(), vec![Symbol::Q, Symbol::ST, Symbol::T]);
    }

    #[test]
    fn closing_qrs_reaches_acceptance() {
        let (pda, accepted) = run(&["R", "Rh", "Ax", "Q", "ST", "T", "Q"]);
        assert!(accepted);
        assert_eq!(pda.current_state(), ExamState::End);
        assert_eq!(pda.stack(), &[StackSymbol::Z0]);
        assert!(!pda.is_incomplete());

        let (_, accepted) = run(&["R", "Rh", "Ax", "Q", "ST", "T", "T"]);
        assert!(accepted);
    }

    #[test]
    fn detailed_inspection_reports_missing_tasks() {
        let (pda, accepted) = run(&["R", "Rh", "Ax", "Q", "Detail"]);
        assert!(!accepted);
        assert_eq!(pda.current_state(), ExamState::Detail);
        assert_eq!(
            pda.stack(),
            &[StackSymbol::Z0, StackSymbol::Qrs, StackSymbol::ExpectRepol]
        );
        assert_eq!(
            pda.missing_tasks(),
            vec![Symbol::ST, Symbol::T, Symbol::Q, Symbol::ST, Symbol::T]
        );
    }

    #[test]
    fn missing_tasks_keeps_overlapping_entries() {
        let (pda, _) = run(&["R", "Rh", "Ax", "Q", "ST"]);
        assert_eq!(
            pda.stack(),
            &[StackSymbol::Z0, StackSymbol::Qrs, StackSymbol::St]
        );
        assert_eq!(
            pda.missing_tasks(),
            vec![Symbol::Q, Symbol::ST, Symbol::T, Symbol::T]
        );
    }

    #[test]
    fn accepting_state_with_residual_stack_is_rejected() {
        let (pda, accepted) = run(&["Rh", "Rh", "T"]);
        assert_eq!(pda.current_state(), ExamState::End);
        assert_eq!(pda.stack(), &[StackSymbol::Z0, StackSymbol::Qrs]);
        assert!(!accepted);
        assert!(!pda.accepts());
        assert!(pda.is_incomplete());
    }

    #[test]
    fn bare_stack_outside_end_is_rejected() {
        let (pda, accepted) = run(&["Rh", "Rh"]);
        assert_eq!(pda.current_state(), ExamState::Axis);
        assert_eq!(pda.stack(), &[StackSymbol::Z0]);
        assert!(!accepted);
        assert!(pda.is_incomplete());
        assert!(pda.missing_tasks().is_empty());
    }

    #[test]
    fn process_sequence_stops_at_first_rejection() {
        let (pda, accepted) = run(&["R", "Rh", "T", "Ax"]);
        assert!(!accepted);
        assert_eq!(pda.current_state(), ExamState::End);
        assert_eq!(pda.stack(), &[StackSymbol::Z0, StackSymbol::Qrs]);
        assert_eq!(pda.history().len(), 3);
    }

    #[test]
    fn process_sequence_resets_before_running() {
        let mut pda = PushdownAutomaton::new();
        pda.step(Symbol::R);
        assert!(pda.process_sequence(&symbols(["Rh", "Rh", "T", "T"])));
        assert_eq!(pda.history().len(), 4);
    }

    #[test]
    fn detail_then_repolarization_path() {
        let (pda, accepted) = run(&["R", "Rh", "Ax", "Q", "Detail", "V1", "V2", "ST", "T", "T"]);
        assert!(accepted);
        assert_eq!(
            pda.history().get_path(),
            vec![
                ExamState::Rate,
                ExamState::Rhythm,
                ExamState::Axis,
                ExamState::Morph,
                ExamState::Morph,
                ExamState::Detail,
                ExamState::Detail,
                ExamState::Detail,
                ExamState::St,
                ExamState::End,
                ExamState::End,
            ]
        );
    }
}
