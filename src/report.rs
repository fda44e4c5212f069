//! One-shot analysis of a task sequence.
//!
//! Runs the sequence through a fresh automaton, collects the diagnostic
//! queries, and completes the scanpath when it is not accepted.

use crate::completion::{ScanpathCompleter, Termination};
use crate::core::{ExamState, ExecutionStep, StackSymbol, Symbol};
use crate::engine::PushdownAutomaton;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while exporting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}

/// Outcome of analysing one examination.
#[derive(Clone, Debug, Serialize)]
pub struct ScanpathReport {
    pub task_sequence: Vec<Symbol>,
    pub accepted: bool,
    pub missing_tasks: Vec<Symbol>,
    pub final_state: ExamState,
    pub final_stack: Vec<StackSymbol>,
    pub history: Vec<ExecutionStep>,
    /// Equal to `task_sequence` when the examination was already complete
    pub completed_sequence: Vec<Symbol>,
    pub termination: Termination,
    /// Whether `completed_sequence` is accepted when replayed from scratch
    pub completion_valid: bool,
}

impl ScanpathReport {
    /// Analyse `tasks` with the clinical completion rules.
    pub fn analyze(tasks: &[Symbol]) -> Self {
        Self::analyze_with(tasks, &mut ScanpathCompleter::new())
    }

    /// Analyse `tasks`, completing with the given completer.
    pub fn analyze_with(tasks: &[Symbol], completer: &mut ScanpathCompleter) -> Self {
        let mut pda = PushdownAutomaton::new();
        let accepted = pda.process_sequence(tasks);

        let completion = completer.complete(tasks);
        let completion_valid = accepted || completer.validate_completion(&completion.sequence);

        Self {
            task_sequence: tasks.to_vec(),
            accepted,
            missing_tasks: pda.missing_tasks(),
            final_state: pda.current_state(),
            final_stack: pda.stack().to_vec(),
            history: pda.history().steps().to_vec(),
            completed_sequence: completion.sequence,
            termination: completion.termination,
            completion_valid,
        }
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::SerializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbols;

    #[test]
    fn complete_examination_needs_no_completion() {
        let tasks = symbols(["R", "Rh", "Ax", "Q", "ST", "T", "Q"]);
        let report = ScanpathReport::analyze(&tasks);

        assert!(report.accepted);
        assert!(report.missing_tasks.is_empty());
        assert_eq!(report.completed_sequence, tasks);
        assert_eq!(report.termination, Termination::AlreadyAccepted);
        assert!(report.completion_valid);
        assert_eq!(report.history.len(), 7);
    }

    #[test]
    fn incomplete_examination_is_completed() {
        let tasks = symbols(["R", "Rh", "Ax", "Q", "Detail"]);
        let report = ScanpathReport::analyze(&tasks);

        assert!(!report.accepted);
        assert_eq!(report.final_state, ExamState::Detail);
        assert_eq!(
            report.final_stack,
            vec![StackSymbol::Z0, StackSymbol::Qrs, StackSymbol::ExpectRepol]
        );
        assert_eq!(report.missing_tasks, symbols(["ST", "T", "Q", "ST", "T"]));
        assert_eq!(
            report.completed_sequence,
            symbols(["R", "Rh", "Ax", "Q", "Detail", "ST", "T", "Q", "ST"])
        );
        assert!(!report.completion_valid);
    }

    #[test]
    fn report_exports_json() {
        let report = ScanpathReport::analyze(&symbols(["R", "Rh"]));
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["final_state"], "Axis");
        assert_eq!(value["final_stack"], serde_json::json!(["Z0"]));
        assert_eq!(value["task_sequence"], serde_json::json!(["R", "Rh"]));
        assert_eq!(value["termination"], "StackDrained");
    }
}
