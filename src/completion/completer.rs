//! Greedy, stack-driven completion of truncated scanpaths.

use crate::completion::builder::{CompleterBuilder, DEFAULT_MAX_ITERATIONS};
use crate::completion::rules::CompletionRules;
use crate::core::{StackSymbol, Symbol};
use crate::engine::PushdownAutomaton;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Why synthesis stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// The input was already accepted; nothing was synthesized.
    AlreadyAccepted,
    /// Only the sentinel remains on the stack.
    StackDrained,
    /// The stack top had no completion rule.
    UnknownStackSymbol(StackSymbol),
    /// The iteration cap was reached with obligations still open.
    IterationCap,
}

/// Result of completing one scanpath.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Completion {
    /// The input followed by the synthesized suffix
    pub sequence: Vec<Symbol>,
    /// Only the synthesized suffix
    pub synthesized: Vec<Symbol>,
    /// Synthesis rounds used
    pub iterations: usize,
    pub termination: Termination,
    /// Whether the automaton accepted after the last synthesized step
    pub accepted: bool,
}

/// Completes truncated scanpaths using the clinical completion rules.
///
/// Completion never searches or backtracks: for each open obligation on top
/// of the stack it appends that obligation's required tasks, stepping the
/// automaton after each one. The result is not guaranteed to be accepted;
/// re-check with [`ScanpathCompleter::validate_completion`].
///
/// # Example
///
/// ```rust
/// use scanpath_pda::completion::ScanpathCompleter;
/// use scanpath_pda::core::symbols;
///
/// let mut completer = ScanpathCompleter::new();
/// let completed = completer.complete_scanpath(&symbols(["R", "Rh", "Ax", "Q", "Detail"]));
///
/// assert_eq!(
///     completed,
///     symbols(["R", "Rh", "Ax", "Q", "Detail", "ST", "T", "Q", "ST"])
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ScanpathCompleter {
    pda: PushdownAutomaton,
    rules: Arc<CompletionRules>,
    max_iterations: usize,
}

impl ScanpathCompleter {
    /// Completer with the clinical rules and the default iteration cap.
    pub fn new() -> Self {
        Self::from_parts(
            PushdownAutomaton::new(),
            CompletionRules::clinical(),
            DEFAULT_MAX_ITERATIONS,
        )
    }

    pub fn builder() -> CompleterBuilder {
        CompleterBuilder::new()
    }

    pub(crate) fn from_parts(
        pda: PushdownAutomaton,
        rules: Arc<CompletionRules>,
        max_iterations: usize,
    ) -> Self {
        Self {
            pda,
            rules,
            max_iterations,
        }
    }

    pub fn rules(&self) -> &Arc<CompletionRules> {
        &self.rules
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The owned automaton, in whatever configuration the last call left it.
    pub fn automaton(&self) -> &PushdownAutomaton {
        &self.pda
    }

    /// Extend `partial` until the automaton accepts or synthesis gives up.
    ///
    /// Returns `partial` unchanged if it is already accepted.
    pub fn complete_scanpath(&mut self, partial: &[Symbol]) -> Vec<Symbol> {
        self.complete(partial).sequence
    }

    /// Like [`complete_scanpath`](Self::complete_scanpath), but also reports
    /// how synthesis ended.
    pub fn complete(&mut self, partial: &[Symbol]) -> Completion {
        self.pda.reset();
        for symbol in partial {
            if let Err(err) = self.pda.try_step(symbol.clone()) {
                debug!(%err, "replay of partial scanpath skipped a symbol");
            }
        }

        if self.pda.accepts() {
            return Completion {
                sequence: partial.to_vec(),
                synthesized: Vec::new(),
                iterations: 0,
                termination: Termination::AlreadyAccepted,
                accepted: true,
            };
        }

        debug!(
            state = %self.pda.current_state(),
            stack_depth = self.pda.stack().len(),
            "incomplete scanpath, synthesizing completion"
        );

        let (synthesized, iterations, termination) = self.synthesize();

        let mut sequence = Vec::with_capacity(partial.len() + synthesized.len());
        sequence.extend_from_slice(partial);
        sequence.extend_from_slice(&synthesized);

        Completion {
            sequence,
            synthesized,
            iterations,
            termination,
            accepted: self.pda.accepts(),
        }
    }

    /// Expand open obligations from the top of the stack down.
    ///
    /// A failed step aborts the current rule but not the round loop, so the
    /// same unchanged top may be retried until the cap is reached.
    fn synthesize(&mut self) -> (Vec<Symbol>, usize, Termination) {
        let mut completion = Vec::new();
        let mut iterations = 0;

        while self.pda.stack().len() > 1 && iterations < self.max_iterations {
            iterations += 1;
            let top = self.pda.stack_top();

            let Some(rule) = self.rules.get(top) else {
                warn!(stack_top = %top, "no completion rule for stack symbol");
                return (completion, iterations, Termination::UnknownStackSymbol(top));
            };

            for task in &rule.required {
                completion.push(task.clone());
                if let Err(err) = self.pda.try_step(task.clone()) {
                    debug!(%err, "synthesized task rejected");
                    break;
                }
            }
        }

        let termination = if self.pda.stack().len() > 1 {
            warn!(
                max_iterations = self.max_iterations,
                "completion stopped at iteration cap"
            );
            Termination::IterationCap
        } else {
            Termination::StackDrained
        };

        (completion, iterations, termination)
    }

    /// Replay `sequence` from scratch and report whether it is accepted.
    pub fn validate_completion(&mut self, sequence: &[Symbol]) -> bool {
        self.pda.reset();
        self.pda.process_sequence(sequence)
    }
}

impl Default for ScanpathCompleter {
    fn default() -> Self {
        Self::new()
    }
}
