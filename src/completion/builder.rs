//! Builder for configuring a [`ScanpathCompleter`].

use crate::completion::completer::ScanpathCompleter;
use crate::completion::rules::CompletionRules;
use crate::engine::PushdownAutomaton;
use std::sync::Arc;
use thiserror::Error;

/// Synthesis rounds allowed before completion gives up.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Errors that can occur when building a completer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Iteration cap must be at least 1")]
    ZeroIterationCap,

    #[error("Completion rule table is empty")]
    EmptyRules,
}

/// Builder for a [`ScanpathCompleter`] with a fluent API.
pub struct CompleterBuilder {
    max_iterations: usize,
    rules: Option<Arc<CompletionRules>>,
}

impl CompleterBuilder {
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            rules: None,
        }
    }

    /// Set the synthesis iteration cap.
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Use an alternative rule table instead of the clinical one.
    pub fn rules(mut self, rules: impl Into<Arc<CompletionRules>>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Build the completer.
    /// Returns an error if the configuration cannot make progress.
    pub fn build(self) -> Result<ScanpathCompleter, BuildError> {
        if self.max_iterations == 0 {
            return Err(BuildError::ZeroIterationCap);
        }

        let rules = self.rules.unwrap_or_else(CompletionRules::clinical);
        if rules.is_empty() {
            return Err(BuildError::EmptyRules);
        }

        Ok(ScanpathCompleter::from_parts(
            PushdownAutomaton::new(),
            rules,
            self.max_iterations,
        ))
    }
}

impl Default for CompleterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::rules::CompletionRule;
    use crate::core::{StackSymbol, Symbol};

    #[test]
    fn defaults_to_clinical_rules_and_fifty_iterations() {
        let completer = CompleterBuilder::new().build().unwrap();
        assert_eq!(completer.max_iterations(), DEFAULT_MAX_ITERATIONS);
        assert!(Arc::ptr_eq(completer.rules(), &CompletionRules::clinical()));
    }

    #[test]
    fn builder_rejects_zero_cap() {
        let result = CompleterBuilder::new().max_iterations(0).build();
        assert!(matches!(result, Err(BuildError::ZeroIterationCap)));
    }

    #[test]
    fn builder_rejects_empty_rules() {
        let result = CompleterBuilder::new()
            .rules(CompletionRules::builder().build())
            .build();
        assert!(matches!(result, Err(BuildError::EmptyRules)));
    }

    #[test]
    fn builder_accepts_custom_rules() {
        let rules = CompletionRules::builder()
            .rule(StackSymbol::Qrs, CompletionRule::new([Symbol::T]))
            .build();
        let completer = CompleterBuilder::new()
            .rules(rules)
            .max_iterations(5)
            .build()
            .unwrap();

        assert_eq!(completer.max_iterations(), 5);
        assert_eq!(completer.rules().len(), 1);
    }
}
