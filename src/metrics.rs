//! Accuracy metrics for evaluating completions against reference scanpaths.

use crate::completion::ScanpathCompleter;
use crate::core::Symbol;
use serde::Serialize;

/// Position-wise agreement between two sequences, as a percentage of the
/// longer one.
///
/// Two empty sequences are identical (100); if exactly one is empty the
/// similarity is 0.
///
/// ```rust
/// use scanpath_pda::core::symbols;
/// use scanpath_pda::metrics::sequence_similarity;
///
/// let a = symbols(["R", "Rh", "Ax", "Q"]);
/// let b = symbols(["R", "Rh", "Q"]);
/// assert_eq!(sequence_similarity(&a, &b), 50.0);
/// ```
pub fn sequence_similarity(a: &[Symbol], b: &[Symbol]) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 100.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
    let longest = a.len().max(b.len());
    matches as f64 / longest as f64 * 100.0
}

/// Running tally of how many completions the automaton accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CompletionSummary {
    pub total: usize,
    pub successful: usize,
}

impl CompletionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, accepted: bool) {
        self.total += 1;
        if accepted {
            self.successful += 1;
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.successful
    }

    /// Percentage of accepted completions; 0 when nothing was recorded.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64 * 100.0
    }

    /// Complete every partial scanpath and tally which results validate.
    pub fn evaluate<'a, I>(completer: &mut ScanpathCompleter, partials: I) -> Self
    where
        I: IntoIterator<Item = &'a [Symbol]>,
    {
        let mut summary = Self::new();
        for partial in partials {
            let completed = completer.complete_scanpath(partial);
            summary.record(completer.validate_completion(&completed));
        }
        summary
    }
}
