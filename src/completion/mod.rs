//! Completion of truncated examination scanpaths.
//!
//! When a scanpath leaves obligations open on the automaton's stack, the
//! [`ScanpathCompleter`] looks up each top-of-stack symbol in the
//! [`CompletionRules`] and feeds the required follow-up tasks back into the
//! automaton, round after round, until only the sentinel remains, a symbol
//! has no rule, or the iteration cap is hit.
//!
//! # Example
//!
//! ```rust
//! use scanpath_pda::completion::{ScanpathCompleter, Termination};
//! use scanpath_pda::core::symbols;
//!
//! let mut completer = ScanpathCompleter::builder()
//!     .max_iterations(10)
//!     .build()
//!     .unwrap();
//!
//! let completion = completer.complete(&symbols(["R", "Rh", "Ax", "Q", "Detail"]));
//! assert_eq!(completion.termination, Termination::StackDrained);
//! assert_eq!(completion.synthesized, symbols(["ST", "T", "Q", "ST"]));
//! ```

mod builder;
mod completer;
mod rules;

pub use builder::{BuildError, CompleterBuilder, DEFAULT_MAX_ITERATIONS};
pub use completer::{Completion, ScanpathCompleter, Termination};
pub use rules::{CompletionRule, CompletionRules, CompletionRulesBuilder};
