//! Scanpath PDA: a pushdown automaton for ECG examination scanpaths
//!
//! An examiner's scan of an electrocardiogram, reduced to a sequence of
//! diagnostic-task symbols, is modelled as the language of a deterministic
//! pushdown automaton. Open examination obligations (a QRS analysis that was
//! started, a detailed inspection awaiting repolarization checks) live on
//! the automaton's stack; a scanpath is complete when the automaton reaches
//! `End` with only the `Z0` sentinel left.
//!
//! # Core Concepts
//!
//! - **Transition table**: static, first-match relation over
//!   `(state, input, stack top)`
//! - **Engine**: [`PushdownAutomaton`] holding state, stack and history
//! - **Completion**: [`ScanpathCompleter`] greedily appends the tasks each
//!   open obligation requires
//!
//! # Example
//!
//! ```rust
//! use scanpath_pda::{symbols, PushdownAutomaton, ScanpathCompleter};
//!
//! let partial = symbols(["R", "Rh", "Ax", "Q", "Detail"]);
//!
//! let mut pda = PushdownAutomaton::new();
//! assert!(!pda.process_sequence(&partial));
//! assert!(pda.is_incomplete());
//! assert_eq!(pda.missing_tasks(), symbols(["ST", "T", "Q", "ST", "T"]));
//!
//! let mut completer = ScanpathCompleter::new();
//! let completed = completer.complete_scanpath(&partial);
//! assert_eq!(&completed[..partial.len()], &partial[..]);
//! assert!(completed.len() > partial.len());
//! ```

pub mod completion;
pub mod core;
pub mod engine;
pub mod metrics;
pub mod report;
pub mod table;

// Re-export commonly used types
pub use completion::{CompletionRules, ScanpathCompleter, Termination};
pub use self::core::{symbols, ExamState, StackSymbol, Symbol};
pub use engine::PushdownAutomaton;
pub use report::ScanpathReport;
pub use table::TransitionTable;
