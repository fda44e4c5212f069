//! Examination phases of the automaton.
//!
//! Each state corresponds to the phase of a systematic ECG read the examiner
//! is currently in. States carry no data beyond their identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Control state of the scanpath automaton.
///
/// `Rate` is the unique initial state and `End` the only accepting one.
///
/// # Example
///
/// ```rust
/// use scanpath_pda::core::ExamState;
///
/// assert_eq!(ExamState::INITIAL, ExamState::Rate);
/// assert!(ExamState::End.is_accepting());
/// assert_eq!(ExamState::St.name(), "ST");
/// assert_eq!(ExamState::St.description(), "Repolarization Check");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ExamState {
    Rate,
    Rhythm,
    Axis,
    Morph,
    #[serde(rename = "ST")]
    St,
    Detail,
    End,
}

impl ExamState {
    /// State every run starts from.
    pub const INITIAL: ExamState = ExamState::Rate;

    pub const ALL: [ExamState; 7] = [
        ExamState::Rate,
        ExamState::Rhythm,
        ExamState::Axis,
        ExamState::Morph,
        ExamState::St,
        ExamState::Detail,
        ExamState::End,
    ];

    /// Short name used in traces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rate => "Rate",
            Self::Rhythm => "Rhythm",
            Self::Axis => "Axis",
            Self::Morph => "Morph",
            Self::St => "ST",
            Self::Detail => "Detail",
            Self::End => "End",
        }
    }

    /// Clinical label of the examination phase.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rate => "Rate Assessment",
            Self::Rhythm => "Rhythm Evaluation",
            Self::Axis => "Axis Determination",
            Self::Morph => "Morphology Analysis",
            Self::St => "Repolarization Check",
            Self::Detail => "Detailed Inspection",
            Self::End => "Complete",
        }
    }

    /// Whether this state belongs to the accepting set `{End}`.
    pub fn is_accepting(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl fmt::Display for ExamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_end_is_accepting() {
        let accepting: Vec<_> = ExamState::ALL
            .iter()
            .filter(|s| s.is_accepting())
            .collect();
        assert_eq!(accepting, vec![&ExamState::End]);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = ExamState::ALL.iter().map(ExamState::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ExamState::ALL.len());
    }

    #[test]
    fn state_serializes_by_name() {
        let json = serde_json::to_string(&ExamState::St).unwrap();
        assert_eq!(json, r#""ST""#);
        let back: ExamState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExamState::St);
    }

    #[test]
    fn display_matches_name() {
        for state in ExamState::ALL {
            assert_eq!(state.to_string(), state.name());
        }
    }
}
