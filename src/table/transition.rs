//! Transition records and the static ECG transition relation.

use crate::core::{ExamState, StackSymbol, Symbol};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Effect of a transition on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StackOperation {
    /// Remove the top entry.
    Pop,
    /// Leave the stack untouched.
    NoOp,
    /// Push each symbol in order; the last one ends on top.
    Push(&'static [StackSymbol]),
    /// Remove the top entry, then push one symbol.
    PopThenPush(StackSymbol),
}

impl StackOperation {
    /// Apply this operation to `stack` (top is the last element).
    pub fn apply(&self, stack: &mut Vec<StackSymbol>) {
        match self {
            Self::Pop => {
                stack.pop();
            }
            Self::NoOp => {}
            Self::Push(symbols) => stack.extend_from_slice(symbols),
            Self::PopThenPush(symbol) => {
                stack.pop();
                stack.push(*symbol);
            }
        }
    }

    /// Symbols this operation places on the stack.
    pub fn pushed(&self) -> &[StackSymbol] {
        match self {
            Self::Push(symbols) => symbols,
            Self::PopThenPush(symbol) => std::slice::from_ref(symbol),
            Self::Pop | Self::NoOp => &[],
        }
    }

    /// Whether this operation removes the current top.
    pub fn pops(&self) -> bool {
        matches!(self, Self::Pop | Self::PopThenPush(_))
    }
}

impl fmt::Display for StackOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pop => f.write_str("pop"),
            Self::NoOp => f.write_str("noop"),
            Self::Push(symbols) => {
                let names: Vec<_> = symbols.iter().map(StackSymbol::name).collect();
                write!(f, "push({})", names.join(", "))
            }
            Self::PopThenPush(symbol) => write!(f, "pop; push({symbol})"),
        }
    }
}

/// One row of the transition relation:
/// `δ(from, input, stack_top) = (to, operation)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transition {
    pub from: ExamState,
    pub input: Symbol,
    pub stack_top: StackSymbol,
    pub to: ExamState,
    pub operation: StackOperation,
}

impl Transition {
    /// Check whether this row fires for the given configuration and input.
    pub fn matches(&self, state: ExamState, input: &Symbol, stack_top: StackSymbol) -> bool {
        self.from == state && self.stack_top == stack_top && self.input == *input
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "δ({}, {}, {}) → ({}, {})",
            self.from, self.input, self.stack_top, self.to, self.operation
        )
    }
}

/// Immutable, ordered transition relation.
///
/// Lookup is first-match: if two rows ever share a `(state, input, top)` key,
/// the earlier row wins. [`TransitionTable::validate`] reports such
/// collisions.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    transitions: Cow<'static, [Transition]>,
}

impl TransitionTable {
    /// Build a table from owned rows.
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self {
            transitions: Cow::Owned(transitions),
        }
    }

    /// The process-wide ECG examination table.
    pub fn ecg() -> &'static TransitionTable {
        &ECG_TABLE
    }

    /// Find the transition for `(state, input, stack_top)`, if any (pure).
    pub fn lookup(
        &self,
        state: ExamState,
        input: &Symbol,
        stack_top: StackSymbol,
    ) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.matches(state, input, stack_top))
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Rows leaving `state`, in table order.
    pub fn outgoing(&self, state: ExamState) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter().filter(move |t| t.from == state)
    }
}

macro_rules! rule {
    ($from:ident, $input:literal, $top:ident => $to:ident, $op:expr) => {
        Transition {
            from: ExamState::$from,
            input: Symbol::from_static($input),
            stack_top: StackSymbol::$top,
            to: ExamState::$to,
            operation: $op,
        }
    };
}

use StackOperation::{NoOp, Pop, PopThenPush, Push};
use StackSymbol::{ExpectRepol, Qrs, St, R};

static ECG_TRANSITIONS: &[Transition] = &[
    // Rate -> Rhythm
    rule!(Rate, "R", Z0 => Rhythm, Push(&[R])),
    rule!(Rate, "Rh", Z0 => Rhythm, NoOp),
    // Rhythm -> Axis
    rule!(Rhythm, "Rh", R => Axis, Pop),
    rule!(Rhythm, "Rh", Z0 => Axis, NoOp),
    // Axis -> morphology, or an early jump past it
    rule!(Axis, "Ax", Z0 => Morph, Push(&[Qrs])),
    rule!(Axis, "Ax", R => Morph, Push(&[Qrs])),
    rule!(Axis, "Q", Z0 => Morph, Push(&[Qrs])),
    rule!(Axis, "Detail", Z0 => Detail, Push(&[Qrs, ExpectRepol])),
    rule!(Axis, "ST", Z0 => St, Push(&[Qrs, St])),
    rule!(Axis, "T", Z0 => End, Push(&[Qrs])),
    // QRS morphology
    rule!(Morph, "Q", Qrs => Morph, NoOp),
    rule!(Morph, "Detail", Qrs => Detail, Push(&[ExpectRepol])),
    // Detailed inspection over the precordial leads
    rule!(Detail, "V1", ExpectRepol => Detail, NoOp),
    rule!(Detail, "V2", ExpectRepol => Detail, NoOp),
    rule!(Detail, "V3", ExpectRepol => Detail, NoOp),
    rule!(Detail, "V4", ExpectRepol => Detail, NoOp),
    rule!(Detail, "V5", ExpectRepol => Detail, NoOp),
    rule!(Detail, "V6", ExpectRepol => Detail, NoOp),
    rule!(Detail, "Detail", ExpectRepol => Detail, NoOp),
    // Repolarization
    rule!(Morph, "ST", Qrs => St, Push(&[St])),
    rule!(Detail, "ST", ExpectRepol => St, PopThenPush(St)),
    rule!(St, "T", St => End, Pop),
    rule!(St, "QT", St => End, Pop),
    // Late checks from End; Q or T discharges the open QRS
    rule!(End, "Detail", Qrs => Detail, Push(&[ExpectRepol])),
    rule!(End, "T", Qrs => End, Pop),
    rule!(End, "ST", Qrs => St, Push(&[St])),
    rule!(End, "Q", Qrs => End, Pop),
    rule!(Detail, "T", Qrs => End, Pop),
];

static ECG_TABLE: TransitionTable = TransitionTable {
    transitions: Cow::Borrowed(ECG_TRANSITIONS),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecg_table_has_every_row() {
        assert_eq!(TransitionTable::ecg().len(), 28);
    }

    #[test]
    fn lookup_finds_rate_to_rhythm() {
        let t = TransitionTable::ecg()
            .lookup(ExamState::Rate, &Symbol::R, StackSymbol::Z0)
            .expect("rate rule");
        assert_eq!(t.to, ExamState::Rhythm);
        assert_eq!(t.operation, Push(&[R]));
    }

    #[test]
    fn lookup_requires_matching_stack_top() {
        let table = TransitionTable::ecg();
        assert!(table
            .lookup(ExamState::Morph, &Symbol::Q, StackSymbol::Z0)
            .is_none());
        assert!(table
            .lookup(ExamState::Morph, &Symbol::Q, StackSymbol::Qrs)
            .is_some());
    }

    #[test]
    fn lookup_rejects_unknown_input() {
        assert!(TransitionTable::ecg()
            .lookup(ExamState::Rate, &Symbol::new("Glance"), StackSymbol::Z0)
            .is_none());
    }

    #[test]
    fn every_precordial_lead_loops_in_detail() {
        let table = TransitionTable::ecg();
        for lead in [
            Symbol::V1,
            Symbol::V2,
            Symbol::V3,
            Symbol::V4,
            Symbol::V5,
            Symbol::V6,
        ] {
            let t = table
                .lookup(ExamState::Detail, &lead, StackSymbol::ExpectRepol)
                .expect("lead rule");
            assert_eq!(t.to, ExamState::Detail);
            assert_eq!(t.operation, NoOp);
        }
    }

    #[test]
    fn push_leaves_last_symbol_on_top() {
        let mut stack = vec![StackSymbol::Z0];
        Push(&[Qrs, ExpectRepol]).apply(&mut stack);
        assert_eq!(stack, vec![StackSymbol::Z0, Qrs, ExpectRepol]);
    }

    #[test]
    fn pop_then_push_replaces_top() {
        let mut stack = vec![StackSymbol::Z0, Qrs, ExpectRepol];
        PopThenPush(St).apply(&mut stack);
        assert_eq!(stack, vec![StackSymbol::Z0, Qrs, St]);
    }

    #[test]
    fn pop_and_noop() {
        let mut stack = vec![StackSymbol::Z0, R];
        NoOp.apply(&mut stack);
        assert_eq!(stack, vec![StackSymbol::Z0, R]);
        Pop.apply(&mut stack);
        assert_eq!(stack, vec![StackSymbol::Z0]);
    }

    #[test]
    fn transition_display_reads_like_delta() {
        let t = TransitionTable::ecg()
            .lookup(ExamState::Detail, &Symbol::ST, StackSymbol::ExpectRepol)
            .unwrap();
        assert_eq!(
            t.to_string(),
            "δ(Detail, ST, ExpectRepol) → (ST, pop; push(ST))"
        );
    }

    #[test]
    fn outgoing_filters_by_state() {
        let from_axis: Vec<_> = TransitionTable::ecg().outgoing(ExamState::Axis).collect();
        assert_eq!(from_axis.len(), 6);
        assert!(from_axis.iter().all(|t| t.from == ExamState::Axis));
    }
}
