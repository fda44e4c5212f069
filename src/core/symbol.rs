//! Input and stack alphabets.
//!
//! Input symbols are diagnostic tasks (`R`, `Rh`, `Ax`, ...) and, for the
//! detailed-inspection loop, lead names (`V1`..`V6`). Stack symbols form a
//! small closed set tracking examination obligations that have not yet been
//! discharged.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An input symbol fed to the automaton.
///
/// Symbols are immutable values compared by their text. The constants on
/// this type cover every symbol the static tables mention; callers may
/// construct others with [`Symbol::new`], which the automaton will simply
/// refuse to consume.
///
/// # Example
///
/// ```rust
/// use scanpath_pda::core::Symbol;
///
/// let q = Symbol::new("Q");
/// assert_eq!(q, Symbol::Q);
/// assert!(q.is_task());
/// assert!(!q.is_lead());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(Cow<'static, str>);

impl Symbol {
    /// Rate assessment.
    pub const R: Symbol = Symbol::from_static("R");
    /// Rhythm evaluation.
    pub const RH: Symbol = Symbol::from_static("Rh");
    /// Axis determination.
    pub const AX: Symbol = Symbol::from_static("Ax");
    /// P-wave analysis.
    pub const P: Symbol = Symbol::from_static("P");
    /// PR interval.
    pub const PR: Symbol = Symbol::from_static("PR");
    /// QRS complex.
    pub const Q: Symbol = Symbol::from_static("Q");
    /// ST segment.
    pub const ST: Symbol = Symbol::from_static("ST");
    /// T-wave.
    pub const T: Symbol = Symbol::from_static("T");
    /// QT interval.
    pub const QT: Symbol = Symbol::from_static("QT");
    /// Detailed morphology inspection.
    pub const DETAIL: Symbol = Symbol::from_static("Detail");

    pub const I: Symbol = Symbol::from_static("I");
    pub const II: Symbol = Symbol::from_static("II");
    pub const III: Symbol = Symbol::from_static("III");
    pub const AVR: Symbol = Symbol::from_static("aVR");
    pub const AVL: Symbol = Symbol::from_static("aVL");
    pub const AVF: Symbol = Symbol::from_static("aVF");
    pub const V1: Symbol = Symbol::from_static("V1");
    pub const V2: Symbol = Symbol::from_static("V2");
    pub const V3: Symbol = Symbol::from_static("V3");
    pub const V4: Symbol = Symbol::from_static("V4");
    pub const V5: Symbol = Symbol::from_static("V5");
    pub const V6: Symbol = Symbol::from_static("V6");
    /// Rhythm strip at the bottom of the tracing.
    pub const RHYTHM: Symbol = Symbol::from_static("RHYTHM");

    /// Build a symbol from a static string, usable in `const` and `static`
    /// contexts.
    pub const fn from_static(name: &'static str) -> Self {
        Symbol(Cow::Borrowed(name))
    }

    /// Build a symbol from caller-supplied text.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Symbol(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this symbol names one of the twelve leads or the rhythm strip.
    pub fn is_lead(&self) -> bool {
        LEAD_ALPHABET.contains(self)
    }

    /// Whether this symbol names a diagnostic task.
    pub fn is_task(&self) -> bool {
        TASK_ALPHABET.contains(self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for Symbol {
    fn from(name: &'static str) -> Self {
        Symbol::from_static(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(Cow::Owned(name))
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Lead-level alphabet: the twelve standard leads plus the rhythm strip.
pub static LEAD_ALPHABET: &[Symbol] = &[
    Symbol::I,
    Symbol::II,
    Symbol::III,
    Symbol::AVR,
    Symbol::AVL,
    Symbol::AVF,
    Symbol::V1,
    Symbol::V2,
    Symbol::V3,
    Symbol::V4,
    Symbol::V5,
    Symbol::V6,
    Symbol::RHYTHM,
];

/// Task-level alphabet: the diagnostic tasks an examiner performs.
pub static TASK_ALPHABET: &[Symbol] = &[
    Symbol::R,
    Symbol::RH,
    Symbol::AX,
    Symbol::P,
    Symbol::PR,
    Symbol::Q,
    Symbol::ST,
    Symbol::T,
    Symbol::QT,
    Symbol::DETAIL,
];

/// Convert a slice of string names into symbols.
///
/// Convenient for callers holding the output of an upstream task-inference
/// step as plain strings.
pub fn symbols<I, S>(names: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = S>,
    S: Into<Symbol>,
{
    names.into_iter().map(Into::into).collect()
}

/// Errors raised when parsing symbol names.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SymbolError {
    #[error("Unknown stack symbol '{0}'")]
    UnknownStackSymbol(String),
}

/// Marker pushed onto the automaton's stack.
///
/// `Z0` is the bottom sentinel: present in every configuration and never
/// popped by any defined transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum StackSymbol {
    /// Bottom-of-stack sentinel.
    Z0,
    /// Rate assessed, rhythm still owed.
    R,
    /// QRS morphology opened.
    #[serde(rename = "QRS")]
    Qrs,
    /// ST segment opened, T-wave still owed.
    #[serde(rename = "ST")]
    St,
    /// Detailed inspection opened, repolarization still owed.
    ExpectRepol,
}

impl StackSymbol {
    pub const ALL: [StackSymbol; 5] = [
        StackSymbol::Z0,
        StackSymbol::R,
        StackSymbol::Qrs,
        StackSymbol::St,
        StackSymbol::ExpectRepol,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Z0 => "Z0",
            Self::R => "R",
            Self::Qrs => "QRS",
            Self::St => "ST",
            Self::ExpectRepol => "ExpectRepol",
        }
    }
}

impl fmt::Display for StackSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StackSymbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StackSymbol::ALL
            .into_iter()
            .find(|sym| sym.name() == s)
            .ok_or_else(|| SymbolError::UnknownStackSymbol(s.to_string()))
    }
}
