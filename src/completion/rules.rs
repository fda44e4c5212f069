//! Completion rules: what each open stack obligation requires.

use crate::core::{StackSymbol, Symbol};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

/// Follow-up tasks that discharge one stack symbol.
///
/// Only `required` drives completion. `optional` and `leads` document the
/// clinical guideline and are carried for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CompletionRule {
    /// Tasks appended, in order, when this symbol is on top
    pub required: Vec<Symbol>,
    /// Tasks a thorough examiner might add
    pub optional: BTreeSet<Symbol>,
    /// Leads usually inspected while discharging this symbol
    pub leads: BTreeSet<Symbol>,
}

impl CompletionRule {
    pub fn new<I>(required: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self {
            required: required.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_optional<I>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.optional.extend(optional);
        self
    }

    pub fn with_leads<I>(mut self, leads: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        self.leads.extend(leads);
        self
    }
}

/// Mapping from stack symbol to its completion rule.
///
/// The clinical table is built once per process and shared; see
/// [`CompletionRules::clinical`].
///
/// # Example
///
/// ```rust
/// use scanpath_pda::completion::{CompletionRule, CompletionRules};
/// use scanpath_pda::core::{StackSymbol, Symbol};
///
/// let rules = CompletionRules::builder()
///     .rule(StackSymbol::Qrs, CompletionRule::new([Symbol::T]))
///     .build();
///
/// assert_eq!(rules.get(StackSymbol::Qrs).unwrap().required, vec![Symbol::T]);
/// assert!(rules.get(StackSymbol::St).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CompletionRules {
    rules: HashMap<StackSymbol, CompletionRule>,
}

impl CompletionRules {
    pub fn builder() -> CompletionRulesBuilder {
        CompletionRulesBuilder::new()
    }

    /// The clinical examination guideline, shared across the process.
    pub fn clinical() -> Arc<CompletionRules> {
        static CLINICAL: OnceLock<Arc<CompletionRules>> = OnceLock::new();
        Arc::clone(CLINICAL.get_or_init(|| Arc::new(clinical_rules())))
    }

    pub fn get(&self, symbol: StackSymbol) -> Option<&CompletionRule> {
        self.rules.get(&symbol)
    }

    pub fn contains(&self, symbol: StackSymbol) -> bool {
        self.rules.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn clinical_rules() -> CompletionRules {
    CompletionRules::builder()
        .rule(
            StackSymbol::ExpectRepol,
            CompletionRule::new([Symbol::ST, Symbol::T])
                .with_optional([Symbol::QT])
                .with_leads([Symbol::V3, Symbol::V4, Symbol::V5]),
        )
        .rule(
            StackSymbol::Qrs,
            CompletionRule::new([Symbol::Q, Symbol::ST, Symbol::T])
                .with_optional([Symbol::DETAIL])
                .with_leads([Symbol::V1, Symbol::V2, Symbol::V3]),
        )
        .rule(
            StackSymbol::St,
            CompletionRule::new([Symbol::T]).with_optional([Symbol::QT]),
        )
        .rule(
            StackSymbol::R,
            CompletionRule::new([Symbol::RH, Symbol::AX]).with_leads([Symbol::II]),
        )
        .build()
}

/// Builder for alternative completion rule tables.
#[derive(Debug, Default)]
pub struct CompletionRulesBuilder {
    rules: HashMap<StackSymbol, CompletionRule>,
}

impl CompletionRulesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule for `symbol`, replacing any earlier one.
    pub fn rule(mut self, symbol: StackSymbol, rule: CompletionRule) -> Self {
        self.rules.insert(symbol, rule);
        self
    }

    pub fn build(self) -> CompletionRules {
        CompletionRules { rules: self.rules }
    }
}
