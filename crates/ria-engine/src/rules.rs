//! # Rule Tables
//!
//! [`RuleTable`] is the ordered, priority-ranked list of classification
//! rules of a questionnaire. Earlier rules win: a prohibited practice is
//! listed before every lower tier, so it takes precedence regardless of
//! other answers.
//!
//! Completion and derivation are two readings of the same traversal of the
//! same list:
//!
//! | Question            | Traversal |
//! |---------------------|-----------|
//! | is it complete?     | [`RuleTable::any_match`] |
//! | what is the result? | [`RuleTable::first_match`] |
//!
//! Both go through one private `first_matching` walk, so
//! `any_match(s) == first_match(s).is_some()` holds by construction.
//!
//! [`ObligationTable`] is a separate, non-short-circuiting pass producing
//! secondary duty flags. It is never merged into the priority list.

use std::collections::{BTreeSet, HashSet};

use ria_core::{DefinitionError, PrimaryTag, SecondaryObligation};
use serde::{Deserialize, Serialize};

use crate::answer::EffectiveAnswers;
use crate::condition::Condition;
use crate::graph::QuestionGraph;

// ---------------------------------------------------------------------------
// Classification rules
// ---------------------------------------------------------------------------

/// One classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Identifier, unique within the table.
    pub id: String,
    /// Legal reference cited with the result (e.g. "Art. 6(1)").
    pub reference: String,
    /// Guard over effective answers.
    pub when: Condition,
    /// Primary tag produced when the guard holds.
    pub tag: PrimaryTag,
}

/// Ordered classification rules; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Wrap `rules`, rejecting duplicate identifiers.
    ///
    /// Reference checks against the question graph are done by the
    /// questionnaire builder.
    pub fn new(rules: Vec<Rule>) -> Result<Self, DefinitionError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.id.is_empty() {
                return Err(DefinitionError::EmptyIdentifier {
                    context: "rule".into(),
                });
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(DefinitionError::DuplicateRule {
                    rule: rule.id.clone(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The shared traversal: index of the first rule whose guard holds.
    fn first_matching(&self, graph: &QuestionGraph, answers: &EffectiveAnswers<'_>) -> Option<usize> {
        self.rules
            .iter()
            .position(|rule| rule.when.evaluate(graph, answers))
    }

    /// Whether some rule matches. This is the completion check.
    pub fn any_match(&self, graph: &QuestionGraph, answers: &EffectiveAnswers<'_>) -> bool {
        self.first_matching(graph, answers).is_some()
    }

    /// The highest-priority matching rule. This is the derivation.
    pub fn first_match<'r>(
        &'r self,
        graph: &QuestionGraph,
        answers: &EffectiveAnswers<'_>,
    ) -> Option<&'r Rule> {
        self.first_matching(graph, answers).map(|pos| &self.rules[pos])
    }
}

// ---------------------------------------------------------------------------
// Secondary obligations
// ---------------------------------------------------------------------------

/// One secondary-obligation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationRule {
    /// Guard over effective answers.
    pub when: Condition,
    /// Flag raised when the guard holds.
    pub flag: SecondaryObligation,
}

/// Independent obligation guards, all evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ObligationTable {
    rules: Vec<ObligationRule>,
}

impl ObligationTable {
    /// Wrap `rules`.
    pub fn new(rules: Vec<ObligationRule>) -> Self {
        Self { rules }
    }

    /// Rules in declared order.
    pub fn rules(&self) -> &[ObligationRule] {
        &self.rules
    }

    /// Every flag whose guard holds.
    pub fn evaluate(
        &self,
        graph: &QuestionGraph,
        answers: &EffectiveAnswers<'_>,
    ) -> BTreeSet<SecondaryObligation> {
        self.rules
            .iter()
            .filter(|rule| rule.when.evaluate(graph, answers))
            .map(|rule| rule.flag)
            .collect()
    }
}
