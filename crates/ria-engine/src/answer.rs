//! # Answer State
//!
//! The immutable snapshot of everything answered in one questionnaire
//! session. Transitions build a new [`AnswerState`]; the previous value is
//! never mutated, so a snapshot handed to an observer stays valid forever.

use std::collections::BTreeMap;

use ria_core::{ChoiceValue, DetailId, DomainId, ExclusiveSet, QuestionId};
use serde::{Deserialize, Serialize};

/// The recorded answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// A single-select question answered with one choice.
    Choice {
        /// The selected choice value.
        value: ChoiceValue,
    },
    /// A domain → detail checklist.
    Checklist(ChecklistAnswer),
}

impl Answer {
    /// The selected choice, if this is a single-select answer.
    pub fn choice(&self) -> Option<&ChoiceValue> {
        match self {
            Self::Choice { value } => Some(value),
            Self::Checklist(_) => None,
        }
    }

    /// The checklist selections, if this is a checklist answer.
    pub fn checklist(&self) -> Option<&ChecklistAnswer> {
        match self {
            Self::Choice { .. } => None,
            Self::Checklist(checklist) => Some(checklist),
        }
    }
}

/// Selections of one checklist question.
///
/// `domains` is only present for checklists whose domains are selectable;
/// its sentinel is the "none of these domains" entry. `details` holds one
/// exclusive-sentinel set per domain that has ever been touched. Details of
/// a domain that is no longer relevant are kept but not evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistAnswer {
    /// Domains marked as relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<ExclusiveSet<DomainId>>,
    /// Detail selections keyed by domain.
    #[serde(default)]
    pub details: BTreeMap<DomainId, ExclusiveSet<DetailId>>,
}

impl ChecklistAnswer {
    /// The detail selection of `domain`, if any.
    pub fn details_of(&self, domain: &DomainId) -> Option<&ExclusiveSet<DetailId>> {
        self.details.get(domain)
    }

    /// Return a copy with `domain`'s detail set replaced.
    pub fn with_details(&self, domain: DomainId, selection: ExclusiveSet<DetailId>) -> Self {
        let mut next = self.clone();
        next.details.insert(domain, selection);
        next
    }

    /// Return a copy with the relevant-domain set replaced.
    pub fn with_domains(&self, domains: ExclusiveSet<DomainId>) -> Self {
        Self {
            domains: Some(domains),
            details: self.details.clone(),
        }
    }
}

/// All answers given so far, keyed by question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerState {
    answers: BTreeMap<QuestionId, Answer>,
}

impl AnswerState {
    /// The empty state every session starts from.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored answer to `question`, reachable or not.
    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers.get(question)
    }

    /// Return a new state with `question` answered by `answer`.
    pub fn with_answer(&self, question: QuestionId, answer: Answer) -> Self {
        let mut answers = self.answers.clone();
        answers.insert(question, answer);
        Self { answers }
    }

    /// Number of stored answers, orphaned ones included.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether nothing has been answered.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Stored answers in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }
}

/// Answers to the reachable questions only.
///
/// Built by [`QuestionGraph::walk`](crate::graph::QuestionGraph::walk).
/// Predicates, rules and obligations only ever see this view.
#[derive(Debug, Clone, Default)]
pub struct EffectiveAnswers<'a> {
    answers: BTreeMap<&'a QuestionId, &'a Answer>,
}

impl<'a> EffectiveAnswers<'a> {
    pub(crate) fn insert(&mut self, question: &'a QuestionId, answer: &'a Answer) {
        self.answers.insert(question, answer);
    }

    /// The effective answer to `question`.
    pub fn get(&self, question: &QuestionId) -> Option<&'a Answer> {
        self.answers.get(question).copied()
    }

    /// The effective choice of a single-select question.
    pub fn choice(&self, question: &QuestionId) -> Option<&'a ChoiceValue> {
        self.get(question).and_then(Answer::choice)
    }

    /// The effective selections of a checklist question.
    pub fn checklist(&self, question: &QuestionId) -> Option<&'a ChecklistAnswer> {
        self.get(question).and_then(Answer::checklist)
    }

    /// Number of effective answers.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether no reachable question is answered.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(v: &str) -> Answer {
        Answer::Choice {
            value: ChoiceValue::new(v),
        }
    }

    #[test]
    fn with_answer_leaves_original_untouched() {
        let empty = AnswerState::new();
        let one = empty.with_answer(QuestionId::new("q1"), choice("yes"));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(
            one.get(&QuestionId::new("q1")).and_then(Answer::choice),
            Some(&ChoiceValue::new("yes"))
        );
    }

    #[test]
    fn re_answering_replaces() {
        let s = AnswerState::new()
            .with_answer(QuestionId::new("q1"), choice("yes"))
            .with_answer(QuestionId::new("q1"), choice("no"));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(&QuestionId::new("q1")), Some(&choice("no")));
    }

    #[test]
    fn checklist_copies_are_independent() {
        let base = ChecklistAnswer::default();
        let sel = ExclusiveSet::new(DetailId::new("none")).toggle(DetailId::new("a"));
        let next = base.with_details(DomainId::new("d"), sel);
        assert!(base.details.is_empty());
        assert!(next.details_of(&DomainId::new("d")).is_some());
    }

    #[test]
    fn serde_shape_is_stable() {
        let s = AnswerState::new().with_answer(QuestionId::new("q1"), choice("yes"));
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"q1":{"kind":"choice","value":"yes"}}"#);
        let back: AnswerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn checklist_serde_rejects_mixed_sentinel() {
        let json = r#"{"q":{"kind":"checklist","details":{"d":{"sentinel":"none","selected":["a","none"]}}}}"#;
        assert!(serde_json::from_str::<AnswerState>(json).is_err());
    }
}
