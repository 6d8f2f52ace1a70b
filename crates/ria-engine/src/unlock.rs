//! # Unlock / Expansion Projection
//!
//! Turns reachability into the two sets a rendering layer needs:
//!
//! - `unlocked`: the reachable questions, eligible to answer;
//! - `expanded`: the reachable questions currently shown open.
//!
//! A question is auto-expanded when it is the first question, or when an
//! earlier reachable answer continues to it. The user may override the
//! automatic state per question (the accordion header click); the
//! override is kept in [`ExpansionOverrides`], apart from the answers.
//!
//! This module holds no branching logic of its own. Everything is derived
//! from [`QuestionGraph::walk`](crate::graph::QuestionGraph::walk) and the
//! per-choice [`Next`](crate::question::Next) declarations.

use std::collections::{BTreeMap, BTreeSet};

use ria_core::QuestionId;
use serde::{Deserialize, Serialize};

use crate::answer::AnswerState;
use crate::questionnaire::Questionnaire;

/// User overrides of the automatic expansion state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionOverrides {
    overrides: BTreeMap<QuestionId, bool>,
}

impl ExpansionOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// The override of `question`, if any.
    pub fn get(&self, question: &QuestionId) -> Option<bool> {
        self.overrides.get(question).copied()
    }

    /// Return a copy with `question` forced open or closed.
    pub fn with(&self, question: QuestionId, expanded: bool) -> Self {
        let mut overrides = self.overrides.clone();
        overrides.insert(question, expanded);
        Self { overrides }
    }

    /// Return a copy with the overrides of `questions` dropped.
    pub fn without<'q>(&self, questions: impl IntoIterator<Item = &'q QuestionId>) -> Self {
        let mut overrides = self.overrides.clone();
        for question in questions {
            overrides.remove(question);
        }
        Self { overrides }
    }

    /// Whether no override is set.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

/// Presentation state of one reachable question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    /// The question.
    pub id: QuestionId,
    /// Shown open.
    pub expanded: bool,
    /// Has a completing answer (the "answered" badge).
    pub answered: bool,
}

/// Presentation state of a whole questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    /// Reachable questions in declared order.
    pub questions: Vec<QuestionView>,
}

impl Presentation {
    /// Ids of the unlocked questions, in declared order.
    pub fn unlocked(&self) -> Vec<&QuestionId> {
        self.questions.iter().map(|v| &v.id).collect()
    }

    /// Ids of the expanded questions.
    pub fn expanded(&self) -> BTreeSet<&QuestionId> {
        self.questions
            .iter()
            .filter(|v| v.expanded)
            .map(|v| &v.id)
            .collect()
    }

    /// Whether `question` is unlocked.
    pub fn is_unlocked(&self, question: &QuestionId) -> bool {
        self.questions.iter().any(|v| &v.id == question)
    }

    /// Whether `question` is expanded.
    pub fn is_expanded(&self, question: &QuestionId) -> bool {
        self.questions
            .iter()
            .any(|v| &v.id == question && v.expanded)
    }
}

impl Questionnaire {
    /// Questions automatically expanded for `state`: the first question and
    /// every successor named by a reachable continuing answer.
    pub fn auto_expanded(&self, state: &AnswerState) -> BTreeSet<QuestionId> {
        let walk = self.graph().walk(state);
        let mut auto = BTreeSet::new();
        if let Some(first) = self.graph().questions().first() {
            auto.insert(first.id.clone());
        }
        for question in walk.reachable() {
            let Some(answer) = walk.answers().get(&question.id) else {
                continue;
            };
            if let Some(next) = question.next_for(answer) {
                auto.extend(next.successors().iter().cloned());
            }
        }
        auto
    }

    /// Project `state` and `overrides` onto the presentation state.
    pub fn presentation(&self, state: &AnswerState, overrides: &ExpansionOverrides) -> Presentation {
        let walk = self.graph().walk(state);
        let auto = self.auto_expanded(state);
        let questions = walk
            .reachable()
            .iter()
            .map(|q| QuestionView {
                id: q.id.clone(),
                expanded: overrides
                    .get(&q.id)
                    .unwrap_or_else(|| auto.contains(&q.id)),
                answered: walk
                    .answers()
                    .get(&q.id)
                    .is_some_and(|answer| q.is_answered_by(answer)),
            })
            .collect();
        Presentation { questions }
    }
}
