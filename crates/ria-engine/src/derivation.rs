//! # Completion and Result Derivation
//!
//! The read-side projections of a questionnaire over an [`AnswerState`]:
//! reachability, completion, the classification result and the raw
//! "has a qualifying case" check of a checklist.
//!
//! Each projection starts with a fresh [`QuestionGraph::walk`], so nothing
//! computed for one state can leak into the next.
//!
//! [`QuestionGraph::walk`]: crate::graph::QuestionGraph::walk

use std::collections::BTreeSet;

use ria_core::{PrimaryTag, QuestionId, SecondaryObligation};
use serde::{Deserialize, Serialize};

use crate::answer::AnswerState;
use crate::question::Question;
use crate::questionnaire::Questionnaire;

/// A definitive classification.
///
/// The primary tag comes from the first matching rule. Secondary
/// obligations come from an independent pass and are empty when the
/// primary tag suppresses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Questionnaire that produced the result.
    pub questionnaire: String,
    /// The single classification outcome.
    pub primary: PrimaryTag,
    /// Independent duty flags.
    pub secondary: BTreeSet<SecondaryObligation>,
    /// Identifier of the rule that fired.
    pub rule: String,
    /// Legal reference of the rule that fired.
    pub reference: String,
}

impl ClassificationResult {
    /// Whether `flag` is attached to the result.
    pub fn has(&self, flag: SecondaryObligation) -> bool {
        self.secondary.contains(&flag)
    }
}

impl Questionnaire {
    /// Reachable questions, in declared order.
    pub fn reachable<'a>(&'a self, state: &'a AnswerState) -> Vec<&'a Question> {
        self.graph().reachable(state)
    }

    /// Whether a classification can be produced without further input.
    pub fn is_complete(&self, state: &AnswerState) -> bool {
        let walk = self.graph().walk(state);
        self.rules().any_match(self.graph(), walk.answers())
    }

    /// The classification for `state`, or `None` while more answers are
    /// needed.
    pub fn derive_result(&self, state: &AnswerState) -> Option<ClassificationResult> {
        let walk = self.graph().walk(state);
        let rule = self.rules().first_match(self.graph(), walk.answers())?;
        let secondary = if rule.tag.suppresses_secondary() {
            BTreeSet::new()
        } else {
            self.obligations().evaluate(self.graph(), walk.answers())
        };
        tracing::trace!(
            questionnaire = %self.id(),
            rule = %rule.id,
            primary = %rule.tag,
            secondary = secondary.len(),
            "rule fired"
        );
        Some(ClassificationResult {
            questionnaire: self.id().to_string(),
            primary: rule.tag,
            secondary,
            rule: rule.id.clone(),
            reference: rule.reference.clone(),
        })
    }

    /// Whether checklist `question` has a qualifying case among its
    /// relevant domains.
    ///
    /// Unlike the `qualifying` condition this does not require the
    /// checklist to be settled. It is false for an unreachable question,
    /// an unanswered one, or a question that is not a checklist.
    pub fn has_qualifying_case(&self, state: &AnswerState, question: &QuestionId) -> bool {
        let walk = self.graph().walk(state);
        match (self.graph().question(question), walk.answers().checklist(question)) {
            (Some(q), Some(checklist)) => q.has_qualifying_case(checklist),
            _ => false,
        }
    }
}
