//! # Conditions
//!
//! Declarative predicates over effective answers. Conditions are used as
//! question visibility predicates, as classification rule guards and as
//! obligation guards. They are data, not closures, so a questionnaire can
//! be validated (every reference resolves, visibility only looks backwards)
//! and described (`ria describe`) without running it.
//!
//! Evaluation is pure: the same graph and the same effective answers always
//! give the same result.

use ria_core::{ChoiceValue, DefinitionError, DetailId, DomainId, QuestionId};
use serde::{Deserialize, Serialize};

use crate::answer::EffectiveAnswers;
use crate::graph::QuestionGraph;
use crate::question::{Question, QuestionKind};

/// A predicate over the effective answers of a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    /// Always holds.
    Always,
    /// A single-select question is answered with `value`.
    Is {
        /// The single-select question.
        question: QuestionId,
        /// The expected choice.
        value: ChoiceValue,
    },
    /// A single-select question is answered with one of `values`.
    AnyOf {
        /// The single-select question.
        question: QuestionId,
        /// Accepted choices.
        values: Vec<ChoiceValue>,
    },
    /// A single-select question is answered with `value` or a choice
    /// declared after it.
    AtLeast {
        /// The single-select question.
        question: QuestionId,
        /// Lowest accepted choice in declared order.
        value: ChoiceValue,
    },
    /// A question is answered (a checklist is settled).
    Answered {
        /// The question.
        question: QuestionId,
    },
    /// A checklist is settled with at least one qualifying detail.
    Qualifying {
        /// The checklist question.
        question: QuestionId,
    },
    /// A checklist is settled without any qualifying detail.
    SettledWithoutCase {
        /// The checklist question.
        question: QuestionId,
    },
    /// `detail` is selected in `domain`, and `domain` is relevant.
    HasDetail {
        /// The domain; its owning checklist is found through the graph.
        domain: DomainId,
        /// The detail.
        detail: DetailId,
    },
    /// Every nested condition holds.
    All {
        /// Nested conditions.
        of: Vec<Condition>,
    },
    /// At least one nested condition holds.
    Any {
        /// Nested conditions.
        of: Vec<Condition>,
    },
    /// The nested condition does not hold.
    Not {
        /// Negated condition.
        condition: Box<Condition>,
    },
}

impl Condition {
    /// `question` is answered with `value`.
    pub fn is(question: impl Into<QuestionId>, value: impl Into<ChoiceValue>) -> Self {
        Self::Is {
            question: question.into(),
            value: value.into(),
        }
    }

    /// `question` is answered with one of `values`.
    pub fn any_of<V: Into<ChoiceValue>>(
        question: impl Into<QuestionId>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::AnyOf {
            question: question.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `question` is answered with `value` or a later choice.
    pub fn at_least(question: impl Into<QuestionId>, value: impl Into<ChoiceValue>) -> Self {
        Self::AtLeast {
            question: question.into(),
            value: value.into(),
        }
    }

    /// `question` is answered.
    pub fn answered(question: impl Into<QuestionId>) -> Self {
        Self::Answered {
            question: question.into(),
        }
    }

    /// Checklist `question` is settled with a qualifying detail.
    pub fn qualifying(question: impl Into<QuestionId>) -> Self {
        Self::Qualifying {
            question: question.into(),
        }
    }

    /// Checklist `question` is settled with no qualifying detail.
    pub fn settled_without_case(question: impl Into<QuestionId>) -> Self {
        Self::SettledWithoutCase {
            question: question.into(),
        }
    }

    /// `detail` of `domain` is selected.
    pub fn has_detail(domain: impl Into<DomainId>, detail: impl Into<DetailId>) -> Self {
        Self::HasDetail {
            domain: domain.into(),
            detail: detail.into(),
        }
    }

    /// Conjunction.
    pub fn all(of: impl IntoIterator<Item = Condition>) -> Self {
        Self::All {
            of: of.into_iter().collect(),
        }
    }

    /// Disjunction.
    pub fn any(of: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any {
            of: of.into_iter().collect(),
        }
    }

    /// Negation.
    pub fn negate(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    /// Evaluate against the effective answers of `graph`.
    ///
    /// A reference to a question without an effective answer is simply
    /// false. Unknown references cannot occur in a validated graph.
    pub fn evaluate(&self, graph: &QuestionGraph, answers: &EffectiveAnswers<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::Is { question, value } => answers.choice(question) == Some(value),
            Self::AnyOf { question, values } => answers
                .choice(question)
                .is_some_and(|chosen| values.contains(chosen)),
            Self::AtLeast { question, value } => {
                let Some(q) = graph.question(question) else {
                    return false;
                };
                match (
                    answers.choice(question).and_then(|chosen| q.choice_rank(chosen)),
                    q.choice_rank(value),
                ) {
                    (Some(chosen), Some(threshold)) => chosen >= threshold,
                    _ => false,
                }
            }
            Self::Answered { question } => match (graph.question(question), answers.get(question)) {
                (Some(q), Some(answer)) => q.is_answered_by(answer),
                _ => false,
            },
            Self::Qualifying { question } => {
                match (graph.question(question), answers.checklist(question)) {
                    (Some(q), Some(checklist)) => {
                        q.is_settled(checklist) && q.has_qualifying_case(checklist)
                    }
                    _ => false,
                }
            }
            Self::SettledWithoutCase { question } => {
                match (graph.question(question), answers.checklist(question)) {
                    (Some(q), Some(checklist)) => {
                        q.is_settled(checklist) && !q.has_qualifying_case(checklist)
                    }
                    _ => false,
                }
            }
            Self::HasDetail { domain, detail } => {
                let Some(q) = graph.domain_owner(domain) else {
                    return false;
                };
                answers.checklist(&q.id).is_some_and(|checklist| {
                    q.is_relevant(checklist, domain)
                        && checklist
                            .details_of(domain)
                            .is_some_and(|selection| selection.contains(detail))
                })
            }
            Self::All { of } => of.iter().all(|c| c.evaluate(graph, answers)),
            Self::Any { of } => of.iter().any(|c| c.evaluate(graph, answers)),
            Self::Not { condition } => !condition.evaluate(graph, answers),
        }
    }

    /// Check every reference against the questions in `scope`.
    ///
    /// `scope` is the number of leading questions the condition may look
    /// at: the questions declared before a visibility predicate's owner, or
    /// the whole graph for rule guards. A reference past `scope` to a
    /// question of the graph is reported as a forward reference.
    pub(crate) fn validate(
        &self,
        graph: &QuestionGraph,
        scope: usize,
        referenced_by: &str,
    ) -> Result<(), DefinitionError> {
        let refs = Scope {
            graph,
            scope,
            referenced_by,
        };
        match self {
            Self::Always => Ok(()),
            Self::Is { question, value } | Self::AtLeast { question, value } => {
                refs.choice(question, value)
            }
            Self::AnyOf { question, values } => {
                refs.single(question)?;
                values.iter().try_for_each(|v| refs.choice(question, v))
            }
            Self::Answered { question } => refs.question(question).map(|_| ()),
            Self::Qualifying { question } | Self::SettledWithoutCase { question } => {
                refs.checklist(question).map(|_| ())
            }
            Self::HasDetail { domain, detail } => {
                let Some(owner) = graph.domain_owner(domain) else {
                    return Err(DefinitionError::UnownedDomain {
                        referenced_by: referenced_by.to_string(),
                        domain: domain.to_string(),
                    });
                };
                refs.question(&owner.id)?;
                let known = owner
                    .catalog()
                    .is_some_and(|catalog| catalog.contains_detail(domain, detail));
                if known {
                    Ok(())
                } else {
                    Err(DefinitionError::UnknownDetail {
                        referenced_by: referenced_by.to_string(),
                        domain: domain.to_string(),
                        detail: detail.to_string(),
                    })
                }
            }
            Self::All { of } | Self::Any { of } => of
                .iter()
                .try_for_each(|c| c.validate(graph, scope, referenced_by)),
            Self::Not { condition } => condition.validate(graph, scope, referenced_by),
        }
    }
}

/// Reference resolution for [`Condition::validate`].
struct Scope<'g, 'r> {
    graph: &'g QuestionGraph,
    scope: usize,
    referenced_by: &'r str,
}

impl<'g> Scope<'g, '_> {
    fn question(&self, question: &QuestionId) -> Result<&'g Question, DefinitionError> {
        match self.graph.position(question) {
            Some(pos) if pos < self.scope => Ok(&self.graph.questions()[pos]),
            Some(_) => Err(DefinitionError::ForwardReference {
                question: self.referenced_by.to_string(),
                referenced: question.to_string(),
            }),
            None => Err(DefinitionError::UnknownQuestion {
                referenced_by: self.referenced_by.to_string(),
                question: question.to_string(),
            }),
        }
    }

    fn single(&self, question: &QuestionId) -> Result<&'g Question, DefinitionError> {
        let q = self.question(question)?;
        match q.kind {
            QuestionKind::Single { .. } => Ok(q),
            QuestionKind::Checklist { .. } => Err(self.mismatch(question, "single-select")),
        }
    }

    fn checklist(&self, question: &QuestionId) -> Result<&'g Question, DefinitionError> {
        let q = self.question(question)?;
        match q.kind {
            QuestionKind::Checklist { .. } => Ok(q),
            QuestionKind::Single { .. } => Err(self.mismatch(question, "checklist")),
        }
    }

    fn choice(&self, question: &QuestionId, value: &ChoiceValue) -> Result<(), DefinitionError> {
        if self.single(question)?.choice(value).is_none() {
            return Err(DefinitionError::UnknownChoice {
                referenced_by: self.referenced_by.to_string(),
                question: question.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn mismatch(&self, question: &QuestionId, expected: &'static str) -> DefinitionError {
        DefinitionError::KindMismatch {
            referenced_by: self.referenced_by.to_string(),
            question: question.to_string(),
            expected,
        }
    }
}
