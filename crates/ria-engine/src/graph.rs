//! # Question Graph
//!
//! The ordered question list of one questionnaire and its reachability
//! walk.
//!
//! ## Reachability
//!
//! [`QuestionGraph::walk`] visits questions in declared order. A question is
//! reachable when both hold:
//!
//! - it is the first question, or the completing answer of an earlier
//!   reachable question names it as a successor ([`Question::next_for`]);
//! - its visibility predicate holds against the *effective* answers
//!   collected so far, i.e. the answers to earlier reachable questions.
//!
//! A terminal answer therefore unlocks nothing, whatever later predicates
//! say. A reachable question's own answer joins the effective set. Stored
//! answers to unreachable questions are skipped, so a changed early answer
//! drops the whole downstream branch without deleting it.
//!
//! The walk runs from scratch on every call. It is linear in the number of
//! questions, and questionnaires have a handful of them.
//!
//! ## Construction checks
//!
//! - question ids unique, choices unique and non-empty
//! - catalogs valid, domain ids unique across all checklists
//! - continuing choices name later questions only
//! - visibility predicates reference earlier questions only

use std::collections::{BTreeMap, BTreeSet};

use ria_core::{DefinitionError, DomainId, QuestionId};
use serde::{Serialize, Serializer};

use crate::answer::{AnswerState, EffectiveAnswers};
use crate::question::{DomainMode, Next, Question, QuestionKind};

/// Validated, ordered questions of one questionnaire.
#[derive(Debug, Clone)]
pub struct QuestionGraph {
    questions: Vec<Question>,
    positions: BTreeMap<QuestionId, usize>,
    domain_owners: BTreeMap<DomainId, usize>,
}

/// Result of one reachability walk.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    reachable: Vec<&'a Question>,
    answers: EffectiveAnswers<'a>,
}

impl<'a> Walk<'a> {
    /// Reachable questions, in declared order.
    pub fn reachable(&self) -> &[&'a Question] {
        &self.reachable
    }

    /// Answers to reachable questions.
    pub fn answers(&self) -> &EffectiveAnswers<'a> {
        &self.answers
    }

    /// Whether `question` is reachable.
    pub fn is_reachable(&self, question: &QuestionId) -> bool {
        self.reachable.iter().any(|q| &q.id == question)
    }

    /// Whether every reachable question has a completing answer.
    pub fn all_answered(&self) -> bool {
        self.reachable.iter().all(|q| {
            self.answers
                .get(&q.id)
                .is_some_and(|answer| q.is_answered_by(answer))
        })
    }
}

impl QuestionGraph {
    /// Validate and index `questions`.
    ///
    /// # Errors
    ///
    /// Returns the first [`DefinitionError`] found.
    pub fn new(questions: Vec<Question>) -> Result<Self, DefinitionError> {
        let mut positions = BTreeMap::new();
        let mut domain_owners = BTreeMap::new();
        let mut none_domains = BTreeSet::new();

        for (pos, question) in questions.iter().enumerate() {
            if question.id.is_empty() {
                return Err(DefinitionError::EmptyIdentifier {
                    context: format!("question #{pos}"),
                });
            }
            if positions.insert(question.id.clone(), pos).is_some() {
                return Err(DefinitionError::DuplicateQuestion {
                    question: question.id.to_string(),
                });
            }
            match &question.kind {
                QuestionKind::Single { choices } => {
                    if choices.is_empty() {
                        return Err(DefinitionError::NoChoices {
                            question: question.id.to_string(),
                        });
                    }
                    let mut seen = BTreeSet::new();
                    for choice in choices {
                        if choice.value.is_empty() {
                            return Err(DefinitionError::EmptyIdentifier {
                                context: format!("choice of question {}", question.id),
                            });
                        }
                        if !seen.insert(&choice.value) {
                            return Err(DefinitionError::DuplicateChoice {
                                question: question.id.to_string(),
                                value: choice.value.to_string(),
                            });
                        }
                    }
                }
                QuestionKind::Checklist {
                    catalog, domains, ..
                } => {
                    if catalog.is_empty() {
                        return Err(DefinitionError::EmptyCatalog {
                            question: question.id.to_string(),
                        });
                    }
                    for domain in catalog.domains() {
                        if none_domains.contains(&domain.id)
                            || domain_owners.insert(domain.id.clone(), pos).is_some()
                        {
                            return Err(DefinitionError::DuplicateDomain {
                                domain: domain.id.to_string(),
                            });
                        }
                    }
                    if let DomainMode::Selectable { none_domain, .. } = domains {
                        if none_domain.is_empty() {
                            return Err(DefinitionError::EmptyIdentifier {
                                context: format!("none-domain of question {}", question.id),
                            });
                        }
                        if domain_owners.contains_key(none_domain)
                            || !none_domains.insert(none_domain.clone())
                        {
                            return Err(DefinitionError::DuplicateDomain {
                                domain: none_domain.to_string(),
                            });
                        }
                    }
                }
            }
        }

        let graph = Self {
            questions,
            positions,
            domain_owners,
        };
        graph.check_successors()?;
        for (pos, question) in graph.questions.iter().enumerate() {
            question
                .visible_when
                .validate(&graph, pos, question.id.as_str())?;
        }
        Ok(graph)
    }

    fn check_successors(&self) -> Result<(), DefinitionError> {
        for (pos, question) in self.questions.iter().enumerate() {
            let continuations = question.all_next().into_iter().zip(self.next_labels(question));
            for (next, label) in continuations {
                let Next::Continue(successors) = next else {
                    continue;
                };
                if successors.is_empty() {
                    return Err(DefinitionError::EmptyContinuation {
                        question: question.id.to_string(),
                        value: label,
                    });
                }
                for successor in successors {
                    match self.position(successor) {
                        None => {
                            return Err(DefinitionError::UnknownQuestion {
                                referenced_by: question.id.to_string(),
                                question: successor.to_string(),
                            })
                        }
                        Some(target) if target <= pos => {
                            return Err(DefinitionError::BackwardSuccessor {
                                question: question.id.to_string(),
                                successor: successor.to_string(),
                            })
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// Names of the outcomes in [`Question::all_next`] order.
    fn next_labels(&self, question: &Question) -> Vec<String> {
        match &question.kind {
            QuestionKind::Single { choices } => choices.iter().map(|c| c.value.to_string()).collect(),
            QuestionKind::Checklist { .. } => vec!["on_qualifying".into(), "on_none".into()],
        }
    }

    /// Questions in declared order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.position(id).map(|pos| &self.questions[pos])
    }

    /// Declared position of a question.
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// The checklist question declaring `domain` in its catalog.
    pub fn domain_owner(&self, domain: &DomainId) -> Option<&Question> {
        self.domain_owners
            .get(domain)
            .map(|pos| &self.questions[*pos])
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the graph has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Compute reachability and effective answers for `state`.
    pub fn walk<'a>(&'a self, state: &'a AnswerState) -> Walk<'a> {
        let mut walk = Walk {
            reachable: Vec::new(),
            answers: EffectiveAnswers::default(),
        };
        let mut named: BTreeSet<&QuestionId> = BTreeSet::new();
        for (pos, question) in self.questions.iter().enumerate() {
            if pos > 0 && !named.contains(&question.id) {
                continue;
            }
            if !question.visible_when.evaluate(self, &walk.answers) {
                continue;
            }
            walk.reachable.push(question);
            let Some(answer) = state.get(&question.id) else {
                continue;
            };
            if !question.accepts(answer) {
                continue;
            }
            walk.answers.insert(&question.id, answer);
            if let Some(next) = question.next_for(answer) {
                named.extend(next.successors());
            }
        }
        walk
    }

    /// Reachable questions for `state`, in declared order.
    pub fn reachable<'a>(&'a self, state: &'a AnswerState) -> Vec<&'a Question> {
        self.walk(state).reachable
    }
}

impl Serialize for QuestionGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.questions.serialize(serializer)
    }
}
