//! # Sessions and the Answer Reducer
//!
//! [`reduce`] is the pure transition function of the engine:
//! `(questionnaire, state, event) -> (state', outcome)`. It never mutates
//! its input and never fails. An event that does not apply to the current
//! state (answering an unreachable question, toggling a detail of a domain
//! that is not relevant) returns the state unchanged with
//! [`EventOutcome::Ignored`].
//!
//! [`Session`] owns one in-memory questionnaire run: the current snapshot,
//! the expansion overrides of the presentation layer and the observers to
//! notify. Each event is processed atomically. The new snapshot replaces
//! the old one wholesale, so reachability, completion and the result are
//! seen to change together.

use std::fmt;
use std::sync::Arc;

use ria_core::{ChoiceValue, DetailId, DomainId, QuestionId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::{Answer, AnswerState};
use crate::derivation::ClassificationResult;
use crate::interfaces::{AnswerObserver, SessionSnapshot};
use crate::question::{DomainMode, Question, QuestionKind};
use crate::questionnaire::Questionnaire;
use crate::unlock::{ExpansionOverrides, Presentation};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identifier of one questionnaire session.
///
/// Used to correlate observer snapshots. Evaluation never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a session identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A discrete user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Select a choice of a single-select question.
    Answer {
        /// The question.
        question: QuestionId,
        /// The choice.
        value: ChoiceValue,
    },
    /// Toggle a domain of a checklist with selectable domains. Toggling the
    /// checklist's none-domain selects "none of these domains".
    ToggleDomain {
        /// The checklist question.
        question: QuestionId,
        /// The domain, or the none-domain.
        domain: DomainId,
    },
    /// Toggle a detail inside a relevant domain.
    ToggleDetail {
        /// The domain; its checklist is found through the graph.
        domain: DomainId,
        /// The detail.
        detail: DetailId,
    },
    /// Open or close a question in the presentation layer. Answers are
    /// unaffected.
    ToggleExpanded {
        /// The question.
        question: QuestionId,
    },
    /// Discard every answer.
    Reset,
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    /// The state changed.
    Applied,
    /// The event was valid but left the state as it was.
    Unchanged,
    /// The event does not apply to the current state and was dropped.
    Ignored {
        /// Why the event was dropped.
        reason: String,
    },
}

impl EventOutcome {
    /// Whether the state changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Whether the event was dropped.
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

/// Apply `event` to `state`.
///
/// [`Event::ToggleExpanded`] never touches answers and always yields
/// [`EventOutcome::Unchanged`] here; [`Session`] handles it against its
/// expansion overrides.
pub fn reduce(
    questionnaire: &Questionnaire,
    state: &AnswerState,
    event: &Event,
) -> (AnswerState, EventOutcome) {
    let transition = match event {
        Event::Answer { question, value } => answer(questionnaire, state, question, value),
        Event::ToggleDomain { question, domain } => {
            toggle_domain(questionnaire, state, question, domain)
        }
        Event::ToggleDetail { domain, detail } => {
            toggle_detail(questionnaire, state, domain, detail)
        }
        Event::ToggleExpanded { .. } => Ok(state.clone()),
        Event::Reset => Ok(AnswerState::new()),
    };
    match transition {
        Ok(next) if next == *state => (next, EventOutcome::Unchanged),
        Ok(next) => {
            tracing::debug!(questionnaire = %questionnaire.id(), ?event, "event applied");
            (next, EventOutcome::Applied)
        }
        Err(reason) => {
            tracing::debug!(questionnaire = %questionnaire.id(), ?event, %reason, "event ignored");
            (state.clone(), EventOutcome::Ignored { reason })
        }
    }
}

/// A transition, or the reason it does not apply.
type Transition = Result<AnswerState, String>;

fn reachable_question<'q>(
    questionnaire: &'q Questionnaire,
    state: &AnswerState,
    question: &QuestionId,
) -> Result<&'q Question, String> {
    let Some(q) = questionnaire.graph().question(question) else {
        return Err(format!("unknown question {question}"));
    };
    if !questionnaire.graph().walk(state).is_reachable(question) {
        return Err(format!("question {question} is not reachable"));
    }
    Ok(q)
}

fn answer(
    questionnaire: &Questionnaire,
    state: &AnswerState,
    question: &QuestionId,
    value: &ChoiceValue,
) -> Transition {
    let q = reachable_question(questionnaire, state, question)?;
    if !matches!(q.kind, QuestionKind::Single { .. }) {
        return Err(format!("question {question} is not a single-select question"));
    }
    if q.choice(value).is_none() {
        return Err(format!("{value} is not a choice of question {question}"));
    }
    Ok(state.with_answer(
        question.clone(),
        Answer::Choice {
            value: value.clone(),
        },
    ))
}

fn toggle_domain(
    questionnaire: &Questionnaire,
    state: &AnswerState,
    question: &QuestionId,
    domain: &DomainId,
) -> Transition {
    let q = reachable_question(questionnaire, state, question)?;
    let QuestionKind::Checklist {
        catalog,
        domains: DomainMode::Selectable { none_domain, .. },
        ..
    } = &q.kind
    else {
        return Err(format!("question {question} has no selectable domains"));
    };
    if domain != none_domain && !catalog.contains_domain(domain) {
        return Err(format!("domain {domain} is not part of question {question}"));
    }
    let current = state
        .get(question)
        .and_then(Answer::checklist)
        .cloned()
        .unwrap_or_default();
    let selection = current
        .domains
        .clone()
        .unwrap_or_else(|| ria_core::ExclusiveSet::new(none_domain.clone()))
        .toggle(domain.clone());
    Ok(state.with_answer(
        question.clone(),
        Answer::Checklist(current.with_domains(selection)),
    ))
}

fn toggle_detail(
    questionnaire: &Questionnaire,
    state: &AnswerState,
    domain: &DomainId,
    detail: &DetailId,
) -> Transition {
    let Some(owner) = questionnaire.graph().domain_owner(domain) else {
        return Err(format!("unknown domain {domain}"));
    };
    let q = reachable_question(questionnaire, state, &owner.id)?;
    let Some(declared) = q.catalog().and_then(|c| c.domain(domain)) else {
        return Err(format!("unknown domain {domain}"));
    };
    if declared.detail(detail).is_none() {
        return Err(format!("detail {detail} is not part of domain {domain}"));
    }
    let current = state
        .get(&q.id)
        .and_then(Answer::checklist)
        .cloned()
        .unwrap_or_default();
    if !q.is_relevant(&current, domain) {
        return Err(format!("domain {domain} is not selected as relevant"));
    }
    let Some(selection) = current
        .details_of(domain)
        .cloned()
        .or_else(|| declared.empty_selection())
    else {
        return Err(format!("domain {domain} has no sentinel detail"));
    };
    Ok(state.with_answer(
        q.id.clone(),
        Answer::Checklist(current.with_details(domain.clone(), selection.toggle(detail.clone()))),
    ))
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One in-memory run of a questionnaire.
pub struct Session {
    id: SessionId,
    questionnaire: Arc<Questionnaire>,
    state: Arc<AnswerState>,
    expansion: ExpansionOverrides,
    observers: Vec<Arc<dyn AnswerObserver>>,
    sequence: u64,
}

impl Session {
    /// Start an empty session.
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        Self {
            id: SessionId::new(),
            questionnaire,
            state: Arc::new(AnswerState::new()),
            expansion: ExpansionOverrides::new(),
            observers: Vec::new(),
            sequence: 0,
        }
    }

    /// Register an observer notified after every applied answer event.
    pub fn with_observer(mut self, observer: Arc<dyn AnswerObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The questionnaire being answered.
    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// The current answers.
    pub fn state(&self) -> &AnswerState {
        &self.state
    }

    /// A shared handle to the current answers.
    pub fn snapshot(&self) -> Arc<AnswerState> {
        Arc::clone(&self.state)
    }

    /// Current expansion overrides.
    pub fn expansion(&self) -> &ExpansionOverrides {
        &self.expansion
    }

    /// Process one event.
    pub fn apply(&mut self, event: &Event) -> EventOutcome {
        if let Event::ToggleExpanded { question } = event {
            return self.apply_expansion(question);
        }

        let (next, outcome) = reduce(&self.questionnaire, &self.state, event);
        if !outcome.is_applied() {
            return outcome;
        }

        self.expansion = match event {
            Event::Reset => ExpansionOverrides::new(),
            _ => {
                // Successors auto-expanded by this event open again even if
                // the user had closed them before.
                let before = self.questionnaire.auto_expanded(&self.state);
                let after = self.questionnaire.auto_expanded(&next);
                self.expansion.without(after.difference(&before))
            }
        };
        self.state = Arc::new(next);
        self.sequence += 1;
        self.notify();
        outcome
    }

    fn apply_expansion(&mut self, question: &QuestionId) -> EventOutcome {
        let presentation = self.presentation();
        if !presentation.is_unlocked(question) {
            let reason = format!("question {question} is not reachable");
            tracing::debug!(questionnaire = %self.questionnaire.id(), %question, %reason, "expansion ignored");
            return EventOutcome::Ignored { reason };
        }
        let expanded = presentation.is_expanded(question);
        self.expansion = self.expansion.with(question.clone(), !expanded);
        EventOutcome::Applied
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = SessionSnapshot {
            session: self.id,
            questionnaire: self.questionnaire.id().to_string(),
            sequence: self.sequence,
            answers: self.snapshot(),
            result: self.result(),
        };
        for observer in &self.observers {
            if let Err(e) = observer.observe(&snapshot) {
                tracing::warn!(session = %self.id, error = %e, "answer observer failed");
            }
        }
    }

    /// Answer a single-select question.
    pub fn answer(
        &mut self,
        question: impl Into<QuestionId>,
        value: impl Into<ChoiceValue>,
    ) -> EventOutcome {
        self.apply(&Event::Answer {
            question: question.into(),
            value: value.into(),
        })
    }

    /// Toggle a domain of a checklist.
    pub fn toggle_domain(
        &mut self,
        question: impl Into<QuestionId>,
        domain: impl Into<DomainId>,
    ) -> EventOutcome {
        self.apply(&Event::ToggleDomain {
            question: question.into(),
            domain: domain.into(),
        })
    }

    /// Toggle a detail of a relevant domain.
    pub fn toggle_detail(
        &mut self,
        domain: impl Into<DomainId>,
        detail: impl Into<DetailId>,
    ) -> EventOutcome {
        self.apply(&Event::ToggleDetail {
            domain: domain.into(),
            detail: detail.into(),
        })
    }

    /// Open or close a question.
    pub fn toggle_expanded(&mut self, question: impl Into<QuestionId>) -> EventOutcome {
        self.apply(&Event::ToggleExpanded {
            question: question.into(),
        })
    }

    /// Discard every answer and override.
    pub fn reset(&mut self) -> EventOutcome {
        self.apply(&Event::Reset)
    }

    /// Reachable questions, in declared order.
    pub fn reachable_questions(&self) -> Vec<&Question> {
        self.questionnaire.reachable(&self.state)
    }

    /// Whether a classification is available.
    pub fn is_complete(&self) -> bool {
        self.questionnaire.is_complete(&self.state)
    }

    /// The classification, or `None` while more answers are needed.
    pub fn result(&self) -> Option<ClassificationResult> {
        self.questionnaire.derive_result(&self.state)
    }

    /// Whether checklist `question` has a qualifying case.
    pub fn has_qualifying_case(&self, question: impl Into<QuestionId>) -> bool {
        self.questionnaire
            .has_qualifying_case(&self.state, &question.into())
    }

    /// Unlocked / expanded projection of the current state.
    pub fn presentation(&self) -> Presentation {
        self.questionnaire.presentation(&self.state, &self.expansion)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("questionnaire", &self.questionnaire.id())
            .field("answers", &self.state.len())
            .field("sequence", &self.sequence)
            .field("observers", &self.observers.len())
            .finish()
    }
}
