//! # ria-engine — Questionnaire Decision Engine
//!
//! Evaluates guided classification questionnaires: a fixed, ordered list of
//! conditionally-visible questions, an ordered rule table that maps the
//! accumulated answers to one [`PrimaryTag`](ria_core::PrimaryTag), and an
//! independent obligation table producing secondary duty flags.
//!
//! Every questionnaire (AI system definition, scope, roles, risk tiers) is
//! one [`Questionnaire`] value run by the same engine. Nothing in this crate
//! knows about a specific questionnaire.
//!
//! ## Control flow
//!
//! ```text
//! Event ─▶ reduce ─▶ AnswerState ─▶ QuestionGraph::walk ─▶ effective answers
//!                                                          │
//!                      ┌───────────────────────────────────┤
//!                      ▼                                   ▼
//!          RuleTable (any / first match)         Presentation (unlocked,
//!          ObligationTable (all matches)         expanded, answered)
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Re-derive, never patch.** Reachability, completion and the result are
//!    recomputed from the full [`AnswerState`] on every read. No cached
//!    partial result survives an answer change.
//!
//! 2. **One rule list, two traversals.** [`Questionnaire::is_complete`] asks
//!    whether any rule matches, [`Questionnaire::derive_result`] takes the
//!    first match. Both walk the same private iterator, so they cannot
//!    disagree.
//!
//! 3. **Orphaned answers are kept but ignored.** An answer to a question that
//!    is no longer reachable stays in the state (it comes back if the user
//!    returns to that branch) but is invisible to predicates and rules.
//!
//! 4. **Invalid events are no-ops.** Answering an unreachable question or
//!    toggling a detail of an irrelevant domain leaves the state untouched
//!    and reports [`EventOutcome::Ignored`]. Runtime evaluation never fails;
//!    only questionnaire construction returns errors.
//!
//! ## Crate Policy
//!
//! - Synchronous and single-threaded. No I/O.
//! - `BTreeMap`/`BTreeSet` everywhere evaluation output is observable.
//! - No `unsafe`, no `.unwrap()` outside tests.

pub mod answer;
pub mod condition;
pub mod derivation;
pub mod graph;
pub mod interfaces;
pub mod question;
pub mod questionnaire;
pub mod rules;
pub mod session;
pub mod unlock;

pub use answer::{Answer, AnswerState, ChecklistAnswer};
pub use condition::Condition;
pub use derivation::ClassificationResult;
pub use graph::{QuestionGraph, Walk};
pub use interfaces::{
    AnswerObserver, MatrixKey, ObligationRef, ObligationsMatrix, ObserverError, SessionSnapshot,
};
pub use question::{Choice, DomainMode, Next, Question, QuestionKind};
pub use questionnaire::{Questionnaire, QuestionnaireBuilder};
pub use rules::{ObligationRule, ObligationTable, Rule, RuleTable};
pub use session::{reduce, Event, EventOutcome, Session, SessionId};
pub use unlock::{ExpansionOverrides, Presentation, QuestionView};
