//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the verifier. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Questionnaire definitions are validated once, at construction. Every
//!   inconsistency in a static catalog, question graph or rule table is a
//!   [`DefinitionError`] naming the offending identifiers.
//! - Runtime answer events never produce errors. An event that does not
//!   apply to the current answers is ignored, not rejected.

use thiserror::Error;

/// Top-level error type for the verifier.
#[derive(Error, Debug)]
pub enum RiaError {
    /// A questionnaire definition is internally inconsistent.
    #[error("invalid questionnaire definition: {0}")]
    Definition(#[from] DefinitionError),

    /// A selection set violates sentinel exclusivity.
    #[error("invalid selection: {0}")]
    Selection(#[from] SelectionError),

    /// An identifier failed validation.
    #[error("invalid identifier {value:?}: {reason}")]
    InvalidIdentifier {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A tag string did not name any known classification tag.
    #[error("unknown tag: {0:?}")]
    UnknownTag(String),

    /// A questionnaire identifier did not name any registered questionnaire.
    #[error("unknown questionnaire: {0:?}")]
    UnknownQuestionnaire(String),
}

/// A static questionnaire definition is inconsistent.
///
/// These are programming defects in the hand-authored tables, caught when
/// the questionnaire is built rather than when a user answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// An identifier is empty.
    #[error("empty identifier in {context}")]
    EmptyIdentifier {
        /// Where the empty identifier was found.
        context: String,
    },

    /// Two questions share an identifier.
    #[error("duplicate question {question}")]
    DuplicateQuestion {
        /// The duplicated question id.
        question: String,
    },

    /// Two choices of one question share a value.
    #[error("duplicate choice {value} in question {question}")]
    DuplicateChoice {
        /// The question holding the choices.
        question: String,
        /// The duplicated value.
        value: String,
    },

    /// A single-select question declares no choices.
    #[error("question {question} has no choices")]
    NoChoices {
        /// The empty question.
        question: String,
    },

    /// Two domains share an identifier within one questionnaire.
    #[error("duplicate domain {domain}")]
    DuplicateDomain {
        /// The duplicated domain id.
        domain: String,
    },

    /// Two details of one domain share an identifier.
    #[error("duplicate detail {detail} in domain {domain}")]
    DuplicateDetail {
        /// The domain holding the details.
        domain: String,
        /// The duplicated detail id.
        detail: String,
    },

    /// A domain has no details at all.
    #[error("domain {domain} has no details")]
    EmptyDomain {
        /// The empty domain.
        domain: String,
    },

    /// A catalog has no domains.
    #[error("catalog of question {question} has no domains")]
    EmptyCatalog {
        /// The checklist question owning the catalog.
        question: String,
    },

    /// A domain lacks its "none of these cases" detail.
    #[error("domain {domain} has no sentinel detail")]
    MissingSentinel {
        /// The domain without a sentinel.
        domain: String,
    },

    /// A domain declares more than one sentinel detail.
    #[error("domain {domain} has {count} sentinel details, expected exactly one")]
    MultipleSentinels {
        /// The domain with several sentinels.
        domain: String,
        /// How many sentinels it declares.
        count: usize,
    },

    /// A reference names a question that does not exist.
    #[error("{referenced_by} references unknown question {question}")]
    UnknownQuestion {
        /// The question or rule holding the reference.
        referenced_by: String,
        /// The missing question id.
        question: String,
    },

    /// A reference names a choice the question does not offer.
    #[error("{referenced_by} references unknown choice {value} of question {question}")]
    UnknownChoice {
        /// The question or rule holding the reference.
        referenced_by: String,
        /// The referenced question.
        question: String,
        /// The missing choice value.
        value: String,
    },

    /// A reference names a domain the checklist does not contain.
    #[error("{referenced_by} references unknown domain {domain} of question {question}")]
    UnknownDomain {
        /// The question or rule holding the reference.
        referenced_by: String,
        /// The referenced checklist question.
        question: String,
        /// The missing domain id.
        domain: String,
    },

    /// A reference names a domain that no checklist declares.
    #[error("{referenced_by} references domain {domain}, which no checklist declares")]
    UnownedDomain {
        /// The question or rule holding the reference.
        referenced_by: String,
        /// The unknown domain id.
        domain: String,
    },

    /// A reference names a detail the domain does not contain.
    #[error("{referenced_by} references unknown detail {detail} of domain {domain}")]
    UnknownDetail {
        /// The question or rule holding the reference.
        referenced_by: String,
        /// The referenced domain.
        domain: String,
        /// The missing detail id.
        detail: String,
    },

    /// A condition is applied to a question of the wrong kind.
    #[error("{referenced_by} expects question {question} to be a {expected} question")]
    KindMismatch {
        /// The question or rule holding the reference.
        referenced_by: String,
        /// The referenced question.
        question: String,
        /// The kind the condition needs.
        expected: &'static str,
    },

    /// A visibility predicate references its own question or a later one.
    #[error("visibility of {question} depends on {referenced}, which is not an earlier question")]
    ForwardReference {
        /// The question whose predicate is at fault.
        question: String,
        /// The question it must not depend on.
        referenced: String,
    },

    /// A continuing choice names a successor that does not come later.
    #[error("{question} unlocks {successor}, which is not a later question")]
    BackwardSuccessor {
        /// The question declaring the successor.
        question: String,
        /// The misplaced successor.
        successor: String,
    },

    /// A continuing choice names no successor.
    #[error("{question} has a continuing choice {value} without successors")]
    EmptyContinuation {
        /// The question declaring the choice.
        question: String,
        /// The choice value.
        value: String,
    },

    /// Two rules share an identifier.
    #[error("duplicate rule {rule}")]
    DuplicateRule {
        /// The duplicated rule id.
        rule: String,
    },

    /// A questionnaire declares no classification rules.
    #[error("questionnaire {questionnaire} has an empty rule table")]
    EmptyRuleTable {
        /// The questionnaire id.
        questionnaire: String,
    },

    /// A questionnaire declares no questions.
    #[error("questionnaire {questionnaire} has no questions")]
    NoQuestions {
        /// The questionnaire id.
        questionnaire: String,
    },
}

/// A selection set violates sentinel exclusivity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The sentinel is selected together with other members.
    #[error("sentinel {sentinel} selected together with {others} other member(s)")]
    SentinelNotExclusive {
        /// The sentinel member, rendered with `Debug`.
        sentinel: String,
        /// How many other members are selected.
        others: usize,
    },
}
