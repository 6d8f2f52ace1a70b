//! # Questions
//!
//! The static nodes of a question graph. A question is either a
//! single-select over ordered [`Choice`]s or a domain → detail checklist
//! over a [`Catalog`]. Each question carries a visibility [`Condition`]
//! over earlier answers.
//!
//! Whether an answer is conclusive or unlocks a successor is declared per
//! choice through [`Next`]. It is never inferred from the graph.

use ria_core::{Catalog, ChoiceValue, DomainId, QuestionId};
use serde::{Deserialize, Serialize};

use crate::answer::{Answer, ChecklistAnswer};
use crate::condition::Condition;

/// What answering a choice leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "successors", rename_all = "snake_case")]
pub enum Next {
    /// Conclusive on its own. Nothing further is unlocked.
    Terminal,
    /// Unlocks one of the listed successors.
    ///
    /// Several candidates are listed when the successor also depends on an
    /// earlier answer. Exactly one of them is reachable once the choice is
    /// taken.
    Continue(Vec<QuestionId>),
}

impl Next {
    /// Continue to a single successor.
    pub fn to(successor: impl Into<QuestionId>) -> Self {
        Self::Continue(vec![successor.into()])
    }

    /// Whether this is [`Next::Terminal`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// Candidate successors; empty for a terminal choice.
    pub fn successors(&self) -> &[QuestionId] {
        match self {
            Self::Terminal => &[],
            Self::Continue(successors) => successors,
        }
    }
}

/// One option of a single-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Enumerated value stored in the answer.
    pub value: ChoiceValue,
    /// Human-readable label.
    pub label: String,
    /// Exception or condition text shown with the choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Terminal or continuing.
    pub next: Next,
}

impl Choice {
    /// A conclusive choice.
    pub fn terminal(value: impl Into<ChoiceValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            annotation: None,
            next: Next::Terminal,
        }
    }

    /// A choice continuing to `next`.
    pub fn then(value: impl Into<ChoiceValue>, label: impl Into<String>, next: Next) -> Self {
        Self {
            next,
            ..Self::terminal(value, label)
        }
    }

    /// Attach an annotation.
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// How the relevant domains of a checklist are determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DomainMode {
    /// The user marks domains as relevant first. `none_domain` is the
    /// "none of these domains" sentinel of the domain selection.
    Selectable {
        /// Sentinel entry of the domain selection.
        none_domain: DomainId,
        /// Label shown for the sentinel entry.
        none_label: String,
    },
    /// Every domain of the catalog is always relevant.
    Fixed,
}

/// Shape of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one choice. Choice order is the ordinal order used by
    /// threshold conditions.
    Single {
        /// Choices in declared order.
        choices: Vec<Choice>,
    },
    /// Pick details inside relevant domains.
    Checklist {
        /// Domains and their details.
        catalog: Catalog,
        /// How relevant domains are chosen.
        domains: DomainMode,
        /// Where a settled checklist with a qualifying detail leads.
        on_qualifying: Next,
        /// Where a settled checklist without a qualifying detail leads.
        on_none: Next,
    },
}

/// One node of the question graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the questionnaire.
    pub id: QuestionId,
    /// Prompt text.
    pub prompt: String,
    /// Optional help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Visibility predicate over earlier answers.
    pub visible_when: Condition,
    /// Single-select or checklist.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// A single-select question, always visible until narrowed with
    /// [`Question::visible_when`].
    pub fn single(id: impl Into<QuestionId>, prompt: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            help: None,
            visible_when: Condition::Always,
            kind: QuestionKind::Single { choices },
        }
    }

    /// A plain yes/no question.
    pub fn yes_no(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        on_yes: Next,
        on_no: Next,
    ) -> Self {
        Self::single(
            id,
            prompt,
            vec![Choice::then("yes", "Yes", on_yes), Choice::then("no", "No", on_no)],
        )
    }

    /// A domain → detail checklist question.
    pub fn checklist(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        catalog: Catalog,
        domains: DomainMode,
        on_qualifying: Next,
        on_none: Next,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            help: None,
            visible_when: Condition::Always,
            kind: QuestionKind::Checklist {
                catalog,
                domains,
                on_qualifying,
                on_none,
            },
        }
    }

    /// Attach help text.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the visibility predicate.
    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = condition;
        self
    }

    /// Short name of the kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            QuestionKind::Single { .. } => "single-select",
            QuestionKind::Checklist { .. } => "checklist",
        }
    }

    /// Choices of a single-select question; empty for checklists.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            QuestionKind::Single { choices } => choices,
            QuestionKind::Checklist { .. } => &[],
        }
    }

    /// Look up a choice by value.
    pub fn choice(&self, value: &ChoiceValue) -> Option<&Choice> {
        self.choices().iter().find(|c| &c.value == value)
    }

    /// Declared position of a choice, used for ordinal comparison.
    pub fn choice_rank(&self, value: &ChoiceValue) -> Option<usize> {
        self.choices().iter().position(|c| &c.value == value)
    }

    /// The catalog of a checklist question.
    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.kind {
            QuestionKind::Single { .. } => None,
            QuestionKind::Checklist { catalog, .. } => Some(catalog),
        }
    }

    /// Whether `answer` has the shape this question expects and names only
    /// known values. Answers failing this check are never evaluated.
    pub fn accepts(&self, answer: &Answer) -> bool {
        match (&self.kind, answer) {
            (QuestionKind::Single { .. }, Answer::Choice { value }) => self.choice(value).is_some(),
            (QuestionKind::Checklist { .. }, Answer::Checklist(_)) => true,
            _ => false,
        }
    }

    /// Domains currently relevant in `answer`, in catalog order.
    ///
    /// For a fixed checklist every domain is relevant. For a selectable one,
    /// only the domains marked in the domain selection are.
    pub fn relevant_domains<'a>(&'a self, answer: &ChecklistAnswer) -> Vec<&'a DomainId> {
        let QuestionKind::Checklist {
            catalog, domains, ..
        } = &self.kind
        else {
            return Vec::new();
        };
        catalog
            .domains()
            .iter()
            .map(|d| &d.id)
            .filter(|id| match domains {
                DomainMode::Fixed => true,
                DomainMode::Selectable { .. } => answer
                    .domains
                    .as_ref()
                    .is_some_and(|selected| selected.contains(*id)),
            })
            .collect()
    }

    /// Whether `domain` is relevant in `answer`.
    pub fn is_relevant(&self, answer: &ChecklistAnswer, domain: &DomainId) -> bool {
        self.relevant_domains(answer).contains(&domain)
    }

    /// Whether any relevant domain has a non-sentinel detail selected.
    pub fn has_qualifying_case(&self, answer: &ChecklistAnswer) -> bool {
        self.relevant_domains(answer).into_iter().any(|domain| {
            answer
                .details_of(domain)
                .is_some_and(|selection| selection.has_qualifying())
        })
    }

    /// Whether a checklist answer is settled.
    ///
    /// Settled means the "none of these domains" entry is selected, or at
    /// least one domain is relevant and every relevant domain has a
    /// non-empty detail selection.
    pub fn is_settled(&self, answer: &ChecklistAnswer) -> bool {
        if let QuestionKind::Checklist {
            domains: DomainMode::Selectable { .. },
            ..
        } = &self.kind
        {
            if answer
                .domains
                .as_ref()
                .is_some_and(|selected| selected.is_sentinel_only())
            {
                return true;
            }
        }
        let relevant = self.relevant_domains(answer);
        !relevant.is_empty()
            && relevant.into_iter().all(|domain| {
                answer
                    .details_of(domain)
                    .is_some_and(|selection| !selection.is_empty())
            })
    }

    /// Whether `answer` completes this question.
    pub fn is_answered_by(&self, answer: &Answer) -> bool {
        match (&self.kind, answer) {
            (QuestionKind::Single { .. }, Answer::Choice { value }) => self.choice(value).is_some(),
            (QuestionKind::Checklist { .. }, Answer::Checklist(checklist)) => {
                self.is_settled(checklist)
            }
            _ => false,
        }
    }

    /// What the given answer leads to, once it completes the question.
    pub fn next_for(&self, answer: &Answer) -> Option<&Next> {
        match (&self.kind, answer) {
            (QuestionKind::Single { .. }, Answer::Choice { value }) => {
                self.choice(value).map(|c| &c.next)
            }
            (
                QuestionKind::Checklist {
                    on_qualifying,
                    on_none,
                    ..
                },
                Answer::Checklist(checklist),
            ) if self.is_settled(checklist) => Some(if self.has_qualifying_case(checklist) {
                on_qualifying
            } else {
                on_none
            }),
            _ => None,
        }
    }

    /// Every [`Next`] this question can lead to.
    pub fn all_next(&self) -> Vec<&Next> {
        match &self.kind {
            QuestionKind::Single { choices } => choices.iter().map(|c| &c.next).collect(),
            QuestionKind::Checklist {
                on_qualifying,
                on_none,
                ..
            } => vec![on_qualifying, on_none],
        }
    }
}

#[cfg(test)]
mod tests {
    use ria_core::{Detail, DetailId, Domain, ExclusiveSet};

    use super::*;

    fn annex() -> Question {
        let catalog = Catalog::new(vec![
            Domain::new(
                "biometrics",
                "Biometrics",
                vec![
                    Detail::new("remote_identification", "Remote identification"),
                    Detail::sentinel("none", "None of these cases"),
                ],
            ),
            Domain::new(
                "education",
                "Education",
                vec![
                    Detail::new("admission", "Admission"),
                    Detail::sentinel("none", "None of these cases"),
                ],
            ),
        ])
        .unwrap();
        Question::checklist(
            "annex",
            "Domains",
            catalog,
            DomainMode::Selectable {
                none_domain: DomainId::new("annex_none"),
                none_label: "None of these domains".into(),
            },
            Next::to("profiling"),
            Next::to("transparency"),
        )
    }

    fn details(selected: &[&str]) -> ExclusiveSet<DetailId> {
        selected
            .iter()
            .fold(ExclusiveSet::new(DetailId::new("none")), |s, d| {
                s.toggle(DetailId::new(*d))
            })
    }

    fn domains(selected: &[&str]) -> ExclusiveSet<DomainId> {
        selected
            .iter()
            .fold(ExclusiveSet::new(DomainId::new("annex_none")), |s, d| {
                s.toggle(DomainId::new(*d))
            })
    }

    #[test]
    fn unanswered_checklist_is_not_settled() {
        let q = annex();
        assert!(!q.is_settled(&ChecklistAnswer::default()));
    }

    #[test]
    fn none_domain_settles() {
        let q = annex();
        let a = ChecklistAnswer::default().with_domains(domains(&["annex_none"]));
        assert!(q.is_settled(&a));
        assert!(!q.has_qualifying_case(&a));
        assert_eq!(
            q.next_for(&Answer::Checklist(a)),
            Some(&Next::to("transparency"))
        );
    }

    #[test]
    fn every_relevant_domain_needs_details() {
        let q = annex();
        let a = ChecklistAnswer::default()
            .with_domains(domains(&["biometrics", "education"]))
            .with_details(DomainId::new("biometrics"), details(&["remote_identification"]));
        assert!(!q.is_settled(&a));
        assert!(q.has_qualifying_case(&a));
        let a = a.with_details(DomainId::new("education"), details(&["none"]));
        assert!(q.is_settled(&a));
        assert_eq!(q.next_for(&Answer::Checklist(a)), Some(&Next::to("profiling")));
    }

    #[test]
    fn details_of_deselected_domain_are_ignored() {
        let q = annex();
        let a = ChecklistAnswer::default()
            .with_domains(domains(&["education"]))
            .with_details(DomainId::new("biometrics"), details(&["remote_identification"]))
            .with_details(DomainId::new("education"), details(&["none"]));
        assert!(q.is_settled(&a));
        assert!(!q.has_qualifying_case(&a));
    }

    #[test]
    fn single_select_accepts_only_declared_values() {
        let q = Question::yes_no("q", "Q?", Next::Terminal, Next::to("r"));
        assert!(q.accepts(&Answer::Choice { value: "yes".into() }));
        assert!(!q.accepts(&Answer::Choice { value: "maybe".into() }));
        assert!(!q.accepts(&Answer::Checklist(ChecklistAnswer::default())));
        assert_eq!(q.choice_rank(&"no".into()), Some(1));
    }

    #[test]
    fn next_declared_per_choice() {
        let q = Question::yes_no("q", "Q?", Next::Terminal, Next::to("r"));
        assert!(q
            .next_for(&Answer::Choice { value: "yes".into() })
            .is_some_and(Next::is_terminal));
        assert_eq!(
            q.next_for(&Answer::Choice { value: "no".into() })
                .map(Next::successors),
            Some(&[QuestionId::new("r")][..])
        );
    }
}
