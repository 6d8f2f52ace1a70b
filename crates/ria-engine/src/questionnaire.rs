//! # Questionnaire Definition
//!
//! A [`Questionnaire`] bundles a question graph, a classification rule
//! table and an obligation table. It is built once through
//! [`QuestionnaireBuilder::build`], which is the only fallible step of the
//! engine: every reference in every predicate and rule is resolved there,
//! so evaluation never has to handle a malformed definition.

use ria_core::{DefinitionError, PrimaryTag, RiaError, SecondaryObligation};
use serde::Serialize;

use crate::condition::Condition;
use crate::graph::QuestionGraph;
use crate::question::Question;
use crate::rules::{ObligationRule, ObligationTable, Rule, RuleTable};

/// A validated questionnaire.
#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    id: String,
    title: String,
    questions: QuestionGraph,
    rules: RuleTable,
    obligations: ObligationTable,
}

impl Questionnaire {
    /// Start building a questionnaire.
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> QuestionnaireBuilder {
        QuestionnaireBuilder {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
            rules: Vec::new(),
            obligations: Vec::new(),
        }
    }

    /// Questionnaire identifier (`risk_system`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The question graph.
    pub fn graph(&self) -> &QuestionGraph {
        &self.questions
    }

    /// The classification rules.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The obligation rules.
    pub fn obligations(&self) -> &ObligationTable {
        &self.obligations
    }
}

/// Accumulates questions and rules before validation.
#[derive(Debug, Clone)]
pub struct QuestionnaireBuilder {
    id: String,
    title: String,
    questions: Vec<Question>,
    rules: Vec<Rule>,
    obligations: Vec<ObligationRule>,
}

impl QuestionnaireBuilder {
    /// Append a question. Declaration order is evaluation order.
    pub fn question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Append a classification rule with lower priority than those before it.
    pub fn rule(
        mut self,
        id: impl Into<String>,
        reference: impl Into<String>,
        when: Condition,
        tag: PrimaryTag,
    ) -> Self {
        self.rules.push(Rule {
            id: id.into(),
            reference: reference.into(),
            when,
            tag,
        });
        self
    }

    /// Append an obligation rule.
    pub fn obligation(mut self, when: Condition, flag: SecondaryObligation) -> Self {
        self.obligations.push(ObligationRule { when, flag });
        self
    }

    /// Validate everything and produce the questionnaire.
    ///
    /// # Errors
    ///
    /// Returns [`RiaError::Definition`] for the first inconsistency found:
    /// an empty identifier, no questions, no rules, an invalid graph, or a
    /// rule or obligation guard with an unresolved reference.
    pub fn build(self) -> Result<Questionnaire, RiaError> {
        if self.id.is_empty() {
            return Err(DefinitionError::EmptyIdentifier {
                context: "questionnaire".into(),
            }
            .into());
        }
        if self.questions.is_empty() {
            return Err(DefinitionError::NoQuestions {
                questionnaire: self.id,
            }
            .into());
        }
        if self.rules.is_empty() {
            return Err(DefinitionError::EmptyRuleTable {
                questionnaire: self.id,
            }
            .into());
        }

        let graph = QuestionGraph::new(self.questions)?;
        let scope = graph.len();
        for rule in &self.rules {
            rule.when
                .validate(&graph, scope, &format!("rule {}", rule.id))?;
        }
        for obligation in &self.obligations {
            obligation
                .when
                .validate(&graph, scope, &format!("obligation {}", obligation.flag))?;
        }
        let rules = RuleTable::new(self.rules)?;

        tracing::debug!(
            questionnaire = %self.id,
            questions = graph.len(),
            rules = rules.len(),
            obligations = self.obligations.len(),
            "questionnaire built"
        );

        Ok(Questionnaire {
            id: self.id,
            title: self.title,
            questions: graph,
            rules,
            obligations: ObligationTable::new(self.obligations),
        })
    }
}
