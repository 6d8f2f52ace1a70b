//! # ria-questionnaires — Questionnaire Catalog
//!
//! Every guided classification of the verifier is a data module here: a
//! question list, a priority-ordered rule table and an obligation table,
//! assembled with [`Questionnaire::builder`]. No module contains control
//! flow of its own; branching lives in `visible_when` predicates and in the
//! per-choice [`Next`](ria_engine::Next) declarations.
//!
//! | Kind | Module | Outcome family |
//! |------|--------|----------------|
//! | `ai_system_definition` | [`ai_system_definition`] | Definition (Art. 3(1)) |
//! | `gpai_model_definition` | [`gpai_model_definition`] | Definition (Art. 3(63)) |
//! | `applicability` | [`applicability`] | Scope (Art. 2) |
//! | `role_system` | [`role_system`] | Role (Art. 3, 25) |
//! | `role_model` | [`role_model`] | Role (Art. 53, 54) |
//! | `risk_system` | [`risk_system`] | Risk tier (Art. 5, 6, 50) |
//! | `risk_model` | [`risk_model`] | Model risk (Art. 51, 53) |
//!
//! Use [`QuestionnaireKind::build`] to obtain a validated instance by kind.

use std::fmt;
use std::str::FromStr;

use ria_core::RiaError;
use ria_engine::Questionnaire;
use serde::{Deserialize, Serialize};

pub mod ai_system_definition;
pub mod applicability;
pub mod gpai_model_definition;
pub mod risk_model;
pub mod risk_system;
pub mod role_model;
pub mod role_system;

/// The registered questionnaires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireKind {
    /// Is it an AI system?
    AiSystemDefinition,
    /// Is it a general-purpose AI model?
    GpaiModelDefinition,
    /// Does the regulation apply?
    Applicability,
    /// Role of the organisation for an AI system.
    RoleSystem,
    /// Role of the organisation for a general-purpose model.
    RoleModel,
    /// Risk tier of an AI system.
    RiskSystem,
    /// Risk category of a general-purpose model.
    RiskModel,
}

impl QuestionnaireKind {
    /// All kinds, in the order a user usually goes through them.
    pub fn all() -> &'static [QuestionnaireKind] {
        &[
            Self::AiSystemDefinition,
            Self::GpaiModelDefinition,
            Self::Applicability,
            Self::RoleSystem,
            Self::RoleModel,
            Self::RiskSystem,
            Self::RiskModel,
        ]
    }

    /// The questionnaire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiSystemDefinition => "ai_system_definition",
            Self::GpaiModelDefinition => "gpai_model_definition",
            Self::Applicability => "applicability",
            Self::RoleSystem => "role_system",
            Self::RoleModel => "role_model",
            Self::RiskSystem => "risk_system",
            Self::RiskModel => "risk_model",
        }
    }

    /// Build and validate the questionnaire.
    ///
    /// # Errors
    ///
    /// Returns [`RiaError::Definition`] if the hand-authored tables are
    /// inconsistent. The shipped tables are covered by tests, so an error
    /// here means a broken edit.
    pub fn build(&self) -> Result<Questionnaire, RiaError> {
        match self {
            Self::AiSystemDefinition => ai_system_definition::questionnaire(),
            Self::GpaiModelDefinition => gpai_model_definition::questionnaire(),
            Self::Applicability => applicability::questionnaire(),
            Self::RoleSystem => role_system::questionnaire(),
            Self::RoleModel => role_model::questionnaire(),
            Self::RiskSystem => risk_system::questionnaire(),
            Self::RiskModel => risk_model::questionnaire(),
        }
    }
}

impl fmt::Display for QuestionnaireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionnaireKind {
    type Err = RiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RiaError::UnknownQuestionnaire(s.to_string()))
    }
}
