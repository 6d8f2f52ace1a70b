//! # Classification Tags — Single Source of Truth
//!
//! Defines [`PrimaryTag`], the one mutually-exclusive outcome a questionnaire
//! derives, and [`SecondaryObligation`], the independent duty flags attached
//! to it. Every questionnaire draws from these two enums. The compiler
//! enforces exhaustive `match`, so adding an outcome forces every consumer
//! (presentation, obligations matrix, analytics) to handle it.
//!
//! Tags serialize as `SCREAMING_SNAKE_CASE` (`HIGH_RISK`,
//! `TRANSPARENCY_DUTY`), which is also their `Display` and `FromStr` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RiaError;

/// Which kind of questionnaire a primary tag answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFamily {
    /// Is the object an AI system / a general-purpose AI model at all?
    Definition,
    /// Does the regulation apply to the object?
    Applicability,
    /// Which legal role does the organisation hold?
    Role,
    /// Risk tier of an AI system.
    Risk,
    /// Category of a general-purpose AI model.
    ModelRisk,
}

/// The single classification outcome of a questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryTag {
    // -- Definition (Art. 3) --
    /// Meets the Art. 3(1) definition of an AI system.
    AiSystem,
    /// Does not meet the AI system definition.
    NotAiSystem,
    /// Meets the Art. 3(63) definition of a general-purpose AI model.
    GpaiModel,
    /// Does not meet the general-purpose AI model definition.
    NotGpaiModel,

    // -- Applicability (Art. 2) --
    /// Excluded from the regulation.
    OutOfScope,
    /// Real-world testing outside regulatory sandboxes (Art. 60).
    SpecificRegime,
    /// Fully within scope.
    InScopeFull,
    /// Open-source model with systemic risk: exemption does not apply.
    InScopeHeavy,
    /// Open-source model benefiting from the lighter regime.
    OpenSourceRegime,

    // -- Roles (Art. 3, 25, 54) --
    /// Provider of an AI system.
    Provider,
    /// Deployer, distributor or importer requalified as provider (Art. 25).
    RequalifiedProvider,
    /// Deployer using the system under its authority.
    Deployer,
    /// Importer placing a third-country system on the Union market.
    Importer,
    /// Distributor making the system available on the market.
    Distributor,
    /// Authorised representative of a third-country provider.
    AuthorizedRepresentative,
    /// Provider of a general-purpose AI model.
    GpaiProvider,
    /// Provider integrating a third-party model into its own system.
    DownstreamProvider,
    /// None of the roles defined by the regulation.
    UnlistedRole,

    // -- System risk tiers (Art. 5, 6, 50) --
    /// Prohibited practice (Art. 5).
    Prohibited,
    /// High-risk system (Art. 6).
    HighRisk,
    /// Annex III system exempted by an Art. 6(3) derogation.
    LimitedRiskWithDerogation,
    /// System subject to transparency duties only (Art. 50).
    LimitedRiskTransparency,
    /// No specific obligation.
    MinimalRisk,

    // -- Model categories (Art. 51-55) --
    /// Not a general-purpose model.
    OutOfCategory,
    /// General-purpose model with systemic risk (Art. 51).
    GpaiSystemicRisk,
    /// General-purpose model without systemic risk.
    GpaiStandard,
    /// General-purpose model released under a free and open licence.
    GpaiOpenSource,
}

/// Number of [`PrimaryTag`] variants.
pub const PRIMARY_TAG_COUNT: usize = 27;

impl PrimaryTag {
    /// Return all primary tags as a slice, in declaration order.
    pub fn all() -> &'static [PrimaryTag] {
        &[
            Self::AiSystem,
            Self::NotAiSystem,
            Self::GpaiModel,
            Self::NotGpaiModel,
            Self::OutOfScope,
            Self::SpecificRegime,
            Self::InScopeFull,
            Self::InScopeHeavy,
            Self::OpenSourceRegime,
            Self::Provider,
            Self::RequalifiedProvider,
            Self::Deployer,
            Self::Importer,
            Self::Distributor,
            Self::AuthorizedRepresentative,
            Self::GpaiProvider,
            Self::DownstreamProvider,
            Self::UnlistedRole,
            Self::Prohibited,
            Self::HighRisk,
            Self::LimitedRiskWithDerogation,
            Self::LimitedRiskTransparency,
            Self::MinimalRisk,
            Self::OutOfCategory,
            Self::GpaiSystemicRisk,
            Self::GpaiStandard,
            Self::GpaiOpenSource,
        ]
    }

    /// The canonical `SCREAMING_SNAKE_CASE` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiSystem => "AI_SYSTEM",
            Self::NotAiSystem => "NOT_AI_SYSTEM",
            Self::GpaiModel => "GPAI_MODEL",
            Self::NotGpaiModel => "NOT_GPAI_MODEL",
            Self::OutOfScope => "OUT_OF_SCOPE",
            Self::SpecificRegime => "SPECIFIC_REGIME",
            Self::InScopeFull => "IN_SCOPE_FULL",
            Self::InScopeHeavy => "IN_SCOPE_HEAVY",
            Self::OpenSourceRegime => "OPEN_SOURCE_REGIME",
            Self::Provider => "PROVIDER",
            Self::RequalifiedProvider => "REQUALIFIED_PROVIDER",
            Self::Deployer => "DEPLOYER",
            Self::Importer => "IMPORTER",
            Self::Distributor => "DISTRIBUTOR",
            Self::AuthorizedRepresentative => "AUTHORIZED_REPRESENTATIVE",
            Self::GpaiProvider => "GPAI_PROVIDER",
            Self::DownstreamProvider => "DOWNSTREAM_PROVIDER",
            Self::UnlistedRole => "UNLISTED_ROLE",
            Self::Prohibited => "PROHIBITED",
            Self::HighRisk => "HIGH_RISK",
            Self::LimitedRiskWithDerogation => "LIMITED_RISK_WITH_DEROGATION",
            Self::LimitedRiskTransparency => "LIMITED_RISK_TRANSPARENCY",
            Self::MinimalRisk => "MINIMAL_RISK",
            Self::OutOfCategory => "OUT_OF_CATEGORY",
            Self::GpaiSystemicRisk => "GPAI_SYSTEMIC_RISK",
            Self::GpaiStandard => "GPAI_STANDARD",
            Self::GpaiOpenSource => "GPAI_OPEN_SOURCE",
        }
    }

    /// The family of questionnaires producing this tag.
    pub fn family(&self) -> TagFamily {
        match self {
            Self::AiSystem | Self::NotAiSystem | Self::GpaiModel | Self::NotGpaiModel => {
                TagFamily::Definition
            }
            Self::OutOfScope
            | Self::SpecificRegime
            | Self::InScopeFull
            | Self::InScopeHeavy
            | Self::OpenSourceRegime => TagFamily::Applicability,
            Self::Provider
            | Self::RequalifiedProvider
            | Self::Deployer
            | Self::Importer
            | Self::Distributor
            | Self::AuthorizedRepresentative
            | Self::GpaiProvider
            | Self::DownstreamProvider
            | Self::UnlistedRole => TagFamily::Role,
            Self::Prohibited
            | Self::HighRisk
            | Self::LimitedRiskWithDerogation
            | Self::LimitedRiskTransparency
            | Self::MinimalRisk => TagFamily::Risk,
            Self::OutOfCategory
            | Self::GpaiSystemicRisk
            | Self::GpaiStandard
            | Self::GpaiOpenSource => TagFamily::ModelRisk,
        }
    }

    /// Whether this outcome discards every secondary obligation.
    ///
    /// A prohibited practice cannot be placed on the market, so no
    /// additional duty can co-occur with it.
    pub fn suppresses_secondary(&self) -> bool {
        matches!(self, Self::Prohibited)
    }
}

impl fmt::Display for PrimaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryTag {
    type Err = RiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RiaError::UnknownTag(s.to_string()))
    }
}

/// An additional duty flag that co-occurs with a primary tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecondaryObligation {
    /// At least one Art. 50 transparency case applies.
    TransparencyDuty,
    /// Inform people they are interacting with an AI system (Art. 50(1)).
    InteractionDisclosure,
    /// Mark synthetic audio, image, video or text as generated (Art. 50(2)).
    SyntheticContentMarking,
    /// Disclose deep fakes (Art. 50(4)).
    DeepfakeDisclosure,
    /// Inform exposed persons of emotion recognition or biometric
    /// categorisation (Art. 50(3)).
    EmotionRecognitionNotice,
    /// Document the Art. 6(3) assessment and register the system (Art. 6(4), 49(2)).
    DerogationAssessmentRecord,
    /// Put in place a copyright compliance policy (Art. 53(1)(c)).
    CopyrightPolicy,
    /// Publish a summary of training content (Art. 53(1)(d)).
    TrainingDataSummary,
    /// Maintain technical documentation for authorities and integrators (Art. 53(1)(a-b)).
    TechnicalDocumentation,
}

impl SecondaryObligation {
    /// Return all secondary obligations as a slice, in declaration order.
    pub fn all() -> &'static [SecondaryObligation] {
        &[
            Self::TransparencyDuty,
            Self::InteractionDisclosure,
            Self::SyntheticContentMarking,
            Self::DeepfakeDisclosure,
            Self::EmotionRecognitionNotice,
            Self::DerogationAssessmentRecord,
            Self::CopyrightPolicy,
            Self::TrainingDataSummary,
            Self::TechnicalDocumentation,
        ]
    }

    /// The canonical `SCREAMING_SNAKE_CASE` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransparencyDuty => "TRANSPARENCY_DUTY",
            Self::InteractionDisclosure => "INTERACTION_DISCLOSURE",
            Self::SyntheticContentMarking => "SYNTHETIC_CONTENT_MARKING",
            Self::DeepfakeDisclosure => "DEEPFAKE_DISCLOSURE",
            Self::EmotionRecognitionNotice => "EMOTION_RECOGNITION_NOTICE",
            Self::DerogationAssessmentRecord => "DEROGATION_ASSESSMENT_RECORD",
            Self::CopyrightPolicy => "COPYRIGHT_POLICY",
            Self::TrainingDataSummary => "TRAINING_DATA_SUMMARY",
            Self::TechnicalDocumentation => "TECHNICAL_DOCUMENTATION",
        }
    }
}

impl fmt::Display for SecondaryObligation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecondaryObligation {
    type Err = RiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| RiaError::UnknownTag(s.to_string()))
    }
}
