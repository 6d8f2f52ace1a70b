//! # Collaborator Interfaces
//!
//! The engine's outward seams. Implementations live outside the pure core:
//!
//! - [`AnswerObserver`]: a read-only, fire-and-forget consumer of answer
//!   snapshots (analytics logging in a web front end). It receives a shared
//!   immutable snapshot and cannot write back into the session. Its outcome
//!   is logged, never returned to the caller and never awaited.
//!
//! - [`ObligationsMatrix`]: the downstream lookup from a classification to
//!   the concrete obligations that follow from it, keyed by
//!   `(primary tag, role, secondary flags)`. Its content is out of scope;
//!   only the key and the trait are defined here.

use std::collections::BTreeSet;
use std::sync::Arc;

use ria_core::{PrimaryTag, SecondaryObligation, TagFamily};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::answer::AnswerState;
use crate::derivation::ClassificationResult;
use crate::session::SessionId;

// ---------------------------------------------------------------------------
// Answer observers
// ---------------------------------------------------------------------------

/// What an observer sees after each applied event.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Session the snapshot belongs to. Correlation only.
    pub session: SessionId,
    /// Questionnaire identifier.
    pub questionnaire: String,
    /// Number of applied events so far, starting at 1.
    pub sequence: u64,
    /// The answers after the event. Shared, never mutated.
    pub answers: Arc<AnswerState>,
    /// The classification after the event, if determinate.
    pub result: Option<ClassificationResult>,
}

/// An observer could not process a snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// The observer refused or failed to record the snapshot.
    #[error("observer rejected snapshot: {0}")]
    Rejected(String),
}

/// Read-only consumer of answer snapshots.
pub trait AnswerObserver: Send + Sync {
    /// Called once per applied event, after the new state is in place.
    ///
    /// Errors are logged by the session and dropped.
    fn observe(&self, snapshot: &SessionSnapshot) -> Result<(), ObserverError>;
}

// ---------------------------------------------------------------------------
// Obligations matrix
// ---------------------------------------------------------------------------

/// Lookup key of the obligations matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatrixKey {
    /// Primary tag of the classification (usually a risk tier).
    pub primary: PrimaryTag,
    /// Role of the organisation, when known.
    pub role: Option<PrimaryTag>,
    /// Secondary flags of the classification.
    pub secondary: BTreeSet<SecondaryObligation>,
}

impl MatrixKey {
    /// Build a key from a classification and an optional role result.
    ///
    /// A `role` result whose tag is not a role (for example a scope
    /// result passed by mistake) is left out of the key.
    pub fn new(classification: &ClassificationResult, role: Option<&ClassificationResult>) -> Self {
        Self {
            primary: classification.primary,
            role: role
                .map(|r| r.primary)
                .filter(|tag| tag.family() == TagFamily::Role),
            secondary: classification.secondary.clone(),
        }
    }
}

/// One obligation returned by the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationRef {
    /// Legal reference (e.g. "Art. 26").
    pub article: String,
    /// Short description.
    pub summary: String,
}

/// Downstream lookup from a classification to obligations.
pub trait ObligationsMatrix {
    /// Obligations applying to `key`, in the matrix's own order.
    fn lookup(&self, key: &MatrixKey) -> Vec<ObligationRef>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    struct FixedMatrix {
        entries: BTreeMap<(PrimaryTag, Option<PrimaryTag>), Vec<ObligationRef>>,
    }

    impl ObligationsMatrix for FixedMatrix {
        fn lookup(&self, key: &MatrixKey) -> Vec<ObligationRef> {
            let mut found = self
                .entries
                .get(&(key.primary, key.role))
                .cloned()
                .unwrap_or_default();
            if key.secondary.contains(&SecondaryObligation::TransparencyDuty) {
                found.push(ObligationRef {
                    article: "Art. 50".into(),
                    summary: "Transparency obligations".into(),
                });
            }
            found
        }
    }

    fn result(primary: PrimaryTag, secondary: &[SecondaryObligation]) -> ClassificationResult {
        ClassificationResult {
            questionnaire: "test".into(),
            primary,
            secondary: secondary.iter().copied().collect(),
            rule: "r".into(),
            reference: "-".into(),
        }
    }

    #[test]
    fn key_combines_risk_and_role() {
        let risk = result(PrimaryTag::HighRisk, &[SecondaryObligation::TransparencyDuty]);
        let role = result(PrimaryTag::Deployer, &[]);
        let key = MatrixKey::new(&risk, Some(&role));
        assert_eq!(key.primary, PrimaryTag::HighRisk);
        assert_eq!(key.role, Some(PrimaryTag::Deployer));
        assert_eq!(key.secondary.len(), 1);
    }

    #[test]
    fn non_role_result_is_dropped() {
        let risk = result(PrimaryTag::MinimalRisk, &[]);
        let scope = result(PrimaryTag::InScopeFull, &[]);
        assert_eq!(MatrixKey::new(&risk, Some(&scope)).role, None);
    }

    #[test]
    fn matrix_lookup_through_trait_object() {
        let mut entries = BTreeMap::new();
        entries.insert(
            (PrimaryTag::HighRisk, Some(PrimaryTag::Deployer)),
            vec![ObligationRef {
                article: "Art. 26".into(),
                summary: "Deployer obligations".into(),
            }],
        );
        let matrix: Box<dyn ObligationsMatrix> = Box::new(FixedMatrix { entries });
        let risk = result(PrimaryTag::HighRisk, &[SecondaryObligation::TransparencyDuty]);
        let role = result(PrimaryTag::Deployer, &[]);
        let found = matrix.lookup(&MatrixKey::new(&risk, Some(&role)));
        let articles: Vec<_> = found.iter().map(|o| o.article.as_str()).collect();
        assert_eq!(articles, vec!["Art. 26", "Art. 50"]);
    }

    #[test]
    fn observer_error_display() {
        let err = ObserverError::Rejected("queue full".into());
        assert_eq!(err.to_string(), "observer rejected snapshot: queue full");
    }
}
