//! # Session Collaborators
//!
//! Answer observers and the obligations matrix, driven by real
//! questionnaires:
//! - Observers see every applied event in order, with shared snapshots
//! - A failing observer never blocks the session
//! - Risk and role results combine into one matrix key

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use ria_core::{PrimaryTag, SecondaryObligation};
use ria_engine::{
    AnswerObserver, MatrixKey, ObligationRef, ObligationsMatrix, ObserverError, Session,
    SessionSnapshot,
};
use ria_questionnaires::QuestionnaireKind;

#[derive(Default)]
struct Journal {
    entries: Mutex<Vec<SessionSnapshot>>,
}

impl AnswerObserver for Journal {
    fn observe(&self, snapshot: &SessionSnapshot) -> Result<(), ObserverError> {
        self.entries.lock().unwrap().push(snapshot.clone());
        Ok(())
    }
}

struct Offline;

impl AnswerObserver for Offline {
    fn observe(&self, _: &SessionSnapshot) -> Result<(), ObserverError> {
        Err(ObserverError::Rejected("store offline".into()))
    }
}

/// A tiny matrix keyed on risk tier and role.
struct StaticMatrix {
    entries: BTreeMap<(PrimaryTag, Option<PrimaryTag>), Vec<&'static str>>,
}

impl StaticMatrix {
    fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            (PrimaryTag::HighRisk, Some(PrimaryTag::Provider)),
            vec!["Art. 9", "Art. 16"],
        );
        entries.insert(
            (PrimaryTag::HighRisk, Some(PrimaryTag::Deployer)),
            vec!["Art. 26"],
        );
        entries.insert((PrimaryTag::HighRisk, None), vec!["Art. 6"]);
        Self { entries }
    }
}

impl ObligationsMatrix for StaticMatrix {
    fn lookup(&self, key: &MatrixKey) -> Vec<ObligationRef> {
        let mut out: Vec<ObligationRef> = self
            .entries
            .get(&(key.primary, key.role))
            .into_iter()
            .flatten()
            .map(|article| ObligationRef {
                article: article.to_string(),
                summary: format!("{} duty", key.primary),
            })
            .collect();
        if key.secondary.contains(&SecondaryObligation::TransparencyDuty) {
            out.push(ObligationRef {
                article: "Art. 50".into(),
                summary: "transparency".into(),
            });
        }
        out
    }
}

fn session(kind: QuestionnaireKind) -> Session {
    Session::new(Arc::new(kind.build().unwrap()))
}

fn high_risk_session() -> Session {
    let mut s = session(QuestionnaireKind::RiskSystem);
    s.answer("prohibited", "none");
    s.answer("safety_component", "none");
    s.toggle_domain("annex", "essential_services");
    s.toggle_detail("essential_services", "creditworthiness");
    s.answer("derogation_profiling", "yes");
    s.toggle_detail("transparency_cases", "transparency_none");
    s
}

// ---------------------------------------------------------------------------
// 1. Observers
// ---------------------------------------------------------------------------

#[test]
fn observer_follows_a_whole_run() {
    let journal = Arc::new(Journal::default());
    let mut s = session(QuestionnaireKind::RoleSystem)
        .with_observer(Arc::new(Offline))
        .with_observer(journal.clone());

    s.answer("branding", "no");
    s.answer("supply_chain", "importer"); // not reachable yet
    s.toggle_expanded("branding");
    s.answer("modification", "none");
    s.answer("professional_use", "yes");
    s.answer("professional_use", "yes");

    let entries = journal.entries.lock().unwrap();
    let sequences: Vec<u64> = entries.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    assert!(entries.iter().all(|e| e.session == s.id()));
    assert!(entries.iter().all(|e| e.questionnaire == "role_system"));
    assert!(entries[1].result.is_none());
    assert_eq!(
        entries[2].result.as_ref().map(|r| r.primary),
        Some(PrimaryTag::Deployer)
    );
    // The last snapshot is the session's own state.
    assert!(Arc::ptr_eq(&entries[2].answers, &s.snapshot()));
}

#[test]
fn snapshots_survive_reset() {
    let journal = Arc::new(Journal::default());
    let mut s = session(QuestionnaireKind::RoleModel).with_observer(journal.clone());
    s.answer("model_provider", "yes");
    s.reset();

    let entries = journal.entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].answers.len(), 1);
    assert!(entries[1].answers.is_empty());
    assert!(s.state().is_empty());
}

// ---------------------------------------------------------------------------
// 2. Obligations matrix
// ---------------------------------------------------------------------------

#[test]
fn risk_and_role_combine_into_matrix_key() {
    let mut risk = high_risk_session();
    risk.toggle_detail("transparency_cases", "interaction");
    let classification = risk.result().unwrap();

    let mut role = session(QuestionnaireKind::RoleSystem);
    role.answer("branding", "yes");
    let role_result = role.result().unwrap();

    let key = MatrixKey::new(&classification, Some(&role_result));
    assert_eq!(key.primary, PrimaryTag::HighRisk);
    assert_eq!(key.role, Some(PrimaryTag::Provider));

    let matrix = StaticMatrix::new();
    let articles: Vec<String> = matrix.lookup(&key).into_iter().map(|o| o.article).collect();
    assert_eq!(articles, vec!["Art. 9", "Art. 16", "Art. 50"]);
}

#[test]
fn non_role_result_is_left_out_of_key() {
    let classification = high_risk_session().result().unwrap();

    let mut scope = session(QuestionnaireKind::Applicability);
    scope.answer("object_type", "system");
    scope.answer("market_link", "none");
    let scope_result = scope.result().unwrap();
    assert_eq!(scope_result.primary, PrimaryTag::OutOfScope);

    let key = MatrixKey::new(&classification, Some(&scope_result));
    assert_eq!(key.role, None);
    let articles: Vec<String> = StaticMatrix::new()
        .lookup(&key)
        .into_iter()
        .map(|o| o.article)
        .collect();
    assert_eq!(articles, vec!["Art. 6"]);
}
