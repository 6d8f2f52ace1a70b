//! # CLI Event Scripts
//!
//! Writes event scripts to disk, loads them through the CLI loader and
//! replays them against fresh sessions.

use std::io::Write;
use std::sync::Arc;

use ria_cli::evaluate::{replay, report_text};
use ria_cli::output::{render, OutputFormat};
use ria_cli::script::load_script;
use ria_core::{PrimaryTag, SecondaryObligation};
use ria_engine::{EventOutcome, Session};
use ria_questionnaires::QuestionnaireKind;

fn write_script(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp script");
    file.write_all(contents.as_bytes()).expect("write temp script");
    file
}

fn session(kind: QuestionnaireKind) -> Session {
    Session::new(Arc::new(kind.build().unwrap()))
}

const HIGH_RISK_YAML: &str = r#"
- type: answer
  question: prohibited
  value: none
- type: answer
  question: safety_component
  value: none
- type: toggle_domain
  question: annex
  domain: employment
- type: toggle_detail
  domain: employment
  detail: recruitment
- type: answer
  question: derogation_profiling
  value: "yes"
- type: toggle_detail
  domain: transparency_cases
  detail: synthetic_content
"#;

#[test]
fn yaml_script_replays_to_high_risk() {
    let file = write_script(".yaml", HIGH_RISK_YAML);
    let events = load_script(file.path()).unwrap();
    assert_eq!(events.len(), 6);

    let mut s = session(QuestionnaireKind::RiskSystem);
    let report = replay(&mut s, events);
    assert!(report.steps.iter().all(|step| step.outcome.is_applied()));
    assert!(report.complete);
    let result = report.result.as_ref().unwrap();
    assert_eq!(result.primary, PrimaryTag::HighRisk);
    assert!(result.has(SecondaryObligation::TransparencyDuty));
    assert_eq!(report.questionnaire, "risk_system");

    let text = report_text(&report);
    assert!(text.contains("HIGH_RISK"));
    assert!(text.contains("TRANSPARENCY_DUTY"));
}

#[test]
fn json_script_reports_ignored_steps() {
    let json = r#"[
        {"type": "answer", "question": "licence", "value": "open"},
        {"type": "answer", "question": "qualification", "value": "general_purpose"},
        {"type": "answer", "question": "training_compute", "value": "below_1e25"},
        {"type": "answer", "question": "designation", "value": "no"},
        {"type": "answer", "question": "licence", "value": "open"},
        {"type": "answer", "question": "licence", "value": "open"}
    ]"#;
    let file = write_script(".json", json);
    let events = load_script(file.path()).unwrap();

    let mut s = session(QuestionnaireKind::RiskModel);
    let report = replay(&mut s, events);
    assert!(report.steps[0].outcome.is_ignored());
    assert_eq!(report.steps[4].outcome, EventOutcome::Applied);
    assert_eq!(report.steps[5].outcome, EventOutcome::Unchanged);
    let result = report.result.unwrap();
    assert_eq!(result.primary, PrimaryTag::GpaiOpenSource);
    assert!(result.has(SecondaryObligation::CopyrightPolicy));
    assert!(!result.has(SecondaryObligation::TechnicalDocumentation));
}

#[test]
fn incomplete_script_renders_as_json() {
    let file = write_script(".yml", "- type: answer\n  question: branding\n  value: 'no'\n");
    let events = load_script(file.path()).unwrap();
    let mut s = session(QuestionnaireKind::RoleSystem);
    let report = replay(&mut s, events);
    assert!(!report.complete);

    let rendered = render(&report, OutputFormat::Json).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["complete"], false);
    assert!(value["result"].is_null());
    assert_eq!(value["steps"][0]["outcome"]["outcome"], "applied");
    assert_eq!(value["reachable"], serde_json::json!(["branding", "modification"]));
}

#[test]
fn malformed_script_is_rejected() {
    let file = write_script(".yaml", "- type: answer\n  question: branding\n");
    let err = load_script(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse YAML script"));
}
