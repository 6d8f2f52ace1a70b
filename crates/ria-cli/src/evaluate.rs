//! # `evaluate` Subcommand
//!
//! Replays an event script against a fresh session and prints what a
//! rendering layer would show afterwards: the outcome of every event, the
//! reachable questions, completion and the classification.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use ria_core::QuestionId;
use ria_engine::{ClassificationResult, Event, EventOutcome, Presentation, Session};
use ria_questionnaires::QuestionnaireKind;
use serde::Serialize;

use crate::output::{render, OutputFormat};
use crate::questionnaire::build;
use crate::script::load_script;

/// Arguments of the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Questionnaire to run (e.g. risk_system).
    pub kind: QuestionnaireKind,

    /// Event script (YAML, or JSON with a .json extension).
    #[arg(long)]
    pub script: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit with status 2 when the script leaves the result indeterminate.
    #[arg(long)]
    pub require_complete: bool,
}

/// Outcome of one scripted event.
#[derive(Debug, Serialize)]
pub struct StepReport {
    /// Position in the script, starting at 1.
    pub step: usize,
    /// The event.
    pub event: Event,
    /// What it did.
    pub outcome: EventOutcome,
}

/// Final state after a script.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    /// Questionnaire identifier.
    pub questionnaire: String,
    /// Per-event outcomes.
    pub steps: Vec<StepReport>,
    /// Reachable questions, in declared order.
    pub reachable: Vec<QuestionId>,
    /// Whether a classification is available.
    pub complete: bool,
    /// The classification, if any.
    pub result: Option<ClassificationResult>,
    /// Unlocked and expanded questions.
    pub presentation: Presentation,
}

/// Run `events` through a new session.
pub fn replay(session: &mut Session, events: Vec<Event>) -> EvaluationReport {
    let steps = events
        .into_iter()
        .enumerate()
        .map(|(i, event)| {
            let outcome = session.apply(&event);
            StepReport {
                step: i + 1,
                event,
                outcome,
            }
        })
        .collect();
    EvaluationReport {
        questionnaire: session.questionnaire().id().to_string(),
        steps,
        reachable: session
            .reachable_questions()
            .into_iter()
            .map(|q| q.id.clone())
            .collect(),
        complete: session.is_complete(),
        result: session.result(),
        presentation: session.presentation(),
    }
}

/// Human-readable summary of a report.
pub fn report_text(report: &EvaluationReport) -> String {
    let mut out = format!("questionnaire: {}\n\n", report.questionnaire);
    for step in &report.steps {
        let outcome = match &step.outcome {
            EventOutcome::Applied => "applied".to_string(),
            EventOutcome::Unchanged => "unchanged".to_string(),
            EventOutcome::Ignored { reason } => format!("ignored ({reason})"),
        };
        out.push_str(&format!("  {:>3}. {:?}: {}\n", step.step, step.event, outcome));
    }
    out.push_str("\nquestions:\n");
    for view in &report.presentation.questions {
        out.push_str(&format!(
            "  {} {:<28}{}\n",
            if view.answered { "[x]" } else { "[ ]" },
            view.id.as_str(),
            if view.expanded { " (open)" } else { "" }
        ));
    }
    out.push('\n');
    match &report.result {
        Some(result) => {
            out.push_str(&format!(
                "result:    {} ({}, rule {})\n",
                result.primary, result.reference, result.rule
            ));
            if !result.secondary.is_empty() {
                let flags: Vec<&str> = result.secondary.iter().map(|f| f.as_str()).collect();
                out.push_str(&format!("secondary: {}\n", flags.join(", ")));
            }
        }
        None => out.push_str("result:    indeterminate (more answers needed)\n"),
    }
    out
}

/// Execute the `evaluate` subcommand.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let questionnaire = Arc::new(build(args.kind)?);
    let events = load_script(&args.script)?;
    let mut session = Session::new(questionnaire);
    tracing::info!(session = %session.id(), questionnaire = %args.kind, events = events.len(), "replaying script");

    let report = replay(&mut session, events);
    match render(&report, args.format)? {
        Some(rendered) => println!("{rendered}"),
        None => print!("{}", report_text(&report)),
    }

    if args.require_complete && !report.complete {
        return Ok(2);
    }
    Ok(0)
}
