//! # `list` and `describe` Subcommands

use anyhow::{Context, Result};
use clap::Args;
use ria_engine::{DomainMode, Next, Questionnaire, QuestionKind};
use ria_questionnaires::QuestionnaireKind;

use crate::output::{render, OutputFormat};

/// Arguments of the `describe` subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Questionnaire to describe (e.g. risk_system).
    pub kind: QuestionnaireKind,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Build a questionnaire, attaching its kind to any error.
pub fn build(kind: QuestionnaireKind) -> Result<Questionnaire> {
    kind.build()
        .with_context(|| format!("questionnaire {kind} failed validation"))
}

/// Print every registered questionnaire.
pub fn run_list() -> Result<u8> {
    println!("Available questionnaires:");
    println!();
    for kind in QuestionnaireKind::all() {
        let q = build(*kind)?;
        println!(
            "  {:<24} {} ({} questions, {} rules)",
            kind.as_str(),
            q.title(),
            q.graph().len(),
            q.rules().len()
        );
    }
    Ok(0)
}

/// Print the definition of one questionnaire.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    let q = build(args.kind)?;
    if let Some(rendered) = render(&q, args.format)? {
        println!("{rendered}");
        return Ok(0);
    }
    print!("{}", describe_text(&q));
    Ok(0)
}

fn next_text(next: &Next) -> String {
    match next {
        Next::Terminal => "terminal".to_string(),
        Next::Continue(successors) => {
            let ids: Vec<&str> = successors.iter().map(|s| s.as_str()).collect();
            format!("-> {}", ids.join(" | "))
        }
    }
}

/// Human-readable outline of a questionnaire.
pub fn describe_text(q: &Questionnaire) -> String {
    let mut out = format!("{} ({})\n\n", q.title(), q.id());
    for question in q.graph().questions() {
        out.push_str(&format!("[{}] {}\n", question.id, question.prompt));
        match &question.kind {
            QuestionKind::Single { choices } => {
                for choice in choices {
                    out.push_str(&format!(
                        "    - {:<28} {}\n",
                        choice.value.as_str(),
                        next_text(&choice.next)
                    ));
                }
            }
            QuestionKind::Checklist {
                catalog,
                domains,
                on_qualifying,
                on_none,
            } => {
                if let DomainMode::Selectable { none_domain, .. } = domains {
                    out.push_str(&format!("    domains (none: {none_domain})\n"));
                }
                for domain in catalog.domains() {
                    let details: Vec<&str> = domain.details.iter().map(|d| d.id.as_str()).collect();
                    out.push_str(&format!("    * {}: {}\n", domain.id, details.join(", ")));
                }
                out.push_str(&format!(
                    "    qualifying {} / none {}\n",
                    next_text(on_qualifying),
                    next_text(on_none)
                ));
            }
        }
    }
    out.push_str("\nRules (first match wins):\n");
    for rule in q.rules().rules() {
        out.push_str(&format!("  {:<32} {:<14} {}\n", rule.id, rule.reference, rule.tag));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_outline_lists_questions_and_rules() {
        let q = build(QuestionnaireKind::RoleSystem).unwrap();
        let text = describe_text(&q);
        assert!(text.contains("[branding]"));
        assert!(text.contains("-> modification"));
        assert!(text.contains("REQUALIFIED_PROVIDER"));
    }

    #[test]
    fn checklist_outline_shows_domains() {
        let q = build(QuestionnaireKind::RiskSystem).unwrap();
        let text = describe_text(&q);
        assert!(text.contains("domains (none: annex_none)"));
        assert!(text.contains("* biometrics: remote_identification"));
    }
}
