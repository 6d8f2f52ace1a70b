//! # AI System Definition (Art. 3(1))
//!
//! Six yes/no questions, one per element of the legal definition, asked in
//! order: only the first is open at the start and each answer opens the
//! next.
//!
//! | Question | Element | Required |
//! |----------|---------|----------|
//! | `machine_based` | Machine-based system | yes |
//! | `autonomy` | Varying levels of autonomy | yes |
//! | `adaptiveness` | Adaptiveness after deployment | no ("may exhibit") |
//! | `inference` | Infers how to generate outputs | yes |
//! | `outputs` | Generates outputs | yes |
//! | `influence` | Outputs influence environments | yes |
//!
//! The result needs all six answers, including adaptiveness, so the user
//! always sees the whole definition before a verdict.

use ria_core::{PrimaryTag, RiaError};
use ria_engine::{Condition, Next, Question, Questionnaire};

/// Question identifiers in declared order.
pub const QUESTIONS: [&str; 6] = [
    "machine_based",
    "autonomy",
    "adaptiveness",
    "inference",
    "outputs",
    "influence",
];

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    let required = ["machine_based", "autonomy", "inference", "outputs", "influence"];

    Questionnaire::builder("ai_system_definition", "Is it an AI system?")
        .question(Question::yes_no(
            "machine_based",
            "Is the system machine-based?",
            Next::to("autonomy"),
            Next::to("autonomy"),
        ))
        .question(Question::yes_no(
            "autonomy",
            "Is it designed to operate with varying levels of autonomy?",
            Next::to("adaptiveness"),
            Next::to("adaptiveness"),
        ))
        .question(
            Question::yes_no(
                "adaptiveness",
                "Can it exhibit adaptiveness after deployment?",
                Next::to("inference"),
                Next::to("inference"),
            )
            .help("Adaptiveness is optional in the definition: the system \"may\" exhibit it."),
        )
        .question(Question::yes_no(
            "inference",
            "Does it infer, from the input it receives, how to generate outputs?",
            Next::to("outputs"),
            Next::to("outputs"),
        ))
        .question(
            Question::yes_no(
                "outputs",
                "Does it generate outputs?",
                Next::to("influence"),
                Next::to("influence"),
            )
            .help("Predictions, content, recommendations or decisions."),
        )
        .question(Question::yes_no(
            "influence",
            "Can these outputs influence physical or virtual environments?",
            Next::Terminal,
            Next::Terminal,
        ))
        .rule(
            "definition_met",
            "Art. 3(1)",
            Condition::all(
                required
                    .iter()
                    .map(|q| Condition::is(*q, "yes"))
                    .chain([Condition::answered("adaptiveness")]),
            ),
            PrimaryTag::AiSystem,
        )
        .rule(
            "definition_not_met",
            "Art. 3(1)",
            Condition::all(QUESTIONS.iter().map(|q| Condition::answered(*q))),
            PrimaryTag::NotAiSystem,
        )
        .build()
}
