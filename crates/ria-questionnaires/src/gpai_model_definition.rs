//! # General-Purpose AI Model Definition (Art. 3(63))

use ria_core::{PrimaryTag, RiaError};
use ria_engine::{Condition, Next, Question, Questionnaire};

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    Questionnaire::builder("gpai_model_definition", "Is it a general-purpose AI model?")
        .question(
            Question::yes_no(
                "distinct_tasks",
                "Does the model display significant generality and competently perform a wide range of distinct tasks?",
                Next::to("downstream_integration"),
                Next::to("downstream_integration"),
            )
            .help("Models trained with a large amount of data using self-supervision at scale usually qualify."),
        )
        .question(Question::yes_no(
            "downstream_integration",
            "Can it be integrated into a variety of downstream systems or applications?",
            Next::Terminal,
            Next::Terminal,
        ))
        .rule(
            "definition_met",
            "Art. 3(63)",
            Condition::all([
                Condition::is("distinct_tasks", "yes"),
                Condition::is("downstream_integration", "yes"),
            ]),
            PrimaryTag::GpaiModel,
        )
        .rule(
            "definition_not_met",
            "Art. 3(63)",
            Condition::all([
                Condition::answered("distinct_tasks"),
                Condition::answered("downstream_integration"),
            ]),
            PrimaryTag::NotGpaiModel,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use ria_engine::{Answer, AnswerState};

    use super::*;

    fn state(tasks: &str, integration: &str) -> AnswerState {
        AnswerState::new()
            .with_answer("distinct_tasks".into(), Answer::Choice { value: tasks.into() })
            .with_answer(
                "downstream_integration".into(),
                Answer::Choice {
                    value: integration.into(),
                },
            )
    }

    #[test]
    fn both_yes_is_gpai_model() {
        let q = questionnaire().unwrap();
        let r = q.derive_result(&state("yes", "yes")).unwrap();
        assert_eq!(r.primary, PrimaryTag::GpaiModel);
        assert_eq!(r.reference, "Art. 3(63)");
    }

    #[test]
    fn one_no_is_not_gpai_model() {
        let q = questionnaire().unwrap();
        assert_eq!(
            q.derive_result(&state("yes", "no")).map(|r| r.primary),
            Some(PrimaryTag::NotGpaiModel)
        );
        assert_eq!(
            q.derive_result(&state("no", "yes")).map(|r| r.primary),
            Some(PrimaryTag::NotGpaiModel)
        );
    }

    #[test]
    fn single_answer_is_indeterminate() {
        let q = questionnaire().unwrap();
        let s = AnswerState::new().with_answer("distinct_tasks".into(), Answer::Choice { value: "no".into() });
        assert!(!q.is_complete(&s));
    }
}
