//! # Risk Category of a General-Purpose AI Model (Art. 51, 53)
//!
//! Systemic risk is reached either through the training compute threshold
//! (presumption of high-impact capabilities) or through a Commission
//! designation. Models below both are classified by their licence.
//!
//! The compute question is categorical. Its choices are declared in
//! ascending order, so the threshold rule is an ordinal
//! [`Condition::at_least`] comparison rather than a numeric one.
//!
//! Secondary obligations follow Art. 53(1): copyright policy and training
//! data summary for every general-purpose model, technical documentation
//! unless the open-source exemption of Art. 53(2) applies.

use ria_core::{PrimaryTag, RiaError, SecondaryObligation};
use ria_engine::{Choice, Condition, Next, Question, Questionnaire};

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    let general_purpose = Condition::is("qualification", "general_purpose");

    Questionnaire::builder("risk_model", "What is the risk category of this AI model?")
        .question(
            Question::single(
                "qualification",
                "Does the model display significant generality?",
                vec![
                    Choice::terminal(
                        "narrow",
                        "Narrow AI: specialised for a single task or a very restricted domain",
                    ),
                    Choice::then(
                        "general_purpose",
                        "General-purpose AI model: versatile, usable for many tasks or integrable into various downstream systems",
                        Next::to("training_compute"),
                    ),
                ],
            )
            .help("Can it competently perform a wide range of distinct tasks (text, code, translation, summarisation), or is it built for one task such as fraud detection?"),
        )
        .question(
            Question::single(
                "training_compute",
                "What is the cumulative amount of compute used to train the model?",
                vec![
                    Choice::then(
                        "below_1e25",
                        "Less than 10^25 floating-point operations",
                        Next::to("designation"),
                    ),
                    Choice::terminal("above_1e25", "More than 10^25 floating-point operations"),
                ],
            )
            .help("The threshold targets the most capable models on the market.")
            .visible_when(general_purpose.clone()),
        )
        .question(
            Question::yes_no(
                "designation",
                "Has the model been designated by the European Commission, or does it have equivalent high-impact capabilities?",
                Next::Terminal,
                Next::to("licence"),
            )
            .help("Criteria include parameter count, data quality, market impact and reach (for example more than 10,000 registered business users in the EU).")
            .visible_when(Condition::is("training_compute", "below_1e25")),
        )
        .question(
            Question::single(
                "licence",
                "Is the model made available under a free and open licence?",
                vec![
                    Choice::terminal("open", "Yes, free and open licence")
                        .annotated("Access, use, modification and redistribution, including the weights."),
                    Choice::terminal("proprietary", "No, proprietary or closed model"),
                ],
            )
            .visible_when(Condition::is("designation", "no")),
        )
        .rule(
            "narrow_model",
            "Art. 3(63)",
            Condition::is("qualification", "narrow"),
            PrimaryTag::OutOfCategory,
        )
        .rule(
            "compute_threshold",
            "Art. 51(2)",
            Condition::at_least("training_compute", "above_1e25"),
            PrimaryTag::GpaiSystemicRisk,
        )
        .rule(
            "commission_designation",
            "Art. 51(1)(b)",
            Condition::is("designation", "yes"),
            PrimaryTag::GpaiSystemicRisk,
        )
        .rule(
            "open_licence",
            "Art. 53(2)",
            Condition::is("licence", "open"),
            PrimaryTag::GpaiOpenSource,
        )
        .rule(
            "proprietary",
            "Art. 53(1)",
            Condition::is("licence", "proprietary"),
            PrimaryTag::GpaiStandard,
        )
        .obligation(general_purpose.clone(), SecondaryObligation::CopyrightPolicy)
        .obligation(general_purpose.clone(), SecondaryObligation::TrainingDataSummary)
        .obligation(
            Condition::all([
                general_purpose,
                Condition::negate(Condition::is("licence", "open")),
            ]),
            SecondaryObligation::TechnicalDocumentation,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ria_engine::Session;

    use super::*;

    fn session() -> Session {
        Session::new(Arc::new(questionnaire().unwrap()))
    }

    #[test]
    fn narrow_model_has_no_obligations() {
        let mut s = session();
        s.answer("qualification", "narrow");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::OutOfCategory);
        assert!(r.secondary.is_empty());
    }

    #[test]
    fn compute_above_threshold_is_systemic() {
        let mut s = session();
        s.answer("qualification", "general_purpose");
        s.answer("training_compute", "above_1e25");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::GpaiSystemicRisk);
        assert_eq!(r.rule, "compute_threshold");
        assert!(r.has(SecondaryObligation::TechnicalDocumentation));
    }

    #[test]
    fn below_threshold_asks_designation() {
        let mut s = session();
        s.answer("qualification", "general_purpose");
        s.answer("training_compute", "below_1e25");
        assert!(!s.is_complete());
        s.answer("designation", "yes");
        assert_eq!(s.result().unwrap().rule, "commission_designation");
    }

    #[test]
    fn open_licence_keeps_copyright_duties() {
        let mut s = session();
        s.answer("qualification", "general_purpose");
        s.answer("training_compute", "below_1e25");
        s.answer("designation", "no");
        s.answer("licence", "open");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::GpaiOpenSource);
        assert!(r.has(SecondaryObligation::CopyrightPolicy));
        assert!(r.has(SecondaryObligation::TrainingDataSummary));
        assert!(!r.has(SecondaryObligation::TechnicalDocumentation));

        s.answer("licence", "proprietary");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::GpaiStandard);
        assert!(r.has(SecondaryObligation::TechnicalDocumentation));
    }
}
