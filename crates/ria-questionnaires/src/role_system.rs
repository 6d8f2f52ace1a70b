//! # Organisation Role for an AI System (Art. 3, 25)
//!
//! Four questions, each one able to settle the role:
//!
//! | Question | Settles |
//! |----------|---------|
//! | `branding` | Initial provider |
//! | `modification` | Provider by requalification (Art. 25(1)) |
//! | `professional_use` | Deployer |
//! | `supply_chain` | Importer, distributor or authorised representative |

use ria_core::{PrimaryTag, RiaError};
use ria_engine::{Choice, Condition, Next, Question, Questionnaire};

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    Questionnaire::builder("role_system", "What is my organisation's role for this AI system?")
        .question(
            Question::yes_no(
                "branding",
                "Did your organisation develop the system, or have it developed, to place it on the market or put it into service under its own name or trademark?",
                Next::Terminal,
                Next::to("modification"),
            )
            .help("Includes white labelling, in-house development for own use, and manufacturers of products embedding AI under their brand."),
        )
        .question(
            Question::single(
                "modification",
                "Have you performed one of these actions on an existing AI system supplied by a third party?",
                vec![
                    Choice::terminal(
                        "substantial_modification",
                        "Substantial modification of a high-risk AI system",
                    )
                    .annotated("A technical change not foreseen by the initial provider."),
                    Choice::terminal(
                        "purpose_change",
                        "Change of intended purpose that makes the system high-risk",
                    ),
                    Choice::terminal(
                        "rebranding",
                        "Putting your name or trademark on an existing high-risk AI system",
                    )
                    .annotated("Even without technical modification."),
                    Choice::then("none", "None of these actions", Next::to("professional_use")),
                ],
            )
            .visible_when(Condition::is("branding", "no")),
        )
        .question(
            Question::yes_no(
                "professional_use",
                "Do you use the AI system under your own authority in the course of your professional activities?",
                Next::Terminal,
                Next::to("supply_chain"),
            )
            .help("A purely personal, non-professional use does not make you a deployer.")
            .visible_when(Condition::is("modification", "none")),
        )
        .question(
            Question::single(
                "supply_chain",
                "What is your function in the distribution chain?",
                vec![
                    Choice::terminal(
                        "importer",
                        "Importer: established in the EU, placing on the EU market a system bearing the name of a non-EU person",
                    ),
                    Choice::terminal(
                        "distributor",
                        "Distributor: part of the supply chain, making a system available on the EU market",
                    ),
                    Choice::terminal(
                        "authorized_representative",
                        "Authorised representative: written mandate from a non-EU provider to carry out compliance tasks",
                    ),
                ],
            )
            .visible_when(Condition::is("professional_use", "no")),
        )
        .rule(
            "initial_provider",
            "Art. 3(3)",
            Condition::is("branding", "yes"),
            PrimaryTag::Provider,
        )
        .rule(
            "requalified_provider",
            "Art. 25(1)",
            Condition::any_of(
                "modification",
                ["substantial_modification", "purpose_change", "rebranding"],
            ),
            PrimaryTag::RequalifiedProvider,
        )
        .rule(
            "deployer",
            "Art. 3(4)",
            Condition::is("professional_use", "yes"),
            PrimaryTag::Deployer,
        )
        .rule(
            "importer",
            "Art. 3(6)",
            Condition::is("supply_chain", "importer"),
            PrimaryTag::Importer,
        )
        .rule(
            "distributor",
            "Art. 3(7)",
            Condition::is("supply_chain", "distributor"),
            PrimaryTag::Distributor,
        )
        .rule(
            "authorized_representative",
            "Art. 3(5)",
            Condition::is("supply_chain", "authorized_representative"),
            PrimaryTag::AuthorizedRepresentative,
        )
        .build()
}
