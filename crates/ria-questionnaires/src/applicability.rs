//! # Applicability (Art. 2)
//!
//! Decides whether the regulation applies at all, and under which regime.
//! The flow walks through the exclusions of Art. 2 in the order the article
//! lists them; the first exclusion that applies ends the questionnaire.
//!
//! ```text
//! object_type ─▶ market_link ─▶ military ─▶ authority ─▶ stage
//!                                                         │ finished product
//!                                    deployer ┌───────────┴───────────┐ otherwise
//!                                             ▼                       ▼
//!                                        personal_use ──────────▶ open_source
//!                                                                     │ yes
//!                                                     system ┌────────┴────────┐ model
//!                                                            ▼                 ▼
//!                                                   system_exception    model_exception
//! ```

use ria_core::{PrimaryTag, RiaError};
use ria_engine::{Choice, Condition, Next, Question, Questionnaire};

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    Questionnaire::builder("applicability", "Does the AI Act apply?")
        .question(Question::single(
            "object_type",
            "What kind of AI solution is it?",
            vec![
                Choice::then("system", "An AI system", Next::to("market_link")),
                Choice::then("model", "A general-purpose AI model", Next::to("market_link")),
            ],
        ))
        .question(
            Question::single(
                "market_link",
                "Which sentence best describes your link with the AI and the EU market?",
                vec![
                    Choice::then(
                        "provider",
                        "I develop, have developed or supply this AI under my own name or trademark in the EU",
                        Next::to("military"),
                    )
                    .annotated("Includes product manufacturers, importers and distributors."),
                    Choice::then(
                        "deployer",
                        "I am located in the EU and use this AI under my authority for my professional activity",
                        Next::to("military"),
                    ),
                    Choice::then(
                        "third_country_output",
                        "I am outside the EU and do not sell the AI there, but its outputs are used in the EU",
                        Next::to("military"),
                    ),
                    Choice::terminal("none", "None of these situations"),
                ],
            )
            .help("Establishes the link with the EU market and the legal role (provider or deployer)."),
        )
        .question(
            Question::yes_no(
                "military",
                "Is the AI placed on the market or used exclusively for military, defence or national security purposes?",
                Next::Terminal,
                Next::to("authority"),
            )
            .help("Answer no for mixed civil and military use.")
            .visible_when(Condition::any_of(
                "market_link",
                ["provider", "deployer", "third_country_output"],
            )),
        )
        .question(
            Question::single(
                "authority",
                "Which kind of entity uses the system?",
                vec![
                    Choice::terminal(
                        "third_country_public",
                        "A public authority of a third country or an international organisation acting under an international agreement with the EU",
                    ),
                    Choice::then(
                        "eu_or_private",
                        "A private company, a public authority of a Member State or an EU institution",
                        Next::to("stage"),
                    ),
                ],
            )
            .visible_when(Condition::is("military", "no")),
        )
        .question(
            Question::single(
                "stage",
                "What is the current stage and purpose of the AI?",
                vec![
                    Choice::terminal(
                        "scientific_rd",
                        "Purely scientific research and development",
                    ),
                    Choice::terminal(
                        "confined_testing",
                        "Product-oriented R&D, confined testing before placing on the market",
                    ),
                    Choice::terminal(
                        "real_world_testing",
                        "Product-oriented R&D, testing in real-world conditions",
                    ),
                    Choice::then(
                        "finished_product",
                        "Finished product, operational or placed on the market",
                        Next::Continue(vec!["personal_use".into(), "open_source".into()]),
                    ),
                ],
            )
            .visible_when(Condition::is("authority", "eu_or_private")),
        )
        .question(
            Question::single(
                "personal_use",
                "In which context do you use this AI system?",
                vec![
                    Choice::terminal(
                        "personal",
                        "Purely personal, non-professional activity",
                    ),
                    Choice::then(
                        "professional",
                        "Professional, commercial or institutional use",
                        Next::to("open_source"),
                    ),
                ],
            )
            .help("Only asked to deployers.")
            .visible_when(Condition::all([
                Condition::is("stage", "finished_product"),
                Condition::is("market_link", "deployer"),
            ])),
        )
        .question(
            Question::yes_no(
                "open_source",
                "Is the AI released under a free and open-source licence, without monetisation?",
                Next::Continue(vec!["system_exception".into(), "model_exception".into()]),
                Next::Terminal,
            )
            .help("Supply against payment, or use of personal data beyond security and interoperability, rules out the exemption.")
            .visible_when(Condition::any([
                Condition::all([
                    Condition::is("stage", "finished_product"),
                    Condition::negate(Condition::is("market_link", "deployer")),
                ]),
                Condition::is("personal_use", "professional"),
            ])),
        )
        .question(
            Question::single(
                "system_exception",
                "Despite the open-source licence, does the system fall under one of these cases?",
                vec![
                    Choice::terminal(
                        "regulated_system",
                        "High-risk system (Art. 6), prohibited system (Art. 5) or system with transparency duties (Art. 50)",
                    ),
                    Choice::terminal("none", "None of these cases"),
                ],
            )
            .visible_when(Condition::all([
                Condition::is("open_source", "yes"),
                Condition::is("object_type", "system"),
            ])),
        )
        .question(
            Question::single(
                "model_exception",
                "Despite the open-source licence, does the model fall under one of these cases?",
                vec![
                    Choice::terminal(
                        "systemic_risk",
                        "General-purpose AI model with systemic risk (Art. 51)",
                    ),
                    Choice::terminal(
                        "no_systemic_risk",
                        "General-purpose AI model without systemic risk",
                    ),
                ],
            )
            .visible_when(Condition::all([
                Condition::is("open_source", "yes"),
                Condition::is("object_type", "model"),
            ])),
        )
        // ── Exclusions, in the order of Art. 2 ──────────────────────────────
        .rule(
            "no_market_link",
            "Art. 2(1)",
            Condition::is("market_link", "none"),
            PrimaryTag::OutOfScope,
        )
        .rule(
            "military",
            "Art. 2(3)",
            Condition::is("military", "yes"),
            PrimaryTag::OutOfScope,
        )
        .rule(
            "third_country_authority",
            "Art. 2(4)",
            Condition::is("authority", "third_country_public"),
            PrimaryTag::OutOfScope,
        )
        .rule(
            "scientific_research",
            "Art. 2(6)",
            Condition::is("stage", "scientific_rd"),
            PrimaryTag::OutOfScope,
        )
        .rule(
            "confined_testing",
            "Art. 2(8)",
            Condition::is("stage", "confined_testing"),
            PrimaryTag::OutOfScope,
        )
        .rule(
            "real_world_testing",
            "Art. 60",
            Condition::is("stage", "real_world_testing"),
            PrimaryTag::SpecificRegime,
        )
        .rule(
            "personal_use",
            "Art. 2(10)",
            Condition::is("personal_use", "personal"),
            PrimaryTag::OutOfScope,
        )
        // ── Finished products ───────────────────────────────────────────────
        .rule(
            "not_open_source",
            "Art. 2(1)",
            Condition::is("open_source", "no"),
            PrimaryTag::InScopeFull,
        )
        .rule(
            "open_source_regulated_system",
            "Art. 2(12)",
            Condition::is("system_exception", "regulated_system"),
            PrimaryTag::InScopeFull,
        )
        .rule(
            "open_source_system",
            "Art. 2(12)",
            Condition::is("system_exception", "none"),
            PrimaryTag::OutOfScope,
        )
        .rule(
            "open_source_systemic_model",
            "Art. 51",
            Condition::is("model_exception", "systemic_risk"),
            PrimaryTag::InScopeHeavy,
        )
        .rule(
            "open_source_model",
            "Art. 53(2)",
            Condition::is("model_exception", "no_systemic_risk"),
            PrimaryTag::OpenSourceRegime,
        )
        .build()
}
