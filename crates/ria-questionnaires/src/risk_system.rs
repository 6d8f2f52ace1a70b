//! # Risk Tier of an AI System (Art. 5, 6, 50)
//!
//! The questionnaire follows the tiers from the most to the least severe.
//!
//! ```text
//! prohibited ─(none)─▶ safety_component ─(product)─▶ third_party ─(yes)──────────────┐
//!                              │ (none)                    │ (no)                    │
//!                              └──────────────┬────────────┘                         │
//!                                             ▼                                      │
//!                                           annex ─(no qualifying case)─────────────▶│
//!                                             │ qualifying case                      │
//!                                             ▼                                      ▼
//!                                   derogation_profiling ─(yes)───────────────▶ transparency
//!                                             │ (no)                                 ▲
//!                                             ▼                                      │
//!                                   derogation_criteria ─────────────────────────────┘
//! ```
//!
//! `annex` is a two-level checklist: the user marks the Annex III domains
//! that concern the system, then the cases inside each marked domain.
//! `transparency` is a flat checklist of the Art. 50 cases. It is asked on
//! every non-prohibited path, and the high-risk and derogation outcomes wait
//! for it so that their transparency flags are final when they appear.
//!
//! A system in an Annex III domain that meets an Art. 6(3) criterion is not
//! high-risk, but its provider must document the assessment and register
//! the system; that outcome is [`PrimaryTag::LimitedRiskWithDerogation`]
//! with [`SecondaryObligation::DerogationAssessmentRecord`].

use ria_core::{Catalog, Detail, DomainId, Domain, PrimaryTag, RiaError, SecondaryObligation};
use ria_engine::{Choice, Condition, DomainMode, Next, Question, Questionnaire};

/// Domain of the flat transparency checklist.
pub const TRANSPARENCY_DOMAIN: &str = "transparency_cases";

/// The "none of these domains" entry of the Annex III checklist.
pub const ANNEX_NONE: &str = "annex_none";

const PROHIBITED_PRACTICES: [&str; 8] = [
    "manipulation",
    "exploitation",
    "social_scoring",
    "predictive_policing",
    "facial_scraping",
    "emotion_workplace",
    "biometric_categorisation",
    "realtime_biometric_identification",
];

const DEROGATION_CRITERIA: [&str; 4] = [
    "narrow_procedural",
    "improves_human_activity",
    "detects_patterns",
    "preparatory_task",
];

// ── Annex III ────────────────────────────────────────────────────────────────

/// Annex III high-risk domains and their cases.
pub fn annex_iii() -> Result<Catalog, RiaError> {
    Ok(Catalog::new(vec![
        Domain::new(
            "biometrics",
            "Biometrics",
            vec![
                Detail::new("remote_identification", "Remote biometric identification")
                    .with_annotation("Excludes verification whose sole purpose is to confirm a person is who they claim to be."),
                Detail::new(
                    "biometric_categorisation",
                    "Biometric categorisation by sensitive or protected attributes",
                ),
                Detail::new("emotion_recognition", "Emotion recognition")
                    .with_annotation("Outside the workplace and education, where it is prohibited."),
                Detail::sentinel("biometrics_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "critical_infrastructure",
            "Critical infrastructure",
            vec![
                Detail::new(
                    "safety_component",
                    "Safety component in the management of digital infrastructure, road traffic, water, gas, heating or electricity",
                ),
                Detail::sentinel("critical_infrastructure_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "education",
            "Education and vocational training",
            vec![
                Detail::new("admission", "Access, admission or assignment to institutions"),
                Detail::new("learning_evaluation", "Evaluation of learning outcomes"),
                Detail::new("level_assessment", "Assessment of the appropriate level of education"),
                Detail::new("exam_monitoring", "Monitoring of prohibited behaviour during tests"),
                Detail::sentinel("education_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "employment",
            "Employment and workers management",
            vec![
                Detail::new("recruitment", "Recruitment, selection, filtering of applications"),
                Detail::new(
                    "work_decisions",
                    "Decisions on promotion, termination, task allocation or performance monitoring",
                ),
                Detail::sentinel("employment_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "essential_services",
            "Access to essential private and public services",
            vec![
                Detail::new("public_benefits", "Eligibility for public assistance benefits and services"),
                Detail::new("creditworthiness", "Creditworthiness or credit score")
                    .with_annotation("Excludes systems used to detect financial fraud."),
                Detail::new("insurance_pricing", "Risk assessment and pricing in life and health insurance"),
                Detail::new("emergency_triage", "Evaluation and dispatch of emergency calls"),
                Detail::sentinel("essential_services_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "law_enforcement",
            "Law enforcement",
            vec![
                Detail::new("victim_risk", "Risk of a person becoming the victim of a criminal offence"),
                Detail::new("polygraph", "Polygraphs and similar tools"),
                Detail::new("evidence_reliability", "Reliability of evidence"),
                Detail::new("offending_risk", "Risk of offending or re-offending")
                    .with_annotation("Not based solely on profiling, which is prohibited."),
                Detail::new("profiling", "Profiling in the course of detection, investigation or prosecution"),
                Detail::sentinel("law_enforcement_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "migration",
            "Migration, asylum and border control",
            vec![
                Detail::new("polygraph", "Polygraphs and similar tools"),
                Detail::new("security_risk", "Security, irregular migration or health risk assessment"),
                Detail::new("application_examination", "Examination of asylum, visa or residence applications"),
                Detail::new("identification", "Detection, recognition or identification of persons")
                    .with_annotation("Excludes verification of travel documents."),
                Detail::sentinel("migration_none", "None of these cases"),
            ],
        ),
        Domain::new(
            "justice_democracy",
            "Administration of justice and democratic processes",
            vec![
                Detail::new("judicial_assistance", "Assisting a judicial authority in researching and interpreting facts and the law"),
                Detail::new("election_influence", "Influencing the outcome of an election or referendum or voting behaviour")
                    .with_annotation("Excludes tools that organise or optimise campaigns administratively."),
                Detail::sentinel("justice_democracy_none", "None of these cases"),
            ],
        ),
    ])?)
}

// ── Art. 50 ──────────────────────────────────────────────────────────────────

/// Transparency cases of Art. 50, as a single always-relevant domain.
pub fn transparency_cases() -> Result<Catalog, RiaError> {
    Ok(Catalog::new(vec![Domain::new(
        TRANSPARENCY_DOMAIN,
        "Transparency cases",
        vec![
            Detail::new(
                "interaction",
                "Interacts directly with natural persons (chatbot, automated customer service)",
            ),
            Detail::new(
                "synthetic_content",
                "Generates synthetic audio, image, video or text content",
            ),
            Detail::new(
                "deepfake",
                "Generates or manipulates content resembling real persons, objects or events",
            ),
            Detail::new(
                "emotion_recognition",
                "Emotion recognition or biometric categorisation",
            )
            .with_annotation("In the cases that are neither prohibited nor high-risk."),
            Detail::sentinel("transparency_none", "None of these cases"),
        ],
    )])?)
}

// ── Questionnaire ────────────────────────────────────────────────────────────

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    let prohibited_choices = vec![
        Choice::terminal("manipulation", "Subliminal or manipulative techniques that materially distort behaviour"),
        Choice::terminal("exploitation", "Exploitation of vulnerabilities due to age, disability or social situation"),
        Choice::terminal("social_scoring", "Social scoring leading to unjustified detrimental treatment"),
        Choice::terminal("predictive_policing", "Assessing the risk of a person committing an offence based solely on profiling"),
        Choice::terminal("facial_scraping", "Untargeted scraping of facial images from the internet or CCTV"),
        Choice::terminal("emotion_workplace", "Emotion recognition in the workplace or in education")
            .annotated("Except for medical or safety reasons."),
        Choice::terminal("biometric_categorisation", "Biometric categorisation inferring sensitive attributes"),
        Choice::terminal(
            "realtime_biometric_identification",
            "Real-time remote biometric identification in public spaces for law enforcement",
        )
        .annotated("Except strictly defined cases such as searching for abduction victims or preventing a terrorist attack."),
        Choice::then("none", "None of these practices", Next::to("safety_component")),
    ];

    let mut criteria_choices: Vec<Choice> = [
        ("narrow_procedural", "Performs a narrow procedural task"),
        ("improves_human_activity", "Improves the result of a previously completed human activity"),
        ("detects_patterns", "Detects decision-making patterns without replacing or influencing human assessment"),
        ("preparatory_task", "Performs a preparatory task to an assessment"),
    ]
    .into_iter()
    .map(|(value, label)| Choice::then(value, label, Next::to("transparency")))
    .collect();
    criteria_choices.push(Choice::then(
        "none",
        "None of these conditions",
        Next::to("transparency"),
    ));

    let product = |value: &str, label: &str| Choice::then(value, label, Next::to("third_party"));

    Questionnaire::builder("risk_system", "What is the risk level of this AI system?")
        .question(Question::single(
            "prohibited",
            "Does the system perform one of these functions?",
            prohibited_choices,
        ))
        .question(
            Question::single(
                "safety_component",
                "Is the AI system a safety component of one of these product types?",
                vec![
                    product("machinery", "Machinery, lifts, cableways, pressure equipment, explosive atmospheres"),
                    product("health", "Medical devices or in vitro diagnostic medical devices"),
                    product("transport", "Vehicles, agricultural vehicles, two- or three-wheelers, civil aviation, marine equipment, rail"),
                    product("consumer", "Toys, radio equipment, personal protective equipment, gas appliances"),
                    Choice::then("none", "None of these products", Next::to("annex")),
                ],
            )
            .help("A safety component is one whose failure or malfunction endangers the health and safety of persons or property.")
            .visible_when(Condition::is("prohibited", "none")),
        )
        .question(
            Question::yes_no(
                "third_party",
                "Does EU law require a third-party conformity assessment (notified body) for this product before it is placed on the market?",
                Next::to("transparency"),
                Next::to("annex"),
            )
            .help("Products that may be self-certified through internal control are not high-risk under Art. 6(1).")
            .visible_when(Condition::any_of(
                "safety_component",
                ["machinery", "health", "transport", "consumer"],
            )),
        )
        .question(
            Question::checklist(
                "annex",
                "Is the AI system intended to be used in one of these areas?",
                annex_iii()?,
                DomainMode::Selectable {
                    none_domain: DomainId::new(ANNEX_NONE),
                    none_label: "None of these areas".into(),
                },
                Next::to("derogation_profiling"),
                Next::to("transparency"),
            )
            .help("Identifies stand-alone AI systems in sensitive sectors.")
            .visible_when(Condition::all([
                Condition::is("prohibited", "none"),
                Condition::any([
                    Condition::is("safety_component", "none"),
                    Condition::is("third_party", "no"),
                ]),
            ])),
        )
        .question(
            Question::yes_no(
                "derogation_profiling",
                "Does the system perform profiling of natural persons?",
                Next::to("transparency"),
                Next::to("derogation_criteria"),
            )
            .help("Profiling is the automated processing of personal data to evaluate personal aspects such as work performance, economic situation, health or preferences.")
            .visible_when(Condition::qualifying("annex")),
        )
        .question(
            Question::single(
                "derogation_criteria",
                "Does the system meet one of the following conditions?",
                criteria_choices,
            )
            .visible_when(Condition::is("derogation_profiling", "no")),
        )
        .question(
            Question::checklist(
                "transparency",
                "Does the system fall under one of these cases?",
                transparency_cases()?,
                DomainMode::Fixed,
                Next::Terminal,
                Next::Terminal,
            )
            .help("Identifies the information duties of generative AI, chatbots and deepfakes.")
            .visible_when(Condition::any([
                Condition::is("third_party", "yes"),
                Condition::is("derogation_profiling", "yes"),
                Condition::answered("derogation_criteria"),
                Condition::settled_without_case("annex"),
            ])),
        )
        // ── Primary tier ────────────────────────────────────────────────────
        .rule(
            "prohibited_practice",
            "Art. 5",
            Condition::any_of("prohibited", PROHIBITED_PRACTICES),
            PrimaryTag::Prohibited,
        )
        .rule(
            "annex_i_safety_component",
            "Art. 6(1)",
            Condition::all([
                Condition::is("third_party", "yes"),
                Condition::answered("transparency"),
            ]),
            PrimaryTag::HighRisk,
        )
        .rule(
            "annex_iii_profiling",
            "Art. 6(3)",
            Condition::all([
                Condition::qualifying("annex"),
                Condition::is("derogation_profiling", "yes"),
                Condition::answered("transparency"),
            ]),
            PrimaryTag::HighRisk,
        )
        .rule(
            "annex_iii",
            "Art. 6(2)",
            Condition::all([
                Condition::qualifying("annex"),
                Condition::is("derogation_criteria", "none"),
                Condition::answered("transparency"),
            ]),
            PrimaryTag::HighRisk,
        )
        .rule(
            "annex_iii_derogation",
            "Art. 6(3)",
            Condition::all([
                Condition::qualifying("annex"),
                Condition::any_of("derogation_criteria", DEROGATION_CRITERIA),
                Condition::answered("transparency"),
            ]),
            PrimaryTag::LimitedRiskWithDerogation,
        )
        .rule(
            "transparency",
            "Art. 50",
            Condition::all([
                Condition::settled_without_case("annex"),
                Condition::qualifying("transparency"),
            ]),
            PrimaryTag::LimitedRiskTransparency,
        )
        .rule(
            "minimal",
            "Art. 95",
            Condition::all([
                Condition::settled_without_case("annex"),
                Condition::settled_without_case("transparency"),
            ]),
            PrimaryTag::MinimalRisk,
        )
        // ── Secondary flags ─────────────────────────────────────────────────
        .obligation(
            Condition::qualifying("transparency"),
            SecondaryObligation::TransparencyDuty,
        )
        .obligation(
            Condition::has_detail(TRANSPARENCY_DOMAIN, "interaction"),
            SecondaryObligation::InteractionDisclosure,
        )
        .obligation(
            Condition::has_detail(TRANSPARENCY_DOMAIN, "synthetic_content"),
            SecondaryObligation::SyntheticContentMarking,
        )
        .obligation(
            Condition::has_detail(TRANSPARENCY_DOMAIN, "deepfake"),
            SecondaryObligation::DeepfakeDisclosure,
        )
        .obligation(
            Condition::has_detail(TRANSPARENCY_DOMAIN, "emotion_recognition"),
            SecondaryObligation::EmotionRecognitionNotice,
        )
        .obligation(
            Condition::any_of("derogation_criteria", DEROGATION_CRITERIA),
            SecondaryObligation::DerogationAssessmentRecord,
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

    fn to_annex(s: &mut Session) {
        s.answer("prohibited", "none");
        s.answer("safety_component", "none");
    }

    #[test]
    fn every_annex_domain_has_one_sentinel() {
        let annex = annex_iii().unwrap();
        assert_eq!(annex.domains().len(), 8);
        for domain in annex.domains() {
            assert_eq!(domain.details.iter().filter(|d| d.is_sentinel).count(), 1);
        }
    }

    #[test]
    fn third_party_assessment_is_high_risk() {
        let mut s = session();
        s.answer("prohibited", "none");
        s.answer("safety_component", "health");
        s.answer("third_party", "yes");
        assert!(s.presentation().is_expanded(&"transparency".into()));
        s.toggle_detail(TRANSPARENCY_DOMAIN, "transparency_none");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::HighRisk);
        assert_eq!(r.reference, "Art. 6(1)");
        assert!(r.secondary.is_empty());
    }

    #[test]
    fn high_risk_waits_for_transparency() {
        let mut s = session();
        s.answer("prohibited", "none");
        s.answer("safety_component", "health");
        s.answer("third_party", "yes");
        assert!(!s.is_complete());
        assert!(s.result().is_none());
        assert!(s.presentation().is_unlocked(&"transparency".into()));

        s.toggle_detail(TRANSPARENCY_DOMAIN, "synthetic_content");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::HighRisk);
        assert!(r.has(SecondaryObligation::TransparencyDuty));
        assert!(r.has(SecondaryObligation::SyntheticContentMarking));
    }

    #[test]
    fn annex_outcomes_wait_for_transparency() {
        let mut profiling = session();
        to_annex(&mut profiling);
        profiling.toggle_domain("annex", "employment");
        profiling.toggle_detail("employment", "recruitment");
        profiling.answer("derogation_profiling", "yes");
        assert!(!profiling.is_complete());

        let mut derogation = session();
        to_annex(&mut derogation);
        derogation.toggle_domain("annex", "education");
        derogation.toggle_detail("education", "admission");
        derogation.answer("derogation_profiling", "no");
        derogation.answer("derogation_criteria", "narrow_procedural");
        assert!(!derogation.is_complete());

        for s in [&mut profiling, &mut derogation] {
            s.toggle_detail(TRANSPARENCY_DOMAIN, "interaction");
            assert!(s.is_complete());
            assert!(s.result().unwrap().has(SecondaryObligation::InteractionDisclosure));
        }
        assert_eq!(profiling.result().unwrap().rule, "annex_iii_profiling");
        assert_eq!(derogation.result().unwrap().rule, "annex_iii_derogation");
    }

    #[test]
    fn self_certified_product_goes_to_annex() {
        let mut s = session();
        s.answer("prohibited", "none");
        s.answer("safety_component", "toys_are_consumer");
        assert!(!s.presentation().is_unlocked(&"third_party".into()));
        s.answer("safety_component", "consumer");
        s.answer("third_party", "no");
        assert!(s.presentation().is_unlocked(&"annex".into()));
    }

    #[test]
    fn derogation_criterion_is_limited_with_record() {
        let mut s = session();
        to_annex(&mut s);
        s.toggle_domain("annex", "employment");
        s.toggle_detail("employment", "recruitment");
        s.answer("derogation_profiling", "no");
        s.answer("derogation_criteria", "preparatory_task");
        s.toggle_detail(TRANSPARENCY_DOMAIN, "transparency_none");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::LimitedRiskWithDerogation);
        assert!(r.has(SecondaryObligation::DerogationAssessmentRecord));
        s.toggle_detail(TRANSPARENCY_DOMAIN, "interaction");
        let r = s.result().unwrap();
        assert!(r.has(SecondaryObligation::InteractionDisclosure));
        assert!(r.has(SecondaryObligation::TransparencyDuty));
    }

    #[test]
    fn no_criterion_is_high_risk() {
        let mut s = session();
        to_annex(&mut s);
        s.toggle_domain("annex", "education");
        s.toggle_detail("education", "admission");
        s.answer("derogation_profiling", "no");
        s.answer("derogation_criteria", "none");
        s.toggle_detail(TRANSPARENCY_DOMAIN, "transparency_none");
        assert_eq!(s.result().unwrap().rule, "annex_iii");
    }

    #[test]
    fn domain_with_sentinel_only_is_not_qualifying() {
        let mut s = session();
        to_annex(&mut s);
        s.toggle_domain("annex", "migration");
        assert!(!s.is_complete());
        s.toggle_detail("migration", "migration_none");
        assert!(!s.has_qualifying_case("annex"));
        assert!(s.presentation().is_unlocked(&"transparency".into()));
        s.toggle_detail(TRANSPARENCY_DOMAIN, "deepfake");
        let r = s.result().unwrap();
        assert_eq!(r.primary, PrimaryTag::LimitedRiskTransparency);
        assert!(r.has(SecondaryObligation::DeepfakeDisclosure));
    }
}
