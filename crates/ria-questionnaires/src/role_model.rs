//! # Organisation Role for a General-Purpose AI Model (Art. 3, 53, 54)
//!
//! A chain of yes/no questions; the first "yes" settles the role. A "no"
//! to the last question leaves the organisation in none of the listed
//! roles, which is still a definitive answer ([`PrimaryTag::UnlistedRole`]).

use ria_core::{PrimaryTag, RiaError};
use ria_engine::{Choice, Condition, Next, Question, Questionnaire};

/// Build the questionnaire.
pub fn questionnaire() -> Result<Questionnaire, RiaError> {
    Questionnaire::builder(
        "role_model",
        "What is my organisation's role for this general-purpose AI model?",
    )
    .question(
        Question::yes_no(
            "model_provider",
            "Did you develop this model, or have it developed, and do you place it on the market under your own name or trademark?",
            Next::Terminal,
            Next::to("downstream_provider"),
        )
        .help("Includes publishing (model hub, API) and selling. Fine-tuning an existing model and redistributing it as a new stand-alone model under your brand also makes you a provider."),
    )
    .question(
        Question::yes_no(
            "downstream_provider",
            "Do you integrate this model into an AI system or application that you then supply under your name?",
            Next::Terminal,
            Next::to("authorized_representative"),
        )
        .help("The raw model is not sold: it powers software, a chatbot or a tool you market or deploy.")
        .visible_when(Condition::is("model_provider", "no")),
    )
    .question(
        Question::yes_no(
            "authorized_representative",
            "Are you established in the EU and mandated by a non-EU model provider to act on its behalf?",
            Next::Terminal,
            Next::to("end_user"),
        )
        .help("Art. 54: providers established outside the EU appoint an authorised representative in the Union.")
        .visible_when(Condition::is("downstream_provider", "no")),
    )
    .question(
        Question::single(
            "end_user",
            "Do you only use the model through an existing interface, without integrating or modifying it?",
            vec![
                Choice::terminal("yes", "Yes"),
                Choice::terminal("no", "No (other situation)"),
            ],
        )
        .visible_when(Condition::is("authorized_representative", "no")),
    )
    .rule(
        "model_provider",
        "Art. 3(3)",
        Condition::is("model_provider", "yes"),
        PrimaryTag::GpaiProvider,
    )
    .rule(
        "downstream_provider",
        "Art. 3(68)",
        Condition::is("downstream_provider", "yes"),
        PrimaryTag::DownstreamProvider,
    )
    .rule(
        "authorized_representative",
        "Art. 54",
        Condition::is("authorized_representative", "yes"),
        PrimaryTag::AuthorizedRepresentative,
    )
    .rule(
        "system_deployer",
        "Art. 3(4)",
        Condition::is("end_user", "yes"),
        PrimaryTag::Deployer,
    )
    .rule(
        "unlisted_role",
        "Art. 3",
        Condition::is("end_user", "no"),
        PrimaryTag::UnlistedRole,
    )
    .build()
}
