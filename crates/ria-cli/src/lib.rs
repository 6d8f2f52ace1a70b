//! # ria-cli — Verifier Command-Line Harness
//!
//! A thin collaborator around the decision engine. It plays the part of the
//! rendering layer: it feeds events into a [`Session`](ria_engine::Session)
//! and prints the read-only projections.
//!
//! ## Subcommands
//!
//! - `list`: registered questionnaires
//! - `describe`: questions, choices, catalogs and rules of one questionnaire
//! - `evaluate`: replay an event script and print the final state
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live in their modules.
//! - No classification logic here. Everything is delegated to `ria-engine`.

pub mod evaluate;
pub mod output;
pub mod questionnaire;
pub mod script;
