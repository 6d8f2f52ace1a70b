//! # ria-core — Foundational Types for the RIA Verifier
//!
//! This crate is the leaf of the verifier workspace. It defines the value
//! types every questionnaire is built from, and nothing that evaluates them.
//! The decision engine lives in `ria-engine`; the hand-authored
//! questionnaires live in `ria-questionnaires`.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `QuestionId`, `ChoiceValue`, `DomainId` and
//!    `DetailId` are distinct types. A detail id cannot be passed where a
//!    domain id is expected.
//!
//! 2. **One exclusive-sentinel set.** Every multi-select group ("none of
//!    these cases" plus concrete cases) is an [`ExclusiveSet`]. The
//!    exclusivity rule is written once, in one place.
//!
//! 3. **Single tag enums.** [`PrimaryTag`] and [`SecondaryObligation`] cover
//!    every questionnaire. Downstream consumers match exhaustively, so adding
//!    a classification forces every consumer to handle it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ria-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod selection;
pub mod tag;

// Re-export primary types for ergonomic imports.
pub use catalog::{Catalog, Detail, Domain};
pub use error::{DefinitionError, RiaError, SelectionError};
pub use identity::{ChoiceValue, DetailId, DomainId, QuestionId};
pub use selection::ExclusiveSet;
pub use tag::{PrimaryTag, SecondaryObligation, TagFamily, PRIMARY_TAG_COUNT};
