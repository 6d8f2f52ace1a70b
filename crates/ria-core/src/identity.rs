//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers a questionnaire is made of. They
//! prevent accidental identifier confusion: a `DetailId` cannot be passed
//! where a `DomainId` is expected, and a `ChoiceValue` is never mistaken for
//! a `QuestionId`.
//!
//! Identifiers are lowercase snake_case strings (`prohibited_practice`,
//! `remote_identification`). Hand-authored tables use the infallible
//! [`QuestionId::new`] family; values arriving from outside (CLI scripts,
//! deserialized events) go through `FromStr` or serde, both of which
//! enforce the format.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RiaError;

/// Check the snake_case identifier format shared by every newtype.
fn validate_identifier(value: &str) -> Result<(), RiaError> {
    if value.is_empty() {
        return Err(RiaError::InvalidIdentifier {
            value: value.to_string(),
            reason: "identifier must not be empty",
        });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(RiaError::InvalidIdentifier {
            value: value.to_string(),
            reason: "identifier must be lowercase snake_case",
        });
    }
    Ok(())
}

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wrap a string without validation. Intended for static tables,
            /// which are validated as a whole when the questionnaire is built.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = RiaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate_identifier(s)?;
                Ok(Self(s.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = RiaError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                validate_identifier(&value)?;
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_identifier!(
    /// Identifier of a question within one questionnaire.
    QuestionId
);

string_identifier!(
    /// Enumerated value of a single-select choice (`yes`, `none`, `importer`).
    ChoiceValue
);

string_identifier!(
    /// Identifier of a domain in a checklist catalog (`biometrics`).
    ///
    /// Domain ids are unique across all checklists of a questionnaire, so a
    /// domain id alone locates the checklist it belongs to.
    DomainId
);

string_identifier!(
    /// Identifier of a detail (sub-case) inside a domain.
    DetailId
);
