//! # Domain / Detail Catalog
//!
//! Static declarative data behind a "domain → sub-case" checklist: a list of
//! [`Domain`]s, each with ordered [`Detail`]s, exactly one of which is the
//! sentinel ("none of these cases").
//!
//! Annotations carry exception or condition text shown next to a detail
//! (e.g. "except fraud detection"). They never affect evaluation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::identity::{DetailId, DomainId};
use crate::selection::ExclusiveSet;

/// One selectable sub-case of a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    /// Detail identifier, unique within its domain.
    pub id: DetailId,
    /// Human-readable label.
    pub label: String,
    /// Exception or condition text displayed with the detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Whether this is the domain's "none of these cases" member.
    #[serde(default)]
    pub is_sentinel: bool,
}

impl Detail {
    /// A regular (qualifying) detail.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: DetailId::new(id),
            label: label.into(),
            annotation: None,
            is_sentinel: false,
        }
    }

    /// The "none of these cases" detail of a domain.
    pub fn sentinel(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            is_sentinel: true,
            ..Self::new(id, label)
        }
    }

    /// Attach an exception/condition annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// A group of details under one heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain identifier.
    pub id: DomainId,
    /// Human-readable label.
    pub label: String,
    /// Details in display order.
    pub details: Vec<Detail>,
}

impl Domain {
    /// Build a domain from its details.
    pub fn new(id: impl Into<String>, label: impl Into<String>, details: Vec<Detail>) -> Self {
        Self {
            id: DomainId::new(id),
            label: label.into(),
            details,
        }
    }

    /// The sentinel detail, if the domain declares one.
    pub fn sentinel(&self) -> Option<&Detail> {
        self.details.iter().find(|d| d.is_sentinel)
    }

    /// Look up a detail by id.
    pub fn detail(&self, id: &DetailId) -> Option<&Detail> {
        self.details.iter().find(|d| &d.id == id)
    }

    /// An empty selection set for this domain, keyed on its sentinel.
    ///
    /// Returns `None` only for a domain without a sentinel, which
    /// [`Catalog::new`] rejects.
    pub fn empty_selection(&self) -> Option<ExclusiveSet<DetailId>> {
        self.sentinel().map(|s| ExclusiveSet::new(s.id.clone()))
    }

    /// Check identifiers, sentinel count and detail uniqueness.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.is_empty() {
            return Err(DefinitionError::EmptyIdentifier {
                context: "domain".into(),
            });
        }
        if self.details.is_empty() {
            return Err(DefinitionError::EmptyDomain {
                domain: self.id.to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for detail in &self.details {
            if detail.id.is_empty() {
                return Err(DefinitionError::EmptyIdentifier {
                    context: format!("detail of domain {}", self.id),
                });
            }
            if !seen.insert(&detail.id) {
                return Err(DefinitionError::DuplicateDetail {
                    domain: self.id.to_string(),
                    detail: detail.id.to_string(),
                });
            }
        }
        match self.details.iter().filter(|d| d.is_sentinel).count() {
            0 => Err(DefinitionError::MissingSentinel {
                domain: self.id.to_string(),
            }),
            1 => Ok(()),
            count => Err(DefinitionError::MultipleSentinels {
                domain: self.id.to_string(),
                count,
            }),
        }
    }
}

/// The validated domain list of one checklist question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Domain>", into = "Vec<Domain>")]
pub struct Catalog {
    domains: Vec<Domain>,
}

impl Catalog {
    /// Validate and wrap a domain list.
    ///
    /// # Errors
    ///
    /// Fails if any domain is invalid (see [`Domain::validate`]) or if two
    /// domains share an id. An empty list is accepted here; the owning
    /// question rejects it with its own id for context.
    pub fn new(domains: Vec<Domain>) -> Result<Self, DefinitionError> {
        let mut seen = BTreeSet::new();
        for domain in &domains {
            domain.validate()?;
            if !seen.insert(&domain.id) {
                return Err(DefinitionError::DuplicateDomain {
                    domain: domain.id.to_string(),
                });
            }
        }
        Ok(Self { domains })
    }

    /// Domains in display order.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Look up a domain by id.
    pub fn domain(&self, id: &DomainId) -> Option<&Domain> {
        self.domains.iter().find(|d| &d.id == id)
    }

    /// Whether the catalog declares `domain`.
    pub fn contains_domain(&self, domain: &DomainId) -> bool {
        self.domain(domain).is_some()
    }

    /// Whether `detail` belongs to `domain`.
    pub fn contains_detail(&self, domain: &DomainId, detail: &DetailId) -> bool {
        self.domain(domain)
            .and_then(|d| d.detail(detail))
            .is_some()
    }

    /// Whether the catalog has no domains.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl TryFrom<Vec<Domain>> for Catalog {
    type Error = DefinitionError;

    fn try_from(domains: Vec<Domain>) -> Result<Self, Self::Error> {
        Self::new(domains)
    }
}

impl From<Catalog> for Vec<Domain> {
    fn from(catalog: Catalog) -> Self {
        catalog.domains
    }
}
