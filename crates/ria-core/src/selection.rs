//! # Exclusive-Sentinel Selection Set
//!
//! Every multi-select group in a questionnaire has the same shape: a list of
//! concrete cases plus one "none of these cases" member, the *sentinel*.
//! [`ExclusiveSet`] is the single value type for all of them.
//!
//! ## Invariant
//!
//! The sentinel and any non-sentinel member are never selected together.
//! Every constructor and every transition preserves this:
//!
//! | Toggled member | Currently selected | Result |
//! |----------------|--------------------|--------|
//! | sentinel       | no                 | `{sentinel}` |
//! | sentinel       | yes                | `{}` |
//! | other `k`      | no                 | `selected - {sentinel} + {k}` |
//! | other `k`      | yes                | `selected - {sentinel} - {k}` |
//!
//! The set is a value: [`ExclusiveSet::toggle`] returns a new set and leaves
//! the receiver untouched. Members are kept in a `BTreeSet`, so iteration
//! order and serialized form never depend on insertion order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SelectionError;

/// A set of members in which one designated sentinel excludes all others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExclusiveSet<T: Ord> {
    sentinel: T,
    selected: BTreeSet<T>,
}

impl<T: Ord + Clone> ExclusiveSet<T> {
    /// An empty selection whose sentinel is `sentinel`.
    pub fn new(sentinel: T) -> Self {
        Self {
            sentinel,
            selected: BTreeSet::new(),
        }
    }

    /// Build a selection from explicit members.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::SentinelNotExclusive`] if `selected`
    /// contains the sentinel together with any other member.
    pub fn from_parts(sentinel: T, selected: BTreeSet<T>) -> Result<Self, SelectionError>
    where
        T: fmt::Debug,
    {
        if selected.contains(&sentinel) && selected.len() > 1 {
            return Err(SelectionError::SentinelNotExclusive {
                sentinel: format!("{sentinel:?}"),
                others: selected.len() - 1,
            });
        }
        Ok(Self { sentinel, selected })
    }

    /// The sentinel member.
    pub fn sentinel(&self) -> &T {
        &self.sentinel
    }

    /// Toggle `member`, returning the resulting selection.
    pub fn toggle(&self, member: T) -> Self {
        let mut selected = self.selected.clone();
        if member == self.sentinel {
            if selected.contains(&member) {
                selected.clear();
            } else {
                selected.clear();
                selected.insert(member);
            }
        } else {
            selected.remove(&self.sentinel);
            if !selected.remove(&member) {
                selected.insert(member);
            }
        }
        Self {
            sentinel: self.sentinel.clone(),
            selected,
        }
    }

    /// Whether `member` is currently selected.
    pub fn contains(&self, member: &T) -> bool {
        self.selected.contains(member)
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected members, sentinel included.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether exactly the sentinel is selected.
    pub fn is_sentinel_only(&self) -> bool {
        self.selected.len() == 1 && self.selected.contains(&self.sentinel)
    }

    /// Whether at least one non-sentinel member is selected.
    pub fn has_qualifying(&self) -> bool {
        self.selected.iter().any(|m| *m != self.sentinel)
    }

    /// Selected non-sentinel members, in order.
    pub fn qualifying(&self) -> impl Iterator<Item = &T> + '_ {
        self.selected.iter().filter(move |m| **m != self.sentinel)
    }

    /// All selected members, in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.selected.iter()
    }
}

#[derive(Deserialize)]
struct ExclusiveSetRepr<T: Ord> {
    sentinel: T,
    #[serde(default = "BTreeSet::new")]
    selected: BTreeSet<T>,
}

impl<'de, T> Deserialize<'de> for ExclusiveSet<T>
where
    T: Ord + Clone + fmt::Debug + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ExclusiveSetRepr::<T>::deserialize(deserializer)?;
        Self::from_parts(repr.sentinel, repr.selected).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::identity::DomainId;

    const NONE: &str = "none";

    fn empty() -> ExclusiveSet<&'static str> {
        ExclusiveSet::new(NONE)
    }

    #[test]
    fn sentinel_then_case_leaves_only_case() {
        let s = empty().toggle(NONE).toggle("remote_identification");
        assert!(s.contains(&"remote_identification"));
        assert!(!s.contains(&NONE));
        assert_eq!(s.len(), 1);
        assert!(s.has_qualifying());
    }

    #[test]
    fn case_then_sentinel_leaves_only_sentinel() {
        let s = empty().toggle("remote_identification").toggle(NONE);
        assert!(s.is_sentinel_only());
        assert!(!s.has_qualifying());
    }

    #[test]
    fn toggling_selected_sentinel_clears() {
        let s = empty().toggle(NONE).toggle(NONE);
        assert!(s.is_empty());
    }

    #[test]
    fn toggling_selected_case_removes_it() {
        let s = empty().toggle("a").toggle("b").toggle("a");
        assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn toggle_does_not_mutate_receiver() {
        let before = empty().toggle("a");
        let _after = before.toggle("b");
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn qualifying_excludes_sentinel() {
        let s = empty().toggle("b").toggle("a");
        assert_eq!(s.qualifying().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(empty().toggle(NONE).qualifying().count(), 0);
    }

    #[test]
    fn from_parts_rejects_mixed_selection() {
        let mixed: BTreeSet<_> = [NONE, "a"].into_iter().collect();
        assert!(ExclusiveSet::from_parts(NONE, mixed).is_err());
        let only: BTreeSet<_> = [NONE].into_iter().collect();
        assert!(ExclusiveSet::from_parts(NONE, only).is_ok());
    }

    #[test]
    fn deserialize_enforces_exclusivity() {
        let ok: ExclusiveSet<String> =
            serde_json::from_str(r#"{"sentinel":"none","selected":["a","b"]}"#).unwrap();
        assert_eq!(ok.len(), 2);
        let missing: ExclusiveSet<String> = serde_json::from_str(r#"{"sentinel":"none"}"#).unwrap();
        assert!(missing.is_empty());
        let bad = serde_json::from_str::<ExclusiveSet<String>>(
            r#"{"sentinel":"none","selected":["none","a"]}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn deserialize_identifier_members_without_selection() {
        let set: ExclusiveSet<DomainId> =
            serde_json::from_str(r#"{"sentinel":"annex_none"}"#).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.sentinel(), &DomainId::new("annex_none"));
    }

    proptest! {
        /// No sequence of toggles can select the sentinel alongside another member.
        #[test]
        fn exclusivity_holds_for_any_toggle_sequence(
            toggles in proptest::collection::vec(0u8..5, 0..40)
        ) {
            let mut s = ExclusiveSet::new(0u8);
            for t in toggles {
                s = s.toggle(t);
                prop_assert!(!(s.contains(&0) && s.len() > 1));
            }
        }

        /// Toggling the same member twice is the identity on non-sentinel-mixed sets.
        #[test]
        fn double_toggle_of_case_restores_cases(
            toggles in proptest::collection::vec(1u8..5, 0..20),
            extra in 1u8..5,
        ) {
            let mut s = ExclusiveSet::new(0u8);
            for t in toggles {
                s = s.toggle(t);
            }
            let round_trip = s.toggle(extra).toggle(extra);
            prop_assert_eq!(round_trip, s);
        }
    }
}
