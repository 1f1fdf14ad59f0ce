//! Three-way diff between the working set and the last persisted set.

use super::set::AttributeSet;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Pending changes of a shadow, partitioned by kind.
///
/// Every name appears in at most one partition. Names whose value is the same
/// on both sides appear in none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttrDiff {
    /// Present in the working set only.
    pub added: BTreeMap<String, String>,
    /// Present on both sides with different values; maps to the new value.
    pub changed: BTreeMap<String, String>,
    /// Present in the persisted set only. Serialized as `name: null`.
    #[serde(serialize_with = "serialize_removed")]
    pub removed: BTreeSet<String>,
}

/// What a commit must do for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrChange<'a> {
    Set(&'a str),
    Remove,
}

impl AttrDiff {
    pub fn between(original: &AttributeSet, current: &AttributeSet) -> Self {
        let mut diff = AttrDiff::default();

        for (name, value) in current.entries() {
            match original.get(name) {
                None => {
                    diff.added.insert(name.clone(), value.clone());
                }
                Some(old) if old != value.as_str() => {
                    diff.changed.insert(name.clone(), value.clone());
                }
                Some(_) => {}
            }
        }

        diff.removed = original
            .names()
            .filter(|name| !current.contains(name))
            .map(str::to_string)
            .collect();

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }

    /// Number of attributes touched.
    pub fn len(&self) -> usize {
        self.added.len() + self.changed.len() + self.removed.len()
    }

    /// Removals first, then changes, then additions; each group in name order.
    pub fn changes(&self) -> impl Iterator<Item = (&str, AttrChange<'_>)> {
        let removed = self
            .removed
            .iter()
            .map(|name| (name.as_str(), AttrChange::Remove));
        let changed = self
            .changed
            .iter()
            .map(|(name, value)| (name.as_str(), AttrChange::Set(value.as_str())));
        let added = self
            .added
            .iter()
            .map(|(name, value)| (name.as_str(), AttrChange::Set(value.as_str())));
        removed.chain(changed).chain(added)
    }
}

fn serialize_removed<S: Serializer>(
    removed: &BTreeSet<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(removed.iter().map(|name| (name, None::<&str>)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> AttributeSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn identical_sets_have_empty_diff() {
        let a = set(&[("a", "1"), ("b", "2")]);
        let diff = AttrDiff::between(&a, &a.clone());
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
    }

    #[test]
    fn partitions_added_changed_removed() {
        let original = set(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let current = set(&[("a", "1"), ("b", "9"), ("d", "new")]);

        let diff = AttrDiff::between(&original, &current);

        assert_eq!(diff.changed, BTreeMap::from([("b".to_string(), "9".to_string())]));
        assert_eq!(diff.added, BTreeMap::from([("d".to_string(), "new".to_string())]));
        assert_eq!(diff.removed, BTreeSet::from(["c".to_string()]));
        assert_eq!(diff.len(), 3);
    }

    #[test]
    fn changes_orders_removals_before_writes() {
        let original = set(&[("a", "1"), ("z", "2")]);
        let current = set(&[("a", "2"), ("b", "x")]);

        let diff = AttrDiff::between(&original, &current);
        let changes: Vec<_> = diff.changes().collect();

        assert_eq!(
            changes,
            vec![
                ("z", AttrChange::Remove),
                ("a", AttrChange::Set("2")),
                ("b", AttrChange::Set("x")),
            ]
        );
    }

    #[test]
    fn removed_serializes_as_nulls() {
        let original = set(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let current = set(&[("a", "1"), ("b", "9"), ("d", "new")]);

        let json = serde_json::to_value(AttrDiff::between(&original, &current)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "added": { "d": "new" },
                "changed": { "b": "9" },
                "removed": { "c": null },
            })
        );
    }
}
