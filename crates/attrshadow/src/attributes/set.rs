use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A name → value mapping of extended attributes.
///
/// The public surface is read-only: only the store mutates a set, so a caller
/// holding `&AttributeSet` cannot bypass `set`/`reset`/`commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    entries: BTreeMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns true if the set changed.
    pub(crate) fn insert(&mut self, name: String, value: String) -> bool {
        match self.entries.entry(name) {
            btree_map::Entry::Occupied(mut slot) => {
                if slot.get() == &value {
                    false
                } else {
                    slot.insert(value);
                    true
                }
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Returns true if the name was present.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub(crate) fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl FromIterator<(String, String)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}
