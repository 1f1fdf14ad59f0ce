use super::backend::AttributeBackend;
use crate::attributes::{AttrChange, AttrDiff, AttrInput, AttributeSet};
use crate::config::ShadowConfig;
use crate::error::{AttrError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// In-memory shadow of the extended attributes of one path.
///
/// `current` is the working set callers edit; `original` is the last set known
/// to match the backend. `original` only changes on refresh, on a successful
/// commit, or never at all (reset copies it the other way).
pub struct AttributeStore<B: AttributeBackend> {
    path: PathBuf,
    backend: B,
    current: AttributeSet,
    original: AttributeSet,
    persisted: bool,
    max_value_len: Option<usize>,
}

impl<B: AttributeBackend> AttributeStore<B> {
    /// Bind to `path` and read its attributes through `backend`.
    pub fn open(path: impl Into<PathBuf>, backend: B) -> Result<Self> {
        Self::open_with_config(path, backend, &ShadowConfig::default())
    }

    pub fn open_with_config(
        path: impl Into<PathBuf>,
        backend: B,
        config: &ShadowConfig,
    ) -> Result<Self> {
        let mut store = Self {
            path: path.into(),
            backend,
            current: AttributeSet::new(),
            original: AttributeSet::new(),
            persisted: true,
            max_value_len: config.max_value_len,
        };
        store.refresh()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn max_value_len(&self) -> Option<usize> {
        self.max_value_len
    }

    /// The working set.
    pub fn attributes(&self) -> &AttributeSet {
        &self.current
    }

    /// The last set read from or written to the backend.
    pub fn original_attributes(&self) -> &AttributeSet {
        &self.original
    }

    pub fn get(&self, name: impl AttrInput) -> Option<&str> {
        self.current.get(&name.to_attr_text())
    }

    /// Set `name` to `value` in the working set. An empty value (or `None`)
    /// removes the name instead.
    pub fn set(&mut self, name: impl AttrInput, value: impl AttrInput) -> Result<()> {
        let name = name.to_attr_text();
        if name.is_empty() {
            return Err(AttrError::EmptyName);
        }
        let value = value.to_attr_text();

        let changed = if value.is_empty() {
            self.current.remove(&name)
        } else {
            if let Some(max) = self.max_value_len {
                if value.len() > max {
                    return Err(AttrError::ValueTooLong {
                        name: name.into_owned(),
                        len: value.len(),
                        max: Some(max),
                    });
                }
            }
            self.current.insert(name.into_owned(), value.into_owned())
        };

        if changed {
            self.persisted = false;
        }
        Ok(())
    }

    pub fn delete(&mut self, name: impl AttrInput) -> Result<()> {
        self.set(name, None::<&str>)
    }

    /// Pending changes of the working set against the persisted set.
    pub fn diff(&self) -> AttrDiff {
        AttrDiff::between(&self.original, &self.current)
    }

    /// Re-read everything from the backend. On error the shadow is untouched.
    pub fn refresh(&mut self) -> Result<()> {
        let listed = self.backend.list(&self.path)?;
        let fresh: AttributeSet = listed
            .into_iter()
            .filter(|(name, value)| {
                if value.is_empty() {
                    trace!(path = %self.path.display(), name = %name, "ignoring empty attribute");
                }
                !name.is_empty() && !value.is_empty()
            })
            .collect();

        debug!(path = %self.path.display(), count = fresh.len(), "refreshed attributes");

        self.current = fresh.clone();
        self.original = fresh;
        self.persisted = true;
        Ok(())
    }

    /// Discard unpersisted edits.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.persisted = true;
    }

    /// Write the pending diff to the backend.
    ///
    /// Stops at the first backend failure. Writes issued before the failure
    /// stay on disk, but neither side of the shadow changes; call
    /// [`refresh`](Self::refresh) to pick up what actually landed.
    pub fn commit(&mut self) -> Result<()> {
        let diff = self.diff();
        if diff.is_empty() {
            trace!(path = %self.path.display(), "nothing to commit");
            return Ok(());
        }

        debug!(
            path = %self.path.display(),
            added = diff.added.len(),
            changed = diff.changed.len(),
            removed = diff.removed.len(),
            "committing attributes"
        );

        for (name, change) in diff.changes() {
            trace!(path = %self.path.display(), name, ?change, "applying");
            let applied = match change {
                AttrChange::Set(value) => self.backend.set_attribute(&self.path, name, value),
                AttrChange::Remove => self.backend.remove_attribute(&self.path, name),
            };
            if let Err(err) = applied {
                warn!(path = %self.path.display(), name, error = %err, "commit failed");
                return Err(err);
            }
        }

        self.original = self.current.clone();
        self.persisted = true;
        Ok(())
    }

    /// True when the working set is known to match the persisted set.
    pub fn persisted(&self) -> bool {
        self.persisted
    }
}
