use super::backend::AttributeBackend;
use crate::error::{AttrError, Result};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory attribute backend for testing.
///
/// Uses `RefCell` for interior mutability since a shadow is single-threaded.
/// Only paths registered with [`MemBackend::insert_path`] or
/// [`MemBackend::with_path`] exist; everything else behaves like a missing file.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<HashMap<PathBuf, BTreeMap<String, String>>>,
    failing_names: RefCell<HashSet<String>>,
    simulate_write_error: Cell<bool>,
    max_value_len: Cell<Option<usize>>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemBackend::insert_path`].
    pub fn with_path<I, K, V>(self, path: impl Into<PathBuf>, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert_path(path, attrs);
        self
    }

    /// Create (or replace) a file with the given attributes.
    pub fn insert_path<I, K, V>(&self, path: impl Into<PathBuf>, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.files.borrow_mut().insert(path.into(), attrs);
    }

    /// Delete a file and its attributes.
    pub fn remove_path(&self, path: &Path) {
        self.files.borrow_mut().remove(path);
    }

    /// Snapshot of what is "on disk" for `path`.
    pub fn attributes_of(&self, path: &Path) -> Option<BTreeMap<String, String>> {
        self.files.borrow().get(path).cloned()
    }

    /// Make every set/remove of `name` fail with a permission error.
    pub fn fail_writes_for(&self, name: &str) {
        self.failing_names.borrow_mut().insert(name.to_string());
    }

    /// Enable write error simulation for all names.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Reject values longer than `max` bytes, like a filesystem would.
    pub fn set_max_value_len(&self, max: Option<usize>) {
        self.max_value_len.set(max);
    }

    /// Number of successful set/remove calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn check_writable(&self, path: &Path, name: &str) -> Result<()> {
        if self.simulate_write_error.get() || self.failing_names.borrow().contains(name) {
            return Err(AttrError::access_attr(
                path,
                name,
                io::Error::new(io::ErrorKind::PermissionDenied, "Simulated write error"),
            ));
        }
        Ok(())
    }
}

fn missing(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file: {}", path.display()),
    )
}

impl AttributeBackend for MemBackend {
    fn list(&self, path: &Path) -> Result<Vec<(String, String)>> {
        let files = self.files.borrow();
        let attrs = files
            .get(path)
            .ok_or_else(|| AttrError::access(path, missing(path)))?;
        Ok(attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn set_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()> {
        self.check_writable(path, name)?;
        if let Some(max) = self.max_value_len.get() {
            if value.len() > max {
                return Err(AttrError::ValueTooLong {
                    name: name.to_string(),
                    len: value.len(),
                    max: None,
                });
            }
        }

        let mut files = self.files.borrow_mut();
        let attrs = files
            .get_mut(path)
            .ok_or_else(|| AttrError::access_attr(path, name, missing(path)))?;
        attrs.insert(name.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_attribute(&self, path: &Path, name: &str) -> Result<()> {
        self.check_writable(path, name)?;

        let mut files = self.files.borrow_mut();
        let attrs = files
            .get_mut(path)
            .ok_or_else(|| AttrError::access_attr(path, name, missing(path)))?;
        attrs.remove(name);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_unknown_path_is_access_error() {
        let backend = MemBackend::new();
        let err = backend.list(Path::new("/nope")).unwrap_err();
        assert!(err.is_access());
    }

    #[test]
    fn test_list_empty_path() {
        let backend = MemBackend::new().with_path("/f", Vec::<(String, String)>::new());
        assert!(backend.list(Path::new("/f")).unwrap().is_empty());
    }

    #[test]
    fn test_set_and_remove() {
        let backend = MemBackend::new().with_path("/f", [("a", "1")]);
        let path = Path::new("/f");

        backend.set_attribute(path, "b", "2").unwrap();
        backend.remove_attribute(path, "a").unwrap();
        backend.remove_attribute(path, "never-there").unwrap();

        let on_disk = backend.attributes_of(path).unwrap();
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk.get("b").map(String::as_str), Some("2"));
        assert_eq!(backend.write_count(), 3);
    }

    #[test]
    fn test_failing_name_only_affects_that_name() {
        let backend = MemBackend::new().with_path("/f", [("a", "1")]);
        let path = Path::new("/f");
        backend.fail_writes_for("bad");

        assert!(backend.set_attribute(path, "bad", "x").unwrap_err().is_access());
        assert!(backend.remove_attribute(path, "bad").unwrap_err().is_access());
        backend.set_attribute(path, "good", "x").unwrap();
    }

    #[test]
    fn test_simulated_write_error() {
        let backend = MemBackend::new().with_path("/f", [("a", "1")]);
        backend.set_simulate_write_error(true);
        assert!(backend
            .set_attribute(Path::new("/f"), "a", "2")
            .unwrap_err()
            .is_access());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_backend_value_limit() {
        let backend = MemBackend::new().with_path("/f", [("a", "1")]);
        backend.set_max_value_len(Some(3));
        let err = backend
            .set_attribute(Path::new("/f"), "a", "toolong")
            .unwrap_err();
        assert!(err.is_value_too_long());
    }

    #[test]
    fn test_write_to_removed_path_fails() {
        let backend = MemBackend::new().with_path("/f", [("a", "1")]);
        backend.remove_path(Path::new("/f"));
        assert!(backend
            .set_attribute(Path::new("/f"), "a", "2")
            .unwrap_err()
            .is_access());
    }
}
