use crate::error::Result;
use std::path::Path;

/// Abstract interface for raw attribute I/O on one filesystem object.
/// This trait handles the "how" (real xattrs vs memory),
/// while AttributeStore handles the "what" (shadow, diff, commit).
///
/// Methods take `&self`: backends are stateless syscall wrappers or use
/// interior mutability.
pub trait AttributeBackend {
    /// Enumerate every attribute of `path` with its value.
    /// Returns an empty list for a path without attributes,
    /// and `AttrError::Access` when the path is missing or unreadable.
    fn list(&self, path: &Path) -> Result<Vec<(String, String)>>;

    /// Create or overwrite one attribute.
    /// May fail with `AttrError::Access` or `AttrError::ValueTooLong`.
    fn set_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()>;

    /// Remove one attribute. Removing an absent attribute is not an error.
    fn remove_attribute(&self, path: &Path, name: &str) -> Result<()>;
}

impl<B: AttributeBackend + ?Sized> AttributeBackend for &B {
    fn list(&self, path: &Path) -> Result<Vec<(String, String)>> {
        (**self).list(path)
    }

    fn set_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()> {
        (**self).set_attribute(path, name, value)
    }

    fn remove_attribute(&self, path: &Path, name: &str) -> Result<()> {
        (**self).remove_attribute(path, name)
    }
}
