use super::attribute_store::AttributeStore;
use super::backend::AttributeBackend;
use crate::config::ShadowConfig;
use crate::error::{AttrError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

#[cfg(any(target_os = "linux", target_os = "android"))]
const ENOATTR: i32 = libc::ENODATA;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
const ENOATTR: i32 = libc::ENOATTR;

/// Extended attributes of real files, through the `xattr` crate.
///
/// Names are passed through unchanged, so callers include any namespace
/// prefix the platform requires (`user.` on Linux). Attributes whose name or
/// value is not valid UTF-8 are invisible to the shadow.
#[derive(Debug, Default, Clone, Copy)]
pub struct XattrBackend;

impl XattrBackend {
    pub fn new() -> Self {
        Self
    }
}

fn is_missing_attr(err: &io::Error) -> bool {
    err.raw_os_error() == Some(ENOATTR)
}

fn is_too_large(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::E2BIG) | Some(libc::ERANGE))
}

impl AttributeBackend for XattrBackend {
    fn list(&self, path: &Path) -> Result<Vec<(String, String)>> {
        let names = xattr::list(path).map_err(|e| AttrError::access(path, e))?;

        let mut attrs = Vec::new();
        for raw_name in names {
            let Some(name) = raw_name.to_str() else {
                warn!(path = %path.display(), name = ?raw_name, "skipping non UTF-8 attribute name");
                continue;
            };

            let value = match xattr::get(path, &raw_name) {
                Ok(Some(value)) => value,
                // Removed between list and get
                Ok(None) => continue,
                Err(e) if is_missing_attr(&e) => continue,
                Err(e) => return Err(AttrError::access_attr(path, name, e)),
            };

            match String::from_utf8(value) {
                Ok(value) => attrs.push((name.to_string(), value)),
                Err(_) => {
                    warn!(path = %path.display(), name, "skipping non UTF-8 attribute value");
                }
            }
        }
        Ok(attrs)
    }

    fn set_attribute(&self, path: &Path, name: &str, value: &str) -> Result<()> {
        xattr::set(path, name, value.as_bytes()).map_err(|e| {
            if is_too_large(&e) {
                AttrError::ValueTooLong {
                    name: name.to_string(),
                    len: value.len(),
                    max: None,
                }
            } else {
                AttrError::access_attr(path, name, e)
            }
        })
    }

    fn remove_attribute(&self, path: &Path, name: &str) -> Result<()> {
        match xattr::remove(path, name) {
            Ok(()) => Ok(()),
            Err(e) if is_missing_attr(&e) => Ok(()),
            Err(e) => Err(AttrError::access_attr(path, name, e)),
        }
    }
}

/// Shadow of a real file's extended attributes.
pub type XattrStore = AttributeStore<XattrBackend>;

impl XattrStore {
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        AttributeStore::open(path, XattrBackend::new())
    }

    pub fn open_path_with_config(path: impl Into<PathBuf>, config: &ShadowConfig) -> Result<Self> {
        AttributeStore::open_with_config(path, XattrBackend::new(), config)
    }
}
