use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrError {
    /// The backend could not enumerate, write or remove attributes on the path.
    #[error("Access error on {}{}: {source}", .path.display(), attr_suffix(.name))]
    Access {
        path: PathBuf,
        name: Option<String>,
        #[source]
        source: std::io::Error,
    },

    /// A value exceeded the maximum length. `max` is `None` when the limit
    /// was enforced by the backend rather than by configuration.
    #[error("Value for attribute '{name}' is too long: {len} bytes{}", limit_suffix(.max))]
    ValueTooLong {
        name: String,
        len: usize,
        max: Option<usize>,
    },

    #[error("Attribute name must not be empty")]
    EmptyName,

    #[error("Config error: {0}")]
    Config(String),
}

fn attr_suffix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" (attribute '{}')", name),
        None => String::new(),
    }
}

fn limit_suffix(max: &Option<usize>) -> String {
    match max {
        Some(max) => format!(" (maximum {})", max),
        None => String::new(),
    }
}

impl AttrError {
    pub fn access(path: &Path, source: std::io::Error) -> Self {
        AttrError::Access {
            path: path.to_path_buf(),
            name: None,
            source,
        }
    }

    pub fn access_attr(path: &Path, name: &str, source: std::io::Error) -> Self {
        AttrError::Access {
            path: path.to_path_buf(),
            name: Some(name.to_string()),
            source,
        }
    }

    pub fn is_access(&self) -> bool {
        matches!(self, AttrError::Access { .. })
    }

    pub fn is_value_too_long(&self) -> bool {
        matches!(self, AttrError::ValueTooLong { .. })
    }
}

pub type Result<T> = std::result::Result<T, AttrError>;
