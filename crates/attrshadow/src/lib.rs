//! # attrshadow
//!
//! An in-memory **shadow** of the extended attributes attached to a file or
//! directory. The shadow tracks how a working copy of the attributes diverges
//! from what is on disk and writes back exactly the difference on request.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store (store/attribute_store.rs)                           │
//! │  - current / original sets, dirty flag                      │
//! │  - get, set, diff, refresh, reset, commit                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend (store/backend.rs)                                 │
//! │  - list / set / remove one attribute on one path            │
//! │  - XattrBackend (production), MemBackend (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use attrshadow::store::XattrStore;
//!
//! let mut store = XattrStore::open_path("notes.txt")?;
//! store.set("user.color", "blue")?;
//! store.set("user.stale", "")?; // deletes
//! println!("{:?}", store.diff());
//! store.commit()?;
//! ```
//!
//! ## Threading
//!
//! A store is a single mutable unit with no internal locking. Use one store per
//! thread, or serialize access externally.
//!
//! ## Module Overview
//!
//! - [`store`]: The shadow and its backends
//! - [`attributes`]: Attribute sets, diffs and stringification
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod store;

#[cfg(all(test, unix))]
pub mod test_utils;

pub use attributes::{AttrChange, AttrDiff, AttrInput, AttributeSet, Symbol};
pub use config::ShadowConfig;
pub use error::{AttrError, Result};
pub use store::{AttributeBackend, AttributeStore, MemBackend};
