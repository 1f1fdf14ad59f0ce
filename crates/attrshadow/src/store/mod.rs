//! # Storage Layer
//!
//! This module holds the attribute shadow and the backends it persists through.
//!
//! ## Shadow Architecture
//!
//! An [`AttributeStore`] keeps two sets for one path:
//! 1. **Original**: what the backend held at the last refresh or commit.
//! 2. **Current**: the working set the caller edits.
//!
//! Edits only touch `current`. The store never writes behind the caller's back:
//! disk changes happen in [`AttributeStore::commit`], and disk changes made by
//! other processes are only seen after [`AttributeStore::refresh`].
//!
//! ## Lifecycle
//!
//! ```text
//!            set (net change)
//!   clean ───────────────────────▶ dirty
//!     ▲                              │
//!     └──────────────────────────────┘
//!        reset | commit ok | refresh
//! ```
//!
//! A failed commit leaves the store dirty and both sets unchanged, even though
//! some attributes may already be on disk. Refresh to resynchronize.
//!
//! ## Commit Order
//!
//! Removals are applied first, then changes, then additions, each group in name
//! order. The first backend error aborts the commit.
//!
//! ## Implementations
//!
//! - [`xattr_backend::XattrBackend`]: Real extended attributes (unix only).
//! - [`mem_backend::MemBackend`]: In-memory files with fault injection, for testing.

pub mod attribute_store;
pub mod backend;
pub mod mem_backend;
pub mod memory;
#[cfg(unix)]
pub mod xattr_backend;

pub use attribute_store::AttributeStore;
pub use backend::AttributeBackend;
pub use mem_backend::MemBackend;
pub use memory::InMemoryAttributeStore;
#[cfg(unix)]
pub use xattr_backend::{XattrBackend, XattrStore};
