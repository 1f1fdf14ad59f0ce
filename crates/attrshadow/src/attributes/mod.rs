//! # Attribute Model
//!
//! The value types the shadow is built from:
//!
//! - **Stringification**: [`AttrInput`] turns caller input into canonical text
//! - **Sets**: [`AttributeSet`] holds one side of the shadow (working or persisted)
//! - **Diffs**: [`AttrDiff`] partitions the difference into added, changed and removed
//!
//! ## Usage
//!
//! ```ignore
//! let diff = AttrDiff::between(&original, &current);
//! for (name, change) in diff.changes() {
//!     match change {
//!         AttrChange::Set(value) => backend.set_attribute(path, name, value)?,
//!         AttrChange::Remove => backend.remove_attribute(path, name)?,
//!     }
//! }
//! ```

mod diff;
mod set;
mod value;

pub use diff::{AttrChange, AttrDiff};
pub use set::AttributeSet;
pub use value::{AttrInput, Symbol};
