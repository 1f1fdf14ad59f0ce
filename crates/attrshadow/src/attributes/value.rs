//! Canonical string form of attribute names and values.
//!
//! Everything that reaches the shadow is stored as a string. Callers may pass
//! any type implementing [`AttrInput`]; the conversion is total for every
//! implementing type and deterministic:
//!
//! | Input | Canonical form |
//! |-------|----------------|
//! | `str`, `String`, `Cow<str>` | unchanged |
//! | signed/unsigned integers | decimal (`-12`, `42`) |
//! | `bool` | `"true"` / `"false"` |
//! | `char` | the one-character string |
//! | [`Symbol`] | the bare identifier |
//! | `Option<T>` | `None` is `""`, `Some(v)` is `v`'s form |
//!
//! The empty string is the delete sentinel: setting a name to a value whose
//! canonical form is empty removes the name.

use std::borrow::Cow;
use std::fmt;

/// Conversion into the canonical attribute text.
pub trait AttrInput {
    fn to_attr_text(&self) -> Cow<'_, str>;

    /// True when the canonical form is the delete sentinel.
    fn is_delete_sentinel(&self) -> bool {
        self.to_attr_text().is_empty()
    }
}

/// An identifier-like name, rendered without any sigil.
///
/// `Symbol("color")` and `"color"` address the same attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol<'a>(pub &'a str);

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AttrInput for Symbol<'_> {
    fn to_attr_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0)
    }
}

impl AttrInput for str {
    fn to_attr_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AttrInput for String {
    fn to_attr_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl AttrInput for Cow<'_, str> {
    fn to_attr_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&**self)
    }
}

impl AttrInput for bool {
    fn to_attr_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

impl AttrInput for char {
    fn to_attr_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl<T: AttrInput> AttrInput for Option<T> {
    fn to_attr_text(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.to_attr_text(),
            None => Cow::Borrowed(""),
        }
    }
}

impl<T: AttrInput + ?Sized> AttrInput for &T {
    fn to_attr_text(&self) -> Cow<'_, str> {
        (**self).to_attr_text()
    }
}

macro_rules! impl_attr_input_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AttrInput for $ty {
                fn to_attr_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_attr_input_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
