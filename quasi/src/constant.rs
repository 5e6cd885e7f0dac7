//! Atomic literals appearing in expression trees.

use std::borrow::Cow;

use crate::Number;

/// An atomic literal: the leaves of a [`Node`](crate::Node) tree that are not
/// names.
#[derive(Debug, PartialEq, Clone)]
pub enum Constant {
    /// The null-like sentinel, printed as `NULL`.
    Null,
    /// A boolean, printed as `TRUE` or `FALSE`.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(Box<str>),
}

impl Constant {
    /// Returns true if the constant is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Constant::Null)
    }

    /// If the constant is a string, returns it.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Constant::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the constant is a number, returns it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Constant::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the constant is a boolean, returns it.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Constant::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! impl_from_number {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Constant {
                #[inline]
                fn from(n: $ty) -> Self {
                    Constant::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, i8, i16, i32, i64, f32, f64);

impl From<Number> for Constant {
    fn from(n: Number) -> Self {
        Constant::Number(n)
    }
}

impl From<bool> for Constant {
    #[inline]
    fn from(v: bool) -> Self {
        Constant::Bool(v)
    }
}

impl From<&str> for Constant {
    #[inline]
    fn from(s: &str) -> Self {
        Constant::String(s.into())
    }
}

impl<'a> From<Cow<'a, str>> for Constant {
    #[inline]
    fn from(s: Cow<'a, str>) -> Self {
        Constant::from(s.as_ref())
    }
}

impl From<Box<str>> for Constant {
    #[inline]
    fn from(s: Box<str>) -> Self {
        Constant::String(s)
    }
}

impl From<String> for Constant {
    #[inline]
    fn from(s: String) -> Self {
        Constant::String(s.into_boxed_str())
    }
}

impl From<()> for Constant {
    #[inline]
    fn from(_: ()) -> Self {
        Constant::Null
    }
}
