//! Dynamically typed number type.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

/// Represents a numeric constant, whether integer or floating point.
///
/// Integers and floats are kept apart; arithmetic between two integers stays
/// integral (failing on overflow), while any float operand makes the result a
/// float.
#[derive(PartialEq, Clone, Copy)]
pub struct Number {
    n: N,
}

#[derive(Debug, Clone, Copy)]
enum N {
    Int(i64),
    Float(f64),
}

// Floats compare by bit pattern: NaN equals itself, 0.0 and -0.0 differ.
impl PartialEq for N {
    fn eq(&self, other: &N) -> bool {
        match (self, other) {
            (N::Int(a), N::Int(b)) => a == b,
            (N::Float(a), N::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Number {
    /// Returns true if the `Number` is an integer.
    ///
    /// ```
    /// # use quasi::Number;
    /// assert!(Number::from(64).is_i64());
    /// assert!(!Number::from(256.0).is_i64());
    /// ```
    #[inline]
    pub fn is_i64(&self) -> bool {
        matches!(self.n, N::Int(_))
    }

    /// Returns true if the `Number` is a floating point value.
    #[inline]
    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    /// If the `Number` is an integer, returns it. Returns `None` otherwise.
    ///
    /// ```
    /// # use quasi::Number;
    /// assert_eq!(Number::from(-64).as_i64(), Some(-64));
    /// assert_eq!(Number::from(256.0).as_i64(), None);
    /// ```
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::Int(n) => Some(n),
            N::Float(_) => None,
        }
    }

    /// Represents the number as f64.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self.n {
            N::Int(n) => n as f64,
            N::Float(n) => n,
        }
    }

    /// Converts a finite `f64` to a `Number`. Infinite or NaN values
    /// are not numeric constants.
    ///
    /// ```
    /// # use quasi::Number;
    /// assert!(Number::from_f64(256.0).is_some());
    /// assert!(Number::from_f64(f64::NAN).is_none());
    /// ```
    #[inline]
    pub fn from_f64(f: f64) -> Option<Number> {
        if f.is_finite() {
            Some(Number { n: N::Float(f) })
        } else {
            None
        }
    }

    /// Dispatch based on the type of the contained value.
    ///
    /// Depending on the stored value, one of the functions of the
    /// supplied visitor will be called.
    pub fn visit<V>(&self, visitor: V) -> Result<V::Value, V::Error>
    where
        V: Visitor,
    {
        match self.n {
            N::Int(n) => visitor.visit_i64(n),
            N::Float(n) => visitor.visit_f64(n),
        }
    }

    /// Adds two numbers, returning `None` on integer overflow or a
    /// non-finite float result.
    pub fn checked_add(&self, other: &Number) -> Option<Number> {
        self.combine(other, i64::checked_add, |a, b| a + b)
    }

    /// Subtracts `other` from `self`, returning `None` on overflow.
    pub fn checked_sub(&self, other: &Number) -> Option<Number> {
        self.combine(other, i64::checked_sub, |a, b| a - b)
    }

    /// Multiplies two numbers, returning `None` on overflow.
    pub fn checked_mul(&self, other: &Number) -> Option<Number> {
        self.combine(other, i64::checked_mul, |a, b| a * b)
    }

    /// Divides `self` by `other`.
    ///
    /// Division always produces a float, so `1 / 2` is `0.5`. Division by
    /// zero yields `None`.
    pub fn checked_div(&self, other: &Number) -> Option<Number> {
        let divisor = other.as_f64();
        if divisor == 0.0 {
            return None;
        }
        Number::from_f64(self.as_f64() / divisor)
    }

    /// Negates the number, returning `None` for `i64::MIN`.
    pub fn checked_neg(&self) -> Option<Number> {
        match self.n {
            N::Int(n) => n.checked_neg().map(Number::from),
            N::Float(n) => Number::from_f64(-n),
        }
    }

    fn combine(
        &self,
        other: &Number,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Option<Number> {
        match (self.n, other.n) {
            (N::Int(a), N::Int(b)) => int_op(a, b).map(Number::from),
            _ => Number::from_f64(float_op(self.as_f64(), other.as_f64())),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        match (self.n, other.n) {
            (N::Int(a), N::Int(b)) => a.partial_cmp(&b),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Trait to access the value stored in `Number`.
///
/// The `Number` type does not directly expose its internal
/// structure to allow future changes without breaking the API.
///
/// Instead, you can implement this trait and pass your implementation
/// to [`Number::visit`].
pub trait Visitor {
    /// The return type of the visitor methods.
    type Value;
    /// The error type of the visitor methods.
    type Error;

    /// The stored value is an `i64`.
    fn visit_i64(self, n: i64) -> Result<Self::Value, Self::Error>;
    /// The stored value is `f64`.
    fn visit_f64(self, n: f64) -> Result<Self::Value, Self::Error>;
}

macro_rules! impl_from_integer {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(n: $ty) -> Self {
                    Number { n: N::Int(i64::from(n)) }
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, i8, i16, i32, i64);

impl From<f32> for Number {
    #[inline]
    fn from(n: f32) -> Self {
        Number {
            n: N::Float(f64::from(n)),
        }
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(n: f64) -> Self {
        Number { n: N::Float(n) }
    }
}

impl Display for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::Int(i) => Display::fmt(&i, formatter),
            N::Float(f) => Display::fmt(&f, formatter),
        }
    }
}

impl Debug for Number {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.n, formatter)
    }
}
