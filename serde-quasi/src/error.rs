//! When serializing to runtime values goes wrong.

use std::fmt::{self, Debug, Display};
use std::{error, result};

use serde::ser;

/// This type represents all possible errors that can occur when
/// serializing Rust data to runtime values.
pub struct Error(Box<ErrorImpl>);

/// Alias for a `Result` with the error type `serde_quasi::Error`.
pub type Result<T> = result::Result<T, Error>;

enum ErrorImpl {
    Message(String),
    KeyMustBeAName,
    NumberOutOfRange(String),
}

impl Error {
    /// Categorizes the cause of this error.
    ///
    /// - `Category::Data` - the data has no runtime value representation
    /// - `Category::Custom` - a `Serialize` implementation reported an error
    pub fn classify(&self) -> Category {
        match &*self.0 {
            ErrorImpl::Message(_) => Category::Custom,
            ErrorImpl::KeyMustBeAName | ErrorImpl::NumberOutOfRange(_) => Category::Data,
        }
    }

    pub(crate) fn key_must_be_a_name() -> Self {
        Error(Box::new(ErrorImpl::KeyMustBeAName))
    }

    pub(crate) fn number_out_of_range(number: impl Display) -> Self {
        Error(Box::new(ErrorImpl::NumberOutOfRange(number.to_string())))
    }
}

/// Categorizes the cause of a `serde_quasi::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The data cannot be represented as a runtime value, such as a map key
    /// that is not a string, or an integer outside of the `i64` range.
    Data,

    /// The error was raised by a `Serialize` implementation.
    Custom,
}

impl From<Error> for quasi::Error {
    /// Convert a `serde_quasi::Error` into an evaluation error, for use in
    /// callables that build their results from typed data.
    fn from(e: Error) -> Self {
        quasi::Error::custom(e)
    }
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &*self.0 {
            ErrorImpl::Message(msg) => Display::fmt(msg, f),
            ErrorImpl::KeyMustBeAName => f.write_str("map key must be a string or an integer"),
            ErrorImpl::NumberOutOfRange(n) => write!(f, "number out of range: {}", n),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match &*self.0 {
            ErrorImpl::Message(msg) => formatter.debug_tuple("Message").field(msg).finish(),
            ErrorImpl::KeyMustBeAName => formatter.write_str("KeyMustBeAName"),
            ErrorImpl::NumberOutOfRange(n) => {
                formatter.debug_tuple("NumberOutOfRange").field(n).finish()
            }
        }
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Error {
        Error(Box::new(ErrorImpl::Message(msg.to_string())))
    }
}
