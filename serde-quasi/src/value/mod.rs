//! Serialization to `quasi::Value`.

pub use quasi::value::{Entry, List};
pub use quasi::Value;

pub use ser::to_value;

mod ser;
