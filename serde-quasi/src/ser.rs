use serde::Serialize;

use crate::error::Result;
use crate::value::to_value;

/// Serialize an instance of type `T` into its printed runtime value.
///
/// ```
/// # use serde_quasi::to_string;
/// assert_eq!(to_string(&("foo", 1)).unwrap(), r#"list("foo", 1)"#.to_string())
/// ```
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(to_value(value)?.to_string())
}
