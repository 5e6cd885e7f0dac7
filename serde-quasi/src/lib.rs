#![deny(missing_docs)]

//! This crate provides [Serde]-based conversion from statically-typed Rust
//! data structures to the dynamically typed runtime values of the [`quasi`]
//! expression engine.
//!
//! The main use is producing splice and unquote sources from typed data:
//!
//! ```
//! use quasi::{build_call, Env, Node, TemplateArg};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let env = Env::new();
//! env.bind("args", serde_quasi::to_value(&[1, 2, 3])?);
//! let call = build_call("sum", vec![TemplateArg::splice(Node::symbol("args")?)], &env)?;
//! assert_eq!(call.to_string(), "sum(1, 2, 3)");
//! # Ok(())
//! # }
//! ```
//!
//! [Serde]: https://crates.io/crates/serde
//! [`quasi`]: https://docs.rs/quasi

pub use error::{Error, Result};
pub use ser::to_string;
pub use value::{to_value, Value};

pub mod error;
mod ser;
pub mod value;
