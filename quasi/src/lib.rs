#![deny(missing_docs)]

//! This crate provides facilities for building, capturing and selectively
//! evaluating expression trees of a small R-like language, using the
//! quote / unquote discipline known from Lisp quasiquotation and R's
//! tidy evaluation.
//!
//! ```r
//! f(x = 10, !!value, !!!rest, !!name := "computed")
//! ```
//!
//! There are three things one commonly does with such expressions:
//!
//! - **Capture them**. Take the syntax written at some argument position and
//!   keep it as a tree, without evaluating anything. See [`quote_explicit`],
//!   and, for capturing what the caller of a function wrote,
//!   [`capture_caller_argument`] and [`capture_all_arguments`].
//! - **Fill in a template**. Take a tree with holes and plug values into
//!   them: `!!x` replaces a position with the value of `x`, `!!!xs` replaces
//!   an argument with the elements of `xs`, and `!!nm := v` computes an
//!   argument name. See [`Quasiquoter`], [`quote_with_expansion`] and
//!   [`build_call`].
//! - **Evaluate them** against an environment, see [`eval`].
//!
//! # Expression trees
//!
//! Expressions are represented by [`Node`], which is a constant, a symbol,
//! a call, or a pairlist (an argument list on its own):
//!
//! ```
//! use quasi::{Argument, Node};
//!
//! # fn main() -> Result<(), quasi::Error> {
//! let call = Node::call(
//!     Node::symbol("foo")?,
//!     vec![Argument::named("x", 10), Argument::positional(Node::symbol("y")?)],
//! )?;
//! assert_eq!(call.to_string(), "foo(x = 10, y)");
//! # Ok(())
//! # }
//! ```
//!
//! Nodes are immutable, and share their children when cloned, so trees can
//! be freely passed around and rewritten.
//!
//! # Quoting and unquoting
//!
//! There is no text parser; host syntax is handed over as a [`Syntax`] tree.
//! With the `syntax-macro` feature, the [`syntax!`] macro builds such trees
//! from an S-expression notation at compile time.
//!
//! ```
//! use quasi::{prim, quote_with_expansion, Syntax, SyntaxArg, Value};
//!
//! # fn main() -> Result<(), quasi::Error> {
//! let env = prim::base_env();
//! env.bind("args", Value::list(vec![1, 2]));
//! let syntax = Syntax::apply(
//!     Syntax::ident("sum"),
//!     vec![
//!         SyntaxArg::positional(Syntax::unquote_splice(Syntax::ident("args"))),
//!         SyntaxArg::named("na.rm", Syntax::from(true)),
//!     ],
//! );
//! let node = quote_with_expansion(&syntax, &env)?;
//! assert_eq!(node.to_string(), "sum(1, 2, na.rm = TRUE)");
//! # Ok(())
//! # }
//! ```
//!
//! # Evaluation
//!
//! The evaluator resolves symbols through an [`Env`] and invokes callables
//! according to their kind: builtins receive evaluated arguments, specials
//! the unevaluated call, and closures a lazily evaluated promise per
//! argument. [`prim::base_env`] provides a standard set of callables,
//! including the quoting functions `quote`, `expr`, `exprs`, `enexpr` and
//! `enexprs`.
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: marker
//! resolution and call dispatch at trace level, contextual captures at
//! debug level.

mod constant;

pub mod build;
pub mod capture;
pub mod env;
pub mod error;
pub mod eval;
pub mod expand;
pub mod node;
pub mod number;
pub mod prim;
pub mod print;
pub mod syntax;
pub mod template;
pub mod value;

#[doc(inline)]
pub use self::build::{build_call, CallBuilder, Designator};

#[doc(inline)]
pub use self::capture::{
    capture_all_arguments, capture_caller_argument, quote_explicit, quote_with_expansion,
    CallContext,
};

#[doc(inline)]
pub use self::constant::Constant;

#[doc(inline)]
pub use self::env::Env;

#[doc(inline)]
pub use self::error::{Error, Result};

#[doc(inline)]
pub use self::eval::eval;

#[doc(inline)]
pub use self::expand::{expand, Quasiquoter};

#[doc(inline)]
pub use self::node::{identical, Argument, Call, Node, Pairlist, Symbol};

#[doc(inline)]
pub use number::Number;

#[doc(inline)]
pub use self::syntax::{Syntax, SyntaxArg};

#[doc(inline)]
pub use self::template::{Template, TemplateArg};

#[doc(inline)]
pub use self::value::Value;

/// Construct a [`Syntax`] tree using an S-expression notation.
///
/// Lists are applications with the head first, `,x` unquotes, `,@xs`
/// unquote-splices, and `#:name value` (or `:name value`) gives a named
/// argument. `#(...)` is a bare argument list, `#t`, `#f` and `#nil` are
/// `TRUE`, `FALSE` and `NULL`, `#missing` is an omitted argument, and
/// `#"a b"` is an identifier containing arbitrary characters.
///
/// ```
/// # use quasi::{syntax, quote_explicit};
/// let syntax = syntax!((foo #:x 10 ,y));
/// assert_eq!(quote_explicit(&syntax).to_string(), "foo(x = 10, !!y)");
/// ```
#[cfg(feature = "syntax-macro")]
pub use quasi_macros::syntax;
