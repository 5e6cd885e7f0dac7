//! The expression tree type and its constructors.
//!
//! A [`Node`] is one of four shapes:
//!
//! - a [`Constant`], an atomic literal such as `1`, `"foo"` or `TRUE`;
//! - a [`Symbol`], a bare name like `x`, standing for "the variable named
//!   `x`";
//! - a [`Call`], an application of a head node to an ordered list of
//!   [`Argument`]s, each of which may carry a name;
//! - a [`Pairlist`], an argument list detached from any call.
//!
//! Nodes are immutable. The children of calls and pairlists are held behind
//! an `Arc`, so cloning a node is cheap and rewriting a tree shares every
//! subtree that was not touched.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, ErrorCode, Result};
use crate::{print, Constant, Number};

/// An expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An atomic literal.
    Constant(Constant),
    /// A name, or the missing-argument sentinel.
    Symbol(Symbol),
    /// A function application.
    Call(Call),
    /// A detached argument list.
    Pairlist(Pairlist),
}

/// A name appearing in an expression.
///
/// Symbols always have a non-empty name, with one exception: the *missing
/// argument*, which has an empty name and can only be created with
/// [`Symbol::missing`]. It denotes an argument position that was left empty,
/// as in `x[, 1]`, and is preserved verbatim by every rewriting operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: Box<str>,
}

impl Symbol {
    /// Creates a symbol, failing with `InvalidSymbol` if `name` is empty.
    ///
    /// ```
    /// # use quasi::Symbol;
    /// assert_eq!(Symbol::new("x").unwrap().name(), "x");
    /// assert!(Symbol::new("").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::new(ErrorCode::InvalidSymbol));
        }
        Ok(Symbol { name: name.into() })
    }

    /// The missing-argument sentinel.
    pub fn missing() -> Self {
        Symbol { name: "".into() }
    }

    /// The name of the symbol; empty for the missing argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this is the missing-argument sentinel.
    pub fn is_missing(&self) -> bool {
        self.name.is_empty()
    }
}

/// An argument of a call or pairlist: a node, optionally tagged with a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: Option<Box<str>>,
    value: Node,
}

impl Argument {
    /// Creates an argument without a name.
    pub fn positional(value: impl Into<Node>) -> Self {
        Argument {
            name: None,
            value: value.into(),
        }
    }

    /// Creates a named argument.
    ///
    /// Names need not be unique within an argument list; binding arguments
    /// to parameters is up to whatever is eventually invoked.
    pub fn named(name: &str, value: impl Into<Node>) -> Self {
        Argument {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// Creates an argument with an optional name.
    pub fn new(name: Option<&str>, value: impl Into<Node>) -> Self {
        Argument {
            name: name.map(Into::into),
            value: value.into(),
        }
    }

    /// The name of the argument, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The value of the argument.
    pub fn value(&self) -> &Node {
        &self.value
    }

    /// Splits the argument into its name and value.
    pub fn into_parts(self) -> (Option<Box<str>>, Node) {
        (self.name, self.value)
    }
}

#[derive(Debug, PartialEq)]
struct CallInner {
    head: Node,
    args: Vec<Argument>,
}

/// A function application node.
#[derive(Debug, Clone)]
pub struct Call {
    inner: Arc<CallInner>,
}

impl Call {
    /// Creates a call, validating the head.
    ///
    /// Any non-missing symbol and any call is accepted as head; the latter
    /// allows calling the result of another call, as in `f(1)(2)`. Constants,
    /// pairlists and the missing argument are rejected with `InvalidHead`.
    pub fn new(head: Node, args: Vec<Argument>) -> Result<Self> {
        check_head(&head)?;
        Ok(Call {
            inner: Arc::new(CallInner { head, args }),
        })
    }

    /// The node in function position.
    pub fn head(&self) -> &Node {
        &self.inner.head
    }

    /// The arguments, in call order.
    pub fn args(&self) -> &[Argument] {
        &self.inner.args
    }

    /// Returns the head's name if the head is a symbol.
    pub fn head_name(&self) -> Option<&str> {
        self.head().as_symbol().map(Symbol::name)
    }
}

impl PartialEq for Call {
    fn eq(&self, other: &Call) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

/// An argument list that is not attached to a call.
#[derive(Debug, Clone)]
pub struct Pairlist {
    args: Arc<Vec<Argument>>,
}

impl Pairlist {
    /// Creates a pairlist.
    pub fn new(args: Vec<Argument>) -> Self {
        Pairlist {
            args: Arc::new(args),
        }
    }

    /// The elements of the list.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns true if the pairlist has no elements.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl PartialEq for Pairlist {
    fn eq(&self, other: &Pairlist) -> bool {
        Arc::ptr_eq(&self.args, &other.args) || self.args == other.args
    }
}

pub(crate) fn check_head(head: &Node) -> Result<()> {
    match head {
        Node::Symbol(sym) if !sym.is_missing() => Ok(()),
        Node::Call(_) => Ok(()),
        other => Err(Error::new(ErrorCode::InvalidHead(other.kind_name()))),
    }
}

impl Node {
    /// Wraps an atomic value.
    ///
    /// ```
    /// # use quasi::{Constant, Node};
    /// assert_eq!(Node::constant(10), Node::Constant(Constant::from(10)));
    /// ```
    pub fn constant(value: impl Into<Constant>) -> Node {
        Node::Constant(value.into())
    }

    /// Creates a symbol node, failing with `InvalidSymbol` for an empty name.
    pub fn symbol(name: &str) -> Result<Node> {
        Symbol::new(name).map(Node::Symbol)
    }

    /// The missing-argument sentinel.
    pub fn missing() -> Node {
        Node::Symbol(Symbol::missing())
    }

    /// Creates a call node; see [`Call::new`] for the accepted heads.
    ///
    /// ```
    /// # use quasi::{Argument, Node};
    /// let call = Node::call(
    ///     Node::symbol("+")?,
    ///     vec![Argument::positional(1), Argument::positional(2)],
    /// )?;
    /// assert_eq!(call.to_string(), "1 + 2");
    /// assert!(Node::call(Node::constant(1), vec![]).is_err());
    /// # Ok::<(), quasi::Error>(())
    /// ```
    pub fn call(head: Node, args: Vec<Argument>) -> Result<Node> {
        Call::new(head, args).map(Node::Call)
    }

    /// Creates a call node without validating the head.
    ///
    /// Used for trees that come from host syntax, which are reproduced
    /// as-is; a non-callable head is reported when the call is evaluated.
    pub(crate) fn call_unchecked(head: Node, args: Vec<Argument>) -> Node {
        Node::Call(Call {
            inner: Arc::new(CallInner { head, args }),
        })
    }

    /// Creates a pairlist node.
    pub fn pairlist(args: Vec<Argument>) -> Node {
        Node::Pairlist(Pairlist::new(args))
    }

    /// Structural equality; see [`identical`].
    pub fn identical(&self, other: &Node) -> bool {
        self == other
    }

    /// Returns true for the missing-argument sentinel.
    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Symbol(sym) if sym.is_missing())
    }

    /// Returns true if the node is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    /// Returns true if the node is a (possibly missing) symbol.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Node::Symbol(_))
    }

    /// Returns true if the node is a call.
    pub fn is_call(&self) -> bool {
        matches!(self, Node::Call(_))
    }

    /// If the node is a constant, returns it.
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Node::Constant(c) => Some(c),
            _ => None,
        }
    }

    /// If the node is a symbol, returns it.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Node::Symbol(sym) => Some(sym),
            _ => None,
        }
    }

    /// If the node is a call, returns it.
    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Node::Call(call) => Some(call),
            _ => None,
        }
    }

    /// If the node is a pairlist, returns it.
    pub fn as_pairlist(&self) -> Option<&Pairlist> {
        match self {
            Node::Pairlist(list) => Some(list),
            _ => None,
        }
    }

    /// A short description of the node's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Constant(_) => "a constant",
            Node::Symbol(sym) if sym.is_missing() => "the missing argument",
            Node::Symbol(_) => "a symbol",
            Node::Call(_) => "a call",
            Node::Pairlist(_) => "a pairlist",
        }
    }
}

/// Structural equality of two trees.
///
/// Two nodes are identical iff they have the same shape, equal constants,
/// equal symbol names, and pairwise identical arguments with equal names.
/// Subtrees shared between the two trees are not re-examined.
pub fn identical(a: &Node, b: &Node) -> bool {
    a == b
}

impl From<Constant> for Node {
    fn from(c: Constant) -> Self {
        Node::Constant(c)
    }
}

impl From<Symbol> for Node {
    fn from(sym: Symbol) -> Self {
        Node::Symbol(sym)
    }
}

impl From<Call> for Node {
    fn from(call: Call) -> Self {
        Node::Call(call)
    }
}

impl From<Pairlist> for Node {
    fn from(list: Pairlist) -> Self {
        Node::Pairlist(list)
    }
}

macro_rules! impl_from_constant {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Node {
                #[inline]
                fn from(v: $ty) -> Self {
                    Node::Constant(Constant::from(v))
                }
            }
        )*
    };
}

impl_from_constant!(u8, u16, u32, i8, i16, i32, i64, f32, f64, bool, &str, String, Number);

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = print::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    #[test]
    fn symbol_requires_a_name() {
        let err = Node::symbol("").unwrap_err();
        assert_eq!(err.code(), &ErrorCode::InvalidSymbol);
        assert!(Node::missing().is_missing());
        assert!(!sym("x").is_missing());
    }

    #[test]
    fn call_heads() {
        let inner = Node::call(sym("f"), vec![Argument::positional(1)]).unwrap();
        assert!(Node::call(inner, vec![Argument::positional(2)]).is_ok());
        for head in [Node::constant("f"), Node::missing(), Node::pairlist(vec![])] {
            let err = Node::call(head, vec![]).unwrap_err();
            assert!(matches!(err.code(), ErrorCode::InvalidHead(_)));
        }
    }

    #[test]
    fn identical_is_structural() {
        let make = || {
            Node::call(
                sym("f"),
                vec![Argument::named("x", 1), Argument::positional(sym("y"))],
            )
            .unwrap()
        };
        assert!(identical(&make(), &make()));
        let renamed = Node::call(
            sym("f"),
            vec![Argument::named("z", 1), Argument::positional(sym("y"))],
        )
        .unwrap();
        assert!(!identical(&make(), &renamed));
        assert!(!identical(&Node::constant(1), &Node::constant(1.0)));
        assert!(!identical(&Node::constant("x"), &sym("x")));
    }

    #[test]
    fn identical_is_reflexive_for_non_finite_constants() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let node = Node::call(sym("f"), vec![Argument::positional(value)]).unwrap();
            assert!(identical(&node, &node.clone()));
            assert!(identical(&Node::constant(value), &Node::constant(value)));
        }
    }

    #[test]
    fn clones_share_children() {
        let call = Node::call(sym("f"), vec![Argument::positional(1)]).unwrap();
        let copy = call.clone();
        let (a, b) = (call.as_call().unwrap(), copy.as_call().unwrap());
        assert!(std::ptr::eq(a.args(), b.args()));
    }
}
