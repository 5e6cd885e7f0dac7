//! Host syntax trees.
//!
//! This is the shape in which a host parser hands over the expression written
//! at some argument position: operator precedence is already resolved, and
//! the only constructs beyond plain literals, identifiers, applications and
//! bare argument lists are the two unquote forms. Named-argument definitions
//! (`name := value`) are ordinary applications of `:=` at this level; they are
//! only interpreted when the syntax is turned into a
//! [`Template`](crate::Template).

use crate::{Argument, Constant, Node};

/// An expression as produced by the host parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Syntax {
    /// A literal constant.
    Literal(Constant),
    /// An identifier. The empty identifier stands for an omitted argument.
    Ident(Box<str>),
    /// An application of the first expression to the arguments.
    Apply(Box<Syntax>, Vec<SyntaxArg>),
    /// A bare argument list, as written for the formals of a function.
    List(Vec<SyntaxArg>),
    /// `!!expr`: replace this position with the value of `expr`.
    Unquote(Box<Syntax>),
    /// `!!!expr`: replace this argument with the elements of `expr`.
    UnquoteSplice(Box<Syntax>),
}

/// An argument in an application, with an optional name.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxArg {
    /// The name, as written before `=`.
    pub name: Option<Box<str>>,
    /// The argument expression.
    pub value: Syntax,
}

/// Name of the callable standing for a single unquote in node form.
pub const UNQUOTE: &str = "!!";
/// Name of the callable standing for an unquote-splice in node form.
pub const UNQUOTE_SPLICE: &str = "!!!";
/// Name of the callable used for computed argument names.
pub const DEFINE: &str = ":=";

impl Syntax {
    /// A literal.
    pub fn literal(value: impl Into<Constant>) -> Self {
        Syntax::Literal(value.into())
    }

    /// An identifier.
    pub fn ident(name: &str) -> Self {
        Syntax::Ident(name.into())
    }

    /// The omitted argument.
    pub fn missing() -> Self {
        Syntax::Ident("".into())
    }

    /// An application.
    pub fn apply(head: Syntax, args: Vec<SyntaxArg>) -> Self {
        Syntax::Apply(Box::new(head), args)
    }

    /// A bare argument list.
    pub fn list(args: Vec<SyntaxArg>) -> Self {
        Syntax::List(args)
    }

    /// A single unquote of `expr`.
    pub fn unquote(expr: Syntax) -> Self {
        Syntax::Unquote(Box::new(expr))
    }

    /// An unquote-splice of `expr`.
    pub fn unquote_splice(expr: Syntax) -> Self {
        Syntax::UnquoteSplice(Box::new(expr))
    }

    /// A `name := value` definition, to be used as an unnamed argument.
    pub fn define(name: Syntax, value: Syntax) -> Self {
        Syntax::apply(
            Syntax::ident(DEFINE),
            vec![SyntaxArg::positional(name), SyntaxArg::positional(value)],
        )
    }

    /// Returns true if the syntax contains an unquote form anywhere.
    pub fn has_unquote(&self) -> bool {
        match self {
            Syntax::Literal(_) | Syntax::Ident(_) => false,
            Syntax::Unquote(_) | Syntax::UnquoteSplice(_) => true,
            Syntax::Apply(head, args) => {
                head.has_unquote() || args.iter().any(|arg| arg.value.has_unquote())
            }
            Syntax::List(args) => args.iter().any(|arg| arg.value.has_unquote()),
        }
    }
}

impl SyntaxArg {
    /// An unnamed argument.
    pub fn positional(value: Syntax) -> Self {
        SyntaxArg { name: None, value }
    }

    /// A named argument.
    pub fn named(name: &str, value: Syntax) -> Self {
        SyntaxArg {
            name: Some(name.into()),
            value,
        }
    }
}

macro_rules! impl_from_literal {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Syntax {
                #[inline]
                fn from(v: $ty) -> Self {
                    Syntax::Literal(Constant::from(v))
                }
            }
        )*
    };
}

impl_from_literal!(u8, u16, u32, i8, i16, i32, i64, f32, f64, bool, &str, String, Constant);

/// Renders a node back into host syntax.
///
/// Calls to `!!` and `!!!` with a single unnamed argument become the
/// corresponding unquote forms; everything else maps one-to-one, so that
/// [`quote_explicit`](crate::quote_explicit) reconstructs the original node.
impl From<&Node> for Syntax {
    fn from(node: &Node) -> Self {
        match node {
            Node::Constant(c) => Syntax::Literal(c.clone()),
            Node::Symbol(sym) => Syntax::Ident(sym.name().into()),
            Node::Call(call) => {
                if let (Some(name), [arg]) = (call.head_name(), call.args()) {
                    if arg.name().is_none() {
                        let inner = Syntax::from(arg.value());
                        match name {
                            UNQUOTE => return Syntax::unquote(inner),
                            UNQUOTE_SPLICE => return Syntax::unquote_splice(inner),
                            _ => {}
                        }
                    }
                }
                Syntax::apply(Syntax::from(call.head()), args_to_syntax(call.args()))
            }
            Node::Pairlist(list) => Syntax::List(args_to_syntax(list.args())),
        }
    }
}

fn args_to_syntax(args: &[Argument]) -> Vec<SyntaxArg> {
    args.iter()
        .map(|arg| SyntaxArg {
            name: arg.name().map(Into::into),
            value: Syntax::from(arg.value()),
        })
        .collect()
}
