//! Templates: expression trees with holes.
//!
//! A template is a tree in which some positions are *markers* to be replaced
//! at expansion time:
//!
//! - [`Template::Single`] at a node position: replaced by exactly one node;
//! - [`TemplateArg::Splice`] at an argument position: replaced by zero or
//!   more arguments;
//! - [`TemplateArg::Define`] in place of a named argument: the name is
//!   computed rather than written.
//!
//! The split into two types means a splice can only ever be written where an
//! argument is expected, and a definition only where an argument name is.
//! Everything that contains no marker is kept as a plain [`Node`], so that
//! expansion can share it with the result instead of copying it.

use crate::capture::quote_explicit;
use crate::error::{Error, ErrorCode, Path, Result, Step};
use crate::syntax::{Syntax, SyntaxArg, DEFINE};
use crate::node::check_head;
use crate::{Argument, Node};

/// A tree at a node position.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// A marker-free subtree.
    Node(Node),
    /// A call whose head or arguments contain markers.
    Call(Box<Template>, Vec<TemplateArg>),
    /// A pairlist whose elements contain markers.
    Pairlist(Vec<TemplateArg>),
    /// Replace this position with the value of the source expression.
    Single(Node),
}

/// A template at an argument position.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg {
    /// An ordinary argument, with an optional literal name.
    Arg {
        /// The name as written.
        name: Option<Box<str>>,
        /// The argument's value.
        value: Template,
    },
    /// Replace this argument with the elements of the sequence the source
    /// expression evaluates to.
    Splice(Node),
    /// An argument whose name is the value of the `name` expression.
    Define {
        /// Expression evaluating to the argument name.
        name: Node,
        /// The argument's value.
        value: Template,
    },
}

impl Template {
    /// A single unquote of `source`.
    pub fn single(source: Node) -> Self {
        Template::Single(source)
    }

    /// A call template. Collapses to a plain node when nothing inside is a
    /// marker.
    ///
    /// A plain head is validated like [`Node::call`]; a head that is itself
    /// a marker is validated once it has been expanded.
    pub fn call(head: Template, args: Vec<TemplateArg>) -> Result<Self> {
        if let Template::Node(node) = &head {
            check_head(node)?;
        }
        Ok(Template::apply(head, args))
    }

    fn apply(head: Template, args: Vec<TemplateArg>) -> Self {
        match head {
            Template::Node(head) if args.iter().all(TemplateArg::is_plain) => {
                let args = args.into_iter().filter_map(TemplateArg::into_plain).collect();
                Template::Node(Node::call_unchecked(head, args))
            }
            head => Template::Call(Box::new(head), args),
        }
    }

    /// A pairlist template, collapsing like [`Template::call`].
    pub fn pairlist(args: Vec<TemplateArg>) -> Self {
        if args.iter().all(TemplateArg::is_plain) {
            let args = args.into_iter().filter_map(TemplateArg::into_plain).collect();
            Template::Node(Node::pairlist(args))
        } else {
            Template::Pairlist(args)
        }
    }

    /// Returns true if the template contains no marker.
    pub fn is_plain(&self) -> bool {
        matches!(self, Template::Node(_))
    }

    /// Interprets host syntax as a template.
    ///
    /// `Unquote` becomes a single unquote, `UnquoteSplice` in an unnamed
    /// argument position becomes a splice, and an unnamed argument of the form
    /// `lhs := value` becomes a definition. The left-hand side of `:=` may be
    /// an unquote (its operand computes the name), an identifier or a string
    /// literal (taken literally), or any other expression (evaluated).
    ///
    /// Splices anywhere else fail with `MisplacedSplice`.
    ///
    /// ```
    /// # use quasi::{Syntax, SyntaxArg, Template, TemplateArg};
    /// let syntax = Syntax::apply(
    ///     Syntax::ident("f"),
    ///     vec![SyntaxArg::positional(Syntax::unquote_splice(Syntax::ident("xs")))],
    /// );
    /// match Template::from_syntax(&syntax)? {
    ///     Template::Call(_, args) => assert!(matches!(args[0], TemplateArg::Splice(_))),
    ///     _ => unreachable!(),
    /// }
    /// # Ok::<(), quasi::Error>(())
    /// ```
    pub fn from_syntax(syntax: &Syntax) -> Result<Template> {
        convert(syntax, &mut Path::root())
    }

    /// Interprets a node as a template, reading calls to `!!`, `!!!` and
    /// `:=` as the corresponding markers.
    pub fn from_node(node: &Node) -> Result<Template> {
        Template::from_syntax(&Syntax::from(node))
    }
}

impl TemplateArg {
    /// An unnamed argument.
    pub fn positional(value: impl Into<Template>) -> Self {
        TemplateArg::Arg {
            name: None,
            value: value.into(),
        }
    }

    /// An argument with a literal name.
    pub fn named(name: &str, value: impl Into<Template>) -> Self {
        TemplateArg::Arg {
            name: Some(name.into()),
            value: value.into(),
        }
    }

    /// A splice of the sequence `source` evaluates to.
    pub fn splice(source: Node) -> Self {
        TemplateArg::Splice(source)
    }

    /// An argument named by the value of `name`.
    pub fn define(name: Node, value: impl Into<Template>) -> Self {
        TemplateArg::Define {
            name,
            value: value.into(),
        }
    }

    /// Returns true for an ordinary argument with a marker-free value.
    pub fn is_plain(&self) -> bool {
        matches!(self, TemplateArg::Arg { value, .. } if value.is_plain())
    }

    fn into_plain(self) -> Option<Argument> {
        match self {
            TemplateArg::Arg {
                name,
                value: Template::Node(node),
            } => Some(Argument::new(name.as_deref(), node)),
            _ => None,
        }
    }
}

impl From<Node> for Template {
    fn from(node: Node) -> Self {
        Template::Node(node)
    }
}

impl From<Argument> for TemplateArg {
    fn from(arg: Argument) -> Self {
        let (name, value) = arg.into_parts();
        TemplateArg::Arg {
            name,
            value: Template::Node(value),
        }
    }
}

fn convert(syntax: &Syntax, path: &mut Path) -> Result<Template> {
    match syntax {
        Syntax::Literal(_) | Syntax::Ident(_) => Ok(Template::Node(quote_explicit(syntax))),
        Syntax::Unquote(source) => Ok(Template::Single(quote_explicit(source))),
        Syntax::UnquoteSplice(_) => Err(Error::new(ErrorCode::MisplacedSplice).at(path)),
        Syntax::Apply(head, args) => {
            path.push(Step::Head);
            let head = convert(head, path)?;
            path.pop();
            let args = convert_args(args, path)?;
            Ok(Template::apply(head, args))
        }
        Syntax::List(args) => Ok(Template::pairlist(convert_args(args, path)?)),
    }
}

fn convert_args(args: &[SyntaxArg], path: &mut Path) -> Result<Vec<TemplateArg>> {
    let mut converted = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        path.push(Step::Arg(i));
        converted.push(convert_arg(arg, path)?);
        path.pop();
    }
    Ok(converted)
}

fn convert_arg(arg: &SyntaxArg, path: &mut Path) -> Result<TemplateArg> {
    match (&arg.name, &arg.value) {
        (None, Syntax::UnquoteSplice(source)) => Ok(TemplateArg::Splice(quote_explicit(source))),
        (None, Syntax::Apply(head, parts)) if is_definition(head, parts) => {
            let name = match &parts[0].value {
                Syntax::Unquote(source) => quote_explicit(source),
                Syntax::Ident(name) if !name.is_empty() => Node::constant(&**name),
                other => quote_explicit(other),
            };
            let value = convert(&parts[1].value, path)?;
            Ok(TemplateArg::Define { name, value })
        }
        (name, value) => Ok(TemplateArg::Arg {
            name: name.clone(),
            value: convert(value, path)?,
        }),
    }
}

fn is_definition(head: &Syntax, parts: &[SyntaxArg]) -> bool {
    matches!(head, Syntax::Ident(name) if &**name == DEFINE)
        && parts.len() == 2
        && parts.iter().all(|part| part.name.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Syntax {
        Syntax::ident(name)
    }

    #[test]
    fn marker_free_syntax_collapses_to_a_node() {
        let syntax = Syntax::apply(
            ident("f"),
            vec![
                SyntaxArg::positional(ident("x")),
                SyntaxArg::named("y", Syntax::from(1)),
            ],
        );
        let template = Template::from_syntax(&syntax).unwrap();
        assert_eq!(template, Template::Node(quote_explicit(&syntax)));
    }

    #[test]
    fn splice_outside_argument_position() {
        let syntax = Syntax::apply(
            ident("f"),
            vec![SyntaxArg::named("a", Syntax::unquote_splice(ident("xs")))],
        );
        let err = Template::from_syntax(&syntax).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::MisplacedSplice);
        assert_eq!(err.path().unwrap().steps(), &[Step::Arg(0)]);

        let err = Template::from_syntax(&Syntax::unquote_splice(ident("xs"))).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::MisplacedSplice);
    }

    #[test]
    fn definitions() {
        let syntax = Syntax::apply(
            ident("f"),
            vec![
                SyntaxArg::positional(Syntax::define(Syntax::unquote(ident("nm")), Syntax::from(1))),
                SyntaxArg::positional(Syntax::define(ident("b"), Syntax::from(2))),
            ],
        );
        let args = match Template::from_syntax(&syntax).unwrap() {
            Template::Call(_, args) => args,
            other => panic!("unexpected template {:?}", other),
        };
        assert_eq!(
            args,
            vec![
                TemplateArg::define(Node::symbol("nm").unwrap(), Node::constant(1)),
                TemplateArg::define(Node::constant("b"), Node::constant(2)),
            ]
        );
    }

    #[test]
    fn from_node_reads_unquote_calls() {
        let node = Node::call(
            Node::symbol("f").unwrap(),
            vec![Argument::positional(
                Node::call(
                    Node::symbol("!!").unwrap(),
                    vec![Argument::positional(Node::symbol("x").unwrap())],
                )
                .unwrap(),
            )],
        )
        .unwrap();
        match Template::from_node(&node).unwrap() {
            Template::Call(_, args) => assert_eq!(
                args,
                vec![TemplateArg::positional(Template::single(
                    Node::symbol("x").unwrap()
                ))]
            ),
            other => panic!("unexpected template {:?}", other),
        }
    }
}
