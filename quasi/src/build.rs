//! Programmatic construction of calls.
//!
//! [`build_call`] assembles a call from a function designator and a list of
//! argument templates, expanding markers among the arguments exactly as the
//! [`Quasiquoter`] does inside a call template.

use log::trace;

use crate::error::Result;
use crate::expand::{Options, Quasiquoter};
use crate::template::{Template, TemplateArg};
use crate::{Env, Node};

/// What to put in function position.
#[derive(Debug, Clone, PartialEq)]
pub enum Designator {
    /// A function name; becomes a symbol.
    Name(Box<str>),
    /// A node used verbatim, such as a call returning a function.
    Node(Node),
}

impl Designator {
    fn into_head(self) -> Result<Node> {
        match self {
            Designator::Name(name) => Node::symbol(&name),
            Designator::Node(node) => Ok(node),
        }
    }
}

impl From<&str> for Designator {
    fn from(name: &str) -> Self {
        Designator::Name(name.into())
    }
}

impl From<String> for Designator {
    fn from(name: String) -> Self {
        Designator::Name(name.into_boxed_str())
    }
}

impl From<Node> for Designator {
    fn from(node: Node) -> Self {
        Designator::Node(node)
    }
}

/// Builds a call to `head` with the given arguments, expanding their markers
/// against `env`.
///
/// A string designator becomes a symbol, while a string among the argument
/// values stays a string constant.
///
/// ```
/// # use quasi::{build_call, Env, Node, TemplateArg};
/// let call = build_call(
///     "foo",
///     vec![TemplateArg::define(Node::constant("x"), Node::constant(10))],
///     &Env::new(),
/// )?;
/// assert_eq!(call.to_string(), "foo(x = 10)");
/// # Ok::<(), quasi::Error>(())
/// ```
pub fn build_call(head: impl Into<Designator>, args: Vec<TemplateArg>, env: &Env) -> Result<Node> {
    CallBuilder {
        head: head.into(),
        args,
        options: Options::default(),
    }
    .build(env)
}

/// A fluent interface to [`build_call`].
///
/// ```
/// # use quasi::{CallBuilder, Env, Node, Value};
/// let env = Env::new();
/// env.bind("rest", Value::list(vec![2, 3]));
/// let call = CallBuilder::new("f")
///     .arg(Node::constant(1))
///     .splice(Node::symbol("rest")?)
///     .named("by", Node::constant("row"))
///     .build(&env)?;
/// assert_eq!(call.to_string(), r#"f(1, 2, 3, by = "row")"#);
/// # Ok::<(), quasi::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CallBuilder {
    head: Designator,
    args: Vec<TemplateArg>,
    options: Options,
}

impl CallBuilder {
    /// Starts a call to `head`.
    pub fn new(head: impl Into<Designator>) -> Self {
        CallBuilder {
            head: head.into(),
            args: Vec::new(),
            options: Options::default(),
        }
    }

    /// Appends an unnamed argument.
    pub fn arg(mut self, value: impl Into<Template>) -> Self {
        self.args.push(TemplateArg::positional(value));
        self
    }

    /// Appends a named argument.
    pub fn named(mut self, name: &str, value: impl Into<Template>) -> Self {
        self.args.push(TemplateArg::named(name, value));
        self
    }

    /// Appends the elements of the sequence `source` evaluates to.
    pub fn splice(mut self, source: Node) -> Self {
        self.args.push(TemplateArg::splice(source));
        self
    }

    /// Appends an argument whose name is the value of `name`.
    pub fn define(mut self, name: Node, value: impl Into<Template>) -> Self {
        self.args.push(TemplateArg::define(name, value));
        self
    }

    /// Sets the expansion options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Builds the call, evaluating marker sources in `env`.
    pub fn build(self, env: &Env) -> Result<Node> {
        let head = self.head.into_head()?;
        trace!("building call to `{}'", head);
        let template = Template::call(Template::Node(head), self.args)?;
        Quasiquoter::new(env)
            .with_options(self.options)
            .expand(&template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::{Argument, Value};

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    #[test]
    fn string_designator_is_a_symbol() {
        let node = build_call("paste", vec![TemplateArg::positional(Node::constant("paste"))], &Env::new())
            .unwrap();
        let call = node.as_call().unwrap();
        assert_eq!(call.head(), &sym("paste"));
        assert_eq!(call.args()[0].value(), &Node::constant("paste"));
    }

    #[test]
    fn node_designator_is_verbatim() {
        let factory = Node::call(sym("make_adder"), vec![Argument::positional(1)]).unwrap();
        let node = CallBuilder::new(factory.clone())
            .arg(Node::constant(2))
            .build(&Env::new())
            .unwrap();
        assert_eq!(node.as_call().unwrap().head(), &factory);
        assert_eq!(node.to_string(), "make_adder(1)(2)");
    }

    #[test]
    fn invalid_designators() {
        let err = build_call("", vec![], &Env::new()).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::InvalidSymbol);
        let err = build_call(Node::constant(1), vec![], &Env::new()).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::InvalidHead("a constant"));
    }

    #[test]
    fn markers_among_arguments() {
        let env = Env::new();
        env.bind("nm", "x");
        env.bind("xs", Value::list(vec![1, 2]));
        let node = CallBuilder::new("f")
            .define(sym("nm"), Template::single(Node::constant(10)))
            .splice(sym("xs"))
            .build(&env)
            .unwrap();
        assert_eq!(node.to_string(), "f(x = 10, 1, 2)");
    }

    #[test]
    fn empty_definition_name() {
        let err = build_call(
            "f",
            vec![TemplateArg::define(Node::constant(""), Node::constant(10))],
            &Env::new(),
        )
        .unwrap_err();
        assert_eq!(err.code(), &ErrorCode::InvalidDefinitionName("an empty string"));
    }
}
