//! Quoting: turning host syntax into nodes without evaluating it.
//!
//! There are three ways to capture an expression, each a separate function:
//!
//! - [`quote_explicit`] quotes the syntax it is given, literally;
//! - [`quote_with_expansion`] quotes the syntax it is given, resolving
//!   unquote markers against an environment first;
//! - [`capture_caller_argument`] and [`capture_all_arguments`] quote what
//!   the *caller* of a function wrote for its arguments, found through an
//!   explicit [`CallContext`].

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::env::DotArg;
use crate::error::{Error, ErrorCode, Result};
use crate::expand::Quasiquoter;
use crate::syntax::{Syntax, SyntaxArg, UNQUOTE, UNQUOTE_SPLICE};
use crate::{Argument, Call, Env, Node, Symbol, Template};

/// Quotes `syntax` as written.
///
/// This never fails and never evaluates anything. Unquote forms are kept as
/// calls to `!!` and `!!!`, and `name := value` stays a call to `:=`. The
/// tree is reproduced even where [`Node::call`] would reject the head, as
/// in `1(2)`; evaluating such a call fails with `NotCallable`.
///
/// ```
/// # use quasi::{quote_explicit, Syntax, SyntaxArg};
/// let syntax = Syntax::apply(
///     Syntax::ident("f"),
///     vec![SyntaxArg::positional(Syntax::unquote(Syntax::ident("x")))],
/// );
/// assert_eq!(quote_explicit(&syntax).to_string(), "f(!!x)");
/// ```
pub fn quote_explicit(syntax: &Syntax) -> Node {
    match syntax {
        Syntax::Literal(c) => Node::Constant(c.clone()),
        Syntax::Ident(name) => name_node(name),
        Syntax::Apply(head, args) => Node::call_unchecked(quote_explicit(head), quote_args(args)),
        Syntax::List(args) => Node::pairlist(quote_args(args)),
        Syntax::Unquote(expr) => {
            Node::call_unchecked(name_node(UNQUOTE), vec![Argument::positional(quote_explicit(expr))])
        }
        Syntax::UnquoteSplice(expr) => Node::call_unchecked(
            name_node(UNQUOTE_SPLICE),
            vec![Argument::positional(quote_explicit(expr))],
        ),
    }
}

fn name_node(name: &str) -> Node {
    Symbol::new(name).map_or_else(|_| Node::missing(), Node::Symbol)
}

fn quote_args(args: &[SyntaxArg]) -> Vec<Argument> {
    args.iter()
        .map(|arg| Argument::new(arg.name.as_deref(), quote_explicit(&arg.value)))
        .collect()
}

/// Quotes `syntax`, first replacing its unquote markers with values computed
/// in `env`.
///
/// ```
/// # use quasi::{quote_with_expansion, Env, Syntax, SyntaxArg, Value};
/// let env = Env::new();
/// env.bind("x", Value::from(10));
/// let syntax = Syntax::apply(
///     Syntax::ident("f"),
///     vec![SyntaxArg::positional(Syntax::unquote(Syntax::ident("x")))],
/// );
/// assert_eq!(quote_with_expansion(&syntax, &env)?.to_string(), "f(10)");
/// # Ok::<(), quasi::Error>(())
/// ```
pub fn quote_with_expansion(syntax: &Syntax, env: &Env) -> Result<Node> {
    let template = Template::from_syntax(syntax)?;
    Quasiquoter::new(env).expand(&template)
}

/// What a function invocation received: the call as written, the
/// environment it was written in, and the expression supplied for each
/// parameter.
///
/// Function frames record their context, so a function body can retrieve it
/// with [`CallContext::from_env`]. Specials receive theirs directly.
#[derive(Clone)]
pub struct CallContext {
    call: Call,
    env: Env,
    params: Vec<(Box<str>, Node)>,
    dots: Option<Rc<[DotArg]>>,
}

impl CallContext {
    /// Creates a context for `call`, written in `env`, with no parameters.
    pub fn new(call: Call, env: Env) -> Self {
        CallContext {
            call,
            env,
            params: Vec::new(),
            dots: None,
        }
    }

    /// Records the expression supplied for parameter `name`; the missing
    /// argument if there was none.
    pub fn with_parameter(mut self, name: &str, expr: Node) -> Self {
        self.params.push((name.into(), expr));
        self
    }

    /// Records the variable-length tail of the arguments.
    pub fn with_dots(mut self, dots: Rc<[DotArg]>) -> Self {
        self.dots = Some(dots);
        self
    }

    /// Finds the context of the innermost function invocation `env` belongs
    /// to.
    ///
    /// Fails with `NoCallingContext` outside of any function body.
    pub fn from_env(env: &Env) -> Result<Rc<CallContext>> {
        env.context()
            .ok_or_else(|| Error::new(ErrorCode::NoCallingContext(None)))
    }

    /// The call as written.
    pub fn call(&self) -> &Call {
        &self.call
    }

    /// The arguments of the call as written.
    pub fn args(&self) -> &[Argument] {
        self.call.args()
    }

    /// The environment of the call site.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// The expression supplied for parameter `name`, if `name` is a
    /// parameter.
    pub fn parameter(&self, name: &str) -> Option<&Node> {
        self.params
            .iter()
            .find(|(param, _)| &**param == name)
            .map(|(_, expr)| expr)
    }

    /// The names of the parameters, in declaration order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(name, _)| &**name)
    }

    /// The variable-length tail, if the function takes one.
    pub fn dots(&self) -> Option<&[DotArg]> {
        self.dots.as_deref()
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("call", &Node::Call(self.call.clone()).to_string())
            .field("params", &self.params)
            .field("dots", &self.dots.as_ref().map(|dots| dots.len()))
            .finish()
    }
}

/// Returns the expression the caller wrote for parameter `name`, without
/// evaluating it.
///
/// If the parameter exists but the caller supplied nothing for it, the
/// result is the missing argument, even when the parameter has a default.
/// Fails with `NoCallingContext` if `name` is not a parameter.
pub fn capture_caller_argument(name: &str, context: &CallContext) -> Result<Node> {
    let expr = context
        .parameter(name)
        .cloned()
        .ok_or_else(|| Error::new(ErrorCode::NoCallingContext(Some(name.into()))))?;
    debug!("captured `{}' for parameter {}", expr, name);
    Ok(expr)
}

/// Captures the arguments of a function with a variable-length tail.
///
/// The `explicit` arguments are quoted with expansion against the caller's
/// environment and come first, in the given order. Then follows one entry per
/// argument in the tail, captured verbatim with its name.
///
/// Fails with `NoCallingContext` if the function has no tail.
pub fn capture_all_arguments(context: &CallContext, explicit: &[SyntaxArg]) -> Result<Vec<Argument>> {
    let dots = context
        .dots()
        .ok_or_else(|| Error::new(ErrorCode::NoCallingContext(Some("...".into()))))?;
    let mut captured = match quote_with_expansion(&Syntax::list(explicit.to_vec()), context.env())? {
        Node::Pairlist(list) => list.args().to_vec(),
        _ => Vec::new(),
    };
    captured.reserve(dots.len());
    for dot in dots {
        captured.push(Argument::new(dot.name.as_deref(), dot.promise.expr().clone()));
    }
    debug!(
        "captured {} argument(s), {} from the tail",
        captured.len(),
        dots.len()
    );
    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Promise;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    fn context() -> CallContext {
        let call = Call::new(sym("f"), vec![Argument::positional(1)]).unwrap();
        CallContext::new(call, Env::new())
    }

    #[test]
    fn explicit_quoting_keeps_markers() {
        let syntax = Syntax::apply(
            Syntax::ident("f"),
            vec![
                SyntaxArg::positional(Syntax::unquote_splice(Syntax::ident("xs"))),
                SyntaxArg::positional(Syntax::missing()),
            ],
        );
        let node = quote_explicit(&syntax);
        let args = node.as_call().unwrap().args();
        assert_eq!(args[0].value().as_call().unwrap().head_name(), Some("!!!"));
        assert!(args[1].value().is_missing());
    }

    #[test]
    fn explicit_quoting_is_total() {
        let syntax = Syntax::apply(Syntax::from(1), vec![SyntaxArg::positional(Syntax::from(2))]);
        let node = quote_explicit(&syntax);
        assert_eq!(node.as_call().unwrap().head(), &Node::constant(1));
    }

    #[test]
    fn caller_argument() {
        let ctx = context().with_parameter("x", sym("a")).with_parameter("y", Node::missing());
        assert_eq!(capture_caller_argument("x", &ctx).unwrap(), sym("a"));
        assert!(capture_caller_argument("y", &ctx).unwrap().is_missing());
        let err = capture_caller_argument("z", &ctx).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::NoCallingContext(Some("z".into())));
    }

    #[test]
    fn no_context_outside_functions() {
        let err = CallContext::from_env(&Env::new()).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::NoCallingContext(None));
    }

    #[test]
    fn all_arguments_explicit_first() {
        let env = Env::new();
        env.bind("v", 5);
        let dots: Rc<[DotArg]> = vec![
            DotArg {
                name: None,
                promise: Rc::new(Promise::new(sym("p"), env.clone())),
            },
            DotArg {
                name: Some("k".into()),
                promise: Rc::new(Promise::new(sym("q"), env.clone())),
            },
        ]
        .into();
        let call = Call::new(sym("f"), vec![]).unwrap();
        let ctx = CallContext::new(call, env).with_dots(dots);
        let explicit = [SyntaxArg::named("e", Syntax::unquote(Syntax::ident("v")))];
        let captured = capture_all_arguments(&ctx, &explicit).unwrap();
        assert_eq!(
            captured,
            vec![
                Argument::named("e", 5),
                Argument::positional(sym("p")),
                Argument::named("k", sym("q")),
            ]
        );
    }

    #[test]
    fn all_arguments_requires_a_tail() {
        let err = capture_all_arguments(&context(), &[]).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::NoCallingContext(Some("...".into())));
    }
}
