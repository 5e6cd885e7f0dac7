//! Template expansion.
//!
//! The [`Quasiquoter`] walks a [`Template`] top-down and replaces every marker
//! with the result of evaluating its source expression in the ambient
//! environment:
//!
//! - a single unquote becomes the node its source evaluates to (scalars are
//!   lifted to constants, quoted expressions are used as-is);
//! - a splice becomes one argument per element of the sequence its source
//!   evaluates to, taking element names from named lists;
//! - a definition becomes an argument named by the string its name source
//!   evaluates to.
//!
//! Marker sources are evaluated, never expanded as templates themselves, and
//! markers in nested calls are resolved against the same environment as the
//! outer call. Expansion is all-or-nothing: the first failure is returned,
//! annotated with the path to the offending marker, and no partial tree
//! escapes.

use log::trace;

use crate::error::{Error, ErrorCode, Path, Result, Step};
use crate::eval::eval;
use crate::node::check_head;
use crate::template::{Template, TemplateArg};
use crate::{Argument, Env, Node, Value};

/// Options for expanding templates.
#[derive(Clone, Debug)]
pub struct Options {
    max_depth: usize,
    splice_null: bool,
}

impl Options {
    /// Set the maximum nesting depth of template calls and pairlists.
    ///
    /// Expanding a template nested deeper than this fails with
    /// `RecursionLimitExceeded`.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set whether splicing `NULL` is allowed, contributing no arguments.
    ///
    /// When disabled, splicing `NULL` fails with `SpliceTypeError`.
    pub fn with_splice_null(mut self, allow: bool) -> Self {
        self.splice_null = allow;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: 128,
            splice_null: true,
        }
    }
}

/// Expands templates against an environment.
pub struct Quasiquoter<'a> {
    env: &'a Env,
    options: Options,
}

impl<'a> Quasiquoter<'a> {
    /// Creates a quasiquoter evaluating marker sources in `env`.
    pub fn new(env: &'a Env) -> Self {
        Quasiquoter {
            env,
            options: Options::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Expands a template into a marker-free node.
    ///
    /// ```
    /// # use quasi::{Env, Node, Quasiquoter, Template, TemplateArg, Value};
    /// let env = Env::new();
    /// env.bind("xs", Value::list(vec![1, 2]));
    /// let template = Template::call(
    ///     Template::from(Node::symbol("f")?),
    ///     vec![TemplateArg::splice(Node::symbol("xs")?), TemplateArg::positional(Node::symbol("y")?)],
    /// )?;
    /// let node = Quasiquoter::new(&env).expand(&template)?;
    /// assert_eq!(node.to_string(), "f(1, 2, y)");
    /// # Ok::<(), quasi::Error>(())
    /// ```
    pub fn expand(&self, template: &Template) -> Result<Node> {
        self.expand_node(template, &mut Path::root(), 0)
    }

    /// Expands an argument list, as found in a call or pairlist template.
    pub fn expand_args(&self, args: &[TemplateArg]) -> Result<Vec<Argument>> {
        self.expand_arg_list(args, &mut Path::root(), 0)
    }

    fn expand_node(&self, template: &Template, path: &mut Path, depth: usize) -> Result<Node> {
        if depth > self.options.max_depth {
            return Err(Error::new(ErrorCode::RecursionLimitExceeded).at(path));
        }
        match template {
            Template::Node(node) => Ok(node.clone()),
            Template::Single(source) => self.unquote(source, path),
            Template::Call(head, args) => {
                path.push(Step::Head);
                let expanded = self.expand_node(head, path, depth + 1)?;
                if !head.is_plain() {
                    check_head(&expanded).map_err(|e| e.at(path))?;
                }
                path.pop();
                let args = self.expand_arg_list(args, path, depth + 1)?;
                Ok(Node::call_unchecked(expanded, args))
            }
            Template::Pairlist(args) => {
                let args = self.expand_arg_list(args, path, depth + 1)?;
                Ok(Node::pairlist(args))
            }
        }
    }

    fn expand_arg_list(
        &self,
        args: &[TemplateArg],
        path: &mut Path,
        depth: usize,
    ) -> Result<Vec<Argument>> {
        let mut expanded = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            match arg {
                TemplateArg::Arg { name, value } => {
                    path.push(Step::Arg(i));
                    let value = self.expand_node(value, path, depth)?;
                    path.pop();
                    expanded.push(Argument::new(name.as_deref(), value));
                }
                TemplateArg::Splice(source) => {
                    path.push(Step::Arg(i));
                    self.splice(source, path, &mut expanded)?;
                    path.pop();
                }
                TemplateArg::Define { name, value } => {
                    path.push(Step::Name(i));
                    let name = self.definition_name(name, path)?;
                    path.pop();
                    path.push(Step::Arg(i));
                    let value = self.expand_node(value, path, depth)?;
                    path.pop();
                    expanded.push(Argument::named(&name, value));
                }
            }
        }
        Ok(expanded)
    }

    fn unquote(&self, source: &Node, path: &Path) -> Result<Node> {
        trace!("unquoting `{}' at {}", source, path);
        let value = eval(source, self.env).map_err(|e| {
            Error::new(ErrorCode::UnquoteTypeError("an expression that failed to evaluate"))
                .at(path)
                .caused_by(e)
        })?;
        value
            .to_node()
            .ok_or_else(|| Error::new(ErrorCode::UnquoteTypeError(value.type_name())).at(path))
    }

    fn splice(&self, source: &Node, path: &mut Path, out: &mut Vec<Argument>) -> Result<()> {
        trace!("splicing `{}' at {}", source, path);
        let value = eval(source, self.env).map_err(|e| {
            Error::new(ErrorCode::SpliceTypeError("an expression that failed to evaluate"))
                .at(path)
                .caused_by(e)
        })?;
        match value {
            Value::Null if self.options.splice_null => Ok(()),
            Value::List(list) => {
                out.reserve(list.len());
                for (j, entry) in list.iter().enumerate() {
                    let node = entry.value.to_node().ok_or_else(|| {
                        path.push(Step::Arg(j));
                        let err =
                            Error::new(ErrorCode::SpliceTypeError(entry.value.type_name())).at(path);
                        path.pop();
                        err
                    })?;
                    let name = entry.name.as_deref().filter(|name| !name.is_empty());
                    out.push(Argument::new(name, node));
                }
                Ok(())
            }
            Value::Language(Node::Pairlist(list)) => {
                out.extend(list.args().iter().cloned());
                Ok(())
            }
            other => Err(Error::new(ErrorCode::SpliceTypeError(other.type_name())).at(path)),
        }
    }

    fn definition_name(&self, source: &Node, path: &Path) -> Result<String> {
        let value = eval(source, self.env).map_err(|e| {
            Error::new(ErrorCode::InvalidDefinitionName(
                "an expression that failed to evaluate",
            ))
            .at(path)
            .caused_by(e)
        })?;
        match &value {
            Value::String(s) if !s.is_empty() => Ok(s.to_string()),
            Value::String(_) => {
                Err(Error::new(ErrorCode::InvalidDefinitionName("an empty string")).at(path))
            }
            Value::Language(Node::Symbol(sym)) if !sym.is_missing() => Ok(sym.name().to_owned()),
            other => Err(Error::new(ErrorCode::InvalidDefinitionName(other.type_name())).at(path)),
        }
    }
}

/// Expands `template` against `env` with default options.
pub fn expand(template: &Template, env: &Env) -> Result<Node> {
    Quasiquoter::new(env).expand(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    fn call(head: &str, args: Vec<Argument>) -> Node {
        Node::call(sym(head), args).unwrap()
    }

    #[test]
    fn single_constant_source() {
        let template = Template::call(
            sym("f").into(),
            vec![
                TemplateArg::positional(Template::single(Node::constant(-1))),
                TemplateArg::positional(sym("y")),
            ],
        )
        .unwrap();
        let node = expand(&template, &Env::new()).unwrap();
        assert_eq!(
            node,
            call(
                "f",
                vec![Argument::positional(-1), Argument::positional(sym("y"))]
            )
        );
    }

    #[test]
    fn splice_keeps_list_names() {
        let env = Env::new();
        env.bind(
            "args",
            Value::named_list(vec![(Some("a"), Value::from(1)), (None, Value::from(2))]),
        );
        let template = Template::call(
            sym("f").into(),
            vec![TemplateArg::splice(sym("args"))],
        )
        .unwrap();
        let node = expand(&template, &env).unwrap();
        assert_eq!(
            node,
            call("f", vec![Argument::named("a", 1), Argument::positional(2)])
        );
    }

    #[test]
    fn splice_of_a_quoted_pairlist() {
        let env = Env::new();
        let formals = Node::pairlist(vec![
            Argument::named("x", Node::missing()),
            Argument::named("y", 1),
            Argument::positional(sym("z")),
        ]);
        env.bind("formals", Value::Language(formals));
        let template = Template::call(
            sym("f").into(),
            vec![
                TemplateArg::positional(Node::constant(0)),
                TemplateArg::splice(sym("formals")),
            ],
        )
        .unwrap();
        let node = expand(&template, &env).unwrap();
        let args = node.as_call().unwrap().args();
        assert_eq!(args.len(), 4);
        assert_eq!(args[1].name(), Some("x"));
        assert!(args[1].value().is_missing());
        assert_eq!(args[2], Argument::named("y", 1));
        assert_eq!(args[3], Argument::positional(sym("z")));
        assert_eq!(node.to_string(), "f(0, x = , y = 1, z)");
    }

    #[test]
    fn splice_null_is_configurable() {
        let env = Env::new();
        env.bind("nothing", Value::Null);
        let template = Template::call(
            sym("f").into(),
            vec![TemplateArg::splice(sym("nothing"))],
        )
        .unwrap();
        assert_eq!(expand(&template, &env).unwrap(), call("f", vec![]));

        let strict = Quasiquoter::new(&env).with_options(Options::default().with_splice_null(false));
        let err = strict.expand(&template).unwrap_err();
        assert!(matches!(err.code(), ErrorCode::SpliceTypeError(_)));
    }

    #[test]
    fn splice_of_a_scalar_fails_with_path() {
        let env = Env::new();
        env.bind("x", Value::from(1));
        let template = Template::call(
            sym("f").into(),
            vec![
                TemplateArg::positional(Node::constant(0)),
                TemplateArg::splice(sym("x")),
            ],
        )
        .unwrap();
        let err = expand(&template, &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::SpliceTypeError("a number"));
        assert_eq!(err.path().unwrap().steps(), &[Step::Arg(1)]);
    }

    #[test]
    fn unquote_failures() {
        let env = Env::new();
        env.bind("xs", Value::list(vec![1]));
        let template = Template::single(sym("xs"));
        let err = expand(&template, &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::UnquoteTypeError("a list"));

        let template = Template::single(sym("unbound"));
        let err = expand(&template, &env).unwrap_err();
        assert!(matches!(err.code(), ErrorCode::UnquoteTypeError(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn definition_names() {
        let env = Env::new();
        env.bind("nm", Value::from("width"));
        env.bind("sym", Value::Language(sym("height")));
        let template = Template::call(
            sym("f").into(),
            vec![
                TemplateArg::define(sym("nm"), Node::constant(1)),
                TemplateArg::define(sym("sym"), Node::constant(2)),
            ],
        )
        .unwrap();
        assert_eq!(
            expand(&template, &env).unwrap(),
            call(
                "f",
                vec![Argument::named("width", 1), Argument::named("height", 2)]
            )
        );

        let empty = Template::call(
            sym("f").into(),
            vec![TemplateArg::define(Node::constant(""), Node::constant(1))],
        )
        .unwrap();
        let err = expand(&empty, &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::InvalidDefinitionName("an empty string"));
        assert_eq!(err.path().unwrap().steps(), &[Step::Name(0)]);
    }

    #[test]
    fn depth_limit() {
        let mut template = Template::single(Node::constant(1));
        for _ in 0..10 {
            template = Template::call(sym("f").into(), vec![TemplateArg::positional(template)])
                .unwrap();
        }
        let env = Env::new();
        assert!(expand(&template, &env).is_ok());
        let shallow = Quasiquoter::new(&env).with_options(Options::default().with_max_depth(5));
        let err = shallow.expand(&template).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::RecursionLimitExceeded);
    }

    #[test]
    fn missing_argument_is_preserved() {
        let template = Template::call(
            sym("[").into(),
            vec![
                TemplateArg::positional(sym("x")),
                TemplateArg::positional(Node::missing()),
                TemplateArg::positional(Template::single(Node::constant(1))),
            ],
        )
        .unwrap();
        let node = expand(&template, &Env::new()).unwrap();
        assert!(node.as_call().unwrap().args()[1].value().is_missing());
    }
}
