//! Evaluation of expression trees.
//!
//! The evaluator dispatches on the shape of the node only. What happens to
//! the arguments of a call is decided by the callable being invoked:
//! builtins get their arguments evaluated left to right, specials get the
//! call unevaluated, and closures get a promise per argument.

use std::rc::Rc;

use log::trace;

use crate::capture::CallContext;
use crate::env::{Binding, DotArg, Promise};
use crate::error::{Error, ErrorCode, Result};
use crate::value::{Closure, Entry, Function};
use crate::{Argument, Call, Env, Node, Value};

/// Name of the variable-length argument tail.
pub const DOTS: &str = "...";

/// Evaluates `node` in `env`.
///
/// ```
/// # use quasi::{eval, prim, Argument, Node, Value};
/// let node = Node::call(
///     Node::symbol("+")?,
///     vec![Argument::positional(1), Argument::positional(2)],
/// )?;
/// assert_eq!(eval(&node, &prim::base_env())?, Value::from(3));
/// # Ok::<(), quasi::Error>(())
/// ```
pub fn eval(node: &Node, env: &Env) -> Result<Value> {
    match node {
        Node::Constant(c) => Ok(Value::from(c.clone())),
        Node::Symbol(sym) if sym.is_missing() => {
            Err(Error::new(ErrorCode::NotEvaluable(node.kind_name())))
        }
        Node::Symbol(sym) => env.lookup(sym.name()),
        Node::Call(call) => eval_call(call, env),
        Node::Pairlist(_) => Err(Error::new(ErrorCode::NotEvaluable(node.kind_name()))),
    }
}

fn eval_call(call: &Call, env: &Env) -> Result<Value> {
    let function = match eval(call.head(), env)? {
        Value::Function(function) => function,
        other => return Err(Error::new(ErrorCode::NotCallable(other.type_name()))),
    };
    trace!("calling `{}' with {} argument(s)", call.head(), call.args().len());
    match &function {
        Function::Builtin(builtin) => {
            let args = eval_args(call.args(), env)?;
            builtin.call(&args)
        }
        Function::Special(special) => special.call(&CallContext::new(call.clone(), env.clone())),
        Function::Closure(closure) => apply_closure(closure, call, env),
    }
}

/// Evaluates arguments left to right, expanding a `...` argument into the
/// tail it is bound to.
pub fn eval_args(args: &[Argument], env: &Env) -> Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(args.len());
    for arg in args {
        if is_dots(arg) {
            for dot in lookup_dots(env)?.iter() {
                entries.push(Entry {
                    name: dot.name.clone(),
                    value: dot.promise.force()?,
                });
            }
        } else {
            entries.push(Entry {
                name: arg.name().map(Into::into),
                value: eval(arg.value(), env)?,
            });
        }
    }
    Ok(entries)
}

pub(crate) fn is_dots(arg: &Argument) -> bool {
    arg.name().is_none() && matches!(arg.value(), Node::Symbol(sym) if sym.name() == DOTS)
}

pub(crate) fn lookup_dots(env: &Env) -> Result<Rc<[DotArg]>> {
    match env.get(DOTS) {
        Some(Binding::Dots(dots)) => Ok(dots),
        _ => Err(Error::new(ErrorCode::UnboundName(DOTS.into()))),
    }
}

/// Turns the arguments of a call into promises, forwarding `...`.
fn promise_args(args: &[Argument], env: &Env) -> Result<Vec<DotArg>> {
    let mut actuals = Vec::with_capacity(args.len());
    for arg in args {
        if is_dots(arg) {
            actuals.extend(lookup_dots(env)?.iter().cloned());
        } else {
            actuals.push(DotArg {
                name: arg.name().map(Into::into),
                promise: Rc::new(Promise::new(arg.value().clone(), env.clone())),
            });
        }
    }
    Ok(actuals)
}

fn apply_closure(closure: &Closure, call: &Call, env: &Env) -> Result<Value> {
    let params = closure.params();
    let actuals = promise_args(call.args(), env)?;
    let dots_pos = params.iter().position(|param| &*param.name == DOTS);

    // Exact name matches take precedence over position.
    let mut supplied: Vec<Option<Rc<Promise>>> = vec![None; params.len()];
    let mut matched = vec![false; actuals.len()];
    for (i, actual) in actuals.iter().enumerate() {
        let name = match &actual.name {
            Some(name) => name,
            None => continue,
        };
        let slot = params
            .iter()
            .position(|param| param.name == *name && &*param.name != DOTS);
        if let Some(slot) = slot {
            if supplied[slot].is_some() {
                return Err(Error::new(ErrorCode::ArgumentMismatch(
                    format!("formal argument `{}' matched by multiple actual arguments", name)
                        .into(),
                )));
            }
            supplied[slot] = Some(Rc::clone(&actual.promise));
            matched[i] = true;
        }
    }

    let positional_end = dots_pos.unwrap_or(params.len());
    let mut cursor = 0;
    let mut dots = Vec::new();
    for (actual, _) in actuals.iter().zip(&matched).filter(|(_, matched)| !**matched) {
        if actual.name.is_none() {
            while cursor < positional_end && supplied[cursor].is_some() {
                cursor += 1;
            }
            if cursor < positional_end {
                supplied[cursor] = Some(Rc::clone(&actual.promise));
                continue;
            }
        }
        if dots_pos.is_none() {
            return Err(Error::new(ErrorCode::ArgumentMismatch(
                format!("unused argument `{}'", unused(actual)).into(),
            )));
        }
        dots.push(actual.clone());
    }

    let mut context = CallContext::new(call.clone(), env.clone());
    for (param, promise) in params.iter().zip(&supplied) {
        if &*param.name != DOTS {
            let expr = promise
                .as_ref()
                .map_or_else(Node::missing, |promise| promise.expr().clone());
            context = context.with_parameter(&param.name, expr);
        }
    }
    let dots: Option<Rc<[DotArg]>> = dots_pos.map(|_| dots.into());
    if let Some(dots) = &dots {
        context = context.with_dots(Rc::clone(dots));
    }

    let frame = Env::function_frame(closure.env(), context);
    for (param, promise) in params.iter().zip(supplied) {
        let binding = if &*param.name == DOTS {
            dots.as_ref()
                .map_or(Binding::Missing, |dots| Binding::Dots(Rc::clone(dots)))
        } else if let Some(promise) = promise {
            Binding::Promise(promise)
        } else if let Some(default) = &param.default {
            Binding::Promise(Rc::new(Promise::new(default.clone(), frame.clone())))
        } else {
            Binding::Missing
        };
        frame.set(&param.name, binding);
    }
    trace!("entering closure body `{}'", closure.body());
    eval(closure.body(), &frame)
}

fn unused(actual: &DotArg) -> String {
    match &actual.name {
        Some(name) => format!("{} = {}", name, actual.promise.expr()),
        None => actual.promise.expr().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::capture_caller_argument;
    use crate::value::Param;

    fn sym(name: &str) -> Node {
        Node::symbol(name).unwrap()
    }

    fn call(head: &str, args: Vec<Argument>) -> Node {
        Node::call(sym(head), args).unwrap()
    }

    fn add_env() -> Env {
        let env = Env::new();
        env.bind(
            "+",
            Value::builtin("+", |args| {
                let mut sum = 0;
                for arg in args {
                    sum += arg.value.as_number().and_then(|n| n.as_i64()).unwrap_or(0);
                }
                Ok(Value::from(sum))
            }),
        );
        env
    }

    fn closure(params: &[&str], body: Node, env: &Env) -> Value {
        let params = params
            .iter()
            .map(|name| Param {
                name: (*name).into(),
                default: None,
            })
            .collect();
        Value::Function(Function::Closure(Rc::new(Closure::new(params, body, env.clone()))))
    }

    #[test]
    fn constants_and_symbols() {
        let env = Env::new();
        env.bind("x", "hello");
        assert_eq!(eval(&Node::constant(1.5), &env).unwrap(), Value::from(1.5));
        assert_eq!(eval(&sym("x"), &env).unwrap(), Value::from("hello"));
        let err = eval(&sym("y"), &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::UnboundName("y".into()));
    }

    #[test]
    fn structural_misuse() {
        let env = add_env();
        let err = eval(&Node::pairlist(vec![]), &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::NotEvaluable("a pairlist"));
        let err = eval(&Node::missing(), &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::NotEvaluable("the missing argument"));
        env.bind("n", 1);
        let err = eval(&call("n", vec![]), &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::NotCallable("a number"));
    }

    #[test]
    fn builtins_are_strict() {
        let env = add_env();
        let node = call("+", vec![Argument::positional(1), Argument::positional(2)]);
        assert_eq!(eval(&node, &env).unwrap(), Value::from(3));
        let node = call("+", vec![Argument::positional(sym("nope"))]);
        assert!(eval(&node, &env).is_err());
    }

    #[test]
    fn closures_are_lazy() {
        let env = add_env();
        env.bind("f", closure(&["x", "y"], sym("y"), &env));
        let node = call(
            "f",
            vec![Argument::positional(sym("unbound")), Argument::positional(2)],
        );
        assert_eq!(eval(&node, &env).unwrap(), Value::from(2));
    }

    #[test]
    fn named_arguments_match_first() {
        let env = add_env();
        env.bind("f", closure(&["x", "y"], sym("x"), &env));
        let node = call(
            "f",
            vec![Argument::positional(1), Argument::named("x", 2)],
        );
        assert_eq!(eval(&node, &env).unwrap(), Value::from(2));
    }

    #[test]
    fn unused_arguments() {
        let env = add_env();
        env.bind("f", closure(&["x"], sym("x"), &env));
        let node = call("f", vec![Argument::positional(1), Argument::positional(2)]);
        let err = eval(&node, &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::ArgumentMismatch("unused argument `2'".into()));
    }

    #[test]
    fn missing_parameters_fail_when_used() {
        let env = add_env();
        env.bind("f", closure(&["x"], sym("x"), &env));
        let err = eval(&call("f", vec![]), &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::MissingArgument("x".into()));
    }

    #[test]
    fn self_referencing_default_fails() {
        let env = add_env();
        let params = vec![Param {
            name: "x".into(),
            default: Some(sym("x")),
        }];
        let f = Closure::new(params, sym("x"), env.clone());
        env.bind("f", Value::Function(Function::Closure(Rc::new(f))));
        let err = eval(&call("f", vec![]), &env).unwrap_err();
        assert_eq!(err.code(), &ErrorCode::RecursivePromise);
        let node = call("f", vec![Argument::positional(7)]);
        assert_eq!(eval(&node, &env).unwrap(), Value::from(7));
    }

    #[test]
    fn dots_are_forwarded() {
        let env = add_env();
        let body = call("+", vec![Argument::positional(sym("..."))]);
        env.bind("f", closure(&["..."], body, &env));
        let node = call(
            "f",
            vec![
                Argument::positional(1),
                Argument::named("a", 2),
                Argument::positional(3),
            ],
        );
        assert_eq!(eval(&node, &env).unwrap(), Value::from(6));
    }

    #[test]
    fn frames_record_their_context() {
        let env = add_env();
        env.bind(
            "capture_x",
            Value::special("capture_x", |ctx| {
                let outer = CallContext::from_env(ctx.env())?;
                capture_caller_argument("x", &outer).map(Value::Language)
            }),
        );
        env.bind("f", closure(&["x"], call("capture_x", vec![]), &env));
        let expr = call("+", vec![Argument::positional(sym("a")), Argument::positional(sym("b"))]);
        let node = call("f", vec![Argument::positional(expr.clone())]);
        assert_eq!(eval(&node, &env).unwrap(), Value::Language(expr));
    }
}
