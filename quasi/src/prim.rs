//! A standard set of callables.
//!
//! [`base_env`] provides arithmetic, comparison and list construction as
//! builtins, and the quoting functions as specials, so that captured
//! expressions can be evaluated and functions defined in the expression
//! language can capture their callers' arguments.

use std::cmp::Ordering;

use crate::build::{build_call, Designator};
use crate::capture::{
    capture_all_arguments, capture_caller_argument, quote_with_expansion, CallContext,
};
use crate::error::{Error, ErrorCode, Result};
use crate::eval::{eval, is_dots, lookup_dots};
use crate::syntax::{Syntax, SyntaxArg};
use crate::template::TemplateArg;
use crate::value::{Closure, Entry, Function, List, Param};
use crate::{Argument, Env, Node, Number, Value};

fn invalid_argument(procedure: &str, arg: &Value, expected: &str) -> Error {
    Error::new(ErrorCode::InvalidArgument(
        format!("`{}': invalid argument {}, expected {}", procedure, arg, expected).into(),
    ))
}

fn wrong_number_of_arguments(procedure: &str, expected: usize, got: usize) -> Error {
    Error::new(ErrorCode::ArgumentMismatch(
        format!(
            "wrong number of arguments to `{}': expected {}, got {}",
            procedure, expected, got
        )
        .into(),
    ))
}

fn arithmetic_overflow(operation: &str, arg1: &Number, arg2: &Number) -> Error {
    Error::new(ErrorCode::InvalidArgument(
        format!("arithmetic overflow in {} of {} and {}", operation, arg1, arg2).into(),
    ))
}

fn expect_args<'a, T>(procedure: &str, args: &'a [T], expected: usize) -> Result<&'a [T]> {
    if args.len() == expected {
        Ok(args)
    } else {
        Err(wrong_number_of_arguments(procedure, expected, args.len()))
    }
}

fn number<'a>(procedure: &str, value: &'a Value) -> Result<&'a Number> {
    value
        .as_number()
        .ok_or_else(|| invalid_argument(procedure, value, "a number"))
}

fn fold_numbers(
    procedure: &str,
    args: &[Entry],
    op: fn(&Number, &Number) -> Option<Number>,
) -> Result<Value> {
    let (first, rest) = match args.split_first() {
        Some(split) => split,
        None => return Err(wrong_number_of_arguments(procedure, 1, 0)),
    };
    let mut acc = *number(procedure, &first.value)?;
    for arg in rest {
        let n = number(procedure, &arg.value)?;
        acc = op(&acc, n).ok_or_else(|| arithmetic_overflow(procedure, &acc, n))?;
    }
    Ok(Value::Number(acc))
}

/// `+`: the sum of its arguments; `0` without arguments.
pub fn plus(args: &[Entry]) -> Result<Value> {
    if args.is_empty() {
        return Ok(Value::from(0));
    }
    fold_numbers("+", args, Number::checked_add)
}

/// `-`: negation with one argument, subtraction otherwise.
pub fn minus(args: &[Entry]) -> Result<Value> {
    if let [arg] = args {
        let n = number("-", &arg.value)?;
        return n
            .checked_neg()
            .map(Value::Number)
            .ok_or_else(|| invalid_argument("-", &arg.value, "a negatable number"));
    }
    fold_numbers("-", args, Number::checked_sub)
}

/// `*`: the product of its arguments; `1` without arguments.
pub fn times(args: &[Entry]) -> Result<Value> {
    if args.is_empty() {
        return Ok(Value::from(1));
    }
    fold_numbers("*", args, Number::checked_mul)
}

/// `/`: division, always producing a float.
pub fn divide(args: &[Entry]) -> Result<Value> {
    let args = expect_args("/", args, 2)?;
    let (a, b) = (number("/", &args[0].value)?, number("/", &args[1].value)?);
    a.checked_div(b)
        .map(Value::Number)
        .ok_or_else(|| invalid_argument("/", &args[1].value, "a non-zero divisor"))
}

fn compare(procedure: &str, a: &Value, b: &Value) -> Result<Option<Ordering>> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(Some(a.cmp(b))),
        (Value::Bool(a), Value::Bool(b)) => Ok(Some(a.cmp(b))),
        (Value::Number(_), other) | (Value::String(_), other) | (Value::Bool(_), other) => {
            Err(invalid_argument(procedure, other, a.type_name()))
        }
        (other, _) => Err(invalid_argument(procedure, other, "a number, string or logical")),
    }
}

fn comparison(procedure: &'static str, test: fn(Ordering) -> bool) -> Value {
    Value::builtin(procedure, move |args| {
        let args = expect_args(procedure, args, 2)?;
        let ordering = compare(procedure, &args[0].value, &args[1].value)?;
        Ok(Value::Bool(ordering.map_or(false, test)))
    })
}

/// `list`: a list of its arguments, keeping their names.
pub fn list(args: &[Entry]) -> Result<Value> {
    Ok(Value::List(List::new(args.to_vec())))
}

/// `identical`: structural equality of two values.
pub fn identical(args: &[Entry]) -> Result<Value> {
    let args = expect_args("identical", args, 2)?;
    Ok(Value::Bool(args[0].value == args[1].value))
}

/// `paste`: concatenates the text of its arguments, separated by the `sep`
/// argument (a single space by default).
pub fn paste(args: &[Entry]) -> Result<Value> {
    let mut sep = " ".to_owned();
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        match (arg.name.as_deref(), &arg.value) {
            (Some("sep"), Value::String(s)) => sep = s.to_string(),
            (Some("sep"), other) => return Err(invalid_argument("paste", other, "a string")),
            (_, Value::String(s)) => parts.push(s.to_string()),
            (_, value @ (Value::Number(_) | Value::Bool(_) | Value::Language(_))) => {
                parts.push(value.to_string())
            }
            (_, other) => return Err(invalid_argument("paste", other, "a scalar")),
        }
    }
    Ok(Value::from(parts.join(&sep)))
}

/// `call2`: builds a call to its first argument (a name or a quoted
/// expression) with the remaining arguments.
pub fn call2(args: &[Entry]) -> Result<Value> {
    let (head, rest) = match args.split_first() {
        Some(split) => split,
        None => return Err(wrong_number_of_arguments("call2", 1, 0)),
    };
    let head = match &head.value {
        Value::String(name) => Designator::from(&**name),
        Value::Language(node) => Designator::from(node.clone()),
        other => return Err(invalid_argument("call2", other, "a string or a call")),
    };
    let mut template = Vec::with_capacity(rest.len());
    for arg in rest {
        let node = arg
            .value
            .to_node()
            .ok_or_else(|| invalid_argument("call2", &arg.value, "a scalar or an expression"))?;
        template.push(TemplateArg::from(Argument::new(arg.name.as_deref(), node)));
    }
    build_call(head, template, &Env::new()).map(Value::Language)
}

fn single_arg<'a>(procedure: &str, ctx: &'a CallContext) -> Result<&'a Node> {
    let args = expect_args(procedure, ctx.args(), 1)?;
    Ok(args[0].value())
}

/// `quote(expr)`: `expr`, as written.
pub fn quote(ctx: &CallContext) -> Result<Value> {
    single_arg("quote", ctx).map(|node| Value::from_node(node.clone()))
}

/// `expr(expr)`: `expr`, with its unquote markers expanded.
pub fn expr(ctx: &CallContext) -> Result<Value> {
    let node = single_arg("expr", ctx)?;
    quote_with_expansion(&Syntax::from(node), ctx.env()).map(Value::from_node)
}

/// `exprs(...)`: a list of its arguments, each with its unquote markers
/// expanded. A `...` argument contributes the expressions of the enclosing
/// function's tail, verbatim.
pub fn exprs(ctx: &CallContext) -> Result<Value> {
    let mut captured = Vec::with_capacity(ctx.args().len());
    for arg in ctx.args() {
        if is_dots(arg) {
            for dot in lookup_dots(ctx.env())?.iter() {
                captured.push(Argument::new(dot.name.as_deref(), dot.promise.expr().clone()));
            }
            continue;
        }
        let syntax = Syntax::list(vec![SyntaxArg {
            name: arg.name().map(Into::into),
            value: Syntax::from(arg.value()),
        }]);
        if let Node::Pairlist(list) = quote_with_expansion(&syntax, ctx.env())? {
            captured.extend(list.args().iter().cloned());
        }
    }
    Ok(argument_list(captured))
}

/// `enexpr(name)`: the expression the caller of the enclosing function wrote
/// for its parameter `name`.
pub fn enexpr(ctx: &CallContext) -> Result<Value> {
    let node = single_arg("enexpr", ctx)?;
    let name = match node.as_symbol() {
        Some(sym) if !sym.is_missing() => sym.name(),
        _ => {
            return Err(invalid_argument(
                "enexpr",
                &Value::from_node(node.clone()),
                "a parameter name",
            ))
        }
    };
    let outer = CallContext::from_env(ctx.env())?;
    capture_caller_argument(name, &outer).map(Value::from_node)
}

/// `enexprs()`: the expressions the caller of the enclosing function wrote
/// for its arguments, as a list: the fixed parameters that were supplied
/// first, expanded, then the tail verbatim.
pub fn enexprs(ctx: &CallContext) -> Result<Value> {
    expect_args("enexprs", ctx.args(), 0)?;
    let outer = CallContext::from_env(ctx.env())?;
    let explicit: Vec<SyntaxArg> = outer
        .parameter_names()
        .filter_map(|name| {
            let expr = outer.parameter(name)?;
            if expr.is_missing() {
                None
            } else {
                Some(SyntaxArg::named(name, Syntax::from(expr)))
            }
        })
        .collect();
    capture_all_arguments(&outer, &explicit).map(argument_list)
}

fn argument_list(args: Vec<Argument>) -> Value {
    Value::List(List::new(
        args.into_iter()
            .map(|arg| {
                let (name, value) = arg.into_parts();
                Entry {
                    name,
                    value: Value::from_node(value),
                }
            })
            .collect(),
    ))
}

/// `eval(expr)`: evaluates `expr`, then evaluates the result again if it
/// is a quoted expression.
pub fn eval_special(ctx: &CallContext) -> Result<Value> {
    let node = single_arg("eval", ctx)?;
    match eval(node, ctx.env())? {
        Value::Language(expr) => eval(&expr, ctx.env()),
        value => Ok(value),
    }
}

/// `function(formals, body)`: a closure over the calling environment.
pub fn function(ctx: &CallContext) -> Result<Value> {
    let args = expect_args("function", ctx.args(), 2)?;
    let formals = match args[0].value() {
        Node::Pairlist(list) => list,
        other => {
            return Err(invalid_argument(
                "function",
                &Value::from_node(other.clone()),
                "a formal argument list",
            ))
        }
    };
    let mut params = Vec::with_capacity(formals.len());
    for formal in formals.args() {
        let param = match (formal.name(), formal.value()) {
            (Some(name), value) => Param {
                name: name.into(),
                default: Some(value.clone()).filter(|value| !value.is_missing()),
            },
            (None, Node::Symbol(sym)) if !sym.is_missing() => Param {
                name: sym.name().into(),
                default: None,
            },
            (None, other) => {
                return Err(invalid_argument(
                    "function",
                    &Value::from_node(other.clone()),
                    "a parameter name",
                ))
            }
        };
        params.push(param);
    }
    let closure = Closure::new(params, args[1].value().clone(), ctx.env().clone());
    Ok(Value::Function(Function::Closure(closure.into())))
}

/// `name <- value`: binds `name` in the calling environment.
pub fn assign(ctx: &CallContext) -> Result<Value> {
    let args = expect_args("<-", ctx.args(), 2)?;
    let target = args[0].value();
    let name = match target {
        Node::Symbol(sym) if !sym.is_missing() => sym.name(),
        Node::Constant(c) => c.as_str().filter(|name| !name.is_empty()).ok_or_else(|| {
            invalid_argument("<-", &Value::from_node(target.clone()), "a name")
        })?,
        other => {
            return Err(invalid_argument(
                "<-",
                &Value::from_node(other.clone()),
                "a name",
            ))
        }
    };
    let value = eval(args[1].value(), ctx.env())?;
    ctx.env().bind(name, value.clone());
    Ok(value)
}

/// `{`: evaluates its arguments in turn, returning the last value.
pub fn block(ctx: &CallContext) -> Result<Value> {
    let mut value = Value::Null;
    for arg in ctx.args() {
        value = eval(arg.value(), ctx.env())?;
    }
    Ok(value)
}

/// `if (cond) then else alt`.
pub fn if_special(ctx: &CallContext) -> Result<Value> {
    let args = ctx.args();
    if !(2..=3).contains(&args.len()) {
        return Err(wrong_number_of_arguments("if", 3, args.len()));
    }
    let cond = eval(args[0].value(), ctx.env())?;
    let cond = cond
        .as_bool()
        .ok_or_else(|| invalid_argument("if", &cond, "a logical"))?;
    match (cond, args.get(2)) {
        (true, _) => eval(args[1].value(), ctx.env()),
        (false, Some(alt)) => eval(alt.value(), ctx.env()),
        (false, None) => Ok(Value::Null),
    }
}

/// Creates a top-level environment holding the standard callables.
///
/// ```
/// # use quasi::{eval, prim, quote_explicit, Syntax, SyntaxArg, Value};
/// let env = prim::base_env();
/// env.bind("x", Value::from(2));
/// let syntax = Syntax::apply(
///     Syntax::ident("*"),
///     vec![SyntaxArg::positional(Syntax::ident("x")), SyntaxArg::positional(Syntax::from(21))],
/// );
/// assert_eq!(eval(&quote_explicit(&syntax), &env)?, Value::from(42));
/// # Ok::<(), quasi::Error>(())
/// ```
pub fn base_env() -> Env {
    let env = Env::new();
    env.bind("+", Value::builtin("+", plus));
    env.bind("-", Value::builtin("-", minus));
    env.bind("*", Value::builtin("*", times));
    env.bind("/", Value::builtin("/", divide));
    env.bind("==", comparison("==", Ordering::is_eq));
    env.bind("!=", comparison("!=", Ordering::is_ne));
    env.bind("<", comparison("<", Ordering::is_lt));
    env.bind("<=", comparison("<=", Ordering::is_le));
    env.bind(">", comparison(">", Ordering::is_gt));
    env.bind(">=", comparison(">=", Ordering::is_ge));
    env.bind("list", Value::builtin("list", list));
    env.bind("identical", Value::builtin("identical", identical));
    env.bind("paste", Value::builtin("paste", paste));
    env.bind("call2", Value::builtin("call2", call2));
    env.bind("quote", Value::special("quote", quote));
    env.bind("expr", Value::special("expr", expr));
    env.bind("exprs", Value::special("exprs", exprs));
    env.bind("enexpr", Value::special("enexpr", enexpr));
    env.bind("enexprs", Value::special("enexprs", enexprs));
    env.bind("eval", Value::special("eval", eval_special));
    env.bind("function", Value::special("function", function));
    env.bind("<-", Value::special("<-", assign));
    env.bind("{", Value::special("{", block));
    env.bind("if", Value::special("if", if_special));
    env
}
