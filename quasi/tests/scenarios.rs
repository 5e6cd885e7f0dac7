use std::rc::Rc;

use quasi::error::{Category, ErrorCode};
use quasi::value::{Closure, Function, Param};
use quasi::{
    build_call, capture_caller_argument, eval, expand, prim, quote_explicit, Argument, CallContext,
    Env, Node, Syntax, SyntaxArg, Template, TemplateArg, Value,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sym(name: &str) -> Node {
    Node::symbol(name).unwrap()
}

fn call(head: &str, args: Vec<Argument>) -> Node {
    Node::call(sym(head), args).unwrap()
}

fn closure(params: &[&str], body: Node, env: &Env) -> Value {
    let params = params
        .iter()
        .map(|name| Param {
            name: (*name).into(),
            default: None,
        })
        .collect();
    Value::Function(Function::Closure(Rc::new(Closure::new(
        params,
        body,
        env.clone(),
    ))))
}

#[test]
fn single_marker_with_negative_constant() {
    init_logging();
    let template = Template::call(
        Template::from(sym("f")),
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
    assert_eq!(node.to_string(), "f(-1, y)");
}

#[test]
fn splice_marker_with_negative_constants() {
    init_logging();
    let env = Env::new();
    env.bind("xs", Value::list(vec![-1, -2]));
    let template = Template::call(
        Template::from(sym("f")),
        vec![
            TemplateArg::splice(sym("xs")),
            TemplateArg::positional(sym("y")),
        ],
    )
    .unwrap();
    let node = expand(&template, &env).unwrap();
    assert_eq!(
        node,
        call(
            "f",
            vec![
                Argument::positional(-1),
                Argument::positional(-2),
                Argument::positional(sym("y")),
            ]
        )
    );
}

#[test]
fn empty_splice_removes_the_position() {
    let env = Env::new();
    env.bind("xs", Value::list(Vec::<i32>::new()));
    let node = build_call(
        "f",
        vec![
            TemplateArg::positional(Node::constant(1)),
            TemplateArg::splice(sym("xs")),
        ],
        &env,
    )
    .unwrap();
    assert_eq!(node.as_call().unwrap().args().len(), 1);
}

#[test]
fn built_call_with_defined_name() {
    init_logging();
    let env = prim::base_env();
    let node = build_call(
        "foo",
        vec![TemplateArg::define(
            Node::constant("x"),
            Node::constant(10),
        )],
        &env,
    )
    .unwrap();
    assert_eq!(node.to_string(), "foo(x = 10)");
    let arg = &node.as_call().unwrap().args()[0];
    assert_eq!(arg.name(), Some("x"));
    assert_eq!(arg.value(), &Node::constant(10));

    let body = call("*", vec![Argument::positional(sym("x")), Argument::positional(2)]);
    env.bind("foo", closure(&["x"], body, &env));
    assert_eq!(eval(&node, &env).unwrap(), Value::from(20));
}

#[test]
fn empty_defined_name_is_rejected() {
    let err = build_call(
        "foo",
        vec![TemplateArg::define(Node::constant(""), Node::constant(10))],
        &Env::new(),
    )
    .unwrap_err();
    assert_eq!(err.classify(), Category::Expansion);
    assert!(matches!(err.code(), ErrorCode::InvalidDefinitionName(_)));
}

#[test]
fn caller_argument_is_captured_unevaluated() {
    init_logging();
    let env = prim::base_env();
    env.bind("f", closure(&["x"], call("enexpr", vec![Argument::positional(sym("x"))]), &env));
    let sum = call("+", vec![Argument::positional(sym("a")), Argument::positional(sym("b"))]);
    let value = eval(&call("f", vec![Argument::positional(sum.clone())]), &env).unwrap();
    assert_eq!(value, Value::Language(sum.clone()));

    // The same capture through an explicit context, without an evaluator.
    let written = call("f", vec![Argument::positional(sum.clone())]);
    let context = CallContext::new(written.as_call().unwrap().clone(), env.clone())
        .with_parameter("x", sum.clone());
    assert_eq!(capture_caller_argument("x", &context).unwrap(), sum);
    let err = capture_caller_argument("y", &context).unwrap_err();
    assert_eq!(err.code(), &ErrorCode::NoCallingContext(Some("y".into())));
}

#[test]
fn evaluation_depends_on_the_environment() {
    let node = call("+", vec![Argument::positional(1), Argument::positional(2)]);
    assert_eq!(eval(&node, &prim::base_env()).unwrap(), Value::from(3));

    let free = call("+", vec![Argument::positional(sym("a")), Argument::positional(1)]);
    let (one, two) = (prim::base_env(), prim::base_env());
    one.bind("a", 1);
    two.bind("a", 41);
    assert_eq!(eval(&free, &one).unwrap(), Value::from(2));
    assert_eq!(eval(&free, &two).unwrap(), Value::from(42));
}

#[test]
fn expansion_does_not_alias_bindings() {
    let source = call("g", vec![Argument::positional(sym("z"))]);
    let template = Template::call(
        Template::from(sym("f")),
        vec![TemplateArg::positional(Template::single(sym("v")))],
    )
    .unwrap();
    let (one, two) = (Env::new(), Env::new());
    one.bind("v", source.clone());
    two.bind("v", 2);
    let first = expand(&template, &one).unwrap();
    let second = expand(&template, &two).unwrap();
    assert_eq!(first.to_string(), "f(g(z))");
    assert_eq!(second.to_string(), "f(2)");
    assert_eq!(one.lookup("v").unwrap(), Value::Language(source));
}

#[test]
fn explicit_quote_round_trips_printed_syntax() {
    let node = call(
        "f",
        vec![
            Argument::named("x", 10),
            Argument::positional(Node::missing()),
            Argument::positional(call("!!", vec![Argument::positional(sym("y"))])),
        ],
    );
    let syntax = Syntax::from(&node);
    assert_eq!(
        syntax,
        Syntax::apply(
            Syntax::ident("f"),
            vec![
                SyntaxArg::named("x", Syntax::from(10)),
                SyntaxArg::positional(Syntax::missing()),
                SyntaxArg::positional(Syntax::unquote(Syntax::ident("y"))),
            ]
        )
    );
    assert!(quote_explicit(&syntax).identical(&node));
}
