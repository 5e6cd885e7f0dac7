#![cfg_attr(tarpaulin, skip)]

use super::*;

fn sym(name: &str) -> Node {
    Node::symbol(name).unwrap()
}

fn call(head: &str, args: Vec<Argument>) -> Node {
    Node::call(sym(head), args).unwrap()
}

fn binary(op: &str, lhs: impl Into<Node>, rhs: impl Into<Node>) -> Node {
    call(op, vec![Argument::positional(lhs), Argument::positional(rhs)])
}

fn printed(node: &Node) -> String {
    to_string(node).unwrap()
}

#[test]
fn test_options_size() {
    assert!(std::mem::size_of::<Options>() <= std::mem::size_of::<u32>() * 2);
}

#[test]
fn test_constants() {
    for (constant, expected) in [
        (Constant::Null, "NULL"),
        (Constant::from(true), "TRUE"),
        (Constant::from(false), "FALSE"),
        (Constant::from(-12), "-12"),
        (Constant::from(2.0), "2"),
        (Constant::from(0.25), "0.25"),
        (Constant::from("a\"b"), r#""a\"b""#),
    ] {
        assert_eq!(printed(&Node::Constant(constant)), expected);
    }
}

#[test]
fn test_str_escapes() {
    assert_eq!(
        printed(&Node::constant("\u{07}\u{08}\u{09}\n\u{0b}\u{0c}\r\u{0e}\\")),
        r#""\a\b\t\n\v\f\r\x0e\\""#
    );
}

#[test]
fn test_precedence() {
    let sum = binary("+", sym("a"), sym("b"));
    assert_eq!(printed(&binary("*", sum.clone(), sym("c"))), "(a + b) * c");
    assert_eq!(printed(&binary("+", sum.clone(), sym("c"))), "a + b + c");
    assert_eq!(printed(&binary("-", sym("c"), sum)), "c - (a + b)");
    let power = binary("^", sym("a"), sym("b"));
    assert_eq!(printed(&binary("^", power.clone(), sym("c"))), "(a^b)^c");
    assert_eq!(printed(&binary("^", sym("c"), power)), "c^a^b");
    assert_eq!(printed(&binary("^", Node::constant(-1), 2)), "(-1)^2");
}

#[test]
fn test_unary() {
    let neg = call("-", vec![Argument::positional(sym("x"))]);
    assert_eq!(printed(&neg), "-x");
    let sum = binary("+", sym("a"), 1);
    assert_eq!(printed(&call("-", vec![Argument::positional(sum)])), "-(a + 1)");
    let unquote = call("!!", vec![Argument::positional(sym("x"))]);
    assert_eq!(printed(&call("f", vec![Argument::positional(unquote)])), "f(!!x)");
}

#[test]
fn test_arguments() {
    let node = call(
        "f",
        vec![
            Argument::named("x", 10),
            Argument::named("a b", sym("y")),
            Argument::positional(Node::missing()),
        ],
    );
    assert_eq!(printed(&node), "f(x = 10, `a b` = y, )");
    let index = call(
        "[",
        vec![
            Argument::positional(sym("x")),
            Argument::positional(Node::missing()),
            Argument::positional(1),
        ],
    );
    assert_eq!(printed(&index), "x[, 1]");
}

#[test]
fn test_syntactic_forms() {
    let cond = call(
        "if",
        vec![
            Argument::positional(sym("c")),
            Argument::positional(1),
            Argument::positional(2),
        ],
    );
    assert_eq!(printed(&cond), "if (c) 1 else 2");
    let formals = Node::pairlist(vec![
        Argument::named("x", Node::missing()),
        Argument::named("y", 1),
    ]);
    let fun = call(
        "function",
        vec![
            Argument::positional(formals),
            Argument::positional(binary("+", sym("x"), sym("y"))),
        ],
    );
    assert_eq!(printed(&fun), "function(x, y = 1) x + y");
    let block = call(
        "{",
        vec![Argument::positional(sym("a")), Argument::positional(sym("b"))],
    );
    assert_eq!(printed(&block), "{ a; b }");
}

#[test]
fn test_non_syntactic_names() {
    assert_eq!(printed(&sym("my var")), "`my var`");
    assert_eq!(printed(&sym("if")), "`if`");
    assert_eq!(printed(&sym("...")), "...");
    assert_eq!(printed(&sym("..2")), "..2");
    assert_eq!(printed(&sym(".2x")), "`.2x`");
    assert_eq!(printed(&sym(".hidden_1")), ".hidden_1");
}

#[test]
fn test_prefix_style() {
    let node = binary("+", 1, 2);
    let options = Options::default().with_operator_style(OperatorStyle::Prefix);
    assert_eq!(to_string_custom(&node, options).unwrap(), "`+`(1, 2)");
    let options = Options::default()
        .with_operator_style(OperatorStyle::Prefix)
        .with_backticks(false);
    assert_eq!(to_string_custom(&node, options).unwrap(), "+(1, 2)");
}

#[test]
fn test_call_heads() {
    let inner = call("f", vec![Argument::positional(1)]);
    let outer = Node::call(inner, vec![Argument::positional(2)]).unwrap();
    assert_eq!(printed(&outer), "f(1)(2)");
    let pairlist = Node::pairlist(vec![Argument::named("a", 1), Argument::positional(2)]);
    assert_eq!(printed(&pairlist), "pairlist(a = 1, 2)");
}
