//! Test serialization to the `quasi::Value` type

use std::collections::BTreeMap;

use serde_derive::Serialize;

use quasi::{build_call, Env, Node, TemplateArg, Value};
use serde_quasi::{error::Category, to_string, to_value};

fn check<T: serde::Serialize>(thing: &T, printed: &str) {
    let value = to_value(thing).unwrap();
    assert_eq!(value.to_string(), printed);
}

#[test]
fn test_scalars() {
    assert_eq!(to_value(4223).unwrap(), Value::from(4223));
    assert_eq!(to_value(1.5).unwrap(), Value::from(1.5));
    assert_eq!(to_value(true).unwrap(), Value::from(true));
    assert_eq!(to_value('c').unwrap(), Value::from("c"));
    assert_eq!(to_value("s").unwrap(), Value::from("s"));
    assert_eq!(to_value(()).unwrap(), Value::Null);
}

#[test]
fn test_option() {
    assert_eq!(to_value(None::<u32>).unwrap(), Value::Null);
    assert_eq!(to_value(Some(3)).unwrap(), Value::from(3));
}

#[test]
fn test_vec() {
    let empty: Vec<u32> = vec![];
    check(&empty, "list()");
    check(&vec![1, 2, 3, 4], "list(1, 2, 3, 4)");
    check(&("foo", 1), r#"list("foo", 1)"#);
}

#[test]
fn test_map() {
    let mut map: BTreeMap<String, u32> = BTreeMap::new();
    check(&map, "list()");
    map.insert("one".to_string(), 1);
    map.insert("two words".to_string(), 2);
    check(&map, "list(one = 1, `two words` = 2)");

    let mut by_number = BTreeMap::new();
    by_number.insert(1, "a");
    check(&by_number, r#"list(`1` = "a")"#);
}

#[test]
fn test_struct() {
    #[derive(Serialize)]
    struct Options {
        width: u32,
        label: Option<String>,
        scale: f64,
    }
    let options = Options {
        width: 80,
        label: None,
        scale: 0.5,
    };
    check(&options, "list(width = 80, label = NULL, scale = 0.5)");
}

#[test]
fn test_enum() {
    #[derive(Serialize)]
    enum Shape {
        Point,
        Circle(f64),
        Pair(i32, i32),
        Rect { w: i32, h: i32 },
    }
    check(&Shape::Point, r#""Point""#);
    check(&Shape::Circle(1.5), "list(Circle = 1.5)");
    check(&Shape::Pair(1, 2), "list(Pair = list(1, 2))");
    check(&Shape::Rect { w: 3, h: 4 }, "list(Rect = list(w = 3, h = 4))");
}

#[test]
fn test_errors() {
    let err = to_value(u64::MAX).unwrap_err();
    assert_eq!(err.classify(), Category::Data);
    let err = to_value(f64::NAN).unwrap_err();
    assert_eq!(err.classify(), Category::Data);

    let mut map = BTreeMap::new();
    map.insert(true, 1);
    let err = to_value(&map).unwrap_err();
    assert_eq!(err.classify(), Category::Data);
    assert_eq!(err.to_string(), "map key must be a string or an integer");

    let err: quasi::Error = err.into();
    assert_eq!(err.classify(), quasi::error::Category::Evaluation);
}

#[test]
fn test_to_string() {
    assert_eq!(to_string(&[1, 2]).unwrap(), "list(1, 2)");
}

#[test]
fn test_splice_source() {
    #[derive(Serialize)]
    struct Args {
        x: i32,
        #[serde(rename = "na.rm")]
        na_rm: bool,
    }
    let env = Env::new();
    env.bind("args", to_value(Args { x: 1, na_rm: true }).unwrap());
    let call = build_call(
        "mean",
        vec![TemplateArg::splice(Node::symbol("args").unwrap())],
        &env,
    )
    .unwrap();
    assert_eq!(call.to_string(), "mean(x = 1, na.rm = TRUE)");
}
