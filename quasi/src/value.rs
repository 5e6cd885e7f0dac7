//! Runtime values produced by evaluation.

use std::fmt::{self, Display, Write};
use std::rc::Rc;

use crate::capture::CallContext;
use crate::env::Env;
use crate::error::Result;
use crate::{print, Constant, Node, Number};

/// A runtime value, as produced by evaluating a [`Node`].
#[derive(Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(Box<str>),
    /// A quoted expression.
    Language(Node),
    /// An ordered sequence of optionally named values.
    List(List),
    /// Something that can be invoked.
    Function(Function),
}

/// An element of a [`List`], or an evaluated argument passed to a builtin.
#[derive(Clone, PartialEq)]
pub struct Entry {
    /// The element name, if any.
    pub name: Option<Box<str>>,
    /// The element value.
    pub value: Value,
}

impl Entry {
    /// Creates an entry with an optional name.
    pub fn new(name: Option<&str>, value: impl Into<Value>) -> Self {
        Entry {
            name: name.map(Into::into),
            value: value.into(),
        }
    }
}

/// An immutable, cheaply cloned list of entries.
#[derive(Clone, Default, PartialEq)]
pub struct List {
    entries: Rc<[Entry]>,
}

impl List {
    /// Creates a list from its entries.
    pub fn new(entries: Vec<Entry>) -> Self {
        List {
            entries: entries.into(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Returns the value of the first entry named `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.name.as_deref() == Some(name))
            .map(|entry| &entry.value)
    }

    /// The entries as a slice.
    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }
}

type BuiltinFn = dyn Fn(&[Entry]) -> Result<Value>;
type SpecialFn = dyn Fn(&CallContext) -> Result<Value>;

/// A callable. The kind of callable determines how its arguments are passed.
#[derive(Clone)]
pub enum Function {
    /// Receives its arguments evaluated, left to right.
    Builtin(Builtin),
    /// Receives its arguments unevaluated, as a [`CallContext`].
    Special(Special),
    /// A function defined in the expression language; receives its
    /// arguments as promises.
    Closure(Rc<Closure>),
}

/// A host function receiving evaluated arguments.
#[derive(Clone)]
pub struct Builtin {
    name: Rc<str>,
    fun: Rc<BuiltinFn>,
}

impl Builtin {
    /// Wraps a host function.
    pub fn new<F>(name: &str, fun: F) -> Self
    where
        F: Fn(&[Entry]) -> Result<Value> + 'static,
    {
        Builtin {
            name: name.into(),
            fun: Rc::new(fun),
        }
    }

    /// The name the builtin was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the builtin.
    pub fn call(&self, args: &[Entry]) -> Result<Value> {
        (self.fun)(args)
    }
}

/// A host function receiving its call unevaluated.
#[derive(Clone)]
pub struct Special {
    name: Rc<str>,
    fun: Rc<SpecialFn>,
}

impl Special {
    /// Wraps a host function.
    pub fn new<F>(name: &str, fun: F) -> Self
    where
        F: Fn(&CallContext) -> Result<Value> + 'static,
    {
        Special {
            name: name.into(),
            fun: Rc::new(fun),
        }
    }

    /// The name the special was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the special with the given calling context.
    pub fn call(&self, context: &CallContext) -> Result<Value> {
        (self.fun)(context)
    }
}

/// A parameter of a closure.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// The parameter name; `...` collects surplus arguments.
    pub name: Box<str>,
    /// Expression evaluated in the function frame if no argument is given.
    pub default: Option<Node>,
}

/// A function defined in the expression language.
pub struct Closure {
    params: Vec<Param>,
    body: Node,
    env: Env,
}

impl Closure {
    /// Creates a closure over `env`.
    pub fn new(params: Vec<Param>, body: Node, env: Env) -> Self {
        Closure { params, body, env }
    }

    /// The formal parameters.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The body expression.
    pub fn body(&self) -> &Node {
        &self.body
    }

    /// The defining environment.
    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl Function {
    /// Returns true if `self` and `other` are the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        match (self, other) {
            (Function::Builtin(a), Function::Builtin(b)) => Rc::ptr_eq(&a.fun, &b.fun),
            (Function::Special(a), Function::Special(b)) => Rc::ptr_eq(&a.fun, &b.fun),
            (Function::Closure(a), Function::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Creates a builtin function value.
    pub fn builtin<F>(name: &str, fun: F) -> Self
    where
        F: Fn(&[Entry]) -> Result<Value> + 'static,
    {
        Value::Function(Function::Builtin(Builtin::new(name, fun)))
    }

    /// Creates a special function value.
    pub fn special<F>(name: &str, fun: F) -> Self
    where
        F: Fn(&CallContext) -> Result<Value> + 'static,
    {
        Value::Function(Function::Special(Special::new(name, fun)))
    }

    /// Creates an unnamed list.
    ///
    /// ```
    /// # use quasi::Value;
    /// let list = Value::list(vec![1, 2, 3]);
    /// assert_eq!(list.to_string(), "list(1, 2, 3)");
    /// ```
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(List::new(
            elements
                .into_iter()
                .map(|value| Entry {
                    name: None,
                    value: value.into(),
                })
                .collect(),
        ))
    }

    /// Creates a list with optionally named entries.
    pub fn named_list<'a, I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, V)>,
        V: Into<Value>,
    {
        Value::List(List::new(
            entries
                .into_iter()
                .map(|(name, value)| Entry::new(name, value))
                .collect(),
        ))
    }

    /// Lifts the value into an expression node.
    ///
    /// Scalars become constants and quoted expressions are returned as-is.
    /// Lists and functions have no node representation.
    pub fn to_node(&self) -> Option<Node> {
        match self {
            Value::Null => Some(Node::Constant(Constant::Null)),
            Value::Bool(b) => Some(Node::constant(*b)),
            Value::Number(n) => Some(Node::constant(*n)),
            Value::String(s) => Some(Node::constant(&**s)),
            Value::Language(node) => Some(node.clone()),
            Value::List(_) | Value::Function(_) => None,
        }
    }

    /// Lowers a node to a value: constants become scalars, anything else a
    /// quoted expression. This is the inverse of [`Value::to_node`].
    pub fn from_node(node: Node) -> Self {
        match node {
            Node::Constant(c) => Value::from(c),
            other => Value::Language(other),
        }
    }

    /// A short description of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "a logical",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Language(Node::Symbol(_)) => "a symbol",
            Value::Language(Node::Pairlist(_)) => "a pairlist",
            Value::Language(_) => "a language object",
            Value::List(_) => "a list",
            Value::Function(_) => "a function",
        }
    }

    /// Returns true for `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// If the value is a number, returns it.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a string, returns it.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a quoted expression, returns it.
    pub fn as_language(&self) -> Option<&Node> {
        match self {
            Value::Language(node) => Some(node),
            _ => None,
        }
    }

    /// If the value is a list, returns it.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// If the value is a function, returns it.
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Language(a), Value::Language(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

macro_rules! impl_from_number {
    (
        $($ty:ty),*
    ) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(n: $ty) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_number!(u8, u16, u32, i8, i16, i32, i64, f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Value::String(s.into_boxed_str())
    }
}

impl From<Constant> for Value {
    fn from(c: Constant) -> Self {
        match c {
            Constant::Null => Value::Null,
            Constant::Bool(b) => Value::Bool(b),
            Constant::Number(n) => Value::Number(n),
            Constant::String(s) => Value::String(s),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Language(node)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Should probably use a more "Rusty" representation
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} = {:?}", name, self.value),
            None => write!(f, "{:?}", self.value),
        }
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Language(node) => Display::fmt(node, f),
            Value::List(list) => write_list(f, list),
            Value::Function(Function::Builtin(b)) => write!(f, "<builtin {}>", b.name()),
            Value::Function(Function::Special(s)) => write!(f, "<special {}>", s.name()),
            Value::Function(Function::Closure(_)) => f.write_str("<closure>"),
            scalar => match scalar.to_node() {
                Some(node) => Display::fmt(&node, f),
                None => Err(fmt::Error),
            },
        }
    }
}

fn write_list(f: &mut fmt::Formatter, list: &List) -> fmt::Result {
    f.write_str("list(")?;
    for (i, entry) in list.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if let Some(name) = &entry.name {
            f.write_str(&print::format_name(name))?;
            f.write_str(" = ")?;
        }
        entry.value.fmt(f)?;
    }
    f.write_char(')')
}
