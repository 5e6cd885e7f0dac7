//! Lexically scoped environments.
//!
//! An [`Env`] is a frame of bindings with an optional parent frame. Lookups
//! walk the chain outwards; bindings are always added to the frame they are
//! made in. Frames are shared by reference: cloning an `Env` yields another
//! handle to the same frame, so a binding made through one handle is visible
//! through all of them, and to every frame nested inside.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::capture::CallContext;
use crate::error::{Error, ErrorCode, Result};
use crate::eval::eval;
use crate::{Node, Value};

/// A handle to an environment frame.
#[derive(Clone, Default)]
pub struct Env {
    frame: Rc<RefCell<Frame>>,
}

#[derive(Default)]
struct Frame {
    parent: Option<Env>,
    bindings: HashMap<Box<str>, Binding>,
    context: Option<Rc<CallContext>>,
}

/// What a name is bound to.
#[derive(Clone)]
pub enum Binding {
    /// An ordinary value.
    Value(Value),
    /// A function argument that is evaluated on first use.
    Promise(Rc<Promise>),
    /// A parameter for which no argument was supplied and which has no
    /// default.
    Missing,
    /// The variable-length tail of a function's arguments (`...`).
    Dots(Rc<[DotArg]>),
}

/// One element of a variable-length argument tail.
#[derive(Clone)]
pub struct DotArg {
    /// The name the argument was supplied with.
    pub name: Option<Box<str>>,
    /// The deferred argument.
    pub promise: Rc<Promise>,
}

/// A deferred computation: an expression together with the environment to
/// evaluate it in.
///
/// The value is computed at most once; later forcings return the cached
/// value. Forcing a promise from within its own evaluation, as a default
/// argument referring to its own parameter does, fails with
/// `RecursivePromise`.
pub struct Promise {
    expr: Node,
    env: Env,
    value: RefCell<Option<Value>>,
    forcing: Cell<bool>,
}

impl Promise {
    /// Creates an unforced promise.
    pub fn new(expr: Node, env: Env) -> Self {
        Promise {
            expr,
            env,
            value: RefCell::new(None),
            forcing: Cell::new(false),
        }
    }

    /// The deferred expression.
    pub fn expr(&self) -> &Node {
        &self.expr
    }

    /// The environment the expression will be evaluated in.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Evaluates the expression, or returns the cached value.
    pub fn force(&self) -> Result<Value> {
        if let Some(value) = self.value.borrow().as_ref() {
            return Ok(value.clone());
        }
        if self.forcing.replace(true) {
            return Err(Error::new(ErrorCode::RecursivePromise));
        }
        let result = eval(&self.expr, &self.env);
        self.forcing.set(false);
        let value = result?;
        *self.value.borrow_mut() = Some(value.clone());
        Ok(value)
    }
}

impl Env {
    /// Creates an empty top-level environment.
    pub fn new() -> Self {
        Env::default()
    }

    /// Creates an empty environment whose parent is `self`.
    pub fn child(&self) -> Env {
        Env {
            frame: Rc::new(RefCell::new(Frame {
                parent: Some(self.clone()),
                bindings: HashMap::new(),
                context: None,
            })),
        }
    }

    /// Creates the frame of a function invocation.
    pub(crate) fn function_frame(parent: &Env, context: CallContext) -> Env {
        Env {
            frame: Rc::new(RefCell::new(Frame {
                parent: Some(parent.clone()),
                bindings: HashMap::new(),
                context: Some(Rc::new(context)),
            })),
        }
    }

    /// Creates a top-level environment holding the given bindings.
    ///
    /// ```
    /// # use quasi::{Env, Value};
    /// let env = Env::from_bindings(vec![("x", Value::from(1)), ("y", Value::from(2))]);
    /// assert_eq!(env.lookup("y")?, Value::from(2));
    /// # Ok::<(), quasi::Error>(())
    /// ```
    pub fn from_bindings<'a, I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let env = Env::new();
        for (name, value) in bindings {
            env.bind(name, value);
        }
        env
    }

    /// The enclosing environment, if any.
    pub fn parent(&self) -> Option<Env> {
        self.frame.borrow().parent.clone()
    }

    /// Binds `name` to `value` in this frame, replacing any previous binding
    /// in this frame. Bindings of the same name in outer frames are shadowed,
    /// not modified.
    pub fn bind(&self, name: &str, value: impl Into<Value>) {
        self.set(name, Binding::Value(value.into()));
    }

    pub(crate) fn set(&self, name: &str, binding: Binding) {
        self.frame.borrow_mut().bindings.insert(name.into(), binding);
    }

    /// Finds the binding of `name`, walking the chain of frames outwards.
    pub fn get(&self, name: &str) -> Option<Binding> {
        let mut env = self.clone();
        loop {
            let parent = {
                let frame = env.frame.borrow();
                if let Some(binding) = frame.bindings.get(name) {
                    return Some(binding.clone());
                }
                frame.parent.clone()
            };
            env = parent?;
        }
    }

    /// Returns true if `name` is bound in this frame or an enclosing one.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Looks up the value of `name`, forcing it if it is a promise.
    ///
    /// Fails with `UnboundName` if no frame binds `name`, and with
    /// `MissingArgument` if it names a parameter that received no argument.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        match self.get(name) {
            Some(Binding::Value(value)) => Ok(value),
            Some(Binding::Promise(promise)) => promise.force(),
            Some(Binding::Missing) => Err(Error::new(ErrorCode::MissingArgument(name.into()))),
            Some(Binding::Dots(_)) => Err(Error::new(ErrorCode::NotEvaluable(
                "the `...' argument tail",
            ))),
            None => Err(Error::new(ErrorCode::UnboundName(name.into()))),
        }
    }

    /// The calling context of the innermost function invocation this
    /// environment belongs to.
    pub fn context(&self) -> Option<Rc<CallContext>> {
        let mut env = self.clone();
        loop {
            let parent = {
                let frame = env.frame.borrow();
                if let Some(context) = &frame.context {
                    return Some(Rc::clone(context));
                }
                frame.parent.clone()
            };
            env = parent?;
        }
    }

    /// Returns true if both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.borrow();
        let mut names: Vec<_> = frame.bindings.keys().collect();
        names.sort();
        f.debug_struct("Env")
            .field("bindings", &names)
            .field("has_parent", &frame.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_parents() {
        let root = Env::new();
        root.bind("x", 1);
        let child = root.child();
        child.bind("y", 2);
        assert_eq!(child.lookup("x").unwrap(), Value::from(1));
        assert_eq!(child.lookup("y").unwrap(), Value::from(2));
        assert!(root.lookup("y").is_err());
    }

    #[test]
    fn child_bindings_shadow() {
        let root = Env::new();
        root.bind("x", 1);
        let child = root.child();
        child.bind("x", 2);
        assert_eq!(child.lookup("x").unwrap(), Value::from(2));
        assert_eq!(root.lookup("x").unwrap(), Value::from(1));
    }

    #[test]
    fn unbound_name() {
        let err = Env::new().lookup("nope").unwrap_err();
        assert_eq!(err.code(), &ErrorCode::UnboundName("nope".into()));
    }

    #[test]
    fn promises_are_forced_once() {
        let env = Env::new();
        env.bind("a", 1);
        let promise = Rc::new(Promise::new(Node::symbol("a").unwrap(), env.clone()));
        let frame = env.child();
        frame.set("p", Binding::Promise(Rc::clone(&promise)));
        assert_eq!(frame.lookup("p").unwrap(), Value::from(1));
        env.bind("a", 2);
        assert_eq!(frame.lookup("p").unwrap(), Value::from(1));
    }

    #[test]
    fn failed_forcing_can_be_retried() {
        let env = Env::new();
        let promise = Promise::new(Node::symbol("late").unwrap(), env.clone());
        let err = promise.force().unwrap_err();
        assert_eq!(err.code(), &ErrorCode::UnboundName("late".into()));
        env.bind("late", 3);
        assert_eq!(promise.force().unwrap(), Value::from(3));
    }

    #[test]
    fn missing_parameters() {
        let env = Env::new();
        env.set("x", Binding::Missing);
        let err = env.lookup("x").unwrap_err();
        assert_eq!(err.code(), &ErrorCode::MissingArgument("x".into()));
    }
}
