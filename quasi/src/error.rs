//! When building, expanding or evaluating expressions goes wrong.

use std::error;
use std::fmt::{self, Debug, Display};
use std::result;

/// This type represents all the possible failures of constructing, capturing,
/// expanding and evaluating expression trees.
pub struct Error {
    /// This `Box` allows us to keep the size of `Error` as small as possible. A
    /// larger `Error` type was substantially slower due to all the functions
    /// that pass around `Result<T, Error>`.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `quasi::Error`.
pub type Result<T> = result::Result<T, Error>;

/// One step on the way from the root of a tree to an offending position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The head of a call.
    Head,
    /// The argument at the given (zero-based) index of a call or pairlist.
    Arg(usize),
    /// The name half of the argument at the given index.
    Name(usize),
}

/// Position of a failure inside a tree, relative to the root of the tree
/// being expanded or built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// The empty path, denoting the root.
    pub fn root() -> Self {
        Path::default()
    }

    /// The steps from the root, outermost first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns true if this is the root path.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn pop(&mut self) {
        self.steps.pop();
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match step {
                Step::Head => f.write_str("head")?,
                Step::Arg(n) => write!(f, "arg[{}]", n)?,
                Step::Name(n) => write!(f, "name[{}]", n)?,
            }
        }
        Ok(())
    }
}

impl Error {
    /// The specific kind of failure.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Position of the offending node, if the failure was detected while
    /// walking a tree.
    pub fn path(&self) -> Option<&Path> {
        if self.err.path.is_root() {
            None
        } else {
            Some(&self.err.path)
        }
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Construction` - an ill-formed node or template was built
    /// - `Category::Capture` - there was no caller to capture an argument from
    /// - `Category::Expansion` - an unquote marker could not be resolved
    /// - `Category::Evaluation` - evaluating a node failed
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::InvalidSymbol | ErrorCode::InvalidHead(_) | ErrorCode::MisplacedSplice => {
                Category::Construction
            }
            ErrorCode::NoCallingContext(_) => Category::Capture,
            ErrorCode::UnquoteTypeError(_)
            | ErrorCode::SpliceTypeError(_)
            | ErrorCode::InvalidDefinitionName(_)
            | ErrorCode::RecursionLimitExceeded => Category::Expansion,
            ErrorCode::UnboundName(_)
            | ErrorCode::NotCallable(_)
            | ErrorCode::NotEvaluable(_)
            | ErrorCode::MissingArgument(_)
            | ErrorCode::RecursivePromise
            | ErrorCode::ArgumentMismatch(_)
            | ErrorCode::InvalidArgument(_)
            | ErrorCode::Message(_) => Category::Evaluation,
        }
    }

    /// Creates an error raised by a callable during evaluation.
    ///
    /// ```
    /// let err = quasi::Error::custom("bad input");
    /// assert_eq!(err.to_string(), "bad input");
    /// ```
    pub fn custom<T: Display>(msg: T) -> Self {
        Error::new(ErrorCode::Message(msg.to_string().into()))
    }

    pub(crate) fn new(code: ErrorCode) -> Self {
        Error {
            err: Box::new(ErrorImpl {
                code,
                path: Path::root(),
                cause: None,
            }),
        }
    }

    pub(crate) fn at(mut self, path: &Path) -> Self {
        self.err.path = path.clone();
        self
    }

    pub(crate) fn caused_by(mut self, cause: Error) -> Self {
        self.err.cause = Some(cause);
        self
    }
}

/// Categorizes the cause of a `quasi::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// An ill-formed node or template was constructed.
    Construction,

    /// Contextual capture was attempted without a suitable calling context.
    Capture,

    /// An unquote, splice or definition marker could not be resolved.
    Expansion,

    /// Evaluating a node failed, either structurally or inside an invoked
    /// callable.
    Evaluation,
}

struct ErrorImpl {
    code: ErrorCode,
    path: Path,
    cause: Option<Error>,
}

/// The kinds of failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    /// An empty or malformed identifier was passed to a symbol constructor.
    InvalidSymbol,

    /// A node of the given kind cannot appear as the head of a call.
    InvalidHead(&'static str),

    /// An unquote-splice appeared outside of an argument position.
    MisplacedSplice,

    /// Contextual capture without an enclosing function, or naming something
    /// that is not one of its parameters.
    NoCallingContext(Option<Box<str>>),

    /// A single unquote produced a value of the given type, which cannot be
    /// lifted to a node, or its source failed to evaluate.
    UnquoteTypeError(&'static str),

    /// A splice produced a value of the given type, which is not
    /// sequence-like, or its source failed to evaluate.
    SpliceTypeError(&'static str),

    /// A definition marker's name did not evaluate to a non-empty string.
    InvalidDefinitionName(&'static str),

    /// Templates were nested deeper than the configured limit.
    RecursionLimitExceeded,

    /// No binding for the name exists in the environment chain.
    UnboundName(Box<str>),

    /// The head of a call evaluated to a value of the given type.
    NotCallable(&'static str),

    /// The given kind of node has no standalone evaluation.
    NotEvaluable(&'static str),

    /// A parameter without argument or default value was referenced.
    MissingArgument(Box<str>),

    /// A promise was forced while it was already being evaluated.
    RecursivePromise,

    /// Arguments could not be matched to the parameters of a closure.
    ArgumentMismatch(Box<str>),

    /// A callable rejected one of its arguments.
    InvalidArgument(Box<str>),

    /// A free-form failure raised by a callable.
    Message(Box<str>),
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidSymbol => f.write_str("invalid symbol"),
            ErrorCode::InvalidHead(kind) => write!(f, "{} cannot be the head of a call", kind),
            ErrorCode::MisplacedSplice => {
                f.write_str("unquote-splice outside of an argument position")
            }
            ErrorCode::NoCallingContext(None) => f.write_str("not inside a function call"),
            ErrorCode::NoCallingContext(Some(name)) => {
                write!(f, "`{}' is not a parameter of the calling function", name)
            }
            ErrorCode::UnquoteTypeError(kind) => write!(f, "cannot unquote {}", kind),
            ErrorCode::SpliceTypeError(kind) => write!(f, "cannot splice {}", kind),
            ErrorCode::InvalidDefinitionName(kind) => {
                write!(f, "definition name must be a non-empty string, got {}", kind)
            }
            ErrorCode::RecursionLimitExceeded => f.write_str("recursion limit exceeded"),
            ErrorCode::UnboundName(name) => write!(f, "unbound identifier `{}'", name),
            ErrorCode::NotCallable(kind) => {
                write!(f, "non-applicable object in operator position: {}", kind)
            }
            ErrorCode::NotEvaluable(kind) => write!(f, "{} cannot be evaluated", kind),
            ErrorCode::MissingArgument(name) => {
                write!(f, "argument `{}' is missing, with no default", name)
            }
            ErrorCode::RecursivePromise => f.write_str(
                "promise already under evaluation: recursive default argument reference?",
            ),
            ErrorCode::ArgumentMismatch(msg) => write!(f, "argument mismatch: {}", msg),
            ErrorCode::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ErrorCode::Message(msg) => f.write_str(msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.err
            .cause
            .as_ref()
            .map(|cause| cause as &(dyn error::Error + 'static))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.code, f)?;
        if !self.path.is_root() {
            write!(f, " at {}", self.path)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

// Remove two layers of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.err.path.is_root() {
            write!(f, "Error({:?})", self.err.code.to_string())
        } else {
            write!(
                f,
                "Error({:?}, path: {})",
                self.err.code.to_string(),
                self.err.path
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_and_cause() {
        let mut path = Path::root();
        path.push(Step::Arg(1));
        path.push(Step::Head);
        let err = Error::new(ErrorCode::UnquoteTypeError("a list"))
            .at(&path)
            .caused_by(Error::new(ErrorCode::UnboundName("x".into())));
        assert_eq!(
            err.to_string(),
            "cannot unquote a list at arg[1].head: unbound identifier `x'"
        );
        assert_eq!(err.classify(), Category::Expansion);
        assert!(error::Error::source(&err).is_some());
    }

    #[test]
    fn root_path_is_not_reported() {
        let err = Error::new(ErrorCode::InvalidSymbol);
        assert!(err.path().is_none());
        assert_eq!(err.classify(), Category::Construction);
    }
}
