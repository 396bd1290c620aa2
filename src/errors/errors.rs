use std::fmt::Display;

use thiserror::Error as ThisError;

use crate::Position;

/// A recoverable unit failure (or, for `ErrorKind::Io`, a fatal one).
///
/// Parse and execution functions signal failure by returning this instead
/// of aborting; the driver loop is the single recovery point.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    position: Position,
}

impl Error {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Error { kind, position }
    }

    /// An error with no useful source location, e.g. one raised while a
    /// compiled unit is executing.
    pub fn semantic(kind: ErrorKind) -> Self {
        Error::new(kind, Position::null())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.position.is_null() {
            write!(f, "error: {}", self.kind)
        } else {
            write!(f, "error at {}: {}", self.position, self.kind)
        }
    }
}

impl std::error::Error for Error {}

#[derive(ThisError, Debug, Clone)]
pub enum ErrorKind {
    // syntax
    #[error("expected {expected}, found '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("unknown token when expecting an expression: '{found}'")]
    ExpectedExpression { found: String },
    #[error("expected function name in prototype, found '{found}'")]
    ExpectedPrototypeName { found: String },
    #[error("expected operator character after '{keyword}', found '{found}'")]
    ExpectedOperatorChar { keyword: String, found: String },
    #[error("invalid precedence {value}: must be between 1 and 100")]
    InvalidPrecedence { value: f64 },
    #[error("invalid number of operands for operator: expected {expected}, found {found}")]
    WrongOperatorArity { expected: usize, found: usize },
    #[error("expected at least one variable name after 'var', found '{found}'")]
    ExpectedBinding { found: String },

    // semantic, surfaced while a unit is compiled or executed
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },
    #[error("unknown function '{name}'")]
    UnknownCallee { name: String },
    #[error("wrong number of arguments to '{callee}': expected {expected}, received {received}")]
    WrongArgumentCount {
        callee: String,
        expected: usize,
        received: usize,
    },
    #[error("unknown unary operator '{op}'")]
    UnknownUnaryOperator { op: char },
    #[error("unknown binary operator '{op}'")]
    UnknownBinaryOperator { op: char },
    #[error("destination of '=' must be a variable")]
    InvalidAssignmentTarget,

    // fatal
    #[error("{message}")]
    Io { message: String },
}
