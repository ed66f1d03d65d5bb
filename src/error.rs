use std::fmt;
use thiserror::Error;

/// Result alias used across the crate.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Location in the source text. `line` and `column` are 1-based, `offset` is a byte index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 1, column: 1, offset: 0 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    /// Only raised in strict mode; the default is fallback resolution.
    UnknownVariable,
    UnknownFunction,
    UnsupportedOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::UnknownVariable => "unknown variable",
            ErrorKind::UnknownFunction => "unknown function",
            ErrorKind::UnsupportedOperation => "unsupported operation",
        };
        f.write_str(name)
    }
}

/// The single error surfaced by lexing, parsing and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}: {message}", at(.position))]
pub struct ConfigError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<Position>,
}

fn at(position: &Option<Position>) -> String {
    match position {
        Some(pos) => format!(" at {}", pos),
        None => String::new(),
    }
}

impl ConfigError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Option<Position>) -> Self {
        ConfigError { kind, message: message.into(), position }
    }

    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, Some(position))
    }

    /// `expected X, found Y` form used by the parser.
    pub fn expected(expected: &str, found: impl fmt::Display, position: Position) -> Self {
        Self::syntax(format!("expected {}, found {}", expected, found), position)
    }

    pub fn unknown_variable(name: &str, position: Option<Position>) -> Self {
        Self::new(ErrorKind::UnknownVariable, format!("'{}' is not a declared constant", name), position)
    }

    pub fn unknown_function(name: &str, position: Option<Position>) -> Self {
        Self::new(ErrorKind::UnknownFunction, format!("no function named '{}'", name), position)
    }

    pub fn unsupported(message: impl Into<String>, position: Option<Position>) -> Self {
        Self::new(ErrorKind::UnsupportedOperation, message, position)
    }
}
