//! Errors produced while reading or evaluating parenlisp source.

use std::borrow::Cow;
use std::fmt;

use self::ErrorKind::*;
use self::ExpectedCount::*;
use crate::token::Token;
use crate::value::Value;


/// Creates an Err(LispError) without position info.
#[macro_export]
macro_rules! err {
    ($($kind:tt)+) => {
        Err($crate::error::LispError::new(
            $crate::error::ErrorKind::$($kind)+,
        ))
    };
}

/// Creates an Err(LispError) positioned at a Token.
#[macro_export]
macro_rules! err_at {
    ($token:expr, $($kind:tt)+) => {
        Err($crate::error::LispError::at_token(
            $token,
            $crate::error::ErrorKind::$($kind)+,
        ))
    };
}


pub type Ret = Result<Value, LispError>;

#[derive(Debug, PartialEq)]
pub struct LispError {
    kind: ErrorKind,
    // Both 0 when no position is known.
    line: usize,
    col: usize,
}

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    // Parse-time.
    UnexpectedEof,
    UnexpectedCloseParen,

    // Evaluation-time.
    UnboundSymbol(String),
    NotCallable(Value),
    ArityMismatch {
        name: String,
        given: usize,
        expected: ExpectedCount,
    },
    InvalidArgumentType {
        given: Value,
        expected: Cow<'static, str>,
    },
    DivisionByZero,
    InvalidLetBinding(Value),
    InvalidFunctionDefinition(Value),
    EmptyList(&'static str),
    Io(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpectedCount {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}


impl LispError {
    /// Prefer using err! for convenience.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            line: 0,
            col: 0,
        }
    }

    /// Prefer using err_at! for convenience.
    pub fn at_token(token: &Token, kind: ErrorKind) -> Self {
        Self {
            kind,
            line: *token.line(),
            col: *token.col(),
        }
    }

    pub fn at(line: usize, col: usize, kind: ErrorKind) -> Self {
        Self { kind, line, col }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn has_position(&self) -> bool {
        self.line > 0
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self.kind, UnexpectedEof | UnexpectedCloseParen)
    }
}

impl ExpectedCount {
    pub fn accepts(&self, given: usize) -> bool {
        match *self {
            Exactly(n) => given == n,
            AtLeast(n) => given >= n,
            AtMost(n) => given <= n,
        }
    }
}


impl fmt::Display for LispError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_parse_error() {
            write!(f, "[Parse Error] ")?;
        } else {
            write!(f, "[Eval Error] ")?;
        }
        write!(f, "{}", self.kind)?;
        if self.has_position() {
            write!(f, " @ ({}, {})", self.line, self.col)?;
        }
        Ok(())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnexpectedEof => write!(f, "Unexpected EOF while reading"),
            UnexpectedCloseParen => write!(f, "Unexpected )"),
            UnboundSymbol(symbol) => write!(f, "Unbound symbol: \"{}\"", symbol),
            NotCallable(val) => write!(f, "Not callable: {}", val),
            ArityMismatch {
                name,
                given,
                expected,
            } => write!(
                f,
                "Wrong argument count to {}: given {}, expected {}",
                name, given, expected
            ),
            InvalidArgumentType { given, expected } => write!(
                f,
                "Invalid argument: given {}, expected {}",
                given, expected
            ),
            DivisionByZero => write!(f, "Division by zero"),
            InvalidLetBinding(val) => write!(f, "Invalid let binding: {}", val),
            InvalidFunctionDefinition(val) => {
                write!(f, "Invalid function definition: {}", val)
            }
            EmptyList(op) => write!(f, "{} of empty list", op),
            Io(msg) => write!(f, "I/O failure: {}", msg),
        }
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exactly(exactly) => write!(f, "{}", exactly),
            AtLeast(minimum) => write!(f, "at least {}", minimum),
            AtMost(maximum) => write!(f, "at most {}", maximum),
        }
    }
}

impl std::error::Error for LispError {}

impl From<std::io::Error> for LispError {
    fn from(err: std::io::Error) -> Self {
        LispError::new(Io(err.to_string()))
    }
}
