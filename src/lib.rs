//! A small Lisp: tokenizer, parser, lexically scoped environments, and a
//! tree-walking evaluator with a fixed builtin library.
//!
//! Note that this crate does *not* setup logging, clients should
//! take care of that prior to running an Interpreter. See:
//!   https://github.com/rust-lang/log#in-executables.

#[macro_use]
pub mod error;

pub mod builtins;
pub mod console;
pub mod env;
pub mod interpreter;
pub mod number;
pub mod parser;
pub mod token;
pub mod value;

pub mod prelude {
    pub use crate::console::{BufferConsole, Console, StdConsole};
    pub use crate::env::Env;
    pub use crate::error::{ErrorKind, ExpectedCount, LispError, Ret};
    pub use crate::interpreter::{Interpreter, SpecialForm};
    pub use crate::parser::{parse, parse_program};
    pub use crate::token::{tokenize, Token, TokenKind, Tokenizer};
    pub use crate::value::{Function, Value};
    // Macros.
    pub use crate::{err, err_at};
}
