use std::fmt;

use derive_getters::Getters;


#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Identifier,
    Integer,
    Float,
    String,
    Boolean,
    Nil,
}

/// A lexeme with its 1-based source position.
///
/// For String tokens, `text` is the unescaped contents without quotes.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: usize,
    col: usize,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, text: S, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            col,
        }
    }

    pub fn is_paren(&self) -> bool {
        matches!(self.kind, TokenKind::LeftParen | TokenKind::RightParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "{:?}", self.text)?,
            _ => write!(f, "{}", self.text)?,
        }
        write!(f, " @ ({}, {})", self.line, self.col)
    }
}
