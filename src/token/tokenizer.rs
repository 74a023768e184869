//! Module for breaking parenlisp text into tokens.

use std::collections::VecDeque;

use log::trace;

use super::token::{Token, TokenKind};

use self::TokenizerState::*;


/// Tokenizes a complete chunk of source.
///
/// Never fails; malformed input degrades to Identifier tokens.
pub fn tokenize<S: AsRef<str>>(source: S) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.tokenize(source);
    tokenizer.finish()
}


/// Essentially a Mealy machine that outputs and accumulates Tokens
/// given string-like input.
///
/// Input may be fed in pieces; pending text is only flushed by
/// whitespace, parens, or finish().
pub struct Tokenizer {
    // Mealy machine state.
    state: TokenizerState,
    depth: usize,

    // Non-control state.
    pending: String,
    pending_line: usize,
    pending_col: usize,
    line: usize,
    col: usize,
    tokens: VecDeque<Token>,
}

#[derive(Debug, PartialEq)]
enum TokenizerState {
    Base,
    InString,
    InStringEscaped,
}


impl Tokenizer {
    pub fn new() -> Self {
        Self {
            state: Base,
            depth: 0,

            pending: String::default(),
            pending_line: 1,
            pending_col: 1,
            line: 1,
            col: 1,
            tokens: Default::default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Count of currently unclosed lists; an open string counts as
    /// at least one level.
    pub fn depth(&self) -> usize {
        let in_string = self.state != Base;
        std::cmp::max(self.depth, in_string as usize)
    }

    pub fn tokenize<S: AsRef<str>>(&mut self, input: S) {
        for c in input.as_ref().chars() {
            match self.state {
                Base => match c {
                    '(' | ')' => {
                        self.flush();
                        let kind = if c == '(' {
                            self.depth += 1;
                            TokenKind::LeftParen
                        } else {
                            self.depth = self.depth.saturating_sub(1);
                            TokenKind::RightParen
                        };
                        self.tokens
                            .push_back(Token::new(kind, c.to_string(), self.line, self.col));
                    }
                    '"' => {
                        self.flush();
                        self.mark_start();
                        self.state = InString;
                    }
                    _ if c.is_whitespace() => self.flush(),
                    _ => {
                        if self.pending.is_empty() {
                            self.mark_start();
                        }
                        self.pending.push(c);
                    }
                },
                InString => match c {
                    '\\' => self.state = InStringEscaped,
                    '"' => {
                        let text = std::mem::take(&mut self.pending);
                        self.tokens.push_back(Token::new(
                            TokenKind::String,
                            text,
                            self.pending_line,
                            self.pending_col,
                        ));
                        self.state = Base;
                    }
                    _ => self.pending.push(c),
                },
                InStringEscaped => {
                    // The escaped char is taken as-is.
                    self.pending.push(c);
                    self.state = InString;
                }
            }

            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Flushes any pending text and returns all accumulated tokens.
    ///
    /// An unterminated string is flushed as an Identifier.
    pub fn finish(mut self) -> Vec<Token> {
        if self.state != Base && !self.pending.is_empty() {
            // Unterminated string contents are never read as literals.
            let text = std::mem::take(&mut self.pending);
            self.tokens.push_back(Token::new(
                TokenKind::Identifier,
                text,
                self.pending_line,
                self.pending_col,
            ));
        }
        self.flush();
        self.tokens.into_iter().collect()
    }

    fn mark_start(&mut self) {
        self.pending_line = self.line;
        self.pending_col = self.col;
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.pending);
        let kind = classify(&text);
        trace!("token {:?} {:?}", kind, text);
        self.tokens
            .push_back(Token::new(kind, text, self.pending_line, self.pending_col));
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    /// Yields only tokens that have already been flushed.
    fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}


fn classify(text: &str) -> TokenKind {
    match text {
        "true" | "false" => TokenKind::Boolean,
        "nil" => TokenKind::Nil,
        _ if looks_numeric(text) && text.parse::<f64>().is_ok() => {
            if text.contains('.') {
                TokenKind::Float
            } else {
                TokenKind::Integer
            }
        }
        _ => TokenKind::Identifier,
    }
}

// Keeps words like "inf" and "NaN", which f64 accepts, as identifiers.
fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    let mut chars = unsigned.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => matches!(chars.next(), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}


#[cfg(test)]
#[path = "./tokenizer_test.rs"]
mod tokenizer_test;
