//! Module for parsing parenlisp tokens into an expression tree.

use std::str::FromStr;

use log::trace;

use crate::error::{ErrorKind, LispError};
use crate::token::{tokenize, Token, TokenKind};
use crate::value::Value;
use crate::{err, err_at};


/// Parses one expression from the front of `tokens`, returning it along
/// with the unconsumed tokens.
pub fn parse(tokens: &[Token]) -> Result<(Value, &[Token]), LispError> {
    let (first, rest) = match tokens.split_first() {
        Some(split) => split,
        None => return err!(UnexpectedEof),
    };

    match first.kind() {
        TokenKind::LeftParen => parse_list(first, rest),
        TokenKind::RightParen => err_at!(first, UnexpectedCloseParen),
        _ => Ok((literal(first), rest)),
    }
}

/// Parses every top-level expression into a single List.
///
/// Callers evaluate the elements of the result independently rather than
/// as one call.
pub fn parse_program(tokens: &[Token]) -> Result<Value, LispError> {
    let mut exprs = Vec::new();
    let mut remaining = tokens;
    while !remaining.is_empty() {
        let (expr, rest) = parse(remaining)?;
        exprs.push(expr);
        remaining = rest;
    }
    trace!("parsed {} top-level expressions", exprs.len());
    Ok(Value::List(exprs))
}

fn parse_list<'a>(open: &Token, mut tokens: &'a [Token]) -> Result<(Value, &'a [Token]), LispError> {
    let mut elems = Vec::new();
    loop {
        match tokens.split_first() {
            None => {
                return Err(LispError::at_token(open, ErrorKind::UnexpectedEof));
            }
            Some((close, rest)) if *close.kind() == TokenKind::RightParen => {
                return Ok((Value::List(elems), rest));
            }
            Some(_) => {
                let (elem, rest) = parse(tokens)?;
                elems.push(elem);
                tokens = rest;
            }
        }
    }
}

fn literal(token: &Token) -> Value {
    let text = token.text();
    match token.kind() {
        TokenKind::Integer => match text.parse::<i64>() {
            Ok(i) => Value::Integer(i),
            // Exponent forms and out-of-range integers.
            Err(_) => text
                .parse::<f64>()
                .map_or_else(|_| Value::atom(text.as_str()), Value::Float),
        },
        TokenKind::Float => text
            .parse::<f64>()
            .map_or_else(|_| Value::atom(text.as_str()), Value::Float),
        TokenKind::String => Value::string(text.as_str()),
        TokenKind::Boolean => Value::Boolean(text == "true"),
        TokenKind::Nil => Value::Nil,
        TokenKind::Identifier => Value::atom(text.as_str()),
        TokenKind::LeftParen | TokenKind::RightParen => {
            unreachable!("parens are handled by parse")
        }
    }
}


impl FromStr for Value {
    type Err = LispError;

    /// Reads the first expression of `s`; trailing input is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s);
        let (value, _) = parse(&tokens)?;
        Ok(value)
    }
}


#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;
