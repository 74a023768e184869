//! Runtime values, which double as parsed expression trees.

use std::fmt;
use std::rc::Rc;

use derivative::Derivative;

use crate::env::Env;


#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Atom(String),
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Nil,
    List(Vec<Value>),
    Function(Rc<Function>),
}

/// A closure: parameters and body paired with the environment in effect
/// where it was defined.
#[derive(Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Function {
    name: Option<String>,
    params: Vec<String>,
    body: Value,
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    env: Env,
}


impl Value {
    pub fn atom<S: Into<String>>(name: S) -> Self {
        Value::Atom(name.into())
    }

    pub fn string<S: Into<String>>(s: S) -> Self {
        Value::String(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Atom(_) => "atom",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Nil => "nil",
            Value::List(_) => "list",
            Value::Function(_) => "function",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Some(truth) for boolean-equivalent values, None otherwise.
    ///
    /// Only Boolean and Nil take part; there is no general truthiness.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Nil => Some(false),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Value::Atom(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(elems) => Some(elems.as_slice()),
            _ => None,
        }
    }

    /// Rendering used by print/read/format: like Display, but strings are
    /// emitted without surrounding quotes.
    pub fn to_plain_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl Function {
    pub fn new(name: Option<String>, params: Vec<String>, body: Value, env: Env) -> Self {
        Self {
            name,
            params,
            body,
            env,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}


impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elems: Vec<Value>) -> Self {
        Value::List(elems)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }
}


impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Bare name; an atom named like a literal re-reads as that literal.
            Value::Atom(name) => write!(f, "{}", name),
            Value::Integer(i) => write!(f, "{}", i),
            // Debug gives the shortest repr that reads back as a float.
            Value::Float(ff) => write!(f, "{:?}", ff),
            Value::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\"")
            }
            Value::Boolean(true) => write!(f, "true"),
            Value::Boolean(false) => write!(f, "false"),
            Value::Nil => write!(f, "nil"),
            Value::List(elems) => {
                write!(f, "(")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, ")")
            }
            Value::Function(function) => write!(f, "{}", function),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name.to_uppercase()),
            None => write!(f, "FUNCTION"),
        }
    }
}


#[cfg(test)]
#[path = "./value_test.rs"]
mod value_test;
