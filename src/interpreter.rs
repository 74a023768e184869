//! Tree-walking evaluation of parenlisp expressions.

use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};

use crate::builtins;
use crate::console::{Console, StdConsole};
use crate::env::Env;
use crate::err;
use crate::error::{ErrorKind, ExpectedCount, LispError, Ret};
use crate::parser::parse_program;
use crate::token::tokenize;
use crate::value::{Function, Value};

use self::SpecialForm::*;


/// Owns the global env and the console that I/O builtins talk to.
pub struct Interpreter {
    env: Env,
    console: Box<dyn Console>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_console(Box::new(StdConsole))
    }

    pub fn with_console(console: Box<dyn Console>) -> Self {
        Self {
            env: Env::global(),
            console,
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn eval(&mut self, expr: &Value) -> Ret {
        eval(&self.env, expr, &mut *self.console)
    }

    /// Evaluates every top-level expression of `source` in order, stopping
    /// at the first error.
    pub fn run<S: AsRef<str>>(&mut self, source: S) -> Result<Vec<Value>, LispError> {
        read_program(source.as_ref())?
            .iter()
            .map(|expr| self.eval(expr))
            .collect()
    }

    /// Like run, but an evaluation error only abandons its own top-level
    /// expression. Parse errors still reject the whole chunk.
    pub fn run_each<S: AsRef<str>>(&mut self, source: S) -> Result<Vec<Ret>, LispError> {
        Ok(read_program(source.as_ref())?
            .iter()
            .map(|expr| self.eval(expr))
            .collect())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn read_program(source: &str) -> Result<Vec<Value>, LispError> {
    let tokens = tokenize(source);
    match parse_program(&tokens)? {
        Value::List(exprs) => Ok(exprs),
        other => Ok(vec![other]),
    }
}


/// Evaluates `expr` in `env`.
pub fn eval(env: &Env, expr: &Value, console: &mut dyn Console) -> Ret {
    ExecutingInterpreter { console }.eval(env, expr)
}


/// Syntactic forms that receive their arguments unevaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpecialForm {
    If,
    Defun,
    Lambda,
    Let,
    And,
    Or,
    Not,
    List,
}

impl SpecialForm {
    pub const ALL: [SpecialForm; 8] = [If, Defun, Lambda, Let, And, Or, Not, List];

    pub fn from_name(name: &str) -> Option<SpecialForm> {
        match name {
            "if" => Some(If),
            "defun" => Some(Defun),
            "lambda" => Some(Lambda),
            "let" => Some(Let),
            "and" => Some(And),
            "or" => Some(Or),
            "not" => Some(Not),
            "list" => Some(List),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            If => "if",
            Defun => "defun",
            Lambda => "lambda",
            Let => "let",
            And => "and",
            Or => "or",
            Not => "not",
            List => "list",
        }
    }

    fn arity(self) -> ExpectedCount {
        match self {
            If | Defun => ExpectedCount::Exactly(3),
            Lambda | Let => ExpectedCount::Exactly(2),
            Not => ExpectedCount::Exactly(1),
            And | Or | List => ExpectedCount::AtLeast(0),
        }
    }
}

impl fmt::Display for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


struct ExecutingInterpreter<'a> {
    console: &'a mut dyn Console,
}

impl<'a> ExecutingInterpreter<'a> {
    fn eval(&mut self, env: &Env, expr: &Value) -> Ret {
        trace!("eval {}", expr);
        match expr {
            Value::Atom(name) => env.lookup(name),
            Value::Integer(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Boolean(_)
            | Value::Nil
            | Value::Function(_) => Ok(expr.clone()),
            Value::List(elems) => match elems.split_first() {
                None => Ok(expr.clone()),
                Some((head, args)) => self.apply(env, head, args),
            },
        }
    }

    /// Head resolution order: special form, user binding, builtin.
    fn apply(&mut self, env: &Env, head: &Value, args: &[Value]) -> Ret {
        let name = match head {
            Value::Atom(name) => name.as_str(),
            _ => return err!(NotCallable(head.clone())),
        };

        if let Some(form) = SpecialForm::from_name(name) {
            check_arity(form.name(), form.arity(), args)?;
            return self.special_form(form, env, args);
        }

        let builtin = builtins::lookup(name);
        match env.get(name) {
            Some(Value::Function(function)) => {
                return self.call_function(env, name, &function, args);
            }
            // A non-function binding only hides a builtin if there is none.
            Some(other) if builtin.is_none() => return err!(NotCallable(other)),
            _ => {}
        }

        match builtin {
            Some(builtin) => {
                let args = self.evlis(env, args)?;
                builtin.call(args, &mut *self.console)
            }
            None => err!(UnboundSymbol(name.to_string())),
        }
    }

    fn evlis(&mut self, env: &Env, args: &[Value]) -> Result<Vec<Value>, LispError> {
        args.iter().map(|arg| self.eval(env, arg)).collect()
    }

    /// Arguments are evaluated in the caller's env, then bound over the
    /// function's captured env.
    fn call_function(&mut self, env: &Env, name: &str, function: &Function, args: &[Value]) -> Ret {
        check_arity(name, ExpectedCount::Exactly(function.params().len()), args)?;

        let values = self.evlis(env, args)?;
        debug!("call {} with ({})", name, display_args(&values));
        let local = function
            .env()
            .child_with(function.params().iter().cloned().zip(values));
        self.eval(&local, function.body())
    }

    fn special_form(&mut self, form: SpecialForm, env: &Env, args: &[Value]) -> Ret {
        match form {
            If => self.eval_if(env, args),
            Defun => self.defun(env, args),
            Lambda => self.lambda(env, args),
            Let => self.eval_let(env, args),
            And => self.junction(env, args, false),
            Or => self.junction(env, args, true),
            Not => {
                let val = self.eval(env, &args[0])?;
                Ok((!condition(&val)?).into())
            }
            List => Ok(Value::List(self.evlis(env, args)?)),
        }
    }

    fn eval_if(&mut self, env: &Env, args: &[Value]) -> Ret {
        let cond = self.eval(env, &args[0])?;
        if condition(&cond)? {
            self.eval(env, &args[1])
        } else {
            self.eval(env, &args[2])
        }
    }

    /// and (short_on = false) / or (short_on = true).
    fn junction(&mut self, env: &Env, args: &[Value], short_on: bool) -> Ret {
        for arg in args {
            let val = self.eval(env, arg)?;
            if condition(&val)? == short_on {
                return Ok(short_on.into());
            }
        }
        Ok((!short_on).into())
    }

    fn defun(&mut self, env: &Env, args: &[Value]) -> Ret {
        let name = match &args[0] {
            Value::Atom(name) if SpecialForm::from_name(name).is_none() => name.clone(),
            other => return err!(InvalidFunctionDefinition(other.clone())),
        };
        let params = params(&args[1])?;

        debug!("defun {} ({})", name, params.join(" "));
        let function: Value =
            Function::new(Some(name.clone()), params, args[2].clone(), env.clone()).into();
        // Bound in the env the function captures, so it can recurse.
        env.define(name, function.clone());
        Ok(function)
    }

    fn lambda(&mut self, env: &Env, args: &[Value]) -> Ret {
        let params = params(&args[0])?;
        debug!("lambda ({})", params.join(" "));
        Ok(Function::new(None, params, args[1].clone(), env.clone()).into())
    }

    /// Sequential: each binding sees the ones before it.
    fn eval_let(&mut self, env: &Env, args: &[Value]) -> Ret {
        let bindings = match &args[0] {
            Value::List(bindings) => bindings,
            other => return err!(InvalidLetBinding(other.clone())),
        };

        let local = env.child();
        for binding in bindings {
            let (name, expr) = match binding.as_list() {
                Some([Value::Atom(name), expr]) => (name, expr),
                _ => return err!(InvalidLetBinding(binding.clone())),
            };
            let val = self.eval(&local, expr)?;
            local.define(name.as_str(), val);
        }
        self.eval(&local, &args[1])
    }
}


fn check_arity(name: &str, expected: ExpectedCount, args: &[Value]) -> Result<(), LispError> {
    if expected.accepts(args.len()) {
        return Ok(());
    }
    err!(ArityMismatch {
        name: name.to_string(),
        given: args.len(),
        expected,
    })
}

/// Only booleans and nil may be used as conditions.
fn condition(val: &Value) -> Result<bool, LispError> {
    match val.as_bool() {
        Some(b) => Ok(b),
        None => Err(LispError::new(ErrorKind::InvalidArgumentType {
            given: val.clone(),
            expected: "a boolean or nil".into(),
        })),
    }
}

fn params(list: &Value) -> Result<Vec<String>, LispError> {
    let elems = match list.as_list() {
        Some(elems) => elems,
        None => return err!(InvalidFunctionDefinition(list.clone())),
    };

    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(elems.len());
    for elem in elems {
        match elem.as_atom() {
            Some(name) if seen.insert(name) => params.push(name.to_string()),
            // Non-atom or duplicate.
            _ => return err!(InvalidFunctionDefinition(list.clone())),
        }
    }
    Ok(params)
}

fn display_args(values: &[Value]) -> String {
    values
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
#[path = "./interpreter_test.rs"]
mod interpreter_test;
