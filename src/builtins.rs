//! The fixed catalog of primitive operations.
//!
//! Builtins see their arguments already evaluated and arity-checked.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::console::Console;
use crate::err;
use crate::error::{ErrorKind, ExpectedCount, LispError, Ret};
use crate::number::Number;
use crate::value::Value;

use self::ExpectedCount::*;


pub type Args = Vec<Value>;
pub type BuiltinFn = fn(Args, &mut dyn Console) -> Ret;

pub struct Builtin {
    name: &'static str,
    arity: ExpectedCount,
    fun: BuiltinFn,
}

macro_rules! builtins {
    [$($n:tt : $x:expr, $arity:expr);+ $(;)?] => {
        {
            let mut m = HashMap::new();
            $(
                m.insert(
                    $n,
                    Builtin {
                        name: $n,
                        arity: $arity,
                        fun: $x,
                    },
                );
            )+
            m
        }
    };
}

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = builtins![
        // Arithmetic.
        "+": add, AtLeast(0);
        "-": sub, AtLeast(1);
        "*": mul, AtLeast(0);
        "/": div, AtLeast(1);
        "%": rem, Exactly(2);
        "pow": pow, Exactly(2);
        "sqrt": sqrt, Exactly(1);
        // Comparison.
        "<": lt, Exactly(2);
        "<=": le, Exactly(2);
        ">": gt, Exactly(2);
        ">=": ge, Exactly(2);
        "=": eq, Exactly(2);
        // Strings.
        "concat": concat, AtLeast(0);
        "substring": substring, Exactly(3);
        "isString": is_string, Exactly(1);
        "isNumber": is_number, Exactly(1);
        // Lists.
        "car": car, Exactly(1);
        "cdr": cdr, Exactly(1);
        "cons": cons, Exactly(2);
        "length": length, Exactly(1);
        "append": append, AtLeast(0);
        // I/O.
        "format": format, AtLeast(2);
        "read": read, AtLeast(0);
        "print": print, AtLeast(0);
    ];
}

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get(name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.keys().copied()
}


impl Builtin {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> &ExpectedCount {
        &self.arity
    }

    pub fn call(&self, args: Args, console: &mut dyn Console) -> Ret {
        if !self.arity.accepts(args.len()) {
            return err!(ArityMismatch {
                name: self.name.to_string(),
                given: args.len(),
                expected: self.arity,
            });
        }
        trace!("builtin {} with {} args", self.name, args.len());
        (self.fun)(args, console)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{} @ {:p}]", self.name, &self.fun)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{}]", self.name)
    }
}


fn invalid<T>(given: &Value, expected: &'static str) -> Result<T, LispError> {
    Err(LispError::new(ErrorKind::InvalidArgumentType {
        given: given.clone(),
        expected: Cow::Borrowed(expected),
    }))
}

fn number(arg: &Value) -> Result<Number, LispError> {
    match Number::try_from(arg) {
        Ok(num) => Ok(num),
        Err(()) => invalid(arg, "a number"),
    }
}

fn integer(arg: &Value) -> Result<i64, LispError> {
    match arg {
        Value::Integer(i) => Ok(*i),
        _ => invalid(arg, "an integer"),
    }
}

fn string(arg: &Value) -> Result<&str, LispError> {
    match arg {
        Value::String(s) => Ok(s.as_str()),
        _ => invalid(arg, "a string"),
    }
}

fn list(arg: &Value) -> Result<&[Value], LispError> {
    match arg {
        Value::List(elems) => Ok(elems.as_slice()),
        _ => invalid(arg, "a list"),
    }
}

fn collapsed(num: Number) -> Ret {
    Ok(num.collapse().into())
}


// Arithmetic.

fn add(args: Args, _: &mut dyn Console) -> Ret {
    let mut curr = Number::default();
    for arg in &args {
        curr += number(arg)?;
    }
    collapsed(curr)
}

fn sub(args: Args, _: &mut dyn Console) -> Ret {
    let mut curr = number(&args[0])?;
    if args.len() == 1 {
        return collapsed(curr.neg());
    }
    for arg in &args[1..] {
        curr -= number(arg)?;
    }
    collapsed(curr)
}

fn mul(args: Args, _: &mut dyn Console) -> Ret {
    let mut curr = Number::Integer(1);
    for arg in &args {
        curr *= number(arg)?;
    }
    collapsed(curr)
}

fn div(args: Args, _: &mut dyn Console) -> Ret {
    let mut curr = number(&args[0])?;
    for arg in &args[1..] {
        let divisor = number(arg)?;
        if divisor.is_zero() {
            return err!(DivisionByZero);
        }
        curr /= divisor;
    }
    collapsed(curr)
}

fn rem(args: Args, _: &mut dyn Console) -> Ret {
    let mut curr = number(&args[0])?;
    let divisor = number(&args[1])?;
    if divisor.is_zero() {
        return err!(DivisionByZero);
    }
    curr %= divisor;
    collapsed(curr)
}

fn pow(args: Args, _: &mut dyn Console) -> Ret {
    let base = number(&args[0])?;
    let exp = number(&args[1])?;
    collapsed(base.pow(exp))
}

fn sqrt(args: Args, _: &mut dyn Console) -> Ret {
    let num = number(&args[0])?;
    if num.as_f64() < 0.0 {
        return invalid(&args[0], "a non-negative number");
    }
    collapsed(Number::Float(num.as_f64().sqrt()))
}


// Comparison.

fn numeric_cmp(args: &[Value], accept: fn(Ordering) -> bool) -> Ret {
    let a = number(&args[0])?;
    let b = number(&args[1])?;
    // NaN compares false to everything.
    Ok(a.partial_cmp(&b).map_or(false, accept).into())
}

fn lt(args: Args, _: &mut dyn Console) -> Ret {
    numeric_cmp(&args, |o| o == Ordering::Less)
}

fn le(args: Args, _: &mut dyn Console) -> Ret {
    numeric_cmp(&args, |o| o != Ordering::Greater)
}

fn gt(args: Args, _: &mut dyn Console) -> Ret {
    numeric_cmp(&args, |o| o == Ordering::Greater)
}

fn ge(args: Args, _: &mut dyn Console) -> Ret {
    numeric_cmp(&args, |o| o != Ordering::Less)
}

/// Numeric equality across Integer/Float; structural otherwise.
fn eq(args: Args, _: &mut dyn Console) -> Ret {
    if args[0].is_number() && args[1].is_number() {
        return numeric_cmp(&args, |o| o == Ordering::Equal);
    }
    Ok((args[0] == args[1]).into())
}


// Strings.

fn concat(args: Args, _: &mut dyn Console) -> Ret {
    let mut result = String::new();
    for arg in &args {
        result.push_str(string(arg)?);
    }
    Ok(Value::String(result))
}

/// Character-indexed, end-exclusive.
fn substring(args: Args, _: &mut dyn Console) -> Ret {
    let s = string(&args[0])?;
    let start = integer(&args[1])?;
    let end = integer(&args[2])?;
    let len = s.chars().count() as i64;
    if start < 0 || end > len || start > end {
        return invalid(
            &Value::List(vec![args[1].clone(), args[2].clone()]),
            "a valid substring range",
        );
    }

    let result = s
        .chars()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect::<String>();
    Ok(Value::String(result))
}

fn is_string(args: Args, _: &mut dyn Console) -> Ret {
    Ok(matches!(args[0], Value::String(_)).into())
}

fn is_number(args: Args, _: &mut dyn Console) -> Ret {
    Ok(args[0].is_number().into())
}


// Lists.

fn car(args: Args, _: &mut dyn Console) -> Ret {
    match list(&args[0])?.first() {
        Some(first) => Ok(first.clone()),
        None => err!(EmptyList("car")),
    }
}

fn cdr(args: Args, _: &mut dyn Console) -> Ret {
    match list(&args[0])?.split_first() {
        Some((_, rest)) => Ok(Value::List(rest.to_vec())),
        None => err!(EmptyList("cdr")),
    }
}

fn cons(args: Args, _: &mut dyn Console) -> Ret {
    let tail = list(&args[1])?;
    let mut result = Vec::with_capacity(tail.len() + 1);
    result.push(args[0].clone());
    result.extend_from_slice(tail);
    Ok(Value::List(result))
}

fn length(args: Args, _: &mut dyn Console) -> Ret {
    Ok(Value::Integer(list(&args[0])?.len() as i64))
}

fn append(args: Args, _: &mut dyn Console) -> Ret {
    let mut result = Vec::new();
    for arg in &args {
        result.extend_from_slice(list(arg)?);
    }
    Ok(Value::List(result))
}


// I/O.

/// (format DEST TEMPLATE ARGS...)
///
/// Directives: %v any value, %s string, %d integer, %f float, %% percent.
/// When DEST is true the result is also written to the console.
fn format(args: Args, console: &mut dyn Console) -> Ret {
    lazy_static! {
        static ref DIRECTIVE: Regex = Regex::new(r"%[%vsdf]").unwrap();
    }

    let dest = &args[0];
    let template = string(&args[1])?;
    let values = &args[2..];

    let mut result = String::with_capacity(template.len());
    let mut last = 0;
    let mut used = 0;
    for m in DIRECTIVE.find_iter(template) {
        result.push_str(&template[last..m.start()]);
        last = m.end();

        if m.as_str() == "%%" {
            result.push('%');
            continue;
        }
        let value = match values.get(used) {
            Some(value) => value,
            // Keep counting so the error reports the full directive count.
            None => {
                used += 1;
                continue;
            }
        };
        used += 1;
        match m.as_str() {
            "%v" => result.push_str(&value.to_plain_string()),
            "%s" => result.push_str(string(value)?),
            "%d" => result.push_str(&integer(value)?.to_string()),
            "%f" => result.push_str(&format!("{:.6}", number(value)?.as_f64())),
            _ => unreachable!("directive regex only matches known directives"),
        }
    }
    result.push_str(&template[last..]);

    if used != values.len() {
        return err!(ArityMismatch {
            name: "format".to_string(),
            given: values.len(),
            expected: Exactly(used),
        });
    }

    match dest.as_bool() {
        Some(true) => console.write_str(&result)?,
        Some(false) => {}
        None => return invalid(dest, "t or nil as format destination"),
    }
    Ok(Value::String(result))
}

/// Prompts with the (unquoted) args and blocks for a line; nil at EOF.
fn read(args: Args, console: &mut dyn Console) -> Ret {
    let prompt = args
        .iter()
        .map(Value::to_plain_string)
        .collect::<Vec<_>>()
        .join("");
    match console.read_line(&prompt)? {
        Some(line) => Ok(Value::String(line)),
        None => Ok(Value::Nil),
    }
}

/// Writes the args space-separated with a newline; returns the last one.
fn print(args: Args, console: &mut dyn Console) -> Ret {
    let mut text = args
        .iter()
        .map(Value::to_plain_string)
        .collect::<Vec<_>>()
        .join(" ");
    text.push('\n');
    console.write_str(&text)?;
    Ok(args.into_iter().last().unwrap_or(Value::Nil))
}


#[cfg(test)]
#[path = "./builtins_test.rs"]
mod builtins_test;
