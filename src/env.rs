//! Lexical environments: symbol bindings chained to a parent scope.
//!
//! Frames are shared by reference, so a closure observes later defines in
//! the scope it captured. Frames reachable from a closure stored in that
//! same frame (e.g. a recursive defun) form an Rc cycle and are never
//! freed; the global env lives for the whole process anyway.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::err;
use crate::error::Ret;
use crate::value::Value;


#[derive(Clone)]
pub struct Env(Rc<RefCell<Frame>>);

struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Env>,
}


impl Env {
    /// An empty root env.
    pub fn new() -> Self {
        Self::from_frame(Frame {
            bindings: HashMap::new(),
            parent: None,
        })
    }

    /// Root env pre-populated with the boolean and nil constants.
    pub fn global() -> Self {
        let env = Self::new();
        env.define("true", Value::Boolean(true));
        env.define("t", Value::Boolean(true));
        env.define("false", Value::Boolean(false));
        env.define("nil", Value::Nil);
        env
    }

    fn from_frame(frame: Frame) -> Self {
        Env(Rc::new(RefCell::new(frame)))
    }

    /// New env whose frame holds `bindings` and otherwise defers to self.
    pub fn child_with<I>(&self, bindings: I) -> Env
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self::from_frame(Frame {
            bindings: bindings.into_iter().collect(),
            parent: Some(self.clone()),
        })
    }

    pub fn child(&self) -> Env {
        self.child_with(std::iter::empty())
    }

    /// Binds in this frame only; last write wins.
    pub fn define<S: Into<String>>(&self, name: S, value: Value) {
        let name = name.into();
        trace!("define {}", name);
        self.0.borrow_mut().bindings.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let mut curr = self.clone();
        loop {
            let next = {
                let frame = curr.0.borrow();
                if let Some(value) = frame.bindings.get(name) {
                    return Some(value.clone());
                }
                frame.parent.clone()
            };
            curr = next?;
        }
    }

    pub fn lookup(&self, name: &str) -> Ret {
        match self.get(name) {
            Some(value) => Ok(value),
            None => err!(UnboundSymbol(name.to_string())),
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every name visible from this env, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        let mut curr = Some(self.clone());
        while let Some(env) = curr {
            let frame = env.0.borrow();
            names.extend(frame.bindings.keys().cloned());
            curr = frame.parent.clone();
        }
        names.into_iter().collect()
    }

    /// Number of frames above this one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut curr = self.0.borrow().parent.clone();
        while let Some(env) = curr {
            depth += 1;
            curr = env.0.borrow().parent.clone();
        }
        depth
    }

    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        let mut names = frame.bindings.keys().collect::<Vec<_>>();
        names.sort();
        write!(f, "[Env depth {} @ {:p}: {:?}]", self.depth(), self.0, names)
    }
}


#[cfg(test)]
#[path = "./env_test.rs"]
mod env_test;
