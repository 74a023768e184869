//! Numeric tower for arithmetic builtins.

use std::convert::TryFrom;
use std::fmt;
use std::ops;

use self::Number::*;
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        self.into()
    }

    pub fn is_zero(self) -> bool {
        match self {
            Integer(i) => i == 0,
            Float(f) => f == 0.0,
        }
    }

    /// Exact-value collapsing: a whole, in-range Float becomes an Integer.
    pub fn collapse(self) -> Number {
        match self {
            Float(f)
                if f.is_finite()
                    && f.fract() == 0.0
                    && f >= i64::MIN as f64
                    && f < i64::MAX as f64 =>
            {
                Integer(f as i64)
            }
            n => n,
        }
    }

    pub fn pow(self, exp: Number) -> Number {
        Float(self.as_f64().powf(exp.as_f64()))
    }

    pub fn neg(self) -> Number {
        match self {
            Integer(i) => i.checked_neg().map_or(Float(-(i as f64)), Integer),
            Float(f) => Float(-f),
        }
    }
}

impl Into<f64> for Number {
    fn into(self) -> f64 {
        match self {
            Integer(i) => i as f64,
            Float(f) => f,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Integer(0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer(i) => write!(f, "{}", i),
            Float(ff) => write!(f, "{:?}", ff),
        }
    }
}

impl TryFrom<&Value> for Number {
    type Error = ();

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => Ok(Integer(*i)),
            Value::Float(f) => Ok(Float(*f)),
            _ => Err(()),
        }
    }
}

impl From<Number> for Value {
    fn from(num: Number) -> Self {
        match num {
            Integer(i) => Value::Integer(i),
            Float(f) => Value::Float(f),
        }
    }
}

// Integer op Integer stays Integer unless it overflows; anything involving
// a Float is computed as Float.
macro_rules! checked_assign_op {
    ($trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl ops::$trait for Number {
            fn $method(&mut self, other: Self) {
                *self = match (*self, other) {
                    (Integer(a), Integer(b)) => match a.$checked(b) {
                        Some(c) => Integer(c),
                        None => Float((a as f64) $op (b as f64)),
                    },
                    (a, b) => Float(a.as_f64() $op b.as_f64()),
                };
            }
        }
    };
}

checked_assign_op!(AddAssign, add_assign, checked_add, +);
checked_assign_op!(SubAssign, sub_assign, checked_sub, -);
checked_assign_op!(MulAssign, mul_assign, checked_mul, *);

impl ops::DivAssign for Number {
    /// Exact Integer quotients stay Integer; everything else is Float.
    fn div_assign(&mut self, other: Self) {
        *self = match (*self, other) {
            // checked_rem is None for a zero divisor and for MIN / -1.
            (Integer(a), Integer(b)) if a.checked_rem(b) == Some(0) => Integer(a / b),
            (a, b) => Float(a.as_f64() / b.as_f64()),
        };
    }
}

impl ops::RemAssign for Number {
    fn rem_assign(&mut self, other: Self) {
        *self = match (*self, other) {
            (Integer(a), Integer(b)) => match a.checked_rem(b) {
                Some(c) => Integer(c),
                None => Float((a as f64) % (b as f64)),
            },
            (a, b) => Float(a.as_f64() % b.as_f64()),
        };
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Integer(a), Integer(b)) => a.partial_cmp(b),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}


#[cfg(test)]
#[path = "./number_test.rs"]
mod number_test;
