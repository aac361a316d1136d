//! A runtime value is represented by the [`Value`] type, a plain tagged
//! union. Every value owns its children outright: there is no sharing between
//! two values, and cloning a value performs a deep copy (see [`Closure`] for
//! how a captured environment is copied).
//!
//! Values are destroyed structurally when dropped, so an operation that takes
//! ownership of a value releases it on every path, including early error
//! returns.

mod function;

use std::cmp::Ordering;

use crate::error::{Error, Reason};
use crate::types::{Key, List, Type};

pub use function::{Closure, Func};


/// A numeric operand extracted from a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Integer(i64),
    Decimal(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Integer(x) => x as f64,
            Self::Decimal(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(x) => x == 0,
            Self::Decimal(x) => x == 0.0,
        }
    }

    /// Numeric ordering. Integers compare exactly with each other, all other
    /// combinations compare as floating point.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(x), Self::Integer(y)) => Some(x.cmp(&y)),
            (x, y) => x.to_f64().partial_cmp(&y.to_f64()),
        }
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        match value {
            Number::Integer(x) => Value::Integer(x),
            Number::Decimal(x) => Value::Decimal(x),
        }
    }
}


/// The universal runtime datum.
#[derive(Clone, Debug)]
pub enum Value {
    /// 64-bit signed integers
    Integer(i64),

    /// 64-bit floating point numbers
    Decimal(f64),

    /// Errors are first-class values
    Error(Error),

    /// An unresolved identifier
    Symbol(Key),

    /// An expression to be evaluated
    SExpr(List),

    /// A quoted, unevaluated list
    QExpr(List),

    /// Builtins and closures
    Func(Func),
}

// Closures don't have a meaningful equality beyond their syntax, so this has
// to be done manually.
impl PartialEq<Value> for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Error(x), Self::Error(y)) => x == y,
            (Self::Symbol(x), Self::Symbol(y)) => x == y,
            (Self::SExpr(x), Self::SExpr(y)) => x == y,
            (Self::QExpr(x), Self::QExpr(y)) => x == y,
            (Self::Func(x), Self::Func(y)) => x == y,
            _ => match (self.get_number(), other.get_number()) {
                (Some(x), Some(y)) => x.compare(y) == Some(Ordering::Equal),
                _ => false,
            },
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<Error> for Value {
    fn from(value: Error) -> Self {
        Self::Error(value)
    }
}

impl From<Reason> for Value {
    fn from(value: Reason) -> Self {
        Self::Error(Error::new(value))
    }
}

impl From<Func> for Value {
    fn from(value: Func) -> Self {
        Self::Func(value)
    }
}

impl Value {
    // Constructors
    // ------------------------------------------------------------------------------------------------

    /// Construct a symbol.
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::Symbol(Key::from(name.as_ref()))
    }

    /// Construct an empty S-expression.
    pub fn sexpr() -> Self {
        Self::SExpr(List::new())
    }

    /// Construct an empty Q-expression.
    pub fn qexpr() -> Self {
        Self::QExpr(List::new())
    }

    // Mutation
    // ------------------------------------------------------------------------------------------------

    /// Append a child to an S- or Q-expression and return the container.
    /// Other values drop the child and are returned unchanged.
    pub fn push(mut self, child: Value) -> Self {
        if let Self::SExpr(cells) | Self::QExpr(cells) = &mut self {
            cells.push(child);
        }
        self
    }

    // Introspection
    // ------------------------------------------------------------------------------------------------

    /// The type of this value.
    pub fn type_of(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Integer,
            Self::Decimal(_) => Type::Decimal,
            Self::Error(_) => Type::Error,
            Self::Symbol(_) => Type::Symbol,
            Self::SExpr(_) => Type::SExpr,
            Self::QExpr(_) => Type::QExpr,
            Self::Func(_) => Type::Function,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Number of children of an S- or Q-expression. Zero for everything else.
    pub fn count(&self) -> usize {
        match self {
            Self::SExpr(cells) | Self::QExpr(cells) => cells.len(),
            _ => 0,
        }
    }

    /// The children of an S- or Q-expression.
    pub fn cells(&self) -> Option<&List> {
        match self {
            Self::SExpr(cells) | Self::QExpr(cells) => Some(cells),
            _ => None,
        }
    }

    pub(crate) fn get_number(&self) -> Option<Number> {
        match self {
            Self::Integer(x) => Some(Number::Integer(*x)),
            Self::Decimal(x) => Some(Number::Decimal(*x)),
            _ => None,
        }
    }

    /// Convert an error value to a Rust error, passing everything else through.
    pub fn into_result(self) -> Result<Value, Error> {
        match self {
            Self::Error(err) => Err(err),
            other => Ok(other),
        }
    }
}
