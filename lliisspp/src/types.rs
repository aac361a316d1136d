use std::fmt::{Debug, Display};

use symbol_table::GlobalSymbol;

use crate::env::EnvRef;
use crate::error::Error;
use crate::value::Value;

/// Type used for all interned names: symbols, environment keys and builtin
/// identities.
pub type Key = GlobalSymbol;

/// Type used for the children of S- and Q-expressions.
pub type List = Vec<Value>;

/// Signature of a native operation. The function takes ownership of its
/// argument list.
pub type NativeFunction = fn(&EnvRef, List) -> Result<Value, Error>;

/// A builtin is a native function paired with the name it was registered
/// under. The name is its identity: it is used for printing and equality.
#[derive(Copy, Clone)]
pub struct Builtin {
    func: NativeFunction,
    name: Key,
}

impl Builtin {
    pub fn new(func: NativeFunction, name: Key) -> Builtin {
        Builtin { func, name }
    }

    pub fn call(&self, env: &EnvRef, args: List) -> Result<Value, Error> {
        (self.func)(env, args)
    }

    pub fn name(&self) -> Key {
        self.name
    }
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}


/// Enumeration of all the different types a value can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// i64
    Integer,

    /// f64
    Decimal,

    /// Either of the numeric types. Only used to describe expectations.
    Number,

    /// An error value
    Error,

    /// An unresolved name
    Symbol,

    /// An expression to be evaluated
    SExpr,

    /// A quoted list
    QExpr,

    /// Builtins and closures
    Function,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => f.write_str("Integer"),
            Self::Decimal => f.write_str("Decimal"),
            Self::Number => f.write_str("Number"),
            Self::Error => f.write_str("Error"),
            Self::Symbol => f.write_str("Symbol"),
            Self::SExpr => f.write_str("S-Expression"),
            Self::QExpr => f.write_str("Q-Expression"),
            Self::Function => f.write_str("Function"),
        }
    }
}
