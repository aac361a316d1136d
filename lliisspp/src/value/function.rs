//! Function implementation.

use crate::env::Environment;
use crate::types::{Builtin, Key, List};

/// A user-defined function produced by the `\` builtin.
///
/// The closure owns a private environment. It starts out without a parent and
/// collects the arguments of partial applications. Only when every formal is
/// bound does the call protocol link it to the caller's environment (see
/// [`crate::eval::call`]).
///
/// Cloning a closure copies its environment frame by frame, while the parent
/// handle, if any, is shared.
#[derive(Clone, Debug)]
pub struct Closure {
    pub(crate) formals: Vec<Key>,
    pub(crate) body: List,
    pub(crate) env: Environment,
}

impl Closure {
    pub fn new(formals: Vec<Key>, body: List) -> Self {
        Self {
            formals,
            body,
            env: Environment::new(),
        }
    }

    /// The formals which are still unbound.
    pub fn formals(&self) -> &[Key] {
        &self.formals
    }

    pub fn body(&self) -> &List {
        &self.body
    }

    /// The private environment holding the arguments bound so far.
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

/// Closures compare equal if their formals and bodies do. The captured
/// environment is not considered.
impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        self.formals == other.formals && self.body == other.body
    }
}

/// The function variant represents all possible forms of callable values.
#[derive(Clone, Debug, PartialEq)]
pub enum Func {
    Builtin(Builtin),
    Closure(Closure),
}

impl From<Builtin> for Func {
    fn from(value: Builtin) -> Self {
        Self::Builtin(value)
    }
}

impl From<Closure> for Func {
    fn from(value: Closure) -> Self {
        Self::Closure(value)
    }
}
