//! Environments: ordered name-to-value frames chained through parents.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::builtins::BUILTINS;
use crate::error::{Error, Reason};
use crate::types::Key;
use crate::value::{Func, Value};

/// Shared handle to an environment frame.
///
/// Frames are handed out as handles because a frame which is being evaluated
/// in may be the parent of a closure's frame at the same time.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A single frame of bindings, plus handles to the parent frame and the
/// global frame.
///
/// The global frame is the one without a parent. It's tracked explicitly so
/// that global definitions don't depend on walking the chain.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: IndexMap<Key, Value>,
    parent: Option<EnvRef>,
    global: Option<EnvRef>,
}

impl Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.bindings)
            .field("linked", &self.parent.is_some())
            .finish()
    }
}

impl Environment {
    /// Construct an empty frame without a parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a global environment with every builtin bound under its
    /// name.
    pub fn global_with_builtins() -> EnvRef {
        let mut env = Self::new();
        for builtin in BUILTINS.values() {
            env.put(builtin.name(), Value::from(Func::from(*builtin)));
        }
        env.into_ref()
    }

    /// Wrap this frame in a shared handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Number of bindings in this frame, excluding ancestors.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Look up a name in this frame, then in the parent chain. The caller
    /// gets its own copy of the value.
    pub fn get(&self, key: Key) -> Result<Value, Error> {
        if let Some(value) = self.bindings.get(&key) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().get(key),
            None => {
                trace!(%key, "unbound symbol");
                Err(Error::new(Reason::UnboundSymbol(key)))
            }
        }
    }

    /// Bind a name in this frame, replacing any previous binding of the same
    /// name in place.
    pub fn put(&mut self, key: Key, value: Value) {
        self.bindings.insert(key, value);
    }

    /// Set the parent of this frame. The global handle is inherited from the
    /// parent.
    pub fn link(&mut self, parent: &EnvRef) {
        self.global = Some(Self::global(parent));
        self.parent = Some(parent.clone());
    }

    /// Return the global frame of the chain containing `env`.
    pub fn global(env: &EnvRef) -> EnvRef {
        env.borrow().global.clone().unwrap_or_else(|| env.clone())
    }

    /// Bind a name in the global frame, regardless of where `env` sits in the
    /// chain.
    pub fn define(env: &EnvRef, key: Key, value: Value) {
        debug!(%key, "global definition");
        Self::global(env).borrow_mut().put(key, value);
    }
}
