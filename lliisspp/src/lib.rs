//! An interpreter for a small Lisp with S-expressions, Q-expressions and
//! curried closures.
//!
//! The pipeline is [`parse`] (text to syntax tree), [`read`] (syntax tree to
//! value), [`eval`] (value to value) and [`print`] (value to text). Evaluation
//! never fails in the Rust sense: errors are values, see [`Value::Error`].

#[macro_use]
extern crate lazy_static;

mod builtins;
pub mod env;
pub mod error;
pub mod eval;
mod parsing;
mod printing;
mod reader;
pub mod syntax;
mod types;
pub mod value;

#[cfg(test)]
mod tests;

use std::sync::Once;

pub use env::{EnvRef, Environment};
pub use error::{Error, Reason, SyntaxError};
pub use eval::eval;
pub use parsing::parse;
pub use printing::print;
pub use reader::read;
pub use syntax::SyntaxNode;
pub use types::{Builtin, Key, List, Type};
pub use value::Value;


static TRACING_INIT: Once = Once::new();

/// Initialize tracing output on stderr.
///
/// Only does anything if `RUST_LOG` is set, e.g. `RUST_LOG=lliisspp=debug`.
/// Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}


/// Evaluate a line of input the way the interactive prompt does: the whole
/// line is one S-expression, so `+ 1 2` is a call.
pub fn eval_line(env: &EnvRef, input: &str) -> Result<Value, SyntaxError> {
    let tree = parse(input)?;
    Ok(eval(env, read(&tree)))
}


/// Evaluate every top-level expression of a program in order and return the
/// last result. Evaluation stops at the first error.
pub fn eval_program(env: &EnvRef, input: &str) -> Result<Value, SyntaxError> {
    let tree = parse(input)?;
    let exprs = match read(&tree) {
        Value::SExpr(exprs) => exprs,
        other => return Ok(eval(env, other)),
    };

    let mut result = Value::sexpr();
    for expr in exprs {
        result = eval(env, expr);
        if result.is_error() {
            break;
        }
    }
    Ok(result)
}


/// Evaluate a program in a fresh global environment.
pub fn eval_raw(input: &str) -> Result<Value, SyntaxError> {
    eval_program(&Environment::global_with_builtins(), input)
}
