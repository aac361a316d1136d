//! The evaluator and the call protocol shared by builtins and closures.

use tracing::{debug, trace};

use crate::env::{EnvRef, Environment};
use crate::error::{Error, Reason};
use crate::types::{Key, List};
use crate::value::{Closure, Func, Value};


/// The formal which captures all remaining arguments in a Q-expression.
const REST_MARKER: &str = "&";


/// Reduce a value. Symbols are looked up, S-expressions are evaluated and
/// everything else evaluates to itself.
pub fn eval(env: &EnvRef, value: Value) -> Value {
    match value {
        Value::Symbol(key) => {
            let result = env.borrow().get(key);
            result.unwrap_or_else(Value::from)
        }
        Value::SExpr(cells) => eval_sexpr(env, cells),
        other => other,
    }
}


/// Evaluate the children of an S-expression and apply the first to the rest.
///
/// Every child is evaluated, in order, before any error is reported, so that
/// side effects such as definitions happen even if a later sibling fails.
pub fn eval_sexpr(env: &EnvRef, cells: List) -> Value {
    trace!(children = cells.len(), "evaluating s-expression");

    let mut cells: List = cells.into_iter().map(|cell| eval(env, cell)).collect();

    if let Some(index) = cells.iter().position(Value::is_error) {
        return cells.swap_remove(index);
    }

    match cells.len() {
        0 => return Value::SExpr(cells),
        1 => return cells.remove(0),
        _ => {}
    }

    match cells.remove(0) {
        Value::Func(func) => call(env, func, cells),
        other => Value::from(Reason::NotAFunction(other.type_of())),
    }
}


/// Apply a function to a list of evaluated arguments in the environment of
/// the caller.
pub fn call(env: &EnvRef, func: Func, args: List) -> Value {
    let result = match func {
        Func::Builtin(builtin) => builtin.call(env, args),
        Func::Closure(closure) => apply(env, closure, args),
    };
    result.unwrap_or_else(Value::from)
}


/// Bind arguments to the formals of a closure.
///
/// If formals remain after all arguments are bound, the partially applied
/// closure is returned. Otherwise the closure's environment is linked to the
/// caller's and the body is evaluated there.
fn apply(caller: &EnvRef, mut closure: Closure, args: List) -> Result<Value, Error> {
    let rest = Key::from(REST_MARKER);
    let received = args.len();
    let expected = closure.formals.len();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if closure.formals.is_empty() {
            return Err(Error::new(Reason::TooManyArguments { received, expected }));
        }

        let formal = closure.formals.remove(0);
        if formal == rest {
            if closure.formals.len() != 1 {
                return Err(Error::new(Reason::InvalidRestFormat));
            }
            let name = closure.formals.remove(0);
            let rest_args: List = std::iter::once(arg).chain(args.by_ref()).collect();
            closure.env.put(name, Value::QExpr(rest_args));
            break;
        }

        closure.env.put(formal, arg);
    }

    // No variadic arguments were given
    if closure.formals.first() == Some(&rest) {
        if closure.formals.len() != 2 {
            return Err(Error::new(Reason::InvalidRestFormat));
        }
        let name = closure.formals.remove(1);
        closure.formals.clear();
        closure.env.put(name, Value::qexpr());
    }

    if !closure.formals.is_empty() {
        debug!(bound = closure.env.len(), remaining = closure.formals.len(), "partial application");
        return Ok(Value::from(Func::from(closure)));
    }

    let Closure { body, mut env, .. } = closure;
    env.link(caller);
    debug!(bound = env.len(), "applying closure");

    let local: EnvRef = Environment::into_ref(env);
    Ok(eval(&local, Value::SExpr(body)))
}
