//! Rendering of values as text.
//!
//! Numbers print in their canonical form; decimals always carry a fractional
//! part or an exponent, so that they read back as decimals.

use std::fmt::Display;

use crate::types::List;
use crate::value::{Closure, Func, Value};


fn fmt_cells(f: &mut std::fmt::Formatter<'_>, open: char, cells: &List, close: char) -> std::fmt::Result {
    f.write_fmt(format_args!("{}", open))?;
    let mut iter = cells.iter().peekable();
    while let Some(cell) = iter.next() {
        f.write_fmt(format_args!("{}", cell))?;
        if iter.peek().is_some() {
            f.write_str(" ")?;
        }
    }
    f.write_fmt(format_args!("{}", close))
}


impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(x) => f.write_fmt(format_args!("{}", x)),
            Self::Decimal(x) => f.write_fmt(format_args!("{:?}", x)),
            Self::Error(err) => f.write_fmt(format_args!("Error: {}", err)),
            Self::Symbol(key) => f.write_str(key.as_str()),
            Self::SExpr(cells) => fmt_cells(f, '(', cells, ')'),
            Self::QExpr(cells) => fmt_cells(f, '{', cells, '}'),
            Self::Func(func) => func.fmt(f),
        }
    }
}


impl Display for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(builtin) => f.write_fmt(format_args!("<builtin {}>", builtin.name())),
            Self::Closure(closure) => closure.fmt(f),
        }
    }
}


/// Closures print as the lambda expression which would construct them,
/// showing only the formals that are still unbound.
impl Display for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let formals: List = self.formals().iter().map(|key| Value::Symbol(*key)).collect();
        f.write_str("(\\ ")?;
        fmt_cells(f, '{', &formals, '}')?;
        f.write_str(" ")?;
        fmt_cells(f, '{', self.body(), '}')?;
        f.write_str(")")
    }
}


/// Render a value as text.
pub fn print(value: &Value) -> String {
    value.to_string()
}
