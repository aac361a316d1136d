use std::cmp::Ordering;
use std::process;

use indexmap::IndexMap;
use tracing::debug;

use crate::env::{EnvRef, Environment};
use crate::error::{Error, Reason};
use crate::eval::eval;
use crate::types::{Builtin, Key, List, Type};
use crate::value::{Closure, Func, Number, Value};


macro_rules! builtin {
    ($m: ident, $name: expr, $e: ident) => {
        $m.insert(
            $name,
            Builtin::new($e, Key::from($name)),
        )
    };
}


lazy_static! {
    pub static ref BUILTINS: IndexMap<&'static str, Builtin> = {
        let mut m = IndexMap::new();

        builtin!(m, "list", list);
        builtin!(m, "head", head);
        builtin!(m, "tail", tail);
        builtin!(m, "init", init);
        builtin!(m, "len", len);
        builtin!(m, "cons", cons);
        builtin!(m, "join", join);
        builtin!(m, "eval", eval_list);

        builtin!(m, "+", add);
        builtin!(m, "-", sub);
        builtin!(m, "*", mul);
        builtin!(m, "/", div);
        builtin!(m, "%", rem);
        builtin!(m, "^", pow);
        builtin!(m, "add", add);
        builtin!(m, "sub", sub);
        builtin!(m, "mul", mul);
        builtin!(m, "div", div);
        builtin!(m, "mod", rem);
        builtin!(m, "pow", pow);
        builtin!(m, "min", min);
        builtin!(m, "max", max);

        builtin!(m, ">", gt);
        builtin!(m, "<", lt);
        builtin!(m, ">=", ge);
        builtin!(m, "<=", le);
        builtin!(m, "==", eq);
        builtin!(m, "!=", ne);
        builtin!(m, "if", if_);

        builtin!(m, "def", def);
        builtin!(m, "=", put);
        builtin!(m, "\\", lambda);
        builtin!(m, "exit", exit);

        m
    };
}


// Argument checking
// ------------------------------------------------------------------------------------------------

fn expect_arity(function: Key, args: &List, expected: usize) -> Result<(), Error> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::new(Reason::WrongArity { function, received: args.len(), expected }))
    }
}

fn expect_qexpr(function: Key, index: usize, value: Value) -> Result<List, Error> {
    match value {
        Value::QExpr(cells) => Ok(cells),
        other => Err(Error::new(Reason::WrongType {
            index,
            function,
            received: other.type_of(),
            expected: Type::QExpr,
        })),
    }
}

fn expect_number(function: Key, index: usize, value: &Value) -> Result<Number, Error> {
    value.get_number().ok_or_else(|| Error::new(Reason::WrongType {
        index,
        function,
        received: value.type_of(),
        expected: Type::Number,
    }))
}

/// Extract the symbols of a formals or definition list.
fn expect_symbols(function: Key, cells: List) -> Result<Vec<Key>, Error> {
    cells.into_iter().map(|cell| match cell {
        Value::Symbol(key) => Ok(key),
        other => Err(Error::new(Reason::NotASymbol { function, received: other.type_of() })),
    }).collect()
}

/// The common calling convention of `head`, `tail` and `init`: a single
/// non-empty Q-expression.
fn single_nonempty(name: &'static str, args: List) -> Result<List, Error> {
    let function = Key::from(name);
    let [x] = unpack::<1>(name, args)?;
    let cells = expect_qexpr(function, 0, x)?;
    if cells.is_empty() {
        return Err(Error::new(Reason::EmptyList { function, index: 0 }));
    }
    Ok(cells)
}

/// Unpack a list of exactly `N` arguments.
fn unpack<const N: usize>(name: &'static str, args: List) -> Result<[Value; N], Error> {
    let function = Key::from(name);
    expect_arity(function, &args, N)?;
    args.try_into().map_err(|args: List| Error::new(Reason::WrongArity {
        function,
        received: args.len(),
        expected: N,
    }))
}


// Lists
// ------------------------------------------------------------------------------------------------

pub fn list(_: &EnvRef, args: List) -> Result<Value, Error> {
    Ok(Value::QExpr(args))
}


pub fn head(_: &EnvRef, args: List) -> Result<Value, Error> {
    let mut cells = single_nonempty("head", args)?;
    cells.truncate(1);
    Ok(Value::QExpr(cells))
}


pub fn tail(_: &EnvRef, args: List) -> Result<Value, Error> {
    let mut cells = single_nonempty("tail", args)?;
    cells.remove(0);
    Ok(Value::QExpr(cells))
}


pub fn init(_: &EnvRef, args: List) -> Result<Value, Error> {
    let mut cells = single_nonempty("init", args)?;
    cells.pop();
    Ok(Value::QExpr(cells))
}


pub fn len(_: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("len");
    let [x] = unpack::<1>("len", args)?;
    let cells = expect_qexpr(function, 0, x)?;
    Ok(Value::Integer(cells.len() as i64))
}


pub fn cons(_: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("cons");
    let [x, xs] = unpack::<2>("cons", args)?;
    let mut cells = expect_qexpr(function, 1, xs)?;
    cells.insert(0, x);
    Ok(Value::QExpr(cells))
}


pub fn join(_: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("join");
    if args.is_empty() {
        return Err(Error::new(Reason::WrongArity { function, received: 0, expected: 1 }));
    }

    let mut lists = Vec::with_capacity(args.len());
    for (index, arg) in args.into_iter().enumerate() {
        lists.push(expect_qexpr(function, index, arg)?);
    }
    Ok(Value::QExpr(lists.into_iter().flatten().collect()))
}


pub fn eval_list(env: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("eval");
    let [x] = unpack::<1>("eval", args)?;
    let cells = expect_qexpr(function, 0, x)?;
    Ok(eval(env, Value::SExpr(cells)))
}


// Arithmetic
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Min,
    Max,
}

impl Op {
    fn integer(self, x: i64, y: i64) -> i64 {
        match self {
            Self::Add => x.wrapping_add(y),
            Self::Sub => x.wrapping_sub(y),
            Self::Mul => x.wrapping_mul(y),
            Self::Div => x.wrapping_div(y),
            Self::Rem => x.wrapping_rem(y),
            Self::Pow => match u32::try_from(y) {
                Ok(exp) => x.wrapping_pow(exp),
                Err(_) => (x as f64).powf(y as f64) as i64,
            },
            Self::Min => x.min(y),
            Self::Max => x.max(y),
        }
    }

    fn decimal(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Add => x + y,
            Self::Sub => x - y,
            Self::Mul => x * y,
            Self::Div => x / y,
            Self::Rem => x % y,
            Self::Pow => x.powf(y),
            Self::Min => x.min(y),
            Self::Max => x.max(y),
        }
    }

    /// Division and modulo keep the type of an integer left operand, even if
    /// the right operand is a decimal.
    fn truncates(self) -> bool {
        matches!(self, Self::Div | Self::Rem)
    }

    fn apply(self, lhs: Number, rhs: Number) -> Result<Number, Error> {
        if self.truncates() && rhs.is_zero() {
            return Err(Error::new(Reason::DivisionByZero));
        }

        Ok(match (lhs, rhs) {
            (Number::Integer(x), Number::Integer(y)) => Number::Integer(self.integer(x, y)),
            (Number::Integer(x), Number::Decimal(y)) if self.truncates() => {
                Number::Integer(self.decimal(x as f64, y) as i64)
            }
            (x, y) => Number::Decimal(self.decimal(x.to_f64(), y.to_f64())),
        })
    }
}

fn arithmetic(name: &'static str, op: Op, args: List) -> Result<Value, Error> {
    let function = Key::from(name);

    let numbers = args.iter()
        .enumerate()
        .map(|(index, arg)| expect_number(function, index, arg))
        .collect::<Result<Vec<Number>, Error>>()?;

    let mut numbers = numbers.into_iter();
    let first = numbers.next().ok_or_else(
        || Error::new(Reason::WrongArity { function, received: 0, expected: 1 })
    )?;

    if op == Op::Sub && numbers.len() == 0 {
        return Ok(Value::from(match first {
            Number::Integer(x) => Number::Integer(x.wrapping_neg()),
            Number::Decimal(x) => Number::Decimal(-x),
        }));
    }

    numbers.try_fold(first, |acc, x| op.apply(acc, x)).map(Value::from)
}


pub fn add(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("+", Op::Add, args)
}


pub fn sub(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("-", Op::Sub, args)
}


pub fn mul(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("*", Op::Mul, args)
}


pub fn div(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("/", Op::Div, args)
}


pub fn rem(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("%", Op::Rem, args)
}


pub fn pow(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("^", Op::Pow, args)
}


pub fn min(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("min", Op::Min, args)
}


pub fn max(_: &EnvRef, args: List) -> Result<Value, Error> {
    arithmetic("max", Op::Max, args)
}


// Comparison
// ------------------------------------------------------------------------------------------------

fn truth(x: bool) -> Value {
    Value::Integer(if x { 1 } else { 0 })
}

fn ordering(name: &'static str, args: List, accept: fn(Ordering) -> bool) -> Result<Value, Error> {
    let function = Key::from(name);
    let [x, y] = unpack::<2>(name, args)?;
    let x = expect_number(function, 0, &x)?;
    let y = expect_number(function, 1, &y)?;
    Ok(truth(x.compare(y).map_or(false, accept)))
}


pub fn gt(_: &EnvRef, args: List) -> Result<Value, Error> {
    ordering(">", args, Ordering::is_gt)
}


pub fn lt(_: &EnvRef, args: List) -> Result<Value, Error> {
    ordering("<", args, Ordering::is_lt)
}


pub fn ge(_: &EnvRef, args: List) -> Result<Value, Error> {
    ordering(">=", args, Ordering::is_ge)
}


pub fn le(_: &EnvRef, args: List) -> Result<Value, Error> {
    ordering("<=", args, Ordering::is_le)
}


pub fn eq(_: &EnvRef, args: List) -> Result<Value, Error> {
    let [x, y] = unpack::<2>("==", args)?;
    Ok(truth(x == y))
}


pub fn ne(_: &EnvRef, args: List) -> Result<Value, Error> {
    let [x, y] = unpack::<2>("!=", args)?;
    Ok(truth(x != y))
}


pub fn if_(env: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("if");
    let [condition, then, otherwise] = unpack::<3>("if", args)?;
    let condition = expect_number(function, 0, &condition)?;
    let then = expect_qexpr(function, 1, then)?;
    let otherwise = expect_qexpr(function, 2, otherwise)?;

    let branch = if condition.is_zero() { otherwise } else { then };
    Ok(eval(env, Value::SExpr(branch)))
}


// Definitions and functions
// ------------------------------------------------------------------------------------------------

fn bind(name: &'static str, env: &EnvRef, args: List, global: bool) -> Result<Value, Error> {
    let function = Key::from(name);
    let mut args = args.into_iter();

    let symbols = args.next().ok_or_else(
        || Error::new(Reason::WrongArity { function, received: 0, expected: 1 })
    )?;
    let symbols = expect_symbols(function, expect_qexpr(function, 0, symbols)?)?;

    let values: List = args.collect();
    if symbols.len() != values.len() {
        return Err(Error::new(Reason::ArityMismatch {
            function,
            symbols: symbols.len(),
            values: values.len(),
        }));
    }

    for (key, value) in symbols.into_iter().zip(values) {
        if global {
            Environment::define(env, key, value);
        } else {
            env.borrow_mut().put(key, value);
        }
    }

    Ok(Value::sexpr())
}


pub fn def(env: &EnvRef, args: List) -> Result<Value, Error> {
    bind("def", env, args, true)
}


pub fn put(env: &EnvRef, args: List) -> Result<Value, Error> {
    bind("=", env, args, false)
}


pub fn lambda(_: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("\\");
    let [formals, body] = unpack::<2>("\\", args)?;
    let formals = expect_qexpr(function, 0, formals)?;
    let body = expect_qexpr(function, 1, body)?;
    let formals = expect_symbols(function, formals)?;
    Ok(Value::from(Func::from(Closure::new(formals, body))))
}


pub fn exit(_: &EnvRef, args: List) -> Result<Value, Error> {
    let function = Key::from("exit");
    let code = match args.as_slice() {
        [] => 0,
        [Value::Integer(code)] => *code as i32,
        [other] => return Err(Error::new(Reason::WrongType {
            index: 0,
            function,
            received: other.type_of(),
            expected: Type::Integer,
        })),
        _ => return Err(Error::new(Reason::WrongArity { function, received: args.len(), expected: 1 })),
    };

    debug!(code, "exiting");
    process::exit(code)
}
