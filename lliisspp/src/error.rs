//! Error types.
//!
//! Evaluation errors are ordinary values: an [`Error`] wraps a [`Reason`] and
//! travels through the evaluator inside [`crate::Value::Error`]. Nothing in the
//! evaluator panics or unwinds on a bad program.
//!
//! The [`SyntaxError`] type is reported by the text parser, which sits outside
//! of the evaluator proper.

use std::fmt::Display;

use crate::types::{Key, Type};

/// Enumerates all the possible reasons for an evaluation error.
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    /// A symbol was not bound in any frame of the environment chain.
    UnboundSymbol(Key),

    /// A numeric literal could not be represented.
    BadNumber(String),

    /// The reader encountered a syntax node it doesn't know how to read.
    UnknownSyntax(String),

    /// The head of an S-expression evaluated to something other than a
    /// function.
    NotAFunction(Type),

    /// A function was given an argument of the wrong type.
    WrongType {
        /// The zero-based index of the argument.
        index: usize,

        /// Name of the function.
        function: Key,

        /// Type of the argument actually received.
        received: Type,

        /// Type the function wanted.
        expected: Type,
    },

    /// A function was given the wrong number of arguments.
    WrongArity {
        function: Key,
        received: usize,
        expected: usize,
    },

    /// A function which requires a non-empty Q-expression got an empty one.
    EmptyList {
        function: Key,
        index: usize,
    },

    /// Division or modulo by an integer or decimal zero.
    DivisionByZero,

    /// Something other than a symbol appeared in a formals or definition
    /// list.
    NotASymbol {
        function: Key,
        received: Type,
    },

    /// A closure was applied to more arguments than it has formals.
    TooManyArguments {
        received: usize,
        expected: usize,
    },

    /// The rest marker `&` was not followed by exactly one symbol.
    InvalidRestFormat,

    /// A definition list and its values differ in length.
    ArityMismatch {
        function: Key,
        symbols: usize,
        values: usize,
    },
}

/// The error type carried by error values.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    reason: Reason,
}

impl Error {
    /// Construct a new error with a reason.
    pub fn new<T>(reason: T) -> Self
    where
        Reason: From<T>,
    {
        Self {
            reason: Reason::from(reason),
        }
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl From<Reason> for Error {
    fn from(reason: Reason) -> Self {
        Self { reason }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundSymbol(key) => f.write_fmt(format_args!("Unbound Symbol '{}'", key)),

            Self::BadNumber(text) => f.write_fmt(format_args!("Invalid Number '{}'", text)),

            Self::UnknownSyntax(tag) => {
                f.write_fmt(format_args!("Unknown syntax node '{}'", tag))
            }

            Self::NotAFunction(received) => f.write_fmt(format_args!(
                "S-Expression starts with incorrect type. Got {}, Expected {}.",
                received,
                Type::Function,
            )),

            Self::WrongType { index, function, received, expected } => f.write_fmt(format_args!(
                "Function '{}' passed incorrect type for argument {}. Got {}, Expected {}.",
                function, index, received, expected,
            )),

            Self::WrongArity { function, received, expected } => f.write_fmt(format_args!(
                "Function '{}' passed incorrect number of arguments. Got {}, Expected {}.",
                function, received, expected,
            )),

            Self::EmptyList { function, index } => f.write_fmt(format_args!(
                "Function '{}' passed {{}} for argument {}.",
                function, index,
            )),

            Self::DivisionByZero => f.write_str("Division By Zero."),

            Self::NotASymbol { function, received } => f.write_fmt(format_args!(
                "Function '{}' cannot define non-symbol. Got {}, Expected {}.",
                function,
                received,
                Type::Symbol,
            )),

            Self::TooManyArguments { received, expected } => f.write_fmt(format_args!(
                "Function passed too many arguments. Got {}, Expected {}.",
                received, expected,
            )),

            Self::InvalidRestFormat => {
                f.write_str("Function format invalid. Symbol '&' not followed by single symbol.")
            }

            Self::ArityMismatch { function, symbols, values } => f.write_fmt(format_args!(
                "Function '{}' cannot bind {} symbols to {} values.",
                function, symbols, values,
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.reason.fmt(f)
    }
}

impl std::error::Error for Error {}


/// Enumerates the reasons why the text parser may reject its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Syntax {
    /// Input ended inside an expression.
    UnexpectedEof,

    /// A character that can't start or continue an expression.
    UnexpectedChar(char),
}

/// Error reported by [`crate::parse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntaxError {
    offset: usize,
    reason: Syntax,
}

impl SyntaxError {
    /// Create a new syntax error at a byte offset.
    pub fn new(offset: usize, reason: Syntax) -> SyntaxError {
        SyntaxError { offset, reason }
    }

    /// The zero-based byte offset where parsing failed.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reason(&self) -> Syntax {
        self.reason
    }
}

impl Display for Syntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::UnexpectedChar(c) => f.write_fmt(format_args!("unexpected '{}'", c)),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("syntax error at offset {}: {}", self.offset, self.reason))
    }
}

impl std::error::Error for SyntaxError {}
