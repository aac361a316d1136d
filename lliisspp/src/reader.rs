//! Conversion of a syntax tree into a value tree.

use std::str::FromStr;

use crate::error::Reason;
use crate::syntax::SyntaxNode;
use crate::types::Key;
use crate::value::Value;


/// Read a numeric leaf. Text which doesn't fit the target type reads as a
/// `BadNumber` error.
fn read_number(node: &SyntaxNode) -> Value {
    let text = node.contents.as_str();
    let decimal = node.tag.contains("decimal")
        || (!node.tag.contains("integer") && text.contains(['.', 'e', 'E']));

    let value = if decimal {
        f64::from_str(text).ok().filter(|x| x.is_finite()).map(Value::Decimal)
    } else {
        i64::from_str(text).ok().map(Value::Integer)
    };

    value.unwrap_or_else(|| Value::from(Reason::BadNumber(text.to_owned())))
}


/// Convert a syntax node to a value.
///
/// The root node and nodes tagged `sexpr` become S-expressions, nodes tagged
/// `qexpr` become Q-expressions. Their children are read in order, skipping
/// delimiters and the markers around the input.
pub fn read(node: &SyntaxNode) -> Value {
    if node.tag.contains("number") {
        return read_number(node);
    }

    if node.tag.contains("symbol") {
        return Value::Symbol(Key::from(node.contents.as_str()));
    }

    let container = if node.is_root() || node.tag.contains("sexpr") {
        Value::sexpr()
    } else if node.tag.contains("qexpr") {
        Value::qexpr()
    } else {
        return Value::from(Reason::UnknownSyntax(node.tag.clone()));
    };

    node.children
        .iter()
        .filter(|child| !child.is_punctuation())
        .fold(container, |container, child| container.push(read(child)))
}
