//! A text parser producing [`SyntaxNode`] trees.
//!
//! The evaluator never sees text: this module stands in for an external
//! grammar-driven parser and emits the same tree shape, which is what
//! [`crate::read`] consumes.
//!
//! ```text
//! number : /-?[0-9]+(\.[0-9]+)?([eE][-+]?[0-9]+)?/
//! symbol : /[a-zA-Z0-9_+\-*\/\\=<>!&%^]+/
//! sexpr  : '(' <expr>* ')'
//! qexpr  : '{' <expr>* '}'
//! expr   : <number> | <symbol> | <sexpr> | <qexpr>
//! lispy  : /^/ <expr>* /$/
//! ```
//!
//! Whitespace separates expressions and `;` starts a comment running to the
//! end of the line.

use nom::{
    IResult, Err as NomError,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace1, one_of, satisfy},
    combinator::{cut, eof, map, not, opt, recognize, value},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
};

use crate::error::{Syntax, SyntaxError};
use crate::syntax::{SyntaxNode, ROOT};

type In<'a> = &'a str;


fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/\\=<>!&%^".contains(c)
}


/// Whitespace and comments.
fn ws(input: In) -> IResult<In, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), pair(char(';'), take_while(|c: char| c != '\n'))),
        ))),
    )(input)
}


fn exponent(input: In) -> IResult<In, In> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}


/// A number must not run into a symbol character, otherwise text like `2x`
/// is a symbol.
fn number_end(input: In) -> IResult<In, ()> {
    not(satisfy(is_symbol_char))(input)
}


fn decimal(input: In) -> IResult<In, SyntaxNode> {
    let fraction = recognize(tuple((opt(char('-')), digit1, char('.'), digit1, opt(exponent))));
    let scientific = recognize(tuple((opt(char('-')), digit1, exponent)));
    map(
        terminated(alt((fraction, scientific)), number_end),
        |text: In| SyntaxNode::leaf("expr|number|decimal|regex", text),
    )(input)
}


fn integer(input: In) -> IResult<In, SyntaxNode> {
    map(
        terminated(recognize(pair(opt(char('-')), digit1)), number_end),
        |text: In| SyntaxNode::leaf("expr|number|integer|regex", text),
    )(input)
}


fn symbol(input: In) -> IResult<In, SyntaxNode> {
    map(
        recognize(pair(satisfy(is_symbol_char), take_while(is_symbol_char))),
        |text: In| SyntaxNode::leaf("expr|symbol|regex", text),
    )(input)
}


/// A delimited list of expressions. Once the opening delimiter is seen,
/// failures are not backtracked.
fn delimited_list<'a>(
    tag: &'static str,
    open: char,
    close: char,
) -> impl FnMut(In<'a>) -> IResult<In<'a>, SyntaxNode> {
    move |input| {
        let (input, _) = char(open)(input)?;
        let (input, (mut children, _)) = cut(pair(
            many0(preceded(ws, expr)),
            preceded(ws, char(close)),
        ))(input)?;

        children.insert(0, SyntaxNode::leaf("char", open.to_string()));
        children.push(SyntaxNode::leaf("char", close.to_string()));
        Ok((input, SyntaxNode::branch(tag, children)))
    }
}


fn expr(input: In) -> IResult<In, SyntaxNode> {
    alt((
        decimal,
        integer,
        symbol,
        delimited_list("expr|sexpr|>", '(', ')'),
        delimited_list("expr|qexpr|>", '{', '}'),
    ))(input)
}


fn program(input: In) -> IResult<In, Vec<SyntaxNode>> {
    terminated(many0(preceded(ws, expr)), pair(ws, eof))(input)
}


/// Parse source text into a syntax tree rooted at a node tagged `>`.
pub fn parse(input: &str) -> Result<SyntaxNode, SyntaxError> {
    match program(input) {
        Ok((_, exprs)) => {
            let mut children = Vec::with_capacity(exprs.len() + 2);
            children.push(SyntaxNode::leaf("regex", ""));
            children.extend(exprs);
            children.push(SyntaxNode::leaf("regex", ""));
            Ok(SyntaxNode::branch(ROOT, children))
        }

        Err(NomError::Error(err)) | Err(NomError::Failure(err)) => {
            let offset = input.len() - err.input.len();
            let reason = match err.input.chars().next() {
                Some(c) => Syntax::UnexpectedChar(c),
                None => Syntax::UnexpectedEof,
            };
            Err(SyntaxError::new(offset, reason))
        }

        Err(NomError::Incomplete(_)) => Err(SyntaxError::new(input.len(), Syntax::UnexpectedEof)),
    }
}
