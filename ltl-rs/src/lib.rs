//! Linear temporal logic formulas: the `Expr` interchange tree, a reader for
//! the usual infix syntax (`G (a -> F b)`, `a U b`, `p W q`, ...) and the
//! negation normal form transformation.

mod ast;
mod error;
mod lexer;
mod nnf;
mod parser;
mod token;

pub use ast::*;
pub use error::ParseError;

use crate::{
    parser::{nesting_depth as token_nesting_depth, parse_tokens},
    token::Tokens,
};
use lexer::lex_tokens;
use std::str::FromStr;

pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let tokens = lex_tokens(input)?;
    parse_tokens(Tokens::new(&tokens))
}

/// Bound on the nesting of the formula in `input`, computed without
/// recursion so that it can guard [`parse`] against very deep input.
pub fn nesting_depth(input: &str) -> Result<usize, ParseError> {
    Ok(token_nesting_depth(&lex_tokens(input)?))
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
