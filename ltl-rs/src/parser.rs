use crate::{
    ast::{Expr, Infix, Prefix},
    error::ParseError,
    token::*,
};
use nom::{
    branch::alt,
    bytes::complete::take,
    combinator::map,
    error::{Error, ErrorKind},
    error_position,
    sequence::delimited,
    IResult,
};

#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest,
    Iff,
    Xor,
    Imply,
    Or,
    And,
    Temporal,
}

impl Precedence {
    // Parsing the right operand one level looser makes the operator right-associative.
    fn looser(self) -> Self {
        match self {
            Precedence::Lowest | Precedence::Iff => Precedence::Lowest,
            Precedence::Xor => Precedence::Iff,
            Precedence::Imply => Precedence::Xor,
            Precedence::Or => Precedence::Imply,
            Precedence::And => Precedence::Or,
            Precedence::Temporal => Precedence::And,
        }
    }
}

fn right_operand_precedence(infix: Infix, precedence: Precedence) -> Precedence {
    if infix == Infix::Imply || infix.is_temporal() {
        precedence.looser()
    } else {
        precedence
    }
}

fn parse_infix_op(input: Tokens) -> IResult<Tokens, (Precedence, Infix)> {
    let (input, op) = alt((
        and_tag,
        or_tag,
        xor_tag,
        imply_tag,
        iff_tag,
        ltl_until_tag,
        ltl_weak_until_tag,
        ltl_release_tag,
        ltl_strong_release_tag,
    ))(input)?;
    let op = match op {
        Token::And => (Precedence::And, Infix::And),
        Token::Or => (Precedence::Or, Infix::Or),
        Token::Xor => (Precedence::Xor, Infix::Xor),
        Token::Imply => (Precedence::Imply, Infix::Imply),
        Token::Iff => (Precedence::Iff, Infix::Iff),
        Token::LtlUntil => (Precedence::Temporal, Infix::Until),
        Token::LtlWeakUntil => (Precedence::Temporal, Infix::WeakUntil),
        Token::LtlRelease => (Precedence::Temporal, Infix::Release),
        Token::LtlStrongRelease => (Precedence::Temporal, Infix::StrongRelease),
        _ => return Err(nom::Err::Error(error_position!(input, ErrorKind::Tag))),
    };
    Ok((input, op))
}

fn parse_ident(input: Tokens) -> IResult<Tokens, String> {
    let (i1, t1) = take(1usize)(input)?;
    match &t1.tok[0] {
        Token::Ident(name) => Ok((i1, name.clone())),
        _ => Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
    }
}

fn parse_ident_expr(input: Tokens) -> IResult<Tokens, Expr> {
    parse_ident(input).map(|(input, ident)| (input, Expr::Ident(ident)))
}

fn parse_literal(input: Tokens) -> IResult<Tokens, bool> {
    let (i1, t1) = take(1usize)(input)?;
    match t1.tok[0] {
        Token::BoolLiteral(b) => Ok((i1, b)),
        _ => Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
    }
}

fn parse_lit_expr(input: Tokens) -> IResult<Tokens, Expr> {
    map(parse_literal, Expr::LitExpr)(input)
}

fn parse_paren_expr(input: Tokens) -> IResult<Tokens, Expr> {
    delimited(lparen_tag, parse_expr, rparen_tag)(input)
}

fn parse_prefix_expr(input: Tokens) -> IResult<Tokens, Expr> {
    let (i1, op) = alt((not_tag, ltl_next_tag, ltl_finally_tag, ltl_globally_tag))(input)?;
    let (i2, e) = parse_atom_expr(i1)?;
    let prefix = match op {
        Token::Not => Prefix::Not,
        Token::LtlNext => Prefix::Next,
        Token::LtlFinally => Prefix::Finally,
        Token::LtlGlobally => Prefix::Globally,
        _ => return Err(nom::Err::Error(error_position!(input, ErrorKind::Tag))),
    };
    Ok((i2, Expr::prefix(prefix, e)))
}

fn parse_atom_expr(input: Tokens) -> IResult<Tokens, Expr> {
    alt((
        parse_lit_expr,
        parse_ident_expr,
        parse_paren_expr,
        parse_prefix_expr,
    ))(input)
}

fn parse_infix_expr(
    input: Tokens,
    left: Expr,
    op: Infix,
    precedence: Precedence,
) -> IResult<Tokens, Expr> {
    let (input, right) = parse_pratt_expr(input, right_operand_precedence(op, precedence))?;
    Ok((input, Expr::infix(op, left, right)))
}

fn go_parse_pratt_expr(input: Tokens, precedence: Precedence, left: Expr) -> IResult<Tokens, Expr> {
    match parse_infix_op(input) {
        Ok((i1, (peek_precedence, op))) if precedence < peek_precedence => {
            let (i2, left2) = parse_infix_expr(i1, left, op, peek_precedence)?;
            go_parse_pratt_expr(i2, precedence, left2)
        }
        _ => Ok((input, left)),
    }
}

fn parse_pratt_expr(input: Tokens, precedence: Precedence) -> IResult<Tokens, Expr> {
    let (i1, left) = parse_atom_expr(input)?;
    go_parse_pratt_expr(i1, precedence, left)
}

fn parse_expr(input: Tokens) -> IResult<Tokens, Expr> {
    parse_pratt_expr(input, Precedence::Lowest)
}

fn describe(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bound on the depth of the tree the tokens parse to, and on the recursion
/// needed to build it. Each parenthesis level counts all of its operators as
/// if they were nested, plus one for the parentheses.
pub fn nesting_depth(tokens: &[Token]) -> usize {
    // (operators, deepest operand) of each open level
    let mut outer = Vec::new();
    let mut level = (0usize, 0usize);
    let close = |level: (usize, usize), mut parent: (usize, usize)| {
        parent.1 = parent.1.max(level.0 + level.1 + 1);
        parent
    };
    for token in tokens {
        match token {
            Token::Ident(_) | Token::BoolLiteral(_) => level.1 = level.1.max(1),
            Token::LParen => {
                outer.push(level);
                level = (0, 0);
            }
            Token::RParen => {
                if let Some(parent) = outer.pop() {
                    level = close(level, parent);
                }
            }
            _ => level.0 += 1,
        }
    }
    while let Some(parent) = outer.pop() {
        level = close(level, parent);
    }
    level.0 + level.1
}

pub fn parse_tokens(input: Tokens) -> Result<Expr, ParseError> {
    if input.tok.is_empty() {
        return Err(ParseError::Empty);
    }
    match parse_expr(input) {
        Ok((remain, expr)) if remain.tok.is_empty() => Ok(expr),
        Ok((remain, _)) => Err(ParseError::Trailing(describe(remain.tok))),
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            Err(ParseError::Syntax(describe(err.input.tok)))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax(String::new())),
    }
}

#[cfg(test)]
mod tests {
    use crate::{lexer::lex_tokens, parse};

    use super::*;

    fn a() -> Expr {
        Expr::ident("a")
    }

    fn b() -> Expr {
        Expr::ident("b")
    }

    fn c() -> Expr {
        Expr::ident("c")
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(parse("a | b & c").unwrap(), a() | (b() & c()));
        assert_eq!(parse("a & b | c").unwrap(), (a() & b()) | c());
    }

    #[test]
    fn temporal_binds_tighter_than_boolean() {
        assert_eq!(
            parse("a & b U c").unwrap(),
            a() & Expr::infix(Infix::Until, b(), c())
        );
    }

    #[test]
    fn temporal_and_imply_are_right_associative() {
        assert_eq!(
            parse("a U b W c").unwrap(),
            Expr::infix(Infix::Until, a(), Expr::infix(Infix::WeakUntil, b(), c()))
        );
        assert_eq!(
            parse("a -> b -> c").unwrap(),
            Expr::infix(Infix::Imply, a(), Expr::infix(Infix::Imply, b(), c()))
        );
        assert_eq!(parse("a & b & c").unwrap(), (a() & b()) & c());
    }

    #[test]
    fn unary_operators_apply_to_atoms() {
        assert_eq!(
            parse("G a U b").unwrap(),
            Expr::infix(Infix::Until, Expr::prefix(Prefix::Globally, a()), b())
        );
        assert_eq!(
            parse("!(a V b)").unwrap(),
            !Expr::infix(Infix::Release, a(), b())
        );
        assert_eq!(
            parse("X F G true").unwrap(),
            Expr::prefix(
                Prefix::Next,
                Expr::prefix(
                    Prefix::Finally,
                    Expr::prefix(Prefix::Globally, Expr::LitExpr(true))
                )
            )
        );
    }

    #[test]
    fn parse_errors_are_reported() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("a b"), Err(ParseError::Trailing("b".to_string())));
        assert!(parse("a & (b | c").is_err());
        assert!(matches!(parse("& a"), Err(ParseError::Syntax(_))));
    }

    fn tree_depth(expr: &Expr) -> usize {
        match expr {
            Expr::Ident(_) | Expr::LitExpr(_) => 1,
            Expr::PrefixExpr(_, sub_expr) => 1 + tree_depth(sub_expr),
            Expr::InfixExpr(_, left, right) => 1 + tree_depth(left).max(tree_depth(right)),
        }
    }

    #[test]
    fn nesting_depth_bounds_the_tree() {
        let depth = |text: &str| nesting_depth(&lex_tokens(text).unwrap());
        assert_eq!(depth("a"), 1);
        assert_eq!(depth("X X a"), 3);
        assert_eq!(depth("a & b & c"), 3);
        assert_eq!(depth("(a U b) W c"), 4);
        assert_eq!(depth("((a))"), 3);
        assert_eq!(depth("(a & (b"), 4);
        for text in [
            "G (a -> F b)",
            "a U b W c R d",
            "!(a | (b & X (c M d))) & G F a",
            "((a U b) | c) -> X X (d W e)",
        ] {
            assert!(depth(text) >= tree_depth(&parse(text).unwrap()), "{}", text);
        }
    }

    #[test]
    fn display_round_trips() {
        for text in [
            "G F !a",
            "(a U (b & c)) | X d",
            "a W (b R (c M d))",
            "(a -> b) <-> (c xor false)",
        ] {
            let expr = parse(text).unwrap();
            assert_eq!(parse(&expr.to_string()).unwrap(), expr);
        }
        let tokens = lex_tokens("a U b").unwrap();
        assert_eq!(
            parse_tokens(Tokens::new(&tokens)).unwrap().to_string(),
            "a U b"
        );
    }
}
