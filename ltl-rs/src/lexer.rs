use crate::{error::ParseError, token::Token};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, multispace0},
    combinator::{map, recognize},
    multi::many0,
    sequence::{pair, preceded, terminated},
    IResult,
};

macro_rules! syntax {
    ($func_name: ident, $tag_string: literal, $output_token: expr) => {
        fn $func_name(s: &str) -> IResult<&str, Token> {
            map(tag($tag_string), |_| $output_token)(s)
        }
    };
}

syntax! {iff_operator, "<->", Token::Iff}
syntax! {iff_arrow_operator, "<=>", Token::Iff}
syntax! {imply_operator, "->", Token::Imply}
syntax! {imply_arrow_operator, "=>", Token::Imply}
syntax! {finally_operator, "<>", Token::LtlFinally}
syntax! {globally_operator, "[]", Token::LtlGlobally}
syntax! {and_operator, "&&", Token::And}
syntax! {and_short_operator, "&", Token::And}
syntax! {and_wedge_operator, "/\\", Token::And}
syntax! {or_operator, "||", Token::Or}
syntax! {or_short_operator, "|", Token::Or}
syntax! {or_vee_operator, "\\/", Token::Or}
syntax! {xor_operator, "^", Token::Xor}
syntax! {not_operator, "!", Token::Not}
syntax! {not_tilde_operator, "~", Token::Not}

pub fn lex_operator(input: &str) -> IResult<&str, Token> {
    alt((
        iff_operator,
        iff_arrow_operator,
        imply_operator,
        imply_arrow_operator,
        finally_operator,
        globally_operator,
        and_operator,
        and_short_operator,
        and_wedge_operator,
        or_operator,
        or_short_operator,
        or_vee_operator,
        xor_operator,
        not_operator,
        not_tilde_operator,
    ))(input)
}

// punctuations
syntax! {lparen_punctuation, "(", Token::LParen}
syntax! {rparen_punctuation, ")", Token::RParen}

pub fn lex_punctuations(input: &str) -> IResult<&str, Token> {
    alt((lparen_punctuation, rparen_punctuation))(input)
}

syntax! {true_literal, "1", Token::BoolLiteral(true)}
syntax! {false_literal, "0", Token::BoolLiteral(false)}

fn lex_literal(input: &str) -> IResult<&str, Token> {
    alt((true_literal, false_literal))(input)
}

fn word_tokens(word: &str) -> Vec<Token> {
    match word {
        "true" | "TRUE" => vec![Token::BoolLiteral(true)],
        "false" | "FALSE" => vec![Token::BoolLiteral(false)],
        "xor" => vec![Token::Xor],
        "U" => vec![Token::LtlUntil],
        "W" => vec![Token::LtlWeakUntil],
        "R" | "V" => vec![Token::LtlRelease],
        "M" => vec![Token::LtlStrongRelease],
        // GF, XXF and friends are runs of unary operators
        _ if word.chars().all(|c| matches!(c, 'X' | 'F' | 'G')) => word
            .chars()
            .map(|c| match c {
                'X' => Token::LtlNext,
                'F' => Token::LtlFinally,
                _ => Token::LtlGlobally,
            })
            .collect(),
        _ => vec![Token::Ident(word.to_string())],
    }
}

fn lex_word(input: &str) -> IResult<&str, Vec<Token>> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_"), tag(".")))),
        )),
        word_tokens,
    )(input)
}

fn lex_token(input: &str) -> IResult<&str, Vec<Token>> {
    alt((
        map(lex_operator, |token| vec![token]),
        map(lex_punctuations, |token| vec![token]),
        map(lex_literal, |token| vec![token]),
        lex_word,
    ))(input)
}

pub fn lex_tokens(input: &str) -> Result<Vec<Token>, ParseError> {
    let (remain, tokens) = preceded(multispace0, many0(terminated(lex_token, multispace0)))(input)
        .map_err(|err| ParseError::Lex(err.to_string()))?;
    if !remain.is_empty() {
        return Err(ParseError::Lex(remain.to_string()));
    }
    Ok(tokens.concat())
}
