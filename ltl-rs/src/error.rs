use thiserror::Error;

/// Errors produced while reading a formula from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected input at '{0}'")]
    Lex(String),

    #[error("empty formula")]
    Empty,

    #[error("syntax error near '{0}'")]
    Syntax(String),

    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}
