use thiserror::Error;

/// Errors produced while turning a parsed expression into a [`Formula`].
///
/// [`Formula`]: crate::Formula
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// A negation above anything but an identifier.
    #[error("not in negation normal form: {0}")]
    NotInNegationNormalForm(String),

    #[error("unsupported operator '{operator}' in {expr}")]
    UnsupportedOperator { operator: String, expr: String },
}
