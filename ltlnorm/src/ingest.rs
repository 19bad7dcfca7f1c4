//! Expressions to formulas.
//!
//! The input must be in negation normal form built from the operators the
//! DAG knows: `!` only on identifiers, no `->`, `<->` or `xor`. A negated
//! identifier `!p` becomes the atomic proposition named `!p`.

use crate::{error::IngestError, formula::Formula};
use ltl::{Expr, Infix, Prefix};
use std::convert::Infallible;
use tracing::warn;

/// Marks the name of a negated atomic proposition.
pub const NEGATION_PREFIX: char = '!';

/// Convert `expr`, reading every unsupported subexpression as `true`.
pub fn from_expr(expr: &Expr) -> Formula {
    let read_as_true = |err: IngestError| -> Result<Formula, Infallible> {
        warn!("{}, read as true", err);
        Ok(Formula::tt())
    };
    match ingest(expr, &read_as_true) {
        Ok(formula) => formula,
        Err(never) => match never {},
    }
}

/// Convert `expr`, failing on the first unsupported subexpression.
pub fn try_from_expr(expr: &Expr) -> Result<Formula, IngestError> {
    ingest(expr, &Err::<Formula, IngestError>)
}

fn ingest_all<E, F>(exprs: Vec<Expr>, unsupported: &F) -> Result<Vec<Formula>, E>
where
    F: Fn(IngestError) -> Result<Formula, E>,
{
    exprs.iter().map(|expr| ingest(expr, unsupported)).collect()
}

/// Convert `expr`, handing every unsupported subexpression to `unsupported`.
fn ingest<E, F>(expr: &Expr, unsupported: &F) -> Result<Formula, E>
where
    F: Fn(IngestError) -> Result<Formula, E>,
{
    let formula = match expr {
        Expr::Ident(name) => Formula::ap(name),
        Expr::LitExpr(true) => Formula::tt(),
        Expr::LitExpr(false) => Formula::ff(),
        Expr::PrefixExpr(prefix, sub_expr) => match (prefix, sub_expr.as_ref()) {
            (Prefix::Not, Expr::Ident(name)) => {
                Formula::ap(&format!("{}{}", NEGATION_PREFIX, name))
            }
            (Prefix::Not, _) => {
                let err = IngestError::NotInNegationNormalForm(expr.to_string());
                return unsupported(err);
            }
            (Prefix::Next, sub_expr) => Formula::next(ingest(sub_expr, unsupported)?),
            (Prefix::Finally, Expr::PrefixExpr(Prefix::Globally, inner)) => {
                Formula::fg(ingest(inner, unsupported)?)
            }
            (Prefix::Globally, Expr::PrefixExpr(Prefix::Finally, inner)) => {
                Formula::gf(ingest(inner, unsupported)?)
            }
            (Prefix::Finally, sub_expr) => Formula::eventually(ingest(sub_expr, unsupported)?),
            (Prefix::Globally, sub_expr) => Formula::always(ingest(sub_expr, unsupported)?),
        },
        Expr::InfixExpr(infix, left, right) => match infix {
            Infix::And => {
                Formula::and(ingest_all(expr.clone().partition_to_ands(), unsupported)?)
            }
            Infix::Or => Formula::or(ingest_all(expr.clone().partition_to_ors(), unsupported)?),
            Infix::Until => {
                Formula::until(ingest(left, unsupported)?, ingest(right, unsupported)?)
            }
            Infix::WeakUntil => {
                Formula::weak_until(ingest(left, unsupported)?, ingest(right, unsupported)?)
            }
            Infix::Release => {
                Formula::release(ingest(left, unsupported)?, ingest(right, unsupported)?)
            }
            Infix::StrongRelease => {
                Formula::strong_release(ingest(left, unsupported)?, ingest(right, unsupported)?)
            }
            Infix::Xor | Infix::Imply | Infix::Iff => {
                let err = IngestError::UnsupportedOperator {
                    operator: infix.to_string(),
                    expr: expr.to_string(),
                };
                return unsupported(err);
            }
        },
    };
    Ok(formula)
}
