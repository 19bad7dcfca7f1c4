use crate::{
    formula::{Formula, Op},
    ingest::NEGATION_PREFIX,
};
use ltl::{Expr, Infix, Prefix};
use std::fmt::{self, Display};

/// Convert a formula back to an expression, writing `F`/`G` shaped nodes and
/// fairness operators with the unary operators.
pub fn to_expr(formula: &Formula) -> Expr {
    if let Some(arg) = formula.f_arg() {
        return Expr::prefix(Prefix::Finally, to_expr(arg));
    }
    if let Some(arg) = formula.g_arg() {
        return Expr::prefix(Prefix::Globally, to_expr(arg));
    }
    let binary = |infix: Infix| {
        Expr::infix(infix, to_expr(formula.child(0)), to_expr(formula.child(1)))
    };
    match formula.op() {
        Op::True => Expr::LitExpr(true),
        Op::False => Expr::LitExpr(false),
        Op::Ap => {
            let name = formula.name().unwrap_or_default();
            match name.strip_prefix(NEGATION_PREFIX) {
                Some(positive) => !Expr::ident(positive),
                None => Expr::ident(name),
            }
        }
        Op::And => junction(formula, Infix::And),
        Op::Or => junction(formula, Infix::Or),
        Op::Next => Expr::prefix(Prefix::Next, to_expr(formula.child(0))),
        Op::Until => binary(Infix::Until),
        Op::WeakUntil => binary(Infix::WeakUntil),
        Op::Release => binary(Infix::Release),
        Op::StrongRelease => binary(Infix::StrongRelease),
        Op::AlwaysEventually => Expr::prefix(
            Prefix::Globally,
            Expr::prefix(Prefix::Finally, to_expr(formula.child(0))),
        ),
        Op::EventuallyAlways => Expr::prefix(
            Prefix::Finally,
            Expr::prefix(Prefix::Globally, to_expr(formula.child(0))),
        ),
    }
}

fn junction(formula: &Formula, infix: Infix) -> Expr {
    formula
        .children()
        .iter()
        .map(to_expr)
        .reduce(|left, right| Expr::infix(infix, left, right))
        .unwrap_or(Expr::LitExpr(infix == Infix::And))
}

impl Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_expr(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::from_expr;

    fn round_trip(text: &str) -> String {
        from_expr(&ltl::parse(text).unwrap()).to_string()
    }

    #[test]
    fn unary_shapes_are_restored() {
        assert_eq!(round_trip("F export_a"), "F export_a");
        assert_eq!(round_trip("export_a M true"), "F export_a");
        assert_eq!(round_trip("false R export_a"), "G export_a");
        assert_eq!(round_trip("G F !export_a"), "G F !export_a");
        assert_eq!(round_trip("F G export_a"), "F G export_a");
    }

    #[test]
    fn binary_operators_and_chains() {
        assert_eq!(
            round_trip("export_a U (export_b W export_c)"),
            "export_a U (export_b W export_c)"
        );
        assert_eq!(
            round_trip("export_a & (export_b & X export_c)"),
            "(export_a & export_b) & X export_c"
        );
        assert_eq!(round_trip("export_a | false"), "export_a");
    }
}
