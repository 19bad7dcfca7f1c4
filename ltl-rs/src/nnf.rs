use crate::ast::{Expr, Infix, Prefix};

fn dual(infix: Infix) -> Infix {
    match infix {
        Infix::And => Infix::Or,
        Infix::Or => Infix::And,
        Infix::Until => Infix::Release,
        Infix::Release => Infix::Until,
        Infix::WeakUntil => Infix::StrongRelease,
        Infix::StrongRelease => Infix::WeakUntil,
        Infix::Xor | Infix::Imply | Infix::Iff => unreachable!("{} has no plain dual", infix),
    }
}

impl Expr {
    /// Push every negation down to the identifiers, expanding `->`, `<->`
    /// and `xor` on the way.
    pub fn negation_normal_form(&self) -> Expr {
        self.nnf(false)
    }

    fn nnf(&self, negated: bool) -> Expr {
        match self {
            Expr::Ident(_) => {
                if negated {
                    !self.clone()
                } else {
                    self.clone()
                }
            }
            Expr::LitExpr(lit) => Expr::LitExpr(*lit != negated),
            Expr::PrefixExpr(prefix, sub_expr) => match prefix {
                Prefix::Not => sub_expr.nnf(!negated),
                Prefix::Next => Expr::prefix(Prefix::Next, sub_expr.nnf(negated)),
                Prefix::Finally | Prefix::Globally => {
                    let prefix = match (prefix, negated) {
                        (Prefix::Finally, false) | (Prefix::Globally, true) => Prefix::Finally,
                        _ => Prefix::Globally,
                    };
                    Expr::prefix(prefix, sub_expr.nnf(negated))
                }
            },
            Expr::InfixExpr(infix, left, right) => match infix {
                Infix::Imply => {
                    // a -> b == !a | b
                    let op = if negated { Infix::And } else { Infix::Or };
                    Expr::infix(op, left.nnf(!negated), right.nnf(negated))
                }
                Infix::Iff => equivalence(left, right, negated),
                Infix::Xor => equivalence(left, right, !negated),
                _ => {
                    let op = if negated { dual(*infix) } else { *infix };
                    Expr::infix(op, left.nnf(negated), right.nnf(negated))
                }
            },
        }
    }
}

fn equivalence(left: &Expr, right: &Expr, negated: bool) -> Expr {
    // a <-> b == (a & b) | (!a & !b), !(a <-> b) == (a & !b) | (!a & b)
    let both = left.nnf(false) & right.nnf(negated);
    let neither = left.nnf(true) & right.nnf(!negated);
    both | neither
}
