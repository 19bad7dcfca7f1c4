use std::{
    fmt::Display,
    ops::{BitAnd, BitOr, Not},
};

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Prefix {
    Not,
    Next,
    Globally,
    Finally,
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Prefix::Not => "!",
            Prefix::Next => "X",
            Prefix::Globally => "G",
            Prefix::Finally => "F",
        };
        write!(f, "{}", display)
    }
}

#[derive(PartialEq, Debug, Clone, Copy, Hash, Eq)]
pub enum Infix {
    And,
    Or,
    Xor,
    Imply,
    Iff,
    Until,
    WeakUntil,
    Release,
    StrongRelease,
}

impl Infix {
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Infix::Until | Infix::WeakUntil | Infix::Release | Infix::StrongRelease
        )
    }
}

impl Display for Infix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Infix::And => "&",
            Infix::Or => "|",
            Infix::Xor => "xor",
            Infix::Imply => "->",
            Infix::Iff => "<->",
            Infix::Until => "U",
            Infix::WeakUntil => "W",
            Infix::Release => "R",
            Infix::StrongRelease => "M",
        };
        write!(f, "{}", display)
    }
}

#[derive(Debug, Clone, PartialEq, Hash, Eq)]
pub enum Expr {
    Ident(String),
    LitExpr(bool),
    PrefixExpr(Prefix, Box<Expr>),
    InfixExpr(Infix, Box<Expr>, Box<Expr>),
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self::Output {
        Expr::PrefixExpr(Prefix::Not, Box::new(self))
    }
}

impl BitAnd for Expr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::InfixExpr(Infix::And, Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::InfixExpr(Infix::Or, Box::new(self), Box::new(rhs))
    }
}

// Binary operands are parenthesized, everything else binds tighter.
struct Operand<'a>(&'a Expr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expr::InfixExpr(..) => write!(f, "({})", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident(ident) => write!(f, "{}", ident),
            Expr::LitExpr(lit) => {
                write!(f, "{}", if *lit { "true" } else { "false" })
            }
            Expr::PrefixExpr(Prefix::Not, expr) => write!(f, "!{}", Operand(expr)),
            Expr::PrefixExpr(prefix, expr) => write!(f, "{} {}", prefix, Operand(expr)),
            Expr::InfixExpr(infix, left, right) => {
                write!(f, "{} {} {}", Operand(left), infix, Operand(right))
            }
        }
    }
}

impl Expr {
    pub fn ident<S: Into<String>>(name: S) -> Self {
        Expr::Ident(name.into())
    }

    pub fn prefix(prefix: Prefix, expr: Expr) -> Self {
        Expr::PrefixExpr(prefix, Box::new(expr))
    }

    pub fn infix(infix: Infix, left: Expr, right: Expr) -> Self {
        Expr::InfixExpr(infix, Box::new(left), Box::new(right))
    }

    fn partition_to(self, op: Infix) -> Vec<Expr> {
        match self {
            Expr::InfixExpr(infix, left, right) if infix == op => {
                let mut left = left.partition_to(op);
                let mut right = right.partition_to(op);
                left.append(&mut right);
                left
            }
            _ => vec![self],
        }
    }

    pub fn partition_to_ands(self) -> Vec<Expr> {
        self.partition_to(Infix::And)
    }

    pub fn partition_to_ors(self) -> Vec<Expr> {
        self.partition_to(Infix::Or)
    }
}
