//! Simplifying constructors.
//!
//! Every public way of building an inner node goes through these functions,
//! which fold constants and rewrite some shapes into the fairness operators.
//! Rules are tried in order and the first applicable one wins. Operands that
//! do not end up in the result are simply dropped.
//!
//! Afterwards no temporal operator has a constant operand that one of the
//! rules below would remove, And/Or have no constant operands, and the
//! arguments of GF/FG are never `X`, `F` (for GF) or `G` (for FG) shaped.

use crate::formula::{equal, Formula, Op};

fn map(args: &[Formula], f: fn(Formula) -> Formula) -> Vec<Formula> {
    args.iter().cloned().map(f).collect()
}

impl Formula {
    pub fn next(arg: Formula) -> Formula {
        if arg.is_constant() || arg.is(Op::AlwaysEventually) || arg.is(Op::EventuallyAlways) {
            return arg;
        }
        Formula::raw(Op::Next, vec![arg])
    }

    pub fn until(left: Formula, mut right: Formula) -> Formula {
        if left.is(Op::False) || equal(&left, &mut right) {
            return right;
        }
        if right.is_constant() || right.is_f() {
            return right;
        }
        if left.is(Op::True) {
            if right.is(Op::Or) {
                return Formula::or(map(right.children(), Formula::eventually));
            }
            if let Some(arg) = right.g_arg() {
                return Formula::fg(arg.clone());
            }
        }
        Formula::raw(Op::Until, vec![left, right])
    }

    pub fn weak_until(left: Formula, mut right: Formula) -> Formula {
        if left.is(Op::False) || equal(&left, &mut right) {
            return right;
        }
        if right.is(Op::True) || left.is(Op::True) {
            return Formula::tt();
        }
        if left.is_g() {
            return Formula::or(vec![left, right]);
        }
        if right.is(Op::False) {
            if left.is(Op::And) {
                return Formula::and(map(left.children(), Formula::always));
            }
            if let Some(arg) = left.f_arg() {
                return Formula::gf(arg.clone());
            }
        }
        Formula::raw(Op::WeakUntil, vec![left, right])
    }

    pub fn release(left: Formula, mut right: Formula) -> Formula {
        if left.is(Op::True) || equal(&left, &mut right) {
            return right;
        }
        if right.is_constant() || right.is_g() {
            return right;
        }
        if left.is(Op::False) {
            if right.is(Op::And) {
                return Formula::and(map(right.children(), Formula::always));
            }
            if let Some(arg) = right.f_arg() {
                return Formula::gf(arg.clone());
            }
        }
        Formula::raw(Op::Release, vec![left, right])
    }

    pub fn strong_release(left: Formula, mut right: Formula) -> Formula {
        if left.is(Op::True) || equal(&left, &mut right) {
            return right;
        }
        if right.is(Op::False) || left.is(Op::False) {
            return Formula::ff();
        }
        if left.is_f() {
            return Formula::and(vec![left, right]);
        }
        if right.is(Op::True) {
            if left.is(Op::Or) {
                return Formula::or(map(left.children(), Formula::eventually));
            }
            if let Some(arg) = left.g_arg() {
                return Formula::fg(arg.clone());
            }
        }
        Formula::raw(Op::StrongRelease, vec![left, right])
    }

    pub fn gf(arg: Formula) -> Formula {
        if arg.is_constant() {
            return arg;
        }
        if arg.is(Op::Next) {
            return Formula::gf(arg.child(0).clone());
        }
        if let Some(inner) = arg.f_arg() {
            return Formula::gf(inner.clone());
        }
        Formula::raw(Op::AlwaysEventually, vec![arg])
    }

    pub fn fg(arg: Formula) -> Formula {
        if arg.is_constant() {
            return arg;
        }
        if arg.is(Op::Next) {
            return Formula::fg(arg.child(0).clone());
        }
        if let Some(inner) = arg.g_arg() {
            return Formula::fg(inner.clone());
        }
        Formula::raw(Op::EventuallyAlways, vec![arg])
    }

    /// `G arg`, built as `arg W false`.
    pub fn always(arg: Formula) -> Formula {
        Formula::weak_until(arg, Formula::ff())
    }

    /// `F arg`, built as `true U arg`.
    pub fn eventually(arg: Formula) -> Formula {
        Formula::until(Formula::tt(), arg)
    }

    pub fn and(args: Vec<Formula>) -> Formula {
        Formula::junction(Op::And, args)
    }

    pub fn or(args: Vec<Formula>) -> Formula {
        Formula::junction(Op::Or, args)
    }

    fn junction(op: Op, mut args: Vec<Formula>) -> Formula {
        let (absorbing, neutral) = match op {
            Op::And => (Op::False, Op::True),
            _ => (Op::True, Op::False),
        };
        if let Some(constant) = args.iter().find(|arg| arg.is(absorbing)) {
            return constant.clone();
        }
        args.retain(|arg| !arg.is(neutral));
        match args.len() {
            0 => {
                if neutral == Op::True {
                    Formula::tt()
                } else {
                    Formula::ff()
                }
            }
            1 => args.swap_remove(0),
            _ => Formula::raw(op, args),
        }
    }

    /// Rebuild a node of the same kind over new children, simplifying.
    pub fn rebuild(&self, mut children: Vec<Formula>) -> Formula {
        match self.op() {
            Op::True | Op::False | Op::Ap => self.clone(),
            Op::And => Formula::and(children),
            Op::Or => Formula::or(children),
            Op::Next => Formula::next(children.swap_remove(0)),
            Op::AlwaysEventually => Formula::gf(children.swap_remove(0)),
            Op::EventuallyAlways => Formula::fg(children.swap_remove(0)),
            op => {
                let right = children.swap_remove(1);
                let left = children.swap_remove(0);
                match op {
                    Op::Until => Formula::until(left, right),
                    Op::WeakUntil => Formula::weak_until(left, right),
                    Op::Release => Formula::release(left, right),
                    _ => Formula::strong_release(left, right),
                }
            }
        }
    }
}
