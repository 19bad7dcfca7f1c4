use super::{contains, find_split, map_children, Strength};
use crate::formula::{Formula, Op};
use tracing::trace;

/// Remove every `U`/`M` that lies below a `W`/`R`.
///
/// Fairness operators are left alone.
pub fn eliminate(node: &Formula) -> Formula {
    match node.op() {
        Op::And | Op::Or | Op::Next | Op::Until | Op::StrongRelease => {
            map_children(node, eliminate)
        }
        Op::WeakUntil => eliminate_weak_until(node),
        Op::Release => eliminate_release(node),
        _ => node.clone(),
    }
}

fn eliminate_weak_until(node: &Formula) -> Formula {
    let (left, right) = (node.child(0), node.child(1));
    if contains(right, Strength::Strong) {
        // a W b == (a U b) | G a
        let until = Formula::until(eliminate(left), eliminate(right));
        let always = eliminate(&Formula::always(left.clone()));
        return Formula::or(vec![until, always]);
    }
    match find_split(left, Strength::Strong) {
        // f[x U y] W c == (GF y & (f[x W y] W c)) | (f[x U y] U (c | G f[false]))
        Some(split) => {
            trace!(witness = ?split.witness, "splitting weak until");
            let weak = eliminate(&Formula::weak_until(split.counterpart, right.clone()));
            let recurrent = Formula::and(vec![Formula::gf(split.witness), weak]);
            let escape = Formula::or(vec![
                right.clone(),
                eliminate(&Formula::always(split.constant)),
            ]);
            let until = Formula::until(eliminate(left), escape);
            Formula::or(vec![recurrent, until])
        }
        None => node.clone(),
    }
}

fn eliminate_release(node: &Formula) -> Formula {
    let (left, right) = (node.child(0), node.child(1));
    if contains(left, Strength::Strong) {
        // a R b == (a M b) | G b
        let strong = Formula::strong_release(eliminate(left), eliminate(right));
        let always = eliminate(&Formula::always(right.clone()));
        return Formula::or(vec![strong, always]);
    }
    match find_split(right, Strength::Strong) {
        // c R f[x U y] == (GF y & (c R f[x W y])) | ((c | G f[false]) M f[x U y])
        Some(split) => {
            trace!(witness = ?split.witness, "splitting release");
            let weak = eliminate(&Formula::release(left.clone(), split.counterpart));
            let recurrent = Formula::and(vec![Formula::gf(split.witness), weak]);
            let escape = Formula::or(vec![
                left.clone(),
                eliminate(&Formula::always(split.constant)),
            ]);
            let strong = Formula::strong_release(escape, eliminate(right));
            Formula::or(vec![recurrent, strong])
        }
        None => node.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ap(name: &str) -> Formula {
        Formula::ap(name)
    }

    // No strong operator below a weak one.
    fn clean(node: &Formula, below_weak: bool) -> bool {
        match node.op() {
            Op::Until | Op::StrongRelease if below_weak => false,
            Op::WeakUntil | Op::Release => node.children().iter().all(|c| clean(c, true)),
            Op::AlwaysEventually | Op::EventuallyAlways => true,
            _ => node.children().iter().all(|c| clean(c, below_weak)),
        }
    }

    #[test]
    fn untouched_without_strong_below_weak() {
        let (a, b, c) = (ap("elim_a"), ap("elim_b"), ap("elim_c"));
        let f = Formula::until(a.clone(), Formula::weak_until(b.clone(), c.clone()));
        assert!(eliminate(&f).ptr_eq(&f));
        let g = Formula::gf(Formula::weak_until(a, Formula::until(b, c)));
        assert!(eliminate(&g).ptr_eq(&g));
    }

    #[test]
    fn strong_right_operand_of_weak_until() {
        let (a, b, c) = (ap("wr_a"), ap("wr_b"), ap("wr_c"));
        let f = Formula::weak_until(a.clone(), Formula::until(b.clone(), c.clone()));
        let result = eliminate(&f);
        assert!(result.is(Op::Or));
        assert!(result.child(0).is(Op::Until));
        assert!(result.child(1).is_g());
        assert!(clean(&result, false));
    }

    #[test]
    fn strong_left_operand_of_weak_until() {
        let (a, b, c) = (ap("wl_a"), ap("wl_b"), ap("wl_c"));
        // (a U b) W c
        let f = Formula::weak_until(Formula::until(a.clone(), b.clone()), c.clone());
        let result = eliminate(&f);
        assert!(result.is(Op::Or));
        let recurrent = result.child(0);
        assert!(recurrent.is(Op::And));
        assert!(recurrent.child(0).is(Op::AlwaysEventually));
        assert!(recurrent.child(0).child(0).ptr_eq(&b));
        assert!(clean(&result, false));
    }

    #[test]
    fn release_is_the_dual() {
        let (a, b, c) = (ap("rel_a"), ap("rel_b"), ap("rel_c"));
        let f = Formula::release(Formula::until(a.clone(), b.clone()), c.clone());
        let result = eliminate(&f);
        assert!(result.is(Op::Or));
        assert!(result.child(0).is(Op::StrongRelease));
        assert!(clean(&result, false));

        let g = Formula::release(a, Formula::strong_release(b.clone(), c));
        let result = eliminate(&g);
        assert!(result.is(Op::Or));
        assert!(result.child(0).child(0).child(0).ptr_eq(&b));
        assert!(clean(&result, false));
    }

    #[test]
    fn nested_weak_operators() {
        let (a, b, c, d) = (ap("nest_a"), ap("nest_b"), ap("nest_c"), ap("nest_d"));
        // G (a | (b U (c W (X d U a))))
        let inner = Formula::weak_until(c.clone(), Formula::until(Formula::next(d), a.clone()));
        let f = Formula::always(Formula::or(vec![a, Formula::until(b, inner)]));
        let result = eliminate(&f);
        assert!(clean(&result, false));
        assert!(eliminate(&result).ptr_eq(&result));
    }
}
