//! The normalization pipeline.
//!
//! [`normalize`] runs three rewriting passes in order:
//!
//! 1. [`eliminate`] removes every `U`/`M` that sits below a `W`/`R`;
//! 2. [`extract`] pulls every `GF`/`FG` up to the Boolean top level;
//! 3. [`repair`] clears the fairness arguments of the operators that may not
//!    occur in them: weak ones below `GF`, strong ones below `FG`.
//!
//! All three are built on a single search, [`find_split`], which looks for the
//! leftmost operator of a given strength reachable through operators that
//! "pass through" it, and returns the two variants of the formula with that
//! operator replaced by a constant and by its counterpart.

mod eliminate;
mod extract;
mod repair;

pub use eliminate::eliminate;
pub use extract::extract;
pub use repair::repair;

use crate::{
    formula::{equal, Formula, Op},
    metrics,
};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strength {
    /// `U` and `M`.
    Strong,
    /// `W`, `R` and, as a search target only, `FG`.
    Weak,
}

impl Strength {
    /// Operators the search for `self` descends through.
    fn passes(self, op: Op) -> bool {
        match op {
            Op::And | Op::Or | Op::Next => true,
            Op::WeakUntil | Op::Release => self == Strength::Strong,
            Op::Until | Op::StrongRelease => self == Strength::Weak,
            _ => false,
        }
    }

    fn targets(self, op: Op) -> bool {
        match self {
            Strength::Strong => matches!(op, Op::Until | Op::StrongRelease),
            Strength::Weak => matches!(op, Op::WeakUntil | Op::Release | Op::EventuallyAlways),
        }
    }

    /// The value a target operator is replaced with in the constant variant.
    fn constant(self) -> Formula {
        match self {
            Strength::Strong => Formula::ff(),
            Strength::Weak => Formula::tt(),
        }
    }
}

/// A formula `f[x]` split at an occurrence of the target operator `x`.
pub(crate) struct Split {
    /// The operand that decides between the two variants: the right operand
    /// of `U`/`R`, the left one of `M`/`W`, the argument of `FG`.
    pub witness: Formula,
    /// `f[false]` for strong targets, `f[true]` for weak ones.
    pub constant: Formula,
    /// `f` with the target swapped for its counterpart: `U` and `W`, `M` and
    /// `R`; an `FG` becomes false.
    pub counterpart: Formula,
}

fn witness_index(op: Op) -> usize {
    match op {
        Op::Until | Op::Release => 1,
        _ => 0,
    }
}

fn counterpart(node: &Formula, children: Vec<Formula>) -> Formula {
    let mut children = children.into_iter();
    let (left, right) = match (children.next(), children.next()) {
        (Some(left), Some(right)) => (left, right),
        _ => return Formula::ff(),
    };
    match node.op() {
        Op::Until => Formula::weak_until(left, right),
        Op::WeakUntil => Formula::until(left, right),
        Op::Release => Formula::strong_release(left, right),
        _ => Formula::release(left, right),
    }
}

/// Search `node` for the leftmost target of `strength`.
///
/// Once found, later siblings are searched for targets with the same witness,
/// and those are replaced in the same way.
pub(crate) fn find_split(node: &Formula, strength: Strength) -> Option<Split> {
    if strength.targets(node.op()) {
        return Some(Split {
            witness: node.child(witness_index(node.op())).clone(),
            constant: strength.constant(),
            counterpart: counterpart(node, node.children().to_vec()),
        });
    }
    if !strength.passes(node.op()) {
        return None;
    }
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let found = match find_split(child, strength) {
            Some(found) => found,
            None => continue,
        };
        let mut constant = children.to_vec();
        let mut counter = children.to_vec();
        constant[i] = found.constant;
        counter[i] = found.counterpart;
        for j in i + 1..children.len() {
            if let Some((c, cp)) = replace_witness(&children[j], &found.witness, strength) {
                constant[j] = c;
                counter[j] = cp;
            }
        }
        return Some(Split {
            witness: found.witness,
            constant: node.rebuild(constant),
            counterpart: node.rebuild(counter),
        });
    }
    None
}

/// Replace every target of `strength` whose witness equals `witness`,
/// returning the constant and the counterpart variant, or `None` if there is
/// no such target.
fn replace_witness(
    node: &Formula,
    witness: &Formula,
    strength: Strength,
) -> Option<(Formula, Formula)> {
    if strength.targets(node.op()) {
        if node.is(Op::EventuallyAlways) {
            return None;
        }
        let index = witness_index(node.op());
        let mut children = node.children().to_vec();
        if !equal(witness, &mut children[index]) {
            return None;
        }
        return Some((strength.constant(), counterpart(node, children)));
    }
    if !strength.passes(node.op()) {
        return None;
    }
    let mut changed = false;
    let mut constant = node.children().to_vec();
    let mut counter = node.children().to_vec();
    for (i, child) in node.children().iter().enumerate() {
        if let Some((c, cp)) = replace_witness(child, witness, strength) {
            constant[i] = c;
            counter[i] = cp;
            changed = true;
        }
    }
    changed.then(|| (node.rebuild(constant), node.rebuild(counter)))
}

/// Whether a target of `strength` is reachable from `node` through operators
/// that pass through it.
pub(crate) fn contains(node: &Formula, strength: Strength) -> bool {
    if strength.targets(node.op()) {
        return true;
    }
    strength.passes(node.op()) && node.children().iter().any(|child| contains(child, strength))
}

/// Keep `node` if none of its children changed, otherwise rebuild it.
pub(crate) fn map_children(node: &Formula, f: impl Fn(&Formula) -> Formula) -> Formula {
    let children: Vec<Formula> = node.children().iter().map(&f).collect();
    if children
        .iter()
        .zip(node.children())
        .all(|(new, old)| new.ptr_eq(old))
    {
        return node.clone();
    }
    node.rebuild(children)
}

/// Bring `formula` into normal form: no `U`/`M` below a `W`/`R`, fairness
/// operators only below `And`/`Or`, and their arguments cleared of the
/// operators that fairness rules out.
pub fn normalize(formula: Formula) -> Formula {
    debug!(dag = metrics::dag_size(&formula), "normalizing");
    let eliminated = eliminate(&formula);
    drop(formula);
    debug!(dag = metrics::dag_size(&eliminated), "strong operators below weak ones eliminated");
    let extracted = extract(&eliminated);
    drop(eliminated);
    debug!(dag = metrics::dag_size(&extracted), "fairness extracted");
    let repaired = repair(&extracted);
    debug!(dag = metrics::dag_size(&repaired), "fairness arguments repaired");
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ap(name: &str) -> Formula {
        Formula::ap(name)
    }

    #[test]
    fn split_at_a_strong_operator() {
        let (a, b, c) = (ap("split_a"), ap("split_b"), ap("split_c"));
        // (a U b) & X c
        let f = Formula::and(vec![
            Formula::until(a.clone(), b.clone()),
            Formula::next(c.clone()),
        ]);
        let split = find_split(&f, Strength::Strong).unwrap();
        assert!(split.witness.ptr_eq(&b));
        assert!(split.constant.is(Op::False));
        assert!(split.counterpart.is(Op::And));
        assert!(split.counterpart.child(0).is(Op::WeakUntil));
        assert!(split.counterpart.child(1).ptr_eq(f.child(1)));
    }

    #[test]
    fn same_witness_is_replaced_in_later_siblings() {
        let (a, b, c) = (ap("sib_a"), ap("sib_b"), ap("sib_c"));
        let first = Formula::until(a.clone(), Formula::next(b.clone()));
        let second = Formula::until(c.clone(), Formula::next(b.clone()));
        let f = Formula::or(vec![first, second]);
        let split = find_split(&f, Strength::Strong).unwrap();
        assert!(split.constant.is(Op::False));
        let counter = &split.counterpart;
        assert!(counter.is(Op::Or));
        assert!(counter.children().iter().all(|child| child.is(Op::WeakUntil)));
        // the replaced witness now shares the node of the found one
        assert!(counter.child(1).child(1).ptr_eq(&split.witness));
    }

    #[test]
    fn search_stops_at_opposite_operators() {
        let (a, b, c) = (ap("stop_a"), ap("stop_b"), ap("stop_c"));
        // the weak search goes through U, but not through W for strong
        let f = Formula::until(a.clone(), Formula::weak_until(b.clone(), c.clone()));
        assert!(contains(&f, Strength::Weak));
        let split = find_split(&f, Strength::Weak).unwrap();
        assert!(split.witness.ptr_eq(&b));
        assert!(split.constant.ptr_eq(&Formula::tt()));

        let g = Formula::weak_until(a.clone(), Formula::until(b.clone(), c.clone()));
        assert!(contains(&g, Strength::Strong));
        assert!(!contains(&Formula::gf(Formula::until(a, b)), Strength::Strong));
    }

    #[test]
    fn fg_is_a_weak_target() {
        let a = ap("fg_target_a");
        let f = Formula::or(vec![Formula::fg(a.clone()), ap("fg_target_b")]);
        let split = find_split(&f, Strength::Weak).unwrap();
        assert!(split.witness.ptr_eq(&a));
        assert!(split.constant.is(Op::True));
        assert!(split.counterpart.ptr_eq(&ap("fg_target_b")));
        assert!(find_split(&Formula::gf(a), Strength::Weak).is_none());
    }
}
