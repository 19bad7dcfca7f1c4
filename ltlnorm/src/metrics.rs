//! Sizes and the shape check for normalized formulas.

use crate::formula::{Formula, Op};
use std::collections::{HashMap, HashSet};

/// Number of operator and proposition nodes in the unfolded tree, constants
/// not counted. Saturates on very large shared formulas.
pub fn node_count(formula: &Formula) -> usize {
    fn count(node: &Formula, memo: &mut HashMap<usize, usize>) -> usize {
        if node.is_constant() {
            return 0;
        }
        if let Some(&known) = memo.get(&node.id()) {
            return known;
        }
        let total = node
            .children()
            .iter()
            .fold(1usize, |total, child| total.saturating_add(count(child, memo)));
        memo.insert(node.id(), total);
        total
    }
    count(formula, &mut HashMap::new())
}

/// Number of distinct non-constant nodes.
pub fn dag_size(formula: &Formula) -> usize {
    let mut seen = HashSet::new();
    let mut stack = vec![formula];
    while let Some(node) = stack.pop() {
        if node.is_constant() || !seen.insert(node.id()) {
            continue;
        }
        stack.extend(node.children());
    }
    seen.len()
}

/// Length of the longest path from the root to a leaf, a leaf having depth 1.
pub fn depth(formula: &Formula) -> usize {
    fn go(node: &Formula, memo: &mut HashMap<usize, usize>) -> usize {
        if let Some(&known) = memo.get(&node.id()) {
            return known;
        }
        let depth = 1 + node.children().iter().map(|c| go(c, memo)).max().unwrap_or(0);
        memo.insert(node.id(), depth);
        depth
    }
    go(formula, &mut HashMap::new())
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum Context {
    /// Only Boolean operators above.
    Top,
    /// Below `X`/`U`/`M`, no `W`/`R` above.
    Strong,
    /// Below `W`/`R` or inside an `FG`.
    Weak,
    /// Inside a `GF`.
    Fair,
}

impl Context {
    fn below_strong(self) -> Context {
        match self {
            Context::Top => Context::Strong,
            ctx => ctx,
        }
    }
}

/// Whether `formula` has the normal form: fairness operators only below
/// `And`/`Or`, no `U`/`M` below `W`/`R`/`FG`, and no `W`/`R`/`FG` below `GF`.
pub fn is_normalized(formula: &Formula) -> bool {
    normalized_in(formula, Context::Top, &mut HashMap::new())
}

type Memo = HashMap<(usize, Context), bool>;

fn normalized_in(node: &Formula, ctx: Context, memo: &mut Memo) -> bool {
    if let Some(&known) = memo.get(&(node.id(), ctx)) {
        return known;
    }
    let all = |inner: Context, memo: &mut Memo| {
        node.children()
            .iter()
            .all(|child| normalized_in(child, inner, memo))
    };
    let result = match node.op() {
        Op::AlwaysEventually => ctx == Context::Top && all(Context::Fair, memo),
        Op::EventuallyAlways => ctx == Context::Top && all(Context::Weak, memo),
        Op::Until | Op::StrongRelease => ctx != Context::Weak && all(ctx.below_strong(), memo),
        Op::WeakUntil | Op::Release => ctx != Context::Fair && all(Context::Weak, memo),
        Op::Next => all(ctx.below_strong(), memo),
        _ => all(ctx, memo),
    };
    memo.insert((node.id(), ctx), result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ap(name: &str) -> Formula {
        Formula::ap(name)
    }

    #[test]
    fn sizes_of_a_shared_formula() {
        let (a, b) = (ap("size_a"), ap("size_b"));
        let u = Formula::until(a.clone(), b.clone());
        let f = Formula::and(vec![u.clone(), Formula::next(u.clone())]);
        // And, U, a, b, X, U, a, b
        assert_eq!(node_count(&f), 8);
        // And, U, a, b, X
        assert_eq!(dag_size(&f), 5);
        assert_eq!(depth(&f), 4);
        assert_eq!(node_count(&Formula::eventually(a.clone())), 2);
        assert_eq!(node_count(&Formula::tt()), 0);
        assert_eq!(depth(&Formula::tt()), 1);
    }

    #[test]
    fn normal_form_shapes() {
        let (a, b) = (ap("shape_a"), ap("shape_b"));
        let u = Formula::until(a.clone(), b.clone());
        let w = Formula::weak_until(a.clone(), b.clone());

        assert!(is_normalized(&Formula::until(a.clone(), w.clone())));
        assert!(!is_normalized(&Formula::weak_until(a.clone(), u.clone())));
        assert!(is_normalized(&Formula::and(vec![Formula::gf(u.clone()), Formula::fg(w.clone())])));
        assert!(!is_normalized(&Formula::gf(w.clone())));
        assert!(!is_normalized(&Formula::fg(u.clone())));
        assert!(!is_normalized(&Formula::next(Formula::and(vec![
            a.clone(),
            Formula::gf(b.clone())
        ]))));
        assert!(!is_normalized(&Formula::until(a.clone(), Formula::gf(b.clone()))));
        assert!(!is_normalized(&Formula::until(a.clone(), Formula::fg(b.clone()))));
        assert!(is_normalized(&Formula::tt()));
    }
}
