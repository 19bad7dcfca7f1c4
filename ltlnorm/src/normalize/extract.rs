use super::map_children;
use crate::formula::{Formula, Op};
use tracing::trace;

/// The first `GF`/`FG` in `node` that is nested below a temporal operator,
/// preferring the innermost one on each path.
///
/// `proper` is set once the search is below a temporal operator.
fn find_fairness(node: &Formula, proper: bool) -> Option<Formula> {
    match node.op() {
        Op::AlwaysEventually | Op::EventuallyAlways => {
            find_fairness(node.child(0), true).or_else(|| proper.then(|| node.clone()))
        }
        Op::And | Op::Or => node
            .children()
            .iter()
            .find_map(|child| find_fairness(child, proper)),
        op if op.is_temporal() => node
            .children()
            .iter()
            .find_map(|child| find_fairness(child, true)),
        _ => None,
    }
}

/// Replace every occurrence of the fairness formula `target` by `by`.
fn replace(node: &Formula, target: &Formula, by: &Formula) -> Formula {
    match node.op() {
        op if op == target.op() && node.child(0) == target.child(0) => by.clone(),
        Op::True | Op::False | Op::Ap => node.clone(),
        _ => map_children(node, |child| replace(child, target, by)),
    }
}

/// Pull every `GF`/`FG` up to the Boolean top level.
///
/// A nested fairness formula `φ` is split off by `f[φ] == (φ & f[true]) | f[false]`.
pub fn extract(node: &Formula) -> Formula {
    if node.is(Op::And) || node.is(Op::Or) {
        return map_children(node, extract);
    }
    match find_fairness(node, false) {
        Some(found) => {
            trace!(fairness = ?found, "extracting");
            let satisfied = extract(&replace(node, &found, &Formula::tt()));
            let violated = extract(&replace(node, &found, &Formula::ff()));
            Formula::or(vec![Formula::and(vec![found, satisfied]), violated])
        }
        None => node.clone(),
    }
}
