use super::{find_split, map_children, Strength};
use crate::formula::{Formula, Op};
use tracing::trace;

/// Clear the arguments of top-level fairness operators: no `W`/`R`/`FG`
/// below `GF` and no `U`/`M` below `FG`.
///
/// Expects fairness operators to occur only below `And`/`Or`.
pub fn repair(node: &Formula) -> Formula {
    match node.op() {
        Op::And | Op::Or => map_children(node, repair),
        Op::AlwaysEventually => repair_argument(node.child(0), Strength::Weak, Some(node)),
        Op::EventuallyAlways => repair_argument(node.child(0), Strength::Strong, Some(node)),
        _ => node.clone(),
    }
}

fn wrap(arg: &Formula, forbidden: Strength) -> Formula {
    match forbidden {
        Strength::Weak => Formula::gf(arg.clone()),
        Strength::Strong => Formula::eventually(Formula::always(arg.clone())),
    }
}

/// Build `GF arg` (`forbidden` weak) or `FG arg` (`forbidden` strong) with the
/// forbidden operators removed from `arg`. `existing` is reused when `arg` is
/// already clean.
fn repair_argument(arg: &Formula, forbidden: Strength, existing: Option<&Formula>) -> Formula {
    let split = match find_split(arg, forbidden) {
        Some(split) => split,
        None => {
            return match existing {
                Some(node) => node.clone(),
                None => wrap(arg, forbidden),
            }
        }
    };
    trace!(witness = ?split.witness, ?forbidden, "repairing fairness argument");
    match forbidden {
        // GF f[a W b] == GF f[a U b] | (FG a & GF f[true])
        Strength::Weak => {
            let persistent = Formula::and(vec![
                repair_argument(&split.witness, Strength::Strong, None),
                repair_argument(&split.constant, Strength::Weak, None),
            ]);
            Formula::or(vec![
                repair_argument(&split.counterpart, Strength::Weak, None),
                persistent,
            ])
        }
        // FG f[a U b] == (GF b & FG f[a W b]) | FG f[false]
        Strength::Strong => {
            let recurrent = Formula::and(vec![
                repair_argument(&split.witness, Strength::Weak, None),
                repair_argument(&split.counterpart, Strength::Strong, None),
            ]);
            Formula::or(vec![
                recurrent,
                repair_argument(&split.constant, Strength::Strong, None),
            ])
        }
    }
}
