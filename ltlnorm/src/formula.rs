//! Shared formula DAG.
//!
//! A [`Formula`] is a reference-counted handle to an immutable [`Node`].
//! Cloning a handle adds an owner and dropping it releases one; a node is
//! freed together with its now unowned children when the last handle goes
//! away. Subformulas are freely shared between parents, so the structure is
//! a DAG rather than a tree, and it is acyclic because nodes are only ever
//! built from already existing ones.
//!
//! `True`, `False` and every atomic proposition have a single instance per
//! process, kept in a leaf cache that is populated on first use and torn
//! down by [`release_static_nodes`]. Comparing two leaves is therefore a
//! pointer comparison.

use once_cell::sync::Lazy;
use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Debug},
    sync::{Arc, Mutex, MutexGuard},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    True,
    False,
    Ap,
    And,
    Or,
    Next,
    Until,
    WeakUntil,
    Release,
    StrongRelease,
    AlwaysEventually,
    EventuallyAlways,
}

impl Op {
    pub fn is_temporal(self) -> bool {
        !matches!(self, Op::True | Op::False | Op::Ap | Op::And | Op::Or)
    }

    fn symbol(self) -> &'static str {
        match self {
            Op::True => "tt",
            Op::False => "ff",
            Op::Ap => "ap",
            Op::And => "And",
            Op::Or => "Or",
            Op::Next => "X",
            Op::Until => "U",
            Op::WeakUntil => "W",
            Op::Release => "R",
            Op::StrongRelease => "M",
            Op::AlwaysEventually => "GF",
            Op::EventuallyAlways => "FG",
        }
    }
}

pub struct Node {
    op: Op,
    children: Vec<Formula>,
    name: String,
}

#[derive(Clone)]
pub struct Formula(Arc<Node>);

impl Formula {
    /// Build a node as is. Smart constructors are the only callers.
    pub(crate) fn raw(op: Op, children: Vec<Formula>) -> Self {
        debug_assert!(op != Op::Ap && op != Op::True && op != Op::False);
        Formula(Arc::new(Node {
            op,
            children,
            name: String::new(),
        }))
    }

    fn leaf(op: Op, name: &str) -> Self {
        Formula(Arc::new(Node {
            op,
            children: Vec::new(),
            name: name.to_string(),
        }))
    }

    pub fn op(&self) -> Op {
        self.0.op
    }

    pub fn is(&self, op: Op) -> bool {
        self.0.op == op
    }

    pub fn children(&self) -> &[Formula] {
        &self.0.children
    }

    pub fn child(&self, i: usize) -> &Formula {
        &self.0.children[i]
    }

    /// Name of an atomic proposition.
    pub fn name(&self) -> Option<&str> {
        match self.0.op {
            Op::Ap => Some(&self.0.name),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Formula) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Current number of owners of this node: parents plus live handles.
    pub fn owners(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Identity of the shared node, stable while a handle to it is alive.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.0.op, Op::True | Op::False)
    }

    /// `a W false` or `false R a`, that is `G a`.
    pub fn is_g(&self) -> bool {
        (self.is(Op::WeakUntil) && self.child(1).is(Op::False))
            || (self.is(Op::Release) && self.child(0).is(Op::False))
    }

    /// `true U a` or `a M true`, that is `F a`.
    pub fn is_f(&self) -> bool {
        (self.is(Op::Until) && self.child(0).is(Op::True))
            || (self.is(Op::StrongRelease) && self.child(1).is(Op::True))
    }

    /// The operand of a `G` shaped node.
    pub(crate) fn g_arg(&self) -> Option<&Formula> {
        match self.0.op {
            Op::WeakUntil if self.is_g() => Some(self.child(0)),
            Op::Release if self.is_g() => Some(self.child(1)),
            _ => None,
        }
    }

    /// The operand of an `F` shaped node.
    pub(crate) fn f_arg(&self) -> Option<&Formula> {
        match self.0.op {
            Op::Until if self.is_f() => Some(self.child(1)),
            Op::StrongRelease if self.is_f() => Some(self.child(0)),
            _ => None,
        }
    }
}

/// Structural equality. Atomic propositions are canonical, so they are only
/// equal to themselves.
///
/// Pairs of nodes found equal are remembered for the rest of the walk, so
/// every pair is compared once and the cost follows the size of the two
/// DAGs, not of their unfolded trees.
impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        same(self, other, &mut HashSet::new())
    }
}

fn same(left: &Formula, right: &Formula, known: &mut HashSet<(usize, usize)>) -> bool {
    if left.ptr_eq(right) || known.contains(&(left.id(), right.id())) {
        return true;
    }
    // a mismatch ends the whole walk, so only matches need remembering
    let matched = left.op() != Op::Ap
        && left.op() == right.op()
        && left.children().len() == right.children().len()
        && left
            .children()
            .iter()
            .zip(right.children())
            .all(|(l, r)| same(l, r, known));
    if matched {
        known.insert((left.id(), right.id()));
    }
    matched
}

impl Eq for Formula {}

impl Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op() {
            Op::Ap => write!(f, "{}", self.0.name),
            op if self.children().is_empty() => write!(f, "{}", op.symbol()),
            op => {
                write!(f, "{}(", op.symbol())?;
                for (i, child) in self.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{:?}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Compare two formulas and, if they are structurally equal, make `right`
/// point to the node of `left`.
///
/// This is a comparison with a side effect: on success the caller's handle
/// is rebound, so its old node loses an owner and the graph gains sharing.
/// Duplicates are only merged where they meet in a comparison, never through
/// a global table.
pub fn equal(left: &Formula, right: &mut Formula) -> bool {
    if left.ptr_eq(right) {
        return true;
    }
    if *left == *right {
        *right = left.clone();
        return true;
    }
    false
}

struct Leaves {
    tt: Formula,
    ff: Formula,
    aps: HashMap<String, Formula>,
}

impl Leaves {
    fn new() -> Self {
        Self {
            tt: Formula::leaf(Op::True, ""),
            ff: Formula::leaf(Op::False, ""),
            aps: HashMap::new(),
        }
    }
}

// `None` once the cache has been released.
static LEAVES: Lazy<Mutex<Option<Leaves>>> = Lazy::new(|| Mutex::new(Some(Leaves::new())));

fn leaves() -> MutexGuard<'static, Option<Leaves>> {
    LEAVES.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_leaves<T>(f: impl FnOnce(&mut Leaves) -> T) -> T {
    let mut guard = leaves();
    match guard.as_mut() {
        Some(leaves) => f(leaves),
        None => panic!("formula leaves used after release_static_nodes"),
    }
}

impl Formula {
    pub fn tt() -> Formula {
        with_leaves(|leaves| leaves.tt.clone())
    }

    pub fn ff() -> Formula {
        with_leaves(|leaves| leaves.ff.clone())
    }

    /// The unique atomic proposition called `name`.
    pub fn ap(name: &str) -> Formula {
        assert!(!name.is_empty(), "atomic propositions need a name");
        with_leaves(|leaves| {
            leaves
                .aps
                .entry(name.to_string())
                .or_insert_with(|| Formula::leaf(Op::Ap, name))
                .clone()
        })
    }
}

/// Drop the process-wide leaves. Idempotent; no formula may be built
/// afterwards.
pub fn release_static_nodes() {
    let released = leaves().take();
    drop(released);
}
