//! Reference semantics over lasso words.

#![allow(dead_code)]

use ltlnorm::{ingest::from_expr, Formula, Op};
use std::collections::HashMap;

/// An ultimately periodic word `stem loop^ω`. Letter `i` holds the names of
/// the propositions true at position `i`; the loop starts at `loop_start`.
pub struct Lasso {
    pub letters: Vec<Vec<String>>,
    pub loop_start: usize,
}

impl Lasso {
    /// `masks` over the propositions `names`, bit `j` for `names[j]`.
    pub fn from_masks(names: &[&str], masks: &[u8], loop_start: usize) -> Self {
        assert!(loop_start < masks.len());
        let letters = masks
            .iter()
            .map(|mask| {
                names
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (*mask >> *j) & 1 == 1)
                    .map(|(_, name)| name.to_string())
                    .collect()
            })
            .collect();
        Self {
            letters,
            loop_start,
        }
    }

    fn len(&self) -> usize {
        self.letters.len()
    }

    fn succ(&self, i: usize) -> usize {
        if i + 1 == self.len() {
            self.loop_start
        } else {
            i + 1
        }
    }

    fn holds(&self, i: usize, name: &str) -> bool {
        match name.strip_prefix('!') {
            Some(positive) => !self.letters[i].iter().any(|p| p == positive),
            None => self.letters[i].iter().any(|p| p == name),
        }
    }

    /// Whether `formula` holds at position 0.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        self.eval(formula, &mut HashMap::new())[0]
    }

    fn eval(&self, node: &Formula, memo: &mut HashMap<usize, Vec<bool>>) -> Vec<bool> {
        if let Some(known) = memo.get(&node.id()) {
            return known.clone();
        }
        let n = self.len();
        let children: Vec<Vec<bool>> = node
            .children()
            .iter()
            .map(|c| self.eval(c, memo))
            .collect();
        let value = match node.op() {
            Op::True => vec![true; n],
            Op::False => vec![false; n],
            Op::Ap => {
                let name = node.name().unwrap_or_default();
                (0..n).map(|i| self.holds(i, name)).collect()
            }
            Op::And => (0..n).map(|i| children.iter().all(|c| c[i])).collect(),
            Op::Or => (0..n).map(|i| children.iter().any(|c| c[i])).collect(),
            Op::Next => (0..n).map(|i| children[0][self.succ(i)]).collect(),
            // least fixpoints
            Op::Until => self.fixpoint(false, |i, r| children[1][i] || (children[0][i] && r)),
            Op::StrongRelease => {
                self.fixpoint(false, |i, r| children[1][i] && (children[0][i] || r))
            }
            // greatest fixpoints
            Op::WeakUntil => self.fixpoint(true, |i, r| children[1][i] || (children[0][i] && r)),
            Op::Release => self.fixpoint(true, |i, r| children[1][i] && (children[0][i] || r)),
            Op::AlwaysEventually => {
                let value = (self.loop_start..n).any(|i| children[0][i]);
                vec![value; n]
            }
            Op::EventuallyAlways => {
                let value = (self.loop_start..n).all(|i| children[0][i]);
                vec![value; n]
            }
        };
        memo.insert(node.id(), value.clone());
        value
    }

    /// Solve `r[i] = step(i, r[succ i])` from `init` everywhere.
    fn fixpoint(&self, init: bool, step: impl Fn(usize, bool) -> bool) -> Vec<bool> {
        let n = self.len();
        let mut r = vec![init; n];
        loop {
            let mut changed = false;
            for i in (0..n).rev() {
                let next = step(i, r[self.succ(i)]);
                if next != r[i] {
                    r[i] = next;
                    changed = true;
                }
            }
            if !changed {
                return r;
            }
        }
    }
}

pub fn formula(text: &str) -> Formula {
    from_expr(&ltl::parse(text).unwrap().negation_normal_form())
}

/// All lassos over `names` with at most `max_len` letters.
pub fn all_lassos(names: &[&str], max_len: usize) -> Vec<Lasso> {
    let letters = 1u8 << names.len();
    let mut lassos = Vec::new();
    for len in 1..=max_len {
        let total = (letters as usize).pow(len as u32);
        for code in 0..total {
            let mut rest = code;
            let masks: Vec<u8> = (0..len)
                .map(|_| {
                    let mask = (rest % letters as usize) as u8;
                    rest /= letters as usize;
                    mask
                })
                .collect();
            for loop_start in 0..len {
                lassos.push(Lasso::from_masks(names, &masks, loop_start));
            }
        }
    }
    lassos
}
