//! Dominance frontier (`spec.md` §4.6), computed with Cytron's algorithm:
//! for every block with two or more predecessors, walk each predecessor up
//! the dominator tree until reaching the block's own immediate dominator,
//! adding the block to every frontier visited along the way.
//!
//! A separate, separately testable struct from [`crate::dominator::DominatorTree`]
//! rather than a monolithic SSA builder — SSA construction (φ-placement)
//! itself is a downstream, out-of-scope consumer of both.

use std::collections::{BTreeSet, HashMap};

use sfac_sema::Cfg;

use crate::dominator::DominatorTree;

pub struct DominanceFrontier {
    frontier: HashMap<usize, BTreeSet<usize>>,
}

impl DominanceFrontier {
    pub fn compute(cfg: &Cfg, domtree: &DominatorTree) -> Self {
        let mut frontier: HashMap<usize, BTreeSet<usize>> =
            cfg.blocks.iter().map(|b| (b.id, BTreeSet::new())).collect();

        for block in &cfg.blocks {
            if block.predecessors.len() < 2 {
                continue;
            }
            let idom_b = domtree.immediate_dominator(block.id);
            for &pred in &block.predecessors {
                let mut runner = pred;
                while Some(runner) != idom_b {
                    frontier.entry(runner).or_default().insert(block.id);
                    match domtree.immediate_dominator(runner) {
                        Some(next) => runner = next,
                        // `runner` is the entry; its own sentinel immediate
                        // dominator never equals `idom_b`, so stop here
                        // rather than looping forever.
                        None => break,
                    }
                }
            }
        }

        DominanceFrontier { frontier }
    }

    pub fn of(&self, block: usize) -> impl Iterator<Item = usize> + '_ {
        self.frontier.get(&block).into_iter().flatten().copied()
    }

    /// `DF+(S)`: the fixed-point union of `DF(B)` for every `B` in `seed`
    /// and everything reachable by repeatedly following frontiers from
    /// there. Deterministic ordering via `BTreeSet`; empty when `seed` is
    /// empty.
    pub fn iterated(&self, seed: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
        let mut result = BTreeSet::new();
        let mut worklist: Vec<usize> = seed.into_iter().collect();

        while let Some(b) = worklist.pop() {
            for f in self.of(b) {
                if result.insert(f) {
                    worklist.push(f);
                }
            }
        }

        result
    }
}
