//! Dominator tree (`spec.md` §4.6), computed with the Cooper–Harvey–Kennedy
//! iterative algorithm over a function's [`Cfg`].
//!
//! Mirrors the cranelift `Context` pattern of a persistent, recomputable
//! analysis object owned alongside the function it describes
//! (`domtree: DominatorTree`, `cfg: ControlFlowGraph`, `compute_domtree`) —
//! here `DominatorTree::compute` takes the `&Cfg` directly rather than
//! holding one, since `sfac_sema::cfg::Cfg` is itself already a small,
//! freestanding value built once by Pass 5.

use sfac_sema::Cfg;

/// `idom[b] == None` means either `b` is the entry (whose immediate
/// dominator is the `-1` sentinel `spec.md` §4.6 names) or `b` is
/// unreachable from the entry and was never visited.
#[derive(Debug)]
pub struct DominatorTree {
    idom: Vec<Option<usize>>,
    entry: usize,
}

impl DominatorTree {
    pub fn compute(cfg: &Cfg) -> Self {
        let n = cfg.blocks.len();
        let postorder = postorder_from(cfg, cfg.entry);
        let mut postorder_number = vec![usize::MAX; n];
        for (i, &block) in postorder.iter().enumerate() {
            postorder_number[block] = i;
        }

        // Reverse postorder, skipping the entry (processed order for the
        // fixed-point loop below).
        let rpo: Vec<usize> = postorder.iter().rev().copied().filter(|&b| b != cfg.entry).collect();

        let mut idom: Vec<Option<usize>> = vec![None; n];
        idom[cfg.entry] = Some(cfg.entry);

        let mut changed = true;
        while changed {
            changed = false;
            for &b in &rpo {
                let mut new_idom = None;
                for &p in &cfg.blocks[b].predecessors {
                    if idom[p].is_none() {
                        continue;
                    }
                    new_idom = Some(match new_idom {
                        None => p,
                        Some(current) => intersect(current, p, &idom, &postorder_number),
                    });
                }
                if idom[b] != new_idom {
                    idom[b] = new_idom;
                    changed = true;
                }
            }
        }

        DominatorTree { idom, entry: cfg.entry }
    }

    /// `None` for the entry (the `-1` sentinel) and for any block never
    /// reached by the fixed point (unreachable from the entry).
    pub fn immediate_dominator(&self, block: usize) -> Option<usize> {
        if block == self.entry {
            None
        } else {
            self.idom[block]
        }
    }

    /// `a` dominates `b` iff `a` appears in `b`'s dominator chain, including
    /// `a == b` (every block dominates itself).
    pub fn dominates(&self, a: usize, b: usize) -> bool {
        if a == b {
            return self.idom[b].is_some() || b == self.entry;
        }
        let mut cursor = b;
        loop {
            let Some(parent) = self.idom[cursor] else { return false };
            if parent == cursor {
                return false; // reached the entry without finding `a`
            }
            if parent == a {
                return true;
            }
            cursor = parent;
        }
    }

    pub fn strictly_dominates(&self, a: usize, b: usize) -> bool {
        a != b && self.dominates(a, b)
    }
}

fn intersect(mut a: usize, mut b: usize, idom: &[Option<usize>], postorder_number: &[usize]) -> usize {
    while a != b {
        while postorder_number[a] < postorder_number[b] {
            a = idom[a].expect("walked off the dominator chain before reaching a common ancestor");
        }
        while postorder_number[b] < postorder_number[a] {
            b = idom[b].expect("walked off the dominator chain before reaching a common ancestor");
        }
    }
    a
}

/// Postorder over blocks reachable from `entry`, following successors.
fn postorder_from(cfg: &Cfg, entry: usize) -> Vec<usize> {
    let mut visited = vec![false; cfg.blocks.len()];
    let mut order = Vec::new();
    let mut stack: Vec<(usize, usize)> = vec![(entry, 0)];
    visited[entry] = true;

    while let Some(&(node, next_child)) = stack.last() {
        if next_child < cfg.blocks[node].successors.len() {
            let child = cfg.blocks[node].successors[next_child];
            stack.last_mut().unwrap().1 += 1;
            if !visited[child] {
                visited[child] = true;
                stack.push((child, 0));
            }
        } else {
            order.push(node);
            stack.pop();
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfac_sema::{Cfg, CfgBlock, Terminator};

    fn block(id: usize, successors: &[usize], predecessors: &[usize]) -> CfgBlock {
        CfgBlock {
            id,
            label: format!("b{id}"),
            statements: Vec::new(),
            successors: successors.to_vec(),
            predecessors: predecessors.to_vec(),
            terminator: Terminator::None,
        }
    }

    /// entry(0) -> left(1), right(2); left -> merge(3); right -> merge(3).
    fn diamond() -> Cfg {
        Cfg {
            blocks: vec![
                block(0, &[1, 2], &[]),
                block(1, &[3], &[0]),
                block(2, &[3], &[0]),
                block(3, &[], &[1, 2]),
            ],
            entry: 0,
        }
    }

    /// entry(0) -> header(1) -> body(2) -> header(1); header -> exit(3).
    fn loop_cfg() -> Cfg {
        Cfg {
            blocks: vec![
                block(0, &[1], &[]),
                block(1, &[2, 3], &[0, 2]),
                block(2, &[1], &[1]),
                block(3, &[], &[1]),
            ],
            entry: 0,
        }
    }

    #[test]
    fn entry_immediate_dominator_is_the_sentinel() {
        let tree = DominatorTree::compute(&diamond());
        assert_eq!(tree.immediate_dominator(0), None);
        assert!(tree.dominates(0, 0));
        assert!(tree.dominates(0, 3));
    }

    #[test]
    fn diamond_merge_is_dominated_only_by_entry_and_itself() {
        let tree = DominatorTree::compute(&diamond());
        assert_eq!(tree.immediate_dominator(3), Some(0));
        assert!(!tree.strictly_dominates(1, 3));
        assert!(!tree.strictly_dominates(2, 3));
        assert!(tree.strictly_dominates(0, 3));
    }

    #[test]
    fn loop_body_is_dominated_by_header() {
        let tree = DominatorTree::compute(&loop_cfg());
        assert_eq!(tree.immediate_dominator(2), Some(1));
        assert_eq!(tree.immediate_dominator(3), Some(1));
        assert!(tree.dominates(1, 2));
    }

    #[test]
    fn computation_is_deterministic_across_repeated_runs() {
        let cfg = loop_cfg();
        let a = DominatorTree::compute(&cfg);
        let b = DominatorTree::compute(&cfg);
        assert_eq!(a.idom, b.idom);
    }
}
