//! Per-function control-flow graph of basic blocks (`spec.md` §3 "CFG").
//!
//! Built by Pass 5 from a function's statement tree. Blocks are identified
//! by integer id and reference their statements by [`sfac_ast::NodeId`]
//! rather than owning the statements, per the "cyclic graphs" design note in
//! `spec.md` §9: edges are `{from, to}` id pairs, not back-pointers.

use sfac_ast::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Return,
    Break,
    Continue,
    /// Falls through to every successor unconditionally (e.g. end of a loop
    /// header that always re-enters its body check).
    None,
}

#[derive(Debug)]
pub struct CfgBlock {
    pub id: usize,
    pub label: String,
    /// Statements placed in this block, in source order.
    pub statements: Vec<NodeId>,
    pub successors: Vec<usize>,
    pub predecessors: Vec<usize>,
    pub terminator: Terminator,
}

impl CfgBlock {
    /// `hasTerminator()`: true for any terminator other than `None`, i.e.
    /// this block ends the straight-line sequence rather than falling
    /// through. A terminator, when present, is always the block's implicit
    /// last instruction since nothing is appended to a block after one.
    pub fn has_terminator(&self) -> bool {
        self.terminator != Terminator::None
    }
}

#[derive(Debug)]
pub struct Cfg {
    pub blocks: Vec<CfgBlock>,
    pub entry: usize,
}

impl Cfg {
    pub fn block(&self, id: usize) -> &CfgBlock {
        &self.blocks[id]
    }

    /// Every block except the entry has at least one predecessor when
    /// reachable from the entry — the invariant `spec.md` §3 names.
    pub fn unreachable_non_entry_blocks(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .filter(|b| b.id != self.entry && b.predecessors.is_empty())
            .map(|b| b.id)
            .collect()
    }
}

/// Builds a [`Cfg`] for one function body by splitting at control-flow
/// joins and jump successors.
pub struct CfgBuilder {
    blocks: Vec<CfgBlock>,
    current: usize,
    /// Set once the active block ends in a terminator; further statements
    /// appended to it would be unreachable (Pass 5 reports this separately
    /// using `sfac_ast::block_terminates`, so the builder itself just stops
    /// extending a terminated block).
    terminated: bool,
}

impl CfgBuilder {
    pub fn new() -> Self {
        let entry = CfgBlock {
            id: 0,
            label: "entry".to_string(),
            statements: Vec::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            terminator: Terminator::None,
        };
        CfgBuilder { blocks: vec![entry], current: 0, terminated: false }
    }

    fn fresh_block(&mut self, label: impl Into<String>) -> usize {
        let id = self.blocks.len();
        self.blocks.push(CfgBlock {
            id,
            label: label.into(),
            statements: Vec::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            terminator: Terminator::None,
        });
        id
    }

    fn link(&mut self, from: usize, to: usize) {
        if !self.blocks[from].successors.contains(&to) {
            self.blocks[from].successors.push(to);
        }
        if !self.blocks[to].predecessors.contains(&from) {
            self.blocks[to].predecessors.push(from);
        }
    }

    fn append_statement(&mut self, id: NodeId) {
        if !self.terminated {
            self.blocks[self.current].statements.push(id);
        }
    }

    fn set_terminator(&mut self, term: Terminator) {
        self.blocks[self.current].terminator = term;
        self.terminated = true;
    }

    pub fn walk_block(&mut self, body: sfac_ast::Block<'_>) {
        for stmt in body {
            if self.terminated {
                // Statements after a terminator are unreachable; Pass 5
                // reports this once per block via `block_terminates`, so the
                // builder simply stops growing the current block.
                break;
            }
            self.walk_stmt(stmt);
        }
    }

    fn walk_stmt(&mut self, stmt: &sfac_ast::Stmt<'_>) {
        use sfac_ast::Stmt;
        match stmt {
            Stmt::Return { id, .. } => {
                self.append_statement(*id);
                self.set_terminator(Terminator::Return);
            }
            Stmt::Break { id, .. } => {
                self.append_statement(*id);
                self.set_terminator(Terminator::Break);
            }
            Stmt::Continue { id, .. } => {
                self.append_statement(*id);
                self.set_terminator(Terminator::Continue);
            }
            Stmt::Expression { id, .. } | Stmt::VariableDecl(sfac_ast::VariableDecl { id, .. }) => {
                self.append_statement(*id);
            }
            Stmt::Block { id, body, .. } => {
                self.append_statement(*id);
                self.walk_block(*body);
            }
            Stmt::If { id, then_branch, else_branch, .. } => {
                self.append_statement(*id);
                let before = self.current;
                let then_id = self.fresh_block("if.then");
                self.link(before, then_id);
                self.current = then_id;
                self.terminated = false;
                self.walk_block(*then_branch);
                let then_end = if self.terminated { None } else { Some(self.current) };

                let else_end = if let Some(else_branch) = else_branch {
                    let else_id = self.fresh_block("if.else");
                    self.link(before, else_id);
                    self.current = else_id;
                    self.terminated = false;
                    self.walk_block(*else_branch);
                    if self.terminated {
                        None
                    } else {
                        Some(self.current)
                    }
                } else {
                    Some(before)
                };

                let merge_needed = then_end.is_some() || else_end.is_some();
                if merge_needed {
                    let merge_id = self.fresh_block("if.merge");
                    if let Some(end) = then_end {
                        self.link(end, merge_id);
                    }
                    if let Some(end) = else_end {
                        if end != before || else_branch.is_none() {
                            self.link(end, merge_id);
                        }
                    }
                    self.current = merge_id;
                    self.terminated = false;
                } else {
                    // Both branches terminate unconditionally: nothing falls
                    // through, so leave `terminated` set from whichever
                    // branch ran last to prevent dangling successors.
                    self.terminated = true;
                }
            }
            Stmt::While { id, body, .. } => {
                self.append_statement(*id);
                let before = self.current;
                let header = self.fresh_block("while.header");
                self.link(before, header);
                let body_id = self.fresh_block("while.body");
                self.link(header, body_id);
                self.current = body_id;
                self.terminated = false;
                self.walk_block(*body);
                if !self.terminated {
                    self.link(self.current, header);
                }
                let exit = self.fresh_block("while.exit");
                self.link(header, exit);
                self.current = exit;
                self.terminated = false;
            }
            Stmt::For { id, body, .. } => {
                self.append_statement(*id);
                let before = self.current;
                let header = self.fresh_block("for.header");
                self.link(before, header);
                let body_id = self.fresh_block("for.body");
                self.link(header, body_id);
                self.current = body_id;
                self.terminated = false;
                self.walk_block(*body);
                if !self.terminated {
                    self.link(self.current, header);
                }
                let exit = self.fresh_block("for.exit");
                self.link(header, exit);
                self.current = exit;
                self.terminated = false;
            }
            Stmt::DoWhile { id, body, .. } => {
                self.append_statement(*id);
                let before = self.current;
                let body_id = self.fresh_block("dowhile.body");
                self.link(before, body_id);
                self.current = body_id;
                self.terminated = false;
                self.walk_block(*body);
                let body_end = if self.terminated { None } else { Some(self.current) };
                let exit = self.fresh_block("dowhile.exit");
                if let Some(end) = body_end {
                    self.link(end, body_id);
                    self.link(end, exit);
                }
                self.current = exit;
                self.terminated = false;
            }
            Stmt::Switch { id, cases, .. } => {
                self.append_statement(*id);
                let before = self.current;
                let merge = self.fresh_block("switch.merge");
                for case in cases {
                    let case_id = self.fresh_block("switch.case");
                    self.link(before, case_id);
                    self.current = case_id;
                    self.terminated = false;
                    self.walk_block(case.body);
                    if !self.terminated {
                        self.link(self.current, merge);
                    }
                }
                self.current = merge;
                self.terminated = false;
            }
            Stmt::Match { id, arms, .. } => {
                self.append_statement(*id);
                let before = self.current;
                let merge = self.fresh_block("match.merge");
                for arm in arms {
                    let arm_id = self.fresh_block("match.arm");
                    self.link(before, arm_id);
                    self.current = arm_id;
                    self.terminated = false;
                    self.walk_block(arm.body);
                    if !self.terminated {
                        self.link(self.current, merge);
                    }
                }
                self.current = merge;
                self.terminated = false;
            }
        }
    }

    pub fn finish(self) -> Cfg {
        Cfg { blocks: self.blocks, entry: 0 }
    }
}

impl Default for CfgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_cfg(body: sfac_ast::Block<'_>) -> Cfg {
    let mut builder = CfgBuilder::new();
    builder.walk_block(body);
    builder.finish()
}
