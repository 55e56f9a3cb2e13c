//! Generic AST traversal (`spec.md` §4.1 "Walker Infrastructure").
//!
//! Three flavors share one traversal core: [`Walker`] (side-effecting, with
//! skip/stop control and O(1) ancestor access), [`Transformer`] (node
//! replacing, structural-sharing by default), and the
//! [`NodeFinder`]/[`NodeCounter`] accumulators built on top of `Walker`.
//! [`ContextWalker`] layers scope-kind tracking on the same core.
//!
//! Every concrete AST kind dispatches through one `match` per walker instead
//! of a virtual `accept` method, per the tagged-variant convention.

use crate::ast::{Block, Decl, Expr, MatchArm, Program, Stmt, SwitchCase};
use sfac_base::Arena;
use std::collections::HashMap;

/// Signal returned from a visitor's enter hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Recurse into this node's children as usual.
    Continue,
    /// Do not recurse into this node's children; siblings still walk.
    Skip,
    /// Abort the remainder of the traversal immediately.
    Stop,
}

/// A borrowed reference to any node kind, used for ancestor queries and for
/// the generic [`NodeFinder`]/[`NodeCounter`] accumulators.
#[derive(Debug, Clone, Copy)]
pub enum AnyNode<'a> {
    Program(&'a Program<'a>),
    Decl(&'a Decl<'a>),
    Stmt(&'a Stmt<'a>),
    Expr(&'a Expr<'a>),
}

impl<'a> AnyNode<'a> {
    /// Node kind name for histograms and diagnostics, one level more specific
    /// than the outer variant (e.g. `"If"` rather than `"Stmt"`).
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnyNode::Program(_) => "Program",
            AnyNode::Decl(d) => match d {
                Decl::Function(_) => "FunctionDecl",
                Decl::Variable(_) => "VariableDecl",
                Decl::Type(_) => "TypeDecl",
                Decl::Enum(_) => "EnumDecl",
                Decl::Import(_) => "ImportDecl",
                Decl::Export(_) => "ExportDecl",
                Decl::MapSimple(_) => "MapSimpleDecl",
                Decl::MapRange(_) => "MapRangeDecl",
                Decl::MapExplicitStruct(_) => "MapExplicitStructDecl",
                Decl::MapSequentialStruct(_) => "MapSequentialStructDecl",
            },
            AnyNode::Stmt(s) => match s {
                Stmt::Return { .. } => "ReturnStatement",
                Stmt::If { .. } => "IfStatement",
                Stmt::While { .. } => "WhileStatement",
                Stmt::For { .. } => "ForStatement",
                Stmt::DoWhile { .. } => "DoWhileStatement",
                Stmt::Switch { .. } => "SwitchStatement",
                Stmt::Match { .. } => "MatchStatement",
                Stmt::Break { .. } => "BreakStatement",
                Stmt::Continue { .. } => "ContinueStatement",
                Stmt::Expression { .. } => "ExpressionStatement",
                Stmt::Block { .. } => "BlockStatement",
                Stmt::VariableDecl(_) => "VariableDecl",
            },
            AnyNode::Expr(e) => match e {
                Expr::Literal { .. } => "Literal",
                Expr::Identifier { .. } => "Identifier",
                Expr::Binary { .. } => "Binary",
                Expr::Unary { .. } => "Unary",
                Expr::Ternary { .. } => "Ternary",
                Expr::Call { .. } => "Call",
                Expr::Index { .. } => "Index",
                Expr::Member { .. } => "Member",
                Expr::Assignment { .. } => "Assignment",
                Expr::ArrayLiteral { .. } => "ArrayLiteral",
            },
        }
    }
}

/// Per-node-kind enter/exit hooks. Every hook defaults to a no-op that
/// continues traversal; override only the ones a given walker cares about.
/// Exit hooks run even after `Skip`/`Stop`, so a visitor that acquires a
/// resource on enter (e.g. [`ContextWalker`] pushing a context) can release
/// it unconditionally.
pub trait Visitor<'a> {
    fn enter_program(&mut self, _node: &'a Program<'a>) -> WalkControl {
        WalkControl::Continue
    }
    fn exit_program(&mut self, _node: &'a Program<'a>) {}

    fn enter_decl(&mut self, _node: &'a Decl<'a>) -> WalkControl {
        WalkControl::Continue
    }
    fn exit_decl(&mut self, _node: &'a Decl<'a>) {}

    fn enter_stmt(&mut self, _node: &'a Stmt<'a>) -> WalkControl {
        WalkControl::Continue
    }
    fn exit_stmt(&mut self, _node: &'a Stmt<'a>) {}

    fn enter_expr(&mut self, _node: &'a Expr<'a>) -> WalkControl {
        WalkControl::Continue
    }
    fn exit_expr(&mut self, _node: &'a Expr<'a>) {}
}

/// Drives a [`Visitor`] over an AST, tracking a parent path for O(1)
/// ancestor access. Every [`Walker::walk`] call resets traversal state.
pub struct Walker<'a, V> {
    pub visitor: V,
    path: Vec<AnyNode<'a>>,
    stopped: bool,
}

impl<'a, V: Visitor<'a>> Walker<'a, V> {
    pub fn new(visitor: V) -> Self {
        Walker { visitor, path: Vec::new(), stopped: false }
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    pub fn walk(&mut self, program: &'a Program<'a>) {
        self.path.clear();
        self.stopped = false;
        self.walk_program(program);
        debug_assert!(self.path.is_empty(), "context stack must be empty after a top-level walk");
    }

    /// `ancestor(0)` is the immediate parent; `None` past the root.
    pub fn ancestor(&self, level: usize) -> Option<AnyNode<'a>> {
        let len = self.path.len();
        if level < len {
            Some(self.path[len - 1 - level])
        } else {
            None
        }
    }

    fn walk_program(&mut self, node: &'a Program<'a>) {
        if self.stopped {
            return;
        }
        let ctrl = self.visitor.enter_program(node);
        self.path.push(AnyNode::Program(node));
        if ctrl == WalkControl::Continue {
            for decl in node.declarations {
                if self.stopped {
                    break;
                }
                self.walk_decl(decl);
            }
        } else if ctrl == WalkControl::Stop {
            self.stopped = true;
        }
        self.visitor.exit_program(node);
        self.path.pop();
    }

    fn walk_decl(&mut self, node: &'a Decl<'a>) {
        if self.stopped {
            return;
        }
        let ctrl = self.visitor.enter_decl(node);
        self.path.push(AnyNode::Decl(node));
        if ctrl == WalkControl::Continue {
            match node {
                Decl::Function(f) => {
                    if let Some(body) = f.body {
                        self.walk_block(body);
                    }
                }
                Decl::Variable(v) => {
                    if let Some(init) = v.initializer {
                        self.walk_expr(init);
                    }
                }
                Decl::Export(e) => self.walk_decl(e.inner),
                Decl::Type(_)
                | Decl::Enum(_)
                | Decl::Import(_)
                | Decl::MapSimple(_)
                | Decl::MapRange(_)
                | Decl::MapExplicitStruct(_)
                | Decl::MapSequentialStruct(_) => {}
            }
        } else if ctrl == WalkControl::Stop {
            self.stopped = true;
        }
        self.visitor.exit_decl(node);
        self.path.pop();
    }

    fn walk_block(&mut self, block: Block<'a>) {
        for stmt in block {
            if self.stopped {
                break;
            }
            self.walk_stmt(stmt);
        }
    }

    fn walk_stmt(&mut self, node: &'a Stmt<'a>) {
        if self.stopped {
            return;
        }
        let ctrl = self.visitor.enter_stmt(node);
        self.path.push(AnyNode::Stmt(node));
        if ctrl == WalkControl::Continue {
            match node {
                Stmt::Return { value, .. } => {
                    if let Some(v) = value {
                        self.walk_expr(v);
                    }
                }
                Stmt::If { condition, then_branch, else_branch, .. } => {
                    self.walk_expr(condition);
                    self.walk_block(then_branch);
                    if let Some(eb) = else_branch {
                        self.walk_block(eb);
                    }
                }
                Stmt::While { condition, body, .. } => {
                    self.walk_expr(condition);
                    self.walk_block(body);
                }
                Stmt::For { start, end, step, body, .. } => {
                    self.walk_expr(start);
                    self.walk_expr(end);
                    if let Some(s) = step {
                        self.walk_expr(s);
                    }
                    self.walk_block(body);
                }
                Stmt::DoWhile { body, condition, .. } => {
                    self.walk_block(body);
                    self.walk_expr(condition);
                }
                Stmt::Switch { discriminant, cases, .. } => {
                    self.walk_expr(discriminant);
                    for case in cases {
                        self.walk_switch_case(case);
                    }
                }
                Stmt::Match { discriminant, arms, .. } => {
                    self.walk_expr(discriminant);
                    for arm in arms {
                        self.walk_match_arm(arm);
                    }
                }
                Stmt::Break { .. } | Stmt::Continue { .. } => {}
                Stmt::Expression { expr, .. } => self.walk_expr(expr),
                Stmt::Block { body, .. } => self.walk_block(body),
                Stmt::VariableDecl(v) => {
                    if let Some(init) = v.initializer {
                        self.walk_expr(init);
                    }
                }
            }
        } else if ctrl == WalkControl::Stop {
            self.stopped = true;
        }
        self.visitor.exit_stmt(node);
        self.path.pop();
    }

    fn walk_switch_case(&mut self, case: &SwitchCase<'a>) {
        if let Some(value) = case.value {
            self.walk_expr(value);
        }
        self.walk_block(case.body);
    }

    fn walk_match_arm(&mut self, arm: &MatchArm<'a>) {
        if let Some(pattern) = arm.pattern {
            self.walk_expr(pattern);
        }
        self.walk_block(arm.body);
    }

    fn walk_expr(&mut self, node: &'a Expr<'a>) {
        if self.stopped {
            return;
        }
        let ctrl = self.visitor.enter_expr(node);
        self.path.push(AnyNode::Expr(node));
        if ctrl == WalkControl::Continue {
            match node {
                Expr::Literal { .. } | Expr::Identifier { .. } => {}
                Expr::Binary { left, right, .. } => {
                    self.walk_expr(left);
                    self.walk_expr(right);
                }
                Expr::Unary { operand, .. } => self.walk_expr(operand),
                Expr::Ternary { condition, then_expr, else_expr, .. } => {
                    self.walk_expr(condition);
                    self.walk_expr(then_expr);
                    self.walk_expr(else_expr);
                }
                Expr::Call { args, .. } => {
                    for arg in *args {
                        self.walk_expr(arg);
                    }
                }
                Expr::Index { object, index, .. } => {
                    self.walk_expr(object);
                    self.walk_expr(index);
                }
                Expr::Member { object, .. } => self.walk_expr(object),
                Expr::Assignment { target, value, .. } => {
                    self.walk_expr(target);
                    self.walk_expr(value);
                }
                Expr::ArrayLiteral { elements, .. } => {
                    for el in *elements {
                        self.walk_expr(el);
                    }
                }
            }
        } else if ctrl == WalkControl::Stop {
            self.stopped = true;
        }
        self.visitor.exit_expr(node);
        self.path.pop();
    }
}

// ---------------------------------------------------------------------
// Transformer
// ---------------------------------------------------------------------

/// The arenas a [`Transformer`] allocates fresh nodes from when a rule
/// changes a subtree. Kept as one struct per node-kind arena, mirroring how
/// the parser itself allocates distinct arenas per node kind.
pub struct Arenas<'a> {
    exprs: Arena<Expr<'a>>,
    stmts: Arena<Stmt<'a>>,
    stmt_slices: Arena<&'a Stmt<'a>>,
    expr_slices: Arena<&'a Expr<'a>>,
}

impl<'a> Arenas<'a> {
    pub fn new() -> Self {
        Arenas {
            exprs: Arena::new(),
            stmts: Arena::new(),
            stmt_slices: Arena::new(),
            expr_slices: Arena::new(),
        }
    }

    pub fn alloc_expr(&self, expr: Expr<'a>) -> &Expr<'a> {
        self.exprs.alloc(expr)
    }

    pub fn alloc_stmt(&self, stmt: Stmt<'a>) -> &Stmt<'a> {
        self.stmts.alloc(stmt)
    }

    pub fn alloc_block(&self, stmts: Vec<&'a Stmt<'a>>) -> &[&'a Stmt<'a>] {
        self.stmt_slices.alloc_slice(stmts)
    }

    pub fn alloc_exprs(&self, exprs: Vec<&'a Expr<'a>>) -> &[&'a Expr<'a>] {
        self.expr_slices.alloc_slice(exprs)
    }
}

impl<'a> Default for Arenas<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Node-replacing traversal. The default for every variant is identity for
/// leaves and a shallow rebuild for composites: transform every child, then
/// return the original node if every child came back reference-equal,
/// otherwise allocate a fresh node from `arena` with the transformed
/// children. This keeps transformations pure and preserves structural
/// sharing when a rule does not match.
pub trait Transformer<'a> {
    fn transform_expr(&mut self, arena: &Arenas<'a>, expr: &'a Expr<'a>) -> &'a Expr<'a> {
        transform_expr_default(self, arena, expr)
    }

    fn transform_stmt(&mut self, arena: &Arenas<'a>, stmt: &'a Stmt<'a>) -> &'a Stmt<'a> {
        transform_stmt_default(self, arena, stmt)
    }
}

fn transform_block<'a, T: Transformer<'a> + ?Sized>(
    t: &mut T,
    arena: &Arenas<'a>,
    block: Block<'a>,
) -> Block<'a> {
    let mut changed = false;
    let mut out = Vec::with_capacity(block.len());
    for stmt in block {
        let new_stmt = t.transform_stmt(arena, stmt);
        if !std::ptr::eq(new_stmt, *stmt) {
            changed = true;
        }
        out.push(new_stmt);
    }
    if changed {
        arena.alloc_block(out)
    } else {
        block
    }
}

/// Default shallow-rebuild behavior for expressions; exposed as a free
/// function so an overriding `transform_expr` can fall back to it for the
/// variants it does not special-case.
pub fn transform_expr_default<'a, T: Transformer<'a> + ?Sized>(
    t: &mut T,
    arena: &Arenas<'a>,
    expr: &'a Expr<'a>,
) -> &'a Expr<'a> {
    match expr {
        Expr::Literal { .. } | Expr::Identifier { .. } => expr,
        Expr::Binary { id, span, op, left, right } => {
            let new_left = t.transform_expr(arena, left);
            let new_right = t.transform_expr(arena, right);
            if std::ptr::eq(new_left, *left) && std::ptr::eq(new_right, *right) {
                expr
            } else {
                arena.alloc_expr(Expr::Binary {
                    id: *id,
                    span: *span,
                    op: *op,
                    left: new_left,
                    right: new_right,
                })
            }
        }
        Expr::Unary { id, span, op, operand } => {
            let new_operand = t.transform_expr(arena, operand);
            if std::ptr::eq(new_operand, *operand) {
                expr
            } else {
                arena.alloc_expr(Expr::Unary { id: *id, span: *span, op: *op, operand: new_operand })
            }
        }
        Expr::Ternary { id, span, condition, then_expr, else_expr } => {
            let new_cond = t.transform_expr(arena, condition);
            let new_then = t.transform_expr(arena, then_expr);
            let new_else = t.transform_expr(arena, else_expr);
            if std::ptr::eq(new_cond, *condition)
                && std::ptr::eq(new_then, *then_expr)
                && std::ptr::eq(new_else, *else_expr)
            {
                expr
            } else {
                arena.alloc_expr(Expr::Ternary {
                    id: *id,
                    span: *span,
                    condition: new_cond,
                    then_expr: new_then,
                    else_expr: new_else,
                })
            }
        }
        Expr::Call { id, span, callee, args } => {
            let mut changed = false;
            let mut new_args = Vec::with_capacity(args.len());
            for a in *args {
                let new_a = t.transform_expr(arena, a);
                if !std::ptr::eq(new_a, *a) {
                    changed = true;
                }
                new_args.push(new_a);
            }
            if changed {
                arena.alloc_expr(Expr::Call {
                    id: *id,
                    span: *span,
                    callee: *callee,
                    args: arena.alloc_exprs(new_args),
                })
            } else {
                expr
            }
        }
        Expr::Index { id, span, object, index } => {
            let new_object = t.transform_expr(arena, object);
            let new_index = t.transform_expr(arena, index);
            if std::ptr::eq(new_object, *object) && std::ptr::eq(new_index, *index) {
                expr
            } else {
                arena.alloc_expr(Expr::Index {
                    id: *id,
                    span: *span,
                    object: new_object,
                    index: new_index,
                })
            }
        }
        Expr::Member { id, span, object, member } => {
            let new_object = t.transform_expr(arena, object);
            if std::ptr::eq(new_object, *object) {
                expr
            } else {
                arena.alloc_expr(Expr::Member { id: *id, span: *span, object: new_object, member: *member })
            }
        }
        Expr::Assignment { id, span, target, value } => {
            let new_target = t.transform_expr(arena, target);
            let new_value = t.transform_expr(arena, value);
            if std::ptr::eq(new_target, *target) && std::ptr::eq(new_value, *value) {
                expr
            } else {
                arena.alloc_expr(Expr::Assignment {
                    id: *id,
                    span: *span,
                    target: new_target,
                    value: new_value,
                })
            }
        }
        Expr::ArrayLiteral { id, span, elements } => {
            let mut changed = false;
            let mut new_elements = Vec::with_capacity(elements.len());
            for e in *elements {
                let new_e = t.transform_expr(arena, e);
                if !std::ptr::eq(new_e, *e) {
                    changed = true;
                }
                new_elements.push(new_e);
            }
            if changed {
                arena.alloc_expr(Expr::ArrayLiteral {
                    id: *id,
                    span: *span,
                    elements: arena.alloc_exprs(new_elements),
                })
            } else {
                expr
            }
        }
    }
}

/// Default shallow-rebuild behavior for statements.
pub fn transform_stmt_default<'a, T: Transformer<'a> + ?Sized>(
    t: &mut T,
    arena: &Arenas<'a>,
    stmt: &'a Stmt<'a>,
) -> &'a Stmt<'a> {
    match stmt {
        Stmt::Return { id, span, value } => {
            let new_value = value.map(|v| t.transform_expr(arena, v));
            let unchanged = match (new_value, value) {
                (Some(a), Some(b)) => std::ptr::eq(a, *b),
                (None, None) => true,
                _ => false,
            };
            if unchanged {
                stmt
            } else {
                arena.alloc_stmt(Stmt::Return { id: *id, span: *span, value: new_value })
            }
        }
        Stmt::If { id, span, condition, then_branch, else_branch } => {
            let new_cond = t.transform_expr(arena, condition);
            let new_then = transform_block(t, arena, then_branch);
            let new_else = else_branch.map(|eb| transform_block(t, arena, eb));
            let unchanged = std::ptr::eq(new_cond, *condition)
                && std::ptr::eq(new_then, *then_branch)
                && match (new_else, else_branch) {
                    (Some(a), Some(b)) => std::ptr::eq(a, *b),
                    (None, None) => true,
                    _ => false,
                };
            if unchanged {
                stmt
            } else {
                arena.alloc_stmt(Stmt::If {
                    id: *id,
                    span: *span,
                    condition: new_cond,
                    then_branch: new_then,
                    else_branch: new_else,
                })
            }
        }
        Stmt::While { id, span, condition, body } => {
            let new_cond = t.transform_expr(arena, condition);
            let new_body = transform_block(t, arena, body);
            if std::ptr::eq(new_cond, *condition) && std::ptr::eq(new_body, *body) {
                stmt
            } else {
                arena.alloc_stmt(Stmt::While { id: *id, span: *span, condition: new_cond, body: new_body })
            }
        }
        Stmt::For { id, span, variable, start, end, direction, step, body } => {
            let new_start = t.transform_expr(arena, start);
            let new_end = t.transform_expr(arena, end);
            let new_step = step.map(|s| t.transform_expr(arena, s));
            let new_body = transform_block(t, arena, body);
            let step_unchanged = match (new_step, step) {
                (Some(a), Some(b)) => std::ptr::eq(a, *b),
                (None, None) => true,
                _ => false,
            };
            if std::ptr::eq(new_start, *start)
                && std::ptr::eq(new_end, *end)
                && step_unchanged
                && std::ptr::eq(new_body, *body)
            {
                stmt
            } else {
                arena.alloc_stmt(Stmt::For {
                    id: *id,
                    span: *span,
                    variable: *variable,
                    start: new_start,
                    end: new_end,
                    direction: *direction,
                    step: new_step,
                    body: new_body,
                })
            }
        }
        Stmt::DoWhile { id, span, body, condition } => {
            let new_body = transform_block(t, arena, body);
            let new_cond = t.transform_expr(arena, condition);
            if std::ptr::eq(new_body, *body) && std::ptr::eq(new_cond, *condition) {
                stmt
            } else {
                arena.alloc_stmt(Stmt::DoWhile { id: *id, span: *span, body: new_body, condition: new_cond })
            }
        }
        Stmt::Expression { id, span, expr } => {
            let new_expr = t.transform_expr(arena, expr);
            if std::ptr::eq(new_expr, *expr) {
                stmt
            } else {
                arena.alloc_stmt(Stmt::Expression { id: *id, span: *span, expr: new_expr })
            }
        }
        Stmt::Block { id, span, body } => {
            let new_body = transform_block(t, arena, body);
            if std::ptr::eq(new_body, *body) {
                stmt
            } else {
                arena.alloc_stmt(Stmt::Block { id: *id, span: *span, body: new_body })
            }
        }
        // Switch/Match/Break/Continue/VariableDecl carry no directly nested
        // expression child this rebuild path needs to thread structural
        // sharing through today; identity until a rule matches them.
        Stmt::Switch { .. }
        | Stmt::Match { .. }
        | Stmt::Break { .. }
        | Stmt::Continue { .. }
        | Stmt::VariableDecl(_) => stmt,
    }
}

// ---------------------------------------------------------------------
// Collector / Finder / Counter
// ---------------------------------------------------------------------

struct FinderVisitor<'a, F> {
    predicate: F,
    matches: Vec<AnyNode<'a>>,
}

impl<'a, F: FnMut(AnyNode<'a>) -> bool> Visitor<'a> for FinderVisitor<'a, F> {
    fn enter_program(&mut self, node: &'a Program<'a>) -> WalkControl {
        if (self.predicate)(AnyNode::Program(node)) {
            self.matches.push(AnyNode::Program(node));
        }
        WalkControl::Continue
    }

    fn enter_decl(&mut self, node: &'a Decl<'a>) -> WalkControl {
        if (self.predicate)(AnyNode::Decl(node)) {
            self.matches.push(AnyNode::Decl(node));
        }
        WalkControl::Continue
    }

    fn enter_stmt(&mut self, node: &'a Stmt<'a>) -> WalkControl {
        if (self.predicate)(AnyNode::Stmt(node)) {
            self.matches.push(AnyNode::Stmt(node));
        }
        WalkControl::Continue
    }

    fn enter_expr(&mut self, node: &'a Expr<'a>) -> WalkControl {
        if (self.predicate)(AnyNode::Expr(node)) {
            self.matches.push(AnyNode::Expr(node));
        }
        WalkControl::Continue
    }
}

/// `NodeFinder.find(root, predicate)`: every node across all four kinds for
/// which `predicate` returns true, in traversal order.
pub struct NodeFinder;

impl NodeFinder {
    pub fn find<'a>(
        program: &'a Program<'a>,
        predicate: impl FnMut(AnyNode<'a>) -> bool,
    ) -> Vec<AnyNode<'a>> {
        let mut walker = Walker::new(FinderVisitor { predicate, matches: Vec::new() });
        walker.walk(program);
        walker.into_visitor().matches
    }
}

struct CounterVisitor {
    counts: HashMap<&'static str, usize>,
}

impl<'a> Visitor<'a> for CounterVisitor {
    fn enter_program(&mut self, node: &'a Program<'a>) -> WalkControl {
        *self.counts.entry(AnyNode::Program(node).kind_name()).or_insert(0) += 1;
        WalkControl::Continue
    }

    fn enter_decl(&mut self, node: &'a Decl<'a>) -> WalkControl {
        *self.counts.entry(AnyNode::Decl(node).kind_name()).or_insert(0) += 1;
        WalkControl::Continue
    }

    fn enter_stmt(&mut self, node: &'a Stmt<'a>) -> WalkControl {
        *self.counts.entry(AnyNode::Stmt(node).kind_name()).or_insert(0) += 1;
        WalkControl::Continue
    }

    fn enter_expr(&mut self, node: &'a Expr<'a>) -> WalkControl {
        *self.counts.entry(AnyNode::Expr(node).kind_name()).or_insert(0) += 1;
        WalkControl::Continue
    }
}

/// `NodeCounter`: a histogram of node counts by kind name.
pub struct NodeCounter;

impl NodeCounter {
    pub fn count<'a>(program: &'a Program<'a>) -> HashMap<&'static str, usize> {
        let mut walker = Walker::new(CounterVisitor { counts: HashMap::new() });
        walker.walk(program);
        walker.into_visitor().counts
    }
}

// ---------------------------------------------------------------------
// ContextWalker
// ---------------------------------------------------------------------

/// Scope kinds a [`ContextWalker`] tracks, per `spec.md` §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Program,
    Function,
    /// Covers `while`, `for`, and `match` — anything `break` can exit.
    Loop,
    Block,
    MatchCase,
}

/// A typed value for a context's free-form metadata slot. Kept generic
/// (rather than one field per producer) since context metadata is
/// pass-through data attached by whichever analysis pass is currently
/// running, not a fixed set of known keys.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

struct ContextFrame<'a> {
    kind: ContextKind,
    node: AnyNode<'a>,
    metadata: HashMap<String, MetadataValue>,
}

/// The stack of active contexts, queried by passes that need to know "am I
/// inside a loop" or "how many functions deep am I" during a walk.
pub struct ContextStack<'a> {
    frames: Vec<ContextFrame<'a>>,
}

impl<'a> ContextStack<'a> {
    fn new() -> Self {
        ContextStack { frames: Vec::new() }
    }

    pub fn current(&self) -> Option<(ContextKind, AnyNode<'a>)> {
        self.frames.last().map(|f| (f.kind, f.node))
    }

    pub fn parent(&self) -> Option<(ContextKind, AnyNode<'a>)> {
        if self.frames.len() < 2 {
            return None;
        }
        let f = &self.frames[self.frames.len() - 2];
        Some((f.kind, f.node))
    }

    pub fn ancestor(&self, n: usize) -> Option<(ContextKind, AnyNode<'a>)> {
        let len = self.frames.len();
        if n < len {
            let f = &self.frames[len - 1 - n];
            Some((f.kind, f.node))
        } else {
            None
        }
    }

    pub fn find_context(&self, kind: ContextKind) -> Option<(ContextKind, AnyNode<'a>)> {
        self.frames.iter().rev().find(|f| f.kind == kind).map(|f| (f.kind, f.node))
    }

    pub fn is_in_function(&self) -> bool {
        self.find_context(ContextKind::Function).is_some()
    }

    pub fn is_in_loop(&self) -> bool {
        self.find_context(ContextKind::Loop).is_some()
    }

    /// `break`/`continue` validity: true only if a `Loop` context is found
    /// before any enclosing `Function` boundary is crossed.
    pub fn is_in_loop_without_function_boundary(&self) -> bool {
        for frame in self.frames.iter().rev() {
            match frame.kind {
                ContextKind::Loop => return true,
                ContextKind::Function => return false,
                _ => {}
            }
        }
        false
    }

    pub fn nesting_level(&self, kind: ContextKind) -> usize {
        self.frames.iter().filter(|f| f.kind == kind).count()
    }

    pub fn set_metadata(&mut self, key: &str, value: MetadataValue) {
        if let Some(frame) = self.frames.last_mut() {
            frame.metadata.insert(key.to_string(), value);
        }
    }

    pub fn get_metadata(&self, key: &str) -> Option<&MetadataValue> {
        self.frames.last().and_then(|f| f.metadata.get(key))
    }
}

/// The callback surface for a [`ContextWalker`]: receives the live
/// [`ContextStack`] alongside each node, scoped-acquisition style.
pub trait ContextVisitor<'a> {
    fn on_enter(&mut self, _ctx: &ContextStack<'a>, _node: AnyNode<'a>) -> WalkControl {
        WalkControl::Continue
    }
    fn on_exit(&mut self, _ctx: &ContextStack<'a>, _node: AnyNode<'a>) {}
}

/// Adapts a [`ContextVisitor`] into a [`Visitor`], automatically pushing and
/// popping [`ContextKind`] frames around the node kinds that introduce a new
/// scope: `Program`, `FunctionDecl`, `While`/`For`/`Match` (all `Loop`),
/// match-case branches (`MatchCase`), and `Block`.
pub struct ContextWalker<'a, V> {
    stack: ContextStack<'a>,
    inner: V,
    _marker: std::marker::PhantomData<&'a ()>,
}

impl<'a, V: ContextVisitor<'a>> ContextWalker<'a, V> {
    pub fn new(inner: V) -> Self {
        ContextWalker { stack: ContextStack::new(), inner, _marker: std::marker::PhantomData }
    }

    pub fn into_inner(self) -> V {
        self.inner
    }

    fn push(&mut self, kind: ContextKind, node: AnyNode<'a>) {
        self.stack.frames.push(ContextFrame { kind, node, metadata: HashMap::new() });
    }

    fn pop(&mut self) {
        self.stack.frames.pop();
    }
}

impl<'a, V: ContextVisitor<'a>> Visitor<'a> for ContextWalker<'a, V> {
    fn enter_program(&mut self, node: &'a Program<'a>) -> WalkControl {
        self.push(ContextKind::Program, AnyNode::Program(node));
        self.inner.on_enter(&self.stack, AnyNode::Program(node))
    }

    fn exit_program(&mut self, node: &'a Program<'a>) {
        self.inner.on_exit(&self.stack, AnyNode::Program(node));
        self.pop();
    }

    fn enter_decl(&mut self, node: &'a Decl<'a>) -> WalkControl {
        if let Decl::Function(_) = node {
            self.push(ContextKind::Function, AnyNode::Decl(node));
        }
        self.inner.on_enter(&self.stack, AnyNode::Decl(node))
    }

    fn exit_decl(&mut self, node: &'a Decl<'a>) {
        self.inner.on_exit(&self.stack, AnyNode::Decl(node));
        if let Decl::Function(_) = node {
            self.pop();
        }
    }

    fn enter_stmt(&mut self, node: &'a Stmt<'a>) -> WalkControl {
        match node {
            Stmt::While { .. } | Stmt::For { .. } | Stmt::Match { .. } => {
                self.push(ContextKind::Loop, AnyNode::Stmt(node));
            }
            Stmt::Block { .. } => {
                self.push(ContextKind::Block, AnyNode::Stmt(node));
            }
            _ => {}
        }
        self.inner.on_enter(&self.stack, AnyNode::Stmt(node))
    }

    fn exit_stmt(&mut self, node: &'a Stmt<'a>) {
        self.inner.on_exit(&self.stack, AnyNode::Stmt(node));
        match node {
            Stmt::While { .. } | Stmt::For { .. } | Stmt::Match { .. } | Stmt::Block { .. } => {
                self.pop();
            }
            _ => {}
        }
    }

    fn enter_expr(&mut self, node: &'a Expr<'a>) -> WalkControl {
        self.inner.on_enter(&self.stack, AnyNode::Expr(node))
    }

    fn exit_expr(&mut self, node: &'a Expr<'a>) {
        self.inner.on_exit(&self.stack, AnyNode::Expr(node));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionDecl, Literal};
    use crate::node_id::NodeIdGen;
    use sfac_base::{Span, Symbol};

    fn span() -> Span {
        Span::new(0, 1)
    }

    fn sample_program<'a>(
        gen: &NodeIdGen,
        decls: &'a [&'a Decl<'a>],
        module: &'a crate::ast::ModuleDecl,
    ) -> Program<'a> {
        Program { id: gen.next_id(), span: span(), module, declarations: decls }
    }

    #[test]
    fn walker_visits_every_node_once() {
        let gen = NodeIdGen::new();
        let module = crate::ast::ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let lit = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Byte(5) };
        let var = crate::ast::VariableDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            type_annotation: None,
            initializer: Some(&lit),
            is_const: false,
            is_exported: false,
            storage: crate::ast::StorageClass::Ram,
        };
        let decl = Decl::Variable(var);
        let decls: &[&Decl] = &[&decl];
        let program = sample_program(&gen, decls, &module);

        let counts = NodeCounter::count(&program);
        assert_eq!(counts.get("VariableDecl"), Some(&1));
        assert_eq!(counts.get("Literal"), Some(&1));
    }

    #[test]
    fn node_finder_matches_predicate() {
        let gen = NodeIdGen::new();
        let module = crate::ast::ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let lit_a = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Byte(1) };
        let var = crate::ast::VariableDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            type_annotation: None,
            initializer: Some(&lit_a),
            is_const: false,
            is_exported: false,
            storage: crate::ast::StorageClass::Ram,
        };
        let decl = Decl::Variable(var);
        let decls: &[&Decl] = &[&decl];
        let program = sample_program(&gen, decls, &module);

        let matches = NodeFinder::find(&program, |n| matches!(n, AnyNode::Expr(Expr::Literal { .. })));
        assert_eq!(matches.len(), 1);
    }

    struct BreakDepthProbe {
        found_in_loop_without_function: Vec<bool>,
    }

    impl<'a> ContextVisitor<'a> for BreakDepthProbe {
        fn on_enter(&mut self, ctx: &ContextStack<'a>, node: AnyNode<'a>) -> WalkControl {
            if let AnyNode::Stmt(Stmt::Break { .. }) = node {
                self.found_in_loop_without_function.push(ctx.is_in_loop_without_function_boundary());
            }
            WalkControl::Continue
        }
    }

    #[test]
    fn context_walker_tracks_loop_without_function_boundary() {
        let gen = NodeIdGen::new();
        let module = crate::ast::ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let brk = Stmt::Break { id: gen.next_id(), span: span() };
        let body: &[&Stmt] = &[&brk];
        let cond = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Bool(true) };
        let while_stmt = Stmt::While { id: gen.next_id(), span: span(), condition: &cond, body };
        let while_body: &[&Stmt] = &[&while_stmt];
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: crate::ast::TypeExpr::Named(Symbol::EMPTY),
            body: Some(while_body),
            is_callback: false,
            is_exported: false,
        };
        let decl = Decl::Function(func);
        let decls: &[&Decl] = &[&decl];
        let program = sample_program(&gen, decls, &module);

        let mut walker =
            Walker::new(ContextWalker::new(BreakDepthProbe { found_in_loop_without_function: Vec::new() }));
        walker.walk(&program);
        let probe = walker.into_visitor().into_inner();
        assert_eq!(probe.found_in_loop_without_function, vec![true]);
    }

    #[test]
    fn context_walker_module_top_break_is_not_in_loop() {
        let gen = NodeIdGen::new();
        let module = crate::ast::ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        // A break statement sitting directly under an `If` at module scope,
        // outside any function or loop — the `spec.md` §9 GAP case.
        let brk = Stmt::Break { id: gen.next_id(), span: span() };
        let then_block: &[&Stmt] = &[&brk];
        let cond = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Bool(true) };
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: crate::ast::TypeExpr::Named(Symbol::EMPTY),
            body: Some(&[]),
            is_callback: false,
            is_exported: false,
        };
        let _ = (&func, &cond, then_block);
        let if_stmt = Stmt::If {
            id: gen.next_id(),
            span: span(),
            condition: &cond,
            then_branch: then_block,
            else_branch: None,
        };
        let top_level_body: &[&Stmt] = &[&if_stmt];
        let module_func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: crate::ast::TypeExpr::Named(Symbol::EMPTY),
            body: Some(top_level_body),
            is_callback: false,
            is_exported: false,
        };
        let decl = Decl::Function(module_func);
        let decls: &[&Decl] = &[&decl];
        let program = sample_program(&gen, decls, &module);

        let mut walker =
            Walker::new(ContextWalker::new(BreakDepthProbe { found_in_loop_without_function: Vec::new() }));
        walker.walk(&program);
        let probe = walker.into_visitor().into_inner();
        assert_eq!(probe.found_in_loop_without_function, vec![false]);
    }

    struct NoopVisitor;
    impl<'a> Visitor<'a> for NoopVisitor {}

    #[test]
    fn repeated_walks_reset_traversal_state() {
        // Idempotence contract from §4.1: every `walk()` call resets state,
        // and the ancestor path is empty again once the walk returns.
        let gen = NodeIdGen::new();
        let module = crate::ast::ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let decls: &[&Decl] = &[];
        let program = sample_program(&gen, decls, &module);
        let mut walker = Walker::new(NoopVisitor);
        walker.walk(&program);
        walker.walk(&program);
        assert!(walker.ancestor(0).is_none());
    }
}
