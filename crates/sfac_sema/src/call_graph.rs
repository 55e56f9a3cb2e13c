//! Pass 6 — Call Graph construction and recursion detection (`spec.md`
//! §4.3 Pass 6).
//!
//! Static Frame Allocation forbids recursion (every function's locals live
//! at a fixed address, so a function calling itself would clobber its own
//! frame), so this pass is not advisory: any cycle in the call graph,
//! direct or indirect, is an error.

use std::collections::HashMap;

use sfac_ast::{Decl, Expr, Program, Stmt};
use sfac_base::{Diagnostic, DiagnosticDetails, Interner, Symbol};

use crate::codes;
use crate::graph::tarjan_scc;
use crate::location::span_to_location;

/// `callee -> direct callees`, collected from every `Expr::Call` reachable
/// from a function's body.
pub struct CallGraph {
    pub edges: HashMap<Symbol, Vec<Symbol>>,
    pub sccs: Vec<Vec<Symbol>>,
}

impl CallGraph {
    pub fn callees(&self, name: Symbol) -> &[Symbol] {
        self.edges.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn calls(&self, caller: Symbol, callee: Symbol) -> bool {
        self.callees(caller).contains(&callee)
    }
}

pub struct CallGraphResult {
    pub graph: CallGraph,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn run(program: &Program<'_>, interner: &Interner) -> CallGraphResult {
    let mut edges: HashMap<Symbol, Vec<Symbol>> = HashMap::new();
    let mut nodes = Vec::new();
    let mut spans: HashMap<Symbol, sfac_base::Span> = HashMap::new();

    for decl in program.declarations {
        if let Decl::Function(f) = decl {
            nodes.push(f.name);
            spans.insert(f.name, f.span);
            let mut callees = Vec::new();
            if let Some(body) = f.body {
                collect_calls(body, &mut callees);
            }
            edges.insert(f.name, callees);
        }
    }

    let sccs = tarjan_scc(&nodes, |n| edges.get(&n).cloned().unwrap_or_default());

    let mut diagnostics = Vec::new();
    for scc in &sccs {
        if scc.len() > 1 {
            let names: Vec<String> = scc.iter().map(|s| interner.resolve(*s).to_string()).collect();
            let span = spans.get(&scc[0]).copied().unwrap_or_default();
            diagnostics.push(
                Diagnostic::error(
                    codes::INDIRECT_RECURSION_DETECTED,
                    format!("indirect recursion among functions: {}", names.join(", ")),
                    span_to_location(span),
                )
                .with_details(DiagnosticDetails::Cycle(names)),
            );
        } else if let [only] = scc.as_slice() {
            if edges.get(only).is_some_and(|callees| callees.contains(only)) {
                let name = interner.resolve(*only).to_string();
                let span = spans.get(only).copied().unwrap_or_default();
                diagnostics.push(
                    Diagnostic::error(
                        codes::RECURSION_DETECTED,
                        format!("function '{name}' calls itself; Static Frame Allocation forbids recursion"),
                        span_to_location(span),
                    )
                    .with_details(DiagnosticDetails::Cycle(vec![name])),
                );
            }
        }
    }

    CallGraphResult { graph: CallGraph { edges, sccs }, diagnostics }
}

fn collect_calls(body: sfac_ast::Block<'_>, out: &mut Vec<Symbol>) {
    for stmt in body {
        walk_stmt(stmt, out);
    }
}

fn walk_stmt(stmt: &Stmt<'_>, out: &mut Vec<Symbol>) {
    match stmt {
        Stmt::Return { value: Some(v), .. } => walk_expr(v, out),
        Stmt::Return { value: None, .. } => {}
        Stmt::If { condition, then_branch, else_branch, .. } => {
            walk_expr(condition, out);
            collect_calls(then_branch, out);
            if let Some(eb) = else_branch {
                collect_calls(eb, out);
            }
        }
        Stmt::While { condition, body, .. } => {
            walk_expr(condition, out);
            collect_calls(body, out);
        }
        Stmt::For { start, end, step, body, .. } => {
            walk_expr(start, out);
            walk_expr(end, out);
            if let Some(s) = step {
                walk_expr(s, out);
            }
            collect_calls(body, out);
        }
        Stmt::DoWhile { body, condition, .. } => {
            collect_calls(body, out);
            walk_expr(condition, out);
        }
        Stmt::Switch { discriminant, cases, .. } => {
            walk_expr(discriminant, out);
            for case in cases {
                if let Some(v) = case.value {
                    walk_expr(v, out);
                }
                collect_calls(case.body, out);
            }
        }
        Stmt::Match { discriminant, arms, .. } => {
            walk_expr(discriminant, out);
            for arm in arms {
                if let Some(p) = arm.pattern {
                    walk_expr(p, out);
                }
                collect_calls(arm.body, out);
            }
        }
        Stmt::Break { .. } | Stmt::Continue { .. } => {}
        Stmt::Expression { expr, .. } => walk_expr(expr, out),
        Stmt::Block { body, .. } => collect_calls(body, out),
        Stmt::VariableDecl(v) => {
            if let Some(init) = v.initializer {
                walk_expr(init, out);
            }
        }
    }
}

fn walk_expr(expr: &Expr<'_>, out: &mut Vec<Symbol>) {
    match expr {
        Expr::Literal { .. } | Expr::Identifier { .. } => {}
        Expr::Binary { left, right, .. } => {
            walk_expr(left, out);
            walk_expr(right, out);
        }
        Expr::Unary { operand, .. } => walk_expr(operand, out),
        Expr::Ternary { condition, then_expr, else_expr, .. } => {
            walk_expr(condition, out);
            walk_expr(then_expr, out);
            walk_expr(else_expr, out);
        }
        Expr::Call { callee, args, .. } => {
            out.push(*callee);
            for arg in *args {
                walk_expr(arg, out);
            }
        }
        Expr::Index { object, index, .. } => {
            walk_expr(object, out);
            walk_expr(index, out);
        }
        Expr::Member { object, .. } => walk_expr(object, out),
        Expr::Assignment { target, value, .. } => {
            walk_expr(target, out);
            walk_expr(value, out);
        }
        Expr::ArrayLiteral { elements, .. } => {
            for el in *elements {
                walk_expr(el, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfac_ast::{FunctionDecl, Literal, ModuleDecl, NodeIdGen, TypeExpr};
    use sfac_base::{Span, Symbol as Sym};

    fn span() -> Span {
        Span::new(0, 1)
    }

    #[test]
    fn direct_self_call_is_recursion() {
        let gen = NodeIdGen::new();
        let mut interner = Interner::new();
        let name = interner.intern("loop_forever");
        let module = ModuleDecl::new(gen.next_id(), span(), Sym::EMPTY);
        let call_expr = Expr::Call { id: gen.next_id(), span: span(), callee: name, args: &[] };
        let call_stmt = Stmt::Expression { id: gen.next_id(), span: span(), expr: &call_expr };
        let body: &[&Stmt] = &[&call_stmt];
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(body),
            is_callback: false,
            is_exported: false,
        };
        let decl = Decl::Function(func);
        let decls: &[&Decl] = &[&decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program, &interner);
        assert!(result.diagnostics.iter().any(|d| d.code == "RECURSION_DETECTED"));
    }

    #[test]
    fn indirect_cycle_is_detected() {
        let gen = NodeIdGen::new();
        let mut interner = Interner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let module = ModuleDecl::new(gen.next_id(), span(), Sym::EMPTY);

        let call_b = Expr::Call { id: gen.next_id(), span: span(), callee: b, args: &[] };
        let call_b_stmt = Stmt::Expression { id: gen.next_id(), span: span(), expr: &call_b };
        let a_body: &[&Stmt] = &[&call_b_stmt];

        let call_a = Expr::Call { id: gen.next_id(), span: span(), callee: a, args: &[] };
        let call_a_stmt = Stmt::Expression { id: gen.next_id(), span: span(), expr: &call_a };
        let b_body: &[&Stmt] = &[&call_a_stmt];

        let func_a = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: a,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(a_body),
            is_callback: false,
            is_exported: false,
        };
        let func_b = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: b,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(b_body),
            is_callback: false,
            is_exported: false,
        };
        let decl_a = Decl::Function(func_a);
        let decl_b = Decl::Function(func_b);
        let decls: &[&Decl] = &[&decl_a, &decl_b];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program, &interner);
        assert!(result.diagnostics.iter().any(|d| d.code == "INDIRECT_RECURSION_DETECTED"));
    }

    #[test]
    fn non_recursive_calls_produce_no_diagnostics() {
        let gen = NodeIdGen::new();
        let mut interner = Interner::new();
        let a = interner.intern("a");
        let b = interner.intern("b");
        let module = ModuleDecl::new(gen.next_id(), span(), Sym::EMPTY);

        let lit = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Byte(1) };
        let ret = Stmt::Return { id: gen.next_id(), span: span(), value: Some(&lit) };
        let b_body: &[&Stmt] = &[&ret];

        let call_b = Expr::Call { id: gen.next_id(), span: span(), callee: b, args: &[] };
        let call_b_stmt = Stmt::Expression { id: gen.next_id(), span: span(), expr: &call_b };
        let a_body: &[&Stmt] = &[&call_b_stmt];

        let func_a = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: a,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(a_body),
            is_callback: false,
            is_exported: false,
        };
        let func_b = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: b,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(b_body),
            is_callback: false,
            is_exported: false,
        };
        let decl_a = Decl::Function(func_a);
        let decl_b = Decl::Function(func_b);
        let decls: &[&Decl] = &[&decl_a, &decl_b];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program, &interner);
        assert!(result.diagnostics.is_empty());
    }
}
