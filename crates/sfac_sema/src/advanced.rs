//! Pass 7 — Advanced Analysis (`spec.md` §4.3 Pass 7), optional.
//!
//! Gated on [`crate::analyzer::AnalyzeOptions::run_advanced_analysis`): a
//! best-effort unused-local-variable check. Scope-insensitive by design —
//! a local reused under the same name in two disjoint nested blocks is
//! tracked as a single declaration, which only risks under-reporting, never
//! a false positive against a variable that is genuinely read somewhere in
//! the function.

use std::collections::HashSet;

use sfac_ast::{Decl, Expr, Program, Stmt};
use sfac_base::{Diagnostic, Symbol};

use crate::codes;
use crate::location::span_to_location;

pub struct AdvancedAnalysisResult {
    pub diagnostics: Vec<Diagnostic>,
}

pub fn run(program: &Program<'_>) -> AdvancedAnalysisResult {
    let mut diagnostics = Vec::new();

    for decl in program.declarations {
        if let Decl::Function(f) = decl {
            if let Some(body) = f.body {
                let mut declared = Vec::new();
                let mut used = HashSet::new();
                collect_stmt_block(body, &mut declared, &mut used);
                for (name, span) in declared {
                    if !used.contains(&name) {
                        diagnostics.push(Diagnostic::warning(
                            codes::UNUSED_VARIABLE,
                            "variable is never read after it is declared",
                            span_to_location(span),
                        ));
                    }
                }
            }
        }
    }

    AdvancedAnalysisResult { diagnostics }
}

fn collect_stmt_block(
    body: sfac_ast::Block<'_>,
    declared: &mut Vec<(Symbol, sfac_base::Span)>,
    used: &mut HashSet<Symbol>,
) {
    for stmt in body {
        collect_stmt(stmt, declared, used);
    }
}

fn collect_stmt(
    stmt: &Stmt<'_>,
    declared: &mut Vec<(Symbol, sfac_base::Span)>,
    used: &mut HashSet<Symbol>,
) {
    match stmt {
        Stmt::Return { value: Some(v), .. } => collect_expr(v, used),
        Stmt::Return { value: None, .. } => {}
        Stmt::If { condition, then_branch, else_branch, .. } => {
            collect_expr(condition, used);
            collect_stmt_block(then_branch, declared, used);
            if let Some(eb) = else_branch {
                collect_stmt_block(eb, declared, used);
            }
        }
        Stmt::While { condition, body, .. } => {
            collect_expr(condition, used);
            collect_stmt_block(body, declared, used);
        }
        Stmt::For { variable, start, end, step, body, .. } => {
            collect_expr(start, used);
            collect_expr(end, used);
            if let Some(s) = step {
                collect_expr(s, used);
            }
            declared.push((*variable, start.span()));
            collect_stmt_block(body, declared, used);
        }
        Stmt::DoWhile { body, condition, .. } => {
            collect_stmt_block(body, declared, used);
            collect_expr(condition, used);
        }
        Stmt::Switch { discriminant, cases, .. } => {
            collect_expr(discriminant, used);
            for case in cases {
                if let Some(v) = case.value {
                    collect_expr(v, used);
                }
                collect_stmt_block(case.body, declared, used);
            }
        }
        Stmt::Match { discriminant, arms, .. } => {
            collect_expr(discriminant, used);
            for arm in arms {
                if let Some(p) = arm.pattern {
                    collect_expr(p, used);
                }
                collect_stmt_block(arm.body, declared, used);
            }
        }
        Stmt::Break { .. } | Stmt::Continue { .. } => {}
        Stmt::Expression { expr, .. } => collect_expr(expr, used),
        Stmt::Block { body, .. } => collect_stmt_block(body, declared, used),
        Stmt::VariableDecl(v) => {
            if let Some(init) = v.initializer {
                collect_expr(init, used);
            }
            declared.push((v.name, v.span));
        }
    }
}

fn collect_expr(expr: &Expr<'_>, used: &mut HashSet<Symbol>) {
    match expr {
        Expr::Literal { .. } => {}
        Expr::Identifier { name, .. } => {
            used.insert(*name);
        }
        Expr::Binary { left, right, .. } => {
            collect_expr(left, used);
            collect_expr(right, used);
        }
        Expr::Unary { operand, .. } => collect_expr(operand, used),
        Expr::Ternary { condition, then_expr, else_expr, .. } => {
            collect_expr(condition, used);
            collect_expr(then_expr, used);
            collect_expr(else_expr, used);
        }
        Expr::Call { args, .. } => {
            for arg in *args {
                collect_expr(arg, used);
            }
        }
        Expr::Index { object, index, .. } => {
            collect_expr(object, used);
            collect_expr(index, used);
        }
        Expr::Member { object, .. } => collect_expr(object, used),
        Expr::Assignment { target, value, .. } => {
            // The assignment target's own identifier is not a read; only
            // nested sub-expressions (an index, a member base) count.
            if let Expr::Index { object, index, .. } = target {
                collect_expr(object, used);
                collect_expr(index, used);
            } else if let Expr::Member { object, .. } = target {
                collect_expr(object, used);
            }
            collect_expr(value, used);
        }
        Expr::ArrayLiteral { elements, .. } => {
            for el in *elements {
                collect_expr(el, used);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfac_ast::{FunctionDecl, Literal, ModuleDecl, NodeIdGen, StorageClass, TypeExpr, VariableDecl};
    use sfac_base::{Span, Symbol as Sym};

    fn span() -> Span {
        Span::new(0, 1)
    }

    #[test]
    fn unused_local_is_reported() {
        let gen = NodeIdGen::new();
        let mut interner = sfac_base::Interner::new();
        let name = interner.intern("temp");
        let module = ModuleDecl::new(gen.next_id(), span(), Sym::EMPTY);
        let lit = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Byte(1) };
        let decl = VariableDecl {
            id: gen.next_id(),
            span: span(),
            name,
            type_annotation: None,
            initializer: Some(&lit),
            is_const: false,
            is_exported: false,
            storage: StorageClass::Ram,
        };
        let var_stmt = Stmt::VariableDecl(decl);
        let body: &[&Stmt] = &[&var_stmt];
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Sym::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(body),
            is_callback: false,
            is_exported: false,
        };
        let fn_decl = Decl::Function(func);
        let decls: &[&Decl] = &[&fn_decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program);
        assert!(result.diagnostics.iter().any(|d| d.code == "UNUSED_VARIABLE"));
    }

    #[test]
    fn variable_read_in_return_is_not_unused() {
        let gen = NodeIdGen::new();
        let mut interner = sfac_base::Interner::new();
        let name = interner.intern("temp");
        let module = ModuleDecl::new(gen.next_id(), span(), Sym::EMPTY);
        let lit = Expr::Literal { id: gen.next_id(), span: span(), value: Literal::Byte(1) };
        let decl = VariableDecl {
            id: gen.next_id(),
            span: span(),
            name,
            type_annotation: None,
            initializer: Some(&lit),
            is_const: false,
            is_exported: false,
            storage: StorageClass::Ram,
        };
        let var_stmt = Stmt::VariableDecl(decl);
        let ident = Expr::Identifier { id: gen.next_id(), span: span(), name };
        let ret = Stmt::Return { id: gen.next_id(), span: span(), value: Some(&ident) };
        let body: &[&Stmt] = &[&var_stmt, &ret];
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Sym::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(Sym::EMPTY),
            body: Some(body),
            is_callback: false,
            is_exported: false,
        };
        let fn_decl = Decl::Function(func);
        let decls: &[&Decl] = &[&fn_decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program);
        assert!(result.diagnostics.is_empty());
    }
}
