//! Pass 5 — Control Flow Analysis (`spec.md` §4.3 Pass 5).
//!
//! Builds a per-function [`Cfg`] via [`crate::cfg::build_cfg`] and reports
//! `MISSING_RETURN` (a non-`void` function whose body does not terminate on
//! every path) and `UNREACHABLE_CODE` (statements following an unconditional
//! terminator in the same block), both warnings per the Open Question
//! decision recorded in `DESIGN.md`.

use std::collections::HashMap;

use sfac_ast::{block_terminates, Block, Decl, Program, Stmt, TypeExpr};
use sfac_base::{Diagnostic, Interner, Symbol, SymbolEq};

use crate::cfg::{build_cfg, Cfg};
use crate::codes;
use crate::location::span_to_location;

pub struct ControlFlowResult {
    pub cfgs: HashMap<Symbol, Cfg>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn run(program: &Program<'_>, interner: &Interner) -> ControlFlowResult {
    let mut cfgs = HashMap::new();
    let mut diagnostics = Vec::new();

    for decl in program.declarations {
        if let Decl::Function(f) = decl {
            let Some(body) = f.body else { continue };

            cfgs.insert(f.name, build_cfg(body));
            check_unreachable(body, &mut diagnostics);

            let is_void = matches!(&f.return_type, TypeExpr::Named(name) if name.is(interner, "void"));
            if !is_void && !block_terminates(body) {
                diagnostics.push(Diagnostic::warning(
                    codes::MISSING_RETURN,
                    "not every path through this function returns a value",
                    span_to_location(f.span),
                ));
            }
        }
    }

    ControlFlowResult { cfgs, diagnostics }
}

/// Flags every statement that follows an unconditional terminator within the
/// same block, recursing into every nested block regardless of whether the
/// outer block itself terminates.
fn check_unreachable(block: Block<'_>, diagnostics: &mut Vec<Diagnostic>) {
    let mut seen_terminator = false;
    for stmt in block {
        if seen_terminator {
            diagnostics.push(Diagnostic::warning(
                codes::UNREACHABLE_CODE,
                "unreachable code",
                span_to_location(stmt.span()),
            ));
        }
        recurse_into(stmt, diagnostics);
        if stmt.is_unconditional_terminator() {
            seen_terminator = true;
        }
    }
}

fn recurse_into(stmt: &Stmt<'_>, diagnostics: &mut Vec<Diagnostic>) {
    match stmt {
        Stmt::If { then_branch, else_branch, .. } => {
            check_unreachable(*then_branch, diagnostics);
            if let Some(eb) = else_branch {
                check_unreachable(*eb, diagnostics);
            }
        }
        Stmt::While { body, .. } | Stmt::For { body, .. } | Stmt::DoWhile { body, .. } => {
            check_unreachable(*body, diagnostics);
        }
        Stmt::Block { body, .. } => check_unreachable(*body, diagnostics),
        Stmt::Switch { cases, .. } => {
            for case in cases {
                check_unreachable(case.body, diagnostics);
            }
        }
        Stmt::Match { arms, .. } => {
            for arm in arms {
                check_unreachable(arm.body, diagnostics);
            }
        }
        Stmt::Return { .. }
        | Stmt::Break { .. }
        | Stmt::Continue { .. }
        | Stmt::Expression { .. }
        | Stmt::VariableDecl(_) => {}
    }
}
