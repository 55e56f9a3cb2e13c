//! Pass 1 — Symbol Table Build (`spec.md` §4.3 Pass 1).
//!
//! Declares every top-level declaration into the module's root scope with a
//! pending (`Type::Unknown`) type; Pass 2 fills in resolved types and Pass 3
//! reconstructs nested (function-body/block/for) scopes on its own walk,
//! since those are transient to one traversal rather than part of the
//! persisted module-level table.

use sfac_ast::{Decl, Program, Type};
use sfac_base::Diagnostic;

use crate::location::span_to_location;
use crate::scope::SymbolTable;

pub struct SymbolTableBuildResult {
    pub table: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
    pub total_declarations: usize,
}

pub fn run(program: &Program<'_>) -> SymbolTableBuildResult {
    let mut table = SymbolTable::new();
    let mut diagnostics = Vec::new();
    let mut total_declarations = 0;

    for decl in program.declarations {
        total_declarations += 1;
        declare_top_level(&mut table, decl, &mut diagnostics);
    }

    SymbolTableBuildResult { table, diagnostics, total_declarations }
}

fn declare_top_level(table: &mut SymbolTable, decl: &Decl<'_>, diagnostics: &mut Vec<Diagnostic>) {
    match decl {
        Decl::Function(f) => {
            let params = f.params.iter().map(|_| Type::Unknown).collect();
            let result = table.declare_function(
                f.name,
                span_to_location(f.span),
                Type::Unknown,
                params,
                f.is_exported,
            );
            record(diagnostics, result);
        }
        Decl::Variable(v) => {
            let result = table.declare_variable(
                v.name,
                span_to_location(v.span),
                Type::Unknown,
                v.is_const,
                v.is_exported,
            );
            record(diagnostics, result);
            if v.is_const && v.initializer.is_none() {
                diagnostics.push(Diagnostic::error(
                    crate::codes::CONST_WITHOUT_INITIALIZER,
                    "const declaration has no initializer",
                    span_to_location(v.span),
                ));
            }
            if v.type_annotation.is_none() && v.initializer.is_none() {
                diagnostics.push(Diagnostic::error(
                    crate::codes::MISSING_TYPE_OR_INITIALIZER,
                    "variable declaration needs a type annotation or an initializer",
                    span_to_location(v.span),
                ));
            }
        }
        Decl::Type(t) => {
            let result = table.declare_type(t.name, span_to_location(t.span), Type::Unknown, false);
            record(diagnostics, result);
        }
        Decl::Enum(e) => {
            let result = table.declare_enum(e.name, span_to_location(e.span), false);
            record(diagnostics, result);
        }
        Decl::Import(i) => {
            for name in &i.names {
                let local = name.alias.unwrap_or(name.name);
                let result =
                    table.declare_import(local, span_to_location(i.span), i.module, name.name);
                record(diagnostics, result);
            }
        }
        Decl::Export(e) => declare_top_level(table, e.inner, diagnostics),
        Decl::MapSimple(m) => {
            record(
                diagnostics,
                table.declare_variable(m.name, span_to_location(m.span), Type::Unknown, false, false),
            );
        }
        Decl::MapRange(m) => {
            record(
                diagnostics,
                table.declare_variable(m.name, span_to_location(m.span), Type::Unknown, false, false),
            );
        }
        Decl::MapExplicitStruct(m) => {
            record(
                diagnostics,
                table.declare_variable(m.name, span_to_location(m.span), Type::Unknown, false, false),
            );
        }
        Decl::MapSequentialStruct(m) => {
            record(
                diagnostics,
                table.declare_variable(m.name, span_to_location(m.span), Type::Unknown, false, false),
            );
        }
    }
}

fn record(diagnostics: &mut Vec<Diagnostic>, result: Result<(), Diagnostic>) {
    if let Err(d) = result {
        diagnostics.push(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfac_ast::{FunctionDecl, ModuleDecl, NodeIdGen, TypeExpr};
    use sfac_base::{Span, Symbol};

    fn span() -> Span {
        Span::new(0, 1)
    }

    #[test]
    fn declares_top_level_function() {
        let gen = NodeIdGen::new();
        let module = ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(Symbol::EMPTY),
            body: None,
            is_callback: false,
            is_exported: false,
        };
        let decl = Decl::Function(func);
        let decls: &[&Decl] = &[&decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program);
        assert_eq!(result.total_declarations, 1);
        assert!(result.diagnostics.is_empty());
        assert!(result.table.lookup(Symbol::EMPTY).is_some());
    }

    #[test]
    fn duplicate_top_level_names_reported() {
        let gen = NodeIdGen::new();
        let module = ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let func_a = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(Symbol::EMPTY),
            body: None,
            is_callback: false,
            is_exported: false,
        };
        let func_b = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(Symbol::EMPTY),
            body: None,
            is_callback: false,
            is_exported: false,
        };
        let decl_a = Decl::Function(func_a);
        let decl_b = Decl::Function(func_b);
        let decls: &[&Decl] = &[&decl_a, &decl_b];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let result = run(&program);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, "DUPLICATE_DECLARATION");
    }
}
