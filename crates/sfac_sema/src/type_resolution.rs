//! Pass 2 — Type Resolution (`spec.md` §4.3 Pass 2).
//!
//! Walks every type annotation reachable from a top-level declaration and
//! writes the resolved [`Type`] back onto the matching [`SymbolTable`]
//! entry. Enum members with an explicit value are checked against the
//! underlying `byte` range `0..=255`.

use sfac_ast::{Decl, Program, Type};
use sfac_base::{Diagnostic, DiagnosticDetails, Interner};

use crate::codes;
use crate::location::span_to_location;
use crate::scope::SymbolTable;
use crate::types::TypeSystem;

pub struct TypeResolutionResult {
    pub diagnostics: Vec<Diagnostic>,
    pub resolved_count: usize,
    pub failed_count: usize,
}

pub fn run(
    program: &Program<'_>,
    table: &mut SymbolTable,
    type_system: &mut TypeSystem,
    interner: &Interner,
) -> TypeResolutionResult {
    let mut diagnostics = Vec::new();
    let mut resolved_count = 0;
    let mut failed_count = 0;

    for decl in program.declarations {
        resolve_decl(decl, table, type_system, interner, &mut diagnostics, &mut resolved_count, &mut failed_count);
    }

    TypeResolutionResult { diagnostics, resolved_count, failed_count }
}

#[allow(clippy::too_many_arguments)]
fn resolve_decl(
    decl: &Decl<'_>,
    table: &mut SymbolTable,
    type_system: &mut TypeSystem,
    interner: &Interner,
    diagnostics: &mut Vec<Diagnostic>,
    resolved_count: &mut usize,
    failed_count: &mut usize,
) {
    match decl {
        Decl::Function(f) => {
            let mut params = Vec::with_capacity(f.params.len());
            for p in &f.params {
                params.push(resolve_one(
                    &p.ty, p.span, type_system, interner, diagnostics, resolved_count, failed_count,
                ));
            }
            let ret = resolve_one(
                &f.return_type,
                f.span,
                type_system,
                interner,
                diagnostics,
                resolved_count,
                failed_count,
            );
            if let Some(entry) = table.lookup_mut(f.name) {
                entry.ty = Type::function(params, ret);
            }
        }
        Decl::Variable(v) => {
            if let Some(annotation) = &v.type_annotation {
                let ty = resolve_one(
                    annotation, v.span, type_system, interner, diagnostics, resolved_count, failed_count,
                );
                if let Some(entry) = table.lookup_mut(v.name) {
                    entry.ty = ty;
                }
            }
        }
        Decl::Type(t) => {
            let ty = resolve_one(
                &t.aliased, t.span, type_system, interner, diagnostics, resolved_count, failed_count,
            );
            type_system.register_alias(t.name, ty.clone());
            if let Some(entry) = table.lookup_mut(t.name) {
                entry.ty = ty;
            }
        }
        Decl::Enum(e) => {
            for member in &e.members {
                if let Some(value) = member.value {
                    if !(0..=255).contains(&value) {
                        *failed_count += 1;
                        diagnostics.push(
                            Diagnostic::error(
                                codes::ENUM_VALUE_OUT_OF_RANGE,
                                format!("enum member value {value} is outside 0..=255"),
                                span_to_location(member.span),
                            )
                            .with_details(DiagnosticDetails::TypeName("byte".to_string())),
                        );
                    } else {
                        *resolved_count += 1;
                    }
                }
            }
        }
        Decl::Export(e) => resolve_decl(
            e.inner, table, type_system, interner, diagnostics, resolved_count, failed_count,
        ),
        Decl::Import(_) => {}
        Decl::MapSimple(m) => {
            resolve_one(&m.ty, m.span, type_system, interner, diagnostics, resolved_count, failed_count);
        }
        Decl::MapRange(m) => {
            resolve_one(&m.ty, m.span, type_system, interner, diagnostics, resolved_count, failed_count);
        }
        Decl::MapExplicitStruct(m) => {
            for field in &m.fields {
                resolve_one(
                    &field.ty, field.span, type_system, interner, diagnostics, resolved_count, failed_count,
                );
            }
        }
        Decl::MapSequentialStruct(m) => {
            for (_, ty, span) in &m.fields {
                resolve_one(ty, *span, type_system, interner, diagnostics, resolved_count, failed_count);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_one(
    annotation: &sfac_ast::TypeExpr,
    span: sfac_base::Span,
    type_system: &TypeSystem,
    interner: &Interner,
    diagnostics: &mut Vec<Diagnostic>,
    resolved_count: &mut usize,
    failed_count: &mut usize,
) -> Type {
    match type_system.resolve_type_annotation(interner, annotation) {
        Some(ty) => {
            *resolved_count += 1;
            ty
        }
        None => {
            *failed_count += 1;
            let name = match annotation {
                sfac_ast::TypeExpr::Named(s) => interner.resolve(*s).to_string(),
                sfac_ast::TypeExpr::Array { .. } => "<array>".to_string(),
            };
            diagnostics.push(
                Diagnostic::error(
                    codes::UNKNOWN_TYPE,
                    format!("unknown type '{name}'"),
                    span_to_location(span),
                )
                .with_details(DiagnosticDetails::TypeName(name)),
            );
            Type::Unknown
        }
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
    fn resolves_builtin_return_type() {
        let gen = NodeIdGen::new();
        let mut interner = Interner::new();
        let byte = interner.intern("byte");
        let module = ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(byte),
            body: None,
            is_callback: false,
            is_exported: false,
        };
        let decl = Decl::Function(func);
        let decls: &[&Decl] = &[&decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let mut table = crate::symbol_table_build::run(&program).table;
        let mut ts = TypeSystem::new();
        let result = run(&program, &mut table, &mut ts, &interner);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.failed_count, 0);
    }

    #[test]
    fn unknown_type_name_reported() {
        let gen = NodeIdGen::new();
        let mut interner = Interner::new();
        let bogus = interner.intern("Bogus");
        let module = ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let func = FunctionDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            params: vec![],
            return_type: TypeExpr::Named(bogus),
            body: None,
            is_callback: false,
            is_exported: false,
        };
        let decl = Decl::Function(func);
        let decls: &[&Decl] = &[&decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let mut table = crate::symbol_table_build::run(&program).table;
        let mut ts = TypeSystem::new();
        let result = run(&program, &mut table, &mut ts, &interner);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, "UNKNOWN_TYPE");
    }

    #[test]
    fn enum_value_out_of_range_reported() {
        let gen = NodeIdGen::new();
        let interner = Interner::new();
        let module = ModuleDecl::new(gen.next_id(), span(), Symbol::EMPTY);
        let enum_decl = sfac_ast::EnumDecl {
            id: gen.next_id(),
            span: span(),
            name: Symbol::EMPTY,
            members: vec![sfac_ast::EnumMember { name: Symbol::EMPTY, value: Some(999), span: span() }],
        };
        let decl = Decl::Enum(enum_decl);
        let decls: &[&Decl] = &[&decl];
        let program = Program { id: gen.next_id(), span: span(), module: &module, declarations: decls };

        let mut table = crate::symbol_table_build::run(&program).table;
        let mut ts = TypeSystem::new();
        let result = run(&program, &mut table, &mut ts, &interner);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, "ENUM_VALUE_OUT_OF_RANGE");
    }
}
