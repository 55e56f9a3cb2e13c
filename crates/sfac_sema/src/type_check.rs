//! Pass 3 — Type Check, folding Statement Validation (`spec.md` §4.3 Pass 3).
//!
//! A context-aware walk driven by [`sfac_ast::ContextWalker`]: it computes
//! and annotates a [`Type`] for every expression into the `type_info`
//! sidecar, and validates every statement-level rule in the same pass
//! (break/continue placement, return-type agreement, assignment legality).
//! Local scopes (function body, block, `for` induction variable) are
//! reconstructed here on the fly — they are transient to this traversal,
//! not part of the module-level table Pass 1 left behind.

use sfac_ast::{AnyNode, ContextVisitor, ContextStack, ContextWalker, Decl, Expr, NodeMap, Program, Stmt, Type,
    UnaryOp, WalkControl, Walker};
use sfac_base::{Diagnostic, Interner};

use crate::codes;
use crate::location::span_to_location;
use crate::scope::{SymbolKind, SymbolEntry, SymbolTable};
use crate::types::TypeSystem;

pub struct TypeCheckResult {
    pub diagnostics: Vec<Diagnostic>,
    pub type_info: NodeMap<Type>,
    pub expressions_checked: usize,
    pub functions_analyzed: usize,
}

struct TypeCheckVisitor<'t> {
    table: &'t mut SymbolTable,
    type_system: &'t TypeSystem,
    interner: &'t Interner,
    type_info: NodeMap<Type>,
    diagnostics: Vec<Diagnostic>,
    expressions_checked: usize,
    functions_analyzed: usize,
    current_return_type: Vec<Type>,
}

impl<'t> TypeCheckVisitor<'t> {
    fn expr_type(&self, expr: &Expr<'_>) -> Type {
        self.type_info.get(expr.id()).cloned().unwrap_or(Type::Unknown)
    }

    fn annotate(&mut self, expr: &Expr<'_>, ty: Type) {
        self.expressions_checked += 1;
        self.type_info.insert(expr.id(), ty);
    }

    fn error(&mut self, code: &'static str, message: impl Into<String>, span: sfac_base::Span) {
        self.diagnostics.push(Diagnostic::error(code, message, span_to_location(span)));
    }

    fn check_condition(&mut self, condition: &Expr<'_>, span: sfac_base::Span) {
        let ty = self.expr_type(condition);
        if !ty.is_truthy_compatible() && !ty.is_unknown() {
            self.error(codes::EXPECTED_BOOL_OR_NUMERIC, "condition must be bool or numeric", span);
        }
    }

    fn check_expr(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::Literal { value, .. } => {
                let ty = match value {
                    sfac_ast::Literal::Byte(_) => Type::Byte,
                    sfac_ast::Literal::Word(_) => Type::Word,
                    sfac_ast::Literal::Bool(_) => Type::Bool,
                    sfac_ast::Literal::Str(_) => Type::String,
                };
                self.annotate(expr, ty);
            }
            Expr::Identifier { name, span, .. } => {
                let ty = match self.table.lookup(*name) {
                    Some(entry) => entry.ty.clone(),
                    None => {
                        self.error(codes::UNDEFINED_SYMBOL, "undefined symbol", *span);
                        Type::Unknown
                    }
                };
                self.annotate(expr, ty);
            }
            Expr::Binary { op, left, right, span, .. } => {
                let lt = self.expr_type(*left);
                let rt = self.expr_type(*right);
                let ty = if op.is_comparison() {
                    if !lt.is_numeric() && !lt.is_unknown() {
                        self.error(codes::EXPECTED_NUMERIC, "comparison requires numeric operands", *span);
                    }
                    Type::Bool
                } else if op.is_logical() {
                    if !lt.is_truthy_compatible() || !rt.is_truthy_compatible() {
                        self.error(
                            codes::EXPECTED_BOOL_OR_NUMERIC,
                            "logical operator requires bool or numeric operands",
                            *span,
                        );
                    }
                    Type::Bool
                } else {
                    match self.type_system.common_arithmetic_type(&lt, &rt) {
                        Some(t) => t,
                        None => {
                            self.error(codes::EXPECTED_NUMERIC, "arithmetic requires numeric operands", *span);
                            Type::Unknown
                        }
                    }
                };
                self.annotate(expr, ty);
            }
            Expr::Unary { op, operand, span, .. } => {
                let operand_ty = self.expr_type(*operand);
                let ty = match op {
                    UnaryOp::Neg => {
                        if !operand_ty.is_numeric() && !operand_ty.is_unknown() {
                            self.error(codes::EXPECTED_NUMERIC, "unary '-' requires a numeric operand", *span);
                        }
                        operand_ty
                    }
                    UnaryOp::Not => {
                        if !operand_ty.is_truthy_compatible() && !operand_ty.is_unknown() {
                            self.error(
                                codes::EXPECTED_BOOL_OR_NUMERIC,
                                "unary '!' requires a bool or numeric operand",
                                *span,
                            );
                        }
                        Type::Bool
                    }
                };
                self.annotate(expr, ty);
            }
            Expr::Ternary { then_expr, else_expr, condition, span, .. } => {
                let cond_ty = self.expr_type(*condition);
                if !cond_ty.is_truthy_compatible() && !cond_ty.is_unknown() {
                    self.error(codes::EXPECTED_BOOL_OR_NUMERIC, "ternary condition must be bool or numeric", *span);
                }
                let then_ty = self.expr_type(*then_expr);
                let else_ty = self.expr_type(*else_expr);
                let ty = if self.type_system.is_assignable(&else_ty, &then_ty) { then_ty } else { else_ty };
                self.annotate(expr, ty);
            }
            Expr::Call { callee, args, span, .. } => {
                let entry: Option<SymbolEntry> = self.table.lookup(*callee).cloned();
                let ty = match entry {
                    Some(SymbolEntry { kind: SymbolKind::Function { params, return_type }, .. }) => {
                        if params.len() != args.len() {
                            self.error(
                                codes::ARG_COUNT_MISMATCH,
                                format!("expected {} argument(s), found {}", params.len(), args.len()),
                                *span,
                            );
                        } else {
                            for (param_ty, arg) in params.iter().zip(args.iter()) {
                                let arg_ty = self.expr_type(*arg);
                                if !self.type_system.is_assignable(&arg_ty, param_ty) {
                                    self.error(
                                        codes::TYPE_MISMATCH,
                                        format!("argument type '{arg_ty}' is not assignable to '{param_ty}'"),
                                        arg.span(),
                                    );
                                }
                            }
                        }
                        return_type
                    }
                    Some(_) => {
                        self.error(codes::UNDEFINED_SYMBOL, "callee is not a function", *span);
                        Type::Unknown
                    }
                    None => {
                        self.error(codes::UNDEFINED_SYMBOL, "call to undefined function", *span);
                        Type::Unknown
                    }
                };
                self.annotate(expr, ty);
            }
            Expr::Index { object, index, span, .. } => {
                let object_ty = self.expr_type(*object);
                let index_ty = self.expr_type(*index);
                if !index_ty.is_numeric() && !index_ty.is_unknown() {
                    self.error(codes::EXPECTED_NUMERIC, "index must be numeric", *span);
                }
                let ty = match object_ty {
                    Type::Array { element, .. } => *element,
                    Type::String => Type::Byte,
                    Type::Unknown => Type::Unknown,
                    _ => {
                        self.error(codes::TYPE_MISMATCH, "indexed value is not an array or string", *span);
                        Type::Unknown
                    }
                };
                self.annotate(expr, ty);
            }
            Expr::Member { member, span, .. } => {
                let _ = span;
                // Struct/enum member metadata isn't materialized on `Type`
                // itself; resolution degrades to the member's own declared
                // symbol when one happens to be in scope.
                let ty = match self.table.lookup(*member) {
                    Some(entry) => entry.ty.clone(),
                    None => Type::Unknown,
                };
                self.annotate(expr, ty);
            }
            Expr::Assignment { target, value, span, .. } => {
                let target_ty = self.expr_type(*target);
                let value_ty = self.expr_type(*value);
                if !target.is_lvalue() {
                    self.error(codes::TYPE_MISMATCH, "assignment target is not assignable", *span);
                }
                if let Expr::Identifier { name, .. } = *target {
                    if let Some(entry) = self.table.lookup(*name) {
                        if let SymbolKind::Variable { is_const: true } = entry.kind {
                            self.error(codes::ASSIGN_TO_CONST, "cannot assign to a const variable", *span);
                        }
                    }
                }
                if !self.type_system.is_assignable(&value_ty, &target_ty) {
                    self.error(
                        codes::TYPE_MISMATCH,
                        format!("cannot assign '{value_ty}' to '{target_ty}'"),
                        *span,
                    );
                }
                self.annotate(expr, target_ty);
            }
            Expr::ArrayLiteral { elements, span, .. } => {
                let mut element_ty = Type::Unknown;
                for (i, el) in elements.iter().enumerate() {
                    let ty = self.expr_type(*el);
                    if i == 0 {
                        element_ty = ty;
                    } else if !self.type_system.is_assignable(&ty, &element_ty) {
                        self.error(codes::TYPE_MISMATCH, "array literal elements must share a type", *span);
                    }
                }
                self.annotate(expr, Type::array(element_ty, Some(elements.len() as u32)));
            }
        }
    }
}

impl<'a, 't> ContextVisitor<'a> for TypeCheckVisitor<'t> {
    fn on_enter(&mut self, ctx: &ContextStack<'a>, node: AnyNode<'a>) -> WalkControl {
        match node {
            AnyNode::Decl(Decl::Function(f)) => {
                self.functions_analyzed += 1;
                self.table.push_scope();
                for param in &f.params {
                    let ty = self
                        .type_system
                        .resolve_type_annotation(self.interner, &param.ty)
                        .unwrap_or(Type::Unknown);
                    let _ =
                        self.table.declare_variable(param.name, span_to_location(param.span), ty, false, false);
                }
                let ret = self
                    .type_system
                    .resolve_type_annotation(self.interner, &f.return_type)
                    .unwrap_or(Type::Unknown);
                self.current_return_type.push(ret);
            }
            AnyNode::Stmt(Stmt::Block { .. }) => {
                self.table.push_scope();
            }
            AnyNode::Stmt(Stmt::For { variable, start, .. }) => {
                self.table.push_scope();
                let start_ty = self.expr_type(*start);
                let induction_ty = if start_ty.is_numeric() { start_ty } else { Type::Byte };
                let _ = self.table.declare_variable(
                    *variable,
                    span_to_location(start.span()),
                    induction_ty,
                    false,
                    false,
                );
            }
            AnyNode::Stmt(Stmt::Break { span, .. }) => {
                if !ctx.is_in_loop_without_function_boundary() {
                    self.error(codes::BREAK_OUTSIDE_LOOP, "'break' outside of a loop", *span);
                }
            }
            AnyNode::Stmt(Stmt::Continue { span, .. }) => {
                if !ctx.is_in_loop_without_function_boundary() {
                    self.error(codes::CONTINUE_OUTSIDE_LOOP, "'continue' outside of a loop", *span);
                }
            }
            _ => {}
        }
        WalkControl::Continue
    }

    fn on_exit(&mut self, _ctx: &ContextStack<'a>, node: AnyNode<'a>) {
        match node {
            AnyNode::Decl(Decl::Function(_)) => {
                self.table.pop_scope();
                self.current_return_type.pop();
            }
            AnyNode::Stmt(Stmt::Block { .. }) | AnyNode::Stmt(Stmt::For { .. }) => {
                self.table.pop_scope();
            }
            AnyNode::Stmt(Stmt::If { condition, span, .. })
            | AnyNode::Stmt(Stmt::While { condition, span, .. })
            | AnyNode::Stmt(Stmt::DoWhile { condition, span, .. }) => {
                self.check_condition(*condition, *span);
            }
            AnyNode::Stmt(Stmt::Return { span, value, .. }) => {
                let declared = self.current_return_type.last().cloned().unwrap_or(Type::Void);
                match (*value, declared) {
                    (Some(_), Type::Void) => {
                        self.error(codes::RETURN_VALUE_IN_VOID, "'return' with a value in a void function", *span);
                    }
                    (None, declared) if declared != Type::Void => {
                        self.error(
                            codes::RETURN_MISSING_VALUE,
                            format!("'return' is missing a value of type '{declared}'"),
                            *span,
                        );
                    }
                    (Some(v), declared) => {
                        let actual = self.expr_type(v);
                        if !self.type_system.is_assignable(&actual, &declared) {
                            self.error(
                                codes::RETURN_TYPE_MISMATCH,
                                format!("returned type '{actual}' does not match declared return type '{declared}'"),
                                *span,
                            );
                        }
                    }
                    (None, _) => {}
                }
            }
            AnyNode::Stmt(Stmt::VariableDecl(v)) => {
                let annotated =
                    v.type_annotation.as_ref().and_then(|a| self.type_system.resolve_type_annotation(self.interner, a));
                let init_ty = v.initializer.map(|e| self.expr_type(e));
                let resolved = match (&annotated, &init_ty) {
                    (Some(a), Some(i)) => {
                        if !self.type_system.is_assignable(i, a) {
                            self.error(
                                codes::TYPE_MISMATCH,
                                format!("cannot assign '{i}' to variable of type '{a}'"),
                                v.span,
                            );
                        }
                        a.clone()
                    }
                    (Some(a), None) => a.clone(),
                    (None, Some(i)) => i.clone(),
                    (None, None) => Type::Unknown,
                };
                if let Some(entry) = self.table.lookup_mut(v.name) {
                    entry.ty = resolved;
                }
            }
            AnyNode::Expr(expr) => self.check_expr(expr),
            _ => {}
        }
    }
}

pub fn run(
    program: &Program<'_>,
    table: &mut SymbolTable,
    type_system: &TypeSystem,
    interner: &Interner,
) -> TypeCheckResult {
    let visitor = TypeCheckVisitor {
        table,
        type_system,
        interner,
        type_info: NodeMap::new(),
        diagnostics: Vec::new(),
        expressions_checked: 0,
        functions_analyzed: 0,
        current_return_type: Vec::new(),
    };

    let mut walker = Walker::new(ContextWalker::new(visitor));
    walker.walk(program);
    let visitor = walker.into_visitor().into_inner();

    TypeCheckResult {
        diagnostics: visitor.diagnostics,
        type_info: visitor.type_info,
        expressions_checked: visitor.expressions_checked,
        functions_analyzed: visitor.functions_analyzed,
    }
}
