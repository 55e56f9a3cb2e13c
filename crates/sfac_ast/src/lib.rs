//! # sfac_ast
//!
//! The AST node model, its type vocabulary, and the generic
//! Walker/Transformer/ContextWalker traversal infrastructure the analyzer's
//! seven passes are built on.
//!
//! The tree is immutable after parsing. The one thing that changes during
//! analysis — per-expression types — lives in a [`NodeMap`] sidecar keyed by
//! [`NodeId`], never as a mutable field on the node itself.

mod ast;
mod node_id;
mod types;
mod walker;

pub use ast::{
    BinaryOp, Block, Decl, EnumDecl, EnumMember, Expr, ExportDecl, ForDirection, FunctionDecl,
    ImportDecl, ImportName, Literal, MapExplicitStructDecl, MapFieldDecl, MapRangeDecl, MapSequentialStructDecl,
    MapSimpleDecl, MatchArm, ModuleDecl, Param, Program, ResolvedType, StorageClass, Stmt, SwitchCase, TypeDecl,
    TypeExpr, UnaryOp, VariableDecl, block_terminates,
};
pub use node_id::{NodeId, NodeIdGen, NodeMap};
pub use types::Type;
pub use walker::{
    AnyNode, Arenas, ContextKind, ContextStack, ContextVisitor, ContextWalker, MetadataValue, NodeCounter,
    NodeFinder, Transformer, Visitor, WalkControl, Walker, transform_expr_default, transform_stmt_default,
};
