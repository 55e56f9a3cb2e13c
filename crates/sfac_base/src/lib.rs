//! # sfac_base
//!
//! Pure structural atoms shared by every crate in the SFA compiler
//! front-end/mid-end: source spans, string interning, arena allocation, and
//! the diagnostic vocabulary.
//!
//! Nothing in this crate knows about the source language's grammar or
//! semantics — it is the load-bearing foundation `sfac_ast`, `sfac_sema`,
//! and `sfac_il` all build on.

mod arena;
mod diagnostic;
mod intern;
mod span;

pub use arena::{Arena, IdVec};
pub use diagnostic::{Diagnostic, DiagnosticDetails, Result, Severity, SpannedError};
pub use intern::{Interner, Symbol, SymbolEq};
pub use span::{LineIndex, Position, SourceLocation, Span};
