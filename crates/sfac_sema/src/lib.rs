//! # sfac_sema
//!
//! The seven-pass semantic analyzer (`spec.md` §4.3) and the Multi-Module
//! Coordinator (`spec.md` §4.4) built on top of `sfac_ast`'s node model and
//! traversal infrastructure.
//!
//! Pass order: [`symbol_table_build`] (1) → [`type_resolution`] (2) →
//! [`type_check`] (3, folding Statement Validation) → [`control_flow`] (5)
//! → [`call_graph`] (6) → [`advanced`] (7, optional). [`analyzer`] drives
//! all seven through [`analyzer::SemanticAnalyzer`]; [`multimodule`] drives
//! many analyzers across a module dependency graph.

pub mod advanced;
pub mod analyzer;
pub mod call_graph;
pub mod cfg;
pub mod codes;
pub mod control_flow;
pub mod graph;
pub mod location;
pub mod multimodule;
pub mod scope;
pub mod symbol_table_build;
pub mod type_check;
pub mod type_resolution;
pub mod types;

pub use analyzer::{AnalysisResult, AnalyzeOptions, PassResult, SemanticAnalyzer, Stats};
pub use call_graph::CallGraph;
pub use cfg::{Cfg, CfgBlock, Terminator, build_cfg};
pub use graph::tarjan_scc;
pub use location::span_to_location;
pub use multimodule::{ImportResolution, MultiModuleAnalysisResult, MultiModuleStats, analyze_multiple};
pub use scope::{GlobalSymbolTable, SymbolEntry, SymbolKind, SymbolTable};
pub use types::TypeSystem;
