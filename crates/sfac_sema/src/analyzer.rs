//! `SemanticAnalyzer`: orchestrates the seven analysis passes over one
//! module (`spec.md` §4.3).
//!
//! A `SemanticAnalyzer` is cheap to construct but deliberately reusable: its
//! [`types::TypeSystem`](crate::types::TypeSystem) accumulates registered
//! aliases across every `analyze` call, which is what lets the Multi-Module
//! Coordinator (`crate::multimodule`) share one type universe across a
//! dependency graph of modules without re-registering each module's aliases
//! into every sibling's analyzer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sfac_ast::{NodeMap, Program, Type};
use sfac_base::{Diagnostic, Interner, Severity, Symbol};

use crate::call_graph::CallGraph;
use crate::cfg::Cfg;
use crate::scope::SymbolTable;
use crate::types::TypeSystem;
use crate::{advanced, call_graph, control_flow, symbol_table_build, type_check, type_resolution};

/// Configuration threaded through every pass of one `analyze` call.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Runs Pass 7 (unused-variable advisory checks) when set.
    pub run_advanced_analysis: bool,
    /// Stops after the first pass that records an error-severity diagnostic,
    /// skipping every pass after it.
    pub stop_on_first_error: bool,
    /// Caps the number of diagnostics recorded across the whole run.
    pub max_errors: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions { run_advanced_analysis: false, stop_on_first_error: false, max_errors: usize::MAX }
    }
}

/// One pass's contribution to a run, for profiling and for
/// `stop_on_first_error` bookkeeping.
#[derive(Debug, Clone)]
pub struct PassResult {
    pub pass_name: &'static str,
    pub diagnostics_added: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub total_declarations: usize,
    pub expressions_checked: usize,
    pub functions_analyzed: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub analysis_time_ms: u128,
}

pub struct AnalysisResult {
    pub success: bool,
    pub module_name: Symbol,
    pub symbol_table: SymbolTable,
    pub type_info: NodeMap<Type>,
    pub cfgs: HashMap<Symbol, Cfg>,
    pub call_graph: CallGraph,
    pub diagnostics: Vec<Diagnostic>,
    pub pass_results: Vec<PassResult>,
    pub stats: Stats,
}

/// Owns a [`TypeSystem`] that survives across `analyze` calls.
pub struct SemanticAnalyzer {
    type_system: TypeSystem,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer { type_system: TypeSystem::new() }
    }

    pub fn type_system(&self) -> &TypeSystem {
        &self.type_system
    }

    pub fn analyze(
        &mut self,
        program: &Program<'_>,
        interner: &Interner,
        options: &AnalyzeOptions,
    ) -> AnalysisResult {
        let start = Instant::now();
        let mut diagnostics = Vec::new();
        let mut pass_results = Vec::new();
        let mut stats = Stats::default();

        macro_rules! record_pass {
            ($name:expr, $pass_start:expr, $added:expr) => {{
                pass_results.push(PassResult {
                    pass_name: $name,
                    diagnostics_added: $added,
                    duration: $pass_start.elapsed(),
                });
            }};
        }

        let should_stop = |diagnostics: &[Diagnostic], options: &AnalyzeOptions| {
            diagnostics.len() >= options.max_errors
                || (options.stop_on_first_error && diagnostics.iter().any(Diagnostic::is_error))
        };

        let pass_start = Instant::now();
        let pass1 = symbol_table_build::run(program);
        let mut table = pass1.table;
        stats.total_declarations = pass1.total_declarations;
        let before = diagnostics.len();
        diagnostics.extend(pass1.diagnostics);
        record_pass!("SymbolTableBuild", pass_start, diagnostics.len() - before);

        if !should_stop(&diagnostics, options) {
            let pass_start = Instant::now();
            let pass2 = type_resolution::run(program, &mut table, &mut self.type_system, interner);
            let before = diagnostics.len();
            diagnostics.extend(pass2.diagnostics);
            record_pass!("TypeResolution", pass_start, diagnostics.len() - before);
        }

        let mut type_info = NodeMap::new();
        if !should_stop(&diagnostics, options) {
            let pass_start = Instant::now();
            let pass3 = type_check::run(program, &mut table, &self.type_system, interner);
            stats.expressions_checked = pass3.expressions_checked;
            stats.functions_analyzed = pass3.functions_analyzed;
            type_info = pass3.type_info;
            let before = diagnostics.len();
            diagnostics.extend(pass3.diagnostics);
            record_pass!("TypeCheck", pass_start, diagnostics.len() - before);
        }

        let mut cfgs = HashMap::new();
        if !should_stop(&diagnostics, options) {
            let pass_start = Instant::now();
            let pass5 = control_flow::run(program, interner);
            cfgs = pass5.cfgs;
            let before = diagnostics.len();
            diagnostics.extend(pass5.diagnostics);
            record_pass!("ControlFlowAnalysis", pass_start, diagnostics.len() - before);
        }

        let mut call_graph_result = CallGraph { edges: HashMap::new(), sccs: Vec::new() };
        if !should_stop(&diagnostics, options) {
            let pass_start = Instant::now();
            let pass6 = call_graph::run(program, interner);
            call_graph_result = pass6.graph;
            let before = diagnostics.len();
            diagnostics.extend(pass6.diagnostics);
            record_pass!("CallGraphAndRecursionDetection", pass_start, diagnostics.len() - before);
        }

        if options.run_advanced_analysis && !should_stop(&diagnostics, options) {
            let pass_start = Instant::now();
            let pass7 = advanced::run(program);
            let before = diagnostics.len();
            diagnostics.extend(pass7.diagnostics);
            record_pass!("AdvancedAnalysis", pass_start, diagnostics.len() - before);
        }

        diagnostics.truncate(options.max_errors);

        stats.error_count = diagnostics.iter().filter(|d| d.severity == Severity::Error).count();
        stats.warning_count = diagnostics.iter().filter(|d| d.severity == Severity::Warning).count();
        stats.analysis_time_ms = start.elapsed().as_millis();

        AnalysisResult {
            success: stats.error_count == 0,
            module_name: program.module.name,
            symbol_table: table,
            type_info,
            cfgs,
            call_graph: call_graph_result,
            diagnostics,
            pass_results,
            stats,
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
