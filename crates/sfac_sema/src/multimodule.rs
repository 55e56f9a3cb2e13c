//! Multi-Module Coordinator (`spec.md` §4.4): import resolution, export
//! aggregation into a [`GlobalSymbolTable`], circular-import detection, and
//! topological compilation order.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use sfac_ast::{Decl, Program};
use sfac_base::{Diagnostic, DiagnosticDetails, Interner, Severity, Symbol};

use crate::analyzer::{AnalysisResult, AnalyzeOptions, SemanticAnalyzer};
use crate::codes;
use crate::graph::tarjan_scc;
use crate::location::span_to_location;
use crate::scope::GlobalSymbolTable;

pub struct ImportResolution {
    pub success: bool,
    pub errors: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct MultiModuleStats {
    pub total_modules: usize,
    pub total_declarations: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_time_ms: u128,
}

pub struct MultiModuleAnalysisResult {
    pub success: bool,
    pub modules: HashMap<Symbol, AnalysisResult>,
    pub global_symbol_table: GlobalSymbolTable,
    pub dependency_graph: HashMap<Symbol, Vec<Symbol>>,
    pub import_resolution: ImportResolution,
    pub compilation_order: Vec<Symbol>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: MultiModuleStats,
}

pub fn analyze_multiple(
    programs: &[&Program<'_>],
    interner: &Interner,
    options: &AnalyzeOptions,
) -> MultiModuleAnalysisResult {
    let start = Instant::now();

    let module_names: HashSet<Symbol> = programs.iter().map(|p| p.module.name).collect();
    let mut dependency_graph: HashMap<Symbol, Vec<Symbol>> = HashMap::new();
    let mut import_errors = Vec::new();

    for program in programs {
        let mut deps = Vec::new();
        for decl in program.declarations {
            if let Decl::Import(i) = decl {
                if !module_names.contains(&i.module) {
                    import_errors.push(
                        Diagnostic::error(
                            codes::IMPORT_UNRESOLVED,
                            format!("module '{}' imports unresolved module '{}'",
                                interner.resolve(program.module.name), interner.resolve(i.module)),
                            span_to_location(i.span),
                        )
                        .with_details(DiagnosticDetails::TypeName(interner.resolve(i.module).to_string())),
                    );
                } else if !deps.contains(&i.module) {
                    deps.push(i.module);
                }
            }
        }
        dependency_graph.insert(program.module.name, deps);
    }

    let nodes: Vec<Symbol> = module_names.iter().copied().collect();
    let sccs = tarjan_scc(&nodes, |m| dependency_graph.get(&m).cloned().unwrap_or_default());

    let mut diagnostics = Vec::new();
    for scc in &sccs {
        let is_cycle = scc.len() > 1
            || scc.first().is_some_and(|only| {
                dependency_graph.get(only).is_some_and(|deps| deps.contains(only))
            });
        if is_cycle {
            let names: Vec<String> = scc.iter().map(|s| interner.resolve(*s).to_string()).collect();
            let span = sfac_base::Span::default();
            diagnostics.push(
                Diagnostic::error(
                    codes::CIRCULAR_IMPORT,
                    format!("circular import among modules: {}", names.join(", ")),
                    span_to_location(span),
                )
                .with_details(DiagnosticDetails::Cycle(names)),
            );
        }
    }

    let compilation_order = topological_order(&nodes, &dependency_graph, &sccs, interner);

    let mut global_symbol_table = GlobalSymbolTable::new();
    let mut modules = HashMap::new();
    let mut analyzer = SemanticAnalyzer::new();
    let mut total_declarations = 0;

    for &module_name in &compilation_order {
        let Some(program) = programs.iter().copied().find(|p| p.module.name == module_name) else {
            continue;
        };
        let result = analyzer.analyze(program, interner, options);
        total_declarations += result.stats.total_declarations;
        global_symbol_table.register_module(module_name, &result.symbol_table);

        for decl in program.declarations {
            if let Decl::Import(i) = decl {
                if module_names.contains(&i.module) {
                    for name in &i.names {
                        if global_symbol_table.resolve(i.module, name.name).is_none() {
                            import_errors.push(
                                Diagnostic::error(
                                    codes::IMPORT_NOT_EXPORTED,
                                    format!(
                                        "'{}' is not exported by module '{}'",
                                        interner.resolve(name.name),
                                        interner.resolve(i.module)
                                    ),
                                    span_to_location(i.span),
                                )
                                .with_details(DiagnosticDetails::TypeName(interner.resolve(i.module).to_string())),
                            );
                        }
                    }
                }
            }
        }

        modules.insert(module_name, result);
    }

    diagnostics.extend(import_errors.iter().cloned());
    for result in modules.values() {
        diagnostics.extend(result.diagnostics.iter().cloned());
    }

    let import_success = import_errors.is_empty();
    let modules_success = modules.values().all(|r| r.success);

    let stats = MultiModuleStats {
        total_modules: programs.len(),
        total_declarations,
        total_errors: diagnostics.iter().filter(|d| d.severity == Severity::Error).count(),
        total_warnings: diagnostics.iter().filter(|d| d.severity == Severity::Warning).count(),
        total_time_ms: start.elapsed().as_millis(),
    };

    MultiModuleAnalysisResult {
        success: import_success && modules_success,
        modules,
        global_symbol_table,
        dependency_graph,
        import_resolution: ImportResolution { success: import_success, errors: import_errors },
        compilation_order,
        diagnostics,
        stats,
    }
}

/// Topological order over the module dependency graph, dependencies first.
/// Cycles are collapsed to their SCC and broken by lexicographic module
/// name (`spec.md` §4.4 step 4); ties among independently-ready components
/// are also broken lexicographically for determinism.
fn topological_order(
    nodes: &[Symbol],
    edges: &HashMap<Symbol, Vec<Symbol>>,
    sccs: &[Vec<Symbol>],
    interner: &Interner,
) -> Vec<Symbol> {
    let name_of = |s: Symbol| interner.resolve(s).to_string();

    let mut component_of: HashMap<Symbol, usize> = HashMap::new();
    let mut members: Vec<Vec<Symbol>> = Vec::with_capacity(sccs.len());
    for (i, scc) in sccs.iter().enumerate() {
        let mut sorted = scc.clone();
        sorted.sort_by_key(|s| name_of(*s));
        for &m in &sorted {
            component_of.insert(m, i);
        }
        members.push(sorted);
    }

    let mut comp_deps: Vec<HashSet<usize>> = vec![HashSet::new(); members.len()];
    let mut comp_dependents: Vec<HashSet<usize>> = vec![HashSet::new(); members.len()];
    for &node in nodes {
        let Some(&ci) = component_of.get(&node) else { continue };
        for dep in edges.get(&node).into_iter().flatten() {
            let Some(&cj) = component_of.get(dep) else { continue };
            if ci != cj {
                comp_deps[ci].insert(cj);
                comp_dependents[cj].insert(ci);
            }
        }
    }

    let mut remaining: Vec<usize> = comp_deps.iter().map(|d| d.len()).collect();
    let mut emitted = vec![false; members.len()];
    let mut order = Vec::with_capacity(nodes.len());

    for _ in 0..members.len() {
        let next = (0..members.len())
            .filter(|&i| !emitted[i] && remaining[i] == 0)
            .min_by_key(|&i| name_of(members[i][0]))
            .expect("a DAG of components always has a component with no remaining dependencies");

        emitted[next] = true;
        order.extend(members[next].iter().copied());
        for &dependent in &comp_dependents[next] {
            remaining[dependent] -= 1;
        }
    }

    order
}
