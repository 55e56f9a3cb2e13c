//! Lexically nested scopes and the per-module symbol table
//! (`spec.md` §3 "Scope", §4.2 "SymbolTable").

use sfac_base::{Diagnostic, DiagnosticDetails, SourceLocation, Symbol};
use sfac_ast::Type;
use std::collections::HashMap;

/// What kind of thing a name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable { is_const: bool },
    Function { params: Vec<Type>, return_type: Type },
    TypeAlias(Type),
    Enum,
    Import { module: Symbol, original: Symbol },
}

/// A declared name: its kind, declared type, and where it was declared.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: Symbol,
    pub kind: SymbolKind,
    /// Pending (`Type::Unknown`) until Pass 2 resolves it.
    pub ty: Type,
    pub location: SourceLocation,
    pub is_exported: bool,
}

/// One lexical scope: a flat map from name to symbol.
#[derive(Debug, Default)]
struct Scope {
    symbols: HashMap<Symbol, SymbolEntry>,
}

/// Module-local symbol table: a stack of nested [`Scope`]s plus the root.
///
/// Lookup is innermost-first with fallback to parent scopes, then (by the
/// caller, via `GlobalSymbolTable`) to other modules. Redeclaration within
/// the same scope is a `DUPLICATE_DECLARATION` error; shadowing across scope
/// boundaries is permitted.
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { scopes: vec![Scope::default()] }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// # Panics
    /// Panics if called with no scope left to pop — popping past the root
    /// scope is an invariant violation, not a recoverable error.
    pub fn pop_scope(&mut self) {
        assert!(self.scopes.len() > 1, "cannot pop the root scope");
        self.scopes.pop();
    }

    pub fn root_scope_depth(&self) -> usize {
        self.scopes.len()
    }

    fn declare(
        &mut self,
        name: Symbol,
        kind: SymbolKind,
        ty: Type,
        location: SourceLocation,
        is_exported: bool,
    ) -> Result<(), Diagnostic> {
        let scope = self.scopes.last_mut().expect("at least one scope always present");
        if let Some(existing) = scope.symbols.get(&name) {
            return Err(Diagnostic::error(
                "DUPLICATE_DECLARATION",
                "duplicate declaration in the current scope",
                location,
            )
            .with_details(DiagnosticDetails::TypeName(format!("{:?}", existing.kind))));
        }
        scope.symbols.insert(name, SymbolEntry { name, kind, ty, location, is_exported });
        Ok(())
    }

    pub fn declare_variable(
        &mut self,
        name: Symbol,
        location: SourceLocation,
        ty: Type,
        is_const: bool,
        is_exported: bool,
    ) -> Result<(), Diagnostic> {
        self.declare(name, SymbolKind::Variable { is_const }, ty, location, is_exported)
    }

    pub fn declare_function(
        &mut self,
        name: Symbol,
        location: SourceLocation,
        return_type: Type,
        params: Vec<Type>,
        is_exported: bool,
    ) -> Result<(), Diagnostic> {
        let fn_type = Type::function(params.clone(), return_type.clone());
        self.declare(
            name,
            SymbolKind::Function { params, return_type },
            fn_type,
            location,
            is_exported,
        )
    }

    pub fn declare_type(
        &mut self,
        name: Symbol,
        location: SourceLocation,
        aliased: Type,
        is_exported: bool,
    ) -> Result<(), Diagnostic> {
        self.declare(name, SymbolKind::TypeAlias(aliased.clone()), aliased, location, is_exported)
    }

    pub fn declare_enum(
        &mut self,
        name: Symbol,
        location: SourceLocation,
        is_exported: bool,
    ) -> Result<(), Diagnostic> {
        self.declare(name, SymbolKind::Enum, Type::Enum(name), location, is_exported)
    }

    pub fn declare_import(
        &mut self,
        name: Symbol,
        location: SourceLocation,
        module: Symbol,
        original: Symbol,
    ) -> Result<(), Diagnostic> {
        self.declare(name, SymbolKind::Import { module, original }, Type::Unknown, location, false)
    }

    /// Innermost-first lookup across the active scope stack.
    pub fn lookup(&self, name: Symbol) -> Option<&SymbolEntry> {
        self.scopes.iter().rev().find_map(|scope| scope.symbols.get(&name))
    }

    pub fn lookup_mut(&mut self, name: Symbol) -> Option<&mut SymbolEntry> {
        self.scopes.iter_mut().rev().find_map(|scope| scope.symbols.get_mut(&name))
    }

    /// Every exported symbol declared at any scope, for `GlobalSymbolTable`
    /// aggregation. Exports are always declared at module (root) scope, but
    /// this scans every scope defensively rather than assuming that.
    pub fn exported_symbols(&self) -> Vec<&SymbolEntry> {
        self.scopes.iter().flat_map(|s| s.symbols.values()).filter(|e| e.is_exported).collect()
    }

    pub fn all_symbols(&self) -> Vec<&SymbolEntry> {
        self.scopes.iter().flat_map(|s| s.symbols.values()).collect()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregates the exported symbols of every analyzed module, keyed by
/// qualified module name, for cross-module resolution (`spec.md` §4.4).
#[derive(Default)]
pub struct GlobalSymbolTable {
    modules: HashMap<Symbol, HashMap<Symbol, SymbolEntry>>,
}

impl GlobalSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_module(&mut self, module: Symbol, table: &SymbolTable) {
        let exports =
            table.exported_symbols().into_iter().map(|e| (e.name, e.clone())).collect::<HashMap<_, _>>();
        self.modules.insert(module, exports);
    }

    pub fn resolve(&self, module: Symbol, name: Symbol) -> Option<&SymbolEntry> {
        self.modules.get(&module).and_then(|exports| exports.get(&name))
    }

    pub fn has_module(&self, module: Symbol) -> bool {
        self.modules.contains_key(&module)
    }

    pub fn module_exports(&self, module: Symbol) -> Option<&HashMap<Symbol, SymbolEntry>> {
        self.modules.get(&module)
    }
}
