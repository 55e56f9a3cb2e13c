//! `ILModule`: the top-level IL container (`spec.md` §4.5).

use std::collections::HashMap;

use sfac_ast::{StorageClass, Type};
use sfac_base::{Diagnostic, Span};
use sfac_sema::span_to_location;

use crate::codes;
use crate::function::ILFunction;

#[derive(Debug, Clone)]
pub struct GlobalVariable {
    pub name: String,
    pub ty: Type,
    pub storage_class: StorageClass,
    pub initial_value: Option<i64>,
    /// Required when `storage_class` is `StorageClass::Map`; `validate()`
    /// reports a missing one.
    pub address: Option<u32>,
    pub is_exported: bool,
    pub is_constant: bool,
}

#[derive(Debug, Clone)]
pub struct ImportSpec {
    pub local_name: String,
    pub original_name: String,
    pub module_path: String,
    pub type_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Function,
    Variable,
    Type,
}

#[derive(Debug, Clone)]
pub struct ExportSpec {
    pub local_name: String,
    pub exported_name: String,
    pub target: ExportTarget,
}

pub struct ILModule {
    pub name: String,
    functions: HashMap<String, ILFunction>,
    globals: HashMap<String, GlobalVariable>,
    imports: Vec<ImportSpec>,
    exports: Vec<ExportSpec>,
    entry_point: Option<String>,
    metadata: HashMap<String, String>,
}

impl ILModule {
    pub fn new(name: impl Into<String>) -> Self {
        ILModule {
            name: name.into(),
            functions: HashMap::new(),
            globals: HashMap::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            entry_point: None,
            metadata: HashMap::new(),
        }
    }

    /// Adds `function` under its own name. Errs with `IL_DUPLICATE_FUNCTION`
    /// rather than overwriting, mirroring `SymbolTable::declare_*`'s
    /// `Result<(), Diagnostic>` convention.
    pub fn add_function(&mut self, function: ILFunction) -> Result<(), Diagnostic> {
        if self.functions.contains_key(&function.name) {
            return Err(Diagnostic::error(
                codes::DUPLICATE_FUNCTION,
                format!("function '{}' is already defined in this module", function.name),
                span_to_location(Span::default()),
            ));
        }
        self.functions.insert(function.name.clone(), function);
        Ok(())
    }

    pub fn get_function(&self, name: &str) -> Option<&ILFunction> {
        self.functions.get(name)
    }

    pub fn get_function_mut(&mut self, name: &str) -> Option<&mut ILFunction> {
        self.functions.get_mut(name)
    }

    pub fn remove_function(&mut self, name: &str) -> Option<ILFunction> {
        self.functions.remove(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &ILFunction> {
        self.functions.values()
    }

    pub fn add_global(&mut self, global: GlobalVariable) -> Result<(), Diagnostic> {
        if self.globals.contains_key(&global.name) {
            return Err(Diagnostic::error(
                codes::DUPLICATE_GLOBAL,
                format!("global '{}' is already defined in this module", global.name),
                span_to_location(Span::default()),
            ));
        }
        self.globals.insert(global.name.clone(), global);
        Ok(())
    }

    pub fn get_global(&self, name: &str) -> Option<&GlobalVariable> {
        self.globals.get(name)
    }

    pub fn globals(&self) -> impl Iterator<Item = &GlobalVariable> {
        self.globals.values()
    }

    pub fn declare_import(&mut self, import: ImportSpec) {
        self.imports.push(import);
    }

    pub fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    pub fn declare_export(&mut self, export: ExportSpec) {
        self.exports.push(export);
    }

    pub fn exports(&self) -> &[ExportSpec] {
        &self.exports
    }

    pub fn set_entry_point(&mut self, function_name: impl Into<String>) {
        self.entry_point = Some(function_name.into());
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Resolves `name` to whatever binds it in this module: a local function
    /// or global takes priority over an import of the same name
    /// (`spec.md` §4.5 `resolveSymbol`).
    pub fn resolve_symbol(&self, name: &str) -> Option<SymbolBinding<'_>> {
        if self.functions.contains_key(name) {
            return Some(SymbolBinding::Function(name));
        }
        if let Some(global) = self.globals.get(name) {
            return Some(SymbolBinding::Global(global));
        }
        self.imports.iter().find(|i| i.local_name == name).map(SymbolBinding::Import)
    }

    /// Structural validation: never panics or returns early on the first
    /// problem, collects everything wrong and lets the caller decide what to
    /// do with it (`spec.md` §4.5 supplement, §7's "no exception escapes"
    /// propagation policy).
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let loc = || span_to_location(Span::default());

        if let Some(entry) = &self.entry_point {
            if !self.functions.contains_key(entry) {
                diagnostics.push(Diagnostic::error(
                    codes::MISSING_ENTRY_POINT,
                    format!("entry point '{entry}' does not name a function in this module"),
                    loc(),
                ));
            }
        }

        for export in &self.exports {
            let exists = match export.target {
                ExportTarget::Function => self.functions.contains_key(&export.local_name),
                ExportTarget::Variable => self.globals.contains_key(&export.local_name),
                // Type exports have no representation of their own in this
                // model; they re-export a name this module otherwise binds.
                ExportTarget::Type => {
                    self.functions.contains_key(&export.local_name)
                        || self.globals.contains_key(&export.local_name)
                }
            };
            if !exists {
                diagnostics.push(Diagnostic::error(
                    codes::DANGLING_EXPORT,
                    format!("export '{}' does not refer to anything this module defines", export.local_name),
                    loc(),
                ));
            }
        }

        for global in self.globals.values() {
            if global.storage_class == StorageClass::Map && global.address.is_none() {
                diagnostics.push(Diagnostic::error(
                    codes::MAP_GLOBAL_MISSING_ADDRESS,
                    format!("global '{}' has storage class Map but no address", global.name),
                    loc(),
                ));
            }
        }

        for function in self.functions.values() {
            for block in function.get_blocks() {
                if !block.has_terminator() {
                    diagnostics.push(Diagnostic::error(
                        codes::UNTERMINATED_BLOCK,
                        format!("block '{}' in function '{}' has no terminator", block.label(), function.name),
                        loc(),
                    ));
                }
            }
        }

        diagnostics
    }
}

pub enum SymbolBinding<'a> {
    Function(&'a str),
    Global(&'a GlobalVariable),
    Import(&'a ImportSpec),
}
