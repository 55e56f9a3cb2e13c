//! The type system: assignability, arithmetic promotion, and annotation
//! resolution (`spec.md` §4.2 "TypeSystem").

use sfac_ast::{Type, TypeExpr};
use sfac_base::{Interner, Symbol, SymbolEq};
use std::collections::HashMap;

/// Owned across every `analyze` call on one analyzer instance; built-in type
/// identity (e.g. two calls to `byte_type()` returning `Type::Byte`, which is
/// a plain value type) is naturally preserved since `Type` is structural.
pub struct TypeSystem {
    aliases: HashMap<Symbol, Type>,
}

impl TypeSystem {
    pub fn new() -> Self {
        TypeSystem { aliases: HashMap::new() }
    }

    pub fn register_alias(&mut self, name: Symbol, ty: Type) {
        self.aliases.insert(name, ty);
    }

    pub fn get_builtin_type(&self, interner: &Interner, name: Symbol) -> Option<Type> {
        if name.is(interner, "byte") {
            Some(Type::Byte)
        } else if name.is(interner, "word") {
            Some(Type::Word)
        } else if name.is(interner, "bool") {
            Some(Type::Bool)
        } else if name.is(interner, "void") {
            Some(Type::Void)
        } else if name.is(interner, "string") {
            Some(Type::String)
        } else {
            None
        }
    }

    pub fn create_array_type(&self, element: Type, length: Option<u32>) -> Type {
        Type::array(element, length)
    }

    pub fn create_function_type(&self, params: Vec<Type>, ret: Type) -> Type {
        Type::function(params, ret)
    }

    /// Resolves a parsed [`TypeExpr`] to a [`Type`], looking up built-ins
    /// first, then previously-declared aliases/enums. Returns `None` for an
    /// unrecognized name — the caller reports `UNKNOWN_TYPE`.
    pub fn resolve_type_annotation(&self, interner: &Interner, annotation: &TypeExpr) -> Option<Type> {
        match annotation {
            TypeExpr::Named(name) => {
                if let Some(builtin) = self.get_builtin_type(interner, *name) {
                    return Some(builtin);
                }
                self.aliases.get(name).cloned()
            }
            TypeExpr::Array { element, length } => {
                let element_ty = self.resolve_type_annotation(interner, element)?;
                Some(Type::array(element_ty, *length))
            }
        }
    }

    /// Widening-only assignability: identical types; `byte` widens to
    /// `word`; an enum value widens to its underlying `byte`; `Unknown`
    /// compares as assignable-to-anything so a single bad reference doesn't
    /// cascade further errors in the same statement.
    pub fn is_assignable(&self, source: &Type, target: &Type) -> bool {
        if source.is_unknown() || target.is_unknown() {
            return true;
        }
        if source == target {
            return true;
        }
        match (source, target) {
            (Type::Byte, Type::Word) => true,
            (Type::Enum(_), Type::Byte) => true,
            (Type::Array { element: se, length: sl }, Type::Array { element: te, length: tl }) => {
                self.is_assignable(se, te) && (tl.is_none() || sl == tl)
            }
            _ => false,
        }
    }

    /// Arithmetic promotion: mixed `byte`/`word` promotes to `word`;
    /// identical numeric types stay as-is. `None` when either side is
    /// non-numeric.
    pub fn common_arithmetic_type(&self, a: &Type, b: &Type) -> Option<Type> {
        if !a.is_numeric() || !b.is_numeric() {
            return None;
        }
        if *a == Type::Word || *b == Type::Word {
            Some(Type::Word)
        } else {
            Some(Type::Byte)
        }
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TypeSystem, Interner) {
        (TypeSystem::new(), Interner::new())
    }

    #[test]
    fn builtin_lookup() {
        let (ts, mut interner) = setup();
        let byte = interner.intern("byte");
        assert_eq!(ts.get_builtin_type(&interner, byte), Some(Type::Byte));
    }

    #[test]
    fn byte_widens_to_word() {
        let (ts, _interner) = setup();
        assert!(ts.is_assignable(&Type::Byte, &Type::Word));
        assert!(!ts.is_assignable(&Type::Word, &Type::Byte), "no implicit narrowing");
    }

    #[test]
    fn unknown_is_assignable_either_direction() {
        let (ts, _interner) = setup();
        assert!(ts.is_assignable(&Type::Unknown, &Type::Byte));
        assert!(ts.is_assignable(&Type::Byte, &Type::Unknown));
    }

    #[test]
    fn common_arithmetic_type_promotes_to_word() {
        let (ts, _interner) = setup();
        assert_eq!(ts.common_arithmetic_type(&Type::Byte, &Type::Word), Some(Type::Word));
        assert_eq!(ts.common_arithmetic_type(&Type::Byte, &Type::Byte), Some(Type::Byte));
        assert_eq!(ts.common_arithmetic_type(&Type::Bool, &Type::Byte), None);
    }

    #[test]
    fn resolve_type_annotation_falls_back_to_alias() {
        let (mut ts, mut interner) = setup();
        let name = interner.intern("Color");
        ts.register_alias(name, Type::Byte);
        let annotation = TypeExpr::Named(name);
        assert_eq!(ts.resolve_type_annotation(&interner, &annotation), Some(Type::Byte));
    }

    #[test]
    fn resolve_type_annotation_unknown_name_is_none() {
        let (ts, mut interner) = setup();
        let name = interner.intern("Bogus");
        let annotation = TypeExpr::Named(name);
        assert_eq!(ts.resolve_type_annotation(&interner, &annotation), None);
    }

    #[test]
    fn array_assignability_respects_length() {
        let (ts, _interner) = setup();
        let sized = Type::array(Type::Byte, Some(4));
        let unsized_param = Type::array(Type::Byte, None);
        assert!(ts.is_assignable(&sized, &unsized_param));
        let wrong_length = Type::array(Type::Byte, Some(5));
        assert!(!ts.is_assignable(&sized, &wrong_length));
    }
}
