//! The type vocabulary shared by the AST's sidecar type annotations and the
//! IL's virtual-register types (`spec.md` §3 "Types (built-ins)").
//!
//! `Type` is owned and `Clone`, not arena-allocated: types are small,
//! structurally compared constantly during assignability checks, and never
//! need reference identity the way AST nodes do.

use sfac_base::Symbol;
use std::fmt;

/// A resolved type. `Unknown` stands in for a type that failed to resolve
/// (e.g. a reference to an undeclared alias) so that later checks in the
/// same statement degrade gracefully instead of cascading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 8-bit unsigned.
    Byte,
    /// 16-bit unsigned.
    Word,
    Bool,
    Void,
    /// Immutable string literal.
    String,
    Array {
        element: Box<Type>,
        /// `None` for an unsized parameter array (`T[]`).
        length: Option<u32>,
    },
    Function {
        params: Vec<Type>,
        ret: Box<Type>,
    },
    /// A named `TypeDecl` alias, resolved by symbol rather than expanded.
    Alias(Symbol),
    /// An enum type, represented by its declared name and underlying byte
    /// range it was checked against in Pass 2.
    Enum(Symbol),
    Unknown,
}

impl Type {
    pub fn array(element: Type, length: Option<u32>) -> Type {
        Type::Array { element: Box::new(element), length }
    }

    pub fn function(params: Vec<Type>, ret: Type) -> Type {
        Type::Function { params, ret: Box::new(ret) }
    }

    /// `byte` or `word`: the two built-in integer types.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Byte | Type::Word)
    }

    /// Conditions accept `bool` or any numeric type per `spec.md` §3.
    pub fn is_truthy_compatible(&self) -> bool {
        matches!(self, Type::Bool) || self.is_numeric()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Byte => write!(f, "byte"),
            Type::Word => write!(f, "word"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "string"),
            Type::Array { element, length } => match length {
                Some(n) => write!(f, "{element}[{n}]"),
                None => write!(f, "{element}[]"),
            },
            Type::Function { params, ret } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {ret}")
            }
            Type::Alias(sym) => write!(f, "<alias:{}>", sym.index()),
            Type::Enum(sym) => write!(f, "<enum:{}>", sym.index()),
            Type::Unknown => write!(f, "<unknown>"),
        }
    }
}
