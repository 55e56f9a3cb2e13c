//! Typed virtual registers (`spec.md` §4.5 "Virtual register").

use sfac_ast::Type;

/// Identifies a virtual register within one [`crate::function::ILFunction`].
/// SSA-friendly: nothing in this crate ever reuses an id once handed out by
/// [`crate::function::ILFunction::create_register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(pub u32);

#[derive(Debug, Clone)]
pub struct VirtualRegister {
    pub id: RegisterId,
    pub ty: Type,
    pub name: Option<String>,
}
