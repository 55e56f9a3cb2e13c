//! Diagnostic codes for [`crate::module::ILModule::validate`]'s structural
//! checks — distinct from `sfac_sema::codes`, since these describe defects
//! in an IL module itself rather than in the source program it was built
//! from.

pub const DUPLICATE_FUNCTION: &str = "IL_DUPLICATE_FUNCTION";
pub const DUPLICATE_GLOBAL: &str = "IL_DUPLICATE_GLOBAL";
pub const MAP_GLOBAL_MISSING_ADDRESS: &str = "IL_MAP_GLOBAL_MISSING_ADDRESS";
pub const MISSING_ENTRY_POINT: &str = "IL_MISSING_ENTRY_POINT";
pub const DANGLING_EXPORT: &str = "IL_DANGLING_EXPORT";
pub const UNTERMINATED_BLOCK: &str = "IL_UNTERMINATED_BLOCK";
