//! Stable diagnostic code identifiers (`spec.md` §7 "Error taxonomy").

pub const DUPLICATE_DECLARATION: &str = "DUPLICATE_DECLARATION";
pub const UNDEFINED_SYMBOL: &str = "UNDEFINED_SYMBOL";
pub const ASSIGN_TO_CONST: &str = "ASSIGN_TO_CONST";
pub const CONST_WITHOUT_INITIALIZER: &str = "CONST_WITHOUT_INITIALIZER";
pub const MISSING_TYPE_OR_INITIALIZER: &str = "MISSING_TYPE_OR_INITIALIZER";

pub const UNKNOWN_TYPE: &str = "UNKNOWN_TYPE";
pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
pub const EXPECTED_NUMERIC: &str = "EXPECTED_NUMERIC";
pub const EXPECTED_BOOL_OR_NUMERIC: &str = "EXPECTED_BOOL_OR_NUMERIC";
pub const ENUM_VALUE_OUT_OF_RANGE: &str = "ENUM_VALUE_OUT_OF_RANGE";
pub const ARG_COUNT_MISMATCH: &str = "ARG_COUNT_MISMATCH";
pub const RETURN_TYPE_MISMATCH: &str = "RETURN_TYPE_MISMATCH";
pub const RETURN_VALUE_IN_VOID: &str = "RETURN_VALUE_IN_VOID";
pub const RETURN_MISSING_VALUE: &str = "RETURN_MISSING_VALUE";

pub const BREAK_OUTSIDE_LOOP: &str = "BREAK_OUTSIDE_LOOP";
pub const CONTINUE_OUTSIDE_LOOP: &str = "CONTINUE_OUTSIDE_LOOP";
pub const MISSING_RETURN: &str = "MISSING_RETURN";
pub const UNREACHABLE_CODE: &str = "UNREACHABLE_CODE";

pub const RECURSION_DETECTED: &str = "RECURSION_DETECTED";
pub const INDIRECT_RECURSION_DETECTED: &str = "INDIRECT_RECURSION_DETECTED";

pub const IMPORT_UNRESOLVED: &str = "IMPORT_UNRESOLVED";
pub const IMPORT_NOT_EXPORTED: &str = "IMPORT_NOT_EXPORTED";
pub const CIRCULAR_IMPORT: &str = "CIRCULAR_IMPORT";

pub const UNUSED_VARIABLE: &str = "UNUSED_VARIABLE";
