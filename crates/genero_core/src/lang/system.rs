//! Predefined system variables and constants.
//!
//! Every 4GL program sees a handful of implicitly-defined names: the runtime
//! status registers (`status`, `int_flag`, `quit_flag`), the SQL
//! communication area record (`sqlca`), and the predefined constants
//! (`TRUE`, `FALSE`, `NOTFOUND`). They are modeled as const registries so
//! the completion catalog can be built from them without an init step, and
//! so tests can assert against the same data the resolver uses.
//!
//! ## Notes
//! - These names are *not* reserved words: a module may shadow them, in
//!   which case the module's definition wins during lookup.

/// Metadata for one predefined variable.
#[derive(Debug, Clone, Copy)]
pub struct SystemVariableInfo {
    /// Canonical (lowercase) name.
    pub name: &'static str,
    /// Builtin type spelling as the user would write it.
    pub type_name: &'static str,
    pub summary: &'static str,
}

/// Metadata for one predefined constant.
#[derive(Debug, Clone, Copy)]
pub struct SystemConstantInfo {
    /// Canonical (uppercase by convention) name.
    pub name: &'static str,
    pub type_name: &'static str,
    /// Literal value spelling, for display in completion details.
    pub value: &'static str,
}

/// Fields of the `sqlca` record, exposed for member-access completion.
pub const SQLCA_FIELDS: &[SystemVariableInfo] = &[
    SystemVariableInfo { name: "sqlcode", type_name: "integer", summary: "SQL status of the last statement" },
    SystemVariableInfo { name: "sqlerrm", type_name: "char(71)", summary: "error message parameter" },
    SystemVariableInfo { name: "sqlerrp", type_name: "char(8)", summary: "internal use" },
    SystemVariableInfo { name: "sqlerrd", type_name: "array[6] of integer", summary: "detail codes for the last statement" },
    SystemVariableInfo { name: "sqlawarn", type_name: "char(8)", summary: "warning flags for the last statement" },
];

/// The predefined variable registry.
pub const SYSTEM_VARIABLES: &[SystemVariableInfo] = &[
    SystemVariableInfo { name: "status", type_name: "integer", summary: "status of the last statement executed" },
    SystemVariableInfo { name: "int_flag", type_name: "integer", summary: "set when the user sends an interrupt" },
    SystemVariableInfo { name: "quit_flag", type_name: "integer", summary: "set when the user sends a quit signal" },
    SystemVariableInfo { name: "sqlca", type_name: "record", summary: "SQL communication area" },
];

/// The predefined constant registry.
pub const SYSTEM_CONSTANTS: &[SystemConstantInfo] = &[
    SystemConstantInfo { name: "TRUE", type_name: "boolean", value: "1" },
    SystemConstantInfo { name: "FALSE", type_name: "boolean", value: "0" },
    SystemConstantInfo { name: "NOTFOUND", type_name: "integer", value: "100" },
];

/// Look up a predefined variable by name. Case-insensitive.
pub fn variable(name: &str) -> Option<&'static SystemVariableInfo> {
    SYSTEM_VARIABLES.iter().find(|v| v.name.eq_ignore_ascii_case(name))
}

/// Look up a predefined constant by name. Case-insensitive.
pub fn constant(name: &str) -> Option<&'static SystemConstantInfo> {
    SYSTEM_CONSTANTS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_case_insensitive() {
        assert!(variable("STATUS").is_some());
        assert!(variable("SqlCa").is_some());
        assert!(constant("notfound").is_some());
        assert!(variable("nope").is_none());
    }

    #[test]
    fn sqlca_exposes_sqlcode() {
        assert!(SQLCA_FIELDS.iter().any(|f| f.name == "sqlcode"));
    }
}
