//! Descriptors for procedures, parameters, and result-set shapes.

use serde::{Deserialize, Serialize};
use sprocgen_core::SqlTypeCategory;

/// Identity of one stored procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureRef {
    /// Owning schema; may be empty.
    pub schema: String,
    /// Procedure name; never empty.
    pub name: String,
}

impl ProcedureRef {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// The name used to invoke the procedure: `schema.name`, or the bare
    /// name when no schema is present.
    pub fn qualified_name(&self) -> String {
        if self.schema.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema, self.name)
        }
    }

    /// The procedure name shaped into a legal method identifier.
    pub fn method_name(&self) -> String {
        self.name.replace(' ', "_")
    }
}

/// Direction of one procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamDirection {
    Input,
    Output,
    Return,
    Other,
}

/// One procedure parameter as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Raw wire name, typically `@`-prefixed.
    pub name: String,
    pub direction: ParamDirection,
    /// Catalog type name, matched case-insensitively.
    pub raw_type: String,
    /// Declared byte/character length; -1 when not applicable.
    pub size: i32,
    pub nullable: bool,
}

impl ParameterDescriptor {
    /// The parameter name shaped into a legal argument identifier.
    pub fn ident(&self) -> String {
        self.name.trim_start_matches('@').replace(' ', "_")
    }

    /// The resolved storage type family (unknown names fall back to
    /// `Variant`).
    pub fn category(&self) -> SqlTypeCategory {
        SqlTypeCategory::parse_or_variant(&self.raw_type)
    }

    pub fn is_input(&self) -> bool {
        self.direction == ParamDirection::Input
    }

    pub fn is_output(&self) -> bool {
        self.direction == ParamDirection::Output
    }
}

/// One column of a probed result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
}

/// The shape of one result set, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSetDescriptor {
    pub columns: Vec<ColumnDescriptor>,
}

/// Everything known about one stored procedure after probing.
///
/// A failed probe is data, not a control-flow event: the procedure stays in
/// the catalog with `error` set and empty result sets, so the rest of the
/// run is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureSignature {
    pub procedure: ProcedureRef,
    /// Parameters in declaration order, with the synthetic return-value
    /// entry already filtered out.
    pub parameters: Vec<ParameterDescriptor>,
    pub result_sets: Vec<ResultSetDescriptor>,
    /// Captured probe failure, surfaced later as a generated `#warning`.
    pub error: Option<String>,
}

impl ProcedureSignature {
    pub fn has_result_sets(&self) -> bool {
        !self.result_sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        assert_eq!(ProcedureRef::new("dbo", "GetUser").qualified_name(), "dbo.GetUser");
        assert_eq!(ProcedureRef::new("", "GetUser").qualified_name(), "GetUser");
    }

    #[test]
    fn test_method_name_replaces_spaces() {
        assert_eq!(ProcedureRef::new("dbo", "Get User").method_name(), "Get_User");
    }

    #[test]
    fn test_parameter_ident_strips_marker() {
        let p = ParameterDescriptor {
            name: "@UserId".to_string(),
            direction: ParamDirection::Input,
            raw_type: "int".to_string(),
            size: -1,
            nullable: false,
        };
        assert_eq!(p.ident(), "UserId");
        assert_eq!(p.category(), SqlTypeCategory::Int);
    }
}
