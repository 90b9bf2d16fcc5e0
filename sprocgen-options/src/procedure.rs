//! Per-procedure generation overrides.

use std::{fmt, str::FromStr};

/// Return-type strategy for a generated wrapper method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// Pick a strategy from the probed result sets.
    Auto,
    /// Stream rows back through a data reader.
    DataReader,
    /// Materialize every result set into an untyped dataset.
    DataSet,
    /// Fill a named typed dataset.
    TypedDataSet,
    /// No result sets; output values travel through out-parameters.
    None,
}

impl ReturnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnKind::Auto => "Auto",
            ReturnKind::DataReader => "SqlDataReader",
            ReturnKind::DataSet => "DataSet",
            ReturnKind::TypedDataSet => "TypedDataSet",
            ReturnKind::None => "None",
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReturnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ReturnKind::Auto),
            "sqldatareader" | "datareader" => Ok(ReturnKind::DataReader),
            "dataset" => Ok(ReturnKind::DataSet),
            "typeddataset" => Ok(ReturnKind::TypedDataSet),
            "none" => Ok(ReturnKind::None),
            _ => Err(format!("invalid procedure return type '{}'", s)),
        }
    }
}

/// Generation overrides for one stored procedure, or the wildcard default
/// (`Name="?"`) applied to every procedure without an explicit entry.
#[derive(Debug, Clone)]
pub struct ProcedureOptions {
    /// Procedure name the override applies to (`?` for the wildcard).
    pub name: String,
    /// Drop the procedure from the generation set entirely.
    pub ignore: bool,
    /// Requested return strategy; `None` means unspecified, which resolves
    /// as [`ReturnKind::Auto`].
    pub return_kind: Option<ReturnKind>,
    /// Typed dataset name, required when the strategy is `TypedDataSet`.
    pub typed_result: Option<String>,
    /// Parameters carried with a nullable-capable wrapper type.
    pub nullable_params: Vec<String>,
}

impl ProcedureOptions {
    /// A synthesized all-defaults policy for procedures with no override.
    pub fn auto(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignore: false,
            return_kind: None,
            typed_result: None,
            nullable_params: Vec::new(),
        }
    }

    /// Whether the named parameter is in the nullable set. Names compare
    /// with any leading `@` stripped from both sides.
    pub fn is_nullable(&self, param: &str) -> bool {
        let wanted = param.trim_start_matches('@');
        self.nullable_params
            .iter()
            .any(|p| p.trim().trim_start_matches('@') == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_kind_parse() {
        assert_eq!("Auto".parse::<ReturnKind>().unwrap(), ReturnKind::Auto);
        assert_eq!("SqlDataReader".parse::<ReturnKind>().unwrap(), ReturnKind::DataReader);
        assert_eq!("dataset".parse::<ReturnKind>().unwrap(), ReturnKind::DataSet);
        assert_eq!("TypedDataSet".parse::<ReturnKind>().unwrap(), ReturnKind::TypedDataSet);
        assert_eq!("None".parse::<ReturnKind>().unwrap(), ReturnKind::None);
        assert!("Scalar".parse::<ReturnKind>().is_err());
    }

    #[test]
    fn test_nullable_lookup_ignores_at_prefix() {
        let mut po = ProcedureOptions::auto("GetUser");
        po.nullable_params = vec!["@id".to_string(), "name".to_string()];
        assert!(po.is_nullable("@id"));
        assert!(po.is_nullable("id"));
        assert!(po.is_nullable("@name"));
        assert!(!po.is_nullable("@other"));
    }
}
