//! SQL Server catalog type vocabulary and code-generation type mapping.

use std::fmt;
use std::str::FromStr;

/// A SQL Server storage type family, as reported by the procedure catalog.
///
/// This is a closed vocabulary: synonyms (`numeric`, `sysname`,
/// `sql_variant`) are folded into their canonical family during parsing, and
/// any name outside the vocabulary resolves to [`SqlTypeCategory::Variant`],
/// the one opaque fallback, so generation keeps going for procedures that
/// use exotic or user-defined types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlTypeCategory {
    BigInt,
    Int,
    SmallInt,
    TinyInt,
    Bit,
    Decimal,
    Float,
    Real,
    Money,
    SmallMoney,
    DateTime,
    SmallDateTime,
    Char,
    VarChar,
    NChar,
    NVarChar,
    Text,
    NText,
    Binary,
    VarBinary,
    Timestamp,
    UniqueIdentifier,
    Variant,
}

impl SqlTypeCategory {
    /// Parse a raw catalog type name, case-insensitively.
    ///
    /// Synonyms are resolved first; `None` means the name is outside the
    /// known vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        let category = match lowered.as_str() {
            // Synonyms and common user-defined aliases
            "numeric" => Self::Decimal,
            "sysname" => Self::NVarChar,
            "sql_variant" | "variant" => Self::Variant,

            "bigint" => Self::BigInt,
            "int" => Self::Int,
            "smallint" => Self::SmallInt,
            "tinyint" => Self::TinyInt,
            "bit" => Self::Bit,
            "decimal" => Self::Decimal,
            "float" => Self::Float,
            "real" => Self::Real,
            "money" => Self::Money,
            "smallmoney" => Self::SmallMoney,
            "datetime" => Self::DateTime,
            "smalldatetime" => Self::SmallDateTime,
            "char" => Self::Char,
            "varchar" => Self::VarChar,
            "nchar" => Self::NChar,
            "nvarchar" => Self::NVarChar,
            "text" => Self::Text,
            "ntext" => Self::NText,
            "binary" => Self::Binary,
            "varbinary" => Self::VarBinary,
            "timestamp" | "rowversion" => Self::Timestamp,
            "uniqueidentifier" => Self::UniqueIdentifier,
            _ => return None,
        };
        Some(category)
    }

    /// Parse a raw catalog type name, routing unknown names to the
    /// [`SqlTypeCategory::Variant`] fallback.
    pub fn parse_or_variant(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::Variant)
    }

    /// The `SqlDbType` enumeration member referenced in generated code.
    pub fn sql_db_type(&self) -> &'static str {
        match self {
            Self::BigInt => "BigInt",
            Self::Int => "Int",
            Self::SmallInt => "SmallInt",
            Self::TinyInt => "TinyInt",
            Self::Bit => "Bit",
            Self::Decimal => "Decimal",
            Self::Float => "Float",
            Self::Real => "Real",
            Self::Money => "Money",
            Self::SmallMoney => "SmallMoney",
            Self::DateTime => "DateTime",
            Self::SmallDateTime => "SmallDateTime",
            Self::Char => "Char",
            Self::VarChar => "VarChar",
            Self::NChar => "NChar",
            Self::NVarChar => "NVarChar",
            Self::Text => "Text",
            Self::NText => "NText",
            Self::Binary => "Binary",
            Self::VarBinary => "VarBinary",
            Self::Timestamp => "Timestamp",
            Self::UniqueIdentifier => "UniqueIdentifier",
            Self::Variant => "Variant",
        }
    }

    /// The nullable-capable wire type (`System.Data.SqlTypes`) for this
    /// family. Families with no dedicated wrapper map to `object`.
    pub fn wire_type(&self) -> &'static str {
        match self {
            Self::BigInt => "SqlInt64",
            Self::Int => "SqlInt32",
            Self::SmallInt => "SqlInt16",
            Self::TinyInt => "SqlByte",
            Self::DateTime | Self::SmallDateTime => "SqlDateTime",
            Self::Char | Self::NChar | Self::VarChar | Self::NVarChar | Self::Text | Self::NText => {
                "SqlString"
            }
            Self::Binary | Self::VarBinary => "SqlBinary",
            Self::Bit => "SqlBoolean",
            Self::Decimal => "SqlDecimal",
            Self::Float => "SqlDouble",
            Self::Money | Self::SmallMoney => "SqlMoney",
            Self::Real => "SqlSingle",
            Self::UniqueIdentifier => "SqlGuid",
            Self::Timestamp | Self::Variant => "object",
        }
    }

    /// The plain framework type for this family.
    pub fn native_type(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::BigInt => "long",
            // smallint and tinyint both travel as short in the generated
            // surface, and the inexact money family as float
            Self::SmallInt | Self::TinyInt => "short",
            Self::Bit => "bool",
            Self::Decimal | Self::Money => "decimal",
            Self::Float | Self::Real | Self::SmallMoney => "float",
            Self::Binary | Self::VarBinary | Self::Timestamp => "byte[]",
            Self::Char | Self::NChar | Self::VarChar | Self::NVarChar | Self::Text | Self::NText => {
                "string"
            }
            Self::DateTime | Self::SmallDateTime => "DateTime",
            Self::UniqueIdentifier => "Guid",
            Self::Variant => "object",
        }
    }

    /// Whether an output parameter of this family needs an explicit
    /// byte/character length on the call-site parameter object.
    pub fn requires_output_size(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::VarChar | Self::NChar | Self::NVarChar | Self::Binary | Self::VarBinary
        )
    }

    /// The typed-null reader helper for this family's wire type, if one
    /// exists. Only five wire families have readers; nullable output
    /// parameters of any other family are a generation error.
    pub fn nullable_reader(&self) -> Option<&'static str> {
        match self.wire_type() {
            "SqlDateTime" => Some("ReadSqlDateTime"),
            "SqlInt32" => Some("ReadSqlInt32"),
            "SqlMoney" => Some("ReadSqlMoney"),
            "SqlString" => Some("ReadSqlString"),
            "SqlGuid" => Some("ReadSqlGuid"),
            _ => None,
        }
    }

    /// Whether this family is numeric-like for placeholder purposes
    /// (accepts a bare `1` literal in a speculative call).
    pub fn accepts_numeric_placeholder(&self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::BigInt
                | Self::SmallInt
                | Self::TinyInt
                | Self::Bit
                | Self::Decimal
                | Self::Float
                | Self::Money
                | Self::SmallMoney
                | Self::Real
                | Self::Binary
                | Self::VarBinary
                | Self::Timestamp
        )
    }

    /// Whether this family is a date/time family.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime | Self::SmallDateTime)
    }
}

impl fmt::Display for SqlTypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_db_type())
    }
}

/// How generated method identifiers are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierFormat {
    /// Keep the catalog spelling as-is.
    #[default]
    Preserve,
    /// PascalCase.
    Pascal,
    /// camelCase.
    Camel,
}

impl IdentifierFormat {
    /// Apply the format to an identifier.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::Pascal => crate::to_pascal_case(name),
            Self::Camel => crate::to_camel_case(name),
        }
    }
}

impl FromStr for IdentifierFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "pascal" | "pascalcase" => Ok(Self::Pascal),
            "camel" | "camelcase" => Ok(Self::Camel),
            _ => Err(format!(
                "unknown identifier format '{}', expected 'preserve', 'pascal', or 'camel'",
                s
            )),
        }
    }
}
