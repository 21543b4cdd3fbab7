//! Vendor type codes and their broad categories.
//!
//! Drivers report column types as JDBC-style integer codes (`java.sql.Types`
//! numbering, which most metadata layers reuse). [`TypeCode`] wraps the raw
//! code and [`TypeCategory`] groups codes by how their values behave, which
//! is what dialect plugins need when deciding how to treat a default value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad classification of a vendor type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    /// Character data (CHAR, VARCHAR, CLOB and national variants).
    Textual,
    /// Exact and approximate numbers.
    Numeric,
    /// Raw bytes (BINARY, VARBINARY, BLOB).
    Binary,
    /// Dates, times and timestamps.
    DateTime,
    /// BIT and BOOLEAN.
    Boolean,
    /// Anything else (structured, distinct, vendor-specific).
    Other,
}

/// A vendor type code as reported in column metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCode(pub i32);

impl TypeCode {
    pub const BIT: TypeCode = TypeCode(-7);
    pub const TINYINT: TypeCode = TypeCode(-6);
    pub const SMALLINT: TypeCode = TypeCode(5);
    pub const INTEGER: TypeCode = TypeCode(4);
    pub const BIGINT: TypeCode = TypeCode(-5);
    pub const FLOAT: TypeCode = TypeCode(6);
    pub const REAL: TypeCode = TypeCode(7);
    pub const DOUBLE: TypeCode = TypeCode(8);
    pub const NUMERIC: TypeCode = TypeCode(2);
    pub const DECIMAL: TypeCode = TypeCode(3);
    pub const CHAR: TypeCode = TypeCode(1);
    pub const VARCHAR: TypeCode = TypeCode(12);
    pub const LONGVARCHAR: TypeCode = TypeCode(-1);
    pub const DATE: TypeCode = TypeCode(91);
    pub const TIME: TypeCode = TypeCode(92);
    pub const TIMESTAMP: TypeCode = TypeCode(93);
    pub const BINARY: TypeCode = TypeCode(-2);
    pub const VARBINARY: TypeCode = TypeCode(-3);
    pub const LONGVARBINARY: TypeCode = TypeCode(-4);
    pub const NULL: TypeCode = TypeCode(0);
    pub const OTHER: TypeCode = TypeCode(1111);
    pub const JAVA_OBJECT: TypeCode = TypeCode(2000);
    pub const DISTINCT: TypeCode = TypeCode(2001);
    pub const STRUCT: TypeCode = TypeCode(2002);
    pub const ARRAY: TypeCode = TypeCode(2003);
    pub const BLOB: TypeCode = TypeCode(2004);
    pub const CLOB: TypeCode = TypeCode(2005);
    pub const REF: TypeCode = TypeCode(2006);
    pub const DATALINK: TypeCode = TypeCode(70);
    pub const BOOLEAN: TypeCode = TypeCode(16);
    pub const ROWID: TypeCode = TypeCode(-8);
    pub const NCHAR: TypeCode = TypeCode(-15);
    pub const NVARCHAR: TypeCode = TypeCode(-9);
    pub const LONGNVARCHAR: TypeCode = TypeCode(-16);
    pub const NCLOB: TypeCode = TypeCode(2011);
    pub const SQLXML: TypeCode = TypeCode(2009);
    pub const TIME_WITH_TIMEZONE: TypeCode = TypeCode(2013);
    pub const TIMESTAMP_WITH_TIMEZONE: TypeCode = TypeCode(2014);

    /// Classify this code.
    pub fn category(self) -> TypeCategory {
        match self {
            TypeCode::CHAR
            | TypeCode::VARCHAR
            | TypeCode::LONGVARCHAR
            | TypeCode::CLOB
            | TypeCode::NCHAR
            | TypeCode::NVARCHAR
            | TypeCode::LONGNVARCHAR
            | TypeCode::NCLOB => TypeCategory::Textual,
            TypeCode::TINYINT
            | TypeCode::SMALLINT
            | TypeCode::INTEGER
            | TypeCode::BIGINT
            | TypeCode::FLOAT
            | TypeCode::REAL
            | TypeCode::DOUBLE
            | TypeCode::NUMERIC
            | TypeCode::DECIMAL => TypeCategory::Numeric,
            TypeCode::BINARY | TypeCode::VARBINARY | TypeCode::LONGVARBINARY | TypeCode::BLOB => {
                TypeCategory::Binary
            }
            TypeCode::DATE
            | TypeCode::TIME
            | TypeCode::TIMESTAMP
            | TypeCode::TIME_WITH_TIMEZONE
            | TypeCode::TIMESTAMP_WITH_TIMEZONE => TypeCategory::DateTime,
            TypeCode::BIT | TypeCode::BOOLEAN => TypeCategory::Boolean,
            _ => TypeCategory::Other,
        }
    }

    /// Whether values of this type are character strings.
    pub fn is_textual(self) -> bool {
        self.category() == TypeCategory::Textual
    }

    /// Standard name of this code, if it is a known one.
    pub fn standard_name(self) -> Option<&'static str> {
        let name = match self {
            TypeCode::BIT => "BIT",
            TypeCode::TINYINT => "TINYINT",
            TypeCode::SMALLINT => "SMALLINT",
            TypeCode::INTEGER => "INTEGER",
            TypeCode::BIGINT => "BIGINT",
            TypeCode::FLOAT => "FLOAT",
            TypeCode::REAL => "REAL",
            TypeCode::DOUBLE => "DOUBLE",
            TypeCode::NUMERIC => "NUMERIC",
            TypeCode::DECIMAL => "DECIMAL",
            TypeCode::CHAR => "CHAR",
            TypeCode::VARCHAR => "VARCHAR",
            TypeCode::LONGVARCHAR => "LONGVARCHAR",
            TypeCode::DATE => "DATE",
            TypeCode::TIME => "TIME",
            TypeCode::TIMESTAMP => "TIMESTAMP",
            TypeCode::BINARY => "BINARY",
            TypeCode::VARBINARY => "VARBINARY",
            TypeCode::LONGVARBINARY => "LONGVARBINARY",
            TypeCode::NULL => "NULL",
            TypeCode::OTHER => "OTHER",
            TypeCode::JAVA_OBJECT => "JAVA_OBJECT",
            TypeCode::DISTINCT => "DISTINCT",
            TypeCode::STRUCT => "STRUCT",
            TypeCode::ARRAY => "ARRAY",
            TypeCode::BLOB => "BLOB",
            TypeCode::CLOB => "CLOB",
            TypeCode::REF => "REF",
            TypeCode::DATALINK => "DATALINK",
            TypeCode::BOOLEAN => "BOOLEAN",
            TypeCode::ROWID => "ROWID",
            TypeCode::NCHAR => "NCHAR",
            TypeCode::NVARCHAR => "NVARCHAR",
            TypeCode::LONGNVARCHAR => "LONGNVARCHAR",
            TypeCode::NCLOB => "NCLOB",
            TypeCode::SQLXML => "SQLXML",
            TypeCode::TIME_WITH_TIMEZONE => "TIME_WITH_TIMEZONE",
            TypeCode::TIMESTAMP_WITH_TIMEZONE => "TIMESTAMP_WITH_TIMEZONE",
            _ => return None,
        };
        Some(name)
    }
}

impl From<i32> for TypeCode {
    fn from(code: i32) -> Self {
        TypeCode(code)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.standard_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "TYPE({})", self.0),
        }
    }
}
