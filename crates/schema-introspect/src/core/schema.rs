//! Logical schema model: tables, columns, indexes and foreign keys.
//!
//! These types are the vendor-independent output of an introspection run.
//! They are plain values: the reader builds them once per run and nothing
//! mutates them afterwards.

use serde::{Deserialize, Serialize};

use super::typemap::TypeCode;

/// Identity of the database product a metadata source talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseProduct {
    /// Product name as reported by the driver (e.g. "Apache Derby").
    pub name: String,

    /// Product version string, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DatabaseProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Catalog name, if the database has catalogs.
    pub catalog: Option<String>,

    /// Schema name.
    pub schema: Option<String>,

    /// Table name.
    pub name: String,

    /// Table type as reported by the driver ("TABLE", "VIEW", ...).
    pub table_type: String,

    /// Table comment.
    pub description: Option<String>,

    /// Column definitions, in ordinal order.
    pub columns: Vec<Column>,

    /// Primary key column names, in key order.
    pub primary_key: Vec<String>,

    /// Indexes that are part of the logical design.
    pub indexes: Vec<Index>,

    /// Foreign key constraints.
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Create an empty table of type "TABLE".
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
            table_type: "TABLE".to_string(),
            description: None,
            columns: Vec::new(),
            primary_key: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Get the qualified table name (`schema.name`, or just `name`).
    pub fn full_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Check if the table has a primary key.
    pub fn has_pk(&self) -> bool {
        !self.primary_key.is_empty()
    }

    /// Find a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns, in key order.
    pub fn pk_columns(&self) -> Vec<&Column> {
        self.primary_key
            .iter()
            .filter_map(|name| self.column(name))
            .collect()
    }

    /// Find an index by name.
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes
            .iter()
            .find(|i| i.name.as_deref() == Some(name))
    }

    /// Columns flagged as auto-increment.
    pub fn auto_increment_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_auto_increment).collect()
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Vendor type code.
    pub type_code: TypeCode,

    /// Vendor type name (e.g. "VARCHAR", "INTEGER").
    pub type_name: String,

    /// Size (length for strings, precision for numbers).
    pub size: Option<i32>,

    /// Numeric scale.
    pub scale: Option<i32>,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,

    /// Default value. Raw as reported by the driver until the dialect
    /// normalizes it.
    pub default_value: Option<String>,

    /// Whether values are generated by the database.
    pub is_auto_increment: bool,

    /// Column comment.
    pub description: Option<String>,

    /// Ordinal position (1-based).
    pub ordinal_pos: i32,
}

impl Column {
    /// Create a nullable column with no default.
    pub fn new(name: impl Into<String>, type_code: TypeCode) -> Self {
        Self {
            name: name.into(),
            type_code,
            type_name: type_code.to_string(),
            size: None,
            scale: None,
            is_nullable: true,
            is_primary_key: false,
            default_value: None,
            is_auto_increment: false,
            description: None,
            ordinal_pos: 0,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    #[must_use]
    pub fn with_auto_increment(mut self, is_auto_increment: bool) -> Self {
        self.is_auto_increment = is_auto_increment;
        self
    }

    /// Return this column with its default replaced.
    #[must_use]
    pub fn replace_default(self, default_value: Option<String>) -> Self {
        Self {
            default_value,
            ..self
        }
    }

    /// Return this column marked auto-increment, with the default cleared.
    #[must_use]
    pub fn into_auto_increment(self) -> Self {
        Self {
            default_value: None,
            is_auto_increment: true,
            ..self
        }
    }
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name. Some drivers report unnamed indexes.
    pub name: Option<String>,

    /// Indexed column names, in index order.
    pub columns: Vec<String>,

    /// Whether the index is unique.
    pub is_unique: bool,
}

impl Index {
    pub fn new(name: Option<&str>, columns: &[&str], is_unique: bool) -> Self {
        Self {
            name: name.map(str::to_string),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_unique,
        }
    }

    /// Whether this index covers exactly `columns`, in the same order.
    pub fn has_columns<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.columns.len() == columns.len()
            && self
                .columns
                .iter()
                .zip(columns)
                .all(|(a, b)| a == b.as_ref())
    }
}

/// Action taken on the referencing rows when a referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    Cascade,
    Restrict,
    SetNull,
    #[default]
    NoAction,
    SetDefault,
}

impl ReferentialAction {
    /// Map a JDBC `importedKey*` rule code.
    pub fn from_rule_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ReferentialAction::Cascade),
            1 => Some(ReferentialAction::Restrict),
            2 => Some(ReferentialAction::SetNull),
            3 => Some(ReferentialAction::NoAction),
            4 => Some(ReferentialAction::SetDefault),
            _ => None,
        }
    }
}

/// One local→foreign column pair of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub local_column: String,
    pub foreign_column: String,
}

/// Foreign key metadata. The referencing table is the table that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: Option<String>,

    /// Referenced schema name.
    pub foreign_schema: Option<String>,

    /// Referenced table name.
    pub foreign_table: String,

    /// Column pairs, in key order.
    pub references: Vec<Reference>,

    /// ON UPDATE action.
    pub on_update: ReferentialAction,

    /// ON DELETE action.
    pub on_delete: ReferentialAction,

    /// Whether the database created an index for this key on its own.
    pub has_internal_index: bool,
}

impl ForeignKey {
    /// Referencing column names, in key order.
    pub fn local_columns(&self) -> Vec<&str> {
        self.references
            .iter()
            .map(|r| r.local_column.as_str())
            .collect()
    }

    /// Referenced column names, in key order.
    pub fn foreign_columns(&self) -> Vec<&str> {
        self.references
            .iter()
            .map(|r| r.foreign_column.as_str())
            .collect()
    }
}

/// A table that could not be read, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFailure {
    pub table: String,
    pub reason: String,
}

/// Result of one introspection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Product the metadata came from.
    pub product: DatabaseProduct,

    /// Name of the dialect used to normalize it.
    pub dialect: String,

    /// Tables read successfully.
    pub tables: Vec<Table>,

    /// Tables that failed, with reasons.
    pub failures: Vec<TableFailure>,
}

impl SchemaSnapshot {
    pub fn new(product: DatabaseProduct, dialect: impl Into<String>) -> Self {
        Self {
            product,
            dialect: dialect.into(),
            tables: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// True when every requested table was read.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Find a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Serialize the snapshot as pretty JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
