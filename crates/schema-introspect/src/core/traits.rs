//! Core traits for dialect-aware schema introspection.
//!
//! This module defines the seams of the introspection engine:
//!
//! - [`MetadataSource`]: Hands out connections to a database's raw metadata
//! - [`MetadataConnection`]: Serves raw metadata rows for one run
//! - [`DialectPlugin`]: Corrects one database product's reporting quirks
//!
//! # Design Patterns
//!
//! - **Strategy**: Dialect plugins provide interchangeable normalization rules
//! - **Template Method**: Default hook implementations describe the generic
//!   behavior; a plugin only overrides what its product gets wrong

use async_trait::async_trait;

use crate::error::Result;

use super::schema::{Column, DatabaseProduct, ForeignKey, Index, Table};
use super::value::MetadataRow;

/// Which tables a run should list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    /// Catalog to restrict to.
    pub catalog: Option<String>,
    /// Schema to restrict to.
    pub schema: Option<String>,
    /// Table types to list ("TABLE", "VIEW", ...).
    pub table_types: Vec<String>,
}

impl Default for TableFilter {
    fn default() -> Self {
        Self {
            catalog: None,
            schema: None,
            table_types: vec!["TABLE".to_string()],
        }
    }
}

/// Location of a single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }
}

/// Source of raw database metadata.
///
/// Implementations wrap a connectivity layer. Each introspection run calls
/// [`connect`](MetadataSource::connect) once and drops the returned
/// connection when the run ends, whether it succeeded or not.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Acquire a connection for one introspection run.
    async fn connect(&self) -> Result<Box<dyn MetadataConnection>>;
}

/// A live connection to raw metadata.
///
/// Row labels follow `java.sql.DatabaseMetaData` naming (`TABLE_NAME`,
/// `COLUMN_NAME`, `DATA_TYPE`, `COLUMN_DEF`, `INDEX_NAME`, ...), which most
/// drivers and information-schema views can be mapped onto.
#[async_trait]
pub trait MetadataConnection: Send {
    /// Identity of the database product behind this connection.
    async fn product(&mut self) -> Result<DatabaseProduct>;

    /// One row per table matching `filter`.
    async fn tables(&mut self, filter: &TableFilter) -> Result<Vec<MetadataRow>>;

    /// One row per column of `table`.
    async fn columns(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>>;

    /// One row per primary key column of `table`.
    async fn primary_keys(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>>;

    /// One row per column pair of each foreign key declared on `table`.
    async fn foreign_keys(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>>;

    /// One row per indexed column of each index on `table`.
    async fn indexes(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>>;
}

/// Product-specific corrections applied while a schema is read.
///
/// The reader calls the hooks at fixed points: once per column after the
/// base column is built, and once per candidate index after the table's keys
/// are known. Hooks are synchronous and must not depend on anything but
/// their arguments.
///
/// # enum_dispatch
///
/// The built-in plugins are wrapped in the `DialectImpl` enum in the
/// `drivers` module, which forwards every hook with a match.
pub trait DialectPlugin: Send + Sync {
    /// Get the dialect identifier (e.g., "derby", "generic").
    fn name(&self) -> &str;

    /// Whether this plugin handles the given product.
    fn matches(&self, product: &DatabaseProduct) -> bool;

    /// Normalize a column's default value as reported by the driver.
    ///
    /// Consumes the freshly built column and returns the corrected one.
    fn normalize_column_default(&self, column: Column) -> Column {
        column
    }

    /// Whether `index` was created by the database to back the primary key.
    fn is_internal_primary_key_index(&self, _table: &Table, _index: &Index) -> bool {
        false
    }

    /// Whether `index` was created by the database to back `fk`.
    fn is_internal_foreign_key_index(
        &self,
        _table: &Table,
        _fk: &ForeignKey,
        _index: &Index,
    ) -> bool {
        false
    }
}
