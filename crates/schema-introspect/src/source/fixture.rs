//! Metadata source backed by a recorded database dump.
//!
//! A fixture holds the product identity and, per table, the raw rows a
//! driver would return for each metadata query:
//!
//! ```yaml
//! product:
//!   name: Apache Derby
//!   version: 10.14.2.0
//! tables:
//!   - table: { TABLE_SCHEM: APP, TABLE_NAME: ORDERS, TABLE_TYPE: TABLE }
//!     columns:
//!       - { COLUMN_NAME: ID, DATA_TYPE: 4, COLUMN_DEF: GENERATED_BY_DEFAULT }
//!     primary_keys:
//!       - { COLUMN_NAME: ID, KEY_SEQ: 1 }
//!     indexes:
//!       - { INDEX_NAME: SQL100101120000010, COLUMN_NAME: ID, NON_UNIQUE: false }
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::schema::DatabaseProduct;
use crate::core::traits::{MetadataConnection, MetadataSource, TableFilter, TableRef};
use crate::core::value::MetadataRow;
use crate::error::{IntrospectError, Result};

const TABLE_CAT: &str = "TABLE_CAT";
const TABLE_SCHEM: &str = "TABLE_SCHEM";
const TABLE_NAME: &str = "TABLE_NAME";
const TABLE_TYPE: &str = "TABLE_TYPE";

/// A recorded database: product identity plus raw rows per table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDatabase {
    pub product: DatabaseProduct,
    #[serde(default)]
    pub tables: Vec<FixtureTable>,
}

/// Raw metadata recorded for one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureTable {
    /// The table's row as returned by the table listing.
    pub table: MetadataRow,
    #[serde(default)]
    pub columns: Vec<MetadataRow>,
    #[serde(default)]
    pub primary_keys: Vec<MetadataRow>,
    #[serde(default)]
    pub foreign_keys: Vec<MetadataRow>,
    #[serde(default)]
    pub indexes: Vec<MetadataRow>,
    /// When set, every per-table query fails with this message, the way a
    /// driver fails on a table it cannot describe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FixtureTable {
    fn name(&self) -> Option<String> {
        self.table.get_str(TABLE_NAME)
    }

    fn is_at(&self, location: &TableRef) -> bool {
        let same = |field: &str, wanted: &Option<String>| match (self.table.get_str(field), wanted) {
            (Some(have), Some(want)) => have == *want,
            _ => true,
        };
        self.name().as_deref() == Some(location.name.as_str())
            && same(TABLE_SCHEM, &location.schema)
            && same(TABLE_CAT, &location.catalog)
    }

    fn is_listed(&self, filter: &TableFilter) -> bool {
        let same = |field: &str, wanted: &Option<String>| match wanted {
            Some(want) => self.table.get_str(field).as_deref() == Some(want.as_str()),
            None => true,
        };
        let table_type = self
            .table
            .get_str(TABLE_TYPE)
            .unwrap_or_else(|| "TABLE".to_string());

        same(TABLE_SCHEM, &filter.schema)
            && same(TABLE_CAT, &filter.catalog)
            && filter
                .table_types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&table_type))
    }
}

/// Metadata source serving a [`FixtureDatabase`].
///
/// Connections are counted so callers can check that every run released
/// the connection it acquired.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    database: Arc<FixtureDatabase>,
    open: Arc<AtomicUsize>,
    opened: Arc<AtomicUsize>,
}

impl FixtureSource {
    pub fn new(database: FixtureDatabase) -> Self {
        Self {
            database: Arc::new(database),
            open: Arc::new(AtomicUsize::new(0)),
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load a fixture file. Files ending in `.json` are read as JSON,
    /// anything else as YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        debug!("Loading metadata fixture from {}", path.display());
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse a YAML fixture. A malformed dump is a metadata problem, not a
    /// configuration one, so it surfaces as [`IntrospectError::Fixture`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map(Self::new)
            .map_err(|e| IntrospectError::Fixture(e.to_string()))
    }

    /// Parse a JSON fixture.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| IntrospectError::Fixture(e.to_string()))
    }

    /// The recorded database.
    pub fn database(&self) -> &FixtureDatabase {
        &self.database
    }

    /// Connections currently held.
    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Connections handed out since the source was created.
    pub fn connections_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for FixtureSource {
    async fn connect(&self) -> Result<Box<dyn MetadataConnection>> {
        self.open.fetch_add(1, Ordering::SeqCst);
        self.opened.fetch_add(1, Ordering::SeqCst);
        trace!("Fixture connection opened");
        Ok(Box::new(FixtureConnection {
            database: Arc::clone(&self.database),
            open: Arc::clone(&self.open),
        }))
    }
}

/// A connection to a [`FixtureSource`]. Released on drop.
#[derive(Debug)]
pub struct FixtureConnection {
    database: Arc<FixtureDatabase>,
    open: Arc<AtomicUsize>,
}

impl FixtureConnection {
    fn table(&self, location: &TableRef) -> Result<&FixtureTable> {
        let table = self
            .database
            .tables
            .iter()
            .find(|t| t.is_at(location))
            .ok_or_else(|| IntrospectError::metadata(&location.name, "table not found in fixture"))?;

        match table.error {
            Some(ref message) => Err(IntrospectError::source(message.clone())),
            None => Ok(table),
        }
    }
}

impl Drop for FixtureConnection {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
        trace!("Fixture connection released");
    }
}

#[async_trait]
impl MetadataConnection for FixtureConnection {
    async fn product(&mut self) -> Result<DatabaseProduct> {
        Ok(self.database.product.clone())
    }

    async fn tables(&mut self, filter: &TableFilter) -> Result<Vec<MetadataRow>> {
        Ok(self
            .database
            .tables
            .iter()
            .filter(|t| t.is_listed(filter))
            .map(|t| t.table.clone())
            .collect())
    }

    async fn columns(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>> {
        Ok(self.table(table)?.columns.clone())
    }

    async fn primary_keys(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>> {
        Ok(self.table(table)?.primary_keys.clone())
    }

    async fn foreign_keys(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>> {
        Ok(self.table(table)?.foreign_keys.clone())
    }

    async fn indexes(&mut self, table: &TableRef) -> Result<Vec<MetadataRow>> {
        Ok(self.table(table)?.indexes.clone())
    }
}
