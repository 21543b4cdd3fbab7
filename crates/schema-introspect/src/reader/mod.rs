//! Generic schema reader.
//!
//! [`SchemaReader`] coordinates an introspection run:
//! 1. Acquire a metadata connection
//! 2. Identify the product and pick its dialect plugin
//! 3. List tables and read each one (columns, keys, indexes)
//! 4. Collect tables that failed without aborting the run
//!
//! Dialect hooks run at two points of every table read: after each column
//! is built, and after the table's keys are known, for each candidate index.

mod columns;
mod indices;
mod keys;

pub use columns::{read_column, read_columns};
pub use indices::{read_indices, remove_internal_indices};
pub use keys::{mark_primary_key, read_foreign_keys, read_primary_key};

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::ReaderConfig;
use crate::core::catalog::DialectRegistry;
use crate::core::schema::{DatabaseProduct, SchemaSnapshot, Table, TableFailure};
use crate::core::traits::{DialectPlugin, MetadataConnection, MetadataSource, TableRef};
use crate::core::value::MetadataRow;
use crate::drivers::DialectImpl;
use crate::error::{IntrospectError, Result};

const TABLE_CAT: &str = "TABLE_CAT";
const TABLE_SCHEM: &str = "TABLE_SCHEM";
const TABLE_NAME: &str = "TABLE_NAME";
const TABLE_TYPE: &str = "TABLE_TYPE";
const REMARKS: &str = "REMARKS";

/// Reads logical schemas from a metadata source.
///
/// The reader holds no per-run state: every run acquires its own connection
/// and every table is assembled from locals of the call reading it, so one
/// reader can serve concurrent runs.
pub struct SchemaReader {
    source: Arc<dyn MetadataSource>,
    registry: DialectRegistry,
    config: ReaderConfig,
}

impl SchemaReader {
    /// Create a reader with default configuration.
    pub fn new(source: Arc<dyn MetadataSource>, registry: DialectRegistry) -> Self {
        Self {
            source,
            registry,
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader from a validated configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or names an unregistered dialect.
    pub fn from_config(
        source: Arc<dyn MetadataSource>,
        registry: DialectRegistry,
        config: ReaderConfig,
    ) -> Result<Self> {
        config.validate()?;
        if let Some(ref name) = config.dialect {
            registry.require(name)?;
        }
        Ok(Self {
            source,
            registry,
            config,
        })
    }

    /// Get the active configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read every table matching the configuration.
    ///
    /// A table whose metadata is malformed or cannot be fetched is recorded
    /// in [`SchemaSnapshot::failures`] and the run moves on.
    ///
    /// # Errors
    ///
    /// Fails only when the run itself cannot proceed: no connection, no
    /// product identity, or no table list.
    pub async fn read_schema(&self) -> Result<SchemaSnapshot> {
        let start = Instant::now();
        let mut conn = self.source.connect().await?;
        let product = conn.product().await?;
        let dialect = self.dialect_for(&product)?;

        info!(
            "Reading schema from {} using dialect '{}'",
            product.name,
            dialect.name()
        );

        let table_rows = conn.tables(&self.config.table_filter()).await?;
        let mut snapshot = SchemaSnapshot::new(product, dialect.name());

        for row in &table_rows {
            let name = match row.require_str(TABLE_NAME) {
                Ok(name) => name,
                Err(e) => {
                    warn!("Skipping unreadable table row: {}", e);
                    snapshot.failures.push(TableFailure {
                        table: "<unknown>".to_string(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !self.config.includes_table(&name) {
                debug!("Skipping table {} (filtered by configuration)", name);
                continue;
            }

            match self.read_table(conn.as_mut(), dialect, row).await {
                Ok(table) => snapshot.tables.push(table),
                Err(e) => {
                    warn!("Failed to read table {}: {}", name, e);
                    snapshot.failures.push(TableFailure {
                        table: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Read {} tables ({} failed) in {:.2}s",
            snapshot.tables.len(),
            snapshot.failures.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(snapshot)
    }

    /// Read one table in a run of its own.
    ///
    /// # Errors
    ///
    /// Fails if the table is not listed by the source or cannot be read.
    pub async fn read_single_table(&self, name: &str) -> Result<Table> {
        let mut conn = self.source.connect().await?;
        let product = conn.product().await?;
        let dialect = self.dialect_for(&product)?;

        let table_rows = conn.tables(&self.config.table_filter()).await?;
        let row = table_rows
            .iter()
            .find(|r| r.get_str(TABLE_NAME).as_deref() == Some(name))
            .ok_or_else(|| IntrospectError::metadata(name, "table not found"))?;

        self.read_table(conn.as_mut(), dialect, row).await
    }

    /// Pick the configured dialect, or detect it from the product.
    fn dialect_for(&self, product: &DatabaseProduct) -> Result<&DialectImpl> {
        match self.config.dialect {
            Some(ref name) => self.registry.require(name),
            None => Ok(self.registry.resolve(product)),
        }
    }

    /// Assemble one table. Nothing partial escapes: any error discards the
    /// whole table.
    async fn read_table(
        &self,
        conn: &mut dyn MetadataConnection,
        dialect: &DialectImpl,
        row: &MetadataRow,
    ) -> Result<Table> {
        let location = table_ref(row)?;
        let name = location.name.clone();
        debug!("Reading table {}", name);

        let column_rows = conn
            .columns(&location)
            .await
            .map_err(|e| e.for_table(&name))?;
        let columns = isolate_hooks(&name, || read_columns(dialect, &name, &column_rows))?;
        if columns.is_empty() {
            return Err(IntrospectError::metadata(&name, "no columns reported"));
        }

        let pk_rows = conn
            .primary_keys(&location)
            .await
            .map_err(|e| e.for_table(&name))?;
        let primary_key = read_primary_key(&name, &columns, &pk_rows)?;

        let fk_rows = conn
            .foreign_keys(&location)
            .await
            .map_err(|e| e.for_table(&name))?;
        let foreign_keys = read_foreign_keys(&name, &fk_rows)?;

        let index_rows = conn
            .indexes(&location)
            .await
            .map_err(|e| e.for_table(&name))?;
        let indexes = read_indices(&name, &index_rows)?;

        let table = Table {
            catalog: location.catalog,
            schema: location.schema,
            name: location.name,
            table_type: row.get_str(TABLE_TYPE).unwrap_or_else(|| "TABLE".to_string()),
            description: row.get_str(REMARKS).filter(|r| !r.is_empty()),
            columns: mark_primary_key(columns, &primary_key),
            primary_key,
            indexes,
            foreign_keys,
        };
        let table = isolate_hooks(&name, || Ok(remove_internal_indices(dialect, table)))?;

        debug!(
            "Read table {}: {} columns, {} indexes, {} foreign keys",
            table.full_name(),
            table.columns.len(),
            table.indexes.len(),
            table.foreign_keys.len()
        );
        Ok(table)
    }
}

/// Run code that calls dialect hooks. A panicking hook fails the table it
/// was called for instead of the whole run.
fn isolate_hooks<T>(table: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(IntrospectError::metadata(
            table,
            format!("dialect hook panicked: {}", reason),
        ))
    })
}

fn table_ref(row: &MetadataRow) -> Result<TableRef> {
    let name = row
        .require_str(TABLE_NAME)
        .map_err(|e| IntrospectError::metadata("<unknown>", e.to_string()))?;
    Ok(TableRef {
        catalog: row.get_str(TABLE_CAT),
        schema: row.get_str(TABLE_SCHEM),
        name,
    })
}
