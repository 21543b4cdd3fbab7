//! Derby metadata dialect (Strategy pattern).
//!
//! Derby's JDBC driver has three reporting quirks the generic reader cannot
//! know about:
//!
//! - Identity columns come back with a marker string in `COLUMN_DEF` instead
//!   of `IS_AUTOINCREMENT = YES`.
//! - Character defaults are reported as quoted SQL literals.
//! - Indexes Derby creates for primary and foreign keys are named
//!   `SQL<timestamp digits>` and appear alongside user-defined indexes.

use tracing::trace;

use crate::core::identifier::numeric_suffix;
use crate::core::literal::unescape_quoted;
use crate::core::schema::{Column, DatabaseProduct, ForeignKey, Index, Table};
use crate::core::traits::DialectPlugin;

/// Default reported for `GENERATED BY DEFAULT AS IDENTITY` columns.
const GENERATED_BY_DEFAULT_MARKER: &str = "GENERATED_BY_DEFAULT";

/// Prefix of the default reported for `GENERATED ALWAYS AS IDENTITY`
/// columns, e.g. `AUTOINCREMENT: start 1 increment 1`.
const AUTOINCREMENT_PREFIX: &str = "AUTOINCREMENT:";

/// Prefix of index names Derby generates, e.g. `SQL051228005030780`.
const INTERNAL_INDEX_PREFIX: &str = "SQL";

/// Apache Derby dialect implementation.
#[derive(Debug, Clone, Default)]
pub struct DerbyDialect;

impl DerbyDialect {
    /// Create a new Derby dialect instance.
    pub fn new() -> Self {
        Self
    }
}

/// Whether `name` looks like an index name Derby generated on its own.
pub fn is_internal_index_name(name: Option<&str>) -> bool {
    name.and_then(|n| numeric_suffix(n, INTERNAL_INDEX_PREFIX))
        .is_some()
}

fn is_identity_marker(default_value: &str) -> bool {
    default_value == GENERATED_BY_DEFAULT_MARKER || default_value.starts_with(AUTOINCREMENT_PREFIX)
}

impl DialectPlugin for DerbyDialect {
    fn name(&self) -> &str {
        "derby"
    }

    fn matches(&self, product: &DatabaseProduct) -> bool {
        product.name.to_ascii_lowercase().contains("derby")
    }

    fn normalize_column_default(&self, column: Column) -> Column {
        let Some(default_value) = column.default_value.as_deref() else {
            return column;
        };

        if is_identity_marker(default_value) {
            trace!(
                "Column {} reports identity marker '{}'",
                column.name,
                default_value
            );
            return column.into_auto_increment();
        }

        if column.type_code.is_textual() {
            let unescaped = unescape_quoted(default_value, '\'');
            return column.replace_default(Some(unescaped));
        }

        column
    }

    fn is_internal_primary_key_index(&self, _table: &Table, index: &Index) -> bool {
        is_internal_index_name(index.name.as_deref())
    }

    fn is_internal_foreign_key_index(&self, _table: &Table, _fk: &ForeignKey, index: &Index) -> bool {
        is_internal_index_name(index.name.as_deref())
    }
}
