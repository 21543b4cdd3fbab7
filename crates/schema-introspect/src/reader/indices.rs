//! Index assembly and removal of indexes the database created on its own.

use tracing::debug;

use crate::core::schema::{Index, Table};
use crate::core::traits::DialectPlugin;
use crate::core::value::{MetadataRow, RowError};
use crate::error::{IntrospectError, Result};

const INDEX_NAME: &str = "INDEX_NAME";
const COLUMN_NAME: &str = "COLUMN_NAME";
const NON_UNIQUE: &str = "NON_UNIQUE";
const ORDINAL_POSITION: &str = "ORDINAL_POSITION";
const TYPE: &str = "TYPE";

/// JDBC `tableIndexStatistic`: a row describing table statistics, not an index.
const TABLE_INDEX_STATISTIC: i32 = 0;

/// Indexes from raw index rows.
///
/// Rows are grouped by `INDEX_NAME` in first-seen order and columns ordered
/// by `ORDINAL_POSITION`. Statistic rows, rows without an index name and
/// rows without a column name (function-based index entries) are skipped.
pub fn read_indices(table: &str, rows: &[MetadataRow]) -> Result<Vec<Index>> {
    let malformed = |e: RowError| IntrospectError::metadata(table, format!("index row: {}", e));

    let mut groups: Vec<(Index, Vec<(i32, String)>)> = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        if row.get_i32(TYPE).map_err(malformed)? == Some(TABLE_INDEX_STATISTIC) {
            continue;
        }
        let Some(column) = row.get_str(COLUMN_NAME) else {
            continue;
        };

        // Unnamed rows cannot be told apart from one another
        let Some(name) = row.get_str(INDEX_NAME).filter(|n| !n.is_empty()) else {
            continue;
        };
        let position = row
            .get_i32(ORDINAL_POSITION)
            .map_err(malformed)?
            .unwrap_or(idx as i32 + 1);

        match groups
            .iter_mut()
            .find(|(index, _)| index.name.as_deref() == Some(name.as_str()))
        {
            Some((_, columns)) => columns.push((position, column)),
            None => {
                let non_unique = row.get_bool(NON_UNIQUE).map_err(malformed)?.unwrap_or(true);
                let index = Index {
                    name: Some(name),
                    columns: Vec::new(),
                    is_unique: !non_unique,
                };
                groups.push((index, vec![(position, column)]));
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(mut index, mut columns)| {
            columns.sort_by_key(|(position, _)| *position);
            index.columns = columns.into_iter().map(|(_, c)| c).collect();
            index
        })
        .collect())
}

/// Drop the indexes the dialect identifies as created by the database.
///
/// A unique index over exactly the primary key columns is offered to
/// `is_internal_primary_key_index`. An index over exactly a foreign key's
/// local columns is offered to `is_internal_foreign_key_index`; when it is
/// internal, the key is marked as owning an internal index. Hooks see the
/// table with all of its indexes still present.
pub fn remove_internal_indices<D: DialectPlugin + ?Sized>(dialect: &D, mut table: Table) -> Table {
    let mut fk_owners = Vec::new();

    let keep: Vec<bool> = table
        .indexes
        .iter()
        .map(|index| {
            let backs_pk = index.is_unique
                && table.has_pk()
                && index.has_columns(table.primary_key.as_slice());
            if backs_pk && dialect.is_internal_primary_key_index(&table, index) {
                debug!(
                    "Excluding internal primary key index {:?} on {}",
                    index.name,
                    table.full_name()
                );
                return false;
            }

            let owner = table.foreign_keys.iter().position(|fk| {
                index.has_columns(fk.local_columns().as_slice())
                    && dialect.is_internal_foreign_key_index(&table, fk, index)
            });
            if let Some(pos) = owner {
                debug!(
                    "Excluding internal foreign key index {:?} on {}",
                    index.name,
                    table.full_name()
                );
                fk_owners.push(pos);
                return false;
            }

            true
        })
        .collect();

    let mut keep = keep.into_iter();
    table.indexes.retain(|_| keep.next().unwrap_or(true));

    for pos in fk_owners {
        table.foreign_keys[pos].has_internal_index = true;
    }

    table
}
