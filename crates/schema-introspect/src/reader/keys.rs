//! Primary and foreign key assembly.

use crate::core::schema::{Column, ForeignKey, Reference, ReferentialAction};
use crate::core::value::{MetadataRow, RowError};
use crate::error::{IntrospectError, Result};

const COLUMN_NAME: &str = "COLUMN_NAME";
const KEY_SEQ: &str = "KEY_SEQ";
const FK_NAME: &str = "FK_NAME";
const PKTABLE_SCHEM: &str = "PKTABLE_SCHEM";
const PKTABLE_NAME: &str = "PKTABLE_NAME";
const PKCOLUMN_NAME: &str = "PKCOLUMN_NAME";
const FKCOLUMN_NAME: &str = "FKCOLUMN_NAME";
const UPDATE_RULE: &str = "UPDATE_RULE";
const DELETE_RULE: &str = "DELETE_RULE";

/// Primary key column names from raw primary key rows, in `KEY_SEQ` order.
///
/// Every named column must exist in `columns`; a dangling name means the
/// metadata is inconsistent and fails the table.
pub fn read_primary_key(table: &str, columns: &[Column], rows: &[MetadataRow]) -> Result<Vec<String>> {
    let malformed = |e: RowError| IntrospectError::metadata(table, format!("primary key row: {}", e));

    let mut keyed = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let name = row.require_str(COLUMN_NAME).map_err(malformed)?;
        let seq = row.get_i32(KEY_SEQ).map_err(malformed)?.unwrap_or(idx as i32 + 1);
        if !columns.iter().any(|c| c.name == name) {
            return Err(IntrospectError::metadata(
                table,
                format!("primary key references unknown column {}", name),
            ));
        }
        keyed.push((seq, name));
    }

    keyed.sort_by_key(|(seq, _)| *seq);

    let mut primary_key: Vec<String> = Vec::with_capacity(keyed.len());
    for (_, name) in keyed {
        if !primary_key.contains(&name) {
            primary_key.push(name);
        }
    }
    Ok(primary_key)
}

/// Mark the primary key columns.
pub fn mark_primary_key(columns: Vec<Column>, primary_key: &[String]) -> Vec<Column> {
    columns
        .into_iter()
        .map(|column| Column {
            is_primary_key: primary_key.contains(&column.name),
            ..column
        })
        .collect()
}

/// Foreign keys from raw imported-key rows.
///
/// Rows are grouped by `FK_NAME`; unnamed keys are grouped by the referenced
/// table. Keys keep the order in which they first appear and their column
/// pairs are ordered by `KEY_SEQ`.
pub fn read_foreign_keys(table: &str, rows: &[MetadataRow]) -> Result<Vec<ForeignKey>> {
    let malformed = |e: RowError| IntrospectError::metadata(table, format!("foreign key row: {}", e));

    // (group key, key, column pairs with KEY_SEQ)
    let mut groups: Vec<(String, ForeignKey, Vec<(i32, Reference)>)> = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let name = row.get_str(FK_NAME).filter(|n| !n.is_empty());
        let foreign_table = row.require_str(PKTABLE_NAME).map_err(malformed)?;
        let reference = Reference {
            local_column: row.require_str(FKCOLUMN_NAME).map_err(malformed)?,
            foreign_column: row.require_str(PKCOLUMN_NAME).map_err(malformed)?,
        };
        let seq = row.get_i32(KEY_SEQ).map_err(malformed)?.unwrap_or(idx as i32 + 1);

        let group_key = match &name {
            Some(name) => format!("name:{}", name),
            None => format!("table:{}", foreign_table),
        };

        match groups.iter_mut().find(|(key, _, _)| *key == group_key) {
            Some((_, _, pairs)) => pairs.push((seq, reference)),
            None => {
                let fk = ForeignKey {
                    name,
                    foreign_schema: row.get_str(PKTABLE_SCHEM),
                    foreign_table,
                    references: Vec::new(),
                    on_update: read_rule(table, row, UPDATE_RULE)?,
                    on_delete: read_rule(table, row, DELETE_RULE)?,
                    has_internal_index: false,
                };
                groups.push((group_key, fk, vec![(seq, reference)]));
            }
        }
    }

    Ok(groups
        .into_iter()
        .map(|(_, mut fk, mut pairs)| {
            pairs.sort_by_key(|(seq, _)| *seq);
            fk.references = pairs.into_iter().map(|(_, r)| r).collect();
            fk
        })
        .collect())
}

fn read_rule(table: &str, row: &MetadataRow, field: &str) -> Result<ReferentialAction> {
    let code = row
        .get_i32(field)
        .map_err(|e| IntrospectError::metadata(table, format!("foreign key row: {}", e)))?;

    match code {
        None => Ok(ReferentialAction::default()),
        Some(code) => ReferentialAction::from_rule_code(code).ok_or_else(|| {
            IntrospectError::metadata(table, format!("unknown {} code {}", field, code))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::typemap::TypeCode;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("ORDER_ID", TypeCode::INTEGER),
            Column::new("LINE_NO", TypeCode::INTEGER),
            Column::new("PRODUCT_ID", TypeCode::INTEGER),
        ]
    }

    fn fk_row(name: Option<&str>, foreign_table: &str, local: &str, foreign: &str, seq: i32) -> MetadataRow {
        MetadataRow::new()
            .with(FK_NAME, name)
            .with(PKTABLE_NAME, foreign_table)
            .with(FKCOLUMN_NAME, local)
            .with(PKCOLUMN_NAME, foreign)
            .with(KEY_SEQ, seq)
    }

    #[test]
    fn test_primary_key_in_key_order() {
        let rows = vec![
            MetadataRow::new().with(COLUMN_NAME, "LINE_NO").with(KEY_SEQ, 2),
            MetadataRow::new().with(COLUMN_NAME, "ORDER_ID").with(KEY_SEQ, 1),
        ];
        let pk = read_primary_key("LINES", &columns(), &rows).unwrap();
        assert_eq!(pk, vec!["ORDER_ID".to_string(), "LINE_NO".to_string()]);
    }

    #[test]
    fn test_primary_key_unknown_column() {
        let rows = vec![MetadataRow::new().with(COLUMN_NAME, "MISSING")];
        let err = read_primary_key("LINES", &columns(), &rows).unwrap_err();
        assert!(err.to_string().contains("MISSING"));
    }

    #[test]
    fn test_mark_primary_key() {
        let marked = mark_primary_key(columns(), &["ORDER_ID".to_string()]);
        assert!(marked[0].is_primary_key);
        assert!(!marked[1].is_primary_key);
    }

    #[test]
    fn test_foreign_keys_grouped_and_ordered() {
        let rows = vec![
            fk_row(Some("FK_ORDER"), "ORDERS", "LINE_NO", "LINE_NO", 2),
            fk_row(Some("FK_PRODUCT"), "PRODUCTS", "PRODUCT_ID", "ID", 1),
            fk_row(Some("FK_ORDER"), "ORDERS", "ORDER_ID", "ID", 1),
        ];
        let fks = read_foreign_keys("LINES", &rows).unwrap();
        assert_eq!(fks.len(), 2);

        assert_eq!(fks[0].name.as_deref(), Some("FK_ORDER"));
        assert_eq!(fks[0].foreign_table, "ORDERS");
        assert_eq!(fks[0].local_columns(), vec!["ORDER_ID", "LINE_NO"]);
        assert_eq!(fks[0].foreign_columns(), vec!["ID", "LINE_NO"]);

        assert_eq!(fks[1].name.as_deref(), Some("FK_PRODUCT"));
        assert_eq!(fks[1].on_delete, ReferentialAction::NoAction);
    }

    #[test]
    fn test_unnamed_foreign_keys_group_by_table() {
        let rows = vec![
            fk_row(None, "ORDERS", "ORDER_ID", "ID", 1),
            fk_row(None, "PRODUCTS", "PRODUCT_ID", "ID", 1),
        ];
        let fks = read_foreign_keys("LINES", &rows).unwrap();
        assert_eq!(fks.len(), 2);
        assert!(fks.iter().all(|fk| fk.name.is_none()));
    }

    #[test]
    fn test_referential_rules() {
        let rows = vec![fk_row(Some("FK"), "ORDERS", "ORDER_ID", "ID", 1)
            .with(UPDATE_RULE, 1)
            .with(DELETE_RULE, 0)];
        let fks = read_foreign_keys("LINES", &rows).unwrap();
        assert_eq!(fks[0].on_update, ReferentialAction::Restrict);
        assert_eq!(fks[0].on_delete, ReferentialAction::Cascade);

        let rows = vec![fk_row(Some("FK"), "ORDERS", "ORDER_ID", "ID", 1).with(DELETE_RULE, 42)];
        assert!(read_foreign_keys("LINES", &rows).is_err());
    }

    #[test]
    fn test_foreign_key_missing_columns() {
        let rows = vec![MetadataRow::new().with(FK_NAME, "FK").with(PKTABLE_NAME, "ORDERS")];
        let err = read_foreign_keys("LINES", &rows).unwrap_err();
        assert!(err.to_string().contains("FKCOLUMN_NAME"));
    }
}
