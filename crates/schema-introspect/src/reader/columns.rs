//! Column assembly from raw column metadata.

use tracing::warn;

use crate::core::schema::Column;
use crate::core::traits::DialectPlugin;
use crate::core::typemap::TypeCode;
use crate::core::value::{MetadataRow, RowError};
use crate::error::{IntrospectError, Result};

const COLUMN_NAME: &str = "COLUMN_NAME";
const DATA_TYPE: &str = "DATA_TYPE";
const TYPE_NAME: &str = "TYPE_NAME";
const COLUMN_SIZE: &str = "COLUMN_SIZE";
const DECIMAL_DIGITS: &str = "DECIMAL_DIGITS";
const NULLABLE: &str = "NULLABLE";
const IS_NULLABLE: &str = "IS_NULLABLE";
const COLUMN_DEF: &str = "COLUMN_DEF";
const COLUMN_DEFAULT: &str = "COLUMN_DEFAULT";
const IS_AUTOINCREMENT: &str = "IS_AUTOINCREMENT";
const REMARKS: &str = "REMARKS";
const ORDINAL_POSITION: &str = "ORDINAL_POSITION";

/// JDBC `columnNoNulls`.
const COLUMN_NO_NULLS: i32 = 0;

/// Build a column from a raw row and let the dialect normalize it.
///
/// Fails with a Metadata error when `COLUMN_NAME` or `DATA_TYPE` is missing
/// or unreadable.
pub fn read_column<D: DialectPlugin + ?Sized>(
    dialect: &D,
    table: &str,
    row: &MetadataRow,
) -> Result<Column> {
    let column = base_column(table, row)?;
    let column = dialect.normalize_column_default(column);
    Ok(enforce_default_invariant(table, column))
}

/// Read every column row of a table, in ordinal order.
pub fn read_columns<D: DialectPlugin + ?Sized>(
    dialect: &D,
    table: &str,
    rows: &[MetadataRow],
) -> Result<Vec<Column>> {
    let mut columns = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut column = read_column(dialect, table, row)?;
            if column.ordinal_pos <= 0 {
                column.ordinal_pos = idx as i32 + 1;
            }
            Ok(column)
        })
        .collect::<Result<Vec<_>>>()?;

    columns.sort_by_key(|c| c.ordinal_pos);
    Ok(columns)
}

/// Build a column exactly as the driver describes it.
fn base_column(table: &str, row: &MetadataRow) -> Result<Column> {
    let malformed = |e: RowError| IntrospectError::metadata(table, format!("column row: {}", e));

    let name = row.require_str(COLUMN_NAME).map_err(malformed)?;
    let malformed =
        |e: RowError| IntrospectError::metadata(table, format!("column {}: {}", name, e));

    let type_code = TypeCode(row.require_i32(DATA_TYPE).map_err(malformed)?);
    let type_name = row
        .get_str(TYPE_NAME)
        .unwrap_or_else(|| type_code.to_string());

    let is_nullable = match row.get_bool(IS_NULLABLE).map_err(malformed)? {
        Some(nullable) => nullable,
        None => row
            .get_i32(NULLABLE)
            .map_err(malformed)?
            .map_or(true, |n| n != COLUMN_NO_NULLS),
    };

    // Defaults must arrive as text; a rendered number may not match what
    // the database holds
    let default_value = match row.get_text(COLUMN_DEF).map_err(malformed)? {
        Some(default_value) => Some(default_value),
        None => row.get_text(COLUMN_DEFAULT).map_err(malformed)?,
    }
    .map(|d| d.trim().to_string());

    Ok(Column {
        type_code,
        type_name,
        size: row.get_i32(COLUMN_SIZE).map_err(malformed)?,
        scale: row.get_i32(DECIMAL_DIGITS).map_err(malformed)?,
        is_nullable,
        is_primary_key: false,
        default_value,
        is_auto_increment: row
            .get_bool(IS_AUTOINCREMENT)
            .map_err(malformed)?
            .unwrap_or(false),
        description: row.get_str(REMARKS).filter(|r| !r.is_empty()),
        ordinal_pos: row.get_i32(ORDINAL_POSITION).map_err(malformed)?.unwrap_or(0),
        name,
    })
}

/// Auto-increment columns never carry a default.
fn enforce_default_invariant(table: &str, column: Column) -> Column {
    if column.is_auto_increment && column.default_value.is_some() {
        warn!(
            "Column {}.{} is auto-increment but reports default {:?}; dropping the default",
            table, column.name, column.default_value
        );
        return column.replace_default(None);
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::MetadataValue;
    use crate::drivers::{DerbyDialect, GenericDialect};

    fn varchar_row(name: &str, default: &str) -> MetadataRow {
        MetadataRow::new()
            .with(COLUMN_NAME, name)
            .with(DATA_TYPE, 12)
            .with(TYPE_NAME, "VARCHAR")
            .with(COLUMN_SIZE, 40)
            .with(COLUMN_DEF, default)
    }

    #[test]
    fn test_read_column_base_fields() {
        let row = MetadataRow::new()
            .with(COLUMN_NAME, "PRICE")
            .with(DATA_TYPE, 3)
            .with(TYPE_NAME, "DECIMAL")
            .with(COLUMN_SIZE, 10)
            .with(DECIMAL_DIGITS, 2)
            .with(IS_NULLABLE, "NO")
            .with(REMARKS, "unit price")
            .with(ORDINAL_POSITION, 3);

        let column = read_column(&GenericDialect::new(), "LINES", &row).unwrap();
        assert_eq!(column.name, "PRICE");
        assert_eq!(column.type_code, TypeCode::DECIMAL);
        assert_eq!(column.size, Some(10));
        assert_eq!(column.scale, Some(2));
        assert!(!column.is_nullable);
        assert_eq!(column.description.as_deref(), Some("unit price"));
        assert_eq!(column.ordinal_pos, 3);
        assert!(column.default_value.is_none());
    }

    #[test]
    fn test_nullable_falls_back_to_code() {
        let row = MetadataRow::new()
            .with(COLUMN_NAME, "ID")
            .with(DATA_TYPE, 4)
            .with(NULLABLE, 0);
        let column = read_column(&GenericDialect::new(), "T", &row).unwrap();
        assert!(!column.is_nullable);
        assert_eq!(column.type_name, "INTEGER");
    }

    #[test]
    fn test_missing_required_fields() {
        let no_name = MetadataRow::new().with(DATA_TYPE, 4);
        let err = read_column(&GenericDialect::new(), "T", &no_name).unwrap_err();
        assert!(matches!(err, IntrospectError::Metadata { ref table, .. } if table == "T"));
        assert!(err.to_string().contains("COLUMN_NAME"));

        let no_type = MetadataRow::new().with(COLUMN_NAME, "ID");
        let err = read_column(&GenericDialect::new(), "T", &no_type).unwrap_err();
        assert!(err.to_string().contains("DATA_TYPE"));
    }

    #[test]
    fn test_unreadable_type_code() {
        let row = MetadataRow::new()
            .with(COLUMN_NAME, "ID")
            .with(DATA_TYPE, "integer");
        assert!(read_column(&GenericDialect::new(), "T", &row).is_err());
    }

    #[test]
    fn test_derby_normalization_is_applied() {
        let dialect = DerbyDialect::new();
        let column = read_column(&dialect, "T", &varchar_row("NOTE", "'it''s'")).unwrap();
        assert_eq!(column.default_value.as_deref(), Some("it's"));

        let row = MetadataRow::new()
            .with(COLUMN_NAME, "ID")
            .with(DATA_TYPE, 4)
            .with(COLUMN_DEF, "AUTOINCREMENT: start 1 increment 1");
        let column = read_column(&dialect, "T", &row).unwrap();
        assert!(column.is_auto_increment);
        assert!(column.default_value.is_none());
    }

    #[test]
    fn test_default_is_trimmed() {
        let row = varchar_row("NOTE", "  'x'  ");
        let column = read_column(&DerbyDialect::new(), "T", &row).unwrap();
        assert_eq!(column.default_value.as_deref(), Some("x"));
    }

    #[test]
    fn test_numeric_default_kept_verbatim() {
        let row = MetadataRow::new()
            .with(COLUMN_NAME, "PRICE")
            .with(DATA_TYPE, 3)
            .with(COLUMN_DEF, "1.50");
        let column = read_column(&DerbyDialect::new(), "T", &row).unwrap();
        assert_eq!(column.default_value.as_deref(), Some("1.50"));
    }

    #[test]
    fn test_non_text_default_fails_the_column() {
        let row = MetadataRow::new()
            .with(COLUMN_NAME, "PRICE")
            .with(DATA_TYPE, 3)
            .with(COLUMN_DEF, MetadataValue::Float(1.5));
        let err = read_column(&DerbyDialect::new(), "T", &row).unwrap_err();
        assert!(matches!(err, IntrospectError::Metadata { ref table, .. } if table == "T"));
        assert!(err.to_string().contains("COLUMN_DEF"));
    }

    #[test]
    fn test_invariant_enforced_for_every_dialect() {
        let row = MetadataRow::new()
            .with(COLUMN_NAME, "ID")
            .with(DATA_TYPE, 4)
            .with(IS_AUTOINCREMENT, "YES")
            .with(COLUMN_DEF, "1");
        let column = read_column(&GenericDialect::new(), "T", &row).unwrap();
        assert!(column.is_auto_increment);
        assert!(column.default_value.is_none());
    }

    #[test]
    fn test_read_columns_orders_by_position() {
        let rows = vec![
            varchar_row("B", "'b'").with(ORDINAL_POSITION, 2),
            varchar_row("A", "'a'").with(ORDINAL_POSITION, 1),
        ];
        let columns = read_columns(&DerbyDialect::new(), "T", &rows).unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_read_columns_assigns_missing_positions() {
        let rows = vec![varchar_row("A", "'a'"), varchar_row("B", "'b'")];
        let columns = read_columns(&GenericDialect::new(), "T", &rows).unwrap();
        assert_eq!(columns[0].ordinal_pos, 1);
        assert_eq!(columns[1].ordinal_pos, 2);
    }

    #[test]
    fn test_read_columns_fails_on_any_bad_row() {
        let rows = vec![varchar_row("A", "'a'"), MetadataRow::new().with(DATA_TYPE, 4)];
        assert!(read_columns(&GenericDialect::new(), "T", &rows).is_err());
    }
}
