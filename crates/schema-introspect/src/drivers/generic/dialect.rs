//! Fallback dialect for products without a dedicated plugin.

use crate::core::schema::DatabaseProduct;
use crate::core::traits::DialectPlugin;

/// Dialect that trusts the driver: every hook keeps its default behavior.
#[derive(Debug, Clone, Default)]
pub struct GenericDialect;

impl GenericDialect {
    /// Create a new generic dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl DialectPlugin for GenericDialect {
    fn name(&self) -> &str {
        "generic"
    }

    // Selected explicitly as the registry fallback, never by detection.
    fn matches(&self, _product: &DatabaseProduct) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, Index, Table};
    use crate::core::typemap::TypeCode;

    #[test]
    fn test_generic_keeps_raw_defaults() {
        let dialect = GenericDialect::new();
        let column = Column::new("NOTE", TypeCode::VARCHAR).with_default("'it''s'");
        let normalized = dialect.normalize_column_default(column);
        assert_eq!(normalized.default_value.as_deref(), Some("'it''s'"));
    }

    #[test]
    fn test_generic_never_matches() {
        let dialect = GenericDialect::new();
        assert!(!dialect.matches(&DatabaseProduct::new("Apache Derby")));
        assert!(!dialect.matches(&DatabaseProduct::new("generic")));
    }

    #[test]
    fn test_generic_keeps_every_index() {
        let dialect = GenericDialect::new();
        let table = Table::new("T");
        let index = Index::new(Some("SQL051228005030780"), &["ID"], true);
        assert!(!dialect.is_internal_primary_key_index(&table, &index));
    }
}
