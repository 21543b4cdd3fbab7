//! Database dialect plugins.
//!
//! This module provides product-specific implementations of
//! [`DialectPlugin`](crate::core::DialectPlugin):
//!
//! - [`derby`]: Apache Derby
//! - [`generic`]: Fallback for products without a dedicated plugin
//!
//! # enum_dispatch
//!
//! The set of plugins is closed. Instead of dynamic dispatch via
//! `Box<dyn DialectPlugin>`, [`DialectImpl`] wraps each plugin in an enum
//! variant and forwards the hooks with a match.
//!
//! # Adding New Databases
//!
//! To add support for a new database:
//!
//! 1. Create a new module under `drivers/` (e.g., `drivers/h2/`)
//! 2. Implement `DialectPlugin`, overriding only the hooks the product needs
//! 3. Add an enum variant to `DialectImpl` and a name to `from_name`
//! 4. Register it in `DialectRegistry::with_builtins()`

pub mod derby;
pub mod generic;

pub use derby::DerbyDialect;
pub use generic::GenericDialect;

use crate::core::schema::{Column, DatabaseProduct, ForeignKey, Index, Table};
use crate::core::traits::DialectPlugin;
use crate::error::{IntrospectError, Result};

/// Enum-based static dispatch for dialect plugins.
///
/// Note: We use a manual impl instead of the enum_dispatch macro; the
/// generated code would be identical.
#[derive(Debug, Clone)]
pub enum DialectImpl {
    Derby(DerbyDialect),
    Generic(GenericDialect),
}

impl DialectPlugin for DialectImpl {
    fn name(&self) -> &str {
        match self {
            DialectImpl::Derby(d) => d.name(),
            DialectImpl::Generic(d) => d.name(),
        }
    }

    fn matches(&self, product: &DatabaseProduct) -> bool {
        match self {
            DialectImpl::Derby(d) => d.matches(product),
            DialectImpl::Generic(d) => d.matches(product),
        }
    }

    fn normalize_column_default(&self, column: Column) -> Column {
        match self {
            DialectImpl::Derby(d) => d.normalize_column_default(column),
            DialectImpl::Generic(d) => d.normalize_column_default(column),
        }
    }

    fn is_internal_primary_key_index(&self, table: &Table, index: &Index) -> bool {
        match self {
            DialectImpl::Derby(d) => d.is_internal_primary_key_index(table, index),
            DialectImpl::Generic(d) => d.is_internal_primary_key_index(table, index),
        }
    }

    fn is_internal_foreign_key_index(&self, table: &Table, fk: &ForeignKey, index: &Index) -> bool {
        match self {
            DialectImpl::Derby(d) => d.is_internal_foreign_key_index(table, fk, index),
            DialectImpl::Generic(d) => d.is_internal_foreign_key_index(table, fk, index),
        }
    }
}

impl DialectImpl {
    /// Create a dialect implementation from a dialect name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "derby" | "apache derby" | "javadb" => Ok(DialectImpl::Derby(DerbyDialect::new())),
            "generic" | "default" => Ok(DialectImpl::Generic(GenericDialect::new())),
            other => Err(IntrospectError::UnknownDialect {
                name: other.to_string(),
                available: "derby, generic".to_string(),
            }),
        }
    }
}
