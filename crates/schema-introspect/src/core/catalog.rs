//! Dialect registry for explicit dependency injection.
//!
//! The [`DialectRegistry`] maps database products to dialect plugins.
//! Unlike a global singleton, it is explicitly constructed and handed to the
//! [`SchemaReader`](crate::reader::SchemaReader), so tests can register
//! exactly the plugins they need.

use tracing::debug;

use crate::drivers::{DerbyDialect, DialectImpl, GenericDialect};
use crate::error::{IntrospectError, Result};

use super::schema::DatabaseProduct;
use super::traits::DialectPlugin;

/// Registry of dialect plugins.
///
/// Plugins are kept in registration order; product detection picks the
/// first plugin that claims the product. The fallback plugin is used when
/// none does.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    /// Registered plugins, in registration order.
    dialects: Vec<DialectImpl>,

    /// Plugin used when no registered plugin matches a product.
    fallback: DialectImpl,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self {
            dialects: Vec::new(),
            fallback: DialectImpl::Generic(GenericDialect::new()),
        }
    }
}

impl DialectRegistry {
    /// Create a registry with no plugins and the generic fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in plugins registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DialectImpl::Derby(DerbyDialect::new()));
        registry
    }

    /// Register a plugin. A plugin with the same name is replaced in place.
    pub fn register(&mut self, dialect: DialectImpl) {
        match self
            .dialects
            .iter_mut()
            .find(|d| d.name() == dialect.name())
        {
            Some(existing) => *existing = dialect,
            None => self.dialects.push(dialect),
        }
    }

    /// Replace the fallback plugin.
    pub fn set_fallback(&mut self, dialect: DialectImpl) {
        self.fallback = dialect;
    }

    /// Get a plugin by name. The fallback is reachable by its name too.
    pub fn get(&self, name: &str) -> Option<&DialectImpl> {
        self.dialects
            .iter()
            .chain(std::iter::once(&self.fallback))
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// Get a plugin by name, returning an error if not found.
    pub fn require(&self, name: &str) -> Result<&DialectImpl> {
        self.get(name)
            .ok_or_else(|| IntrospectError::UnknownDialect {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Pick the plugin for a product, falling back to the generic one.
    pub fn resolve(&self, product: &DatabaseProduct) -> &DialectImpl {
        match self.dialects.iter().find(|d| d.matches(product)) {
            Some(dialect) => {
                debug!("Product '{}' handled by dialect '{}'", product.name, dialect.name());
                dialect
            }
            None => {
                debug!(
                    "No dialect registered for product '{}', using '{}'",
                    product.name,
                    self.fallback.name()
                );
                &self.fallback
            }
        }
    }

    /// Check if a plugin is registered under `name`.
    pub fn has_dialect(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All plugin names, registered plugins first, then the fallback.
    pub fn names(&self) -> Vec<&str> {
        self.dialects
            .iter()
            .chain(std::iter::once(&self.fallback))
            .map(|d| d.name())
            .collect()
    }
}
