//! Configuration validation.

use super::ReaderConfig;
use crate::core::identifier::validate_identifier;
use crate::error::{IntrospectError, Result};

/// Validate the configuration.
pub fn validate(config: &ReaderConfig) -> Result<()> {
    if config.table_types.is_empty() {
        return Err(IntrospectError::Config(
            "table_types must list at least one table type".into(),
        ));
    }
    for table_type in &config.table_types {
        if table_type.trim().is_empty() {
            return Err(IntrospectError::Config(
                "table_types cannot contain blank entries".into(),
            ));
        }
    }

    if let Some(ref schema) = config.schema {
        validate_identifier(schema)
            .map_err(|e| IntrospectError::Config(format!("schema: {}", e)))?;
    }
    if let Some(ref catalog) = config.catalog {
        validate_identifier(catalog)
            .map_err(|e| IntrospectError::Config(format!("catalog: {}", e)))?;
    }

    for name in config.tables.iter().chain(&config.exclude_tables) {
        validate_identifier(name)
            .map_err(|e| IntrospectError::Config(format!("table '{}': {}", name, e)))?;
    }

    // A table both included and excluded would silently never be read
    if let Some(name) = config.tables.iter().find(|t| {
        config
            .exclude_tables
            .iter()
            .any(|x| x.eq_ignore_ascii_case(t))
    }) {
        return Err(IntrospectError::Config(format!(
            "table '{}' is listed in both tables and exclude_tables",
            name
        )));
    }

    if let Some(ref dialect) = config.dialect {
        if dialect.trim().is_empty() {
            return Err(IntrospectError::Config("dialect cannot be blank".into()));
        }
    }

    Ok(())
}
