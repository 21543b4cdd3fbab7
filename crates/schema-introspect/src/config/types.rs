//! Configuration type definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::traits::TableFilter;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Catalog to restrict introspection to.
    #[serde(default)]
    pub catalog: Option<String>,

    /// Schema to restrict introspection to.
    #[serde(default)]
    pub schema: Option<String>,

    /// Table types to read (default: ["TABLE"]).
    #[serde(default = "default_table_types")]
    pub table_types: Vec<String>,

    /// Explicit list of tables to read. Empty means all tables.
    #[serde(default)]
    pub tables: Vec<String>,

    /// Tables to skip (case-insensitive).
    #[serde(default)]
    pub exclude_tables: Vec<String>,

    /// Dialect name that overrides product detection.
    #[serde(default)]
    pub dialect: Option<String>,

    /// Metadata fixture to read (used by the CLI).
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            schema: None,
            table_types: default_table_types(),
            tables: Vec::new(),
            exclude_tables: Vec::new(),
            dialect: None,
            fixture: None,
        }
    }
}

impl ReaderConfig {
    /// Filter passed to the metadata source when listing tables.
    pub fn table_filter(&self) -> TableFilter {
        TableFilter {
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
            table_types: self.table_types.clone(),
        }
    }

    /// Whether a listed table should be read.
    ///
    /// Include list entries match exactly; exclusions ignore case.
    pub fn includes_table(&self, name: &str) -> bool {
        if !self.tables.is_empty() && !self.tables.iter().any(|t| t == name) {
            return false;
        }
        !self
            .exclude_tables
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))
    }
}

fn default_table_types() -> Vec<String> {
    vec!["TABLE".to_string()]
}
