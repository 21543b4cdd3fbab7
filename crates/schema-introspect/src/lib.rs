//! # schema-introspect
//!
//! Dialect-aware database schema introspection.
//!
//! This library reads raw metadata from a database and produces a logical
//! schema model, correcting product-specific reporting quirks with pluggable
//! dialects:
//!
//! - **Generic reading** of tables, columns, keys and indexes from
//!   `DatabaseMetaData`-style rows
//! - **Dialect plugins** selected by product identity or configuration
//! - **Default normalization** (quoted literals, identity markers)
//! - **Internal index removal** for indexes the database created itself
//! - **Per-table failure isolation**: one unreadable table never sinks a run
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use schema_introspect::{DialectRegistry, FixtureSource, ReaderConfig, SchemaReader};
//!
//! #[tokio::main]
//! async fn main() -> schema_introspect::Result<()> {
//!     let config = ReaderConfig::load("introspect.yaml")?;
//!     let source = Arc::new(FixtureSource::load("derby-dump.yaml")?);
//!     let reader = SchemaReader::from_config(source, DialectRegistry::with_builtins(), config)?;
//!     let snapshot = reader.read_schema().await?;
//!     println!("Read {} tables", snapshot.tables.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod drivers;
pub mod error;
pub mod reader;
pub mod source;

// Re-exports for convenient access
pub use crate::core::{
    Column, DatabaseProduct, DialectPlugin, DialectRegistry, ForeignKey, Index, MetadataConnection,
    MetadataRow, MetadataSource, MetadataValue, SchemaSnapshot, Table, TableFailure, TypeCode,
};
pub use config::ReaderConfig;
pub use drivers::{DerbyDialect, DialectImpl, GenericDialect};
pub use error::{IntrospectError, Result};
pub use reader::SchemaReader;
pub use source::FixtureSource;
