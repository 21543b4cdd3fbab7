//! Core abstractions for dialect-aware schema introspection.
//!
//! This module provides the foundational types and traits used throughout
//! the library:
//!
//! - [`schema`]: Table, column, index and foreign key metadata types
//! - [`value`]: Raw metadata rows and values as drivers report them
//! - [`typemap`]: Vendor type codes and their categories
//! - [`traits`]: Metadata source and dialect plugin traits
//! - [`catalog`]: Dialect registry keyed on product identity
//! - [`identifier`], [`literal`]: Name and literal helpers used by plugins
//!
//! # Architecture
//!
//! The core module defines database-agnostic abstractions. Product quirks
//! live in driver modules (`drivers/derby`, ...), and raw metadata comes
//! from a [`MetadataSource`] implementation, so:
//!
//! - **Extensibility**: New products are new plugins, not reader changes
//! - **Testability**: The reader runs against in-memory metadata
//!
//! # Design Patterns
//!
//! - **Strategy**: `DialectPlugin` provides interchangeable normalization rules
//! - **Template Method**: Default hook implementations define generic behavior

pub mod catalog;
pub mod identifier;
pub mod literal;
pub mod schema;
pub mod traits;
pub mod typemap;
pub mod value;

// Re-export commonly used types for convenience
pub use catalog::DialectRegistry;
pub use schema::{
    Column, DatabaseProduct, ForeignKey, Index, Reference, ReferentialAction, SchemaSnapshot,
    Table, TableFailure,
};
pub use traits::{DialectPlugin, MetadataConnection, MetadataSource, TableFilter, TableRef};
pub use typemap::{TypeCategory, TypeCode};
pub use value::{MetadataRow, MetadataValue, RowError};
