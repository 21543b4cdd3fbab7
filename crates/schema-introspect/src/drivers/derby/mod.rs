//! Apache Derby driver.
//!
//! This module provides Derby-specific implementations for:
//! - [`DerbyDialect`]: Metadata normalization for Derby's JDBC driver
//!
//! # Supported Versions
//!
//! - Apache Derby 10.x (embedded and network server)
//! - Java DB releases built from Derby 10.x

mod dialect;

pub use dialect::{is_internal_index_name, DerbyDialect};
