//! Fallback driver for products without a dedicated plugin.
//!
//! - [`GenericDialect`]: Takes driver metadata at face value

mod dialect;

pub use dialect::GenericDialect;
