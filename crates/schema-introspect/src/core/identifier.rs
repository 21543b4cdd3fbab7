//! Identifier checks shared by configuration and dialect plugins.
//!
//! Databases name the objects they create on their own (constraint indexes,
//! implicit sequences) with a fixed prefix followed by a generated number.
//! [`numeric_suffix`] recognises that shape without treating a mismatch as
//! an error: a name that does not fit is simply not system-generated.

use crate::error::{IntrospectError, Result};

/// Maximum identifier length (conservative limit across databases).
/// - Derby: 128 characters
/// - PostgreSQL: 63 bytes
/// - SQL Server: 128 characters
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate a configured identifier.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `IntrospectError::Config` for invalid identifiers with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(IntrospectError::Config(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(IntrospectError::Config(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(IntrospectError::Config(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Parse the number that follows `prefix` in `name`.
///
/// Returns `Some` only when `name` starts with `prefix` and everything after
/// it is a non-empty run of ASCII digits that fits in an `i64`. Signs,
/// whitespace and any other character yield `None`.
///
/// ```
/// use schema_introspect::core::identifier::numeric_suffix;
///
/// assert_eq!(numeric_suffix("SQL051228005030780", "SQL"), Some(51228005030780));
/// assert_eq!(numeric_suffix("SQL_1", "SQL"), None);
/// ```
pub fn numeric_suffix(name: &str, prefix: &str) -> Option<i64> {
    let rest = name.strip_prefix(prefix)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}
