//! Error types for the introspection library.

use thiserror::Error;

/// Main error type for introspection operations.
#[derive(Error, Debug)]
pub enum IntrospectError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or unreadable metadata for a specific table
    #[error("Metadata error for table {table}: {message}")]
    Metadata { table: String, message: String },

    /// Metadata source could not be reached or queried
    #[error("Metadata source error: {0}")]
    Source(String),

    /// Metadata fixture could not be parsed
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// No dialect registered under the requested name
    #[error("Unknown dialect '{name}'. Registered dialects: {available}")]
    UnknownDialect { name: String, available: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntrospectError {
    /// Create a Metadata error for a table.
    pub fn metadata(table: impl Into<String>, message: impl Into<String>) -> Self {
        IntrospectError::Metadata {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Source error.
    pub fn source(message: impl Into<String>) -> Self {
        IntrospectError::Source(message.into())
    }

    /// Attribute this error to a table.
    ///
    /// Metadata errors keep their original table; anything else raised while
    /// reading a table is folded into a Metadata error for that table.
    pub fn for_table(self, table: &str) -> Self {
        match self {
            err @ IntrospectError::Metadata { .. } => err,
            other => IntrospectError::metadata(table, other.to_string()),
        }
    }

    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            IntrospectError::Config(_)
            | IntrospectError::UnknownDialect { .. }
            | IntrospectError::Yaml(_) => 2,
            _ => 1,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for introspection operations.
pub type Result<T> = std::result::Result<T, IntrospectError>;
