//! Error types for namespace backend operations.

use thiserror::Error;

/// Result type for namespace backend operations.
pub type Result<T> = std::result::Result<T, NamespaceError>;

/// Errors that can occur inside a namespace backend.
#[derive(Error, Debug)]
pub enum NamespaceError {
    /// The addressed namespace does not exist.
    #[error("Namespace not found: {0}")]
    NamespaceNotFound(String),

    /// The addressed table does not exist. Backends raise this for a missing
    /// leaf table and for a missing intermediate namespace alike; callers
    /// must not rely on distinguishing the two.
    #[error("Table not found: {namespace}/{table}")]
    TableNotFound { namespace: String, table: String },

    /// Duplicate namespace creation.
    #[error("Namespace already exists: {0}")]
    NamespaceAlreadyExists(String),

    /// Duplicate table write (writes are create-only).
    #[error("Table already exists: {namespace}/{table}")]
    TableAlreadyExists { namespace: String, table: String },

    /// A path segment is empty or contains characters the backend rejects.
    #[error("Invalid namespace path: {0}")]
    InvalidPath(String),

    /// Parquet encode/decode failure.
    #[error("Parquet error: {0}")]
    Parquet(String),

    /// Transport or storage failure from the underlying store. Not retried
    /// at this layer; a higher layer decides on retry policy.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl NamespaceError {
    /// Create a table-not-found error from displayable parts.
    pub fn table_not_found(namespace: impl ToString, table: impl ToString) -> Self {
        NamespaceError::TableNotFound {
            namespace: namespace.to_string(),
            table: table.to_string(),
        }
    }

    /// Create a backend-unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        NamespaceError::Unavailable(msg.into())
    }

    /// True when the error reports a missing namespace or table (the two
    /// surface identically to resolution).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NamespaceError::NamespaceNotFound(_) | NamespaceError::TableNotFound { .. }
        )
    }
}
