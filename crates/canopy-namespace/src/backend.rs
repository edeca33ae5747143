//! The namespace backend capability trait.

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use canopy_commons::models::{NamespacePath, TableName};

use crate::error::{NamespaceError, Result};
use crate::handle::TableHandle;

/// Trait for pluggable namespace tree implementations.
///
/// A backend owns one tree: namespaces contain child namespaces and tables,
/// and the empty [`NamespacePath`] is the tree root (which always exists).
/// Implementations must be thread-safe (`Send + Sync`) to allow concurrent
/// resolution from multiple in-flight queries.
///
/// These six operations are everything the federation layer requires; a
/// conforming backend may be a local directory tree, a remote metadata
/// service, or any other store that can answer them.
///
/// ## Error Handling
///
/// Implementations should:
/// - raise [`NamespaceError::TableNotFound`] from `open_table` whether the
///   leaf table or an intermediate namespace is missing - the two surface
///   identically to callers
/// - raise [`NamespaceError::Unavailable`] for transport/storage faults;
///   this layer never retries
/// - keep `create_namespace` / `write_table` create-only, raising the
///   `AlreadyExists` variants on conflict
#[async_trait::async_trait]
pub trait NamespaceBackend: Send + Sync + std::fmt::Debug {
    /// Checks whether the namespace at `path` exists.
    async fn namespace_exists(&self, path: &NamespacePath) -> Result<bool>;

    /// Lists the direct child namespace names under `path`, sorted.
    ///
    /// Produces a snapshot list and may be expensive; callers should avoid
    /// it on hot paths.
    async fn list_child_namespaces(&self, path: &NamespacePath) -> Result<Vec<String>>;

    /// Checks whether `table` exists inside the namespace at `path`.
    async fn table_exists(&self, path: &NamespacePath, table: &TableName) -> Result<bool>;

    /// Opens `table` inside the namespace at `path`, returning a scan-capable
    /// handle plus the table's schema.
    async fn open_table(&self, path: &NamespacePath, table: &TableName) -> Result<TableHandle>;

    /// Creates the namespace at `path`. The parent namespace must already
    /// exist. Administrative operation, outside query-time resolution.
    async fn create_namespace(&self, path: &NamespacePath) -> Result<()>;

    /// Writes `batches` as a new table inside the namespace at `path`.
    /// Create-only; administrative operation.
    async fn write_table(
        &self,
        path: &NamespacePath,
        table: &TableName,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()>;
}

fn segment_ok(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
        && !segment.contains('\0')
}

/// Validate that every segment of `path` is usable as a tree position:
/// non-empty and free of path separators and traversal tokens.
pub(crate) fn validate_path(path: &NamespacePath) -> Result<()> {
    for segment in path.segments() {
        if !segment_ok(segment) {
            return Err(NamespaceError::InvalidPath(format!(
                "segment {:?} in path '{}'",
                segment, path
            )));
        }
    }
    Ok(())
}

/// Validate a table name with the same segment rules as namespace paths.
pub(crate) fn validate_table_name(table: &TableName) -> Result<()> {
    if segment_ok(table.as_str()) {
        Ok(())
    } else {
        Err(NamespaceError::InvalidPath(format!(
            "table name {:?}",
            table.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_accepts_plain_segments() {
        assert!(validate_path(&NamespacePath::new(["retail", "sales"])).is_ok());
        assert!(validate_path(&NamespacePath::root()).is_ok());
    }

    #[test]
    fn test_validate_path_rejects_traversal() {
        for bad in [
            NamespacePath::new([""]),
            NamespacePath::new(["retail", ".."]),
            NamespacePath::new(["a/b"]),
            NamespacePath::new(["a\\b"]),
        ] {
            assert!(validate_path(&bad).is_err(), "expected rejection: {}", bad);
        }
    }
}
