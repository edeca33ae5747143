//! Directory-tree namespace backend.
//!
//! Namespaces are directories under a fixed root; a table is a
//! `<name>.parquet` file inside its namespace directory. The layout is this
//! backend's own concern - nothing above this crate depends on it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use canopy_commons::models::{NamespacePath, TableName};
use datafusion::datasource::MemTable;

use crate::backend::{validate_path, validate_table_name, NamespaceBackend};
use crate::error::{NamespaceError, Result};
use crate::handle::TableHandle;
use crate::parquet::{parse_parquet_from_bytes, serialize_to_parquet};

/// Namespace backend rooted at a filesystem directory.
///
/// Parquet encode/decode is synchronous and runs under `spawn_blocking` so
/// the async runtime is never blocked by columnar work.
#[derive(Debug, Clone)]
pub struct DirectoryNamespace {
    root: PathBuf,
}

impl DirectoryNamespace {
    /// Creates a backend rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| NamespaceError::unavailable(format!("create root '{}': {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// The filesystem root this backend serves.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir_for(&self, path: &NamespacePath) -> Result<PathBuf> {
        validate_path(path)?;
        let mut dir = self.root.clone();
        for segment in path.segments() {
            dir.push(segment);
        }
        Ok(dir)
    }

    fn table_file(&self, path: &NamespacePath, table: &TableName) -> Result<PathBuf> {
        validate_table_name(table)?;
        let mut file = self.dir_for(path)?;
        file.push(format!("{}.parquet", table.as_str()));
        Ok(file)
    }
}

#[async_trait::async_trait]
impl NamespaceBackend for DirectoryNamespace {
    async fn namespace_exists(&self, path: &NamespacePath) -> Result<bool> {
        let dir = self.dir_for(path)?;
        match tokio::fs::metadata(&dir).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NamespaceError::unavailable(e.to_string())),
        }
    }

    async fn list_child_namespaces(&self, path: &NamespacePath) -> Result<Vec<String>> {
        let dir = self.dir_for(path)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NamespaceError::NamespaceNotFound(path.to_string()))
            }
            Err(e) => return Err(NamespaceError::unavailable(e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| NamespaceError::unavailable(e.to_string()))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| NamespaceError::unavailable(e.to_string()))?;
            if file_type.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn table_exists(&self, path: &NamespacePath, table: &TableName) -> Result<bool> {
        let file = self.table_file(path, table)?;
        match tokio::fs::metadata(&file).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NamespaceError::unavailable(e.to_string())),
        }
    }

    async fn open_table(&self, path: &NamespacePath, table: &TableName) -> Result<TableHandle> {
        let file = self.table_file(path, table)?;
        let bytes = match tokio::fs::read(&file).await {
            Ok(bytes) => Bytes::from(bytes),
            // A missing namespace directory and a missing table file surface
            // identically.
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NamespaceError::table_not_found(path, table))
            }
            Err(e) => return Err(NamespaceError::unavailable(e.to_string())),
        };

        let (schema, batches) =
            tokio::task::spawn_blocking(move || parse_parquet_from_bytes(bytes))
                .await
                .map_err(|e| NamespaceError::unavailable(format!("decode task failed: {}", e)))??;

        let provider = MemTable::try_new(Arc::clone(&schema), vec![batches])
            .map_err(|e| NamespaceError::Parquet(e.to_string()))?;

        log::debug!("opened table {}/{} from {}", path, table, file.display());
        Ok(TableHandle::new(Arc::new(provider), schema))
    }

    async fn create_namespace(&self, path: &NamespacePath) -> Result<()> {
        if path.is_root() {
            return Err(NamespaceError::NamespaceAlreadyExists("tree root".to_string()));
        }
        let dir = self.dir_for(path)?;
        match tokio::fs::create_dir(&dir).await {
            Ok(()) => {
                log::debug!("created namespace {}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(NamespaceError::NamespaceAlreadyExists(path.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(NamespaceError::NamespaceNotFound(
                path.parent().unwrap_or_default().to_string(),
            )),
            Err(e) => Err(NamespaceError::unavailable(e.to_string())),
        }
    }

    async fn write_table(
        &self,
        path: &NamespacePath,
        table: &TableName,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()> {
        let dir = self.dir_for(path)?;
        match tokio::fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(NamespaceError::NamespaceNotFound(path.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(NamespaceError::NamespaceNotFound(path.to_string()))
            }
            Err(e) => return Err(NamespaceError::unavailable(e.to_string())),
        }

        let file = self.table_file(path, table)?;
        match tokio::fs::metadata(&file).await {
            Ok(_) => {
                return Err(NamespaceError::TableAlreadyExists {
                    namespace: path.to_string(),
                    table: table.to_string(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(NamespaceError::unavailable(e.to_string())),
        }

        let bytes = tokio::task::spawn_blocking(move || serialize_to_parquet(schema, &batches))
            .await
            .map_err(|e| NamespaceError::unavailable(format!("encode task failed: {}", e)))??;

        let size = bytes.len();
        tokio::fs::write(&file, bytes)
            .await
            .map_err(|e| NamespaceError::unavailable(e.to_string()))?;

        log::debug!("wrote table {}/{} ({} bytes)", path, table, size);
        Ok(())
    }
}
