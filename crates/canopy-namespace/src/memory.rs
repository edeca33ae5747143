//! In-memory namespace backend.
//!
//! Holds the whole tree in process memory. Useful for tests and for
//! embedding small datasets without touching the filesystem; the semantics
//! match [`DirectoryNamespace`](crate::DirectoryNamespace) exactly.

use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use canopy_commons::models::{NamespacePath, TableLocator, TableName};
use dashmap::DashMap;
use datafusion::datasource::MemTable;

use crate::backend::{validate_path, validate_table_name, NamespaceBackend};
use crate::error::{NamespaceError, Result};
use crate::handle::TableHandle;

#[derive(Debug, Clone)]
struct StoredTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

/// Namespace backend holding all data in memory.
///
/// Lock-free concurrent access via `DashMap`; the tree root always exists.
#[derive(Debug, Default)]
pub struct InMemoryNamespace {
    namespaces: DashMap<NamespacePath, ()>,
    tables: DashMap<TableLocator, StoredTable>,
}

impl InMemoryNamespace {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn exists(&self, path: &NamespacePath) -> bool {
        path.is_root() || self.namespaces.contains_key(path)
    }
}

#[async_trait::async_trait]
impl NamespaceBackend for InMemoryNamespace {
    async fn namespace_exists(&self, path: &NamespacePath) -> Result<bool> {
        validate_path(path)?;
        Ok(self.exists(path))
    }

    async fn list_child_namespaces(&self, path: &NamespacePath) -> Result<Vec<String>> {
        validate_path(path)?;
        if !self.exists(path) {
            return Err(NamespaceError::NamespaceNotFound(path.to_string()));
        }

        let mut names: Vec<String> = self
            .namespaces
            .iter()
            .filter(|entry| entry.key().parent().as_ref() == Some(path))
            .filter_map(|entry| entry.key().last_segment().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn table_exists(&self, path: &NamespacePath, table: &TableName) -> Result<bool> {
        validate_path(path)?;
        validate_table_name(table)?;
        let locator = TableLocator::new(path.clone(), table.clone());
        Ok(self.tables.contains_key(&locator))
    }

    async fn open_table(&self, path: &NamespacePath, table: &TableName) -> Result<TableHandle> {
        validate_path(path)?;
        validate_table_name(table)?;
        let locator = TableLocator::new(path.clone(), table.clone());
        let stored = self
            .tables
            .get(&locator)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NamespaceError::table_not_found(path, table))?;

        let provider = MemTable::try_new(Arc::clone(&stored.schema), vec![stored.batches])
            .map_err(|e| NamespaceError::Parquet(e.to_string()))?;
        Ok(TableHandle::new(Arc::new(provider), stored.schema))
    }

    async fn create_namespace(&self, path: &NamespacePath) -> Result<()> {
        validate_path(path)?;
        if path.is_root() || self.namespaces.contains_key(path) {
            return Err(NamespaceError::NamespaceAlreadyExists(if path.is_root() {
                "tree root".to_string()
            } else {
                path.to_string()
            }));
        }
        if let Some(parent) = path.parent() {
            if !self.exists(&parent) {
                return Err(NamespaceError::NamespaceNotFound(parent.to_string()));
            }
        }
        self.namespaces.insert(path.clone(), ());
        Ok(())
    }

    async fn write_table(
        &self,
        path: &NamespacePath,
        table: &TableName,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()> {
        validate_path(path)?;
        validate_table_name(table)?;
        if !self.exists(path) {
            return Err(NamespaceError::NamespaceNotFound(path.to_string()));
        }

        let locator = TableLocator::new(path.clone(), table.clone());
        if self.tables.contains_key(&locator) {
            return Err(NamespaceError::TableAlreadyExists {
                namespace: path.to_string(),
                table: table.to_string(),
            });
        }
        self.tables.insert(locator, StoredTable { schema, batches });
        Ok(())
    }
}
