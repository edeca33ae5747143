//! A namespace backend view rooted at a sub-path of another backend.

use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use canopy_commons::models::{NamespacePath, TableName};

use crate::backend::NamespaceBackend;
use crate::error::Result;
use crate::handle::TableHandle;

/// Decorator that presents a sub-tree of another backend as a tree of its
/// own: every operation prepends the fixed root path.
///
/// This is how a mount's prefix is consumed - exactly once, at mount
/// registration - so resolution itself never has to re-apply it.
#[derive(Debug, Clone)]
pub struct PrefixedNamespace {
    inner: Arc<dyn NamespaceBackend>,
    root: NamespacePath,
}

impl PrefixedNamespace {
    /// Roots `inner` at `root`.
    pub fn new(inner: Arc<dyn NamespaceBackend>, root: NamespacePath) -> Self {
        Self { inner, root }
    }

    /// The root path inside the wrapped backend.
    pub fn root(&self) -> &NamespacePath {
        &self.root
    }

    fn full_path(&self, path: &NamespacePath) -> NamespacePath {
        self.root.join(path)
    }
}

#[async_trait::async_trait]
impl NamespaceBackend for PrefixedNamespace {
    async fn namespace_exists(&self, path: &NamespacePath) -> Result<bool> {
        self.inner.namespace_exists(&self.full_path(path)).await
    }

    async fn list_child_namespaces(&self, path: &NamespacePath) -> Result<Vec<String>> {
        self.inner.list_child_namespaces(&self.full_path(path)).await
    }

    async fn table_exists(&self, path: &NamespacePath, table: &TableName) -> Result<bool> {
        self.inner.table_exists(&self.full_path(path), table).await
    }

    async fn open_table(&self, path: &NamespacePath, table: &TableName) -> Result<TableHandle> {
        self.inner.open_table(&self.full_path(path), table).await
    }

    async fn create_namespace(&self, path: &NamespacePath) -> Result<()> {
        self.inner.create_namespace(&self.full_path(path)).await
    }

    async fn write_table(
        &self,
        path: &NamespacePath,
        table: &TableName,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()> {
        self.inner
            .write_table(&self.full_path(path), table, schema, batches)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryNamespace;
    use canopy_commons::arrow_utils::{field_int32, schema, RecordBatchBuilder};

    #[tokio::test]
    async fn test_prefixed_view_roots_all_operations() {
        let store = Arc::new(InMemoryNamespace::new());
        let crm = NamespacePath::new(["crm"]);
        store.create_namespace(&crm).await.unwrap();
        store.create_namespace(&crm.child("dim")).await.unwrap();

        let table_schema = schema(vec![field_int32("customer_id", false)]);
        let mut builder = RecordBatchBuilder::new(Arc::clone(&table_schema));
        builder.add_int32_column(vec![Some(1), Some(2)]);
        store
            .write_table(
                &crm.child("dim"),
                &TableName::new("customers_dim"),
                table_schema,
                vec![builder.build().unwrap()],
            )
            .await
            .unwrap();

        let view = PrefixedNamespace::new(store, crm);
        let dim = NamespacePath::new(["dim"]);

        // The view addresses "dim" where the store holds "crm/dim".
        assert!(view.namespace_exists(&dim).await.unwrap());
        assert_eq!(
            view.list_child_namespaces(&NamespacePath::root())
                .await
                .unwrap(),
            vec!["dim"]
        );

        let handle = view
            .open_table(&dim, &TableName::new("customers_dim"))
            .await
            .unwrap();
        assert_eq!(handle.schema().field(0).name(), "customer_id");
    }
}
