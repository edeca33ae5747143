//! Opened table handles.

use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use datafusion::datasource::TableProvider;

/// An opened reference to a physical table: a DataFusion table provider plus
/// the table's Arrow schema.
///
/// Handles are produced by [`NamespaceBackend::open_table`] and shared
/// read-only (behind `Arc`) with the query engine for the lifetime of the
/// owning session.
///
/// **Clone Semantics**: cloning only bumps reference counts; the provider
/// and schema are never copied.
///
/// [`NamespaceBackend::open_table`]: crate::NamespaceBackend::open_table
#[derive(Clone)]
pub struct TableHandle {
    provider: Arc<dyn TableProvider>,
    schema: SchemaRef,
}

impl std::fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHandle")
            .field("schema", &self.schema)
            .finish()
    }
}

impl TableHandle {
    /// Pair a provider with its schema.
    pub fn new(provider: Arc<dyn TableProvider>, schema: SchemaRef) -> Self {
        Self { provider, schema }
    }

    /// The scan-capable provider handed to the query engine.
    pub fn provider(&self) -> Arc<dyn TableProvider> {
        Arc::clone(&self.provider)
    }

    /// The table's column schema.
    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }
}
