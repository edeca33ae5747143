//! DataFusion catalog adapters over a federated session.
//!
//! All three providers are lazy views: the sync `catalog()`/`schema()`
//! callbacks only extend a logical path, and the first (and only) backend
//! I/O happens in the async `table()` callback, when the engine actually
//! needs the table. Resolution failures surface there, on the engine's own
//! error channel - for engines that plan lazily this can be as late as the
//! first time execution is driven, and never earlier than the engine asks.

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use datafusion::catalog::{CatalogProvider, CatalogProviderList, SchemaProvider};
use datafusion::datasource::TableProvider;
use datafusion::error::Result as DataFusionResult;

use crate::error::to_df_error;
use crate::session::FederatedSession;

/// `CatalogProviderList` mapping catalog names onto the session's mounts.
///
/// Lookup order for `catalog(name)`:
/// 1. a mount alias equal to `name` (aliases take priority and shadow
///    same-named root namespaces);
/// 2. the session's default catalog name, covering references that carry no
///    explicit top-level namespace;
/// 3. catalogs registered through the engine's `register_catalog` API;
/// 4. otherwise `name` is treated as a top-level namespace of the default
///    tree - whether it exists is discovered lazily at table lookup.
#[derive(Debug)]
pub struct FederatedCatalogList {
    session: Arc<FederatedSession>,
    default_catalog: String,
    /// Catalogs handed to us via the engine's registration API.
    registered: DashMap<String, Arc<dyn CatalogProvider>>,
}

impl FederatedCatalogList {
    /// Expose `session` under the given default catalog name.
    pub fn new(session: Arc<FederatedSession>, default_catalog: impl Into<String>) -> Self {
        Self {
            session,
            default_catalog: default_catalog.into(),
            registered: DashMap::new(),
        }
    }
}

impl CatalogProviderList for FederatedCatalogList {
    fn as_any(&self) -> &dyn Any {
        self
    }

    /// Adds a catalog to this list. If a catalog of the same name existed
    /// before, it is replaced and returned. Mounts themselves are fixed for
    /// the session lifetime and are not affected.
    fn register_catalog(
        &self,
        name: String,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Option<Arc<dyn CatalogProvider>> {
        self.registered.insert(name, catalog)
    }

    fn catalog_names(&self) -> Vec<String> {
        let mut names: HashSet<String> = HashSet::new();
        names.insert(self.default_catalog.clone());
        names.extend(self.session.mounts().aliases());
        names.extend(self.registered.iter().map(|entry| entry.key().clone()));
        names.into_iter().collect()
    }

    fn catalog(&self, name: &str) -> Option<Arc<dyn CatalogProvider>> {
        if self.session.mounts().find_alias(name).is_some() {
            return Some(Arc::new(FederatedCatalog::new(
                Arc::clone(&self.session),
                vec![name.to_string()],
            )));
        }
        if name == self.default_catalog {
            return Some(Arc::new(FederatedCatalog::new(
                Arc::clone(&self.session),
                Vec::new(),
            )));
        }
        if let Some(existing) = self.registered.get(name) {
            return Some(Arc::clone(existing.value()));
        }
        Some(Arc::new(FederatedCatalog::new(
            Arc::clone(&self.session),
            vec![name.to_string()],
        )))
    }
}

/// `CatalogProvider` view over one logical path prefix.
///
/// A schema name may itself be dotted (quoted in SQL, e.g.
/// `retail."sales.q3".t`); it is split into further path segments, which is
/// how trees deeper than the engine's catalog.schema.table addressing stay
/// reachable.
#[derive(Debug)]
pub struct FederatedCatalog {
    session: Arc<FederatedSession>,
    path: Vec<String>,
}

impl FederatedCatalog {
    fn new(session: Arc<FederatedSession>, path: Vec<String>) -> Self {
        Self { session, path }
    }
}

impl CatalogProvider for FederatedCatalog {
    fn as_any(&self) -> &dyn Any {
        self
    }

    /// Schema names observed so far; answering from the cache keeps the
    /// no-eager-enumeration property.
    fn schema_names(&self) -> Vec<String> {
        self.session.cached_schema_names_under(&self.path)
    }

    fn schema(&self, name: &str) -> Option<Arc<dyn SchemaProvider>> {
        let mut path = self.path.clone();
        path.extend(name.split('.').map(str::to_string));
        Some(Arc::new(FederatedSchema::new(
            Arc::clone(&self.session),
            path,
        )))
    }
}

/// `SchemaProvider` view over one logical namespace path.
///
/// `table()` is the single callback through which the engine obtains table
/// providers; it assembles the full dotted identifier and delegates to the
/// session's memoizing resolution.
#[derive(Debug)]
pub struct FederatedSchema {
    session: Arc<FederatedSession>,
    path: Vec<String>,
}

impl FederatedSchema {
    fn new(session: Arc<FederatedSession>, path: Vec<String>) -> Self {
        Self { session, path }
    }

    fn reference_to(&self, name: &str) -> Vec<String> {
        let mut segments = self.path.clone();
        segments.push(name.to_string());
        segments
    }
}

#[async_trait]
impl SchemaProvider for FederatedSchema {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn table_names(&self) -> Vec<String> {
        self.session.cached_table_names_under(&self.path)
    }

    async fn table(&self, name: &str) -> DataFusionResult<Option<Arc<dyn TableProvider>>> {
        let segments = self.reference_to(name);
        match self.session.table_handle(&segments).await {
            Ok(handle) => Ok(Some(handle.provider())),
            // A failed reference is an error on the engine's channel, never
            // an empty-but-successful table.
            Err(err) => Err(to_df_error(err)),
        }
    }

    fn table_exist(&self, name: &str) -> bool {
        self.session.is_cached(&self.reference_to(name))
    }
}
