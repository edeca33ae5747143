//! Session construction and the session core shared by all providers.

use std::sync::Arc;

use canopy_commons::models::NamespacePath;
use canopy_namespace::{NamespaceBackend, TableHandle};
use datafusion::execution::context::{SessionConfig, SessionContext};

use crate::cache::TableHandleCache;
use crate::error::CatalogError;
use crate::mounts::MountRegistry;
use crate::providers::FederatedCatalogList;
use crate::resolver::{resolve, ResolvedReference};

/// Catalog name under which references without an explicit top-level
/// namespace are addressed, unless overridden on the builder.
pub const DEFAULT_CATALOG: &str = "canopy";

/// Schema name the engine assumes for bare table references, unless
/// overridden on the builder.
pub const DEFAULT_SCHEMA: &str = "public";

/// The session core: the mount registry plus the table handle cache.
///
/// Shared (behind `Arc`) by every catalog/schema provider handed to the
/// engine; safe for concurrent use by multiple in-flight queries. Mounts are
/// immutable after construction, the cache is lock-free.
#[derive(Debug)]
pub struct FederatedSession {
    mounts: MountRegistry,
    cache: TableHandleCache,
}

impl FederatedSession {
    /// Wraps a fully-populated mount registry with a fresh cache.
    pub fn new(mounts: MountRegistry) -> Self {
        Self {
            mounts,
            cache: TableHandleCache::new(),
        }
    }

    /// The session's mounts.
    pub fn mounts(&self) -> &MountRegistry {
        &self.mounts
    }

    /// The session's handle cache.
    pub fn cache(&self) -> &TableHandleCache {
        &self.cache
    }

    /// Classify a dotted reference without opening anything.
    pub fn resolve(&self, segments: &[String]) -> Result<ResolvedReference<'_>, CatalogError> {
        resolve(&self.mounts, segments)
    }

    /// Resolve a dotted reference to an opened table handle, memoized for
    /// the session lifetime.
    ///
    /// A backend not-found is re-raised as
    /// [`CatalogError::UnresolvedIdentifier`] carrying the full dotted
    /// identifier; other backend failures propagate unchanged.
    pub async fn table_handle(&self, segments: &[String]) -> Result<Arc<TableHandle>, CatalogError> {
        let identifier = segments.join(".");
        let identifier_for_err = identifier.clone();
        self.cache
            .get_or_resolve(&identifier, || async move {
                let reference = resolve(&self.mounts, segments)?;
                reference
                    .mount()
                    .backend()
                    .open_table(reference.namespace(), reference.table())
                    .await
                    .map_err(|err| {
                        if err.is_not_found() {
                            CatalogError::UnresolvedIdentifier(identifier_for_err)
                        } else {
                            CatalogError::Namespace(err)
                        }
                    })
            })
            .await
    }

    /// True when the reference has already been resolved in this session.
    pub fn is_cached(&self, segments: &[String]) -> bool {
        self.cache.contains(&segments.join("."))
    }

    /// Table names resolved so far directly under the logical `path`.
    ///
    /// Enumeration surfaces answer from the cache only - nothing here walks
    /// a backend tree.
    pub fn cached_table_names_under(&self, path: &[String]) -> Vec<String> {
        let prefix = format!("{}.", path.join("."));
        let mut names: Vec<String> = self
            .cache
            .identifiers()
            .into_iter()
            .filter_map(|id| id.strip_prefix(&prefix).map(str::to_string))
            .filter(|rest| !rest.contains('.'))
            .collect();
        names.sort();
        names
    }

    /// Schema names observed so far under the logical `path` (best-effort,
    /// from the cache).
    pub fn cached_schema_names_under(&self, path: &[String]) -> Vec<String> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{}.", path.join("."))
        };
        let mut names: Vec<String> = self
            .cache
            .identifiers()
            .into_iter()
            .filter_map(|id| {
                id.strip_prefix(&prefix)
                    .and_then(|rest| rest.rsplit_once('.'))
                    .map(|(schema, _table)| schema.to_string())
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Builder for a DataFusion `SessionContext` backed by mounted namespace
/// trees.
///
/// The mount set is supplied once here; there is no dynamic remounting API.
/// `build` fails - and the session never exists - on construction-time
/// misconfiguration: a missing default mount, a duplicate alias, or a second
/// default mount.
///
/// # Example
///
/// ```ignore
/// let ctx = SessionBuilder::new()
///     .with_root(Arc::new(DirectoryNamespace::new("/data/root")?))
///     .add_mount("crm", Arc::new(DirectoryNamespace::new("/data/crm")?),
///                NamespacePath::new(["crm"]))
///     .build()?;
/// let df = ctx.sql("SELECT * FROM retail.sales.customers").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    root: Option<Arc<dyn NamespaceBackend>>,
    mounts: Vec<(String, Arc<dyn NamespaceBackend>, NamespacePath)>,
    config: Option<SessionConfig>,
    default_catalog: String,
    default_schema: String,
}

impl SessionBuilder {
    /// Create a new builder with no mounts or configuration.
    pub fn new() -> Self {
        Self {
            root: None,
            mounts: Vec::new(),
            config: None,
            default_catalog: DEFAULT_CATALOG.to_string(),
            default_schema: DEFAULT_SCHEMA.to_string(),
        }
    }

    /// Attach the default mount (the "root" tree).
    pub fn with_root(mut self, backend: Arc<dyn NamespaceBackend>) -> Self {
        self.root = Some(backend);
        self
    }

    /// Attach an additional tree under `alias`. `prefix` is the namespace
    /// path inside `backend` the alias stands for; pass
    /// `NamespacePath::root()` to mount the whole tree.
    pub fn add_mount(
        mut self,
        alias: impl Into<String>,
        backend: Arc<dyn NamespaceBackend>,
        prefix: NamespacePath,
    ) -> Self {
        self.mounts.push((alias.into(), backend, prefix));
        self
    }

    /// Provide an explicit `SessionConfig` for the underlying
    /// `SessionContext`.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the catalog name used for references without an explicit
    /// top-level namespace.
    pub fn with_default_catalog(mut self, name: impl Into<String>) -> Self {
        self.default_catalog = name.into();
        self
    }

    /// Override the schema name the engine assumes for bare references.
    pub fn with_default_schema(mut self, name: impl Into<String>) -> Self {
        self.default_schema = name.into();
        self
    }

    /// Build the `SessionContext` and return the session core alongside it
    /// (useful for cache statistics and administrative access).
    pub fn build_with_session(
        self,
    ) -> Result<(SessionContext, Arc<FederatedSession>), CatalogError> {
        let mut registry = MountRegistry::new();
        if let Some(root) = self.root {
            registry.register_mount("", root, NamespacePath::root())?;
        }
        for (alias, backend, prefix) in self.mounts {
            registry.register_mount(alias, backend, prefix)?;
        }
        // A session is always constructed with exactly one default mount.
        registry.default_mount()?;

        let session = Arc::new(FederatedSession::new(registry));

        let config = self
            .config
            .unwrap_or_default()
            .with_information_schema(true)
            .with_default_catalog_and_schema(self.default_catalog.as_str(), self.default_schema.as_str());
        let ctx = SessionContext::new_with_config(config);
        ctx.register_catalog_list(Arc::new(FederatedCatalogList::new(
            Arc::clone(&session),
            self.default_catalog,
        )));

        log::debug!(
            "session built: default mount + {} aliased mount(s)",
            session.mounts().aliases().len()
        );
        Ok((ctx, session))
    }

    /// Build a `SessionContext` with all configured mounts.
    pub fn build(self) -> Result<SessionContext, CatalogError> {
        self.build_with_session().map(|(ctx, _)| ctx)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
