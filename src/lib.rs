//! # CanopyDB
//!
//! Federated namespace catalogs for Apache DataFusion.
//!
//! CanopyDB mounts multiple independently-rooted, tree-structured dataset
//! namespaces into a single SQL-addressable catalog space: one default
//! "root" tree plus any number of aliased trees, each possibly served by a
//! different backend implementation. Dotted SQL references
//! (`retail.sales.customers`, `crm.dim.customers_dim`) are classified to
//! their owning mount, opened lazily through that mount's backend, and
//! memoized for the session lifetime.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use canopy::{DirectoryNamespace, NamespacePath, SessionBuilder};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let root = Arc::new(DirectoryNamespace::new("/data/warehouse")?);
//! let crm = Arc::new(DirectoryNamespace::new("/data/crm")?);
//!
//! let ctx = SessionBuilder::new()
//!     .with_root(root)
//!     .add_mount("crm", crm, NamespacePath::new(["crm"]))
//!     .build()?;
//!
//! let df = ctx
//!     .sql(
//!         "SELECT c.name, d.segment \
//!          FROM retail.sales.customers c \
//!          JOIN crm.dim.customers_dim d ON c.customer_id = d.customer_id",
//!     )
//!     .await?;
//! df.show().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - `canopy-commons`: identifier models and Arrow helpers
//! - `canopy-namespace`: the `NamespaceBackend` trait plus directory-tree
//!   and in-memory backends
//! - `canopy-catalog`: mounts, resolution, handle cache, and the DataFusion
//!   catalog adapters

pub mod logging;

// Re-export the public surface at the crate root
pub use canopy_catalog::{
    resolve, to_df_error, CatalogError, FederatedCatalogList, FederatedSession, Mount,
    MountRegistry, ResolvedReference, SessionBuilder, TableHandleCache,
};
pub use canopy_commons::arrow_utils;
pub use canopy_commons::models::{NamespacePath, TableLocator, TableName};
pub use canopy_namespace::{
    DirectoryNamespace, InMemoryNamespace, NamespaceBackend, NamespaceError, PrefixedNamespace,
    TableHandle,
};
