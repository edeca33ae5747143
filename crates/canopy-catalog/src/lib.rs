//! # canopy-catalog
//!
//! Identifier resolution and catalog federation over mounted namespace trees.
//!
//! A session mounts one default namespace tree plus zero or more aliased
//! trees, then exposes all of them to DataFusion as a single catalog space:
//! a dotted SQL reference such as `retail.sales.customers` is classified to
//! its owning mount, split into an in-backend namespace path and a table
//! name, opened through the backend, and memoized for the session lifetime.
//!
//! ## Resolution order
//!
//! 1. If the first segment equals a registered mount alias, that mount owns
//!    the reference (aliases shadow same-named root namespaces).
//! 2. Otherwise the default mount owns it.
//! 3. The last segment is the table name; everything between is the
//!    namespace path inside the owning backend.
//!
//! Resolution is lazy: no backend is touched until the engine asks for a
//! table, and nothing enumerates trees eagerly.

pub mod cache;
pub mod error;
pub mod mounts;
pub mod providers;
pub mod resolver;
pub mod session;

pub use cache::TableHandleCache;
pub use error::{to_df_error, CatalogError};
pub use mounts::{Mount, MountRegistry};
pub use providers::FederatedCatalogList;
pub use resolver::{resolve, ResolvedReference};
pub use session::{FederatedSession, SessionBuilder};
