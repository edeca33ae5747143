//! # canopy-namespace
//!
//! Namespace backend abstraction for CanopyDB.
//!
//! A namespace backend owns one tree of namespaces and tables and answers a
//! small set of questions about it: does a namespace exist, which children
//! does it have, does a table exist, open a table, create a namespace, write
//! a table. Everything above this crate (identifier resolution, catalog
//! federation) is written against the [`NamespaceBackend`] trait only, never
//! against a concrete store.
//!
//! ## Architecture
//!
//! ```text
//! canopy-catalog (resolution + federation)
//!     ↓
//! canopy-namespace (NamespaceBackend trait)
//!     ↓
//! DirectoryNamespace | InMemoryNamespace | your backend
//! ```
//!
//! ## Backends
//!
//! - [`DirectoryNamespace`]: namespaces are directories, tables are Parquet
//!   files under a filesystem root
//! - [`InMemoryNamespace`]: table data held in memory; useful for tests and
//!   embedding
//! - [`PrefixedNamespace`]: a view of another backend rooted at a sub-path

pub mod backend;
pub mod directory;
pub mod error;
pub mod handle;
pub mod memory;
mod parquet;
pub mod prefixed;

pub use backend::NamespaceBackend;
pub use directory::DirectoryNamespace;
pub use error::{NamespaceError, Result};
pub use handle::TableHandle;
pub use memory::InMemoryNamespace;
pub use prefixed::PrefixedNamespace;
