//! # canopy-commons
//!
//! Shared types and utilities for CanopyDB.
//!
//! This crate provides the foundational identifier types used across all
//! CanopyDB crates (canopy-namespace, canopy-catalog, canopy). It stays
//! dependency-light to prevent circular dependency issues.
//!
//! ## Type-Safe Wrappers
//!
//! - `NamespacePath`: ordered sequence of namespace segments; the empty
//!   sequence is the tree root
//! - `TableName`: table name wrapper (case-insensitive, lowercased)
//! - `TableLocator`: composite `{namespace_path}/{table_name}` key
//!
//! ## Example Usage
//!
//! ```rust
//! use canopy_commons::models::{NamespacePath, TableName, TableLocator};
//!
//! let path = NamespacePath::new(["retail", "sales"]);
//! let table = TableName::new("customers");
//! let locator = TableLocator::new(path, table);
//!
//! assert_eq!(locator.to_string(), "retail/sales/customers");
//! ```

pub mod helpers;
pub mod models;

// Re-export commonly used types at crate root
pub use helpers::arrow_utils;
pub use models::{NamespacePath, TableLocator, TableName};
