//! Type-safe wrapper types for CanopyDB identifiers.
//!
//! This module provides newtype wrappers to enforce type safety at compile
//! time, preventing accidental mixing of namespace paths and table names.
//!
//! ## Examples
//!
//! ```rust
//! use canopy_commons::models::{NamespacePath, TableName};
//!
//! let path = NamespacePath::new(["retail", "sales"]);
//! let table = TableName::new("Customers");
//!
//! // Type safety prevents mixing
//! // let wrong: TableName = path; // Compile error!
//!
//! assert_eq!(path.to_string(), "retail/sales");
//! assert_eq!(table.as_str(), "customers");
//! ```

pub mod ids;

mod table_locator;

pub use ids::{NamespacePath, TableName};
pub use table_locator::TableLocator;
