// Composite key for a table inside one namespace tree: {namespace_path}/{table_name}

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{NamespacePath, TableName};

/// Composite key locating a table inside a single namespace tree.
///
/// This composite key provides type-safe access to table data, ensuring
/// namespace path and table name are always paired correctly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableLocator {
    namespace: NamespacePath,
    table_name: TableName,
}

impl TableLocator {
    /// Create a new TableLocator from a namespace path and a table name.
    pub fn new(namespace: NamespacePath, table_name: TableName) -> Self {
        Self {
            namespace,
            table_name,
        }
    }

    /// Get the namespace path component.
    pub fn namespace(&self) -> &NamespacePath {
        &self.namespace
    }

    /// Get the table name component.
    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }

    /// Create from string components, where `segments` are the namespace
    /// segments in order.
    pub fn from_strings(segments: &[&str], table_name: &str) -> Self {
        Self {
            namespace: NamespacePath::new(segments.iter().copied()),
            table_name: TableName::new(table_name),
        }
    }

    /// Consume and return inner components.
    pub fn into_parts(self) -> (NamespacePath, TableName) {
        (self.namespace, self.table_name)
    }
}

impl fmt::Display for TableLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_root() {
            write!(f, "{}", self.table_name)
        } else {
            write!(f, "{}/{}", self.namespace, self.table_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_locator_new() {
        let namespace = NamespacePath::new(["retail", "sales"]);
        let table_name = TableName::new("customers");
        let locator = TableLocator::new(namespace.clone(), table_name.clone());

        assert_eq!(locator.namespace(), &namespace);
        assert_eq!(locator.table_name(), &table_name);
    }

    #[test]
    fn test_table_locator_from_strings() {
        let locator = TableLocator::from_strings(&["retail", "sales"], "customers");
        assert_eq!(locator.namespace().segments(), &["retail", "sales"]);
        assert_eq!(locator.table_name().as_str(), "customers");
    }

    #[test]
    fn test_table_locator_display() {
        let locator = TableLocator::from_strings(&["retail", "sales"], "customers");
        assert_eq!(format!("{}", locator), "retail/sales/customers");

        let at_root = TableLocator::from_strings(&[], "customers");
        assert_eq!(format!("{}", at_root), "customers");
    }

    #[test]
    fn test_table_locator_serialization() {
        let locator = TableLocator::from_strings(&["retail", "sales"], "customers");
        let json = serde_json::to_string(&locator).unwrap();
        let deserialized: TableLocator = serde_json::from_str(&json).unwrap();
        assert_eq!(locator, deserialized);
    }

    #[test]
    fn test_table_locator_into_parts() {
        let locator = TableLocator::from_strings(&["retail"], "orders");
        let (namespace, table_name) = locator.into_parts();

        assert_eq!(namespace.segments(), &["retail"]);
        assert_eq!(table_name.as_str(), "orders");
    }
}
