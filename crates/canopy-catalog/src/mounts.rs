//! Session mounts: which namespace trees a session can address.

use std::collections::HashMap;
use std::sync::Arc;

use canopy_commons::models::NamespacePath;
use canopy_namespace::{NamespaceBackend, PrefixedNamespace};

use crate::error::CatalogError;

/// A namespace backend attached to a session under an alias.
///
/// The empty alias marks the default mount (the "root" tree). The `prefix`
/// records the position the alias represents inside the mounted backend; it
/// is consumed once at registration (the stored backend is already rooted
/// there) and resolution never re-applies it.
#[derive(Debug, Clone)]
pub struct Mount {
    alias: String,
    backend: Arc<dyn NamespaceBackend>,
    prefix: NamespacePath,
}

impl Mount {
    fn new(alias: String, backend: Arc<dyn NamespaceBackend>, prefix: NamespacePath) -> Self {
        // Root the backend at the prefix exactly once, here.
        let backend: Arc<dyn NamespaceBackend> = if prefix.is_root() {
            backend
        } else {
            Arc::new(PrefixedNamespace::new(backend, prefix.clone()))
        };
        Self {
            alias,
            backend,
            prefix,
        }
    }

    /// The mount alias; empty for the default mount.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// True for the default (unaliased) mount.
    pub fn is_default(&self) -> bool {
        self.alias.is_empty()
    }

    /// The backend adapter serving this mount, already rooted at `prefix`.
    pub fn backend(&self) -> &Arc<dyn NamespaceBackend> {
        &self.backend
    }

    /// The path this mount's alias represents inside the mounted backend.
    pub fn prefix(&self) -> &NamespacePath {
        &self.prefix
    }
}

/// The set of mounts attached to one session.
///
/// Built once at session construction and immutable afterwards, so the read
/// path needs no locking.
#[derive(Debug, Default)]
pub struct MountRegistry {
    default: Option<Arc<Mount>>,
    aliases: HashMap<String, Arc<Mount>>,
}

impl MountRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a backend under `alias`. The empty alias registers the default
    /// mount.
    pub fn register_mount(
        &mut self,
        alias: impl Into<String>,
        backend: Arc<dyn NamespaceBackend>,
        prefix: NamespacePath,
    ) -> Result<(), CatalogError> {
        let alias = alias.into();
        if alias.is_empty() {
            if self.default.is_some() {
                return Err(CatalogError::DuplicateDefault);
            }
            self.default = Some(Arc::new(Mount::new(alias, backend, prefix)));
            return Ok(());
        }

        if self.aliases.contains_key(&alias) {
            return Err(CatalogError::DuplicateAlias(alias));
        }
        self.aliases
            .insert(alias.clone(), Arc::new(Mount::new(alias, backend, prefix)));
        Ok(())
    }

    /// The default mount; every session is constructed with exactly one.
    pub fn default_mount(&self) -> Result<&Mount, CatalogError> {
        self.default
            .as_deref()
            .ok_or(CatalogError::NoDefaultMount)
    }

    /// The mount whose alias equals `segment`, if any.
    pub fn find_alias(&self, segment: &str) -> Option<&Mount> {
        self.aliases.get(segment).map(Arc::as_ref)
    }

    /// All registered non-default aliases, sorted.
    pub fn aliases(&self) -> Vec<String> {
        let mut names: Vec<String> = self.aliases.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_namespace::InMemoryNamespace;

    fn backend() -> Arc<dyn NamespaceBackend> {
        Arc::new(InMemoryNamespace::new())
    }

    #[test]
    fn test_register_default_and_aliases() {
        let mut registry = MountRegistry::new();
        registry
            .register_mount("", backend(), NamespacePath::root())
            .unwrap();
        registry
            .register_mount("crm", backend(), NamespacePath::new(["crm"]))
            .unwrap();

        assert!(registry.default_mount().is_ok());
        assert!(registry.find_alias("crm").is_some());
        assert!(registry.find_alias("hr").is_none());
        assert_eq!(registry.aliases(), vec!["crm"]);
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut registry = MountRegistry::new();
        registry
            .register_mount("crm", backend(), NamespacePath::root())
            .unwrap();
        let err = registry
            .register_mount("crm", backend(), NamespacePath::root())
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateAlias(a) if a == "crm"));
    }

    #[test]
    fn test_duplicate_default_rejected() {
        let mut registry = MountRegistry::new();
        registry
            .register_mount("", backend(), NamespacePath::root())
            .unwrap();
        let err = registry
            .register_mount("", backend(), NamespacePath::root())
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateDefault));
    }

    #[test]
    fn test_missing_default_reported() {
        let registry = MountRegistry::new();
        assert!(matches!(
            registry.default_mount().unwrap_err(),
            CatalogError::NoDefaultMount
        ));
    }
}
