//! Classification of dotted references to their owning mount.

use canopy_commons::models::{NamespacePath, TableName};

use crate::error::CatalogError;
use crate::mounts::{Mount, MountRegistry};

/// The outcome of classifying a dotted reference: the owning mount, the
/// namespace path *inside that mount's backend*, and the table name.
///
/// Only produced by [`resolve`]; never constructed directly by callers.
#[derive(Debug)]
pub struct ResolvedReference<'a> {
    mount: &'a Mount,
    namespace: NamespacePath,
    table: TableName,
}

impl<'a> ResolvedReference<'a> {
    /// The mount that owns the reference.
    pub fn mount(&self) -> &'a Mount {
        self.mount
    }

    /// The namespace path inside the owning mount's backend.
    pub fn namespace(&self) -> &NamespacePath {
        &self.namespace
    }

    /// The referenced table's name.
    pub fn table(&self) -> &TableName {
        &self.table
    }
}

/// Classify a dotted reference, given as ordered segments, against the
/// session's mounts. Deterministic, first match wins:
///
/// 1. fewer than two segments is rejected as ambiguous - a bare table name
///    carries no namespace;
/// 2. a first segment equal to a registered alias selects that mount, and
///    the alias segment is dropped from the namespace path. Aliases shadow
///    root-level namespaces of the same name by design;
/// 3. anything else belongs to the default mount, with the full leading
///    segments as the namespace path.
///
/// The last segment is always the table name. `Mount::prefix` is never
/// consulted here; the mount's backend is already rooted at it.
pub fn resolve<'a>(
    mounts: &'a MountRegistry,
    segments: &[String],
) -> Result<ResolvedReference<'a>, CatalogError> {
    if segments.len() < 2 {
        return Err(CatalogError::AmbiguousIdentifier(segments.join(".")));
    }

    let last = segments.len() - 1;
    let table = TableName::new(&segments[last]);

    if let Some(mount) = mounts.find_alias(&segments[0]) {
        log::debug!(
            "reference {} owned by alias mount '{}'",
            segments.join("."),
            mount.alias()
        );
        return Ok(ResolvedReference {
            mount,
            namespace: NamespacePath::new(segments[1..last].iter().cloned()),
            table,
        });
    }

    let mount = mounts.default_mount()?;
    Ok(ResolvedReference {
        mount,
        namespace: NamespacePath::new(segments[..last].iter().cloned()),
        table,
    })
}
