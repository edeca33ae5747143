//! Error types for identifier resolution and session construction.

use canopy_namespace::NamespaceError;
use datafusion::error::DataFusionError;
use thiserror::Error;

/// Errors raised by the federation layer.
///
/// Construction-time misconfiguration (`DuplicateAlias`, `DuplicateDefault`,
/// `NoDefaultMount`) is fatal: `SessionBuilder::build` fails and no session
/// exists. Resolution failures (`AmbiguousIdentifier`,
/// `UnresolvedIdentifier`) are recoverable at the query level and surface
/// through the engine's error channel.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The reference has fewer than two segments; every table lives under at
    /// least one namespace segment.
    #[error("Ambiguous table reference '{0}': at least one namespace segment is required")]
    AmbiguousIdentifier(String),

    /// A non-default alias was registered twice.
    #[error("Duplicate mount alias: {0}")]
    DuplicateAlias(String),

    /// A second default (unaliased) mount was registered.
    #[error("A default mount is already registered")]
    DuplicateDefault,

    /// The session was constructed without a default mount.
    #[error("No default mount registered")]
    NoDefaultMount,

    /// No mounted tree could supply the referenced table. Carries the full
    /// original dotted identifier; a missing intermediate namespace and a
    /// missing leaf table surface identically.
    #[error("Unresolved table reference: {0}")]
    UnresolvedIdentifier(String),

    /// Backend failure other than not-found, propagated unchanged.
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

/// Convert a federation error into a DataFusion error.
///
/// This keeps all catalog-specific error formatting in a single place; the
/// engine sees every resolution failure through its own error channel, never
/// an empty table.
pub fn to_df_error(err: CatalogError) -> DataFusionError {
    DataFusionError::Execution(err.to_string())
}
