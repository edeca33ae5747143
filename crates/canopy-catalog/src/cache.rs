//! Session-lifetime memoization of resolved table handles.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use canopy_namespace::TableHandle;
use dashmap::DashMap;

use crate::error::CatalogError;

/// Memoizes resolved identifiers to opened table handles for one session.
///
/// Keyed by the dotted identifier string as the engine delivers it (the
/// engine has already applied its identifier-casing normalization).
/// Entries are populated lazily on first reference and never evicted
/// automatically; resolution failures are not cached, so a reference to a
/// since-created table succeeds without any invalidation step.
///
/// Concurrent population follows last-writer-wins: if two queries race on
/// the same never-before-seen identifier, both may call the backend and the
/// results are deduplicated on insert. Both handles are semantically
/// equivalent and readers never observe a torn entry.
pub struct TableHandleCache {
    entries: DashMap<String, Arc<TableHandle>>,

    /// Cache hit count (for metrics)
    hits: AtomicU64,

    /// Cache miss count (for metrics)
    misses: AtomicU64,
}

impl std::fmt::Debug for TableHandleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHandleCache")
            .field("entries", &self.entries.len())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl TableHandleCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the handle for `identifier`, resolving and storing it on
    /// first reference.
    ///
    /// On a hit the stored handle is returned with no backend call. On a
    /// miss `resolve_fn` runs; its failure is propagated and NOT stored.
    pub async fn get_or_resolve<F, Fut>(
        &self,
        identifier: &str,
        resolve_fn: F,
    ) -> Result<Arc<TableHandle>, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TableHandle, CatalogError>>,
    {
        if let Some(entry) = self.entries.get(identifier) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(entry.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let handle = Arc::new(resolve_fn().await?);
        self.entries
            .insert(identifier.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Returns the cached handle without resolving.
    pub fn get(&self, identifier: &str) -> Option<Arc<TableHandle>> {
        self.entries
            .get(identifier)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// True when `identifier` has been resolved in this session.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Drop the entry for `identifier`, if any.
    ///
    /// Invalidation is always explicit; nothing in this layer invalidates on
    /// its own (see the open-question note in DESIGN.md).
    pub fn invalidate(&self, identifier: &str) {
        self.entries.remove(identifier);
    }

    /// All identifiers resolved so far, in no particular order.
    pub fn identifiers(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache statistics: (size, hits, misses).
    pub fn stats(&self) -> (usize, u64, u64) {
        (
            self.entries.len(),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

impl Default for TableHandleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::record_batch::RecordBatch;
    use canopy_commons::arrow_utils::{field_int32, schema};
    use datafusion::datasource::MemTable;
    use std::sync::atomic::AtomicUsize;

    fn make_handle() -> TableHandle {
        let schema = schema(vec![field_int32("id", false)]);
        let batch = RecordBatch::try_new(
            Arc::clone(&schema),
            vec![Arc::new(Int32Array::from(vec![1, 2]))],
        )
        .unwrap();
        let provider = MemTable::try_new(Arc::clone(&schema), vec![vec![batch]]).unwrap();
        TableHandle::new(Arc::new(provider), schema)
    }

    #[tokio::test]
    async fn test_second_lookup_hits_without_resolving() {
        let cache = TableHandleCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_resolve("retail.sales.customers", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(make_handle())
            })
            .await
            .unwrap();

        let second = cache
            .get_or_resolve("retail.sales.customers", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(make_handle())
            })
            .await
            .unwrap();

        // One backend round-trip, cache-identical handles.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));

        let (size, hits, misses) = cache.stats();
        assert_eq!((size, hits, misses), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = TableHandleCache::new();

        let err = cache
            .get_or_resolve("retail.sales.late_arrival", || async {
                Err(CatalogError::UnresolvedIdentifier(
                    "retail.sales.late_arrival".to_string(),
                ))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnresolvedIdentifier(_)));
        assert!(cache.is_empty());

        // The table shows up later; the next reference must succeed without
        // any invalidation.
        let handle = cache
            .get_or_resolve("retail.sales.late_arrival", || async { Ok(make_handle()) })
            .await
            .unwrap();
        assert_eq!(handle.schema().fields().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_re_resolution() {
        let cache = TableHandleCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_resolve("a.b", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(make_handle())
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.invalidate("a.b");
        cache
            .get_or_resolve("a.b", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(make_handle())
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_population_never_tears() {
        let cache = Arc::new(TableHandleCache::new());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_resolve("retail.sales.customers", || async { Ok(make_handle()) })
                    .await
                    .unwrap()
            }));
        }

        for task in handles {
            let handle = task.await.unwrap();
            assert_eq!(handle.schema().fields().len(), 1);
        }

        // Racing resolvers may each call the backend, but exactly one entry
        // survives and later lookups hit it.
        assert_eq!(cache.len(), 1);
        let again = cache
            .get_or_resolve("retail.sales.customers", || async {
                panic!("resolution must not run on a cache hit")
            })
            .await
            .unwrap();
        assert_eq!(again.schema().fields().len(), 1);
    }

    #[tokio::test]
    async fn test_identifiers_snapshot() {
        let cache = TableHandleCache::new();
        cache
            .get_or_resolve("retail.sales.customers", || async { Ok(make_handle()) })
            .await
            .unwrap();
        cache
            .get_or_resolve("crm.dim.customers_dim", || async { Ok(make_handle()) })
            .await
            .unwrap();

        let mut ids = cache.identifiers();
        ids.sort();
        assert_eq!(ids, vec!["crm.dim.customers_dim", "retail.sales.customers"]);
    }
}
