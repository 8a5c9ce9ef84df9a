//! The in-memory table cache and the load failure taxonomy.
//!
//! The cache is intentionally minimal: it memoizes loaded tables per key,
//! coalesces concurrent loads for the same key, and supports wholesale
//! invalidation for hot reload. There is no eviction, expiry or size bound;
//! the set of loadable tables is small and fixed per session.
//!
//! Loaders handed to the cache are total by construction (see
//! [`TableService`](crate::service::TableService)): they always produce a
//! value, degrading to the empty table internally. This removes any need for
//! a failure transition or retry logic in the cache itself.

use std::fmt;
use std::future::Future;

use thiserror::Error;

use loottables_model::TableId;

use crate::resolve::LayerKind;

/// An error that happens while loading a table from its backing layers.
///
/// Every variant is fully recovered inside the service: callers always
/// receive a usable table, and the failure kind is observable only through
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The id violates the naming rule; no layer was consulted.
    #[error("table paths cannot contain periods")]
    InvalidName,
    /// No layer has an entry for the id.
    #[error("not found in any layer")]
    NotFound,
    /// A layer has an entry, but it could not be read or is not a leaf
    /// resource. Resolution stops here; lower-precedence layers are not
    /// consulted.
    #[error("unreadable entry at {location} in {layer} layer: {reason}")]
    Unreadable {
        /// The layer that owns the entry.
        layer: LayerKind,
        /// Physical location of the entry within the layer.
        location: String,
        /// The underlying cause.
        reason: String,
    },
    /// The payload was read but failed structural parsing.
    #[error("malformed table at {location} in {layer} layer: {reason}")]
    Malformed {
        /// The layer that produced the payload.
        layer: LayerKind,
        /// Physical location of the payload within the layer.
        location: String,
        /// The parser's error message.
        reason: String,
    },
}

/// Shorthand for results carrying a [`LoadError`].
pub type LoadResult<T> = Result<T, LoadError>;

/// A concurrency-safe mapping from [`TableId`] to a loaded value.
///
/// Lookups for a missing key run the supplied loader; concurrent lookups for
/// the same key are coalesced so the loader runs at most once per key, and
/// every caller receives the resulting value. Distinct keys never serialize
/// against each other.
pub struct LoadCache<V> {
    cache: moka::future::Cache<TableId, V>,
}

impl<V> LoadCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty, unbounded cache.
    pub fn new() -> Self {
        LoadCache {
            cache: moka::future::Cache::builder().build(),
        }
    }

    /// Returns the value for `id`, running `init` to load it on first access.
    pub async fn get_with(&self, id: &TableId, init: impl Future<Output = V>) -> V {
        let entry = self.cache.entry_by_ref(id).or_insert_with(init).await;
        if entry.is_fresh() {
            tracing::trace!(%id, "table loaded");
        }
        entry.into_value()
    }

    /// Drops every entry.
    ///
    /// Acts as a barrier: values inserted before this call are never observed
    /// by later lookups, and the next access per key runs its loader again.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of entries currently resident. Approximate; for diagnostics.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl<V> Default for LoadCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for LoadCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
