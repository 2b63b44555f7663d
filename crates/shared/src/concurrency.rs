//! Concurrent create-on-miss caches keyed by name.

use dashmap::DashMap;
use std::sync::Arc;

/// Name-keyed cache of shared values.
pub type NamedCache<V> = DashMap<Arc<str>, Arc<V>>;

/// Value cached under `name`, created by `create` on first request.
///
/// Hits only take a shard read lock. On a miss the shard entry is locked, so
/// concurrent first requests for one name run `create` once and all observe
/// the same `Arc`.
pub fn get_or_create<V>(cache: &NamedCache<V>, name: &str, create: impl FnOnce() -> V) -> Arc<V> {
    if let Some(existing) = cache.get(name) {
        return Arc::clone(existing.value());
    }
    let entry = cache
        .entry(Arc::from(name))
        .or_insert_with(|| Arc::new(create()));
    Arc::clone(entry.value())
}
