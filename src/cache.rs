//! # Cache Module
//!
//! Process-lifetime caches for search results and substitution lists.
//!
//! The cache is an explicit service object over an injected store interface,
//! so tests can swap in instrumented stores and an eviction policy can be
//! added later without touching call sites. Entries never expire and the
//! store is unbounded: a hit is authoritative for the life of the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Minimal store interface backing a [`CacheService`]
///
/// Implementations must be safe to share across concurrent requests.
pub trait CacheStore<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;
    fn set(&self, key: &str, value: V);
}

/// In-memory store: a mutex-guarded map, unbounded for the process lifetime
pub struct MemoryStore<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone + Send> CacheStore<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: V) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }
}

/// Cache service used by the search orchestrator and substitution resolver
///
/// Thin wrapper over the injected store; cloning shares the same store.
#[derive(Clone)]
pub struct CacheService<V> {
    store: Arc<dyn CacheStore<V>>,
}

impl<V: Clone + Send + 'static> CacheService<V> {
    /// Create a cache backed by the default in-memory store
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::default()),
        }
    }

    /// Create a cache backed by a caller-supplied store
    pub fn with_store(store: Arc<dyn CacheStore<V>>) -> Self {
        Self { store }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.store.get(key)
    }

    pub fn set(&self, key: &str, value: V) {
        self.store.set(key, value);
    }
}
