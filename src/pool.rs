//! Core shared-object pool implementation

use crate::config::PoolConfiguration;
use crate::errors::{FactoryError, PoolError, PoolResult};
use crate::health::HealthStatus;
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};
use crate::usage::{EntryUsage, UsageTracker};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Thread-safe flyweight pool: at most one shared value instance per key
///
/// The pool maps an immutable key to a lazily-created `Arc<V>`. Equal keys
/// always yield the identical instance (`Arc::ptr_eq`), the caller-supplied
/// factory runs at most once per distinct key, and entries live until the
/// pool itself is dropped. Returned values are shared read-only references.
///
/// # Examples
///
/// ```
/// use flyweight_pool::SharedObjectPool;
/// use std::sync::Arc;
///
/// let pool = SharedObjectPool::new(|flavor: &String| flavor.to_uppercase());
///
/// let first = pool.acquire("Cappuccino".to_string()).unwrap();
/// let second = pool.acquire("Cappuccino".to_string()).unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(pool.size(), 1);
/// ```
pub struct SharedObjectPool<K, V> {
    entries: DashMap<K, Arc<V>>,
    factory: Arc<dyn Fn(&K) -> Result<V, FactoryError> + Send + Sync>,
    config: PoolConfiguration<K>,
    metrics: MetricsTracker,
    usage: UsageTracker<K>,
}

impl<K: Eq + Hash + Clone, V> SharedObjectPool<K, V> {
    /// Create a pool around an infallible factory
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        Self::with_config(factory, PoolConfiguration::default())
    }

    /// Create a pool around an infallible factory with configuration
    pub fn with_config<F>(factory: F, config: PoolConfiguration<K>) -> Self
    where
        F: Fn(&K) -> V + Send + Sync + 'static,
    {
        Self::with_fallible_config(move |key: &K| Ok(factory(key)), config)
    }

    /// Create a pool around a fallible factory
    pub fn with_fallible<F>(factory: F) -> Self
    where
        F: Fn(&K) -> Result<V, FactoryError> + Send + Sync + 'static,
    {
        Self::with_fallible_config(factory, PoolConfiguration::default())
    }

    /// Create a pool around a fallible factory with configuration
    pub fn with_fallible_config<F>(factory: F, config: PoolConfiguration<K>) -> Self
    where
        F: Fn(&K) -> Result<V, FactoryError> + Send + Sync + 'static,
    {
        Self {
            entries: DashMap::with_capacity(config.initial_capacity),
            factory: Arc::new(factory),
            config,
            metrics: MetricsTracker::new(),
            usage: UsageTracker::new(),
        }
    }

    /// Get the shared value for `key`, creating it on first request
    ///
    /// Returns the cached `Arc` unchanged when the key is already present.
    /// Otherwise the factory runs exactly once and its result is stored
    /// under the key. A factory error propagates to the caller and leaves
    /// the pool without any entry for that key, so a retry runs the
    /// factory again.
    pub fn acquire(&self, key: K) -> PoolResult<Arc<V>> {
        self.check_key(&key)?;

        // Fast path: shared read on the already-cached case
        if let Some(existing) = self.entries.get(&key) {
            self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
            self.usage.record_share(&key);
            return Ok(Arc::clone(existing.value()));
        }

        // The shard write lock makes check-create-store one step, so
        // concurrent acquires of a new key run the factory once
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                self.metrics.cache_hits.fetch_add(1, Ordering::Relaxed);
                self.usage.record_share(occupied.key());
                Ok(Arc::clone(occupied.get()))
            }
            Entry::Vacant(vacant) => {
                let value = (self.factory)(vacant.key()).map_err(|err| {
                    self.metrics.factory_failures.fetch_add(1, Ordering::Relaxed);
                    PoolError::Factory(err)
                })?;
                // The vacant entry is dropped on the error path above,
                // leaving no trace of the failed key
                let value = Arc::new(value);
                self.usage.track_entry(vacant.key().clone());
                self.metrics.cache_misses.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Arc::clone(&value));
                Ok(value)
            }
        }
    }

    /// Acquire without surfacing the error
    pub fn try_acquire(&self, key: K) -> Option<Arc<V>> {
        self.acquire(key).ok()
    }

    /// Count of distinct cached entries
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool has no entries yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a value is already cached for `key` (no factory invocation)
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Usage record for a cached entry, if one exists
    pub fn entry_usage(&self, key: &K) -> Option<EntryUsage> {
        self.usage.usage(key)
    }

    /// Get pool metrics
    pub fn get_metrics(&self) -> PoolMetrics {
        self.metrics.get_metrics(self.entries.len())
    }

    /// Export metrics as a HashMap
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.get_metrics().export()
    }

    /// Export metrics in Prometheus format
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let metrics = self.get_metrics();
        MetricsExporter::export_prometheus(&metrics, pool_name, tags)
    }

    /// Get health status
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::from_metrics(&self.get_metrics())
    }

    fn check_key(&self, key: &K) -> PoolResult<()> {
        if let Some(validate) = self.config.key_validator
            && !validate(key)
        {
            self.metrics.rejected_keys.fetch_add(1, Ordering::Relaxed);
            return Err(PoolError::InvalidKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::sync::{Barrier, Mutex};
    use std::thread;

    #[derive(Debug, PartialEq)]
    struct Flavor {
        name: String,
    }

    fn flavor_pool() -> SharedObjectPool<String, Flavor> {
        SharedObjectPool::new(|name: &String| Flavor { name: name.clone() })
    }

    #[test]
    fn test_identity_reuse() {
        let pool = flavor_pool();

        let first = pool.acquire("Cappuccino".to_string()).unwrap();
        let second = pool.acquire("Cappuccino".to_string()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_keys_yield_distinct_values() {
        let pool = flavor_pool();

        let cappuccino = pool.acquire("Cappuccino".to_string()).unwrap();
        let frappe = pool.acquire("Frappe".to_string()).unwrap();

        assert!(!Arc::ptr_eq(&cappuccino, &frappe));
        assert_eq!(frappe.name, "Frappe");
    }

    #[test]
    fn test_factory_runs_once_per_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pool = SharedObjectPool::new(move |name: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            name.len()
        });

        for _ in 0..5 {
            pool.acquire("Xpresso".to_string()).unwrap();
        }
        pool.acquire("Frappe".to_string()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_size_counts_distinct_keys() {
        let pool = flavor_pool();

        for key in ["Cappuccino", "Frappe", "Cappuccino", "Xpresso", "Frappe"] {
            pool.acquire(key.to_string()).unwrap();
        }

        assert_eq!(pool.size(), 3);
        assert!(!pool.is_empty());
        assert!(pool.contains(&"Xpresso".to_string()));
        assert!(!pool.contains(&"Mocha".to_string()));
    }

    #[test]
    fn test_failed_factory_leaves_no_trace() {
        let fail = Arc::new(AtomicBool::new(true));
        let gate = Arc::clone(&fail);
        let pool = SharedObjectPool::with_fallible(move |name: &String| {
            if gate.load(Ordering::SeqCst) {
                Err(FactoryError::new("roaster offline"))
            } else {
                Ok(Flavor { name: name.clone() })
            }
        });

        let err = pool.acquire("Cappuccino".to_string()).unwrap_err();
        assert_eq!(err, PoolError::Factory(FactoryError::new("roaster offline")));
        assert_eq!(pool.size(), 0);
        assert!(!pool.contains(&"Cappuccino".to_string()));

        // Retry must reach the factory again, not a stale cache slot
        fail.store(false, Ordering::SeqCst);
        let value = pool.acquire("Cappuccino".to_string()).unwrap();
        assert_eq!(value.name, "Cappuccino");
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_invalid_key_rejected_before_factory() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = PoolConfiguration::new().with_key_validator(|k: &String| !k.is_empty());
        let pool = SharedObjectPool::with_config(
            move |name: &String| {
                counter.fetch_add(1, Ordering::SeqCst);
                name.clone()
            },
            config,
        );

        assert_eq!(pool.acquire(String::new()), Err(PoolError::InvalidKey));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(pool.size(), 0);
        assert_eq!(pool.get_metrics().rejected_keys, 1);
    }

    #[test]
    fn test_try_acquire() {
        let pool = SharedObjectPool::with_fallible(|name: &String| {
            if name == "Decaf" {
                Err(FactoryError::new("not served here"))
            } else {
                Ok(name.clone())
            }
        });

        assert!(pool.try_acquire("Frappe".to_string()).is_some());
        assert!(pool.try_acquire("Decaf".to_string()).is_none());
    }

    #[test]
    fn test_coffee_shop_scenario() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pool = SharedObjectPool::new(move |name: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            Flavor { name: name.clone() }
        });

        let first = pool.acquire("Cappuccino".to_string()).unwrap();
        let second = pool.acquire("Cappuccino".to_string()).unwrap();
        pool.acquire("Frappe".to_string()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(pool.size(), 2);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_acquires_create_one_instance() {
        const THREADS: usize = 8;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pool = SharedObjectPool::new(move |name: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            // Widen the race window around creation
            thread::sleep(std::time::Duration::from_millis(20));
            Flavor { name: name.clone() }
        });

        let barrier = Barrier::new(THREADS);
        let seen = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    barrier.wait();
                    let value = pool.acquire("Cappuccino".to_string()).unwrap();
                    seen.lock().unwrap().push(Arc::as_ptr(&value) as usize);
                });
            }
        });

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), THREADS);
        assert!(seen.iter().all(|ptr| *ptr == seen[0]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_metrics_track_hits_and_misses() {
        let pool = flavor_pool();

        pool.acquire("Cappuccino".to_string()).unwrap();
        pool.acquire("Cappuccino".to_string()).unwrap();
        pool.acquire("Frappe".to_string()).unwrap();

        let metrics = pool.get_metrics();
        assert_eq!(metrics.total_acquired, 3);
        assert_eq!(metrics.cache_hits, 1);
        assert_eq!(metrics.cache_misses, 2);
        assert_eq!(metrics.distinct_entries, 2);
    }

    #[test]
    fn test_entry_usage_counts_shares() {
        let pool = flavor_pool();

        pool.acquire("Frappe".to_string()).unwrap();
        pool.acquire("Frappe".to_string()).unwrap();
        pool.acquire("Frappe".to_string()).unwrap();

        let usage = pool.entry_usage(&"Frappe".to_string()).unwrap();
        assert_eq!(usage.times_shared, 2);
        assert!(pool.entry_usage(&"Mocha".to_string()).is_none());
    }

    #[test]
    fn test_health_reflects_factory_failures() {
        let pool = SharedObjectPool::with_fallible(|_: &String| {
            Err::<Flavor, _>(FactoryError::new("grinder jammed"))
        });

        assert!(pool.health_status().is_healthy());
        let _ = pool.acquire("Cappuccino".to_string());

        let health = pool.health_status();
        assert!(!health.is_healthy());
        assert_eq!(health.warning_count, 1);
    }

    #[test]
    fn test_integer_keys() {
        let pool = SharedObjectPool::new(|id: &u32| format!("glyph-{id}"));

        let a = pool.acquire(7).unwrap();
        let b = pool.acquire(7).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, "glyph-7");
    }
}
