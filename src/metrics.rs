//! Metrics collection and export for flyweight pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Metrics snapshot for a pool
///
/// # Examples
///
/// ```
/// use flyweight_pool::SharedObjectPool;
///
/// let pool = SharedObjectPool::new(|name: &String| name.clone());
///
/// pool.acquire("Cappuccino".to_string()).unwrap();
/// pool.acquire("Cappuccino".to_string()).unwrap();
///
/// let metrics = pool.get_metrics();
/// assert_eq!(metrics.total_acquired, 2);
/// assert_eq!(metrics.cache_hits, 1);
/// assert_eq!(metrics.cache_misses, 1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Total successful acquire calls
    pub total_acquired: usize,

    /// Acquires served from cache without invoking the factory
    pub cache_hits: usize,

    /// Acquires that created a new entry (successful factory invocations)
    pub cache_misses: usize,

    /// Factory invocations that returned an error
    pub factory_failures: usize,

    /// Keys rejected by the validator before reaching the factory
    pub rejected_keys: usize,

    /// Current count of distinct cached entries
    pub distinct_entries: usize,

    /// Fraction of successful acquires served from cache (0.0 to 1.0)
    pub hit_ratio: f64,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("total_acquired".to_string(), self.total_acquired.to_string());
        metrics.insert("cache_hits".to_string(), self.cache_hits.to_string());
        metrics.insert("cache_misses".to_string(), self.cache_misses.to_string());
        metrics.insert("factory_failures".to_string(), self.factory_failures.to_string());
        metrics.insert("rejected_keys".to_string(), self.rejected_keys.to_string());
        metrics.insert("distinct_entries".to_string(), self.distinct_entries.to_string());
        metrics.insert("hit_ratio".to_string(), format!("{:.2}", self.hit_ratio));
        metrics
    }
}

/// Metrics exporter for Prometheus format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use flyweight_pool::SharedObjectPool;
    /// use std::collections::HashMap;
    ///
    /// let pool = SharedObjectPool::new(|name: &String| name.clone());
    /// pool.acquire("Cappuccino".to_string()).unwrap();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "cafe".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("flavors", Some(&tags));
    /// assert!(output.contains("flyweightpool_entries_distinct"));
    /// assert!(output.contains("service=\"cafe\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        // Gauge metrics
        output.push_str("# HELP flyweightpool_entries_distinct Current distinct cached entries\n");
        output.push_str("# TYPE flyweightpool_entries_distinct gauge\n");
        output.push_str(&format!("flyweightpool_entries_distinct{{{}}} {}\n", labels, metrics.distinct_entries));

        output.push_str("# HELP flyweightpool_hit_ratio Fraction of acquires served from cache\n");
        output.push_str("# TYPE flyweightpool_hit_ratio gauge\n");
        output.push_str(&format!("flyweightpool_hit_ratio{{{}}} {:.2}\n", labels, metrics.hit_ratio));

        // Counter metrics
        output.push_str("# HELP flyweightpool_acquired_total Total successful acquires\n");
        output.push_str("# TYPE flyweightpool_acquired_total counter\n");
        output.push_str(&format!("flyweightpool_acquired_total{{{}}} {}\n", labels, metrics.total_acquired));

        output.push_str("# HELP flyweightpool_hits_total Acquires served from cache\n");
        output.push_str("# TYPE flyweightpool_hits_total counter\n");
        output.push_str(&format!("flyweightpool_hits_total{{{}}} {}\n", labels, metrics.cache_hits));

        output.push_str("# HELP flyweightpool_misses_total Acquires that invoked the factory\n");
        output.push_str("# TYPE flyweightpool_misses_total counter\n");
        output.push_str(&format!("flyweightpool_misses_total{{{}}} {}\n", labels, metrics.cache_misses));

        output.push_str("# HELP flyweightpool_factory_failures_total Factory invocations that failed\n");
        output.push_str("# TYPE flyweightpool_factory_failures_total counter\n");
        output.push_str(&format!("flyweightpool_factory_failures_total{{{}}} {}\n", labels, metrics.factory_failures));

        output.push_str("# HELP flyweightpool_rejected_keys_total Keys rejected before creation\n");
        output.push_str("# TYPE flyweightpool_rejected_keys_total counter\n");
        output.push_str(&format!("flyweightpool_rejected_keys_total{{{}}} {}\n", labels, metrics.rejected_keys));

        output
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal metrics tracker
pub(crate) struct MetricsTracker {
    pub cache_hits: AtomicUsize,
    pub cache_misses: AtomicUsize,
    pub factory_failures: AtomicUsize,
    pub rejected_keys: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            factory_failures: AtomicUsize::new(0),
            rejected_keys: AtomicUsize::new(0),
        }
    }

    pub fn get_metrics(&self, distinct_entries: usize) -> PoolMetrics {
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);
        let total_acquired = cache_hits + cache_misses;

        let hit_ratio = if total_acquired > 0 {
            cache_hits as f64 / total_acquired as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_acquired,
            cache_hits,
            cache_misses,
            factory_failures: self.factory_failures.load(Ordering::Relaxed),
            rejected_keys: self.rejected_keys.load(Ordering::Relaxed),
            distinct_entries,
            hit_ratio,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}
