//! Health monitoring for flyweight pools

use crate::metrics::PoolMetrics;

/// Health status of a flyweight pool
///
/// # Examples
///
/// ```
/// use flyweight_pool::SharedObjectPool;
///
/// let pool = SharedObjectPool::new(|name: &String| name.clone());
/// pool.acquire("Cappuccino".to_string()).unwrap();
///
/// let health = pool.health_status();
/// assert!(health.is_healthy());
/// assert_eq!(health.distinct_entries, 1);
/// ```
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Number of warnings detected
    pub warning_count: usize,

    /// Fraction of acquires served from cache (0.0 to 1.0)
    pub hit_ratio: f64,

    /// Distinct cached entries
    pub distinct_entries: usize,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Build a health status from a metrics snapshot
    pub fn from_metrics(metrics: &PoolMetrics) -> Self {
        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if metrics.factory_failures > 0 {
            warnings.push(format!(
                "Factory failures observed: {}",
                metrics.factory_failures
            ));
            is_healthy = false;
        }

        // A pool that almost never shares is not doing its job
        if metrics.total_acquired >= 100 && metrics.hit_ratio < 0.1 {
            warnings.push(format!(
                "Poor reuse: hit ratio {:.1}% over {} acquires",
                metrics.hit_ratio * 100.0,
                metrics.total_acquired
            ));
        }

        if metrics.rejected_keys > 0 {
            warnings.push(format!("Keys rejected by validator: {}", metrics.rejected_keys));
        }

        Self {
            is_healthy,
            warning_count: warnings.len(),
            hit_ratio: metrics.hit_ratio,
            distinct_entries: metrics.distinct_entries,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}
