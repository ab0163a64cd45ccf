//! Per-entry usage introspection

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

/// Usage record for a single cached entry
///
/// `times_shared` counts acquisitions served from cache after the entry was
/// created; an entry acquired once and never again reports zero.
///
/// # Examples
///
/// ```
/// use flyweight_pool::SharedObjectPool;
///
/// let pool = SharedObjectPool::new(|name: &String| name.len());
///
/// pool.acquire("Cappuccino".to_string()).unwrap();
/// pool.acquire("Cappuccino".to_string()).unwrap();
///
/// let usage = pool.entry_usage(&"Cappuccino".to_string()).unwrap();
/// assert_eq!(usage.times_shared, 1);
/// ```
#[derive(Debug, Clone)]
pub struct EntryUsage {
    /// When the entry was first created
    pub created_at: Instant,

    /// Cache hits served since creation
    pub times_shared: usize,
}

impl EntryUsage {
    fn new() -> Self {
        Self {
            created_at: Instant::now(),
            times_shared: 0,
        }
    }
}

/// Tracker for per-key usage records
pub(crate) struct UsageTracker<K> {
    records: Mutex<HashMap<K, EntryUsage>>,
}

impl<K: Eq + Hash> UsageTracker<K> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Record creation of a fresh entry
    pub fn track_entry(&self, key: K) {
        let mut records = self.records.lock();
        records.insert(key, EntryUsage::new());
    }

    /// Record a cache hit for an existing entry
    pub fn record_share(&self, key: &K) {
        let mut records = self.records.lock();
        if let Some(record) = records.get_mut(key) {
            record.times_shared += 1;
        }
    }

    pub fn usage(&self, key: &K) -> Option<EntryUsage> {
        let records = self.records.lock();
        records.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_count_starts_at_zero() {
        let tracker = UsageTracker::new();
        tracker.track_entry("Frappe");

        let usage = tracker.usage(&"Frappe").unwrap();
        assert_eq!(usage.times_shared, 0);
    }

    #[test]
    fn test_shares_accumulate() {
        let tracker = UsageTracker::new();
        tracker.track_entry("Cappuccino");
        tracker.record_share(&"Cappuccino");
        tracker.record_share(&"Cappuccino");

        assert_eq!(tracker.usage(&"Cappuccino").unwrap().times_shared, 2);
    }

    #[test]
    fn test_unknown_key_has_no_record() {
        let tracker = UsageTracker::<&str>::new();
        tracker.record_share(&"Xpresso");
        assert!(tracker.usage(&"Xpresso").is_none());
    }
}
