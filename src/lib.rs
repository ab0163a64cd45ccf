//! # flyweight_pool
//!
//! Thread-safe keyed flyweight pool for Rust: at most one shared value
//! instance per key, created lazily by a caller-supplied factory.
//!
//! ## Features
//!
//! - At-most-one instance per distinct key for the pool's lifetime
//! - Atomic get-or-insert, safe under concurrent acquires of the same key
//! - Fallible factories: a failed creation leaves no entry behind
//! - Key validation before any factory invocation
//! - Metrics with HashMap and Prometheus-format export
//! - Health monitoring and per-entry usage introspection
//!
//! ## Quick Start
//!
//! ```rust
//! use flyweight_pool::SharedObjectPool;
//! use std::sync::Arc;
//!
//! let pool = SharedObjectPool::new(|flavor: &String| flavor.to_uppercase());
//!
//! let first = pool.acquire("Cappuccino".to_string()).unwrap();
//! let second = pool.acquire("Cappuccino".to_string()).unwrap();
//!
//! // Equal keys share one instance
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(pool.size(), 1);
//! ```

mod pool;
mod config;
mod metrics;
mod health;
mod usage;
mod errors;

pub use pool::SharedObjectPool;
pub use config::PoolConfiguration;
pub use metrics::{PoolMetrics, MetricsExporter};
pub use health::HealthStatus;
pub use usage::EntryUsage;
pub use errors::{FactoryError, PoolError, PoolResult};
