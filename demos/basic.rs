//! Basic usage examples for SharedObjectPool

use flyweight_pool::{FactoryError, PoolConfiguration, PoolError, SharedObjectPool};
use std::sync::Arc;

fn main() {
    println!("=== flyweight_pool - Basic Examples ===\n");

    // Example 1: Simple pool
    simple_pool();

    // Example 2: Pool with key validation
    validated_pool();

    // Example 3: Fallible factory
    fallible_factory();

    // Example 4: Metrics and health
    metrics_and_health();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let pool = SharedObjectPool::new(|flavor: &String| flavor.to_uppercase());

    let first = pool.acquire("Cappuccino".to_string()).unwrap();
    let second = pool.acquire("Cappuccino".to_string()).unwrap();

    println!("   Got: {}", *first);
    println!("   Shared instance: {}", Arc::ptr_eq(&first, &second));
    println!("   Distinct entries: {}\n", pool.size());
}

fn validated_pool() {
    println!("2. Validated Pool:");

    let config = PoolConfiguration::new().with_key_validator(|k: &String| !k.is_empty());
    let pool = SharedObjectPool::with_config(|flavor: &String| flavor.len(), config);

    match pool.acquire(String::new()) {
        Err(PoolError::InvalidKey) => println!("   Empty key rejected before creation"),
        other => println!("   Unexpected: {:?}", other),
    }

    pool.acquire("Frappe".to_string()).unwrap();
    println!("   Entries after one valid key: {}\n", pool.size());
}

fn fallible_factory() {
    println!("3. Fallible Factory:");

    let pool = SharedObjectPool::with_fallible(|flavor: &String| {
        if flavor == "Decaf" {
            Err(FactoryError::new("not served here"))
        } else {
            Ok(flavor.clone())
        }
    });

    match pool.acquire("Decaf".to_string()) {
        Err(err) => println!("   Factory error surfaced: {}", err),
        Ok(_) => unreachable!(),
    }

    // The failed key left no entry behind
    println!("   Entries after failure: {}\n", pool.size());
}

fn metrics_and_health() {
    println!("4. Metrics and Health:");
    let pool = SharedObjectPool::new(|flavor: &String| flavor.clone());

    for key in ["Cappuccino", "Cappuccino", "Frappe", "Xpresso", "Frappe"] {
        pool.acquire(key.to_string()).unwrap();
    }

    let metrics = pool.get_metrics();
    println!("   Total acquired: {}", metrics.total_acquired);
    println!("   Cache hits: {}", metrics.cache_hits);
    println!("   Hit ratio: {:.2}", metrics.hit_ratio);

    let health = pool.health_status();
    println!("   Healthy: {}", health.is_healthy());

    println!("\n   Prometheus export:");
    let output = pool.export_metrics_prometheus("demo", None);
    for line in output.lines().filter(|l| !l.starts_with('#')) {
        println!("   {}", line);
    }
}
