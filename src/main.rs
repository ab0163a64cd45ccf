// flyweight_pool - keyed shared-object pool
// This is just a binary wrapper - the actual library is in lib.rs
// Run examples with: cargo run --example basic

use flyweight_pool::SharedObjectPool;
use std::sync::Arc;

fn main() {
    println!("=== flyweight_pool v1.0.0 ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example basic");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let pool = SharedObjectPool::new(|flavor: &String| flavor.to_uppercase());

    let first = pool.acquire("Cappuccino".to_string()).unwrap();
    let second = pool.acquire("Cappuccino".to_string()).unwrap();

    println!("  Got flavor: {}", *first);
    println!("  Same instance on repeat: {}", Arc::ptr_eq(&first, &second));
    println!("  Distinct entries: {}", pool.size());
}
