//! Coffee-shop flyweight scenario: many orders share few flavor instances

use flyweight_pool::SharedObjectPool;
use std::sync::Arc;

#[derive(Debug)]
struct CoffeeFlavor {
    name: String,
}

impl CoffeeFlavor {
    fn serve(&self, table: u32) {
        println!("Serving Coffee flavor {} to table number {}", self.name, table);
    }
}

fn main() {
    let flavor_factory =
        SharedObjectPool::new(|name: &String| CoffeeFlavor { name: name.clone() });

    let orders: &[(&str, u32)] = &[
        ("Cappuccino", 2),
        ("Cappuccino", 2),
        ("Frappe", 1),
        ("Frappe", 1),
        ("Xpresso", 1),
        ("Frappe", 897),
        ("Cappuccino", 97),
        ("Cappuccino", 97),
        ("Frappe", 3),
        ("Xpresso", 3),
        ("Cappuccino", 3),
        ("Xpresso", 96),
        ("Frappe", 552),
        ("Cappuccino", 121),
        ("Xpresso", 121),
    ];

    let mut taken: Vec<(Arc<CoffeeFlavor>, u32)> = Vec::new();
    for (flavor, table) in orders {
        let shared = flavor_factory.acquire(flavor.to_string()).unwrap();
        taken.push((shared, *table));
    }

    for (flavor, table) in &taken {
        flavor.serve(*table);
    }

    println!();
    println!(
        "total CoffeeFlavor objects made: {}",
        flavor_factory.size()
    );
    println!(
        "orders served from shared instances: {}",
        taken.len() - flavor_factory.size()
    );
}
