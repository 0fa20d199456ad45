//! Test data for product tests

use serde_json::{json, Value};

pub fn product_payload(name: &str, price: f64, quantity: i64) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "quantity": quantity,
    })
}

/// A small catalog with distinct prices and quantities
pub fn sample_catalog() -> Vec<Value> {
    vec![
        product_payload("Keyboard", 49.99, 10),
        product_payload("Mouse", 19.5, 40),
        product_payload("Monitor", 199.0, 5),
        product_payload("Cable", 4.25, 100),
        product_payload("Laptop", 999.0, 2),
    ]
}

pub fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|p| p["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
