//! Product record types

use serde::{Deserialize, Serialize};

/// A single product record, keyed by `id` in the store
///
/// Fields absent from a request body decode as `""` / `0`.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Currency-agnostic unit
    pub price: i64,
    pub quantity: i64,
}

impl Product {
    pub fn new(id: &str, name: &str, price: i64, quantity: i64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            quantity,
        }
    }
}

/// Payload accepted by update-product.
///
/// Only `name` and `price` are applied; any other fields in the body are ignored.
/// Missing ones reset to `""` / `0`, as a whole-product decode would.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct ProductUpdate {
    pub name: String,
    pub price: i64,
}

/// Records loaded into a fresh store at startup
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("1", "Laptop", 1000, 10),
        Product::new("2", "Mouse", 10, 100),
        Product::new("3", "Keyboard", 20, 50),
    ]
}
