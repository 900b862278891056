//! In-memory product store
//!
//! A single `RwLock` guards the whole map: lookups and listings share the lock,
//! mutations take it exclusively. No lock is ever held across an `.await`.

mod product;

pub use product::{seed_products, Product, ProductUpdate};

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Volatile id -> `Product` mapping, owned by `AppState`
#[derive(Debug, Default)]
pub struct ProductStore {
    products: RwLock<HashMap<String, Product>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with the given products
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<HashMap<_, _>>();
        Self {
            products: RwLock::new(map),
        }
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.read().get(id).cloned()
    }

    /// Insert or overwrite; the product's own id is the key (last write wins)
    pub fn put(&self, product: Product) {
        self.write().insert(product.id.clone(), product);
    }

    /// Remove and return the prior value
    pub fn delete(&self, id: &str) -> Option<Product> {
        self.write().remove(id)
    }

    /// Replace name and price in one critical section, keeping id and quantity
    pub fn update(&self, id: &str, update: ProductUpdate) -> Option<Product> {
        let mut products = self.write();
        let product = products.get_mut(id)?;
        product.name = update.name;
        product.price = update.price;
        Some(product.clone())
    }

    /// Unordered snapshot of every stored product
    pub fn list_all(&self) -> Vec<Product> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated:
    // every mutation is a single map call or a field assignment.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn seeded() -> ProductStore {
        ProductStore::with_products(seed_products())
    }

    #[test]
    fn test_get_seeded() {
        let store = seeded();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("1"), Some(Product::new("1", "Laptop", 1000, 10)));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_put_overwrites() {
        let store = seeded();
        store.put(Product::new("1", "Desktop", 1500, 2));
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("1").unwrap().name, "Desktop");
    }

    #[test]
    fn test_delete_returns_prior_value() {
        let store = seeded();
        let removed = store.delete("3");
        assert_eq!(removed, Some(Product::new("3", "Keyboard", 20, 50)));
        assert_eq!(store.get("3"), None);
        assert_eq!(store.delete("3"), None);
    }

    #[test]
    fn test_update_preserves_id_and_quantity() {
        let store = seeded();
        let updated = store
            .update(
                "2",
                ProductUpdate {
                    name: "Wireless Mouse".to_string(),
                    price: 15,
                },
            )
            .unwrap();
        assert_eq!(updated, Product::new("2", "Wireless Mouse", 15, 100));
        assert_eq!(store.get("2"), Some(updated));
    }

    #[test]
    fn test_update_unknown_id() {
        let store = seeded();
        let result = store.update(
            "99",
            ProductUpdate {
                name: "Ghost".to_string(),
                price: 1,
            },
        );
        assert!(result.is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_list_all_as_set() {
        let store = seeded();
        store.put(Product::new("4", "Monitor", 200, 5));
        let ids: HashSet<String> = store.list_all().into_iter().map(|p| p.id).collect();
        let expected: HashSet<String> = ["1", "2", "3", "4"].iter().map(ToString::to_string).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_empty_store() {
        let store = ProductStore::new();
        assert!(store.is_empty());
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn test_concurrent_puts() {
        let store = Arc::new(ProductStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store.put(Product::new(&format!("{t}-{i}"), "item", i, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 800);
    }
}
