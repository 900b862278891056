// Application state module
// Owns the configuration and the product store shared by all connections

use super::types::Config;
use crate::store::{seed_products, ProductStore};

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: ProductStore,
}

impl AppState {
    /// Create `AppState`, seeding the store when `store.seed` is set
    pub fn new(config: &Config) -> Self {
        let store = if config.store.seed {
            ProductStore::with_products(seed_products())
        } else {
            ProductStore::new()
        };

        Self {
            config: config.clone(),
            store,
        }
    }
}
