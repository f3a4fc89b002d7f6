use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, ProductChanges, SortDirection, SortField};

/// Data access for the products table.
///
/// Every method maps to exactly one statement and reports failures through
/// [`ProductResult`]. Callers that want degrade-to-default behaviour go
/// through [`ProductService`](crate::service::ProductService).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All rows in store-native order
    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Rows whose name contains `fragment` (case-sensitive)
    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// Rows whose category equals `category` exactly
    async fn filter_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    async fn count(&self) -> ProductResult<u64>;

    /// All rows ordered by `field`; `None` leaves store-native order
    async fn sorted(
        &self,
        field: Option<SortField>,
        direction: SortDirection,
    ) -> ProductResult<Vec<Product>>;

    /// Insert and return the stored row with its assigned id
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Overwrite the mutable fields. `false` when no row has `id`.
    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<bool>;

    /// `false` when no row has `id`
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    /// Number of rows removed
    async fn delete_all(&self) -> ProductResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids start at 1 and are never reused; iteration order equals insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|p| p.name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn filter_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn count(&self) -> ProductResult<u64> {
        let store = self.store.read().await;
        Ok(store.rows.len() as u64)
    }

    async fn sorted(
        &self,
        field: Option<SortField>,
        direction: SortDirection,
    ) -> ProductResult<Vec<Product>> {
        let mut products = self.list().await?;

        if let Some(field) = field {
            // Stable sort, ties keep insertion order
            products.sort_by(|a, b| {
                let ordering = match field {
                    SortField::Name => a.name.cmp(&b.name),
                    SortField::Category => a.category.cmp(&b.category),
                    SortField::Price => a.price.cmp(&b.price),
                };
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        Ok(products)
    }

    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.next_id += 1;
        let stored = Product {
            id: store.next_id,
            ..product
        };
        store.rows.insert(stored.id, stored.clone());

        tracing::info!(product_id = stored.id, "Created product");
        Ok(stored)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        match store.rows.get_mut(&id) {
            Some(product) => {
                product.apply_changes(changes);
                tracing::info!(product_id = id, "Updated product");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.rows.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut store = self.store.write().await;
        let removed = store.rows.len() as u64;
        store.rows.clear();
        tracing::info!(removed, "Deleted all products");
        Ok(removed)
    }
}
