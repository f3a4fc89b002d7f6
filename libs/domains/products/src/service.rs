//! Product Service
//!
//! Each operation issues exactly one repository call. Repository failures are
//! logged and converted to an empty or default result, so callers never see an
//! error from this layer: a storage outage reads as "no products".

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, SortDirection, SortField};
use crate::repository::ProductRepository;

/// Product service over a shared repository handle.
///
/// Holds no state between calls besides the repository (a connection pool).
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Log the error and fall back to `T::default()`.
fn or_default<T: Default>(result: ProductResult<T>, operation: &'static str) -> T {
    result.unwrap_or_else(|error| {
        tracing::error!(operation, error = %error, "Product operation failed, returning default");
        T::default()
    })
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products in store-native order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Vec<Product> {
        or_default(self.repository.list().await, "list_products")
    }

    /// `None` when absent or when the lookup failed
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Option<Product> {
        or_default(self.repository.get_by_id(id).await, "get_product")
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, name: &str) -> Vec<Product> {
        or_default(self.repository.search_by_name(name).await, "search_products")
    }

    #[instrument(skip(self))]
    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        or_default(
            self.repository.filter_by_category(category).await,
            "products_by_category",
        )
    }

    #[instrument(skip(self))]
    pub async fn total_count(&self) -> u64 {
        or_default(self.repository.count().await, "total_count")
    }

    /// `None` returns the unsorted listing.
    #[instrument(skip(self))]
    pub async fn sorted_products(
        &self,
        field: Option<SortField>,
        direction: SortDirection,
    ) -> Vec<Product> {
        or_default(
            self.repository.sorted(field, direction).await,
            "sorted_products",
        )
    }

    /// Persist a new product; its `id` is ignored.
    ///
    /// Returns the stored row, or `None` if the write failed.
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn add_product(&self, product: Product) -> Option<Product> {
        or_default(
            self.repository.create(product).await.map(Some),
            "add_product",
        )
    }

    /// Overwrite name, description, category and price of product `id`.
    ///
    /// A missing id is a no-op. The id in `product` is not used.
    #[instrument(skip(self, product))]
    pub async fn update_product(&self, id: i32, product: Product) {
        let updated = or_default(
            self.repository.update(id, product.into()).await,
            "update_product",
        );
        if !updated {
            tracing::debug!(product_id = id, "No product updated");
        }
    }

    /// A missing id is a no-op.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) {
        or_default(self.repository.delete(id).await, "delete_product");
    }

    #[instrument(skip(self))]
    pub async fn delete_all_products(&self) {
        or_default(self.repository.delete_all().await, "delete_all_products");
    }
}
