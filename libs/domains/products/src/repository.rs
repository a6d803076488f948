use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, NewProduct, Product};

/// Repository trait for Product persistence
///
/// Every listing returns products in ascending id order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the store assigns the id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Replace every field except `id`; `ProductError::NotFound` if the id is unknown
    async fn update(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    async fn list_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>>;

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>>;
}

#[derive(Debug)]
struct InMemoryState {
    products: BTreeMap<i32, Product>,
    next_id: i32,
}

/// In-process store for development and tests
///
/// Ids start at 1 and are never reused, mirroring a `SERIAL` column.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState {
                products: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    async fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        let state = self.state.read().await;
        state
            .products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id sequence exhausted".to_string()))?;

        let product = Product::from_new(id, input);
        state.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn find(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        let slot = state
            .products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *slot = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let removed = self.state.write().await.products.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn list_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.name == name).await)
    }

    async fn find_by_category(&self, category: Category) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.category == category).await)
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.available == available).await)
    }
}
