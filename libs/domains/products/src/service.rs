//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductLookup};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates input and maps each operation onto one repository call,
/// except update which first checks existence.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Replace every field of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: NewProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if self.repository.find(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        self.repository.update(Product::from_new(id, input)).await
    }

    /// Delete a product; deleting a missing id succeeds
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            tracing::debug!(product_id = id, "Delete requested for missing product");
        }
        Ok(())
    }

    /// List products matching a single lookup
    #[instrument(skip(self))]
    pub async fn list_products(&self, lookup: ProductLookup) -> ProductResult<Vec<Product>> {
        match lookup {
            ProductLookup::All => self.repository.list_all().await,
            ProductLookup::ByName(name) => self.repository.find_by_name(&name).await,
            ProductLookup::ByCategory(category) => {
                self.repository.find_by_category(category).await
            }
            ProductLookup::ByAvailability(available) => {
                self.repository.find_by_availability(available).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;
    use rust_decimal::Decimal;

    fn hat() -> NewProduct {
        NewProduct {
            name: "Hat".to_string(),
            description: "A red fedora".to_string(),
            price: Decimal::new(5995, 2),
            available: true,
            category: Category::Cloths,
        }
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(Product::from_new(1, input)));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(hat()).await.unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Hat");
    }

    #[tokio::test]
    async fn test_create_product_validation_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let input = NewProduct {
            name: String::new(),
            ..hat()
        };

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_product_keeps_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find()
            .with(eq(7))
            .returning(|id| Ok(Some(Product::from_new(id, hat()))));
        mock_repo
            .expect_update()
            .withf(|p| p.id == 7 && p.name == "Cap" && !p.available)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let input = NewProduct {
            name: "Cap".to_string(),
            available: false,
            ..hat()
        };

        let updated = service.update_product(7, input).await.unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.name, "Cap");
    }

    #[tokio::test]
    async fn test_update_missing_product_skips_write() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service.update_product(3, hat()).await;

        assert!(matches!(result, Err(ProductError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_ok() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        assert!(service.delete_product(9).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_dispatches_on_lookup() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_category()
            .with(eq(Category::Food))
            .times(1)
            .returning(|_| Ok(vec![]));
        mock_repo
            .expect_find_by_name()
            .withf(|name| name == "Hat")
            .times(1)
            .returning(|_| Ok(vec![]));
        mock_repo
            .expect_find_by_availability()
            .with(eq(true))
            .times(1)
            .returning(|_| Ok(vec![]));
        mock_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        for lookup in [
            ProductLookup::ByCategory(Category::Food),
            ProductLookup::ByName("Hat".to_string()),
            ProductLookup::ByAvailability(true),
            ProductLookup::All,
        ] {
            assert!(service.list_products(lookup).await.unwrap().is_empty());
        }
    }
}
