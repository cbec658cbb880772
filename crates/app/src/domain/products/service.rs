//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;
use vestry::pricing::{PriceBasis, PricingError, UnitPrice, unit_price};

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductDetails, QuoteRequest},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

/// Price one unit of `product`, logging when the requested material is not
/// offered and the base price is used instead.
pub(crate) fn quote(
    product: &ProductRecord,
    request: &QuoteRequest,
) -> Result<UnitPrice, PricingError> {
    let price = unit_price(
        &product.pricing(),
        request.material.as_deref(),
        request.cloth_provided,
    )?;

    if price.basis == PriceBasis::UnknownMaterial {
        warn!(
            product = %product.uuid,
            material = request.material.as_deref().unwrap_or_default(),
            "unknown material, falling back to base price"
        );
    }

    Ok(price)
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        denomination: Option<String>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products(&mut tx, denomination.as_deref())
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn quote_product(
        &self,
        product: ProductUuid,
        request: QuoteRequest,
    ) -> Result<UnitPrice, ProductsServiceError> {
        let product = self.get_product(product).await?;

        if !product.is_orderable() {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(quote(&product, &request)?)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.details.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product.uuid, &product.details)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError> {
        details.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &details)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Active catalog products, optionally for one denomination.
    async fn list_products(
        &self,
        denomination: Option<String>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product that has not been deleted.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Unit price of a product for the given options.
    async fn quote_product(
        &self,
        product: ProductUuid,
        request: QuoteRequest,
    ) -> Result<UnitPrice, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the details of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;
    use vestry::pricing::{ClothDiscount, Material};

    use crate::test::{TestContext, helpers::chasuble_details};

    use super::*;

    #[tokio::test]
    async fn create_product_round_trips_materials_and_discount() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let created = ctx
            .products
            .create_product(NewProduct {
                uuid,
                details: chasuble_details(),
            })
            .await?;

        let fetched = ctx.products.get_product(uuid).await?;

        assert_eq!(created, fetched);
        assert_eq!(fetched.base_price, dec!(1000));
        assert_eq!(fetched.materials.len(), 2);
        assert_eq!(
            fetched.cloth_provided_discount,
            ClothDiscount::Percentage { value: dec!(0.1) }
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_invalid_discount() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: ProductDetails {
                    cloth_provided_discount: ClothDiscount::Percentage { value: dec!(2) },
                    ..chasuble_details()
                },
            })
            .await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::InvalidPrice(
                PricingError::InvalidPercentage(_)
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_denomination_and_activity() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: chasuble_details(),
            })
            .await?;

        ctx.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: ProductDetails {
                    name: "Phelonion".to_string(),
                    denomination: "orthodox".to_string(),
                    ..chasuble_details()
                },
            })
            .await?;

        ctx.products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: ProductDetails {
                    name: "Retired Cope".to_string(),
                    is_active: false,
                    ..chasuble_details()
                },
            })
            .await?;

        let all = ctx.products.list_products(None).await?;
        let orthodox = ctx
            .products
            .list_products(Some("orthodox".to_string()))
            .await?;

        assert_eq!(all.len(), 2);
        assert_eq!(orthodox.len(), 1);
        assert!(orthodox.iter().all(|product| product.denomination == "orthodox"));

        Ok(())
    }

    #[tokio::test]
    async fn quote_product_prices_material_and_cloth() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(NewProduct {
                uuid,
                details: chasuble_details(),
            })
            .await?;

        let silk = ctx
            .products
            .quote_product(
                uuid,
                QuoteRequest {
                    material: Some("Silk Damask".to_string()),
                    cloth_provided: false,
                },
            )
            .await?;

        let cloth = ctx
            .products
            .quote_product(
                uuid,
                QuoteRequest {
                    material: None,
                    cloth_provided: true,
                },
            )
            .await?;

        let unknown = ctx
            .products
            .quote_product(
                uuid,
                QuoteRequest {
                    material: Some("Cloth of Gold".to_string()),
                    cloth_provided: false,
                },
            )
            .await?;

        assert_eq!(silk.amount.to_string(), "1250.00");
        assert_eq!(cloth.amount.to_string(), "900.00");
        assert_eq!(unknown.amount.to_string(), "1000.00");
        assert_eq!(unknown.basis, PriceBasis::UnknownMaterial);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_details() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(NewProduct {
                uuid,
                details: chasuble_details(),
            })
            .await?;

        let updated = ctx
            .products
            .update_product(
                uuid,
                ProductDetails {
                    base_price: dec!(1200),
                    materials: vec![Material {
                        name: "Velvet".to_string(),
                        additional_cost: dec!(80),
                    }],
                    cloth_provided_discount: ClothDiscount::Fixed { value: dec!(150) },
                    ..chasuble_details()
                },
            )
            .await?;

        assert_eq!(updated.base_price, dec!(1200));
        assert_eq!(updated.materials.len(), 1);
        assert_eq!(
            updated.cloth_provided_discount,
            ClothDiscount::Fixed { value: dec!(150) }
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_product_is_hidden() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(NewProduct {
                uuid,
                details: chasuble_details(),
            })
            .await?;

        ctx.products.delete_product(uuid).await?;

        let fetched = ctx.products.get_product(uuid).await;
        let listed = ctx.products.list_products(None).await?;
        let deleted_again = ctx.products.delete_product(uuid).await;

        assert!(matches!(fetched, Err(ProductsServiceError::NotFound)));
        assert!(listed.is_empty());
        assert!(matches!(deleted_again, Err(ProductsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn quote_inactive_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(NewProduct {
                uuid,
                details: ProductDetails {
                    is_active: false,
                    ..chasuble_details()
                },
            })
            .await?;

        let result = ctx
            .products
            .quote_product(uuid, QuoteRequest::default())
            .await;

        assert!(matches!(result, Err(ProductsServiceError::NotFound)));

        Ok(())
    }
}
